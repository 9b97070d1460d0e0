//! Asset discovery

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use synthcrate_core::{Error, Result};

/// Category id of pixels that belong to no object
pub const BACKGROUND_CATEGORY: u16 = 0;

/// A mesh file that can be placed in a scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// File stem, used as the object name
    pub name: String,
    pub path: PathBuf,
    /// 1-based id written to segmentation maps
    pub category_id: u16,
}

/// Collect the `.ply` files directly inside `dir` in file-name order.
///
/// Category ids follow that order starting at 1.
pub fn discover_assets<P: AsRef<Path>>(dir: P) -> Result<Vec<Asset>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| Error::from_input_io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_ply = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("ply"));
        if is_ply && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.len() > u16::MAX as usize {
        return Err(Error::InvalidParameter(format!(
            "{} assets exceed the {} category ids a 16-bit segmentation map can hold",
            paths.len(),
            u16::MAX
        )));
    }

    let assets = paths
        .into_iter()
        .enumerate()
        .map(|(index, path)| Asset {
            name: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            category_id: index as u16 + 1,
            path,
        })
        .collect::<Vec<_>>();

    log::debug!("found {} assets in {}", assets.len(), dir.display());
    Ok(assets)
}
