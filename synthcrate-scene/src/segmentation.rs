//! Instance segmentation map post-processing
//!
//! Renderers emit instance maps as 16-bit single-channel images where each
//! pixel holds an instance id and 0 is background. This module turns them
//! into images people can look at: a fixed-palette color rendering and a
//! stretched grayscale rendering.

use image::{DynamicImage, GrayImage, ImageBuffer, ImageError, ImageFormat, Luma, Rgb, RgbImage};
use std::path::Path;
use synthcrate_core::{Error, Result};

/// Per-pixel instance ids, 0 for background
pub type InstanceMap = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Colors assigned to instance ids, cycled by `id % 20`
pub const INSTANCE_PALETTE: [[u8; 3]; 20] = [
    [230, 25, 75],
    [60, 180, 75],
    [255, 225, 25],
    [0, 130, 200],
    [245, 130, 48],
    [145, 30, 180],
    [70, 240, 240],
    [240, 50, 230],
    [210, 245, 60],
    [250, 190, 190],
    [0, 128, 128],
    [230, 190, 255],
    [170, 110, 40],
    [255, 250, 200],
    [128, 0, 0],
    [170, 255, 195],
    [128, 128, 0],
    [255, 215, 180],
    [0, 0, 128],
    [128, 128, 128],
];

/// Display color of an instance id; background is black
pub fn instance_color(id: u16) -> Rgb<u8> {
    if id == 0 {
        Rgb([0, 0, 0])
    } else {
        Rgb(INSTANCE_PALETTE[id as usize % INSTANCE_PALETTE.len()])
    }
}

/// Render an instance map with [`INSTANCE_PALETTE`]
pub fn colorize_instances(map: &InstanceMap) -> RgbImage {
    RgbImage::from_fn(map.width(), map.height(), |x, y| {
        instance_color(map.get_pixel(x, y)[0])
    })
}

/// Stretch instance ids to the full 8-bit range: `id * 255 / max_id`, truncated.
///
/// A map with no instances stays black.
pub fn normalize_instances(map: &InstanceMap) -> GrayImage {
    let max_id = map.pixels().map(|p| p[0]).max().unwrap_or(0);
    if max_id == 0 {
        return GrayImage::new(map.width(), map.height());
    }

    let max_id = max_id as u32;
    GrayImage::from_fn(map.width(), map.height(), |x, y| {
        let id = map.get_pixel(x, y)[0] as u32;
        Luma([(id * 255 / max_id) as u8])
    })
}

/// Distinct non-background ids present in the map, ascending
pub fn instance_ids(map: &InstanceMap) -> Vec<u16> {
    let mut ids: Vec<u16> = map.pixels().map(|p| p[0]).filter(|&id| id != 0).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Load an instance map from an 8- or 16-bit grayscale image.
///
/// 8-bit values are taken as ids unchanged rather than rescaled to 16 bits.
pub fn read_instance_map<P: AsRef<Path>>(path: P) -> Result<InstanceMap> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| read_error(path, e))?;

    match image {
        DynamicImage::ImageLuma16(map) => Ok(map),
        DynamicImage::ImageLuma8(gray) => Ok(ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
            Luma([gray.get_pixel(x, y)[0] as u16])
        })),
        other => Err(Error::UnsupportedFormat(format!(
            "{} is {:?}, expected a single-channel instance map",
            path.display(),
            other.color()
        ))),
    }
}

/// Save an instance map as a 16-bit PNG
pub fn write_instance_map<P: AsRef<Path>>(map: &InstanceMap, path: P) -> Result<()> {
    let path = path.as_ref();
    map.save_with_format(path, ImageFormat::Png)
        .map_err(|e| write_error(path, e))
}

/// Save a rendered map as PNG
pub fn write_png<P: AsRef<Path>>(image: &DynamicImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, err: ImageError) -> Error {
    match err {
        ImageError::IoError(io) => Error::Io(io),
        other => Error::Image(format!("{}: {}", path.display(), other)),
    }
}

fn read_error(path: &Path, err: ImageError) -> Error {
    match err {
        ImageError::IoError(io) => Error::from_input_io(path, io),
        other => Error::Image(format!("{}: {}", path.display(), other)),
    }
}
