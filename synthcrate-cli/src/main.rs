//! `synthcrate` command-line tool
//!
//! Converts vertex-colored OBJ meshes to PLY, plans dataset scenes from a
//! directory of PLY assets and renders instance segmentation maps for
//! inspection.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use image::DynamicImage;
use std::path::PathBuf;
use std::process::ExitCode;
use synthcrate_io::{convert_directory, convert_file, ColorPolicy, ConvertOptions};
use synthcrate_scene::{
    colorize_instances, discover_assets, normalize_instances, read_instance_map, write_png,
    PlanWriter, SceneAssembler, SceneConfig,
};

#[derive(Parser, Debug)]
#[command(name = "synthcrate", version, about = "Synthetic multi-view dataset preparation")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one OBJ file to PLY
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        options: ConvertFlags,
        /// Read the written file back and compare it with the input mesh
        #[arg(long)]
        verify: bool,
    },
    /// Convert every OBJ file in a directory
    Batch {
        input_dir: PathBuf,
        output_dir: PathBuf,
        #[command(flatten)]
        options: ConvertFlags,
    },
    /// Plan scenes from a directory of PLY assets
    Plan {
        asset_dir: PathBuf,
        output_dir: PathBuf,
        /// JSON scene configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Number of scenes, overrides the configuration
        #[arg(long)]
        scenes: Option<usize>,
        /// Base random seed, overrides the configuration
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Render an instance segmentation map as a color or grayscale PNG
    Colorize {
        input: PathBuf,
        output: PathBuf,
        /// Stretch ids to grayscale instead of using the color palette
        #[arg(long)]
        grayscale: bool,
    },
}

#[derive(Args, Debug)]
struct ConvertFlags {
    /// Reject vertices without color instead of making them white
    #[arg(long)]
    strict_colors: bool,
    /// Treat meshes without vertices or faces as errors
    #[arg(long)]
    reject_empty: bool,
}

impl ConvertFlags {
    fn to_options(&self, verify: bool) -> ConvertOptions {
        ConvertOptions {
            color_policy: if self.strict_colors {
                ColorPolicy::Strict
            } else {
                ColorPolicy::DefaultWhite
            },
            reject_empty: self.reject_empty,
            verify,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Convert {
            input,
            output,
            options,
            verify,
        } => {
            let summary = convert_file(&input, &output, &options.to_options(verify))
                .with_context(|| format!("converting {}", input.display()))?;
            println!(
                "{} -> {} ({} vertices, {} faces)",
                input.display(),
                output.display(),
                summary.vertex_count,
                summary.face_count
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Batch {
            input_dir,
            output_dir,
            options,
        } => {
            let report = convert_directory(&input_dir, &output_dir, &options.to_options(false))
                .with_context(|| format!("converting files in {}", input_dir.display()))?;
            for file in &report.converted {
                println!("converted {} -> {}", file.input.display(), file.output.display());
            }
            for file in &report.failed {
                eprintln!("failed {}: {}", file.input.display(), file.error);
            }
            println!(
                "{} of {} files converted",
                report.converted.len(),
                report.total()
            );
            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Plan {
            asset_dir,
            output_dir,
            config,
            scenes,
            seed,
        } => {
            let mut scene_config = match &config {
                Some(path) => SceneConfig::from_file(path)
                    .with_context(|| format!("loading configuration {}", path.display()))?,
                None => SceneConfig::default(),
            };
            if let Some(scenes) = scenes {
                scene_config.scene_count = scenes;
            }
            if seed.is_some() {
                scene_config.seed = seed;
            }

            let assets = discover_assets(&asset_dir)
                .with_context(|| format!("reading assets from {}", asset_dir.display()))?;
            if assets.is_empty() {
                bail!("no .ply assets found in {}", asset_dir.display());
            }
            log::info!("found {} assets in {}", assets.len(), asset_dir.display());
            for asset in &assets {
                log::debug!("asset {} has category {}", asset.name, asset.category_id);
            }

            log::debug!(
                "planning {} scenes, seed {:?}",
                scene_config.scene_count,
                scene_config.seed
            );
            let assembler = SceneAssembler::new(scene_config)?;
            let mut writer = PlanWriter::new();
            let plans = assembler.run(&assets, &output_dir, &mut writer)?;

            let relaxed: usize = plans.iter().map(|p| p.fallback_count).sum();
            for path in writer.written() {
                println!("wrote {}", path.display());
            }
            println!(
                "{} scenes planned with {} assets ({} relaxed placements)",
                plans.len(),
                assets.len(),
                relaxed
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Colorize {
            input,
            output,
            grayscale,
        } => {
            let map = read_instance_map(&input)
                .with_context(|| format!("reading instance map {}", input.display()))?;
            let rendered = if grayscale {
                DynamicImage::ImageLuma8(normalize_instances(&map))
            } else {
                DynamicImage::ImageRgb8(colorize_instances(&map))
            };
            write_png(&rendered, &output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("{} -> {}", input.display(), output.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
