use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum, ValueHint};
use image_lib::Rgb;
use superpixel::{
    draw_label_contours, paint_labels, paint_mean_colors, Config, Planes, SeedLayout, Segmenter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Region boundaries drawn over the input
    Contours,
    /// One random color per region
    Labels,
    /// Every region filled with its mean color
    Mean,
}

#[derive(Parser, Debug)]
#[command(name = "superpixel", version, about = "Zero-parameter SLIC superpixels")]
struct Cli {
    /// Input image path
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
    /// Requested number of regions
    k: usize,

    /// Output image path
    #[arg(short, long, value_hint = ValueHint::FilePath, default_value = "superpixels.png")]
    output: PathBuf,
    /// Clustering iterations
    #[arg(long, default_value_t = superpixel::config::DEFAULT_ITERATIONS)]
    iterations: usize,
    /// Use a square seed grid instead of the hexagonal one
    #[arg(long)]
    square_grid: bool,
    /// Skip moving seeds off high-gradient pixels
    #[arg(long)]
    no_perturb: bool,
    /// What to render
    #[arg(long, value_enum, default_value_t = Mode::Contours)]
    mode: Mode,
    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Also write rotating log files into this directory
    #[arg(long, value_hint = ValueHint::DirPath)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            iterations: self.iterations,
            seed_layout: if self.square_grid {
                SeedLayout::Square
            } else {
                SeedLayout::Hexagonal
            },
            perturb_seeds: !self.no_perturb,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    common::log_setup::setup_logging(&cli.log_level, cli.log_dir.as_deref())
        .context("Failed to set up logging")?;

    let image = image_lib::open(&cli.input)
        .with_context(|| format!("Failed to open '{}'", cli.input.display()))?
        .to_rgb8();
    let planes = Planes::from_rgb8(&image)?;

    let segmentation = Segmenter::new(cli.config()).segment(&planes, cli.k)?;
    tracing::info!(
        input = %cli.input.display(),
        width = planes.width(),
        height = planes.height(),
        requested = cli.k,
        seeds = segmentation.num_seeds(),
        regions = segmentation.num_regions(),
        "Segmented"
    );

    let rendered = match cli.mode {
        Mode::Contours => draw_label_contours(&image, segmentation.labels(), Rgb([255, 0, 0])),
        Mode::Labels => paint_labels(segmentation.labels()),
        Mode::Mean => paint_mean_colors(segmentation.labels(), &planes),
    };
    rendered
        .save(&cli.output)
        .with_context(|| format!("Failed to write '{}'", cli.output.display()))?;

    tracing::info!(output = %cli.output.display(), mode = ?cli.mode, "Saved");
    Ok(())
}
