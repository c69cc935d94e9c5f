use clap::Parser;
use image::RgbImage;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use circlescan::{
    load_image, CircleSearch, FilePresenter, Presenter, SearchConfig, SearchOutcome,
    DEFAULT_IMAGE_PATH,
};

#[derive(Parser)]
#[command(name = "circlescan")]
#[command(about = "Find a circle near the image center with an expanding mask search")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE", default_value = DEFAULT_IMAGE_PATH)]
    image_path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Write the annotated image to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Don't open a window for the result
    #[arg(long)]
    no_window: bool,

    /// Gaussian blur sigma [default: 2.0]
    #[arg(long)]
    sigma: Option<f32>,

    /// Accumulator resolution ratio [default: 1.2]
    #[arg(long)]
    dp: Option<f32>,

    /// Minimum distance between circle centers [default: 20]
    #[arg(long)]
    min_dist: Option<f32>,

    /// Upper Canny threshold [default: 50]
    #[arg(long)]
    param1: Option<f32>,

    /// Accumulator threshold [default: 30]
    #[arg(long)]
    param2: Option<u32>,

    /// Smallest circle radius [default: 10]
    #[arg(long)]
    min_radius: Option<u32>,

    /// Largest circle radius, 0 for no limit [default: 0]
    #[arg(long)]
    max_radius: Option<u32>,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        let mut config = SearchConfig::default();
        if let Some(sigma) = self.sigma {
            config.blur_sigma = sigma;
        }
        let hough = &mut config.hough;
        if let Some(dp) = self.dp {
            hough.dp = dp;
        }
        if let Some(min_dist) = self.min_dist {
            hough.min_dist = min_dist;
        }
        if let Some(param1) = self.param1 {
            hough.param1 = param1;
        }
        if let Some(param2) = self.param2 {
            hough.param2 = param2;
        }
        if let Some(min_radius) = self.min_radius {
            hough.min_radius = min_radius;
        }
        if let Some(max_radius) = self.max_radius {
            hough.max_radius = max_radius;
        }
        config
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = args.search_config();

    info!("Loading image: {}", args.image_path.display());
    let mut image = load_image(&args.image_path)?;
    info!("Image loaded: {}x{}", image.width(), image.height());

    let mut search = CircleSearch::new(config);
    if let Some(debug_dir) = args.debug_out.clone() {
        search = search.with_debug(debug_dir)?;
    }

    let show_window = cfg!(feature = "gui") && !args.no_window;
    if !show_window && args.output.is_none() {
        warn!("No window and no --output given; the result will only be logged");
    }

    let mut file = args.output.clone().map(FilePresenter::new);
    #[cfg(feature = "gui")]
    let mut window = show_window.then(circlescan::WindowPresenter::default);

    let mut presenter = |annotated: &RgbImage| -> anyhow::Result<()> {
        if let Some(file) = file.as_mut() {
            file.present(annotated)?;
        }
        #[cfg(feature = "gui")]
        {
            if let Some(window) = window.as_mut() {
                window.present(annotated)?;
            }
        }
        Ok(())
    };

    let outcome = search.run(&mut image, &mut presenter)?;

    match outcome {
        SearchOutcome::Found { circle, mask_radius } => {
            println!(
                "Circle at ({}, {}) with radius {} (mask radius {})",
                circle.x, circle.y, circle.radius, mask_radius
            );
            Ok(ExitCode::SUCCESS)
        }
        SearchOutcome::NotFound { iterations } => {
            println!("No circle found after {} mask radii", iterations);
            Ok(ExitCode::from(2))
        }
    }
}
