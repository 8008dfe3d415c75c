use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use edgeview_core::filter::edge_filter::EdgeFilter;
use edgeview_core::io::image_reader::ImageFileReader;
use edgeview_core::io::image_writer::ImageFileWriter;
use edgeview_core::pipeline::batch_executor::{BatchExecutor, FilterJob};
use edgeview_core::pipeline::filter_image_use_case::FilterImageUseCase;
use edgeview_core::pipeline::filter_logger::{
    FilterLogger, NullFilterLogger, StdoutFilterLogger,
};
use edgeview_core::shared::constants::IMAGE_EXTENSIONS;

/// Canny edge-detection filtering for images and frame sequences.
#[derive(Parser)]
#[command(name = "edgeview")]
struct Cli {
    /// Input image file, or directory of frames.
    input: PathBuf,

    /// Output image file, or directory in directory mode.
    output: PathBuf,

    /// Low hysteresis threshold (L1 gradient magnitude).
    #[arg(long, default_value = "100.0")]
    low: f32,

    /// High hysteresis threshold.
    #[arg(long, default_value = "200.0")]
    high: f32,

    /// Gaussian smoothing kernel size (must be odd).
    #[arg(long, default_value = "5")]
    blur: usize,

    /// Gaussian smoothing standard deviation.
    #[arg(long, default_value = "1.5")]
    sigma: f64,

    /// Worker threads for directory mode.
    #[arg(long, default_value = "4")]
    jobs: usize,

    /// Suppress progress and summary output.
    #[arg(long)]
    quiet: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let filter = EdgeFilter::new(cli.blur, cli.sigma, cli.low, cli.high);
    let mut logger: Box<dyn FilterLogger> = if cli.quiet {
        Box::new(NullFilterLogger)
    } else {
        Box::new(StdoutFilterLogger::default())
    };

    if cli.input.is_dir() {
        let jobs = collect_jobs(&cli.input, &cli.output)?;
        log::info!("Filtering {} frames with {} workers", jobs.len(), cli.jobs);
        BatchExecutor::new(cli.jobs).execute(jobs, Arc::new(filter), logger.as_mut())?;
    } else {
        let mut uc = FilterImageUseCase::new(
            Box::new(ImageFileReader::new()),
            Box::new(ImageFileWriter::new()),
            Box::new(filter),
        );
        uc.execute(&cli.input, &cli.output, logger.as_mut())?;
    }

    logger.summary();
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), String> {
    if cli.blur % 2 == 0 || cli.blur == 0 {
        return Err(format!("--blur must be odd, got {}", cli.blur));
    }
    if cli.sigma <= 0.0 {
        return Err(format!("--sigma must be positive, got {}", cli.sigma));
    }
    if cli.low > cli.high {
        return Err(format!(
            "--low ({}) must not exceed --high ({})",
            cli.low, cli.high
        ));
    }
    if cli.jobs == 0 {
        return Err("--jobs must be at least 1".to_string());
    }
    if !cli.input.is_dir() && !is_image(&cli.input) {
        return Err(format!(
            "unrecognized input image extension: {}",
            cli.input.display()
        ));
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Pair every image in `input_dir` with the same file name under
/// `output_dir`, in name order.
fn collect_jobs(input_dir: &Path, output_dir: &Path) -> Result<Vec<FilterJob>, std::io::Error> {
    let mut inputs: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_image(p))
        .collect();
    inputs.sort();

    Ok(inputs
        .into_iter()
        .map(|input| {
            let output = output_dir.join(input.file_name().expect("filtered to files"));
            FilterJob { input, output }
        })
        .collect())
}
