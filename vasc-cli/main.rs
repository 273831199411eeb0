use clap::Parser;
use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vasc_cli::{AnalyzerResult, JunctionAnalyzer, PipelineConfig};
use vasc_preprocess::mask_to_gray;

#[derive(Parser, Debug)]
#[command(name = "vasc")]
#[command(about = "Detect vessel bifurcations and crossings in retinal fundus images")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    image: PathBuf,

    /// Annotated output image. Defaults to `<stem>_calculated.jpg` next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pipeline configuration (TOML for `.toml`, JSON otherwise).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worker threads; overrides the configuration file.
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Write junction coordinates as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Also write the vessel mask and skeleton as PNG next to the output.
    #[arg(long)]
    save_masks: bool,

    /// Log level or filter, e.g. `debug` or `vasc_junction=trace`; `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Also write rotating log files into this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn setup_logging(
    level: &str,
    dir: Option<&Path>,
) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(level)?;
    match dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .duplicate_to_stderr(Duplicate::Warn)
            .rotate(
                flexi_logger::Criterion::Size(1024 * 1024),
                flexi_logger::Naming::Timestamps,
                flexi_logger::Cleanup::KeepLogFiles(5),
            )
            .start(),
        None => logger.log_to_stderr().start(),
    }
}

/// `<dir>/<stem>_calculated.jpg`
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_calculated.jpg", stem))
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}_{}.png", stem, suffix))
}

/// The input must be an existing regular file
fn check_input(path: &Path) -> Result<(), String> {
    if path.is_file() {
        Ok(())
    } else {
        Err(format!("File '{}' not found", path.display()))
    }
}

fn run(cli: &Cli) -> AnalyzerResult<()> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(n) = cli.threads {
        config.detection.n_threads = n;
    }

    let image = image::open(&cli.image)?.to_rgb8();
    let analyzer = JunctionAnalyzer::new(config)?;
    let analysis = analyzer.analyze(&image)?;

    println!("Time taken: {:.2?}", analysis.elapsed);
    println!("Bifurcations: {}", analysis.junctions.bifurcations.len());
    println!("Intersections: {}", analysis.junctions.intersections.len());

    let output = cli.output.clone().unwrap_or_else(|| default_output(&cli.image));
    analysis.annotated.save(&output)?;
    println!("Saved result image as {}", output.display());

    if cli.save_masks {
        let vessels_path = sibling(&output, "vessels");
        let skeleton_path = sibling(&output, "skeleton");
        mask_to_gray(&analysis.vessels).save(&vessels_path)?;
        mask_to_gray(&analysis.skeleton).save(&skeleton_path)?;
        log::info!(
            "Saved masks to {} and {}",
            vessels_path.display(),
            skeleton_path.display()
        );
    }

    if let Some(path) = &cli.report {
        let source = match &analyzer.config().name {
            Some(name) => format!("{} ({})", cli.image.display(), name),
            None => cli.image.display().to_string(),
        };
        analysis.report().with_source(source).save_json(path)?;
        println!("Saved report as {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Dropping the handle stops the logger
    let _logger = match setup_logging(&cli.log_level, cli.log_dir.as_deref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logger initialization failed: {}", e);
            None
        }
    };

    if let Err(message) = check_input(&cli.image) {
        eprintln!("{}", message);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Runtime error: {}", e);
            ExitCode::FAILURE
        }
    }
}
