pub mod config;
pub mod render;
pub mod report;

use image::RgbImage;
use std::time::{Duration, Instant};
use vasc_core::{init_thread_pool, JunctionSet, Mask};
use vasc_junction::{DetectorBuilder, JunctionError};
use vasc_preprocess::{PreprocessError, Preprocessor};

pub use config::PipelineConfig;
pub use render::{draw_junctions, MarkerStyle};
pub use report::{JunctionReport, Point};
pub use vasc_core::{self, Junction, JunctionKind, VascConfig as Config};

#[derive(Debug)]
pub enum AnalyzerError {
    Preprocess(PreprocessError),
    Junction(JunctionError),
    Image(image::ImageError),
    Io(std::io::Error),
    Config(String),
}

impl std::fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzerError::Preprocess(e) => write!(f, "Preprocessing error: {}", e),
            AnalyzerError::Junction(e) => write!(f, "Detection error: {}", e),
            AnalyzerError::Image(e) => write!(f, "Image error: {}", e),
            AnalyzerError::Io(e) => write!(f, "I/O error: {}", e),
            AnalyzerError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AnalyzerError {}

impl From<PreprocessError> for AnalyzerError {
    fn from(err: PreprocessError) -> Self {
        AnalyzerError::Preprocess(err)
    }
}

impl From<JunctionError> for AnalyzerError {
    fn from(err: JunctionError) -> Self {
        AnalyzerError::Junction(err)
    }
}

impl From<image::ImageError> for AnalyzerError {
    fn from(err: image::ImageError) -> Self {
        AnalyzerError::Image(err)
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        AnalyzerError::Io(err)
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        AnalyzerError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for AnalyzerError {
    fn from(err: toml::de::Error) -> Self {
        AnalyzerError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AnalyzerError {
    fn from(err: toml::ser::Error) -> Self {
        AnalyzerError::Config(err.to_string())
    }
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct Analysis {
    pub vessels: Mask,
    pub skeleton: Mask,
    pub junctions: JunctionSet,
    /// Input image with junction markers drawn on it
    pub annotated: RgbImage,
    pub elapsed: Duration,
}

impl Analysis {
    pub fn report(&self) -> JunctionReport {
        JunctionReport::new(self.annotated.width(), self.annotated.height(), &self.junctions)
    }
}

/// High-level analyzer: segmentation, skeletonization, junction detection
/// and marker rendering
pub struct JunctionAnalyzer {
    config: PipelineConfig,
    preprocessor: Preprocessor,
}

impl JunctionAnalyzer {
    pub fn new(config: PipelineConfig) -> AnalyzerResult<Self> {
        config.validate()?;

        // The global pool can only be built once per process
        if let Err(e) = init_thread_pool(config.detection.n_threads) {
            log::warn!("Keeping existing thread pool: {}", e);
        }

        let preprocessor = Preprocessor::new(config.preprocess.clone())?;
        log::debug!("{}", config.summary());
        Ok(Self { config, preprocessor })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Detects junctions on precomputed vessel and skeleton masks
    pub fn detect(&self, vessels: &Mask, skeleton: &Mask) -> AnalyzerResult<JunctionSet> {
        let (rows, cols) = vessels.dimensions();
        let detector =
            DetectorBuilder::from_config(self.config.detection.clone(), rows, cols).build()?;
        Ok(detector.detect(vessels, skeleton)?)
    }

    pub fn analyze(&self, image: &RgbImage) -> AnalyzerResult<Analysis> {
        let t0 = Instant::now();
        let masks = self.preprocessor.run(image)?;
        let junctions = self.detect(&masks.vessels, &masks.skeleton)?;
        let annotated = draw_junctions(image, &junctions, &self.config.markers);
        let elapsed = t0.elapsed();

        log::info!(
            "Found {} bifurcations and {} intersections in {:.2?}",
            junctions.bifurcations.len(),
            junctions.intersections.len(),
            elapsed
        );

        Ok(Analysis {
            vessels: masks.vessels,
            skeleton: masks.skeleton,
            junctions,
            annotated,
            elapsed,
        })
    }
}
