use crate::detector::JunctionDetector;
use crate::error::JunctionResult;
use vasc_core::VascConfig;

/// Builder for creating a `JunctionDetector`
#[derive(Debug, Clone)]
pub struct DetectorBuilder {
    config: VascConfig,
    rows: usize,
    cols: usize,
}

impl DetectorBuilder {
    /// Create a new builder with default settings
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            config: VascConfig::default(),
            rows,
            cols,
        }
    }

    /// Create a builder from an existing configuration
    pub fn from_config(config: VascConfig, rows: usize, cols: usize) -> Self {
        Self { config, rows, cols }
    }

    /// Set the ring diameter as a multiple of the vessel width
    pub fn ring_scale(mut self, scale: usize) -> Self {
        self.config.ring_scale = scale;
        self
    }

    /// Set the number of threads for parallel processing
    pub fn threads(mut self, n_threads: usize) -> Self {
        self.config.n_threads = n_threads;
        self
    }

    /// Build the `JunctionDetector`
    pub fn build(self) -> JunctionResult<JunctionDetector> {
        JunctionDetector::new(self.config, self.rows, self.cols)
    }

    /// Generate a summary of the builder's configuration
    pub fn summary(&self) -> String {
        format!(
            "DetectorBuilder: {}x{}, ring_scale={}, threads={}",
            self.rows, self.cols, self.config.ring_scale, self.config.n_threads
        )
    }

    pub fn config(&self) -> &VascConfig {
        &self.config
    }
}
