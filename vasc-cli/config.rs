use crate::render::MarkerStyle;
use crate::{AnalyzerError, AnalyzerResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use vasc_core::VascConfig;
use vasc_junction::JunctionError;
use vasc_preprocess::PreprocessConfig;

/// Every tunable of the analysis pipeline, loadable from JSON or TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Free-form label carried into reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub detection: VascConfig,
    pub preprocess: PreprocessConfig,
    pub markers: MarkerStyle,
}

impl PipelineConfig {
    pub fn validate(&self) -> AnalyzerResult<()> {
        if self.detection.ring_scale == 0 {
            return Err(JunctionError::InvalidRingScale(0).into());
        }
        if self.detection.n_threads == 0 {
            return Err(JunctionError::InvalidThreadCount(0).into());
        }
        self.preprocess.validate()?;
        self.markers.validate().map_err(AnalyzerError::Config)?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "PipelineConfig: ring_scale={}, threads={}, median={}, threshold_block={}, min_area={}",
            self.detection.ring_scale,
            self.detection.n_threads,
            self.preprocess.median_size,
            self.preprocess.threshold_block,
            self.preprocess.min_area
        )
    }

    pub fn to_json(&self) -> AnalyzerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> AnalyzerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> AnalyzerResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_toml(toml_str: &str) -> AnalyzerResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads TOML for `.toml` paths and JSON otherwise
    pub fn load<P: AsRef<Path>>(path: P) -> AnalyzerResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if is_toml(path) {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> AnalyzerResult<()> {
        let path = path.as_ref();
        let content = if is_toml(path) {
            self.to_toml()?
        } else {
            self.to_json()?
        };
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> PipelineConfig {
        PipelineConfig {
            name: Some("drive-test".to_string()),
            detection: VascConfig {
                ring_scale: 4,
                n_threads: 2,
            },
            preprocess: PreprocessConfig {
                min_area: 90,
                ..Default::default()
            },
            markers: MarkerStyle::default(),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = create_test_config();
        let json = cfg.to_json().unwrap();
        assert!(json.contains("\"ring_scale\": 4"));
        assert_eq!(PipelineConfig::from_json(&json).unwrap(), cfg);
    }

    #[test]
    fn test_toml_round_trip() {
        let cfg = create_test_config();
        let text = cfg.to_toml().unwrap();
        assert!(text.contains("[detection]"));
        assert_eq!(PipelineConfig::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg = PipelineConfig::from_toml("[preprocess]\nmin_area = 40\n").unwrap();
        assert_eq!(cfg.preprocess.min_area, 40);
        assert_eq!(cfg.preprocess.median_size, 60);
        assert_eq!(cfg.detection.ring_scale, 3);
        assert_eq!(cfg.markers.box_size, 20);
    }

    #[test]
    fn test_invalid_config_rejected_on_load() {
        let result = PipelineConfig::from_json(r#"{"detection": {"ring_scale": 0}}"#);
        assert!(matches!(
            result,
            Err(AnalyzerError::Junction(JunctionError::InvalidRingScale(0)))
        ));

        let result = PipelineConfig::from_toml("[preprocess]\nthreshold_block = 8\n");
        assert!(matches!(result, Err(AnalyzerError::Preprocess(_))));

        assert!(matches!(
            PipelineConfig::from_json("{ not json"),
            Err(AnalyzerError::Config(_))
        ));
    }

    #[test]
    fn test_save_and_load_by_extension() {
        let cfg = create_test_config();
        let dir = std::env::temp_dir();
        let stamp = std::process::id();

        for ext in ["json", "toml"] {
            let path = dir.join(format!("vasc-pipeline-{}.{}", stamp, ext));
            cfg.save(&path).unwrap();
            let loaded = PipelineConfig::load(&path).unwrap();
            std::fs::remove_file(&path).unwrap();
            assert_eq!(loaded, cfg);
        }
    }
}
