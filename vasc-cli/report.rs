use crate::AnalyzerResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vasc_core::{Junction, JunctionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl From<&Junction> for Point {
    fn from(junction: &Junction) -> Self {
        Self {
            row: junction.row,
            col: junction.col,
        }
    }
}

/// Machine-readable detection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JunctionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub width: u32,
    pub height: u32,
    pub bifurcations: Vec<Point>,
    pub intersections: Vec<Point>,
}

impl JunctionReport {
    pub fn new(width: u32, height: u32, junctions: &JunctionSet) -> Self {
        Self {
            source: None,
            width,
            height,
            bifurcations: junctions.bifurcations.iter().map(Point::from).collect(),
            intersections: junctions.intersections.iter().map(Point::from).collect(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn to_json(&self) -> AnalyzerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> AnalyzerResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
