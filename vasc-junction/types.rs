use vasc_core::{Candidate, JunctionSet, WidthTaggedCandidate};

/// Every intermediate product of one detection run
#[derive(Debug, Clone, Default)]
pub struct DetectionTrace {
    pub candidates: Vec<Candidate>,
    pub measured: Vec<WidthTaggedCandidate>,
    pub junctions: JunctionSet,
}

impl DetectionTrace {
    /// Candidates that did not survive validation
    pub fn rejected(&self) -> usize {
        self.candidates.len().saturating_sub(self.junctions.len())
    }
}
