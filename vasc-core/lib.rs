#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row-major binary raster indexed `(row, col)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    rows: usize,
    cols: usize,
    data: Vec<bool>,
}

/// Raster buffer whose length does not match `rows * cols`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSizeError {
    pub expected_len: usize,
    pub actual_len: usize,
}

impl std::fmt::Display for MaskSizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Mask data length mismatch: expected {}, got {}",
            self.expected_len, self.actual_len
        )
    }
}

impl std::error::Error for MaskSizeError {}

impl Mask {
    /// All-background mask
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![false; rows * cols],
        }
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<bool>) -> Result<Self, MaskSizeError> {
        if data.len() != rows * cols {
            return Err(MaskSizeError {
                expected_len: rows * cols,
                actual_len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Treats every non-zero byte as foreground
    pub fn from_bytes(rows: usize, cols: usize, bytes: &[u8]) -> Result<Self, MaskSizeError> {
        Self::from_vec(rows, cols, bytes.iter().map(|&b| b != 0).collect())
    }

    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.data[row * self.cols + col]
    }

    /// Signed lookup; anything outside the grid reads as background
    #[inline]
    pub fn get_signed(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && self.get(row as usize, col as usize)
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if row < self.rows && col < self.cols {
            self.data[row * self.cols + col] = value;
        }
    }

    /// Number of foreground pixels
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Foreground coordinates in raster order
    pub fn foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    /// Foreground as 255, background as 0
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.iter().map(|&v| if v { 255 } else { 0 }).collect()
    }
}

/// Skeleton pixel whose 3x3 ring holds 3 or 4 foreground pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    /// Number of ring pixels set around the point
    pub degree: u8,
}

impl Candidate {
    pub fn new(row: usize, col: usize, degree: u8) -> Self {
        Self { row, col, degree }
    }
}

/// Candidate with the local vessel diameter measured on the vessel mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthTaggedCandidate {
    pub candidate: Candidate,
    pub diameter: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum JunctionKind {
    /// Three vessel segments meet
    Bifurcation,
    /// Two vessels cross, four segments meet
    Intersection,
}

impl JunctionKind {
    /// Maps a degree / ring-overlap count onto a junction class
    pub fn from_arms(arms: usize) -> Option<Self> {
        match arms {
            3 => Some(JunctionKind::Bifurcation),
            4 => Some(JunctionKind::Intersection),
            _ => None,
        }
    }

    pub fn arms(self) -> usize {
        match self {
            JunctionKind::Bifurcation => 3,
            JunctionKind::Intersection => 4,
        }
    }
}

/// Confirmed junction in `(row, col)` coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Junction {
    pub row: usize,
    pub col: usize,
    pub kind: JunctionKind,
}

impl Junction {
    pub fn new(row: usize, col: usize, kind: JunctionKind) -> Self {
        Self { row, col, kind }
    }
}

/// Validated junctions split by class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JunctionSet {
    pub bifurcations: Vec<Junction>,
    pub intersections: Vec<Junction>,
}

impl JunctionSet {
    pub fn push(&mut self, junction: Junction) {
        match junction.kind {
            JunctionKind::Bifurcation => self.bifurcations.push(junction),
            JunctionKind::Intersection => self.intersections.push(junction),
        }
    }

    pub fn len(&self) -> usize {
        self.bifurcations.len() + self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bifurcations.is_empty() && self.intersections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Junction> {
        self.bifurcations.iter().chain(self.intersections.iter())
    }
}

impl FromIterator<Junction> for JunctionSet {
    fn from_iter<I: IntoIterator<Item = Junction>>(iter: I) -> Self {
        let mut set = JunctionSet::default();
        for junction in iter {
            set.push(junction);
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VascConfig {
    /// Ring diameter as a multiple of the measured vessel width
    pub ring_scale: usize,
    pub n_threads: usize,
}

impl Default for VascConfig {
    fn default() -> Self {
        Self {
            ring_scale: 3,
            n_threads: num_cpus::get().max(1),
        }
    }
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}
