use vasc_core::MaskSizeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JunctionError {
    InvalidDimensions { rows: usize, cols: usize },
    DimensionMismatch { vessels: (usize, usize), skeleton: (usize, usize) },
    InvalidMaskData { expected_len: usize, actual_len: usize },
    InvalidRingScale(usize),
    InvalidThreadCount(usize),
}

impl std::fmt::Display for JunctionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JunctionError::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid mask dimensions: {}x{} (must be > 0)", rows, cols)
            }
            JunctionError::DimensionMismatch { vessels, skeleton } => {
                write!(
                    f,
                    "Vessel mask is {}x{} but skeleton is {}x{}",
                    vessels.0, vessels.1, skeleton.0, skeleton.1
                )
            }
            JunctionError::InvalidMaskData { expected_len, actual_len } => {
                write!(
                    f,
                    "Mask data length mismatch: expected {}, got {}",
                    expected_len, actual_len
                )
            }
            JunctionError::InvalidRingScale(scale) => {
                write!(f, "Invalid ring scale: {} (must be >= 1)", scale)
            }
            JunctionError::InvalidThreadCount(n) => {
                write!(f, "Invalid thread count: {} (must be >= 1)", n)
            }
        }
    }
}

impl std::error::Error for JunctionError {}

impl From<MaskSizeError> for JunctionError {
    fn from(err: MaskSizeError) -> Self {
        JunctionError::InvalidMaskData {
            expected_len: err.expected_len,
            actual_len: err.actual_len,
        }
    }
}

pub type JunctionResult<T> = Result<T, JunctionError>;
