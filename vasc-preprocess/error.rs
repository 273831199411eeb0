#[derive(Debug, Clone, PartialEq)]
pub enum PreprocessError {
    EmptyImage { width: u32, height: u32 },
    InvalidKernel { name: &'static str, size: u32 },
    InvalidSigma(f32),
}

impl std::fmt::Display for PreprocessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreprocessError::EmptyImage { width, height } => {
                write!(f, "Invalid image dimensions: {}x{} (must be > 0)", width, height)
            }
            PreprocessError::InvalidKernel { name, size } => {
                write!(f, "Invalid {} kernel size: {}", name, size)
            }
            PreprocessError::InvalidSigma(sigma) => {
                write!(f, "Invalid gaussian sigma: {} (must be > 0)", sigma)
            }
        }
    }
}

impl std::error::Error for PreprocessError {}

pub type PreprocessResult<T> = Result<T, PreprocessError>;
