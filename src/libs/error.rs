use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CasmError {
    /// The two structures (matrices or residue lists) disagree in length
    DimensionMismatch { expected: usize, found: usize },
    /// An operation was invoked before the data it needs exists
    MissingData(String),
    /// Global similarity thresholds must be non-empty and strictly ascending
    InvalidThresholdSequence(String),
}

impl fmt::Display for CasmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CasmError::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "Dimension mismatch: expected {} residues, found {}",
                    expected, found
                )
            }
            CasmError::MissingData(msg) => write!(f, "Missing data: {}", msg),
            CasmError::InvalidThresholdSequence(msg) => {
                write!(f, "Invalid threshold sequence: {}", msg)
            }
        }
    }
}

impl std::error::Error for CasmError {}
