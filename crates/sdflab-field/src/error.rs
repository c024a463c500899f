use std::fmt;

/// Rejected generator input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldError {
    /// The grid side length was zero.
    ZeroSize,
    /// The radius was zero, negative, or not finite.
    InvalidRadius(f32),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::ZeroSize => write!(f, "distance field size must be at least 1"),
            FieldError::InvalidRadius(r) => {
                write!(f, "distance field radius must be positive and finite, got {r}")
            }
        }
    }
}

impl std::error::Error for FieldError {}
