use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("pixel buffer of {width}x{height} cannot hold {len} bytes of rgba data")]
    InvalidBufferShape { width: u32, height: u32, len: usize },
    #[error("filter parameter {0} must be finite")]
    NonFiniteFilterParam(&'static str),
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("canvas dimensions {width}x{height} are not usable")]
    InvalidDimensions { width: u32, height: u32 },
}
