use thiserror::Error;

/// Top-level error type for armature-core.
#[derive(Debug, Error)]
pub enum ArmatureError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Non-finite coordinate in {field}")]
    NonFiniteCoordinate { field: String },
}

/// Chain manipulation errors.
///
/// Copy + static shapes for cheap propagation; the solver itself never
/// produces these — they cover caller-side edit misuse only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Joint index out of range: {index} >= {len}")]
    JointOutOfRange { index: usize, len: usize },

    #[error("Pose length mismatch: expected {expected} joints, got {got}")]
    PoseLengthMismatch { expected: usize, got: usize },
}
