use thiserror::Error;

/// Top-level error type for the roof dieline generator.
#[derive(Debug, Error)]
pub enum RoofError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised while reading or validating run options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown unit of measure: {0}")]
    UnknownUnit(String),

    #[error("unknown score style: {0}")]
    UnknownScoreStyle(String),

    #[error("{name} must not be negative (got {value})")]
    NegativeDimension { name: &'static str, value: f64 },

    #[error("dormer top needs at least {min} sides (got {sides})")]
    TooFewSides { sides: usize, min: usize },

    #[error("{name} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("outline needs at least 3 distinct points (got {0})")]
    TooFewPoints(usize),
}

/// Convenience type alias for results using [`RoofError`].
pub type Result<T> = std::result::Result<T, RoofError>;
