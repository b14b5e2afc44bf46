use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundsError {
    #[error("model has no renderable geometry")]
    EmptyGeometry,
    #[error("model geometry contains non-finite coordinates (mesh `{mesh}`)")]
    NonFinite { mesh: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown configuration key `{0}`")]
    UnknownKey(String),
    #[error("`{key}` expects a number, got `{value}`")]
    InvalidNumber { key: String, value: String },
    #[error("unknown trigger policy `{0}` (expected `release` or `approach`)")]
    InvalidPolicy(String),
    #[error("`{key}` is out of range: {reason}")]
    OutOfRange { key: &'static str, reason: &'static str },
}
