//! Error type for the configuration and JavaScript boundaries.
//!
//! Layout itself never fails: degenerate inputs (empty filter, zero-sized
//! canvas, dangling edges) degrade to empty or partial output instead.

/// Errors surfaced to callers of the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `LayoutConfig` field holds a value the pipeline cannot use.
    #[error("invalid layout config: `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    /// A value handed over from JavaScript did not match the expected shape.
    #[error("failed to decode {what}: {message}")]
    Decode { what: &'static str, message: String },
    #[error("failed to encode {what}: {message}")]
    Encode { what: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
