use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Fatal errors: everything here aborts before or after the picker loop,
/// never from inside it.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from the terminal or the output writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Start or lowest directory that cannot be resolved.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Startup configuration that cannot be turned into picker options.
    #[error("Configuration error: {0}")]
    Config(String),
}
