use thiserror::Error;

pub type Result<T> = std::result::Result<T, LaymanError>;

#[derive(Debug, Error)]
pub enum LaymanError {
    #[error("Parsing error: {0}")]
    SerdeParse(#[from] serde_json::error::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid magic string in IPC frame")]
    BadMagic,
    #[error("Could not locate the i3 IPC socket")]
    NoSocketPath,
    #[error("Unexpected IPC reply: expected type {expected}, got {got}")]
    UnexpectedReply { expected: u32, got: u32 },
    #[error("No focused container in the tree")]
    NoFocus,
}
