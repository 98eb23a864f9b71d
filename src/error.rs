use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid role selected")]
    InvalidRole,

    #[error("sign-in rejected: fix the fields above")]
    ValidationFailed,
}

pub type Result<T> = std::result::Result<T, DeskError>;
