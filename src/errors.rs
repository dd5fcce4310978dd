use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid date: {message}")]
    InvalidDate { message: String },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
