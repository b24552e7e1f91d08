use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
