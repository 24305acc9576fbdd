use thiserror::Error;

#[derive(Debug, Error)]
pub enum WpsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid rules: {0}")]
    InvalidRules(String),
}

impl From<WpsError> for String {
    fn from(err: WpsError) -> Self {
        err.to_string()
    }
}
