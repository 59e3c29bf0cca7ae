use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid input for {field}: {value}")]
    InvalidInput { field: &'static str, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub fn invalid(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidInput { field, value: value.to_string() }
    }
}

pub type SimResult<T> = Result<T, SimError>;
