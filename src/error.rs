use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesDataError {
    #[error("Required columns not found: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("File '{file}' could not be processed: {source}")]
    BatchLoadError {
        file: String,
        #[source]
        source: Box<SalesDataError>,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SalesDataError>;
