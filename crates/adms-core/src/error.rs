use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Payload-level errors (abort the whole call)
    #[error("Empty payload")]
    EmptyPayload,

    #[error("JSON parse error: {0}")]
    UnparseableJson(String),

    #[error("XML parse error: {0}")]
    UnparseableXml(String),

    #[error("Unknown data format")]
    UnknownFormat { sample: String },

    // Record-level errors (absorbed by the batch, never fatal)
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unrecognized timestamp: {0}")]
    TimestampUnrecognized(String),

    // Catch-all for faults that should never reach the caller unwrapped
    #[error("Internal fault: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
