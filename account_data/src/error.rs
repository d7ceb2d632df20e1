use thiserror::Error;

pub type DataResult<T> = Result<T, AccountDataError>;

#[derive(Debug, Error)]
pub enum AccountDataError {
    #[error("MongoDB error: {0}")]
    MongoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<mongodb::error::Error> for AccountDataError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::MongoError(err.to_string())
    }
}

impl From<bson::ser::Error> for AccountDataError {
    fn from(err: bson::ser::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<bson::de::Error> for AccountDataError {
    fn from(err: bson::de::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
