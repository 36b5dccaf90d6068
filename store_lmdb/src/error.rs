use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<std::io::Error> for LmdbError {
    fn from(e: std::io::Error) -> Self {
        LmdbError::Io(e.to_string())
    }
}

impl From<LmdbError> for chainwallet_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::Io(msg) => chainwallet_store::StoreError::Unavailable(msg),
            other => chainwallet_store::StoreError::Backend(other.to_string()),
        }
    }
}
