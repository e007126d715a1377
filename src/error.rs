use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No data store configured")]
    SourceUnavailable,

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export failed: {0}")]
    Export(String),
}
