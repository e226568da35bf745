use thiserror::Error;

#[derive(Debug, Error)]
pub enum KbenchError {
    #[error("cannot read {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type KbenchResult<T> = Result<T, KbenchError>;
