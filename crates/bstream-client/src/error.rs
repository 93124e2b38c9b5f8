use bstream_protos::ProtosError;
use thiserror::Error;

/// Errors raised while establishing a connection or opening a stream. These
/// are the retryable class: the consumer loop absorbs them and reconnects.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("{0}")]
    TonicStatus(#[from] tonic::Status),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URI: {0}")]
    UriInvalid(#[from] http::uri::InvalidUri),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("the environment variable {0} must be set to a valid API key")]
    MissingApiKey(&'static str),

    #[error("credential is not a valid header value: {0}")]
    InvalidCredential(#[from] tonic::metadata::errors::InvalidMetadataValue),

    #[error("credential contains non-ASCII characters")]
    NonAsciiCredential,
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Block JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal errors terminating a whole consumer run. Transport failures never
/// appear here unless a retry budget was configured and exhausted.
#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error("unable to retrieve stream credential: {0}")]
    Auth(#[from] AuthError),

    #[error("unable to decode received block payload: {0}")]
    Decode(#[from] ProtosError),

    #[error("unable to write block to output sink: {0}")]
    Sink(#[from] SinkError),

    #[error("stream still failing after {attempts} retry attempts")]
    RetriesExhausted { attempts: u32 },
}
