use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtosError {
    #[error("Error in decoding block: {0}")]
    DecodeError(#[from] prost::DecodeError),

    #[error("Null block field in block response")]
    NullBlock,

    #[error("Unexpected block payload type: {0}")]
    TypeUrlMismatch(String),
}
