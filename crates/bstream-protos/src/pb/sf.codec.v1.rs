// @generated
/// Decoded block record carried inside `sf.bstream.v1.BlockResponseV2`.
#[derive(serde::Serialize, serde::Deserialize)]
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Block {
    /// Unique block id, hex encoded.
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(uint64, tag = "2")]
    pub number: u64,
    /// Id of the predecessor block.
    #[prost(string, tag = "3")]
    pub previous_id: ::prost::alloc::string::String,
    /// Unix timestamp, in seconds, at which the block was produced.
    #[prost(uint64, tag = "4")]
    pub timestamp: u64,
    #[prost(uint64, tag = "5")]
    pub transaction_count: u64,
    /// Chain-specific serialized block content; opaque at this level.
    #[prost(bytes = "vec", tag = "6")]
    pub payload: ::prost::alloc::vec::Vec<u8>,
}
