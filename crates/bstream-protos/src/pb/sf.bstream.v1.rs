// @generated
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlocksRequestV2 {
    /// First block of the requested range, inclusive. When a `start_cursor` is
    /// provided the server resumes from the cursor and this value only acts as
    /// a lower bound.
    #[prost(int64, tag = "1")]
    pub start_block_num: i64,
    /// Opaque resume token received on a previous response, used to pick up
    /// streaming exactly where the previous connection left off.
    #[prost(string, tag = "2")]
    pub start_cursor: ::prost::alloc::string::String,
    /// End of the requested range, exclusive. A value of 0 means the stream
    /// never ends on its own.
    #[prost(uint64, tag = "3")]
    pub stop_block_num: u64,
    /// Which fork-handling steps should be delivered, defaults to all steps
    /// when empty.
    #[prost(enumeration = "ForkStep", repeated, tag = "4")]
    pub fork_steps: ::prost::alloc::vec::Vec<i32>,
    /// CEL expression restricting which blocks are delivered, passed through
    /// to the server uninterpreted.
    #[prost(string, tag = "5")]
    pub include_filter_expr: ::prost::alloc::string::String,
    #[prost(enumeration = "BlockDetails", tag = "6")]
    pub details: i32,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockResponseV2 {
    /// Serialized `sf.codec.v1.Block` payload.
    #[prost(message, optional, tag = "1")]
    pub block: ::core::option::Option<::prost_types::Any>,
    #[prost(enumeration = "ForkStep", tag = "2")]
    pub step: i32,
    /// Opaque resume token for this exact position in the stream.
    #[prost(string, tag = "3")]
    pub cursor: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ForkStep {
    StepUnknown = 0,
    /// Block is the new head block of the chain.
    StepNew = 1,
    /// Block is no longer part of the canonical chain and must be undone.
    StepUndo = 2,
    /// Block passed the irreversibility threshold and will never be undone.
    StepIrreversible = 4,
}
impl ForkStep {
    /// String value of the enum field names used in the ProtoBuf definition.
    ///
    /// The values are not transformed in any way and thus are considered stable
    /// (if the ProtoBuf definition does not change) and safe for programmatic use.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            ForkStep::StepUnknown => "STEP_UNKNOWN",
            ForkStep::StepNew => "STEP_NEW",
            ForkStep::StepUndo => "STEP_UNDO",
            ForkStep::StepIrreversible => "STEP_IRREVERSIBLE",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "STEP_UNKNOWN" => Some(Self::StepUnknown),
            "STEP_NEW" => Some(Self::StepNew),
            "STEP_UNDO" => Some(Self::StepUndo),
            "STEP_IRREVERSIBLE" => Some(Self::StepIrreversible),
            _ => None,
        }
    }
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum BlockDetails {
    BlockDetailsFull = 0,
    BlockDetailsLight = 1,
}
impl BlockDetails {
    /// String value of the enum field names used in the ProtoBuf definition.
    ///
    /// The values are not transformed in any way and thus are considered stable
    /// (if the ProtoBuf definition does not change) and safe for programmatic use.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            BlockDetails::BlockDetailsFull => "BLOCK_DETAILS_FULL",
            BlockDetails::BlockDetailsLight => "BLOCK_DETAILS_LIGHT",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "BLOCK_DETAILS_FULL" => Some(Self::BlockDetailsFull),
            "BLOCK_DETAILS_LIGHT" => Some(Self::BlockDetailsLight),
            _ => None,
        }
    }
}
/// Generated client implementations.
pub mod block_stream_v2_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::http::Uri;
    use tonic::codegen::*;
    /// Streams a contiguous range of blocks, applying a server-side inclusion
    /// filter and the requested fork-handling steps.
    #[derive(Debug, Clone)]
    pub struct BlockStreamV2Client<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl BlockStreamV2Client<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> BlockStreamV2Client<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_origin(inner: T, origin: Uri) -> Self {
            let inner = tonic::client::Grpc::with_origin(inner, origin);
            Self { inner }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> BlockStreamV2Client<InterceptedService<T, F>>
        where
            F: tonic::service::Interceptor,
            T::ResponseBody: Default,
            T: tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
                Response = http::Response<
                    <T as tonic::client::GrpcService<tonic::body::BoxBody>>::ResponseBody,
                >,
            >,
            <T as tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
            >>::Error: Into<StdError> + std::marker::Send + std::marker::Sync,
        {
            BlockStreamV2Client::new(InterceptedService::new(inner, interceptor))
        }
        /// Compress requests with the given encoding.
        ///
        /// This requires the server to support it otherwise it might respond with an
        /// error.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.send_compressed(encoding);
            self
        }
        /// Enable decompressing responses.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.accept_compressed(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        ///
        /// Default: `4MB`
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_decoding_message_size(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        ///
        /// Default: `usize::MAX`
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_encoding_message_size(limit);
            self
        }
        pub async fn blocks(
            &mut self,
            request: impl tonic::IntoRequest<super::BlocksRequestV2>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::BlockResponseV2>>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/sf.bstream.v1.BlockStreamV2/Blocks",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("sf.bstream.v1.BlockStreamV2", "Blocks"));
            self.inner.server_streaming(req, path, codec).await
        }
    }
}
