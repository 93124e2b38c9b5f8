//! # Block Stream Protocol Buffers
//!
//! Rust types for the `sf.bstream.v1` block-streaming gRPC surface and the
//! `sf.codec.v1` block codec it carries, along with conversion helpers to
//! unpack stream responses into decoded [`Block`]s.
//!
//! The generated prost/tonic code is vendored under `src/pb/` so that no
//! protobuf toolchain is required at build time. The source definitions live
//! under `protos/` and the vendored modules can be regenerated from them
//! with `protoc` and `tonic-build` when the wire surface changes.

mod block;
mod error;
mod request;

pub mod bstream {
    pub mod v1 {
        include!("pb/sf.bstream.v1.rs");
    }
}

pub mod codec {
    pub mod v1 {
        include!("pb/sf.codec.v1.rs");
    }
}

pub use block::{BlockRef, BLOCK_TYPE_URL};
pub use bstream::v1::{
    block_stream_v2_client::BlockStreamV2Client, BlockDetails, BlockResponseV2, BlocksRequestV2,
    ForkStep,
};
pub use codec::v1::Block;
pub use error::ProtosError;
