use std::fmt;

use prost::Message;

use crate::{bstream::v1::BlockResponseV2, codec::v1::Block, error::ProtosError};

/// Type URL under which [`Block`] payloads travel inside the response's
/// `Any` envelope.
pub const BLOCK_TYPE_URL: &str = "type.googleapis.com/sf.codec.v1.Block";

/// Unique reference to one block, by number and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRef {
    pub num: u64,
    pub id: String,
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.num, self.id)
    }
}

impl Block {
    pub fn block_ref(&self) -> BlockRef {
        BlockRef {
            num: self.number,
            id: self.id.clone(),
        }
    }

    pub fn previous_ref(&self) -> BlockRef {
        BlockRef {
            num: self.number.saturating_sub(1),
            id: self.previous_id.clone(),
        }
    }

    /// Pack this block into the `Any` envelope used on the wire.
    pub fn to_any(&self) -> prost_types::Any {
        prost_types::Any {
            type_url: BLOCK_TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }
}

impl TryFrom<BlockResponseV2> for Block {
    type Error = ProtosError;

    fn try_from(response: BlockResponseV2) -> Result<Self, Self::Error> {
        let any = response.block.ok_or(ProtosError::NullBlock)?;

        if any.type_url != BLOCK_TYPE_URL {
            return Err(ProtosError::TypeUrlMismatch(any.type_url));
        }

        Ok(Block::decode(any.value.as_slice())?)
    }
}
