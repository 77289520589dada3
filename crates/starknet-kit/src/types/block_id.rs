//! Block identifier types for RPC queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Felt;
use crate::error::ParseBlockTagError;

/// Symbolic block tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    /// Most recent accepted block.
    #[default]
    Latest,
    /// Block currently being built by the sequencer.
    Pending,
}

impl BlockTag {
    /// Get the string representation for RPC.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockTag::Latest => "latest",
            BlockTag::Pending => "pending",
        }
    }
}

impl FromStr for BlockTag {
    type Err = ParseBlockTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(BlockTag::Latest),
            "pending" => Ok(BlockTag::Pending),
            other => Err(ParseBlockTagError(other.to_string())),
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the block a call executes against.
///
/// On the wire this is one of `"latest"`, `{"block_hash": "0x.."}` or
/// `{"block_number": n}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockId {
    /// Query at a symbolic tag.
    Tag(BlockTag),
    /// Query at specific block hash.
    Hash(Felt),
    /// Query at specific block number.
    Number(u64),
}

impl Default for BlockId {
    fn default() -> Self {
        Self::Tag(BlockTag::Latest)
    }
}

impl BlockId {
    /// Query at the given tag.
    pub fn with_block_tag(tag: BlockTag) -> Self {
        Self::Tag(tag)
    }

    /// Query at the latest block.
    pub fn latest() -> Self {
        Self::Tag(BlockTag::Latest)
    }

    /// Query at the pending block.
    pub fn pending() -> Self {
        Self::Tag(BlockTag::Pending)
    }

    /// Query at specific hash.
    pub fn with_block_hash(hash: Felt) -> Self {
        Self::Hash(hash)
    }

    /// Query at specific number.
    pub fn with_block_number(number: u64) -> Self {
        Self::Number(number)
    }
}

impl From<BlockTag> for BlockId {
    fn from(tag: BlockTag) -> Self {
        Self::Tag(tag)
    }
}

impl From<u64> for BlockId {
    fn from(number: u64) -> Self {
        Self::Number(number)
    }
}

impl From<Felt> for BlockId {
    fn from(hash: Felt) -> Self {
        Self::Hash(hash)
    }
}

impl FromStr for BlockId {
    type Err = ParseBlockTagError;

    /// Parses a block tag. Hashes and numbers go through the typed constructors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::Tag)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlockHashRepr {
    block_hash: Felt,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlockNumberRepr {
    block_number: u64,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BlockIdRepr {
    Tag(BlockTag),
    Hash(BlockHashRepr),
    Number(BlockNumberRepr),
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let repr = match *self {
            BlockId::Tag(tag) => BlockIdRepr::Tag(tag),
            BlockId::Hash(block_hash) => BlockIdRepr::Hash(BlockHashRepr { block_hash }),
            BlockId::Number(block_number) => BlockIdRepr::Number(BlockNumberRepr { block_number }),
        };
        repr.serialize(s)
    }
}

impl<'de> Deserialize<'de> for BlockId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(match BlockIdRepr::deserialize(d)? {
            BlockIdRepr::Tag(tag) => BlockId::Tag(tag),
            BlockIdRepr::Hash(h) => BlockId::Hash(h.block_hash),
            BlockIdRepr::Number(n) => BlockId::Number(n.block_number),
        })
    }
}
