use crate::errors::SpliceResult;
use bytes::Bytes;

/// Decode a value from the front of `data`, advancing it past the bytes used.
pub trait SpliceParser {
    fn from_bytes(data: &mut Bytes) -> SpliceResult<Self>
    where
        Self: Sized;
}
