//! Store file encoding
//!
//! Turns a whole collection into one file image and back.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SquirrelError};

use super::{HEADER_SIZE, MAGIC, VERSION};

/// Encode a collection into a complete file image (header + payload)
pub fn encode_collection<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    let payload = bincode::serialize(records)
        .map_err(|e| SquirrelError::Serialization(e.to_string()))?;

    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        SquirrelError::Serialization(format!(
            "Collection too large: {} bytes",
            payload.len()
        ))
    })?;
    let crc = crc32fast::hash(&payload);

    let mut image = Vec::with_capacity(HEADER_SIZE + payload.len());
    image.extend_from_slice(MAGIC);
    image.extend_from_slice(&VERSION.to_le_bytes());
    image.extend_from_slice(&payload_len.to_le_bytes());
    image.extend_from_slice(&crc.to_le_bytes());
    image.extend_from_slice(&payload);

    Ok(image)
}

/// Decode a file image into a collection
///
/// An empty image is the empty collection. Anything else must be a
/// well-formed header followed by exactly `PayloadLen` bytes whose
/// checksum matches.
pub fn decode_collection<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    if bytes.len() < HEADER_SIZE {
        return Err(SquirrelError::CorruptStore(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    if &bytes[0..4] != MAGIC {
        return Err(SquirrelError::CorruptStore(format!(
            "Invalid magic: expected SQDB, got {:?}",
            &bytes[0..4]
        )));
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(SquirrelError::CorruptStore(format!(
            "Unsupported store version: {}",
            version
        )));
    }

    let payload_len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
    let expected_crc = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != payload_len {
        return Err(SquirrelError::CorruptStore(format!(
            "Payload length mismatch: header says {}, file has {}",
            payload_len,
            payload.len()
        )));
    }

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(SquirrelError::CorruptStore(format!(
            "Checksum mismatch: expected {:08x}, got {:08x}",
            expected_crc, actual_crc
        )));
    }

    bincode::deserialize(payload).map_err(|e| SquirrelError::CorruptStore(e.to_string()))
}
