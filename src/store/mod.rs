//! Store Module
//!
//! Durable list-of-records storage over a single flat file.
//!
//! ## Responsibilities
//! - Create the file with an empty collection on first open
//! - Load the whole collection on every read
//! - Rewrite the whole collection on every write
//! - Detect corrupt files instead of returning partial data
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (14 bytes)                                       │
//! │   Magic: "SQDB" (4) | Version: u16 (2)                  │
//! │   PayloadLen: u32 (4) | PayloadCRC: u32 (4)             │
//! ├─────────────────────────────────────────────────────────┤
//! │ Payload (variable)                                      │
//! │   bincode-encoded Vec<T>                                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! A zero-length file is read as the empty collection.

mod flat_file;
mod format;

pub use flat_file::FlatFileStore;
pub use format::{decode_collection, encode_collection};

// =============================================================================
// Shared Constants
// =============================================================================

/// Magic bytes identifying a Squirrels store file
pub(crate) const MAGIC: &[u8; 4] = b"SQDB";

/// Current store format version
pub(crate) const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + PayloadLen (4) + CRC (4) = 14 bytes
pub const HEADER_SIZE: usize = 14;
