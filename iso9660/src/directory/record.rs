//! Directory Record structure
//!
//! Directory records describe files and subdirectories. Layout (ECMA-119 9.1):
//!
//! ```text
//! BP 1      length of directory record (0 = rest of sector is padding)
//! BP 2      extended attribute record length
//! BP 3-10   extent location (both-endian 32-bit)
//! BP 11-18  data length (both-endian 32-bit)
//! BP 19-25  recording date and time
//! BP 26     file flags
//! BP 27     file unit size
//! BP 28     interleave gap size
//! BP 29-32  volume sequence number (both-endian 16-bit)
//! BP 33     file identifier length
//! BP 34-    file identifier, pad byte if the length is even, system use
//! ```

use chrono::{DateTime, FixedOffset};

use crate::error::{Iso9660Error, Result};
use crate::types::FileFlags;
use crate::utils::{string, DateTime7, ReadCursor};

/// Decoded directory record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    /// Length of directory record in bytes
    pub length: u8,

    /// Extended attribute record length
    pub extended_attr_length: u8,

    /// Extent location (LBA)
    pub extent_lba: u32,

    /// Data length (bytes)
    pub data_length: u32,

    /// Recording date and time
    pub recorded: DateTime7,

    /// File flags
    pub flags: FileFlags,

    /// File unit size (interleaved files)
    pub file_unit_size: u8,

    /// Interleave gap size
    pub interleave_gap: u8,

    /// Volume sequence number
    pub volume_sequence: u16,

    /// Raw file identifier as stored on disc
    pub identifier: Vec<u8>,

    /// Name with the `;version` suffix removed, empty for the self entry
    pub name: String,
}

impl DirectoryRecord {
    /// Minimum record length
    pub const MIN_LENGTH: u8 = 34;

    /// Bytes before the file identifier
    pub const FIXED_LENGTH: usize = 33;

    /// Decode the record at the cursor position
    ///
    /// Returns `Ok(None)` when the length byte is zero, meaning the rest of
    /// the sector is padding. On success the cursor sits just past the
    /// record, with any system use area skipped.
    pub fn decode(cursor: &mut ReadCursor) -> Result<Option<Self>> {
        let start = cursor.position();
        let length = cursor.u8()?;
        if length == 0 {
            return Ok(None);
        }

        if length < Self::MIN_LENGTH {
            return Err(Iso9660Error::InvalidDirectoryRecord(format!(
                "record at offset {start} is {length} bytes, minimum is {}",
                Self::MIN_LENGTH
            )));
        }
        if length as usize > cursor.remaining() + 1 {
            return Err(Iso9660Error::InvalidDirectoryRecord(format!(
                "record at offset {start} is {length} bytes but only {} remain",
                cursor.remaining() + 1
            )));
        }

        let extended_attr_length = cursor.u8()?;
        let extent_lba = cursor.both_u32()?;
        let data_length = cursor.both_u32()?;
        let recorded = cursor.dir_timestamp()?;
        let flags = FileFlags::from_byte(cursor.u8()?);
        let file_unit_size = cursor.u8()?;
        let interleave_gap = cursor.u8()?;
        let volume_sequence = cursor.both_u16()?;
        let id_len = cursor.u8()? as usize;

        if Self::FIXED_LENGTH + id_len > length as usize {
            return Err(Iso9660Error::InvalidDirectoryRecord(format!(
                "identifier of {id_len} bytes does not fit a {length}-byte record at offset {start}"
            )));
        }
        let identifier = cursor.raw(id_len)?;

        // Pad byte (even identifier length) and system use area
        cursor.set_position(start + length as u64);

        let name = string::identifier_to_name(&identifier);
        Ok(Some(Self {
            length,
            extended_attr_length,
            extent_lba,
            data_length,
            recorded,
            flags,
            file_unit_size,
            interleave_gap,
            volume_sequence,
            identifier,
            name,
        }))
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.flags.directory
    }

    /// Recording time with its GMT offset preserved
    pub fn recorded_at(&self) -> Option<DateTime<FixedOffset>> {
        self.recorded.to_datetime()
    }

    /// Is this the "." entry (identifier 0x00)?
    pub fn is_self_entry(&self) -> bool {
        self.identifier == [0x00]
    }

    /// Is this the ".." entry (identifier 0x01)?
    pub fn is_parent_entry(&self) -> bool {
        self.identifier == [0x01]
    }
}
