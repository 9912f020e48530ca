//! Primary Volume Descriptor parsing
//!
//! The Primary Volume Descriptor (PVD) is always present and describes
//! the basic ISO9660 filesystem structure. See ECMA-119 8.4 for the layout.

use crate::directory::record::DirectoryRecord;
use crate::error::{Iso9660Error, Result};
use crate::utils::{DateTime17, ReadCursor};

/// Standard identifier carried by every volume descriptor
pub const STANDARD_IDENTIFIER: &[u8; 5] = b"CD001";

/// Decoded Primary Volume Descriptor (sector 16+, type 1)
#[derive(Debug, Clone)]
pub struct PrimaryVolumeDescriptor {
    /// Type code (1 for primary)
    pub type_code: u8,
    /// Standard identifier "CD001"
    pub identifier: [u8; 5],
    /// Version (1)
    pub version: u8,

    /// System identifier (32 a-characters)
    pub system_id: String,
    /// Volume identifier (32 d-characters)
    pub volume_id: String,

    /// Volume space size in logical blocks
    pub volume_space_size: u32,
    /// Volume set size
    pub volume_set_size: u16,
    /// Volume sequence number
    pub volume_sequence_number: u16,
    /// Logical block size (usually 2048)
    pub logical_block_size: u16,

    /// Path table size in bytes
    pub path_table_size: u32,
    /// Type L path table location (LE, used for reading)
    pub type_l_path_table: u32,
    /// Optional type L path table location
    pub optional_type_l_path_table: u32,
    /// Type M path table location (BE)
    pub type_m_path_table: u32,
    /// Optional type M path table location
    pub optional_type_m_path_table: u32,

    /// Root directory record
    pub root: DirectoryRecord,

    /// Volume set identifier
    pub volume_set_id: String,
    /// Publisher identifier
    pub publisher_id: String,
    /// Data preparer identifier
    pub data_preparer_id: String,
    /// Application identifier
    pub application_id: String,
    /// Copyright file identifier
    pub copyright_file_id: String,
    /// Abstract file identifier
    pub abstract_file_id: String,
    /// Bibliographic file identifier
    pub bibliographic_file_id: String,

    /// Volume creation time
    pub created: Option<DateTime17>,
    /// Volume modification time
    pub modified: Option<DateTime17>,
    /// Volume expiration time
    pub expires: Option<DateTime17>,
    /// Volume effective time
    pub effective: Option<DateTime17>,

    /// File structure version (1)
    pub file_structure_version: u8,
}

impl PrimaryVolumeDescriptor {
    /// Decode a PVD from the start of `sector`
    pub fn decode(cursor: &mut ReadCursor, sector: u32) -> Result<Self> {
        let type_code = cursor.u8()?;
        let identifier = cursor.array::<5>()?;
        let version = cursor.u8()?;
        cursor.skip(1)?;

        if type_code != 1 || &identifier != STANDARD_IDENTIFIER {
            return Err(Iso9660Error::InvalidSignature { sector });
        }

        let system_id = cursor.fixed_string(32)?;
        let volume_id = cursor.fixed_string(32)?;
        cursor.skip(8)?;
        let volume_space_size = cursor.both_u32()?;
        cursor.skip(32)?;
        let volume_set_size = cursor.both_u16()?;
        let volume_sequence_number = cursor.both_u16()?;
        let logical_block_size = cursor.both_u16()?;
        let path_table_size = cursor.both_u32()?;
        let type_l_path_table = cursor.le_u32()?;
        let optional_type_l_path_table = cursor.le_u32()?;
        let type_m_path_table = cursor.be_u32()?;
        let optional_type_m_path_table = cursor.be_u32()?;

        // Root directory record is a fixed 34-byte slot at BP 157
        let root_start = cursor.position();
        let root = DirectoryRecord::decode(cursor)?.ok_or_else(|| {
            Iso9660Error::InvalidDirectoryRecord(String::from("empty root directory record"))
        })?;
        cursor.set_position(root_start + DirectoryRecord::MIN_LENGTH as u64);

        let volume_set_id = cursor.fixed_string(128)?;
        let publisher_id = cursor.fixed_string(128)?;
        let data_preparer_id = cursor.fixed_string(128)?;
        let application_id = cursor.fixed_string(128)?;
        let copyright_file_id = cursor.fixed_string(37)?;
        let abstract_file_id = cursor.fixed_string(37)?;
        let bibliographic_file_id = cursor.fixed_string(37)?;
        let created = cursor.vd_timestamp()?;
        let modified = cursor.vd_timestamp()?;
        let expires = cursor.vd_timestamp()?;
        let effective = cursor.vd_timestamp()?;
        let file_structure_version = cursor.u8()?;

        Ok(Self {
            type_code,
            identifier,
            version,
            system_id,
            volume_id,
            volume_space_size,
            volume_set_size,
            volume_sequence_number,
            logical_block_size,
            path_table_size,
            type_l_path_table,
            optional_type_l_path_table,
            type_m_path_table,
            optional_type_m_path_table,
            root,
            volume_set_id,
            publisher_id,
            data_preparer_id,
            application_id,
            copyright_file_id,
            abstract_file_id,
            bibliographic_file_id,
            created,
            modified,
            expires,
            effective,
            file_structure_version,
        })
    }

    /// Root directory extent location (LBA)
    pub fn root_extent_lba(&self) -> u32 {
        self.root.extent_lba
    }

    /// Root directory extent length (bytes)
    pub fn root_extent_len(&self) -> u32 {
        self.root.data_length
    }
}
