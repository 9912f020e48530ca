//! Common types and constants for ISO9660

use std::time::Duration;

/// ISO9660 sector size (always 2048 bytes)
pub const SECTOR_SIZE: usize = 2048;

/// Volume descriptor set starts at sector 16
pub const VOLUME_DESCRIPTOR_START: u32 = 16;

/// Default ceiling on descriptor sectors scanned before giving up
pub const MAX_VOLUME_DESCRIPTORS: u32 = 100;

/// Volume descriptor type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VolumeDescriptorType {
    /// Boot Record (El Torito)
    BootRecord = 0,
    /// Primary Volume Descriptor
    Primary = 1,
    /// Supplementary Volume Descriptor (Joliet)
    Supplementary = 2,
    /// Volume Partition Descriptor
    Partition = 3,
    /// Volume Descriptor Set Terminator
    Terminator = 255,
}

impl VolumeDescriptorType {
    /// Map a raw type code, `None` for reserved codes
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::BootRecord),
            1 => Some(Self::Primary),
            2 => Some(Self::Supplementary),
            3 => Some(Self::Partition),
            255 => Some(Self::Terminator),
            _ => None,
        }
    }
}

/// File flags from directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileFlags {
    /// Hidden file
    pub hidden: bool,

    /// Directory (not a file)
    pub directory: bool,

    /// Associated file
    pub associated: bool,

    /// Extended attribute record format
    pub extended_format: bool,

    /// Owner/group permissions in extended attributes
    pub extended_permissions: bool,

    /// Not final directory record for this file
    pub not_final: bool,
}

impl FileFlags {
    /// Parse from raw byte
    pub fn from_byte(byte: u8) -> Self {
        Self {
            hidden: byte & 0x01 != 0,
            directory: byte & 0x02 != 0,
            associated: byte & 0x04 != 0,
            extended_format: byte & 0x08 != 0,
            extended_permissions: byte & 0x10 != 0,
            not_final: byte & 0x80 != 0,
        }
    }

    /// Convert to raw byte
    pub fn to_byte(&self) -> u8 {
        let mut byte = 0u8;
        if self.hidden { byte |= 0x01; }
        if self.directory { byte |= 0x02; }
        if self.associated { byte |= 0x04; }
        if self.extended_format { byte |= 0x08; }
        if self.extended_permissions { byte |= 0x10; }
        if self.not_final { byte |= 0x80; }
        byte
    }
}

/// Knobs for opening an image
#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Descriptor sectors to scan before failing with `MissingTerminator`
    pub max_descriptor_sectors: u32,

    /// Per-request timeout for remote sources (`None` = transport default)
    pub http_timeout: Option<Duration>,

    /// User-Agent header sent with range requests
    pub user_agent: String,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            max_descriptor_sectors: MAX_VOLUME_DESCRIPTORS,
            http_timeout: None,
            user_agent: concat!("iso9660-fetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl OpenOptions {
    /// Start from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the descriptor scan ceiling
    pub fn max_descriptor_sectors(mut self, limit: u32) -> Self {
        self.max_descriptor_sectors = limit;
        self
    }

    /// Set the remote request timeout
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Set the User-Agent for remote requests
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}
