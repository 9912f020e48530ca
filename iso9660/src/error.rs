//! Error types for ISO9660 operations

use thiserror::Error;

/// Result type for ISO9660 operations
pub type Result<T> = core::result::Result<T, Iso9660Error>;

/// Errors that can occur during ISO9660 operations
///
/// Variants fall into three families: path lookups that found nothing,
/// integrity failures that mean the image cannot be trusted, and transport
/// failures passed through unchanged from the file, network or block device.
#[derive(Debug, Error)]
pub enum Iso9660Error {
    /// No path table entry or directory record matches the requested path
    #[error("Path not found: {path}")]
    NotFound {
        /// The full path the caller asked for
        path: String,
    },

    /// A file was requested but the path names a directory
    #[error("Is a directory: {path}")]
    IsADirectory {
        /// The full path the caller asked for
        path: String,
    },

    /// A directory was requested but the path names a file
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The full path the caller asked for
        path: String,
    },

    /// Little-endian and big-endian halves of a both-endian field disagree
    #[error("Both-endian field mismatch: little-endian {le:#x}, big-endian {be:#x}")]
    BothEndianMismatch {
        /// Value decoded from the little-endian half
        le: u32,
        /// Value decoded from the big-endian half
        be: u32,
    },

    /// Path table entries do not add up to the declared size
    #[error("Path table size mismatch: declared {declared} bytes, {remainder} bytes unaccounted for")]
    PathTableSize {
        /// Size from the primary volume descriptor
        declared: u32,
        /// Bytes left over (negative when entries overran the table)
        remainder: i64,
    },

    /// Structurally invalid path table entry
    #[error("Invalid path table: {0}")]
    InvalidPathTable(String),

    /// Corrupted directory record
    #[error("Corrupted directory record: {0}")]
    InvalidDirectoryRecord(String),

    /// Invalid volume descriptor signature
    #[error("Invalid volume descriptor signature at sector {sector}")]
    InvalidSignature {
        /// Sector holding the bad descriptor
        sector: u32,
    },

    /// Descriptor scan hit its sector ceiling before a set terminator
    #[error("No volume descriptor set terminator within {limit} sectors")]
    MissingTerminator {
        /// Number of descriptor sectors scanned
        limit: u32,
    },

    /// Descriptor set ended without a primary volume descriptor
    #[error("Primary volume descriptor not found")]
    NoPrimaryVolumeDescriptor,

    /// A decode ran past the end of the fetched byte range
    #[error("Unexpected end of data: wanted {wanted} bytes at offset {offset}")]
    UnexpectedEnd {
        /// Cursor offset of the failed read
        offset: u64,
        /// Number of bytes the read needed
        wanted: usize,
    },

    /// I/O error reading from a local file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport error talking to a remote source
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered a range request with something other than partial content
    #[error("Range request not honored: HTTP status {status}")]
    RangeNotHonored {
        /// Status code returned by the server
        status: u16,
    },

    /// Source returned fewer bytes than requested
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// Bytes requested
        expected: usize,
        /// Bytes delivered
        actual: usize,
    },

    /// Block device reported an error
    #[error("Block device error: {0}")]
    Device(String),

    /// Source identifier needs a feature this build does not have
    #[error("Unsupported source: {0}")]
    Unsupported(String),
}

impl Iso9660Error {
    /// Build a `NotFound` error for `path`
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Is this a path lookup failure?
    ///
    /// Asking for a directory as a file, or the reverse, counts too.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::IsADirectory { .. } | Self::NotADirectory { .. }
        )
    }

    /// Does this error mean the image itself is corrupt or non-conforming?
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::BothEndianMismatch { .. }
                | Self::PathTableSize { .. }
                | Self::InvalidPathTable(_)
                | Self::InvalidDirectoryRecord(_)
                | Self::InvalidSignature { .. }
                | Self::MissingTerminator { .. }
                | Self::NoPrimaryVolumeDescriptor
                | Self::UnexpectedEnd { .. }
        )
    }
}
