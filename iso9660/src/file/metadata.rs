//! File metadata helpers

use crate::directory::DirectoryRecord;

impl DirectoryRecord {
    /// File size in bytes
    pub fn size(&self) -> u64 {
        self.data_length as u64
    }

    /// Get file extension
    pub fn extension(&self) -> Option<&str> {
        match self.name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Is this a regular file?
    pub fn is_file(&self) -> bool {
        !self.flags.directory
    }

    /// Is this hidden?
    pub fn is_hidden(&self) -> bool {
        self.flags.hidden
    }
}
