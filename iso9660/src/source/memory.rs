//! In-memory image source

use super::{check_length, SectorSource};
use crate::error::Result;
use crate::utils::{sector::sector_to_byte, ReadCursor};

/// Serves sectors out of a byte buffer holding the whole image
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    /// Wrap image bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Image size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Is the image empty?
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl SectorSource for MemorySource {
    fn fetch(&mut self, sector: u32, length: usize) -> Result<ReadCursor> {
        let start = (sector_to_byte(sector) as usize).min(self.data.len());
        let end = start.saturating_add(length).min(self.data.len());
        let data = self.data[start..end].to_vec();
        check_length(length, &data)?;
        Ok(ReadCursor::new(data))
    }
}
