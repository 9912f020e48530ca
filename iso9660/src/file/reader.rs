//! Streaming file reader
//!
//! Reads an extent in bounded chunks through `std::io::Read`, so large
//! files can be copied out without holding them in memory.

use std::io::{self, Read, Seek, SeekFrom};

use crate::file::Extent;
use crate::source::SectorSource;
use crate::types::SECTOR_SIZE;

/// Largest single fetch issued by the reader
pub const CHUNK_SECTORS: usize = 32;

/// Reader over one file extent
pub struct FileReader<'a, S: SectorSource + ?Sized> {
    source: &'a mut S,
    extent: Extent,
    position: u64,
}

impl<'a, S: SectorSource + ?Sized> FileReader<'a, S> {
    /// Create new file reader
    pub fn new(source: &'a mut S, extent: Extent) -> Self {
        Self {
            source,
            extent,
            position: 0,
        }
    }

    /// Get current position
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Get file size
    pub fn size(&self) -> u64 {
        self.extent.length as u64
    }
}

impl<'a, S: SectorSource + ?Sized> Read for FileReader<'a, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.size().saturating_sub(self.position);
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let sector_offset = (self.position / SECTOR_SIZE as u64) as u32;
        let within = (self.position % SECTOR_SIZE as u64) as usize;
        let wanted = (buf.len() as u64)
            .min(remaining)
            .min((CHUNK_SECTORS * SECTOR_SIZE - within) as u64) as usize;

        let cursor = self
            .source
            .fetch(self.extent.lba + sector_offset, within + wanted)
            .map_err(io::Error::other)?;
        let data = cursor.into_inner();
        buf[..wanted].copy_from_slice(&data[within..within + wanted]);

        self.position += wanted as u64;
        Ok(wanted)
    }
}

impl<'a, S: SectorSource + ?Sized> Seek for FileReader<'a, S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => self.size().checked_add_signed(delta),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
        };
        match target {
            Some(position) => {
                self.position = position;
                Ok(position)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start of file",
            )),
        }
    }
}
