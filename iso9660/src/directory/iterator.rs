//! Directory iteration
//!
//! Iterator for reading directory entries sequentially. Sectors of the
//! extent are fetched one at a time as the iteration reaches them.

use crate::directory::record::DirectoryRecord;
use crate::error::{Iso9660Error, Result};
use crate::source::SectorSource;
use crate::types::SECTOR_SIZE;
use crate::utils::{sector::next_sector_boundary, ReadCursor};

/// Children of one directory extent, in on-disc order
///
/// The "." and ".." records are consumed but never yielded. The extent
/// length is taken from the "." record. A zero length byte ends the
/// records of the current sector and iteration resumes at the next one.
pub struct DirectoryIterator<'a, S: SectorSource + ?Sized> {
    source: &'a mut S,
    extent_lba: u32,
    extent_len: Option<u32>,
    offset: u32,
    sector_index: Option<u32>,
    sector: ReadCursor,
    specials_seen: u8,
    done: bool,
}

impl<'a, S: SectorSource + ?Sized> DirectoryIterator<'a, S> {
    /// Create new directory iterator over the extent at `extent_lba`
    pub fn new(source: &'a mut S, extent_lba: u32) -> Self {
        Self {
            source,
            extent_lba,
            extent_len: None,
            offset: 0,
            sector_index: None,
            sector: ReadCursor::new(Vec::new()),
            specials_seen: 0,
            done: false,
        }
    }

    /// Extent length from the "." record, once it has been read
    pub fn extent_len(&self) -> Option<u32> {
        self.extent_len
    }

    /// Bytes of the extent consumed so far
    pub fn consumed(&self) -> u32 {
        self.offset
    }

    fn advance(&mut self) -> Result<Option<DirectoryRecord>> {
        loop {
            if let Some(len) = self.extent_len {
                if self.offset >= len {
                    return Ok(None);
                }
            }

            let index = self.offset / SECTOR_SIZE as u32;
            if self.sector_index != Some(index) {
                self.sector = self.source.fetch(self.extent_lba + index, SECTOR_SIZE)?;
                self.sector_index = Some(index);
            }
            self.sector.set_position((self.offset % SECTOR_SIZE as u32) as u64);

            let record = match DirectoryRecord::decode(&mut self.sector)? {
                Some(record) => record,
                None if self.specials_seen == 0 => {
                    return Err(Iso9660Error::InvalidDirectoryRecord(format!(
                        "directory at LBA {} has no self entry",
                        self.extent_lba
                    )));
                }
                None => {
                    self.offset = next_sector_boundary(self.offset);
                    continue;
                }
            };
            self.offset += record.length as u32;

            match self.specials_seen {
                0 => {
                    self.extent_len = Some(record.data_length);
                    self.specials_seen = 1;
                }
                1 => self.specials_seen = 2,
                _ => {
                    if let Some(len) = self.extent_len {
                        if self.offset > len {
                            return Err(Iso9660Error::InvalidDirectoryRecord(format!(
                                "record {:?} runs past the end of the {len}-byte extent at LBA {}",
                                record.name, self.extent_lba
                            )));
                        }
                    }
                    return Ok(Some(record));
                }
            }
        }
    }
}

impl<'a, S: SectorSource + ?Sized> Iterator for DirectoryIterator<'a, S> {
    type Item = Result<DirectoryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
