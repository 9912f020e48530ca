//! Local image file source

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{check_length, SectorSource};
use crate::error::Result;
use crate::utils::{sector::sector_to_byte, ReadCursor};

/// Reads sectors from an image file with seek + read
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: File,
}

impl FileSource {
    /// Open an image file for reading
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        Ok(Self { path, file })
    }

    /// Path the source was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SectorSource for FileSource {
    fn fetch(&mut self, sector: u32, length: usize) -> Result<ReadCursor> {
        let offset = sector_to_byte(sector);
        debug!(sector, length, offset, path = %self.path.display(), "file fetch");

        self.file.seek(SeekFrom::Start(offset))?;
        // Grown by the read; `length` can come straight from a directory record
        let mut data = Vec::new();
        (&mut self.file).take(length as u64).read_to_end(&mut data)?;
        check_length(length, &data)?;

        Ok(ReadCursor::new(data))
    }
}
