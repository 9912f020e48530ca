//! Sector sources
//!
//! A sector source hands out byte ranges of an image addressed by 2048-byte
//! sector number. Each fetch returns a fresh [`ReadCursor`] that owns its
//! bytes; nothing is shared or reused between fetches.
//!
//! The strategy is picked once, when the source is built:
//! - [`FileSource`] - seek and read on a local image file
//! - [`HttpSource`] - one `Range` request per fetch (feature `http`)
//! - [`MemorySource`] - an image already held in memory
//! - [`BlockDeviceSource`] - an image embedded in a `BlockIo` device

pub mod block;
pub mod file;
#[cfg(feature = "http")]
pub mod http;
pub mod memory;

pub use block::BlockDeviceSource;
pub use file::FileSource;
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use memory::MemorySource;

use crate::error::{Iso9660Error, Result};
use crate::types::OpenOptions;
use crate::utils::ReadCursor;

/// Fetch byte ranges of an image by sector
///
/// `fetch(sector, length)` reads `length` bytes starting at byte
/// `sector * 2048`. A source that cannot deliver all `length` bytes fails;
/// errors from the underlying transport are passed through as-is.
pub trait SectorSource {
    /// Read `length` bytes starting at the beginning of `sector`
    fn fetch(&mut self, sector: u32, length: usize) -> Result<ReadCursor>;
}

impl<S: SectorSource + ?Sized> SectorSource for &mut S {
    fn fetch(&mut self, sector: u32, length: usize) -> Result<ReadCursor> {
        (**self).fetch(sector, length)
    }
}

impl<S: SectorSource + ?Sized> SectorSource for Box<S> {
    fn fetch(&mut self, sector: u32, length: usize) -> Result<ReadCursor> {
        (**self).fetch(sector, length)
    }
}

/// Source chosen from an identifier string
#[derive(Debug)]
pub enum Source {
    /// Local image file
    File(FileSource),
    /// Remote image served over HTTP(S) with range support
    #[cfg(feature = "http")]
    Http(HttpSource),
    /// In-memory image
    Memory(MemorySource),
}

impl Source {
    /// Open `identifier` with default options
    ///
    /// `http://` and `https://` locations use range requests; anything else
    /// is treated as a local path.
    pub fn open(identifier: &str) -> Result<Self> {
        Self::open_with(identifier, &OpenOptions::default())
    }

    /// Open `identifier` with explicit options
    pub fn open_with(identifier: &str, options: &OpenOptions) -> Result<Self> {
        if is_remote(identifier) {
            #[cfg(feature = "http")]
            {
                return Ok(Self::Http(HttpSource::new(identifier, options)?));
            }
            #[cfg(not(feature = "http"))]
            {
                let _ = options;
                return Err(Iso9660Error::Unsupported(format!(
                    "{identifier}: built without the `http` feature"
                )));
            }
        }
        Ok(Self::File(FileSource::open(identifier)?))
    }

    /// Wrap an image already in memory
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self::Memory(MemorySource::new(data))
    }

    /// Short name of the strategy, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            #[cfg(feature = "http")]
            Self::Http(_) => "http",
            Self::Memory(_) => "memory",
        }
    }
}

impl SectorSource for Source {
    fn fetch(&mut self, sector: u32, length: usize) -> Result<ReadCursor> {
        match self {
            Self::File(source) => source.fetch(sector, length),
            #[cfg(feature = "http")]
            Self::Http(source) => source.fetch(sector, length),
            Self::Memory(source) => source.fetch(sector, length),
        }
    }
}

/// Does `identifier` name a network location?
pub fn is_remote(identifier: &str) -> bool {
    let lower = identifier.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Check a delivered range against the requested length
pub(crate) fn check_length(expected: usize, data: &[u8]) -> Result<()> {
    if data.len() < expected {
        return Err(Iso9660Error::ShortRead { expected, actual: data.len() });
    }
    Ok(())
}
