//! ISO9660 Image Reader
//!
//! Read ISO9660 (ECMA-119) images without mounting them, from a local file
//! or from a web server that honours HTTP range requests.
//!
//! # Overview
//!
//! This crate provides:
//! - Sector sources for local files, HTTP(S) ranges, memory and block devices
//! - Volume descriptor scanning and Primary Volume Descriptor decoding
//! - Path table decoding for fast directory listing and lookup
//! - Directory record decoding and depth-first tree walks
//! - Whole-file and streaming extraction by path
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Source layer** - Fetches byte ranges by sector (`source`)
//! 2. **Decode layer** - Integer, string and timestamp fields (`utils`)
//! 3. **Volume layer** - Parses volume descriptors from sectors 16+
//! 4. **Directory layer** - Navigates directory records and path tables
//! 5. **File layer** - Reads file data from extents
//! 6. **Facade** - `Iso9660`, tying the layers together (`fs`)
//!
//! # Usage
//!
//! ```no_run
//! use iso9660::Iso9660;
//!
//! # fn main() -> iso9660::Result<()> {
//! let mut iso = Iso9660::open("https://example.com/images/netinst.iso")?;
//!
//! // Every directory and file, rooted at "/"
//! for path in iso.tree(true)? {
//!     println!("{path}");
//! }
//!
//! // Pull one file out
//! let config = iso.get_file("/isolinux/isolinux.cfg")?;
//! # let _ = config;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod directory;
pub mod error;
pub mod file;
pub mod fs;
pub mod source;
pub mod types;
pub mod utils;
pub mod volume;

pub use error::{Iso9660Error, Result};
pub use types::{FileFlags, OpenOptions, SECTOR_SIZE};

// High-level API exports
pub use directory::{find_file, DirectoryRecord, PathTable, PathTableEntry};
pub use file::{read_extent, Extent, FileReader};
pub use fs::Iso9660;
pub use source::{BlockDeviceSource, FileSource, MemorySource, SectorSource, Source};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use volume::{mount, PrimaryVolumeDescriptor};
