//! File reading and extent management

pub mod extent;
pub mod metadata;
pub mod reader;

pub use extent::Extent;
pub use reader::FileReader;

use tracing::debug;

use crate::error::Result;
use crate::source::SectorSource;

/// Read a whole extent into a new buffer
///
/// One fetch covering exactly `extent.length` bytes from the start of the
/// extent's first sector.
pub fn read_extent<S: SectorSource + ?Sized>(source: &mut S, extent: Extent) -> Result<Vec<u8>> {
    debug!(lba = extent.lba, length = extent.length, "reading extent");
    let cursor = source.fetch(extent.lba, extent.length as usize)?;
    Ok(cursor.into_inner())
}
