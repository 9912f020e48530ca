//! Directory record parsing and navigation

pub mod iterator;
pub mod path_table;
pub mod record;
pub mod walk;

pub use iterator::DirectoryIterator;
pub use path_table::{PathTable, PathTableEntry};
pub use record::DirectoryRecord;
pub use walk::TreeWalk;

use crate::error::{Iso9660Error, Result};
use crate::source::SectorSource;
use crate::types::SECTOR_SIZE;
use crate::utils::string;

/// Read every child of the directory extent at `extent_lba`
pub fn read_dir<S: SectorSource + ?Sized>(source: &mut S, extent_lba: u32) -> Result<Vec<DirectoryRecord>> {
    DirectoryIterator::new(source, extent_lba).collect()
}

/// Decode the "." record at the start of a directory extent
///
/// This is the authoritative description of the directory itself,
/// including its extent length.
pub fn self_record<S: SectorSource + ?Sized>(source: &mut S, extent_lba: u32) -> Result<DirectoryRecord> {
    let mut cursor = source.fetch(extent_lba, SECTOR_SIZE)?;
    DirectoryRecord::decode(&mut cursor)?.ok_or_else(|| {
        Iso9660Error::InvalidDirectoryRecord(format!(
            "directory at LBA {extent_lba} has no self entry"
        ))
    })
}

/// Find a child of one directory by name
///
/// Linear scan in on-disc order; names compare case-insensitively.
/// Fails with `NotFound` carrying `name`.
pub fn search<S: SectorSource + ?Sized>(
    source: &mut S,
    extent_lba: u32,
    name: &str,
) -> Result<DirectoryRecord> {
    for entry in DirectoryIterator::new(source, extent_lba) {
        let entry = entry?;
        if string::names_match(&entry.name, name) {
            return Ok(entry);
        }
    }
    Err(Iso9660Error::not_found(name))
}

/// Find a file or directory by walking down from `root`
///
/// Navigates the directory tree one component at a time. An intermediate
/// component that names a file ends the walk with `NotFound`.
///
/// # Arguments
/// * `source` - Sector source
/// * `root` - Directory record to start from
/// * `components` - Path components below `root`
///
/// # Returns
/// The record of the last component, or a clone of `root` for no components
pub fn find_file<S: SectorSource + ?Sized>(
    source: &mut S,
    root: &DirectoryRecord,
    components: &[String],
) -> Result<DirectoryRecord> {
    let mut current = root.clone();
    for component in components {
        if !current.is_directory() {
            return Err(Iso9660Error::not_found(component.as_str()));
        }
        current = search(source, current.extent_lba, component)?;
    }
    Ok(current)
}
