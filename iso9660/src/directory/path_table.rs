//! Path Table parsing
//!
//! The path table lists every directory once, parents before children, as
//! `(name, parent number, extent)` triples. It gives a directory-only view of
//! the tree and a way to find a directory without walking extents.
//!
//! Type L record layout:
//!
//! ```text
//! [name_len:1][ext_attr_len:1][extent:4 LE][parent:2 LE][name:name_len][pad:name_len % 2]
//! ```

use tracing::debug;

use crate::error::{Iso9660Error, Result};
use crate::source::SectorSource;
use crate::utils::{string, ReadCursor};
use crate::volume::PrimaryVolumeDescriptor;

/// Fixed bytes in a path table record before the name
const RECORD_HEADER_LEN: i64 = 8;

/// Path Table Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTableEntry {
    /// Directory name, empty for the root
    pub name: String,

    /// Extended attribute record length
    pub extended_attr_len: u8,

    /// Extent location (LBA) of the directory
    pub extent_lba: u32,

    /// Parent directory number (1-based index into the table)
    pub parent_dir_num: u16,
}

/// Path table type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTableType {
    /// Little-endian (Type L)
    LittleEndian,
    /// Big-endian (Type M)
    BigEndian,
}

/// Decoded path table, in on-disc order
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    entries: Vec<PathTableEntry>,
}

impl PathTable {
    /// Fetch and decode the type L path table named by the PVD
    pub fn load<S: SectorSource + ?Sized>(source: &mut S, pvd: &PrimaryVolumeDescriptor) -> Result<Self> {
        let size = pvd.path_table_size;
        debug!(lba = pvd.type_l_path_table, size, "loading path table");
        let mut cursor = source.fetch(pvd.type_l_path_table, size as usize)?;
        Self::decode(&mut cursor, size, PathTableType::LittleEndian)
    }

    /// Decode `declared` bytes of path table records
    ///
    /// The records must use up the declared size exactly; a record that
    /// would overrun it, or a tail too short to hold one, is a
    /// `PathTableSize` error.
    pub fn decode(cursor: &mut ReadCursor, declared: u32, kind: PathTableType) -> Result<Self> {
        let mut entries: Vec<PathTableEntry> = Vec::new();
        let mut remaining = declared as i64;

        while remaining > 0 {
            if remaining < RECORD_HEADER_LEN {
                return Err(Iso9660Error::PathTableSize { declared, remainder: remaining });
            }

            let name_len = cursor.u8()?;
            let record_len = RECORD_HEADER_LEN + name_len as i64 + (name_len % 2) as i64;
            if record_len > remaining {
                return Err(Iso9660Error::PathTableSize {
                    declared,
                    remainder: remaining - record_len,
                });
            }

            let extended_attr_len = cursor.u8()?;
            let (extent_lba, parent_dir_num) = match kind {
                PathTableType::LittleEndian => (cursor.le_u32()?, cursor.le_u16()?),
                PathTableType::BigEndian => (cursor.be_u32()?, cursor.be_u16()?),
            };
            let identifier = cursor.raw(name_len as usize)?;
            if name_len % 2 == 1 {
                cursor.skip(1)?;
            }
            remaining -= record_len;

            // Directory numbers are 1-based and parents always come first
            let number = entries.len() + 1;
            let parent = parent_dir_num as usize;
            let parent_ok = if number == 1 { parent == 1 } else { parent >= 1 && parent < number };
            if !parent_ok {
                return Err(Iso9660Error::InvalidPathTable(format!(
                    "directory {number} names parent {parent}"
                )));
            }

            entries.push(PathTableEntry {
                name: string::identifier_to_name(&identifier),
                extended_attr_len,
                extent_lba,
                parent_dir_num,
            });
        }

        if entries.is_empty() {
            return Err(Iso9660Error::InvalidPathTable(String::from("no root directory entry")));
        }

        debug!(directories = entries.len(), "path table decoded");
        Ok(Self { entries })
    }

    /// All entries in table order
    pub fn entries(&self) -> &[PathTableEntry] {
        &self.entries
    }

    /// Number of directories, root included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by 1-based directory number
    pub fn get(&self, number: u16) -> Option<&PathTableEntry> {
        (number as usize).checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Absolute path of the entry at 0-based `index`
    pub fn path_of(&self, index: usize) -> String {
        let mut names = Vec::new();
        let mut i = index;
        while i != 0 {
            names.push(self.entries[i].name.as_str());
            i = self.entries[i].parent_dir_num as usize - 1;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Every directory path, depth first, starting with `/`
    ///
    /// Siblings come out in table order. No sector I/O is involved.
    pub fn directory_paths(&self) -> Vec<String> {
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); self.entries.len()];
        for (i, entry) in self.entries.iter().enumerate().skip(1) {
            children[entry.parent_dir_num as usize - 1].push(i);
        }

        let mut paths = vec![String::from("/")];
        let mut stack: Vec<(usize, String)> = children[0]
            .iter()
            .rev()
            .map(|&i| (i, format!("/{}", self.entries[i].name)))
            .collect();

        while let Some((i, path)) = stack.pop() {
            for &child in children[i].iter().rev() {
                stack.push((child, format!("{}/{}", path, self.entries[child].name)));
            }
            paths.push(path);
        }
        paths
    }

    /// Find the directory named by `components` (already upper-cased)
    ///
    /// Scans from the end of the table. An entry matches when its own name
    /// and each ancestor's name match the components from last to first and
    /// the chain then lands exactly on the root. Returns the 0-based index.
    pub fn lookup(&self, components: &[String]) -> Option<usize> {
        if components.is_empty() {
            return Some(0);
        }

        (1..self.entries.len()).rev().find(|&candidate| {
            let mut i = candidate;
            for component in components.iter().rev() {
                if i == 0 || !string::names_match(&self.entries[i].name, component) {
                    return false;
                }
                i = self.entries[i].parent_dir_num as usize - 1;
            }
            i == 0
        })
    }
}
