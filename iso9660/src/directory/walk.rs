//! Whole-tree traversal
//!
//! Depth-first, pre-order walk over directory extents driven by an explicit
//! stack. A directory's children are read when the walk first enters it,
//! so memory use is bounded by the depth of the tree times the width of
//! the directories along the current path.

use std::vec::IntoIter;

use crate::directory::{read_dir, record::DirectoryRecord};
use crate::error::{Iso9660Error, Result};
use crate::source::SectorSource;

struct Frame {
    path: String,
    extent_lba: u32,
    children: IntoIter<DirectoryRecord>,
}

/// Yields `(absolute path, record)` for every entry below a directory
///
/// Parents come before their children; siblings keep on-disc order.
pub struct TreeWalk<'a, S: SectorSource + ?Sized> {
    source: &'a mut S,
    pending_root: Option<u32>,
    stack: Vec<Frame>,
    done: bool,
}

impl<'a, S: SectorSource + ?Sized> TreeWalk<'a, S> {
    /// Walk everything below the directory extent at `root_lba`
    pub fn new(source: &'a mut S, root_lba: u32) -> Self {
        Self {
            source,
            pending_root: Some(root_lba),
            stack: Vec::new(),
            done: false,
        }
    }

    fn enter(&mut self, path: String, extent_lba: u32) -> Result<()> {
        if self.stack.iter().any(|frame| frame.extent_lba == extent_lba) {
            return Err(Iso9660Error::InvalidDirectoryRecord(format!(
                "{path} loops back to an ancestor at LBA {extent_lba}"
            )));
        }
        let children = read_dir(&mut *self.source, extent_lba)?;
        self.stack.push(Frame {
            path,
            extent_lba,
            children: children.into_iter(),
        });
        Ok(())
    }

    fn advance(&mut self) -> Result<Option<(String, DirectoryRecord)>> {
        if let Some(root_lba) = self.pending_root.take() {
            self.enter(String::new(), root_lba)?;
        }

        loop {
            let Some(frame) = self.stack.last_mut() else {
                return Ok(None);
            };
            let Some(record) = frame.children.next() else {
                self.stack.pop();
                continue;
            };

            let path = format!("{}/{}", frame.path, record.name);
            if record.is_directory() {
                self.enter(path.clone(), record.extent_lba)?;
            }
            return Ok(Some((path, record)));
        }
    }
}

impl<'a, S: SectorSource + ?Sized> Iterator for TreeWalk<'a, S> {
    type Item = Result<(String, DirectoryRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(item)) => Some(Ok(item)),
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
