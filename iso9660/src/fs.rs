//! Filesystem facade
//!
//! [`Iso9660`] opens an image once (descriptor scan + path table load) and
//! then answers listing and extraction calls, fetching directory and file
//! sectors from its source on every call.

use tracing::debug;

use crate::directory::{self, DirectoryRecord, PathTable, TreeWalk};
use crate::error::{Iso9660Error, Result};
use crate::file::{self, Extent, FileReader};
use crate::source::{SectorSource, Source};
use crate::types::OpenOptions;
use crate::utils::string;
use crate::volume::{self, PrimaryVolumeDescriptor};

/// An opened ISO9660 image
///
/// The descriptor and path table are read-only after construction. The
/// source is used by one call at a time; callers that need concurrency
/// open one `Iso9660` per thread.
#[derive(Debug)]
pub struct Iso9660<S: SectorSource = Source> {
    source: S,
    pvd: PrimaryVolumeDescriptor,
    path_table: PathTable,
}

impl Iso9660<Source> {
    /// Open a local path or `http(s)://` location with default options
    pub fn open(identifier: &str) -> Result<Self> {
        Self::open_with(identifier, &OpenOptions::default())
    }

    /// Open a local path or `http(s)://` location
    pub fn open_with(identifier: &str, options: &OpenOptions) -> Result<Self> {
        let source = Source::open_with(identifier, options)?;
        debug!(identifier, kind = source.kind(), "opening image");
        Self::with_options(source, options)
    }
}

impl<S: SectorSource> Iso9660<S> {
    /// Read descriptors and path table from `source` with default options
    pub fn new(source: S) -> Result<Self> {
        Self::with_options(source, &OpenOptions::default())
    }

    /// Read descriptors and path table from `source`
    pub fn with_options(mut source: S, options: &OpenOptions) -> Result<Self> {
        let pvd = volume::mount(&mut source, options.max_descriptor_sectors)?;
        let path_table = PathTable::load(&mut source, &pvd)?;
        Ok(Self { source, pvd, path_table })
    }

    /// Primary Volume Descriptor
    pub fn primary_descriptor(&self) -> &PrimaryVolumeDescriptor {
        &self.pvd
    }

    /// Decoded path table
    pub fn path_table(&self) -> &PathTable {
        &self.path_table
    }

    /// Root directory record
    pub fn root(&self) -> &DirectoryRecord {
        &self.pvd.root
    }

    /// Give the source back
    pub fn into_source(self) -> S {
        self.source
    }

    /// List absolute paths, starting with `/`
    ///
    /// With `include_files` false the listing comes from the path table
    /// alone (directories only, no sector I/O). Otherwise every directory
    /// extent is walked from the root and files are listed too. Both are
    /// depth first with parents before children.
    pub fn tree(&mut self, include_files: bool) -> Result<Vec<String>> {
        if !include_files {
            return Ok(self.path_table.directory_paths());
        }

        let mut paths = vec![String::from("/")];
        for entry in self.walk() {
            let (path, _) = entry?;
            paths.push(path);
        }
        Ok(paths)
    }

    /// Lazy walk over every entry below the root
    pub fn walk(&mut self) -> TreeWalk<'_, S> {
        let root_lba = self.pvd.root.extent_lba;
        TreeWalk::new(&mut self.source, root_lba)
    }

    /// Read a whole file
    ///
    /// Fails with `NotFound` carrying `path` when any component is missing,
    /// and with `IsADirectory` when `path` names a directory.
    pub fn get_file(&mut self, path: &str) -> Result<Vec<u8>> {
        let record = self.resolve_file(path)?;
        file::read_extent(&mut self.source, Extent::from(&record))
    }

    /// Streaming reader over a file
    pub fn open_file(&mut self, path: &str) -> Result<FileReader<'_, S>> {
        let record = self.resolve_file(path)?;
        Ok(FileReader::new(&mut self.source, Extent::from(&record)))
    }

    /// Children of the directory at `path`
    pub fn read_dir(&mut self, path: &str) -> Result<Vec<DirectoryRecord>> {
        let record = self.stat(path)?;
        if !record.is_directory() {
            return Err(Iso9660Error::NotADirectory { path: path.to_string() });
        }
        directory::read_dir(&mut self.source, record.extent_lba)
    }

    /// Directory record a path resolves to (`/` gives the root)
    pub fn stat(&mut self, path: &str) -> Result<DirectoryRecord> {
        let components = string::path_components(path);
        let Some((last, parents)) = components.split_last() else {
            return Ok(self.pvd.root.clone());
        };
        let parent = self.resolve_parent(parents).map_err(|e| full_path(e, path))?;
        directory::search(&mut self.source, parent.extent_lba, last).map_err(|e| full_path(e, path))
    }

    fn resolve_file(&mut self, path: &str) -> Result<DirectoryRecord> {
        let record = self.stat(path)?;
        if record.is_directory() {
            return Err(Iso9660Error::IsADirectory { path: path.to_string() });
        }
        Ok(record)
    }

    /// Resolve the directory holding the last path component
    ///
    /// Tries the path table first, then falls back to walking down from the
    /// root directory record.
    fn resolve_parent(&mut self, components: &[String]) -> Result<DirectoryRecord> {
        if components.is_empty() {
            return Ok(self.pvd.root.clone());
        }
        match self.dir_record_by_table(components)? {
            Some(record) => Ok(record),
            None => {
                debug!(?components, "path table lookup missed, walking from root");
                self.dir_record_by_root(components)
            }
        }
    }

    /// Path table strategy: match the component chain against the table and
    /// read the directory's own "." record for its real extent length
    fn dir_record_by_table(&mut self, components: &[String]) -> Result<Option<DirectoryRecord>> {
        let Some(index) = self.path_table.lookup(components) else {
            return Ok(None);
        };
        let entry = &self.path_table.entries()[index];
        debug!(index, lba = entry.extent_lba, "path table hit");

        let name = entry.name.clone();
        let mut record = directory::self_record(&mut self.source, entry.extent_lba)?;
        record.name = name;
        Ok(Some(record))
    }

    /// Tree walk strategy: search component by component from the root
    fn dir_record_by_root(&mut self, components: &[String]) -> Result<DirectoryRecord> {
        let record = directory::find_file(&mut self.source, &self.pvd.root, components)?;
        if !record.is_directory() {
            return Err(Iso9660Error::not_found(components.join("/")));
        }
        Ok(record)
    }
}

/// Replace the component carried by a `NotFound` with the full request
fn full_path(err: Iso9660Error, path: &str) -> Iso9660Error {
    match err {
        Iso9660Error::NotFound { .. } => Iso9660Error::not_found(path),
        other => other,
    }
}
