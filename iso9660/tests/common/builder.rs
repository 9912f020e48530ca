//! Synthetic image builder
//!
//! Lays out a small but complete ISO9660 volume: descriptors from sector
//! 16, a type L path table, one extent per directory (records never
//! straddle a sector, the tail is zero padded) and one extent per file.

use std::collections::HashMap;

use iso9660::{Iso9660, MemorySource};

use super::MemoryBlockDevice;

const SECTOR: usize = 2048;

struct DirNode {
    name: String,
    parent: usize,
    children: Vec<Entry>,
}

struct FileNode {
    name: String,
    content: Vec<u8>,
}

#[derive(Clone, Copy)]
enum Entry {
    Dir(usize),
    File(usize),
}

pub struct IsoBuilder {
    dirs: Vec<DirNode>,
    files: Vec<FileNode>,
    leading_descriptors: Vec<u8>,
    terminator: bool,
    volume_id: String,
}

/// Built image plus where everything landed
pub struct TestImage {
    pub data: Vec<u8>,
    pub pvd_sector: u32,
    pub path_table_lba: u32,
    pub path_table_size: u32,
    /// Byte offset of each path table record, in table order
    pub path_table_records: Vec<usize>,
    /// Absolute directory path to extent LBA
    pub dirs: HashMap<String, u32>,
    /// Absolute file path to (extent LBA, content)
    pub files: HashMap<String, (u32, Vec<u8>)>,
}

impl IsoBuilder {
    pub fn new() -> Self {
        Self {
            dirs: vec![DirNode {
                name: String::new(),
                parent: 0,
                children: Vec::new(),
            }],
            files: Vec::new(),
            leading_descriptors: Vec::new(),
            terminator: true,
            volume_id: String::from("TEST VOLUME"),
        }
    }

    pub fn add_dir(&mut self, path: &str) -> &mut Self {
        self.ensure_dir(path);
        self
    }

    pub fn add_file(&mut self, path: &str, content: &[u8]) -> &mut Self {
        let trimmed = path.trim_matches('/');
        let (dir, name) = match trimmed.rsplit_once('/') {
            Some((dir, name)) => (self.ensure_dir(dir), name),
            None => (0, trimmed),
        };
        let index = self.files.len();
        self.files.push(FileNode {
            name: name.to_string(),
            content: content.to_vec(),
        });
        self.dirs[dir].children.push(Entry::File(index));
        self
    }

    /// Descriptor of `type_code` placed before the primary one
    pub fn leading_descriptor(&mut self, type_code: u8) -> &mut Self {
        self.leading_descriptors.push(type_code);
        self
    }

    pub fn without_terminator(&mut self) -> &mut Self {
        self.terminator = false;
        self
    }

    pub fn volume_id(&mut self, id: &str) -> &mut Self {
        self.volume_id = id.to_string();
        self
    }

    fn ensure_dir(&mut self, path: &str) -> usize {
        let mut current = 0;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            let existing = self.dirs[current].children.iter().find_map(|e| match *e {
                Entry::Dir(i) if self.dirs[i].name == part => Some(i),
                _ => None,
            });
            current = match existing {
                Some(i) => i,
                None => {
                    let i = self.dirs.len();
                    self.dirs.push(DirNode {
                        name: part.to_string(),
                        parent: current,
                        children: Vec::new(),
                    });
                    self.dirs[current].children.push(Entry::Dir(i));
                    i
                }
            };
        }
        current
    }

    fn dir_path(&self, mut d: usize) -> String {
        let mut names = Vec::new();
        while d != 0 {
            names.push(self.dirs[d].name.as_str());
            d = self.dirs[d].parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    fn child_identifier(&self, entry: Entry) -> Vec<u8> {
        match entry {
            Entry::Dir(i) => self.dirs[i].name.as_bytes().to_vec(),
            Entry::File(i) => format!("{};1", self.files[i].name).into_bytes(),
        }
    }

    /// Sectors a directory needs when records may not straddle a sector
    fn dir_sectors(&self, d: usize) -> u32 {
        let mut lengths = vec![record_len(1), record_len(1)];
        for &entry in &self.dirs[d].children {
            lengths.push(record_len(self.child_identifier(entry).len()));
        }

        let mut sectors = 1;
        let mut used = 0;
        for len in lengths {
            if used + len > SECTOR {
                sectors += 1;
                used = 0;
            }
            used += len;
        }
        sectors
    }

    pub fn build(&self) -> TestImage {
        // Breadth first gives parents before children, siblings in order
        let mut order = vec![0usize];
        let mut next = 0;
        while next < order.len() {
            let d = order[next];
            next += 1;
            for entry in &self.dirs[d].children {
                if let Entry::Dir(child) = *entry {
                    order.push(child);
                }
            }
        }
        let mut number = vec![0u16; self.dirs.len()];
        for (pos, &d) in order.iter().enumerate() {
            number[d] = pos as u16 + 1;
        }

        let descriptors = self.leading_descriptors.len() + 1 + usize::from(self.terminator);
        let path_table_lba = 16 + descriptors as u32;

        let mut path_table = Vec::new();
        let mut record_offsets = Vec::new();
        for &d in &order {
            let ident: Vec<u8> = if d == 0 {
                vec![0]
            } else {
                self.dirs[d].name.as_bytes().to_vec()
            };
            record_offsets.push(path_table.len());
            path_table.push(ident.len() as u8);
            path_table.push(0);
            path_table.extend_from_slice(&0u32.to_le_bytes());
            path_table.extend_from_slice(&number[self.dirs[d].parent].to_le_bytes());
            path_table.extend_from_slice(&ident);
            if ident.len() % 2 == 1 {
                path_table.push(0);
            }
        }
        let path_table_sectors = path_table.len().div_ceil(SECTOR).max(1) as u32;
        let mut next_lba = path_table_lba + path_table_sectors;

        let mut dir_lba = vec![0u32; self.dirs.len()];
        let mut dir_size = vec![0u32; self.dirs.len()];
        for &d in &order {
            let sectors = self.dir_sectors(d);
            dir_lba[d] = next_lba;
            dir_size[d] = sectors * SECTOR as u32;
            next_lba += sectors;
        }

        let mut file_lba = vec![0u32; self.files.len()];
        for (i, file) in self.files.iter().enumerate() {
            file_lba[i] = next_lba;
            next_lba += file.content.len().div_ceil(SECTOR) as u32;
        }

        let total_sectors = next_lba + 1;
        let mut data = vec![0u8; total_sectors as usize * SECTOR];

        let mut sector = 16usize;
        for &code in &self.leading_descriptors {
            write_descriptor_header(&mut data, sector, code);
            sector += 1;
        }
        let pvd_sector = sector as u32;
        self.write_pvd(
            &mut data,
            sector,
            total_sectors,
            path_table_lba,
            path_table.len() as u32,
            encode_record(dir_lba[0], dir_size[0], 0x02, &[0]),
        );
        if self.terminator {
            write_descriptor_header(&mut data, sector + 1, 255);
        }

        for (k, &d) in order.iter().enumerate() {
            let at = record_offsets[k] + 2;
            path_table[at..at + 4].copy_from_slice(&dir_lba[d].to_le_bytes());
        }
        let pt_start = path_table_lba as usize * SECTOR;
        data[pt_start..pt_start + path_table.len()].copy_from_slice(&path_table);

        for &d in &order {
            let parent = self.dirs[d].parent;
            let mut records = vec![
                encode_record(dir_lba[d], dir_size[d], 0x02, &[0]),
                encode_record(dir_lba[parent], dir_size[parent], 0x02, &[1]),
            ];
            for &entry in &self.dirs[d].children {
                let ident = self.child_identifier(entry);
                records.push(match entry {
                    Entry::Dir(c) => encode_record(dir_lba[c], dir_size[c], 0x02, &ident),
                    Entry::File(f) => {
                        encode_record(file_lba[f], self.files[f].content.len() as u32, 0x00, &ident)
                    }
                });
            }

            let mut offset = dir_lba[d] as usize * SECTOR;
            let mut used = 0;
            for rec in records {
                if used + rec.len() > SECTOR {
                    offset += SECTOR - used;
                    used = 0;
                }
                data[offset..offset + rec.len()].copy_from_slice(&rec);
                offset += rec.len();
                used += rec.len();
            }
        }

        let mut dirs = HashMap::new();
        for &d in &order {
            dirs.insert(self.dir_path(d), dir_lba[d]);
        }

        let mut files = HashMap::new();
        for (d, node) in self.dirs.iter().enumerate() {
            for &entry in &node.children {
                if let Entry::File(f) = entry {
                    let file = &self.files[f];
                    let start = file_lba[f] as usize * SECTOR;
                    data[start..start + file.content.len()].copy_from_slice(&file.content);

                    let path = match d {
                        0 => format!("/{}", file.name),
                        _ => format!("{}/{}", self.dir_path(d), file.name),
                    };
                    files.insert(path, (file_lba[f], file.content.clone()));
                }
            }
        }

        TestImage {
            data,
            pvd_sector,
            path_table_lba,
            path_table_size: path_table.len() as u32,
            path_table_records: record_offsets.iter().map(|o| pt_start + o).collect(),
            dirs,
            files,
        }
    }

    fn write_pvd(
        &self,
        data: &mut [u8],
        sector: usize,
        total_sectors: u32,
        path_table_lba: u32,
        path_table_size: u32,
        root: Vec<u8>,
    ) {
        let o = sector * SECTOR;
        write_descriptor_header(data, sector, 1);

        // Text fields are space padded
        data[o + 8..o + 72].fill(b' ');
        data[o + 190..o + 813].fill(b' ');
        put_str(&mut data[o + 8..o + 40], "LINUX");
        put_str(&mut data[o + 40..o + 72], &self.volume_id);
        put_str(&mut data[o + 318..o + 446], "MORPHEUSX");
        put_str(&mut data[o + 574..o + 702], "ISOFETCH TESTS");

        put_both_u32(&mut data[o + 80..o + 88], total_sectors);
        put_both_u16(&mut data[o + 120..o + 124], 1);
        put_both_u16(&mut data[o + 124..o + 128], 1);
        put_both_u16(&mut data[o + 128..o + 132], SECTOR as u16);
        put_both_u32(&mut data[o + 132..o + 140], path_table_size);
        data[o + 140..o + 144].copy_from_slice(&path_table_lba.to_le_bytes());
        data[o + 148..o + 152].copy_from_slice(&path_table_lba.to_be_bytes());
        data[o + 156..o + 190].copy_from_slice(&root);

        // Created and modified 2024-02-15 12:30:42.50 at GMT+1
        for at in [813, 830] {
            data[o + at..o + at + 16].copy_from_slice(b"2024021512304250");
            data[o + at + 16] = 4;
        }
        // Expiration unspecified (all '0'), effective left as zero bytes
        data[o + 847..o + 863].fill(b'0');

        data[o + 881] = 1;
    }
}

impl TestImage {
    pub fn source(&self) -> MemorySource {
        MemorySource::new(self.data.clone())
    }

    pub fn device(&self) -> MemoryBlockDevice {
        MemoryBlockDevice::new(self.data.clone())
    }

    pub fn open(&self) -> Iso9660<MemorySource> {
        Iso9660::new(self.source()).expect("test image should open")
    }

    /// Byte offset of a directory's extent
    pub fn dir_offset(&self, path: &str) -> usize {
        self.dirs[path] as usize * SECTOR
    }

    /// Byte offset of the PVD
    pub fn pvd_offset(&self) -> usize {
        self.pvd_sector as usize * SECTOR
    }

    /// Byte offset of the first occurrence of `needle` at or after `from`
    pub fn find(&self, needle: &[u8], from: usize) -> usize {
        self.data[from..]
            .windows(needle.len())
            .position(|w| w == needle)
            .map(|p| from + p)
            .expect("needle present in image")
    }

    pub fn write(&mut self, offset: usize, bytes: &[u8]) {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

fn record_len(identifier_len: usize) -> usize {
    33 + identifier_len + usize::from(identifier_len % 2 == 0)
}

/// Encode a directory record with both-endian fields
pub fn encode_record(lba: u32, size: u32, flags: u8, identifier: &[u8]) -> Vec<u8> {
    let length = record_len(identifier.len());
    let mut rec = Vec::with_capacity(length);
    rec.push(length as u8);
    rec.push(0);
    rec.extend_from_slice(&lba.to_le_bytes());
    rec.extend_from_slice(&lba.to_be_bytes());
    rec.extend_from_slice(&size.to_le_bytes());
    rec.extend_from_slice(&size.to_be_bytes());
    // 2024-02-15 12:30:42 UTC
    rec.extend_from_slice(&[124, 2, 15, 12, 30, 42, 0]);
    rec.push(flags);
    rec.push(0);
    rec.push(0);
    rec.extend_from_slice(&1u16.to_le_bytes());
    rec.extend_from_slice(&1u16.to_be_bytes());
    rec.push(identifier.len() as u8);
    rec.extend_from_slice(identifier);
    rec.resize(length, 0);
    rec
}

fn write_descriptor_header(data: &mut [u8], sector: usize, type_code: u8) {
    let o = sector * SECTOR;
    data[o] = type_code;
    data[o + 1..o + 6].copy_from_slice(b"CD001");
    data[o + 6] = 1;
}

fn put_str(field: &mut [u8], value: &str) {
    field[..value.len()].copy_from_slice(value.as_bytes());
}

fn put_both_u16(field: &mut [u8], value: u16) {
    field[0..2].copy_from_slice(&value.to_le_bytes());
    field[2..4].copy_from_slice(&value.to_be_bytes());
}

fn put_both_u32(field: &mut [u8], value: u32) {
    field[0..4].copy_from_slice(&value.to_le_bytes());
    field[4..8].copy_from_slice(&value.to_be_bytes());
}
