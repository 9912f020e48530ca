//! Common test utilities and mock block devices

#![allow(dead_code)]

pub mod builder;
pub use builder::{IsoBuilder, TestImage};

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use std::io;

/// In-memory block device for testing
#[derive(Debug, Clone)]
pub struct MemoryBlockDevice {
    pub data: Vec<u8>,
    pub block_size: usize,
    pub reads: usize,
}

impl MemoryBlockDevice {
    /// Create a new memory block device from raw data
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_block_size(data, 2048)
    }

    /// Device with a block size other than the ISO sector size
    pub fn with_block_size(data: Vec<u8>, block_size: usize) -> Self {
        Self {
            data,
            block_size,
            reads: 0,
        }
    }
}

impl BlockIo for MemoryBlockDevice {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(self.block_size as u32).expect("valid block size")
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok((self.data.len() / self.block_size) as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.reads += 1;
        let offset = start_lba.0 as usize * self.block_size;
        if offset + dst.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            ));
        }
        dst.copy_from_slice(&self.data[offset..offset + dst.len()]);
        Ok(())
    }

    fn write_blocks(&mut self, _start_lba: Lba, _src: &[u8]) -> Result<(), Self::Error> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "test device is read-only",
        ))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Image most tests share
///
/// ```text
/// /HELLO.TXT          "HELLO WRLD"
/// /FOO.TXT            "foo"
/// /BAR/               directory
/// /BAR/BAZ.BIN        5000 bytes crossing sector boundaries
/// /BOOT/GRUB/GRUB.CFG
/// /DOCS/EN/README.TXT
/// /EMPTY.DAT          zero bytes
/// ```
pub fn sample_image() -> TestImage {
    IsoBuilder::new()
        .add_file("/HELLO.TXT", b"HELLO WRLD")
        .add_file("/FOO.TXT", b"foo")
        .add_dir("/BAR")
        .add_file("/BAR/BAZ.BIN", &pattern(5000))
        .add_file("/BOOT/GRUB/GRUB.CFG", b"set timeout=5\n")
        .add_file("/DOCS/EN/README.TXT", b"read me\n")
        .add_file("/EMPTY.DAT", b"")
        .build()
}

/// Deterministic non-repeating-per-sector content
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
