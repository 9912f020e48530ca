//! Block device source
//!
//! Adapts any `gpt_disk_io::BlockIo` device (disk, partition, in-memory
//! test device) to the sector contract, with the image starting at an
//! arbitrary device LBA.

use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;
use tracing::debug;

use super::SectorSource;
use crate::error::{Iso9660Error, Result};
use crate::utils::{sector::sector_to_byte, ReadCursor};

/// ISO image stored on a block device
#[derive(Debug)]
pub struct BlockDeviceSource<B: BlockIo> {
    device: B,
    start_lba: u64,
}

impl<B: BlockIo> BlockDeviceSource<B> {
    /// Image begins at device block `start_lba` (0 for a raw ISO)
    pub fn new(device: B, start_lba: u64) -> Self {
        Self { device, start_lba }
    }

    /// Give the device back
    pub fn into_inner(self) -> B {
        self.device
    }
}

impl<B: BlockIo> SectorSource for BlockDeviceSource<B> {
    fn fetch(&mut self, sector: u32, length: usize) -> Result<ReadCursor> {
        if length == 0 {
            return Ok(ReadCursor::new(Vec::new()));
        }

        let block_size = self.device.block_size().to_u32() as u64;
        let offset = self.start_lba * block_size + sector_to_byte(sector);
        let first_block = offset / block_size;
        let skip = (offset % block_size) as usize;
        let blocks = (skip + length).div_ceil(block_size as usize);
        debug!(sector, length, first_block, blocks, "block device fetch");

        let device_bytes = self
            .device
            .num_blocks()
            .map_err(|e| Iso9660Error::Device(format!("{e:?}")))?
            * block_size;
        if offset + length as u64 > device_bytes {
            return Err(Iso9660Error::ShortRead {
                expected: length,
                actual: device_bytes.saturating_sub(offset) as usize,
            });
        }

        let mut buffer = vec![0u8; blocks * block_size as usize];
        self.device
            .read_blocks(Lba(first_block), &mut buffer)
            .map_err(|e| Iso9660Error::Device(format!("{e:?}")))?;

        Ok(ReadCursor::new(buffer[skip..skip + length].to_vec()))
    }
}
