//! Sector alignment and calculation utilities

use crate::types::SECTOR_SIZE;

/// Convert sector number to byte offset
pub fn sector_to_byte(sector: u32) -> u64 {
    sector as u64 * SECTOR_SIZE as u64
}

/// Calculate number of sectors needed for byte count
pub fn sectors_for_bytes(byte_count: u32) -> u32 {
    byte_count.div_ceil(SECTOR_SIZE as u32)
}

/// Byte offset of the next sector boundary strictly after `offset`
pub fn next_sector_boundary(offset: u32) -> u32 {
    (offset / SECTOR_SIZE as u32 + 1) * SECTOR_SIZE as u32
}
