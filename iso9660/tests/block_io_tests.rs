//! Block device source tests

mod common;

use common::{sample_image, MemoryBlockDevice};
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;
use iso9660::error::Iso9660Error;
use iso9660::{BlockDeviceSource, Iso9660, SectorSource};

#[test]
fn test_memory_block_device_creation() {
    let mut device = MemoryBlockDevice::new(vec![0u8; 10 * 2048]);

    assert_eq!(device.block_size().to_u32(), 2048);
    assert_eq!(device.num_blocks().unwrap(), 10);
}

#[test]
fn test_device_is_read_only() {
    let mut device = MemoryBlockDevice::new(vec![0u8; 10 * 2048]);
    assert!(device.write_blocks(Lba(0), &[0u8; 2048]).is_err());
}

#[test]
fn test_fetch_whole_sector() {
    let mut data = vec![0u8; 10 * 2048];
    for i in 0..2048 {
        data[3 * 2048 + i] = (i % 256) as u8;
    }
    let mut source = BlockDeviceSource::new(MemoryBlockDevice::new(data), 0);

    let bytes = source.fetch(3, 2048).unwrap().into_inner();
    for (i, byte) in bytes.iter().enumerate() {
        assert_eq!(*byte, (i % 256) as u8);
    }
}

#[test]
fn test_fetch_partial_sector_length() {
    let mut data = vec![0u8; 10 * 2048];
    data[4 * 2048..4 * 2048 + 5].copy_from_slice(b"HELLO");
    let mut source = BlockDeviceSource::new(MemoryBlockDevice::new(data), 0);

    let bytes = source.fetch(4, 5).unwrap().into_inner();
    assert_eq!(bytes, b"HELLO");
}

#[test]
fn test_fetch_with_small_blocks() {
    let mut data = vec![0u8; 10 * 2048];
    data[2 * 2048..2 * 2048 + 3].copy_from_slice(b"ABC");
    let device = MemoryBlockDevice::with_block_size(data, 512);
    let mut source = BlockDeviceSource::new(device, 0);

    let bytes = source.fetch(2, 3000).unwrap().into_inner();
    assert_eq!(bytes.len(), 3000);
    assert_eq!(&bytes[..3], b"ABC");
}

#[test]
fn test_fetch_out_of_bounds() {
    let mut source = BlockDeviceSource::new(MemoryBlockDevice::new(vec![0u8; 10 * 2048]), 0);

    let result = source.fetch(10, 2048);
    assert!(matches!(result, Err(Iso9660Error::ShortRead { expected: 2048, actual: 0 })));
}

#[test]
fn test_fetch_length_past_device_end() {
    let mut source = BlockDeviceSource::new(MemoryBlockDevice::new(vec![0u8; 10 * 2048]), 0);

    // Checked against the device size before any buffer is sized
    let result = source.fetch(8, u32::MAX as usize);
    assert!(matches!(
        result,
        Err(Iso9660Error::ShortRead { expected, actual: 4096 }) if expected == u32::MAX as usize
    ));
}

#[test]
fn test_image_at_device_offset() {
    let image = sample_image();

    // 1 MiB of 512-byte blocks ahead of the image, as in a partition
    let mut data = vec![0u8; 2048 * 512];
    data.extend_from_slice(&image.data);
    let device = MemoryBlockDevice::with_block_size(data, 512);

    let mut iso = Iso9660::new(BlockDeviceSource::new(device, 2048)).expect("mount at offset");
    assert_eq!(iso.primary_descriptor().volume_id, "TEST VOLUME");
    assert_eq!(iso.get_file("/HELLO.TXT").unwrap(), b"HELLO WRLD");
    assert_eq!(iso.tree(true).unwrap().len(), image.files.len() + image.dirs.len());
}

#[test]
fn test_source_passes_through_boxed() {
    let image = sample_image();
    let boxed: Box<dyn SectorSource> = Box::new(BlockDeviceSource::new(image.device(), 0));

    let mut iso = Iso9660::new(boxed).unwrap();
    assert_eq!(iso.get_file("/FOO.TXT").unwrap(), b"foo");
}
