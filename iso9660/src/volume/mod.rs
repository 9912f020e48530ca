//! Volume descriptor parsing
//!
//! ISO9660 volume descriptors start at sector 16 and describe the filesystem layout.
//! Multiple descriptors may be present (Primary, Supplementary, Boot Record);
//! only the primary one is decoded, the rest are skipped up to the set terminator.
//! The type code alone decides how a sector is treated; the `CD001` identifier
//! is only enforced on the primary descriptor and the terminator.

pub mod primary;

pub use primary::PrimaryVolumeDescriptor;

use tracing::{debug, warn};

use crate::error::{Iso9660Error, Result};
use crate::source::SectorSource;
use crate::types::{VolumeDescriptorType, SECTOR_SIZE, VOLUME_DESCRIPTOR_START};
use primary::STANDARD_IDENTIFIER;

/// Scan the volume descriptor set and return the Primary Volume Descriptor
///
/// Reads one sector at a time from sector 16 until the set terminator
/// (type 255). At most `max_sectors` descriptors are examined; a set that
/// runs longer has no usable terminator and fails with `MissingTerminator`.
///
/// # Arguments
/// * `source` - Sector source holding the image
/// * `max_sectors` - Descriptor scan ceiling
///
/// # Returns
/// The first Primary Volume Descriptor of the set
pub fn mount<S: SectorSource + ?Sized>(source: &mut S, max_sectors: u32) -> Result<PrimaryVolumeDescriptor> {
    let mut primary: Option<PrimaryVolumeDescriptor> = None;

    for sector in VOLUME_DESCRIPTOR_START..VOLUME_DESCRIPTOR_START.saturating_add(max_sectors) {
        let mut cursor = source.fetch(sector, SECTOR_SIZE)?;

        let type_code = cursor.u8()?;
        let identifier = cursor.array::<5>()?;

        match VolumeDescriptorType::from_code(type_code) {
            Some(VolumeDescriptorType::Primary) => {
                if primary.is_some() {
                    warn!(sector, "ignoring additional primary volume descriptor");
                    continue;
                }
                cursor.set_position(0);
                let pvd = PrimaryVolumeDescriptor::decode(&mut cursor, sector)?;
                debug!(
                    sector,
                    volume_id = %pvd.volume_id,
                    path_table_size = pvd.path_table_size,
                    root_lba = pvd.root_extent_lba(),
                    "primary volume descriptor"
                );
                primary = Some(pvd);
            }
            Some(VolumeDescriptorType::Terminator) => {
                if &identifier != STANDARD_IDENTIFIER {
                    return Err(Iso9660Error::InvalidSignature { sector });
                }
                debug!(sector, "volume descriptor set terminator");
                return primary.ok_or(Iso9660Error::NoPrimaryVolumeDescriptor);
            }
            other => {
                debug!(sector, type_code, kind = ?other, "skipping volume descriptor");
            }
        }
    }

    Err(Iso9660Error::MissingTerminator { limit: max_sectors })
}
