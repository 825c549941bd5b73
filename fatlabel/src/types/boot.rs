// SPDX-License-Identifier: MIT

use core::mem::{offset_of, size_of};

use fatio::prelude::*;
use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::constant::*;
use crate::errors::*;
use crate::geometry::{FatVariant, Geometry};

/// BIOS Parameter Block fields shared by every FAT flavour (bytes 0x00..0x24).
#[derive(FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C)]
pub struct FatCommonBpb {
    pub jump_boot: [u8; 3],
    pub oem_name: [u8; 8],
    pub bytes_per_sector: U16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: U16,
    pub num_fats: u8,
    pub root_entry_count: U16,
    pub total_sectors_16: U16,
    pub media: u8,
    pub fat_size_16: U16,
    pub sectors_per_track: U16,
    pub num_heads: U16,
    pub hidden_sectors: U32,
    pub total_sectors_32: U32,
}

/// FAT12/16 extended BPB (starts at 0x24).
#[derive(FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C)]
pub struct Fat16ExtBpb {
    pub drive_number: u8,
    pub reserved1: u8,
    pub boot_signature: u8,
    pub volume_id: U32,
    pub volume_label: [u8; 11],
    pub fs_type: [u8; 8],
}

/// FAT32 extended BPB (starts at 0x24).
#[derive(FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C)]
pub struct Fat32ExtBpb {
    pub fat_size_32: U32,
    pub ext_flags: U16,
    pub fs_version: U16,
    pub root_cluster: U32,
    pub fsinfo_sector: U16,
    pub backup_boot_sector: U16,
    pub reserved: [u8; 12],
    pub drive_number: u8,
    pub reserved1: u8,
    pub boot_signature: u8,
    pub volume_id: U32,
    pub volume_label: [u8; 11],
    pub fs_type: [u8; 8],
}

// The records are plain little-endian field decoders: pin every field we
// read to its on-disk offset.
const _: () = {
    assert!(size_of::<FatCommonBpb>() == BPB_EXT_OFFSET);
    assert!(offset_of!(FatCommonBpb, bytes_per_sector) == BPB_BYTES_PER_SEC);
    assert!(offset_of!(FatCommonBpb, sectors_per_cluster) == BPB_SEC_PER_CLUS);
    assert!(offset_of!(FatCommonBpb, reserved_sectors) == BPB_RSVD_SEC_CNT);
    assert!(offset_of!(FatCommonBpb, num_fats) == BPB_NUM_FATS);
    assert!(offset_of!(FatCommonBpb, root_entry_count) == BPB_ROOT_ENT_CNT);
    assert!(offset_of!(FatCommonBpb, total_sectors_16) == BPB_TOT_SEC16);
    assert!(offset_of!(FatCommonBpb, media) == BPB_MEDIA);
    assert!(offset_of!(FatCommonBpb, fat_size_16) == BPB_FAT_SZ16);
    assert!(offset_of!(FatCommonBpb, total_sectors_32) == BPB_TOT_SEC32);
    assert!(BPB_EXT_OFFSET + offset_of!(Fat16ExtBpb, volume_label) == BS16_VOL_LAB);
    assert!(BPB_EXT_OFFSET + offset_of!(Fat32ExtBpb, fat_size_32) == BPB_FAT_SZ32);
    assert!(BPB_EXT_OFFSET + offset_of!(Fat32ExtBpb, root_cluster) == BPB_ROOT_CLUS);
    assert!(BPB_EXT_OFFSET + offset_of!(Fat32ExtBpb, volume_label) == BS32_VOL_LAB);
};

impl FatCommonBpb {
    /// Checks, in order: media descriptor, FAT count, sector size, cluster size.
    pub fn validate(&self) -> FormatResult {
        if self.media != FAT_MEDIA_FIXED && self.media != FAT_MEDIA_REMOVABLE {
            return Err(FormatError::InvalidMedia(self.media));
        }
        if !(FAT_MIN_FATS..=FAT_MAX_FATS).contains(&self.num_fats) {
            return Err(FormatError::InvalidFatCount(self.num_fats));
        }
        if self.bytes_per_sector.get() == 0 {
            return Err(FormatError::ZeroSectorSize);
        }
        if self.sectors_per_cluster == 0 {
            return Err(FormatError::ZeroSectorsPerCluster);
        }
        Ok(())
    }

    #[inline]
    pub fn total_sectors(&self) -> u32 {
        match self.total_sectors_16.get() {
            0 => self.total_sectors_32.get(),
            n => n as u32,
        }
    }
}

/// Variant-specific tail of the boot sector.
///
/// The two layouts overlap on disk with no stored tag; which one applies is
/// computed from the data cluster count.
#[derive(Copy, Clone, Debug)]
pub enum ExtendedBpb {
    Fat16(Fat16ExtBpb),
    Fat32(Fat32ExtBpb),
}

/// A validated boot sector with its derived geometry.
#[derive(Copy, Clone, Debug)]
pub struct BootSector {
    pub bpb: FatCommonBpb,
    pub ext: ExtendedBpb,
    pub geometry: Geometry,
}

impl BootSector {
    /// Decodes and validates a raw boot sector.
    pub fn parse(raw: &[u8]) -> FormatResult<Self> {
        let (bpb, tail) =
            FatCommonBpb::read_from_prefix(raw).map_err(|_| FormatError::Truncated)?;
        bpb.validate()?;

        let fat_size = match bpb.fat_size_16.get() {
            0 => {
                let (fat_size_32, _) =
                    U32::read_from_prefix(tail).map_err(|_| FormatError::Truncated)?;
                fat_size_32.get()
            }
            n => n as u32,
        };

        let geometry = Geometry::new(
            bpb.bytes_per_sector.get(),
            bpb.sectors_per_cluster,
            bpb.reserved_sectors.get(),
            bpb.num_fats,
            bpb.root_entry_count.get(),
            fat_size,
            bpb.total_sectors(),
        )?;

        let ext = match geometry.variant() {
            FatVariant::Fat16 => {
                let (ext, _) =
                    Fat16ExtBpb::read_from_prefix(tail).map_err(|_| FormatError::Truncated)?;
                ExtendedBpb::Fat16(ext)
            }
            FatVariant::Fat32 => {
                let (ext, _) =
                    Fat32ExtBpb::read_from_prefix(tail).map_err(|_| FormatError::Truncated)?;
                ExtendedBpb::Fat32(ext)
            }
        };

        Ok(Self { bpb, ext, geometry })
    }

    #[inline]
    pub fn variant(&self) -> FatVariant {
        match self.ext {
            ExtendedBpb::Fat16(_) => FatVariant::Fat16,
            ExtendedBpb::Fat32(_) => FatVariant::Fat32,
        }
    }

    /// Raw 11-byte label stored in the extended BPB.
    #[inline]
    pub fn label(&self) -> &[u8; FAT_LABEL_LEN] {
        match &self.ext {
            ExtendedBpb::Fat16(ext) => &ext.volume_label,
            ExtendedBpb::Fat32(ext) => &ext.volume_label,
        }
    }

    /// First cluster of the root directory (FAT32 only).
    #[inline]
    pub fn root_cluster(&self) -> Option<u32> {
        match &self.ext {
            ExtendedBpb::Fat16(_) => None,
            ExtendedBpb::Fat32(ext) => Some(ext.root_cluster.get()),
        }
    }
}

/// Reads the boot sector at offset 0 of `io` and validates it.
pub fn read_superblock<IO: FatIO + ?Sized>(io: &mut IO) -> LabelResult<BootSector> {
    let raw: [u8; FAT_BOOT_SECTOR_SIZE] = io
        .read_array_at(0)
        .map_err(LabelError::at(ReadStage::Superblock))?;
    Ok(BootSector::parse(&raw)?)
}
