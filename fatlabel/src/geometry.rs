// SPDX-License-Identifier: MIT

use core::fmt;

use crate::constant::*;
use crate::errors::{FormatError, FormatResult};

/// Layout family, decided by data cluster count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatVariant {
    /// FAT12 or FAT16: fixed root directory region after the FATs.
    Fat16,
    /// FAT32: root directory stored in a cluster chain.
    Fat32,
}

impl FatVariant {
    #[inline]
    pub fn from_cluster_count(data_clusters: u32) -> Self {
        if data_clusters < FAT16_MAX {
            FatVariant::Fat16
        } else {
            FatVariant::Fat32
        }
    }
}

impl fmt::Display for FatVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatVariant::Fat16 => f.write_str("FAT12/16"),
            FatVariant::Fat32 => f.write_str("FAT32"),
        }
    }
}

/// Volume geometry derived from a validated boot sector.
///
/// All sector quantities are widened to `u64` so that offsets computed from
/// hostile field values cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub bytes_per_sector: u64,
    pub sectors_per_cluster: u64,
    pub reserved_sectors: u64,
    pub fat_region_sectors: u64,
    pub root_dir_entries: u64,
    pub root_dir_sectors: u64,
    pub total_sectors: u64,
    pub data_clusters: u32,
}

impl Geometry {
    /// Derives the geometry from raw BPB fields.
    ///
    /// `fat_size` is already resolved (16-bit field if nonzero, else the
    /// FAT32 one). A zero sector size or cluster size is rejected.
    pub fn new(
        bytes_per_sector: u16,
        sectors_per_cluster: u8,
        reserved_sectors: u16,
        num_fats: u8,
        root_dir_entries: u16,
        fat_size: u32,
        total_sectors: u32,
    ) -> FormatResult<Self> {
        if bytes_per_sector == 0 {
            return Err(FormatError::ZeroSectorSize);
        }
        if sectors_per_cluster == 0 {
            return Err(FormatError::ZeroSectorsPerCluster);
        }

        let bps = bytes_per_sector as u64;
        let spc = sectors_per_cluster as u64;
        let reserved = reserved_sectors as u64;
        let fat_region_sectors = fat_size as u64 * num_fats as u64;
        let root_dir_entries = root_dir_entries as u64;
        // FAT32 stores 0 root entries, so this is 0 there without a special case.
        let root_dir_sectors = (root_dir_entries * FAT_DIR_ENTRY_SIZE as u64).div_ceil(bps);
        let total_sectors = total_sectors as u64;

        let data_sectors = total_sectors
            .saturating_sub(reserved)
            .saturating_sub(fat_region_sectors)
            .saturating_sub(root_dir_sectors);
        let data_clusters = (data_sectors / spc).min(u32::MAX as u64) as u32;

        Ok(Self {
            bytes_per_sector: bps,
            sectors_per_cluster: spc,
            reserved_sectors: reserved,
            fat_region_sectors,
            root_dir_entries,
            root_dir_sectors,
            total_sectors,
            data_clusters,
        })
    }

    #[inline]
    pub fn variant(&self) -> FatVariant {
        FatVariant::from_cluster_count(self.data_clusters)
    }

    #[inline]
    pub fn bytes_per_cluster(&self) -> u64 {
        self.sectors_per_cluster * self.bytes_per_sector
    }

    /// First sector after the reserved area and all FAT copies.
    #[inline]
    pub fn data_region_start_sector(&self) -> u64 {
        self.reserved_sectors + self.fat_region_sectors
    }

    /// Byte offset of the fixed FAT12/16 root directory.
    #[inline]
    pub fn root_dir_offset(&self) -> u64 {
        self.data_region_start_sector() * self.bytes_per_sector
    }

    /// Byte length of the fixed FAT12/16 root directory.
    #[inline]
    pub fn root_dir_len(&self) -> u64 {
        self.root_dir_entries * FAT_DIR_ENTRY_SIZE as u64
    }

    /// Byte offset of a FAT32 data cluster (`cluster >= 2`).
    #[inline]
    pub fn cluster_offset(&self, cluster: u32) -> u64 {
        let rel = cluster.saturating_sub(FAT_FIRST_CLUSTER) as u64 * self.sectors_per_cluster;
        (self.data_region_start_sector() + rel) * self.bytes_per_sector
    }

    /// Byte offset of a cluster's entry in the first FAT32 table.
    #[inline]
    pub fn fat_entry_offset(&self, cluster: u32) -> u64 {
        self.reserved_sectors * self.bytes_per_sector + cluster as u64 * FAT32_ENTRY_SIZE
    }
}
