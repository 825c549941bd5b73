// SPDX-License-Identifier: MIT

// === Boot Sector ===

pub const FAT_BOOT_SECTOR_SIZE: usize = 512;
pub const FAT_LABEL_LEN: usize = 11;

// Common BPB offsets (identical for FAT12/16/32)
pub const BPB_BYTES_PER_SEC: usize = 0x0B;
pub const BPB_SEC_PER_CLUS: usize = 0x0D;
pub const BPB_RSVD_SEC_CNT: usize = 0x0E;
pub const BPB_NUM_FATS: usize = 0x10;
pub const BPB_ROOT_ENT_CNT: usize = 0x11;
pub const BPB_TOT_SEC16: usize = 0x13;
pub const BPB_MEDIA: usize = 0x15;
pub const BPB_FAT_SZ16: usize = 0x16;
pub const BPB_TOT_SEC32: usize = 0x20;

/// Both extended records start right after the common BPB.
pub const BPB_EXT_OFFSET: usize = 0x24;

// FAT12/16 extended BPB
pub const BS16_VOL_LAB: usize = 0x2B;

// FAT32 extended BPB
pub const BPB_FAT_SZ32: usize = 0x24;
pub const BPB_ROOT_CLUS: usize = 0x2C;
pub const BS32_VOL_LAB: usize = 0x47;

// === Media / FAT count sanity ===

pub const FAT_MEDIA_FIXED: u8 = 0xF8;
pub const FAT_MEDIA_REMOVABLE: u8 = 0xF0;
pub const FAT_MIN_FATS: u8 = 1;
pub const FAT_MAX_FATS: u8 = 16;

// === Cluster thresholds and markers ===

/// Volumes with at least this many data clusters use the FAT32 layout.
pub const FAT16_MAX: u32 = 0xFFF4;
/// Highest cluster number that still links to a data cluster.
pub const FAT32_MAX: u32 = 0x0FFF_FFF6;
pub const FAT32_ENTRY_MASK: u32 = 0x0FFF_FFFF;
pub const FAT32_ENTRY_SIZE: u64 = 4;
pub const FAT_FIRST_CLUSTER: u32 = 2;

/// Upper bound on root-directory clusters visited before giving up.
pub const DEFAULT_MAX_CHAIN_HOPS: usize = 100;

// === Directory entries ===

pub const FAT_DIR_ENTRY_SIZE: usize = 32;
pub const FAT_ENTRY_END_OF_DIR: u8 = 0x00;
pub const FAT_ENTRY_DELETED: u8 = 0xE5;
pub const FAT_ATTR_MASK: u8 = 0x3F;
