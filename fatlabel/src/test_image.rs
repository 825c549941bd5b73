// SPDX-License-Identifier: MIT
#![allow(dead_code)]

//! Synthetic FAT images for tests.
//!
//! Only the regions the label reader touches are materialized: the boot
//! sector, the first FAT and the root directory. Everything past them is
//! left out, so the images stay small while claiming realistic geometry.

pub const SECTOR: usize = 512;
pub const DIR_ENTRY: usize = 32;

// FAT16: 4 MiB, 4 sectors per cluster, 1 FAT of 8 sectors.
pub const FAT16_SECTORS_PER_CLUSTER: u8 = 4;
pub const FAT16_RESERVED: u16 = 1;
pub const FAT16_FAT_SIZE: u16 = 8;
pub const FAT16_TOTAL_SECTORS: u16 = 8192;

// FAT32: 1 sector per cluster, 2 FATs, just over the FAT16 cluster limit.
pub const FAT32_RESERVED: u16 = 32;
pub const FAT32_NUM_FATS: u8 = 2;
pub const FAT32_FAT_SIZE: u32 = 520;
pub const FAT32_DATA_CLUSTERS: u32 = 66_000;
pub const FAT32_ROOT_CLUSTER: u32 = 2;
/// Data clusters backed by the in-memory buffer (2..2 + this).
pub const FAT32_BACKED_CLUSTERS: u32 = 8;
pub const FAT32_ENTRIES_PER_CLUSTER: usize = SECTOR / DIR_ENTRY;

fn put_u16(buf: &mut [u8], off: usize, v: u16) {
    buf[off..off + 2].copy_from_slice(&v.to_le_bytes());
}

fn put_u32(buf: &mut [u8], off: usize, v: u32) {
    buf[off..off + 4].copy_from_slice(&v.to_le_bytes());
}

fn common_bpb(buf: &mut [u8; SECTOR], spc: u8, reserved: u16, fats: u8, root_entries: u16) {
    buf[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
    buf[3..11].copy_from_slice(b"MSWIN4.1");
    put_u16(buf, 0x0B, SECTOR as u16);
    buf[0x0D] = spc;
    put_u16(buf, 0x0E, reserved);
    buf[0x10] = fats;
    put_u16(buf, 0x11, root_entries);
    buf[0x15] = 0xF8;
    buf[510] = 0x55;
    buf[511] = 0xAA;
}

/// FAT16 boot sector with the given label and root entry count.
pub fn fat16_boot_sector(label: &[u8; 11], root_entries: u16) -> [u8; SECTOR] {
    let mut buf = [0u8; SECTOR];
    common_bpb(
        &mut buf,
        FAT16_SECTORS_PER_CLUSTER,
        FAT16_RESERVED,
        1,
        root_entries,
    );
    put_u16(&mut buf, 0x13, FAT16_TOTAL_SECTORS);
    put_u16(&mut buf, 0x16, FAT16_FAT_SIZE);
    buf[0x24] = 0x80;
    buf[0x26] = 0x29;
    put_u32(&mut buf, 0x27, 0x1234_5678);
    buf[0x2B..0x2B + 11].copy_from_slice(label);
    buf[0x36..0x36 + 8].copy_from_slice(b"FAT16   ");
    buf
}

/// FAT32 boot sector with the given label, root directory at cluster 2.
pub fn fat32_boot_sector(label: &[u8; 11]) -> [u8; SECTOR] {
    let mut buf = [0u8; SECTOR];
    common_bpb(&mut buf, 1, FAT32_RESERVED, FAT32_NUM_FATS, 0);
    let total = FAT32_RESERVED as u32 + FAT32_FAT_SIZE * FAT32_NUM_FATS as u32 + FAT32_DATA_CLUSTERS;
    put_u32(&mut buf, 0x20, total);
    put_u32(&mut buf, 0x24, FAT32_FAT_SIZE);
    put_u32(&mut buf, 0x2C, FAT32_ROOT_CLUSTER);
    put_u16(&mut buf, 0x30, 1);
    put_u16(&mut buf, 0x32, 6);
    buf[0x40] = 0x80;
    buf[0x42] = 0x29;
    put_u32(&mut buf, 0x43, 0x8765_4321);
    buf[0x47..0x47 + 11].copy_from_slice(label);
    buf[0x52..0x52 + 8].copy_from_slice(b"FAT32   ");
    buf
}

/// Raw 32-byte short directory entry.
pub fn dir_entry(name: &[u8; 11], attr: u8, cluster: u32) -> [u8; DIR_ENTRY] {
    let mut e = [0u8; DIR_ENTRY];
    e[..11].copy_from_slice(name);
    e[11] = attr;
    put_u16(&mut e, 20, (cluster >> 16) as u16);
    put_u16(&mut e, 26, cluster as u16);
    e
}

/// FAT16 image ending right after the fixed root directory.
pub struct Fat16Image {
    pub bytes: Vec<u8>,
}

impl Fat16Image {
    pub fn new(label: &[u8; 11], root_entries: u16) -> Self {
        let root_off = Self::root_offset();
        let mut bytes = vec![0u8; root_off + root_entries as usize * DIR_ENTRY];
        bytes[..SECTOR].copy_from_slice(&fat16_boot_sector(label, root_entries));
        let fat = FAT16_RESERVED as usize * SECTOR;
        bytes[fat..fat + 4].copy_from_slice(&[0xF8, 0xFF, 0xFF, 0xFF]);
        Self { bytes }
    }

    pub fn root_offset() -> usize {
        (FAT16_RESERVED as usize + FAT16_FAT_SIZE as usize) * SECTOR
    }

    pub fn put_root_entry(&mut self, slot: usize, entry: &[u8; DIR_ENTRY]) {
        let off = Self::root_offset() + slot * DIR_ENTRY;
        self.bytes[off..off + DIR_ENTRY].copy_from_slice(entry);
    }
}

/// FAT32 image covering the boot region, both FATs and a few data clusters.
pub struct Fat32Image {
    pub bytes: Vec<u8>,
}

impl Fat32Image {
    pub fn new(label: &[u8; 11]) -> Self {
        let len = Self::data_offset() + FAT32_BACKED_CLUSTERS as usize * SECTOR;
        let mut img = Self {
            bytes: vec![0u8; len],
        };
        img.bytes[..SECTOR].copy_from_slice(&fat32_boot_sector(label));
        img.set_fat(0, 0x0FFF_FFF8);
        img.set_fat(1, 0x0FFF_FFFF);
        img.set_fat(FAT32_ROOT_CLUSTER, 0x0FFF_FFFF);
        img
    }

    pub fn data_offset() -> usize {
        (FAT32_RESERVED as usize + FAT32_FAT_SIZE as usize * FAT32_NUM_FATS as usize) * SECTOR
    }

    pub fn cluster_offset(cluster: u32) -> usize {
        Self::data_offset() + (cluster - 2) as usize * SECTOR
    }

    /// Writes `value` into entry `cluster` of every FAT copy.
    pub fn set_fat(&mut self, cluster: u32, value: u32) {
        for copy in 0..FAT32_NUM_FATS as usize {
            let off = (FAT32_RESERVED as usize + copy * FAT32_FAT_SIZE as usize) * SECTOR
                + cluster as usize * 4;
            put_u32(&mut self.bytes, off, value);
        }
    }

    pub fn put_entry(&mut self, cluster: u32, slot: usize, entry: &[u8; DIR_ENTRY]) {
        let off = Self::cluster_offset(cluster) + slot * DIR_ENTRY;
        self.bytes[off..off + DIR_ENTRY].copy_from_slice(entry);
    }
}
