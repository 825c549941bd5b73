// SPDX-License-Identifier: MIT

use crate::constant::FAT_ATTR_MASK;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FatAttributes: u8 {
        const READ_ONLY = 0x01;
        const HIDDEN    = 0x02;
        const SYSTEM    = 0x04;
        const VOLUME_ID = 0x08;
        const DIRECTORY = 0x10;
        const ARCHIVE   = 0x20;
        const LFN       = 0x0F;
    }
}

impl FatAttributes {
    /// Long-name slots carry READ_ONLY|HIDDEN|SYSTEM|VOLUME_ID in the low six
    /// bits; they must be ruled out before VOLUME_ID is tested on its own.
    #[inline]
    pub fn is_long_name(self) -> bool {
        self.bits() & FAT_ATTR_MASK == Self::LFN.bits()
    }

    /// VOLUME_ID set and DIRECTORY clear.
    #[inline]
    pub fn is_volume_id(self) -> bool {
        self.intersection(Self::VOLUME_ID | Self::DIRECTORY) == Self::VOLUME_ID
    }
}
