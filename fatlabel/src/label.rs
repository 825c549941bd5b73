// SPDX-License-Identifier: MIT

use alloc::string::String;
use core::fmt;

use crate::constant::FAT_LABEL_LEN;
use crate::geometry::FatVariant;

/// Turns an 11-byte padded label field into a display string.
///
/// The trailing pad run is cut at the first position, scanning down from the
/// terminator slot at index 11, that holds a space or NUL right after a
/// non-space byte. Single embedded spaces survive. A field with no such
/// position (all spaces) is kept whole. Bytes past an embedded NUL are
/// dropped; anything that is not UTF-8 is replaced.
pub fn normalize(raw: &[u8; FAT_LABEL_LEN]) -> String {
    let byte_at = |i: usize| raw.get(i).copied().unwrap_or(0);

    let mut end = FAT_LABEL_LEN;
    for i in (1..=FAT_LABEL_LEN).rev() {
        let b = byte_at(i);
        if (b == b' ' || b == 0) && byte_at(i - 1) != b' ' {
            end = i;
            break;
        }
    }

    let field = &raw[..end];
    let field = match field.iter().position(|&b| b == 0) {
        Some(nul) => &field[..nul],
        None => field,
    };
    String::from_utf8_lossy(field).into_owned()
}

/// Both labels of one FAT volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub variant: FatVariant,
    /// Label field of the boot sector. Always read, possibly blank.
    pub boot: String,
    /// Volume-ID entry of the root directory, if there is one.
    pub volume: Option<String>,
}

impl Labels {
    /// True when either label equals `target`, ignoring ASCII case.
    pub fn matches(&self, target: &str) -> bool {
        self.boot.eq_ignore_ascii_case(target)
            || self
                .volume
                .as_deref()
                .is_some_and(|v| v.eq_ignore_ascii_case(target))
    }
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} boot={:?}", self.variant, self.boot)?;
        match &self.volume {
            Some(v) => write!(f, " volume={v:?}"),
            None => write!(f, " volume=<none>"),
        }
    }
}
