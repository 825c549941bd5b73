// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use fatio::prelude::*;
use log::debug;

use crate::reader::{ReadOptions, read_labels_with};

pub const DEFAULT_PARTITIONS_PATH: &str = "/proc/partitions";
pub const DEFAULT_DEVICE_DIR: &str = "/dev";
/// Listing lines longer than this are skipped, never truncated.
pub const MAX_LISTING_LINE_LEN: usize = 1024;

/// Where and how to look for devices.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Partition listing, one device per line with its name in the last column.
    pub partitions_path: PathBuf,
    /// Directory the listed device names live in.
    pub device_dir: PathBuf,
    pub max_line_len: usize,
    pub read: ReadOptions,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            partitions_path: PathBuf::from(DEFAULT_PARTITIONS_PATH),
            device_dir: PathBuf::from(DEFAULT_DEVICE_DIR),
            max_line_len: MAX_LISTING_LINE_LEN,
            read: ReadOptions::default(),
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_partitions_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.partitions_path = path.into();
        self
    }

    pub fn with_device_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.device_dir = dir.into();
        self
    }

    pub fn with_max_line_len(mut self, len: usize) -> Self {
        self.max_line_len = len;
        self
    }

    pub fn with_read_options(mut self, read: ReadOptions) -> Self {
        self.read = read;
        self
    }
}

/// Extracts the device name from one `major minor #blocks name` line.
///
/// Headers, blank lines and anything without exactly four columns, the first
/// three numeric, yield `None`.
pub fn parse_partition_line(line: &str) -> Option<&str> {
    let mut cols = line.split_whitespace();
    let (major, minor, blocks, name) = (cols.next()?, cols.next()?, cols.next()?, cols.next()?);
    if cols.next().is_some() {
        return None;
    }
    major.parse::<u64>().ok()?;
    minor.parse::<u64>().ok()?;
    blocks.parse::<u64>().ok()?;
    Some(name)
}

/// Scans the system partition listing for a FAT volume labelled `target`.
pub fn find_device_by_label(target: &str) -> Option<PathBuf> {
    find_device_by_label_with(target, &SearchOptions::default())
}

/// Same as [`find_device_by_label`], with explicit options.
pub fn find_device_by_label_with(target: &str, opts: &SearchOptions) -> Option<PathBuf> {
    let listing = match File::open(&opts.partitions_path) {
        Ok(f) => f,
        Err(e) => {
            debug!(
                "cannot open partition listing {}: {e}",
                opts.partitions_path.display()
            );
            return None;
        }
    };
    search_listing(BufReader::new(listing), opts, target)
}

/// Probes every device named in `listing`, in order, and returns the first
/// whose boot or volume label equals `target` ignoring ASCII case.
pub fn search_listing<R: BufRead>(listing: R, opts: &SearchOptions, target: &str) -> Option<PathBuf> {
    for raw in listing.split(b'\n') {
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                debug!("partition listing read failed: {e}");
                return None;
            }
        };

        if raw.len() > opts.max_line_len {
            debug!("skipping listing line of {} bytes", raw.len());
            continue;
        }
        let Ok(line) = core::str::from_utf8(&raw) else {
            continue;
        };
        let Some(name) = parse_partition_line(line) else {
            continue;
        };

        // Names are plain entries of the device directory.
        if name.contains('/') || name == ".." {
            debug!("skipping device name {name:?}");
            continue;
        }

        let path = opts.device_dir.join(name);
        if probe_device(&path, &opts.read, target) {
            return Some(path);
        }
    }
    None
}

/// True when `path` opens, parses as FAT and carries the target label.
fn probe_device(path: &Path, read: &ReadOptions, target: &str) -> bool {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!("skipping {}: {e}", path.display());
            return false;
        }
    };

    let mut io = FileFatIO::new(&file);
    match read_labels_with(&mut io, read) {
        Ok(labels) => {
            debug!("{}: {labels}", path.display());
            labels.matches(target)
        }
        Err(e) => {
            debug!("skipping {}: {e}", path.display());
            false
        }
    }
}
