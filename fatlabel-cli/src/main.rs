// SPDX-License-Identifier: MIT

mod output;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fatio::prelude::*;
use fatlabel::constant::DEFAULT_MAX_CHAIN_HOPS;
use fatlabel::scanner::{DEFAULT_DEVICE_DIR, DEFAULT_PARTITIONS_PATH};
use fatlabel::{ReadOptions, SearchOptions, find_device_by_label_with, read_labels_with};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "fatlabel", version, about = "FAT volume label reader", long_about = None)]
struct Cli {
    /// More diagnostics (repeat for trace output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print results and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Root-directory clusters visited before giving up on a FAT32 chain
    #[arg(long, default_value_t = DEFAULT_MAX_CHAIN_HOPS, global = true)]
    max_hops: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the boot and volume labels of a device or image
    Get {
        /// Block device or image file
        path: PathBuf,

        /// Byte offset of the FAT volume inside `path`
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
    /// Find the first device whose boot or volume label matches
    Search {
        /// Label to look for (case-insensitive)
        label: String,

        /// Partition listing
        #[arg(long, default_value = DEFAULT_PARTITIONS_PATH)]
        partitions: PathBuf,

        /// Directory holding the listed devices
        #[arg(long, default_value = DEFAULT_DEVICE_DIR)]
        dev_dir: PathBuf,
    },
}

fn init_logger(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Off,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let read = ReadOptions::new().with_max_chain_hops(cli.max_hops);

    match cli.command {
        Commands::Get { path, offset } => {
            let file =
                File::open(&path).with_context(|| format!("cannot open {}", path.display()))?;
            let mut io = FileFatIO::new_with_offset(&file, offset);
            let labels = read_labels_with(&mut io, &read)
                .with_context(|| format!("cannot read labels of {}", path.display()))?;

            output::labels(&path, &labels, cli.quiet);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search {
            label,
            partitions,
            dev_dir,
        } => {
            let opts = SearchOptions::new()
                .with_partitions_path(partitions)
                .with_device_dir(dev_dir)
                .with_read_options(read);

            match find_device_by_label_with(&label, &opts) {
                Some(device) => {
                    output::found(&device, cli.quiet);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    output::not_found(&label, cli.quiet);
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}
