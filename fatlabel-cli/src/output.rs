// SPDX-License-Identifier: MIT

use std::path::Path;

use colored::Colorize;
use fatlabel::Labels;

const TAG: &str = "[fatlabel]";

pub fn labels(path: &Path, labels: &Labels, quiet: bool) {
    if quiet {
        println!("{}", quiet_labels(labels));
        return;
    }
    println!("{} {} ({})", TAG.cyan(), path.display(), labels.variant);
    println!("{} boot label:   {:?}", TAG.cyan(), labels.boot);
    match &labels.volume {
        Some(v) => println!("{} volume label: {:?}", TAG.cyan(), v),
        None => println!("{} volume label: {}", TAG.cyan(), "<none>".dimmed()),
    }
}

/// `boot<TAB>volume`, the volume column left empty when there is none.
fn quiet_labels(labels: &Labels) -> String {
    format!(
        "{}\t{}",
        labels.boot,
        labels.volume.as_deref().unwrap_or_default()
    )
}

pub fn found(device: &Path, quiet: bool) {
    if quiet {
        println!("{}", device.display());
    } else {
        println!("{} found: {}", TAG.cyan(), device.display().to_string().green());
    }
}

pub fn not_found(label: &str, quiet: bool) {
    if !quiet {
        eprintln!("{} no device labelled {label:?}", TAG.cyan());
    }
}

pub fn error(e: &anyhow::Error) {
    eprintln!("{} {} {e:#}", TAG.cyan(), "error:".red().bold());
}
