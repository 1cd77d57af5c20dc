//! Scan command - build a package index from a declaration feed

use anyhow::{Context, Result};
use clap::Parser;
use declsynth::files::{load_feed, write_json};
use declsynth::scanner::{scan_package, ScanOptions};
use std::path::PathBuf;

use super::output::{format_scan_summary, print_json};

#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// Declaration feed JSON ("-" for stdin)
    pub feed: PathBuf,

    /// Write the package index JSON to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Keep only exported declarations (overrides DECLSYNTH_ONLY_EXPORTED)
    #[arg(long)]
    pub only_exported: bool,
}

impl ScanCmd {
    pub fn execute(&self, json_output: bool, verbose: bool) -> Result<()> {
        let feed = load_feed(&self.feed)?;

        let mut options = ScanOptions::from_env();
        if self.only_exported {
            options = options.with_only_exported(true);
        }
        let pkg = scan_package(&feed, options)
            .with_context(|| format!("Failed to scan package {}", feed.name))?;

        if let Some(path) = &self.output {
            write_json(path, &pkg)?;
        }

        if json_output {
            print_json(&pkg);
        } else {
            print!("{}", format_scan_summary(&pkg, verbose));
            if let Some(path) = &self.output {
                println!("Wrote index: {}", path.display());
            }
        }
        Ok(())
    }
}
