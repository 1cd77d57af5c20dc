//! Paths command - list registered lookup paths

use anyhow::Result;
use clap::Parser;
use declsynth::files::load_index;
use std::path::PathBuf;

use super::output::print_json;

#[derive(Parser, Debug)]
pub struct PathsCmd {
    /// Package index JSON produced by `scan --output` ("-" for stdin)
    pub index: PathBuf,

    /// Only list paths starting with this prefix
    #[arg(long)]
    pub prefix: Option<String>,
}

impl PathsCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let pkg = load_index(&self.index)?;
        let prefix = self.prefix.as_deref().unwrap_or("");
        let keys: Vec<&str> = pkg.path_keys().filter(|k| k.starts_with(prefix)).collect();

        if json_output {
            print_json(&keys);
        } else {
            for key in keys {
                println!("{}", key);
            }
        }
        Ok(())
    }
}
