//! Compose command - synthesize the code of an action

use anyhow::{Context, Result};
use clap::Parser;
use declsynth::compose::{Builder, Codes, ComposeOptions};
use declsynth::files::{load_action, load_index, load_objects};
use std::path::PathBuf;

use super::output::{format_context_summary, print_json};

#[derive(Parser, Debug)]
pub struct ComposeCmd {
    /// Action JSON: {"steps": [...]} ("-" for stdin)
    #[arg(long, short)]
    pub action: PathBuf,

    /// Package index JSON (repeatable)
    #[arg(long = "index", short = 'i', required = true)]
    pub indices: Vec<PathBuf>,

    /// JSON array of objects every step can see
    #[arg(long)]
    pub predefines: Option<PathBuf>,

    /// JSON array of variables declared before the first step
    #[arg(long)]
    pub vars: Option<PathBuf>,

    /// Fail on argument type mismatches (overrides DECLSYNTH_STRICT_TYPES)
    #[arg(long)]
    pub strict_types: bool,
}

impl ComposeCmd {
    pub fn execute(&self, json_output: bool, verbose: bool) -> Result<()> {
        let packages = self
            .indices
            .iter()
            .map(|path| load_index(path))
            .collect::<Result<Vec<_>>>()?;
        let predefines = match &self.predefines {
            Some(path) => load_objects(path)?,
            None => Vec::new(),
        };
        let vars = match &self.vars {
            Some(path) => load_objects(path)?,
            None => Vec::new(),
        };
        let action = load_action(&self.action)?;

        let builder = Builder::new(Codes {
            packages,
            predefines,
        })?;
        let mut options = ComposeOptions::from_env().with_vars(vars);
        if self.strict_types {
            options = options.with_strict_types(true);
        }
        let ctx = builder
            .build_action(&action, options)
            .context("Failed to compose action")?;

        if json_output {
            print_json(&ctx);
            return Ok(());
        }

        println!("{}", ctx.code);
        for mismatch in &ctx.diagnostics {
            eprintln!("warning: {}", mismatch);
        }
        if verbose {
            println!();
            print!("{}", format_context_summary(&ctx));
        }
        Ok(())
    }
}
