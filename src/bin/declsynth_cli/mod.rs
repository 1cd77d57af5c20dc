//! Subcommands of the declsynth CLI.

pub mod compose;
pub mod output;
pub mod paths;
pub mod scan;
