//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
pub struct Config {
    pub year_filter: Option<u16>,
    pub day_filter: Option<u8>,
    pub part_filter: Option<u8>,
    /// A solver must carry every one of these tags
    pub tags: Vec<String>,
    pub input_dir: PathBuf,
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    /// Compare answers with `.answer` files
    pub check: bool,
    pub quiet: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".into())),
            Some(n) => n,
            None => num_cpus(),
        };

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            thread_count,
            parallelize_by: args.parallelize_by,
            check: args.check,
            quiet: args.quiet,
        })
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(home) = dirs::home_dir()
    {
        if path_str == "~" {
            return home;
        }
        if let Some(rest) = path_str.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
