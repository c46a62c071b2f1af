//! `catkin-env scan` command

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::ScanArgs;
use catkin_env::ops::{format_scan, open_environment, scan, EnvironmentOptions};
use catkin_env::util::Config;
use catkin_env::GlobalContext;

pub fn execute(args: ScanArgs, options: &EnvironmentOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config();

    let paths = workspace_paths(args.paths, &config, &ctx);
    let mut env = open_environment(&config, options);
    let results = scan(&mut env, &paths)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&results).context("failed to serialize scan results")?;
        println!("{}", json);
    } else {
        print!("{}", format_scan(&results));
    }

    Ok(())
}

/// Paths from the command line, else from config, else the current directory.
pub fn workspace_paths(paths: Vec<PathBuf>, config: &Config, ctx: &GlobalContext) -> Vec<PathBuf> {
    if !paths.is_empty() {
        paths
    } else if !config.workspace.paths.is_empty() {
        config.workspace.paths.clone()
    } else {
        vec![ctx.cwd().to_path_buf()]
    }
}
