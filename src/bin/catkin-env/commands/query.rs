//! `catkin-env query` command

use anyhow::{Context, Result};

use crate::cli::QueryArgs;
use crate::commands::scan::workspace_paths;
use catkin_env::ops::{format_statuses, open_environment, query, EnvironmentOptions};
use catkin_env::GlobalContext;

pub fn execute(args: QueryArgs, options: &EnvironmentOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config();

    let mut env = open_environment(&config, options);
    for path in workspace_paths(args.paths, &config, &ctx) {
        env.register(&path)?;
    }

    if !env.has_dependency_database() {
        tracing::debug!("No dependency database, only local packages can be classified");
    }

    let statuses = query(&env, &args.names);

    if args.json {
        let json =
            serde_json::to_string_pretty(&statuses).context("failed to serialize query results")?;
        println!("{}", json);
    } else {
        print!("{}", format_statuses(&statuses));
    }

    Ok(())
}
