//! `catkin-env doctor` command

use anyhow::Result;

use catkin_env::ops::{doctor, format_report, EnvironmentOptions};
use catkin_env::GlobalContext;

pub fn execute(options: &EnvironmentOptions, verbose: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let report = doctor(&ctx, options);

    print!("{}", format_report(&report, verbose));

    // Exit with error code if required checks failed
    if !report.all_required_passed() {
        std::process::exit(1);
    }

    Ok(())
}
