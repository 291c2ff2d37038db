//! Print rules instead of running them.

use clap::Args;
use color_eyre::eyre::Result;
use tracing::instrument;

use super::RuleArgs;

#[derive(Args, Clone, Debug)]
pub struct ShowConfig {
    /// Show post-processed rules, and exit.
    #[arg(long)]
    pub show: bool,

    /// Show raw rules, and exit.
    #[arg(long, conflicts_with = "show")]
    pub show_raw: bool,
}

impl ShowConfig {
    /// Whether the user asked to see rules rather than run them.
    pub fn requested(&self) -> bool {
        self.show || self.show_raw
    }
}

#[instrument]
pub fn main(rules: &RuleArgs, config: ShowConfig) -> Result<()> {
    if config.show_raw {
        for rule in rules.raw()? {
            println!("{rule}");
        }
        return Ok(());
    }

    for rule in rules.cooked()? {
        println!("{rule}");
    }
    Ok(())
}
