//! fomash runs gofmt rewrite rules over a codebase, one at a time.

use color_eyre::Result;
use tracing::{instrument, level_filters::LevelFilter};

mod cmd;

use clap::Parser;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Apply gofmt rewrite rules, expanding ellipsised rule families.
///
/// Runs `gofmt -s -s -d` over the targets, then `gofmt -r <rule> -d` for every
/// rule, failing as soon as one of them reports a difference (or at the end,
/// with `-c`).
#[derive(Parser)]
#[command(author, version = env!("FOMASH_VERSION"), about)]
struct Cli {
    #[command(flatten)]
    rules: cmd::RuleArgs,

    #[command(flatten)]
    show: cmd::show::ShowConfig,

    #[command(flatten)]
    run: cmd::run::RunConfig,
}

#[instrument]
fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Stdout carries the rewriter's diffs and stderr the progress lines, so
    // logging stays quiet unless asked for with `FOMASH_LOG`.
    //
    // Examples:
    // - `FOMASH_LOG=debug` to see each invocation and how rules were cooked
    // - `FOMASH_LOG=trace` to log everything
    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .pretty(),
        )
        .with(
            EnvFilter::builder()
                .with_env_var("FOMASH_LOG")
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    if cli.show.requested() {
        return cmd::show::main(&cli.rules, cli.show);
    }

    cmd::run::main(&cli.rules, cli.run)
}
