use anyhow::Context;
use bannergrab::cli::{self, Cli};
use bannergrab::output;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    // Ports are scanned strictly one after another; one thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let code = runtime.block_on(async {
        match cli::run(&args).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                output::print_error(&e.to_string());
                e.exit_code()
            }
        }
    });

    Ok(code)
}

/// Log to stderr so diagnostics never interleave with result lines on stdout.
fn init_tracing(verbose: bool) {
    let default = if verbose { "bannergrab=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
