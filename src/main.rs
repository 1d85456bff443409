use clap::Parser;
use tracing_subscriber::prelude::*;
use ui_navigator::cli::commands::{build_trace, cmd_kind, cmd_navigate, cmd_plan};
use ui_navigator::cli::config::{Cli, Commands, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Plan {
            model,
            from,
            to,
            repository,
        } => {
            cmd_plan(&model, &from, &to, repository.as_deref())?;
        }
        Commands::Navigate {
            model,
            from,
            to,
            repository,
            force_reload,
        } => {
            // Resolve trace settings: CLI > config > defaults
            let trace = build_trace(&config, cli.trace_file.as_deref(), cli.debug);
            cmd_navigate(&config, trace, &model, &from, &to, &repository, force_reload)?;
        }
        Commands::Kind { locator } => {
            cmd_kind(&locator)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level one step from warn.
fn init_logging(verbose: u8, debug: bool) {
    let level = match (verbose, debug) {
        (0, false) => tracing::Level::WARN,
        (1, false) => tracing::Level::INFO,
        (0..=2, _) => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
