use clap::Parser;
use form_grounding::cli::commands::{cmd_explain, cmd_ground};
use form_grounding::cli::config::{Cli, Commands, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Ground {
            visual,
            dom,
            format,
            output,
            trace,
        } => {
            cmd_ground(
                &visual,
                &dom,
                format.as_deref(),
                output.as_deref(),
                trace.as_deref(),
                cli.parallel,
                &config,
            )?;
        }
        Commands::Explain { visual, dom, index } => {
            cmd_explain(&visual, &dom, index, &config)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
