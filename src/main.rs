mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::context::Context;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose);

    let result = Context::from_cli(&args).and_then(|ctx| run(&ctx, &args.command));

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

fn run(ctx: &Context, command: &Commands) -> crate::core::errors::Result<()> {
    match command {
        Commands::Keys { action } => cli::commands::keys::execute(ctx, action),
        Commands::Encrypt {
            files,
            recipients,
            symmetric,
            armor,
        } => cli::commands::encrypt::execute(ctx, files, recipients, *symmetric, *armor),
        Commands::Decrypt { file } => cli::commands::decrypt::execute(ctx, file),
        Commands::Sign {
            file,
            key,
            armor,
            attached,
        } => cli::commands::sign::execute(ctx, file, key, *armor, *attached),
        Commands::Verify { file, signature } => {
            cli::commands::verify::execute(ctx, file, signature.as_deref())
        }
        Commands::Inspect { file, json } => cli::commands::inspect::execute(ctx, file, *json),
        Commands::Which => cli::commands::which::execute(ctx),
    }
}

/// `RUST_LOG` wins; otherwise `-v` turns on debug output for ezgpg.
fn init_logging(verbose: bool) {
    let default = if verbose { "ezgpg=debug" } else { "ezgpg=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
