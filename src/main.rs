use anyhow::Result;
use clap::Parser;
use safescore::cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            path,
            format,
            output,
            top,
            min_category,
            at,
            verbosity,
        } => safescore::commands::score::handle_score(
            safescore::commands::score::ScoreConfig {
                path,
                format,
                output,
                top,
                min_category: min_category.map(Into::into),
                at,
                verbosity,
            },
        ),
        Commands::Init { force } => safescore::commands::init::init_config(force),
        Commands::Validate {
            path,
            config,
            min_score,
            format,
            output,
            at,
            verbosity,
        } => safescore::commands::validate::validate_batch(
            safescore::commands::validate::ValidateConfig {
                path,
                config,
                min_score,
                format,
                output,
                at,
                verbosity,
            },
        ),
    }
}
