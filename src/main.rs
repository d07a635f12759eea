mod cli;
mod client;
mod commands;
mod config;
mod credentials;
mod error;
mod fields;
mod logging;
mod output;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands, IssueCommands};
use client::YouTrackClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = cli::usage_exit_code(&e);
            let _ = e.print();
            std::process::exit(code);
        }
    };

    logging::init_logging(cli.verbose);
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    output::set_json_output(cli.json);
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't need config or a client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "youtrack", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        command => {
            // fetch carries its own token; a malformed file falls back to defaults
            let config = match command {
                Commands::Fetch(_) => Config::load_or_default()?,
                _ => Config::load()?,
            };
            let client = YouTrackClient::new(&config.base_url(cli.url.as_deref()), config.timeout())?;

            match command {
                Commands::Fetch(args) => {
                    commands::attachments::fetch(&client, &config, args).await?;
                }
                Commands::Issues(args) => {
                    let credentials = config.credentials(cli.token.as_deref())?;
                    commands::issues::list(&client, &credentials, args).await?;
                }
                Commands::Issue { action } => {
                    let credentials = config.credentials(cli.token.as_deref())?;
                    match action {
                        IssueCommands::List(args) => {
                            commands::issues::list(&client, &credentials, args).await?;
                        }
                        IssueCommands::View(args) => {
                            commands::issues::view(&client, &credentials, args).await?;
                        }
                        IssueCommands::Attachments { id } => {
                            commands::attachments::list(&client, &credentials, &id).await?;
                        }
                        IssueCommands::Download(args) => {
                            commands::attachments::download(&client, &config, &credentials, args)
                                .await?;
                        }
                    }
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
