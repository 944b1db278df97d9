use clap::Parser;
use sanctions_screen_cli::cli::output::{OutputMode, Styled};
use sanctions_screen_cli::cli::{batch_cmd, search_cmd};
use sanctions_screen_cli::{exit_code, logging, Cli, Commands, EXIT_NO_NAMES};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json);
    let mode = OutputMode::new(cli.quiet, cli.json, cli.no_color);

    let result = match &cli.command {
        Commands::Batch(args) => batch_cmd::run(args, mode).await.map(|()| true),
        Commands::Search(args) => search_cmd::run(args, mode).await,
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            let s = Styled::new(mode);
            eprintln!("  {} {err:#}", s.fail_sym());
            let code = exit_code(&err);
            if code == EXIT_NO_NAMES {
                eprintln!("  Use --name, --input-txt or --input-csv.");
            }
            ExitCode::from(code)
        }
    }
}
