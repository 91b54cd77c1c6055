use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use remote_file_sender::{
    cli::Cli,
    config::{prompt_missing_passwords, Config},
    run_transfer,
    selection::{Decision, SelectionController},
    transfer::{summarize, TransferOptions},
};
use std::io;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_cli(&cli)?;
    let mut selection = config.into_selection();

    let clear_screen = !cli.no_clear;
    if clear_screen {
        Term::stdout().clear_screen().ok();
    }

    let stdin = io::stdin();
    let mut controller =
        SelectionController::new(stdin.lock(), io::stdout()).with_clear_screen(clear_screen);
    match controller
        .run(&mut selection)
        .context("Failed to read selection from the terminal")?
    {
        Decision::Quit => std::process::exit(0),
        Decision::Transfer => {}
    }

    prompt_missing_passwords(&mut selection)?;

    let options = TransferOptions {
        show_progress: !cli.no_progress,
    };
    let outcome = run_transfer(&selection, cli.host_key_policy, options);

    print!("{}", summarize(&outcome));
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
