mod cli;
mod effects;
mod error;
mod form;
mod roles;
mod settings;
mod signin;
mod tui;
mod validate;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::signin::run(),
        Some(Commands::Check {
            username,
            role,
            password,
            delay_ms,
        }) => cli::check::run(&username, &role, password, delay_ms),
        Some(Commands::Routes) => cli::routes::run(),
        Some(Commands::Config {
            submit_delay_ms,
            banner_ttl_ms,
            effects,
        }) => cli::config::run(submit_delay_ms, banner_ttl_ms, effects),
        Some(Commands::Completions { shell }) => cli::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
