pub mod check;
pub mod completions;
pub mod config;
pub mod routes;
pub mod signin;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(
    name = "dispatch-desk",
    about = "Terminal sign-in console for an emergency dispatch workstation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate credentials and run the simulated sign-in without the TUI.
    Check {
        /// Username to sign in with
        #[arg(long, default_value = "")]
        username: String,
        /// Role: operator, emt, or manager
        #[arg(long, default_value = "")]
        role: String,
        /// Password (prompted interactively when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Override the simulated authentication delay
        #[arg(long = "delay-ms")]
        delay_ms: Option<u64>,
    },
    /// Print the role routing table.
    Routes,
    /// Show or update settings.
    Config {
        /// Simulated authentication delay in milliseconds
        #[arg(long = "submit-delay-ms")]
        submit_delay_ms: Option<u64>,
        /// How long the error banner stays up, in milliseconds
        #[arg(long = "banner-ttl-ms")]
        banner_ttl_ms: Option<u64>,
        /// Background effects on the sign-in screen (true/false)
        #[arg(long)]
        effects: Option<bool>,
    },
    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
