/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;

pub use args::{Cli, Commands};
pub use commands::{check_report, handle_command, list_routes, run_encrypt, show_version};
