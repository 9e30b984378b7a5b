//! Command-line interface of the QFerm binary.

use std::path::PathBuf;

use clap::Parser;

use crate::io::format::qferm_output;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted QFerm heading to the `qferm-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    qferm_output!("╭─────────────────────────────────────────────────────────────────────────────────────────╮");
    qferm_output!("│                                                                                         │");
    qferm_output!("│      ██████╗  ███████╗ ███████╗ ██████╗  ███╗   ███╗                                    │");
    qferm_output!("│     ██╔═══██╗ ██╔════╝ ██╔════╝ ██╔══██╗ ████╗ ████║                                    │");
    qferm_output!("│     ██║   ██║ █████╗   █████╗   ██████╔╝ ██╔████╔██║                                    │");
    qferm_output!("│     ██║▄▄ ██║ ██╔══╝   ██╔══╝   ██╔══██╗ ██║╚██╔╝██║                                    │");
    qferm_output!("│     ╚██████╔╝ ██║      ███████╗ ██║  ██║ ██║ ╚═╝ ██║                                    │");
    qferm_output!("│      ╚══▀▀═╝  ╚═╝      ╚══════╝ ╚═╝  ╚═╝ ╚═╝     ╚═╝                                    │");
    qferm_output!("│                                                                                         │");
    qferm_output!("│     Fermionic Hamiltonians, qubit mappings and ground-state estimation    {version:>13} │");
    qferm_output!("│                                                                                         │");
    qferm_output!("╰─────────────────────────────────────────────────────────────────────────────────────────╯");
    qferm_output!("");
}

/// The command-line arguments of the QFerm binary.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// The YAML configuration file controlling the calculation.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// An optional file to which the main calculation output is written; if absent, the output
    /// goes to the console.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Boolean indicating if the output file, if specified, is overwritten rather than appended
    /// to.
    #[arg(short = 'w', long)]
    pub overwrite: bool,
}
