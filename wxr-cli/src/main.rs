//! WXR CLI - Command line tool for estimating rare rainfall and temperature events.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wxr-cli",
    version,
    about = "Rare rainfall and temperature event thresholds from daily station records"
)]
struct Cli {
    #[command(subcommand)]
    command: wxr_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("wxr-cli {}", env!("CARGO_PKG_VERSION"));
    wxr_cmd::run(cli.command)
}
