mod commands;
mod input;
mod opts;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::compose::ComposeArgs;
use commands::decode::{DecodeFruArgs, DecodeLocArgs};
use commands::eth::EthArgs;
use commands::xname::XnameArgs;
use opts::GlobalOpts;

#[derive(Parser, Debug)]
#[command(name = "hwinv", version, about = "HMS hardware inventory tool")]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose flat location records into a system inventory
    Compose(ComposeArgs),

    /// Inspect component xnames
    Xname(XnameArgs),

    /// Decode a raw location payload for a component
    DecodeLoc(DecodeLocArgs),

    /// Decode a raw FRU payload for a component type
    DecodeFru(DecodeFruArgs),

    /// Ethernet interface inventory on the state manager
    Eth(EthArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();
    let opts = &cli.opts;

    match cli.command {
        Command::Compose(args) => commands::compose::cmd_compose(opts, &args),
        Command::Xname(args) => commands::xname::cmd_xname(opts, &args),
        Command::DecodeLoc(args) => commands::decode::cmd_decode_loc(opts, &args),
        Command::DecodeFru(args) => commands::decode::cmd_decode_fru(opts, &args),
        Command::Eth(args) => commands::eth::cmd_eth(opts, &args).await,
    }
}

/// Logs go to stderr, filtered by RUST_LOG (default: warn).
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
