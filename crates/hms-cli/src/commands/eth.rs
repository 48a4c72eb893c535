//! `hwinv eth` commands against the state manager.

use anyhow::Result;
use clap::{Args, Subcommand};
use hms_client::{CompEthInterface, EthInterfaceClient, TransportConfig};

use crate::input::read_json_input;
use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct EthArgs {
    /// State manager base URL (env: HMS_URL)
    #[arg(long, env = "HMS_URL")]
    pub hsm_url: String,

    /// Name sent as User-Agent (env: HMS_SERVICE_NAME)
    #[arg(long, env = "HMS_SERVICE_NAME", default_value = "hwinv")]
    pub service_name: String,

    #[command(subcommand)]
    pub command: EthCommand,
}

#[derive(Subcommand, Debug)]
pub enum EthCommand {
    /// List ethernet interfaces
    List {
        /// Only interfaces not yet tied to a component
        #[arg(long)]
        unknown: bool,
    },

    /// Add an ethernet interface
    Add {
        /// Interface object: JSON literal, @file, or @- for stdin
        input: String,

        /// Patch the interface if it already exists
        #[arg(long)]
        update: bool,
    },
}

pub async fn cmd_eth(opts: &GlobalOpts, args: &EthArgs) -> Result<()> {
    let config = TransportConfig::from_env();
    let client = EthInterfaceClient::from_config(&args.hsm_url, &config, args.service_name.as_str())?;

    match &args.command {
        EthCommand::List { unknown } => {
            let ifaces = if *unknown {
                client.get_unknown_components().await?
            } else {
                client.get_all_ethernet_interfaces().await?
            };
            tracing::debug!(count = ifaces.len(), "fetched ethernet interfaces");
            print_success(opts, serde_json::to_value(&ifaces)?, Vec::new())
        }
        EthCommand::Add { input, update } => {
            let iface: CompEthInterface = read_json_input(input, "ethernet interface")?;
            client.add_new_ethernet_interface(&iface, *update).await?;
            print_success(opts, serde_json::json!({ "added": iface.id }), Vec::new())
        }
    }
}
