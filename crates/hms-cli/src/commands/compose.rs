//! `hwinv compose` command.

use anyhow::{Result, bail};
use clap::Args;
use hms_inventory::{HwInvByLoc, compose};

use crate::input::read_json_input;
use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Flat location records: JSON array literal, @file, or @- for stdin
    pub input: String,

    /// Output layout: FullyFlat, NestNodesOnly or Hierarchical
    #[arg(long, env = "HWINV_FORMAT", default_value = "NestNodesOnly")]
    pub format: String,

    /// Root xname recorded in the inventory
    #[arg(long, env = "HWINV_XNAME", default_value = "s0")]
    pub xname: String,

    /// Fail when any record is skipped, unsupported or orphaned
    #[arg(long)]
    pub strict: bool,
}

pub fn cmd_compose(opts: &GlobalOpts, args: &ComposeArgs) -> Result<()> {
    let records: Vec<HwInvByLoc> = read_json_input(&args.input, "HW inventory records")?;
    let count = records.len();

    let composed = compose(records, args.xname.as_str(), &args.format)?;
    tracing::debug!(
        records = count,
        errors = composed.errors.len(),
        orphans = composed.orphans.len(),
        "composed inventory"
    );

    let mut warnings: Vec<String> = composed.errors.iter().map(ToString::to_string).collect();
    warnings.extend(
        composed
            .orphans
            .iter()
            .map(|id| format!("no parent found for {id}; left at top level")),
    );
    if args.strict && !warnings.is_empty() {
        bail!(
            "{} problem(s) composing inventory: {}",
            warnings.len(),
            warnings.join("; ")
        );
    }

    let data = serde_json::to_value(&composed.inventory)?;
    print_success(opts, data, warnings)
}
