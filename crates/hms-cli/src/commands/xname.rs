//! `hwinv xname` command.

use anyhow::Result;
use clap::Args;
use hms_xname::{kind_of, normalize, parent_of};
use serde_json::{Value, json};

use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct XnameArgs {
    /// Component ids to inspect
    #[arg(required = true)]
    pub ids: Vec<String>,
}

pub fn cmd_xname(opts: &GlobalOpts, args: &XnameArgs) -> Result<()> {
    let mut warnings = Vec::new();
    let entries: Vec<Value> = args
        .ids
        .iter()
        .map(|id| {
            let normalized = normalize(id);
            let kind = kind_of(&normalized);
            if !kind.is_valid() {
                warnings.push(format!("{id} is not a valid xname"));
            }
            json!({
                "id": id,
                "normalized": normalized,
                "type": kind,
                "parent": parent_of(&normalized),
                "valid": kind.is_valid(),
            })
        })
        .collect();
    print_success(opts, Value::Array(entries), warnings)
}
