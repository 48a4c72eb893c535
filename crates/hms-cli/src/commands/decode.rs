//! `hwinv decode-loc` and `hwinv decode-fru` commands.

use anyhow::{Context, Result, bail};
use clap::Args;
use hms_inventory::{HmsKind, HwInvByFru, HwInvByLoc};
use hms_xname::normalize;

use crate::input::read_input;
use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct DecodeLocArgs {
    /// Component xname; its type selects the payload schema
    pub id: String,

    /// Raw location payload: JSON literal, @file, or @- for stdin
    pub payload: String,
}

#[derive(Args, Debug)]
pub struct DecodeFruArgs {
    /// Component type name (e.g. Node, Processor, CabinetPDU)
    #[arg(value_name = "TYPE")]
    pub kind: String,

    /// FRU identifier
    pub fru_id: String,

    /// Raw FRU payload: JSON literal, @file, or @- for stdin
    pub payload: String,
}

pub fn cmd_decode_loc(opts: &GlobalOpts, args: &DecodeLocArgs) -> Result<()> {
    let raw = read_input(&args.payload)?;
    let mut record = HwInvByLoc::new(normalize(&args.id));
    record
        .decode_location_info(raw.as_bytes())
        .with_context(|| format!("failed to decode location payload for {}", args.id))?;
    print_success(opts, serde_json::to_value(&record)?, Vec::new())
}

pub fn cmd_decode_fru(opts: &GlobalOpts, args: &DecodeFruArgs) -> Result<()> {
    let kind = HmsKind::from_name(&args.kind);
    if !kind.is_valid() {
        bail!("unknown component type '{}'", args.kind);
    }
    let raw = read_input(&args.payload)?;
    let mut fru = HwInvByFru::new(args.fru_id.as_str(), kind)?;
    fru.decode_fru_info(raw.as_bytes())
        .with_context(|| format!("failed to decode {kind} FRU payload"))?;
    print_success(opts, serde_json::to_value(&fru)?, Vec::new())
}
