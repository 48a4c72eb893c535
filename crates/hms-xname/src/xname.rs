use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::HashMap, fmt, str::FromStr};
use thiserror::Error;

use crate::HmsKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XnameError {
    #[error("xname is empty")]
    Empty,
    #[error("invalid xname '{value}': does not name a known component type")]
    Invalid { value: String },
}

/// Segment-letter signature of each recognized xname form, e.g. `x/c/s/b/n`
/// for `x3000c0s7b0n1`. Ordinals are free; only the letters pick the kind.
const SIGNATURES: &[(&str, HmsKind)] = &[
    ("s", HmsKind::System),
    ("d", HmsKind::Cdu),
    ("d/w", HmsKind::CduMgmtSwitch),
    ("x", HmsKind::Cabinet),
    ("x/e", HmsKind::Cec),
    ("x/d", HmsKind::CabinetCdu),
    ("x/b", HmsKind::CabinetBmc),
    ("x/m", HmsKind::CabinetPduController),
    ("x/m/p", HmsKind::CabinetPdu),
    ("x/m/i", HmsKind::CabinetPduNic),
    ("x/m/p/j", HmsKind::CabinetPduOutlet),
    ("x/m/p/v", HmsKind::CabinetPduPowerConnector),
    ("x/c", HmsKind::Chassis),
    ("x/c/b", HmsKind::ChassisBmc),
    ("x/c/t", HmsKind::CmmRectifier),
    ("x/c/f", HmsKind::CmmFpga),
    ("x/c/s", HmsKind::ComputeModule),
    ("x/c/s/b", HmsKind::NodeBmc),
    ("x/c/s/b/i", HmsKind::NodeBmcNic),
    ("x/c/s/e", HmsKind::NodeEnclosure),
    ("x/c/s/e/t", HmsKind::NodeEnclosurePowerSupply),
    ("x/c/s/v", HmsKind::NodePowerConnector),
    ("x/c/s/b/f", HmsKind::NodeFpga),
    ("x/c/s/b/n", HmsKind::Node),
    ("x/c/s/b/n/p", HmsKind::Processor),
    ("x/c/s/b/n/a", HmsKind::NodeAccel),
    ("x/c/s/b/n/i", HmsKind::NodeNic),
    ("x/c/s/b/n/h", HmsKind::NodeHsnNic),
    ("x/c/s/b/n/d", HmsKind::Memory),
    ("x/c/s/b/n/g", HmsKind::StorageGroup),
    ("x/c/s/b/n/g/k", HmsKind::Drive),
    ("x/c/r", HmsKind::RouterModule),
    ("x/c/r/f", HmsKind::RouterFpga),
    ("x/c/r/t/f", HmsKind::RouterTorFpga),
    ("x/c/r/b", HmsKind::RouterBmc),
    ("x/c/r/b/i", HmsKind::RouterBmcNic),
    ("x/c/r/e", HmsKind::HsnBoard),
    ("x/c/r/a", HmsKind::HsnAsic),
    ("x/c/r/a/l", HmsKind::HsnLink),
    ("x/c/r/j", HmsKind::HsnConnector),
    ("x/c/r/j/p", HmsKind::HsnConnectorPort),
    ("x/c/w", HmsKind::MgmtSwitch),
    ("x/c/w/j", HmsKind::MgmtSwitchConnector),
];

static SIGNATURE_INDEX: Lazy<HashMap<&'static str, HmsKind>> =
    Lazy::new(|| SIGNATURES.iter().copied().collect());

static SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]+)([0-9]+)").expect("segment pattern must compile"));

static ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("ordinal pattern must compile"));

struct Segment {
    letters: String,
    start: usize,
}

/// Splits an xname into contiguous letter+ordinal segments. `None` when any
/// character falls outside a segment.
fn segments(id: &str) -> Option<Vec<Segment>> {
    if id.is_empty() {
        return None;
    }
    let mut end = 0;
    let mut out = Vec::new();
    for caps in SEGMENT.captures_iter(id) {
        let whole = caps.get(0)?;
        if whole.start() != end {
            return None;
        }
        end = whole.end();
        out.push(Segment {
            letters: caps[1].to_ascii_lowercase(),
            start: whole.start(),
        });
    }
    if end != id.len() {
        return None;
    }
    Some(out)
}

/// Kind of the lowest-level component named by `id`, or `Invalid`.
pub fn kind_of(id: &str) -> HmsKind {
    let Some(segs) = segments(id) else {
        return HmsKind::Invalid;
    };
    let signature = segs
        .iter()
        .map(|s| s.letters.as_str())
        .collect::<Vec<_>>()
        .join("/");
    SIGNATURE_INDEX
        .get(signature.as_str())
        .copied()
        .unwrap_or(HmsKind::Invalid)
}

/// `id` with its lowest segment removed. Empty for single-segment or
/// malformed ids.
pub fn parent_of(id: &str) -> String {
    match segments(id) {
        Some(segs) if segs.len() > 1 => id[..segs[segs.len() - 1].start].to_string(),
        _ => String::new(),
    }
}

pub fn is_valid(id: &str) -> bool {
    kind_of(id).is_valid()
}

/// Canonical form: trimmed, lower case, no leading zeros on ordinals.
pub fn normalize(id: &str) -> String {
    let lowered = id.trim().to_ascii_lowercase();
    ORDINAL
        .replace_all(&lowered, |caps: &regex::Captures<'_>| {
            let digits = caps[0].trim_start_matches('0');
            if digits.is_empty() {
                "0".to_string()
            } else {
                digits.to_string()
            }
        })
        .into_owned()
}

/// A normalized xname known to name a valid component kind.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Xname(String);

impl Xname {
    pub fn new(value: impl AsRef<str>) -> Result<Self, XnameError> {
        let value = value.as_ref();
        if value.trim().is_empty() {
            return Err(XnameError::Empty);
        }
        let normalized = normalize(value);
        if is_valid(&normalized) {
            Ok(Xname(normalized))
        } else {
            Err(XnameError::Invalid {
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> HmsKind {
        kind_of(&self.0)
    }

    /// Parent component, when the parent is itself a recognized xname.
    pub fn parent(&self) -> Option<Xname> {
        let parent = parent_of(&self.0);
        if is_valid(&parent) {
            Some(Xname(parent))
        } else {
            None
        }
    }
}

impl fmt::Debug for Xname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Xname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Xname {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Xname {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Xname::new(s).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Xname {
    type Err = XnameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Xname::new(s)
    }
}

impl AsRef<str> for Xname {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
