use std::{collections::HashMap, fmt, str::FromStr};

use hms_xname::{HmsKind, kind_of, parent_of};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::{ChildArrays, HwInvByLoc, InventoryError, arrays};

/// Output layout of a composed inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InventoryFormat {
    /// Every record at the top level, grouped by kind.
    FullyFlat,
    /// Processors, memory and drives nested under their node; PDU outlets
    /// under their PDU.
    #[default]
    NestNodesOnly,
    /// Full containment tree. Currently produced as `NestNodesOnly`.
    Hierarchical,
}

impl InventoryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryFormat::FullyFlat => "FullyFlat",
            InventoryFormat::NestNodesOnly => "NestNodesOnly",
            InventoryFormat::Hierarchical => "Hierarchical",
        }
    }
}

impl fmt::Display for InventoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InventoryFormat {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FullyFlat" => Ok(InventoryFormat::FullyFlat),
            "NestNodesOnly" => Ok(InventoryFormat::NestNodesOnly),
            "Hierarchical" => Ok(InventoryFormat::Hierarchical),
            other => Err(InventoryError::InvalidFormat(other.to_string())),
        }
    }
}

impl Serialize for InventoryFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InventoryFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Inventory rooted at `xname`, with top-level components grouped by kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemHwInventory {
    pub xname: String,
    pub format: InventoryFormat,
    pub components: ChildArrays,
}

impl SystemHwInventory {
    pub fn new(xname: impl Into<String>, format: InventoryFormat) -> Self {
        SystemHwInventory {
            xname: xname.into(),
            format,
            components: ChildArrays::default(),
        }
    }

    /// Records at any depth.
    pub fn total_len(&self) -> usize {
        self.components.total_len()
    }
}

impl Serialize for SystemHwInventory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("XName", &self.xname)?;
        map.serialize_entry("Format", &self.format)?;
        self.components.serialize_entries(&mut map)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for SystemHwInventory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct InventoryVisitor;

        impl<'de> Visitor<'de> for InventoryVisitor {
            type Value = SystemHwInventory;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a system hardware inventory object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut inventory = SystemHwInventory::new("", InventoryFormat::default());
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "XName" => inventory.xname = map.next_value()?,
                        "Format" => inventory.format = map.next_value()?,
                        other => match arrays::kind_for_key(other) {
                            Some(kind) => {
                                let list: Vec<HwInvByLoc> = map.next_value()?;
                                inventory.components.extend(kind, list);
                            }
                            None => {
                                map.next_value::<IgnoredAny>()?;
                            }
                        },
                    }
                }
                Ok(inventory)
            }
        }

        deserializer.deserialize_map(InventoryVisitor)
    }
}

/// Result of a composition: the inventory plus everything that went wrong
/// with individual records along the way.
#[derive(Debug)]
pub struct Composed {
    pub inventory: SystemHwInventory,
    /// Per-record errors, in the order they were found.
    pub errors: Vec<InventoryError>,
    /// Ids of records whose parent was not in the input. They remain at the
    /// top level.
    pub orphans: Vec<String>,
}

impl Composed {
    pub fn last_error(&self) -> Option<&InventoryError> {
        self.errors.last()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// The inventory when no error was recorded, otherwise the last error.
    pub fn into_result(mut self) -> Result<SystemHwInventory, InventoryError> {
        match self.errors.pop() {
            Some(err) => Err(err),
            None => Ok(self.inventory),
        }
    }
}

/// Composes `records` into an inventory rooted at `xname` using the named
/// format. An unrecognized format fails before any record is looked at.
pub fn compose(
    records: Vec<HwInvByLoc>,
    xname: impl Into<String>,
    format: &str,
) -> Result<Composed, InventoryError> {
    let format = format.parse::<InventoryFormat>()?;
    Ok(compose_with(records, xname, format))
}

pub fn compose_with(
    records: Vec<HwInvByLoc>,
    xname: impl Into<String>,
    format: InventoryFormat,
) -> Composed {
    let mut composed = Composed {
        inventory: SystemHwInventory::new(xname, format),
        errors: Vec::new(),
        orphans: Vec::new(),
    };
    let top = &mut composed.inventory.components;

    for record in records {
        let kind = record.kind();
        if kind.is_valid() && !kind.is_modeled() {
            log::warn!("HW inventory record {} has unsupported type {kind}", record.id);
            composed.errors.push(InventoryError::UnsupportedKind(kind));
        }
        if let Err(err) = top.push(record) {
            log::warn!("skipping HW inventory record: {err}");
            composed.errors.push(err);
        }
    }

    if format == InventoryFormat::FullyFlat {
        return composed;
    }

    roll_up(
        top,
        HmsKind::Node,
        &[HmsKind::Processor, HmsKind::Memory, HmsKind::Drive],
        &mut composed.orphans,
    );
    roll_up(
        top,
        HmsKind::CabinetPdu,
        &[HmsKind::CabinetPduOutlet],
        &mut composed.orphans,
    );

    if format == InventoryFormat::Hierarchical {
        composed
            .errors
            .push(InventoryError::FormatNotImplemented(format));
    }
    composed
}

/// Moves each top-level record of `child_kinds` into the children of its
/// nearest `parent_kind` ancestor. Records whose ancestor is not present stay
/// where they are and are reported as orphans.
fn roll_up(
    top: &mut ChildArrays,
    parent_kind: HmsKind,
    child_kinds: &[HmsKind],
    orphans: &mut Vec<String>,
) {
    let mut parents = top.take(parent_kind);
    let index: HashMap<String, usize> = parents
        .iter()
        .enumerate()
        .map(|(i, parent)| (parent.id.clone(), i))
        .collect();

    for &child_kind in child_kinds {
        let mut stray = Vec::new();
        let mut moved = 0usize;
        for child in top.take(child_kind) {
            match ancestor_of_kind(&child.id, parent_kind).and_then(|id| index.get(&id)) {
                Some(&i) => {
                    parents[i].children.attach(child_kind, child);
                    moved += 1;
                }
                None => {
                    log::error!(
                        "HW inventory: no {parent_kind} parent found for {child_kind} {}",
                        child.id
                    );
                    orphans.push(child.id.clone());
                    stray.push(child);
                }
            }
        }
        log::debug!("rolled {moved} {child_kind} records under {parent_kind}");
        top.extend(child_kind, stray);
    }
    top.extend(parent_kind, parents);
}

/// Nearest ancestor id of `kind`, walking up one segment at a time. Stops at
/// the top of the hierarchy.
fn ancestor_of_kind(id: &str, kind: HmsKind) -> Option<String> {
    let mut current = parent_of(id);
    while !current.is_empty() {
        if kind_of(&current) == kind {
            return Some(current);
        }
        current = parent_of(&current);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_exact_names_only() {
        assert_eq!(
            "FullyFlat".parse::<InventoryFormat>().unwrap(),
            InventoryFormat::FullyFlat
        );
        assert_eq!(InventoryFormat::default(), InventoryFormat::NestNodesOnly);
        for bad in ["", "Bogus", "fullyflat"] {
            assert!(matches!(
                bad.parse::<InventoryFormat>(),
                Err(InventoryError::InvalidFormat(s)) if s == bad
            ));
        }
    }

    #[test]
    fn ancestor_walk_crosses_storage_groups() {
        assert_eq!(
            ancestor_of_kind("x0c0s0b0n0g0k0", HmsKind::Node).as_deref(),
            Some("x0c0s0b0n0")
        );
        assert_eq!(
            ancestor_of_kind("x0m0p0j3", HmsKind::CabinetPdu).as_deref(),
            Some("x0m0p0")
        );
        assert_eq!(ancestor_of_kind("x0c0s0", HmsKind::Node), None);
        assert_eq!(ancestor_of_kind("bogus", HmsKind::Node), None);
    }
}
