use std::collections::BTreeMap;

use hms_xname::HmsKind;
use serde::ser::SerializeMap;

use crate::{HwInvByLoc, InventoryError};

/// Name of the array each kind's records are grouped under on the wire.
const ARRAY_KEYS: &[(HmsKind, &str)] = &[
    (HmsKind::System, "Systems"),
    (HmsKind::Cdu, "CDUs"),
    (HmsKind::CduMgmtSwitch, "CDUMgmtSwitches"),
    (HmsKind::Cabinet, "Cabinets"),
    (HmsKind::Cec, "CECs"),
    (HmsKind::CabinetCdu, "CabinetCDUs"),
    (HmsKind::CabinetBmc, "CabinetBMCs"),
    (HmsKind::CabinetPduController, "CabinetPDUControllers"),
    (HmsKind::CabinetPdu, "CabinetPDUs"),
    (HmsKind::CabinetPduNic, "CabinetPDUNics"),
    (HmsKind::CabinetPduOutlet, "CabinetPDUOutlets"),
    (HmsKind::CabinetPduPowerConnector, "CabinetPDUPowerConnectors"),
    (HmsKind::Chassis, "Chassis"),
    (HmsKind::ChassisBmc, "ChassisBMCs"),
    (HmsKind::CmmRectifier, "CMMRectifiers"),
    (HmsKind::CmmFpga, "CMMFpgas"),
    (HmsKind::ComputeModule, "ComputeModules"),
    (HmsKind::NodeBmc, "NodeBMCs"),
    (HmsKind::NodeBmcNic, "NodeBMCNics"),
    (HmsKind::NodeEnclosure, "NodeEnclosures"),
    (HmsKind::NodeEnclosurePowerSupply, "NodeEnclosurePowerSupplies"),
    (HmsKind::NodePowerConnector, "NodePowerConnectors"),
    (HmsKind::NodeFpga, "NodeFpgas"),
    (HmsKind::Node, "Nodes"),
    (HmsKind::Processor, "Processors"),
    (HmsKind::NodeAccel, "NodeAccels"),
    (HmsKind::NodeNic, "NodeNICs"),
    (HmsKind::NodeHsnNic, "NodeHsnNICs"),
    (HmsKind::Memory, "Memory"),
    (HmsKind::StorageGroup, "StorageGroups"),
    (HmsKind::Drive, "Drives"),
    (HmsKind::RouterModule, "RouterModules"),
    (HmsKind::RouterFpga, "RouterFpgas"),
    (HmsKind::RouterTorFpga, "RouterTORFpgas"),
    (HmsKind::RouterBmc, "RouterBMCs"),
    (HmsKind::RouterBmcNic, "RouterBMCNics"),
    (HmsKind::HsnBoard, "HSNBoards"),
    (HmsKind::HsnAsic, "HSNAsics"),
    (HmsKind::HsnLink, "HSNLinks"),
    (HmsKind::HsnConnector, "HSNConnectors"),
    (HmsKind::HsnConnectorPort, "HSNConnectorPorts"),
    (HmsKind::MgmtSwitch, "MgmtSwitches"),
    (HmsKind::MgmtSwitchConnector, "MgmtSwitchConnectors"),
];

pub fn array_key(kind: HmsKind) -> Option<&'static str> {
    ARRAY_KEYS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, key)| *key)
}

pub(crate) fn kind_for_key(key: &str) -> Option<HmsKind> {
    ARRAY_KEYS
        .iter()
        .find(|(_, name)| *name == key)
        .map(|(kind, _)| *kind)
}

/// Location records grouped by kind. Each group keeps insertion order and is
/// emitted under its array key; empty groups are omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildArrays {
    slots: BTreeMap<HmsKind, Vec<HwInvByLoc>>,
}

impl ChildArrays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to the group for its kind. Records of an invalid kind
    /// have no group and are rejected.
    pub fn push(&mut self, record: HwInvByLoc) -> Result<(), InventoryError> {
        let kind = record.kind();
        if !kind.is_valid() {
            return Err(InventoryError::InvalidId(record.id));
        }
        self.slots.entry(kind).or_default().push(record);
        Ok(())
    }

    pub(crate) fn attach(&mut self, kind: HmsKind, record: HwInvByLoc) {
        self.slots.entry(kind).or_default().push(record);
    }

    pub(crate) fn extend(&mut self, kind: HmsKind, records: Vec<HwInvByLoc>) {
        if records.is_empty() {
            return;
        }
        self.slots.entry(kind).or_default().extend(records);
    }

    pub fn get(&self, kind: HmsKind) -> &[HwInvByLoc] {
        self.slots.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Removes and returns the whole group for `kind`.
    pub fn take(&mut self, kind: HmsKind) -> Vec<HwInvByLoc> {
        self.slots.remove(&kind).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HmsKind, &[HwInvByLoc])> {
        self.slots
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(kind, list)| (*kind, list.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }

    /// Records directly held, not counting nested children.
    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Records held at any depth.
    pub fn total_len(&self) -> usize {
        self.slots
            .values()
            .flatten()
            .map(|record| 1 + record.children.total_len())
            .sum()
    }

    pub(crate) fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        for (kind, list) in self.iter() {
            if let Some(key) = array_key(kind) {
                map.serialize_entry(key, list)?;
            }
        }
        Ok(())
    }
}
