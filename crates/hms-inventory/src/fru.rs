use hms_xname::HmsKind;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::Error as _,
    ser::SerializeMap,
};

use crate::{
    InventoryError,
    payload::{self, KindPayload, PayloadSlot, Tail},
    redfish::{
        ChassisFruInfo, DriveFruInfo, MemoryFruInfo, OutletFruInfo, PowerDistributionFruInfo,
        PowerSupplyFruInfo, ProcessorFruInfo, SystemFruInfo,
    },
};

const fn slot(kind: HmsKind, key: &'static str, tag: &'static str) -> PayloadSlot {
    PayloadSlot {
        kind,
        key,
        tag,
        aliases: &[],
    }
}

const FRU_SLOTS: [PayloadSlot; 14] = [
    slot(HmsKind::Cabinet, "CabinetFRUInfo", "HWInvByFRUCabinet"),
    slot(HmsKind::Chassis, "ChassisFRUInfo", "HWInvByFRUChassis"),
    slot(HmsKind::ComputeModule, "ComputeModuleFRUInfo", "HWInvByFRUComputeModule"),
    slot(HmsKind::RouterModule, "RouterModuleFRUInfo", "HWInvByFRURouterModule"),
    slot(HmsKind::NodeEnclosure, "NodeEnclosureFRUInfo", "HWInvByFRUNodeEnclosure"),
    slot(HmsKind::HsnBoard, "HSNBoardFRUInfo", "HWInvByFRUHSNBoard"),
    slot(HmsKind::Node, "NodeFRUInfo", "HWInvByFRUNode"),
    slot(HmsKind::Processor, "ProcessorFRUInfo", "HWInvByFRUProcessor"),
    slot(HmsKind::Memory, "MemoryFRUInfo", "HWInvByFRUMemory"),
    slot(HmsKind::Drive, "DriveFRUInfo", "HWInvByFRUDrive"),
    slot(HmsKind::CabinetPdu, "PDUFRUInfo", "HWInvByFRUPDU"),
    slot(HmsKind::CabinetPduOutlet, "OutletFRUInfo", "HWInvByFRUOutlet"),
    slot(HmsKind::CmmRectifier, "CMMRectifierFRUInfo", "HWInvByFRUCMMRectifier"),
    // Older producers wrote the bare prefix for this kind.
    PayloadSlot {
        kind: HmsKind::NodeEnclosurePowerSupply,
        key: "NodeEnclosurePowerSupplyFRUInfo",
        tag: "HWInvByFRUNodeEnclosurePowerSupply",
        aliases: &["HWInvByFRU"],
    },
];

/// Durable properties of a field-replaceable unit, one variant per modeled
/// kind. The chassis family shares a single schema.
#[derive(Debug, Clone, PartialEq)]
pub enum FruInfo {
    Cabinet(ChassisFruInfo),
    Chassis(ChassisFruInfo),
    ComputeModule(ChassisFruInfo),
    RouterModule(ChassisFruInfo),
    NodeEnclosure(ChassisFruInfo),
    HsnBoard(ChassisFruInfo),
    Node(SystemFruInfo),
    Processor(ProcessorFruInfo),
    Memory(MemoryFruInfo),
    Drive(DriveFruInfo),
    CabinetPdu(PowerDistributionFruInfo),
    CabinetPduOutlet(OutletFruInfo),
    CmmRectifier(PowerSupplyFruInfo),
    NodeEnclosurePowerSupply(PowerSupplyFruInfo),
}

fn chassis_slot(kind: HmsKind) -> Option<fn(ChassisFruInfo) -> FruInfo> {
    match kind {
        HmsKind::Cabinet => Some(FruInfo::Cabinet),
        HmsKind::Chassis => Some(FruInfo::Chassis),
        HmsKind::ComputeModule => Some(FruInfo::ComputeModule),
        HmsKind::RouterModule => Some(FruInfo::RouterModule),
        HmsKind::NodeEnclosure => Some(FruInfo::NodeEnclosure),
        HmsKind::HsnBoard => Some(FruInfo::HsnBoard),
        _ => None,
    }
}

impl FruInfo {
    pub fn kind(&self) -> HmsKind {
        self.slot().kind
    }

    pub fn key(&self) -> &'static str {
        self.slot().key
    }

    pub fn type_tag(&self) -> &'static str {
        self.slot().tag
    }
}

impl KindPayload for FruInfo {
    const SLOTS: &'static [PayloadSlot] = &FRU_SLOTS;

    fn slot(&self) -> &'static PayloadSlot {
        let index = match self {
            FruInfo::Cabinet(_) => 0,
            FruInfo::Chassis(_) => 1,
            FruInfo::ComputeModule(_) => 2,
            FruInfo::RouterModule(_) => 3,
            FruInfo::NodeEnclosure(_) => 4,
            FruInfo::HsnBoard(_) => 5,
            FruInfo::Node(_) => 6,
            FruInfo::Processor(_) => 7,
            FruInfo::Memory(_) => 8,
            FruInfo::Drive(_) => 9,
            FruInfo::CabinetPdu(_) => 10,
            FruInfo::CabinetPduOutlet(_) => 11,
            FruInfo::CmmRectifier(_) => 12,
            FruInfo::NodeEnclosurePowerSupply(_) => 13,
        };
        &Self::SLOTS[index]
    }

    fn deserialize_payload<'de, D>(kind: HmsKind, deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if let Some(wrap) = chassis_slot(kind) {
            return ChassisFruInfo::deserialize(deserializer).map(wrap);
        }
        match kind {
            HmsKind::Node => SystemFruInfo::deserialize(deserializer).map(FruInfo::Node),
            HmsKind::Processor => ProcessorFruInfo::deserialize(deserializer).map(FruInfo::Processor),
            HmsKind::Memory => MemoryFruInfo::deserialize(deserializer).map(FruInfo::Memory),
            HmsKind::Drive => DriveFruInfo::deserialize(deserializer).map(FruInfo::Drive),
            HmsKind::CabinetPdu => {
                PowerDistributionFruInfo::deserialize(deserializer).map(FruInfo::CabinetPdu)
            }
            HmsKind::CabinetPduOutlet => {
                OutletFruInfo::deserialize(deserializer).map(FruInfo::CabinetPduOutlet)
            }
            HmsKind::CmmRectifier => {
                PowerSupplyFruInfo::deserialize(deserializer).map(FruInfo::CmmRectifier)
            }
            HmsKind::NodeEnclosurePowerSupply => PowerSupplyFruInfo::deserialize(deserializer)
                .map(FruInfo::NodeEnclosurePowerSupply),
            other => Err(D::Error::custom(format!(
                "no FRU schema for component type {other}"
            ))),
        }
    }
}

impl Serialize for FruInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FruInfo::Cabinet(info)
            | FruInfo::Chassis(info)
            | FruInfo::ComputeModule(info)
            | FruInfo::RouterModule(info)
            | FruInfo::NodeEnclosure(info)
            | FruInfo::HsnBoard(info) => info.serialize(serializer),
            FruInfo::Node(info) => info.serialize(serializer),
            FruInfo::Processor(info) => info.serialize(serializer),
            FruInfo::Memory(info) => info.serialize(serializer),
            FruInfo::Drive(info) => info.serialize(serializer),
            FruInfo::CabinetPdu(info) => info.serialize(serializer),
            FruInfo::CabinetPduOutlet(info) => info.serialize(serializer),
            FruInfo::CmmRectifier(info) | FruInfo::NodeEnclosurePowerSupply(info) => {
                info.serialize(serializer)
            }
        }
    }
}

/// A specific field-replaceable unit, identified by FRUID independent of
/// where it is installed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "HwInvByFruWire")]
pub struct HwInvByFru {
    pub fru_id: String,
    kind: HmsKind,
    pub subtype: String,
    fru_info: Option<FruInfo>,
}

impl HwInvByFru {
    pub fn new(fru_id: impl Into<String>, kind: HmsKind) -> Result<Self, InventoryError> {
        let fru_id = fru_id.into();
        if fru_id.trim().is_empty() {
            return Err(InventoryError::InvalidFruId);
        }
        if !kind.is_valid() {
            return Err(InventoryError::InvalidKind);
        }
        Ok(HwInvByFru {
            fru_id,
            kind,
            subtype: String::new(),
            fru_info: None,
        })
    }

    pub fn kind(&self) -> HmsKind {
        self.kind
    }

    pub fn fru_info(&self) -> Option<&FruInfo> {
        self.fru_info.as_ref()
    }

    pub fn fru_type(&self) -> &'static str {
        self.fru_info.as_ref().map_or("", FruInfo::type_tag)
    }

    pub fn set_fru_info(&mut self, info: FruInfo) -> Result<(), InventoryError> {
        if info.kind() != self.kind {
            return Err(InventoryError::PayloadMismatch {
                kind: self.kind,
                found: info.kind(),
            });
        }
        self.fru_info = Some(info);
        Ok(())
    }

    pub fn with_fru_info(mut self, info: FruInfo) -> Result<Self, InventoryError> {
        self.set_fru_info(info)?;
        Ok(self)
    }

    /// Parses raw payload JSON according to this FRU's kind. On error the
    /// record is left as it was.
    pub fn decode_fru_info(&mut self, raw: &[u8]) -> Result<(), InventoryError> {
        let info = payload::decode::<FruInfo>(self.kind, raw)?;
        self.fru_info = Some(info);
        Ok(())
    }

    pub fn encode_fru_info(&self) -> Result<Vec<u8>, InventoryError> {
        payload::encode(self.kind, self.fru_info.as_ref())
    }
}

impl Serialize for HwInvByFru {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("FRUID", &self.fru_id)?;
        map.serialize_entry("Type", &self.kind)?;
        map.serialize_entry("Subtype", &self.subtype)?;
        map.serialize_entry("HWInventoryByFRUType", self.fru_type())?;
        if let Some(info) = &self.fru_info {
            map.serialize_entry(info.key(), info)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct HwInvByFruWire {
    #[serde(rename = "FRUID")]
    fru_id: String,
    #[serde(rename = "Type", default)]
    kind: Option<HmsKind>,
    #[serde(rename = "Subtype", default)]
    subtype: String,
    #[serde(rename = "HWInventoryByFRUType", default)]
    fru_type: String,
    #[serde(flatten)]
    tail: Tail<FruInfo>,
}

impl TryFrom<HwInvByFruWire> for HwInvByFru {
    type Error = InventoryError;

    fn try_from(wire: HwInvByFruWire) -> Result<Self, Self::Error> {
        // Without a Type the payload key names the kind.
        let kind = wire
            .kind
            .or_else(|| wire.tail.payload.as_ref().map(FruInfo::kind))
            .unwrap_or(HmsKind::Invalid);
        payload::check_consistent(kind, &wire.fru_type, wire.tail.payload.as_ref())?;
        Ok(HwInvByFru {
            fru_id: wire.fru_id,
            kind,
            subtype: wire.subtype,
            fru_info: wire.tail.payload,
        })
    }
}
