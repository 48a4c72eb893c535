use hms_xname::{HmsKind, kind_of};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::Error as _,
    ser::SerializeMap,
};

use crate::{
    ChildArrays, HwInvByFru, InventoryError,
    payload::{self, KindPayload, PayloadSlot, Tail},
    redfish::{
        ChassisLocationInfo, DriveLocationInfo, MemoryLocationInfo, OutletLocationInfo,
        PowerDistributionLocationInfo, PowerSupplyLocationInfo, ProcessorLocationInfo,
        SystemLocationInfo,
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

const LOCATION_SLOTS: [PayloadSlot; 14] = [
    slot(HmsKind::Cabinet, "CabinetLocationInfo", "HWInvByLocCabinet"),
    slot(HmsKind::Chassis, "ChassisLocationInfo", "HWInvByLocChassis"),
    slot(HmsKind::ComputeModule, "ComputeModuleLocationInfo", "HWInvByLocComputeModule"),
    slot(HmsKind::RouterModule, "RouterModuleLocationInfo", "HWInvByLocRouterModule"),
    slot(HmsKind::NodeEnclosure, "NodeEnclosureLocationInfo", "HWInvByLocNodeEnclosure"),
    slot(HmsKind::HsnBoard, "HSNBoardLocationInfo", "HWInvByLocHSNBoard"),
    slot(HmsKind::Node, "NodeLocationInfo", "HWInvByLocNode"),
    slot(HmsKind::Processor, "ProcessorLocationInfo", "HWInvByLocProcessor"),
    slot(HmsKind::Memory, "MemoryLocationInfo", "HWInvByLocMemory"),
    slot(HmsKind::Drive, "DriveLocationInfo", "HWInvByLocDrive"),
    slot(HmsKind::CabinetPdu, "PDULocationInfo", "HWInvByLocPDU"),
    slot(HmsKind::CabinetPduOutlet, "OutletLocationInfo", "HWInvByLocOutlet"),
    slot(HmsKind::CmmRectifier, "CMMRectifierLocationInfo", "HWInvByLocCMMRectifier"),
    slot(
        HmsKind::NodeEnclosurePowerSupply,
        "NodeEnclosurePowerSupplyLocationInfo",
        "HWInvByLocNodeEnclosurePowerSupply",
    ),
];

/// Location-specific details of a component, one variant per modeled kind.
/// The chassis family shares a single schema.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInfo {
    Cabinet(ChassisLocationInfo),
    Chassis(ChassisLocationInfo),
    ComputeModule(ChassisLocationInfo),
    RouterModule(ChassisLocationInfo),
    NodeEnclosure(ChassisLocationInfo),
    HsnBoard(ChassisLocationInfo),
    Node(SystemLocationInfo),
    Processor(ProcessorLocationInfo),
    Memory(MemoryLocationInfo),
    Drive(DriveLocationInfo),
    CabinetPdu(PowerDistributionLocationInfo),
    CabinetPduOutlet(OutletLocationInfo),
    CmmRectifier(PowerSupplyLocationInfo),
    NodeEnclosurePowerSupply(PowerSupplyLocationInfo),
}

/// Variant constructor for the kinds that share the chassis schema.
fn chassis_slot(kind: HmsKind) -> Option<fn(ChassisLocationInfo) -> LocationInfo> {
    match kind {
        HmsKind::Cabinet => Some(LocationInfo::Cabinet),
        HmsKind::Chassis => Some(LocationInfo::Chassis),
        HmsKind::ComputeModule => Some(LocationInfo::ComputeModule),
        HmsKind::RouterModule => Some(LocationInfo::RouterModule),
        HmsKind::NodeEnclosure => Some(LocationInfo::NodeEnclosure),
        HmsKind::HsnBoard => Some(LocationInfo::HsnBoard),
        _ => None,
    }
}

impl LocationInfo {
    pub fn kind(&self) -> HmsKind {
        self.slot().kind
    }

    /// Wire key the payload is embedded under, e.g. `NodeLocationInfo`.
    pub fn key(&self) -> &'static str {
        self.slot().key
    }

    /// Discriminator string, e.g. `HWInvByLocNode`.
    pub fn type_tag(&self) -> &'static str {
        self.slot().tag
    }
}

impl KindPayload for LocationInfo {
    const SLOTS: &'static [PayloadSlot] = &LOCATION_SLOTS;

    fn slot(&self) -> &'static PayloadSlot {
        let index = match self {
            LocationInfo::Cabinet(_) => 0,
            LocationInfo::Chassis(_) => 1,
            LocationInfo::ComputeModule(_) => 2,
            LocationInfo::RouterModule(_) => 3,
            LocationInfo::NodeEnclosure(_) => 4,
            LocationInfo::HsnBoard(_) => 5,
            LocationInfo::Node(_) => 6,
            LocationInfo::Processor(_) => 7,
            LocationInfo::Memory(_) => 8,
            LocationInfo::Drive(_) => 9,
            LocationInfo::CabinetPdu(_) => 10,
            LocationInfo::CabinetPduOutlet(_) => 11,
            LocationInfo::CmmRectifier(_) => 12,
            LocationInfo::NodeEnclosurePowerSupply(_) => 13,
        };
        &Self::SLOTS[index]
    }

    fn deserialize_payload<'de, D>(kind: HmsKind, deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if let Some(wrap) = chassis_slot(kind) {
            return ChassisLocationInfo::deserialize(deserializer).map(wrap);
        }
        match kind {
            HmsKind::Node => SystemLocationInfo::deserialize(deserializer).map(LocationInfo::Node),
            HmsKind::Processor => {
                ProcessorLocationInfo::deserialize(deserializer).map(LocationInfo::Processor)
            }
            HmsKind::Memory => {
                MemoryLocationInfo::deserialize(deserializer).map(LocationInfo::Memory)
            }
            HmsKind::Drive => DriveLocationInfo::deserialize(deserializer).map(LocationInfo::Drive),
            HmsKind::CabinetPdu => PowerDistributionLocationInfo::deserialize(deserializer)
                .map(LocationInfo::CabinetPdu),
            HmsKind::CabinetPduOutlet => {
                OutletLocationInfo::deserialize(deserializer).map(LocationInfo::CabinetPduOutlet)
            }
            HmsKind::CmmRectifier => {
                PowerSupplyLocationInfo::deserialize(deserializer).map(LocationInfo::CmmRectifier)
            }
            HmsKind::NodeEnclosurePowerSupply => PowerSupplyLocationInfo::deserialize(deserializer)
                .map(LocationInfo::NodeEnclosurePowerSupply),
            other => Err(D::Error::custom(format!(
                "no location schema for component type {other}"
            ))),
        }
    }
}

impl Serialize for LocationInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LocationInfo::Cabinet(info)
            | LocationInfo::Chassis(info)
            | LocationInfo::ComputeModule(info)
            | LocationInfo::RouterModule(info)
            | LocationInfo::NodeEnclosure(info)
            | LocationInfo::HsnBoard(info) => info.serialize(serializer),
            LocationInfo::Node(info) => info.serialize(serializer),
            LocationInfo::Processor(info) => info.serialize(serializer),
            LocationInfo::Memory(info) => info.serialize(serializer),
            LocationInfo::Drive(info) => info.serialize(serializer),
            LocationInfo::CabinetPdu(info) => info.serialize(serializer),
            LocationInfo::CabinetPduOutlet(info) => info.serialize(serializer),
            LocationInfo::CmmRectifier(info) | LocationInfo::NodeEnclosurePowerSupply(info) => {
                info.serialize(serializer)
            }
        }
    }
}

/// Hardware inventory entry for a physical location (xname), optionally
/// holding the FRU installed there and the location records nested under it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "HwInvByLocWire")]
pub struct HwInvByLoc {
    pub id: String,
    kind: HmsKind,
    pub ordinal: i32,
    pub status: String,
    location_info: Option<LocationInfo>,
    pub populated_fru: Option<HwInvByFru>,
    pub children: ChildArrays,
}

impl HwInvByLoc {
    /// Record for `id` with its kind derived from the xname.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let kind = kind_of(&id);
        HwInvByLoc::with_kind(id, kind)
    }

    pub fn with_kind(id: impl Into<String>, kind: HmsKind) -> Self {
        HwInvByLoc {
            id: id.into(),
            kind,
            ordinal: 0,
            status: String::new(),
            location_info: None,
            populated_fru: None,
            children: ChildArrays::default(),
        }
    }

    pub fn kind(&self) -> HmsKind {
        self.kind
    }

    pub fn location_info(&self) -> Option<&LocationInfo> {
        self.location_info.as_ref()
    }

    /// Discriminator for the current payload; empty when there is none.
    pub fn location_type(&self) -> &'static str {
        self.location_info.as_ref().map_or("", LocationInfo::type_tag)
    }

    pub fn set_location_info(&mut self, info: LocationInfo) -> Result<(), InventoryError> {
        if info.kind() != self.kind {
            return Err(InventoryError::PayloadMismatch {
                kind: self.kind,
                found: info.kind(),
            });
        }
        self.location_info = Some(info);
        Ok(())
    }

    pub fn with_location_info(mut self, info: LocationInfo) -> Result<Self, InventoryError> {
        self.set_location_info(info)?;
        Ok(self)
    }

    pub fn with_populated_fru(mut self, fru: HwInvByFru) -> Self {
        self.populated_fru = Some(fru);
        self
    }

    /// Parses raw payload JSON according to this record's kind. On error the
    /// record is left as it was.
    pub fn decode_location_info(&mut self, raw: &[u8]) -> Result<(), InventoryError> {
        if !self.kind.is_valid() {
            return Err(InventoryError::InvalidId(self.id.clone()));
        }
        let info = payload::decode::<LocationInfo>(self.kind, raw)?;
        self.location_info = Some(info);
        Ok(())
    }

    /// The payload body as JSON, without its wire key.
    pub fn encode_location_info(&self) -> Result<Vec<u8>, InventoryError> {
        payload::encode(self.kind, self.location_info.as_ref())
    }

    /// Rejects records that could never be placed in an inventory.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.id.is_empty() || !self.kind.is_valid() {
            return Err(InventoryError::InvalidId(self.id.clone()));
        }
        if let Some(info) = &self.location_info {
            if info.kind() != self.kind {
                return Err(InventoryError::PayloadMismatch {
                    kind: self.kind,
                    found: info.kind(),
                });
            }
        }
        Ok(())
    }
}

impl Serialize for HwInvByLoc {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("ID", &self.id)?;
        map.serialize_entry("Type", &self.kind)?;
        map.serialize_entry("Ordinal", &self.ordinal)?;
        map.serialize_entry("Status", &self.status)?;
        map.serialize_entry("HWInventoryByLocationType", self.location_type())?;
        if let Some(info) = &self.location_info {
            map.serialize_entry(info.key(), info)?;
        }
        if let Some(fru) = &self.populated_fru {
            map.serialize_entry("PopulatedFRU", fru)?;
        }
        self.children.serialize_entries(&mut map)?;
        map.end()
    }
}

#[derive(Deserialize)]
struct HwInvByLocWire {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Type", default)]
    kind: Option<HmsKind>,
    #[serde(rename = "Ordinal", default)]
    ordinal: i32,
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "HWInventoryByLocationType", default)]
    location_type: String,
    #[serde(rename = "PopulatedFRU", default)]
    populated_fru: Option<HwInvByFru>,
    #[serde(flatten)]
    tail: Tail<LocationInfo>,
}

impl TryFrom<HwInvByLocWire> for HwInvByLoc {
    type Error = InventoryError;

    fn try_from(wire: HwInvByLocWire) -> Result<Self, Self::Error> {
        let kind = wire.kind.unwrap_or_else(|| kind_of(&wire.id));
        payload::check_consistent(kind, &wire.location_type, wire.tail.payload.as_ref())?;
        Ok(HwInvByLoc {
            id: wire.id,
            kind,
            ordinal: wire.ordinal,
            status: wire.status,
            location_info: wire.tail.payload,
            populated_fru: wire.populated_fru,
            children: wire.tail.children,
        })
    }
}
