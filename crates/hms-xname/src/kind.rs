use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Hardware component category as tracked by the state manager.
///
/// Parsing is case-insensitive and lossy: any unrecognized name becomes
/// [`HmsKind::Invalid`], which callers treat as a hard validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HmsKind {
    System,
    Cdu,
    CduMgmtSwitch,
    Cabinet,
    Cec,
    CabinetCdu,
    CabinetBmc,
    CabinetPduController,
    CabinetPdu,
    CabinetPduNic,
    CabinetPduOutlet,
    CabinetPduPowerConnector,
    Chassis,
    ChassisBmc,
    CmmRectifier,
    CmmFpga,
    ComputeModule,
    NodeBmc,
    NodeBmcNic,
    NodeEnclosure,
    NodeEnclosurePowerSupply,
    NodePowerConnector,
    NodeFpga,
    Node,
    Processor,
    NodeAccel,
    NodeNic,
    NodeHsnNic,
    Memory,
    StorageGroup,
    Drive,
    RouterModule,
    RouterFpga,
    RouterTorFpga,
    RouterBmc,
    RouterBmcNic,
    HsnBoard,
    HsnAsic,
    HsnLink,
    HsnConnector,
    HsnConnectorPort,
    MgmtSwitch,
    MgmtSwitchConnector,
    Invalid,
}

impl HmsKind {
    /// Every valid kind, in containment order. `Invalid` is not listed.
    pub const ALL: [HmsKind; 43] = [
        HmsKind::System,
        HmsKind::Cdu,
        HmsKind::CduMgmtSwitch,
        HmsKind::Cabinet,
        HmsKind::Cec,
        HmsKind::CabinetCdu,
        HmsKind::CabinetBmc,
        HmsKind::CabinetPduController,
        HmsKind::CabinetPdu,
        HmsKind::CabinetPduNic,
        HmsKind::CabinetPduOutlet,
        HmsKind::CabinetPduPowerConnector,
        HmsKind::Chassis,
        HmsKind::ChassisBmc,
        HmsKind::CmmRectifier,
        HmsKind::CmmFpga,
        HmsKind::ComputeModule,
        HmsKind::NodeBmc,
        HmsKind::NodeBmcNic,
        HmsKind::NodeEnclosure,
        HmsKind::NodeEnclosurePowerSupply,
        HmsKind::NodePowerConnector,
        HmsKind::NodeFpga,
        HmsKind::Node,
        HmsKind::Processor,
        HmsKind::NodeAccel,
        HmsKind::NodeNic,
        HmsKind::NodeHsnNic,
        HmsKind::Memory,
        HmsKind::StorageGroup,
        HmsKind::Drive,
        HmsKind::RouterModule,
        HmsKind::RouterFpga,
        HmsKind::RouterTorFpga,
        HmsKind::RouterBmc,
        HmsKind::RouterBmcNic,
        HmsKind::HsnBoard,
        HmsKind::HsnAsic,
        HmsKind::HsnLink,
        HmsKind::HsnConnector,
        HmsKind::HsnConnectorPort,
        HmsKind::MgmtSwitch,
        HmsKind::MgmtSwitchConnector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HmsKind::System => "System",
            HmsKind::Cdu => "CDU",
            HmsKind::CduMgmtSwitch => "CDUMgmtSwitch",
            HmsKind::Cabinet => "Cabinet",
            HmsKind::Cec => "CEC",
            HmsKind::CabinetCdu => "CabinetCDU",
            HmsKind::CabinetBmc => "CabinetBMC",
            HmsKind::CabinetPduController => "CabinetPDUController",
            HmsKind::CabinetPdu => "CabinetPDU",
            HmsKind::CabinetPduNic => "CabinetPDUNic",
            HmsKind::CabinetPduOutlet => "CabinetPDUOutlet",
            HmsKind::CabinetPduPowerConnector => "CabinetPDUPowerConnector",
            HmsKind::Chassis => "Chassis",
            HmsKind::ChassisBmc => "ChassisBMC",
            HmsKind::CmmRectifier => "CMMRectifier",
            HmsKind::CmmFpga => "CMMFpga",
            HmsKind::ComputeModule => "ComputeModule",
            HmsKind::NodeBmc => "NodeBMC",
            HmsKind::NodeBmcNic => "NodeBMCNic",
            HmsKind::NodeEnclosure => "NodeEnclosure",
            HmsKind::NodeEnclosurePowerSupply => "NodeEnclosurePowerSupply",
            HmsKind::NodePowerConnector => "NodePowerConnector",
            HmsKind::NodeFpga => "NodeFpga",
            HmsKind::Node => "Node",
            HmsKind::Processor => "Processor",
            HmsKind::NodeAccel => "NodeAccel",
            HmsKind::NodeNic => "NodeNic",
            HmsKind::NodeHsnNic => "NodeHsnNic",
            HmsKind::Memory => "Memory",
            HmsKind::StorageGroup => "StorageGroup",
            HmsKind::Drive => "Drive",
            HmsKind::RouterModule => "RouterModule",
            HmsKind::RouterFpga => "RouterFpga",
            HmsKind::RouterTorFpga => "RouterTORFpga",
            HmsKind::RouterBmc => "RouterBMC",
            HmsKind::RouterBmcNic => "RouterBMCNic",
            HmsKind::HsnBoard => "HSNBoard",
            HmsKind::HsnAsic => "HSNAsic",
            HmsKind::HsnLink => "HSNLink",
            HmsKind::HsnConnector => "HSNConnector",
            HmsKind::HsnConnectorPort => "HSNConnectorPort",
            HmsKind::MgmtSwitch => "MgmtSwitch",
            HmsKind::MgmtSwitchConnector => "MgmtSwitchConnector",
            HmsKind::Invalid => "INVALID",
        }
    }

    /// Lossy, case-insensitive lookup by canonical name.
    pub fn from_name(name: &str) -> HmsKind {
        HmsKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(HmsKind::Invalid)
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, HmsKind::Invalid)
    }

    /// True for kinds that carry location and FRU inventory schemas.
    pub fn is_modeled(&self) -> bool {
        matches!(
            self,
            HmsKind::Cabinet
                | HmsKind::Chassis
                | HmsKind::ComputeModule
                | HmsKind::RouterModule
                | HmsKind::NodeEnclosure
                | HmsKind::HsnBoard
                | HmsKind::Node
                | HmsKind::Processor
                | HmsKind::Memory
                | HmsKind::Drive
                | HmsKind::CabinetPdu
                | HmsKind::CabinetPduOutlet
                | HmsKind::CmmRectifier
                | HmsKind::NodeEnclosurePowerSupply
        )
    }
}

impl fmt::Display for HmsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HmsKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(HmsKind::from_name(s))
    }
}

impl Serialize for HmsKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HmsKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(HmsKind::from_name(&s))
    }
}
