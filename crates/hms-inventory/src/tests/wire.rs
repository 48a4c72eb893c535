use serde_json::{Value, json};

use super::record_with_payload;
use crate::{
    FruInfo, HmsKind, HwInvByFru, HwInvByLoc, InventoryFormat, SystemHwInventory, compose_with,
};

fn payload_keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .expect("object")
        .keys()
        .filter(|k| k.ends_with("LocationInfo") || k.ends_with("FRUInfo"))
        .map(String::as_str)
        .collect()
}

#[test]
fn record_serializes_one_payload_key_with_its_discriminator() {
    let mut record = record_with_payload("x0c0s0b0n0", &json!({"Id": "Node0"}));
    record.status = "Populated".into();
    let mut fru = HwInvByFru::new("Node.HPE.SN01", HmsKind::Node).unwrap();
    fru.decode_fru_info(br#"{"SerialNumber": "SN01"}"#).unwrap();
    record.populated_fru = Some(fru);

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["ID"], "x0c0s0b0n0");
    assert_eq!(value["Type"], "Node");
    assert_eq!(value["Ordinal"], 0);
    assert_eq!(value["Status"], "Populated");
    assert_eq!(value["HWInventoryByLocationType"], "HWInvByLocNode");
    assert_eq!(payload_keys(&value), vec!["NodeLocationInfo"]);
    assert_eq!(value["NodeLocationInfo"], json!({"Id": "Node0"}));

    let fru = &value["PopulatedFRU"];
    assert_eq!(fru["FRUID"], "Node.HPE.SN01");
    assert_eq!(fru["HWInventoryByFRUType"], "HWInvByFRUNode");
    assert_eq!(payload_keys(fru), vec!["NodeFRUInfo"]);

    let back: HwInvByLoc = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}

#[test]
fn record_without_payload_has_empty_discriminator() {
    let value = serde_json::to_value(HwInvByLoc::new("x0c0s0b0n0a0")).unwrap();
    assert_eq!(value["Type"], "NodeAccel");
    assert_eq!(value["HWInventoryByLocationType"], "");
    assert!(payload_keys(&value).is_empty());
}

#[test]
fn deserializes_nested_records_and_derives_missing_type() {
    let value = json!({
        "ID": "x0c0s0b0n0",
        "Status": "Populated",
        "HWInventoryByLocationType": "HWInvByLocNode",
        "NodeLocationInfo": {"Id": "Node0", "Hostname": "nid000001"},
        "Processors": [
            {"ID": "x0c0s0b0n0p0", "Type": "Processor", "Ordinal": 0},
            {"ID": "x0c0s0b0n0p1", "Type": "Processor", "Ordinal": 1}
        ],
        "SomethingNew": {"ignored": true}
    });
    let record: HwInvByLoc = serde_json::from_value(value).unwrap();
    assert_eq!(record.kind(), HmsKind::Node);
    assert_eq!(record.location_type(), "HWInvByLocNode");
    let processors = record.children.get(HmsKind::Processor);
    assert_eq!(processors.len(), 2);
    assert_eq!(processors[1].ordinal, 1);
    assert_eq!(record.children.total_len(), 2);
}

#[test]
fn rejects_conflicting_payloads_and_discriminators() {
    let two_payloads = json!({
        "ID": "x0c0s0b0n0",
        "Type": "Node",
        "NodeLocationInfo": {},
        "CabinetLocationInfo": {}
    });
    assert!(serde_json::from_value::<HwInvByLoc>(two_payloads).is_err());

    let wrong_kind = json!({"ID": "x0c0s0b0n0", "Type": "Node", "CabinetLocationInfo": {}});
    let err = serde_json::from_value::<HwInvByLoc>(wrong_kind).unwrap_err();
    assert!(err.to_string().contains("cannot hold"), "{err}");

    let wrong_tag = json!({
        "ID": "x0c0s0b0n0",
        "Type": "Node",
        "HWInventoryByLocationType": "HWInvByLocDrive",
        "NodeLocationInfo": {}
    });
    let err = serde_json::from_value::<HwInvByLoc>(wrong_tag).unwrap_err();
    assert!(err.to_string().contains("discriminator"), "{err}");

    let bad_payload = json!({"ID": "x0c0s0b0n0", "NodeLocationInfo": {"Id": 3}});
    assert!(serde_json::from_value::<HwInvByLoc>(bad_payload).is_err());
}

#[test]
fn accepts_legacy_power_supply_fru_discriminator() {
    let value = json!({
        "FRUID": "PSU.Delta.1",
        "Type": "NodeEnclosurePowerSupply",
        "HWInventoryByFRUType": "HWInvByFRU",
        "NodeEnclosurePowerSupplyFRUInfo": {"Manufacturer": "Delta"}
    });
    let fru: HwInvByFru = serde_json::from_value(value).unwrap();
    assert!(matches!(fru.fru_info(), Some(FruInfo::NodeEnclosurePowerSupply(_))));
    assert_eq!(fru.fru_type(), "HWInvByFRUNodeEnclosurePowerSupply");
}

#[test]
fn populated_fru_without_type_keeps_the_record() {
    let value = json!({
        "ID": "x0c0s0b0n0",
        "PopulatedFRU": {
            "FRUID": "Node.HPE.SN02",
            "NodeFRUInfo": {"SerialNumber": "SN02"}
        }
    });
    let record: HwInvByLoc = serde_json::from_value(value).unwrap();
    let fru = record.populated_fru.as_ref().expect("fru kept");
    assert_eq!(fru.kind(), HmsKind::Node);
    assert_eq!(fru.fru_type(), "HWInvByFRUNode");

    let bare: HwInvByFru = serde_json::from_value(json!({"FRUID": "FRU-9"})).unwrap();
    assert_eq!(bare.kind(), HmsKind::Invalid);
    assert!(bare.fru_info().is_none());
}

#[test]
fn inventory_serializes_xname_format_and_arrays() {
    let records = vec![
        HwInvByLoc::new("x0c0s0b0n0"),
        HwInvByLoc::new("x0c0s0b0n0p0"),
        HwInvByLoc::new("x0m0p0"),
    ];
    let composed = compose_with(records, "s0", InventoryFormat::NestNodesOnly);
    let value = serde_json::to_value(&composed.inventory).unwrap();

    assert_eq!(value["XName"], "s0");
    assert_eq!(value["Format"], "NestNodesOnly");
    assert_eq!(value["Nodes"][0]["Processors"][0]["ID"], "x0c0s0b0n0p0");
    assert_eq!(value["CabinetPDUs"][0]["ID"], "x0m0p0");
    assert!(value.get("Processors").is_none());
    assert!(value.get("Drives").is_none());

    let back: SystemHwInventory = serde_json::from_value(value).unwrap();
    assert_eq!(back, composed.inventory);
}
