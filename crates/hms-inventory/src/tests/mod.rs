use serde_json::{Value, json};

use crate::HwInvByLoc;

mod codec;
mod wire;

/// One sample id per modeled kind, with a location and a FRU payload.
pub(crate) fn modeled_samples() -> Vec<(&'static str, Value, Value)> {
    let chassis_loc = |id: &str| json!({"Id": id, "Name": id, "Description": "enclosure"});
    let chassis_fru = json!({
        "Manufacturer": "HPE",
        "ChassisType": "Enclosure",
        "SerialNumber": "SN-0001",
        "SKU": "sku-7"
    });
    vec![
        ("x3000", chassis_loc("Cabinet"), chassis_fru.clone()),
        ("x3000c0", chassis_loc("Enclosure"), chassis_fru.clone()),
        ("x3000c0s7", chassis_loc("Blade7"), chassis_fru.clone()),
        ("x3000c0r15", chassis_loc("Perif15"), chassis_fru.clone()),
        ("x3000c0s7e0", chassis_loc("Enclosure0"), chassis_fru.clone()),
        ("x3000c0r15e0", chassis_loc("Enclosure"), chassis_fru),
        (
            "x3000c0s7b0n0",
            json!({
                "Id": "Node0",
                "Hostname": "nid000001",
                "ProcessorSummary": {"Count": 2, "Model": "AMD EPYC 7742"},
                "MemorySummary": {"TotalSystemMemoryGiB": 512.0}
            }),
            json!({
                "Manufacturer": "HPE",
                "BiosVersion": "1.4.2",
                "SystemType": "Physical",
                "UUID": "7f2b1c7a-0000-4000-8000-000000000001"
            }),
        ),
        (
            "x3000c0s7b0n0p0",
            json!({"Id": "CPU0", "Socket": "P0"}),
            json!({
                "InstructionSet": "x86-64",
                "MaxSpeedMHz": 3400,
                "TotalCores": 64,
                "ProcessorId": {"VendorID": "AuthenticAMD", "Step": "0"}
            }),
        ),
        (
            "x3000c0s7b0n0d3",
            json!({
                "Id": "DIMM3",
                "MemoryLocation": {"Socket": 0, "MemoryController": 1, "Channel": 3, "Slot": 0}
            }),
            json!({"CapacityMiB": 32768, "MemoryDeviceType": "DDR4", "RankCount": 2}),
        ),
        (
            "x3000c0s7b0n0g0k1",
            json!({"Id": "Disk1", "Name": "SSD"}),
            json!({
                "CapacityBytes": 960197124096u64,
                "MediaType": "SSD",
                "FailurePredicted": false,
                "RotationSpeedRPM": 0.0
            }),
        ),
        (
            "x3000m0p0",
            json!({"Id": "1", "UUID": "e3b0c442-98fc-1c14-9afb-f4c8996fb924"}),
            json!({"EquipmentType": "RackPDU", "FirmwareVersion": "2.1.0"}),
        ),
        (
            "x3000m0p0j12",
            json!({"Id": "A12", "Name": "Outlet A12"}),
            json!({"PowerEnabled": true, "NominalVoltage": "AC200To240V", "RatedCurrentAmps": 16.0}),
        ),
        (
            "x3000c0t2",
            json!({"Name": "Rectifier 2", "FirmwareVersion": "1.0.3"}),
            json!({"PowerCapacityWatts": 3000.0, "PowerSupplyType": "AC"}),
        ),
        (
            "x3000c0s7e0t1",
            json!({"Name": "PSU1"}),
            json!({"PowerOutputWatts": 1200.0, "Manufacturer": "Delta"}),
        ),
    ]
}

pub(crate) fn record_with_payload(id: &str, payload: &Value) -> HwInvByLoc {
    let mut record = HwInvByLoc::new(id);
    record
        .decode_location_info(&serde_json::to_vec(payload).expect("payload bytes"))
        .expect("sample payload decodes");
    record
}

pub(crate) fn ids(records: &[HwInvByLoc]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}
