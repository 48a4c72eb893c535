use serde_json::{Value, json};

use super::{modeled_samples, record_with_payload};
use crate::{
    FruInfo, HmsKind, HwInvByFru, HwInvByLoc, InventoryError, LocationInfo,
    redfish::{ChassisFruInfo, ChassisLocationInfo, SystemFruInfo, SystemLocationInfo},
};

#[test]
fn location_payload_round_trips_for_every_modeled_kind() {
    let samples = modeled_samples();
    assert_eq!(samples.len(), 14);
    for (id, loc, _) in samples {
        let record = record_with_payload(id, &loc);
        let info = record.location_info().expect("payload present");
        assert_eq!(info.kind(), record.kind(), "{id}");
        assert_eq!(record.location_type(), info.type_tag());
        assert!(record.location_type().starts_with("HWInvByLoc"), "{id}");

        let bytes = record.encode_location_info().expect("encode");
        assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), loc, "{id}");

        let mut again = HwInvByLoc::new(id);
        again.decode_location_info(&bytes).expect("decode again");
        assert_eq!(again.location_info(), record.location_info(), "{id}");
        assert_eq!(again.location_type(), record.location_type());
    }
}

#[test]
fn fru_payload_round_trips_for_every_modeled_kind() {
    for (id, _, fru_json) in modeled_samples() {
        let kind = hms_xname::kind_of(id);
        let mut fru = HwInvByFru::new(format!("FRU-{id}"), kind).expect("fru");
        fru.decode_fru_info(&serde_json::to_vec(&fru_json).unwrap())
            .expect("decode fru");
        assert_eq!(fru.fru_info().map(FruInfo::kind), Some(kind));
        assert!(fru.fru_type().starts_with("HWInvByFRU"), "{id}");

        let bytes = fru.encode_fru_info().expect("encode fru");
        assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), fru_json, "{id}");
        let mut again = HwInvByFru::new(fru.fru_id.clone(), kind).unwrap();
        again.decode_fru_info(&bytes).unwrap();
        assert_eq!(again, fru);
    }
}

#[test]
fn chassis_family_shares_schema_but_keeps_its_kind() {
    let payload = json!({"Id": "Enclosure", "Name": "Enclosure"});
    let cabinet = record_with_payload("x1000", &payload);
    let board = record_with_payload("x1000c1r3e0", &payload);

    let shared = ChassisLocationInfo {
        id: Some("Enclosure".into()),
        name: Some("Enclosure".into()),
        ..Default::default()
    };
    assert_eq!(
        cabinet.location_info(),
        Some(&LocationInfo::Cabinet(shared.clone()))
    );
    assert_eq!(board.location_info(), Some(&LocationInfo::HsnBoard(shared)));
    assert_eq!(cabinet.location_type(), "HWInvByLocCabinet");
    assert_eq!(board.location_type(), "HWInvByLocHSNBoard");
}

#[test]
fn failed_decode_leaves_record_unmodified() {
    let mut record = record_with_payload("x0c0s0b0n0", &json!({"Id": "Node0"}));
    let before = record.clone();

    let bad_inputs: [&[u8]; 4] = [b"{\"Id\": 7}", b"[1, 2]", b"{\"Id\": \"n\"} trailing", b""];
    for bad in bad_inputs {
        let err = record.decode_location_info(bad).unwrap_err();
        assert!(
            matches!(err, InventoryError::Codec { kind: HmsKind::Node, .. }),
            "{err}"
        );
        assert_eq!(record, before);
    }
}

#[test]
fn decode_rejects_invalid_and_unmodeled_kinds() {
    let mut invalid = HwInvByLoc::new("not-an-xname");
    assert!(matches!(
        invalid.decode_location_info(b"{}"),
        Err(InventoryError::InvalidId(id)) if id == "not-an-xname"
    ));
    assert!(invalid.location_info().is_none());

    let mut accel = HwInvByLoc::new("x0c0s0b0n0a0");
    let err = accel.decode_location_info(b"{}").unwrap_err();
    assert!(matches!(err, InventoryError::UnsupportedKind(HmsKind::NodeAccel)));
    assert!(err.is_recoverable());
    assert!(accel.location_info().is_none());

    let mut fru = HwInvByFru::new("FRU-1", HmsKind::HsnLink).unwrap();
    assert!(matches!(
        fru.decode_fru_info(b"{}"),
        Err(InventoryError::UnsupportedKind(HmsKind::HsnLink))
    ));
}

#[test]
fn encode_requires_a_matching_payload() {
    let record = HwInvByLoc::new("x0c0s0b0n0");
    assert!(matches!(
        record.encode_location_info(),
        Err(InventoryError::MissingPayload(HmsKind::Node))
    ));

    let mut cabinet = HwInvByLoc::new("x0");
    let err = cabinet
        .set_location_info(LocationInfo::Node(SystemLocationInfo::default()))
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryError::PayloadMismatch {
            kind: HmsKind::Cabinet,
            found: HmsKind::Node
        }
    ));
    assert!(cabinet.location_info().is_none());
}

#[test]
fn builders_refuse_payloads_of_another_kind() {
    let err = HwInvByLoc::new("x0c0s0b0n0")
        .with_location_info(LocationInfo::Chassis(ChassisLocationInfo::default()))
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryError::PayloadMismatch {
            kind: HmsKind::Node,
            found: HmsKind::Chassis
        }
    ));

    let mut fru = HwInvByFru::new("FRU-1", HmsKind::Node).unwrap();
    let err = fru
        .set_fru_info(FruInfo::Cabinet(ChassisFruInfo::default()))
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryError::PayloadMismatch {
            kind: HmsKind::Node,
            found: HmsKind::Cabinet
        }
    ));
    assert!(fru.fru_info().is_none());
    assert!(matches!(
        fru.clone()
            .with_fru_info(FruInfo::Chassis(ChassisFruInfo::default())),
        Err(InventoryError::PayloadMismatch { .. })
    ));

    let fru = fru
        .with_fru_info(FruInfo::Node(SystemFruInfo::default()))
        .unwrap();
    assert_eq!(fru.fru_type(), "HWInvByFRUNode");
    let node = HwInvByLoc::new("x0c0s0b0n0")
        .with_location_info(LocationInfo::Node(SystemLocationInfo::default()))
        .unwrap()
        .with_populated_fru(fru);
    assert_eq!(node.location_type(), "HWInvByLocNode");
    assert_eq!(
        node.populated_fru.as_ref().map(HwInvByFru::kind),
        Some(HmsKind::Node)
    );
    assert!(node.validate().is_ok());
}

#[test]
fn fru_requires_an_id_and_a_valid_kind() {
    assert!(matches!(
        HwInvByFru::new("  ", HmsKind::Node),
        Err(InventoryError::InvalidFruId)
    ));
    assert!(matches!(
        HwInvByFru::new("FRU-1", HmsKind::Invalid),
        Err(InventoryError::InvalidKind)
    ));
}

#[test]
fn validate_flags_unplaceable_records() {
    assert!(HwInvByLoc::new("x0c0s0b0n0").validate().is_ok());
    assert!(matches!(
        HwInvByLoc::new("").validate(),
        Err(InventoryError::InvalidId(_))
    ));
    assert!(matches!(
        HwInvByLoc::with_kind("x0c0s0b0n0", HmsKind::Invalid).validate(),
        Err(InventoryError::InvalidId(_))
    ));
}
