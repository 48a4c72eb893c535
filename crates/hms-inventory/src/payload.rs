//! Shared machinery for the kind-discriminated payloads carried by location
//! and FRU records.
//!
//! A payload is stored schema-free as raw JSON and only becomes typed once the
//! record's kind is known. On the record wire form it appears under exactly
//! one kind-specific key (`NodeLocationInfo`, `CabinetFRUInfo`, ...).

use std::{fmt, marker::PhantomData};

use hms_xname::HmsKind;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, DeserializeSeed, IgnoredAny, MapAccess, Visitor},
};

use crate::{ChildArrays, HwInvByLoc, InventoryError, arrays};

/// Wire metadata for one payload variant.
#[derive(Debug, Clone, Copy)]
pub struct PayloadSlot {
    pub kind: HmsKind,
    /// Key the payload is embedded under in the record object.
    pub key: &'static str,
    /// Discriminator string stored alongside the payload.
    pub tag: &'static str,
    /// Other discriminators accepted on input.
    pub aliases: &'static [&'static str],
}

impl PayloadSlot {
    fn accepts(&self, tag: &str) -> bool {
        tag == self.tag || self.aliases.contains(&tag)
    }
}

/// A tagged sum over the per-kind payload schemas.
pub trait KindPayload: Serialize + Sized {
    const SLOTS: &'static [PayloadSlot];

    fn slot(&self) -> &'static PayloadSlot;

    fn kind(&self) -> HmsKind {
        self.slot().kind
    }

    /// Parse the schema belonging to `kind` and wrap it in that kind's variant.
    fn deserialize_payload<'de, D>(kind: HmsKind, deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>;

    fn slot_for_kind(kind: HmsKind) -> Option<&'static PayloadSlot> {
        Self::SLOTS.iter().find(|slot| slot.kind == kind)
    }

    fn slot_for_key(key: &str) -> Option<&'static PayloadSlot> {
        Self::SLOTS.iter().find(|slot| slot.key == key)
    }
}

/// Raw JSON bytes into the payload variant for `kind`. Invalid and unmodeled
/// kinds are rejected before any parsing happens.
pub(crate) fn decode<P: KindPayload>(kind: HmsKind, raw: &[u8]) -> Result<P, InventoryError> {
    if !kind.is_valid() {
        return Err(InventoryError::InvalidKind);
    }
    if P::slot_for_kind(kind).is_none() {
        return Err(InventoryError::UnsupportedKind(kind));
    }
    let mut de = serde_json::Deserializer::from_slice(raw);
    P::deserialize_payload(kind, &mut de)
        .and_then(|payload| de.end().map(|()| payload))
        .map_err(|source| InventoryError::Codec { kind, source })
}

/// Serialize the payload body alone, without its wire key.
pub(crate) fn encode<P: KindPayload>(
    record_kind: HmsKind,
    payload: Option<&P>,
) -> Result<Vec<u8>, InventoryError> {
    if !record_kind.is_valid() {
        return Err(InventoryError::InvalidKind);
    }
    if P::slot_for_kind(record_kind).is_none() {
        return Err(InventoryError::UnsupportedKind(record_kind));
    }
    let payload = payload.ok_or(InventoryError::MissingPayload(record_kind))?;
    if payload.kind() != record_kind {
        return Err(InventoryError::PayloadMismatch {
            kind: record_kind,
            found: payload.kind(),
        });
    }
    serde_json::to_vec(payload).map_err(|source| InventoryError::Codec {
        kind: record_kind,
        source,
    })
}

/// Checks a deserialized payload against the record's kind and discriminator.
pub(crate) fn check_consistent<P: KindPayload>(
    kind: HmsKind,
    tag: &str,
    payload: Option<&P>,
) -> Result<(), InventoryError> {
    let Some(payload) = payload else {
        return Ok(());
    };
    if payload.kind() != kind {
        return Err(InventoryError::PayloadMismatch {
            kind,
            found: payload.kind(),
        });
    }
    let slot = payload.slot();
    if !tag.is_empty() && !slot.accepts(tag) {
        return Err(InventoryError::DiscriminatorMismatch {
            expected: slot.tag,
            found: tag.to_string(),
        });
    }
    Ok(())
}

struct PayloadSeed<P> {
    kind: HmsKind,
    _payload: PhantomData<P>,
}

impl<'de, P: KindPayload> DeserializeSeed<'de> for PayloadSeed<P> {
    type Value = P;

    fn deserialize<D>(self, deserializer: D) -> Result<P, D::Error>
    where
        D: Deserializer<'de>,
    {
        P::deserialize_payload(self.kind, deserializer)
    }
}

/// The record fields that are not fixed: at most one payload key plus any
/// child arrays. Used flattened inside the record wire structs.
pub(crate) struct Tail<P> {
    pub payload: Option<P>,
    pub children: ChildArrays,
}

impl<'de, P: KindPayload> Deserialize<'de> for Tail<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TailVisitor<P>(PhantomData<P>);

        impl<'de, P: KindPayload> Visitor<'de> for TailVisitor<P> {
            type Value = Tail<P>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an inventory payload and child component arrays")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut payload: Option<P> = None;
                let mut children = ChildArrays::default();
                while let Some(key) = map.next_key::<String>()? {
                    if let Some(slot) = P::slot_for_key(&key) {
                        if let Some(existing) = &payload {
                            return Err(de::Error::custom(format!(
                                "payload key {key} conflicts with {}",
                                existing.slot().key
                            )));
                        }
                        payload = Some(map.next_value_seed(PayloadSeed {
                            kind: slot.kind,
                            _payload: PhantomData,
                        })?);
                    } else if let Some(kind) = arrays::kind_for_key(&key) {
                        let list: Vec<HwInvByLoc> = map.next_value()?;
                        children.extend(kind, list);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(Tail { payload, children })
            }
        }

        deserializer.deserialize_map(TailVisitor(PhantomData))
    }
}
