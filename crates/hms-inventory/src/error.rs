use hms_xname::HmsKind;
use thiserror::Error;

use crate::InventoryFormat;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("ID '{0}' is empty or does not name a valid component type")]
    InvalidId(String),
    #[error("FRUID is empty or invalid")]
    InvalidFruId,
    #[error("component type is not a valid HMS type")]
    InvalidKind,
    #[error("component type {0} is not supported for HW inventory")]
    UnsupportedKind(HmsKind),
    #[error("invalid HW inventory format '{0}'")]
    InvalidFormat(String),
    #[error("HW inventory format {0} is not yet implemented")]
    FormatNotImplemented(InventoryFormat),
    #[error("failed to decode {kind} payload: {source}")]
    Codec {
        kind: HmsKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} record has no payload to encode")]
    MissingPayload(HmsKind),
    #[error("{kind} record cannot hold a {found} payload")]
    PayloadMismatch { kind: HmsKind, found: HmsKind },
    #[error("discriminator '{found}' does not match payload type {expected}")]
    DiscriminatorMismatch {
        expected: &'static str,
        found: String,
    },
}

impl InventoryError {
    /// Record-level errors that leave the rest of a batch usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            InventoryError::UnsupportedKind(_) | InventoryError::FormatNotImplemented(_)
        )
    }
}
