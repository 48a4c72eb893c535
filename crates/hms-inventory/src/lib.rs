//! HMS hardware inventory records, their kind-discriminated payload codec, and
//! composition of flat record lists into system inventories.

mod arrays;
pub mod complock;
mod error;
mod fru;
mod inventory;
mod location;
mod payload;
pub mod redfish;

pub use arrays::{ChildArrays, array_key};
pub use error::InventoryError;
pub use fru::{FruInfo, HwInvByFru};
pub use inventory::{Composed, InventoryFormat, SystemHwInventory, compose, compose_with};
pub use location::{HwInvByLoc, LocationInfo};
pub use payload::{KindPayload, PayloadSlot};

pub use hms_xname::HmsKind;

#[cfg(test)]
mod tests;
