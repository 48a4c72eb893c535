//! Hardware component taxonomy: the canonical kind enumeration and the xname
//! parser that maps a hierarchical location id to its kind and parent.

mod kind;
mod xname;

pub use kind::HmsKind;
pub use xname::{Xname, XnameError, is_valid, kind_of, normalize, parent_of};
