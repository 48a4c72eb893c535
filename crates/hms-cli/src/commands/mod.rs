//! CLI command handlers.

pub mod compose;
pub mod decode;
pub mod eth;
pub mod xname;
