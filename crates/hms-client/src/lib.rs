//! HTTP plumbing for talking to the hardware state manager: transport
//! construction and the ethernet-interface inventory endpoints.

pub mod error;
pub mod eth;
pub mod transport;

pub use error::ClientError;
pub use eth::{CompEthInterface, EthInterfaceClient};
pub use transport::{TransportConfig, build_http_client};
