//! Version registry access
//!
//! Edge descriptors, the HTTP transport seam and the client that turns one
//! edge plus its bound parameters into one resolved string.

pub mod client;
pub mod edge;
pub mod error;
pub mod transport;

pub use client::RegistryClient;
pub use edge::{Edge, ParamValue};
pub use error::RegistryLookupFailed;
pub use transport::{HttpTransport, RawResponse, ReqwestTransport};
