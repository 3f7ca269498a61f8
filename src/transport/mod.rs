//! HTTP transport to the model endpoint.

mod http;

pub use http::{resolve_api_key, HttpTransport, TransportError};
