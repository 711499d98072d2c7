//! Transport layer: blocking HTTP client and the `generateContent` wire protocol.

pub mod http_client;
pub mod protocol;

pub use http_client::{classify_status, HttpTransport, HttpTransportConfig};
pub use protocol::{GenerateContentRequest, GenerateContentResponse};
