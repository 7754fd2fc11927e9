//! Image encoding for Retouch downloads.
//!
//! Only PNG is produced. Encoding is synchronous and runs wherever the
//! caller runs it: a blocking task on the server, the main thread in WASM.

mod png;

pub use png::{encode_png, EncodeError};
