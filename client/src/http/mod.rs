//! HTTP communication with the cdng backend
//!
//! The backend manages nginx domains, listen ports and the nginx service on a
//! remote host. Every call is a single request answered by a JSON envelope.
//!
//! # Communication Pattern
//!
//! ```text
//! RemoteClient → HTTP request (Bearer token) → Backend
//!      ↑                                          ↓
//!   Envelope  ←  { "ok": bool, "message"?, ... } ←┘
//! ```
//!
//! 1. Client sends the request for one `Operation`
//! 2. Transport failures surface immediately, the body is never read
//! 3. The body must decode to a JSON object
//! 4. `ok` decides success; the whole envelope is returned on success
//!
//! # Safety Features
//!
//! - Fixed request timeout (3 seconds unless configured otherwise)
//! - TLS verification on unless explicitly disabled
//! - Path values percent-encoded into a single segment

pub mod client;
pub mod envelope;
pub mod operations;

pub use client::RemoteClient;
pub use envelope::{Envelope, NginxStatus, Stats};
pub use operations::{HttpMethod, Operation};
