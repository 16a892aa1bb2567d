// asuswrt-api: Async Rust client for the AsusWRT HTTP management API
//
// The firmware exposes a small, undocumented REST-ish surface: a cookie
// login at /login.cgi, a batched telemetry endpoint at /appGet.cgi that
// accepts a semicolon-joined string of "hook" calls, and an action
// endpoint at /applyapp.cgi. This crate wraps that surface behind
// structured result types.

pub mod auth;
pub mod client;
pub mod clients;
pub mod decode;
pub mod error;
pub mod hook;
pub mod models;
pub mod session;
pub mod system;
pub mod transport;

pub use client::AsusWrt;
pub use error::Error;
pub use hook::HookQuery;
pub use models::{ClientRecord, CpuMemSnapshot, CustomClient, MemoryUsage, SystemInfo};
pub use transport::{TlsMode, TransportConfig};
