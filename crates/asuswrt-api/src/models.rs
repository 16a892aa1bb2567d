// Structured result types
//
// Models for the firmware's flat JSON responses. Fields use
// `#[serde(default)]` liberally because the response schema is
// informally typed and field presence varies across firmware builds.
// Every record is an immutable snapshot of one poll; nothing persists
// across calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_interface() -> String {
    "wired".to_owned()
}

/// One device known to the router, merged from the base client list,
/// the wireless station lists, and the operator's alias table.
/// Identity key: MAC address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub ip: Option<String>,
    /// `"wired"` unless the MAC appears in a wireless station list, in
    /// which case this is the band label: `"2GHz"`, `"5GHz"`, `"5GHz-2"`.
    #[serde(default = "default_interface")]
    pub interface: String,
    /// Signal strength in dBm; wireless clients only.
    #[serde(default)]
    pub rssi: Option<i64>,
    /// Router-reported device name.
    #[serde(default)]
    pub name: Option<String>,
    /// Operator-assigned alias from the custom client list.
    #[serde(default)]
    pub alias: Option<String>,
}

/// Device model and composed firmware version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub model: Option<String>,
    /// `"{firmver}_{buildno}_{extendno}"`; missing components compose
    /// as empty strings.
    pub firmware: String,
}

/// One CPU/memory poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuMemSnapshot {
    /// Per-core usage figures, passed through unmodified -- the
    /// encoding is vendor-specific and differs between builds.
    pub cpu: Value,
    pub memory: MemoryUsage,
}

/// Memory figures as the firmware reports them (strings on some
/// builds, numbers on others -- kept raw).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total: Option<Value>,
    pub used: Option<Value>,
    pub free: Option<Value>,
}

/// Operator-assigned metadata for one client, parsed out of the
/// `custom_clientlist` NVRAM variable and keyed by MAC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomClient {
    pub alias: String,
    pub group: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub callback: String,
}
