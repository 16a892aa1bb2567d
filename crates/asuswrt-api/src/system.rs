// System telemetry and service actions
//
// Each accessor batches its hooks into one telemetry round trip and
// hands the raw JSON to the decoder.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::AsusWrt;
use crate::decode;
use crate::error::Error;
use crate::hook::HookQuery;
use crate::models::{CpuMemSnapshot, SystemInfo};

impl AsusWrt {
    /// Device model and composed firmware version.
    pub async fn get_sys_info(&self) -> Result<SystemInfo, Error> {
        let query = HookQuery::new()
            .nvram_get("productid")
            .nvram_get("firmver")
            .nvram_get("buildno")
            .nvram_get("extendno");

        debug!("fetching system info");
        let raw = self.get(&query.build()).await?;
        Ok(decode::decode_sys_info(&raw))
    }

    /// CPU and memory usage.
    pub async fn get_cpu_mem_info(&self) -> Result<CpuMemSnapshot, Error> {
        let query = HookQuery::new().appobj("cpu_usage").appobj("memory_usage");

        debug!("fetching cpu/memory usage");
        let raw = self.get(&query.build()).await?;
        Ok(decode::decode_cpu_mem(&raw))
    }

    /// WAN link state.
    ///
    /// Returns loosely-typed JSON because the field set varies by
    /// firmware build.
    pub async fn get_wan_state(&self) -> Result<Value, Error> {
        let query = HookQuery::new().appobj("wanlink_state");

        debug!("fetching wan state");
        self.get(&query.build()).await
    }

    /// Restart a firmware service by name (e.g. `"httpd"`).
    ///
    /// `POST /applyapp.cgi` with
    /// `{"action_mode": "apply", "rc_service": "<name>"}`.
    pub async fn restart_service(&self, service: &str) -> Result<Value, Error> {
        debug!(service, "restarting service");
        self.apply(&json!({
            "action_mode": "apply",
            "rc_service": service,
        }))
        .await
    }
}
