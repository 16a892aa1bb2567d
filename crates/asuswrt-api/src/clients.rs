// Connected-client listing
//
// One batched round trip answers the base client list, all three
// wireless station lists, and the operator's alias table; the decoder
// merges them into per-device records.

use tracing::debug;

use crate::client::AsusWrt;
use crate::decode;
use crate::error::Error;
use crate::hook::HookQuery;
use crate::models::ClientRecord;

impl AsusWrt {
    /// List the clients the router currently reports online.
    ///
    /// Wireless clients carry the band label and signal strength from
    /// their station-list entry; wired clients keep the `"wired"`
    /// default. Operator aliases are merged by MAC. Result order is
    /// unspecified -- callers must not read meaning into it.
    pub async fn get_online_clients(&self) -> Result<Vec<ClientRecord>, Error> {
        let query = HookQuery::new()
            .appobj("get_clientlist")
            .appobj("wl_sta_list_2g")
            .appobj("wl_sta_list_5g")
            .appobj("wl_sta_list_5g_2")
            .nvram_get("custom_clientlist");

        debug!("fetching online clients");
        let raw = self.get(&query.build()).await?;
        Ok(decode::decode_online_clients(&raw))
    }
}
