// Raw-response decoding
//
// Pure translation from the firmware's flat JSON and NVRAM string
// encodings into the records in `models`. Lenient on missing keys --
// absent fields become defaults, never errors -- because the response
// schema is not strongly typed. Structural JSON validity is enforced
// upstream in `AsusWrt::get`; everything here is total over any
// `Value`.

use std::collections::HashMap;

use serde_json::Value;

use crate::models::{ClientRecord, CpuMemSnapshot, CustomClient, MemoryUsage, SystemInfo};

/// Station-list response keys and the interface label each maps to.
const STATION_BANDS: [(&str, &str); 3] = [
    ("wl_sta_list_2g", "2GHz"),
    ("wl_sta_list_5g", "5GHz"),
    ("wl_sta_list_5g_2", "5GHz-2"),
];

fn str_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Decode the four flat sysinfo NVRAM keys into model + composed
/// firmware string.
pub fn decode_sys_info(raw: &Value) -> SystemInfo {
    let part = |key| str_field(raw, key).unwrap_or_default();

    SystemInfo {
        model: str_field(raw, "productid"),
        firmware: format!("{}_{}_{}", part("firmver"), part("buildno"), part("extendno")),
    }
}

/// Decode the nested `cpu_usage` / `memory_usage` structures. CPU
/// figures pass through unmodified; memory is reshaped into
/// total/used/free.
pub fn decode_cpu_mem(raw: &Value) -> CpuMemSnapshot {
    let memory = raw.get("memory_usage");
    let mem = |key: &str| memory.and_then(|m| m.get(key)).cloned();

    CpuMemSnapshot {
        cpu: raw.get("cpu_usage").cloned().unwrap_or(Value::Null),
        memory: MemoryUsage {
            total: mem("mem_total"),
            used: mem("mem_used"),
            free: mem("mem_free"),
        },
    }
}

/// Merge the base client list, the three wireless station lists, and
/// the operator alias table into one record per online client.
///
/// The base list is authoritative for record existence: a MAC present
/// in a station list or the alias table but absent from the base list
/// never creates a record (the firmware lists "known" stations that
/// are not currently online). Result order is unspecified.
pub fn decode_online_clients(raw: &Value) -> Vec<ClientRecord> {
    let mut clients: Vec<ClientRecord> = match raw.get("get_clientlist").and_then(Value::as_object)
    {
        Some(base) => base
            .iter()
            // "maclist" is an internal summary key, not a client
            .filter(|(key, _)| key.as_str() != "maclist")
            .filter_map(|(_, entry)| serde_json::from_value(entry.clone()).ok())
            .collect(),
        None => Vec::new(),
    };

    for (list_key, band) in STATION_BANDS {
        let Some(stations) = raw.get(list_key).and_then(Value::as_object) else {
            continue;
        };
        for (mac, station) in stations {
            let Some(client) = clients.iter_mut().find(|c| &c.mac == mac) else {
                continue;
            };
            client.interface = band.to_owned();
            client.rssi = station.get("rssi").and_then(Value::as_i64);
        }
    }

    let aliases = parse_custom_clientlist(
        raw.get("custom_clientlist")
            .and_then(Value::as_str)
            .unwrap_or(""),
    );
    for client in &mut clients {
        if let Some(custom) = aliases.get(&client.mac) {
            client.alias = Some(custom.alias.clone());
        }
    }

    clients
}

/// Parse the `custom_clientlist` NVRAM string.
///
/// The format is a delimiter-separated pseudo-XML: `&#60`/`&#62` are
/// unescaped to `<`/`>`, the string splits on `<` into entries, and
/// each entry splits on `>` into exactly six fields
/// `[alias, mac, group, type, callback, _]`. Entries with any other
/// field count are malformed or partial and are dropped, not errored.
///
/// The format carries no escaping beyond those two entities, so a
/// literal `<` or `>` inside an alias corrupts parsing. Known
/// limitation of the firmware encoding, not something this layer can
/// repair.
pub fn parse_custom_clientlist(raw: &str) -> HashMap<String, CustomClient> {
    let unescaped = raw.replace("&#62", ">").replace("&#60", "<");

    unescaped
        .split('<')
        .filter_map(|entry| {
            let fields: Vec<&str> = entry.split('>').collect();
            let [alias, mac, group, device_type, callback, _] = fields[..] else {
                return None;
            };
            Some((
                mac.to_owned(),
                CustomClient {
                    alias: alias.to_owned(),
                    group: group.to_owned(),
                    device_type: device_type.to_owned(),
                    callback: callback.to_owned(),
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    // ── System info ─────────────────────────────────────────────────

    #[test]
    fn sys_info_composes_firmware_string() {
        let raw = json!({
            "productid": "RT-AX88U",
            "firmver": "3004",
            "buildno": "386",
            "extendno": "45934",
        });

        let info = decode_sys_info(&raw);
        assert_eq!(info.model.as_deref(), Some("RT-AX88U"));
        assert_eq!(info.firmware, "3004_386_45934");
    }

    #[test]
    fn sys_info_tolerates_missing_keys() {
        let info = decode_sys_info(&json!({ "firmver": "3004" }));
        assert_eq!(info.model, None);
        assert_eq!(info.firmware, "3004__");
    }

    // ── CPU / memory ────────────────────────────────────────────────

    #[test]
    fn cpu_mem_reshapes_memory_and_passes_cpu_through() {
        let raw = json!({
            "cpu_usage": { "cpu1_total": "7710", "cpu1_usage": "385" },
            "memory_usage": {
                "mem_total": "882124",
                "mem_used": "528120",
                "mem_free": "354004",
            },
        });

        let snapshot = decode_cpu_mem(&raw);
        assert_eq!(
            snapshot.cpu,
            json!({ "cpu1_total": "7710", "cpu1_usage": "385" })
        );
        assert_eq!(snapshot.memory.total, Some(json!("882124")));
        assert_eq!(snapshot.memory.used, Some(json!("528120")));
        assert_eq!(snapshot.memory.free, Some(json!("354004")));
    }

    #[test]
    fn cpu_mem_missing_sections_become_defaults() {
        let snapshot = decode_cpu_mem(&json!({}));
        assert_eq!(snapshot.cpu, Value::Null);
        assert_eq!(snapshot.memory.total, None);
        assert_eq!(snapshot.memory.used, None);
        assert_eq!(snapshot.memory.free, None);
    }

    // ── Online clients ──────────────────────────────────────────────

    fn clientlist_fixture() -> Value {
        json!({
            "get_clientlist": {
                "maclist": ["AA:BB:CC:11:22:33", "AA:BB:CC:44:55:66"],
                "AA:BB:CC:11:22:33": {
                    "mac": "AA:BB:CC:11:22:33",
                    "ip": "192.168.1.50",
                    "name": "laptop",
                },
                "AA:BB:CC:44:55:66": {
                    "mac": "AA:BB:CC:44:55:66",
                    "ip": "192.168.1.60",
                    "name": "printer",
                },
            },
            "wl_sta_list_2g": {},
            "wl_sta_list_5g": {
                "AA:BB:CC:11:22:33": { "rssi": -42 },
            },
            "wl_sta_list_5g_2": {},
            "custom_clientlist": "",
        })
    }

    fn find<'a>(clients: &'a [ClientRecord], mac: &str) -> &'a ClientRecord {
        clients
            .iter()
            .find(|c| c.mac == mac)
            .unwrap_or_else(|| panic!("no record for {mac}"))
    }

    #[test]
    fn station_entry_overwrites_band_and_rssi() {
        let clients = decode_online_clients(&clientlist_fixture());
        assert_eq!(clients.len(), 2);

        let wireless = find(&clients, "AA:BB:CC:11:22:33");
        assert_eq!(wireless.interface, "5GHz");
        assert_eq!(wireless.rssi, Some(-42));
        assert_eq!(wireless.ip.as_deref(), Some("192.168.1.50"));
        assert_eq!(wireless.alias, None);
    }

    #[test]
    fn clients_in_no_station_list_stay_wired() {
        let clients = decode_online_clients(&clientlist_fixture());

        let wired = find(&clients, "AA:BB:CC:44:55:66");
        assert_eq!(wired.interface, "wired");
        assert_eq!(wired.rssi, None);
    }

    #[test]
    fn station_only_macs_never_create_records() {
        let raw = json!({
            "get_clientlist": {
                "AA:BB:CC:11:22:33": { "mac": "AA:BB:CC:11:22:33" },
            },
            "wl_sta_list_2g": {
                // known to the radio, but not in the base list
                "DD:EE:FF:00:11:22": { "rssi": -70 },
            },
        });

        let clients = decode_online_clients(&raw);
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].mac, "AA:BB:CC:11:22:33");
    }

    #[test]
    fn aliases_merge_by_mac_only() {
        let mut raw = clientlist_fixture();
        raw["custom_clientlist"] = json!(
            "&#60NAS&#62AA:BB:CC:44:55:66&#620&#620&#62&#62&#60Ghost&#62DD:EE:FF:00:11:22&#620&#620&#62&#62"
        );

        let clients = decode_online_clients(&raw);
        assert_eq!(clients.len(), 2, "alias-only MACs must not add records");

        assert_eq!(
            find(&clients, "AA:BB:CC:44:55:66").alias.as_deref(),
            Some("NAS")
        );
        assert_eq!(find(&clients, "AA:BB:CC:11:22:33").alias, None);
    }

    #[test]
    fn decoding_is_idempotent() {
        let raw = clientlist_fixture();
        assert_eq!(decode_online_clients(&raw), decode_online_clients(&raw));
    }

    #[test]
    fn missing_clientlist_yields_empty() {
        assert!(decode_online_clients(&json!({})).is_empty());
    }

    // ── Custom client list parsing ──────────────────────────────────

    #[test]
    fn parses_all_six_field_entries() {
        let raw = "&#60Desk PC&#62AA:BB:CC:11:22:33&#620&#620&#62&#62\
                   &#60NAS&#62AA:BB:CC:44:55:66&#621&#624&#62cb&#62";

        let parsed = parse_custom_clientlist(raw);
        assert_eq!(parsed.len(), 2);

        let desk = &parsed["AA:BB:CC:11:22:33"];
        assert_eq!(desk.alias, "Desk PC");
        assert_eq!(desk.group, "0");
        assert_eq!(desk.device_type, "0");
        assert_eq!(desk.callback, "");

        let nas = &parsed["AA:BB:CC:44:55:66"];
        assert_eq!(nas.alias, "NAS");
        assert_eq!(nas.group, "1");
        assert_eq!(nas.device_type, "4");
        assert_eq!(nas.callback, "cb");
    }

    #[test]
    fn short_entries_are_dropped() {
        // second entry lost its trailing fields
        let raw = "&#60Desk PC&#62AA:BB:CC:11:22:33&#620&#620&#62&#62\
                   &#60Partial&#62AA:BB:CC:44:55:66&#620";

        let parsed = parse_custom_clientlist(raw);
        assert_eq!(parsed.len(), 1);
        assert!(parsed.contains_key("AA:BB:CC:11:22:33"));
        assert!(!parsed.contains_key("AA:BB:CC:44:55:66"));
    }

    #[test]
    fn overlong_entries_are_dropped() {
        // a stray ">" inside the alias pushes the field count to seven
        let raw = "&#60Bad&#62Alias&#62AA:BB:CC:11:22:33&#620&#620&#62&#62";
        assert!(parse_custom_clientlist(raw).is_empty());
    }

    #[test]
    fn empty_string_parses_to_empty_map() {
        assert!(parse_custom_clientlist("").is_empty());
    }
}
