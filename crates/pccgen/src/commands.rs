//! RouterOS statement builders
//!
//! Field order, option names and quoting are fixed: the router's script
//! interpreter parses these lines as written.

use pccgen_common::routeros::{self, IP_ROUTE_MENU, MANGLE_MENU, NETWATCH_MENU, ROUTING_TABLE_MENU};

use crate::tables::*;
use crate::types::LinkDescriptor;

/// Build routing table creation command
pub fn build_add_routing_table_cmd(table: &str) -> String {
    format!("{} add disabled=no fib name={}", ROUTING_TABLE_MENU, table)
}

/// Build connection-mark command
///
/// Marks new connections arriving on the link's interface with the link name
pub fn build_mark_connection_cmd(link: &LinkDescriptor) -> String {
    format!(
        "{} add action=mark-connection chain=prerouting comment={} connection-mark=no-mark \
         connection-state=new in-interface={} new-connection-mark={} {}",
        MANGLE_MENU,
        routeros::quote(&format!("Mark connection of {}", link.name)),
        link.interface,
        link.name,
        routeros::disabled(link.active)
    )
}

/// Build output routing-mark command
///
/// Router-originated traffic of a marked connection leaves through the link's table
pub fn build_mark_output_routing_cmd(link: &LinkDescriptor) -> String {
    format!(
        "{} add action=mark-routing chain=output comment={} connection-mark={} \
         new-routing-mark={} {}",
        MANGLE_MENU,
        routeros::quote(&format!("Mark output of {}", link.name)),
        link.name,
        link.name,
        routeros::disabled(link.active)
    )
}

/// Build default route in the link's own table
pub fn build_link_default_route_cmd(link: &LinkDescriptor) -> String {
    format!(
        "{} add check-gateway=ping {} distance={} dst-address={} gateway={} routing-table={} \
         scope={} suppress-hw-offload=no target-scope={} comment={}",
        IP_ROUTE_MENU,
        routeros::disabled(link.active),
        link.link_table_distance,
        DEFAULT_ROUTE_DST,
        link.gateway,
        link.name,
        ROUTE_SCOPE,
        ROUTE_TARGET_SCOPE,
        link.name
    )
}

/// Build default route in the main table
///
/// Appends `vrf-interface` only when the link has one
pub fn build_main_default_route_cmd(link: &LinkDescriptor) -> String {
    let vrf = link
        .vrf_interface
        .as_deref()
        .map(|vrf| format!(" vrf-interface={}", vrf))
        .unwrap_or_default();

    format!(
        "{} add check-gateway=ping comment={} {} distance={} dst-address={} gateway={} \
         pref-src={} routing-table={} scope={} suppress-hw-offload=no target-scope={}{}",
        IP_ROUTE_MENU,
        link.name,
        routeros::disabled(link.active),
        link.main_table_distance,
        DEFAULT_ROUTE_DST,
        link.gateway,
        routeros::quote(""),
        MAIN_TABLE,
        ROUTE_SCOPE,
        ROUTE_TARGET_SCOPE,
        vrf
    )
}

/// Build host route for the netwatch probe address
///
/// Always enabled, so the probe keeps using this link while its
/// default routes are disabled
pub fn build_test_host_route_cmd(link: &LinkDescriptor) -> String {
    format!(
        "{} add disabled=no dst-address={}/32 gateway={} routing-table={} suppress-hw-offload=no",
        IP_ROUTE_MENU, link.test_address, link.gateway, link.name
    )
}

/// Build the script a netwatch runs to toggle routes tagged `comment`
pub fn build_route_toggle_script(comment: &str, enable: bool) -> String {
    format!(
        "{} set [find comment={}] {}",
        IP_ROUTE_MENU,
        routeros::quote(comment),
        routeros::disabled(enable)
    )
}

/// Build netwatch command
///
/// Down disables the routes commented with the link name, up re-enables them
pub fn build_netwatch_cmd(link: &LinkDescriptor) -> String {
    format!(
        "{} add {} host={} http-codes={} name={} type=simple down-script={} up-script={}",
        NETWATCH_MENU,
        routeros::disabled(link.active),
        link.test_address,
        routeros::quote(""),
        routeros::quote(&format!("TEST {}", link.name)),
        routeros::quote(&build_route_toggle_script(&link.name, false)),
        routeros::quote(&build_route_toggle_script(&link.name, true))
    )
}

/// Build LAN PCC connection-mark command for one bucket
///
/// `bucket` is the index within the link, `offset` the position in the
/// shared `total_buckets` partition
pub fn build_lan_pcc_cmd(link_name: &str, bucket: u32, total_buckets: u64, offset: u64) -> String {
    format!(
        "{} add action=mark-connection chain=prerouting comment={} connection-state=new \
         dst-address-type=!local in-interface-list={} new-connection-mark={} packet-mark=no-mark \
         per-connection-classifier={}:{}/{}",
        MANGLE_MENU,
        routeros::quote(&format!(
            "Mark LAN connection for {} (bucket {})",
            link_name, bucket
        )),
        LAN_INTERFACE_LIST,
        link_name,
        PCC_CLASSIFIER,
        total_buckets,
        offset
    )
}

/// Build LAN routing-mark command
pub fn build_lan_mark_routing_cmd(link_name: &str) -> String {
    format!(
        "{} add action=mark-routing chain=prerouting comment={} connection-mark={} \
         in-interface-list={} new-routing-mark={}",
        MANGLE_MENU,
        routeros::quote(&format!("Mark LAN route for {}", link_name)),
        link_name,
        LAN_INTERFACE_LIST,
        link_name
    )
}
