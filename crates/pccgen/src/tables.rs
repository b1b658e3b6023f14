//! Routing table, interface list and route property constants

/// Global routing table
pub const MAIN_TABLE: &str = "main";

/// Interface list holding the local segment
pub const LAN_INTERFACE_LIST: &str = "LAN";

/// Destination of every default route
pub const DEFAULT_ROUTE_DST: &str = "0.0.0.0/0";

/// Scope of the default routes
pub const ROUTE_SCOPE: u32 = 30;

/// Target scope of the default routes
pub const ROUTE_TARGET_SCOPE: u32 = 10;

/// PCC classifier used to split LAN connections into buckets
pub const PCC_CLASSIFIER: &str = "src-address-and-port";

/// Links referenced by the fixed LAN routing-mark rules.
///
/// These do not follow the operator's link names.
pub const FIXED_LAN_ROUTE_LINKS: [&str; 2] = ["LINK1", "LINK2"];

/// Comment lines written at the top of every script
pub mod header {
    pub const TITLE: &str = "Generated load-balance automation script";
    pub const SUMMARY: &str = "Per-link routing tables, default routes, netwatch,";
    pub const SUMMARY_CONT: &str = "mangle marks and PCC rules for the LAN";

    pub const ROUTING_TABLES: &str = "Routing tables";
    pub const LAN_PCC: &str = "LAN load balancing with PCC";
    pub const LAN_EXTRA: &str = "Additional LAN rules (example)";
}
