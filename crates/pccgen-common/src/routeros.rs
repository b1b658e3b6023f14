//! RouterOS script syntax helpers.
//!
//! Statements are emitted as plain text for the router's own script
//! interpreter. This module holds the menu paths the generator writes to and
//! the quoting rule for string-valued fields.
//!
//! # Example
//!
//! ```
//! use pccgen_common::routeros::{self, IP_ROUTE_MENU};
//!
//! // `disabled` takes the item's active state
//! let up = format!(
//!     "{} set [find comment={}] {}",
//!     IP_ROUTE_MENU,
//!     routeros::quote("LINK1"),
//!     routeros::disabled(true),
//! );
//! assert_eq!(up, "/ip route set [find comment=\"LINK1\"] disabled=no");
//! assert_eq!(routeros::disabled(false), "disabled=yes");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Menu for policy routing tables.
pub const ROUTING_TABLE_MENU: &str = "/routing table";

/// Menu for static routes.
pub const IP_ROUTE_MENU: &str = "/ip route";

/// Menu for mangle (packet/connection marking) rules.
pub const MANGLE_MENU: &str = "/ip firewall mangle";

/// Menu for netwatch reachability monitors.
pub const NETWATCH_MENU: &str = "/tool netwatch";

/// Characters that must be escaped inside a double-quoted RouterOS string:
/// `"`, `\` and `$` (variable substitution).
static QUOTE_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(["\\$])"#).expect("Invalid regex pattern"));

/// Quotes a string for use as a RouterOS string value.
///
/// The value is wrapped in double quotes and `"`, `\` and `$` are escaped
/// with a backslash. Quoting a script fragment that itself contains quoted
/// values yields the nested `\"...\"` form the interpreter expects.
///
/// # Example
///
/// ```
/// use pccgen_common::routeros::quote;
///
/// assert_eq!(quote("simple"), "\"simple\"");
/// assert_eq!(quote(""), "\"\"");
/// assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
pub fn quote(s: &str) -> String {
    let escaped = QUOTE_ESCAPE_RE.replace_all(s, r"\$1");
    format!("\"{}\"", escaped)
}

/// Renders the `disabled=` property for an item whose state follows `active`.
pub fn disabled(active: bool) -> &'static str {
    if active {
        "disabled=no"
    } else {
        "disabled=yes"
    }
}

/// Renders a comment line. Empty text renders as a blank line.
pub fn comment(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("# {}", text)
    }
}
