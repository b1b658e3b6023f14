//! Type definitions for pccgen

/// Speed substituted when the operator's value is not a number.
pub const DEFAULT_SPEED_MBPS: f64 = 1.0;

/// Distance used by file input when none is given.
pub const DEFAULT_DISTANCE: &str = "1";

/// One WAN link as entered by the operator.
///
/// Distances are kept as the operator typed them and emitted verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDescriptor {
    /// Link name, also used as routing table name and mark/comment tag
    pub name: String,
    /// Interface or tunnel the link ingresses on
    pub interface: String,
    /// Next-hop gateway address
    pub gateway: String,
    /// Address probed by the link's netwatch
    pub test_address: String,
    /// Inactive links are emitted with `disabled=yes`
    pub active: bool,
    /// Distance of the default route in the link's own table
    pub link_table_distance: String,
    /// Distance of the default route in the main table
    pub main_table_distance: String,
    /// Optional VRF binding for the main table default route
    pub vrf_interface: Option<String>,
    /// Relative capacity, only used for bucket allocation
    pub speed_mbps: f64,
}

impl LinkDescriptor {
    /// Create an active link with distance 1 in both tables
    pub fn new(
        name: impl Into<String>,
        interface: impl Into<String>,
        gateway: impl Into<String>,
        test_address: impl Into<String>,
        speed_mbps: f64,
    ) -> Self {
        Self {
            name: name.into(),
            interface: interface.into(),
            gateway: gateway.into(),
            test_address: test_address.into(),
            active: true,
            link_table_distance: DEFAULT_DISTANCE.to_string(),
            main_table_distance: DEFAULT_DISTANCE.to_string(),
            vrf_interface: None,
            speed_mbps,
        }
    }

    /// Set the active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set both route distances
    pub fn with_distances(
        mut self,
        link_table: impl Into<String>,
        main_table: impl Into<String>,
    ) -> Self {
        self.link_table_distance = link_table.into();
        self.main_table_distance = main_table.into();
        self
    }

    /// Scope the main table route to a VRF interface
    pub fn with_vrf(mut self, vrf_interface: impl Into<String>) -> Self {
        self.vrf_interface = Some(vrf_interface.into());
        self
    }
}

/// Parse an operator speed value.
///
/// Returns `None` for anything that is not a finite number; callers
/// substitute [`DEFAULT_SPEED_MBPS`]. Zero and negative values parse and
/// are handled by the allocator.
pub fn parse_speed(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|speed| speed.is_finite())
}

/// Parse an operator active flag. Only `no` (any case) means inactive.
pub fn parse_active(raw: &str) -> bool {
    !raw.trim().eq_ignore_ascii_case("no")
}

/// Normalise an optional text answer: blank means absent.
pub fn parse_optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
