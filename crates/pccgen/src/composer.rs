//! Rule composer - turns allocated links into an ordered RouterOS script

use pccgen_common::{routeros, ConfigScript};
use tracing::{debug, instrument};

use crate::allocator::{allocate, Allocation};
use crate::commands::*;
use crate::tables::{header, FIXED_LAN_ROUTE_LINKS};
use crate::types::LinkDescriptor;

/// Rule composer
///
/// Emits, in order: header, routing tables, one block per link, LAN PCC
/// buckets and the fixed LAN routing marks. Tables are created before any
/// route or mark refers to them.
pub struct RuleComposer<'a> {
    links: &'a [LinkDescriptor],
    allocation: &'a Allocation,
}

impl<'a> RuleComposer<'a> {
    /// Create a composer over links and their allocation
    ///
    /// `allocation` is expected to come from [`allocate`] on the same links.
    pub fn new(links: &'a [LinkDescriptor], allocation: &'a Allocation) -> Self {
        Self { links, allocation }
    }

    /// Compose the whole script
    #[instrument(skip_all, fields(links = self.links.len(), total_buckets = self.allocation.total_buckets()))]
    pub fn compose(&self) -> ConfigScript {
        let mut script = ConfigScript::new();

        self.push_header(&mut script);
        self.push_routing_tables(&mut script);
        for link in self.links {
            self.push_link_block(&mut script, link);
        }
        let next_offset = self.push_lan_classification(&mut script);
        debug!(classified = next_offset, "LAN classification emitted");
        self.push_fixed_lan_rules(&mut script);

        debug!(lines = script.len(), "Script composed");
        script
    }

    fn push_header(&self, script: &mut ConfigScript) {
        script.push(routeros::comment(header::TITLE));
        script.push(routeros::comment(header::SUMMARY));
        script.push(routeros::comment(header::SUMMARY_CONT));
        script.blank();
    }

    fn push_routing_tables(&self, script: &mut ConfigScript) {
        script.push(routeros::comment(header::ROUTING_TABLES));
        script.extend(
            self.links
                .iter()
                .map(|link| build_add_routing_table_cmd(&link.name)),
        );
        script.blank();
    }

    /// Marks, default routes, probe route and netwatch for one link
    fn push_link_block(&self, script: &mut ConfigScript, link: &LinkDescriptor) {
        debug!(link = %link.name, active = link.active, "Composing link block");

        script.push(build_mark_connection_cmd(link));
        script.push(build_mark_output_routing_cmd(link));
        script.blank();

        script.push(build_link_default_route_cmd(link));
        script.push(build_main_default_route_cmd(link));
        script.blank();

        script.push(build_test_host_route_cmd(link));
        script.blank();

        script.push(build_netwatch_cmd(link));
        script.blank();
    }

    /// Emit one PCC rule per bucket; returns the next unused offset.
    ///
    /// The offset runs across links, so the emitted offsets cover
    /// `0..total_buckets` exactly once.
    fn push_lan_classification(&self, script: &mut ConfigScript) -> u64 {
        let total = self.allocation.total_buckets();

        script.push(routeros::comment(header::LAN_PCC));
        script.push(routeros::comment(&format!("Total buckets: {}", total)));

        let mut offset = 0u64;
        for (link, &buckets) in self.links.iter().zip(self.allocation.bucket_counts()) {
            for bucket in 0..buckets {
                script.push(build_lan_pcc_cmd(&link.name, bucket, total, offset));
                offset += 1;
            }
        }
        script.blank();

        offset
    }

    fn push_fixed_lan_rules(&self, script: &mut ConfigScript) {
        script.push(routeros::comment(header::LAN_EXTRA));
        script.extend(FIXED_LAN_ROUTE_LINKS.iter().map(|name| build_lan_mark_routing_cmd(name)));
    }
}

/// Allocate buckets for `links` and compose their script
pub fn generate_script(links: &[LinkDescriptor]) -> (Allocation, ConfigScript) {
    let allocation = allocate(links);
    let script = RuleComposer::new(links, &allocation).compose();
    (allocation, script)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(name: &str, speed: f64) -> LinkDescriptor {
        LinkDescriptor::new(name, format!("ether-{}", name), "10.0.0.1", "8.8.8.8", speed)
    }

    fn pcc_lines(script: &ConfigScript) -> Vec<&str> {
        script
            .statements()
            .filter(|l| l.contains("per-connection-classifier="))
            .collect()
    }

    #[test]
    fn test_single_link_classification() {
        let (alloc, script) = generate_script(&[link("LINK1", 1000.0)]);
        assert_eq!(alloc.total_buckets(), 1);

        let pcc = pcc_lines(&script);
        assert_eq!(pcc.len(), 1);
        assert!(pcc[0].ends_with("src-address-and-port:1/0"));
        assert!(pcc[0].contains("new-connection-mark=LINK1"));
    }

    #[test]
    fn test_offsets_continue_across_links() {
        let (_, script) = generate_script(&[link("LINK1", 1000.0), link("LINK2", 600.0)]);
        let pcc = pcc_lines(&script);

        assert_eq!(pcc.len(), 3);
        assert!(pcc[0].contains("new-connection-mark=LINK1") && pcc[0].ends_with(":3/0"));
        assert!(pcc[1].contains("new-connection-mark=LINK1") && pcc[1].ends_with(":3/1"));
        assert!(pcc[2].contains("new-connection-mark=LINK2") && pcc[2].ends_with(":3/2"));
        assert!(pcc[1].contains("(bucket 1)"));
        assert!(pcc[2].contains("(bucket 0)"));
    }

    #[test]
    fn test_total_buckets_comment() {
        let (_, script) = generate_script(&[link("LINK1", 1000.0), link("LINK2", 600.0)]);
        assert!(script.lines().iter().any(|l| l == "# Total buckets: 3"));
    }

    #[test]
    fn test_zero_links_keeps_fixed_rules() {
        let (alloc, script) = generate_script(&[]);
        assert_eq!(alloc.total_buckets(), 0);

        let stmts: Vec<_> = script.statements().collect();
        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].contains("new-routing-mark=LINK1"));
        assert!(stmts[1].contains("new-routing-mark=LINK2"));
        assert!(script.lines().iter().any(|l| l == "# Total buckets: 0"));
    }

    #[test]
    fn test_routing_tables_come_first() {
        let links = [link("LINK1", 100.0), link("LINK2", 100.0)];
        let (_, script) = generate_script(&links);
        let stmts: Vec<_> = script.statements().collect();

        assert_eq!(stmts[0], "/routing table add disabled=no fib name=LINK1");
        assert_eq!(stmts[1], "/routing table add disabled=no fib name=LINK2");
    }

    #[test]
    fn test_link_block_order() {
        let (_, script) = generate_script(&[link("LINK1", 100.0)]);
        let stmts: Vec<_> = script.statements().collect();

        assert!(stmts[1].contains("action=mark-connection chain=prerouting"));
        assert!(stmts[2].contains("action=mark-routing chain=output"));
        assert!(stmts[3].contains("routing-table=LINK1 scope=30"));
        assert!(stmts[4].contains("routing-table=main"));
        assert!(stmts[5].contains("dst-address=8.8.8.8/32"));
        assert!(stmts[6].starts_with("/tool netwatch add"));
    }

    #[test]
    fn test_inactive_link_disabled_statements() {
        let (_, script) = generate_script(&[link("LINK1", 100.0).with_active(false)]);
        let stmts: Vec<_> = script.statements().collect();

        for stmt in &stmts[1..=4] {
            assert!(stmt.contains("disabled=yes"), "{}", stmt);
        }
        assert!(stmts[5].contains("disabled=no"));
        assert!(stmts[6].starts_with("/tool netwatch add disabled=yes"));
    }

    #[test]
    fn test_script_ends_with_fixed_rules() {
        let (_, script) = generate_script(&[link("WAN_A", 100.0)]);
        let last = script.lines().last().unwrap();
        assert!(last.contains("comment=\"Mark LAN route for LINK2\""));
    }

    #[test]
    fn test_deterministic() {
        let links = [link("LINK1", 1000.0), link("LINK2", 600.0).with_vrf("vrf1")];
        let (_, a) = generate_script(&links);
        let (_, b) = generate_script(&links);
        assert_eq!(a.render(), b.render());
    }
}
