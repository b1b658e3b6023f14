//! Test fixtures for common link setups
//!
//! Provides reusable link lists and the matching interactive answers

use pccgen::LinkDescriptor;

/// Common link descriptor fixtures
pub mod link_fixtures {
    use super::*;

    /// Active link with distance 1 in both tables
    pub fn link(name: &str, speed_mbps: f64) -> LinkDescriptor {
        LinkDescriptor::new(
            name,
            format!("ether-{}", name.to_lowercase()),
            "192.168.18.1",
            "8.8.8.8",
            speed_mbps,
        )
    }

    /// Gigabit fibre link
    pub fn link1_fibre() -> LinkDescriptor {
        LinkDescriptor::new("LINK1", "ether2-LINK1", "192.168.18.1", "8.8.8.8", 1000.0)
    }

    /// 600 Mbps PPPoE link, ranked second in the main table
    pub fn link2_pppoe() -> LinkDescriptor {
        LinkDescriptor::new("LINK2", "pppoe-out1", "10.0.0.1", "1.1.1.1", 600.0)
            .with_distances("1", "2")
    }

    /// LINK1 at 1000 Mbps and LINK2 at 600 Mbps
    pub fn two_links() -> Vec<LinkDescriptor> {
        vec![link1_fibre(), link2_pppoe()]
    }

    /// Three links: one inactive, one scoped to a VRF
    pub fn mixed_links() -> Vec<LinkDescriptor> {
        vec![
            link1_fibre(),
            link2_pppoe().with_active(false),
            LinkDescriptor::new("LTE", "lte1", "10.64.0.1", "9.9.9.9", 50.0)
                .with_distances("2", "3")
                .with_vrf("vrf-lte"),
        ]
    }

    /// Links at the given speeds, named LINK1, LINK2, ...
    pub fn links_with_speeds(speeds: &[f64]) -> Vec<LinkDescriptor> {
        speeds
            .iter()
            .enumerate()
            .map(|(i, &speed)| link(&format!("LINK{}", i + 1), speed))
            .collect()
    }
}

/// Interactive answer fixtures
pub mod prompt_fixtures {
    use super::*;

    /// Answers for one link, in prompt order, newline-terminated
    pub fn link_answers(link: &LinkDescriptor) -> String {
        let answers = [
            link.name.clone(),
            link.interface.clone(),
            link.gateway.clone(),
            link.test_address.clone(),
            if link.active { "yes" } else { "no" }.to_string(),
            link.link_table_distance.clone(),
            link.main_table_distance.clone(),
            link.vrf_interface.clone().unwrap_or_default(),
            link.speed_mbps.to_string(),
        ];
        answers.iter().map(|a| format!("{}\n", a)).collect()
    }

    /// A whole session: the link count then every link's answers
    pub fn session(links: &[LinkDescriptor]) -> String {
        let mut input = format!("{}\n", links.len());
        for link in links {
            input.push_str(&link_answers(link));
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_links() {
        let links = link_fixtures::two_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].name, "LINK1");
        assert_eq!(links[1].main_table_distance, "2");
    }

    #[test]
    fn test_mixed_links() {
        let links = link_fixtures::mixed_links();
        assert!(!links[1].active);
        assert_eq!(links[2].vrf_interface.as_deref(), Some("vrf-lte"));
    }

    #[test]
    fn test_links_with_speeds() {
        let links = link_fixtures::links_with_speeds(&[100.0, 50.0]);
        assert_eq!(links[1].name, "LINK2");
        assert_eq!(links[1].speed_mbps, 50.0);
    }

    #[test]
    fn test_link_answers() {
        let answers = prompt_fixtures::link_answers(&link_fixtures::link2_pppoe().with_active(false));
        assert_eq!(
            answers,
            "LINK2\npppoe-out1\n10.0.0.1\n1.1.1.1\nno\n1\n2\n\n600\n"
        );
    }

    #[test]
    fn test_session() {
        let input = prompt_fixtures::session(&[]);
        assert_eq!(input, "0\n");
    }
}
