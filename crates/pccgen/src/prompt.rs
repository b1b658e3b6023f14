//! Interactive link collection
//!
//! Asks the operator for the link count and then for each link's fields.
//! Reader and writer are generic so the dialogue can be driven from tests.

use std::io::{BufRead, Write};

use pccgen_common::{GenError, GenResult};
use tracing::{debug, warn};

use crate::source::LinkSource;
use crate::types::{parse_active, parse_optional, parse_speed, LinkDescriptor, DEFAULT_SPEED_MBPS};

/// Banner printed before the first question
pub const BANNER: &str =
    "Load-balance script generator: PCC, per-link routing tables and netwatch";

/// Operator prompts, in the order they are asked
pub mod prompts {
    pub const LINK_COUNT: &str = "Number of links to configure: ";
    pub const NAME: &str = "  Link name (e.g. LINK1): ";
    pub const INTERFACE: &str = "  Interface or PPPoE (e.g. ether2-LINK1 or pppoe-out1): ";
    pub const GATEWAY: &str = "  Gateway IP (e.g. 192.168.18.1): ";
    pub const TEST_ADDRESS: &str = "  Netwatch test IP (e.g. 8.8.8.8): ";
    pub const ACTIVE: &str = "  Is the link active? (yes/no): ";
    pub const LINK_DISTANCE: &str = "  Default route distance in the link table (e.g. 1): ";
    pub const MAIN_DISTANCE: &str = "  Default route distance in the main table (e.g. 1 or 2): ";
    pub const VRF: &str =
        "  VRF interface for the main table route (optional, leave blank for none): ";
    pub const SPEED: &str = "  Link speed in Mbps (e.g. 1000, 700, 600): ";

    pub const INVALID_SPEED: &str = "  Invalid speed, expected a number. Using 1 Mbps.";
}

/// Link source that questions an operator
pub struct PromptSource<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the source, returning the writer (for inspecting transcripts)
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) -> GenResult<()> {
        writeln!(self.output, "{}", text).map_err(|source| GenError::Prompt { source })
    }

    /// Print `prompt` and read one trimmed answer
    fn ask(&mut self, prompt: &str, what: &str) -> GenResult<String> {
        write!(self.output, "{}", prompt)
            .and_then(|_| self.output.flush())
            .map_err(|source| GenError::Prompt { source })?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|source| GenError::Prompt { source })?;
        if read == 0 {
            return Err(GenError::unexpected_eof(what));
        }
        Ok(line.trim().to_string())
    }

    /// Read the link count. Negative counts configure no links.
    fn ask_link_count(&mut self) -> GenResult<usize> {
        let raw = self.ask(prompts::LINK_COUNT, "link count")?;
        let count: i64 = raw.parse().map_err(|_| {
            GenError::invalid_input(format!(
                "link count must be an integer, got '{}'",
                raw
            ))
        })?;
        if count < 0 {
            warn!(count, "Negative link count, configuring no links");
        }
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn ask_link(&mut self, number: usize) -> GenResult<LinkDescriptor> {
        self.say("")?;
        self.say(&format!("Configuration for link {}:", number))?;

        let name = self.ask(prompts::NAME, "link name")?;
        let interface = self.ask(prompts::INTERFACE, "interface")?;
        let gateway = self.ask(prompts::GATEWAY, "gateway")?;
        let test_address = self.ask(prompts::TEST_ADDRESS, "test address")?;
        let active = parse_active(&self.ask(prompts::ACTIVE, "active flag")?);
        let link_table_distance = self.ask(prompts::LINK_DISTANCE, "link table distance")?;
        let main_table_distance = self.ask(prompts::MAIN_DISTANCE, "main table distance")?;
        let vrf_interface = parse_optional(&self.ask(prompts::VRF, "vrf interface")?);

        let raw_speed = self.ask(prompts::SPEED, "link speed")?;
        let speed_mbps = match parse_speed(&raw_speed) {
            Some(speed) => speed,
            None => {
                warn!(link = %name, value = %raw_speed, "Invalid speed, using default");
                self.say(prompts::INVALID_SPEED)?;
                DEFAULT_SPEED_MBPS
            }
        };

        debug!(link = %name, active, speed_mbps, "Collected link");

        Ok(LinkDescriptor {
            name,
            interface,
            gateway,
            test_address,
            active,
            link_table_distance,
            main_table_distance,
            vrf_interface,
            speed_mbps,
        })
    }
}

impl<R: BufRead, W: Write> LinkSource for PromptSource<R, W> {
    fn collect_links(&mut self) -> GenResult<Vec<LinkDescriptor>> {
        self.say(BANNER)?;
        let count = self.ask_link_count()?;

        (1..=count).map(|number| self.ask_link(number)).collect()
    }
}
