//! Link descriptor sources and the generation pipeline

use pccgen_common::{GenResult, ScriptSink};
use tracing::info;

use crate::composer::generate_script;
use crate::types::LinkDescriptor;

/// Something that yields the ordered list of links for one run
pub trait LinkSource {
    /// Collect every link, in the order they should be emitted.
    ///
    /// An error aborts the run before anything is written.
    fn collect_links(&mut self) -> GenResult<Vec<LinkDescriptor>>;
}

/// Links already held in memory
impl LinkSource for Vec<LinkDescriptor> {
    fn collect_links(&mut self) -> GenResult<Vec<LinkDescriptor>> {
        Ok(self.clone())
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Links the script was generated for
    pub links: usize,
    /// Size of the PCC partition
    pub total_buckets: u64,
    /// Lines written, blank lines included
    pub lines: usize,
    /// Where the script went
    pub target: String,
}

/// Collect links, compose the script and write it.
///
/// Nothing reaches the sink unless collection succeeds.
pub fn run(source: &mut dyn LinkSource, sink: &mut dyn ScriptSink) -> GenResult<RunSummary> {
    let links = source.collect_links()?;
    let (allocation, script) = generate_script(&links);

    sink.write_script(&script)?;

    let summary = RunSummary {
        links: links.len(),
        total_buckets: allocation.total_buckets(),
        lines: script.len(),
        target: sink.target(),
    };
    info!(
        links = summary.links,
        total_buckets = summary.total_buckets,
        lines = summary.lines,
        target = %summary.target,
        "Generation complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pccgen_common::{ConfigScript, GenError, MemorySink};
    use std::io;

    struct FailingSource;

    impl LinkSource for FailingSource {
        fn collect_links(&mut self) -> GenResult<Vec<LinkDescriptor>> {
            Err(GenError::invalid_input("link count must be an integer"))
        }
    }

    struct FailingSink;

    impl ScriptSink for FailingSink {
        fn target(&self) -> String {
            "broken".to_string()
        }

        fn write_script(&mut self, _script: &ConfigScript) -> GenResult<()> {
            Err(GenError::write_failed(
                self.target(),
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }
    }

    #[test]
    fn test_run_writes_script() {
        let mut links = vec![
            LinkDescriptor::new("LINK1", "ether2", "192.168.18.1", "8.8.8.8", 1000.0),
            LinkDescriptor::new("LINK2", "ether3", "192.168.19.1", "1.1.1.1", 600.0),
        ];
        let mut sink = MemorySink::new();

        let summary = run(&mut links, &mut sink).unwrap();

        assert_eq!(summary.links, 2);
        assert_eq!(summary.total_buckets, 3);
        assert_eq!(summary.lines, sink.lines().len());
        assert_eq!(summary.target, "<memory>");
    }

    #[test]
    fn test_source_error_skips_sink() {
        let mut sink = MemorySink::new();
        let err = run(&mut FailingSource, &mut sink).unwrap_err();

        assert!(err.is_input_error());
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_sink_error_is_reported() {
        let mut links: Vec<LinkDescriptor> = Vec::new();
        let err = run(&mut links, &mut FailingSink).unwrap_err();

        assert!(!err.is_input_error());
        assert!(err.to_string().contains("read-only"));
    }
}
