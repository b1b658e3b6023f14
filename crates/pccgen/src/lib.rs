//! RouterOS PCC load-balance script generator
//!
//! Turns a list of WAN links into a RouterOS script with per-link routing
//! tables, default routes at two distances, netwatch monitors and PCC rules
//! that split LAN connections across links in proportion to their speed.

mod allocator;
mod commands;
mod composer;
mod input;
mod prompt;
mod source;
mod tables;
mod types;

pub use allocator::{allocate, min_positive_speed, Allocation};
pub use commands::*;
pub use composer::{generate_script, RuleComposer};
pub use input::{parse_links, FileSource, InputFormat};
pub use prompt::{prompts, PromptSource, BANNER};
pub use source::{run, LinkSource, RunSummary};
pub use tables::*;
pub use types::*;
