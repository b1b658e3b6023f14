//! Common infrastructure for the RouterOS PCC load-balance generator.
//!
//! This crate provides the pieces shared by the generator and its test
//! support crate:
//!
//! - [`routeros`]: Menu paths and string quoting for RouterOS scripts
//! - [`script`]: The [`ConfigScript`] line container and output sinks
//! - [`error`]: Error types for input collection and output
//!
//! # Example
//!
//! ```
//! use pccgen_common::{routeros, ConfigScript, MemorySink, ScriptSink};
//!
//! let mut script = ConfigScript::new();
//! script.push(format!(
//!     "{} add disabled=no fib name={}",
//!     routeros::ROUTING_TABLE_MENU,
//!     "LINK1"
//! ));
//!
//! let mut sink = MemorySink::new();
//! sink.write_script(&script).unwrap();
//! assert_eq!(sink.lines().len(), 1);
//! ```

pub mod error;
pub mod routeros;
pub mod script;

// Re-export commonly used items at crate root
pub use error::{GenError, GenResult};
pub use script::{
    ConfigScript, FileSink, MemorySink, ScriptSink, StdoutSink, DEFAULT_OUTPUT_FILE,
};
