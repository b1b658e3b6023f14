//! Test infrastructure for pccgen
//!
//! Provides link fixtures, interactive answer builders and verification
//! helpers for generated scripts.

pub mod fixtures;
pub mod verification;

pub use fixtures::{link_fixtures, prompt_fixtures};
pub use verification::{ClassifierRule, ScriptVerifier, VerificationError, VerifyResult};
