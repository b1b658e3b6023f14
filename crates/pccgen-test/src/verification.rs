//! Verification helpers for generated scripts
//!
//! Provides assertion helpers for the PCC partition, statement ordering and
//! per-link disabled state

use once_cell::sync::Lazy;
use pccgen_common::ConfigScript;
use regex::Regex;
use thiserror::Error;

/// Verification error types
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Malformed classifier rule: {statement}")]
    MalformedRule { statement: String },

    #[error("Expected {expected} classifier rules, found {actual}")]
    RuleCountMismatch { expected: usize, actual: usize },

    #[error("Classifier rule {index}: expected offset {expected}, found {actual}")]
    OffsetMismatch {
        index: usize,
        expected: u64,
        actual: u64,
    },

    #[error("Classifier rule {index}: expected partition size {expected}, found {actual}")]
    PartitionSizeMismatch {
        index: usize,
        expected: u64,
        actual: u64,
    },

    #[error("Statement {index} references table '{table}' before it is created")]
    TableUsedBeforeCreation { index: usize, table: String },

    #[error("Expected exactly one {kind} statement for link '{link}', found {actual}")]
    StatementCountMismatch {
        link: String,
        kind: &'static str,
        actual: usize,
    },

    #[error("{kind} statement for link '{link}' should carry {expected}: {statement}")]
    DisabledStateMismatch {
        link: String,
        kind: &'static str,
        expected: &'static str,
        statement: String,
    },
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

static CLASSIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"new-connection-mark=(\S+) .*per-connection-classifier=src-address-and-port:(\d+)/(\d+)$")
        .expect("Invalid regex pattern")
});

static TABLE_CREATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/routing table add .*\bname=(\S+)").expect("Invalid regex pattern"));

/// One parsed PCC classification rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRule {
    /// Connection mark the bucket is assigned to
    pub link: String,
    /// Declared partition size
    pub total: u64,
    /// Bucket offset within the partition
    pub offset: u64,
}

/// Kinds of per-link statement whose state follows the link's active flag
const MIRRORED_KINDS: [&str; 5] = [
    "connection-mark",
    "output-routing-mark",
    "link-table-route",
    "main-table-route",
    "netwatch",
];

fn has_token(statement: &str, token: &str) -> bool {
    statement.split_whitespace().any(|t| t == token)
}

/// Script verification helper
pub struct ScriptVerifier<'a> {
    script: &'a ConfigScript,
}

impl<'a> ScriptVerifier<'a> {
    /// Create a new verifier
    pub fn new(script: &'a ConfigScript) -> Self {
        Self { script }
    }

    /// Parse every PCC classification rule, in emission order
    pub fn classifier_rules(&self) -> VerifyResult<Vec<ClassifierRule>> {
        self.script
            .statements()
            .filter(|s| s.contains("per-connection-classifier="))
            .map(|statement| {
                let caps = CLASSIFIER_RE.captures(statement).ok_or_else(|| {
                    VerificationError::MalformedRule {
                        statement: statement.to_string(),
                    }
                })?;
                let number = |i: usize| {
                    caps[i]
                        .parse::<u64>()
                        .map_err(|_| VerificationError::MalformedRule {
                            statement: statement.to_string(),
                        })
                };
                Ok(ClassifierRule {
                    link: caps[1].to_string(),
                    total: number(2)?,
                    offset: number(3)?,
                })
            })
            .collect()
    }

    /// Number of buckets assigned to `link`
    pub fn bucket_count(&self, link: &str) -> VerifyResult<usize> {
        Ok(self
            .classifier_rules()?
            .iter()
            .filter(|r| r.link == link)
            .count())
    }

    /// Verify the classifier rules cover `0..total` once each, all sized `total`
    pub fn assert_partition(&self, total: u64) -> VerifyResult<()> {
        let rules = self.classifier_rules()?;
        if rules.len() != total as usize {
            return Err(VerificationError::RuleCountMismatch {
                expected: total as usize,
                actual: rules.len(),
            });
        }

        for (index, (rule, expected)) in rules.iter().zip(0u64..).enumerate() {
            if rule.total != total {
                return Err(VerificationError::PartitionSizeMismatch {
                    index,
                    expected: total,
                    actual: rule.total,
                });
            }
            if rule.offset != expected {
                return Err(VerificationError::OffsetMismatch {
                    index,
                    expected,
                    actual: rule.offset,
                });
            }
        }
        Ok(())
    }

    /// Verify no statement references a created table before its creation
    pub fn assert_tables_precede_use(&self) -> VerifyResult<()> {
        let statements: Vec<&str> = self.script.statements().collect();

        for (created_at, statement) in statements.iter().enumerate() {
            let table = match TABLE_CREATE_RE.captures(statement) {
                Some(caps) => caps[1].to_string(),
                None => continue,
            };
            let references = [
                format!("routing-table={}", table),
                format!("new-routing-mark={}", table),
            ];

            if let Some(index) = statements[..created_at]
                .iter()
                .position(|s| references.iter().any(|r| has_token(s, r)))
            {
                return Err(VerificationError::TableUsedBeforeCreation { index, table });
            }
        }
        Ok(())
    }

    /// Statements of one kind belonging to `link`
    pub fn link_statements(&self, link: &str, kind: &str) -> Vec<&'a str> {
        let name = |key: &str| format!("{}={}", key, link);
        let script: &'a ConfigScript = self.script;

        script
            .statements()
            .filter(|s| match kind {
                "connection-mark" => {
                    has_token(s, "action=mark-connection")
                        && s.split_whitespace().any(|t| t.starts_with("in-interface="))
                        && has_token(s, &name("new-connection-mark"))
                }
                "output-routing-mark" => {
                    has_token(s, "chain=output") && has_token(s, &name("new-routing-mark"))
                }
                "link-table-route" => {
                    s.starts_with("/ip route add check-gateway=ping")
                        && has_token(s, &name("routing-table"))
                }
                "main-table-route" => {
                    s.starts_with("/ip route add check-gateway=ping")
                        && has_token(s, &name("comment"))
                        && has_token(s, "routing-table=main")
                }
                "host-route" => {
                    s.starts_with("/ip route add disabled=")
                        && has_token(s, &name("routing-table"))
                }
                "netwatch" => {
                    s.starts_with("/tool netwatch add")
                        && s.contains(&format!("[find comment=\\\"{}\\\"]", link))
                }
                _ => false,
            })
            .collect()
    }

    fn single_statement(&self, link: &str, kind: &'static str) -> VerifyResult<&'a str> {
        let found = self.link_statements(link, kind);
        match found.as_slice() {
            [statement] => Ok(*statement),
            _ => Err(VerificationError::StatementCountMismatch {
                link: link.to_string(),
                kind,
                actual: found.len(),
            }),
        }
    }

    /// Verify `link`'s statements carry the disabled state for `active`;
    /// the probe host route must always be enabled
    pub fn assert_link_disabled_state(&self, link: &str, active: bool) -> VerifyResult<()> {
        let expected = if active { "disabled=no" } else { "disabled=yes" };

        for kind in MIRRORED_KINDS {
            let statement = self.single_statement(link, kind)?;
            if !has_token(statement, expected) {
                return Err(VerificationError::DisabledStateMismatch {
                    link: link.to_string(),
                    kind,
                    expected,
                    statement: statement.to_string(),
                });
            }
        }

        let host_route = self.single_statement(link, "host-route")?;
        if !has_token(host_route, "disabled=no") {
            return Err(VerificationError::DisabledStateMismatch {
                link: link.to_string(),
                kind: "host-route",
                expected: "disabled=no",
                statement: host_route.to_string(),
            });
        }
        Ok(())
    }
}
