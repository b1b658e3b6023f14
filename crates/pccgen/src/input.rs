//! Link descriptor file parser
//!
//! File format (YAML shown, JSON uses the same keys):
//! ```yaml
//! links:
//!   - name: LINK1
//!     interface: ether2-LINK1
//!     gateway: 192.168.18.1
//!     test_address: 8.8.8.8
//!     active: yes
//!     link_table_distance: 1
//!     main_table_distance: 1
//!     speed_mbps: 1000
//!   - name: LINK2
//!     interface: pppoe-out1
//!     gateway: 10.0.0.1
//!     test_address: 1.1.1.1
//!     active: false
//!     main_table_distance: 2
//!     vrf_interface: vrf-wan
//!     speed_mbps: "600"
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use pccgen_common::{GenError, GenResult};
use serde::Deserialize;
use tracing::{info, warn};

use crate::source::LinkSource;
use crate::types::{
    parse_active, parse_optional, parse_speed, LinkDescriptor, DEFAULT_DISTANCE, DEFAULT_SPEED_MBPS,
};

/// Link file encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// `.json` files are JSON, anything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Yaml,
        }
    }
}

/// Number-or-text value, as written in the file
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(v) => write!(f, "{}", v.trim()),
        }
    }
}

/// `true`/`false` or the interactive `yes`/`no` spelling
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ActiveFlag {
    Bool(bool),
    Text(String),
}

impl ActiveFlag {
    fn is_active(&self) -> bool {
        match self {
            ActiveFlag::Bool(b) => *b,
            ActiveFlag::Text(s) => parse_active(s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinkFile {
    #[serde(default)]
    links: Vec<LinkRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinkRecord {
    name: String,
    interface: String,
    gateway: String,
    test_address: String,
    #[serde(default)]
    active: Option<ActiveFlag>,
    #[serde(default)]
    link_table_distance: Option<Scalar>,
    #[serde(default)]
    main_table_distance: Option<Scalar>,
    #[serde(default)]
    vrf_interface: Option<String>,
    #[serde(default)]
    speed_mbps: Option<Scalar>,
}

impl LinkRecord {
    fn into_descriptor(self) -> LinkDescriptor {
        let speed_mbps = match &self.speed_mbps {
            None => DEFAULT_SPEED_MBPS,
            Some(Scalar::Int(v)) => *v as f64,
            Some(Scalar::Float(v)) if v.is_finite() => *v,
            Some(other) => parse_speed(&other.to_string()).unwrap_or_else(|| {
                warn!(link = %self.name, value = %other, "Invalid speed, using default");
                DEFAULT_SPEED_MBPS
            }),
        };

        let distance = |value: Option<Scalar>| {
            value
                .map(|v| v.to_string())
                .unwrap_or_else(|| DEFAULT_DISTANCE.to_string())
        };

        LinkDescriptor {
            active: self.active.as_ref().map_or(true, ActiveFlag::is_active),
            link_table_distance: distance(self.link_table_distance),
            main_table_distance: distance(self.main_table_distance),
            vrf_interface: self.vrf_interface.as_deref().and_then(parse_optional),
            speed_mbps,
            name: self.name,
            interface: self.interface,
            gateway: self.gateway,
            test_address: self.test_address,
        }
    }
}

/// Parse link descriptors from a reader
pub fn parse_links<R: Read>(
    reader: R,
    format: InputFormat,
    path: &Path,
) -> GenResult<Vec<LinkDescriptor>> {
    let parsed: LinkFile = match format {
        InputFormat::Json => serde_json::from_reader::<_, LinkFile>(reader).map_err(|e| e.to_string()),
        InputFormat::Yaml => serde_yaml::from_reader::<_, LinkFile>(reader).map_err(|e| e.to_string()),
    }
    .map_err(|message| GenError::InputFormat {
        path: path.to_path_buf(),
        message,
    })?;

    Ok(parsed
        .links
        .into_iter()
        .map(LinkRecord::into_descriptor)
        .collect())
}

/// Link source backed by a YAML or JSON file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LinkSource for FileSource {
    fn collect_links(&mut self) -> GenResult<Vec<LinkDescriptor>> {
        let file = File::open(&self.path).map_err(|source| GenError::InputFile {
            path: self.path.clone(),
            source,
        })?;

        let format = InputFormat::from_path(&self.path);
        let links = parse_links(BufReader::new(file), format, &self.path)?;
        info!(path = %self.path.display(), ?format, links = links.len(), "Loaded link file");
        Ok(links)
    }
}
