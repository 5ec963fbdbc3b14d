//! Optional YAML defaults for the CLI.
//!
//! ```yaml
//! base_url: https://example.org/wcs
//! subset_crs: http://www.opengis.net/def/crs/EPSG/0/4326
//! format: image/tiff
//! extra_params:
//!   map: /data/eo.map
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use wcs_common::ExtraParams;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Service endpoint used when `--url` is not given.
    pub base_url: Option<String>,
    /// CRS for spatial subsets when `--subset-crs` is not given.
    pub subset_crs: Option<String>,
    /// GetCoverage output format when `--format` is not given.
    pub format: Option<String>,
    /// Vendor parameters appended to every request, before `--extra` ones.
    pub extra_params: BTreeMap<String, String>,
}

impl CliConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read CLI config from {:?}", path))?;
        let config: CliConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse CLI config from {:?}", path))?;
        debug!(path = ?path, "Loaded CLI config");
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Pick the explicit URL, falling back to `base_url`. Empty when
    /// neither is set, which the builders reject.
    pub fn url(&self, explicit: Option<&str>) -> String {
        explicit
            .or(self.base_url.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    /// Configured extras followed by the command line ones.
    pub fn extra_params(&self, cli: &[(String, String)]) -> ExtraParams {
        self.extra_params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .chain(cli.iter().cloned())
            .collect()
    }
}
