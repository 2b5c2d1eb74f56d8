//! Domain reliability dataset (Media Bias/Fact Check export).
//!
//! Every listed domain is a *known unreliable* source. The dataset is loaded
//! once at startup and read-only afterwards.
//!
//! # CSV layout
//!
//! | column                  | field       |
//! |-------------------------|-------------|
//! | `Domain`                | lookup key  |
//! | `Name`                  | outlet name |
//! | `MBFC Fact`             | fact rating |
//! | `MBFC Bias`             | bias rating |
//! | `Media Bias/Fact Check` | review URL  |
//!
//! Domains are lower-cased on load. Rows without a domain are dropped and the
//! first row for a domain wins, across files as well as within one.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::DatasetError;

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

/// One row of the dataset. Serializes with the dataset's column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainRecord {
    #[serde(skip)]
    pub domain: String,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "MBFC Fact")]
    pub mbfc_fact: Option<String>,
    #[serde(rename = "MBFC Bias")]
    pub mbfc_bias: Option<String>,
    #[serde(rename = "Media Bias/Fact Check")]
    pub review_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DomainRow {
    #[serde(rename = "Domain", default)]
    domain: Option<String>,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "MBFC Fact", default)]
    mbfc_fact: Option<String>,
    #[serde(rename = "MBFC Bias", default)]
    mbfc_bias: Option<String>,
    #[serde(rename = "Media Bias/Fact Check", default)]
    review_url: Option<String>,
}

impl DomainRow {
    fn into_record(self) -> Option<DomainRecord> {
        let domain = self.domain?.trim().to_lowercase();
        if domain.is_empty() {
            return None;
        }
        Some(DomainRecord {
            domain,
            name: self.name,
            mbfc_fact: self.mbfc_fact,
            mbfc_bias: self.mbfc_bias,
            review_url: self.review_url,
        })
    }
}

/// Host of `url`, lower-cased, without a leading `www.`.
///
/// Returns `None` when the URL does not parse or has no host.
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let domain = host.strip_prefix("www.").unwrap_or(&host);
    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReliabilityDataset {
    records: HashMap<String, DomainRecord>,
}

impl ReliabilityDataset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads every file in `paths`, skipping (with a warning) files that do not exist.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, DatasetError> {
        let mut dataset = Self::default();

        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                warn!(path = %path.display(), "Dataset file not found; skipping");
                continue;
            }
            let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let added = dataset.extend_from_reader(file, path)?;
            info!(path = %path.display(), added, "Loaded dataset file");
        }

        info!(domains = dataset.len(), "Reliability dataset ready");
        Ok(dataset)
    }

    /// Parses CSV from any reader; `origin` only labels errors.
    pub fn from_reader<R: Read>(reader: R, origin: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let mut dataset = Self::default();
        let origin = origin.into();
        dataset.extend_from_reader(reader, &origin)?;
        Ok(dataset)
    }

    fn extend_from_reader<R: Read>(&mut self, reader: R, origin: &Path) -> Result<usize, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(|source| DatasetError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;
        if !headers.iter().any(|h| h == "Domain") {
            return Err(DatasetError::MissingDomainColumn {
                path: origin.to_path_buf(),
            });
        }

        let mut added = 0;
        for (line, row) in csv_reader.deserialize::<DomainRow>().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!(path = %origin.display(), row = line + 1, error = %e, "Skipping malformed row");
                    continue;
                }
            };
            let Some(record) = row.into_record() else {
                continue;
            };
            if !self.records.contains_key(&record.domain) {
                self.records.insert(record.domain.clone(), record);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Case-insensitive lookup; a leading `www.` is ignored.
    pub fn lookup(&self, domain: &str) -> Option<&DomainRecord> {
        let domain = domain.trim().to_lowercase();
        let domain = domain.strip_prefix("www.").unwrap_or(&domain);
        self.records.get(domain)
    }

    pub fn is_listed(&self, domain: &str) -> bool {
        self.lookup(domain).is_some()
    }

    /// 0.0 for a listed (known unreliable) domain, 1.0 otherwise.
    pub fn source_reliability(&self, domain: &str) -> f64 {
        if self.is_listed(domain) { 0.0 } else { 1.0 }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
