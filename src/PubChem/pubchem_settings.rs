//! # PubChem Settings Module
//!
//! ## Purpose
//! Holds every value the pipelines need from the outside world: service endpoints,
//! the CID batch size, timeouts, the poll interval and the two PUG XML request templates.
//! A settings value is immutable once handed to `PubChemFetcher`, so every call site
//! receives the same endpoints and templates.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "rest_base": "https://pubchem.ncbi.nlm.nih.gov/rest/pug",
//!   "esearch_url": "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi",
//!   "pug_gateway_url": "https://pubchem.ncbi.nlm.nih.gov/pug/pug.cgi",
//!   "batch_size": 100,
//!   "esearch_retmax": 100000,
//!   "request_timeout_secs": 300,
//!   "poll_interval_ms": 1000,
//!   "templates": { "submit": "...", "poll": "..." }
//! }
//! ```
//! Missing keys fall back to the defaults.
//!
//! ## Templates
//! The submit and poll documents are PubChem's wire contract. Their text (XML declaration,
//! DOCTYPE, indentation, tag names) is sent as is; the only change made at runtime is the
//! substitution of `{query}` (submit) and `{job_handle}` (poll).

use crate::PubChem::pubchem_errors::PubChemError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const QUERY_PLACEHOLDER: &str = "{query}";
pub const JOB_HANDLE_PLACEHOLDER: &str = "{job_handle}";

pub const DEFAULT_REST_BASE: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
pub const DEFAULT_ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
pub const DEFAULT_PUG_GATEWAY_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/pug/pug.cgi";

/// PUG XML standardization request, `{query}` is replaced by the SMILES
pub const STANDARDIZE_SUBMIT_TEMPLATE: &str = r#"<?xml version="1.0"?>
<!DOCTYPE PCT-Data PUBLIC "-//NCBI//NCBI PCTools/EN" "http://pubchem.ncbi.nlm.nih.gov/pug/pug.dtd">
<PCT-Data>
  <PCT-Data_input>
    <PCT-InputData>
      <PCT-InputData_standardize>
        <PCT-Standardize>
          <PCT-Standardize_structure>
            <PCT-Structure>
              <PCT-Structure_structure>
                <PCT-Structure_structure_string>{query}</PCT-Structure_structure_string>
              </PCT-Structure_structure>
              <PCT-Structure_format>
                <PCT-StructureFormat value="smiles"/>
              </PCT-Structure_format>
            </PCT-Structure>
          </PCT-Standardize_structure>
          <PCT-Standardize_oformat>
            <PCT-StructureFormat value="smiles"/>
          </PCT-Standardize_oformat>
        </PCT-Standardize>
      </PCT-InputData_standardize>
    </PCT-InputData>
  </PCT-Data_input>
</PCT-Data>
"#;

/// PUG XML status request, `{job_handle}` is replaced by the request id
pub const STANDARDIZE_POLL_TEMPLATE: &str = r#"<?xml version="1.0"?>
<!DOCTYPE PCT-Data PUBLIC "-//NCBI//NCBI PCTools/EN" "http://pubchem.ncbi.nlm.nih.gov/pug/pug.dtd">
<PCT-Data>
  <PCT-Data_input>
    <PCT-InputData>
      <PCT-InputData_request>
        <PCT-Request>
          <PCT-Request_reqid>{job_handle}</PCT-Request_reqid>
          <PCT-Request_type value="status"/>
        </PCT-Request>
      </PCT-InputData_request>
    </PCT-InputData>
  </PCT-Data_input>
</PCT-Data>
"#;

/// The two request documents of the standardization job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PugTemplates {
    pub submit: String,
    pub poll: String,
}

impl Default for PugTemplates {
    fn default() -> Self {
        Self {
            submit: STANDARDIZE_SUBMIT_TEMPLATE.to_string(),
            poll: STANDARDIZE_POLL_TEMPLATE.to_string(),
        }
    }
}

impl PugTemplates {
    /// submit document with the structure string substituted
    pub fn render_submit(&self, query: &str) -> String {
        self.submit.replacen(QUERY_PLACEHOLDER, query, 1)
    }
    /// poll document with the request id substituted
    pub fn render_poll(&self, job_handle: &str) -> String {
        self.poll.replacen(JOB_HANDLE_PLACEHOLDER, job_handle, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PubChemSettings {
    /// PUG REST base, no trailing slash
    pub rest_base: String,
    pub esearch_url: String,
    pub pug_gateway_url: String,
    /// number of CIDs resolved per property call
    pub batch_size: usize,
    pub esearch_retmax: usize,
    pub request_timeout_secs: u64,
    /// pause between two status polls of a PUG job
    pub poll_interval_ms: u64,
    pub templates: PugTemplates,
}

impl Default for PubChemSettings {
    fn default() -> Self {
        Self {
            rest_base: DEFAULT_REST_BASE.to_string(),
            esearch_url: DEFAULT_ESEARCH_URL.to_string(),
            pug_gateway_url: DEFAULT_PUG_GATEWAY_URL.to_string(),
            batch_size: 100,
            esearch_retmax: 100_000,
            request_timeout_secs: 300,
            poll_interval_ms: 1000,
            templates: PugTemplates::default(),
        }
    }
}

impl PubChemSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Checks values that would make a pipeline misbehave instead of failing loudly.
    pub fn validate(&self) -> Result<(), PubChemError> {
        if self.batch_size == 0 {
            return Err(PubChemError::Settings(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        if !self.templates.submit.contains(QUERY_PLACEHOLDER) {
            return Err(PubChemError::Settings(format!(
                "submit template lacks the {} placeholder",
                QUERY_PLACEHOLDER
            )));
        }
        if !self.templates.poll.contains(JOB_HANDLE_PLACEHOLDER) {
            return Err(PubChemError::Settings(format!(
                "poll template lacks the {} placeholder",
                JOB_HANDLE_PLACEHOLDER
            )));
        }
        for endpoint in [&self.rest_base, &self.esearch_url, &self.pug_gateway_url] {
            url::Url::parse(endpoint)?;
        }
        Ok(())
    }

    /// Loads settings from a JSON file; keys absent from the file keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PubChemError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PubChemError::Settings(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let settings: PubChemSettings = serde_json::from_str(&content)?;
        settings.validate()?;
        info!("PubChem settings loaded from '{}'", path.display());
        Ok(settings)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PubChemError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            PubChemError::Settings(format!("Failed to write '{}': {}", path.display(), e))
        })
    }
}
