//! # SMILES Standardization Module
//!
//! ## Aim
//! Asks PubChem to standardize a SMILES string through the PUG XML gateway. The gateway
//! works asynchronously: the structure is submitted as a job, PubChem answers with a request id,
//! and the job is polled with that id until the standardized structure shows up.
//!
//! ## Job States
//! ```text
//! Submitted ──> Polling ──> Succeeded   structure found
//!                  │  └───> Failed      poll HTTP error, unreadable answer, status != "success"
//!                  └──────> Exhausted   max_retry polls without a structure
//! ```
//! Each poll without a structure costs one unit of `max_retry` and is followed by a pause of
//! `poll_interval_ms`. `Failed` and `Exhausted` are soft outcomes: `standardize_smiles` returns
//! the input string unchanged and logs a warning. Only an invalid input or a failed submission
//! are reported as errors.
//!
//! ## Usage
//! ```rust, ignore
//! let fetcher = PubChemFetcher::new()?;
//! let smiles = fetcher.standardize_smiles("C1=CC=CC=C1O", 10)?;
//! ```

use crate::PubChem::http_client::HttpClient;
use crate::PubChem::pubchem_api::PubChemFetcher;
use crate::PubChem::pubchem_errors::PubChemError;
use crate::PubChem::pug_xml::parse_pug_response;
use crate::PubChem::smiles_syntax::validate_smiles;
use log::{debug, info, warn};
use std::fmt;
use std::thread;

/// request id issued by the PUG gateway for one submitted job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    Submitted(JobHandle),
    /// `attempt` polls already made
    Polling { handle: JobHandle, attempt: usize },
    Succeeded(String),
    Failed(String),
    Exhausted,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Succeeded(_) | JobState::Failed(_) | JobState::Exhausted
        )
    }
}

impl<C: HttpClient> PubChemFetcher<C> {
    /// Standardized form of `smiles` as computed by PubChem.
    ///
    /// Falls back to the input, unchanged, when the job fails while polling or when
    /// `max_retry` polls bring no structure. Such a fallback looks exactly like a
    /// successful standardization that left the structure as it was.
    pub fn standardize_smiles(&self, smiles: &str, max_retry: usize) -> Result<String, PubChemError> {
        match self.run_standardization_job(smiles, max_retry)? {
            JobState::Succeeded(structure) => {
                info!("{} standardized to {}", smiles, structure);
                Ok(structure)
            }
            JobState::Failed(reason) => {
                warn!("standardization of {} failed: {}; input kept", smiles, reason);
                Ok(smiles.to_string())
            }
            JobState::Exhausted => {
                warn!(
                    "standardization of {} gave no structure after {} polls; input kept",
                    smiles, max_retry
                );
                Ok(smiles.to_string())
            }
            state @ (JobState::Submitted(_) | JobState::Polling { .. }) => {
                warn!(
                    "standardization of {} stopped in state {:?}; input kept",
                    smiles, state
                );
                Ok(smiles.to_string())
            }
        }
    }

    /// Drives the job until it reaches a terminal state.
    pub(crate) fn run_standardization_job(
        &self,
        smiles: &str,
        max_retry: usize,
    ) -> Result<JobState, PubChemError> {
        validate_smiles(smiles).map_err(|e| PubChemError::invalid_input(smiles, e))?;
        let handle = self.submit_standardization(smiles.trim())?;
        let mut state = JobState::Submitted(handle);
        while !state.is_terminal() {
            debug!("job state: {:?}", state);
            state = match state {
                JobState::Submitted(handle) => JobState::Polling { handle, attempt: 0 },
                JobState::Polling { handle, attempt } => self.poll_step(handle, attempt, max_retry),
                terminal => terminal,
            };
        }
        debug!("job finished: {:?}", state);
        Ok(state)
    }

    fn submit_standardization(&self, smiles: &str) -> Result<JobHandle, PubChemError> {
        let body = self.settings.templates.render_submit(smiles);
        let reply = self
            .client
            .post_xml(&self.settings.pug_gateway_url, &body)
            .map_err(|e| PubChemError::Submission(format!("network error: {}", e)))?;
        if !reply.is_success() {
            return Err(PubChemError::Submission(format!(
                "HTTP status {}",
                reply.status
            )));
        }
        let response = parse_pug_response(&reply.body)
            .map_err(|e| PubChemError::Submission(format!("unreadable answer: {}", e)))?;
        let handle = response
            .reqid
            .map(JobHandle)
            .ok_or_else(|| PubChemError::Submission("no PCT-Waiting_reqid in answer".to_string()))?;
        info!("standardization job {} submitted for {}", handle, smiles);
        Ok(handle)
    }

    fn poll_step(&self, handle: JobHandle, attempt: usize, max_retry: usize) -> JobState {
        if attempt >= max_retry {
            return JobState::Exhausted;
        }
        let body = self.settings.templates.render_poll(handle.as_str());
        let reply = match self.client.post_xml(&self.settings.pug_gateway_url, &body) {
            Ok(reply) => reply,
            Err(e) => return JobState::Failed(format!("network error: {}", e)),
        };
        if !reply.is_success() {
            return JobState::Failed(format!("HTTP status {}", reply.status));
        }
        let response = match parse_pug_response(&reply.body) {
            Ok(response) => response,
            Err(e) => return JobState::Failed(format!("unreadable answer: {}", e)),
        };
        if !response.is_success() {
            return JobState::Failed(format!(
                "job status '{}'",
                response.status.as_deref().unwrap_or("missing")
            ));
        }
        match response.structure {
            Some(structure) => JobState::Succeeded(structure),
            None => {
                if attempt + 1 < max_retry {
                    thread::sleep(self.settings.poll_interval());
                }
                JobState::Polling {
                    handle,
                    attempt: attempt + 1,
                }
            }
        }
    }
}
