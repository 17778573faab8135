//! # PubChem API Module
//!
//! ## Aim
//! Single entry point to the three PubChem pipelines:
//! - `get_structural_similar()`: compounds similar to a SMILES (similarity_search.rs)
//! - `get_compounds_by_mass()`: compounds inside a monoisotopic mass window (mass_search.rs)
//! - `standardize_smiles()`: SMILES standardized by a PUG XML job (standardize.rs)
//!
//! `PubChemFetcher<C>` is generic over the HTTP client so tests can inject a mock.
//! It owns nothing but the client and an immutable copy of the settings; every call
//! builds its own table or job handle.
//!
//! ## Usage
//! ```rust, ignore
//! let fetcher = PubChemFetcher::new()?;
//! let table = fetcher.get_compounds_by_mass(150.0, 0.5)?;
//! table.pretty_print();
//! let standardized = fetcher.standardize_smiles("C1=CC=CC=C1O", 10)?;
//! ```

use crate::PubChem::http_client::{HttpClient, build_client};
use crate::PubChem::pubchem_errors::PubChemError;
use crate::PubChem::pubchem_settings::PubChemSettings;
use reqwest::blocking::Client;

pub struct PubChemFetcher<C: HttpClient> {
    pub(crate) client: C,
    pub(crate) settings: PubChemSettings,
}

impl PubChemFetcher<Client> {
    pub fn new() -> Result<Self, PubChemError> {
        Self::from_settings(PubChemSettings::default())
    }

    pub fn from_settings(settings: PubChemSettings) -> Result<Self, PubChemError> {
        settings.validate()?;
        let client = build_client(settings.request_timeout())?;
        Ok(Self { client, settings })
    }
}

impl<C: HttpClient> PubChemFetcher<C> {
    pub fn with_client(client: C) -> Self {
        Self {
            client,
            settings: PubChemSettings::default(),
        }
    }

    pub fn with_client_and_settings(
        client: C,
        settings: PubChemSettings,
    ) -> Result<Self, PubChemError> {
        settings.validate()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &PubChemSettings {
        &self.settings
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}
