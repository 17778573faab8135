use crate::PubChem::compound_table::CompoundTable;
use crate::PubChem::http_client::HttpClient;
use crate::PubChem::property_lookup::fetch_compound_table;
use crate::PubChem::pubchem_api::PubChemFetcher;
use crate::PubChem::pubchem_errors::PubChemError;
use log::info;
use serde::Deserialize;
use url::Url;

/// body of esearch.fcgi with retmode=json
#[derive(Debug, Deserialize)]
struct EsearchResponse {
    esearchresult: EsearchResult,
}

#[derive(Debug, Deserialize)]
struct EsearchResult {
    idlist: Vec<String>,
}

impl<C: HttpClient> PubChemFetcher<C> {
    /// Compounds with monoisotopic mass in [mass - tol, mass + tol].
    pub fn get_compounds_by_mass(&self, mass: f64, tol: f64) -> Result<CompoundTable, PubChemError> {
        let url = self.construct_mass_url(mass, tol)?;
        info!("mass search: {}", url);
        let cids = self.lookup_cids_by_mass(&url)?;
        info!("{} CIDs with mass {} ± {}", cids.len(), mass, tol);
        fetch_compound_table(&self.client, &self.settings, &cids)
    }

    pub fn construct_mass_url(&self, mass: f64, tol: f64) -> Result<Url, PubChemError> {
        if !mass.is_finite() {
            return Err(PubChemError::invalid_input(mass, "mass must be a finite number"));
        }
        if !tol.is_finite() || tol < 0.0 {
            return Err(PubChemError::invalid_input(
                tol,
                "tolerance must be a finite non-negative number",
            ));
        }
        let (min_mass, max_mass) = mass_window(mass, tol);
        let term = format!("{}[MIMass]:{}[MIMass]", min_mass, max_mass);
        let retmax = self.settings.esearch_retmax.to_string();
        Ok(Url::parse_with_params(
            &self.settings.esearch_url,
            &[
                ("db", "pccompound"),
                ("term", term.as_str()),
                ("retmode", "json"),
                ("retmax", retmax.as_str()),
            ],
        )?)
    }

    fn lookup_cids_by_mass(&self, url: &Url) -> Result<Vec<u64>, PubChemError> {
        let reply = self
            .client
            .get_text(url.as_str())
            .map_err(|e| PubChemError::request(url.as_str(), e))?;
        if !reply.is_success() {
            return Err(PubChemError::request(
                url.as_str(),
                format!("HTTP status {}", reply.status),
            ));
        }
        let response: EsearchResponse = serde_json::from_str(&reply.body).map_err(|e| {
            PubChemError::request(url.as_str(), format!("no esearchresult.idlist: {}", e))
        })?;
        response
            .esearchresult
            .idlist
            .iter()
            .map(|id| {
                id.trim().parse::<u64>().map_err(|_| {
                    PubChemError::request(url.as_str(), format!("non-numeric id '{}'", id))
                })
            })
            .collect()
    }
}

/// bounds of the mass search window
pub fn mass_window(mass: f64, tol: f64) -> (f64, f64) {
    (mass - tol, mass + tol)
}
