use crate::PubChem::compound_table::CompoundTable;
use crate::PubChem::http_client::HttpClient;
use crate::PubChem::property_lookup::fetch_compound_table;
use crate::PubChem::pubchem_api::PubChemFetcher;
use crate::PubChem::pubchem_errors::PubChemError;
use log::info;
use serde::Deserialize;
use url::Url;

/// body of `.../fastsimilarity_2d/smiles/<smiles>/cids/JSON`
#[derive(Debug, Deserialize)]
struct CidListResponse {
    #[serde(rename = "IdentifierList")]
    identifier_list: IdentifierList,
}

#[derive(Debug, Deserialize)]
struct IdentifierList {
    #[serde(rename = "CID")]
    cid: Vec<u64>,
}

impl<C: HttpClient> PubChemFetcher<C> {
    /// Compounds whose 2D fingerprint similarity to `smiles` is at least `threshold` percent.
    ///
    /// `max_records` caps the number of CIDs taken from the similarity search.
    pub fn get_structural_similar(
        &self,
        smiles: &str,
        threshold: u8,
        max_records: Option<usize>,
    ) -> Result<CompoundTable, PubChemError> {
        let url = self.construct_similarity_url(smiles, threshold, max_records)?;
        info!("similarity search: {}", url);
        let mut cids = self.lookup_similar_cids(&url)?;
        if let Some(max_records) = max_records {
            cids.truncate(max_records);
        }
        info!("{} CIDs similar to {} at {}%", cids.len(), smiles, threshold);
        fetch_compound_table(&self.client, &self.settings, &cids)
    }

    pub fn construct_similarity_url(
        &self,
        smiles: &str,
        threshold: u8,
        max_records: Option<usize>,
    ) -> Result<Url, PubChemError> {
        let smiles = smiles.trim();
        if smiles.is_empty() {
            return Err(PubChemError::invalid_input(smiles, "empty structure string"));
        }
        if threshold > 100 {
            return Err(PubChemError::invalid_input(
                threshold,
                "similarity threshold must lie between 0 and 100",
            ));
        }
        let mut url = Url::parse(&format!(
            "{}/",
            self.settings.rest_base.trim_end_matches('/')
        ))?;
        // the SMILES is one path segment, so '/' and '#' in it are percent-encoded
        url.path_segments_mut()
            .map_err(|_| PubChemError::UrlError(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["compound", "fastsimilarity_2d", "smiles", smiles, "cids", "JSON"]);
        url.query_pairs_mut()
            .append_pair("Threshold", &threshold.to_string());
        if let Some(max_records) = max_records {
            url.query_pairs_mut()
                .append_pair("MaxRecords", &max_records.to_string());
        }
        Ok(url)
    }

    fn lookup_similar_cids(&self, url: &Url) -> Result<Vec<u64>, PubChemError> {
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
        let response: CidListResponse = serde_json::from_str(&reply.body).map_err(|e| {
            PubChemError::request(url.as_str(), format!("no IdentifierList.CID: {}", e))
        })?;
        Ok(response.identifier_list.cid)
    }
}
