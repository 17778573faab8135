use crate::PubChem::compound_table::{CompoundProperties, CompoundTable, PropertyResponse};
use crate::PubChem::http_client::HttpClient;
use crate::PubChem::pubchem_errors::PubChemError;
use crate::PubChem::pubchem_settings::PubChemSettings;
use log::{debug, info, warn};
use std::collections::HashSet;
use url::Url;

/// Splits CIDs into consecutive batches of `batch_size`; the last one may be shorter.
pub fn cid_batches(cids: &[u64], batch_size: usize) -> std::slice::Chunks<'_, u64> {
    cids.chunks(batch_size.max(1))
}

pub fn construct_property_url(rest_base: &str, batch: &[u64]) -> Result<Url, PubChemError> {
    let ids = batch
        .iter()
        .map(|cid| cid.to_string())
        .collect::<Vec<_>>()
        .join(",");
    Ok(Url::parse(&format!(
        "{}/compound/cid/{}/property/InChIKey,CanonicalSMILES/JSON",
        rest_base.trim_end_matches('/'),
        ids
    ))?)
}

/// One property call. Any failure is reported as `MalformedResponse` so the caller can
/// park the whole batch as unresolved.
pub fn fetch_properties<C: HttpClient>(
    client: &C,
    url: &Url,
) -> Result<Vec<CompoundProperties>, PubChemError> {
    let reply = client
        .get_text(url.as_str())
        .map_err(|e| PubChemError::MalformedResponse(format!("network error: {}", e)))?;
    if !reply.is_success() {
        return Err(PubChemError::MalformedResponse(format!(
            "HTTP status {}",
            reply.status
        )));
    }
    let response: PropertyResponse = serde_json::from_str(&reply.body).map_err(|e| {
        PubChemError::MalformedResponse(format!("no PropertyTable.Properties: {}", e))
    })?;
    Ok(response.property_table.properties)
}

/// Resolves CIDs into a table deduplicated by canonical SMILES.
///
/// Batches are fetched strictly one after another. A batch whose call fails or whose
/// body lacks `PropertyTable.Properties` is not retried: its CIDs go to `unresolved`,
/// as do CIDs that the service silently left out of an otherwise valid answer.
pub fn fetch_compound_table<C: HttpClient>(
    client: &C,
    settings: &PubChemSettings,
    cids: &[u64],
) -> Result<CompoundTable, PubChemError> {
    let mut table = CompoundTable::new();
    let n_batches = cids.len().div_ceil(settings.batch_size.max(1));
    for (i, batch) in cid_batches(cids, settings.batch_size).enumerate() {
        let url = construct_property_url(&settings.rest_base, batch)?;
        debug!("batch {}/{}: {} CIDs", i + 1, n_batches, batch.len());
        match fetch_properties(client, &url) {
            Ok(properties) => {
                let returned: HashSet<u64> = properties.iter().map(|p| p.cid).collect();
                table.merge_properties(&properties);
                let missing: Vec<u64> = batch
                    .iter()
                    .copied()
                    .filter(|cid| !returned.contains(cid))
                    .collect();
                if !missing.is_empty() {
                    warn!(
                        "batch {}/{}: {} CIDs absent from property response",
                        i + 1,
                        n_batches,
                        missing.len()
                    );
                    table.add_unresolved(missing, "absent from property response");
                }
            }
            Err(e) => {
                warn!("batch {}/{} aborted: {}", i + 1, n_batches, e);
                table.add_unresolved(batch.to_vec(), &e.to_string());
            }
        }
    }
    info!(
        "{} CIDs reduced to {} unique structures, {} unresolved",
        cids.len(),
        table.len(),
        table.unresolved_cids().len()
    );
    Ok(table)
}
