/// error types shared by all PubChem pipelines
pub mod pubchem_errors;
/// endpoints, batch size, timeouts and PUG XML request templates
pub mod pubchem_settings;
/// HTTP client trait for dependency injection and its reqwest implementation
pub mod http_client;
/// compound records and the table deduplicated by canonical SMILES
pub mod compound_table;
/// batched lookup of InChIKey and canonical SMILES for a list of CIDs
pub mod property_lookup;
/// entry point struct owning the client and settings
pub mod pubchem_api;
/// eng
/// Search of compounds structurally similar to a given SMILES (PubChem fastsimilarity_2d).
/// The search returns a list of CIDs, which are then resolved batch by batch into
/// a table of unique canonical SMILES with all CIDs sharing the same structure
pub mod similarity_search;
/// eng
/// Search of compounds by monoisotopic mass window [mass - tol, mass + tol] through
/// the Entrez esearch service; results are reduced the same way as the similarity search
pub mod mass_search;
/// Standardization of SMILES through the asynchronous PUG XML gateway: submit a job,
/// then poll it until the standardized structure is ready
pub mod standardize;
/// rendering of PUG XML requests and streaming parsing of PUG XML responses
pub mod pug_xml;
/// syntactic check of SMILES strings
pub mod smiles_syntax;

#[cfg(test)]
pub mod mock_client;
mod search_tests;
