#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod PubChem;
#[allow(non_snake_case)]
pub mod Utils;

pub use PubChem::compound_table::{CompoundRecord, CompoundTable, UnresolvedBatch};
pub use PubChem::pubchem_api::PubChemFetcher;
pub use PubChem::pubchem_errors::PubChemError;
pub use PubChem::pubchem_settings::PubChemSettings;
