/// runs the PubChem pipelines against the live service
pub mod pubchem_examples;
