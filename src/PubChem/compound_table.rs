//! # Compound Table Module
//!
//! ## Aim
//! Result table shared by the similarity and the mass pipelines. PubChem hands out many CIDs
//! for one and the same canonical SMILES (salts, isotopologues stripped by the canonicalizer,
//! deposited duplicates), so the table is keyed by SMILES and every record collects all CIDs
//! mapping to it.
//!
//! ## Main Data Structures and Logic
//! - `CompoundProperties`: one object of the `PropertyTable.Properties` array of PUG REST
//! - `CompoundRecord`: unique SMILES, its InChIKey and the CIDs sharing that SMILES
//! - `CompoundTable`: records in order of first appearance plus the CIDs that could not be resolved
//! - merge rule: the first occurrence of a SMILES fixes the position of the record and its InChIKey,
//!   later occurrences only append their CID
//!
//! ## Usage
//! ```rust, ignore
//! let mut table = CompoundTable::new();
//! table.merge_properties(properties);
//! table.pretty_print();
//! ```

use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// one entry of `PropertyTable.Properties`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundProperties {
    #[serde(rename = "CID")]
    pub cid: u64,
    /// newer PUG REST answers the CanonicalSMILES request with ConnectivitySMILES
    #[serde(rename = "CanonicalSMILES", alias = "ConnectivitySMILES")]
    pub canonical_smiles: String,
    #[serde(rename = "InChIKey", default)]
    pub inchikey: String,
}

#[derive(Debug, Deserialize)]
pub struct PropertyResponse {
    #[serde(rename = "PropertyTable")]
    pub property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
pub struct PropertyTable {
    #[serde(rename = "Properties")]
    pub properties: Vec<CompoundProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    /// canonical SMILES, unique within a table
    pub smiles: String,
    pub inchikey: String,
    /// PubChem CIDs with this SMILES, in the order they were met
    pub cids: Vec<u64>,
}

impl CompoundRecord {
    pub fn cids_as_string(&self) -> String {
        self.cids
            .iter()
            .map(|cid| cid.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// CIDs of one batch that did not make it into the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedBatch {
    pub cids: Vec<u64>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompoundTable {
    pub records: Vec<CompoundRecord>,
    pub unresolved: Vec<UnresolvedBatch>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl PartialEq for CompoundTable {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records && self.unresolved == other.unresolved
    }
}

impl CompoundTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, smiles: &str) -> Option<&CompoundRecord> {
        self.index.get(smiles).map(|&i| &self.records[i])
    }

    /// Adds one CID with its structure. Returns true if a new record was created.
    pub fn merge(&mut self, cid: u64, smiles: &str, inchikey: &str) -> bool {
        if let Some(&position) = self.index.get(smiles) {
            self.records[position].cids.push(cid);
            return false;
        }
        self.index.insert(smiles.to_string(), self.records.len());
        self.records.push(CompoundRecord {
            smiles: smiles.to_string(),
            inchikey: inchikey.to_string(),
            cids: vec![cid],
        });
        true
    }

    pub fn merge_properties(&mut self, properties: &[CompoundProperties]) {
        for property in properties {
            self.merge(property.cid, &property.canonical_smiles, &property.inchikey);
        }
    }

    pub fn add_unresolved(&mut self, cids: Vec<u64>, reason: &str) {
        if cids.is_empty() {
            return;
        }
        self.unresolved.push(UnresolvedBatch {
            cids,
            reason: reason.to_string(),
        });
    }

    pub fn resolved_cids(&self) -> Vec<u64> {
        self.records
            .iter()
            .flat_map(|record| record.cids.iter().copied())
            .collect()
    }

    pub fn unresolved_cids(&self) -> Vec<u64> {
        self.unresolved
            .iter()
            .flat_map(|batch| batch.cids.iter().copied())
            .collect()
    }

    /// InChIKey, SMILES and comma-joined CIDs for every record
    pub fn to_rows(&self) -> Vec<[String; 3]> {
        self.records
            .iter()
            .map(|record| {
                [
                    record.inchikey.clone(),
                    record.smiles.clone(),
                    record.cids_as_string(),
                ]
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Prints the records as an InChIKey | SMILES | PubChem table, followed by the
    /// unresolved CIDs if there are any.
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("InChIKey"),
            Cell::new("SMILES"),
            Cell::new("PubChem"),
        ]));
        for row in self.to_rows() {
            table.add_row(Row::new(row.iter().map(|s| Cell::new(s)).collect()));
        }
        table.printstd();

        if !self.unresolved.is_empty() {
            let mut table = Table::new();
            table.add_row(Row::new(vec![Cell::new("Unresolved CIDs"), Cell::new("Reason")]));
            for batch in &self.unresolved {
                let cids = batch
                    .cids
                    .iter()
                    .map(|cid| cid.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                table.add_row(Row::new(vec![Cell::new(&cids), Cell::new(&batch.reason)]));
            }
            table.printstd();
        }
    }
}
