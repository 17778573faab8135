use crate::PubChem::pubchem_api::PubChemFetcher;
use crate::PubChem::pubchem_settings::PubChemSettings;

pub fn pubchem_examples(task: usize) {
    let fetcher = match PubChemFetcher::from_settings(PubChemSettings::default()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    match task {
        0 => {
            // compounds 90% similar to aspirin
            let smiles = "CC(=O)OC1=CC=CC=C1C(=O)O";
            match fetcher.get_structural_similar(smiles, 90, Some(200)) {
                Ok(table) => {
                    println!("{} unique structures similar to {}", table.len(), smiles);
                    table.pretty_print();
                }
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        1 => {
            // everything within 0.5 Da of 150.0
            match fetcher.get_compounds_by_mass(150.0, 0.5) {
                Ok(table) => {
                    println!(
                        "{} unique structures, {} CIDs unresolved",
                        table.len(),
                        table.unresolved_cids().len()
                    );
                    table.pretty_print();
                }
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        2 => {
            let smiles = "c1ccccc1O";
            match fetcher.standardize_smiles(smiles, 10) {
                Ok(standardized) => println!("{} -> {}", smiles, standardized),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        3 => {
            // a narrow mass window, exported as JSON
            match fetcher.get_compounds_by_mass(46.0419, 0.0005) {
                Ok(table) => match table.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Error: {}", e),
                },
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        _ => {
            println!("non existing examples");
        }
    }
}
