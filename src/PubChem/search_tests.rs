#[cfg(test)]
mod tests {
    use crate::PubChem::compound_table::CompoundRecord;
    use crate::PubChem::http_client::HttpReply;
    use crate::PubChem::mass_search::mass_window;
    use crate::PubChem::mock_client::{MockHttpClient, property_json};
    use crate::PubChem::pubchem_api::PubChemFetcher;
    use crate::PubChem::pubchem_errors::PubChemError;
    use approx::assert_relative_eq;

    fn mass_client() -> MockHttpClient {
        MockHttpClient::new()
            .route(
                "esearch.fcgi",
                vec![HttpReply::ok(
                    r#"{"header": {"type": "esearch"}, "esearchresult": {"count": "3", "retmax": "3", "idlist": ["1", "2", "3"]}}"#,
                )],
            )
            .route(
                "/cid/1,2,3/property/",
                vec![HttpReply::ok(&property_json(&[
                    (1, "CCO", "LFQSCWFLJHTTHZ-UHFFFAOYSA-N"),
                    (2, "CCO", "LFQSCWFLJHTTHZ-UHFFFAOYSA-N"),
                    (3, "CCN", "QUSNBJAOOMFDIB-UHFFFAOYSA-N"),
                ]))],
            )
    }

    ///////////////////////////////////MASS SEARCH///////////////////////////////////
    #[test]
    fn test_mass_url_construction() {
        let fetcher = PubChemFetcher::with_client(MockHttpClient::new());
        let url = fetcher.construct_mass_url(150.0, 0.5).unwrap();
        assert_eq!(
            url.as_str(),
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi?db=pccompound&term=149.5%5BMIMass%5D%3A150.5%5BMIMass%5D&retmode=json&retmax=100000"
        );
        let (min, max) = mass_window(180.063, 0.01);
        assert_relative_eq!(min, 180.053, epsilon = 1e-9);
        assert_relative_eq!(max, 180.073, epsilon = 1e-9);
    }

    #[test]
    fn test_mass_search_example() {
        let fetcher = PubChemFetcher::with_client(mass_client());
        let table = fetcher.get_compounds_by_mass(150.0, 0.5).unwrap();
        assert_eq!(
            table.records,
            vec![
                CompoundRecord {
                    smiles: "CCO".to_string(),
                    inchikey: "LFQSCWFLJHTTHZ-UHFFFAOYSA-N".to_string(),
                    cids: vec![1, 2],
                },
                CompoundRecord {
                    smiles: "CCN".to_string(),
                    inchikey: "QUSNBJAOOMFDIB-UHFFFAOYSA-N".to_string(),
                    cids: vec![3],
                },
            ]
        );
        assert!(table.unresolved.is_empty());
        // one esearch call, one property call
        assert_eq!(fetcher.client().calls().len(), 2);
    }

    #[test]
    fn test_mass_search_is_idempotent() {
        let fetcher = PubChemFetcher::with_client(mass_client());
        let first = fetcher.get_compounds_by_mass(150.0, 0.5).unwrap();
        let second = fetcher.get_compounds_by_mass(150.0, 0.5).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_rows(), second.to_rows());
    }

    #[test]
    fn test_mass_search_rejects_bad_tolerance() {
        let fetcher = PubChemFetcher::with_client(MockHttpClient::new());
        assert!(matches!(
            fetcher.get_compounds_by_mass(150.0, -0.5),
            Err(PubChemError::InvalidInput { .. })
        ));
        assert!(matches!(
            fetcher.get_compounds_by_mass(f64::NAN, 0.5),
            Err(PubChemError::InvalidInput { .. })
        ));
        assert!(fetcher.client().calls().is_empty());
    }

    #[test]
    fn test_mass_search_malformed_idlist() {
        let client = MockHttpClient::new().route(
            "esearch.fcgi",
            vec![HttpReply::ok(r#"{"esearchresult": {"ERROR": "Invalid query"}}"#)],
        );
        let fetcher = PubChemFetcher::with_client(client);
        let result = fetcher.get_compounds_by_mass(150.0, 0.5);
        assert!(matches!(result, Err(PubChemError::Request { .. })));
        assert_eq!(fetcher.client().count_calls("/property/"), 0);
    }

    #[test]
    fn test_mass_search_non_numeric_id() {
        let client = MockHttpClient::new().route(
            "esearch.fcgi",
            vec![HttpReply::ok(r#"{"esearchresult": {"idlist": ["12", "abc"]}}"#)],
        );
        let fetcher = PubChemFetcher::with_client(client);
        assert!(matches!(
            fetcher.get_compounds_by_mass(150.0, 0.5),
            Err(PubChemError::Request { .. })
        ));
    }

    #[test]
    fn test_mass_search_empty_idlist() {
        let client = MockHttpClient::new().route(
            "esearch.fcgi",
            vec![HttpReply::ok(r#"{"esearchresult": {"idlist": []}}"#)],
        );
        let fetcher = PubChemFetcher::with_client(client);
        let table = fetcher.get_compounds_by_mass(10000.0, 0.001).unwrap();
        assert!(table.is_empty());
        assert_eq!(fetcher.client().calls().len(), 1);
    }

    ///////////////////////////////////SIMILARITY SEARCH///////////////////////////////////
    #[test]
    fn test_similarity_url_construction() {
        let fetcher = PubChemFetcher::with_client(MockHttpClient::new());
        let url = fetcher.construct_similarity_url("CC(=O)O", 90, None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/fastsimilarity_2d/smiles/CC(=O)O/cids/JSON?Threshold=90"
        );
        // '/' and '#' stay inside the SMILES path segment
        let url = fetcher
            .construct_similarity_url("F/C=C/C#N", 80, Some(500))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/fastsimilarity_2d/smiles/F%2FC=C%2FC%23N/cids/JSON?Threshold=80&MaxRecords=500"
        );
    }

    #[test]
    fn test_similarity_rejects_bad_arguments() {
        let fetcher = PubChemFetcher::with_client(MockHttpClient::new());
        assert!(matches!(
            fetcher.get_structural_similar("CCO", 101, None),
            Err(PubChemError::InvalidInput { .. })
        ));
        assert!(matches!(
            fetcher.get_structural_similar("  ", 80, None),
            Err(PubChemError::InvalidInput { .. })
        ));
        assert!(fetcher.client().calls().is_empty());
    }

    #[test]
    fn test_similarity_search_batches_and_merges() {
        let cids: Vec<u64> = (1..=150).collect();
        let cid_json = format!(
            "{{\"IdentifierList\": {{\"CID\": [{}]}}}}",
            cids.iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(",")
        );
        let first: Vec<(u64, &str, &str)> = (1..=100)
            .map(|cid| {
                if cid % 2 == 0 {
                    (cid, "c1ccccc1O", "ISWSIDIOOBJBQZ-UHFFFAOYSA-N")
                } else {
                    (cid, "Cc1ccccc1O", "QWVGKYWNOKOFNN-UHFFFAOYSA-N")
                }
            })
            .collect();
        let second: Vec<(u64, &str, &str)> = (101..=150)
            .map(|cid| (cid, "c1ccccc1O", "ISWSIDIOOBJBQZ-UHFFFAOYSA-N"))
            .collect();
        let client = MockHttpClient::new()
            .route("fastsimilarity_2d", vec![HttpReply::ok(&cid_json)])
            .route("/cid/1,", vec![HttpReply::ok(&property_json(&first))])
            .route("/cid/101,", vec![HttpReply::ok(&property_json(&second))]);
        let fetcher = PubChemFetcher::with_client(client);
        let table = fetcher.get_structural_similar("c1ccccc1O", 80, None).unwrap();

        assert_eq!(fetcher.client().count_calls("/property/"), 2);
        assert_eq!(table.len(), 2);
        // cid 1 is odd, so the cresol record comes first
        assert_eq!(table.records[0].smiles, "Cc1ccccc1O");
        assert_eq!(table.records[0].cids.len(), 50);
        assert_eq!(table.records[1].smiles, "c1ccccc1O");
        assert_eq!(table.records[1].cids.len(), 100);
        assert_eq!(table.records[1].cids[0], 2);
        assert_eq!(*table.records[1].cids.last().unwrap(), 150);
    }

    #[test]
    fn test_similarity_search_respects_max_records() {
        let client = MockHttpClient::new()
            .route(
                "fastsimilarity_2d",
                vec![HttpReply::ok(r#"{"IdentifierList": {"CID": [5, 6, 7, 8]}}"#)],
            )
            .route(
                "/property/",
                vec![HttpReply::ok(&property_json(&[
                    (5, "CCO", "LFQSCWFLJHTTHZ-UHFFFAOYSA-N"),
                    (6, "CCCO", "BDERNNFJNOPAEC-UHFFFAOYSA-N"),
                ]))],
            );
        let fetcher = PubChemFetcher::with_client(client);
        let table = fetcher.get_structural_similar("CCO", 90, Some(2)).unwrap();
        assert_eq!(table.len(), 2);
        let calls = fetcher.client().calls();
        assert!(calls[0].url.ends_with("MaxRecords=2"));
        assert!(calls[1].url.contains("/cid/5,6/"));
    }

    #[test]
    fn test_similarity_lookup_failure_is_request_error() {
        let client = MockHttpClient::new().route(
            "fastsimilarity_2d",
            vec![HttpReply::new(
                404,
                r#"{"Fault": {"Code": "PUGREST.NotFound", "Message": "No CID found"}}"#,
            )],
        );
        let fetcher = PubChemFetcher::with_client(client);
        let result = fetcher.get_structural_similar("CCO", 80, None);
        match result {
            Err(PubChemError::Request { url, reason }) => {
                assert!(url.contains("fastsimilarity_2d"));
                assert!(reason.contains("404"));
            }
            other => panic!("expected request error, got {:?}", other),
        }
    }

    #[test]
    fn test_similarity_lookup_without_identifier_list() {
        let client = MockHttpClient::new().route(
            "fastsimilarity_2d",
            vec![HttpReply::ok(r#"{"Waiting": {"ListKey": "123"}}"#)],
        );
        let fetcher = PubChemFetcher::with_client(client);
        assert!(matches!(
            fetcher.get_structural_similar("CCO", 80, None),
            Err(PubChemError::Request { .. })
        ));
    }

    ///////////////////////////////////LIVE SERVICE///////////////////////////////////
    #[test]
    #[ignore = "queries the live PubChem service"]
    fn test_real_mass_search() {
        let fetcher = PubChemFetcher::new().unwrap();
        let table = fetcher.get_compounds_by_mass(46.0419, 0.0005).unwrap();
        assert!(!table.is_empty());
        assert!(table.get("CCO").is_some());
    }

    #[test]
    #[ignore = "queries the live PubChem service"]
    fn test_real_similarity_search() {
        let fetcher = PubChemFetcher::new().unwrap();
        let table = fetcher
            .get_structural_similar("CC(=O)OC1=CC=CC=C1C(=O)O", 95, Some(50))
            .unwrap();
        assert!(!table.is_empty());
        table.pretty_print();
    }
}
