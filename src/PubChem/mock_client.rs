//! In-memory HttpClient for tests: replies are looked up by a fragment of the URL or of the
//! request body, and every call is recorded.
use crate::PubChem::http_client::{HttpClient, HttpReply};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub body: Option<String>,
}

struct Route {
    fragment: String,
    replies: VecDeque<HttpReply>,
}

#[derive(Default)]
pub struct MockHttpClient {
    routes: RefCell<Vec<Route>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues replies for requests whose URL or body contains `fragment`.
    /// The last reply of a route is repeated once the queue is down to it.
    pub fn route(self, fragment: &str, replies: Vec<HttpReply>) -> Self {
        self.routes.borrow_mut().push(Route {
            fragment: fragment.to_string(),
            replies: replies.into(),
        });
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn count_calls(&self, fragment: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| {
                call.url.contains(fragment)
                    || call.body.as_deref().is_some_and(|b| b.contains(fragment))
            })
            .count()
    }

    fn reply(&self, url: &str, body: Option<&str>) -> HttpReply {
        let mut routes = self.routes.borrow_mut();
        let route = routes.iter_mut().find(|route| {
            url.contains(&route.fragment) || body.is_some_and(|b| b.contains(&route.fragment))
        });
        match route {
            Some(route) if route.replies.len() > 1 => route.replies.pop_front().unwrap(),
            Some(route) => route
                .replies
                .front()
                .cloned()
                .unwrap_or_else(|| HttpReply::new(404, "")),
            None => HttpReply::new(404, "{\"Fault\": \"no route\"}"),
        }
    }
}

impl HttpClient for MockHttpClient {
    fn get_text(&self, url: &str) -> Result<HttpReply, reqwest::Error> {
        self.calls.borrow_mut().push(RecordedCall {
            method: "GET",
            url: url.to_string(),
            body: None,
        });
        Ok(self.reply(url, None))
    }

    fn post_xml(&self, url: &str, body: &str) -> Result<HttpReply, reqwest::Error> {
        self.calls.borrow_mut().push(RecordedCall {
            method: "POST",
            url: url.to_string(),
            body: Some(body.to_string()),
        });
        Ok(self.reply(url, Some(body)))
    }
}

/// PUG REST property table for (cid, smiles, inchikey) triples
pub fn property_json(entries: &[(u64, &str, &str)]) -> String {
    let properties: Vec<String> = entries
        .iter()
        .map(|(cid, smiles, inchikey)| {
            format!(
                "{{\"CID\": {}, \"CanonicalSMILES\": \"{}\", \"InChIKey\": \"{}\"}}",
                cid, smiles, inchikey
            )
        })
        .collect();
    format!(
        "{{\"PropertyTable\": {{\"Properties\": [{}]}}}}",
        properties.join(", ")
    )
}
