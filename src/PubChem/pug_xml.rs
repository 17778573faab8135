//! Streaming reader for PUG XML gateway answers.
//!
//! Only three elements matter for a standardization job:
//! - `<PCT-Waiting_reqid>`: the request id handed out after submission
//! - `<PCT-Status value="..."/>`: job status, `success` when the job went through
//! - `<PCT-Structure_structure_string>`: the standardized structure, present once the job is done
//!
//! PubChem wraps long structure strings with the `&#xa;` character reference; it is removed.

use crate::PubChem::pubchem_errors::PubChemError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

const REQID_TAG: &[u8] = b"PCT-Waiting_reqid";
const STATUS_TAG: &[u8] = b"PCT-Status";
const STRUCTURE_TAG: &[u8] = b"PCT-Structure_structure_string";

pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PugResponse {
    pub reqid: Option<String>,
    pub status: Option<String>,
    pub structure: Option<String>,
}

impl PugResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }
}

pub fn parse_pug_response(body: &str) -> Result<PugResponse, PubChemError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);
    let mut response = PugResponse::default();
    let mut current: Option<Vec<u8>> = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.name().as_ref() == STATUS_TAG && response.status.is_none() {
                    response.status = status_value(&e)?;
                }
                current = Some(e.name().as_ref().to_vec());
            }
            Event::Empty(e) => {
                if e.name().as_ref() == STATUS_TAG && response.status.is_none() {
                    response.status = status_value(&e)?;
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                read_element_text(&mut response, current.as_deref(), &text);
            }
            Event::CData(c) => {
                let text = c.decode().map_err(quick_xml::Error::from)?;
                read_element_text(&mut response, current.as_deref(), &text);
            }
            Event::End(_) => current = None,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(response)
}

fn read_element_text(response: &mut PugResponse, element: Option<&[u8]>, text: &str) {
    match element {
        Some(REQID_TAG) => {
            let reqid = text.trim();
            if !reqid.is_empty() {
                response.reqid = Some(reqid.to_string());
            }
        }
        Some(STRUCTURE_TAG) => {
            let structure = clean_structure_string(text);
            if !structure.is_empty() {
                response.structure = Some(structure);
            }
        }
        _ => {}
    }
}

fn status_value(element: &BytesStart) -> Result<Option<String>, PubChemError> {
    match element
        .try_get_attribute("value")
        .map_err(quick_xml::Error::from)?
    {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// drops line breaks, escaped or not, that PubChem inserts into structure strings
pub fn clean_structure_string(text: &str) -> String {
    text.replace("&#xa;", "")
        .replace(['\n', '\r'], "")
        .trim()
        .to_string()
}
