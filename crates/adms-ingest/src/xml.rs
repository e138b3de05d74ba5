//! XML decoder for older device models.
//!
//! Payloads look like:
//!
//! ```text
//! <AttendanceLogs>
//!     <Log user="101" time="2025-10-30 09:00:00" status="0" verify="1"/>
//! </AttendanceLogs>
//! ```
//!
//! Record data lives in element attributes, not child text. Well-known
//! record tag names are tried in order ([`XML_RECORD_TAGS`]); documents
//! using none of them fall back to the root's direct children.

use crate::normalize::normalize_or_drop;
use crate::record::{FieldValue, RawRecord};
use adms_core::constants::XML_RECORD_TAGS;
use adms_core::{DetectedFormat, Error, NormalizedRecord, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// One element of the document, flattened in document order.
struct XmlElement {
    name: String,
    /// Nesting depth; the document root is depth 0.
    depth: usize,
    record: RawRecord,
}

/// Decode an XML payload into normalized records.
///
/// # Errors
///
/// Returns [`Error::UnparseableXml`] when the document is not well-formed
/// (including truncated documents and malformed attributes). Once the
/// document parses, the call succeeds regardless of how many records
/// survive normalization.
pub fn decode(payload: &str) -> Result<Vec<NormalizedRecord>> {
    let elements = collect_elements(payload.trim())?;

    let selected: Vec<&XmlElement> = XML_RECORD_TAGS
        .iter()
        .map(|tag| {
            elements
                .iter()
                .filter(|element| element.depth >= 1 && element.name == *tag)
                .collect::<Vec<_>>()
        })
        .find(|matches| !matches.is_empty())
        .unwrap_or_else(|| {
            // No well-known tag anywhere: treat every direct child of the
            // root as a record candidate.
            elements.iter().filter(|element| element.depth == 1).collect()
        });

    Ok(selected
        .into_iter()
        .filter_map(|element| normalize_or_drop(&element.record, DetectedFormat::Xml))
        .collect())
}

/// Whether the payload is a well-formed XML document.
///
/// Used by the format detector to confirm a `<`-prefixed candidate before
/// committing to the XML decoder.
pub(crate) fn is_well_formed(payload: &str) -> bool {
    collect_elements(payload).is_ok()
}

/// Scan the whole document, collecting every element with its attributes.
///
/// Well-formedness is established by driving the reader to EOF: mismatched
/// or unclosed tags and broken attribute syntax all surface here, before any
/// record extraction happens.
fn collect_elements(payload: &str) -> Result<Vec<XmlElement>> {
    let mut reader = Reader::from_str(payload);
    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut root_closed = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if depth == 0 && root_closed {
                    return Err(Error::UnparseableXml(
                        "multiple root elements".to_string(),
                    ));
                }
                elements.push(element_from(&start, depth)?);
                depth += 1;
            }
            Ok(Event::Empty(start)) => {
                if depth == 0 {
                    if root_closed {
                        return Err(Error::UnparseableXml(
                            "multiple root elements".to_string(),
                        ));
                    }
                    root_closed = true;
                }
                elements.push(element_from(&start, depth)?);
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_closed = true;
                }
            }
            Ok(Event::Text(text)) => {
                // A document has exactly one element at the top level;
                // anything but whitespace outside it is junk
                if depth == 0 && !text.as_ref().iter().all(u8::is_ascii_whitespace) {
                    return Err(Error::UnparseableXml(
                        "content outside document element".to_string(),
                    ));
                }
            }
            Ok(Event::Eof) => {
                if depth != 0 {
                    return Err(Error::UnparseableXml(
                        "unexpected end of document".to_string(),
                    ));
                }
                if !root_closed {
                    return Err(Error::UnparseableXml("no document element".to_string()));
                }
                return Ok(elements);
            }
            Ok(_) => {}
            Err(e) => return Err(Error::UnparseableXml(e.to_string())),
        }
    }
}

fn element_from(start: &BytesStart, depth: usize) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut record = RawRecord::new();

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| Error::UnparseableXml(e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| Error::UnparseableXml(e.to_string()))?
            .into_owned();
        record.insert(key, FieldValue::Text(value));
    }

    Ok(XmlElement {
        name,
        depth,
        record,
    })
}
