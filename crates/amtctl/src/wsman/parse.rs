//! SOAP response parsing into `amt_core::ResponseDocument`.
//!
//! Two shapes matter: a `Fault` body, whose `Reason/Text` becomes the fault
//! reason, and a success body, whose payload element's children become the
//! property set in document order. Deeper structure inside a property (rare
//! in the classes this tool touches) is flattened into its text content.

use amt_core::{AmtError, PropertySet, ResponseDocument};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Parses one SOAP response body.
///
/// Malformed XML means the transport did not deliver a usable document and
/// is reported as [`AmtError::TransportUnavailable`].
pub fn parse_response(xml: &str) -> Result<ResponseDocument, AmtError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut props = PropertySet::new();
    let mut in_body = false;
    // Depth below the Body element: 1 = payload element, 2 = its properties.
    let mut depth = 0usize;
    let mut current: Option<String> = None;
    let mut value = String::new();
    let mut is_fault = false;
    let mut in_reason_text = false;
    let mut fault_reason = String::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                let name = local_name(e.name().as_ref());
                if !in_body {
                    if name == "Body" {
                        in_body = true;
                    }
                    continue;
                }
                depth += 1;
                if depth == 1 && name == "Fault" {
                    is_fault = true;
                } else if is_fault && name == "Text" {
                    in_reason_text = true;
                } else if !is_fault && depth == 2 {
                    current = Some(name);
                    value.clear();
                }
            }
            Event::Empty(e) => {
                let name = local_name(e.name().as_ref());
                if in_body && !is_fault && depth == 1 {
                    props.push(name, "");
                }
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(malformed)?;
                if in_reason_text {
                    fault_reason.push_str(&text);
                } else if current.is_some() {
                    value.push_str(&text);
                }
            }
            Event::End(e) => {
                if !in_body {
                    continue;
                }
                let name = local_name(e.name().as_ref());
                if name == "Body" {
                    in_body = false;
                    continue;
                }
                if is_fault && name == "Text" {
                    in_reason_text = false;
                }
                if !is_fault && depth == 2 {
                    if let Some(prop) = current.take() {
                        props.push(prop, value.clone());
                        value.clear();
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if is_fault {
        Ok(ResponseDocument::Fault {
            reason: fault_reason,
        })
    } else {
        Ok(ResponseDocument::Success(props))
    }
}

fn local_name(qname: &[u8]) -> String {
    let local = match qname.iter().rposition(|b| *b == b':') {
        Some(pos) => &qname[pos + 1..],
        None => qname,
    };
    String::from_utf8_lossy(local).into_owned()
}

fn malformed(e: quick_xml::Error) -> AmtError {
    AmtError::TransportUnavailable(format!("malformed response document: {e}"))
}
