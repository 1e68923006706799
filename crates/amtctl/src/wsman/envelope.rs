//! SOAP envelope construction for WS-Transfer and WS-Management operations.
//!
//! Every request shares the same header shape: Action, To, ResourceURI, a
//! fresh MessageID, and the anonymous ReplyTo. Bodies differ per operation:
//! Get is empty, Put carries the full instance document, Invoke carries an
//! `<Operation>_INPUT` element with the parameters in builder order.

use amt_core::request::{MethodInvocation, Param};
use amt_core::resource::Selector;
use amt_core::{PropertySet, ResourceReference};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use uuid::Uuid;

use super::{ACTION_GET, ACTION_PUT, NS_SOAP, NS_WSA, NS_WSMAN, NS_WSMAN_ID, WSA_ANONYMOUS};

type XmlResult<T> = Result<T, quick_xml::Error>;

/// Builds a WS-Transfer Get envelope.
pub fn get_envelope(to: &str, resource: &ResourceReference) -> XmlResult<String> {
    build_envelope(to, ACTION_GET, resource, |_| Ok(()))
}

/// Builds a WS-Transfer Put envelope carrying the full `document`.
pub fn put_envelope(
    to: &str,
    resource: &ResourceReference,
    document: &PropertySet,
) -> XmlResult<String> {
    let uri = resource.resource_uri();
    let class = resource.class_name().to_string();
    let document = document.clone();
    build_envelope(to, ACTION_PUT, resource, move |w| {
        let tag = format!("p:{class}");
        let mut instance = BytesStart::new(tag.as_str());
        instance.push_attribute(("xmlns:p", uri.as_str()));
        w.write_event(Event::Start(instance))?;
        for (name, value) in document.iter() {
            write_text_element(w, &format!("p:{name}"), value)?;
        }
        w.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
        Ok(())
    })
}

/// Builds a WS-Management method invocation envelope. The SOAP action is
/// `<resource-uri>/<operation>`.
pub fn invoke_envelope(to: &str, invocation: &MethodInvocation) -> XmlResult<String> {
    let uri = invocation.resource.resource_uri();
    let action = format!("{}/{}", uri, invocation.operation);
    let wrapper = format!("p:{}_INPUT", invocation.operation);
    let params = invocation.params.clone();
    build_envelope(to, &action, &invocation.resource, move |w| {
        let mut input = BytesStart::new(wrapper.as_str());
        input.push_attribute(("xmlns:p", uri.as_str()));
        w.write_event(Event::Start(input))?;
        for param in &params {
            match param {
                Param::Text { name, value } => {
                    write_text_element(w, &format!("p:{name}"), value)?;
                }
                Param::Reference { name, reference } => {
                    let tag = format!("p:{name}");
                    w.write_event(Event::Start(BytesStart::new(tag.as_str())))?;
                    write_text_element(w, "wsa:Address", WSA_ANONYMOUS)?;
                    w.write_event(Event::Start(BytesStart::new("wsa:ReferenceParameters")))?;
                    write_text_element(w, "wsman:ResourceURI", &reference.resource_uri)?;
                    write_selector_set(w, &reference.selectors)?;
                    w.write_event(Event::End(BytesEnd::new("wsa:ReferenceParameters")))?;
                    w.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
                }
            }
        }
        w.write_event(Event::End(BytesEnd::new(wrapper.as_str())))?;
        Ok(())
    })
}

/// Builds a WS-Management Identify envelope. Identify has no addressing
/// header; the body is a single element in the identity namespace.
pub fn identify_envelope() -> XmlResult<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut env = BytesStart::new("s:Envelope");
    env.push_attribute(("xmlns:s", NS_SOAP));
    env.push_attribute(("xmlns:wsmid", NS_WSMAN_ID));
    writer.write_event(Event::Start(env))?;
    writer.write_event(Event::Start(BytesStart::new("s:Header")))?;
    writer.write_event(Event::End(BytesEnd::new("s:Header")))?;
    writer.write_event(Event::Start(BytesStart::new("s:Body")))?;
    writer.write_event(Event::Empty(BytesStart::new("wsmid:Identify")))?;
    writer.write_event(Event::End(BytesEnd::new("s:Body")))?;
    writer.write_event(Event::End(BytesEnd::new("s:Envelope")))?;

    finish(writer)
}

// ── Internals ─────────────────────────────────────────────────────────────────

fn build_envelope<F>(
    to: &str,
    action: &str,
    resource: &ResourceReference,
    write_body: F,
) -> XmlResult<String>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> XmlResult<()>,
{
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut env = BytesStart::new("s:Envelope");
    env.push_attribute(("xmlns:s", NS_SOAP));
    env.push_attribute(("xmlns:wsa", NS_WSA));
    env.push_attribute(("xmlns:wsman", NS_WSMAN));
    writer.write_event(Event::Start(env))?;

    writer.write_event(Event::Start(BytesStart::new("s:Header")))?;
    write_must_understand(&mut writer, "wsa:Action", action)?;
    write_must_understand(&mut writer, "wsa:To", to)?;
    write_must_understand(&mut writer, "wsman:ResourceURI", &resource.resource_uri())?;
    write_must_understand(
        &mut writer,
        "wsa:MessageID",
        &format!("uuid:{}", Uuid::new_v4()),
    )?;
    writer.write_event(Event::Start(BytesStart::new("wsa:ReplyTo")))?;
    write_text_element(&mut writer, "wsa:Address", WSA_ANONYMOUS)?;
    writer.write_event(Event::End(BytesEnd::new("wsa:ReplyTo")))?;
    if !resource.selectors().is_empty() {
        write_selector_set(&mut writer, resource.selectors())?;
    }
    writer.write_event(Event::End(BytesEnd::new("s:Header")))?;

    writer.write_event(Event::Start(BytesStart::new("s:Body")))?;
    write_body(&mut writer)?;
    writer.write_event(Event::End(BytesEnd::new("s:Body")))?;

    writer.write_event(Event::End(BytesEnd::new("s:Envelope")))?;
    finish(writer)
}

fn write_selector_set(w: &mut Writer<Vec<u8>>, selectors: &[Selector]) -> XmlResult<()> {
    w.write_event(Event::Start(BytesStart::new("wsman:SelectorSet")))?;
    for selector in selectors {
        let mut elem = BytesStart::new("wsman:Selector");
        elem.push_attribute(("Name", selector.name.as_str()));
        w.write_event(Event::Start(elem))?;
        w.write_event(Event::Text(BytesText::new(&selector.value)))?;
        w.write_event(Event::End(BytesEnd::new("wsman:Selector")))?;
    }
    w.write_event(Event::End(BytesEnd::new("wsman:SelectorSet")))?;
    Ok(())
}

fn write_must_understand(w: &mut Writer<Vec<u8>>, name: &str, value: &str) -> XmlResult<()> {
    let mut elem = BytesStart::new(name);
    elem.push_attribute(("s:mustUnderstand", "true"));
    w.write_event(Event::Start(elem))?;
    w.write_event(Event::Text(BytesText::new(value)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_text_element(w: &mut Writer<Vec<u8>>, name: &str, value: &str) -> XmlResult<()> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    w.write_event(Event::Text(BytesText::new(value)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn finish(writer: Writer<Vec<u8>>) -> XmlResult<String> {
    String::from_utf8(writer.into_inner())
        .map_err(|e| quick_xml::Error::NonDecodable(Some(e.utf8_error())))
}
