//! XML response parsing for the BluOS control API.
//!
//! Each parser walks the document with a streaming `quick_xml` reader and
//! only looks at the elements it needs. A body that is not well-formed XML,
//! or whose root element is not the one the endpoint documents, is reported
//! as `GatewayError::Parse`.

use percent_encoding::percent_decode_str;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::gateway::{GatewayError, GatewayResult};
use super::types::{CaptureInput, PlaybackStatus, SyncState};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the entity-decoded value of an attribute, if present.
pub(crate) fn get_xml_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
        .map(|attr| {
            let raw = String::from_utf8_lossy(&attr.value);
            html_escape::decode_html_entities(&raw).into_owned()
        })
}

/// Decodes entities in collected element text and trims surrounding whitespace.
fn finish_text(raw: &str) -> String {
    html_escape::decode_html_entities(raw).trim().to_string()
}

fn parse_error(document: &str, err: impl std::fmt::Display) -> GatewayError {
    GatewayError::Parse(format!("{}: {}", document, err))
}

// ─────────────────────────────────────────────────────────────────────────────
// SyncStatus
// ─────────────────────────────────────────────────────────────────────────────

/// Parses a `/SyncStatus` response.
///
/// ```xml
/// <SyncStatus name="Kitchen" group="Dining Room+Kitchen" id="192.168.1.60:11000">
///   <master port="11000">192.168.1.53</master>
///   <slave id="192.168.1.64" port="11000"/>
/// </SyncStatus>
/// ```
///
/// Empty `<master/>` elements and `<slave>` entries without an `id` are
/// ignored; duplicate slave ids are collapsed.
pub fn parse_sync_status(xml: &str) -> GatewayResult<SyncState> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut state = SyncState::default();
    let mut saw_root = false;
    let mut depth = 0usize;
    let mut master_text: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                match (depth, e.name().as_ref()) {
                    (1, b"SyncStatus") => {
                        saw_root = true;
                        state.group = get_xml_attr(e, b"group");
                        state.name = get_xml_attr(e, b"name");
                    }
                    (2, b"master") if saw_root => master_text = Some(String::new()),
                    (2, b"slave") if saw_root => add_slave(&mut state, e),
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => match (depth + 1, e.name().as_ref()) {
                (1, b"SyncStatus") => {
                    saw_root = true;
                    state.group = get_xml_attr(e, b"group");
                    state.name = get_xml_attr(e, b"name");
                }
                (2, b"slave") if saw_root => add_slave(&mut state, e),
                _ => {}
            },
            Ok(Event::Text(ref t)) => {
                if let Some(text) = master_text.as_mut() {
                    text.push_str(&String::from_utf8_lossy(t));
                }
            }
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(text) = master_text.as_mut() {
                    text.push('&');
                    text.push_str(&String::from_utf8_lossy(r));
                    text.push(';');
                }
            }
            Ok(Event::End(ref e)) => {
                if depth == 2 && e.name().as_ref() == b"master" {
                    if let Some(text) = master_text.take() {
                        let host = finish_text(&text);
                        if !host.is_empty() {
                            state.master = Some(host);
                        }
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error("SyncStatus", e)),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(parse_error("SyncStatus", "missing <SyncStatus> root element"));
    }

    Ok(state)
}

fn add_slave(state: &mut SyncState, e: &BytesStart) {
    if let Some(id) = get_xml_attr(e, b"id").map(|s| s.trim().to_string()) {
        if !id.is_empty() && !state.slaves.contains(&id) {
            state.slaves.push(id);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

/// Parses a `/Status` response, extracting the `<state>` child of `<status>`.
pub fn parse_status(xml: &str) -> GatewayResult<PlaybackStatus> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut saw_root = false;
    let mut depth = 0usize;
    let mut state_text: Option<String> = None;
    let mut status = PlaybackStatus::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                match (depth, e.name().as_ref()) {
                    (1, b"status") => saw_root = true,
                    (2, b"state") if saw_root && status.state.is_none() => {
                        state_text = Some(String::new())
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 0 && e.name().as_ref() == b"status" {
                    saw_root = true;
                }
            }
            Ok(Event::Text(ref t)) => {
                if let Some(text) = state_text.as_mut() {
                    text.push_str(&String::from_utf8_lossy(t));
                }
            }
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(text) = state_text.as_mut() {
                    text.push('&');
                    text.push_str(&String::from_utf8_lossy(r));
                    text.push(';');
                }
            }
            Ok(Event::End(ref e)) => {
                if depth == 2 && e.name().as_ref() == b"state" {
                    if let Some(text) = state_text.take() {
                        status.state = Some(finish_text(&text));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error("Status", e)),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(parse_error("Status", "missing <status> root element"));
    }

    Ok(status)
}

// ─────────────────────────────────────────────────────────────────────────────
// RadioBrowse (Capture)
// ─────────────────────────────────────────────────────────────────────────────

/// Parses a `/RadioBrowse?service=Capture` response into the player's inputs.
///
/// Items may sit directly under the root or inside `<category>` elements.
/// Items without a `text` or `URL` attribute cannot be selected and are
/// skipped. The `URL` attribute arrives percent-encoded and is decoded here
/// so it can be passed back to `/Play` as a plain parameter value.
pub fn parse_capture_inputs(xml: &str) -> GatewayResult<Vec<CaptureInput>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut saw_root = false;
    let mut inputs = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if saw_root {
                    push_item(&mut inputs, e);
                } else {
                    saw_root = true;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error("RadioBrowse", e)),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(parse_error("RadioBrowse", "missing root element"));
    }

    Ok(inputs)
}

fn push_item(inputs: &mut Vec<CaptureInput>, e: &BytesStart) {
    if e.name().as_ref() != b"item" {
        return;
    }
    if let (Some(label), Some(url)) = (get_xml_attr(e, b"text"), get_xml_attr(e, b"URL")) {
        let url = percent_decode_str(&url).decode_utf8_lossy().into_owned();
        inputs.push(CaptureInput { label, url });
    }
}
