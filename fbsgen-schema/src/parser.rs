//! XML protocol-definition parser.
//!
//! This module turns one protocol XML document into a [`SourceUnit`]. Enums and
//! includes are collected wherever they appear below the root; messages only
//! when their parent element is `messages`.

use crate::error::ParseError;
use crate::messages::{FieldDef, FieldKind, MessageDef};
use crate::types::{CommandParam, EnumDef, EnumEntry, SourceUnit};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesRef, BytesStart, Event};
use std::path::Path;

/// Parses a protocol definition from a string.
///
/// # Arguments
/// * `xml` - XML document content
/// * `unit_name` - Name the unit is known by in `<include>` references
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or a required attribute is
/// missing or unparsable.
pub fn parse_protocol(xml: &str, unit_name: &str) -> Result<SourceUnit, ParseError> {
    let mut reader = Reader::from_str(xml);

    let mut unit = SourceUnit::new(unit_name);
    let mut stack: Vec<String> = Vec::new();
    let mut seen_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if !seen_root {
                    seen_root = true;
                    stack.push(name.to_string());
                } else {
                    match name {
                        "include" => {
                            let text = read_text(&mut reader)?;
                            unit.add_include(&text);
                        }
                        "enum" => unit.add_enum(parse_enum(&mut reader, e)?),
                        "message" if parent_is(&stack, "messages") => {
                            unit.add_message(parse_message(&mut reader, e)?);
                        }
                        _ => stack.push(name.to_string()),
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if !seen_root {
                    seen_root = true;
                } else {
                    match name {
                        "enum" => unit.add_enum(EnumDef::new(required_attr(e, "enum", "name")?)),
                        "message" if parent_is(&stack, "messages") => {
                            unit.add_message(parse_message_attrs(e)?);
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(ParseError::structure("no root element found"));
    }

    Ok(unit)
}

/// Reads and parses a protocol definition file.
///
/// The unit name is the file name without its extension.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_protocol_file(path: &Path) -> Result<SourceUnit, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    let unit_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ParseError::structure(format!("invalid file name: {}", path.display())))?;
    parse_protocol(&xml, unit_name)
}

fn parent_is(stack: &[String], name: &str) -> bool {
    stack.last().is_some_and(|parent| parent == name)
}

/// Looks up an attribute value by key.
fn find_attr(e: &BytesStart<'_>, key: &str) -> Result<Option<String>, ParseError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key.as_bytes() {
            return attr_value(&attr).map(Some);
        }
    }
    Ok(None)
}

/// Returns an attribute value with entity and character references expanded.
fn attr_value(attr: &Attribute<'_>) -> Result<String, ParseError> {
    let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
    Ok(value.into_owned())
}

fn required_attr(e: &BytesStart<'_>, element: &str, key: &str) -> Result<String, ParseError> {
    find_attr(e, key)?.ok_or_else(|| ParseError::missing_attr(element, key))
}

/// Reads the text content of the current element, consuming its end tag.
///
/// Text, CDATA and references are joined in document order; only the joined
/// string is trimmed.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => text.push_str(std::str::from_utf8(t)?),
            Ok(Event::CData(ref t)) => text.push_str(std::str::from_utf8(t)?),
            Ok(Event::GeneralRef(ref r)) => push_reference(&mut text, r)?,
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text.trim().to_string())
}

/// Appends the expansion of `&name;` or `&#NN;` to `text`.
///
/// References that are neither character references nor one of the five
/// predefined entities are kept verbatim.
fn push_reference(text: &mut String, r: &BytesRef<'_>) -> Result<(), ParseError> {
    if let Some(ch) = r.resolve_char_ref().map_err(quick_xml::Error::from)? {
        text.push(ch);
        return Ok(());
    }

    let name = std::str::from_utf8(r)?;
    match resolve_predefined_entity(name) {
        Some(value) => text.push_str(value),
        None => {
            text.push('&');
            text.push_str(name);
            text.push(';');
        }
    }
    Ok(())
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    read_text(reader).map(|_| ())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

/// Parses an enum definition.
fn parse_enum(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<EnumDef, ParseError> {
    let mut enum_def = EnumDef::new(required_attr(e, "enum", "name")?);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                match std::str::from_utf8(&name_bytes)? {
                    "description" => enum_def.description = non_empty(read_text(reader)?),
                    "entry" => enum_def.add_entry(parse_entry(reader, e)?),
                    _ => skip_to_end(reader)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"entry" {
                    enum_def.add_entry(parse_entry_attrs(e)?);
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(enum_def)
}

fn parse_entry_attrs(e: &BytesStart<'_>) -> Result<EnumEntry, ParseError> {
    let name = required_attr(e, "entry", "name")?;
    let raw = required_attr(e, "entry", "value")?;
    let value = raw
        .trim()
        .parse()
        .map_err(|_| ParseError::invalid_attr("entry", "value", raw.as_str()))?;
    Ok(EnumEntry::new(name, value))
}

/// Parses an enum entry and its optional description and parameters.
fn parse_entry(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<EnumEntry, ParseError> {
    let mut entry = parse_entry_attrs(e)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                match std::str::from_utf8(&name_bytes)? {
                    "description" => entry.description = non_empty(read_text(reader)?),
                    "param" => {
                        let mut param = parse_param_attrs(e)?;
                        param.description = non_empty(read_text(reader)?);
                        entry.params.push(param);
                    }
                    _ => skip_to_end(reader)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"param" {
                    entry.params.push(parse_param_attrs(e)?);
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(entry)
}

/// Parses the attributes of a command parameter.
fn parse_param_attrs(e: &BytesStart<'_>) -> Result<CommandParam, ParseError> {
    let mut index = None;
    let mut param = CommandParam::default();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr_value(&attr)?;

        match key {
            "index" => {
                index = Some(
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ParseError::invalid_attr("param", "index", value.as_str()))?,
                )
            }
            "label" => param.label = Some(value),
            "minValue" => param.min_value = Some(value),
            "maxValue" => param.max_value = Some(value),
            "increment" => param.increment = Some(value),
            "units" => param.units = Some(value),
            _ => {}
        }
    }

    param.index = index.ok_or_else(|| ParseError::missing_attr("param", "index"))?;
    Ok(param)
}

fn parse_message_attrs(e: &BytesStart<'_>) -> Result<MessageDef, ParseError> {
    let name = required_attr(e, "message", "name")?;
    let raw = required_attr(e, "message", "id")?;
    let id = raw
        .trim()
        .parse()
        .map_err(|_| ParseError::invalid_attr("message", "id", raw.as_str()))?;
    Ok(MessageDef::new(name, id))
}

/// Parses a message definition.
fn parse_message(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<MessageDef, ParseError> {
    let mut msg = parse_message_attrs(e)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                match std::str::from_utf8(&name_bytes)? {
                    "description" => msg.description = non_empty(read_text(reader)?),
                    "field" => {
                        let mut field = parse_field(e)?;
                        field.comment = non_empty(read_text(reader)?);
                        msg.add_field(field);
                    }
                    _ => skip_to_end(reader)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"field" {
                    msg.add_field(parse_field(e)?);
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(msg)
}

/// Parses a field definition.
///
/// A non-blank `enum` attribute takes precedence over `type`.
fn parse_field(e: &BytesStart<'_>) -> Result<FieldDef, ParseError> {
    let name = required_attr(e, "field", "name")?;
    let kind = match find_attr(e, "enum")? {
        Some(enum_name) if !enum_name.trim().is_empty() => {
            FieldKind::Enum(enum_name.trim().to_string())
        }
        _ => FieldKind::Scalar(required_attr(e, "field", "type")?.trim().to_string()),
    };
    Ok(FieldDef::new(name, kind))
}
