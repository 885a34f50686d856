//! Document parser: bytes to [`Graph`].
//!
//! The parser checks well-formedness only. Missing roots, duplicate ids and
//! dangling references all parse fine; the rules report them.
//!
//! Accepted layouts:
//! - `<mxfile><diagram><mxGraphModel><root><mxCell/>...` (the `.drawio` format)
//! - a bare `<mxGraphModel>` root
//! - an `<svg content="...">` wrapper (the `.drawio.svg` format), whose
//!   `content` attribute is parsed as the document
//!
//! `mxCell` elements anywhere below the root element become cells in
//! document order. An `mxCell` without its own `id` directly inside a
//! `UserObject`/`object` wrapper takes the wrapper's id.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use crate::config::ParseLimits;
use crate::errors::{CellGraphError, CellGraphResult};
use crate::model::{Cell, Graph};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse one document into a graph.
pub fn parse_document(bytes: &[u8], limits: &ParseLimits) -> CellGraphResult<Graph> {
    if bytes.len() > limits.max_document_bytes {
        return Err(CellGraphError::TooLarge {
            size: bytes.len(),
            limit: limits.max_document_bytes,
        });
    }

    let body = strip_bom(bytes);
    ensure_utf8(body, bytes.len() - body.len())?;

    let outer = parse_xml(body, true)?;
    let Some(content) = outer.embedded else {
        trace!(cells = outer.cells.len(), "parsed document");
        return Ok(Graph::new(outer.generator, outer.cells));
    };

    trace!(bytes = content.len(), "parsing embedded diagram");
    let inner = parse_xml(strip_bom(content.as_bytes()), false).map_err(|e| match e {
        CellGraphError::Parse { message, position } => {
            CellGraphError::parse(format!("embedded diagram: {message}"), position)
        }
        other => other,
    })?;
    Ok(Graph::new(inner.generator, inner.cells))
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// The reader only decodes names, values and text, so comments, processing
/// instructions and DOCTYPE content are checked here.
fn ensure_utf8(bytes: &[u8], offset: usize) -> CellGraphResult<()> {
    std::str::from_utf8(bytes).map(|_| ()).map_err(|err| {
        CellGraphError::parse(
            format!("invalid UTF-8: {err}"),
            (offset + err.valid_up_to()) as u64,
        )
    })
}

#[derive(Debug, Default)]
struct RawDocument {
    generator: Option<String>,
    cells: Vec<Cell>,
    /// `content` of an `svg` root, when embedded content is allowed.
    embedded: Option<String>,
}

/// An open element.
struct Frame {
    name: String,
    /// Id of a `UserObject`/`object` wrapper.
    wrapper_id: Option<String>,
    /// Position of the cell this element opened, for `mxGeometry` children.
    cell: Option<usize>,
}

fn parse_xml(bytes: &[u8], allow_embedded: bool) -> CellGraphResult<RawDocument> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut doc = RawDocument::default();
    let mut stack: Vec<Frame> = Vec::new();
    let mut seen_root = false;
    let mut buf = Vec::new();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(ev) => ev,
            Err(err) => {
                return Err(CellGraphError::parse(
                    err.to_string(),
                    reader.buffer_position() as u64,
                ))
            }
        };
        let pos = reader.buffer_position() as u64;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_start = matches!(event, Event::Start(_));
                let name = element_name(e, pos)?;
                check_name(&name, "element", pos)?;
                let attrs = Attrs::read(e, pos)?;

                if stack.is_empty() {
                    if seen_root {
                        return Err(CellGraphError::parse("junk after document element", pos));
                    }
                    seen_root = true;
                    doc.generator = attrs.get("generator").map(str::to_string);
                    if allow_embedded && local(&name) == "svg" {
                        doc.embedded = attrs.get("content").map(str::to_string);
                    }
                }

                let mut frame = Frame {
                    name,
                    wrapper_id: None,
                    cell: None,
                };

                match frame.name.as_str() {
                    "mxCell" if !stack.is_empty() => {
                        let parent = stack.last();
                        let id = attrs
                            .get("id")
                            .map(str::to_string)
                            .or_else(|| parent.and_then(|p| p.wrapper_id.clone()))
                            .unwrap_or_default();
                        doc.cells.push(Cell {
                            id,
                            is_vertex: attrs.get("vertex") == Some("1"),
                            is_edge: attrs.get("edge") == Some("1"),
                            source: attrs.non_empty("source"),
                            target: attrs.non_empty("target"),
                            has_geometry: false,
                        });
                        frame.cell = Some(doc.cells.len() - 1);
                    }
                    "mxGeometry" => {
                        if let Some(idx) = stack.last().and_then(|p| p.cell) {
                            doc.cells[idx].has_geometry = true;
                        }
                    }
                    "UserObject" | "object" => {
                        frame.wrapper_id = attrs.get("id").map(str::to_string);
                    }
                    _ => {}
                }

                if is_start {
                    stack.push(frame);
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(ref t) => {
                let text = t
                    .unescape()
                    .map_err(|err| CellGraphError::parse(err.to_string(), pos))?;
                if stack.is_empty() && !text.trim().is_empty() {
                    return Err(CellGraphError::parse("text outside document element", pos));
                }
            }
            Event::CData(_) if stack.is_empty() => {
                return Err(CellGraphError::parse("CDATA outside document element", pos));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let pos = reader.buffer_position() as u64;
    if let Some(open) = stack.last() {
        return Err(CellGraphError::parse(
            format!("unclosed element <{}> at end of input", open.name),
            pos,
        ));
    }
    if !seen_root {
        return Err(CellGraphError::parse("no element found", pos));
    }
    Ok(doc)
}

fn element_name(e: &BytesStart<'_>, pos: u64) -> CellGraphResult<String> {
    std::str::from_utf8(e.name().as_ref())
        .map(str::to_string)
        .map_err(|err| CellGraphError::parse(format!("invalid element name: {err}"), pos))
}

/// Rejects names that cannot start an XML name, e.g. `<1x/>`.
fn check_name(name: &str, kind: &str, pos: u64) -> CellGraphResult<()> {
    match name.chars().next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == ':' => Ok(()),
        _ => Err(CellGraphError::parse(format!("invalid {kind} name '{name}'"), pos)),
    }
}

/// Local part of a possibly prefixed name.
fn local(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Unescaped attributes of one element, in document order.
struct Attrs(Vec<(String, String)>);

impl Attrs {
    /// Reads every attribute so malformed ones fail the parse even when unused.
    fn read(e: &BytesStart<'_>, pos: u64) -> CellGraphResult<Self> {
        let mut out = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| CellGraphError::parse(err.to_string(), pos))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|err| CellGraphError::parse(format!("invalid attribute name: {err}"), pos))?
                .to_string();
            check_name(&key, "attribute", pos)?;
            if attr.value.contains(&b'<') {
                return Err(CellGraphError::parse(
                    format!("unescaped '<' in value of attribute '{key}'"),
                    pos,
                ));
            }
            let value = attr
                .unescape_value()
                .map_err(|err| CellGraphError::parse(err.to_string(), pos))?
                .into_owned();
            out.push((key, value));
        }
        Ok(Self(out))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).map(str::to_string)
    }
}
