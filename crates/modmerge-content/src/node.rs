//! Owned labeled-node tree with parsing and rendering
//!
//! The tree keeps what the merge needs: tag, attributes in document order,
//! text, and children. Comments, processing instructions and the doctype are
//! dropped on parse. Whitespace-only text is layout and is dropped too; it
//! is regenerated by [`Element::to_xml_string`]. The same goes for the
//! trailing whitespace of text that is followed by a child or a closing tag
//! on its own line, so rendering a parsed tree is a fixed point.

use indexmap::IndexMap;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::{Error, Result};

const FORMAT: &str = "XML";
const INDENT: &str = "    ";
const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// One node of a labeled-node tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag as written in the document, namespace prefix included
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    /// Text before the first child
    pub text: Option<String>,
    /// Text after this element's closing tag, inside the parent
    pub tail: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Direct children with the given tag, case-insensitive.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children
            .iter()
            .filter(move |c| c.tag.eq_ignore_ascii_case(tag))
    }

    /// Parse a document and return its root element.
    pub fn parse(source: &str) -> Result<Element> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut reader = Reader::from_str(source);
        reader.config_mut().check_end_names = true;

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::parse(
                    FORMAT,
                    format!("{e} at byte {}", reader.error_position()),
                )
            })?;
            match event {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::parse(FORMAT, "closing tag without opening tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| Error::parse(FORMAT, e.to_string()))?;
                    append_text(&mut stack, &text)?;
                }
                Event::CData(data) => {
                    let data = String::from_utf8(data.into_inner().into_owned())
                        .map_err(|e| Error::parse(FORMAT, e.to_string()))?;
                    append_text(&mut stack, &data)?;
                }
                Event::Eof => break,
                // Declaration, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::parse(
                FORMAT,
                format!("unclosed element <{}>", open.tag),
            ));
        }
        root.ok_or_else(|| Error::parse(FORMAT, "document has no root element"))
    }

    /// Render as a complete document with declaration and 4-space indentation.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::with_capacity(256);
        out.push_str(DECLARATION);
        out.push('\n');
        self.write_indented(&mut out, 0);
        out.push('\n');
        out
    }

    fn write_indented(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }

        let text = self.text.as_deref().filter(|t| !t.is_empty());
        match (text, self.children.is_empty()) {
            (None, true) => out.push_str("/>"),
            (Some(text), true) => {
                out.push('>');
                out.push_str(&escape(text));
                self.write_close(out);
            }
            (text, false) => {
                out.push('>');
                if let Some(text) = text {
                    out.push_str(&escape(text.trim_end()));
                }
                for child in &self.children {
                    out.push('\n');
                    child.write_indented(out, depth + 1);
                }
                out.push('\n');
                for _ in 0..depth {
                    out.push_str(INDENT);
                }
                self.write_close(out);
            }
        }

        // A tail is always followed by generated layout
        if let Some(tail) = self.tail.as_deref() {
            out.push_str(&escape(tail.trim_end()));
        }
    }

    fn write_close(&self, out: &mut String) {
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let tag = String::from_utf8(start.name().as_ref().to_vec())
        .map_err(|e| Error::parse(FORMAT, e.to_string()))?;
    let mut element = Element::new(tag);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::parse(FORMAT, e.to_string()))?;
        let name = String::from_utf8(attr.key.as_ref().to_vec())
            .map_err(|e| Error::parse(FORMAT, e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| Error::parse(FORMAT, e.to_string()))?
            .into_owned();
        element.attributes.insert(name, value);
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(Error::parse(
                FORMAT,
                format!("second root element <{}>", element.tag),
            ));
        }
        None => *root = Some(element),
    }
    Ok(())
}

/// Text goes to the open element, or to the tail of its last child.
fn append_text(stack: &mut [Element], text: &str) -> Result<()> {
    let is_layout = text.trim().is_empty();
    let Some(parent) = stack.last_mut() else {
        if is_layout {
            return Ok(());
        }
        return Err(Error::parse(FORMAT, "text outside the root element"));
    };
    if is_layout {
        return Ok(());
    }
    let slot = match parent.children.last_mut() {
        Some(last) => &mut last.tail,
        None => &mut parent.text,
    };
    slot.get_or_insert_with(String::new).push_str(text);
    Ok(())
}
