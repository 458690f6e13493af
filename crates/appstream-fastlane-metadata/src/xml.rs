//! Read-only XML element tree.
//!
//! AppStream documents and Android manifests are small, so they are loaded
//! completely into an [`Element`] tree with `quick-xml`. Each element keeps
//! its qualified tag name, its attributes, the text that precedes its first
//! child, and its children. Text following a child element is not kept.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{MetadataError, Result};

/// An XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn open(start: &BytesStart<'_>, origin: &Path) -> Result<Self> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| MetadataError::xml(origin, e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| MetadataError::xml(origin, e))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            tag,
            attributes,
            text: None,
            children: Vec::new(),
        })
    }

    /// Qualified tag name (e.g. `name`, `meta-data`).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by qualified name (e.g. `type`, `android:icon`).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The `xml:lang` attribute, ignoring an empty value.
    pub fn language(&self) -> Option<&str> {
        self.attr("xml:lang").filter(|lang| !lang.is_empty())
    }

    /// Text preceding the first child element.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether the element carries non-whitespace direct text.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Elements matching a `/`-separated path of tag names below this one.
    pub fn find_all<'a>(&'a self, path: &str) -> Vec<&'a Element> {
        let mut current = vec![self];
        for step in path.split('/') {
            current = current
                .into_iter()
                .flat_map(|e| e.children.iter().filter(move |c| c.tag == step))
                .collect();
        }
        current
    }

    /// All elements below this one, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    fn push_text(&mut self, text: &str) {
        // tail text of a child
        if !self.children.is_empty() {
            return;
        }
        self.text.get_or_insert_with(String::new).push_str(text);
    }
}

/// Pre-order iterator over the descendants of an [`Element`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// Read and parse an XML file.
pub fn load_document(path: &Path) -> Result<Element> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, path)
}

/// Parse XML content; `origin` is only used in error messages.
pub fn parse_document(content: &str, origin: &Path) -> Result<Element> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(Element::open(&start, origin)?),
            Ok(Event::Empty(start)) => {
                let element = Element::open(&start, origin)?;
                attach(&mut stack, &mut root, element, origin)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| MetadataError::xml(origin, "unexpected closing tag"))?;
                attach(&mut stack, &mut root, element, origin)?;
            }
            Ok(Event::Text(text)) => {
                if let Some(current) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| MetadataError::xml(origin, e))?;
                    current.push_text(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(MetadataError::xml(
                    origin,
                    format!("at position {}: {}", reader.buffer_position(), e),
                ))
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(MetadataError::xml(
            origin,
            format!("unclosed element <{}>", open.tag),
        ));
    }

    root.ok_or_else(|| MetadataError::xml(origin, "document has no root element"))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    origin: &Path,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(MetadataError::xml(
                origin,
                format!("unexpected second root element <{}>", element.tag),
            ))
        }
    }
    Ok(())
}
