//! Minimal owned XML tree
//!
//! Reports are built and merged as a tree of [`Node`]s. Reading and writing
//! go through `quick-xml`'s event reader and writer; nothing else in the
//! crate touches the tokenizer.
//!
//! A [`Document`] has a nameless root container whose children are the
//! top-level elements of the file, so a JUnit report read from disk has a
//! root with a single `testsuites` child.

use crate::error::{Error, Result};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// An element with attributes, optional text and child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    name: String,
    attrs: Vec<(String, String)>,
    cdata: Option<String>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a new element named `name` as the last child of this node.
    pub fn add_child(&mut self, name: impl Into<String>) -> &mut Node {
        self.children.push(Node::new(name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Attaches `node` as the last child of this node.
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Detaches and returns all children, leaving this node empty of elements.
    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// First child element named `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(attr) => attr.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn set_attr_uint(&mut self, name: impl Into<String>, value: u64) {
        self.set_attr(name, value.to_string());
    }

    pub fn set_attr_double(&mut self, name: impl Into<String>, value: f64) {
        self.set_attr(name, format!("{:.6}", value));
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn set_cdata(&mut self, text: impl Into<String>) {
        self.cdata = Some(text.into());
    }

    pub fn cdata(&self) -> Option<&str> {
        self.cdata.as_deref()
    }

    fn append_cdata(&mut self, text: &str) {
        match &mut self.cdata {
            Some(cdata) => cdata.push_str(text),
            None => self.cdata = Some(text.to_string()),
        }
    }
}

/// A parsed or generated XML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    /// The nameless container holding the top-level elements.
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Replaces the document content with a single top-level element.
    pub fn set_root(&mut self, node: Node) {
        self.root.children = vec![node];
    }

    /// Returns true if the document holds no elements at all.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Reads a document from a file.
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_reader<R: BufRead>(input: R) -> Result<Self> {
        let mut reader = Reader::from_reader(input);
        let mut stack = vec![Node::default()];
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => stack.push(element_from(&e)?),
                Event::Empty(e) => {
                    let node = element_from(&e)?;
                    attach(&mut stack, node);
                }
                Event::End(_) => {
                    if stack.len() < 2 {
                        return Err(Error::Other("unbalanced end tag".to_string()));
                    }
                    if let Some(node) = stack.pop() {
                        attach(&mut stack, node);
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape()?;
                    if !text.trim().is_empty() && stack.len() > 1 {
                        if let Some(node) = stack.last_mut() {
                            node.append_cdata(&text);
                        }
                    }
                }
                Event::CData(e) => {
                    if let Some(node) = stack.last_mut() {
                        node.append_cdata(&String::from_utf8_lossy(&e));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if stack.len() != 1 {
            return Err(Error::Other("unexpected end of document".to_string()));
        }
        let root = stack.pop().unwrap_or_default();
        Ok(Document { root })
    }

    /// Writes the document to a file, replacing it if it exists.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        self.print(&mut out)?;
        out.flush().map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Prints the document, with declaration and two-space indentation.
    pub fn print<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = Writer::new_with_indent(out, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        for child in &self.root.children {
            write_node(&mut writer, child)?;
        }
        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    pub fn to_xml_string(&self) -> Result<String> {
        let mut out = Vec::new();
        self.print(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

fn element_from(e: &BytesStart<'_>) -> Result<Node> {
    let mut node = Node::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        node.attrs.push((key, value));
    }
    Ok(node)
}

fn attach(stack: &mut [Node], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> Result<()> {
    let mut start = BytesStart::new(node.name.as_str());
    for (name, value) in &node.attrs {
        let value = escape_attr(value);
        start.push_attribute((name.as_bytes(), value.as_bytes()));
    }

    if node.cdata.is_none() && node.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(cdata) = &node.cdata {
        writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(
            cdata.as_str(),
        ))))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
    Ok(())
}

/// Escapes an attribute value for use between double quotes.
fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['"', '&', '<', '\n', '\t', '\r']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("&quot;"),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '\n' => escaped.push_str("&#10;"),
            '\t' => escaped.push_str("&#9;"),
            '\r' => escaped.push_str("&#13;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
