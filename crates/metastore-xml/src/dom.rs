//! A minimal XML node tree over `quick-xml`.
//!
//! Documents in this store never carry attributes on tags and never mix
//! text with child tags, so a node is a name, a text body and an ordered
//! list of children. Whitespace between tags is dropped; text of leaf nodes
//! is kept verbatim.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::CodecError;

/// One tag of a parsed or to-be-written document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A leaf node holding `text`.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Append a child and return a handle to it.
    pub fn push(&mut self, child: XmlNode) -> &mut XmlNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// First direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Direct children named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Parse a document and return its root node.
    pub fn parse(xml: &str) -> Result<XmlNode, CodecError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(XmlNode::new(tag_name(&e)?)),
                Event::Empty(e) => {
                    let node = XmlNode::new(tag_name(&e)?);
                    attach(&mut stack, &mut root, node)?;
                }
                Event::End(_) => {
                    let mut node = stack
                        .pop()
                        .ok_or_else(|| CodecError::Malformed("unbalanced end tag".into()))?;
                    // Indentation between child tags.
                    if !node.children.is_empty() && node.text.trim().is_empty() {
                        node.text.clear();
                    }
                    attach(&mut stack, &mut root, node)?;
                }
                Event::Text(e) => {
                    let text = e.unescape()?;
                    append_text(&mut stack, &text)?;
                }
                Event::CData(e) => {
                    let text = String::from_utf8(e.into_inner().into_owned())
                        .map_err(|_| CodecError::Malformed("CDATA is not valid UTF-8".into()))?;
                    append_text(&mut stack, &text)?;
                }
                Event::Eof => break,
                // Declaration, comments, processing instructions, doctype.
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(CodecError::Malformed(format!(
                "unexpected end of document inside <{}>",
                open.name
            )));
        }

        root.ok_or(CodecError::EmptyDocument)
    }

    /// Render this node as a complete document.
    ///
    /// Leaf nodes without text are written as empty tags. Text is only
    /// written for leaf nodes, and fails with
    /// [`CodecError::InvalidCharacter`] if it holds a control character
    /// outside tab, line feed and carriage return.
    pub fn write(&self, indent: usize, declaration: bool) -> Result<String, CodecError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);

        if declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        write_node(&mut writer, self)?;

        let mut out = String::from_utf8(writer.into_inner())
            .map_err(|_| CodecError::Malformed("writer produced invalid UTF-8".into()))?;
        out.push('\n');
        Ok(out)
    }
}

fn tag_name(start: &BytesStart<'_>) -> Result<String, CodecError> {
    let name = start.name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(|_| CodecError::Malformed("tag name is not valid UTF-8".into()))
}

fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), CodecError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None if root.is_some() => Err(CodecError::Malformed(format!(
            "second root element <{}>",
            node.name
        ))),
        None => {
            *root = Some(node);
            Ok(())
        }
    }
}

fn append_text(stack: &mut [XmlNode], text: &str) -> Result<(), CodecError> {
    match stack.last_mut() {
        Some(node) => {
            node.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(CodecError::Malformed("text outside the root element".into())),
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), CodecError> {
    if node.children.is_empty() && node.text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(node.name.as_str())))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new(node.name.as_str())))?;
    if node.children.is_empty() {
        if let Some(character) = node.text.chars().find(|c| !is_xml_char(*c)) {
            return Err(CodecError::InvalidCharacter {
                tag: node.name.clone(),
                character,
            });
        }
        writer.write_event(Event::Text(BytesText::new(&node.text)))?;
    } else {
        for child in &node.children {
            write_node(writer, child)?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
    Ok(())
}

/// The XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
