//! In-memory markup tree and its text rendering.

use crate::domain::ports::MarkupBuilder;
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct ElementNode {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<ElementRef>,
}

/// Ordered element tree. Attribute order is first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementTree {
    nodes: Vec<ElementNode>,
    root: Option<ElementRef>,
    namespaces: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Write the `<?xml ...?>` declaration.
    pub declaration: bool,
    /// Spaces per nesting level; `None` renders on a single line.
    pub indent: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            declaration: true,
            indent: None,
        }
    }
}

impl RenderOptions {
    pub fn pretty() -> Self {
        Self {
            declaration: true,
            indent: Some(2),
        }
    }
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<ElementRef> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

    pub fn tag(&self, element: ElementRef) -> &str {
        &self.nodes[element.0].tag
    }

    pub fn attribute(&self, element: ElementRef, key: &str) -> Option<&str> {
        self.nodes[element.0]
            .attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self, element: ElementRef) -> &[(String, String)] {
        &self.nodes[element.0].attributes
    }

    pub fn children(&self, element: ElementRef) -> &[ElementRef] {
        &self.nodes[element.0].children
    }

    fn push(&mut self, tag: &str) -> ElementRef {
        self.nodes.push(ElementNode {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        });
        ElementRef(self.nodes.len() - 1)
    }

    pub fn render(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, options);
        out
    }

    pub fn write_to<W: Write>(&self, out: &mut W, options: &RenderOptions) -> fmt::Result {
        if options.declaration {
            out.write_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
            if options.indent.is_some() {
                out.write_char('\n')?;
            }
        }

        if let Some(root) = self.root {
            self.write_element(out, root, 0, options)?;
            if options.indent.is_some() {
                out.write_char('\n')?;
            }
        }
        Ok(())
    }

    fn write_element<W: Write>(
        &self,
        out: &mut W,
        element: ElementRef,
        depth: usize,
        options: &RenderOptions,
    ) -> fmt::Result {
        let node = &self.nodes[element.0];
        if let Some(width) = options.indent {
            write!(out, "{:1$}", "", depth * width)?;
        }

        write!(out, "<{}", node.tag)?;
        if Some(element) == self.root {
            for (prefix, uri) in &self.namespaces {
                write!(out, " xmlns:{}=\"", prefix)?;
                escape_attribute(out, uri)?;
                out.write_char('"')?;
            }
        }
        for (key, value) in &node.attributes {
            write!(out, " {}=\"", key)?;
            escape_attribute(out, value)?;
            out.write_char('"')?;
        }

        if node.children.is_empty() {
            return out.write_str("/>");
        }

        out.write_char('>')?;
        for child in &node.children {
            if options.indent.is_some() {
                out.write_char('\n')?;
            }
            self.write_element(out, *child, depth + 1, options)?;
        }
        if let Some(width) = options.indent {
            write!(out, "\n{:1$}", "", depth * width)?;
        }
        write!(out, "</{}>", node.tag)
    }
}

fn escape_attribute<W: Write>(out: &mut W, value: &str) -> fmt::Result {
    for c in value.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            '\t' => out.write_str("&#9;")?,
            '\n' => out.write_str("&#10;")?,
            '\r' => out.write_str("&#13;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}

impl MarkupBuilder for ElementTree {
    type Element = ElementRef;

    /// Starts a new document, discarding anything built before.
    fn create_root(&mut self, tag: &str, namespaces: &[(&str, &str)]) -> ElementRef {
        self.nodes.clear();
        self.namespaces = namespaces
            .iter()
            .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
            .collect();
        let root = self.push(tag);
        self.root = Some(root);
        root
    }

    fn create_child(&mut self, parent: ElementRef, tag: &str) -> ElementRef {
        let child = self.push(tag);
        self.nodes[parent.0].children.push(child);
        child
    }

    fn set_attribute(&mut self, element: ElementRef, key: &str, value: &str) {
        let attributes = &mut self.nodes[element.0].attributes;
        match attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => attributes.push((key.to_string(), value.to_string())),
        }
    }
}

impl fmt::Display for ElementTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, &RenderOptions::default())
    }
}
