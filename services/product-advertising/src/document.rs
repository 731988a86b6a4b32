// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Generic navigable XML tree for service responses.

use prodsign_core::{Error, Result};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::{self, Display, Formatter, Write};

/// A parsed XML response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

/// One XML element with its attributes, text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Document {
    /// Parse a document from raw bytes.
    ///
    /// Whitespace around text is trimmed, entities are unescaped and CDATA is
    /// kept as text. Namespace prefixes are dropped from element names.
    pub fn parse(bs: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bs);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::parse("malformed xml")
                    .with_source(e)
                    .with_context(format!("position: {}", reader.buffer_position()))
            })?;

            match event {
                Event::Start(e) => stack.push(Element::from_start(&e)?),
                Event::Empty(e) => {
                    let elem = Element::from_start(&e)?;
                    attach(&mut stack, &mut root, elem)?;
                }
                Event::End(_) => {
                    let elem = stack
                        .pop()
                        .ok_or_else(|| Error::parse("unexpected closing tag"))?;
                    attach(&mut stack, &mut root, elem)?;
                }
                Event::Text(e) => {
                    let raw = reader
                        .decoder()
                        .decode(&e)
                        .map_err(|e| Error::parse("text is not valid utf-8").with_source(e))?;
                    let text = unescape(&raw)
                        .map_err(|e| Error::parse("invalid escape in text").with_source(e))?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(&e)
                        .map_err(|e| Error::parse("cdata is not valid utf-8").with_source(e))?;
                    push_text(&mut stack, text)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctype
                // carry no data.
                _ => {}
            }
        }

        if let Some(elem) = stack.last() {
            return Err(Error::parse("unclosed element").with_context(elem.name.clone()));
        }
        let root = root.ok_or_else(|| Error::parse("document has no root element"))?;

        Ok(Self { root })
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Find the first element at `path` below the root, see [`Element::find`].
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.root.find(path)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.root, f)
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, elem: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(elem);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::parse("document has more than one root element")
            .with_context(elem.name));
    }
    *root = Some(elem);
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(elem) => {
            elem.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(Error::parse("text outside of root element")),
    }
}

impl Element {
    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(e.local_name().as_ref())
            .map_err(|e| Error::parse("element name is not valid utf-8").with_source(e))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| {
                Error::parse("malformed attribute")
                    .with_source(err)
                    .with_context(name.clone())
            })?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::parse("attribute name is not valid utf-8").with_source(e))?;
            let raw = std::str::from_utf8(&attr.value)
                .map_err(|e| Error::parse("attribute value is not valid utf-8").with_source(e))?;
            let value = unescape(raw)
                .map_err(|e| Error::parse("invalid escape in attribute").with_source(e))?;
            attributes.push((key.to_string(), value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    /// Element name without namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child element with this name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Child elements with this name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Find the first element matching a slash separated path of names.
    ///
    /// Every branch is searched, so `Items/Item/ASIN` finds the ASIN of the
    /// first `Item` that has one.
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }

    /// Find every element matching a slash separated path of names.
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let mut current = vec![self];
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|e| e.children.iter().filter(move |c| c.name == segment))
                .collect();
        }
        current
    }

    fn write_indented(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }
        f.write_str(&self.name)?;
        for (k, v) in &self.attributes {
            write!(f, " {k}={v:?}")?;
        }
        if !self.text.is_empty() {
            write!(f, ": {}", self.text)?;
        }
        f.write_char('\n')?;

        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Renders an indented outline, one element per line.
impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prodsign_core::ErrorKind;
    use test_case::test_case;

    const ITEM_LOOKUP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ItemLookupResponse xmlns="http://webservices.amazon.com/AWSECommerceService/2011-08-01">
  <OperationRequest>
    <RequestId>5a8b7b9e-1f3e-4b6a-9c1d-2e3f4a5b6c7d</RequestId>
    <Arguments>
      <Argument Name="Operation" Value="ItemLookup"/>
      <Argument Name="ItemId" Value="B00008OE6I"/>
    </Arguments>
  </OperationRequest>
  <Items>
    <Request><IsValid>True</IsValid></Request>
    <Item>
      <ASIN>B00008OE6I</ASIN>
      <ItemAttributes>
        <Title>Tom &amp; Jerry</Title>
        <Feature><![CDATA[<b>bold</b> claim]]></Feature>
      </ItemAttributes>
    </Item>
    <Item>
      <ASIN>0679722769</ASIN>
    </Item>
  </Items>
</ItemLookupResponse>"#;

    #[test]
    fn test_parse_item_lookup() -> Result<()> {
        let doc = Document::parse(ITEM_LOOKUP.as_bytes())?;

        assert_eq!(doc.root().name(), "ItemLookupResponse");
        assert_eq!(
            doc.root().attr("xmlns"),
            Some("http://webservices.amazon.com/AWSECommerceService/2011-08-01")
        );
        assert_eq!(
            doc.find("Items/Request/IsValid").map(Element::text),
            Some("True")
        );
        assert_eq!(
            doc.find("Items/Item/ItemAttributes/Title").map(Element::text),
            Some("Tom & Jerry")
        );
        assert_eq!(
            doc.find("Items/Item/ItemAttributes/Feature").map(Element::text),
            Some("<b>bold</b> claim")
        );

        let asins: Vec<_> = doc
            .root()
            .find_all("Items/Item/ASIN")
            .into_iter()
            .map(Element::text)
            .collect();
        assert_eq!(asins, vec!["B00008OE6I", "0679722769"]);
        Ok(())
    }

    #[test]
    fn test_navigation() -> Result<()> {
        let doc = Document::parse(ITEM_LOOKUP.as_bytes())?;
        let args = doc
            .find("OperationRequest/Arguments")
            .expect("arguments must exist");

        let names: Vec<_> = args
            .children_named("Argument")
            .filter_map(|a| a.attr("Name"))
            .collect();
        assert_eq!(names, vec!["Operation", "ItemId"]);
        assert_eq!(args.children().len(), 2);
        assert!(args.child("Missing").is_none());
        assert!(doc.find("Items/Item/Missing").is_none());
        Ok(())
    }

    #[test]
    fn test_find_skips_branches_without_match() -> Result<()> {
        let doc = Document::parse(b"<r><a><x/></a><a><b>2</b></a></r>")?;
        assert_eq!(doc.find("a/b").map(Element::text), Some("2"));
        Ok(())
    }

    #[test]
    fn test_display_outline() -> Result<()> {
        let doc = Document::parse(br#"<r v="1"><a>x</a><b/></r>"#)?;
        assert_eq!(doc.to_string(), "r v=\"1\"\n  a: x\n  b\n");
        Ok(())
    }

    #[test]
    fn test_namespace_prefix_dropped() -> Result<()> {
        let doc = Document::parse(br#"<s:Envelope xmlns:s="urn:x"><s:Body>ok</s:Body></s:Envelope>"#)?;
        assert_eq!(doc.root().name(), "Envelope");
        assert_eq!(doc.find("Body").map(Element::text), Some("ok"));
        Ok(())
    }

    #[test_case(b""; "empty")]
    #[test_case(b"   "; "whitespace only")]
    #[test_case(b"<a><b></a>"; "mismatched end")]
    #[test_case(b"<a><b>"; "unclosed")]
    #[test_case(b"<a/><b/>"; "two roots")]
    #[test_case(b"text"; "no element")]
    #[test_case(b"<a>\xff</a>"; "invalid utf8")]
    fn test_parse_invalid(bs: &[u8]) {
        let err = Document::parse(bs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
