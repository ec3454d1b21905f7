//! Thin lookup layer over an SVG markup tree
//!
//! Finds every `path` element and pulls out the raw `d` string plus the
//! remaining attributes as a style map. Document schema (groups, transforms,
//! viewports) is not interpreted here; a `path` element is a `path` element
//! wherever it sits in the tree.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::DocumentError;
use crate::log::debug;

/// One `path` element: its raw path data and its other attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathElement {
    /// The `d` attribute value, empty when the element carries none.
    pub data: String,
    /// Every attribute except `d`, keyed by local name.
    pub styles: HashMap<String, String>,
}

/// The path elements of one SVG document, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgDocument {
    pub paths: Vec<PathElement>,
}

impl SvgDocument {
    /// Collect the path elements of an XML string.
    pub fn parse(xml: &str) -> Result<SvgDocument, DocumentError> {
        let doc = roxmltree::Document::parse(xml)?;
        let mut paths = Vec::new();
        for node in doc.descendants() {
            if !node.is_element() || node.tag_name().name() != "path" {
                continue;
            }
            let mut element = PathElement::default();
            for attr in node.attributes() {
                if attr.name() == "d" {
                    element.data = attr.value().to_string();
                } else {
                    element
                        .styles
                        .insert(attr.name().to_string(), attr.value().to_string());
                }
            }
            paths.push(element);
        }
        debug!(paths = paths.len(), "collected path elements");
        Ok(SvgDocument { paths })
    }

    /// Read and parse an SVG file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<SvgDocument, DocumentError> {
        let xml = fs::read_to_string(path)?;
        SvgDocument::parse(&xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 30">
        <g transform="translate(5,5)">
            <path d="M0,0 L10,10" stroke="#ff0000" stroke-width="2"/>
        </g>
        <path d="M1,1 Z" fill="none"/>
        <rect width="10" height="10"/>
    </svg>"##;

    #[test]
    fn collects_paths_anywhere_in_the_tree() {
        let doc = SvgDocument::parse(DOC).unwrap();
        assert_eq!(doc.paths.len(), 2);
        assert_eq!(doc.paths[0].data, "M0,0 L10,10");
        assert_eq!(doc.paths[1].data, "M1,1 Z");
    }

    #[test]
    fn splits_d_from_style_attributes() {
        let doc = SvgDocument::parse(DOC).unwrap();
        let first = &doc.paths[0];
        assert!(!first.styles.contains_key("d"));
        assert_eq!(first.styles.get("stroke").map(String::as_str), Some("#ff0000"));
        assert_eq!(first.styles.get("stroke-width").map(String::as_str), Some("2"));
    }

    #[test]
    fn path_without_data_yields_empty_string() {
        let doc = SvgDocument::parse(r#"<svg><path stroke="red"/></svg>"#).unwrap();
        assert_eq!(doc.paths[0].data, "");
    }

    #[test]
    fn malformed_xml_is_a_document_error() {
        let err = SvgDocument::parse("<svg><path").unwrap_err();
        assert!(matches!(err, DocumentError::Xml(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SvgDocument::from_file("/nonexistent/file.svg").unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }
}
