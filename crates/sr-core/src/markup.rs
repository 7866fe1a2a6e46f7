//! Minimal SVG markup scanner.
//!
//! Built on `winnow` 0.7. Not a validating XML parser: it records the element
//! tree (names, attributes, nesting) and skips prolog, doctype, comments,
//! CDATA and text. That is all the in-memory host and the lint need to answer
//! "is there an `<svg>` root" and "which `<g inkscape:label>` groups exist".

use winnow::ascii::multispace0;
use winnow::combinator::{alt, delimited, opt, preceded};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{take_till, take_until, take_while};

/// Attribute Inkscape writes for a layer's display name.
pub const LABEL_ATTRIBUTE: &str = "inkscape:label";

/// One element start tag plus its position in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupElement {
    /// Qualified tag name as written (`g`, `svg`, `svg:g`).
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Number of open ancestors.
    pub depth: usize,
    /// Index one past this element's last descendant.
    pub end: usize,
}

impl MarkupElement {
    /// Tag name without namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn label(&self) -> Option<&str> {
        self.attribute(LABEL_ATTRIBUTE)
    }
}

/// Elements in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgMarkup {
    pub elements: Vec<MarkupElement>,
}

impl SvgMarkup {
    pub fn get(&self, idx: usize) -> Option<&MarkupElement> {
        self.elements.get(idx)
    }

    /// The first `<svg>` element in document order, like `querySelector("svg")`.
    pub fn root(&self) -> Option<usize> {
        self.elements.iter().position(|e| e.local_name() == "svg")
    }

    /// Indices of every descendant of `idx`, in document order.
    pub fn descendants(&self, idx: usize) -> std::ops::Range<usize> {
        match self.elements.get(idx) {
            Some(el) => (idx + 1)..el.end,
            None => 0..0,
        }
    }

    /// First `<g>` below `root` whose label equals `label` exactly.
    pub fn find_group(&self, root: usize, label: &str) -> Option<usize> {
        self.descendants(root).find(|&i| {
            let el = &self.elements[i];
            el.local_name() == "g" && el.label() == Some(label)
        })
    }

    /// Every labelled `<g>` below `root`, in document order.
    pub fn group_labels(&self, root: usize) -> Vec<(usize, &str)> {
        self.descendants(root)
            .filter_map(|i| {
                let el = &self.elements[i];
                if el.local_name() != "g" {
                    return None;
                }
                el.label().map(|label| (i, label))
            })
            .collect()
    }

    pub fn attribute(&self, idx: usize, name: &str) -> Option<&str> {
        self.elements.get(idx).and_then(|el| el.attribute(name))
    }
}

struct OpenTag<'a> {
    name: &'a str,
    attributes: Vec<(String, String)>,
    self_closing: bool,
}

/// Scan SVG (or any XML-ish) markup into an element list.
#[must_use = "parsing result should be used"]
pub fn parse_svg_markup(input: &str) -> Result<SvgMarkup, String> {
    let mut doc = SvgMarkup::default();
    let mut open: Vec<usize> = Vec::new();
    let mut rest = input;

    loop {
        // Text content is irrelevant.
        let _ = take_till::<_, _, ContextError>(0.., '<').parse_next(&mut rest);
        if rest.is_empty() {
            break;
        }

        if rest.starts_with("<!--") {
            skip_past(&mut rest, "-->").map_err(|e| format!("Unterminated comment: {e}"))?;
        } else if rest.starts_with("<![CDATA[") {
            skip_past(&mut rest, "]]>").map_err(|e| format!("Unterminated CDATA: {e}"))?;
        } else if rest.starts_with("<?") {
            skip_past(&mut rest, "?>")
                .map_err(|e| format!("Unterminated processing instruction: {e}"))?;
        } else if rest.starts_with("<!") {
            skip_past(&mut rest, ">").map_err(|e| format!("Unterminated declaration: {e}"))?;
        } else if rest.starts_with("</") {
            let name = parse_close_tag
                .parse_next(&mut rest)
                .map_err(|e| format!("Close tag parse error: {e}"))?;
            close_element(&mut doc, &mut open, name);
        } else {
            let tag = parse_open_tag
                .parse_next(&mut rest)
                .map_err(|e| format!("Tag parse error: {e}"))?;
            let idx = doc.elements.len();
            doc.elements.push(MarkupElement {
                name: tag.name.to_string(),
                attributes: tag.attributes,
                depth: open.len(),
                end: idx + 1,
            });
            if !tag.self_closing {
                open.push(idx);
            }
        }
    }

    // Unclosed elements extend to the end of the document.
    let len = doc.elements.len();
    for idx in open {
        doc.elements[idx].end = len;
    }

    Ok(doc)
}

/// Close the innermost open element named `name`, implicitly closing anything
/// opened after it. Stray close tags are ignored.
fn close_element(doc: &mut SvgMarkup, open: &mut Vec<usize>, name: &str) {
    let Some(pos) = open.iter().rposition(|&i| doc.elements[i].name == name) else {
        log::trace!("stray close tag </{name}>");
        return;
    };
    let len = doc.elements.len();
    for idx in open.drain(pos..) {
        doc.elements[idx].end = len;
    }
}

fn skip_past(input: &mut &str, terminator: &'static str) -> ModalResult<()> {
    (take_until(0.., terminator), terminator)
        .void()
        .parse_next(input)
}

fn parse_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, ':' | '-' | '_' | '.')
    })
    .parse_next(input)
}

fn parse_open_tag<'a>(input: &mut &'a str) -> ModalResult<OpenTag<'a>> {
    let name = preceded('<', parse_name).parse_next(input)?;
    let mut attributes = Vec::new();

    loop {
        let _: ModalResult<&str> = multispace0.parse_next(input);
        let s: &'a str = *input;
        if let Some(after) = s.strip_prefix("/>") {
            *input = after;
            return Ok(OpenTag {
                name,
                attributes,
                self_closing: true,
            });
        }
        if let Some(after) = s.strip_prefix('>') {
            *input = after;
            return Ok(OpenTag {
                name,
                attributes,
                self_closing: false,
            });
        }
        attributes.push(parse_attribute.parse_next(input)?);
    }
}

fn parse_close_tag<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited("</", parse_name, (multispace0, '>')).parse_next(input)
}

fn parse_attribute(input: &mut &str) -> ModalResult<(String, String)> {
    let name = parse_name.parse_next(input)?;
    let value = opt(preceded((multispace0, '=', multispace0), parse_attr_value)).parse_next(input)?;
    Ok((name.to_string(), decode_entities(value.unwrap_or(""))))
}

fn parse_attr_value<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt((
        delimited('"', take_till(0.., '"'), '"'),
        delimited('\'', take_till(0.., '\''), '\''),
        take_while(1.., |c: char| !c.is_whitespace() && c != '>'),
    ))
    .parse_next(input)
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LAYERED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- Created with Inkscape -->
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg width="800" height="600" viewBox="0 0 800 600"
     xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
  <defs><style><![CDATA[ .a > .b { fill: red } ]]></style></defs>
  <g inkscape:label="0000P0" inkscape:groupmode="layer" id="layer1">
    <rect x="0" y="0" width="10" height="10"/>
  </g>
  <g inkscape:label='0001P1'>
    <g inkscape:label="nested"><path d="M0 0 L1 1"/></g>
  </g>
</svg>
"#;

    #[test]
    fn finds_root_after_prolog() {
        let doc = parse_svg_markup(LAYERED).unwrap();
        let root = doc.root().expect("svg root");
        assert_eq!(doc.attribute(root, "viewBox"), Some("0 0 800 600"));
        assert_eq!(doc.attribute(root, "width"), Some("800"));
        assert_eq!(doc.elements[root].depth, 0);
    }

    #[test]
    fn collects_labels_in_document_order() {
        let doc = parse_svg_markup(LAYERED).unwrap();
        let root = doc.root().unwrap();
        let labels: Vec<&str> = doc.group_labels(root).into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["0000P0", "0001P1", "nested"]);
    }

    #[test]
    fn single_and_double_quotes_both_match() {
        let doc = parse_svg_markup(LAYERED).unwrap();
        let root = doc.root().unwrap();
        assert!(doc.find_group(root, "0000P0").is_some());
        assert!(doc.find_group(root, "0001P1").is_some());
        assert!(doc.find_group(root, "0002P2").is_none());
    }

    #[test]
    fn self_closing_elements_have_no_descendants() {
        let doc = parse_svg_markup(r#"<svg><rect/><g inkscape:label="a"></g></svg>"#).unwrap();
        let rect = doc.elements.iter().position(|e| e.name == "rect").unwrap();
        assert!(doc.descendants(rect).is_empty());
        assert_eq!(doc.descendants(0), 1..3);
    }

    #[test]
    fn groups_outside_root_are_not_layers() {
        let input = r#"<div><g inkscape:label="0000P0"></g><svg><g inkscape:label="x"/></svg></div>"#;
        let doc = parse_svg_markup(input).unwrap();
        let root = doc.root().unwrap();
        assert!(doc.find_group(root, "0000P0").is_none());
        assert!(doc.find_group(root, "x").is_some());
    }

    #[test]
    fn no_svg_element_means_no_root() {
        let doc = parse_svg_markup("<html><body><p>404 page</p></body></html>").unwrap();
        assert_eq!(doc.root(), None);
    }

    #[test]
    fn plain_text_parses_to_nothing() {
        let doc = parse_svg_markup("Not Found").unwrap();
        assert!(doc.elements.is_empty());
    }

    #[test]
    fn entities_in_attributes_are_decoded() {
        let doc = parse_svg_markup(r#"<svg><g inkscape:label="P &amp; D"/></svg>"#).unwrap();
        assert!(doc.find_group(0, "P & D").is_some());
    }

    #[test]
    fn stray_close_tag_is_ignored() {
        let doc = parse_svg_markup("<svg></p><g/></svg>").unwrap();
        assert_eq!(doc.elements.len(), 2);
        assert_eq!(doc.elements[0].end, 2);
    }

    #[test]
    fn unterminated_comment_is_an_error() {
        let err = parse_svg_markup("<svg><!-- never closed").unwrap_err();
        assert!(err.contains("Unterminated comment"), "got: {err}");
    }

    #[test]
    fn namespaced_svg_root_is_recognized() {
        let doc = parse_svg_markup(r#"<svg:svg><svg:g inkscape:label="a"/></svg:svg>"#).unwrap();
        let root = doc.root().unwrap();
        assert!(doc.find_group(root, "a").is_some());
    }
}
