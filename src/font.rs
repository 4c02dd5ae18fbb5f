use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glam::Vec2;
use roxmltree::{Document, Node};
use thiserror::Error;

use crate::geometry::GlyphOutline;

/// Errors produced while loading or querying an outline font.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("unable to read font file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid font XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("<{0}> tag is missing")]
    MissingTag(&'static str),
    #[error("glyph <symbol> must be a single character, got {0:?}")]
    BadSymbol(String),
    #[error("malformed face coordinates: {0:?}")]
    BadFace(String),
    #[error("face on glyph {symbol:?} has {points} points, need at least 3")]
    ShortFace { symbol: char, points: usize },
    #[error("glyph {0:?} has no faces")]
    EmptyGlyph(char),
    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),
}

/// Glyph-outline font description.
///
/// Each glyph is a set of convex faces covering a unit em square, wound
/// counter-clockwise, ready for extrusion into a solid mesh.
#[derive(Debug, Clone, Default)]
pub struct OutlineFont {
    name: String,
    glyphs: HashMap<char, GlyphOutline>,
}

impl OutlineFont {
    /// Reads and parses a font description from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_xml(&xml)
    }

    /// Parses the XML font description produced by the outline tooling.
    pub fn from_xml(xml: &str) -> Result<Self, FontError> {
        let document = Document::parse(xml)?;
        let name = optional_text(&document.root(), "name").unwrap_or_else(|| "unnamed".to_string());

        let mut glyphs = HashMap::new();
        for node in document.descendants().filter(|n| n.has_tag_name("glyph")) {
            let symbol = required_text(&node, "symbol")?;
            let mut chars = symbol.chars();
            let (Some(symbol_char), None) = (chars.next(), chars.next()) else {
                return Err(FontError::BadSymbol(symbol));
            };

            let mut outline = GlyphOutline::default();
            for face in node.children().filter(|child| child.has_tag_name("face")) {
                let text = face.text().unwrap_or_default();
                let points = parse_points(text)?;
                if points.len() < 3 {
                    return Err(FontError::ShortFace {
                        symbol: symbol_char,
                        points: points.len(),
                    });
                }
                outline.faces.push(points);
            }
            if outline.faces.is_empty() {
                return Err(FontError::EmptyGlyph(symbol_char));
            }
            glyphs.insert(symbol_char, outline);
        }

        Ok(Self { name, glyphs })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns the outline for a symbol, if the font carries it.
    pub fn outline(&self, symbol: char) -> Result<&GlyphOutline, FontError> {
        self.glyphs
            .get(&symbol)
            .ok_or(FontError::MissingGlyph(symbol))
    }
}

fn required_text(node: &Node<'_, '_>, tag: &'static str) -> Result<String, FontError> {
    optional_text(node, tag).ok_or(FontError::MissingTag(tag))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    node.descendants()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

/// Parses a flat, whitespace-separated `x y x y ...` coordinate list.
fn parse_points(text: &str) -> Result<Vec<Vec2>, FontError> {
    let numbers: Vec<f32> = text
        .split_whitespace()
        .map(|component| {
            component
                .parse::<f32>()
                .map_err(|_| FontError::BadFace(text.trim().to_string()))
        })
        .collect::<Result<_, _>>()?;
    if numbers.len() % 2 != 0 {
        return Err(FontError::BadFace(text.trim().to_string()));
    }
    Ok(numbers
        .chunks_exact(2)
        .map(|pair| Vec2::new(pair[0], pair[1]))
        .collect())
}
