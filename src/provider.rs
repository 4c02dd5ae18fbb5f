use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::config::SceneConfig;
use crate::font::{FontError, OutlineFont};
use crate::geometry::{extrude_outline, Geometry};

/// Styling parameters forwarded to the geometry producer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle {
    pub size: f32,
    pub depth: f32,
}

/// One glyph the scene wants built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRequest {
    pub symbol: char,
    pub style: GlyphStyle,
}

/// Completed build for one requested glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDelivery {
    pub symbol: char,
    pub geometry: Geometry,
}

/// Builds the request list for every glyph the configuration wants.
pub fn requests_for(config: &SceneConfig) -> Vec<GlyphRequest> {
    let style = GlyphStyle {
        size: config.glyph_size,
        depth: config.glyph_depth,
    };
    config
        .glyphs
        .iter()
        .map(|spec| GlyphRequest {
            symbol: spec.symbol,
            style,
        })
        .collect()
}

/// Builds the extruded mesh for one request against an already-loaded font.
pub fn build_glyph(font: &OutlineFont, request: &GlyphRequest) -> Result<Geometry, FontError> {
    let outline = font.outline(request.symbol)?;
    Ok(extrude_outline(outline, request.style.size, request.style.depth))
}

/// Loads the font and resolves every request on a background thread.
///
/// `deliver` fires once per successfully built glyph. A failure anywhere on
/// the way (unreadable font, unknown symbol) is logged and produces no
/// delivery at all; callers treat the affected request as permanently
/// pending and carry on rendering without it.
pub fn spawn_glyph_loader<F>(
    font_path: PathBuf,
    requests: Vec<GlyphRequest>,
    deliver: F,
) -> JoinHandle<()>
where
    F: Fn(GlyphDelivery) + Send + 'static,
{
    thread::spawn(move || {
        let font = match OutlineFont::load(&font_path) {
            Ok(font) => font,
            Err(err) => {
                warn!("glyph font {} unavailable: {err}", font_path.display());
                return;
            }
        };
        debug!(
            "loaded outline font {:?} with {} glyph(s)",
            font.name(),
            font.glyph_count()
        );
        for request in &requests {
            match build_glyph(&font, request) {
                Ok(geometry) => deliver(GlyphDelivery {
                    symbol: request.symbol,
                    geometry,
                }),
                Err(err) => warn!("glyph {:?} not built: {err}", request.symbol),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::mpsc;
    use std::time::Duration;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::config::SceneConfig;

    const FONT_XML: &str = r#"<font>
    <name>Test Blocks</name>
    <glyph>
        <symbol>T</symbol>
        <face>0 0.8  1 0.8  1 1  0 1</face>
        <face>0.4 0  0.6 0  0.6 0.8  0.4 0.8</face>
    </glyph>
    <glyph>
        <symbol>9</symbol>
        <face>0.3 0.5  0.7 0.5  0.7 1  0.3 1</face>
        <face>0.55 0  0.7 0  0.7 0.5  0.55 0.5</face>
    </glyph>
</font>
"#;

    fn write_font() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp font");
        file.write_all(FONT_XML.as_bytes()).expect("write font");
        file
    }

    fn style() -> GlyphStyle {
        GlyphStyle {
            size: 1.0,
            depth: 0.2,
        }
    }

    #[test]
    fn requests_follow_the_configuration() {
        let config = SceneConfig::default();
        let requests = requests_for(&config);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].symbol, 'T');
        assert_eq!(requests[1].symbol, '9');
        assert_eq!(requests[0].style.depth, 0.2);
    }

    #[test]
    fn build_glyph_extrudes_known_symbols() {
        let font = OutlineFont::from_xml(FONT_XML).unwrap();
        let geometry = build_glyph(
            &font,
            &GlyphRequest {
                symbol: 'T',
                style: style(),
            },
        )
        .unwrap();
        assert!(geometry.triangle_count() > 0);

        let missing = build_glyph(
            &font,
            &GlyphRequest {
                symbol: 'Q',
                style: style(),
            },
        );
        assert!(matches!(missing, Err(FontError::MissingGlyph('Q'))));
    }

    #[test]
    fn loader_delivers_each_built_glyph() {
        let font = write_font();
        let (sender, receiver) = mpsc::channel();
        let handle = spawn_glyph_loader(
            font.path().to_path_buf(),
            vec![
                GlyphRequest {
                    symbol: 'T',
                    style: style(),
                },
                GlyphRequest {
                    symbol: '9',
                    style: style(),
                },
            ],
            move |delivery| {
                sender.send(delivery).expect("receiver alive");
            },
        );
        handle.join().expect("loader thread");

        let first = receiver.recv_timeout(Duration::from_secs(1)).unwrap();
        let second = receiver.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(first.symbol, 'T');
        assert_eq!(second.symbol, '9');
        assert!(first.geometry.vertex_count() > 0);
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn unknown_symbols_are_silently_pending() {
        let font = write_font();
        let (sender, receiver) = mpsc::channel();
        let handle = spawn_glyph_loader(
            font.path().to_path_buf(),
            vec![
                GlyphRequest {
                    symbol: 'Q',
                    style: style(),
                },
                GlyphRequest {
                    symbol: '9',
                    style: style(),
                },
            ],
            move |delivery| {
                sender.send(delivery).expect("receiver alive");
            },
        );
        handle.join().expect("loader thread");

        // only the known glyph arrives; the other request stays pending
        let delivered = receiver.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(delivered.symbol, '9');
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn missing_font_delivers_nothing() {
        let (sender, receiver) = mpsc::channel::<GlyphDelivery>();
        let handle = spawn_glyph_loader(
            PathBuf::from("/nonexistent/font.xml"),
            vec![GlyphRequest {
                symbol: 'T',
                style: style(),
            }],
            move |delivery| {
                sender.send(delivery).expect("receiver alive");
            },
        );
        handle.join().expect("loader thread");
        assert!(receiver.try_recv().is_err());
    }
}
