use std::env;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::warn;
use winit::event_loop::EventLoop;

use glyphlight::app::{print_final_state, App, AppEvent, WindowInitError};
use glyphlight::config::SceneConfig;
use glyphlight::font::OutlineFont;
use glyphlight::provider::{build_glyph, GlyphRequest, GlyphStyle};
use glyphlight::scene::{Mesh, Scene};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let config = SceneConfig::default();

    if options.summary_only {
        return run_summary(&config, &options.font, options.frames);
    }

    match run_interactive(config.clone(), options.font.clone()) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --summary-only mode (set DISPLAY or install X11 libs to enable rendering)."
                );
                run_summary(&config, &options.font, options.frames)
            } else {
                Err(err)
            }
        }
    }
}

fn run_interactive(config: SceneConfig, font_path: PathBuf) -> Result<()> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let event_loop = panic::catch_unwind(AssertUnwindSafe(|| {
        EventLoop::<AppEvent>::with_user_event().build()
    }));
    panic::set_hook(default_hook);
    let event_loop = event_loop
        .map_err(|panic| WindowInitError::from_panic("event loop", panic))?
        .map_err(|err| WindowInitError::from_error("event loop", err))?;

    let proxy = event_loop.create_proxy();
    let mut app = App::new(config, font_path, proxy);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    if let Some(err) = app.take_error() {
        return Err(err);
    }
    print_final_state(app.scene());
    Ok(())
}

/// Headless rendition of the scene lifecycle: glyphs load synchronously,
/// a fixed number of ticks advance the uniforms, and the final state is
/// printed. No surface or GPU is touched.
fn run_summary(config: &SceneConfig, font_path: &Path, frames: u32) -> Result<()> {
    let mut scene = Scene::new(config);
    let style = GlyphStyle {
        size: config.glyph_size,
        depth: config.glyph_depth,
    };

    match OutlineFont::load(font_path) {
        Ok(font) => {
            println!(
                "Loaded outline font {:?} ({} glyphs)",
                font.name(),
                font.glyph_count()
            );
            for spec in &config.glyphs {
                let request = GlyphRequest {
                    symbol: spec.symbol,
                    style,
                };
                match build_glyph(&font, &request) {
                    Ok(geometry) => {
                        println!(
                            " - glyph '{}' attached ({})",
                            spec.symbol,
                            spec.shading.name()
                        );
                        scene.attach(Mesh::glyph(spec, config.ambient_intensity, geometry));
                    }
                    Err(err) => warn!("glyph {:?} not built: {err}", spec.symbol),
                }
            }
        }
        Err(err) => warn!("glyph font unavailable, rendering without glyphs: {err}"),
    }

    for frame in 0..frames {
        scene.sync_uniforms(frame as f32 * SUMMARY_TICK_SECONDS);
    }

    print_final_state(&scene);
    Ok(())
}

/// Simulated tick length for summary mode, one display refresh at 60 Hz.
const SUMMARY_TICK_SECONDS: f32 = 1.0 / 60.0;

struct CliOptions {
    font: PathBuf,
    summary_only: bool,
    frames: u32,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut font = PathBuf::from("assets/fonts/block_regular.xml");
        let mut summary_only = false;
        let mut frames = 120;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--font" => {
                    let Some(path) = args.next() else {
                        return Err(anyhow!("--font requires a path"));
                    };
                    font = PathBuf::from(path);
                }
                "--summary-only" => summary_only = true,
                "--frames" => {
                    let Some(count) = args.next() else {
                        return Err(anyhow!("--frames requires a count"));
                    };
                    frames = count
                        .parse::<u32>()
                        .with_context(|| format!("invalid frame count {count:?}"))?;
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Usage: glyphlight [--font <path>] [--summary-only] [--frames <count>]"
                    ));
                }
            }
        }

        Ok(Self {
            font,
            summary_only,
            frames,
        })
    }
}
