use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Error};
use log::{debug, info, warn};
use pollster::block_on;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoopProxy};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

use crate::config::SceneConfig;
use crate::input::{apply_command, KeyCommand};
use crate::provider::{requests_for, spawn_glyph_loader, GlyphDelivery};
use crate::render::Renderer;
use crate::scene::{Mesh, Scene};

/// Messages delivered into the event-loop thread from background work.
///
/// Everything that mutates the scene funnels through the one event-loop
/// thread, so a frame never observes a half-applied attachment.
#[derive(Debug)]
pub enum AppEvent {
    GlyphReady(GlyphDelivery),
}

/// Interactive application: owns the scene and drives it through winit.
pub struct App {
    config: SceneConfig,
    font_path: PathBuf,
    proxy: EventLoopProxy<AppEvent>,
    scene: Scene,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    started: Instant,
    last_error: Option<Error>,
}

impl App {
    pub fn new(config: SceneConfig, font_path: PathBuf, proxy: EventLoopProxy<AppEvent>) -> Self {
        let scene = Scene::new(&config);
        Self {
            config,
            font_path,
            proxy,
            scene,
            window: None,
            renderer: None,
            started: Instant::now(),
            last_error: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Error that forced the loop to exit, if any.
    pub fn take_error(&mut self) -> Option<Error> {
        self.last_error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        self.last_error = Some(error);
        event_loop.exit();
    }

    fn attach_glyph(&mut self, delivery: GlyphDelivery) {
        let Some(spec) = self.config.glyph_spec(delivery.symbol) else {
            warn!("dropping delivery for unconfigured glyph {:?}", delivery.symbol);
            return;
        };
        info!(
            "glyph {:?} ready, attaching with the {} program",
            spec.symbol,
            spec.shading.name()
        );
        let mesh = Mesh::glyph(spec, self.config.ambient_intensity, delivery.geometry);
        self.scene.attach(mesh);
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        // host key-repeat passes through as further presses
        let Key::Character(text) = event.logical_key.as_ref() else {
            return;
        };
        let Some(command) = text.chars().next().and_then(KeyCommand::from_char) else {
            return;
        };
        apply_command(&mut self.scene, command, self.config.key_step);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let time = self.started.elapsed().as_secs_f32();
        self.scene.sync_uniforms(time);
        renderer.update_globals(&self.scene.camera);
        match renderer.render(&self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = renderer.window().inner_size();
                renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("GPU is out of memory"));
            }
            Err(wgpu::SurfaceError::Timeout) => {
                info!("surface timeout; retrying next frame");
            }
            Err(err) => {
                warn!("surface error: {err}");
            }
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("glyphlight")
            .with_inner_size(LogicalSize::new(1280.0, 720.0));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.fail(
                    event_loop,
                    WindowInitError::from_error("window", err).into(),
                );
                return;
            }
        };

        let renderer = match block_on(Renderer::new(Arc::clone(&window))) {
            Ok(renderer) => renderer,
            Err(err) => {
                self.fail(
                    event_loop,
                    WindowInitError::from_error("renderer", err).into(),
                );
                return;
            }
        };

        // projection aspect is fixed from the surface's size at this instant
        let size = renderer.surface_size();
        self.scene.camera.set_aspect(size.width, size.height);

        // kick off the asynchronous glyph build; the handle is dropped
        // because nothing ever cancels or waits for the load
        let proxy = self.proxy.clone();
        spawn_glyph_loader(
            self.font_path.clone(),
            requests_for(&self.config),
            move |delivery| {
                let symbol = delivery.symbol;
                if proxy.send_event(AppEvent::GlyphReady(delivery)).is_err() {
                    debug!("glyph {symbol:?} arrived after shutdown, dropped");
                }
            },
        );

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::GlyphReady(delivery) => self.attach_glyph(delivery),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let owns_window = self
            .renderer
            .as_ref()
            .map(|renderer| renderer.window_id() == window_id)
            .unwrap_or(false);
        if !owns_window {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Prints the scene summary shown at teardown and by summary mode.
pub fn print_final_state(scene: &Scene) {
    println!("Final scene state:");
    println!(" - renderables: {}", scene.renderable_count());
    let light = scene.light.position();
    println!(
        " - light pos=({:.2}, {:.2}, {:.2})",
        light.x, light.y, light.z
    );
    let camera = scene.camera.position;
    println!(
        " - camera pos=({:.2}, {:.2}, {:.2})",
        camera.x, camera.y, camera.z
    );
    for mesh in scene.glyphs() {
        println!(
            " - {} pos=({:.2}, {:.2}, {:.2}) material={}",
            mesh.label,
            mesh.position.x,
            mesh.position.y,
            mesh.position.z,
            mesh.material.kind_name()
        );
    }
}

/// Window or GPU bring-up failure; the binary downgrades these to a
/// headless summary run instead of aborting.
#[derive(Debug)]
pub struct WindowInitError {
    message: String,
}

impl WindowInitError {
    pub fn from_panic(stage: &str, panic: Box<dyn Any + Send>) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {}", panic_message(panic)),
        }
    }

    pub fn from_error(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => "unknown panic".into(),
        },
    }
}
