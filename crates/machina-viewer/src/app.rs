//! Main viewer application — combines wgpu scene rendering with egui panels.

use crate::config::ViewerConfig;
use crate::highlight::HighlightController;
use crate::loader::AssetLoader;
use crate::panels::{DetailAction, DetailPanel, RenderStats, Toolbar, ToolbarAction};
use crate::picking;
use anyhow::{Context, Result};
use machina_render::{Camera, RenderContext, SceneRenderer};
use machina_scene::{ModelPlaylist, Scene, SelectionHub};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Turntable rotation rate (radians per second around +Y)
const TURNTABLE_RATE: f32 = 0.5;

/// Cursor travel below this many pixels still counts as a click
const CLICK_SLOP: f64 = 4.0;

/// Run the viewer application
pub fn run(config: ViewerConfig) -> Result<()> {
    let playlist = ModelPlaylist::new(config.models.clone())
        .context("viewer needs at least one model path")?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(config, playlist);
    event_loop.run_app(&mut app)?;

    Ok(())
}

/// The main viewer application
pub struct ViewerApp {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    scene_renderer: Option<SceneRenderer>,
    camera: Camera,

    // Scene and selection state
    scene: Scene,
    hub: SelectionHub,
    playlist: ModelPlaylist,
    loader: AssetLoader,
    highlight: HighlightController,

    // Input state
    left_pressed: bool,
    right_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    drag_distance: f64,

    // egui state
    egui_ctx: egui::Context,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    show_panels: bool,

    // Panel state
    toolbar: Toolbar,
    detail_panel: DetailPanel,
    render_stats: RenderStats,

    last_frame_time: Instant,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig, playlist: ModelPlaylist) -> Self {
        let mut hub = SelectionHub::new();
        let detail_panel = DetailPanel::new(&mut hub);

        Self {
            config,
            window: None,
            render_context: None,
            scene_renderer: None,
            camera: Camera::new(),
            scene: Scene::empty(),
            hub,
            playlist,
            loader: AssetLoader::new(),
            highlight: HighlightController::new(),
            left_pressed: false,
            right_pressed: false,
            last_mouse_pos: None,
            drag_distance: 0.0,
            egui_ctx: egui::Context::default(),
            egui_winit: None,
            egui_renderer: None,
            show_panels: true,
            toolbar: Toolbar::new(),
            detail_panel,
            render_stats: RenderStats::new(),
            last_frame_time: Instant::now(),
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create viewer window")?,
        );
        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to initialize viewer render context")?;

        self.camera.aspect = render_context.aspect_ratio();

        // Initialize egui
        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &render_context.device,
            render_context.config.format,
            None,
            1,
            false,
        );

        let scene_renderer = SceneRenderer::new(&render_context);

        self.render_context = Some(render_context);
        self.scene_renderer = Some(scene_renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        // Kick off the first model load
        self.request_model_load(self.playlist.current().to_path_buf());

        Ok(())
    }

    fn request_model_load(&mut self, path: PathBuf) {
        log::info!("Loading model: {}", path.display());
        self.loader.request(path);
    }

    /// Apply finished loads; stale generations are discarded
    fn apply_loader_messages(&mut self) {
        while let Some(msg) = self.loader.poll() {
            if !self.loader.is_current(msg.generation) {
                log::debug!("Discarding stale load: {}", msg.path.display());
                continue;
            }

            match msg.result {
                Ok(import) => {
                    log::info!(
                        "Loaded model '{}' ({} meshes, {} nodes)",
                        import.name,
                        import.meshes.len(),
                        import.nodes.len()
                    );

                    // The new scene invalidates any node references
                    self.highlight.forget();
                    self.hub.clear();
                    self.scene = Scene::from_import(import);

                    if let (Some(context), Some(renderer)) =
                        (&self.render_context, &mut self.scene_renderer)
                    {
                        renderer.rebuild_from_scene(&self.scene, &context.device);
                    }
                }
                Err(e) => {
                    log::error!("Failed to load model {}: {}", msg.path.display(), e);
                }
            }
        }
    }

    /// Screen size in physical pixels
    fn screen_size(&self) -> (f32, f32) {
        match &self.render_context {
            Some(ctx) => (ctx.config.width as f32, ctx.config.height as f32),
            None => (self.config.width as f32, self.config.height as f32),
        }
    }

    /// Hit-test a click and publish the result as the new selection.
    /// A click that hits nothing clears the selection.
    fn handle_click(&mut self, x: f32, y: f32) {
        let (width, height) = self.screen_size();
        let targets = picking::build_pick_targets(&self.scene);
        let hit = picking::pick_node(x, y, width, height, &self.camera, &targets);
        self.hub.set(hit.map(|(id, _)| id));
    }

    fn switch_model(&mut self) {
        let path = self.playlist.advance().to_path_buf();
        self.request_model_load(path);
    }

    fn render(&mut self) {
        if self.render_context.is_none()
            || self.scene_renderer.is_none()
            || self.window.is_none()
        {
            return;
        }

        // Per-frame update
        let now = Instant::now();
        let dt = (now - self.last_frame_time).as_secs_f32().min(0.1);
        self.last_frame_time = now;

        self.apply_loader_messages();
        self.scene.spin(TURNTABLE_RATE * dt);
        self.camera.update(dt);
        self.highlight.update(&mut self.scene, now);
        self.detail_panel.pump();

        let output = match self
            .render_context
            .as_ref()
            .unwrap()
            .surface
            .get_current_texture()
        {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => return,
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.render_stats.record_frame();

        // Render the 3D scene
        {
            let context = self.render_context.as_ref().unwrap();
            let renderer = self.scene_renderer.as_mut().unwrap();
            renderer.set_selected_node(self.hub.current());
            renderer.render(context, &self.scene, &self.camera, &view);
        }

        // Render the egui overlay, then apply the actions it produced
        let (toolbar_action, detail_action) = self.render_egui(&view);

        match toolbar_action {
            Some(ToolbarAction::TogglePanels) => {
                self.show_panels = !self.show_panels;
            }
            Some(ToolbarAction::SwitchModel) => {
                self.switch_model();
            }
            Some(ToolbarAction::HighlightSelection) => {
                self.highlight
                    .trigger(&mut self.scene, self.hub.current(), Instant::now());
            }
            Some(ToolbarAction::ResetCamera) => {
                self.camera.reset();
            }
            None => {}
        }

        if detail_action == DetailAction::ClearSelection {
            self.hub.clear();
        }

        output.present();
    }

    fn render_egui(
        &mut self,
        target_view: &wgpu::TextureView,
    ) -> (Option<ToolbarAction>, DetailAction) {
        // Extract references to disjoint fields to satisfy the borrow checker
        let window = match &self.window {
            Some(w) => w.clone(),
            None => return (None, DetailAction::None),
        };
        let context = match &self.render_context {
            Some(c) => c,
            None => return (None, DetailAction::None),
        };
        let egui_winit = match &mut self.egui_winit {
            Some(e) => e,
            None => return (None, DetailAction::None),
        };

        let raw_input = egui_winit.take_egui_input(&window);

        let toolbar = &self.toolbar;
        let detail_panel = &self.detail_panel;
        let render_stats = &self.render_stats;
        let scene = &self.scene;
        let show_panels = self.show_panels;
        let model_label = format!(
            "{} ({}/{})",
            if scene.name.is_empty() { "loading…" } else { scene.name.as_str() },
            self.playlist.position() + 1,
            self.playlist.len()
        );

        let mut toolbar_action = None;
        let mut detail_action = DetailAction::None;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::TopBottomPanel::top("toolbar_panel").show(ctx, |ui| {
                toolbar_action = toolbar.ui(ui, &model_label);
            });

            if show_panels {
                egui::SidePanel::right("detail_panel")
                    .default_width(260.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        detail_action = detail_panel.ui(ui, scene);
                    });

                egui::TopBottomPanel::bottom("stats_panel")
                    .default_height(30.0)
                    .show(ctx, |ui| {
                        ui.horizontal(|ui| {
                            render_stats.ui(ui);
                        });
                    });
            }
        });

        egui_winit.handle_platform_output(&window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [context.config.width, context.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut egui_renderer = self.egui_renderer.take().unwrap();

        let mut encoder =
            context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("egui Encoder"),
                });

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&context.device, &context.queue, *id, image_delta);
        }

        egui_renderer.update_buffers(
            &context.device,
            &context.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        context.queue.submit(std::iter::once(encoder.finish()));

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        self.egui_renderer = Some(egui_renderer);

        (toolbar_action, detail_action)
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                log::error!("Failed to initialize viewer: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let Some(egui_winit) = &mut self.egui_winit {
            if let Some(window) = &self.window {
                let response = egui_winit.on_window_event(window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                    self.camera.aspect = context.aspect_ratio();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => {
                            event_loop.exit();
                        }
                        PhysicalKey::Code(KeyCode::Space) => {
                            self.camera.reset();
                        }
                        PhysicalKey::Code(KeyCode::Tab) => {
                            self.show_panels = !self.show_panels;
                        }
                        PhysicalKey::Code(KeyCode::KeyM) => {
                            self.switch_model();
                        }
                        PhysicalKey::Code(KeyCode::KeyH) => {
                            self.highlight.trigger(
                                &mut self.scene,
                                self.hub.current(),
                                Instant::now(),
                            );
                        }
                        _ => {}
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => match button {
                MouseButton::Left => {
                    if state == ElementState::Pressed {
                        self.left_pressed = true;
                        self.drag_distance = 0.0;
                    } else {
                        self.left_pressed = false;
                        // A short press with no travel is a pick, not an orbit
                        if self.drag_distance < CLICK_SLOP {
                            if let Some((x, y)) = self.last_mouse_pos {
                                self.handle_click(x as f32, y as f32);
                            }
                        }
                    }
                }
                MouseButton::Right => {
                    self.right_pressed = state == ElementState::Pressed;
                }
                _ => {}
            },

            WindowEvent::CursorMoved { position, .. } => {
                if let Some((last_x, last_y)) = self.last_mouse_pos {
                    let dx = (position.x - last_x) as f32;
                    let dy = (position.y - last_y) as f32;

                    if self.left_pressed {
                        self.drag_distance += (dx.abs() + dy.abs()) as f64;
                        self.camera.orbit(-dx * 0.01, -dy * 0.01);
                    }

                    if self.right_pressed {
                        self.camera.pan(-dx * 0.02, dy * 0.02);
                    }
                }

                self.last_mouse_pos = Some((position.x, position.y));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.camera.zoom(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.render();
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
