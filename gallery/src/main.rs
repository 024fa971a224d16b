//! Kārikā Quanta — verse gallery
//!
//! Animated quantum metaphors for verses of the Mūlamadhyamakakārikā.
//!
//! Controls:
//! - Space or click: scene trigger (observe / measure / tip)
//! - R: reset the scene
//! - N/P: next / previous verse
//! - Arrow keys: orbit camera, mouse wheel: zoom

use common::{CameraRig, GpuContext};
use gallery::lifecycle::Gallery;
use gallery::panel::{self, PanelAction, PanelState};
use gallery::renderer::{entity_instances, GalleryRenderer};
use gallery::scene::Input;
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

const MAX_POINTS: usize = 600;
const MAX_LINES: usize = 16;

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GpuContext,
    renderer: GalleryRenderer,
    gallery: Gallery,
    camera: CameraRig,
    egui: EguiState,
    panel: PanelState,
}

impl App {
    fn new(ctx: GpuContext) -> Self {
        let renderer = GalleryRenderer::new(&ctx, MAX_POINTS, MAX_LINES);

        let mut gallery = Gallery::new();
        gallery.activate(0);
        let camera = Self::camera_for(&gallery, ctx.aspect_ratio());

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Self {
            ctx,
            renderer,
            gallery,
            camera,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
            panel: PanelState::default(),
        }
    }

    fn camera_for(gallery: &Gallery, aspect: f32) -> CameraRig {
        if gallery.verse().is_some_and(|v| v.flat) {
            CameraRig::flat(6.5, aspect)
        } else {
            CameraRig::orbit(14.0, aspect)
        }
    }

    /// Rebuild the rig when navigation crosses the flat/orbit boundary.
    fn sync_camera(&mut self) {
        let wants_flat = self.gallery.verse().is_some_and(|v| v.flat);
        let is_flat = matches!(self.camera, CameraRig::Flat(_));
        if wants_flat != is_flat {
            self.camera = Self::camera_for(&self.gallery, self.camera.aspect());
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.set_aspect(self.ctx.aspect_ratio());
    }

    fn update(&mut self, dt: f32) {
        self.gallery.frame(dt);
    }

    fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::Prev => {
                self.gallery.prev();
                self.sync_camera();
            }
            PanelAction::Next => {
                self.gallery.next();
                self.sync_camera();
            }
            PanelAction::Reset => self.gallery.trigger(Input::Reset),
            PanelAction::Primary => self.gallery.trigger(Input::Primary),
            PanelAction::ToggleObserve => self.gallery.trigger(Input::ToggleObserve),
            PanelAction::Coupling(v) => self.gallery.trigger(Input::Coupling(v)),
            PanelAction::Amplitude(v) => self.gallery.trigger(Input::Amplitude(v)),
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.update_camera(&self.ctx.queue, &self.camera);

        let (num_points, num_lines) = match self.gallery.scene() {
            Some(scene) => (
                self.renderer
                    .update_points(&self.ctx.queue, &entity_instances(&scene.entities)),
                self.renderer.update_lines(&self.ctx.queue, &scene.lines()),
            ),
            None => (0, 0),
        };

        // Build the UI and collect this frame's actions
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let mut actions = Vec::new();
        let verse = self.gallery.verse();
        let index = self.gallery.index();
        let total = self.gallery.len();
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            if let (Some(scene), Some(verse)) = (self.gallery.scene(), verse) {
                panel::draw_status_bar(ctx, &scene.status(), index, total);
                actions = panel::draw_verse_panel(ctx, verse, scene, &mut self.panel);
            }
        });

        self.egui
            .state
            .handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self
            .egui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui
                .renderer
                .update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &view, num_lines, num_points);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
            self.egui
                .renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        for action in actions {
            self.apply(action);
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::Space => self.gallery.trigger(Input::Primary),
            KeyCode::KeyR => self.gallery.trigger(Input::Reset),
            KeyCode::KeyN => {
                self.gallery.next();
                self.sync_camera();
            }
            KeyCode::KeyP => {
                self.gallery.prev();
                self.sync_camera();
            }
            KeyCode::ArrowLeft => self.camera.rotate(-0.1, 0.0),
            KeyCode::ArrowRight => self.camera.rotate(0.1, 0.0),
            KeyCode::ArrowUp => self.camera.rotate(0.0, 0.1),
            KeyCode::ArrowDown => self.camera.rotate(0.0, -0.1),
            _ => {}
        }
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui
            .state
            .on_window_event(&self.ctx.window, event)
            .consumed
    }
}

fn main() {
    env_logger::init();

    let (ctx, event_loop) = pollster::block_on(GpuContext::create(
        "Kārikā Quanta — verses and quantum metaphors",
        1280,
        800,
    ));

    let mut app = App::new(ctx);
    let mut last_time = std::time::Instant::now();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { ref event, .. } => {
                    let consumed = app.handle_window_event(event);

                    if !consumed {
                        match event {
                            WindowEvent::CloseRequested => elwt.exit(),
                            WindowEvent::Resized(size) => app.resize(*size),
                            WindowEvent::KeyboardInput {
                                event:
                                    KeyEvent {
                                        physical_key: PhysicalKey::Code(key),
                                        state,
                                        ..
                                    },
                                ..
                            } => app.handle_key(*key, *state),
                            WindowEvent::MouseInput {
                                state: ElementState::Pressed,
                                button: MouseButton::Left,
                                ..
                            } => app.gallery.trigger(Input::Primary),
                            WindowEvent::MouseWheel { delta, .. } => {
                                let scroll = match delta {
                                    MouseScrollDelta::LineDelta(_, y) => *y,
                                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                                };
                                app.camera.zoom(scroll);
                            }
                            WindowEvent::RedrawRequested => {
                                let now = std::time::Instant::now();
                                let dt = (now - last_time).as_secs_f32().min(0.1);
                                last_time = now;

                                app.update(dt);
                                match app.render() {
                                    Ok(_) => {}
                                    Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                    Err(e) => eprintln!("Render error: {:?}", e),
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .expect("event loop error");
}
