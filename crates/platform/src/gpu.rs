use std::sync::Arc;

use egui::{Context as EguiContext, viewport::ViewportId};
use egui_wgpu::{Renderer as EguiWgpuRenderer, ScreenDescriptor, wgpu};
use egui_winit::State as EguiWinitState;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::error::PlatformError;

/// Window surface plus the egui pipeline that paints into it.
pub struct Gfx {
    pub window: Arc<Window>,
    egui_ctx: EguiContext,
    egui_state: EguiWinitState,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    egui_renderer: EguiWgpuRenderer,
}

impl Gfx {
    pub fn new(window: Arc<Window>) -> Result<Self, PlatformError> {
        let egui_ctx = EguiContext::default();
        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            window.theme(),
            None,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::default(),
        }))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(PlatformError::NoSurfaceFormat)?;

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let egui_renderer = EguiWgpuRenderer::new(&device, format, None, 1, true);

        Ok(Self {
            window,
            egui_ctx,
            egui_state,
            surface,
            device,
            queue,
            surface_config,
            egui_renderer,
        })
    }

    /// Feeds a window event to egui. Returns whether egui wants a repaint.
    pub fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(&self.window, event).repaint
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.surface_config.width = size.width.max(1);
        self.surface_config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Runs one egui pass and presents it. Returns whether a frame reached
    /// the screen.
    pub fn paint(&mut self, clear: egui::Color32, run_ui: impl FnOnce(&EguiContext)) -> bool {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                // reconfigure, common after display changes
                self.surface.configure(&self.device, &self.surface_config);
                return false;
            }
            Err(wgpu::SurfaceError::Outdated) => return false, // minimized / moved
            Err(err) => {
                log::error!("surface error: {err:?}");
                return false;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(&self.window);
        self.egui_ctx.begin_pass(raw_input);
        run_ui(&self.egui_ctx);
        let full_output = self.egui_ctx.end_pass();
        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let pixels_per_point = self.egui_ctx.pixels_per_point();
        let clipped = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);
        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let screen = ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point,
        };
        let extra = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &clipped,
            &screen,
        );

        let clear = egui::Rgba::from(clear);
        {
            let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r() as f64,
                            g: clear.g() as f64,
                            b: clear.b() as f64,
                            a: clear.a() as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer
                .render(&mut rpass.forget_lifetime(), &clipped, &screen);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue
            .submit(extra.into_iter().chain(Some(encoder.finish())));
        frame.present();
        true
    }
}
