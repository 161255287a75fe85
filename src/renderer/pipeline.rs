//! WebGPU render pipeline setup

use glam::Vec2;
use thiserror::Error;

use super::vertex::{Vertex, colors};
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Background + three entities + game over shade, with headroom
const INITIAL_VERTEX_CAPACITY: usize = 64;

/// Map viewport pixels (origin top-left, y down) to normalized device
/// coordinates, letterboxed so the viewport keeps its aspect ratio
pub fn screen_to_ndc(pos: Vec2, surface: (u32, u32)) -> Vec2 {
    let (w, h) = surface;
    let surface_aspect = w as f32 / h.max(1) as f32;
    let viewport_aspect = VIEWPORT_WIDTH / VIEWPORT_HEIGHT;

    let x = pos.x / VIEWPORT_WIDTH * 2.0 - 1.0;
    let y = 1.0 - pos.y / VIEWPORT_HEIGHT * 2.0;

    if surface_aspect > viewport_aspect {
        // Wider than the viewport: bars left and right
        Vec2::new(x * viewport_aspect / surface_aspect, y)
    } else {
        // Taller: bars top and bottom
        Vec2::new(x, y * surface_aspect / viewport_aspect)
    }
}

/// Failures while bringing up the GPU
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create GPU device")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    /// Vertices the current buffer can hold
    pub vertex_capacity: usize,
    pub vertex_count: u32,
    /// Surface size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("dino-jump-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_quad_pipeline(&device, config.format);
        let vertex_capacity = INITIAL_VERTEX_CAPACITY;
        let vertex_buffer = create_vertex_buffer(&device, vertex_capacity);

        log::info!("Renderer ready ({}x{}, {:?})", width, height, config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity,
            vertex_count: 0,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload vertices and render
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        if vertices.is_empty() {
            return Ok(());
        }

        // Convert vertices to NDC
        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let ndc = screen_to_ndc(v.pos(), self.size);
                Vertex::new(ndc.x, ndc.y, v.color)
            })
            .collect();

        // Grow the buffer only when the frame outgrows it
        if ndc_vertices.len() > self.vertex_capacity {
            self.vertex_capacity = ndc_vertices.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
        }
        self.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&ndc_vertices));
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Letterbox bars; the viewport paints its own background
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(colors::LETTERBOX[0]),
                            g: f64::from(colors::LETTERBOX[1]),
                            b: f64::from(colors::LETTERBOX[2]),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..self.vertex_count, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vertex_buffer"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Solid-color triangle list pipeline with alpha blending
fn create_quad_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("quad_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("quad_pipeline_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("quad_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_surface_maps_corners() {
        let size = (800, 800);
        assert_eq!(screen_to_ndc(Vec2::new(0.0, 0.0), size), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc(Vec2::new(400.0, 400.0), size), Vec2::new(1.0, -1.0));
        assert_eq!(screen_to_ndc(Vec2::new(200.0, 200.0), size), Vec2::ZERO);
    }

    #[test]
    fn test_wide_surface_letterboxes() {
        let ndc = screen_to_ndc(Vec2::new(400.0, 0.0), (1600, 800));
        assert!((ndc.x - 0.5).abs() < 0.0001);
        assert!((ndc.y - 1.0).abs() < 0.0001);
    }
}
