use std::borrow::Cow;

use polybounce_core::{Transform, Vec2};
use pollster::block_on;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::utils::{vertices_from_outline, ShapeUniform, Vertex};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("shader failed validation: {0}")]
    Shader(String),
    #[error("render pipeline creation failed: {0}")]
    Pipeline(String),
    #[error("outline has no points")]
    EmptyOutline,
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Per-frame values the shape is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub transform: Transform,
    pub color_cycle_time: f32,
}

/// Seam between the simulation and the graphics backend.
pub trait RenderAdapter {
    /// Replaces the vertex buffer with a closed outline.
    fn upload_outline(&mut self, points: &[Vec2]) -> Result<(), RenderError>;
    fn resize(&mut self, width: u32, height: u32);
    fn draw(&mut self, params: &DrawParams) -> Result<(), RenderError>;
}

pub struct WgpuRenderer<'a> {
    pub size: PhysicalSize<u32>,
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
}

impl<'a> WgpuRenderer<'a> {
    pub fn new(
        surface: wgpu::Surface<'a>,
        instance: &wgpu::Instance,
        size: PhysicalSize<u32>,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let adapter = block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            // Request an adapter which can render to our surface
            compatible_surface: Some(&surface),
        }))
        .ok_or(RenderError::NoAdapter)?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("polybounce device"),
                required_features: wgpu::Features::empty(),
                required_limits:
                    wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);
        let config = wgpu::SurfaceConfiguration {
            desired_maximum_frame_latency: 2,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shape uniform"),
            size: std::mem::size_of::<ShapeUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("shape_uniform_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    // transform in the vertex stage, color in the fragment stage
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ShapeUniform>() as _,
                        ),
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shape_uniform_bind_group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shape shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("../shaders/shape.wgsl"))),
        });
        if let Some(err) = block_on(device.pop_error_scope()) {
            return Err(RenderError::Shader(err.to_string()));
        }

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shape outline pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..wgpu::PrimitiveState::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = block_on(device.pop_error_scope()) {
            return Err(RenderError::Pipeline(err.to_string()));
        }

        Ok(Self {
            size,
            surface,
            device,
            queue,
            config,
            render_pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer: None,
            vertex_count: 0,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height as f32
    }

    /// Re-applies the current configuration after the surface was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl RenderAdapter for WgpuRenderer<'_> {
    fn upload_outline(&mut self, points: &[Vec2]) -> Result<(), RenderError> {
        if points.is_empty() {
            return Err(RenderError::EmptyOutline);
        }
        let vertices = vertices_from_outline(points);
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("outline vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        log::debug!("uploaded outline with {} vertices", vertices.len());
        self.vertex_buffer = Some(buffer);
        self.vertex_count = vertices.len() as u32;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            // minimized; keep the last configuration
            return;
        }
        self.size = PhysicalSize::new(width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    fn draw(&mut self, params: &DrawParams) -> Result<(), RenderError> {
        let uniform = ShapeUniform::new(&params.transform, self.aspect(), params.color_cycle_time);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(vertex_buffer) = &self.vertex_buffer {
                rpass.set_pipeline(&self.render_pipeline);
                rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
                rpass.set_vertex_buffer(0, vertex_buffer.slice(..));
                rpass.draw(0..self.vertex_count, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Headless [`RenderAdapter`] that records what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub uploads: Vec<Vec<Vec2>>,
    pub draws: Vec<DrawParams>,
    pub size: Option<(u32, u32)>,
    /// The next draw fails as if the surface had been lost.
    pub lose_surface: bool,
}

impl RenderAdapter for RecordingRenderer {
    fn upload_outline(&mut self, points: &[Vec2]) -> Result<(), RenderError> {
        if points.is_empty() {
            return Err(RenderError::EmptyOutline);
        }
        self.uploads.push(points.to_vec());
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }

    fn draw(&mut self, params: &DrawParams) -> Result<(), RenderError> {
        if std::mem::take(&mut self.lose_surface) {
            return Err(RenderError::Surface(wgpu::SurfaceError::Lost));
        }
        self.draws.push(*params);
        Ok(())
    }
}
