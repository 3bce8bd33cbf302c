use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::{
    event::{ElementState, KeyboardInput, VirtualKeyCode},
    event_loop::EventLoop,
    window::{Fullscreen, Window, WindowBuilder},
};

use crate::config::Config;
use crate::error::{BubblesError, Result, ShaderStage};
use crate::frame::Backend;
use crate::mesh::{self, Vertex};

pub fn create_window(event_loop: &EventLoop<()>, config: &Config) -> Result<Window> {
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
        .with_fullscreen(config.fullscreen.then_some(Fullscreen::Borderless(None)))
        .build(event_loop)?;
    Ok(window)
}

pub struct Renderer {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    window: Window,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    clear_color: wgpu::Color,

    /// Fans requested since the last present, as (first vertex, vertex count).
    fans: Vec<(u32, u32)>,
    last_frame: Instant,
    keys: [bool; 256],
}

impl Renderer {
    pub async fn new(window: Window, config: &Config) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            dx12_shader_compiler: Default::default(),
        });

        // # Safety
        //
        // The surface needs to live as long as the window that created it.
        // Renderer owns the window and drops the surface first.
        let surface = unsafe { instance.create_surface(&window) }?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(BubblesError::NoAdapter)?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &surface_config);

        let vs_module = compile(&device, ShaderStage::Vertex, config.vertex_shader).await?;
        let fs_module = compile(&device, ShaderStage::Fragment, config.fragment_shader).await?;

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs_module,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });
        if let Some(err) = device.pop_error_scope().await {
            return Err(BubblesError::ShaderLink(err.to_string()));
        }

        let (vertex_count, buffer_size) = vertex_buffer_size(config, device.limits().max_buffer_size)?;
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Vertex Buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let indices = mesh::fan_indices(config.segments);
        let index_buffer = device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Fan Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            }
        );

        log::info!(
            "{} circles, {} vertices, {}x{}",
            config.circle_count,
            vertex_count,
            size.width,
            size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config: surface_config,
            size,
            window,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            clear_color: config.clear_color,

            fans: Vec::with_capacity(config.circle_count),
            last_frame: Instant::now(),
            keys: [false; 256],
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn key_input(&mut self, input: &KeyboardInput) {
        if let Some(k) = input.virtual_keycode {
            self.keys[k as usize] = match input.state {
                ElementState::Pressed => true,
                ElementState::Released => false,
            };
        }
    }
}

/// Vertex count and byte size of the mirror, checked against `limit`.
fn vertex_buffer_size(config: &Config, limit: u64) -> Result<(u32, wgpu::BufferAddress)> {
    let vertex_count = config.vertex_count().ok_or(BubblesError::TooManyCircles {
        count: config.circle_count,
    })?;
    let bytes = vertex_count as u64 * std::mem::size_of::<Vertex>() as u64;
    if bytes > limit {
        return Err(BubblesError::VertexBufferTooLarge { bytes, limit });
    }
    Ok((vertex_count, bytes))
}

async fn compile(
    device: &wgpu::Device,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(match stage {
            ShaderStage::Vertex => "Vertex Shader",
            ShaderStage::Fragment => "Fragment Shader",
        }),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match device.pop_error_scope().await {
        Some(err) => Err(BubblesError::ShaderCompile {
            stage,
            log: err.to_string(),
        }),
        None => Ok(module),
    }
}

impl Backend for Renderer {
    fn elapsed(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }

    fn key_pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys[key as usize]
    }

    fn upload_vertices(&mut self, vertices: &[Vertex]) {
        self.queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
    }

    fn draw_fan(&mut self, first: u32, count: u32) {
        self.fans.push((first, count));
    }

    fn present(&mut self) -> std::result::Result<(), wgpu::SurfaceError> {
        let fans = std::mem::take(&mut self.fans);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            for &(first, count) in &fans {
                let indices = (count.saturating_sub(2) * 3).min(self.index_count);
                render_pass.draw_indexed(0..indices, first as i32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.fans = fans;
        self.fans.clear();

        Ok(())
    }
}
