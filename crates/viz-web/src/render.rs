//! WebGPU compositor: MSAA wireframe scene into an HDR target, then the
//! bloom chain and the final composite onto the canvas swapchain.

mod helpers;
mod post;
mod scene;
mod targets;

use post::{PostBindGroups, PostResources};
use scene::ScenePass;
use targets::RenderTargets;
use viz_core::{Compositor, FrameView, IcosphereWireframe, ShaderSources, VisualizerConfig, POST_WGSL};
use web_sys as web;

pub struct GpuCompositor {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: ScenePass,
    post: PostResources,
    groups: PostBindGroups,
    targets: RenderTargets,
}

impl GpuCompositor {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        cfg: &VisualizerConfig,
        shaders: &ShaderSources,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mesh = IcosphereWireframe::new(cfg.mesh_radius, cfg.mesh_detail);
        log::info!(
            "[gpu] {}x{} {:?} msaa={} edges={}",
            width,
            height,
            format,
            cfg.msaa_samples,
            mesh.edge_count()
        );
        let scene = ScenePass::new(&device, shaders, &mesh, cfg.msaa_samples);
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let targets = RenderTargets::new(&device, width, height, cfg.msaa_samples);
        let groups = post.bind_groups(&device, &targets);
        post.write_blur_uniforms(&queue, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            post,
            groups,
            targets,
        })
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl Compositor for GpuCompositor {
    type Error = wgpu::SurfaceError;

    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), wgpu::SurfaceError> {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let scene_uniforms = frame.uniforms.to_gpu(frame.camera.view_projection());
        self.queue.write_buffer(
            &self.scene.uniform_buffer,
            0,
            bytemuck::bytes_of(&scene_uniforms),
        );
        self.post.write_frame_uniforms(&self.queue, frame.bloom);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let (attachment, resolve) = self.targets.scene_attachment();
        self.scene.encode(&mut encoder, attachment, resolve);
        self.post
            .encode(&mut encoder, &self.targets, &self.groups, &view);

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        self.targets.recreate(&self.device, width, height);
        self.groups = self.post.bind_groups(&self.device, &self.targets);
        self.post.write_blur_uniforms(&self.queue, &self.targets);
        log::debug!("[gpu] resized to {}x{}", width, height);
    }
}
