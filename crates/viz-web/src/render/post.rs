use super::helpers::{self, HDR_FORMAT};
use super::targets::RenderTargets;
use smallvec::SmallVec;
use viz_core::{BloomSettings, PostUniforms, BLOOM_KERNEL_RADII, BLOOM_MIPS};

type PerMip<T> = SmallVec<[T; BLOOM_MIPS]>;

/// Pipelines and per-pass uniform buffers for the bloom chain.
///
/// Every pass owns its own uniform buffer: queued writes land before the
/// encoder is submitted, so a shared buffer would leave each pass seeing
/// only the last write.
pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // five mip textures
    sampler: wgpu::Sampler,
    bright_buf: wgpu::Buffer,
    composite_buf: wgpu::Buffer,
    blur_h_bufs: PerMip<wgpu::Buffer>,
    blur_v_bufs: PerMip<wgpu::Buffer>,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups that reference the current render targets. Rebuilt on resize.
pub(crate) struct PostBindGroups {
    bright: wgpu::BindGroup,
    blur_h: PerMip<wgpu::BindGroup>,
    blur_v: PerMip<wgpu::BindGroup>,
    composite_src: wgpu::BindGroup,
    composite_mips: wgpu::BindGroup,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            helpers::texture_layout_entry(0),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            helpers::uniform_layout_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let mip_entries: PerMip<wgpu::BindGroupLayoutEntry> =
        (0..BLOOM_MIPS as u32).map(helpers::texture_layout_entry).collect();
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &mip_entries,
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("linear_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline =
        helpers::make_post_pipeline(device, &pl_single, post_shader, "fs_bright", HDR_FORMAT);
    let blur_pipeline =
        helpers::make_post_pipeline(device, &pl_single, post_shader, "fs_blur", HDR_FORMAT);
    let composite_pipeline =
        helpers::make_post_pipeline(device, &pl_composite, post_shader, "fs_composite", swap_format);

    let blur_bufs = |dir: &str| -> PerMip<wgpu::Buffer> {
        (0..BLOOM_MIPS)
            .map(|i| helpers::uniform_buffer::<PostUniforms>(device, &format!("blur_{dir}{i}")))
            .collect()
    };

    PostResources {
        bright_buf: helpers::uniform_buffer::<PostUniforms>(device, "bright_uniforms"),
        composite_buf: helpers::uniform_buffer::<PostUniforms>(device, "composite_uniforms"),
        blur_h_bufs: blur_bufs("h"),
        blur_v_bufs: blur_bufs("v"),
        bgl0,
        bgl1,
        sampler,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

impl PostResources {
    fn source_group(
        &self,
        device: &wgpu::Device,
        label: &str,
        src: &wgpu::TextureView,
        uniforms: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(src),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        })
    }

    pub(crate) fn bind_groups(&self, device: &wgpu::Device, targets: &RenderTargets) -> PostBindGroups {
        let mut blur_h = PerMip::new();
        let mut blur_v = PerMip::new();
        for (i, mip) in targets.mips.iter().enumerate() {
            // Level 0 blurs the bright pass; deeper levels blur the previous result
            let input = match i {
                0 => &targets.bright_view,
                _ => &targets.mips[i - 1].v_view,
            };
            blur_h.push(self.source_group(device, &format!("bg_blur_h{i}"), input, &self.blur_h_bufs[i]));
            blur_v.push(self.source_group(
                device,
                &format!("bg_blur_v{i}"),
                &mip.h_view,
                &self.blur_v_bufs[i],
            ));
        }
        let mip_entries: PerMip<wgpu::BindGroupEntry> = targets
            .mips
            .iter()
            .enumerate()
            .map(|(i, mip)| wgpu::BindGroupEntry {
                binding: i as u32,
                resource: wgpu::BindingResource::TextureView(&mip.v_view),
            })
            .collect();
        PostBindGroups {
            bright: self.source_group(device, "bg_bright", &targets.hdr_view, &self.bright_buf),
            blur_h,
            blur_v,
            composite_src: self.source_group(device, "bg_composite", &targets.hdr_view, &self.composite_buf),
            composite_mips: device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("bg_composite_mips"),
                layout: &self.bgl1,
                entries: &mip_entries,
            }),
        }
    }

    /// Blur uniforms depend only on the mip sizes.
    pub(crate) fn write_blur_uniforms(&self, queue: &wgpu::Queue, targets: &RenderTargets) {
        for (i, mip) in targets.mips.iter().enumerate() {
            let radius = BLOOM_KERNEL_RADII[i];
            let h = PostUniforms::blur([1.0, 0.0], radius, mip.width, mip.height);
            let v = PostUniforms::blur([0.0, 1.0], radius, mip.width, mip.height);
            queue.write_buffer(&self.blur_h_bufs[i], 0, bytemuck::bytes_of(&h));
            queue.write_buffer(&self.blur_v_bufs[i], 0, bytemuck::bytes_of(&v));
        }
    }

    pub(crate) fn write_frame_uniforms(&self, queue: &wgpu::Queue, bloom: &BloomSettings) {
        queue.write_buffer(&self.bright_buf, 0, bytemuck::bytes_of(&PostUniforms::bright(bloom)));
        queue.write_buffer(
            &self.composite_buf,
            0,
            bytemuck::bytes_of(&PostUniforms::composite(bloom)),
        );
    }

    /// Bright pass, the blur chain, then scene plus bloom onto `output`.
    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        groups: &PostBindGroups,
        output: &wgpu::TextureView,
    ) {
        blit(encoder, "bright_pass", &targets.bright_view, &self.bright_pipeline, &groups.bright, None);
        for (i, mip) in targets.mips.iter().enumerate() {
            blit(encoder, "blur_h", &mip.h_view, &self.blur_pipeline, &groups.blur_h[i], None);
            blit(encoder, "blur_v", &mip.v_view, &self.blur_pipeline, &groups.blur_v[i], None);
        }
        blit(
            encoder,
            "composite",
            output,
            &self.composite_pipeline,
            &groups.composite_src,
            Some(&groups.composite_mips),
        );
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
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
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
    drop(r);
}
