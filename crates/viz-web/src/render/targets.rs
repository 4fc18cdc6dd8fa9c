use super::helpers;
use smallvec::SmallVec;
use viz_core::BLOOM_MIPS;

/// One level of the bloom chain: horizontal blur output, then vertical.
pub(crate) struct MipLevel {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) h_view: wgpu::TextureView,
    pub(crate) v_view: wgpu::TextureView,
}

/// Offscreen color targets for the frame.
///
/// Only views are held; each view keeps its texture alive.
///
/// - `msaa` is the multisampled scene attachment, absent at 1 sample.
/// - `hdr_view` holds the resolved scene in Rgba16Float.
/// - `bright_view` is the half-res luminosity pass.
/// - `mips` halve again per level; level 0 matches `bright`.
pub(crate) struct RenderTargets {
    pub(crate) sample_count: u32,
    pub(crate) msaa: Option<wgpu::TextureView>,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) bright_view: wgpu::TextureView,
    pub(crate) mips: SmallVec<[MipLevel; BLOOM_MIPS]>,
}

/// Half the size, rounded, never below one pixel.
fn half(n: u32) -> u32 {
    ((n + 1) / 2).max(1)
}

fn build_mips(device: &wgpu::Device, width: u32, height: u32) -> SmallVec<[MipLevel; BLOOM_MIPS]> {
    let (mut w, mut h) = (half(width), half(height));
    let mut mips = SmallVec::new();
    for i in 0..BLOOM_MIPS {
        let h_view = helpers::create_sampled_target(device, &format!("bloom_h{i}"), w, h);
        let v_view = helpers::create_sampled_target(device, &format!("bloom_v{i}"), w, h);
        mips.push(MipLevel {
            width: w,
            height: h,
            h_view,
            v_view,
        });
        w = half(w);
        h = half(h);
    }
    mips
}

fn build_msaa(
    device: &wgpu::Device,
    width: u32,
    height: u32,
    sample_count: u32,
) -> Option<wgpu::TextureView> {
    (sample_count > 1).then(|| {
        helpers::create_color_texture(
            device,
            "scene_msaa",
            width,
            height,
            helpers::HDR_FORMAT,
            sample_count,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        )
    })
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32, sample_count: u32) -> Self {
        let hdr_view = helpers::create_sampled_target(device, "hdr_tex", width, height);
        let bright_view =
            helpers::create_sampled_target(device, "bloom_bright", half(width), half(height));
        Self {
            sample_count,
            msaa: build_msaa(device, width, height, sample_count),
            hdr_view,
            bright_view,
            mips: build_mips(device, width, height),
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height, self.sample_count);
    }

    /// Where the scene pass draws, and where it resolves to.
    pub(crate) fn scene_attachment(&self) -> (&wgpu::TextureView, Option<&wgpu::TextureView>) {
        match &self.msaa {
            Some(view) => (view, Some(&self.hdr_view)),
            None => (&self.hdr_view, None),
        }
    }
}

