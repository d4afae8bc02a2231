use super::helpers;
use wgpu;

/// Multisampled color and depth attachments, sized to the surface. The
/// views hold their textures alive.
///
/// The color target resolves into the swap-chain image each frame.
pub(crate) struct RenderTargets {
    pub(crate) msaa_view: wgpu::TextureView,
    pub(crate) depth_view: wgpu::TextureView,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let msaa_view = helpers::create_attachment_view(
            device,
            "msaa_color",
            width,
            height,
            sample_count,
            color_format,
        );
        let depth_view = helpers::create_attachment_view(
            device,
            "depth",
            width,
            height,
            sample_count,
            helpers::DEPTH_FORMAT,
        );
        Self {
            msaa_view,
            depth_view,
            color_format,
            sample_count,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height, self.color_format, self.sample_count);
    }
}
