/// One acquired swapchain image plus the encoder recording into it.
///
/// Dropping it without `Gpu::submit` discards the recorded work. Hold it only for
/// the duration of a frame; the next image cannot be acquired meanwhile.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub color_view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
