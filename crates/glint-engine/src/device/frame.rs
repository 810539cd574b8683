/// A swapchain image acquired for one frame, with its encoder.
///
/// Holding the surface texture prevents acquisition of the next frame; hand it
/// back to `Gpu::submit` promptly.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
