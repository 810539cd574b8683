use crate::error::{EngineError, Result};

/// Device, queue and target format borrowed for the duration of a call.
///
/// Shapes take it to upload vertices; the engine takes it to build pipelines
/// and write per-frame buffers.
#[derive(Copy, Clone)]
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Format of the color attachment draws are encoded into.
    pub surface_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
        }
    }

    /// Fails with [`EngineError::Allocation`] when a buffer of `size` bytes
    /// exceeds the device's `max_buffer_size`.
    pub(crate) fn check_allocation(&self, label: &'static str, size: u64) -> Result<()> {
        let limit = self.device.limits().max_buffer_size;
        if size > limit {
            return Err(EngineError::Allocation { label, size, limit });
        }
        Ok(())
    }
}

/// Where a frame's render pass is encoded.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
