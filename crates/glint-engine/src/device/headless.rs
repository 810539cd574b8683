use anyhow::Result;

use super::GpuInit;
use super::init::new_instance;

/// Requests a device/queue with no surface attached.
///
/// Used for offscreen rendering and by GPU tests, which skip when this fails
/// (no adapter on the host).
pub async fn request_headless_device(init: GpuInit) -> Result<(wgpu::Device, wgpu::Queue)> {
    let instance = new_instance();
    let (_adapter, device, queue) = init.open_device(&instance, None).await?;
    Ok((device, queue))
}
