//! Shader pipeline shared by every draw.
//!
//! One WGSL module, one bind group layout (a dynamic-offset uniform block), and
//! one render pipeline per [`Topology`]. Point sprites use their own vertex
//! entry point and read the vertex buffer per instance.

use wgpu::naga;

use crate::error::{EngineError, Result};

use super::common::{draw_uniforms_min_binding_size, Vertex};
use super::primitive::Topology;

pub(crate) const SHADER_SOURCE: &str = include_str!("shaders/flat.wgsl");

/// Parses and validates WGSL before handing it to the device.
///
/// wgpu reports shader errors through the device error callback (a panic by
/// default); validating up front turns them into an `EngineError`.
pub(crate) fn validate_wgsl(source: &str) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| EngineError::Shader(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| EngineError::Shader(e.emit_to_string(source)))?;

    Ok(())
}

/// GPU objects built from the shader for one surface format.
pub(crate) struct PipelineSet {
    pub format: wgpu::TextureFormat,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pipelines: [wgpu::RenderPipeline; 6],
}

impl PipelineSet {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self> {
        validate_wgsl(SHADER_SOURCE)?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glint flat shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glint draw bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: draw_uniforms_min_binding_size(),
                },
                count: None,
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glint pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipelines =
            Topology::ALL.map(|t| create_pipeline(device, &layout, &shader, format, t));

        log::debug!("built {} pipelines for surface format {format:?}", pipelines.len());

        Ok(Self {
            format,
            bind_group_layout,
            pipelines,
        })
    }

    #[inline]
    pub fn get(&self, topology: Topology) -> &wgpu::RenderPipeline {
        &self.pipelines[topology.slot()]
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    topology: Topology,
) -> wgpu::RenderPipeline {
    let (entry_point, vertex_layout) = match topology {
        Topology::PointSprites => ("vs_point", Vertex::instance_layout()),
        _ => ("vs_main", Vertex::layout()),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("glint draw pipeline"),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(entry_point),
            compilation_options: Default::default(),
            buffers: &[vertex_layout],
        },

        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: topology.to_wgpu(),
            strip_index_format: topology.strip_index_format(),
            front_face: wgpu::FrontFace::Ccw,
            // Winding of user outlines is not enforced.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_shader_validates() {
        validate_wgsl(SHADER_SOURCE).unwrap();
    }

    #[test]
    fn broken_shader_is_reported() {
        let bad = "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return 1; }";
        let err = validate_wgsl(bad).unwrap_err();
        assert!(matches!(err, EngineError::Shader(_)));
    }

    #[test]
    fn syntax_error_is_reported() {
        assert!(matches!(validate_wgsl("fn ("), Err(EngineError::Shader(_))));
    }
}
