//! Render pipeline setup

use crate::primitives::Vertex;
use bytemuck::{Pod, Zeroable};

/// Transform uniform buffer data (bind group 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct TransformUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub model_inv_transpose: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _pad: f32,
}

impl TransformUniforms {
    pub fn new() -> Self {
        let identity = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        Self {
            view_proj: identity,
            model: identity,
            model_inv_transpose: identity,
            camera_pos: [0.0, 0.0, 0.0],
            _pad: 0.0,
        }
    }
}

impl Default for TransformUniforms {
    fn default() -> Self {
        Self::new()
    }
}

/// Material uniform buffer data (bind group 1)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub base_color: [f32; 4],
    /// Emissive color in xyz; w unused
    pub emissive: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub use_vertex_color: u32,
    pub _pad: u32,
}

impl MaterialUniforms {
    /// Material for grid lines and other procedural geometry
    pub fn procedural() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0, 0.0],
            metallic: 0.0,
            roughness: 0.5,
            use_vertex_color: 1,
            _pad: 0,
        }
    }

    /// Material from a scene node
    pub fn from_node(material: &machina_scene::NodeMaterial) -> Self {
        Self {
            base_color: material.base_color,
            emissive: [
                material.emissive[0],
                material.emissive[1],
                material.emissive[2],
                0.0,
            ],
            metallic: material.metallic,
            roughness: material.roughness,
            use_vertex_color: 0,
            _pad: 0,
        }
    }
}

impl Default for MaterialUniforms {
    fn default() -> Self {
        Self::procedural()
    }
}

/// A directional light
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct DirectionalLight {
    pub direction: [f32; 3],
    pub _pad0: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: [0.0, -1.0, 0.0],
            _pad0: 0.0,
            color: [1.0, 1.0, 1.0],
            intensity: 0.0,
        }
    }
}

/// Maximum directional light count in the uniform buffer
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Combined light uniform buffer (bind group 2)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LightUniforms {
    pub directional_lights: [DirectionalLight; MAX_DIRECTIONAL_LIGHTS],
    pub directional_count: u32,
    pub _pad: [u32; 3],
    pub ambient_sky: [f32; 4],
    pub ambient_ground: [f32; 4],
}

impl LightUniforms {
    /// Fixed key + fill lighting for the viewer
    pub fn viewer_lights() -> Self {
        let mut lights = Self::zeroed();

        // Key light (warm, from upper-right)
        lights.directional_lights[0] = DirectionalLight {
            direction: [0.5, 1.0, 0.3],
            _pad0: 0.0,
            color: [1.0, 0.98, 0.95],
            intensity: 2.5,
        };

        // Fill light (cool, from lower-left-behind)
        lights.directional_lights[1] = DirectionalLight {
            direction: [-0.4, -0.3, -0.6],
            _pad0: 0.0,
            color: [0.6, 0.7, 0.9],
            intensity: 0.8,
        };

        lights.directional_count = 2;
        lights.ambient_sky = [0.12, 0.13, 0.18, 1.0];
        lights.ambient_ground = [0.06, 0.05, 0.04, 1.0];

        lights
    }
}

/// The main render pipeline: solid geometry plus a line pipeline for the grid
pub struct RenderPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub line_pipeline: wgpu::RenderPipeline,
    pub transform_bind_group_layout: wgpu::BindGroupLayout,
    pub material_bind_group_layout: wgpu::BindGroupLayout,
    pub light_bind_group_layout: wgpu::BindGroupLayout,
}

impl RenderPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Viewer Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let uniform_entry = |binding, visibility| wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        // Bind group 0: Transform uniforms (vertex + fragment)
        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
                label: Some("Transform Bind Group Layout"),
            });

        // Bind group 1: Material uniforms (fragment only)
        let material_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
                label: Some("Material Bind Group Layout"),
            });

        // Bind group 2: Light uniforms (fragment only)
        let light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
                label: Some("Light Bind Group Layout"),
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Viewer Pipeline Layout"),
            bind_group_layouts: &[
                &transform_bind_group_layout,
                &material_bind_group_layout,
                &light_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let make_pipeline = |label: &str, topology, cull_mode| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::desc()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let pipeline = make_pipeline(
            "Solid Render Pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
        );

        let line_pipeline = make_pipeline(
            "Line Render Pipeline",
            wgpu::PrimitiveTopology::LineList,
            None,
        );

        Self {
            pipeline,
            line_pipeline,
            transform_bind_group_layout,
            material_bind_group_layout,
            light_bind_group_layout,
        }
    }
}
