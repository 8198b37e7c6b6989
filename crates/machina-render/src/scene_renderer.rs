//! Renders a Scene to the screen
//!
//! Draw calls (GPU buffers) are rebuilt only when a new model is loaded;
//! per-frame updates just rewrite the uniform buffers, so the turntable
//! rotation and highlight changes never re-upload geometry.

use crate::camera::Camera;
use crate::context::RenderContext;
use crate::pipeline::{
    LightUniforms, MaterialUniforms, RenderPipeline, TransformUniforms,
};
use crate::primitives::{create_grid_mesh, Mesh, Vertex};
use machina_core::{NodeId, Vec3};
use machina_scene::Scene;
use wgpu::util::DeviceExt;

/// Emissive tint added to the selected node so the pick is visible
const SELECTION_EMISSIVE: [f32; 3] = [0.08, 0.16, 0.28];

/// A single draw call with its own GPU resources
struct DrawCall {
    node_id: Option<NodeId>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    transform_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
}

/// Renders a loaded Scene plus the ground grid
pub struct SceneRenderer {
    pipeline: RenderPipeline,
    grid_draw: DrawCall,
    node_draws: Vec<DrawCall>,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    light_uniforms: LightUniforms,
    selected_node: Option<NodeId>,
}

impl SceneRenderer {
    pub fn new(context: &RenderContext) -> Self {
        let pipeline = RenderPipeline::new(&context.device, context.config.format);

        let grid = create_grid_mesh(20.0, 20, [0.3, 0.3, 0.3, 0.5]);
        let grid_draw = Self::create_draw_call(
            &context.device,
            &pipeline,
            &grid,
            None,
            MaterialUniforms::procedural(),
        );

        let light_uniforms = LightUniforms::viewer_lights();
        let light_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Light Uniform Buffer"),
                    contents: bytemuck::cast_slice(&[light_uniforms]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });

        let light_bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &pipeline.light_bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: light_buffer.as_entire_binding(),
                }],
                label: Some("Light Bind Group"),
            });

        Self {
            pipeline,
            grid_draw,
            node_draws: Vec::new(),
            light_buffer,
            light_bind_group,
            light_uniforms,
            selected_node: None,
        }
    }

    /// Mark a node to be rendered with the selection tint
    pub fn set_selected_node(&mut self, id: Option<NodeId>) {
        self.selected_node = id;
    }

    /// Rebuild the draw-call list for a newly loaded scene
    pub fn rebuild_from_scene(&mut self, scene: &Scene, device: &wgpu::Device) {
        self.node_draws.clear();

        for node in scene.nodes() {
            let Some(mesh_index) = node.mesh else {
                continue;
            };
            let imported = &scene.meshes()[mesh_index];
            if imported.positions.is_empty() || imported.indices.is_empty() {
                continue;
            }

            let vertices: Vec<Vertex> = imported
                .positions
                .iter()
                .enumerate()
                .map(|(i, &position)| Vertex {
                    position,
                    normal: imported
                        .normals
                        .get(i)
                        .copied()
                        .unwrap_or([0.0, 1.0, 0.0]),
                    color: node.material.base_color,
                })
                .collect();

            let mesh = Mesh {
                vertices,
                indices: imported.indices.clone(),
            };

            self.node_draws.push(Self::create_draw_call(
                device,
                &self.pipeline,
                &mesh,
                Some(node.id),
                MaterialUniforms::from_node(&node.material),
            ));
        }
    }

    /// Render the scene and grid to the target view
    pub fn render(
        &mut self,
        context: &RenderContext,
        scene: &Scene,
        camera: &Camera,
        target_view: &wgpu::TextureView,
    ) {
        let view_proj = camera.view_projection_matrix();
        let camera_pos = camera.position_array();
        let identity = TransformUniforms::new().model;

        context.queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[self.light_uniforms]),
        );

        // Grid sits at the world origin
        let grid_uniforms = TransformUniforms {
            view_proj,
            model: identity,
            model_inv_transpose: identity,
            camera_pos,
            _pad: 0.0,
        };
        context.queue.write_buffer(
            &self.grid_draw.transform_buffer,
            0,
            bytemuck::cast_slice(&[grid_uniforms]),
        );

        // Per-node uniforms: world matrix from the scene (turntable included)
        // and the node's current material, tinted when selected.
        for draw in &self.node_draws {
            let Some(node_id) = draw.node_id else {
                continue;
            };
            let model = scene.world_matrix(node_id);
            let uniforms = TransformUniforms {
                view_proj,
                model,
                model_inv_transpose: mat4_inv_transpose(&model),
                camera_pos,
                _pad: 0.0,
            };
            context.queue.write_buffer(
                &draw.transform_buffer,
                0,
                bytemuck::cast_slice(&[uniforms]),
            );

            if let Some(node) = scene.node(node_id) {
                let mut material = MaterialUniforms::from_node(&node.material);
                if self.selected_node == Some(node_id) {
                    material.emissive[0] += SELECTION_EMISSIVE[0];
                    material.emissive[1] += SELECTION_EMISSIVE[1];
                    material.emissive[2] += SELECTION_EMISSIVE[2];
                }
                context.queue.write_buffer(
                    &draw.material_buffer,
                    0,
                    bytemuck::cast_slice(&[material]),
                );
            }
        }

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.15,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Lights are shared across the whole pass
            render_pass.set_bind_group(2, &self.light_bind_group, &[]);

            render_pass.set_pipeline(&self.pipeline.line_pipeline);
            render_pass.set_bind_group(0, &self.grid_draw.transform_bind_group, &[]);
            render_pass.set_bind_group(1, &self.grid_draw.material_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.grid_draw.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                self.grid_draw.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            render_pass.draw_indexed(0..self.grid_draw.index_count, 0, 0..1);

            render_pass.set_pipeline(&self.pipeline.pipeline);
            for draw in &self.node_draws {
                render_pass.set_bind_group(0, &draw.transform_bind_group, &[]);
                render_pass.set_bind_group(1, &draw.material_bind_group, &[]);
                render_pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                render_pass.set_index_buffer(
                    draw.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                render_pass.draw_indexed(0..draw.index_count, 0, 0..1);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_draw_call(
        device: &wgpu::Device,
        pipeline: &RenderPipeline,
        mesh: &Mesh,
        node_id: Option<NodeId>,
        material_uniforms: MaterialUniforms,
    ) -> DrawCall {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transform Uniform Buffer"),
            contents: bytemuck::cast_slice(&[TransformUniforms::new()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipeline.transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
            label: Some("Transform Bind Group"),
        });

        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Material Uniform Buffer"),
            contents: bytemuck::cast_slice(&[material_uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipeline.material_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: material_buffer.as_entire_binding(),
            }],
            label: Some("Material Bind Group"),
        });

        DrawCall {
            node_id,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            transform_buffer,
            transform_bind_group,
            material_buffer,
            material_bind_group,
        }
    }
}

/// Inverse-transpose of the upper-left 3x3, embedded in a 4x4 (column-major).
/// Used to transform normals under non-uniform scale.
fn mat4_inv_transpose(m: &[[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let c0 = Vec3::new(m[0][0], m[0][1], m[0][2]);
    let c1 = Vec3::new(m[1][0], m[1][1], m[1][2]);
    let c2 = Vec3::new(m[2][0], m[2][1], m[2][2]);

    let cof0 = c1.cross(&c2);
    let cof1 = c2.cross(&c0);
    let cof2 = c0.cross(&c1);

    let det = c0.dot(&cof0);
    if det.abs() < 1e-10 {
        return TransformUniforms::new().model;
    }
    let inv_det = 1.0 / det;

    [
        [cof0.x * inv_det, cof0.y * inv_det, cof0.z * inv_det, 0.0],
        [cof1.x * inv_det, cof1.y * inv_det, cof1.z * inv_det, 0.0],
        [cof2.x * inv_det, cof2.y * inv_det, cof2.z * inv_det, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inv_transpose_of_uniform_scale() {
        let m = [
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 2.0, 0.0],
            [5.0, 6.0, 7.0, 1.0],
        ];
        let it = mat4_inv_transpose(&m);
        assert!((it[0][0] - 0.5).abs() < 1e-6);
        assert!((it[1][1] - 0.5).abs() < 1e-6);
        assert!((it[2][2] - 0.5).abs() < 1e-6);
        // Translation is dropped for normal transforms
        assert_eq!(it[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
