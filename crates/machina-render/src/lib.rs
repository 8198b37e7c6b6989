//! Machina Render - wgpu-based renderer for the part viewer
//!
//! A deliberately small forward renderer: one solid pipeline with
//! directional + hemisphere lighting and an emissive term (used by the
//! selection tint and the transient highlight), plus a line pipeline for
//! the ground grid.

mod camera;
mod context;
mod pipeline;
mod primitives;
mod scene_renderer;

pub use camera::Camera;
pub use context::{RenderContext, RenderError};
pub use pipeline::{
    DirectionalLight, LightUniforms, MaterialUniforms, RenderPipeline, TransformUniforms,
};
pub use primitives::{create_grid_mesh, Mesh, Vertex};
pub use scene_renderer::SceneRenderer;

#[cfg(test)]
mod tests {
    #[test]
    fn shader_wgsl_parses() {
        let source = include_str!("shader.wgsl");
        naga::front::wgsl::parse_str(source).expect("shader.wgsl failed to parse");
    }
}
