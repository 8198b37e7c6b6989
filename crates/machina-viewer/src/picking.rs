//! Mouse picking via ray-AABB intersection
//!
//! Unprojects screen coordinates through the camera's inverse
//! view-projection matrix and tests against node bounding boxes for
//! viewport click selection.

use machina_core::NodeId;
use machina_render::Camera;
use machina_scene::Scene;

/// A ray in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: [f32; 3],
    pub direction: [f32; 3],
}

/// Axis-Aligned Bounding Box in world space
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// Node with its world-space AABB for picking
#[derive(Debug, Clone)]
pub struct PickTarget {
    pub node_id: NodeId,
    pub aabb: Aabb,
}

impl Ray {
    /// Create a ray from screen coordinates using the camera's inverse VP
    /// matrix. `screen_x`, `screen_y` and the viewport dimensions are in
    /// physical pixels.
    pub fn from_screen(
        screen_x: f32,
        screen_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        camera: &Camera,
    ) -> Self {
        let inv_vp = camera.inverse_view_projection_matrix();

        // Convert to NDC [-1, 1]
        let ndc_x = 2.0 * screen_x / viewport_width - 1.0;
        let ndc_y = 1.0 - 2.0 * screen_y / viewport_height; // Y flipped

        // Unproject a near and a far point and run the ray between them
        let near_clip = [ndc_x, ndc_y, -1.0, 1.0];
        let far_clip = [ndc_x, ndc_y, 1.0, 1.0];

        let near_world = mul_mat4_vec4(&inv_vp, near_clip);
        let far_world = mul_mat4_vec4(&inv_vp, far_clip);

        let origin = [
            near_world[0] / near_world[3],
            near_world[1] / near_world[3],
            near_world[2] / near_world[3],
        ];
        let far_pt = [
            far_world[0] / far_world[3],
            far_world[1] / far_world[3],
            far_world[2] / far_world[3],
        ];

        let dir = [
            far_pt[0] - origin[0],
            far_pt[1] - origin[1],
            far_pt[2] - origin[2],
        ];
        let len = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
        let direction = if len > 1e-8 {
            [dir[0] / len, dir[1] / len, dir[2] / len]
        } else {
            [0.0, 0.0, -1.0]
        };

        Self { origin, direction }
    }
}

impl Aabb {
    pub fn from_min_max(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Transform an AABB by a 4x4 world matrix (column-major).
    /// Uses the standard AABB-from-transformed-AABB technique.
    pub fn transformed(&self, mat: &[[f32; 4]; 4]) -> Self {
        // Translation from column 3
        let mut new_min = [mat[3][0], mat[3][1], mat[3][2]];
        let mut new_max = [mat[3][0], mat[3][1], mat[3][2]];

        // For each axis of the original AABB, project through the rotation/scale
        for i in 0..3 {
            for j in 0..3 {
                let a = mat[i][j] * self.min[i];
                let b = mat[i][j] * self.max[i];
                new_min[j] += a.min(b);
                new_max[j] += a.max(b);
            }
        }

        Self {
            min: new_min,
            max: new_max,
        }
    }
}

/// Ray-AABB intersection using the slab method (Kay/Kajiya).
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_intersect(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for i in 0..3 {
        if ray.direction[i].abs() < 1e-8 {
            // Ray is parallel to this slab
            if ray.origin[i] < aabb.min[i] || ray.origin[i] > aabb.max[i] {
                return None;
            }
        } else {
            let inv_d = 1.0 / ray.direction[i];
            let mut t1 = (aabb.min[i] - ray.origin[i]) * inv_d;
            let mut t2 = (aabb.max[i] - ray.origin[i]) * inv_d;

            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            tmin = tmin.max(t1);
            tmax = tmax.min(t2);

            if tmin > tmax {
                return None;
            }
        }
    }

    if tmax < 0.0 {
        None // AABB is behind the ray
    } else {
        Some(tmin.max(0.0))
    }
}

/// Build pick targets from every mesh-bearing node in the scene
pub fn build_pick_targets(scene: &Scene) -> Vec<PickTarget> {
    scene
        .nodes()
        .iter()
        .filter_map(|node| {
            let bounds = node.local_bounds?;
            let world_mat = scene.world_matrix(node.id);
            let world_aabb =
                Aabb::from_min_max(bounds.min, bounds.max).transformed(&world_mat);
            Some(PickTarget {
                node_id: node.id,
                aabb: world_aabb,
            })
        })
        .collect()
}

/// Pick the nearest node at the given screen coordinates
pub fn pick_node(
    screen_x: f32,
    screen_y: f32,
    viewport_width: f32,
    viewport_height: f32,
    camera: &Camera,
    targets: &[PickTarget],
) -> Option<(NodeId, f32)> {
    let ray = Ray::from_screen(screen_x, screen_y, viewport_width, viewport_height, camera);

    let mut best: Option<(NodeId, f32)> = None;

    for target in targets {
        if let Some(dist) = ray_intersect(&ray, &target.aabb) {
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((target.node_id, dist));
            }
        }
    }

    best
}

/// Multiply a 4x4 column-major matrix by a 4D vector
fn mul_mat4_vec4(m: &[[f32; 4]; 4], v: [f32; 4]) -> [f32; 4] {
    [
        m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2] + m[3][0] * v[3],
        m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2] + m[3][1] * v[3],
        m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2] + m[3][2] * v[3],
        m[0][3] * v[0] + m[1][3] * v[1] + m[2][3] * v[2] + m[3][3] * v[3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use machina_import::{ImportResult, ImportedMesh, ImportedNode};

    fn unit_cube_scene() -> Scene {
        // A unit cube centered at the origin; bounds are all the picker reads
        let positions = vec![
            [-0.5, -0.5, -0.5],
            [0.5, -0.5, -0.5],
            [0.5, 0.5, -0.5],
            [-0.5, 0.5, -0.5],
            [-0.5, -0.5, 0.5],
            [0.5, -0.5, 0.5],
            [0.5, 0.5, 0.5],
            [-0.5, 0.5, 0.5],
        ];
        Scene::from_import(ImportResult {
            name: "cube".to_string(),
            meshes: vec![ImportedMesh {
                name: "Cube".to_string(),
                normals: vec![[0.0, 1.0, 0.0]; positions.len()],
                positions,
                indices: vec![0, 1, 2],
                material_index: None,
            }],
            materials: vec![],
            nodes: vec![ImportedNode {
                name: "Cube".to_string(),
                translation: [0.0; 3],
                rotation: [0.0, 0.0, 0.0, 1.0],
                scale: [1.0; 3],
                mesh_primitive_indices: vec![0],
                children: vec![],
            }],
            root_nodes: vec![0],
        })
    }

    #[test]
    fn test_ray_intersect_hit_and_miss() {
        let aabb = Aabb::from_min_max([-0.5; 3], [0.5; 3]);

        let hit = Ray {
            origin: [0.0, 0.0, 5.0],
            direction: [0.0, 0.0, -1.0],
        };
        let dist = ray_intersect(&hit, &aabb).unwrap();
        assert!((dist - 4.5).abs() < 1e-5);

        let miss = Ray {
            origin: [3.0, 0.0, 5.0],
            direction: [0.0, 0.0, -1.0],
        };
        assert!(ray_intersect(&miss, &aabb).is_none());

        let behind = Ray {
            origin: [0.0, 0.0, 5.0],
            direction: [0.0, 0.0, 1.0],
        };
        assert!(ray_intersect(&behind, &aabb).is_none());
    }

    #[test]
    fn test_ray_origin_inside_box() {
        let aabb = Aabb::from_min_max([-1.0; 3], [1.0; 3]);
        let ray = Ray {
            origin: [0.0; 3],
            direction: [1.0, 0.0, 0.0],
        };
        assert_eq!(ray_intersect(&ray, &aabb), Some(0.0));
    }

    #[test]
    fn test_center_click_hits_cube() {
        let scene = unit_cube_scene();
        let camera = Camera::new();
        let targets = build_pick_targets(&scene);
        assert_eq!(targets.len(), 1);

        // The camera orbits the origin, so the screen center must hit
        let hit = pick_node(400.0, 300.0, 800.0, 600.0, &camera, &targets);
        let (id, dist) = hit.expect("center click should hit the cube");
        assert_eq!(id, scene.nodes()[0].id);
        assert!(dist > 0.0);
    }

    #[test]
    fn test_corner_click_misses() {
        let scene = unit_cube_scene();
        let camera = Camera::new();
        let targets = build_pick_targets(&scene);

        assert!(pick_node(2.0, 2.0, 800.0, 600.0, &camera, &targets).is_none());
    }

    #[test]
    fn test_empty_scene_picks_nothing() {
        let camera = Camera::new();
        assert!(pick_node(400.0, 300.0, 800.0, 600.0, &camera, &[]).is_none());
    }

    #[test]
    fn test_transformed_aabb_translates() {
        let aabb = Aabb::from_min_max([-1.0; 3], [1.0; 3]);
        let mat = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [10.0, 0.0, 0.0, 1.0],
        ];
        let moved = aabb.transformed(&mat);
        assert_eq!(moved.min, [9.0, -1.0, -1.0]);
        assert_eq!(moved.max, [11.0, 1.0, 1.0]);
    }
}
