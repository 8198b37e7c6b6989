//! Orbit camera with damped controls

use machina_core::Vec3;

/// Default orbit pose, restored verbatim by `reset()`
const DEFAULT_DISTANCE: f32 = 6.0;
const DEFAULT_YAW: f32 = std::f32::consts::FRAC_PI_4;
const DEFAULT_PITCH: f32 = std::f32::consts::FRAC_PI_6;
const DEFAULT_TARGET: Vec3 = Vec3::ZERO;

/// Exponential damping rate for orbit/zoom smoothing
const DAMPING: f32 = 10.0;

const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 100.0;
const MAX_PITCH: f32 = 1.56; // just shy of straight down, avoids gimbal lock

/// A 3D orbit camera.
///
/// Input handlers move the `target_*` values; `update(dt)` eases the
/// actual orbit state toward them each frame, which is what gives the
/// controls their damped feel.
pub struct Camera {
    /// Camera position (derived from the orbit parameters)
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,

    // Current orbit state
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,

    // Damping targets driven by input
    target_distance: f32,
    target_yaw: f32,
    target_pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: DEFAULT_TARGET,
            up: Vec3::UP,
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
            distance: DEFAULT_DISTANCE,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            target_distance: DEFAULT_DISTANCE,
            target_yaw: DEFAULT_YAW,
            target_pitch: DEFAULT_PITCH,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        let mut camera = Self::default();
        camera.update_orbit();
        camera
    }

    /// Get camera position as an array for GPU upload
    pub fn position_array(&self) -> [f32; 3] {
        [self.position.x, self.position.y, self.position.z]
    }

    /// Recompute position from the orbit parameters
    pub fn update_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();

        self.position = Vec3::new(
            self.target.x + x,
            self.target.y + y,
            self.target.z + z,
        );
    }

    /// Orbit input: rotate around the target
    pub fn orbit(&mut self, dyaw: f32, dpitch: f32) {
        self.target_yaw += dyaw;
        self.target_pitch = (self.target_pitch + dpitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Zoom input: move toward/away from the target
    pub fn zoom(&mut self, delta: f32) {
        self.target_distance =
            (self.target_distance - delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Pan the camera (move the target in the view plane)
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.position).normalized();
        let right = forward.cross(&self.up).normalized();
        let up = right.cross(&forward);

        self.target = self.target + right * dx + up * dy;
        self.update_orbit();
    }

    /// Ease the orbit state toward the input targets
    pub fn update(&mut self, dt: f32) {
        let t = 1.0 - (-DAMPING * dt.min(0.1)).exp();
        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
        self.distance += (self.target_distance - self.distance) * t;
        self.update_orbit();
    }

    /// Restore the fixed default pose and target, discarding any
    /// orbit/zoom/pan state. Snaps immediately (no damping).
    pub fn reset(&mut self) {
        self.target = DEFAULT_TARGET;
        self.distance = DEFAULT_DISTANCE;
        self.yaw = DEFAULT_YAW;
        self.pitch = DEFAULT_PITCH;
        self.target_distance = DEFAULT_DISTANCE;
        self.target_yaw = DEFAULT_YAW;
        self.target_pitch = DEFAULT_PITCH;
        self.update_orbit();
    }

    /// Get the view matrix (4x4, column-major)
    pub fn view_matrix(&self) -> [[f32; 4]; 4] {
        let f = (self.target - self.position).normalized();
        let s = f.cross(&self.up).normalized();
        let u = s.cross(&f);

        [
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [
                -s.dot(&self.position),
                -u.dot(&self.position),
                f.dot(&self.position),
                1.0,
            ],
        ]
    }

    /// Get the perspective projection matrix (4x4, column-major)
    pub fn projection_matrix(&self) -> [[f32; 4]; 4] {
        let fov_rad = self.fov.to_radians();
        let f = 1.0 / (fov_rad / 2.0).tan();
        let depth = self.far - self.near;

        [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, -(self.far + self.near) / depth, -1.0],
            [0.0, 0.0, -(2.0 * self.far * self.near) / depth, 0.0],
        ]
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self) -> [[f32; 4]; 4] {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        machina_core::mat4_mul(&proj, &view)
    }

    /// Get inverse of the combined view-projection matrix (for unprojecting)
    pub fn inverse_view_projection_matrix(&self) -> [[f32; 4]; 4] {
        let vp = self.view_projection_matrix();
        mat4_inverse(&vp)
    }
}

/// Compute the inverse of a 4x4 column-major matrix using cofactor expansion
fn mat4_inverse(m: &[[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let s = |col: usize, row: usize| -> f32 { m[col][row] };

    let c00 = s(2, 2) * s(3, 3) - s(3, 2) * s(2, 3);
    let c02 = s(1, 2) * s(3, 3) - s(3, 2) * s(1, 3);
    let c03 = s(1, 2) * s(2, 3) - s(2, 2) * s(1, 3);

    let c04 = s(2, 1) * s(3, 3) - s(3, 1) * s(2, 3);
    let c06 = s(1, 1) * s(3, 3) - s(3, 1) * s(1, 3);
    let c07 = s(1, 1) * s(2, 3) - s(2, 1) * s(1, 3);

    let c08 = s(2, 1) * s(3, 2) - s(3, 1) * s(2, 2);
    let c10 = s(1, 1) * s(3, 2) - s(3, 1) * s(1, 2);
    let c11 = s(1, 1) * s(2, 2) - s(2, 1) * s(1, 2);

    let c12 = s(2, 0) * s(3, 3) - s(3, 0) * s(2, 3);
    let c14 = s(1, 0) * s(3, 3) - s(3, 0) * s(1, 3);
    let c15 = s(1, 0) * s(2, 3) - s(2, 0) * s(1, 3);

    let c16 = s(2, 0) * s(3, 2) - s(3, 0) * s(2, 2);
    let c18 = s(1, 0) * s(3, 2) - s(3, 0) * s(1, 2);
    let c19 = s(1, 0) * s(2, 2) - s(2, 0) * s(1, 2);

    let c20 = s(2, 0) * s(3, 1) - s(3, 0) * s(2, 1);
    let c22 = s(1, 0) * s(3, 1) - s(3, 0) * s(1, 1);
    let c23 = s(1, 0) * s(2, 1) - s(2, 0) * s(1, 1);

    let f0 = [c00, c00, c02, c03];
    let f1 = [c04, c04, c06, c07];
    let f2 = [c08, c08, c10, c11];
    let f3 = [c12, c12, c14, c15];
    let f4 = [c16, c16, c18, c19];
    let f5 = [c20, c20, c22, c23];

    let v0 = [s(1, 0), s(0, 0), s(0, 0), s(0, 0)];
    let v1 = [s(1, 1), s(0, 1), s(0, 1), s(0, 1)];
    let v2 = [s(1, 2), s(0, 2), s(0, 2), s(0, 2)];
    let v3 = [s(1, 3), s(0, 3), s(0, 3), s(0, 3)];

    let mut inv = [[0.0f32; 4]; 4];
    let sign_a = [1.0, -1.0, 1.0, -1.0];
    let sign_b = [-1.0, 1.0, -1.0, 1.0];

    for i in 0..4 {
        inv[0][i] = sign_a[i] * (v1[i] * f0[i] - v2[i] * f1[i] + v3[i] * f2[i]);
        inv[1][i] = sign_b[i] * (v0[i] * f0[i] - v2[i] * f3[i] + v3[i] * f4[i]);
        inv[2][i] = sign_a[i] * (v0[i] * f1[i] - v1[i] * f3[i] + v3[i] * f5[i]);
        inv[3][i] = sign_b[i] * (v0[i] * f2[i] - v1[i] * f4[i] + v2[i] * f5[i]);
    }

    let det = s(0, 0) * inv[0][0] + s(1, 0) * inv[0][1] + s(2, 0) * inv[0][2]
        + s(3, 0) * inv[0][3];

    if det.abs() < 1e-10 {
        return [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
    }

    let inv_det = 1.0 / det;
    for col in &mut inv {
        for val in col.iter_mut() {
            *val *= inv_det;
        }
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_default_pose() {
        let mut camera = Camera::new();
        let home = camera.position;
        let home_target = camera.target;

        camera.orbit(1.3, -0.4);
        camera.zoom(3.0);
        camera.pan(2.0, -1.0);
        for _ in 0..120 {
            camera.update(1.0 / 60.0);
        }
        assert_ne!(camera.position, home);

        camera.reset();
        assert_eq!(camera.target, home_target);
        assert_eq!(camera.distance, DEFAULT_DISTANCE);
        assert_eq!(camera.yaw, DEFAULT_YAW);
        assert_eq!(camera.pitch, DEFAULT_PITCH);
        assert!((camera.position.x - home.x).abs() < 1e-6);
        assert!((camera.position.y - home.y).abs() < 1e-6);
        assert!((camera.position.z - home.z).abs() < 1e-6);
    }

    #[test]
    fn test_damping_converges_to_target() {
        let mut camera = Camera::new();
        camera.orbit(0.8, 0.2);
        for _ in 0..300 {
            camera.update(1.0 / 60.0);
        }
        assert!((camera.yaw - (DEFAULT_YAW + 0.8)).abs() < 1e-3);
        assert!((camera.pitch - (DEFAULT_PITCH + 0.2)).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_clamps_distance() {
        let mut camera = Camera::new();
        camera.zoom(1000.0);
        for _ in 0..300 {
            camera.update(1.0 / 60.0);
        }
        assert!(camera.distance >= MIN_DISTANCE - 1e-4);

        camera.zoom(-10000.0);
        for _ in 0..600 {
            camera.update(1.0 / 60.0);
        }
        assert!(camera.distance <= MAX_DISTANCE + 1e-4);
    }

    #[test]
    fn test_inverse_view_projection_roundtrip() {
        let camera = Camera::new();
        let vp = camera.view_projection_matrix();
        let inv = camera.inverse_view_projection_matrix();
        let id = machina_core::mat4_mul(&vp, &inv);
        for (col, column) in id.iter().enumerate() {
            for (row, &val) in column.iter().enumerate() {
                let expected = if col == row { 1.0 } else { 0.0 };
                assert!((val - expected).abs() < 1e-4, "m[{col}][{row}] = {val}");
            }
        }
    }
}
