use glam::{Mat4, Vec3};

/// Camera circling the origin at a fixed height, used by the rasterizer.
///
/// The orbit angle only ever grows: each frame calls [`OrbitCamera::advance`].
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub radius: f32,
    pub height: f32,
    pub angle: f32,
    pub step: f32,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    /// Create an orbit camera looking at the origin.
    pub fn new(radius: f32, height: f32, aspect: f32) -> Self {
        Self {
            radius,
            height,
            angle: 0.0,
            step: 0.025,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_2,
            aspect,
            near: 1.0,
            far: 1000.0,
        }
    }

    /// Move one step further along the orbit.
    pub fn advance(&mut self) {
        self.angle += self.step;
    }

    /// Current eye position.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.angle.sin() * self.radius,
            self.height,
            self.angle.cos() * self.radius,
        )
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, self.up)
    }

    /// Get the projection matrix (camera → clip space). Depth maps to [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

/// World, view and projection matrices plus their cached products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSet {
    pub world: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub model_view: Mat4,
    pub view_projection: Mat4,
    pub model_view_projection: Mat4,
}

impl TransformSet {
    pub fn new(world: Mat4, view: Mat4, projection: Mat4) -> Self {
        let mut set = Self {
            world,
            view,
            projection,
            model_view: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
            model_view_projection: Mat4::IDENTITY,
        };
        set.recompute();
        set
    }

    pub fn set_world(&mut self, world: Mat4) {
        self.world = world;
        self.recompute();
    }

    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.recompute();
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.model_view = self.view * self.world;
        self.view_projection = self.projection * self.view;
        self.model_view_projection = self.projection * self.model_view;
    }
}

impl Default for TransformSet {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}
