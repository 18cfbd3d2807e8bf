use glam::Mat4;

/// Camera state, as reported by the display framework once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub camera_to_world: Mat4,
    pub world_to_camera: Mat4,
    pub projection: Mat4,
    pub inverse_projection: Mat4,

    /// Set by whoever owns the camera's transform when the pose changes;
    /// cleared by [`crate::InvalidationDetector`] once observed.
    pub transform_changed: bool,
}

impl Camera {
    pub fn new(camera_to_world: Mat4, projection: Mat4) -> Self {
        Self {
            camera_to_world,
            world_to_camera: camera_to_world.inverse(),
            projection,
            inverse_projection: projection.inverse(),
            transform_changed: false,
        }
    }

    /// Moves the camera, raising [`Self::transform_changed`].
    pub fn set_transform(&mut self, camera_to_world: Mat4) {
        self.camera_to_world = camera_to_world;
        self.world_to_camera = camera_to_world.inverse();
        self.transform_changed = true;
    }

    pub fn with_transform(mut self, camera_to_world: Mat4) -> Self {
        self.set_transform(camera_to_world);
        self
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
        self.inverse_projection = projection.inverse();
    }

    pub fn describe(&self) -> String {
        let (_, rotation, translation) =
            self.camera_to_world.to_scale_rotation_translation();

        format!("position={translation}, rotation={rotation}")
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}
