use super::Canvas2dContext;
use tiny_skia::Transform;

impl Canvas2dContext {
    pub fn translate(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.state.transform = self.state.transform.pre_translate(x, y);
        }
    }

    /// Rotate clockwise by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        if angle.is_finite() {
            let (sin, cos) = angle.sin_cos();
            self.transform(Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0));
        }
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.state.transform = self.state.transform.pre_scale(x, y);
        }
    }

    /// Apply `matrix` before the current transform.
    pub fn transform(&mut self, matrix: Transform) {
        if matrix.is_finite() {
            self.state.transform = self.state.transform.pre_concat(matrix);
        }
    }

    pub fn set_transform(&mut self, matrix: Transform) {
        if matrix.is_finite() {
            self.state.transform = matrix;
        }
    }

    pub fn reset_transform(&mut self) {
        self.state.transform = Transform::identity();
    }

    pub fn get_transform(&self) -> Transform {
        self.state.transform
    }
}
