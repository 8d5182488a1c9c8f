//! Path construction. Points go through the current transform as they are
//! added, so the stored path is always in device space.

use super::Canvas2dContext;
use crate::geometry::{ArcParams, RectParams, RoundRectParams};
use tiny_skia::{Path, PathBuilder, PathSegment, Point};

/// Control point distance for a quarter circle drawn as one cubic.
const KAPPA: f32 = 0.552_284_8;

impl Canvas2dContext {
    pub fn begin_path(&mut self) {
        self.path = PathBuilder::new();
        self.has_current_point = false;
    }

    pub(crate) fn device_point(&self, x: f32, y: f32) -> (f32, f32) {
        let mut point = Point::from_xy(x, y);
        self.state.transform.map_point(&mut point);
        (point.x, point.y)
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.device_point(x, y);
        self.path.move_to(x, y);
        self.has_current_point = true;
    }

    /// Without a current point this behaves like `move_to`.
    pub fn line_to(&mut self, x: f32, y: f32) {
        if !self.has_current_point {
            self.move_to(x, y);
            return;
        }
        let (x, y) = self.device_point(x, y);
        self.path.line_to(x, y);
    }

    pub fn close_path(&mut self) {
        self.path.close();
    }

    pub fn bezier_curve_to(&mut self, c1: (f32, f32), c2: (f32, f32), end: (f32, f32)) {
        if !self.has_current_point {
            self.move_to(c1.0, c1.1);
        }
        let c1 = self.device_point(c1.0, c1.1);
        let c2 = self.device_point(c2.0, c2.1);
        let end = self.device_point(end.0, end.1);
        self.path.cubic_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1);
    }

    pub fn quadratic_curve_to(&mut self, control: (f32, f32), end: (f32, f32)) {
        if !self.has_current_point {
            self.move_to(control.0, control.1);
        }
        let control = self.device_point(control.0, control.1);
        let end = self.device_point(end.0, end.1);
        self.path.quad_to(control.0, control.1, end.0, end.1);
    }

    /// Add a closed rectangle subpath.
    pub fn rect(&mut self, rect: &RectParams) {
        let [first, rest @ ..] = rect.corners();
        self.move_to(first.0, first.1);
        for (x, y) in rest {
            self.line_to(x, y);
        }
        self.close_path();
    }

    /// Add a closed rectangle subpath with rounded corners.
    ///
    /// Negative sizes flip the rectangle. When adjacent radii do not fit along
    /// a side, all four are scaled down by the same factor.
    pub fn round_rect(&mut self, params: &RoundRectParams) {
        let r = params.rect;
        let (x, width) = if r.width < 0.0 {
            (r.x + r.width, -r.width)
        } else {
            (r.x, r.width)
        };
        let (y, height) = if r.height < 0.0 {
            (r.y + r.height, -r.height)
        } else {
            (r.y, r.height)
        };

        let radii = params.radii.map(|radius| radius.max(0.0));
        let [tl, tr, br, bl] = radii;
        let fit = [
            width / (tl + tr),
            width / (bl + br),
            height / (tl + bl),
            height / (tr + br),
        ]
        .into_iter()
        .filter(|ratio| ratio.is_finite())
        .fold(1.0f32, f32::min);
        let [tl, tr, br, bl] = radii.map(|radius| radius * fit);

        let (right, bottom) = (x + width, y + height);
        let mut pb = PathBuilder::new();
        pb.move_to(x + tl, y);
        quarter(&mut pb, (right - tr, y), (right, y), (right, y + tr));
        quarter(&mut pb, (right, bottom - br), (right, bottom), (right - br, bottom));
        quarter(&mut pb, (x + bl, bottom), (x, bottom), (x, bottom - bl));
        quarter(&mut pb, (x, y + tl), (x, y), (x + tl, y));
        pb.close();

        if let Some(path) = pb.finish() {
            self.append_user_path(&path, false);
        }
    }

    /// Add an arc. If the path already has a current point, a straight line
    /// joins it to the start of the arc.
    pub fn arc(&mut self, arc: &ArcParams) {
        let mut pb = PathBuilder::new();
        crate::arc::append_arc(&mut pb, arc);
        if let Some(path) = pb.finish() {
            self.append_user_path(&path, true);
        }
    }

    /// Map a user-space path through the current transform and append it.
    fn append_user_path(&mut self, path: &Path, connect: bool) {
        let Some(path) = path.clone().transform(self.state.transform) else {
            return;
        };
        let mut first = true;
        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) if first && connect && self.has_current_point => {
                    self.path.line_to(p.x, p.y)
                }
                PathSegment::MoveTo(p) => self.path.move_to(p.x, p.y),
                PathSegment::LineTo(p) => self.path.line_to(p.x, p.y),
                PathSegment::QuadTo(c, p) => self.path.quad_to(c.x, c.y, p.x, p.y),
                PathSegment::CubicTo(c1, c2, p) => {
                    self.path.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y)
                }
                PathSegment::Close => self.path.close(),
            }
            first = false;
        }
        self.has_current_point = true;
    }
}

/// Line to `from`, then round the corner at `corner` to end at `to`.
fn quarter(pb: &mut PathBuilder, from: (f32, f32), corner: (f32, f32), to: (f32, f32)) {
    pb.line_to(from.0, from.1);
    if from == to {
        return;
    }
    let toward = |p: (f32, f32)| (p.0 + (corner.0 - p.0) * KAPPA, p.1 + (corner.1 - p.1) * KAPPA);
    let (c1, c2) = (toward(from), toward(to));
    pb.cubic_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
}
