//! Perspective transform of a card and the outline it projects to.

use std::fmt;

/// Distance from the viewer to the card plane, in px.
pub const PERSPECTIVE_PX: f64 = 1500.0;
/// Fixed backward tilt of the table.
pub const TILT_X_DEG: f64 = 30.0;
/// Y-axis rotation is the Z-axis rotation scaled down by this factor.
pub const Y_ROTATION_DIVISOR: f64 = 10.0;

pub type Point = [f64; 2];

/// Rotation and scale of one card, as applied on every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    rot: f64,
    scale: f64,
}

impl Transform {
    pub fn new(rot: f64, scale: f64) -> Self {
        Self { rot, scale }
    }

    pub fn rotate_y(&self) -> f64 {
        self.rot / Y_ROTATION_DIVISOR
    }

    /// Map a point of the card plane (relative to the card centre, y down)
    /// to screen space. Order: scale, rotate Z, rotate Y, rotate X, then
    /// perspective divide.
    pub fn project(&self, point: Point) -> Point {
        let [x, y] = [point[0] * self.scale, point[1] * self.scale];

        let (sin_z, cos_z) = self.rot.to_radians().sin_cos();
        let (x, y) = (x * cos_z - y * sin_z, x * sin_z + y * cos_z);

        let (sin_y, cos_y) = self.rotate_y().to_radians().sin_cos();
        let (x, z) = (x * cos_y, -x * sin_y);

        let (sin_x, cos_x) = TILT_X_DEG.to_radians().sin_cos();
        let (y, z) = (y * cos_x - z * sin_x, y * sin_x + z * cos_x);

        let w = 1.0 - z / PERSPECTIVE_PX;
        [x / w, y / w]
    }

    /// Outline of a `width` x `height` card centred on the origin.
    pub fn outline(&self, width: f64, height: f64) -> Quad {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Quad::new([
            self.project([-hw, -hh]),
            self.project([hw, -hh]),
            self.project([hw, hh]),
            self.project([-hw, hh]),
        ])
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "perspective({}px) rotateX({}deg) rotateY({}deg) rotateZ({}deg) scale({})",
            PERSPECTIVE_PX,
            TILT_X_DEG,
            self.rotate_y(),
            self.rot,
            self.scale
        )
    }
}

/// Convex four-cornered outline, corners in drawing order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    corners: [Point; 4],
}

impl Quad {
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    pub fn translate(&self, offset: Point) -> Quad {
        Quad::new(self.corners.map(|[x, y]| [x + offset[0], y + offset[1]]))
    }

    /// `(min, max)` corners of the axis-aligned bounding box.
    pub fn bounds(&self) -> (Point, Point) {
        self.corners.iter().fold(
            ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]),
            |(min, max), [x, y]| {
                (
                    [min[0].min(*x), min[1].min(*y)],
                    [max[0].max(*x), max[1].max(*y)],
                )
            },
        )
    }

    pub fn center(&self) -> Point {
        let sum = self
            .corners
            .iter()
            .fold([0.0, 0.0], |acc, [x, y]| [acc[0] + x, acc[1] + y]);
        [sum[0] / 4.0, sum[1] / 4.0]
    }

    /// Point-in-polygon for a convex outline: the point lies on the same side
    /// of every edge. Edges count as inside.
    pub fn contains(&self, point: Point) -> bool {
        let mut sign = 0.0_f64;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            let cross = (b[0] - a[0]) * (point[1] - a[1]) - (b[1] - a[1]) * (point[0] - a[0]);
            if cross == 0.0 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    /// Horizontal extent of the outline on the line at height `y`, if the
    /// line crosses it.
    pub fn span_at(&self, y: f64) -> Option<(f64, f64)> {
        let mut span: Option<(f64, f64)> = None;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            let (low, high) = if a[1] <= b[1] { (a, b) } else { (b, a) };
            if y < low[1] || y > high[1] {
                continue;
            }
            let x = if high[1] == low[1] {
                // Horizontal edge: both ends are on the line.
                span = Some(extend(span, low[0]));
                high[0]
            } else {
                low[0] + (y - low[1]) / (high[1] - low[1]) * (high[0] - low[0])
            };
            span = Some(extend(span, x));
        }
        span
    }
}

fn extend(span: Option<(f64, f64)>, x: f64) -> (f64, f64) {
    match span {
        Some((min, max)) => (min.min(x), max.max(x)),
        None => (x, x),
    }
}
