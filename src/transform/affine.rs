//! Homogeneous 3×3 transform builder.
//!
//! The per-frame transform is composed from rotation about three axes, shear
//! about three axes, a screen-space translation, and an optional derived
//! autoscale. The matrix maps destination coordinates (relative to the
//! placement center) to source coordinates, so the pixel loop inverse-maps
//! by forward-multiplying through it.

use kurbo::Point;

use crate::config::properties::Properties;

/// Half-extent of the fixed reference frame used by autoscale.
///
/// Autoscale projects the corners of a canonical 1440×1152 reference extent,
/// not the live frame's corners. Content is authored against these
/// constants; substituting live dimensions would change output scale.
const REF_HALF_W: f64 = 720.0;
const REF_HALF_H: f64 = 576.0;

/// A 3×3 homogeneous transform, mutable only through compose operations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineMatrix {
    m: [[f64; 3]; 3],
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Build the per-frame transform from animated parameters.
    ///
    /// Compose order is fixed: rotate_x, rotate_y, rotate_z, shear,
    /// translate, then autoscale when requested. Animated components are
    /// scaled by `elapsed`, the frames since the span's in-point.
    pub fn from_params(params: &TransformParams, elapsed: f64) -> Self {
        let mut matrix = Self::identity();
        matrix.rotate_x(params.fix_rotate_x + params.rotate_x * elapsed);
        matrix.rotate_y(params.fix_rotate_y + params.rotate_y * elapsed);
        matrix.rotate_z(params.fix_rotate_z + params.rotate_z * elapsed);
        matrix.shear(
            params.fix_shear_x + params.shear_x * elapsed,
            params.fix_shear_y + params.shear_y * elapsed,
            params.fix_shear_z + params.shear_z * elapsed,
        );
        matrix.translate(params.ox, params.oy);
        if params.autoscale {
            matrix.autoscale();
        }
        matrix
    }

    fn concat(&mut self, that: [[f64; 3]; 3]) {
        let a = self.m;
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * that[0][j] + a[i][1] * that[1][j] + a[i][2] * that[2][j];
            }
        }
        self.m = out;
    }

    /// Compose an in-plane rotation by `angle` degrees.
    pub fn rotate_x(&mut self, angle: f64) {
        let (sin, cos) = angle.to_radians().sin_cos();
        self.concat([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]]);
    }

    /// Compose a rotation about the vertical axis by `angle` degrees.
    pub fn rotate_y(&mut self, angle: f64) {
        let (sin, cos) = angle.to_radians().sin_cos();
        self.concat([[cos, 0.0, -sin], [0.0, 1.0, 0.0], [sin, 0.0, cos]]);
    }

    /// Compose a rotation about the horizontal axis by `angle` degrees.
    pub fn rotate_z(&mut self, angle: f64) {
        let (sin, cos) = angle.to_radians().sin_cos();
        self.concat([[1.0, 0.0, 0.0], [0.0, cos, sin], [0.0, -sin, cos]]);
    }

    /// Compose shear about all three axes, angles in degrees.
    pub fn shear(&mut self, shear_x: f64, shear_y: f64, shear_z: f64) {
        self.concat([
            [1.0, shear_x.to_radians().tan(), 0.0],
            [shear_y.to_radians().tan(), 1.0, shear_z.to_radians().tan()],
            [0.0, 0.0, 1.0],
        ]);
    }

    /// Compose a non-uniform scale.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.concat([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]]);
    }

    /// Add a screen-space offset directly into the translation terms.
    ///
    /// The offset is not multiplied through the matrix: it is a
    /// post-transform shift in device space.
    pub fn translate(&mut self, x: f64, y: f64) {
        self.m[0][2] += x;
        self.m[1][2] += y;
    }

    /// Mapped x coordinate of `(x, y)`.
    pub fn map_x(&self, x: f64, y: f64) -> f64 {
        self.m[0][0] * x + self.m[0][1] * y + self.m[0][2]
    }

    /// Mapped y coordinate of `(x, y)`.
    pub fn map_y(&self, x: f64, y: f64) -> f64 {
        self.m[1][0] * x + self.m[1][1] * y + self.m[1][2]
    }

    /// Mapped homogeneous depth of `(x, y)`.
    pub fn map_z(&self, x: f64, y: f64) -> f64 {
        self.m[2][0] * x + self.m[2][1] * y + self.m[2][2]
    }

    /// Full homogeneous forward mapping of `(x, y)`.
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64, f64) {
        (self.map_x(x, y), self.map_y(x, y), self.map_z(x, y))
    }

    /// The homogeneous depth at the origin.
    ///
    /// Device mapping divides by this single value rather than the per-point
    /// depth. That is not a true perspective projection; it is preserved
    /// because existing content depends on it.
    pub fn origin_depth(&self) -> f64 {
        self.m[2][2]
    }

    /// Map `(x, y)` to device space, dividing by the origin depth.
    pub fn map_device(&self, x: f64, y: f64) -> Point {
        let z = self.origin_depth();
        Point::new(self.map_x(x, y) / z, self.map_y(x, y) / z)
    }

    /// Per-axis scale of the reference extent's bounding box under this
    /// transform.
    ///
    /// Projects the four fixed reference corners (truncated to integers),
    /// takes the axis-aligned bounding box, and relates it back to the
    /// reference extent. Corner-only sampling is an accepted approximation.
    pub fn max_output(&self) -> (f64, f64) {
        let corners = [
            (-REF_HALF_W, REF_HALF_H),
            (REF_HALF_W, REF_HALF_H),
            (-REF_HALF_W, -REF_HALF_H),
            (REF_HALF_W, -REF_HALF_H),
        ];

        let mut min_x = i64::MAX;
        let mut max_x = i64::MIN;
        let mut min_y = i64::MAX;
        let mut max_y = i64::MIN;
        for (x, y) in corners {
            let px = self.map_x(x, y) as i64;
            let py = self.map_y(x, y) as i64;
            min_x = min_x.min(px);
            max_x = max_x.max(px);
            min_y = min_y.min(py);
            max_y = max_y.max(py);
        }

        (
            (max_x - min_x + 1) as f64 / (2.0 * REF_HALF_W),
            (max_y - min_y + 1) as f64 / (2.0 * REF_HALF_H),
        )
    }

    /// Compose the scale that makes the transformed reference extent's
    /// bounding box match the reference extent again.
    pub fn autoscale(&mut self) {
        let (sw, sh) = self.max_output();
        self.scale(sw, sh);
    }
}

/// Per-frame transform parameters read from configuration.
///
/// `fix_*` components are constant over the transition; the unprefixed
/// components accumulate per elapsed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformParams {
    /// Constant in-plane rotation, degrees.
    pub fix_rotate_x: f64,
    /// Constant rotation about the vertical axis, degrees.
    pub fix_rotate_y: f64,
    /// Constant rotation about the horizontal axis, degrees.
    pub fix_rotate_z: f64,
    /// In-plane rotation per elapsed frame, degrees.
    pub rotate_x: f64,
    /// Rotation about the vertical axis per elapsed frame, degrees.
    pub rotate_y: f64,
    /// Rotation about the horizontal axis per elapsed frame, degrees.
    pub rotate_z: f64,
    /// Constant shear about the x axis, degrees.
    pub fix_shear_x: f64,
    /// Constant shear about the y axis, degrees.
    pub fix_shear_y: f64,
    /// Constant shear about the z axis, degrees.
    pub fix_shear_z: f64,
    /// Shear about the x axis per elapsed frame, degrees.
    pub shear_x: f64,
    /// Shear about the y axis per elapsed frame, degrees.
    pub shear_y: f64,
    /// Shear about the z axis per elapsed frame, degrees.
    pub shear_z: f64,
    /// Screen-space horizontal offset.
    pub ox: f64,
    /// Screen-space vertical offset.
    pub oy: f64,
    /// Derive a bounding-box-correcting scale after the other operations.
    pub autoscale: bool,
}

impl TransformParams {
    /// Read the recognized scalar keys from a configuration bag.
    pub fn from_properties(properties: &Properties) -> Self {
        Self {
            fix_rotate_x: properties.get_f64("fix_rotate_x"),
            fix_rotate_y: properties.get_f64("fix_rotate_y"),
            fix_rotate_z: properties.get_f64("fix_rotate_z"),
            rotate_x: properties.get_f64("rotate_x"),
            rotate_y: properties.get_f64("rotate_y"),
            rotate_z: properties.get_f64("rotate_z"),
            fix_shear_x: properties.get_f64("fix_shear_x"),
            fix_shear_y: properties.get_f64("fix_shear_y"),
            fix_shear_z: properties.get_f64("fix_shear_z"),
            shear_x: properties.get_f64("shear_x"),
            shear_y: properties.get_f64("shear_y"),
            shear_z: properties.get_f64("shear_z"),
            ox: properties.get_f64("ox"),
            oy: properties.get_f64("oy"),
            autoscale: properties.get_i64("scale") != 0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
