// Affine 4x4 transform for camera rigs and object placement.
//
// Wraps glam::Mat4 (column-major storage). Every operation returns a new
// Transform; nothing is modified in place.
//
// Composition convention: `a.multiply(b)` applies `b` first, then `a`.
// The local-frame operations (rotate_x/y/z, rotate_around_local_axis, scale)
// right-multiply; the world-frame operations (translate,
// rotate_around_world_axis) left-multiply.

use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::{Ray, Vec3Ext};

/// Determinants below this are treated as singular.
const SINGULAR_EPSILON: f32 = 1e-12;

/// An affine transform (rotation + translation, optionally uniform scale).
///
/// The upper-left 3x3 block is expected to stay orthonormal: `apply_to_vector`
/// is used to carry normals, which is only correct for rigid transforms.
/// `scale` breaks that assumption and is meant for points only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: Mat4::IDENTITY,
    };

    /// Identity transform.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Wrap an existing matrix.
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Pure translation.
    pub fn from_translation(offset: Vec3) -> Self {
        Self::from_matrix(Mat4::from_translation(offset))
    }

    /// Rotation from XYZ Euler angles in radians (X applied first).
    pub fn from_euler_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::IDENTITY.rotate_z(z).rotate_y(y).rotate_x(x)
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// The 16 elements in column-major order.
    pub fn elements(&self) -> [f32; 16] {
        self.matrix.to_cols_array()
    }

    /// World-space position of the local origin.
    pub fn translation(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// Local +X axis in world space (not normalized).
    pub fn x_axis(&self) -> Vec3 {
        self.matrix.x_axis.truncate()
    }

    /// Local +Y axis in world space (not normalized).
    pub fn y_axis(&self) -> Vec3 {
        self.matrix.y_axis.truncate()
    }

    /// Local +Z axis in world space (not normalized).
    pub fn z_axis(&self) -> Vec3 {
        self.matrix.z_axis.truncate()
    }

    /// Translate by a world-space offset.
    pub fn translate(self, offset: Vec3) -> Self {
        Self::from_matrix(Mat4::from_translation(offset) * self.matrix)
    }

    /// Uniform scale in local space.
    pub fn scale(self, factor: f32) -> Self {
        self.multiply(&Self::from_matrix(Mat4::from_scale(Vec3::splat(factor))))
    }

    /// Rotate around the local X axis.
    pub fn rotate_x(self, angle: f32) -> Self {
        self.multiply(&Self::from_matrix(Mat4::from_rotation_x(angle)))
    }

    /// Rotate around the local Y axis.
    pub fn rotate_y(self, angle: f32) -> Self {
        self.multiply(&Self::from_matrix(Mat4::from_rotation_y(angle)))
    }

    /// Rotate around the local Z axis.
    pub fn rotate_z(self, angle: f32) -> Self {
        self.multiply(&Self::from_matrix(Mat4::from_rotation_z(angle)))
    }

    /// Rotate around an axis given in world coordinates, pivoting on this
    /// transform's own origin (the translation is kept).
    ///
    /// A zero axis leaves the transform unchanged.
    pub fn rotate_around_world_axis(self, axis: Vec3, angle: f32) -> Self {
        let axis = axis.unit_or_zero();
        if axis == Vec3::ZERO {
            return self;
        }

        let rotation = Mat3::from_axis_angle(axis, angle);
        let basis = rotation * Mat3::from_mat4(self.matrix);
        let mut matrix = Mat4::from_mat3(basis);
        matrix.w_axis = self.matrix.w_axis;
        Self::from_matrix(matrix)
    }

    /// Rotate around an axis given in this transform's local coordinates.
    ///
    /// A zero axis leaves the transform unchanged.
    pub fn rotate_around_local_axis(self, axis: Vec3, angle: f32) -> Self {
        let axis = axis.unit_or_zero();
        if axis == Vec3::ZERO {
            return self;
        }

        self.multiply(&Self::from_matrix(Mat4::from_axis_angle(axis, angle)))
    }

    /// Compose: the result applies `other` first, then `self`.
    pub fn multiply(&self, other: &Transform) -> Self {
        Self::from_matrix(self.matrix * other.matrix)
    }

    /// Transform a point (w = 1, translation applies).
    #[inline]
    pub fn apply_to_point(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// Transform a direction (w = 0, translation ignored).
    #[inline]
    pub fn apply_to_vector(&self, vector: Vec3) -> Vec3 {
        let v4 = self.matrix * Vec4::new(vector.x, vector.y, vector.z, 0.0);
        v4.truncate()
    }

    /// Transform both the origin and the direction of a ray.
    #[inline]
    pub fn apply_to_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.apply_to_point(ray.origin()),
            self.apply_to_vector(ray.direction()),
        )
    }

    /// Inverse transform, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.matrix.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(Self::from_matrix(self.matrix.inverse()))
    }

    /// Build the pose of an observer at `eye` looking at `target`.
    ///
    /// The basis is `z = normalize(eye - target)`, `x = normalize(up × z)`,
    /// `y = z × x`; the observer looks down its local -Z. Apply the result
    /// to camera-local points to get world points; its inverse is the view
    /// matrix.
    ///
    /// Returns `None` when `eye == target` or `up` is parallel to the view
    /// direction.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Option<Self> {
        let z = (eye - target).unit_or_zero();
        let x = up.cross(z).unit_or_zero();
        if z == Vec3::ZERO || x == Vec3::ZERO {
            log::debug!("degenerate look_at basis: eye={eye:?} target={target:?} up={up:?}");
            return None;
        }
        let y = z.cross(x);

        Some(Self::from_matrix(Mat4::from_cols(
            x.extend(0.0),
            y.extend(0.0),
            z.extend(0.0),
            eye.extend(1.0),
        )))
    }

    /// Move along the local -Z axis.
    pub fn move_forward(self, step: f32) -> Self {
        self.move_backward(-step)
    }

    /// Move along the local +Z axis.
    pub fn move_backward(self, step: f32) -> Self {
        let offset = self.z_axis().unit_or_zero() * step;
        self.translate(offset)
    }

    /// Move along the local -X axis.
    pub fn move_left(self, step: f32) -> Self {
        self.move_right(-step)
    }

    /// Move along the local +X axis.
    pub fn move_right(self, step: f32) -> Self {
        let offset = self.x_axis().unit_or_zero() * step;
        self.translate(offset)
    }

    /// Move along the local +Y axis.
    pub fn move_up(self, step: f32) -> Self {
        let offset = self.y_axis().unit_or_zero() * step;
        self.translate(offset)
    }

    /// Move along the local -Y axis.
    pub fn move_down(self, step: f32) -> Self {
        self.move_up(-step)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_identity_point() {
        let point = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Transform::identity().apply_to_point(point), point);
    }

    #[test]
    fn test_elements_column_major() {
        let t = Transform::from_translation(Vec3::new(10.0, 20.0, 30.0));
        let e = t.elements();
        assert_eq!(e[0], 1.0);
        assert_eq!(e[5], 1.0);
        assert_eq!(e[10], 1.0);
        assert_eq!(e[15], 1.0);
        assert_eq!((e[12], e[13], e[14]), (10.0, 20.0, 30.0));
    }

    #[test]
    fn test_translate_point_and_vector() {
        let t = Transform::identity().translate(Vec3::new(10.0, 20.0, 30.0));

        assert_eq!(
            t.apply_to_point(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::new(11.0, 22.0, 33.0)
        );
        // Translation should NOT affect vectors
        assert_eq!(t.apply_to_vector(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_rotate_z_vector() {
        let t = Transform::identity().rotate_z(FRAC_PI_2);
        assert_vec_eq(t.apply_to_vector(Vec3::X), Vec3::Y);
    }

    #[test]
    fn test_multiply_applies_right_operand_first() {
        let rotate = Transform::identity().rotate_z(FRAC_PI_2);
        let shift = Transform::from_translation(Vec3::new(5.0, 0.0, 0.0));

        // Shift first, then rotate: (1,0,0) -> (6,0,0) -> (0,6,0)
        let composed = rotate.multiply(&shift);
        assert_vec_eq(composed.apply_to_point(Vec3::X), Vec3::new(0.0, 6.0, 0.0));

        // Rotate first, then shift: (1,0,0) -> (0,1,0) -> (5,1,0)
        let composed = shift.multiply(&rotate);
        assert_vec_eq(composed.apply_to_point(Vec3::X), Vec3::new(5.0, 1.0, 0.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform::from_translation(Vec3::new(1.0, -2.0, 3.0))
            .rotate_y(PI / 4.0)
            .rotate_around_local_axis(Vec3::new(1.0, 1.0, 0.0), 0.7);
        let inv = t.inverse().unwrap();

        for p in [
            Vec3::new(5.0, 3.0, 2.0),
            Vec3::ZERO,
            Vec3::new(-1.0, 0.5, 8.0),
        ] {
            assert_vec_eq(t.apply_to_point(inv.apply_to_point(p)), p);
            assert_vec_eq(inv.apply_to_point(t.apply_to_point(p)), p);
        }
    }

    #[test]
    fn test_inverse_singular() {
        assert!(Transform::identity().scale(0.0).inverse().is_none());
    }

    #[test]
    fn test_rotation_keeps_basis_orthonormal() {
        let t = Transform::identity()
            .rotate_x(0.3)
            .rotate_around_world_axis(Vec3::Y, 1.1)
            .rotate_around_local_axis(Vec3::new(0.2, 0.5, 0.9), -0.4);

        for axis in [t.x_axis(), t.y_axis(), t.z_axis()] {
            assert!((axis.length() - 1.0).abs() < 1e-5);
        }
        assert!(t.x_axis().dot(t.y_axis()).abs() < 1e-5);
        assert!(t.y_axis().dot(t.z_axis()).abs() < 1e-5);
        assert!(t.z_axis().dot(t.x_axis()).abs() < 1e-5);
    }

    #[test]
    fn test_world_axis_rotation_keeps_translation() {
        let t = Transform::from_translation(Vec3::new(3.0, 0.0, 0.0))
            .rotate_around_world_axis(Vec3::Y, FRAC_PI_2);

        assert_vec_eq(t.translation(), Vec3::new(3.0, 0.0, 0.0));
        // Local -Z now faces world -X
        assert_vec_eq(t.apply_to_vector(Vec3::NEG_Z), Vec3::NEG_X);
    }

    #[test]
    fn test_local_axis_follows_orientation() {
        // After yawing 90 degrees, the local X axis is world -Z; rotating
        // around local X must equal rotating around world -Z.
        let yawed = Transform::identity().rotate_y(FRAC_PI_2);
        let local = yawed.rotate_around_local_axis(Vec3::X, 0.5);
        let world = yawed.rotate_around_world_axis(Vec3::NEG_Z, 0.5);

        for v in [Vec3::X, Vec3::Y, Vec3::Z] {
            assert_vec_eq(local.apply_to_vector(v), world.apply_to_vector(v));
        }
    }

    #[test]
    fn test_zero_axis_rotation_is_noop() {
        let t = Transform::from_translation(Vec3::ONE);
        assert_eq!(t.rotate_around_world_axis(Vec3::ZERO, 1.0), t);
        assert_eq!(t.rotate_around_local_axis(Vec3::ZERO, 1.0), t);
    }

    #[test]
    fn test_look_at_basis() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let pose = Transform::look_at(eye, Vec3::ZERO, Vec3::Y).unwrap();

        assert_vec_eq(pose.translation(), eye);
        // The observer looks down local -Z, toward the target
        assert_vec_eq(pose.apply_to_vector(Vec3::NEG_Z), Vec3::NEG_Z);
        assert_vec_eq(pose.x_axis(), Vec3::X);
        assert_vec_eq(pose.y_axis(), Vec3::Y);
    }

    #[test]
    fn test_look_at_round_trip() {
        let pose = Transform::look_at(
            Vec3::new(4.0, 3.0, -2.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::Y,
        )
        .unwrap();
        let view = pose.inverse().unwrap();

        // The eye maps to the view-space origin and the target onto -Z.
        assert_vec_eq(view.apply_to_point(Vec3::new(4.0, 3.0, -2.0)), Vec3::ZERO);
        let target = view.apply_to_point(Vec3::new(-1.0, 0.0, 1.0));
        assert!(target.x.abs() < 1e-4 && target.y.abs() < 1e-4 && target.z < 0.0);
    }

    #[test]
    fn test_look_at_degenerate() {
        assert!(Transform::look_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y).is_none());
        assert!(Transform::look_at(Vec3::ONE, Vec3::ONE, Vec3::Y).is_none());
    }

    #[test]
    fn test_moves_follow_local_axes() {
        let t = Transform::identity().rotate_y(FRAC_PI_2);

        // Forward is local -Z, which is world -X after the yaw
        assert_vec_eq(t.move_forward(2.0).translation(), Vec3::new(-2.0, 0.0, 0.0));
        assert_vec_eq(t.move_backward(2.0).translation(), Vec3::new(2.0, 0.0, 0.0));
        assert_vec_eq(t.move_right(1.0).translation(), Vec3::new(0.0, 0.0, -1.0));
        assert_vec_eq(t.move_left(1.0).translation(), Vec3::new(0.0, 0.0, 1.0));
        assert_vec_eq(t.move_up(1.0).translation(), Vec3::Y);
        assert_vec_eq(t.move_down(1.0).translation(), Vec3::NEG_Y);
    }

    #[test]
    fn test_apply_to_ray() {
        let t = Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)).rotate_x(FRAC_PI_2);
        let ray = t.apply_to_ray(&Ray::new(Vec3::ZERO, Vec3::NEG_Z));

        assert_vec_eq(ray.origin(), Vec3::Y);
        assert_vec_eq(ray.direction(), Vec3::Y);
    }

    #[test]
    fn test_scale_points() {
        let t = Transform::identity().scale(2.0);
        assert_vec_eq(t.apply_to_point(Vec3::ONE), Vec3::splat(2.0));
    }
}
