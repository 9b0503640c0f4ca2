use cgmath::ElementWise;
use cgmath::InnerSpace;
use cgmath::Matrix;
use cgmath::Matrix3;
use cgmath::Point3;
use cgmath::SquareMatrix;
use cgmath::Vector3;

pub type Vec3 = Vector3<f64>;

pub type Pos3 = Point3<f64>;

/// Column-major 3x3 matrix. Column `i` is the i-th basis vector of the source frame.
pub type Mat3 = Matrix3<f64>;

pub fn zero() -> Vec3 {
    Vector3::new(0.0, 0.0, 0.0)
}

pub fn origin() -> Pos3 {
    Point3::new(0.0, 0.0, 0.0)
}

pub fn identity() -> Mat3 {
    Matrix3::identity()
}

pub fn from_columns(c0: Vec3, c1: Vec3, c2: Vec3) -> Mat3 {
    Matrix3::from_cols(c0, c1, c2)
}

/// Cross-product matrix: `skew(v) * u == v.cross(u)`.
pub fn skew(v: Vec3) -> Mat3 {
    Matrix3::new(
        0.0, v.z, -v.y, // column 0
        -v.z, 0.0, v.x, // column 1
        v.y, -v.x, 0.0, // column 2
    )
}

pub fn hadamard(a: Vec3, b: Vec3) -> Vec3 {
    a.mul_element_wise(b)
}

/// Gram-Schmidt on the columns. The third axis is rebuilt from the cross product so
/// the result stays right-handed.
pub fn orthonormalize(m: Mat3) -> Mat3 {
    let x = m.x.normalize();
    let y = (m.y - x * x.dot(m.y)).normalize();
    let z = x.cross(y);
    Matrix3::from_cols(x, y, z)
}

/// Largest absolute entry of `m * mᵗ - I`. Zero for an exact rotation.
pub fn orthonormality_error(m: Mat3) -> f64 {
    let residual = m * m.transpose() - identity();
    let cols: [[f64; 3]; 3] = residual.into();
    cols.iter()
        .flat_map(|c| c.iter())
        .fold(0.0, |acc: f64, e| acc.max(e.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Rad;

    #[test]
    fn skew_matches_cross_product() {
        let v = Vector3::new(1.0, -2.0, 0.5);
        let u = Vector3::new(0.3, 4.0, -1.5);
        let lhs = skew(v) * u;
        let rhs = v.cross(u);
        assert_relative_eq!(lhs.x, rhs.x, epsilon = 1e-12);
        assert_relative_eq!(lhs.y, rhs.y, epsilon = 1e-12);
        assert_relative_eq!(lhs.z, rhs.z, epsilon = 1e-12);
    }

    #[test]
    fn skew_is_antisymmetric() {
        let s = skew(Vector3::new(3.0, 1.0, -7.0));
        assert_eq!(s.transpose(), -s);
    }

    #[test]
    fn hadamard_multiplies_componentwise() {
        let p = hadamard(Vector3::new(2.0, 3.0, 4.0), Vector3::new(1.0, -1.0, 0.5));
        assert_eq!(p, Vector3::new(2.0, -3.0, 2.0));
    }

    #[test]
    fn from_columns_places_vectors_as_columns() {
        let m = from_columns(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(4.0, 5.0, 6.0),
            Vector3::new(7.0, 8.0, 9.0),
        );
        assert_eq!(m * Vector3::unit_x(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Vector3::unit_z(), Vector3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn rotation_has_no_orthonormality_error() {
        let r = Matrix3::from_angle_y(Rad(0.7)) * Matrix3::from_angle_x(Rad(-1.2));
        assert!(orthonormality_error(r) < 1e-12);
    }

    #[test]
    fn orthonormalize_repairs_skewed_basis() {
        let skewed = identity() + skew(Vector3::new(0.05, -0.02, 0.1));
        assert!(orthonormality_error(skewed) > 1e-3);

        let fixed = orthonormalize(skewed);
        assert!(orthonormality_error(fixed) < 1e-12);
        assert_relative_eq!(fixed.determinant(), 1.0, epsilon = 1e-12);
    }
}
