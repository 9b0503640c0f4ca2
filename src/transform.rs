use cgmath::Matrix4;

use crate::integrator::RigidBodyIntegrator;
use crate::math::{Mat3, Pos3, Vec3};

/// Column-major world transform of a body, laid out for direct upload to a GPU
/// uniform buffer. Translation is the center of mass, the upper-left 3x3 is the
/// orientation matrix.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderTransform {
    pub columns: [[f32; 4]; 4],
}

impl RenderTransform {
    pub fn from_pose(position: Pos3, orientation: Mat3) -> RenderTransform {
        let axis = |c: Vec3| [c.x as f32, c.y as f32, c.z as f32, 0.0];
        RenderTransform {
            columns: [
                axis(orientation.x),
                axis(orientation.y),
                axis(orientation.z),
                [position.x as f32, position.y as f32, position.z as f32, 1.0],
            ],
        }
    }

    pub fn of(body: &dyn RigidBodyIntegrator) -> RenderTransform {
        RenderTransform::from_pose(body.position(), body.orientation())
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from(self.columns)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math;
    use cgmath::Matrix3;
    use cgmath::Point3;
    use cgmath::Rad;
    use cgmath::Vector4;

    #[test]
    fn translation_lands_in_last_column() {
        let t = RenderTransform::from_pose(Point3::new(1.0, 2.0, 3.0), math::identity());
        assert_eq!(t.columns[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(t.columns[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn matrix_maps_body_points_to_world() {
        let orientation = Matrix3::from_angle_z(Rad(std::f64::consts::FRAC_PI_2));
        let t = RenderTransform::from_pose(Point3::new(10.0, 0.0, 0.0), orientation);
        let world = t.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((world.x - 10.0).abs() < 1e-6);
        assert!((world.y - 1.0).abs() < 1e-6);
        assert_eq!(world.w, 1.0);
    }

    #[test]
    fn byte_view_is_sixteen_floats() {
        let t = RenderTransform::from_pose(math::origin(), math::identity());
        assert_eq!(t.as_bytes().len(), 16 * std::mem::size_of::<f32>());
    }
}
