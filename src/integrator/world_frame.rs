use cgmath::Matrix;
use log::trace;

use super::{angular_velocity_from_momentum, IntegrationScheme, RigidBodyIntegrator};
use crate::error::Result;
use crate::math::{self, Mat3, Pos3, Vec3};
use crate::rigid_body::{self, InitialConditions, MassProperties, OrientationPolicy, RigidBodyState};

/// Integrates angular momentum in the WORLD frame. Torque still arrives in the BODY
/// frame; the body frame angular velocity in `state` is recovered from the momentum
/// after every change to it or to the orientation.
#[derive(Debug, Clone)]
pub struct WorldFrameEquation {
    state: RigidBodyState,
    angular_momentum: Vec3,
}

impl WorldFrameEquation {
    pub fn new(properties: MassProperties, initial: InitialConditions) -> WorldFrameEquation {
        let mut equation = WorldFrameEquation {
            state: RigidBodyState::new(properties, initial),
            angular_momentum: math::zero(),
        };
        equation.sync_momentum();
        equation
    }

    pub fn with_policy(mut self, policy: OrientationPolicy) -> WorldFrameEquation {
        self.state.policy = policy;
        self
    }

    /// Angular momentum expressed in the WORLD frame.
    pub fn world_angular_momentum(&self) -> Vec3 {
        self.angular_momentum
    }

    // L_world = R * (I . w_body)
    fn sync_momentum(&mut self) {
        let body_momentum = math::hadamard(
            self.state.properties.principal_moments(),
            self.state.angular_velocity,
        );
        self.angular_momentum = self.state.orientation * body_momentum;
    }

    // w_body = I^-1 * (R^t * L_world)
    fn sync_angular_velocity(&mut self) {
        let body_momentum = self.state.orientation.transpose() * self.angular_momentum;
        let moments = self.state.properties.principal_moments();
        self.state.angular_velocity = angular_velocity_from_momentum(moments, body_momentum);
    }
}

impl RigidBodyIntegrator for WorldFrameEquation {
    fn scheme(&self) -> IntegrationScheme {
        IntegrationScheme::WorldFrame
    }

    fn state(&self) -> &RigidBodyState {
        &self.state
    }

    fn integrate(&mut self, time_begin: f64, time_end: f64) -> Result<()> {
        let dt = rigid_body::interval(time_begin, time_end)?;
        if dt == 0.0 {
            return Ok(());
        }

        self.state.advance_linear(dt);

        let world_torque = self.state.orientation * self.state.torque;
        let world_angular_velocity = self.state.orientation * self.state.angular_velocity;
        self.state.advance_orientation(dt, world_angular_velocity);
        self.angular_momentum += world_torque * dt;
        self.sync_angular_velocity();

        trace!(
            "world frame step dt={dt}: position={:?} L={:?}",
            self.state.position,
            self.angular_momentum
        );
        Ok(())
    }

    fn reset_initial_conditions(&mut self) {
        self.state.reset();
        self.sync_momentum();
    }

    fn compute_angular_momentum(&self) -> Vec3 {
        self.state.orientation.transpose() * self.angular_momentum
    }

    fn set_position(&mut self, position: Pos3) {
        self.state.position = position;
    }

    fn set_linear_momentum(&mut self, momentum: Vec3) {
        self.state.linear_momentum = momentum;
    }

    /// Keeps the world frame angular momentum and re-derives the body frame angular
    /// velocity for the new attitude.
    fn set_orientation(&mut self, orientation: Mat3) {
        self.state.orientation = orientation;
        self.sync_angular_velocity();
    }

    fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.state.angular_velocity = angular_velocity;
        self.sync_momentum();
    }

    fn set_force(&mut self, force: Vec3) {
        self.state.force = force;
    }

    fn set_torque(&mut self, torque: Vec3) {
        self.state.torque = torque;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Matrix3;
    use cgmath::Rad;
    use cgmath::Vector3;

    fn body(moments: Vec3) -> WorldFrameEquation {
        let props = MassProperties::new(2.0, moments, 1.0).unwrap();
        WorldFrameEquation::new(props, InitialConditions::default())
    }

    #[test]
    fn initial_angular_velocity_seeds_momentum() {
        let props = MassProperties::new(1.0, Vector3::new(2.0, 3.0, 4.0), 1.0).unwrap();
        let initial = InitialConditions {
            angular_velocity: Vector3::new(1.0, 1.0, 1.0),
            ..InitialConditions::default()
        };
        let b = WorldFrameEquation::new(props, initial);
        assert_eq!(b.world_angular_momentum(), Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(b.compute_angular_momentum(), Vector3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn torque_accumulates_world_momentum() {
        let mut b = body(Vector3::new(2.0, 2.0, 4.0));
        b.set_torque(Vector3::new(0.0, 0.0, 8.0));
        b.integrate(0.0, 0.25).unwrap();
        assert_eq!(b.world_angular_momentum(), Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(b.angular_velocity(), Vector3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn body_torque_is_rotated_into_world() {
        let mut b = body(Vector3::new(1.0, 1.0, 1.0));
        // body x axis points along world y
        b.set_orientation(Matrix3::from_angle_z(Rad(std::f64::consts::FRAC_PI_2)));
        b.set_torque(Vector3::new(1.0, 0.0, 0.0));
        b.integrate(0.0, 1.0).unwrap();
        let l = b.world_angular_momentum();
        assert_relative_eq!(l.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(l.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(l.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn torque_free_momentum_is_conserved_in_world() {
        let mut b = body(Vector3::new(1.0, 2.0, 3.0));
        b.set_angular_velocity(Vector3::new(0.4, -0.7, 1.3));
        let before = b.world_angular_momentum();
        for k in 0..500 {
            b.integrate(k as f64 * 0.002, (k + 1) as f64 * 0.002).unwrap();
        }
        assert_eq!(b.world_angular_momentum(), before);
    }

    #[test]
    fn set_orientation_keeps_world_momentum() {
        let mut b = body(Vector3::new(1.0, 1.0, 1.0));
        b.set_angular_velocity(Vector3::new(0.0, 0.0, 1.0));
        b.set_orientation(Matrix3::from_angle_x(Rad(std::f64::consts::FRAC_PI_2)));
        assert_eq!(b.world_angular_momentum(), Vector3::new(0.0, 0.0, 1.0));
        // a quarter turn about x carries the body y axis onto world z
        let w = b.angular_velocity();
        assert_relative_eq!(w.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(w.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(w.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn reset_rederives_momentum() {
        let mut b = body(Vector3::new(1.0, 2.0, 3.0));
        b.set_angular_velocity(Vector3::new(1.0, 0.0, 0.0));
        b.integrate(0.0, 0.1).unwrap();
        b.reset_initial_conditions();
        assert_eq!(b.world_angular_momentum(), math::zero());
        assert_eq!(b.angular_velocity(), math::zero());
    }
}
