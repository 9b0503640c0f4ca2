use log::trace;

use super::{IntegrationScheme, RigidBodyIntegrator};
use crate::error::Result;
use crate::math::{self, Mat3, Pos3, Vec3};
use crate::rigid_body::{self, InitialConditions, MassProperties, OrientationPolicy, RigidBodyState};

/// Integrates angular velocity in the BODY (principal axes) frame.
#[derive(Debug, Clone)]
pub struct BodyFrameEquation {
    state: RigidBodyState,
}

impl BodyFrameEquation {
    pub fn new(properties: MassProperties, initial: InitialConditions) -> BodyFrameEquation {
        BodyFrameEquation {
            state: RigidBodyState::new(properties, initial),
        }
    }

    pub fn with_policy(mut self, policy: OrientationPolicy) -> BodyFrameEquation {
        self.state.policy = policy;
        self
    }

    /// Euler's rotation equations in the principal frame:
    /// `dw_i/dt = (t_i - w_j * w_k * (I_k - I_j)) / I_i` for cyclic `(i, j, k)`.
    fn angular_acceleration(&self) -> Vec3 {
        let i = self.state.properties.principal_moments();
        let w = self.state.angular_velocity;
        let t = self.state.torque;
        Vec3::new(
            (t.x - w.y * w.z * (i.z - i.y)) / i.x,
            (t.y - w.z * w.x * (i.x - i.z)) / i.y,
            (t.z - w.x * w.y * (i.y - i.x)) / i.z,
        )
    }
}

impl RigidBodyIntegrator for BodyFrameEquation {
    fn scheme(&self) -> IntegrationScheme {
        IntegrationScheme::BodyFrame
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

        // Both angular updates use the pre-step angular velocity.
        let world_angular_velocity = self.state.orientation * self.state.angular_velocity;
        let angular_acceleration = self.angular_acceleration();
        self.state.advance_orientation(dt, world_angular_velocity);
        self.state.angular_velocity += angular_acceleration * dt;

        trace!(
            "body frame step dt={dt}: position={:?} w={:?}",
            self.state.position,
            self.state.angular_velocity
        );
        Ok(())
    }

    fn reset_initial_conditions(&mut self) {
        self.state.reset();
    }

    fn compute_angular_momentum(&self) -> Vec3 {
        math::hadamard(
            self.state.properties.principal_moments(),
            self.state.angular_velocity,
        )
    }

    fn set_position(&mut self, position: Pos3) {
        self.state.position = position;
    }

    fn set_linear_momentum(&mut self, momentum: Vec3) {
        self.state.linear_momentum = momentum;
    }

    fn set_orientation(&mut self, orientation: Mat3) {
        self.state.orientation = orientation;
    }

    fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.state.angular_velocity = angular_velocity;
    }

    fn set_force(&mut self, force: Vec3) {
        self.state.force = force;
    }

    fn set_torque(&mut self, torque: Vec3) {
        self.state.torque = torque;
    }
}
