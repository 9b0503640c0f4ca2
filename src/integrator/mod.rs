//! Forward Euler rigid body equations.
//!
//! Two schemes share one contract. They differ only in the angular state they carry
//! between steps:
//!
//! - [`BodyFrameEquation`] integrates angular velocity in the BODY frame using
//!   Euler's rotation equations.
//! - [`WorldFrameEquation`] integrates angular momentum in the WORLD frame and
//!   recovers angular velocity from it every step.
//!
//! Both integrate position and linear momentum in the WORLD frame, and the
//! orientation matrix (BODY->WORLD) with the linearized update
//! `R += dt * skew(w_world) * R`.

mod body_frame;
mod world_frame;

pub use body_frame::BodyFrameEquation;
pub use world_frame::WorldFrameEquation;

use cgmath::EuclideanSpace;
use cgmath::Matrix;

use crate::error::Result;
use crate::math::{Mat3, Pos3, Vec3};
use crate::rigid_body::{InitialConditions, MassProperties, OrientationPolicy, RigidBodyState};

pub trait RigidBodyIntegrator {
    fn scheme(&self) -> IntegrationScheme;

    fn state(&self) -> &RigidBodyState;

    /// Performs exactly one Forward Euler step over `[time_begin, time_end)`, holding
    /// force and torque constant. Equal bounds are a no-op; reversed or non-finite
    /// bounds are rejected without touching the state.
    fn integrate(&mut self, time_begin: f64, time_end: f64) -> Result<()>;

    fn reset_initial_conditions(&mut self);

    /// Angular momentum expressed in the BODY frame.
    fn compute_angular_momentum(&self) -> Vec3;

    fn set_position(&mut self, position: Pos3);

    fn set_linear_momentum(&mut self, momentum: Vec3);

    fn set_orientation(&mut self, orientation: Mat3);

    /// Body frame.
    fn set_angular_velocity(&mut self, angular_velocity: Vec3);

    /// World frame. Persists across steps until overwritten.
    fn set_force(&mut self, force: Vec3);

    /// Body frame. Persists across steps until overwritten.
    fn set_torque(&mut self, torque: Vec3);

    fn mass(&self) -> f64 {
        self.state().properties().mass()
    }

    fn principal_moments_of_inertia(&self) -> Vec3 {
        self.state().properties().principal_moments()
    }

    fn dimension(&self) -> f64 {
        self.state().properties().dimension()
    }

    fn force(&self) -> Vec3 {
        self.state().force()
    }

    fn torque(&self) -> Vec3 {
        self.state().torque()
    }

    fn position(&self) -> Pos3 {
        self.state().position()
    }

    fn linear_momentum(&self) -> Vec3 {
        self.state().linear_momentum()
    }

    fn orientation(&self) -> Mat3 {
        self.state().orientation()
    }

    fn angular_velocity(&self) -> Vec3 {
        self.state().angular_velocity()
    }

    fn linear_velocity(&self) -> Vec3 {
        self.linear_momentum() / self.mass()
    }

    fn world_angular_velocity(&self) -> Vec3 {
        self.orientation() * self.angular_velocity()
    }

    fn kinetic_energy(&self) -> f64 {
        self.state().kinetic_energy()
    }

    /// WORLD -> BODY. With `is_position`, `r` holds point coordinates and is taken
    /// relative to the center of mass first; free vectors such as forces are only
    /// rotated.
    fn convert_world_to_body(&self, r: Vec3, is_position: bool) -> Vec3 {
        let r = if is_position {
            Pos3::from_vec(r) - self.position()
        } else {
            r
        };
        self.orientation().transpose() * r
    }

    /// BODY -> WORLD. Inverse of [`convert_world_to_body`](Self::convert_world_to_body).
    fn convert_body_to_world(&self, r: Vec3, is_position: bool) -> Vec3 {
        let rotated = self.orientation() * r;
        if is_position {
            (self.position() + rotated).to_vec()
        } else {
            rotated
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationScheme {
    /// Angular velocity integrated in the BODY frame.
    #[default]
    BodyFrame,
    /// Angular momentum integrated in the WORLD frame.
    WorldFrame,
}

impl IntegrationScheme {
    pub fn build(
        self,
        properties: MassProperties,
        initial: InitialConditions,
        policy: OrientationPolicy,
    ) -> Box<dyn RigidBodyIntegrator + Send> {
        match self {
            IntegrationScheme::BodyFrame => {
                Box::new(BodyFrameEquation::new(properties, initial).with_policy(policy))
            }
            IntegrationScheme::WorldFrame => {
                Box::new(WorldFrameEquation::new(properties, initial).with_policy(policy))
            }
        }
    }
}

/// `I^-1 * L`, with both in the BODY frame.
pub(crate) fn angular_velocity_from_momentum(
    principal_moments: Vec3,
    body_momentum: Vec3,
) -> Vec3 {
    Vec3::new(
        body_momentum.x / principal_moments.x,
        body_momentum.y / principal_moments.y,
        body_momentum.z / principal_moments.z,
    )
}
