use cgmath::InnerSpace;
use cgmath::Vector3;
use log::warn;

use crate::error::{Result, RigidBodyError};
use crate::math::{self, Mat3, Pos3, Vec3};

/// Mass and mass distribution of a body, expressed in its principal axes of inertia.
/// The inertia tensor is diagonal in that basis, so the three principal moments are
/// all the integrators need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassProperties {
    mass: f64,
    principal_moments: Vec3,
    dimension: f64,
}

impl MassProperties {
    pub fn new(mass: f64, principal_moments: Vec3, dimension: f64) -> Result<MassProperties> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(RigidBodyError::NonPositiveMass { mass });
        }
        let moments: [f64; 3] = principal_moments.into();
        for (axis, moment) in moments.into_iter().enumerate() {
            if !(moment.is_finite() && moment > 0.0) {
                return Err(RigidBodyError::NonPositiveMoment { axis, moment });
            }
        }
        if !(dimension.is_finite() && dimension >= 0.0) {
            return Err(RigidBodyError::InvalidDimension { dimension });
        }
        Ok(MassProperties {
            mass,
            principal_moments,
            dimension,
        })
    }

    /// Solid cube of uniform density with edge length `dimension`.
    pub fn cube(mass: f64, dimension: f64) -> Result<MassProperties> {
        if !(dimension.is_finite() && dimension >= 0.0) {
            return Err(RigidBodyError::InvalidDimension { dimension });
        }
        let moment = mass * dimension * dimension / 6.0;
        MassProperties::new(mass, Vector3::new(moment, moment, moment), dimension)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn principal_moments(&self) -> Vec3 {
        self.principal_moments
    }

    /// Auxiliary size hint for the renderer. Not used by the dynamics.
    pub fn dimension(&self) -> f64 {
        self.dimension
    }
}

/// The rest configuration a body returns to on `reset_initial_conditions`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditions {
    pub position: Pos3,
    pub linear_momentum: Vec3,
    pub orientation: Mat3,
    /// Body frame.
    pub angular_velocity: Vec3,
}

impl Default for InitialConditions {
    fn default() -> Self {
        InitialConditions {
            position: math::origin(),
            linear_momentum: math::zero(),
            orientation: math::identity(),
            angular_velocity: math::zero(),
        }
    }
}

/// What to do about the orientation matrix drifting away from a rotation. The
/// linearized Euler update does not preserve orthonormality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationPolicy {
    /// Leave the matrix as integrated. Drift shrinks with the step size.
    #[default]
    AcceptDrift,
    /// Gram-Schmidt the columns after every step.
    GramSchmidt,
}

/// Physical state shared by both integration schemes.
///
/// Forces are WORLD frame, torques BODY frame. `orientation` is the BODY->WORLD change
/// of basis: each column is a principal axis expressed in world coordinates.
#[derive(Debug, Clone)]
pub struct RigidBodyState {
    pub(crate) properties: MassProperties,
    pub(crate) initial: InitialConditions,
    pub(crate) policy: OrientationPolicy,

    pub(crate) force: Vec3,
    pub(crate) torque: Vec3,

    // Linear
    pub(crate) position: Pos3,
    pub(crate) linear_momentum: Vec3,

    // Angular
    pub(crate) orientation: Mat3,
    pub(crate) angular_velocity: Vec3,
}

impl RigidBodyState {
    pub fn new(properties: MassProperties, initial: InitialConditions) -> RigidBodyState {
        RigidBodyState {
            properties,
            initial,
            policy: OrientationPolicy::default(),
            force: math::zero(),
            torque: math::zero(),
            position: initial.position,
            linear_momentum: initial.linear_momentum,
            orientation: initial.orientation,
            angular_velocity: initial.angular_velocity,
        }
    }

    pub fn properties(&self) -> &MassProperties {
        &self.properties
    }

    pub fn initial_conditions(&self) -> &InitialConditions {
        &self.initial
    }

    pub fn policy(&self) -> OrientationPolicy {
        self.policy
    }

    pub fn force(&self) -> Vec3 {
        self.force
    }

    pub fn torque(&self) -> Vec3 {
        self.torque
    }

    pub fn position(&self) -> Pos3 {
        self.position
    }

    pub fn linear_momentum(&self) -> Vec3 {
        self.linear_momentum
    }

    pub fn orientation(&self) -> Mat3 {
        self.orientation
    }

    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    pub(crate) fn reset(&mut self) {
        self.position = self.initial.position;
        self.linear_momentum = self.initial.linear_momentum;
        self.orientation = self.initial.orientation;
        self.angular_velocity = self.initial.angular_velocity;
    }

    /// Steps 1 and 2 of the Euler update: momentum from force, then position from the
    /// updated velocity.
    pub(crate) fn advance_linear(&mut self, dt: f64) {
        self.linear_momentum += self.force * dt;
        self.position += self.linear_momentum / self.properties.mass * dt;
    }

    /// `R += dt * skew(w) * R`, followed by the configured drift policy.
    pub(crate) fn advance_orientation(&mut self, dt: f64, world_angular_velocity: Vec3) {
        self.orientation += math::skew(world_angular_velocity) * self.orientation * dt;
        if self.policy == OrientationPolicy::GramSchmidt {
            self.orientation = math::orthonormalize(self.orientation);
        }
    }

    pub(crate) fn kinetic_energy(&self) -> f64 {
        let translational = self.linear_momentum.magnitude2() / (2.0 * self.properties.mass);
        let body_momentum =
            math::hadamard(self.properties.principal_moments, self.angular_velocity);
        translational + 0.5 * self.angular_velocity.dot(body_momentum)
    }
}

/// Checks an integration interval and returns its length.
pub(crate) fn interval(time_begin: f64, time_end: f64) -> Result<f64> {
    if !(time_begin.is_finite() && time_end.is_finite()) {
        return Err(RigidBodyError::NonFiniteInterval {
            begin: time_begin,
            end: time_end,
        });
    }
    if time_end < time_begin {
        warn!("rejecting integration over [{time_begin}, {time_end}]");
        return Err(RigidBodyError::NegativeInterval {
            begin: time_begin,
            end: time_end,
        });
    }
    Ok(time_end - time_begin)
}
