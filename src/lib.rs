//! Single rigid body Newtonian dynamics integrated with Forward Euler.
//!
//! A driver sets the load for an interval, integrates, and reads back the pose:
//!
//! ```
//! use cgmath::Vector3;
//! use rigid_body_dynamics::integrator::{IntegrationScheme, RigidBodyIntegrator};
//! use rigid_body_dynamics::rigid_body::{InitialConditions, MassProperties, OrientationPolicy};
//! use rigid_body_dynamics::transform::RenderTransform;
//!
//! let props = MassProperties::cube(1.0, 1.0).unwrap();
//! let mut body = IntegrationScheme::BodyFrame.build(
//!     props,
//!     InitialConditions::default(),
//!     OrientationPolicy::AcceptDrift,
//! );
//! body.set_force(Vector3::new(0.0, -9.8, 0.0));
//! body.integrate(0.0, 0.01).unwrap();
//! let transform = RenderTransform::of(&*body);
//! assert!(transform.columns[3][1] < 0.0);
//! ```

pub mod config;
pub mod error;
pub mod integrator;
pub mod math;
pub mod rigid_body;
pub mod transform;

pub use error::RigidBodyError;
pub use integrator::{
    BodyFrameEquation, IntegrationScheme, RigidBodyIntegrator, WorldFrameEquation,
};
pub use rigid_body::{InitialConditions, MassProperties, OrientationPolicy, RigidBodyState};
