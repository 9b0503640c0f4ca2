use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RigidBodyError {
    #[error("mass must be positive and finite, got {mass}")]
    NonPositiveMass { mass: f64 },

    #[error("principal moment of inertia {axis} must be positive and finite, got {moment}")]
    NonPositiveMoment { axis: usize, moment: f64 },

    #[error("dimension must be non-negative and finite, got {dimension}")]
    InvalidDimension { dimension: f64 },

    #[error("integration interval runs backwards: [{begin}, {end}]")]
    NegativeInterval { begin: f64, end: f64 },

    #[error("integration interval bounds must be finite: [{begin}, {end}]")]
    NonFiniteInterval { begin: f64, end: f64 },
}

pub type Result<T> = std::result::Result<T, RigidBodyError>;
