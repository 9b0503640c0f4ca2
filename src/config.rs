use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use cgmath::SquareMatrix;
use cgmath::Vector3;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::error::RigidBodyError;
use crate::integrator::{IntegrationScheme, RigidBodyIntegrator};
use crate::math;
use crate::rigid_body::{InitialConditions, MassProperties, OrientationPolicy};

pub const SCENARIO_ENV: &str = "RIGID_BODY_SCENARIO";

/// Largest `R * Rᵗ - I` entry accepted for an initial orientation.
pub const ORIENTATION_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("time step must be positive and finite, got {0}")]
    TimeStep(f64),

    #[error("initial orientation is not a rotation: drift {error}, determinant {determinant}")]
    Orientation { error: f64, determinant: f64 },

    #[error(transparent)]
    Body(#[from] RigidBodyError),
}

/// A single body driven by a constant load, read from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub scheme: IntegrationScheme,
    #[serde(default)]
    pub policy: OrientationPolicy,
    pub time_step: f64,
    pub steps: u32,
    pub body: BodyConfig,
    #[serde(default)]
    pub initial: InitialConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub mass: f64,
    /// Omitted means a solid cube of edge `dimension`.
    pub principal_moments: Option<[f64; 3]>,
    #[serde(default = "unit")]
    pub dimension: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialConfig {
    pub position: [f64; 3],
    pub linear_momentum: [f64; 3],
    /// Body axes in world coordinates, one array per column. Identity when omitted.
    pub orientation: Option<[[f64; 3]; 3]>,
    pub angular_velocity: [f64; 3],
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// World frame.
    pub force: [f64; 3],
    /// Body frame.
    pub torque: [f64; 3],
}

fn unit() -> f64 {
    1.0
}

impl Scenario {
    /// Unit cube dropped from rest under gravity for one simulated second.
    pub fn free_fall() -> Scenario {
        Scenario {
            scheme: IntegrationScheme::BodyFrame,
            policy: OrientationPolicy::AcceptDrift,
            time_step: 0.01,
            steps: 100,
            body: BodyConfig {
                mass: 1.0,
                principal_moments: Some([1.0, 1.0, 1.0]),
                dimension: 1.0,
            },
            initial: InitialConfig::default(),
            load: LoadConfig {
                force: [0.0, -9.8, 0.0],
                torque: [0.0, 0.0, 0.0],
            },
        }
    }

    pub fn parse(text: &str) -> Result<Scenario, ConfigError> {
        let scenario: Scenario = toml::from_str(text)?;
        if !(scenario.time_step.is_finite() && scenario.time_step > 0.0) {
            return Err(ConfigError::TimeStep(scenario.time_step));
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Scenario, ConfigError> {
        debug!("reading scenario from {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Scenario::parse(&text)
    }

    /// Explicit path first, then `RIGID_BODY_SCENARIO`, then the built-in free fall.
    pub fn resolve(path: Option<PathBuf>) -> Result<Scenario, ConfigError> {
        match path.or_else(|| env::var_os(SCENARIO_ENV).map(PathBuf::from)) {
            Some(path) => Scenario::load(&path),
            None => {
                info!("no scenario given, using built-in free fall");
                Ok(Scenario::free_fall())
            }
        }
    }

    pub fn mass_properties(&self) -> Result<MassProperties, RigidBodyError> {
        match self.body.principal_moments {
            Some(moments) => {
                MassProperties::new(self.body.mass, moments.into(), self.body.dimension)
            }
            None => MassProperties::cube(self.body.mass, self.body.dimension),
        }
    }

    pub fn initial_conditions(&self) -> InitialConditions {
        let orientation = match self.initial.orientation {
            Some([c0, c1, c2]) => math::from_columns(c0.into(), c1.into(), c2.into()),
            None => math::identity(),
        };
        InitialConditions {
            position: self.initial.position.into(),
            linear_momentum: self.initial.linear_momentum.into(),
            orientation,
            angular_velocity: self.initial.angular_velocity.into(),
        }
    }

    /// Builds the configured integrator with the scenario's load already applied.
    pub fn build(&self) -> Result<Box<dyn RigidBodyIntegrator + Send>, ConfigError> {
        let properties = self.mass_properties()?;
        let initial = self.initial_conditions();
        let error = math::orthonormality_error(initial.orientation);
        let determinant = initial.orientation.determinant();
        if !(error <= ORIENTATION_TOLERANCE && determinant > 0.0) {
            return Err(ConfigError::Orientation { error, determinant });
        }
        let mut body = self.scheme.build(properties, initial, self.policy);
        body.set_force(Vector3::from(self.load.force));
        body.set_torque(Vector3::from(self.load.torque));
        Ok(body)
    }
}
