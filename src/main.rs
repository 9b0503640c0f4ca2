use std::env;
use std::path::PathBuf;

use cgmath::InnerSpace;
use log::{debug, info};
use rigid_body_dynamics::config::{ConfigError, Scenario};
use rigid_body_dynamics::math;
use rigid_body_dynamics::transform::RenderTransform;

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let scenario = Scenario::resolve(env::args_os().nth(1).map(PathBuf::from))?;
    let mut body = scenario.build()?;
    info!(
        "simulating {:?} body (mass {}, moments {:?}) for {} steps of {}s",
        body.scheme(),
        body.mass(),
        body.principal_moments_of_inertia(),
        scenario.steps,
        scenario.time_step
    );

    let energy_before = body.kinetic_energy();
    let mut time = 0.0;
    for step in 0..scenario.steps {
        let next = f64::from(step + 1) * scenario.time_step;
        body.integrate(time, next)?;
        time = next;

        let transform = RenderTransform::of(&*body);
        debug!(
            "t={:.4} position={:?} columns={:?}",
            time,
            body.position(),
            transform.columns
        );
    }

    println!("Final position: {:?}", body.position());
    println!("Final velocity: {:?}", body.linear_velocity());
    println!("Final angular velocity (body): {:?}", body.angular_velocity());
    info!(
        "speed {:.6}, kinetic energy {:.6} -> {:.6}, orientation drift {:.3e}",
        body.linear_velocity().magnitude(),
        energy_before,
        body.kinetic_energy(),
        math::orthonormality_error(body.orientation())
    );
    Ok(())
}
