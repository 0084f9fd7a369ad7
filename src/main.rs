use std::f64::consts::PI;
use std::sync::Arc;

use quadrature::configuration::Configuration;
use quadrature::manager::manager::IManager;
use quadrature::manager::managererror::ManagerError;
use quadrature::math::integration::integrand::RealFunction;

const JSON_FOLDER: &str = "json/";

struct Problem {
    description: &'static str,
    lower: f64,
    upper: f64,
    function: RealFunction,
    exact: f64
}

fn problems() -> Vec<Problem> {
    vec![
        Problem {
            description: "exp(x) on [0, 1]",
            lower: 0.0,
            upper: 1.0,
            function: Arc::new(|x: f64| x.exp()),
            exact: std::f64::consts::E - 1.0
        },
        Problem {
            description: "1/(1+x^2) on [-1, 1]",
            lower: -1.0,
            upper: 1.0,
            function: Arc::new(|x: f64| 1.0 / (1.0 + x * x)),
            exact: 0.5 * PI
        },
        Problem {
            description: "sqrt(x) on [0, 1]",
            lower: 0.0,
            upper: 1.0,
            function: Arc::new(|x: f64| x.sqrt()),
            exact: 2.0 / 3.0
        },
        Problem {
            description: "exp(-x^2) on (-inf, inf)",
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            function: Arc::new(|x: f64| (-x * x).exp()),
            exact: PI.sqrt()
        }
    ]
}

fn main() -> Result<(), ManagerError> {
    let mut config_path = JSON_FOLDER.to_owned();
    config_path.push_str("config.json");
    let config = Configuration::new();
    config.from_reader(&config_path)?;

    let manager = config.integrator_configuration_manager();
    for name in manager.names() {
        let integrator_configuration = manager.get(&name)?;
        println!("== {} ==", name);
        for problem in problems() {
            let mut integrator = integrator_configuration.integrator();
            if !integrator.try_set_bounds(problem.lower, problem.upper) {
                println!("{}: bounds rejected", problem.description);
                continue;
            }
            integrator.set_function_to_integrate(problem.function.clone());
            let state = integrator.create()?.get_value_with_state();
            println!(
                "{}: {} (error {:.3e})",
                problem.description,
                state,
                (state.value() - problem.exact).abs()
            );
        }
    }
    Ok(())
}
