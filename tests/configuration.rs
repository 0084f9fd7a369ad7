use std::path::PathBuf;
use std::sync::Arc;

use approx::assert_abs_diff_eq;

use quadrature::configuration::Configuration;
use quadrature::manager::manager::IManager;
use quadrature::manager::managererror::ManagerError;
use quadrature::math::integration::gausskronrod::gausskronrodtable::GaussKronrodOrder;
use quadrature::math::integration::integratorconfiguration::{
    IntegratorConfiguration,
    IntegratorType
};

fn config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("json").join("config.json")
}

#[test]
fn bundled_configuration_loads() {
    let config = Configuration::new();
    config.from_reader(config_path()).unwrap();
    let manager = config.integrator_configuration_manager();
    assert_eq!(
        manager.names(),
        vec!["Kronrod15".to_owned(), "Kronrod61Relative".to_owned(), "Lobatto".to_owned()]
    );

    let IntegratorConfiguration::GaussKronrod { order, exit_condition } = manager.get("Kronrod61Relative").unwrap() else {
        panic!("expected a Gauss-Kronrod configuration");
    };
    assert_eq!(order, GaussKronrodOrder::Kronrod61);
    assert_eq!(exit_condition.max_iterations(), 50);
    assert_eq!(exit_condition.relative_tolerance(), 1e-12);
    assert_eq!(manager.get("Lobatto").unwrap().integrator_type(), IntegratorType::GaussLobatto);
}

#[test]
fn every_bundled_integrator_computes_a_gaussian() {
    let config = Configuration::new();
    config.from_reader(config_path()).unwrap();
    let manager = config.integrator_configuration_manager();
    for name in manager.names() {
        let mut integrator = manager.get(&name).unwrap().integrator();
        assert!(integrator.try_set_bounds(-3.0, 3.0));
        integrator.set_function_to_integrate(Arc::new(|x: f64| (-0.5 * x * x).exp()));
        let state = integrator.create().unwrap().get_value_with_state();
        assert!(state.classification().is_proper(), "{}: {}", name, state);
        // √(2π)·erf(3/√2)
        assert_abs_diff_eq!(state.value(), 2.499_860_889_483_095, epsilon = 1e-8);
    }
}

#[test]
fn missing_file_and_unknown_name() {
    let config = Configuration::new();
    assert!(matches!(
        config.from_reader("json/does-not-exist.json"),
        Err(ManagerError::IOError(_))
    ));
    assert!(matches!(
        config.integrator_configuration_manager().get("Kronrod15"),
        Err(ManagerError::NameNotFoundError(_))
    ));
}
