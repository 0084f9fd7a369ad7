use std::f64::consts::PI;
use std::sync::Arc;
use std::thread;

use approx::assert_abs_diff_eq;

use quadrature::math::integration::bound::BoundKind;
use quadrature::math::integration::exitcondition::ExitCondition;
use quadrature::math::integration::gausskronrod::gausskronrodintegrator::GaussKronrodIntegrator;
use quadrature::math::integration::gausskronrod::gausskronrodtable::GaussKronrodOrder;
use quadrature::math::integration::gausslobatto::gausslobattointegrator::GaussLobattoIntegrator;
use quadrature::math::integration::integrationerror::IntegrationError;
use quadrature::math::integration::integrator::OneDimensionalIntegrator;
use quadrature::math::integration::resultstate::ResultClassification;

fn kronrod(order: GaussKronrodOrder, tolerance: f64) -> Box<dyn OneDimensionalIntegrator> {
    let exit_condition = ExitCondition::with_budget(200, 100_000)
        .unwrap()
        .with_absolute_tolerance(tolerance);
    Box::new(GaussKronrodIntegrator::new(order, exit_condition))
}

fn lobatto(tolerance: f64) -> Box<dyn OneDimensionalIntegrator> {
    let exit_condition = ExitCondition::with_budget(200, 100_000)
        .unwrap()
        .with_absolute_tolerance(tolerance);
    Box::new(GaussLobattoIntegrator::new(exit_condition))
}

#[test]
fn both_engines_agree_on_arctangent_integral() {
    let tolerance = 1e-10;
    let f = Arc::new(|x: f64| 1.0 / (1.0 + x * x));

    let mut values = Vec::new();
    let mut engines = vec![lobatto(tolerance)];
    for order in GaussKronrodOrder::ALL {
        engines.push(kronrod(order, tolerance));
    }
    for mut integrator in engines {
        assert!(integrator.try_set_bounds(-1.0, 1.0));
        integrator.set_function_to_integrate(f.clone());
        let state = integrator.create().unwrap().get_value_with_state();
        assert_eq!(state.classification(), ResultClassification::ProperResult, "{}", integrator.name());
        assert_abs_diff_eq!(state.value(), PI / 2.0, epsilon = tolerance);
        values.push(state.value());
    }
    let lobatto_value = values[0];
    for value in &values[1..] {
        assert_abs_diff_eq!(*value, lobatto_value, epsilon = tolerance);
    }
}

#[test]
fn bound_setters_reject_invalid_values() {
    let mut integrator = kronrod(GaussKronrodOrder::Kronrod15, 1e-10);
    assert!(!integrator.try_set_lower_bound(f64::NAN));
    assert!(!integrator.try_set_upper_bound(f64::NEG_INFINITY));
    assert!(!integrator.try_set_bounds(2.0, 1.0));
    assert!(!integrator.try_set_lower_bound_with_kind(1.0, BoundKind::Unbounded));
    assert!(!integrator.is_ready());

    assert!(integrator.try_set_bounds(1.0, 2.0));
    // 會讓 lower > upper 的設定被拒絕，原本的界不變
    assert!(!integrator.try_set_upper_bound(0.5));
    integrator.set_function_to_integrate(Arc::new(|x: f64| 1.0 / x));
    assert!(integrator.is_ready());
    let value = integrator.create().unwrap().get_value();
    assert_abs_diff_eq!(value, 2.0_f64.ln(), epsilon = 1e-10);
}

#[test]
fn create_without_configuration_fails() {
    let integrator = lobatto(1e-8);
    assert_eq!(integrator.create().err(), Some(IntegrationError::FunctionNotSet));

    let mut integrator = lobatto(1e-8);
    integrator.set_function_to_integrate(Arc::new(|x: f64| x));
    assert!(integrator.try_set_lower_bound(0.0));
    assert_eq!(integrator.create().err(), Some(IntegrationError::BoundsNotSet));
}

#[test]
fn uninstrumented_run_matches_instrumented_value() {
    for mut integrator in [kronrod(GaussKronrodOrder::Kronrod31, 1e-11), lobatto(1e-11)] {
        assert!(integrator.try_set_bounds(0.0, 3.0));
        integrator.set_function_to_integrate(Arc::new(|x: f64| (x * x).sin()));
        let mut algorithm = integrator.create().unwrap();
        let value = algorithm.get_value();
        let state = algorithm.get_value_with_state();
        assert_eq!(value.to_bits(), state.value().to_bits());
    }
}

#[test]
fn one_configuration_drives_many_threads() {
    let mut integrator = kronrod(GaussKronrodOrder::Kronrod21, 1e-12);
    assert!(integrator.try_set_bounds(0.0, PI));
    integrator.set_function_to_integrate(Arc::new(|x: f64| x.sin()));
    let integrator = &*integrator;

    let reference = integrator.create().unwrap().get_value_with_state();
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(move || integrator.create().unwrap().get_value_with_state()))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });
    for state in results {
        assert_eq!(state.value().to_bits(), reference.value().to_bits());
        assert_eq!(state.iterations(), reference.iterations());
    }
    assert_abs_diff_eq!(reference.value(), 2.0, epsilon = 1e-12);
}

#[test]
fn budgets_are_never_reported_as_proper() {
    let exit_condition = ExitCondition::with_budget(200, 14)
        .unwrap()
        .with_absolute_tolerance(1e-6);
    let mut integrator = GaussKronrodIntegrator::new(GaussKronrodOrder::Kronrod15, exit_condition);
    assert!(integrator.try_set_bounds(0.0, 1.0));
    integrator.set_function_to_integrate(Arc::new(|x: f64| x.exp()));
    let state = integrator.create().unwrap().get_value_with_state();
    assert_eq!(state.classification(), ResultClassification::EvaluationLimitExceeded);

    let exit_condition = ExitCondition::with_budget(1, 100_000)
        .unwrap()
        .with_relative_tolerance(1e-15);
    let mut integrator = GaussLobattoIntegrator::new(exit_condition);
    assert!(integrator.try_set_bounds(0.0, 1.0));
    integrator.set_function_to_integrate(Arc::new(|x: f64| x.sqrt()));
    let state = integrator.create().unwrap().get_value_with_state();
    assert_eq!(state.classification(), ResultClassification::IterationLimitExceeded);
    assert!(state.value().is_finite());
}

#[test]
fn exit_condition_rejects_zero_budgets() {
    assert!(ExitCondition::with_budget(0, 100).is_err());
    assert!(ExitCondition::with_budget(100, 0).is_err());
}
