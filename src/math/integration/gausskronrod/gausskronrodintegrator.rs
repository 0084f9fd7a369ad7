use tracing::{
    debug,
    trace
};

use crate::math::constants::MACHINE_EPSILON;
use crate::math::integration::bound::IntegrationDomain;
use crate::math::integration::exitcondition::ExitCondition;
use crate::math::integration::gausskronrod::gausskronrodtable::GaussKronrodOrder;
use crate::math::integration::gausskronrod::onestepevaluator::OneStepEvaluator;
use crate::math::integration::integrand::{
    Integrand,
    RealFunction
};
use crate::math::integration::integrationerror::IntegrationError;
use crate::math::integration::integrator::{
    IntegratorAlgorithm,
    OneDimensionalIntegrator
};
use crate::math::integration::resultstate::{
    ResultClassification,
    ResultState
};

// ─────────────────────────────────────────────────────────────────────────────
// GaussKronrodIntegrator（設定 / 工廠）
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct GaussKronrodIntegrator {
    order: GaussKronrodOrder,
    exit_condition: ExitCondition,
    domain: IntegrationDomain,
    function: Option<RealFunction>,
}

impl GaussKronrodIntegrator {
    pub fn new(order: GaussKronrodOrder, exit_condition: ExitCondition) -> GaussKronrodIntegrator {
        GaussKronrodIntegrator {
            order,
            exit_condition,
            domain: IntegrationDomain::new(),
            function: None,
        }
    }

    /// 以規則點數建構，僅接受 15, 21, 31, 41, 51, 61
    pub fn with_order(order: u32, exit_condition: ExitCondition) -> Result<GaussKronrodIntegrator, IntegrationError> {
        Ok(Self::new(GaussKronrodOrder::try_from(order)?, exit_condition))
    }

    pub fn order(&self) -> GaussKronrodOrder {
        self.order
    }

    pub fn create_algorithm(&self) -> Result<GaussKronrodAlgorithm, IntegrationError> {
        let function = self.function.clone().ok_or(IntegrationError::FunctionNotSet)?;
        let integrand = Integrand::new(function, &self.domain)?;
        Ok(GaussKronrodAlgorithm {
            evaluator: OneStepEvaluator::new(self.order),
            exit_condition: self.exit_condition,
            integrand,
            work_list: Vec::new(),
        })
    }
}

impl OneDimensionalIntegrator for GaussKronrodIntegrator {
    fn name(&self) -> &'static str {
        "GaussKronrod"
    }

    fn domain(&self) -> &IntegrationDomain {
        &self.domain
    }

    fn domain_mut(&mut self) -> &mut IntegrationDomain {
        &mut self.domain
    }

    fn exit_condition(&self) -> &ExitCondition {
        &self.exit_condition
    }

    fn set_exit_condition(&mut self, exit_condition: ExitCondition) {
        self.exit_condition = exit_condition;
    }

    fn function_to_integrate(&self) -> Option<&RealFunction> {
        self.function.as_ref()
    }

    fn set_function_to_integrate(&mut self, function: RealFunction) {
        self.function = Some(function);
    }

    fn create(&self) -> Result<Box<dyn IntegratorAlgorithm>, IntegrationError> {
        Ok(Box::new(self.create_algorithm()?))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GaussKronrodAlgorithm（單次執行）
// ─────────────────────────────────────────────────────────────────────────────
//
// 以顯式 stack 取代遞迴做二分：
//
//   1. 對整個區間做一次 one-step；若 ExitCondition 成立 → ProperResult
//   2. 否則推入 depth = 1 的子區間，逐一 pop：
//      - depth ≤ max_iterations 且寬度未退化：在中點二分，
//        子區間以 factor = 2^depth 檢查收斂，收斂者累加、否則推回 stack
//      - 否則：該區間與 stack 剩餘所有區間原樣累加後結束，
//        depth 超出 → IterationLimitExceeded，寬度退化 → RoundOffError
//
// 遞迴深度由 max_iterations 決定，不受被積函數影響。

#[derive(Debug, Clone, Copy)]
struct SubInterval {
    lower_bound: f64,
    upper_bound: f64,
    value: f64,
    benchmark_value: f64,
    depth: usize,
}

impl SubInterval {
    fn midpoint(&self) -> f64 {
        0.5 * (self.lower_bound + self.upper_bound)
    }

    /// 寬度低於機器精度，或中點已無法落在區間內部
    fn is_degenerate(&self) -> bool {
        let mid = self.midpoint();
        (self.upper_bound - self.lower_bound).abs() < MACHINE_EPSILON
            || mid <= self.lower_bound
            || mid >= self.upper_bound
    }
}

pub struct GaussKronrodAlgorithm {
    evaluator: OneStepEvaluator,
    exit_condition: ExitCondition,
    integrand: Integrand,
    work_list: Vec<SubInterval>,
}

impl GaussKronrodAlgorithm {
    pub fn order(&self) -> u32 {
        self.evaluator.table().order()
    }

    fn run<const INSTRUMENTED: bool>(&mut self) -> ResultState {
        let GaussKronrodAlgorithm {
            evaluator,
            exit_condition,
            integrand,
            work_list,
        } = self;

        let classify = |classification: ResultClassification| {
            if INSTRUMENTED {
                classification
            } else {
                ResultClassification::Unknown
            }
        };

        let (lower, upper) = integrand.interval();
        if lower == upper {
            return ResultState::new(classify(ResultClassification::ProperResult), 0.0, 0.0, 0, 0);
        }

        let f = |x: f64| integrand.evaluate(x);
        let panel_cost = evaluator.evaluations_per_panel();
        let max_iterations = exit_condition.max_iterations();
        let max_evaluations = exit_condition.max_evaluations();

        let top = evaluator.one_step_integration(&f, lower, upper);
        let mut iterations = 1;
        let mut evaluations = panel_cost;

        if evaluations > max_evaluations {
            if INSTRUMENTED {
                debug!(
                    order = evaluator.table().order(),
                    evaluations, max_evaluations, "single panel exceeds evaluation budget"
                );
            }
            return ResultState::new(
                classify(ResultClassification::EvaluationLimitExceeded),
                top.value,
                top.benchmark_value,
                iterations,
                evaluations,
            );
        }

        if exit_condition.is_fulfilled(top.value, top.benchmark_value) {
            return ResultState::new(
                classify(ResultClassification::ProperResult),
                top.value,
                top.benchmark_value,
                iterations,
                evaluations,
            );
        }

        work_list.clear();
        work_list.push(SubInterval {
            lower_bound: lower,
            upper_bound: upper,
            value: top.value,
            benchmark_value: top.benchmark_value,
            depth: 1,
        });

        let mut value = 0.0;
        let mut benchmark_value = 0.0;
        let mut classification = ResultClassification::ProperResult;

        while let Some(interval) = work_list.pop() {
            let termination = if interval.depth > max_iterations {
                Some(ResultClassification::IterationLimitExceeded)
            } else if interval.is_degenerate() {
                Some(ResultClassification::RoundOffError)
            } else if evaluations + 2 * panel_cost > max_evaluations {
                Some(ResultClassification::EvaluationLimitExceeded)
            } else {
                None
            };

            if let Some(termination) = termination {
                value += interval.value;
                benchmark_value += interval.benchmark_value;
                for remaining in work_list.drain(..) {
                    value += remaining.value;
                    benchmark_value += remaining.benchmark_value;
                }
                if INSTRUMENTED {
                    debug!(
                        order = evaluator.table().order(),
                        lower = interval.lower_bound,
                        upper = interval.upper_bound,
                        depth = interval.depth,
                        iterations,
                        evaluations,
                        classification = termination.as_str(),
                        "Gauss-Kronrod integration stopped early"
                    );
                }
                classification = termination;
                break;
            }

            let mid = interval.midpoint();
            let left = evaluator.one_step_integration(&f, interval.lower_bound, mid);
            let right = evaluator.one_step_integration(&f, mid, interval.upper_bound);
            iterations += 2;
            evaluations += 2 * panel_cost;

            if INSTRUMENTED {
                trace!(
                    lower = interval.lower_bound,
                    upper = interval.upper_bound,
                    depth = interval.depth,
                    "bisect panel"
                );
            }

            let factor = (interval.depth as f64).exp2();
            // 右半先推入，左半先處理
            let children = [
                (mid, interval.upper_bound, right),
                (interval.lower_bound, mid, left),
            ];
            for (lower_bound, upper_bound, estimate) in children {
                if exit_condition.check_convergence_criterion(estimate.value, estimate.benchmark_value, factor) {
                    value += estimate.value;
                    benchmark_value += estimate.benchmark_value;
                } else {
                    work_list.push(SubInterval {
                        lower_bound,
                        upper_bound,
                        value: estimate.value,
                        benchmark_value: estimate.benchmark_value,
                        depth: interval.depth + 1,
                    });
                }
            }
        }

        ResultState::new(classify(classification), value, benchmark_value, iterations, evaluations)
    }
}

impl IntegratorAlgorithm for GaussKronrodAlgorithm {
    fn get_value(&mut self) -> f64 {
        self.run::<false>().value()
    }

    fn get_value_with_state(&mut self) -> ResultState {
        self.run::<true>()
    }
}
