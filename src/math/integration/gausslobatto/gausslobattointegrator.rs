use tracing::{
    debug,
    trace,
    warn
};

use crate::math::constants::{
    MACHINE_EPSILON,
    SUPER_TINY_EPSILON
};
use crate::math::integration::bound::IntegrationDomain;
use crate::math::integration::exitcondition::ExitCondition;
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
// 固定節點（相對於 panel 中心、以半寬 h 為單位）
// ─────────────────────────────────────────────────────────────────────────────
//
//   ALPHA = √(2/3), BETA = 1/√5：4 點 Gauss-Lobatto 與其 7 點 Kronrod 延伸的內部節點
//   X1, X2, X3                ：13 點 Kronrod 延伸新增的節點

const ALPHA: f64 = 0.816_496_580_927_726;
const BETA: f64 = 0.447_213_595_499_958;
const X1: f64 = 0.942_882_415_695_480;
const X2: f64 = 0.641_853_342_345_781;
const X3: f64 = 0.236_383_199_662_150;

/// 13 點規則的權重，依 |offset| 由大到小：端點, X1, ALPHA, X2, BETA, X3, 中點
const MODULUS_WEIGHTS: [f64; 7] = [
    0.015_827_191_973_480_2,
    0.094_273_840_218_850_0,
    0.155_071_987_336_585,
    0.188_821_573_960_182,
    0.199_773_405_226_859,
    0.224_926_465_333_340,
    0.242_611_071_901_408,
];

const INITIAL_EVALUATIONS: usize = 13;
const REFINE_EVALUATIONS: usize = 5;

// 以下參數皆為對稱點的和：ends = f(a)+f(b), alpha = f(mll)+f(mrr), beta = f(ml)+f(mr)

/// 4 點 Gauss-Lobatto：(h/6)·(ends + 5·beta)
fn lobatto4(h: f64, ends: f64, beta: f64) -> f64 {
    (h / 6.0) * (ends + 5.0 * beta)
}

/// 7 點 Kronrod 延伸：(h/1470)·(77·ends + 432·alpha + 625·beta + 672·f(m))
fn kronrod7(h: f64, ends: f64, alpha: f64, beta: f64, center: f64) -> f64 {
    (h / 1470.0) * (77.0 * ends + 432.0 * alpha + 625.0 * beta + 672.0 * center)
}

// ─────────────────────────────────────────────────────────────────────────────
// GaussLobattoIntegrator（設定 / 工廠）
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct GaussLobattoIntegrator {
    exit_condition: ExitCondition,
    domain: IntegrationDomain,
    function: Option<RealFunction>,
}

impl GaussLobattoIntegrator {
    pub fn new(exit_condition: ExitCondition) -> GaussLobattoIntegrator {
        GaussLobattoIntegrator {
            exit_condition,
            domain: IntegrationDomain::new(),
            function: None,
        }
    }

    pub fn create_algorithm(&self) -> Result<GaussLobattoAlgorithm, IntegrationError> {
        let function = self.function.clone().ok_or(IntegrationError::FunctionNotSet)?;
        let integrand = Integrand::new(function, &self.domain)?;
        Ok(GaussLobattoAlgorithm {
            exit_condition: self.exit_condition,
            integrand,
            work_list: Vec::new(),
        })
    }
}

impl OneDimensionalIntegrator for GaussLobattoIntegrator {
    fn name(&self) -> &'static str {
        "GaussLobatto"
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
// LobattoRunState：整棵細分樹共用的「第一個失敗者勝出」狀態
// ─────────────────────────────────────────────────────────────────────────────
//
// Divergent / IterationLimitExceeded / EvaluationLimitExceeded 為硬失敗，
// 之後的 panel 一律回傳粗估值、不再細分；RoundOffError 只記錄，不阻止其他 panel。

struct LobattoRunState {
    classification: ResultClassification,
    iterations: usize,
    evaluations: usize,
}

impl LobattoRunState {
    fn has_failed(&self) -> bool {
        matches!(
            self.classification,
            ResultClassification::Divergent
                | ResultClassification::IterationLimitExceeded
                | ResultClassification::EvaluationLimitExceeded
        )
    }

    fn fail(&mut self, classification: ResultClassification) {
        if !self.has_failed() {
            self.classification = classification;
        }
    }

    fn flag_round_off(&mut self) {
        if self.classification == ResultClassification::ProperResult {
            self.classification = ResultClassification::RoundOffError;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LobattoPanel {
    lower_bound: f64,
    upper_bound: f64,
    lower_value: f64,
    upper_value: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// GaussLobattoAlgorithm（單次執行）
// ─────────────────────────────────────────────────────────────────────────────
//
// 1. 13 點初始估計：value1（7 點 Kronrod）、value2（4 點 Lobatto）、
//    modulus（13 點規則），R = |value1 − modulus| / |value2 − modulus|，
//    0 < R < 1 時 tolerance /= R，再令 modulus ← modulus · tolerance / ε
// 2. 每個 panel 在 mll, ml, m, mr, mrr 五點求值（端點沿用），依序檢查：
//    (1) 已有硬失敗        → 回傳 value2
//    (2) m ∉ (a, b)        → Divergent
//    (3) iterations 達上限 → IterationLimitExceeded
//    (4) evaluations 超額  → EvaluationLimitExceeded
//    (5) modulus + (value1 − value2) == modulus → ProperResult；
//        mll ≤ a 或 b ≤ mrr → RoundOffError
//    否則切成 [a,mll], [mll,ml], [ml,m], [m,mr], [mr,mrr], [mrr,b] 六段。
// 以顯式 stack 由左至右深度優先處理。
// benchmark_value 為最終分割上各葉 panel 的 4 點 Lobatto 估計之和。

pub struct GaussLobattoAlgorithm {
    exit_condition: ExitCondition,
    integrand: Integrand,
    work_list: Vec<LobattoPanel>,
}

impl GaussLobattoAlgorithm {
    /// 相對容許值優先，其次絕對容許值，皆未設定時取 ε；下限為 ε
    fn tolerance(&self) -> f64 {
        let tolerance = if self.exit_condition.uses_relative_tolerance() {
            self.exit_condition.relative_tolerance()
        } else if self.exit_condition.uses_absolute_tolerance() {
            self.exit_condition.absolute_tolerance()
        } else {
            MACHINE_EPSILON
        };
        if tolerance < MACHINE_EPSILON {
            MACHINE_EPSILON
        } else {
            tolerance
        }
    }

    fn run<const INSTRUMENTED: bool>(&mut self) -> ResultState {
        let mut tolerance = self.tolerance();
        let GaussLobattoAlgorithm {
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

        let (a, b) = integrand.interval();
        if a == b {
            return ResultState::new(classify(ResultClassification::ProperResult), 0.0, 0.0, 0, 0);
        }

        let max_iterations = exit_condition.max_iterations();
        let max_evaluations = exit_condition.max_evaluations();

        let m = 0.5 * (a + b);
        let h = 0.5 * (b - a);
        let offsets = [X1, ALPHA, X2, BETA, X3];

        let fa = integrand.evaluate_lower_endpoint();
        let fb = integrand.evaluate_upper_endpoint();
        let fm = integrand.evaluate(m);
        // 左右對稱的五組點，由外而內
        let left = offsets.map(|o| integrand.evaluate(m - o * h));
        let right = offsets.map(|o| integrand.evaluate(m + o * h));

        let value2 = lobatto4(h, fa + fb, left[3] + right[3]);
        let value1 = kronrod7(h, fa + fb, left[1] + right[1], left[3] + right[3], fm);
        let mut modulus = MODULUS_WEIGHTS[0] * (fa + fb) + MODULUS_WEIGHTS[6] * fm;
        for (i, weight) in MODULUS_WEIGHTS[1..6].iter().enumerate() {
            modulus += weight * (left[i] + right[i]);
        }
        modulus *= h;

        let mut state = LobattoRunState {
            classification: ResultClassification::ProperResult,
            iterations: 0,
            evaluations: INITIAL_EVALUATIONS,
        };

        if state.evaluations > max_evaluations {
            if INSTRUMENTED {
                debug!(
                    evaluations = state.evaluations,
                    max_evaluations, "initial Gauss-Lobatto sweep exceeds evaluation budget"
                );
            }
            return ResultState::new(
                classify(ResultClassification::EvaluationLimitExceeded),
                value1,
                value2,
                state.iterations,
                state.evaluations,
            );
        }

        let sign = if modulus < 0.0 { -1.0 } else { 1.0 };
        let error1 = (value1 - modulus).abs();
        let error2 = (value2 - modulus).abs();
        let ratio = if error2 != 0.0 { error1 / error2 } else { 1.0 };
        if ratio > 0.0 && ratio < 1.0 {
            tolerance /= ratio;
        }
        modulus = sign * modulus.abs() * tolerance / MACHINE_EPSILON;
        // 實質為零的 modulus 無法做 plateau 比較，改用區間寬度
        if modulus.abs() < SUPER_TINY_EPSILON {
            modulus = b - a;
        }

        work_list.clear();
        work_list.push(LobattoPanel {
            lower_bound: a,
            upper_bound: b,
            lower_value: fa,
            upper_value: fb,
        });

        let mut value = 0.0;
        let mut benchmark_value = 0.0;

        while let Some(panel) = work_list.pop() {
            let LobattoPanel {
                lower_bound: a,
                upper_bound: b,
                lower_value: fa,
                upper_value: fb,
            } = panel;

            let h = 0.5 * (b - a);
            let m = 0.5 * (a + b);
            let mll = m - ALPHA * h;
            let ml = m - BETA * h;
            let mr = m + BETA * h;
            let mrr = m + ALPHA * h;

            let fmll = integrand.evaluate(mll);
            let fml = integrand.evaluate(ml);
            let fm = integrand.evaluate(m);
            let fmr = integrand.evaluate(mr);
            let fmrr = integrand.evaluate(mrr);
            state.evaluations += REFINE_EVALUATIONS;

            let coarse = lobatto4(h, fa + fb, fml + fmr);
            let fine = kronrod7(h, fa + fb, fmll + fmrr, fml + fmr, fm);

            if state.has_failed() {
                value += coarse;
                benchmark_value += coarse;
                continue;
            }

            if !(a < m && m < b) {
                state.fail(ResultClassification::Divergent);
            } else if state.iterations >= max_iterations {
                state.fail(ResultClassification::IterationLimitExceeded);
            } else {
                state.iterations += 1;
                if state.evaluations > max_evaluations {
                    state.fail(ResultClassification::EvaluationLimitExceeded);
                }
            }

            if state.has_failed() {
                if INSTRUMENTED {
                    debug!(
                        lower = a,
                        upper = b,
                        iterations = state.iterations,
                        evaluations = state.evaluations,
                        classification = state.classification.as_str(),
                        "Gauss-Lobatto integration stopped early"
                    );
                }
                value += fine;
                benchmark_value += coarse;
                continue;
            }

            if modulus + (fine - coarse) == modulus {
                value += fine;
                benchmark_value += coarse;
                continue;
            }

            if mll <= a || b <= mrr {
                if INSTRUMENTED {
                    warn!(
                        lower = a,
                        upper = b,
                        "interval contains no more machine numbers, required tolerance may not be met"
                    );
                }
                state.flag_round_off();
                value += fine;
                benchmark_value += coarse;
                continue;
            }

            if INSTRUMENTED {
                trace!(lower = a, upper = b, iterations = state.iterations, "refine panel");
            }

            // 反向推入，讓 [a, mll] 最先被處理
            let children = [
                (mrr, b, fmrr, fb),
                (mr, mrr, fmr, fmrr),
                (m, mr, fm, fmr),
                (ml, m, fml, fm),
                (mll, ml, fmll, fml),
                (a, mll, fa, fmll),
            ];
            for (lower_bound, upper_bound, lower_value, upper_value) in children {
                work_list.push(LobattoPanel {
                    lower_bound,
                    upper_bound,
                    lower_value,
                    upper_value,
                });
            }
        }

        ResultState::new(
            classify(state.classification),
            value,
            benchmark_value,
            state.iterations,
            state.evaluations,
        )
    }
}

impl IntegratorAlgorithm for GaussLobattoAlgorithm {
    fn get_value(&mut self) -> f64 {
        self.run::<false>().value()
    }

    fn get_value_with_state(&mut self) -> ResultState {
        self.run::<true>()
    }
}
