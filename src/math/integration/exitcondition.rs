use serde::Deserialize;

use crate::math::integration::integrationerror::IntegrationError;

pub const DEFAULT_MAX_ITERATIONS: usize = 200;
pub const DEFAULT_MAX_EVALUATIONS: usize = 100_000;
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-9;

// ─────────────────────────────────────────────────────────────────────────────
// ExitCondition
// ─────────────────────────────────────────────────────────────────────────────
//
// 收斂判準 + 資源上限：
//
//   絕對判準：factor·|benchmark − value| < absolute_tolerance
//   相對判準：factor·|benchmark − value| / |benchmark| < relative_tolerance
//             （|benchmark| = 0 時不做除法）
//
// NaN 代表「不使用該判準」；兩者皆為 NaN 時只剩迭代次數/求值次數限制迴圈。
// 兩個判準同時設定時，任一成立即視為收斂。

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "ExitConditionJsonProp")]
pub struct ExitCondition {
    max_iterations: usize,
    max_evaluations: usize,
    absolute_tolerance: f64,
    relative_tolerance: f64,
}

impl ExitCondition {
    /// 兩個預算皆必須為正；容許值不檢查正負號
    pub fn new(
        max_iterations: usize,
        max_evaluations: usize,
        absolute_tolerance: f64,
        relative_tolerance: f64,
    ) -> Result<ExitCondition, IntegrationError> {
        if max_iterations == 0 {
            return Err(IntegrationError::InvalidExitCondition {
                parameter: "max_iterations",
                value: max_iterations,
            });
        }
        if max_evaluations == 0 {
            return Err(IntegrationError::InvalidExitCondition {
                parameter: "max_evaluations",
                value: max_evaluations,
            });
        }
        Ok(ExitCondition {
            max_iterations,
            max_evaluations,
            absolute_tolerance,
            relative_tolerance,
        })
    }

    /// 只設定預算，兩個容許值皆為 NaN
    pub fn with_budget(max_iterations: usize, max_evaluations: usize) -> Result<ExitCondition, IntegrationError> {
        Self::new(max_iterations, max_evaluations, f64::NAN, f64::NAN)
    }

    pub fn with_absolute_tolerance(mut self, absolute_tolerance: f64) -> ExitCondition {
        self.absolute_tolerance = absolute_tolerance;
        self
    }

    pub fn with_relative_tolerance(mut self, relative_tolerance: f64) -> ExitCondition {
        self.relative_tolerance = relative_tolerance;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }

    pub fn absolute_tolerance(&self) -> f64 {
        self.absolute_tolerance
    }

    pub fn relative_tolerance(&self) -> f64 {
        self.relative_tolerance
    }

    pub fn uses_absolute_tolerance(&self) -> bool {
        !self.absolute_tolerance.is_nan()
    }

    pub fn uses_relative_tolerance(&self) -> bool {
        !self.relative_tolerance.is_nan()
    }

    pub fn is_fulfilled(&self, candidate: f64, benchmark: f64) -> bool {
        self.check_convergence_criterion(candidate, benchmark, 1.0)
    }

    /// `factor` 讓引擎依遞迴深度收緊實際容許值，而不必重算容許值本身
    pub fn check_convergence_criterion(&self, value: f64, benchmark_value: f64, factor: f64) -> bool {
        let error = factor * (benchmark_value - value).abs();

        if self.uses_absolute_tolerance() && error < self.absolute_tolerance {
            return true;
        }

        if self.uses_relative_tolerance() {
            let relative_error = if benchmark_value.abs() > 0.0 {
                error / benchmark_value.abs()
            } else {
                error
            };
            if relative_error < self.relative_tolerance {
                return true;
            }
        }
        false
    }
}

/// 兩個 NaN（未使用的判準）視為相等
impl PartialEq for ExitCondition {
    fn eq(&self, other: &Self) -> bool {
        let same_tolerance = |a: f64, b: f64| a == b || (a.is_nan() && b.is_nan());
        self.max_iterations == other.max_iterations
            && self.max_evaluations == other.max_evaluations
            && same_tolerance(self.absolute_tolerance, other.absolute_tolerance)
            && same_tolerance(self.relative_tolerance, other.relative_tolerance)
    }
}

impl Default for ExitCondition {
    fn default() -> Self {
        ExitCondition {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
            absolute_tolerance: DEFAULT_ABSOLUTE_TOLERANCE,
            relative_tolerance: f64::NAN,
        }
    }
}

#[derive(Deserialize)]
struct ExitConditionJsonProp {
    #[serde(default = "default_max_iterations")]
    max_iterations: usize,
    #[serde(default = "default_max_evaluations")]
    max_evaluations: usize,
    absolute_tolerance: Option<f64>,
    relative_tolerance: Option<f64>,
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_max_evaluations() -> usize {
    DEFAULT_MAX_EVALUATIONS
}

impl TryFrom<ExitConditionJsonProp> for ExitCondition {
    type Error = IntegrationError;

    fn try_from(prop: ExitConditionJsonProp) -> Result<Self, Self::Error> {
        ExitCondition::new(
            prop.max_iterations,
            prop.max_evaluations,
            prop.absolute_tolerance.unwrap_or(f64::NAN),
            prop.relative_tolerance.unwrap_or(f64::NAN),
        )
    }
}
