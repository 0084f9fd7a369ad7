use std::sync::Arc;

use crate::math::constants::next_toward;
use crate::math::integration::bound::IntegrationDomain;
use crate::math::integration::integrationerror::IntegrationError;

/// 被積函數 f: ℝ → ℝ；以 `Arc` 共享，讓同一份設定可驅動多個執行緒上的演算法實例
pub type RealFunction = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// DomainMapping
// ─────────────────────────────────────────────────────────────────────────────
//
// 把半無限 / 無限區域映射到有限區間，積分引擎只看得到有限區間：
//
//   [a, ∞)   : x = a + t/(1−t),  t ∈ [0, 1],  dx = dt/(1−t)²
//   (−∞, b]  : x = b − t/(1−t),  t ∈ [0, 1],  dx = dt/(1−t)²
//   (−∞, ∞)  : x = t/(1−t²),     t ∈ [−1, 1], dx = (1+t²)/(1−t²)² dt
//
// 無窮端點的像（t = ±1）處取值 0，即假設被積函數在無窮遠處衰減。

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainMapping {
    Finite { lower: f64, upper: f64 },
    UpperUnbounded { lower: f64 },
    LowerUnbounded { upper: f64 },
    WholeLine,
}

impl DomainMapping {
    pub fn from_domain(domain: &IntegrationDomain) -> Result<DomainMapping, IntegrationError> {
        let (Some(lower), Some(upper)) = (domain.lower(), domain.upper()) else {
            return Err(IntegrationError::BoundsNotSet);
        };
        let mapping = match (lower.is_finite(), upper.is_finite()) {
            (true, true) => DomainMapping::Finite {
                lower: lower.value(),
                upper: upper.value(),
            },
            (true, false) => DomainMapping::UpperUnbounded { lower: lower.value() },
            (false, true) => DomainMapping::LowerUnbounded { upper: upper.value() },
            (false, false) => DomainMapping::WholeLine,
        };
        Ok(mapping)
    }

    /// 引擎實際積分的有限區間
    pub fn interval(&self) -> (f64, f64) {
        match self {
            DomainMapping::Finite { lower, upper } => (*lower, *upper),
            DomainMapping::UpperUnbounded { .. } | DomainMapping::LowerUnbounded { .. } => (0.0, 1.0),
            DomainMapping::WholeLine => (-1.0, 1.0),
        }
    }

    fn evaluate(&self, function: &RealFunction, t: f64) -> f64 {
        match self {
            DomainMapping::Finite { .. } => function(t),
            DomainMapping::UpperUnbounded { lower } => {
                if t >= 1.0 {
                    return 0.0;
                }
                let s = 1.0 - t;
                function(lower + t / s) / (s * s)
            }
            DomainMapping::LowerUnbounded { upper } => {
                if t >= 1.0 {
                    return 0.0;
                }
                let s = 1.0 - t;
                function(upper - t / s) / (s * s)
            }
            DomainMapping::WholeLine => {
                if t.abs() >= 1.0 {
                    return 0.0;
                }
                let s = 1.0 - t * t;
                function(t / s) * (1.0 + t * t) / (s * s)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Integrand
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Integrand {
    function: RealFunction,
    mapping: DomainMapping,
    interval_lower_open: bool,
    interval_upper_open: bool,
}

impl Integrand {
    pub fn new(function: RealFunction, domain: &IntegrationDomain) -> Result<Integrand, IntegrationError> {
        let mapping = DomainMapping::from_domain(domain)?;
        let lower_open = domain.lower().is_some_and(|b| b.is_open());
        let upper_open = domain.upper().is_some_and(|b| b.is_open());
        // open 旗標要對應到引擎區間的端點：(−∞, b] 的 b 映射到 t = 0；
        // 無窮端點的像已固定取 0，不需要再往內偏移
        let (interval_lower_open, interval_upper_open) = match mapping {
            DomainMapping::Finite { .. } => (lower_open, upper_open),
            DomainMapping::UpperUnbounded { .. } => (lower_open, false),
            DomainMapping::LowerUnbounded { .. } => (upper_open, false),
            DomainMapping::WholeLine => (false, false),
        };
        Ok(Integrand {
            function,
            mapping,
            interval_lower_open,
            interval_upper_open,
        })
    }

    pub fn interval(&self) -> (f64, f64) {
        self.mapping.interval()
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        self.mapping.evaluate(&self.function, t)
    }

    /// 在引擎區間的下端點取樣；open bound 改取區間內相鄰的機器數
    pub fn evaluate_lower_endpoint(&self) -> f64 {
        let (lower, upper) = self.interval();
        if self.interval_lower_open {
            self.evaluate(next_toward(lower, upper))
        } else {
            self.evaluate(lower)
        }
    }

    pub fn evaluate_upper_endpoint(&self) -> f64 {
        let (lower, upper) = self.interval();
        if self.interval_upper_open {
            self.evaluate(next_toward(upper, lower))
        } else {
            self.evaluate(upper)
        }
    }
}
