use serde::Deserialize;

use crate::math::integration::integrationerror::IntegrationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BoundKind {
    Closed,
    Open,
    Unbounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Lower,
    Upper,
}

impl BoundSide {
    fn matching_infinity(&self) -> f64 {
        match self {
            BoundSide::Lower => f64::NEG_INFINITY,
            BoundSide::Upper => f64::INFINITY,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bound
// ─────────────────────────────────────────────────────────────────────────────
//
// Closed / Open 只接受有限值；Unbounded 只接受對應方向的無窮大
// （下界 −∞、上界 +∞）。NaN 一律拒絕。

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    value: f64,
    kind: BoundKind,
}

impl Bound {
    pub fn try_new(value: f64, kind: BoundKind, side: BoundSide) -> Result<Bound, IntegrationError> {
        if value.is_nan() {
            return Err(IntegrationError::InvalidBound {
                value,
                reason: "NaN is not a bound",
            });
        }
        match kind {
            BoundKind::Unbounded if value != side.matching_infinity() => Err(IntegrationError::InvalidBound {
                value,
                reason: "an unbounded bound requires the matching infinity",
            }),
            BoundKind::Closed | BoundKind::Open if !value.is_finite() => Err(IntegrationError::InvalidBound {
                value,
                reason: "a closed or open bound must be finite",
            }),
            _ => Ok(Bound { value, kind }),
        }
    }

    /// 由數值推斷種類：對應方向的無窮大為 Unbounded，有限值為 Closed
    pub fn infer(value: f64, side: BoundSide) -> Result<Bound, IntegrationError> {
        let kind = if value.is_infinite() {
            BoundKind::Unbounded
        } else {
            BoundKind::Closed
        };
        Bound::try_new(value, kind, side)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn kind(&self) -> BoundKind {
        self.kind
    }

    pub fn is_finite(&self) -> bool {
        self.kind != BoundKind::Unbounded
    }

    pub fn is_open(&self) -> bool {
        self.kind == BoundKind::Open
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IntegrationDomain
// ─────────────────────────────────────────────────────────────────────────────

/// 上下界組成的積分區域；兩者皆有限時保證 lower ≤ upper
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntegrationDomain {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl IntegrationDomain {
    pub fn new() -> IntegrationDomain {
        IntegrationDomain::default()
    }

    pub fn lower(&self) -> Option<Bound> {
        self.lower
    }

    pub fn upper(&self) -> Option<Bound> {
        self.upper
    }

    pub fn is_complete(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    pub fn try_set_lower_bound(&mut self, value: f64) -> bool {
        self.try_set_lower(Bound::infer(value, BoundSide::Lower))
    }

    pub fn try_set_upper_bound(&mut self, value: f64) -> bool {
        self.try_set_upper(Bound::infer(value, BoundSide::Upper))
    }

    pub fn try_set_lower_bound_with_kind(&mut self, value: f64, kind: BoundKind) -> bool {
        self.try_set_lower(Bound::try_new(value, kind, BoundSide::Lower))
    }

    pub fn try_set_upper_bound_with_kind(&mut self, value: f64, kind: BoundKind) -> bool {
        self.try_set_upper(Bound::try_new(value, kind, BoundSide::Upper))
    }

    /// 兩個界同時設定：任一不合法則兩者皆不變動
    pub fn try_set_bounds(&mut self, lower: f64, upper: f64) -> bool {
        let (Ok(lower), Ok(upper)) = (
            Bound::infer(lower, BoundSide::Lower),
            Bound::infer(upper, BoundSide::Upper),
        ) else {
            return false;
        };
        if !Self::is_ordered(&lower, &upper) {
            return false;
        }
        self.lower = Some(lower);
        self.upper = Some(upper);
        true
    }

    fn try_set_lower(&mut self, bound: Result<Bound, IntegrationError>) -> bool {
        let Ok(bound) = bound else {
            return false;
        };
        if let Some(upper) = &self.upper {
            if !Self::is_ordered(&bound, upper) {
                return false;
            }
        }
        self.lower = Some(bound);
        true
    }

    fn try_set_upper(&mut self, bound: Result<Bound, IntegrationError>) -> bool {
        let Ok(bound) = bound else {
            return false;
        };
        if let Some(lower) = &self.lower {
            if !Self::is_ordered(lower, &bound) {
                return false;
            }
        }
        self.upper = Some(bound);
        true
    }

    fn is_ordered(lower: &Bound, upper: &Bound) -> bool {
        !(lower.is_finite() && upper.is_finite()) || lower.value() <= upper.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_rejects_nan_and_mismatched_infinity() {
        assert!(Bound::try_new(f64::NAN, BoundKind::Closed, BoundSide::Lower).is_err());
        assert!(Bound::try_new(f64::NAN, BoundKind::Unbounded, BoundSide::Lower).is_err());
        assert!(Bound::try_new(f64::INFINITY, BoundKind::Closed, BoundSide::Upper).is_err());
        assert!(Bound::try_new(f64::INFINITY, BoundKind::Unbounded, BoundSide::Lower).is_err());
        assert!(Bound::try_new(1.0, BoundKind::Unbounded, BoundSide::Upper).is_err());

        let lower = Bound::try_new(f64::NEG_INFINITY, BoundKind::Unbounded, BoundSide::Lower).unwrap();
        assert!(!lower.is_finite());
        let open = Bound::try_new(0.5, BoundKind::Open, BoundSide::Upper).unwrap();
        assert!(open.is_open());
    }

    #[test]
    fn infer_kind_from_value() {
        assert_eq!(Bound::infer(2.0, BoundSide::Lower).unwrap().kind(), BoundKind::Closed);
        assert_eq!(
            Bound::infer(f64::INFINITY, BoundSide::Upper).unwrap().kind(),
            BoundKind::Unbounded
        );
        assert!(Bound::infer(f64::INFINITY, BoundSide::Lower).is_err());
    }

    #[test]
    fn domain_keeps_lower_not_above_upper() {
        let mut domain = IntegrationDomain::new();
        assert!(!domain.is_complete());
        assert!(domain.try_set_upper_bound(1.0));
        assert!(!domain.try_set_lower_bound(2.0));
        assert!(domain.lower().is_none());
        assert!(domain.try_set_lower_bound(1.0));
        assert!(domain.is_complete());
        assert!(!domain.try_set_upper_bound(0.0));
        assert_eq!(domain.upper().unwrap().value(), 1.0);
        assert!(domain.try_set_upper_bound(f64::INFINITY));
        assert!(domain.try_set_lower_bound(5.0));
    }

    #[test]
    fn try_set_bounds_is_all_or_nothing() {
        let mut domain = IntegrationDomain::new();
        assert!(domain.try_set_bounds(0.0, 1.0));
        assert!(!domain.try_set_bounds(0.5, f64::NAN));
        assert!(!domain.try_set_bounds(2.0, 1.0));
        assert_eq!(domain.lower().unwrap().value(), 0.0);
        assert_eq!(domain.upper().unwrap().value(), 1.0);
        assert!(domain.try_set_bounds(f64::NEG_INFINITY, f64::INFINITY));
    }

    #[test]
    fn explicit_kind_setters() {
        let mut domain = IntegrationDomain::new();
        assert!(domain.try_set_lower_bound_with_kind(0.0, BoundKind::Open));
        assert!(!domain.try_set_upper_bound_with_kind(1.0, BoundKind::Unbounded));
        assert!(domain.try_set_upper_bound_with_kind(f64::INFINITY, BoundKind::Unbounded));
        assert_eq!(domain.lower().unwrap().kind(), BoundKind::Open);
    }
}
