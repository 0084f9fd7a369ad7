use thiserror::Error;

/// 建構期錯誤：在任何函數求值之前即可偵測
///
/// 積分過程中的數值困難（收斂失敗、捨入誤差、預算耗盡）不屬於這裡，
/// 一律透過 `ResultClassification` 回報。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("invalid exit condition: '{parameter}' must be positive, got {value}")]
    InvalidExitCondition {
        parameter: &'static str,
        value: usize,
    },

    #[error("unsupported Gauss-Kronrod rule order {0}, expected one of 15, 21, 31, 41, 51, 61")]
    UnsupportedRuleOrder(u32),

    #[error("function to integrate not set")]
    FunctionNotSet,

    #[error("lower and upper bound must both be set")]
    BoundsNotSet,

    #[error("invalid bound {value}: {reason}")]
    InvalidBound { value: f64, reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offending_value() {
        let err = IntegrationError::InvalidExitCondition {
            parameter: "max_iterations",
            value: 0,
        };
        assert!(err.to_string().contains("max_iterations"));

        let err = IntegrationError::UnsupportedRuleOrder(17);
        assert!(err.to_string().contains("17"));

        let err = IntegrationError::InvalidBound {
            value: f64::NAN,
            reason: "NaN is not a bound",
        };
        assert!(err.to_string().contains("NaN is not a bound"));
    }
}
