use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultClassification {
    /// 尚未執行
    NoResult,
    /// 執行過但未記錄（非儀表化的 `get_value()`）
    Unknown,
    ProperResult,
    /// 浮點數平台效應使進一步細分失去意義，預算卻尚未用完；
    /// 通常表示要求的容許值超出 double 精度
    RoundOffError,
    IterationLimitExceeded,
    EvaluationLimitExceeded,
    /// 中點坍縮到端點上（僅 Gauss-Lobatto）
    Divergent,
}

impl ResultClassification {
    pub fn is_proper(&self) -> bool {
        *self == ResultClassification::ProperResult
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultClassification::NoResult => "NoResult",
            ResultClassification::Unknown => "Unknown",
            ResultClassification::ProperResult => "ProperResult",
            ResultClassification::RoundOffError => "RoundOffError",
            ResultClassification::IterationLimitExceeded => "IterationLimitExceeded",
            ResultClassification::EvaluationLimitExceeded => "EvaluationLimitExceeded",
            ResultClassification::Divergent => "Divergent",
        }
    }
}

impl fmt::Display for ResultClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 一次頂層積分的唯一可觀察產物，建立後不可變
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultState {
    classification: ResultClassification,
    value: f64,
    benchmark_value: f64,
    iterations: usize,
    evaluations: usize,
}

impl ResultState {
    pub fn new(
        classification: ResultClassification,
        value: f64,
        benchmark_value: f64,
        iterations: usize,
        evaluations: usize,
    ) -> ResultState {
        ResultState {
            classification,
            value,
            benchmark_value,
            iterations,
            evaluations,
        }
    }

    pub fn no_result() -> ResultState {
        ResultState::new(ResultClassification::NoResult, f64::NAN, f64::NAN, 0, 0)
    }

    pub fn classification(&self) -> ResultClassification {
        self.classification
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn benchmark_value(&self) -> f64 {
        self.benchmark_value
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// |value − benchmark_value|，即嵌入式誤差估計
    pub fn estimated_error(&self) -> f64 {
        (self.value - self.benchmark_value).abs()
    }
}

impl fmt::Display for ResultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: value = {:.16e}, benchmark = {:.16e}, iterations = {}, evaluations = {}",
            self.classification, self.value, self.benchmark_value, self.iterations, self.evaluations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_contains_classification_and_counters() {
        let state = ResultState::new(ResultClassification::RoundOffError, 1.5, 1.25, 7, 105);
        let text = state.to_string();
        assert!(text.starts_with("RoundOffError"));
        assert!(text.contains("iterations = 7"));
        assert!(text.contains("evaluations = 105"));
        assert_eq!(state.estimated_error(), 0.25);
        assert!(!state.classification().is_proper());
    }

    #[test]
    fn no_result_sentinel() {
        let state = ResultState::no_result();
        assert_eq!(state.classification(), ResultClassification::NoResult);
        assert!(state.value().is_nan());
        assert_eq!(state.iterations(), 0);
    }
}
