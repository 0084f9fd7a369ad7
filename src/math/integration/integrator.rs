use crate::math::integration::bound::{
    BoundKind,
    IntegrationDomain
};
use crate::math::integration::exitcondition::ExitCondition;
use crate::math::integration::integrand::RealFunction;
use crate::math::integration::integrationerror::IntegrationError;
use crate::math::integration::resultstate::ResultState;

/// 單次積分的執行實例：每次 `get_value*` 都從頭計算，不可並行存取
pub trait IntegratorAlgorithm: Send {
    fn get_value(&mut self) -> f64;

    fn get_value_with_state(&mut self) -> ResultState;
}

/// 積分器設定 + 工廠
///
/// 設定（界、函數、停止條件）不可變地被複製進 `create()` 產生的實例，
/// 因此同一份設定可在多個執行緒上各自驅動獨立的演算法實例。
pub trait OneDimensionalIntegrator: Send + Sync {
    fn name(&self) -> &'static str;

    fn domain(&self) -> &IntegrationDomain;

    fn domain_mut(&mut self) -> &mut IntegrationDomain;

    fn exit_condition(&self) -> &ExitCondition;

    fn set_exit_condition(&mut self, exit_condition: ExitCondition);

    fn function_to_integrate(&self) -> Option<&RealFunction>;

    fn set_function_to_integrate(&mut self, function: RealFunction);

    fn create(&self) -> Result<Box<dyn IntegratorAlgorithm>, IntegrationError>;

    fn try_set_lower_bound(&mut self, lower_bound: f64) -> bool {
        self.domain_mut().try_set_lower_bound(lower_bound)
    }

    fn try_set_upper_bound(&mut self, upper_bound: f64) -> bool {
        self.domain_mut().try_set_upper_bound(upper_bound)
    }

    fn try_set_lower_bound_with_kind(&mut self, lower_bound: f64, kind: BoundKind) -> bool {
        self.domain_mut().try_set_lower_bound_with_kind(lower_bound, kind)
    }

    fn try_set_upper_bound_with_kind(&mut self, upper_bound: f64, kind: BoundKind) -> bool {
        self.domain_mut().try_set_upper_bound_with_kind(upper_bound, kind)
    }

    fn try_set_bounds(&mut self, lower_bound: f64, upper_bound: f64) -> bool {
        self.domain_mut().try_set_bounds(lower_bound, upper_bound)
    }

    /// 設定完整（界與函數皆已設定）即可 `create()`
    fn is_ready(&self) -> bool {
        self.domain().is_complete() && self.function_to_integrate().is_some()
    }
}
