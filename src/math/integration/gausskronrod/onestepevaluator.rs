use crate::math::integration::gausskronrod::gausskronrodtable::{
    GaussKronrodOrder,
    GaussKronrodTable
};

/// 單一 panel 的兩個估計值：Kronrod（高階）與嵌入 Gauss（benchmark）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelEstimate {
    pub value: f64,
    pub benchmark_value: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// OneStepEvaluator
// ─────────────────────────────────────────────────────────────────────────────
//
// 將 [−1, 1] 上的節點映射到 [a, b]：
//
//   x = h·node + m,  h = (b − a)/2,  m = (b + a)/2
//
// 在 2k+1 個點（k 對對稱點 + 中點）求值一次，同一組樣本同時累加：
//   value           ← Kronrod 權重
//   benchmark_value ← Gauss 權重（僅奇數索引的節點；中點只在 Gauss 規則自帶中心時計入）
// 兩者最後乘上 h。

#[derive(Clone, Copy)]
pub struct OneStepEvaluator {
    table: &'static GaussKronrodTable,
}

impl OneStepEvaluator {
    pub fn new(order: GaussKronrodOrder) -> OneStepEvaluator {
        OneStepEvaluator { table: order.table() }
    }

    pub fn table(&self) -> &'static GaussKronrodTable {
        self.table
    }

    pub fn evaluations_per_panel(&self) -> usize {
        self.table.evaluations_per_panel()
    }

    pub fn one_step_integration<F>(&self, f: &F, lower_bound: f64, upper_bound: f64) -> PanelEstimate
    where
        F: Fn(f64) -> f64,
    {
        let h = 0.5 * (upper_bound - lower_bound);
        let m = 0.5 * (upper_bound + lower_bound);

        let nodes = self.table.evaluation_points();
        let kronrod_weights = self.table.kronrod_weights();
        let gauss_weights = self.table.gauss_weights();

        let f_center = f(m);
        let mut value = self.table.center_kronrod_weight() * f_center;
        let mut benchmark_value = self
            .table
            .center_gauss_weight()
            .map_or(0.0, |w| w * f_center);

        for (j, (&node, &weight)) in nodes.iter().zip(kronrod_weights.iter()).enumerate() {
            let dx = h * node;
            let pair_sum = f(m - dx) + f(m + dx);
            value += weight * pair_sum;
            if j % 2 == 1 {
                benchmark_value += gauss_weights[j / 2] * pair_sum;
            }
        }

        PanelEstimate {
            value: value * h,
            benchmark_value: benchmark_value * h,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn quadratic_is_exact() {
        let evaluator = OneStepEvaluator::new(GaussKronrodOrder::Kronrod15);
        let estimate = evaluator.one_step_integration(&|x: f64| x * x, 0.0, 3.0);
        assert_abs_diff_eq!(estimate.value, 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(estimate.benchmark_value, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn every_order_integrates_its_exactness_degree() {
        // Kronrod (2k+1) 點規則精確到 3k+1 次；取較保守的 2k−1 次
        for order in GaussKronrodOrder::ALL {
            let evaluator = OneStepEvaluator::new(order);
            let k = (order.order() / 2) as i32;
            let degree = 2 * k - 1;
            let estimate = evaluator.one_step_integration(&|x: f64| x.powi(degree) + 1.0, -1.0, 1.0);
            // 奇次項積分為 0
            assert_abs_diff_eq!(estimate.value, 2.0, epsilon = 1e-13);

            let estimate = evaluator.one_step_integration(&|x: f64| x.powi(degree - 1), 0.0, 1.0);
            assert_abs_diff_eq!(estimate.value, 1.0 / degree as f64, epsilon = 1e-13);
        }
    }

    #[test]
    fn gauss_benchmark_differs_beyond_its_degree() {
        // 7 點 Gauss 精確到 13 次，對 x^14 有可觀察的誤差
        let evaluator = OneStepEvaluator::new(GaussKronrodOrder::Kronrod15);
        let estimate = evaluator.one_step_integration(&|x: f64| x.powi(14), -1.0, 1.0);
        assert_abs_diff_eq!(estimate.value, 2.0 / 15.0, epsilon = 1e-13);
        assert!((estimate.benchmark_value - 2.0 / 15.0).abs() > 1e-6);
    }

    #[test]
    fn exponential_on_unit_interval() {
        let evaluator = OneStepEvaluator::new(GaussKronrodOrder::Kronrod21);
        let estimate = evaluator.one_step_integration(&|x: f64| x.exp(), 0.0, 1.0);
        assert_abs_diff_eq!(estimate.value, std::f64::consts::E - 1.0, epsilon = 1e-14);
    }

    #[test]
    fn uses_exactly_one_evaluation_per_node() {
        for order in GaussKronrodOrder::ALL {
            let evaluator = OneStepEvaluator::new(order);
            let calls = Cell::new(0usize);
            let f = |x: f64| {
                calls.set(calls.get() + 1);
                x
            };
            evaluator.one_step_integration(&f, 0.0, 1.0);
            assert_eq!(calls.get(), order.order() as usize);
        }
    }

    #[test]
    fn nan_propagates() {
        let evaluator = OneStepEvaluator::new(GaussKronrodOrder::Kronrod15);
        let estimate = evaluator.one_step_integration(&|x: f64| if x > 0.5 { f64::NAN } else { x }, 0.0, 1.0);
        assert!(estimate.value.is_nan());
        assert!(estimate.benchmark_value.is_nan());
    }
}
