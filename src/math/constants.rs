/// 相對捨入誤差上界（IEEE 754 double 的 unit roundoff 以 2^-52 表示）
pub const MACHINE_EPSILON: f64 = f64::EPSILON;

/// 最小正規化 double，用於判斷「實質為零」的量
pub const SUPER_TINY_EPSILON: f64 = f64::MIN_POSITIVE;

/// 朝 `toward` 方向取相鄰可表示的 double
///
/// 用於 open bound：端點本身不可取樣時，改取區間內最近的機器數。
pub fn next_toward(x: f64, toward: f64) -> f64 {
    if x.is_nan() || toward.is_nan() || x == toward {
        return x;
    }
    if x == 0.0 {
        let smallest = f64::from_bits(1);
        return if toward > 0.0 { smallest } else { -smallest };
    }
    let bits = x.to_bits();
    let away_from_zero = (toward > x) == (x > 0.0);
    if away_from_zero {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_toward_moves_by_one_ulp() {
        let up = next_toward(1.0, 2.0);
        assert!(up > 1.0);
        assert_eq!(up - 1.0, MACHINE_EPSILON);

        let down = next_toward(-1.0, 0.0);
        assert!(down > -1.0);
        assert!(down < 0.0);

        assert!(next_toward(0.0, -1.0) < 0.0);
        assert_eq!(next_toward(3.0, 3.0), 3.0);
    }
}
