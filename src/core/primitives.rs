use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Rounds `value` to a multiple of `multiple_of`, up (`ceil`) or down (`floor`).
#[must_use]
pub fn round_to_multiple(value: f64, multiple_of: f64, round_up: bool) -> f64 {
    let steps = value / multiple_of;
    if round_up {
        steps.ceil() * multiple_of
    } else {
        steps.floor() * multiple_of
    }
}

/// Euclid's algorithm over floats. `%` is exact in IEEE-754, so operands that
/// are exact multiples of a common step terminate like integers would.
#[must_use]
pub fn gcd(mut a: f64, mut b: f64) -> f64 {
    while b > 0.0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

#[must_use]
pub fn lcm(a: f64, b: f64) -> f64 {
    let divisor = gcd(a, b);
    if divisor == 0.0 {
        return 0.0;
    }
    a * (b / divisor)
}

#[cfg(test)]
mod tests {
    use super::{gcd, lcm, round_to_multiple};

    #[test]
    fn rounds_to_granularity_in_both_directions() {
        assert_eq!(round_to_multiple(7.3, 5.0, false), 5.0);
        assert_eq!(round_to_multiple(7.3, 5.0, true), 10.0);
        assert_eq!(round_to_multiple(-0.2, 0.5, false), -0.5);
        assert_eq!(round_to_multiple(-0.2, 0.5, true), 0.0);
    }

    #[test]
    fn gcd_and_lcm_work_on_half_steps() {
        assert_eq!(gcd(1.5, 0.5), 0.5);
        assert_eq!(lcm(1.5, 0.5), 1.5);
        assert_eq!(lcm(4.0, 6.0), 12.0);
        assert_eq!(lcm(0.0, 0.0), 0.0);
    }
}
