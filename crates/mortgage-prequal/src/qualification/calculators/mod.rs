//! Pure rule calculators. Each takes validated inputs and the shared rule table and never
//! touches any other calculator.

pub mod arithmetic;
pub mod credit;
pub mod down_payment;
pub mod ratios;

/// Rounds currency and percentage outputs to two decimals for reporting.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round2(42.352_941), 42.35);
        assert_eq!(round2(7_083.333_333), 7_083.33);
        assert_eq!(round2(0.125), 0.13);
    }
}
