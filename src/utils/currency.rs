/// Currency helpers for rupee amounts.
///
/// Settlement math runs in paise (1 rupee = 100 paise) so splitting a total
/// across workers never loses or invents money to floating-point error.
use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};

/// Convert rupees to paise (multiply by 100).
pub fn rupees_to_paise(rupees: f64) -> i64 {
    (rupees * 100.0).round() as i64
}

/// Convert paise back to rupees (divide by 100).
pub fn paise_to_rupees(paise: i64) -> f64 {
    paise as f64 / 100.0
}

/// Paise as a scale-2 BigDecimal, for NUMERIC(12,2) columns.
pub fn paise_to_decimal(paise: i64) -> BigDecimal {
    BigDecimal::from_i64(paise).unwrap_or_default() / BigDecimal::from(100)
}

pub fn decimal_to_f64(amount: &BigDecimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Split `total_paise` across `n` shares so the shares sum to the total
/// exactly. The remainder of the integer division is handed out one paisa
/// each to the first `total_paise % n` shares.
pub fn split_evenly(total_paise: i64, n: usize) -> Vec<i64> {
    if n == 0 {
        return Vec::new();
    }
    let n_i64 = n as i64;
    let base = total_paise / n_i64;
    let remainder = total_paise % n_i64;

    (0..n_i64)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupees_to_paise() {
        assert_eq!(rupees_to_paise(500.0), 50000);
        assert_eq!(rupees_to_paise(0.50), 50);
        assert_eq!(rupees_to_paise(123.45), 12345);
    }

    #[test]
    fn test_paise_to_rupees() {
        assert_eq!(paise_to_rupees(50000), 500.0);
        assert_eq!(paise_to_rupees(50), 0.50);
    }

    #[test]
    fn split_sums_to_total_exactly() {
        // 500.00 across 3 workers does not divide evenly in paise.
        let shares = split_evenly(50000, 3);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares.iter().sum::<i64>(), 50000);
        assert_eq!(shares, vec![16667, 16667, 16666]);
    }

    #[test]
    fn split_even_case() {
        assert_eq!(split_evenly(50000, 4), vec![12500, 12500, 12500, 12500]);
    }

    #[test]
    fn split_single_worker_gets_everything() {
        assert_eq!(split_evenly(50000, 1), vec![50000]);
    }

    #[test]
    fn split_zero_workers_is_empty() {
        assert!(split_evenly(50000, 0).is_empty());
    }

    #[test]
    fn paise_decimal_roundtrip() {
        let d = paise_to_decimal(16667);
        assert_eq!(decimal_to_f64(&d), 166.67);
    }
}
