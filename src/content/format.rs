use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Display a rand amount as `ZAR 18,500`: whole rand, comma-grouped thousands
pub fn format_price_zar(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("ZAR -{grouped}")
    } else {
        format!("ZAR {grouped}")
    }
}

/// Numeric value carried in view models
pub fn price_value(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

/// Lowercase, collapse runs of anything outside `[a-z0-9]` into `-`, trim dashes
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.trim().to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn formats_whole_rand_with_grouping() {
        assert_eq!(format_price_zar(Decimal::new(18500, 0)), "ZAR 18,500");
        assert_eq!(format_price_zar(Decimal::new(2900, 0)), "ZAR 2,900");
        assert_eq!(format_price_zar(Decimal::new(950, 0)), "ZAR 950");
        assert_eq!(format_price_zar(Decimal::new(1234567, 0)), "ZAR 1,234,567");
        assert_eq!(format_price_zar(Decimal::ZERO), "ZAR 0");
    }

    #[test]
    fn rounds_to_nearest_rand() {
        assert_eq!(format_price_zar(Decimal::from_str("1499.50").unwrap()), "ZAR 1,500");
        assert_eq!(format_price_zar(Decimal::from_str("1499.49").unwrap()), "ZAR 1,499");
    }

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("How to Clean a Persian Rug!"), "how-to-clean-a-persian-rug");
        assert_eq!(slugify("  --Kilim & Wool--  "), "kilim-wool");
        assert_eq!(slugify("Size 200x300"), "size-200x300");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café rugs"), "caf-rugs");
    }
}
