//! Price helpers for seasonal adjustment and display.

/// Currency prefix shown next to amounts (Malawi Kwacha)
pub const CURRENCY_SYMBOL: &str = "MK";

/// Base price scaled by a multiplier, rounded to a whole amount
#[inline]
pub fn effective_price(base_price: i64, multiplier: f64) -> i64 {
    (base_price as f64 * multiplier).round() as i64
}

/// Format an amount for display, e.g. `MK 1,250,000`
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{} {}", sign, CURRENCY_SYMBOL, grouped)
}
