const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// Long-form rupee amount used in quiz action items, e.g. `₹2.7 Lakhs`.
pub fn format_lakhs_crores(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.1} Crores", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.1} Lakhs", amount / LAKH)
    } else {
        format!("₹{}", group_indian(amount))
    }
}

/// Compact rupee amount used across the Ignite dashboard, e.g. `₹1.25 Cr`.
pub fn format_inr(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.2} Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.2} L", amount / LAKH)
    } else {
        format!("₹{}", group_indian(amount))
    }
}

/// Formats a ratio (0.25) as a percentage with one decimal (`25.0%`).
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Indian digit grouping (`12,34,567`) with at most three fraction digits.
pub fn group_indian(amount: f64) -> String {
    let rendered = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    let head_len = digits.len().saturating_sub(3);
    for (i, c) in digits[..head_len].iter().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    if head_len > 0 {
        grouped.push(',');
    }
    grouped.extend(&digits[head_len..]);

    let sign = if amount < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
