//! Rupee amount canonicalization shared by extraction, validation, and
//! anomaly detection.

/// Sentinel rendered for any amount that could not be parsed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Suffix multipliers accepted in Indian financial documents, longest token
/// first so `crore` is not consumed as `cr` plus trailing garbage.
const MULTIPLIERS: &[(&str, f64)] = &[
    ("crores", 10_000_000.0),
    ("crore", 10_000_000.0),
    ("cr", 10_000_000.0),
    ("lakhs", 100_000.0),
    ("lakh", 100_000.0),
    ("lacs", 100_000.0),
    ("lac", 100_000.0),
    ("l", 100_000.0),
    ("thousand", 1_000.0),
    ("k", 1_000.0),
];

const CURRENCY_PREFIXES: &[&str] = &["₹", "rs.", "rs", "inr"];

/// Parse a free-form rupee amount (`"₹1,00,000"`, `"Rs. 25.00 L"`,
/// `"2 Cr"`, `"50000"`) into a plain number.
///
/// Returns `None` when the text is empty, the `N/A` sentinel, or not an
/// amount at all. Callers treat `None` as "cannot evaluate", never as zero.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() || lowered == "n/a" {
        return None;
    }

    let mut rest = lowered.as_str();
    let mut negative = false;

    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped.trim_start();
    }

    for prefix in CURRENCY_PREFIXES {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped.trim_start();
            break;
        }
    }

    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped.trim_start();
    }

    let mut multiplier = 1.0;
    for (token, factor) in MULTIPLIERS {
        if let Some(stripped) = rest.strip_suffix(token) {
            multiplier = *factor;
            rest = stripped.trim_end();
            break;
        }
    }

    let digits: String = rest
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != ',')
        .collect();
    if digits.is_empty() {
        return None;
    }

    let value: f64 = digits.parse().ok()?;
    let signed = if negative { -value } else { value };
    Some(signed * multiplier)
}

/// Render a number as a display rupee string with Indian digit grouping
/// (`150000` becomes `"₹1,50,000"`). Non-finite input degrades to the
/// `N/A` sentinel rather than leaking `NaN` downstream.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let negative = value < 0.0;
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let mut whole = rounded.trunc() as u64;
    let mut paise = ((rounded - rounded.trunc()) * 100.0).round() as u64;
    if paise >= 100 {
        whole += 1;
        paise = 0;
    }

    let grouped = group_indian_digits(whole);
    let body = if paise == 0 {
        grouped
    } else {
        format!("{grouped}.{paise:02}")
    };

    if negative {
        format!("-₹{body}")
    } else {
        format!("₹{body}")
    }
}

/// Indian grouping: the last three digits form one group, every preceding
/// group holds two digits.
fn group_indian_digits(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
