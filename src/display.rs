// 🍽️ Display - human-readable counts and titles
//
// 2.5 → "2 1/2", 0.333 → "1/3", long titles cut at a word boundary.

// ============================================================================
// COUNTS
// ============================================================================

/// Largest denominator tried when rendering a fractional count
const MAX_DENOMINATOR: u32 = 16;

/// How far a fraction may be from the real value to be used
const FRACTION_TOLERANCE: f64 = 0.01;

/// Render a count for people: `2.5` → `"2 1/2"`, `0.333` → `"1/3"`, `0` → `"?"`.
///
/// Uses the smallest denominator (≤ 16) within 0.01 of the value, otherwise
/// falls back to two decimals.
pub fn format_count(count: f64) -> String {
    if !count.is_finite() || count <= 0.0 {
        return "?".to_string();
    }

    let mut whole = count.trunc();
    let fraction = count - whole;

    if fraction < FRACTION_TOLERANCE {
        return format!("{}", whole as u64);
    }
    if fraction > 1.0 - FRACTION_TOLERANCE {
        whole += 1.0;
        return format!("{}", whole as u64);
    }

    match nearest_fraction(fraction) {
        Some((numerator, denominator)) if whole == 0.0 => {
            format!("{}/{}", numerator, denominator)
        }
        Some((numerator, denominator)) => {
            format!("{} {}/{}", whole as u64, numerator, denominator)
        }
        None => {
            let text = format!("{:.2}", count);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

fn nearest_fraction(value: f64) -> Option<(u32, u32)> {
    (2..=MAX_DENOMINATOR).find_map(|denominator| {
        let numerator = (value * f64::from(denominator)).round() as u32;
        let approx = f64::from(numerator) / f64::from(denominator);

        (numerator > 0 && (value - approx).abs() < FRACTION_TOLERANCE)
            .then_some((numerator, denominator))
    })
}

// ============================================================================
// TITLES
// ============================================================================

/// Default character budget for `limit_title`
pub const DEFAULT_TITLE_LIMIT: usize = 25;

/// Shorten a title to whole words whose letters fit in `limit`, then append " ...".
///
/// Only word lengths count towards the limit, not the spaces between them.
pub fn limit_title(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }

    let mut kept = Vec::new();
    let mut total = 0;

    for word in title.split(' ') {
        let len = word.chars().count();
        if total + len <= limit {
            kept.push(word);
        }
        total += len;
    }

    format!("{} ...", kept.join(" "))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers() {
        assert_eq!(format_count(3.0), "3");
        assert_eq!(format_count(14.0), "14");
        assert_eq!(format_count(1.999), "2");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_count(0.5), "1/2");
        assert_eq!(format_count(0.333), "1/3");
        assert_eq!(format_count(0.67), "2/3");
        assert_eq!(format_count(0.75), "3/4");
        assert_eq!(format_count(0.125), "1/8");
    }

    #[test]
    fn test_mixed_numbers() {
        assert_eq!(format_count(2.5), "2 1/2");
        assert_eq!(format_count(1.33), "1 1/3");
    }

    #[test]
    fn test_unknown_count() {
        assert_eq!(format_count(0.0), "?");
        assert_eq!(format_count(f64::NAN), "?");
    }

    #[test]
    fn test_decimal_fallback() {
        assert_eq!(format_count(0.03), "0.03");
    }

    #[test]
    fn test_short_title_unchanged() {
        assert_eq!(limit_title("Pasta", DEFAULT_TITLE_LIMIT), "Pasta");
    }

    #[test]
    fn test_long_title_cut_on_words() {
        assert_eq!(
            limit_title("Chicken breast with lemon garlic sauce", DEFAULT_TITLE_LIMIT),
            "Chicken breast with lemon ..."
        );
    }
}
