// 🔤 Similarity - bigram (Dice coefficient) string similarity
//
// Whitespace is ignored. 1.0 = identical, 0.0 = no shared bigrams.

// ============================================================================
// COMPARE
// ============================================================================

/// Dice coefficient over character bigrams, in [0, 1]
pub fn compare(first: &str, second: &str) -> f64 {
    strsim::sorensen_dice(first, second)
}

// ============================================================================
// TESTS
// ============================================================================
