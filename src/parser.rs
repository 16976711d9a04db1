// 🥄 Ingredient Parser - free-text ingredient line → {count, unit, ingredient}
//
// "2 tablespoons sugar"   → { 2.00, "tbsp", "sugar" }
// "1 (15 oz) can beans"   → { 1,    "",     "can beans" }   parenthetical unit is dropped
// "6-8 oz chicken"        → { 14.00, "oz",  "chicken" }     ranges are summed, not averaged
//
// Parsing is heuristic and token-position based. Failures never escape
// `parse`: they collapse into the unparseable sentinel and callers filter.

use crate::error::ParseError;
use crate::units::UnitTable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

// ============================================================================
// INGREDIENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Quantity, non-negative
    pub count: f64,

    /// Canonical short unit, or empty
    pub unit: String,

    /// Lowercase free text, no parenthetical asides
    pub ingredient: String,
}

impl Ingredient {
    pub fn new(count: f64, unit: impl Into<String>, ingredient: impl Into<String>) -> Self {
        Ingredient {
            count,
            unit: unit.into(),
            ingredient: ingredient.into(),
        }
    }

    /// Sentinel returned for a line that could not be parsed
    pub fn unparseable() -> Self {
        Ingredient {
            count: 0.0,
            unit: String::new(),
            ingredient: String::new(),
        }
    }

    pub fn is_unparseable(&self) -> bool {
        self.ingredient.is_empty()
    }

    /// Remove hyphens, leading whitespace and leading punctuation from the text
    fn with_clean_text(mut self) -> Self {
        let without_hyphens = self.ingredient.replace('-', "");
        self.ingredient = without_hyphens
            .trim_start_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            .trim_end()
            .to_string();
        self
    }
}

// ============================================================================
// PARSER
// ============================================================================

/// Unicode fraction glyphs and their ASCII spelling.
/// The leading space splits "1½" into "1 1/2".
const FRACTION_GLYPHS: &[(char, &str)] = &[
    ('¼', " 1/4"),
    ('½', " 1/2"),
    ('¾', " 3/4"),
    ('⅓', " 1/3"),
    ('⅔', " 2/3"),
    ('⅛', " 1/8"),
];

fn parenthetical_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r" *\([^)]*\) *").expect("parenthetical pattern is valid"))
}

#[derive(Debug, Clone, Default)]
pub struct IngredientParser {
    units: UnitTable,
}

impl IngredientParser {
    /// Parser over the built-in unit table
    pub fn new() -> Self {
        Self::with_units(UnitTable::new())
    }

    pub fn with_units(units: UnitTable) -> Self {
        IngredientParser { units }
    }

    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    /// Parse one line. Never fails: unparseable lines yield `Ingredient::unparseable()`.
    pub fn parse(&self, line: &str) -> Ingredient {
        match self.try_parse(line) {
            Ok(ingredient) => ingredient,
            Err(e) => {
                tracing::debug!(line, error = %e, "unparseable ingredient line");
                Ingredient::unparseable()
            }
        }
    }

    /// Parse every line, keeping order. Unparseable lines stay in as sentinels.
    pub fn parse_all<I, S>(&self, lines: I) -> Vec<Ingredient>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines.into_iter().map(|line| self.parse(line.as_ref())).collect()
    }

    /// Parse one line, reporting why it failed
    pub fn try_parse(&self, line: &str) -> Result<Ingredient, ParseError> {
        let normalized = self.normalize(line);
        let tokens: Vec<&str> = normalized.split_whitespace().collect();

        if tokens.is_empty() {
            return Err(ParseError::EmptyLine);
        }

        let unit_index = tokens.iter().position(|t| self.units.is_canonical(t));

        let ingredient = match unit_index {
            Some(i) => {
                let count = quantity_count(&tokens[..i], tokens[i])?;
                Ingredient::new(count, tokens[i], tokens[i + 1..].join(" "))
            }
            None => match parse_term(tokens[0]) {
                Ok(count) if count > 0.0 => Ingredient::new(count, "", tokens[1..].join(" ")),
                _ => Ingredient::new(1.0, "", tokens.join(" ").replace(',', "")),
            },
        };

        Ok(ingredient.with_clean_text())
    }

    /// Lowercase, shorten units, drop parentheticals, expand fraction glyphs
    fn normalize(&self, line: &str) -> String {
        let lowered = line.to_lowercase();
        let shortened = self.shorten_units(&lowered);
        let stripped = parenthetical_pattern().replace_all(&shortened, " ");
        expand_fraction_glyphs(&stripped)
    }

    /// Replace whole-word long unit forms with their short form.
    ///
    /// Each word is looked up once, so a shortened token is never rewritten again.
    fn shorten_units(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut word = String::new();

        for c in text.chars() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
            } else {
                if !word.is_empty() {
                    out.push_str(self.units.lookup(&word));
                    word.clear();
                }
                out.push(c);
            }
        }
        if !word.is_empty() {
            out.push_str(self.units.lookup(&word));
        }

        out
    }
}

fn expand_fraction_glyphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);

    for c in text.chars() {
        match FRACTION_GLYPHS.iter().find(|(glyph, _)| *glyph == c) {
            Some((_, ascii)) => out.push_str(ascii),
            None => out.push(c),
        }
    }

    out
}

// ============================================================================
// QUANTITY EVALUATION
// ============================================================================
//
// Accepts only `term ('+' term)*` where term is a decimal or `decimal/decimal`.
// Nothing else is evaluated.

/// Count for the tokens preceding the unit
fn quantity_count(quantity: &[&str], unit: &str) -> Result<f64, ParseError> {
    let expression = match quantity {
        [] => {
            return Err(ParseError::MissingQuantity {
                unit: unit.to_string(),
            })
        }
        [single] => single.replace('-', "+"),
        many => many.join("+"),
    };

    let count = round2(sum_terms(&expression)?);

    if count == 0.0 {
        // Rounded away: keep the raw first token rather than a zero
        return parse_term(quantity[0]);
    }

    Ok(count)
}

/// Sum of `+`-separated terms
pub fn sum_terms(expression: &str) -> Result<f64, ParseError> {
    expression
        .split('+')
        .map(parse_term)
        .try_fold(0.0, |acc, term| term.map(|value| acc + value))
}

/// A decimal literal or a simple fraction
pub fn parse_term(term: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidQuantity(term.to_string());

    match term.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = parse_decimal(numerator).ok_or_else(invalid)?;
            let denominator = parse_decimal(denominator).ok_or_else(invalid)?;
            if denominator == 0.0 {
                return Err(ParseError::DivisionByZero(term.to_string()));
            }
            Ok(numerator / denominator)
        }
        None => parse_decimal(term).ok_or_else(invalid),
    }
}

/// Digits with at most one '.', nothing else (no sign, exponent, inf or nan)
fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    let digits = text.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = text.chars().filter(|c| *c == '.').count();

    if digits == 0 || dots > 1 || digits + dots != text.len() {
        return None;
    }

    text.parse().ok()
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================
