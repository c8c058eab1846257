use crate::config::Vocabulary;
use crate::utils::inflect::{pluralize, singularize};
use regex::Regex;
use std::sync::OnceLock;

/// One parsed ingredient line: the name keeps the remaining tokens in their
/// original order and casing, since it is the deduplication key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIngredient {
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

fn number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(\.\d+)?$").unwrap())
}

fn fraction_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+/\d+$").unwrap())
}

fn is_quantity(token: &str, vocabulary: &Vocabulary) -> bool {
    number_pattern().is_match(token)
        || fraction_pattern().is_match(token)
        || vocabulary.quantities.contains(&token.to_lowercase())
}

fn is_unit(token: &str, vocabulary: &Vocabulary) -> bool {
    let lowered = token.to_lowercase();
    vocabulary.units.contains(&singularize(&lowered))
        || vocabulary.units.contains(&pluralize(&lowered))
}

/// Split one free-text ingredient line into name, quantity, and unit.
///
/// The first token classified as a quantity and the first classified as a
/// unit are consumed; everything else becomes the name, joined in original
/// order. Later occurrences of the same word stay in the name. Never fails:
/// a line that yields no name tokens falls back to the whole trimmed line.
pub fn parse(line: &str, vocabulary: &Vocabulary) -> ParsedIngredient {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    let quantity_idx = tokens.iter().position(|t| is_quantity(t, vocabulary));
    let unit_idx = tokens
        .iter()
        .enumerate()
        .position(|(i, t)| Some(i) != quantity_idx && is_unit(t, vocabulary));

    let name = tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != quantity_idx && Some(*i) != unit_idx)
        .map(|(_, t)| *t)
        .collect::<Vec<_>>()
        .join(" ");

    let name = if name.is_empty() {
        trimmed.to_string()
    } else {
        name
    };

    ParsedIngredient {
        name,
        quantity: quantity_idx.map(|i| tokens[i].to_string()),
        unit: unit_idx.map(|i| tokens[i].to_string()),
    }
}
