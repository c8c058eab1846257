use crate::error::{Error, Result};
use crate::utils::inflect::singularize;

/// Normalize a raw comma-separated ingredient query: split, trim, lowercase,
/// singularize, drop empties. An empty result is a BadQuery, distinct from
/// a valid query with zero matches.
pub fn normalize_query(raw: &str) -> Result<Vec<String>> {
    let terms: Vec<String> = raw
        .split(',')
        .map(|term| singularize(&term.trim().to_lowercase()))
        .filter(|term| !term.is_empty())
        .collect();

    if terms.is_empty() {
        return Err(Error::BadQuery(
            "Ingredients parameter is required".to_string(),
        ));
    }

    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_lowercases_and_singularizes() {
        let terms = normalize_query(" Pesto , Pitas ,tomatoes").unwrap();
        assert_eq!(terms, vec!["pesto", "pita", "tomato"]);
    }

    #[test]
    fn test_empty_query_is_bad_query() {
        assert!(matches!(normalize_query(""), Err(Error::BadQuery(_))));
        assert!(matches!(normalize_query(" , , "), Err(Error::BadQuery(_))));
    }
}
