//! Suffix-rule singular/plural handling for unit matching and query
//! normalization. Intentionally small: enough for English measurement units
//! and everyday ingredient names, not a general inflection engine.

/// Reduce a word to a naive singular form
pub fn singularize(word: &str) -> String {
    if word.len() > 3 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }

    if word.len() > 2 && word.ends_with("es") {
        let stem = &word[..word.len() - 2];
        if stem.ends_with('s')
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with('o')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
        {
            return stem.to_string();
        }
    }

    if word.len() > 1 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

/// Produce a naive plural form
pub fn pluralize(word: &str) -> String {
    if word.len() > 1 && word.ends_with('y') {
        let before = word.as_bytes()[word.len() - 2] as char;
        if !matches!(before, 'a' | 'e' | 'i' | 'o' | 'u') {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }

    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("cups"), "cup");
        assert_eq!(singularize("tomatoes"), "tomato");
        assert_eq!(singularize("potatoes"), "potato");
        assert_eq!(singularize("berries"), "berry");
        assert_eq!(singularize("dishes"), "dish");
        assert_eq!(singularize("glass"), "glass");
        assert_eq!(singularize("flour"), "flour");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("cup"), "cups");
        assert_eq!(pluralize("berry"), "berries");
        assert_eq!(pluralize("dish"), "dishes");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
    }
}
