use crate::config::DietaryRules;

/// Collect every dietary tag whose keywords appear in the title or in any
/// ingredient name (case-insensitive substring). No scoring, no cap; an
/// empty title and ingredient list yields an empty set.
pub fn matched_tags(title: &str, ingredient_names: &[String], rules: &DietaryRules) -> Vec<String> {
    let title = title.to_lowercase();
    let ingredients: Vec<String> = ingredient_names
        .iter()
        .map(|name| name.to_lowercase())
        .collect();

    if title.is_empty() && ingredients.is_empty() {
        return Vec::new();
    }

    rules
        .tags
        .iter()
        .filter(|(_, keywords)| {
            keywords.iter().any(|keyword| {
                let keyword = keyword.to_lowercase();
                title.contains(&keyword) || ingredients.iter().any(|i| i.contains(&keyword))
            })
        })
        .map(|(tag, _)| tag.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn rules() -> DietaryRules {
        let mut tags = BTreeMap::new();
        tags.insert(
            "vegan".to_string(),
            vec!["tofu".to_string(), "vegan".to_string()],
        );
        tags.insert(
            "gluten_free".to_string(),
            vec!["gluten-free".to_string(), "rice flour".to_string()],
        );
        DietaryRules { tags }
    }

    #[test]
    fn test_keyword_in_title_and_ingredients() {
        let tags = matched_tags(
            "Vegan Buddha Bowl",
            &["tofu".to_string(), "rice".to_string()],
            &rules(),
        );
        assert_eq!(tags, vec!["vegan".to_string()]);
    }

    #[test]
    fn test_multiple_tags_match() {
        let tags = matched_tags(
            "Gluten-free pancakes",
            &["rice flour".to_string(), "tofu".to_string()],
            &rules(),
        );
        assert_eq!(tags, vec!["gluten_free".to_string(), "vegan".to_string()]);
    }

    #[test]
    fn test_empty_inputs_yield_no_tags() {
        let tags = matched_tags("", &[], &rules());
        assert!(tags.is_empty());
    }

    #[test]
    fn test_no_match() {
        let tags = matched_tags("Beef stew", &["beef".to_string()], &rules());
        assert!(tags.is_empty());
    }

    #[test]
    fn test_configured_keywords_match_case_insensitively() {
        let mut tags = BTreeMap::new();
        tags.insert("vegan".to_string(), vec!["Tofu".to_string()]);
        let rules = DietaryRules { tags };

        let matched = matched_tags("Stir fry", &["smoked TOFU".to_string()], &rules);
        assert_eq!(matched, vec!["vegan".to_string()]);
    }
}
