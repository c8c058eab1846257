use crate::config::CategoryRules;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Minimum lead the top keyword score needs over the runner-up; anything
/// closer is ambiguous and falls back to "Uncategorized".
const AMBIGUITY_GAP: f64 = 2.0;

/// Assign a category name from the title and ingredient names.
///
/// Two passes, first match wins: an ordered scan for configured cooking
/// methods, then keyword scoring. Ties and zero scores resolve to
/// "Uncategorized" rather than an error.
pub fn categorize(title: &str, ingredient_names: &[String], rules: &CategoryRules) -> String {
    let title = title.to_lowercase();
    let ingredients: Vec<String> = ingredient_names
        .iter()
        .map(|name| name.to_lowercase())
        .collect();

    if let Some(method) = categorize_by_cooking_method(&title, &ingredients, rules) {
        return method;
    }

    categorize_by_keywords(&title, &ingredients, rules)
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

fn categorize_by_cooking_method(
    title: &str,
    ingredients: &[String],
    rules: &CategoryRules,
) -> Option<String> {
    rules
        .cooking_methods
        .iter()
        .find(|method| {
            let method = method.to_lowercase();
            title.contains(&method) || ingredients.iter().any(|i| i.contains(&method))
        })
        .map(|method| title_case(method))
}

fn categorize_by_keywords(
    title: &str,
    ingredients: &[String],
    rules: &CategoryRules,
) -> Option<String> {
    let mut scores: Vec<(&str, f64)> = rules
        .categories
        .iter()
        .map(|(category, keywords)| {
            let score = keywords
                .iter()
                .map(|keyword| keyword_score(&keyword.to_lowercase(), title, ingredients))
                .sum();
            (category.as_str(), score)
        })
        .collect();

    // Highest score first; name order keeps equal scores deterministic.
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then(a.0.cmp(b.0)));

    let (top_name, top_score) = *scores.first()?;
    let runner_up = scores.get(1).map(|(_, s)| *s).unwrap_or(0.0);

    if top_score == 0.0 || top_score - runner_up < AMBIGUITY_GAP {
        return None;
    }

    Some(title_case(&top_name.replace('_', " ")))
}

fn keyword_score(keyword: &str, title: &str, ingredients: &[String]) -> f64 {
    score_from_title(keyword, title) + score_from_ingredients(keyword, ingredients)
}

fn score_from_title(keyword: &str, title: &str) -> f64 {
    if exact_match(keyword, title) {
        3.0
    } else if partial_match(keyword, title) {
        2.0
    } else {
        0.0
    }
}

fn score_from_ingredients(keyword: &str, ingredients: &[String]) -> f64 {
    ingredients
        .iter()
        .map(|ingredient| {
            if exact_match(keyword, ingredient) {
                1.0
            } else if partial_match(keyword, ingredient) {
                0.5
            } else {
                0.0
            }
        })
        .sum()
}

/// Whole-token match: "bread" matches in "banana bread"
fn exact_match(keyword: &str, text: &str) -> bool {
    text.split_whitespace().any(|word| word == keyword)
}

/// Substring-but-not-whole-token match: "bread" in "breadsticks"
fn partial_match(keyword: &str, text: &str) -> bool {
    text.contains(keyword) && !exact_match(keyword, text)
}

/// Capitalize each whitespace-separated word
pub fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn rules() -> CategoryRules {
        let mut categories = BTreeMap::new();
        categories.insert(
            "baking".to_string(),
            vec![
                "flour".to_string(),
                "sugar".to_string(),
                "banana".to_string(),
                "bread".to_string(),
            ],
        );
        categories.insert(
            "salad".to_string(),
            vec!["lettuce".to_string(), "cucumber".to_string()],
        );

        CategoryRules {
            cooking_methods: vec!["slow cooker".to_string(), "air fryer".to_string()],
            categories,
        }
    }

    fn ingredients(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cooking_method_wins_regardless_of_keywords() {
        let result = categorize(
            "Slow cooker banana bread",
            &ingredients(&["flour", "banana"]),
            &rules(),
        );
        assert_eq!(result, "Slow Cooker");
    }

    #[test]
    fn test_cooking_method_found_in_ingredients() {
        let result = categorize(
            "Crispy wings",
            &ingredients(&["chicken wings (air fryer)"]),
            &rules(),
        );
        assert_eq!(result, "Air Fryer");
    }

    #[test]
    fn test_keyword_scoring_picks_clear_winner() {
        // banana: 3 (title) + 1 (ingredient), bread: 3 (title),
        // flour + sugar: 1 each => baking 9, salad 0.
        let result = categorize(
            "Classic Banana Bread",
            &ingredients(&["flour", "banana", "sugar"]),
            &rules(),
        );
        assert_eq!(result, "Baking");
    }

    #[test]
    fn test_zero_score_is_uncategorized() {
        let result = categorize("Mystery stew", &ingredients(&["water"]), &rules());
        assert_eq!(result, UNCATEGORIZED);
    }

    #[test]
    fn test_close_scores_are_ambiguous() {
        let mut categories = BTreeMap::new();
        categories.insert("baking".to_string(), vec!["banana".to_string()]);
        categories.insert("fruit".to_string(), vec!["banana".to_string()]);
        let tied = CategoryRules {
            cooking_methods: vec![],
            categories,
        };

        // Both score 3 from the title; the gap is 0.
        let result = categorize("banana split", &[], &tied);
        assert_eq!(result, UNCATEGORIZED);
    }

    #[test]
    fn test_gap_of_two_is_decisive() {
        let mut categories = BTreeMap::new();
        categories.insert(
            "baking".to_string(),
            vec!["bread".to_string(), "flour".to_string()],
        );
        categories.insert("salad".to_string(), vec!["banana".to_string()]);
        let rules = CategoryRules {
            cooking_methods: vec![],
            categories,
        };

        // baking: bread 3 + flour 1 = 5; salad: banana 3. Gap 2 wins.
        let result = categorize("banana bread", &ingredients(&["flour"]), &rules);
        assert_eq!(result, "Baking");
    }

    #[test]
    fn test_category_key_is_title_cased() {
        let mut categories = BTreeMap::new();
        categories.insert("comfort_food".to_string(), vec!["casserole".to_string()]);
        let rules = CategoryRules {
            cooking_methods: vec![],
            categories,
        };

        let result = categorize("Chicken casserole", &[], &rules);
        assert_eq!(result, "Comfort Food");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("slow cooker"), "Slow Cooker");
        assert_eq!(title_case("baking"), "Baking");
    }
}
