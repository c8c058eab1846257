use crate::config::RuleFilesConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Category assignment rules: an ordered cooking-method phrase list plus a
/// category -> keyword map. Loaded once and treated as immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRules {
    pub cooking_methods: Vec<String>,
    pub categories: BTreeMap<String, Vec<String>>,
}

/// Dietary-tag rules: tag -> keyword map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietaryRules {
    pub tags: BTreeMap<String, Vec<String>>,
}

/// Ingredient-line vocabulary: spelled-out quantity words and known units.
/// Units are listed in singular form; plural forms match via inflection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    pub quantities: HashSet<String>,
    pub units: HashSet<String>,
}

/// All rule tables, loaded at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Rules {
    pub categories: CategoryRules,
    pub dietary: DietaryRules,
    pub vocabulary: Vocabulary,
}

fn load_yaml<T, P>(path: P, what: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::Config(format!(
            "Failed to read {} from {}: {}",
            what,
            path.as_ref().display(),
            e
        ))
    })?;

    serde_yaml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse {} from {}: {}",
            what,
            path.as_ref().display(),
            e
        ))
    })
}

impl CategoryRules {
    /// Load category rules from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let rules: CategoryRules = load_yaml(path, "category rules")?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::Config(
                "Category rules must define at least one category".to_string(),
            ));
        }

        for (category, keywords) in &self.categories {
            if keywords.is_empty() {
                return Err(Error::Config(format!(
                    "Category '{category}' has no keywords"
                )));
            }
        }

        Ok(())
    }
}

impl DietaryRules {
    /// Load dietary-tag rules from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let rules: DietaryRules = load_yaml(path, "dietary-tag rules")?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<()> {
        for (tag, keywords) in &self.tags {
            if keywords.is_empty() {
                return Err(Error::Config(format!(
                    "Dietary tag '{tag}' has no keywords"
                )));
            }
        }

        Ok(())
    }
}

impl Vocabulary {
    /// Load the ingredient vocabulary from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let vocabulary: Vocabulary = load_yaml(path, "ingredient vocabulary")?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn validate(&self) -> Result<()> {
        if self.units.is_empty() {
            return Err(Error::Config(
                "Ingredient vocabulary must define at least one unit".to_string(),
            ));
        }

        Ok(())
    }
}

impl Rules {
    /// Load all rule tables from the configured file paths
    pub fn load(config: &RuleFilesConfig) -> Result<Self> {
        Ok(Rules {
            categories: CategoryRules::from_file(&config.category_rules_path)?,
            dietary: DietaryRules::from_file(&config.dietary_tags_path)?,
            vocabulary: Vocabulary::from_file(&config.ingredient_vocabulary_path)?,
        })
    }
}
