//! The per-category spending limits that transactions are compared against.

use std::{collections::BTreeMap, fs, path::Path};

use crate::{Category, Error};

/// A monthly spending limit for every [Category].
///
/// The configuration is always total: it holds a positive, finite limit for
/// each category, so looking up a limit cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetConfig {
    limits: [f64; Category::ALL.len()],
}

impl BudgetConfig {
    /// Create a budget configuration from `(category, limit)` pairs.
    ///
    /// If a category appears more than once, the last limit wins.
    ///
    /// # Errors
    /// Returns [Error::InvalidBudgetConfig] if a category has no limit or a
    /// limit is not a positive, finite number.
    pub fn new(limits: impl IntoIterator<Item = (Category, f64)>) -> Result<Self, Error> {
        let mut checked_limits = [None; Category::ALL.len()];

        for (category, limit) in limits {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(Error::InvalidBudgetConfig(format!(
                    "the limit for {category} must be a positive number, got {limit}"
                )));
            }

            checked_limits[index(category)] = Some(limit);
        }

        let mut config = [0.0; Category::ALL.len()];

        for category in Category::ALL {
            config[index(category)] = checked_limits[index(category)].ok_or_else(|| {
                Error::InvalidBudgetConfig(format!("missing a limit for {category}"))
            })?;
        }

        Ok(Self { limits: config })
    }

    /// Parse a JSON object mapping category names to limits, e.g.
    /// `{"groceries": 500, "utilities": 200, ...}`.
    ///
    /// # Errors
    /// Returns [Error::InvalidBudgetConfig] if `json` is not such an object or
    /// fails the checks of [BudgetConfig::new].
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let limits: BTreeMap<Category, f64> = serde_json::from_str(json)
            .map_err(|error| Error::InvalidBudgetConfig(error.to_string()))?;

        Self::new(limits)
    }

    /// Read a JSON budget configuration from the file at `path`.
    ///
    /// # Errors
    /// Returns [Error::InvalidBudgetConfig] if the file cannot be read or
    /// [BudgetConfig::from_json] fails.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path).map_err(|error| {
            Error::InvalidBudgetConfig(format!("could not read {}: {error}", path.display()))
        })?;

        Self::from_json(&json)
    }

    /// The monthly limit for `category`.
    pub fn limit(&self, category: Category) -> f64 {
        self.limits[index(category)]
    }

    /// Iterate over each category and its limit in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.limit(category)))
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            limits: [500.0, 200.0, 150.0, 300.0, 200.0],
        }
    }
}

fn index(category: Category) -> usize {
    category as usize
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::{BudgetConfig, Category, Error};

    #[test]
    fn default_limits() {
        let config = BudgetConfig::default();

        assert_eq!(config.limit(Category::Groceries), 500.0);
        assert_eq!(config.limit(Category::Utilities), 200.0);
        assert_eq!(config.limit(Category::Entertainment), 150.0);
        assert_eq!(config.limit(Category::Transportation), 300.0);
        assert_eq!(config.limit(Category::Other), 200.0);
    }

    #[test]
    fn iterates_in_canonical_order() {
        let categories: Vec<_> = BudgetConfig::default()
            .iter()
            .map(|(category, _)| category)
            .collect();

        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[test]
    fn new_rejects_missing_category() {
        let result = BudgetConfig::new([
            (Category::Groceries, 1.0),
            (Category::Utilities, 1.0),
            (Category::Entertainment, 1.0),
            (Category::Transportation, 1.0),
        ]);

        assert!(matches!(result, Err(Error::InvalidBudgetConfig(_))));
    }

    #[test]
    fn new_rejects_non_positive_limit() {
        let result = BudgetConfig::new(Category::ALL.map(|category| (category, 0.0)));

        assert!(matches!(result, Err(Error::InvalidBudgetConfig(_))));
    }

    #[test]
    fn parses_json_object() {
        let config = BudgetConfig::from_json(
            r#"{"groceries": 400, "utilities": 250.5, "entertainment": 100,
                "transportation": 80, "other": 50}"#,
        )
        .unwrap();

        assert_eq!(config.limit(Category::Utilities), 250.5);
        assert_eq!(config.limit(Category::Other), 50.0);
    }

    #[test]
    fn from_json_rejects_unknown_category() {
        let result = BudgetConfig::from_json(r#"{"rent": 1000}"#);

        assert!(matches!(result, Err(Error::InvalidBudgetConfig(_))));
    }

    #[test]
    fn loads_file() {
        let path = std::env::temp_dir().join(format!(
            "finance_tracker_budget_{}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"groceries": 1, "utilities": 2, "entertainment": 3, "transportation": 4, "other": 5}}"#
        )
        .unwrap();
        drop(file);

        let config = BudgetConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().limit(Category::Transportation), 4.0);
    }

    #[test]
    fn load_fails_on_missing_file() {
        let result = BudgetConfig::load(std::path::Path::new("/definitely/not/a/budget.json"));

        assert!(matches!(result, Err(Error::InvalidBudgetConfig(_))));
    }
}
