use super::builtin::DEFAULT_CATEGORIES;
use crate::codec;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

/// Priority applied when a category has no default
pub const FALLBACK_PRIORITY: &str = "Normal";

/// One row of the category reference file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    pub scope: String,
    pub category: String,
    pub subcategory: String,
    pub default_assignee: String,
    pub default_sla_hours: Option<u32>,
    pub default_priority: Option<String>,
}

impl CategoryRow {
    fn from_positional(cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Self {
            scope: cell(0),
            category: cell(1),
            subcategory: cell(2),
            default_assignee: cell(3),
            default_sla_hours: cell(4).parse().ok(),
            default_priority: None,
        }
    }

    fn from_keyed(row: &HashMap<String, String>) -> Self {
        let cell = |name: &str| row.get(name).map(|v| v.trim().to_string()).unwrap_or_default();
        let category = Some(cell("category"))
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| cell("category_code"));
        Self {
            scope: cell("scope"),
            category,
            subcategory: cell("subcategory"),
            default_assignee: cell("default_assignee"),
            default_sla_hours: cell("default_sla_hours").parse().ok(),
            default_priority: Some(cell("default_priority")).filter(|p| !p.is_empty()),
        }
    }
}

/// A category with its scope and the subcategories offered under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub name: String,
    pub scope: String,
    pub subcategories: BTreeSet<String>,
}

/// Per-category defaults applied to new tickets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDefault {
    pub assignee: String,
    pub sla_hours: Option<u32>,
    pub priority: String,
}

/// Category name to defaults, as loaded from the reference file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDefaults(HashMap<String, CategoryDefault>);

impl CategoryDefaults {
    pub fn get(&self, category: &str) -> Option<&CategoryDefault> {
        self.0.get(category)
    }

    /// Default priority for a category, `Normal` when unknown
    pub fn priority_for(&self, category: &str) -> &str {
        self.get(category)
            .map_or(FALLBACK_PRIORITY, |d| d.priority.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Category choices loaded from the reference file or the built-in list
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    rows: Vec<CategoryRow>,
    fallback: bool,
}

fn scope_rank(scope: &str) -> u8 {
    match scope {
        "PMO" => 0,
        "InBuilding" => 1,
        _ => 2,
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

impl CategoryCatalog {
    /// Catalog built from the built-in category list
    pub fn builtin() -> Self {
        let rows = DEFAULT_CATEGORIES
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|c| (*c).to_string()).collect();
                CategoryRow::from_positional(&cells)
            })
            .collect();
        Self {
            rows,
            fallback: true,
        }
    }

    /// Parse category CSV text
    ///
    /// Files whose header names a `category` (or `category_code`) column are
    /// read by column name; anything else is read positionally as
    /// `scope,category,subcategory,default_assignee,default_sla_hours`.
    /// Rows without a category are skipped. Returns `None` when nothing usable
    /// is left.
    pub fn from_csv(text: &str) -> Option<Self> {
        let header = text.trim().lines().next().unwrap_or_default();
        let keyed = header
            .split(',')
            .map(|h| h.trim().trim_matches('"'))
            .any(|h| h == "category" || h == "category_code");

        let rows: Vec<CategoryRow> = if keyed {
            codec::parse::<HashMap<String, String>>(text)
                .iter()
                .map(CategoryRow::from_keyed)
                .collect()
        } else {
            codec::parse_positional(text)
                .iter()
                .map(|cells| CategoryRow::from_positional(cells))
                .collect()
        };

        let rows: Vec<CategoryRow> = rows
            .into_iter()
            .filter(|row| !row.category.is_empty())
            .collect();
        if rows.is_empty() {
            return None;
        }
        Some(Self {
            rows,
            fallback: false,
        })
    }

    /// Load the category file, falling back to the built-in list
    ///
    /// Never fails: a missing, unreadable or empty file yields [`Self::builtin`].
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_csv(&text).unwrap_or_else(|| {
                tracing::warn!(
                    "No categories in {}, using built-in defaults",
                    path.display()
                );
                Self::builtin()
            }),
            Err(e) => {
                tracing::warn!(
                    "Could not read {} ({}), using built-in categories",
                    path.display(),
                    e
                );
                Self::builtin()
            },
        }
    }

    /// Whether the catalog came from the built-in list
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn rows(&self) -> &[CategoryRow] {
        &self.rows
    }

    /// Categories with their scope and subcategories
    ///
    /// A category takes the scope of its first row. Ordered by scope (`PMO`,
    /// then `InBuilding`, then anything else) and then by name.
    pub fn categories(&self) -> Vec<CategoryInfo> {
        let mut by_name: Vec<CategoryInfo> = Vec::new();
        for row in &self.rows {
            let index = match by_name.iter().position(|c| c.name == row.category) {
                Some(index) => index,
                None => {
                    by_name.push(CategoryInfo {
                        name: row.category.clone(),
                        scope: row.scope.clone(),
                        subcategories: BTreeSet::new(),
                    });
                    by_name.len() - 1
                },
            };
            if !row.subcategory.is_empty() {
                by_name[index].subcategories.insert(row.subcategory.clone());
            }
        }

        by_name.sort_by(|a, b| {
            scope_rank(&a.scope)
                .cmp(&scope_rank(&b.scope))
                .then_with(|| compare_names(&a.name, &b.name))
        });
        by_name
    }

    /// Sorted subcategories of one category, empty if the category is unknown
    pub fn subcategories(&self, category: &str) -> Vec<String> {
        self.categories()
            .into_iter()
            .find(|c| c.name == category)
            .map(|c| c.subcategories.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.rows.iter().any(|row| row.category == category)
    }

    /// Per-category defaults; when a category repeats, its last row wins
    pub fn defaults(&self) -> CategoryDefaults {
        CategoryDefaults(
            self.rows
                .iter()
                .map(|row| {
                    (
                        row.category.clone(),
                        CategoryDefault {
                            assignee: row.default_assignee.clone(),
                            sla_hours: row.default_sla_hours,
                            priority: row
                                .default_priority
                                .clone()
                                .unwrap_or_else(|| FALLBACK_PRIORITY.to_string()),
                        },
                    )
                })
                .collect(),
        )
    }
}
