//! Shop filters: search text, sort key, price range and categories.

use core::fmt;
use core::str::FromStr;

use homestore_core::Price;

use crate::catalog::{ListQuery, SortField, SortOrder};

/// A sort field with its direction, written `price,asc` in forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortKey {
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// `price,desc`; a bare field sorts ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = s.split_once(',').unwrap_or((s, "asc"));
        Ok(Self {
            field: field.parse()?,
            order: order.parse()?,
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.order)
    }
}

/// Selected categories. Empty means "All".
///
/// Labels keep the order in which they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    selected: Vec<String>,
}

impl CategorySelection {
    /// Whether every category is shown.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.selected.is_empty()
    }

    /// Select or deselect one category. A blank label selects "All";
    /// deselecting the last category also returns to "All".
    pub fn toggle(&mut self, category: &str) {
        let category = category.trim();
        if category.is_empty() {
            self.select_all();
            return;
        }
        if let Some(pos) = self.selected.iter().position(|c| c == category) {
            self.selected.remove(pos);
        } else {
            self.selected.push(category.to_string());
        }
    }

    /// Clear every selection.
    pub fn select_all(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.selected.iter().any(|c| c == category)
    }

    /// Selected labels in selection order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.selected
    }
}

/// Everything the user filtered the shop by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub sort: Option<SortKey>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub categories: CategorySelection,
}

impl FilterState {
    /// The product list query for one page of results.
    #[must_use]
    pub fn to_query(&self, page: u32, limit: u32) -> ListQuery {
        let mut query = ListQuery::new().paginate(page, limit).search(&self.search);
        if let Some(sort) = self.sort {
            query = query.sort(sort.field, sort.order);
        }
        if let Some(min) = self.min_price {
            query = query.price_gte(min);
        }
        if let Some(max) = self.max_price {
            query = query.price_lte(max);
        }
        for category in self.categories.labels() {
            query = query.category_like(category);
        }
        query
    }

    /// Whether any filter differs from the defaults.
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_two_categories_two_clauses() {
        let mut filters = FilterState::default();
        filters.categories.toggle("Chairs");
        filters.categories.toggle("Tables");

        let query = filters.to_query(1, 12);
        assert_eq!(
            query.values("category_like").collect::<Vec<_>>(),
            ["Chairs", "Tables"]
        );
    }

    #[test]
    fn test_all_clears_selection() {
        let mut categories = CategorySelection::default();
        categories.toggle("Chairs");
        categories.toggle("Tables");
        categories.toggle("");
        assert!(categories.is_all());

        let query = FilterState {
            categories,
            ..FilterState::default()
        }
        .to_query(1, 12);
        assert_eq!(query.values("category_like").count(), 0);
    }

    #[test]
    fn test_toggle_off_last_category_returns_to_all() {
        let mut categories = CategorySelection::default();
        categories.toggle("Lamps");
        assert!(categories.contains("Lamps"));
        categories.toggle("Lamps");
        assert!(categories.is_all());
    }

    #[test]
    fn test_full_query() {
        let filters = FilterState {
            search: "oak".to_string(),
            sort: Some("price,desc".parse().unwrap()),
            min_price: Some("10".parse().unwrap()),
            max_price: Some("250.5".parse().unwrap()),
            categories: CategorySelection::default(),
        };
        assert_eq!(
            filters.to_query(2, 12).to_string(),
            "_page=2&_limit=12&q=oak&_sort=price&_order=desc&price_gte=10&price_lte=250.5"
        );
        assert!(filters.is_active());
        assert!(!FilterState::default().is_active());
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!(
            "rating".parse::<SortKey>(),
            Ok(SortKey::new(SortField::Rating, SortOrder::Asc))
        );
        assert_eq!("name,desc".parse::<SortKey>().unwrap().to_string(), "name,desc");
        assert!("price,sideways".parse::<SortKey>().is_err());
    }
}
