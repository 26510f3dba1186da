//! json-server list query builder.

use core::fmt;
use core::str::FromStr;

use homestore_core::Price;
use url::Url;

/// Sortable product fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Price,
    Rating,
    Name,
}

impl SortField {
    /// Field name as stored by the service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Rating => "rating",
            Self::Name => "name",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            "name" => Ok(Self::Name),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query string for a list request.
///
/// Parameters are kept in insertion order and repeated keys are allowed
/// (`category_like` appears once per selected category; the service ORs
/// them).
///
/// ```
/// use homestore_storefront::catalog::ListQuery;
///
/// let query = ListQuery::new()
///     .filter("userId", 3)
///     .filter("productId", 12);
/// assert_eq!(query.to_string(), "userId=3&productId=12");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: Vec<(&'static str, String)>,
}

impl ListQuery {
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Field equality, e.g. `userId=3`.
    #[must_use]
    pub fn filter(mut self, field: &'static str, value: impl fmt::Display) -> Self {
        self.params.push((field, value.to_string()));
        self
    }

    /// Records whose id is one of `ids`, as a single comma-separated `id_in`.
    #[must_use]
    pub fn id_in<I, D>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: fmt::Display,
    {
        let joined = ids
            .into_iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.params.push(("id_in", joined));
        self
    }

    /// Full-text search; blank text adds nothing.
    #[must_use]
    pub fn search(mut self, text: &str) -> Self {
        let text = text.trim();
        if !text.is_empty() {
            self.params.push(("q", text.to_string()));
        }
        self
    }

    #[must_use]
    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.params.push(("_sort", field.as_str().to_string()));
        self.params.push(("_order", order.as_str().to_string()));
        self
    }

    /// Lower price bound, inclusive.
    #[must_use]
    pub fn price_gte(mut self, price: Price) -> Self {
        self.params.push(("price_gte", price_param(price)));
        self
    }

    /// Upper price bound, inclusive.
    #[must_use]
    pub fn price_lte(mut self, price: Price) -> Self {
        self.params.push(("price_lte", price_param(price)));
        self
    }

    /// Category membership; repeat for each selected category.
    #[must_use]
    pub fn category_like(mut self, category: &str) -> Self {
        self.params.push(("category_like", category.to_string()));
        self
    }

    /// Offset pagination, `page` is 1-based.
    #[must_use]
    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.params.push(("_page", page.to_string()));
        self.params.push(("_limit", limit.to_string()));
        self
    }

    /// Values of every parameter named `key`.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether no parameters were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Append the parameters to `url`'s query string, percent-encoded.
    pub(crate) fn apply_to(&self, url: &mut Url) {
        if self.params.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &self.params {
            pairs.append_pair(key, value);
        }
    }
}

impl fmt::Display for ListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish();
        f.write_str(&encoded)
    }
}

/// `249.90` is sent as `249.9`, `100.00` as `100`.
fn price_param(price: Price) -> String {
    price.amount().normalize().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_category_clauses() {
        let query = ListQuery::new()
            .category_like("Chairs")
            .category_like("Tables");
        assert_eq!(query.values("category_like").collect::<Vec<_>>(), ["Chairs", "Tables"]);
        assert_eq!(query.to_string(), "category_like=Chairs&category_like=Tables");
    }

    #[test]
    fn test_blank_search_is_skipped() {
        assert!(ListQuery::new().search("   ").is_empty());
        assert_eq!(ListQuery::new().search(" oak ").to_string(), "q=oak");
    }

    #[test]
    fn test_price_bounds_are_normalized() {
        let query = ListQuery::new()
            .price_gte("100.00".parse().unwrap())
            .price_lte("249.90".parse().unwrap());
        assert_eq!(query.to_string(), "price_gte=100&price_lte=249.9");
    }

    #[test]
    fn test_id_in_is_comma_joined() {
        let query = ListQuery::new().id_in([3, 5, 8]);
        assert_eq!(query.values("id_in").collect::<Vec<_>>(), ["3,5,8"]);
    }

    #[test]
    fn test_apply_to_encodes_values() {
        let mut url = Url::parse("http://localhost:3000/users").unwrap();
        ListQuery::new()
            .filter("phone", "+375 (29) 123-45-67")
            .apply_to(&mut url);
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/users?phone=%2B375+%2829%29+123-45-67"
        );
        assert_eq!(
            url.query_pairs().next().unwrap().1,
            "+375 (29) 123-45-67"
        );
    }

    #[test]
    fn test_sort_and_paginate() {
        let query = ListQuery::new()
            .sort(SortField::Price, SortOrder::Desc)
            .paginate(3, 12);
        assert_eq!(query.to_string(), "_sort=price&_order=desc&_page=3&_limit=12");
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("rating".parse::<SortField>(), Ok(SortField::Rating));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("colour".parse::<SortField>().is_err());
    }
}
