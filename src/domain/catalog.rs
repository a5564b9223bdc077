//! Catalog listing query: search, genre filter, sort and page window.

use serde::Serialize;

/// Ordering for catalog listings. Ties are always broken by id ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieSort {
    #[default]
    Title,
    YearDesc,
    RatingDesc,
}

impl MovieSort {
    /// Unknown or missing values fall back to title ordering.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("year") => Self::YearDesc,
            Some("rating") => Self::RatingDesc,
            _ => Self::Title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    Any,
    Tag(String),
}

impl GenreFilter {
    /// `"all"` and blank values mean no filter.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("" | "all") => Self::Any,
            Some(tag) => Self::Tag(tag.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    #[must_use]
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    #[must_use]
    pub const fn pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub genre: GenreFilter,
    pub sort: MovieSort,
    pub page: PageRequest,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 12 }
    }
}

impl CatalogQuery {
    /// Builds a query from raw query-string values.
    ///
    /// `default_limit` applies when `limit` is absent or invalid and
    /// `max_limit` caps whatever the caller asks for.
    #[must_use]
    pub fn from_params(
        search: Option<&str>,
        genre: Option<&str>,
        sort_by: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u64,
        max_limit: u64,
    ) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string);

        let page = super::parse_positive_or(page, 1);
        let limit = super::parse_positive_or(limit, default_limit).min(max_limit);

        Self {
            search,
            genre: GenreFilter::parse(genre),
            sort: MovieSort::parse(sort_by),
            page: PageRequest::new(page, limit),
        }
    }

    /// Lowercased `LIKE` pattern for the search term with `%`, `_` and the
    /// escape character itself escaped by `\`. Matched against
    /// [`search_text`], which is folded the same way.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let mut escaped = String::with_capacity(term.len() + 2);
            escaped.push('%');
            for ch in term.to_lowercase().chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    escaped.push('\\');
                }
                escaped.push(ch);
            }
            escaped.push('%');
            escaped
        })
    }
}

/// Folded copy of the searchable fields, stored next to each movie.
///
/// `SQLite`'s `LIKE` only ignores ASCII case, so folding happens here with
/// full Unicode lowercasing and the column is compared case-sensitively.
#[must_use]
pub fn search_text(title: &str, description: &str) -> String {
    format!("{}\n{}", title.to_lowercase(), description.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages: request.pages(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> CatalogQuery {
        CatalogQuery::from_params(None, None, None, page, limit, 12, 100)
    }

    #[test]
    fn test_defaults_apply_for_missing_or_bad_values() {
        assert_eq!(query(None, None).page, PageRequest::new(1, 12));
        assert_eq!(query(Some("abc"), Some("-1")).page, PageRequest::new(1, 12));
        assert_eq!(query(Some("0"), Some("0")).page, PageRequest::new(1, 12));
        assert_eq!(query(Some("3"), Some("5")).page, PageRequest::new(3, 5));
    }

    #[test]
    fn test_limit_is_capped() {
        assert_eq!(query(None, Some("5000")).page.limit, 100);
    }

    #[test]
    fn test_offset_and_pages() {
        let req = PageRequest::new(3, 12);
        assert_eq!(req.offset(), 24);
        assert_eq!(req.pages(0), 0);
        assert_eq!(req.pages(12), 1);
        assert_eq!(req.pages(13), 2);

        let pagination = Pagination::new(PageRequest::new(1, 3), 6);
        assert_eq!(pagination.pages, 2);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(MovieSort::parse(Some("year")), MovieSort::YearDesc);
        assert_eq!(MovieSort::parse(Some("rating")), MovieSort::RatingDesc);
        assert_eq!(MovieSort::parse(Some("title")), MovieSort::Title);
        assert_eq!(MovieSort::parse(Some("popularity")), MovieSort::Title);
        assert_eq!(MovieSort::parse(None), MovieSort::Title);
    }

    #[test]
    fn test_genre_sentinel() {
        assert_eq!(GenreFilter::parse(Some("all")), GenreFilter::Any);
        assert_eq!(GenreFilter::parse(Some("  ")), GenreFilter::Any);
        assert_eq!(
            GenreFilter::parse(Some("Drama")),
            GenreFilter::Tag("Drama".to_string())
        );
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let q = CatalogQuery::from_params(Some("100%_\\"), None, None, None, None, 12, 100);
        assert_eq!(q.search_pattern().as_deref(), Some("%100\\%\\_\\\\%"));

        let blank = CatalogQuery::from_params(Some("   "), None, None, None, None, 12, 100);
        assert_eq!(blank.search_pattern(), None);
    }

    #[test]
    fn test_search_folds_unicode_case() {
        let q = CatalogQuery::from_params(Some("AMÉLIE"), None, None, None, None, 12, 100);
        assert_eq!(q.search_pattern().as_deref(), Some("%amélie%"));

        let text = search_text("Amélie", "Paris, MONTMARTRE");
        assert_eq!(text, "amélie\nparis, montmartre");
        assert!(text.contains("amélie"));
    }
}
