#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A whitelisted sort field. `column` is interpolated into an `ORDER BY`, so it
/// must only ever return static expressions. Text columns compare under the
/// `"C"` collation so Postgres orders by code point like the memory store.
pub trait SortKey: Sized + Copy + Default {
    fn parse(raw: &str) -> Option<Self>;
    fn column(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct PageQuery<S> {
    pub page_number: i64,
    pub page_size: i64,
    pub sort_by: S,
    pub sort_direction: SortDirection,
}

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

impl<S: SortKey> PageQuery<S> {
    /// Lenient parsing: anything missing, malformed or out of range falls back
    /// to the default for that parameter.
    pub fn from_raw(
        page_number: Option<&str>,
        page_size: Option<&str>,
        sort_by: Option<&str>,
        sort_direction: Option<&str>,
    ) -> Self {
        let page_number = page_number
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v >= 1)
            .unwrap_or(1);
        let page_size = page_size
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| (1..=MAX_PAGE_SIZE).contains(v))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let sort_by = sort_by.and_then(S::parse).unwrap_or_default();
        let sort_direction = sort_direction
            .and_then(SortDirection::parse)
            .unwrap_or_default();
        Self {
            page_number,
            page_size,
            sort_by,
            sort_direction,
        }
    }

    /// Saturates instead of overflowing for absurd page numbers; such a page is
    /// simply empty.
    pub fn offset(&self) -> i64 {
        self.page_number
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }
}

impl<S: SortKey> Default for PageQuery<S> {
    fn default() -> Self {
        Self::from_raw(None, None, None, None)
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new<S>(query: &PageQuery<S>, total_count: i64, items: Vec<T>) -> Self {
        Self {
            page: query.page_number,
            page_size: query.page_size,
            total_count,
            items,
        }
    }

    pub fn pages_count(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total_count + self.page_size - 1) / self.page_size
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::blogging::BlogSortBy;

    #[test]
    fn defaults_apply_to_missing_or_invalid_values() {
        let q = PageQuery::<BlogSortBy>::from_raw(Some("0"), Some("abc"), Some("password"), Some("sideways"));
        assert_eq!(q.page_number, 1);
        assert_eq!(q.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(q.sort_by, BlogSortBy::CreatedAt);
        assert_eq!(q.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn explicit_values_are_kept() {
        let q = PageQuery::<BlogSortBy>::from_raw(Some("3"), Some("5"), Some("name"), Some("asc"));
        assert_eq!(q.page_number, 3);
        assert_eq!(q.page_size, 5);
        assert_eq!(q.sort_by, BlogSortBy::Name);
        assert_eq!(q.sort_direction, SortDirection::Asc);
        assert_eq!(q.offset(), 10);
    }

    #[test]
    fn huge_page_number_saturates_offset() {
        let q = PageQuery::<BlogSortBy>::from_raw(Some("9223372036854775807"), Some("100"), None, None);
        assert_eq!(q.page_number, i64::MAX);
        assert_eq!(q.offset(), i64::MAX);
    }

    #[test]
    fn text_sort_columns_use_code_point_collation() {
        use crate::application::dto::accounts::UserSortBy;
        assert_eq!(BlogSortBy::CreatedAt.column(), "created_at");
        assert_eq!(BlogSortBy::Name.column(), r#"name COLLATE "C""#);
        assert_eq!(UserSortBy::Login.column(), r#"login COLLATE "C""#);
    }

    #[test]
    fn pages_count_rounds_up() {
        let q = PageQuery::<BlogSortBy>::from_raw(None, Some("10"), None, None);
        assert_eq!(Page::new(&q, 0, Vec::<()>::new()).pages_count(), 0);
        assert_eq!(Page::new(&q, 10, Vec::<()>::new()).pages_count(), 1);
        assert_eq!(Page::new(&q, 11, Vec::<()>::new()).pages_count(), 2);
    }
}
