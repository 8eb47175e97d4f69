use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::dto::pagination::{Page, PageQuery, SortKey};
use crate::presentation::http::blogs::BlogView;
use crate::presentation::http::comments::CommentView;
use crate::presentation::http::posts::PostView;
use crate::presentation::http::users::UserView;

/// Raw paging parameters; parsing is lenient and falls back to defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Default 1
    pub page_number: Option<String>,
    /// Default 10, at most 100
    pub page_size: Option<String>,
    /// Default createdAt
    pub sort_by: Option<String>,
    /// asc | desc, default desc
    pub sort_direction: Option<String>,
}

impl PageParams {
    pub fn to_query<S: SortKey>(&self) -> PageQuery<S> {
        PageQuery::from_raw(
            self.page_number.as_deref(),
            self.page_size.as_deref(),
            self.sort_by.as_deref(),
            self.sort_direction.as_deref(),
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(
    BlogPage = Paginator<BlogView>,
    PostPage = Paginator<PostView>,
    CommentPage = Paginator<CommentView>,
    UserPage = Paginator<UserView>
)]
pub struct Paginator<T> {
    pub pages_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub items: Vec<T>,
}

impl<T> Paginator<T> {
    pub fn from_page<U>(page: Page<U>, f: impl FnMut(U) -> T) -> Self {
        let pages_count = page.pages_count();
        let page = page.map(f);
        Self {
            pages_count,
            page: page.page,
            page_size: page.page_size,
            total_count: page.total_count,
            items: page.items,
        }
    }
}

/// ISO-8601 with millisecond precision, the shape clients already parse.
pub fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
