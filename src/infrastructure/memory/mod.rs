//! Process-local store used when `STORAGE_BACKEND=memory` and by tests.
//!
//! All collections live behind one `RwLock`, so every port method sees a
//! consistent snapshot and the reaction write touches user and target under
//! the same guard.

mod accounts;
mod blogging;

use std::cmp::Ordering;
use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::dto::pagination::{Page, PageQuery, SortDirection, SortKey};
use crate::domain::accounts::device_session::DeviceSession;
use crate::domain::accounts::user::User;
use crate::domain::blogging::blog::Blog;
use crate::domain::blogging::comment::Comment;
use crate::domain::blogging::post::Post;

#[derive(Default)]
struct State {
    blogs: HashMap<Uuid, Blog>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    users: HashMap<Uuid, User>,
    // Insertion order is the listing order.
    sessions: Vec<DeviceSession>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sorts by `compare` in the requested direction, then by ascending id, the
/// same order the SQL listings use.
fn paginate<T, S: SortKey>(
    mut items: Vec<T>,
    query: &PageQuery<S>,
    id: impl Fn(&T) -> Uuid,
    compare: impl Fn(&T, &T) -> Ordering,
) -> Page<T> {
    items.sort_by(|a, b| {
        let primary = match query.sort_direction {
            SortDirection::Asc => compare(a, b),
            SortDirection::Desc => compare(b, a),
        };
        primary.then_with(|| id(a).cmp(&id(b)))
    });
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(query.offset().max(0) as usize)
        .take(query.page_size.max(0) as usize)
        .collect();
    Page::new(query, total, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::blogging::BlogSortBy;

    #[test]
    fn equal_keys_fall_back_to_ascending_id() {
        let ids = [Uuid::from_u128(3), Uuid::from_u128(1), Uuid::from_u128(2)];
        let items = vec![(ids[0], "b"), (ids[1], "a"), (ids[2], "b")];
        for dir in ["asc", "desc"] {
            let q = PageQuery::<BlogSortBy>::from_raw(None, None, Some("name"), Some(dir));
            let page = paginate(items.clone(), &q, |x| x.0, |a, b| a.1.cmp(b.1));
            let got: Vec<_> = page.items.iter().map(|x| x.0).collect();
            let expected = if dir == "asc" {
                vec![ids[1], ids[2], ids[0]]
            } else {
                vec![ids[2], ids[0], ids[1]]
            };
            assert_eq!(got, expected, "direction {dir}");
        }
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let q = PageQuery::<BlogSortBy>::from_raw(Some("9223372036854775807"), Some("100"), None, None);
        let page = paginate(vec![(Uuid::from_u128(1), 1)], &q, |x| x.0, |a, b| a.1.cmp(&b.1));
        assert_eq!(page.total_count, 1);
        assert!(page.items.is_empty());
    }
}
