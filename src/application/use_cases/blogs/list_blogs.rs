use crate::application::dto::blogging::{BlogFilter, BlogSortBy};
use crate::application::dto::pagination::{Page, PageQuery};
use crate::application::ports::blog_repository::BlogRepository;
use crate::domain::blogging::blog::Blog;

pub struct ListBlogs<'a, R: BlogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BlogRepository + ?Sized> ListBlogs<'a, R> {
    pub async fn execute(
        &self,
        filter: &BlogFilter,
        query: &PageQuery<BlogSortBy>,
    ) -> anyhow::Result<Page<Blog>> {
        self.repo.list(filter, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::blogging::BlogInput;
    use crate::application::dto::pagination::SortDirection;
    use crate::application::use_cases::blogs::create_blog::CreateBlog;
    use crate::infrastructure::memory::MemoryStore;

    async fn seed(store: &MemoryStore, name: &str) {
        CreateBlog { repo: store }
            .execute(BlogInput {
                name: name.into(),
                description: "about".into(),
                website_url: "https://example.com".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn filters_by_name_ignoring_case_and_pages() {
        let store = MemoryStore::new();
        for name in ["Rust weekly", "rusty nails", "Gardening", "TRUST"] {
            seed(&store, name).await;
        }
        let filter = BlogFilter {
            name_term: Some("RUST".into()),
        };
        let mut query = PageQuery::<BlogSortBy>::from_raw(None, Some("2"), Some("name"), Some("asc"));
        let page = ListBlogs { repo: &store }.execute(&filter, &query).await.unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.pages_count(), 2);
        let names: Vec<_> = page.items.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Rust weekly", "TRUST"]);

        query.page_number = 2;
        query.sort_direction = SortDirection::Asc;
        let page = ListBlogs { repo: &store }.execute(&filter, &query).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "rusty nails");
    }
}
