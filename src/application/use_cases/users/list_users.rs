use crate::application::dto::accounts::{UserFilter, UserSortBy};
use crate::application::dto::pagination::{Page, PageQuery};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::accounts::user::User;

pub struct ListUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListUsers<'a, R> {
    pub async fn execute(
        &self,
        filter: &UserFilter,
        query: &PageQuery<UserSortBy>,
    ) -> anyhow::Result<Page<User>> {
        self.repo.list(filter, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::seed_user;
    use crate::infrastructure::memory::MemoryStore;

    #[tokio::test]
    async fn login_and_email_terms_combine_with_or() {
        let store = MemoryStore::new();
        for login in ["anna", "bert", "carl"] {
            seed_user(&store, login, "secret1").await;
        }
        let filter = UserFilter {
            login_term: Some("ANN".into()),
            email_term: Some("carl@".into()),
        };
        let query = PageQuery::<UserSortBy>::from_raw(None, None, Some("login"), Some("asc"));
        let page = ListUsers { repo: &store }.execute(&filter, &query).await.unwrap();
        let logins: Vec<_> = page.items.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, ["anna", "carl"]);
        assert_eq!(page.total_count, 2);
    }
}
