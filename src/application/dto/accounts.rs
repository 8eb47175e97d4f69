use crate::application::dto::pagination::SortKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortBy {
    #[default]
    CreatedAt,
    Login,
    Email,
}

impl SortKey for UserSortBy {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" => Some(Self::CreatedAt),
            "login" => Some(Self::Login),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Login => r#"login COLLATE "C""#,
            Self::Email => r#"email COLLATE "C""#,
        }
    }
}

/// Both terms set means "login matches OR email matches".
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub login_term: Option<String>,
    pub email_term: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password: String,
    pub email: String,
}

/// Where a login request came from.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip: String,
    pub device_name: String,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_expires_at: i64,
}
