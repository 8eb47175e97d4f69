pub mod blog_repository_sqlx;
pub mod comment_repository_sqlx;
pub mod device_session_repository_sqlx;
pub mod maintenance_repository_sqlx;
pub mod post_repository_sqlx;
pub mod reaction_repository_sqlx;
pub mod user_repository_sqlx;

/// `ILIKE` pattern matching `term` anywhere, with wildcards in the term escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
