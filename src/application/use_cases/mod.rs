pub mod auth;
pub mod blogs;
pub mod comments;
pub mod maintenance;
pub mod posts;
pub mod reactions;
pub mod sessions;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
