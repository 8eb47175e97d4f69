pub mod emails;
pub mod passwords;
pub mod tokens;
