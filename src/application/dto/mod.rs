pub mod accounts;
pub mod blogging;
pub mod pagination;
