pub mod accounts;
pub mod blogging;
