pub mod blog_repository;
pub mod comment_repository;
pub mod device_session_repository;
pub mod email_sender;
pub mod maintenance_repository;
pub mod post_repository;
pub mod reaction_repository;
pub mod user_repository;
