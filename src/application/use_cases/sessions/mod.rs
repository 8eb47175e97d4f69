pub mod list_sessions;
pub mod terminate_other_sessions;
pub mod terminate_session;
