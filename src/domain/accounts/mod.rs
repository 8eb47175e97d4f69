pub mod device_session;
pub mod user;
