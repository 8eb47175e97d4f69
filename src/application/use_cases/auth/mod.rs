pub mod authenticate_refresh;
pub mod confirm_registration;
pub mod login;
pub mod logout;
pub mod me;
pub mod recover_password;
pub mod refresh_session;
pub mod register;
pub mod resend_confirmation;
pub mod set_new_password;
