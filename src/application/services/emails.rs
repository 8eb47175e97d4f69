use crate::application::ports::email_sender::{EmailMessage, EmailSender};

pub fn confirmation_email(to: &str, base_url: &str, code: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Confirm your registration".into(),
        html: format!(
            "<h1>Thank you for your registration</h1>\
             <p>To finish registration please follow the link below:\
             <a href='{base_url}/confirm-email?code={code}'>complete registration</a></p>"
        ),
    }
}

pub fn recovery_email(to: &str, base_url: &str, code: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Password recovery".into(),
        html: format!(
            "<h1>Password recovery</h1>\
             <p>To finish password recovery please follow the link below:\
             <a href='{base_url}/password-recovery?recoveryCode={code}'>recovery password</a></p>"
        ),
    }
}

/// Sends `message`, logging instead of failing: a lost email must not undo
/// the account change that triggered it.
pub async fn deliver<M: EmailSender + ?Sized>(mailer: &M, message: EmailMessage) {
    if let Err(err) = mailer.send(&message).await {
        tracing::warn!(to = %message.to, subject = %message.subject, error = ?err, "email_delivery_failed");
    }
}
