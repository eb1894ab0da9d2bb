//! Email service for sending verification codes.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Without an
//! SMTP relay configured the service stays usable: codes are logged at debug
//! level instead of being sent, which is what local development relies on.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use true_feedback_core::{Email, Username, VerificationCode};

use crate::config::EmailConfig;

/// HTML template for verification code email.
#[derive(Template)]
#[template(path = "email/verification_code.html")]
struct VerificationCodeEmailHtml<'a> {
    username: &'a str,
    code: &'a str,
    verify_url: &'a str,
}

/// Plain text template for verification code email.
#[derive(Template)]
#[template(path = "email/verification_code.txt")]
struct VerificationCodeEmailText<'a> {
    username: &'a str,
    code: &'a str,
    verify_url: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    transport: Option<SmtpTransport>,
    base_url: String,
}

#[derive(Clone)]
struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailService {
    /// Create a new email service. `None` disables delivery.
    ///
    /// # Errors
    ///
    /// Returns error if the relay or sender address is invalid.
    pub fn new(config: Option<&EmailConfig>, base_url: &str) -> Result<Self, EmailError> {
        let transport = config.map(SmtpTransport::new).transpose()?;
        if transport.is_none() {
            tracing::warn!("SMTP_HOST not set; verification codes will only be logged");
        }
        Ok(Self {
            transport,
            base_url: base_url.to_string(),
        })
    }

    /// A service that never sends mail.
    #[must_use]
    pub fn disabled(base_url: &str) -> Self {
        Self {
            transport: None,
            base_url: base_url.to_string(),
        }
    }

    /// Send a verification code to a new account.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_verification_code(
        &self,
        to: &Email,
        username: &Username,
        code: &VerificationCode,
    ) -> Result<(), EmailError> {
        let verify_url = format!(
            "{}/verify/{}",
            self.base_url,
            urlencoding::encode(username.as_str())
        );

        let Some(transport) = &self.transport else {
            tracing::debug!(
                username = %username,
                code = code.as_str(),
                "Email disabled; verification code not sent"
            );
            return Ok(());
        };

        let html = VerificationCodeEmailHtml {
            username: username.as_str(),
            code: code.as_str(),
            verify_url: &verify_url,
        }
        .render()?;
        let text = VerificationCodeEmailText {
            username: username.as_str(),
            code: code.as_str(),
            verify_url: &verify_url,
        }
        .render()?;

        transport
            .send_multipart(to, "True Feedback | Verification Code", &text, &html)
            .await
    }
}

impl SmtpTransport {
    fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.expose_secret().to_string(),
            ));
        }

        let from = config
            .from
            .parse()
            .map_err(|_| EmailError::InvalidAddress(config.from.clone()))?;

        Ok(Self {
            mailer: builder.build(),
            from,
        })
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart(
        &self,
        to: &Email,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to
                .as_str()
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

/// Generate a 6-digit verification code.
#[must_use]
pub fn generate_verification_code() -> VerificationCode {
    use rand::Rng;
    let code: u32 = rand::rng().random_range(100_000..1_000_000);
    VerificationCode::from_number(code)
}
