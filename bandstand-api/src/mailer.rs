//! Newsletter fan-out over an HTTP mail-provider API
//!
//! Every send is attempted independently; a failure for one recipient is
//! logged and counted, never aborting the rest of the batch. Without a
//! `[mail]` configuration section the mailer is a no-op that reports the
//! would-be recipient count.

use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use bandstand_common::config::MailSettings;
use bandstand_common::store::models::Concert;
use bandstand_common::store::{users, Store};
use bandstand_common::{Error, Result};

/// Outbound mail client
pub struct Mailer {
    backend: Option<Backend>,
}

struct Backend {
    client: reqwest::Client,
    api_base_url: String,
    api_token: String,
    sender: String,
}

/// Mail provider send request
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
}

impl Mailer {
    /// Build a mailer from the optional `[mail]` settings section
    pub fn from_settings(mail: Option<&MailSettings>) -> Self {
        let backend = mail.map(|settings| Backend {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client (system error)"),
            api_base_url: settings.api_base_url.clone(),
            api_token: settings.api_token.clone(),
            sender: settings.sender.clone(),
        });
        Self { backend }
    }

    /// Announce a new concert to every newsletter subscriber
    pub async fn broadcast_new_concert(&self, store: &Store, concert: &Concert) -> Result<usize> {
        let subject = format!("New concert: {}", concert.title);
        let html = render_concert_announcement(concert);
        self.broadcast(store, &subject, &html).await
    }

    /// Send an arbitrary broadcast to every newsletter subscriber
    pub async fn broadcast_message(&self, store: &Store, subject: &str, body: &str) -> Result<usize> {
        let html = render_plain_message(body);
        self.broadcast(store, subject, &html).await
    }

    /// Fan out one message per subscriber, returning the success count
    async fn broadcast(&self, store: &Store, subject: &str, html: &str) -> Result<usize> {
        let recipients = users::subscribers(store).await;

        let Some(backend) = &self.backend else {
            info!(
                "Mail delivery not configured; {} subscriber(s) would receive \"{}\"",
                recipients.len(),
                subject
            );
            return Ok(recipients.len());
        };

        let sends = recipients
            .iter()
            .map(|user| backend.send(&user.email, subject, html));
        let results = join_all(sends).await;

        let mut sent = 0;
        for (user, result) in recipients.iter().zip(results) {
            match result {
                Ok(()) => sent += 1,
                Err(e) => warn!("Failed to send to {}: {}", user.email, e),
            }
        }

        info!(
            "Newsletter \"{}\" delivered to {}/{} subscriber(s)",
            subject,
            sent,
            recipients.len()
        );
        Ok(sent)
    }
}

impl Backend {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        let url = format!("{}/email", self.api_base_url);
        let request = SendEmailRequest {
            from: &self.sender,
            to,
            subject,
            html_body,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Internal(format!("Mail request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "Mail provider returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Fixed HTML template for the new-concert announcement
fn render_concert_announcement(concert: &Concert) -> String {
    let mut details = format!(
        "<h2>{}</h2>\n<p><strong>Date:</strong> {}</p>\n<p><strong>Venue:</strong> {}</p>",
        concert.title, concert.date, concert.venue
    );
    if let Some(description) = &concert.description {
        details.push_str(&format!("\n<p>{}</p>", description));
    }
    if let Some(ticket_url) = &concert.ticket_url {
        details.push_str(&format!("\n<p><a href=\"{}\">Get tickets</a></p>", ticket_url));
    }

    format!(
        "<div style=\"font-family: sans-serif; max-width: 600px; margin: 0 auto;\">\n\
         {}\n\
         <p>Don't miss our upcoming performance!</p>\n\
         </div>",
        details
    )
}

/// Plain broadcast body wrapped in the shared layout
fn render_plain_message(body: &str) -> String {
    format!(
        "<div style=\"font-family: sans-serif; max-width: 600px; margin: 0 auto;\">\n\
         <p>{}</p>\n\
         </div>",
        body
    )
}
