//! Messages the site sends: minimal HTML bodies, no template engine.

use reqwest::Url;

use crate::ports::EmailMessage;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn unsubscribe_link(app_url: &str, email: &str) -> String {
    let base = format!("{}/unsubscribe", app_url.trim_end_matches('/'));
    match Url::parse_with_params(&base, &[("email", email)]) {
        Ok(url) => url.into(),
        Err(_) => base,
    }
}

/// Newsletter welcome, or welcome back on resubscription.
pub fn newsletter_welcome(app_url: &str, email: &str, resubscribed: bool) -> EmailMessage {
    let (subject, heading, message) = if resubscribed {
        (
            "Welcome back to our newsletter!",
            "Welcome Back!",
            "We're glad to have you back! You'll receive our latest updates and news.",
        )
    } else {
        (
            "Welcome to our newsletter!",
            "Thanks for Subscribing!",
            "You're now part of our community. We'll keep you updated with the latest news and tools.",
        )
    };
    let unsubscribe = escape(&unsubscribe_link(app_url, email));

    EmailMessage {
        to: email.to_string(),
        subject: subject.to_string(),
        html: format!(
            "<h1>{heading}</h1>\
             <p>{message}</p>\
             <p style=\"font-size:12px;color:#999\">If you didn't subscribe to this newsletter, \
             you can <a href=\"{unsubscribe}\">unsubscribe here</a>.</p>"
        ),
    }
}

/// Sent once a listing checkout completes.
pub fn payment_success(name: &str, email: &str, item_link: &str) -> EmailMessage {
    let name = escape(name);
    let link = escape(item_link);
    EmailMessage {
        to: email.to_string(),
        subject: "Thank you for your submission".to_string(),
        html: format!(
            "<h1>Payment Successful!</h1>\
             <p>Hi {name},</p>\
             <p>Your payment has been processed successfully.</p>\
             <p>View your submission: <a href=\"{link}\">{link}</a></p>"
        ),
    }
}
