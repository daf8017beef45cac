//! HTML bodies for the contact flow.
//!
//! All caller-supplied text goes through [`escape_html`] before it is
//! interpolated.

use crate::contact::{ContactMessage, ContactSettings};

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Body of the notification delivered to the support inbox.
pub fn support_notification(msg: &ContactMessage, settings: &ContactSettings) -> String {
    let name = escape_html(&msg.name);
    let email = escape_html(&msg.email);
    let message = escape_html(&msg.message);
    let brand = escape_html(&settings.brand);

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #3CB018;">Customer support request</h2>
  <div style="background-color: #f5f5f5; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Message:</strong></p>
    <div style="background-color: white; padding: 15px; border-radius: 4px; margin-top: 10px;">
      <p style="white-space: pre-wrap; margin: 0;">{message}</p>
    </div>
  </div>
  <p style="color: #666; font-size: 12px; margin-top: 20px;">
    Sent automatically from the {brand} website contact form.
  </p>
</div>"#
    )
}

/// Body of the confirmation delivered back to the customer.
pub fn customer_confirmation(msg: &ContactMessage, settings: &ContactSettings) -> String {
    let name = escape_html(&msg.name);
    let message = escape_html(&msg.message);
    let brand = escape_html(&settings.brand);
    let hotline = escape_html(&settings.hotline);
    let inbox = escape_html(&settings.support_inbox);

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #3CB018; padding: 20px; text-align: center;">
    <h1 style="color: white; margin: 0;">{brand}</h1>
  </div>
  <div style="padding: 30px 20px;">
    <h2 style="color: #333;">Hello {name},</h2>
    <p>Thank you for contacting {brand}. We have received your support request.</p>
    <div style="background-color: #f5f5f5; padding: 15px; border-radius: 8px; margin: 20px 0;">
      <p><strong>Your request:</strong></p>
      <p style="white-space: pre-wrap; margin: 10px 0;">{message}</p>
    </div>
    <p>We will get back to you within <strong>24 business hours</strong>.</p>
    <ul style="list-style: none; padding: 0;">
      <li style="margin: 10px 0;"><strong>Hotline:</strong> {hotline}</li>
      <li style="margin: 10px 0;"><strong>Email:</strong> {inbox}</li>
    </ul>
    <p style="margin-top: 30px;">Best regards,<br><strong>The {brand} team</strong></p>
  </div>
  <div style="background-color: #f5f5f5; padding: 15px; text-align: center; font-size: 12px; color: #666;">
    <p>This email was sent automatically, please do not reply.</p>
  </div>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Lan <script>".into(),
            email: "lan@example.com".into(),
            message: "Is it safe for kids?\n\"Yes\" & 'no'".into(),
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn bodies_never_contain_raw_user_markup() {
        let settings = ContactSettings::default();
        for body in [
            support_notification(&message(), &settings),
            customer_confirmation(&message(), &settings),
        ] {
            assert!(!body.contains("<script>"));
            assert!(body.contains("Lan &lt;script&gt;"));
        }
    }

    #[test]
    fn support_body_includes_sender_details() {
        let body = support_notification(&message(), &ContactSettings::default());
        assert!(body.contains("lan@example.com"));
        assert!(body.contains("&quot;Yes&quot; &amp; &#39;no&#39;"));
    }
}
