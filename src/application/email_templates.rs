use url::Url;

const BRAND_NAME: &str = "prepAIred";
const TAGLINE: &str = "Crafted by IITians, for Students Everywhere";
const LAUNCH_DATE: &str = "September 21st, 2025";
const REDDIT_URL: &str = "https://www.reddit.com/r/pepAIre/";
const DISCORD_URL: &str = "https://discord.gg/csWBDZ2F";
const COPYRIGHT: &str = "© 2025 prepAIred Platform. Crafted with ❤️";

pub const WELCOME_SUBJECT: &str =
    "🎉 Welcome to prepAIred - Your AI Learning Journey Starts Here!";
pub const WELCOME_RECIPIENT_NAME: &str = "Future prepAIred User";
pub const WELCOME_GUIDE_FILENAME: &str = "prepAIred-Welcome-Guide.pdf";

const BENEFITS: [(&str, &str, &str); 4] = [
    ("🚀", "Early Access", "You'll be among the first to experience prepAIred"),
    ("📚", "Exclusive Content", "Special learning materials and resources"),
    ("💬", "Community Access", "Join our vibrant community of learners"),
    ("🎯", "Personalized AI", "Advanced AI tutoring tailored to your needs"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// How the welcome guide reaches the reader.
#[derive(Debug, Clone, Copy)]
pub enum GuideDelivery<'a> {
    Attached,
    Link(&'a Url),
}

pub fn primary_button(url: &str, label: &str) -> String {
    format!(
        r#"<a href="{url}" style="display:inline-block;margin:6px 8px;padding:12px 22px;background-color:#0066ff;color:#ffffff;text-decoration:none;border-radius:24px;font-weight:600;">{label}</a>"#
    )
}

pub fn welcome_email(guide: GuideDelivery<'_>) -> RenderedEmail {
    let (gift_html, gift_text) = match guide {
        GuideDelivery::Attached => (
            "As a token of our appreciation, we've attached a special resource that will help you get started with AI-powered learning. Check your email attachments!".to_string(),
            "We've attached a special resource to help you get started with AI-powered learning!".to_string(),
        ),
        GuideDelivery::Link(url) => (
            format!(
                "As a token of our appreciation, we've prepared a special resource to help you get started with AI-powered learning.</p><p style=\"margin:12px 0 0;\">{}",
                primary_button(url.as_str(), "Download your welcome guide")
            ),
            format!(
                "As a token of our appreciation, we've prepared special resources to help you get started with AI-powered learning.\nDownload your welcome guide: {url}"
            ),
        ),
    };

    let benefits_html: String = BENEFITS
        .iter()
        .map(|(icon, title, detail)| {
            format!(r#"<li style="margin:4px 0;">{icon} <strong>{title}</strong> - {detail}</li>"#)
        })
        .collect();
    let benefits_text: String = BENEFITS
        .iter()
        .map(|(icon, title, detail)| format!("• {icon} {title} - {detail}\n"))
        .collect();

    let body_html = format!(
        r#"<div style="margin:20px 0;padding:20px;border-radius:14px;background-color:#0066ff;color:#ffffff;text-align:center;">
        <h3 style="margin:0 0 8px;">🎁 Your Exclusive Welcome Gift</h3>
        <p style="margin:0;">{gift_html}</p>
      </div>
      <p style="margin:12px 0;color:#374151;">Here's what you can expect as we approach our launch on <strong>{LAUNCH_DATE}</strong>:</p>
      <ul style="margin:12px 0;color:#374151;padding-left:20px;">{benefits_html}</ul>
      <div style="text-align:center;margin:24px 0;">
        {reddit}{discord}
      </div>
      <p style="margin:12px 0;color:#374151;">We'll keep you updated with exclusive previews, behind-the-scenes content, and important launch updates. Stay tuned!</p>
      <p style="margin:12px 0;color:#374151;">Thank you for believing in our vision. Together, we're going to revolutionize how students learn and succeed! 🎓✨</p>
      <p style="margin:12px 0 0;color:#374151;">Best regards,<br><strong>The {BRAND_NAME} Team</strong><br><em>{TAGLINE}</em></p>"#,
        reddit = primary_button(REDDIT_URL, "Join Reddit Community"),
        discord = primary_button(DISCORD_URL, "Join Discord Server"),
    );

    let lead = format!(
        "Hi there! 👋 We're absolutely thrilled to have you on board! You've just secured your spot as one of the early adopters of <strong>{BRAND_NAME}</strong> - the revolutionary AI-powered learning platform crafted by top IIT graduates."
    );

    let html = wrap_email(
        "🎉 Welcome to the prepAIred Community!",
        &lead,
        &body_html,
        "you joined our waitlist. We respect your privacy and will never spam you",
    );

    let text = format!(
        "🎉 Welcome to {BRAND_NAME}!

Hi there! 👋

Thank you for joining our exclusive waitlist! You've just secured your spot as one of the early adopters of {BRAND_NAME} - the revolutionary AI-powered learning platform crafted by top IIT graduates.

🎁 Your Exclusive Welcome Gift
{gift_text}

Here's what you can expect as we approach our launch on {LAUNCH_DATE}:

{benefits_text}
Join our communities:
• Reddit: {REDDIT_URL}
• Discord: {DISCORD_URL}

We'll keep you updated with exclusive previews, behind-the-scenes content, and important launch updates. Stay tuned!

Thank you for believing in our vision. Together, we're going to revolutionize how students learn and succeed! 🎓✨

Best regards,
The {BRAND_NAME} Team
{TAGLINE}
"
    );

    RenderedEmail {
        subject: WELCOME_SUBJECT.to_string(),
        html,
        text,
    }
}

/// Minimal message for checking provider credentials by hand.
pub fn test_email() -> RenderedEmail {
    RenderedEmail {
        subject: format!("Test Email from {BRAND_NAME}"),
        html: "<p>This is a <strong>simple test email</strong> to verify SendGrid is working correctly.</p>".to_string(),
        text: "This is a simple test email to verify SendGrid is working correctly.".to_string(),
    }
}

pub fn wrap_email(headline: &str, lead: &str, body_html: &str, reason: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head><meta charset="utf-8"></head>
  <body style="background:#f9f9f9;margin:0;padding:24px;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;">
    <div style="max-width:600px;margin:0 auto;background:#ffffff;border:1px solid #e5e7eb;border-radius:20px;padding:40px;box-shadow:0 20px 40px rgba(0,0,0,0.1);line-height:1.6;">
      <div style="text-align:center;font-size:36px;font-weight:bold;color:#0066ff;">{brand}</div>
      <h2 style="margin:16px 0 8px;text-align:center;font-size:22px;color:#252627;">{headline}</h2>
      <p style="margin:0 0 12px;font-size:15px;color:#252627;">{lead}</p>
      {body_html}
      <div style="margin-top:32px;padding-top:16px;border-top:1px solid #e5e7eb;text-align:center;">
        <p style="margin:0 0 6px;font-size:13px;color:#6b7280;">{copyright}</p>
        <p style="margin:0;font-size:13px;color:#6b7280;">You're receiving this email because {reason}.</p>
      </div>
    </div>
  </body>
</html>
"#,
        brand = BRAND_NAME,
        headline = headline,
        lead = lead,
        body_html = body_html,
        copyright = COPYRIGHT,
        reason = reason,
    )
}
