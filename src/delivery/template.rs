//! Subject lines and message bodies rendered from a submission.

use crate::domain::Submission;
use chrono::{DateTime, Local};

/// Subject used by the forms relay and the site endpoint.
pub fn site_subject(submission: &Submission) -> String {
    format!("Новая заявка с сайта DVE от {}", submission.name())
}

/// Subject used by the transactional APIs and the mailto fallback.
pub fn short_subject(submission: &Submission) -> String {
    format!("Новая заявка от {}", submission.name())
}

/// Plain-text body listing every field.
pub fn text_body(submission: &Submission) -> String {
    format!(
        "Имя: {}\nEmail: {}\nТелефон: {}\n\nСообщение:\n{}",
        submission.name(),
        submission.email(),
        submission.phone(),
        submission.message()
    )
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// HTML notification body. Every user value is escaped and message newlines
/// become `<br>`.
pub fn html_body(submission: &Submission, sent_at: DateTime<Local>) -> String {
    let field = |label: &str, value: &str| {
        format!(
            "            <div class=\"field\">\n                <div class=\"label\">{}</div>\n                <div class=\"value\">{}</div>\n            </div>\n",
            label, value
        )
    };

    let mut fields = String::new();
    fields.push_str(&field("Имя:", &escape_html(submission.name())));
    fields.push_str(&field("Email:", &escape_html(submission.email().as_str())));
    fields.push_str(&field("Телефон:", &escape_html(submission.phone().as_str())));
    fields.push_str(&field(
        "Сообщение:",
        &escape_html(submission.message()).replace('\n', "<br>"),
    ));

    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; background-color: #f9f6ef; }}
        .header {{ background-color: #142434; color: #fff; padding: 30px 20px; text-align: center; }}
        .content {{ background-color: #fff; padding: 30px; margin-top: 20px; }}
        .field {{ margin-bottom: 20px; padding-bottom: 20px; border-bottom: 1px solid #ebe3e0; }}
        .label {{ font-weight: bold; color: #142434; margin-bottom: 8px; }}
        .value {{ color: #666; }}
        .footer {{ text-align: center; margin-top: 30px; color: #999; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1 style="margin: 0;">DVE Estate</h1>
            <p style="margin: 10px 0 0 0; color: #c9ad98;">Новая заявка с сайта</p>
        </div>
        <div class="content">
{fields}        </div>
        <div class="footer">
            <p>Это автоматическое сообщение от формы обратной связи</p>
            <p>Дата: {date}</p>
        </div>
    </div>
</body>
</html>
"#,
        fields = fields,
        date = sent_at.format("%d.%m.%Y %H:%M:%S"),
    )
}
