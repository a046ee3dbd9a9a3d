use mailparse::{MailAddr, ParsedMail};

pub const PREVIEW_CHARS: usize = 140;

/// Collapse a body into one line of at most `max_chars` characters.
pub fn normalize_snippet(s: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(line);
        if out.chars().count() >= max_chars {
            break;
        }
    }
    out.chars().take(max_chars).collect()
}

/// Display name of the first sender in a decoded `From:` value, falling back
/// to the bare address, then to the raw value.
pub fn display_sender(from: &str) -> String {
    let first = mailparse::addrparse(from)
        .ok()
        .and_then(|list| list.iter().next().cloned());

    let name = match first {
        Some(MailAddr::Single(info)) => info.display_name.unwrap_or(info.addr),
        Some(MailAddr::Group(group)) => group.group_name,
        None => from.to_string(),
    };

    let name = name.trim().trim_matches('"').trim();
    if name.is_empty() {
        "(unknown)".to_string()
    } else {
        name.to_string()
    }
}

/// Best readable text of a message: first text/plain part, else the first
/// text/html part rendered to text.
pub fn body_text(p: &ParsedMail) -> Option<String> {
    find_part(p, "text/plain")
        .or_else(|| find_part(p, "text/html").map(|html| html_to_text(&html)))
}

fn find_part(p: &ParsedMail, mimetype: &str) -> Option<String> {
    if p.ctype.mimetype.eq_ignore_ascii_case(mimetype) {
        return p.get_body().ok();
    }
    p.subparts.iter().find_map(|sp| find_part(sp, mimetype))
}

fn html_to_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), 200).unwrap_or_else(|_| html.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_joins_lines_and_truncates() {
        let body = "Hello,\n\n  Are you coming   \nover this weekend?\n";
        assert_eq!(
            normalize_snippet(body, 140),
            "Hello, Are you coming over this weekend?"
        );
        assert_eq!(normalize_snippet(body, 5), "Hello");
    }

    #[test]
    fn sender_prefers_display_name() {
        assert_eq!(display_sender("GitHub <noreply@github.com>"), "GitHub");
        assert_eq!(display_sender("\"Mom\" <mom@example.com>"), "Mom");
        assert_eq!(display_sender("receipts@apple.com"), "receipts@apple.com");
        assert_eq!(display_sender(""), "(unknown)");
    }

    #[test]
    fn html_body_is_used_when_no_plain_part() {
        let raw = b"Content-Type: text/html\r\n\r\n<p>Thank you for your <b>purchase</b></p>\r\n";
        let parsed = mailparse::parse_mail(raw).unwrap();
        let text = body_text(&parsed).unwrap();
        assert!(text.contains("Thank you for your"));
        assert!(!text.contains("<p>"));
    }
}
