//! Message content sanitization
//!
//! Strips all HTML from message content except a fixed allow-list of bare
//! inline tags. Attributes are never permitted; an allowed tag written with
//! attributes is stripped like any other tag. The scanner is quote-aware so
//! a `>` inside a quoted attribute value does not terminate the tag, and it
//! handles comments and unclosed tags at end of input.

/// Maximum message length in characters, measured on the sanitized form
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Inline tags that survive sanitization (bare form only, no attributes)
pub const ALLOWED_INLINE_TAGS: [&str; 5] = ["b", "i", "em", "strong", "u"];

/// Sanitize message content down to the inline-tag allow-list.
///
/// Idempotent: sanitizing already-sanitized content yields the same string.
/// Kept tags are normalized to lowercase so repeated passes are stable.
#[must_use]
pub fn sanitize_inline_html(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < len {
        if chars[i] != '<' {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        // HTML comment: drop everything through -->
        if i + 3 < len && chars[i + 1] == '!' && chars[i + 2] == '-' && chars[i + 3] == '-' {
            i += 4;
            let mut closed = false;
            while i + 2 < len {
                if chars[i] == '-' && chars[i + 1] == '-' && chars[i + 2] == '>' {
                    i += 3;
                    closed = true;
                    break;
                }
                i += 1;
            }
            if !closed {
                break;
            }
            continue;
        }

        // Consume the tag body up to the matching > (respecting quotes)
        let start = i + 1;
        let mut j = start;
        let mut in_single_quote = false;
        let mut in_double_quote = false;
        let mut tag_end = None;

        while j < len {
            match chars[j] {
                '"' if !in_single_quote => in_double_quote = !in_double_quote,
                '\'' if !in_double_quote => in_single_quote = !in_single_quote,
                '>' if !in_single_quote && !in_double_quote => {
                    tag_end = Some(j);
                    break;
                }
                _ => {}
            }
            j += 1;
        }

        // Unclosed tag at end of input: drop the remainder
        let Some(end) = tag_end else {
            break;
        };

        let body: String = chars[start..end].iter().collect();
        if let Some(tag) = allowed_tag(&body) {
            out.push_str(&tag);
        }
        i = end + 1;
    }

    out
}

/// Return the normalized form of an allowed bare tag, or None to strip it
fn allowed_tag(body: &str) -> Option<String> {
    let (closing, name) = match body.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, body),
    };

    let lower = name.to_ascii_lowercase();
    if !ALLOWED_INLINE_TAGS.contains(&lower.as_str()) {
        return None;
    }

    Some(if closing {
        format!("</{lower}>")
    } else {
        format!("<{lower}>")
    })
}
