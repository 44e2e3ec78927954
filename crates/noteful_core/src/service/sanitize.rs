//! HTML sanitizer applied to user text before it leaves the API.
//!
//! # Responsibility
//! - Neutralize executable markup (`<script>`, event handlers, script URLs).
//! - Keep a small set of harmless formatting tags intact.
//!
//! # Invariants
//! - Output of `sanitize` is a fixed point: `sanitize(sanitize(x)) == sanitize(x)`.
//! - Tags outside the whitelist are escaped, never silently dropped, so the
//!   visible text is preserved.
//! - The only raw `<` left in the output either opens a rebuilt whitelisted tag
//!   or is followed by whitespace (`a < b`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^<>"']|"[^"]*"|'[^']*')*)>"#)
        .expect("valid tag regex")
});
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("valid attribute regex")
});
static CHAR_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#[xX]([0-9A-Fa-f]+)|#([0-9]+)|([A-Za-z][A-Za-z0-9]*));?")
        .expect("valid character reference regex")
});

const SAFE_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Returns the attributes allowed on a whitelisted tag, `None` when the tag
/// itself is not allowed.
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["href", "title", "target"],
        "img" => &["src", "alt", "title", "width", "height"],
        "abbr" => &["title"],
        "b" | "i" | "u" | "s" | "em" | "strong" | "small" | "sub" | "sup" | "del" | "ins"
        | "mark" | "code" | "pre" | "kbd" | "p" | "br" | "hr" | "span" | "div" | "ul" | "ol"
        | "li" | "blockquote" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => &[],
        _ => return None,
    };
    Some(attrs)
}

/// Sanitizes one user-provided string for output.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        if let Some(caps) = TAG_RE.captures(rest) {
            out.push_str(&render_tag(&caps));
            rest = &rest[caps[0].len()..];
            continue;
        }

        // Unparseable markup (unclosed tag, stray quote, `<!--`, `<?`) is inert
        // only once its `<` is escaped.
        let before_space = rest[1..].starts_with(char::is_whitespace);
        out.push_str(if before_space { "<" } else { "&lt;" });
        rest = &rest[1..];
    }

    out.push_str(rest);
    out
}

fn render_tag(caps: &Captures<'_>) -> String {
    let closing = !caps[1].is_empty();
    let tag = caps[2].to_ascii_lowercase();
    match allowed_attributes(tag.as_str()) {
        Some(_) if closing => format!("</{tag}>"),
        Some(allowed) => rebuild_open_tag(tag.as_str(), &caps[3], allowed),
        None => escape_angle_brackets(&caps[0]),
    }
}

fn rebuild_open_tag(tag: &str, raw_attrs: &str, allowed: &[&str]) -> String {
    let self_closing = raw_attrs.trim_end().ends_with('/');
    let mut out = format!("<{tag}");

    for caps in ATTR_RE.captures_iter(raw_attrs) {
        let name = caps[1].to_ascii_lowercase();
        if !allowed.contains(&name.as_str()) {
            continue;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str());
        match value {
            Some(value) => {
                if matches!(name.as_str(), "href" | "src") && !is_safe_url(value) {
                    continue;
                }
                out.push(' ');
                out.push_str(&name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
            None => {
                out.push(' ');
                out.push_str(&name);
            }
        }
    }

    if self_closing {
        out.push_str(" />");
    } else {
        out.push('>');
    }
    out
}

/// Checks the scheme the browser will see, after character references are
/// decoded and whitespace is removed.
fn is_safe_url(value: &str) -> bool {
    let compact: String = decode_char_refs(value)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    let scheme_end = compact.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    let head = &compact[..scheme_end.unwrap_or(compact.len())];
    // An undecoded reference ahead of the scheme separator may still hide one.
    if head.contains('&') {
        return false;
    }
    match scheme_end {
        Some(index) if compact[index..].starts_with(':') => SAFE_URL_SCHEMES.contains(&head),
        _ => true,
    }
}

fn decode_char_refs(value: &str) -> String {
    CHAR_REF_RE
        .replace_all(value, |caps: &Captures<'_>| {
            let numeric = caps
                .get(1)
                .map(|hex| u32::from_str_radix(hex.as_str(), 16))
                .or_else(|| caps.get(2).map(|dec| dec.as_str().parse::<u32>()));
            if let Some(code) = numeric {
                return code
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
                    .to_string();
            }
            let decoded = match caps[3].to_ascii_lowercase().as_str() {
                "colon" => ":",
                "tab" => "\t",
                "newline" => "\n",
                "sol" => "/",
                "quest" => "?",
                "num" => "#",
                "period" => ".",
                "lpar" => "(",
                "rpar" => ")",
                "amp" => "&",
                _ => return caps[0].to_string(),
            };
            decoded.to_string()
        })
        .into_owned()
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_angle_brackets(value: &str) -> String {
    value.replace('<', "&lt;").replace('>', "&gt;")
}
