//! Flat text/image token scanner over WordprocessingML body markup.
//!
//! The body is never parsed as a tree. After namespace declarations are
//! stripped, two tag shapes are recognised regardless of prefix: text runs
//! (`<w:t>…</w:t>`) and image references (`<a:blip r:embed="…">`). Everything
//! else is skipped, which keeps the scanner indifferent to irregular nesting.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Token;

static NAMESPACE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s+xmlns(?::[\w.-]+)?\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("valid regex")
});

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)<(?:[\w.-]+:)?t(?:\s[^>]*[^/>])?\s*>(?P<text>.*?)</(?:[\w.-]+:)?t\s*>",
        r"|<(?:[\w.-]+:)?blip(?P<blip>(?:\s[^>]*)?)>",
    ))
    .expect("valid regex")
});

static EMBED_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)(?:[\w.-]+:)?embed\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Lazy, single-pass token sequence. Call [`tokenize`] again for a fresh one.
pub struct Tokens {
    text: String,
    pos: usize,
}

pub fn tokenize(raw: &[u8]) -> Tokens {
    let decoded = String::from_utf8_lossy(raw);
    Tokens {
        text: strip_namespace_decls(&decoded),
        pos: 0,
    }
}

pub(crate) fn strip_namespace_decls(markup: &str) -> String {
    NAMESPACE_DECL.replace_all(markup, "").into_owned()
}

impl Iterator for Tokens {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while let Some(caps) = TOKEN.captures_at(&self.text, self.pos) {
            self.pos = caps.get(0).map_or(self.text.len(), |m| m.end());

            if let Some(inner) = caps.name("text") {
                let text = run_text(inner.as_str());
                if !text.is_empty() {
                    return Some(Token::Text(text));
                }
                continue;
            }

            if let Some(attrs) = caps.name("blip") {
                match embed_id(attrs.as_str()) {
                    Some(rid) => return Some(Token::Image(rid.to_string())),
                    None => log::debug!("Dropping image reference without embed id at byte {}", self.pos),
                }
            }
        }
        self.pos = self.text.len();
        None
    }
}

impl std::iter::FusedIterator for Tokens {}

fn embed_id(attrs: &str) -> Option<&str> {
    let caps = EMBED_ATTR.captures(attrs)?;
    let id = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();
    (!id.is_empty()).then_some(id)
}

/// Inner text with markup stripped and entities decoded. Text with a
/// malformed or unknown entity is kept as written.
fn run_text(inner: &str) -> String {
    let plain = MARKUP.replace_all(inner, "");
    let plain = plain.trim();
    match quick_xml::escape::unescape(plain) {
        Ok(decoded) => decoded.trim().to_string(),
        Err(e) => {
            log::debug!("Keeping undecoded run text {plain:?}: {e}");
            plain.to_string()
        }
    }
}
