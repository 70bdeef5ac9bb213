//! Scanner for the Discogs bracket-tag markup dialect.
//!
//! Splits raw text into a flat token list. The scanner is total: malformed
//! markup degrades to literal text or is skipped, it never errors. There is
//! no escaping mechanism in the dialect, matching the source service.

/// One classified unit of markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Literal text between tags.
    PlainText(String),
    /// `[a=Name]`: artist referenced by name.
    ArtistName(String),
    /// `[a123]`: artist referenced by numeric ID.
    ArtistId(u64),
    /// `[r123]` or `[r=123]`: release referenced by numeric ID.
    ReleaseId(u64),
    /// `[m123]` or `[m=123]`: master referenced by numeric ID.
    MasterId(u64),
    /// `[l=Name]`: label referenced by name.
    LabelName(String),
    /// `[b]...[/b]`. Content is raw and never re-tokenized.
    Bold(String),
    /// `[i]...[/i]`. Content is raw and never re-tokenized.
    Italic(String),
    /// `[u]...[/u]`. Content is raw and never re-tokenized.
    Underline(String),
    /// `[url=href]...[/url]`. Content is raw and never re-tokenized.
    Url { href: String, content: String },
}

/// Content-bearing tag kinds: tags that capture raw text up to a matching
/// closer instead of standing alone.
#[derive(Clone, Debug, PartialEq, Eq)]
enum SpanTag {
    Bold,
    Italic,
    Underline,
    Url(String),
}

impl SpanTag {
    /// Marker that opens another tag of the same kind, for depth tracking.
    fn open_marker(&self) -> &'static str {
        match self {
            SpanTag::Bold => "[b]",
            SpanTag::Italic => "[i]",
            SpanTag::Underline => "[u]",
            SpanTag::Url(_) => "[url=",
        }
    }

    fn close_marker(&self) -> &'static str {
        match self {
            SpanTag::Bold => "[/b]",
            SpanTag::Italic => "[/i]",
            SpanTag::Underline => "[/u]",
            SpanTag::Url(_) => "[/url]",
        }
    }

    fn into_token(self, content: String) -> Token {
        match self {
            SpanTag::Bold => Token::Bold(content),
            SpanTag::Italic => Token::Italic(content),
            SpanTag::Underline => Token::Underline(content),
            SpanTag::Url(href) => Token::Url { href, content },
        }
    }
}

/// Classification of one tag body (the text between `[` and `]`).
enum TagBody {
    /// Self-contained tag producing a token directly.
    Leaf(Token),
    /// Opens a content-bearing span that must find its closer.
    Span(SpanTag),
    /// Empty body, orphaned closer, or unknown tag.
    Skip,
}

/// Classify a tag body. Rule order matters: `a=` must win before the numeric
/// artist form so `[a=123]` reads as an artist *named* "123".
fn classify(body: &str) -> TagBody {
    if let Some(name) = body.strip_prefix("a=") {
        return TagBody::Leaf(Token::ArtistName(name.to_string()));
    }
    if let Some(id) = numeric_body(body, 'a') {
        return TagBody::Leaf(Token::ArtistId(id));
    }
    if let Some(id) = numeric_body(body, 'r') {
        return TagBody::Leaf(Token::ReleaseId(id));
    }
    if let Some(id) = numeric_body(body, 'm') {
        return TagBody::Leaf(Token::MasterId(id));
    }
    if let Some(name) = body.strip_prefix("l=") {
        return TagBody::Leaf(Token::LabelName(name.to_string()));
    }
    if let Some(href) = body.strip_prefix("url=") {
        return TagBody::Span(SpanTag::Url(href.to_string()));
    }
    match body {
        "b" => TagBody::Span(SpanTag::Bold),
        "i" => TagBody::Span(SpanTag::Italic),
        "u" => TagBody::Span(SpanTag::Underline),
        // Everything else drops out: `[]`, closers like `[/b]` with no
        // matching opener, and tag names this dialect does not know.
        _ => TagBody::Skip,
    }
}

/// Parse bodies of the form `r123` or `r=123`. The digit run must make up
/// the whole remainder, be pure ASCII digits, and fit in a `u64`; anything
/// else falls through to the unknown-tag rule.
fn numeric_body(body: &str, kind: char) -> Option<u64> {
    let rest = body.strip_prefix(kind)?;
    let digits = rest.strip_prefix('=').unwrap_or(rest);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Split `input` into tokens.
///
/// # Examples
///
/// ```
/// use cratenote_markup::scanner::{tokenize, Token};
///
/// let tokens = tokenize("by [a=Aphex Twin] on [l=Warp]");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::PlainText("by ".to_string()),
///         Token::ArtistName("Aphex Twin".to_string()),
///         Token::PlainText(" on ".to_string()),
///         Token::LabelName("Warp".to_string()),
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        let Some(open_rel) = rest.find('[') else {
            tokens.push(Token::PlainText(rest.to_string()));
            break;
        };

        if open_rel > 0 {
            tokens.push(Token::PlainText(rest[..open_rel].to_string()));
        }

        let tag_start = pos + open_rel;
        let body_start = tag_start + 1;
        let Some(close_rel) = input[body_start..].find(']') else {
            // Unmatched bracket: the rest of the input is literal text.
            tokens.push(Token::PlainText(input[tag_start..].to_string()));
            break;
        };

        let body = &input[body_start..body_start + close_rel];
        let after_tag = body_start + close_rel + 1;

        match classify(body) {
            TagBody::Leaf(token) => {
                tokens.push(token);
                pos = after_tag;
            }
            TagBody::Skip => {
                pos = after_tag;
            }
            TagBody::Span(tag) => match find_close(input, after_tag, &tag) {
                Some((content_end, resume)) => {
                    let content = input[after_tag..content_end].to_string();
                    tokens.push(tag.into_token(content));
                    pos = resume;
                }
                None => match tag {
                    // An unterminated [url=] swallows the rest of the input:
                    // the href and the trailing text both render literally.
                    SpanTag::Url(href) => {
                        let mut text = href;
                        text.push_str(&input[after_tag..]);
                        tokens.push(Token::PlainText(text));
                        break;
                    }
                    // Unterminated b/i/u openers are dropped as if absent.
                    _ => {
                        pos = after_tag;
                    }
                },
            },
        }
    }

    tokens
}

/// Find the closer matching an already-opened content-bearing tag.
///
/// Tracks nesting depth for openers of the same kind, so nested same-type
/// markup resolves to the outermost pair and everything in between stays
/// verbatim in the captured content. Returns the byte offset where the
/// content ends and the offset to resume scanning after the closer.
fn find_close(input: &str, from: usize, tag: &SpanTag) -> Option<(usize, usize)> {
    let open = tag.open_marker();
    let close = tag.close_marker();
    let mut depth = 1usize;
    let mut cursor = from;

    while let Some(rel) = input[cursor..].find('[') {
        let at = cursor + rel;
        if input[at..].starts_with(close) {
            depth -= 1;
            if depth == 0 {
                return Some((at, at + close.len()));
            }
            cursor = at + close.len();
        } else if input[at..].starts_with(open) {
            depth += 1;
            cursor = at + open.len();
        } else {
            cursor = at + 1;
        }
    }

    None
}
