//! Pipeline facade: scan, resolve, render.

use crate::render::render;
use crate::resolve::{resolve_references, skip_references, EntityResolver};
use crate::scanner::tokenize;
use crate::text::StyledText;

/// Render markup without entity resolution; numeric references are skipped.
pub fn parse(input: &str) -> StyledText {
    render(skip_references(tokenize(input)))
}

/// Render markup, resolving numeric references through `resolver`.
///
/// Never fails: references whose lookup errors simply disappear from the
/// output, everything else renders as usual.
pub async fn parse_with_resolver(input: &str, resolver: &dyn EntityResolver) -> StyledText {
    render(resolve_references(tokenize(input), resolver).await)
}
