//! Render stage: maps resolved tokens onto styled text runs.

use crate::resolve::ResolvedToken;
use crate::text::{Emphasis, StyledText, TextRun};

/// Concatenate resolved tokens into styled text, in list order.
pub fn render(tokens: Vec<ResolvedToken>) -> StyledText {
    let mut out = StyledText::new();
    for token in tokens {
        out.push(run_for(token));
    }
    out
}

fn run_for(token: ResolvedToken) -> TextRun {
    match token {
        ResolvedToken::PlainText(text) => TextRun::plain(text),
        ResolvedToken::ArtistLink {
            display_name, url, ..
        } => TextRun::plain(display_name).with_link(url).underlined(),
        ResolvedToken::LabelName(name) => TextRun::plain(name),
        ResolvedToken::ReleaseLink { title, url } | ResolvedToken::MasterLink { title, url } => {
            TextRun::plain(title).with_link(url).underlined()
        }
        ResolvedToken::Bold(text) => TextRun::plain(text).with_emphasis(Emphasis::Strong),
        ResolvedToken::Italic(text) => TextRun::plain(text).with_emphasis(Emphasis::Regular),
        ResolvedToken::Underline(text) => TextRun::plain(text).underlined(),
        ResolvedToken::UrlLink { url, content } => {
            let run = TextRun::plain(content).underlined();
            match url {
                Some(url) => run.with_link(url),
                None => run,
            }
        }
    }
}
