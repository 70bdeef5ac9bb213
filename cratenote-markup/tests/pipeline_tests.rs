//! End-to-end pipeline tests: markup text in, styled runs out.

use std::collections::HashMap;

use async_trait::async_trait;
use cratenote_markup::{parse, parse_with_resolver, Emphasis, EntityResolver, ResolveError};

/// Fixed-table resolver for driving the async path without a network.
#[derive(Default)]
struct TableResolver {
    artists: HashMap<u64, String>,
    releases: HashMap<u64, String>,
    masters: HashMap<u64, String>,
}

impl TableResolver {
    fn with_artist(mut self, id: u64, name: &str) -> Self {
        self.artists.insert(id, name.to_string());
        self
    }

    fn with_release(mut self, id: u64, title: &str) -> Self {
        self.releases.insert(id, title.to_string());
        self
    }

    fn with_master(mut self, id: u64, title: &str) -> Self {
        self.masters.insert(id, title.to_string());
        self
    }
}

#[async_trait]
impl EntityResolver for TableResolver {
    async fn resolve_artist(&self, id: u64) -> Result<String, ResolveError> {
        self.artists.get(&id).cloned().ok_or(ResolveError::NotFound)
    }

    async fn resolve_release(&self, id: u64) -> Result<String, ResolveError> {
        self.releases.get(&id).cloned().ok_or(ResolveError::NotFound)
    }

    async fn resolve_master(&self, id: u64) -> Result<String, ResolveError> {
        self.masters.get(&id).cloned().ok_or(ResolveError::NotFound)
    }
}

#[test]
fn artist_by_name_links_to_search() {
    let styled = parse("[a=The Beatles]");
    assert_eq!(styled.text(), "The Beatles");

    let run = &styled.runs()[0];
    let link = run.link.as_ref().expect("artist run should carry a link");
    assert!(link.as_str().contains("type=artist"));
    assert!(link.as_str().contains("q=The+Beatles"));
    assert!(run.underline);
}

#[test]
fn empty_bold_pair_renders_empty_text() {
    assert_eq!(parse("[b][/b]").text(), "");
}

#[test]
fn id_without_resolver_is_skipped() {
    assert_eq!(parse("[r12345]").text(), "");
}

#[test]
fn orphaned_closer_is_skipped_keeping_surrounding_text() {
    assert_eq!(parse("text [/b] more").text(), "text  more");
}

#[test]
fn unterminated_url_renders_href_and_remaining_text() {
    let styled = parse("[url=https://x.com]orphaned");
    assert_eq!(styled.text(), "https://x.comorphaned");
    assert!(styled.runs()[0].is_plain());
}

#[test]
fn nested_same_type_markup_stays_literal() {
    let styled = parse("[b]outer [b]inner[/b] outer[/b]");
    assert_eq!(styled.text(), "outer [b]inner[/b] outer");
    assert_eq!(styled.runs().len(), 1);
    assert_eq!(styled.runs()[0].emphasis, Some(Emphasis::Strong));
}

#[test]
fn unmatched_bracket_degrades_to_literal_text() {
    assert_eq!(parse("abc[def").text(), "abc[def");
}

#[tokio::test]
async fn resolved_artist_uses_stripped_display_name_and_detail_page() {
    let resolver = TableResolver::default().with_artist(8390436, "Salamanda (8)");
    let styled = parse_with_resolver("[a8390436]", &resolver).await;

    assert_eq!(styled.text(), "Salamanda");
    let run = &styled.runs()[0];
    assert_eq!(
        run.link.as_ref().map(|u| u.as_str()),
        Some("https://www.discogs.com/artist/8390436")
    );
    assert!(run.underline);
}

#[tokio::test]
async fn unresolvable_id_disappears_from_output() {
    let resolver = TableResolver::default();
    let styled = parse_with_resolver("before [m42] after", &resolver).await;
    assert_eq!(styled.text(), "before  after");
}

#[tokio::test]
async fn mixed_bio_resolves_in_textual_order() {
    let resolver = TableResolver::default()
        .with_artist(1, "Salamanda (8)")
        .with_release(2, "Ashbalkum")
        .with_master(3, "Selected Ambient Works 85-92");

    let styled = parse_with_resolver(
        "[a1] released [r2], see also [m3] and [b]this[/b]",
        &resolver,
    )
    .await;

    assert_eq!(
        styled.text(),
        "Salamanda released Ashbalkum, see also Selected Ambient Works 85-92 and this"
    );

    let runs = styled.runs();
    assert_eq!(
        runs[0].link.as_ref().map(|u| u.as_str()),
        Some("https://www.discogs.com/artist/1")
    );
    assert_eq!(
        runs[2].link.as_ref().map(|u| u.as_str()),
        Some("https://www.discogs.com/release/2")
    );
    assert_eq!(
        runs[4].link.as_ref().map(|u| u.as_str()),
        Some("https://www.discogs.com/master/3")
    );
    assert_eq!(runs[6].emphasis, Some(Emphasis::Strong));
}

#[tokio::test]
async fn repeated_reference_renders_every_occurrence() {
    let resolver = TableResolver::default().with_artist(5, "Autechre");
    let styled = parse_with_resolver("[a5] and [a5]", &resolver).await;
    assert_eq!(styled.text(), "Autechre and Autechre");
}

#[tokio::test]
async fn sync_and_async_paths_agree_when_nothing_resolves() {
    let input = "plain [b]bold[/b] [l=Label] [r999]";
    let resolver = TableResolver::default();
    let sync = parse(input);
    let with_empty_resolver = parse_with_resolver(input, &resolver).await;
    assert_eq!(sync, with_empty_resolver);
}
