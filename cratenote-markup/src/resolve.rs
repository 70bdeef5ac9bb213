//! Resolution stage: replaces numeric entity references with names.
//!
//! Distinct (kind, ID) pairs are resolved concurrently through an
//! [`EntityResolver`]; each lookup succeeds or fails on its own, and a
//! failure only drops its own reference from the output. Output order is
//! always input order regardless of lookup completion order. Dropping the
//! returned future cancels any in-flight lookups.

use std::collections::{HashMap, HashSet};
use std::fmt;

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;
use url::Url;

use crate::display::strip_disambiguation_suffix;
use crate::links;
use crate::scanner::Token;

/// The kind of entity a numeric reference points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Artist,
    Release,
    Master,
}

impl EntityKind {
    /// Stable lowercase name, used in cache keys and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Artist => "artist",
            EntityKind::Release => "release",
            EntityKind::Master => "master",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single entity lookup produced no name.
///
/// The pipeline treats every variant identically (the reference is dropped);
/// the distinction exists for logging and for resolver implementations.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The service has no entity under this ID.
    #[error("entity not found")]
    NotFound,
    /// Transport-level failure reaching the lookup service.
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with an undecodable payload.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Capability for turning numeric Discogs IDs into display names.
///
/// Implementations are expected to be I/O-backed (web API, cache); the
/// pipeline only calls them for IDs that actually appear in the input.
#[async_trait]
pub trait EntityResolver: Send + Sync {
    async fn resolve_artist(&self, id: u64) -> Result<String, ResolveError>;
    async fn resolve_release(&self, id: u64) -> Result<String, ResolveError>;
    async fn resolve_master(&self, id: u64) -> Result<String, ResolveError>;
}

/// A token with external references replaced by looked-up names.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedToken {
    PlainText(String),
    /// Artist reference: full name, display name with any disambiguation
    /// suffix stripped, and the page or search URL to link to.
    ArtistLink {
        name: String,
        display_name: String,
        url: Url,
    },
    LabelName(String),
    ReleaseLink {
        title: String,
        url: Url,
    },
    MasterLink {
        title: String,
        url: Url,
    },
    Bold(String),
    Italic(String),
    Underline(String),
    /// `[url=]` reference; `url` is `None` when the href does not parse.
    UrlLink {
        url: Option<Url>,
        content: String,
    },
}

/// Resolve tokens without a resolver: every numeric reference is dropped.
pub fn skip_references(tokens: Vec<Token>) -> Vec<ResolvedToken> {
    project(tokens, &HashMap::new())
}

/// Resolve tokens against `resolver`.
///
/// Walks the list once to collect the distinct referenced IDs, resolves
/// them concurrently, then projects the original list in order.
pub async fn resolve_references(
    tokens: Vec<Token>,
    resolver: &dyn EntityResolver,
) -> Vec<ResolvedToken> {
    let wanted = collect_references(&tokens);

    let mut lookups = FuturesUnordered::new();
    for &(kind, id) in &wanted {
        lookups.push(async move {
            let result = match kind {
                EntityKind::Artist => resolver.resolve_artist(id).await,
                EntityKind::Release => resolver.resolve_release(id).await,
                EntityKind::Master => resolver.resolve_master(id).await,
            };
            ((kind, id), result)
        });
    }

    let mut resolved = HashMap::with_capacity(wanted.len());
    while let Some(((kind, id), result)) = lookups.next().await {
        match result {
            Ok(name) => {
                resolved.insert((kind, id), name);
            }
            Err(err) => {
                tracing::debug!(kind = kind.as_str(), id, %err, "dropping unresolved reference");
            }
        }
    }

    project(tokens, &resolved)
}

/// Distinct (kind, ID) pairs referenced by the token list.
fn collect_references(tokens: &[Token]) -> HashSet<(EntityKind, u64)> {
    let mut wanted = HashSet::new();
    for token in tokens {
        match *token {
            Token::ArtistId(id) => {
                wanted.insert((EntityKind::Artist, id));
            }
            Token::ReleaseId(id) => {
                wanted.insert((EntityKind::Release, id));
            }
            Token::MasterId(id) => {
                wanted.insert((EntityKind::Master, id));
            }
            _ => {}
        }
    }
    wanted
}

/// Map tokens onto resolved tokens in input order. Numeric references not
/// present in `resolved` produce nothing; every other token maps 1:1.
fn project(
    tokens: Vec<Token>,
    resolved: &HashMap<(EntityKind, u64), String>,
) -> Vec<ResolvedToken> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            Token::PlainText(text) => out.push(ResolvedToken::PlainText(text)),
            Token::ArtistName(name) => {
                let url = links::artist_search(&name);
                let display_name = strip_disambiguation_suffix(&name).to_string();
                out.push(ResolvedToken::ArtistLink {
                    name,
                    display_name,
                    url,
                });
            }
            Token::ArtistId(id) => {
                if let Some(name) = resolved.get(&(EntityKind::Artist, id)) {
                    out.push(ResolvedToken::ArtistLink {
                        name: name.clone(),
                        display_name: strip_disambiguation_suffix(name).to_string(),
                        url: links::artist_page(id),
                    });
                }
            }
            Token::ReleaseId(id) => {
                if let Some(title) = resolved.get(&(EntityKind::Release, id)) {
                    out.push(ResolvedToken::ReleaseLink {
                        title: title.clone(),
                        url: links::release_page(id),
                    });
                }
            }
            Token::MasterId(id) => {
                if let Some(title) = resolved.get(&(EntityKind::Master, id)) {
                    out.push(ResolvedToken::MasterLink {
                        title: title.clone(),
                        url: links::master_page(id),
                    });
                }
            }
            Token::LabelName(name) => out.push(ResolvedToken::LabelName(name)),
            Token::Bold(content) => out.push(ResolvedToken::Bold(content)),
            Token::Italic(content) => out.push(ResolvedToken::Italic(content)),
            Token::Underline(content) => out.push(ResolvedToken::Underline(content)),
            Token::Url { href, content } => {
                let url = Url::parse(&href).ok();
                out.push(ResolvedToken::UrlLink { url, content });
            }
        }
    }
    out
}
