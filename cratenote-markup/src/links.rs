//! Discogs web URL builders for rendered links.
//!
//! These point at the public site, not the REST API: rendered links are for
//! a person to follow.

use url::Url;

const SITE_BASE_URL: &str = "https://www.discogs.com/";

fn site_base() -> Url {
    // The literal is static; a parse failure is a build-breaking typo.
    Url::parse(SITE_BASE_URL).expect("site base URL must parse")
}

/// Canonical artist detail page, e.g. `https://www.discogs.com/artist/8390436`.
pub fn artist_page(id: u64) -> Url {
    let mut url = site_base();
    url.set_path(&format!("artist/{id}"));
    url
}

/// Canonical release detail page.
pub fn release_page(id: u64) -> Url {
    let mut url = site_base();
    url.set_path(&format!("release/{id}"));
    url
}

/// Canonical master detail page.
pub fn master_page(id: u64) -> Url {
    let mut url = site_base();
    url.set_path(&format!("master/{id}"));
    url
}

/// Artist search query for by-name references, e.g.
/// `https://www.discogs.com/search/?q=The+Beatles&type=artist`.
pub fn artist_search(name: &str) -> Url {
    let mut url = site_base();
    url.set_path("search/");
    url.query_pairs_mut()
        .append_pair("q", name)
        .append_pair("type", "artist");
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_pages() {
        assert_eq!(
            artist_page(8390436).as_str(),
            "https://www.discogs.com/artist/8390436"
        );
        assert_eq!(
            release_page(249504).as_str(),
            "https://www.discogs.com/release/249504"
        );
        assert_eq!(
            master_page(96559).as_str(),
            "https://www.discogs.com/master/96559"
        );
    }

    #[test]
    fn search_query_is_encoded() {
        assert_eq!(
            artist_search("The Beatles").as_str(),
            "https://www.discogs.com/search/?q=The+Beatles&type=artist"
        );
        assert_eq!(
            artist_search("AC/DC").as_str(),
            "https://www.discogs.com/search/?q=AC%2FDC&type=artist"
        );
    }

    #[test]
    fn search_query_keeps_disambiguation_suffix() {
        // The query uses the name as given; display stripping happens later.
        assert_eq!(
            artist_search("Salamanda (8)").as_str(),
            "https://www.discogs.com/search/?q=Salamanda+%288%29&type=artist"
        );
    }
}
