//! Styled text runs produced by the render stage.
//!
//! A deliberately small attributed-text model: a sequence of runs, each
//! carrying an optional link, optional emphasis, and an underline flag.
//! Consumers map runs onto whatever rich-text representation their UI uses.

use url::Url;

/// Emphasis level for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    /// Italic presentation.
    Regular,
    /// Bold presentation.
    Strong,
}

/// One contiguous run of identically-styled text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub link: Option<Url>,
    pub emphasis: Option<Emphasis>,
    pub underline: bool,
}

impl TextRun {
    /// Run with no attributes.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
            emphasis: None,
            underline: false,
        }
    }

    pub fn with_link(mut self, url: Url) -> Self {
        self.link = Some(url);
        self
    }

    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = Some(emphasis);
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    /// True if the run carries no attributes.
    pub fn is_plain(&self) -> bool {
        self.link.is_none() && self.emphasis.is_none() && !self.underline
    }
}

/// An ordered sequence of styled runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyledText {
    runs: Vec<TextRun>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Concatenated text of all runs, attributes stripped.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_concatenates_runs_in_order() {
        let mut styled = StyledText::new();
        styled.push(TextRun::plain("Hello "));
        styled.push(TextRun::plain("World").with_emphasis(Emphasis::Strong));
        assert_eq!(styled.text(), "Hello World");
    }

    #[test]
    fn builders_set_attributes() {
        let url = Url::parse("https://www.discogs.com/artist/1").unwrap();
        let run = TextRun::plain("x").with_link(url.clone()).underlined();
        assert_eq!(run.link, Some(url));
        assert!(run.underline);
        assert!(run.emphasis.is_none());
        assert!(!run.is_plain());
        assert!(TextRun::plain("y").is_plain());
    }
}
