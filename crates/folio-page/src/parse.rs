//! Raw generator output to [`Page`]
//!
//! Generators answer with free text of the form `<Title> First sentence. Second sentence.`
//! The first `<...>` span (brackets included) is the title; everything after it
//! is split into sentences on `.` and into words on whitespace.

use crate::page::{Page, Sentence};

/// Parse raw generated text into a page
///
/// When `carried_title` is given (continuing an existing narrative) it replaces
/// whatever title the text carries, and the text is still cut after the first
/// `>` if there is one. Empty words and empty sentences are dropped.
#[must_use]
pub fn parse_page(text: &str, keywords: Vec<String>, carried_title: Option<&str>) -> Page {
    let open = text.find('<');
    let search_from = open.map_or(0, |i| i + 1);
    let close = text[search_from..].find('>').map(|i| i + search_from);

    let title = match (carried_title, open, close) {
        (Some(carried), _, _) => carried.to_string(),
        (None, Some(start), Some(end)) => text[start..=end].to_string(),
        _ => String::new(),
    };

    let body = close.map_or(text, |end| &text[end + 1..]);

    Page::new(title, split_sentences(body), keywords)
}

fn split_sentences(body: &str) -> Vec<Sentence> {
    body.split('.')
        .map(|line| {
            line.split_whitespace()
                .map(str::to_string)
                .collect::<Sentence>()
        })
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_includes_brackets() {
        let page = parse_page("<A Tale> Once upon a time.", vec![], None);
        assert_eq!(page.title(), "<A Tale>");
        assert_eq!(page.sentences(), &[vec!["Once", "upon", "a", "time"]]);
    }

    #[test]
    fn missing_title_keeps_whole_text() {
        let page = parse_page("No title here. Second one.", vec![], None);
        assert_eq!(page.title(), "");
        assert_eq!(page.sentence_count(), 2);
        assert_eq!(page.label(), "No title here");
    }

    #[test]
    fn carried_title_wins() {
        let page = parse_page("<Ignored> Next part.", vec![], Some("<Kept>"));
        assert_eq!(page.title(), "<Kept>");
        assert_eq!(page.label(), "Next part");
    }

    #[test]
    fn unclosed_bracket_yields_no_title() {
        let page = parse_page("<broken title. Body.", vec![], None);
        assert_eq!(page.title(), "");
        assert_eq!(page.sentence_count(), 2);
    }

    #[test]
    fn drops_empty_sentences_and_extra_spaces() {
        let page = parse_page("<T>  A   B.. C .", vec!["k".into()], None);
        assert_eq!(page.sentences(), &[vec!["A", "B"], vec!["C"]]);
        assert_eq!(page.keywords(), &["k"]);
    }

    #[test]
    fn empty_text_is_empty_page() {
        let page = parse_page("", vec![], None);
        assert!(page.is_empty());
        assert_eq!(page.title(), "");
    }
}
