//! Pulling the crossword payload out of a Guardian page.
//!
//! The page carries the puzzle as a JSON string in the `data-crossword-data`
//! attribute of the element whose class list contains `js-crossword`.

use once_cell::sync::Lazy;
use regex::Regex;

const CROSSWORD_CLASS: &str = "js-crossword";
const DATA_ATTRIBUTE: &str = "data-crossword-data";

/// An opening tag, with quoted attribute values allowed to contain `>`.
static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<[A-Za-z][A-Za-z0-9-]*(?:\s+[^\s=>"'/]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>"']+))?)*\s*/?>"#,
    )
    .unwrap()
});

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s=>"'/<]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+)))?"#).unwrap()
});

/// Returns the decoded `data-crossword-data` value of the first `js-crossword`
/// element in `html`.
pub fn crossword_data(html: &str) -> Option<String> {
    TAG.find_iter(html).find_map(|tag| {
        let attributes = attributes(tag.as_str());
        let is_crossword = attributes.iter().any(|(name, value)| {
            name.eq_ignore_ascii_case("class")
                && value.split_ascii_whitespace().any(|c| c == CROSSWORD_CLASS)
        });
        if !is_crossword {
            return None;
        }
        attributes
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(DATA_ATTRIBUTE))
            .map(|(_, value)| unescape_html(value))
    })
}

fn attributes(tag: &str) -> Vec<(&str, &str)> {
    // Skip the element name.
    let body = tag
        .trim_start_matches('<')
        .trim_end_matches('>')
        .trim_end_matches('/');
    let body = body
        .find(char::is_whitespace)
        .map_or("", |at| &body[at..]);

    ATTRIBUTE
        .captures_iter(body)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            Some((name, value))
        })
        .collect()
}

/// Decodes character references in an attribute value, named (the full
/// HTML5 table) and numeric alike.
pub fn unescape_html(value: &str) -> String {
    html_escape::decode_html_entities(value).into_owned()
}
