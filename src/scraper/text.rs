// text.rs
//! Small scanners over card text. Cards are matched on loose patterns
//! ("Sold for USD $12,000 on 6/1/23"), so a full parser would be overkill.

use scraper::{ElementRef, Selector};
use url::Url;

/// All text nodes of an element, joined by single spaces.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The first `href` under `element`, made absolute against `base`.
pub fn first_link(element: ElementRef<'_>, links: &Selector, base: &Url) -> Option<String> {
    element
        .select(links)
        .filter_map(|a| a.value().attr("href"))
        .find_map(|href| base.join(href).ok())
        .map(String::from)
}

pub fn starts_with_ci(bytes: &[u8], pos: usize, needle: &str) -> bool {
    bytes
        .get(pos..pos + needle.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Position after a run of whitespace, or `None` if there was none.
pub fn skip_required_ws(bytes: &[u8], pos: usize) -> Option<usize> {
    let end = skip_ws(bytes, pos);
    (end > pos).then_some(end)
}

pub fn skip_ws(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    pos
}

/// Between `min` and `max` ASCII digits starting at `pos`.
pub fn take_digits(bytes: &[u8], pos: usize, min: usize, max: usize) -> Option<(u32, usize)> {
    let mut end = pos;
    while end - pos < max && bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end - pos < min {
        return None;
    }
    let value = std::str::from_utf8(&bytes[pos..end]).ok()?.parse().ok()?;
    Some((value, end))
}

/// A digit followed by digits and thousands separators, e.g. `1,250,000`.
pub fn take_grouped_number(bytes: &[u8], pos: usize) -> Option<(String, usize)> {
    if !bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    let mut end = pos;
    while bytes
        .get(end)
        .is_some_and(|b| b.is_ascii_digit() || *b == b',')
    {
        end += 1;
    }
    let raw = std::str::from_utf8(&bytes[pos..end]).ok()?;
    Some((raw.replace(',', ""), end))
}
