//! `Link` header handling for page-numbered listing endpoints.

use reqwest::header::{HeaderMap, LINK};

/// Returns the page number of the `rel="next"` link, if there is one.
///
/// When the next link carries no `page` parameter the page after `current`
/// is assumed. A next link that does not move past `current` is ignored.
pub(crate) fn next_page(headers: &HeaderMap, current: u32) -> Option<u32> {
    let link = headers.get(LINK)?.to_str().ok()?;
    parse_next(link, current)
}

fn parse_next(link: &str, current: u32) -> Option<u32> {
    let next = link.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        let is_next = params
            .split(';')
            .any(|p| p.trim().eq_ignore_ascii_case(r#"rel="next""#));
        is_next.then(|| target.trim().trim_start_matches('<').trim_end_matches('>'))
    })?;

    let page: Option<u32> = next
        .split_once('?')
        .map(|(_, query)| query)
        .into_iter()
        .flat_map(|query| query.split('&'))
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|value| value.parse().ok());

    let page = page.unwrap_or_else(|| current.saturating_add(1));
    (page > current).then_some(page)
}
