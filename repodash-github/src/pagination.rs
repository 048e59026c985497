//! `Link` header parsing
//!
//! GitHub paginates list endpoints with RFC 8288 link headers, e.g.
//! `<https://api.github.com/repositories/1/branches?per_page=1&page=2>; rel="next",
//!  <https://api.github.com/repositories/1/branches?per_page=1&page=17>; rel="last"`.
//! Requesting one item per page turns the last page number into a total count.

use url::Url;

/// Page number of the `rel="last"` link, if the header carries one
pub fn last_page_from_link(header: &str) -> Option<u32> {
    header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_last = parts.any(|param| {
            let param = param.trim();
            param == r#"rel="last""# || param == "rel=last"
        });
        if !is_last {
            return None;
        }

        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        let url = Url::parse(target).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
    })
}

/// Branch count from a `per_page=1` listing; a missing or unusable hint means 1
pub fn branch_count_from_link(header: Option<&str>) -> u32 {
    header.and_then(last_page_from_link).unwrap_or(1)
}
