use scraper::Selector;

use super::{Field, PageScraper, ScraperState};

pub(super) const SEEK_ORIGIN: &str = "https://www.seek.com.au";

/// Fixed mapping from data-automation markers to semantic field names.
///
/// Markers on the page that do not appear here are ignored. The mapping is
/// owned by the Seek page layout and must be reproduced exactly.
const MARKER_FIELDS: [(&str, &str); 6] = [
    ("job-detail-title", "job"),
    ("advertiser-name", "company"),
    ("job-detail-classifications", "industry"),
    ("company-review", "review"),
    ("job-detail-apply", "job posting"),
    ("jobAdDetails", "description"),
];

fn field_name(marker: &str) -> Option<&'static str> {
    MARKER_FIELDS
        .iter()
        .find(|(m, _)| *m == marker)
        .map(|(_, name)| *name)
}

/// A scraper for Seek job listings
#[derive(Default)]
pub(super) struct SeekScraper;

impl PageScraper for SeekScraper {
    const NAME: &'static str = "seek";

    fn scrape(state: &ScraperState) -> Option<anyhow::Result<Vec<Field>>> {
        if !state.url.host_str()?.contains("seek.com.au") {
            return None;
        }
        let scraper = state.get_scraper();

        let mut fields = Vec::new();
        for el in scraper.select(&Selector::parse("[data-automation]").unwrap()) {
            let marker = el.value().attr("data-automation").unwrap_or_default();
            let Some(key) = field_name(marker) else {
                continue;
            };

            let value = if marker == "job-detail-apply" {
                // The apply link is relative, rebase it onto the site origin.
                let href = el.value().attr("href").unwrap_or_default();
                format!("{SEEK_ORIGIN}{href}")
            } else {
                el.text().collect()
            };

            fields.push(Field {
                key: key.to_string(),
                value,
            });
        }

        Some(Ok(fields))
    }
}
