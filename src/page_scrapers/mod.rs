use chrono::{SecondsFormat, Utc};
use scraper::{Html, Selector};
use url::Url;

use crate::page_scrapers::seek::SeekScraper;

mod seek;


/// One extracted key/value pair destined for CSV output.
///
/// Keys are human readable semantic labels such as "job" or "company".
/// Insertion order is significant and is preserved all the way to serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field {
    pub(crate) key: String,
    pub(crate) value: String,
}


pub(super) fn scrape_page(state: &ScraperState) -> Option<anyhow::Result<Vec<Field>>> {
    let page_fields = match SeekScraper::scrape(state)? {
        Ok(fields) => fields,
        Err(e) => return Some(Err(e)),
    };
    tracing::debug!(
        scraper = SeekScraper::NAME,
        field_count = page_fields.len(),
        "scraped listing page"
    );

    // The timestamp field always comes first, ahead of everything found on the page.
    let mut fields = Vec::with_capacity(page_fields.len() + 1);
    fields.push(Field {
        key: "created-at".to_string(),
        value: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    fields.extend(page_fields);
    Some(Ok(fields))
}


pub(super) struct ScraperState {
    pub(super) html: String,
    pub(super) url: Url,
}


impl ScraperState {
    pub(super) fn get_scraper(&self) -> Html {
        Html::parse_document(&self.html)
    }

    /// Text of the first job ad details element, if the page has one.
    ///
    /// This is the single field the cover letter request is built from and it is
    /// read directly off the page, independently of [`scrape_page`].
    pub(super) fn job_ad_text(&self) -> Option<String> {
        let selector = Selector::parse("[data-automation=\"jobAdDetails\"]").unwrap();
        self.get_scraper()
            .select(&selector)
            .next()
            .map(|el| el.text().collect())
    }
}


pub(super) trait PageScraper {
    const NAME: &'static str;

    /// Scrapes the given html, which is retrieved from the given URL
    ///
    /// Returns None if this web scraper is not applicable to the given website.
    /// Returns Some(Err(_)) if the web scraper should have worked but failed for whatever reason.
    /// Returns Some(Ok(fields)) if the web scraper successfully collected fields from the page.
    ///
    /// The field list is allowed to be empty. A marker that is missing from the page
    /// simply contributes no field, it is never an error.
    fn scrape(state: &ScraperState) -> Option<anyhow::Result<Vec<Field>>>;
}
