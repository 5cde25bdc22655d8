use etsy_stats_core::ListingRecord;

use crate::browser::{Browser, Element};
use crate::error::ScraperError;
use crate::scraper::read::{all_texts, first_element, non_blank, optional_text};
use crate::scraper::wait::Visibility;
use crate::scraper::EtsyScraper;
use crate::selectors::edit;
use crate::urls;

const CATEGORY_SEPARATOR: &str = " / ";

struct EditFields {
    tags: Vec<String>,
    category: String,
    shop_section: Option<String>,
    sku: Option<String>,
    listed_date: Option<String>,
    shipping_profile: Option<String>,
}

impl<B: Browser> EtsyScraper<'_, B> {
    pub(super) async fn edit_pass(&self, record: &mut ListingRecord) -> Result<(), ScraperError> {
        let url = urls::listing_edit(&record.id);
        self.navigate_and_wait(&url, edit::SHOP_SECTION, None).await?;
        self.wait_for_elements(edit::SHOP_SECTION, Visibility::Interactive, "shop section control")
            .await?;

        let browser = self.browser;
        let fields = self
            .read_with_retry(move || read_edit_fields(browser))
            .await?;

        record.tags = fields.tags;
        record.category = fields.category;
        record.shop_section = fields.shop_section;
        record.sku = fields.sku;
        record.listed_date = fields.listed_date;
        record.shipping_profile = fields.shipping_profile;

        tracing::debug!(listing_id = %record.id, tags = record.tags.len(), "edit pass complete");
        Ok(())
    }
}

async fn read_edit_fields<B: Browser>(browser: &B) -> Result<EditFields, ScraperError> {
    let tags = all_texts(browser, edit::TAG).await?;
    let category = all_texts(browser, edit::CATEGORY)
        .await?
        .join(CATEGORY_SEPARATOR);

    let select = first_element(browser, edit::SHOP_SECTION, "shop section control").await?;
    let shop_section = selected_option(&select).await?;

    let sku = match browser.find_all(edit::SKU_INPUT).await?.first() {
        Some(input) => input.attr("value").await?.as_deref().and_then(non_blank),
        None => None,
    };

    Ok(EditFields {
        tags,
        category,
        shop_section,
        sku,
        listed_date: optional_text(browser, edit::LISTED_DATE).await?,
        shipping_profile: optional_text(browser, edit::SHIPPING_PROFILE).await?,
    })
}

async fn selected_option<E: Element>(select: &E) -> Result<Option<String>, ScraperError> {
    for option in select.find_all(edit::SHOP_SECTION_OPTION).await? {
        if option.is_selected().await? {
            return Ok(non_blank(&option.text().await?));
        }
    }
    Ok(None)
}
