//! Markup parsing for img-grab
//!
//! Extracts `<img src>` references from an HTML document.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Selector matching every image tag, at any depth
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("img").expect("Failed to create img selector")
});

/// Extracts the `src` of every `img` element in document order.
///
/// Tags without a `src`, or with an empty one, are skipped.
pub fn extract_image_refs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&IMG_SELECTOR)
        .filter_map(|element| element.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect()
}
