// src/scrape.rs
// Best-effort product data extraction from the host product page.
// Every lookup falls back silently to the ProductData defaults, so a page
// with none of the expected markup still yields a usable product.

use crate::config::options::ProductData;
use crate::core::html::{
    attr_value_ci, find_attr_value, has_class_token, inner_text, next_open_tag,
};

/// Build a ProductData from the surrounding page. Used only when the host
/// supplied no explicit override.
///
/// Lookup rules:
/// - price: first element with class `price`/`product-price` or a
///   `data-price` attribute; digits and the first decimal comma of its
///   text are parsed as a number.
/// - weight: first `data-weight` attribute; values above 50 are grams and
///   divided by 1000.
/// - dimensions: `data-width`/`data-height`/`data-length`, each optional.
pub fn scrape_product_data(page: &str) -> ProductData {
    let mut product = ProductData::default();

    if let Some(price) = scrape_price(page) {
        product.price = price;
    }

    if let Some(w) = find_attr_value(page, "data-weight").and_then(|v| parse_float_prefix(&v)) {
        // Values above 50 are assumed to be grams
        product.weight_kg = if w > 50.0 { w / 1000.0 } else { w };
    }

    if let Some(v) = find_attr_value(page, "data-width").and_then(|v| parse_float_prefix(&v)) {
        product.width_cm = v;
    }
    if let Some(v) = find_attr_value(page, "data-height").and_then(|v| parse_float_prefix(&v)) {
        product.height_cm = v;
    }
    if let Some(v) = find_attr_value(page, "data-length").and_then(|v| parse_float_prefix(&v)) {
        product.length_cm = v;
    }

    product
}

fn scrape_price(page: &str) -> Option<f64> {
    let mut pos = 0usize;
    while let Some((s, e)) = next_open_tag(page, pos) {
        let tag = &page[s..e];
        let data_price = attr_value_ci(tag, "data-price");
        let is_price_el = has_class_token(tag, "price")
            || has_class_token(tag, "product-price")
            || data_price.is_some();

        if is_price_el {
            // Text content wins; the data attribute is the fallback.
            let mut text = inner_text(page, s, e);
            if text.is_empty() {
                text = data_price.unwrap_or_default();
            }
            if text.is_empty() {
                text = s!("0");
            }
            return parse_money(&text);
        }
        pos = e;
    }
    None
}

/// Currency text → number, the way the original widget reads it:
/// keep digits and commas ("R$ 1.234,56" → "1234,56"), turn the first
/// comma into a decimal point, then take the longest numeric prefix.
fn parse_money(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    parse_float_prefix(&kept.replacen(',', ".", 1))
}

/// parseFloat-like: longest `[+-]?digits[.digits]` prefix, None when the
/// input does not start with a number.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut i = 0usize;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == int_start {
        return None;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    t[..i].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_yields_defaults() {
        let p = scrape_product_data("<html><body>nothing here</body></html>");
        assert_eq!(p, ProductData::default());
    }

    #[test]
    fn price_from_class_element_text() {
        let page = r#"<span class="product-price">R$ 1.234,56</span>"#;
        let p = scrape_product_data(page);
        assert_eq!(p.price, 1234.56);
    }

    #[test]
    fn price_from_data_attribute_when_text_empty() {
        let page = r#"<meta data-price="49,90"></meta>"#;
        let p = scrape_product_data(page);
        assert_eq!(p.price, 49.90);
    }

    #[test]
    fn first_price_bearing_element_wins() {
        let page = r#"
            <span class="price">R$ 10,00</span>
            <span class="product-price">R$ 99,99</span>
        "#;
        assert_eq!(scrape_product_data(page).price, 10.0);
    }

    #[test]
    fn non_numeric_price_keeps_default() {
        let page = r#"<span class="price">consulte</span>"#;
        assert_eq!(scrape_product_data(page).price, 0.0);
    }

    #[test]
    fn weight_above_fifty_is_grams() {
        let page = r#"<div data-weight="600"></div>"#;
        assert_eq!(scrape_product_data(page).weight_kg, 0.6);
    }

    #[test]
    fn weight_at_most_fifty_is_kilograms() {
        let page = r#"<div data-weight="5"></div>"#;
        assert_eq!(scrape_product_data(page).weight_kg, 5.0);
    }

    #[test]
    fn garbage_weight_keeps_default() {
        let page = r#"<div data-weight="heavy"></div>"#;
        assert_eq!(scrape_product_data(page).weight_kg, 0.3);
    }

    #[test]
    fn dimensions_override_independently() {
        let page = r#"<div data-width="20" data-length="abc"></div>"#;
        let p = scrape_product_data(page);
        assert_eq!(p.width_cm, 20.0);
        assert_eq!(p.height_cm, 5.0);
        assert_eq!(p.length_cm, 15.0);
    }

    #[test]
    fn full_product_page() {
        let page = r#"
            <div id="product">
              <h1>Caneca</h1>
              <span class="price">R$ 59,90</span>
              <div data-weight="300" data-width="12" data-height="10" data-length="12"></div>
            </div>
        "#;
        let p = scrape_product_data(page);
        assert_eq!(p.price, 59.90);
        assert_eq!(p.weight_kg, 0.3);
        assert_eq!(p.width_cm, 12.0);
        assert_eq!(p.height_cm, 10.0);
        assert_eq!(p.length_cm, 12.0);
        assert_eq!(p.quantity, 1);
        assert_eq!(p.id, "default");
    }

    #[test]
    fn money_parsing_mirrors_the_source_page_formats() {
        assert_eq!(parse_money("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_money("59,90"), Some(59.90));
        assert_eq!(parse_money("100"), Some(100.0));
        assert_eq!(parse_money("R$ --"), None);
    }
}
