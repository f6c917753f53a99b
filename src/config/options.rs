// src/config/options.rs
use serde::{Deserialize, Serialize};
use super::consts::*;

/// Widget configuration. All fields optional when deserialized from the
/// host page's JSON; immutable after construction except the product
/// override, which `recalculate` may replace.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub api_base_url: String,
    pub origin_postal_code: String,
    pub mount_point_id: String,
    pub product_data_override: Option<ProductData>,

    /// Unrecognized keys from the host page, kept for forward
    /// compatibility. Preserved but unused.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base_url: s!(DEFAULT_API_BASE_URL),
            origin_postal_code: s!(DEFAULT_ORIGIN_CEP),
            mount_point_id: s!(DEFAULT_MOUNT_ID),
            product_data_override: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Product attributes sent to the quote endpoint. Serializes with the
/// Shopify wire names (`weight` in kg, dimensions in cm).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductData {
    pub id: String,
    pub price: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    #[serde(rename = "width")]
    pub width_cm: f64,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "length")]
    pub length_cm: f64,
    pub quantity: u32,
}

impl Default for ProductData {
    fn default() -> Self {
        Self {
            id: s!("default"),
            price: 0.0,
            weight_kg: 0.3,
            width_cm: 10.0,
            height_cm: 5.0,
            length_cm: 15.0,
            quantity: 1,
        }
    }
}
