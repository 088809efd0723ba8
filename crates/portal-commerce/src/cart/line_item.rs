//! Line item type and its wire format.

use serde::{Deserialize, Deserializer, Serialize};

use crate::cart::{identity_key_of, IdentityKey};

/// Smallest quantity a line may hold.
pub const MIN_QUANTITY: i64 = 1;

/// One product/option selection inside a cart.
///
/// `quantity` and `total_amount` are private: the total is always
/// `price * quantity` and is recomputed on every change, including when a
/// line is read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireLineItem")]
pub struct LineItem {
    /// Base product code.
    #[serde(rename = "itemCd")]
    pub item_code: String,
    /// Selected option code (empty = no option).
    #[serde(rename = "optCd")]
    pub option_code: String,
    /// Selected option value code (empty = no option).
    #[serde(rename = "optValCd")]
    pub option_value_code: String,
    /// Display name of the selected option value.
    #[serde(rename = "optValNm")]
    pub option_value_name: String,
    /// Product display name.
    #[serde(rename = "itemNm")]
    pub display_name: String,
    /// Supplier name.
    #[serde(rename = "compNm")]
    pub company_name: String,
    /// Unit label (e.g. "EA", "BOX").
    #[serde(rename = "unit", skip_serializing_if = "String::is_empty")]
    pub unit_label: String,
    /// Free-form specification text.
    pub spec: String,
    /// Product image path.
    #[serde(rename = "filePath", skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    price: i64,
    quantity: i64,
    #[serde(rename = "totalAmount")]
    total_amount: i64,
}

impl LineItem {
    /// Create a line for `item_code` with no option selected.
    ///
    /// Negative prices become 0 and quantities below 1 become 1.
    pub fn new(item_code: impl Into<String>, price: i64, quantity: i64) -> Self {
        let price = price.max(0);
        let quantity = quantity.max(MIN_QUANTITY);
        Self {
            item_code: item_code.into(),
            option_code: String::new(),
            option_value_code: String::new(),
            option_value_name: String::new(),
            display_name: String::new(),
            company_name: String::new(),
            unit_label: String::new(),
            spec: String::new(),
            image_path: None,
            price,
            quantity,
            total_amount: price.saturating_mul(quantity),
        }
    }

    /// Select an option.
    pub fn with_option(
        mut self,
        option_code: impl Into<String>,
        option_value_code: impl Into<String>,
    ) -> Self {
        self.option_code = option_code.into();
        self.option_value_code = option_value_code.into();
        self
    }

    /// Set the option value display name.
    pub fn with_option_name(mut self, name: impl Into<String>) -> Self {
        self.option_value_name = name.into();
        self
    }

    /// Set the product display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Set the supplier name.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company_name = company.into();
        self
    }

    /// Set the unit label.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit_label = unit.into();
        self
    }

    /// Set the specification text.
    pub fn with_spec(mut self, spec: impl Into<String>) -> Self {
        self.spec = spec.into();
        self
    }

    /// Set the image path.
    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Unit price in won.
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Quantity, always at least 1.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `price * quantity`.
    pub fn total_amount(&self) -> i64 {
        self.total_amount
    }

    /// The merge key of this line.
    pub fn identity_key(&self) -> IdentityKey {
        identity_key_of(self)
    }

    /// Set the quantity, clamping to [`MIN_QUANTITY`], and recompute the total.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity.max(MIN_QUANTITY);
        self.update_total();
    }

    /// Shift the quantity by `delta` with the same clamping as [`set_quantity`].
    ///
    /// [`set_quantity`]: LineItem::set_quantity
    pub fn adjust_quantity(&mut self, delta: i64) {
        self.set_quantity(self.quantity.saturating_add(delta));
    }

    /// Replace the unit price (resync from source data).
    pub fn set_price(&mut self, price: i64) {
        self.price = price.max(0);
        self.update_total();
    }

    fn update_total(&mut self) {
        self.total_amount = self.price.saturating_mul(self.quantity);
    }
}

/// What storage and the remote API actually hand us: every field optional,
/// numbers possibly null, strings or floats.
#[derive(Deserialize)]
struct WireLineItem {
    #[serde(rename = "itemCd", default, deserialize_with = "lenient_string")]
    item_code: String,
    #[serde(rename = "optCd", default, deserialize_with = "lenient_string")]
    option_code: String,
    #[serde(rename = "optValCd", default, deserialize_with = "lenient_string")]
    option_value_code: String,
    #[serde(rename = "optValNm", default, deserialize_with = "lenient_string")]
    option_value_name: String,
    #[serde(rename = "itemNm", default, deserialize_with = "lenient_string")]
    display_name: String,
    #[serde(rename = "compNm", default, deserialize_with = "lenient_string")]
    company_name: String,
    #[serde(rename = "unit", default, deserialize_with = "lenient_string")]
    unit_label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    spec: String,
    #[serde(rename = "filePath", default)]
    image_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    price: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    quantity: i64,
}

impl From<WireLineItem> for LineItem {
    fn from(w: WireLineItem) -> Self {
        let mut item = LineItem::new(w.item_code, w.price, w.quantity);
        item.option_code = w.option_code;
        item.option_value_code = w.option_value_code;
        item.option_value_name = w.option_value_name;
        item.display_name = w.display_name;
        item.company_name = w.company_name;
        item.unit_label = w.unit_label;
        item.spec = w.spec;
        item.image_path = w.image_path.filter(|p| !p.is_empty());
        item
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Integers, floats (rounded) and numeric strings; anything else is 0.
fn lenient_amount<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => {
            let s = s.trim().replace(',', "");
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.round() as i64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    })
}
