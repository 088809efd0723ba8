//! Field access over flat records.

use crate::cart::LineItem;

/// A single field value as seen by sorting and filtering.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
    /// Absent or null.
    Missing,
}

impl FieldValue {
    /// Numeric view: numbers as-is, numeric strings parsed, anything else 0.
    pub fn as_number(&self) -> f64 {
        let n = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().replace(',', "").parse::<f64>().unwrap_or(0.0),
            FieldValue::Missing => 0.0,
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }

    /// Text view: strings as-is, integral numbers without a fraction,
    /// missing as the empty string.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Missing => String::new(),
        }
    }
}

/// Records whose fields can be looked up by name.
pub trait FieldAccess {
    /// Value of `key`, or [`FieldValue::Missing`].
    fn field(&self, key: &str) -> FieldValue;
}

impl<T: FieldAccess + ?Sized> FieldAccess for &T {
    fn field(&self, key: &str) -> FieldValue {
        (**self).field(key)
    }
}

impl FieldAccess for serde_json::Value {
    fn field(&self, key: &str) -> FieldValue {
        self.get(key).map_or(FieldValue::Missing, json_field)
    }
}

impl FieldAccess for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> FieldValue {
        self.get(key).map_or(FieldValue::Missing, json_field)
    }
}

fn json_field(value: &serde_json::Value) -> FieldValue {
    match value {
        serde_json::Value::Number(n) => n.as_f64().map_or(FieldValue::Missing, FieldValue::Number),
        serde_json::Value::String(s) => FieldValue::Text(s.clone()),
        serde_json::Value::Bool(b) => FieldValue::Text(b.to_string()),
        _ => FieldValue::Missing,
    }
}

/// Cart lines are addressed by their wire names.
impl FieldAccess for LineItem {
    fn field(&self, key: &str) -> FieldValue {
        let text = |s: &str| FieldValue::Text(s.to_string());
        match key {
            "itemCd" => text(&self.item_code),
            "optCd" => text(&self.option_code),
            "optValCd" => text(&self.option_value_code),
            "optValNm" => text(&self.option_value_name),
            "itemNm" => text(&self.display_name),
            "compNm" => text(&self.company_name),
            "unit" => text(&self.unit_label),
            "spec" => text(&self.spec),
            "filePath" => self.image_path.as_deref().map_or(FieldValue::Missing, text),
            "price" => FieldValue::Number(self.price() as f64),
            "quantity" => FieldValue::Number(self.quantity() as f64),
            "totalAmount" => FieldValue::Number(self.total_amount() as f64),
            _ => FieldValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_fields() {
        let row = json!({"itemCd": "A1", "closingQty": 12, "lotNo": null, "ok": true});
        assert_eq!(row.field("itemCd"), FieldValue::Text("A1".into()));
        assert_eq!(row.field("closingQty"), FieldValue::Number(12.0));
        assert_eq!(row.field("lotNo"), FieldValue::Missing);
        assert_eq!(row.field("absent"), FieldValue::Missing);
        assert_eq!(row.field("ok").as_text(), "true");
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(FieldValue::Missing.as_number(), 0.0);
        assert_eq!(FieldValue::Text("abc".into()).as_number(), 0.0);
        assert_eq!(FieldValue::Text(" 1,200 ".into()).as_number(), 1200.0);
        assert_eq!(FieldValue::Number(f64::NAN).as_number(), 0.0);
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(FieldValue::Number(42.0).as_text(), "42");
        assert_eq!(FieldValue::Number(1.5).as_text(), "1.5");
        assert_eq!(FieldValue::Missing.as_text(), "");
    }

    #[test]
    fn test_line_item_fields() {
        let item = LineItem::new("A1", 1000, 3).with_name("Widget");
        assert_eq!(item.field("itemNm").as_text(), "Widget");
        assert_eq!(item.field("totalAmount").as_number(), 3000.0);
        assert_eq!(item.field("filePath"), FieldValue::Missing);
    }
}
