//! Flattening of typed parameters into bracket-notation form pairs.
//!
//! The API accepts nested parameters as flat keys:
//!
//! ```text
//! metadata[order_id]=6735
//! payment_method_types[]=card
//! line_items[0][price]=price_123
//! ```
//!
//! Routes describe the shape of every parameter by building a [`FormValue`];
//! [`FormParams::into_pairs`] turns the whole set into ordered `(key, value)`
//! pairs ready for a query string or an `application/x-www-form-urlencoded` body.

use std::collections::BTreeMap;

use crate::error::StripeError;

/// A parameter value. Closed over what the form encoding can express.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Bool(bool),
    /// Emitted as `key[sub]=...` for each entry, in key order.
    Map(BTreeMap<String, FormValue>),
    /// Emitted as `key[]=...` for scalars and `key[i][sub]=...` for maps.
    List(Vec<FormValue>),
}

impl FormValue {
    /// Builds a map value from string pairs, e.g. `metadata`.
    pub fn string_map<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        FormValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), FormValue::Text(v.into())))
                .collect(),
        )
    }

    /// Builds a list value from anything convertible into form values.
    pub fn list<T, I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FormValue>,
    {
        FormValue::List(items.into_iter().map(Into::into).collect())
    }

    fn scalar(&self) -> Result<Option<String>, StripeError> {
        match self {
            FormValue::Text(s) => Ok(Some(s.clone())),
            FormValue::Integer(i) => Ok(Some(i.to_string())),
            FormValue::Bool(b) => Ok(Some(b.to_string())),
            FormValue::Decimal(d) if d.is_finite() => Ok(Some(d.to_string())),
            FormValue::Decimal(d) => Err(StripeError::Encoding(format!(
                "non-finite number {d} cannot be form encoded"
            ))),
            FormValue::Map(_) | FormValue::List(_) => Ok(None),
        }
    }

    fn flatten_into(&self, key: &str, out: &mut Vec<(String, String)>) -> Result<(), StripeError> {
        if let Some(value) = self.scalar()? {
            out.push((key.to_string(), value));
            return Ok(());
        }
        match self {
            FormValue::Map(entries) => {
                for (sub, value) in entries {
                    if sub.is_empty() {
                        return Err(StripeError::Encoding(format!(
                            "empty key inside `{key}`"
                        )));
                    }
                    value.flatten_into(&format!("{key}[{sub}]"), out)?;
                }
            }
            FormValue::List(items) => {
                let maps = items
                    .iter()
                    .filter(|item| matches!(item, FormValue::Map(_)))
                    .count();
                if maps != 0 && maps != items.len() {
                    return Err(StripeError::Encoding(format!(
                        "`{key}` mixes scalars and objects"
                    )));
                }
                for (index, item) in items.iter().enumerate() {
                    match item {
                        FormValue::List(_) => {
                            return Err(StripeError::Encoding(format!(
                                "`{key}` contains a nested list"
                            )));
                        }
                        FormValue::Map(_) => {
                            item.flatten_into(&format!("{key}[{index}]"), out)?
                        }
                        _ => item.flatten_into(&format!("{key}[]"), out)?,
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Integer(value)
    }
}

impl From<u32> for FormValue {
    fn from(value: u32) -> Self {
        FormValue::Integer(i64::from(value))
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Decimal(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<BTreeMap<String, String>> for FormValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        FormValue::string_map(value)
    }
}

impl TryFrom<serde_json::Value> for FormValue {
    type Error = StripeError;

    /// Converts free-form JSON. `null` has no form representation and is rejected;
    /// leave the parameter out instead.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;
        match value {
            Value::Null => Err(StripeError::Encoding(
                "null cannot be form encoded, omit the parameter instead".to_string(),
            )),
            Value::Bool(b) => Ok(FormValue::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(FormValue::Integer(i)),
                None if n.is_f64() => n.as_f64().map(FormValue::Decimal).ok_or_else(|| {
                    StripeError::Encoding(format!("number {n} is out of range"))
                }),
                // Past i64; keep the exact digits.
                None => Ok(FormValue::Text(n.to_string())),
            },
            Value::String(s) => Ok(FormValue::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .map(FormValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(FormValue::List),
            Value::Object(entries) => entries
                .into_iter()
                .map(|(k, v)| FormValue::try_from(v).map(|v| (k, v)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(FormValue::Map),
        }
    }
}

/// Ordered set of top-level parameters for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormParams {
    entries: Vec<(String, FormValue)>,
}

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter that is always sent.
    pub fn push<K: Into<String>, V: Into<FormValue>>(&mut self, key: K, value: V) -> &mut Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Adds a parameter only when it is present. `None` leaves no trace in the payload.
    pub fn push_opt<K: Into<String>, V: Into<FormValue>>(
        &mut self,
        key: K,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattens every parameter into `(key, value)` pairs, preserving insertion order.
    pub fn into_pairs(self) -> Result<Vec<(String, String)>, StripeError> {
        let mut out = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            if key.is_empty() {
                return Err(StripeError::Encoding("empty parameter name".to_string()));
            }
            value.flatten_into(key, &mut out)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(params: FormParams) -> Vec<(String, String)> {
        params.into_pairs().unwrap()
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_scalars_render_as_plain_keys() {
        let mut params = FormParams::new();
        params
            .push("amount", 500i64)
            .push("currency", "usd")
            .push("active", false);
        assert_eq!(
            pairs(params),
            vec![
                pair("amount", "500"),
                pair("currency", "usd"),
                pair("active", "false")
            ]
        );
    }

    #[test]
    fn test_missing_optionals_are_omitted() {
        let mut params = FormParams::new();
        params
            .push_opt("customer", None::<String>)
            .push_opt("customer_email", Some("a@b.co"));
        let pairs = pairs(params);
        assert_eq!(pairs, vec![pair("customer_email", "a@b.co")]);
        assert!(!pairs.iter().any(|(k, _)| k == "customer"));
    }

    #[test]
    fn test_metadata_flattens_one_level_without_bare_key() {
        let mut params = FormParams::new();
        params.push("metadata", FormValue::string_map([("a", "1"), ("b", "2")]));
        assert_eq!(
            pairs(params),
            vec![pair("metadata[a]", "1"), pair("metadata[b]", "2")]
        );
    }

    #[test]
    fn test_scalar_lists_use_empty_brackets_in_order() {
        let mut params = FormParams::new();
        params.push("payment_method_types", FormValue::list(["card", "ideal"]));
        assert_eq!(
            pairs(params),
            vec![
                pair("payment_method_types[]", "card"),
                pair("payment_method_types[]", "ideal")
            ]
        );
    }

    #[test]
    fn test_lists_of_maps_are_indexed() {
        let mut first = BTreeMap::new();
        first.insert("price".to_string(), FormValue::from("price_1"));
        first.insert("quantity".to_string(), FormValue::from(2i64));
        let mut second = BTreeMap::new();
        second.insert("price".to_string(), FormValue::from("price_2"));
        second.insert(
            "tax_rates".to_string(),
            FormValue::list(["txr_1", "txr_2"]),
        );

        let mut params = FormParams::new();
        params.push(
            "line_items",
            FormValue::List(vec![FormValue::Map(first), FormValue::Map(second)]),
        );
        assert_eq!(
            pairs(params),
            vec![
                pair("line_items[0][price]", "price_1"),
                pair("line_items[0][quantity]", "2"),
                pair("line_items[1][price]", "price_2"),
                pair("line_items[1][tax_rates][]", "txr_1"),
                pair("line_items[1][tax_rates][]", "txr_2"),
            ]
        );
    }

    #[test]
    fn test_empty_collections_emit_nothing() {
        let mut params = FormParams::new();
        params
            .push("metadata", FormValue::Map(BTreeMap::new()))
            .push("expand", FormValue::List(Vec::new()));
        assert!(pairs(params).is_empty());
    }

    #[test]
    fn test_non_finite_decimal_is_an_encoding_error() {
        let mut params = FormParams::new();
        params.push("unit_amount_decimal", f64::NAN);
        assert!(matches!(
            params.into_pairs(),
            Err(StripeError::Encoding(_))
        ));
    }

    #[test]
    fn test_nested_list_is_an_encoding_error() {
        let mut params = FormParams::new();
        params.push(
            "expand",
            FormValue::List(vec![FormValue::list(["line_items"])]),
        );
        assert!(matches!(
            params.into_pairs(),
            Err(StripeError::Encoding(_))
        ));
    }

    #[test]
    fn test_empty_parameter_name_is_an_encoding_error() {
        let mut params = FormParams::new();
        params.push("", "value");
        assert!(matches!(
            params.into_pairs(),
            Err(StripeError::Encoding(_))
        ));

        let mut params = FormParams::new();
        params.push("metadata", FormValue::string_map([("", "x")]));
        assert!(matches!(
            params.into_pairs(),
            Err(StripeError::Encoding(_))
        ));
    }

    #[test]
    fn test_json_conversion() {
        let value = FormValue::try_from(json!({
            "capture_method": "manual",
            "metadata": {"order_id": 6735},
            "setup_future_usage": "off_session",
            "application_fee_amount": 12
        }))
        .unwrap();
        let mut params = FormParams::new();
        params.push("payment_intent_data", value);
        assert_eq!(
            pairs(params),
            vec![
                pair("payment_intent_data[application_fee_amount]", "12"),
                pair("payment_intent_data[capture_method]", "manual"),
                pair("payment_intent_data[metadata][order_id]", "6735"),
                pair("payment_intent_data[setup_future_usage]", "off_session"),
            ]
        );
    }

    #[test]
    fn test_json_integers_past_i64_keep_exact_digits() {
        let value = FormValue::try_from(json!(18446744073709551615u64)).unwrap();
        assert_eq!(value, FormValue::Text("18446744073709551615".to_string()));

        let mut params = FormParams::new();
        params.push("amount", value).push("rate", FormValue::try_from(json!(2.5)).unwrap());
        assert_eq!(
            pairs(params),
            vec![pair("amount", "18446744073709551615"), pair("rate", "2.5")]
        );
    }

    #[test]
    fn test_list_mixing_scalars_and_maps_is_an_encoding_error() {
        let mut params = FormParams::new();
        params.push(
            "line_items",
            FormValue::List(vec![
                FormValue::from("a"),
                FormValue::string_map([("x", "1")]),
            ]),
        );
        assert!(matches!(
            params.into_pairs(),
            Err(StripeError::Encoding(_))
        ));
    }

    #[test]
    fn test_is_empty_tracks_pushed_parameters() {
        let mut params = FormParams::new();
        assert!(params.is_empty());
        params.push_opt("customer", None::<String>);
        assert!(params.is_empty());
        params.push("customer", "cus_1");
        assert!(!params.is_empty());
    }

    #[test]
    fn test_json_null_is_rejected() {
        let result = FormValue::try_from(json!({"description": null}));
        assert!(matches!(result, Err(StripeError::Encoding(_))));
    }

    #[test]
    fn test_encoded_query_decodes_back_to_ordered_sequence() {
        let mut params = FormParams::new();
        params.push("payment_method_types", FormValue::list(["card", "ideal", "bacs_debit"]));
        let url =
            reqwest::Url::parse_with_params("https://api.example.com/v1/x", pairs(params)).unwrap();
        assert_eq!(
            url.query(),
            Some("payment_method_types%5B%5D=card&payment_method_types%5B%5D=ideal&payment_method_types%5B%5D=bacs_debit")
        );
        let decoded: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "payment_method_types[]")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(decoded, vec!["card", "ideal", "bacs_debit"]);
    }
}
