use std::collections::BTreeMap;

use crate::{
    error::StripeError,
    form::{FormParams, FormValue},
};

use super::response_types::{
    BillingScheme, RecurringAggregateUsage, RecurringInterval, TierMode, TransformQuantityRound,
    UsageType,
};

/// Parameters for `POST /v1/prices`.
///
/// `currency` is the only field the API always requires, so it is the only
/// constructor argument; everything else is set through the builder methods.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePriceParams {
    currency: String,
    unit_amount: Option<i64>,
    unit_amount_decimal: Option<String>,
    product: Option<String>,
    active: Option<bool>,
    nickname: Option<String>,
    lookup_key: Option<String>,
    metadata: Option<BTreeMap<String, String>>,
    billing_scheme: Option<BillingScheme>,
    recurring: Option<RecurringParams>,
    tiers: Option<Vec<TierParams>>,
    tiers_mode: Option<TierMode>,
    transform_quantity: Option<TransformQuantityParams>,
    expand: Option<Vec<String>>,
}

impl CreatePriceParams {
    pub fn new<S: Into<String>>(currency: S) -> Self {
        Self {
            currency: currency.into(),
            unit_amount: None,
            unit_amount_decimal: None,
            product: None,
            active: None,
            nickname: None,
            lookup_key: None,
            metadata: None,
            billing_scheme: None,
            recurring: None,
            tiers: None,
            tiers_mode: None,
            transform_quantity: None,
            expand: None,
        }
    }

    pub fn unit_amount<T: Into<Option<i64>>>(mut self, unit_amount: T) -> Self {
        self.unit_amount = unit_amount.into();
        self
    }

    pub fn unit_amount_decimal<S: Into<String>>(mut self, unit_amount_decimal: S) -> Self {
        self.unit_amount_decimal = Some(unit_amount_decimal.into());
        self
    }

    pub fn product<S: Into<String>>(mut self, product: S) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn active<T: Into<Option<bool>>>(mut self, active: T) -> Self {
        self.active = active.into();
        self
    }

    pub fn nickname<S: Into<String>>(mut self, nickname: S) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn lookup_key<S: Into<String>>(mut self, lookup_key: S) -> Self {
        self.lookup_key = Some(lookup_key.into());
        self
    }

    pub fn metadata<K, V, I>(mut self, metadata: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.metadata = Some(
            metadata
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn billing_scheme(mut self, billing_scheme: BillingScheme) -> Self {
        self.billing_scheme = Some(billing_scheme);
        self
    }

    pub fn recurring(mut self, recurring: RecurringParams) -> Self {
        self.recurring = Some(recurring);
        self
    }

    pub fn tiers<I: IntoIterator<Item = TierParams>>(mut self, tiers: I) -> Self {
        self.tiers = Some(tiers.into_iter().collect());
        self
    }

    pub fn tiers_mode(mut self, tiers_mode: TierMode) -> Self {
        self.tiers_mode = Some(tiers_mode);
        self
    }

    pub fn transform_quantity(mut self, transform_quantity: TransformQuantityParams) -> Self {
        self.transform_quantity = Some(transform_quantity);
        self
    }

    pub fn expand<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    pub(crate) fn into_form(self) -> Result<Vec<(String, String)>, StripeError> {
        let mut params = FormParams::new();
        params
            .push("currency", self.currency)
            .push_opt("unit_amount", self.unit_amount)
            .push_opt("unit_amount_decimal", self.unit_amount_decimal)
            .push_opt("product", self.product)
            .push_opt("active", self.active)
            .push_opt("nickname", self.nickname)
            .push_opt("lookup_key", self.lookup_key)
            .push_opt("metadata", self.metadata)
            .push_opt("billing_scheme", self.billing_scheme)
            .push_opt("recurring", self.recurring)
            .push_opt("tiers", self.tiers.map(FormValue::list))
            .push_opt("tiers_mode", self.tiers_mode)
            .push_opt("transform_quantity", self.transform_quantity)
            .push_opt("expand", self.expand.map(FormValue::list));
        params.into_pairs()
    }
}

/// `recurring` hash of a price.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringParams {
    pub interval: RecurringInterval,
    pub interval_count: Option<u32>,
    pub aggregate_usage: Option<RecurringAggregateUsage>,
    pub usage_type: Option<UsageType>,
}

impl RecurringParams {
    pub fn new(interval: RecurringInterval) -> Self {
        Self {
            interval,
            interval_count: None,
            aggregate_usage: None,
            usage_type: None,
        }
    }

    pub fn interval_count(mut self, interval_count: u32) -> Self {
        self.interval_count = Some(interval_count);
        self
    }
}

impl From<RecurringParams> for FormValue {
    fn from(value: RecurringParams) -> Self {
        let mut map = BTreeMap::new();
        map.insert("interval".to_string(), value.interval.into());
        if let Some(count) = value.interval_count {
            map.insert("interval_count".to_string(), count.into());
        }
        if let Some(usage) = value.aggregate_usage {
            map.insert("aggregate_usage".to_string(), usage.into());
        }
        if let Some(usage_type) = value.usage_type {
            map.insert("usage_type".to_string(), usage_type.into());
        }
        FormValue::Map(map)
    }
}

/// One element of `tiers`. `up_to: None` is sent as `inf`, the open-ended last tier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TierParams {
    pub up_to: Option<i64>,
    pub flat_amount: Option<i64>,
    pub flat_amount_decimal: Option<String>,
    pub unit_amount: Option<i64>,
    pub unit_amount_decimal: Option<String>,
}

impl From<TierParams> for FormValue {
    fn from(value: TierParams) -> Self {
        let mut map = BTreeMap::new();
        map.insert(
            "up_to".to_string(),
            value
                .up_to
                .map(FormValue::from)
                .unwrap_or_else(|| FormValue::from("inf")),
        );
        if let Some(amount) = value.flat_amount {
            map.insert("flat_amount".to_string(), amount.into());
        }
        if let Some(amount) = value.flat_amount_decimal {
            map.insert("flat_amount_decimal".to_string(), amount.into());
        }
        if let Some(amount) = value.unit_amount {
            map.insert("unit_amount".to_string(), amount.into());
        }
        if let Some(amount) = value.unit_amount_decimal {
            map.insert("unit_amount_decimal".to_string(), amount.into());
        }
        FormValue::Map(map)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformQuantityParams {
    pub divide_by: i64,
    pub round: TransformQuantityRound,
}

impl From<TransformQuantityParams> for FormValue {
    fn from(value: TransformQuantityParams) -> Self {
        let mut map = BTreeMap::new();
        map.insert("divide_by".to_string(), value.divide_by.into());
        map.insert("round".to_string(), value.round.into());
        FormValue::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(form: &[(String, String)], key: &str, value: &str) -> bool {
        form.iter().any(|(k, v)| k == key && v == value)
    }

    #[test]
    fn test_minimal_price_sends_only_currency() {
        let form = CreatePriceParams::new("usd").into_form().unwrap();
        assert_eq!(form, vec![("currency".to_string(), "usd".to_string())]);
    }

    #[test]
    fn test_recurring_price_form() {
        let form = CreatePriceParams::new("eur")
            .unit_amount(1200)
            .product("prod_1")
            .recurring(RecurringParams::new(RecurringInterval::Month).interval_count(3))
            .metadata([("tier", "gold")])
            .into_form()
            .unwrap();
        assert!(has(&form, "currency", "eur"));
        assert!(has(&form, "unit_amount", "1200"));
        assert!(has(&form, "product", "prod_1"));
        assert!(has(&form, "recurring[interval]", "month"));
        assert!(has(&form, "recurring[interval_count]", "3"));
        assert!(has(&form, "metadata[tier]", "gold"));
        assert!(!form.iter().any(|(k, _)| k == "recurring" || k == "metadata"));
    }

    #[test]
    fn test_tiered_price_form() {
        let form = CreatePriceParams::new("usd")
            .billing_scheme(BillingScheme::Tiered)
            .tiers_mode(TierMode::Graduated)
            .tiers([
                TierParams {
                    up_to: Some(10),
                    unit_amount: Some(500),
                    ..Default::default()
                },
                TierParams {
                    unit_amount: Some(400),
                    ..Default::default()
                },
            ])
            .into_form()
            .unwrap();
        assert!(has(&form, "billing_scheme", "tiered"));
        assert!(has(&form, "tiers_mode", "graduated"));
        assert!(has(&form, "tiers[0][up_to]", "10"));
        assert!(has(&form, "tiers[0][unit_amount]", "500"));
        assert!(has(&form, "tiers[1][up_to]", "inf"));
        assert!(has(&form, "tiers[1][unit_amount]", "400"));
    }

    #[test]
    fn test_transform_quantity_form() {
        let form = CreatePriceParams::new("usd")
            .transform_quantity(TransformQuantityParams {
                divide_by: 1000,
                round: TransformQuantityRound::Up,
            })
            .into_form()
            .unwrap();
        assert!(has(&form, "transform_quantity[divide_by]", "1000"));
        assert!(has(&form, "transform_quantity[round]", "up"));
    }
}
