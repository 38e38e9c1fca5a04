use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::endpoints::list::List;

/// The [Price object](https://stripe.com/docs/api/prices/object).
///
/// `billing_scheme` decides which fields govern the amount: `per_unit` prices use
/// `unit_amount` / `unit_amount_decimal`, `tiered` prices use `tiers` and `tiers_mode`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Price {
    pub id: String,
    /// Always `"price"`.
    pub object: String,
    /// Unix timestamp, seconds.
    pub created: i64,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub billing_scheme: Option<BillingScheme>,
    /// Three-letter ISO code, lowercase.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub livemode: Option<bool>,
    #[serde(default)]
    pub lookup_key: Option<String>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(default)]
    pub nickname: Option<String>,
    /// ID of the product this price belongs to.
    #[serde(default)]
    pub product: Option<String>,
    /// Present only for recurring prices.
    #[serde(default)]
    pub recurring: Option<PriceRecurring>,
    /// Not included unless `tiers` is expanded.
    #[serde(default)]
    pub tiers: Option<Vec<PriceTier>>,
    #[serde(default)]
    pub tiers_mode: Option<TierMode>,
    #[serde(default)]
    pub transform_quantity: Option<TransformQuantity>,
    #[serde(rename = "type", default)]
    pub price_type: Option<PriceType>,
    /// Amount in the smallest currency unit.
    #[serde(default)]
    pub unit_amount: Option<i64>,
    /// Same as `unit_amount` as a decimal string with at most 12 decimal places.
    #[serde(default)]
    pub unit_amount_decimal: Option<String>,
}

pub type PriceList = List<Price>;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PriceRecurring {
    #[serde(default)]
    pub aggregate_usage: Option<RecurringAggregateUsage>,
    #[serde(default)]
    pub interval: Option<RecurringInterval>,
    /// Number of intervals between billings, `interval=month` with `3` bills quarterly.
    #[serde(default)]
    pub interval_count: Option<u32>,
    #[serde(default)]
    pub usage_type: Option<UsageType>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PriceTier {
    #[serde(default)]
    pub flat_amount: Option<i64>,
    #[serde(default)]
    pub flat_amount_decimal: Option<String>,
    #[serde(default)]
    pub unit_amount: Option<i64>,
    #[serde(default)]
    pub unit_amount_decimal: Option<String>,
    /// Upper bound of the tier, inclusive. `None` on the last tier.
    #[serde(default)]
    pub up_to: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TransformQuantity {
    #[serde(default)]
    pub divide_by: Option<i64>,
    #[serde(default)]
    pub round: Option<TransformQuantityRound>,
}

wire_enum! {
    pub enum PriceType {
        OneTime => "one_time",
        Recurring => "recurring",
    }
}

wire_enum! {
    pub enum BillingScheme {
        PerUnit => "per_unit",
        Tiered => "tiered",
    }
}

wire_enum! {
    /// `graduated` prices each unit at its tier; `volume` prices all units at the tier
    /// the total quantity falls into.
    pub enum TierMode {
        Graduated => "graduated",
        Volume => "volume",
    }
}

wire_enum! {
    pub enum RecurringAggregateUsage {
        Sum => "sum",
        LastDuringPeriod => "last_during_period",
        LastEver => "last_ever",
        Max => "max",
    }
}

wire_enum! {
    pub enum RecurringInterval {
        Day => "day",
        Week => "week",
        Month => "month",
        Year => "year",
    }
}

wire_enum! {
    pub enum UsageType {
        Licensed => "licensed",
        Metered => "metered",
    }
}

wire_enum! {
    pub enum TransformQuantityRound {
        Up => "up",
        Down => "down",
    }
}
