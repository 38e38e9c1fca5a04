use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::endpoints::{list::List, prices::Price};

/// The [Checkout Session object](https://stripe.com/docs/api/checkout/sessions/object).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Session {
    /// Used to pass to `redirectToCheckout` in Stripe.js.
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    /// Total of all items before discounts or taxes.
    #[serde(default)]
    pub amount_subtotal: Option<i64>,
    /// Total of all items after discounts and taxes.
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub billing_address_collection: Option<BillingAddressCollection>,
    #[serde(default)]
    pub cancel_url: Option<String>,
    #[serde(default)]
    pub client_reference_id: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Customer ID. The customer object itself is never inlined here.
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Only present when `line_items` is expanded. `None` means "not requested",
    /// not "no items".
    #[serde(default)]
    pub line_items: Option<LineItemList>,
    #[serde(default)]
    pub livemode: Option<bool>,
    #[serde(default)]
    pub locale: Option<Locale>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub payment_method_types: Option<Vec<PaymentMethodType>>,
    #[serde(default)]
    pub setup_intent: Option<String>,
    #[serde(default)]
    pub shipping_address_collection: Option<ShippingAddressCollection>,
    /// Only meaningful for `payment` mode sessions.
    #[serde(default)]
    pub submit_type: Option<SubmitType>,
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub success_url: Option<String>,
    #[serde(default)]
    pub total_details: Option<TotalDetails>,
}

pub type SessionList = List<Session>;

/// A purchased item within a session.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: String,
    /// Always `"item"`.
    pub object: String,
    #[serde(default)]
    pub amount_subtotal: Option<i64>,
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Defaults to the product name.
    #[serde(default)]
    pub description: Option<String>,
    /// Only present when `discounts` is expanded.
    #[serde(default)]
    pub discounts: Option<Vec<LineItemDiscount>>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Only present when `taxes` is expanded.
    #[serde(default)]
    pub taxes: Option<Vec<LineItemTax>>,
}

pub type LineItemList = List<LineItem>;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LineItemDiscount {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub discount: Option<Discount>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LineItemTax {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub rate: Option<TaxRate>,
}

/// A coupon applied to a customer, subscription or session.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Discount {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub coupon: Option<Coupon>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub end: Option<i64>,
    #[serde(default)]
    pub promotion_code: Option<String>,
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub subscription: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Coupon {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub amount_off: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    /// `forever`, `once` or `repeating`.
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub duration_in_months: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub percent_off: Option<f64>,
    #[serde(default)]
    pub valid: Option<bool>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TaxRate {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub inclusive: Option<bool>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ShippingAddressCollection {
    /// Two-letter ISO country codes Checkout offers for shipping.
    #[serde(default)]
    pub allowed_countries: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TotalDetails {
    #[serde(default)]
    pub amount_discount: Option<i64>,
    #[serde(default)]
    pub amount_tax: Option<i64>,
    /// Only present when `total_details.breakdown` is expanded.
    #[serde(default)]
    pub breakdown: Option<TotalDetailsBreakdown>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TotalDetailsBreakdown {
    #[serde(default)]
    pub discounts: Option<Vec<LineItemDiscount>>,
    #[serde(default)]
    pub taxes: Option<Vec<LineItemTax>>,
}

wire_enum! {
    pub enum BillingAddressCollection {
        Auto => "auto",
        Required => "required",
    }
}

wire_enum! {
    /// IETF language tag of the locale Checkout is displayed in. `auto` uses the
    /// browser's locale.
    pub enum Locale {
        Auto => "auto",
        Bg => "bg",
        Cs => "cs",
        Da => "da",
        De => "de",
        El => "el",
        En => "en",
        EnGb => "en-GB",
        Es => "es",
        Es419 => "es-419",
        Et => "et",
        Fi => "fi",
        Fr => "fr",
        FrCa => "fr-CA",
        Hu => "hu",
        Id => "id",
        It => "it",
        Ja => "ja",
        Lt => "lt",
        Lv => "lv",
        Ms => "ms",
        Mt => "mt",
        Nb => "nb",
        Nl => "nl",
        Pl => "pl",
        Pt => "pt",
        PtBr => "pt-BR",
        Ro => "ro",
        Ru => "ru",
        Sk => "sk",
        Sl => "sl",
        Sv => "sv",
        Tr => "tr",
        Zh => "zh",
    }
}

wire_enum! {
    pub enum Mode {
        Payment => "payment",
        Setup => "setup",
        Subscription => "subscription",
    }
}

wire_enum! {
    pub enum PaymentMethodType {
        Card => "card",
        Ideal => "ideal",
        Fpx => "fpx",
        BacsDebit => "bacs_debit",
        Bancontact => "bancontact",
        Giropay => "giropay",
        P24 => "p24",
        Eps => "eps",
    }
}

wire_enum! {
    /// Customizes the submit button text. Only valid in `payment` mode.
    pub enum SubmitType {
        Auto => "auto",
        Book => "book",
        Donate => "donate",
        Pay => "pay",
    }
}
