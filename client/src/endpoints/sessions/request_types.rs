use std::collections::BTreeMap;

use crate::{
    endpoints::prices::RecurringInterval,
    error::StripeError,
    form::{FormParams, FormValue},
};

use super::response_types::{BillingAddressCollection, Locale, Mode, PaymentMethodType, SubmitType};

/// Parameters for `POST /v1/checkout/sessions`.
///
/// The three parameters the API always requires are constructor arguments, so a
/// request missing one of them does not compile. The rest are optional and only
/// sent when set.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSessionParams {
    cancel_url: String,
    payment_method_types: Vec<PaymentMethodType>,
    success_url: String,
    billing_address_collection: Option<BillingAddressCollection>,
    client_reference_id: Option<String>,
    customer: Option<String>,
    customer_email: Option<String>,
    line_items: Option<Vec<SessionLineItem>>,
    locale: Option<Locale>,
    metadata: Option<BTreeMap<String, String>>,
    mode: Option<Mode>,
    payment_intent_data: Option<BTreeMap<String, FormValue>>,
    setup_intent_data: Option<BTreeMap<String, FormValue>>,
    shipping_address_collection: Option<Vec<String>>,
    submit_type: Option<SubmitType>,
    subscription_data: Option<BTreeMap<String, FormValue>>,
    expand: Option<Vec<String>>,
}

impl CreateSessionParams {
    pub fn new<C, S, I>(cancel_url: C, payment_method_types: I, success_url: S) -> Self
    where
        C: Into<String>,
        S: Into<String>,
        I: IntoIterator<Item = PaymentMethodType>,
    {
        Self {
            cancel_url: cancel_url.into(),
            payment_method_types: payment_method_types.into_iter().collect(),
            success_url: success_url.into(),
            billing_address_collection: None,
            client_reference_id: None,
            customer: None,
            customer_email: None,
            line_items: None,
            locale: None,
            metadata: None,
            mode: None,
            payment_intent_data: None,
            setup_intent_data: None,
            shipping_address_collection: None,
            submit_type: None,
            subscription_data: None,
            expand: None,
        }
    }

    pub fn billing_address_collection(mut self, value: BillingAddressCollection) -> Self {
        self.billing_address_collection = Some(value);
        self
    }

    /// Reference used to reconcile the session with your own systems.
    pub fn client_reference_id<S: Into<String>>(mut self, id: S) -> Self {
        self.client_reference_id = Some(id.into());
        self
    }

    pub fn customer<S: Into<String>>(mut self, customer: S) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn customer_email<S: Into<String>>(mut self, email: S) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Adds one line item; call repeatedly for several.
    pub fn line_item(mut self, item: SessionLineItem) -> Self {
        self.line_items.get_or_insert_with(Vec::new).push(item);
        self
    }

    pub fn line_items<I: IntoIterator<Item = SessionLineItem>>(mut self, items: I) -> Self {
        self.line_items
            .get_or_insert_with(Vec::new)
            .extend(items);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
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

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Free-form `payment_intent_data` hash, sent as `payment_intent_data[key]=...`.
    pub fn payment_intent_data(mut self, data: BTreeMap<String, FormValue>) -> Self {
        self.payment_intent_data = Some(data);
        self
    }

    pub fn setup_intent_data(mut self, data: BTreeMap<String, FormValue>) -> Self {
        self.setup_intent_data = Some(data);
        self
    }

    /// Two-letter country codes Checkout may collect a shipping address for.
    pub fn shipping_address_collection<I, S>(mut self, allowed_countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shipping_address_collection =
            Some(allowed_countries.into_iter().map(Into::into).collect());
        self
    }

    pub fn submit_type(mut self, submit_type: SubmitType) -> Self {
        self.submit_type = Some(submit_type);
        self
    }

    pub fn subscription_data(mut self, data: BTreeMap<String, FormValue>) -> Self {
        self.subscription_data = Some(data);
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
        let shipping = self.shipping_address_collection.map(|countries| {
            let mut map = BTreeMap::new();
            map.insert("allowed_countries".to_string(), FormValue::list(countries));
            FormValue::Map(map)
        });

        let mut params = FormParams::new();
        params
            .push("cancel_url", self.cancel_url)
            .push("payment_method_types", FormValue::list(self.payment_method_types))
            .push("success_url", self.success_url)
            .push_opt("billing_address_collection", self.billing_address_collection)
            .push_opt("client_reference_id", self.client_reference_id)
            .push_opt("customer", self.customer)
            .push_opt("customer_email", self.customer_email)
            .push_opt("line_items", self.line_items.map(FormValue::list))
            .push_opt("locale", self.locale)
            .push_opt("metadata", self.metadata)
            .push_opt("mode", self.mode)
            .push_opt("payment_intent_data", self.payment_intent_data.map(FormValue::Map))
            .push_opt("setup_intent_data", self.setup_intent_data.map(FormValue::Map))
            .push_opt("shipping_address_collection", shipping)
            .push_opt("submit_type", self.submit_type)
            .push_opt("subscription_data", self.subscription_data.map(FormValue::Map))
            .push_opt("expand", self.expand.map(FormValue::list));
        params.into_pairs()
    }
}

/// One entry of `line_items` when creating a session.
///
/// Either reference an existing `price` or describe one inline with `price_data`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionLineItem {
    pub price: Option<String>,
    pub price_data: Option<PriceData>,
    pub quantity: Option<u32>,
    pub description: Option<String>,
    pub tax_rates: Vec<String>,
    pub dynamic_tax_rates: Vec<String>,
}

impl SessionLineItem {
    /// Line item for an existing price.
    pub fn price<S: Into<String>>(price: S, quantity: u32) -> Self {
        Self {
            price: Some(price.into()),
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    /// Line item with an inline price.
    pub fn price_data(price_data: PriceData, quantity: u32) -> Self {
        Self {
            price_data: Some(price_data),
            quantity: Some(quantity),
            ..Default::default()
        }
    }
}

impl From<SessionLineItem> for FormValue {
    fn from(item: SessionLineItem) -> Self {
        let mut map = BTreeMap::new();
        if let Some(price) = item.price {
            map.insert("price".to_string(), price.into());
        }
        if let Some(price_data) = item.price_data {
            map.insert("price_data".to_string(), price_data.into());
        }
        if let Some(quantity) = item.quantity {
            map.insert("quantity".to_string(), quantity.into());
        }
        if let Some(description) = item.description {
            map.insert("description".to_string(), description.into());
        }
        if !item.tax_rates.is_empty() {
            map.insert("tax_rates".to_string(), FormValue::list(item.tax_rates));
        }
        if !item.dynamic_tax_rates.is_empty() {
            map.insert(
                "dynamic_tax_rates".to_string(),
                FormValue::list(item.dynamic_tax_rates),
            );
        }
        FormValue::Map(map)
    }
}

/// Inline price for a session line item.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceData {
    pub currency: String,
    /// ID of an existing product.
    pub product: String,
    pub unit_amount: Option<i64>,
    pub unit_amount_decimal: Option<String>,
    pub recurring: Option<(RecurringInterval, Option<u32>)>,
}

impl PriceData {
    pub fn new<C: Into<String>, P: Into<String>>(currency: C, product: P, unit_amount: i64) -> Self {
        Self {
            currency: currency.into(),
            product: product.into(),
            unit_amount: Some(unit_amount),
            unit_amount_decimal: None,
            recurring: None,
        }
    }

    pub fn recurring(mut self, interval: RecurringInterval, interval_count: Option<u32>) -> Self {
        self.recurring = Some((interval, interval_count));
        self
    }
}

impl From<PriceData> for FormValue {
    fn from(data: PriceData) -> Self {
        let mut map = BTreeMap::new();
        map.insert("currency".to_string(), data.currency.into());
        map.insert("product".to_string(), data.product.into());
        if let Some(amount) = data.unit_amount {
            map.insert("unit_amount".to_string(), amount.into());
        }
        if let Some(amount) = data.unit_amount_decimal {
            map.insert("unit_amount_decimal".to_string(), amount.into());
        }
        if let Some((interval, count)) = data.recurring {
            let mut recurring = BTreeMap::new();
            recurring.insert("interval".to_string(), interval.into());
            if let Some(count) = count {
                recurring.insert("interval_count".to_string(), count.into());
            }
            map.insert("recurring".to_string(), FormValue::Map(recurring));
        }
        FormValue::Map(map)
    }
}
