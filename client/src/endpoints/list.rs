use serde::{Deserialize, Serialize};

use crate::{
    error::StripeError,
    form::{FormParams, FormValue},
};

/// One page of a list endpoint.
///
/// Pages are not followed automatically; pass the last item's id as
/// `starting_after` to fetch the next one while `has_more` is true.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct List<T> {
    /// Always `"list"`.
    pub object: String,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Filter and cursor parameters accepted by list endpoints.
///
/// The cursor keys every list endpoint understands are typed; filters specific to a
/// resource (`payment_intent`, `product`, ...) go through [`ListParams::extra`] and
/// are sent as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    limit: Option<u32>,
    starting_after: Option<String>,
    ending_before: Option<String>,
    expand: Vec<String>,
    extra: Vec<(String, FormValue)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page size, 1 to 100 on the API side.
    pub fn limit<T: Into<Option<u32>>>(mut self, limit: T) -> Self {
        self.limit = limit.into();
        self
    }

    pub fn starting_after<T: Into<String>>(mut self, id: T) -> Self {
        self.starting_after = Some(id.into());
        self
    }

    pub fn ending_before<T: Into<String>>(mut self, id: T) -> Self {
        self.ending_before = Some(id.into());
        self
    }

    pub fn expand<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds a resource-specific filter.
    pub fn extra<K: Into<String>, V: Into<FormValue>>(mut self, key: K, value: V) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    pub(crate) fn into_query(self) -> Result<Vec<(String, String)>, StripeError> {
        let mut params = FormParams::new();
        params
            .push_opt("limit", self.limit)
            .push_opt("starting_after", self.starting_after)
            .push_opt("ending_before", self.ending_before);
        if !self.expand.is_empty() {
            params.push("expand", FormValue::list(self.expand));
        }
        for (key, value) in self.extra {
            params.push(key, value);
        }
        params.into_pairs()
    }
}

/// Query for `expand[]` alone, as used by the retrieve endpoints.
pub(crate) fn expand_query<I, S>(expand: I) -> Result<Vec<(String, String)>, StripeError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let paths: Vec<String> = expand.into_iter().map(Into::into).collect();
    let mut params = FormParams::new();
    if !paths.is_empty() {
        params.push("expand", FormValue::list(paths));
    }
    params.into_pairs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_params_produce_no_query() {
        assert!(ListParams::new().into_query().unwrap().is_empty());
    }

    #[test]
    fn test_list_params_query() {
        let query = ListParams::new()
            .limit(5)
            .starting_after("cs_100")
            .expand(["data.line_items"])
            .extra("payment_intent", "pi_9")
            .into_query()
            .unwrap();
        assert_eq!(
            query,
            vec![
                ("limit".to_string(), "5".to_string()),
                ("starting_after".to_string(), "cs_100".to_string()),
                ("expand[]".to_string(), "data.line_items".to_string()),
                ("payment_intent".to_string(), "pi_9".to_string()),
            ]
        );
    }

    #[test]
    fn test_limit_accepts_none() {
        let query = ListParams::new().limit(5).limit(None).into_query().unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_list_defaults_when_fields_are_missing() {
        let page: List<serde_json::Value> = serde_json::from_str(r#"{"object":"list"}"#).unwrap();
        assert!(!page.has_more);
        assert!(page.data.is_empty());
        assert!(page.url.is_none());
    }

    #[test]
    fn test_list_requires_object_tag() {
        let result = serde_json::from_str::<List<serde_json::Value>>(r#"{"data":[]}"#);
        assert!(result.is_err());
    }
}
