//! Fluent filter/query builder.
//!
//! Accumulates filters, ordering, include-related fields, and pagination
//! into one flat query-parameter mapping. Each group uses its own key
//! namespace (`filter[...]`, `order[...]`, `with`, `limit`/`page`), so the
//! merge at build time cannot collide.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use amo_core::error::{AmoError, AmoResult};
use amo_core::time::datetime_to_timestamp;
use amo_core::validate;

/// Flat query-parameter mapping sent with list requests.
pub type QueryParams = BTreeMap<String, String>;

/// Filter comparison operators.
///
/// Equality is keyed as `filter[field]`; every other operator nests as
/// `filter[field][op]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    Like,
    NotLike,
}

impl FilterOperator {
    /// The operator segment used inside the filter key.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "eq",
            FilterOperator::NotEquals => "ne",
            FilterOperator::GreaterThan => "gt",
            FilterOperator::GreaterThanOrEqual => "gte",
            FilterOperator::LessThan => "lt",
            FilterOperator::LessThanOrEqual => "lte",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "not_in",
            FilterOperator::Like => "like",
            FilterOperator::NotLike => "not_like",
        }
    }
}

/// Sort direction for `order_by`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = AmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(AmoError::validation(format!(
                "sort direction must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// A filter value in its wire encoding.
///
/// Lists comma-join, datetimes become integer epoch seconds, booleans
/// become 1/0.
#[derive(Debug, Clone)]
pub enum FilterValue {
    Int(i64),
    Bool(bool),
    Text(String),
    List(Vec<String>),
    Timestamp(i64),
}

impl FilterValue {
    fn encode(self) -> String {
        match self {
            FilterValue::Int(v) => v.to_string(),
            FilterValue::Bool(v) => if v { "1" } else { "0" }.to_string(),
            FilterValue::Text(v) => v,
            FilterValue::List(items) => items.join(","),
            FilterValue::Timestamp(ts) => ts.to_string(),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        FilterValue::Int(v.into())
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(v: DateTime<Utc>) -> Self {
        FilterValue::Timestamp(datetime_to_timestamp(v))
    }
}

impl From<&[i64]> for FilterValue {
    fn from(v: &[i64]) -> Self {
        FilterValue::List(v.iter().map(|i| i.to_string()).collect())
    }
}

impl From<Vec<i64>> for FilterValue {
    fn from(v: Vec<i64>) -> Self {
        v.as_slice().into()
    }
}

impl From<Vec<i32>> for FilterValue {
    fn from(v: Vec<i32>) -> Self {
        FilterValue::List(v.iter().map(|i| i.to_string()).collect())
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        FilterValue::List(v)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(v: Vec<&str>) -> Self {
        FilterValue::List(v.iter().map(|s| s.to_string()).collect())
    }
}

/// Fluent accumulator for list-request query parameters.
///
/// ```
/// use amo_api::filter::{FilterBuilder, FilterOperator, SortDirection};
///
/// # fn main() -> amo_core::AmoResult<()> {
/// let params = FilterBuilder::new()
///     .add_filter("status_id", vec![1, 2], FilterOperator::In)
///     .order_by("created_at", SortDirection::Desc)
///     .limit(50)?
///     .build();
/// assert_eq!(params["filter[status_id][in]"], "1,2");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    filters: BTreeMap<String, String>,
    order: BTreeMap<String, String>,
    with_fields: Vec<String>,
    page_params: BTreeMap<String, String>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one filter entry.
    pub fn add_filter(
        mut self,
        field: &str,
        value: impl Into<FilterValue>,
        operator: FilterOperator,
    ) -> Self {
        let key = match operator {
            FilterOperator::Equals => format!("filter[{field}]"),
            op => format!("filter[{field}][{}]", op.as_str()),
        };
        self.filters.insert(key, value.into().encode());
        self
    }

    /// Filter by a single entity id.
    pub fn by_id(self, entity_id: i64) -> Self {
        self.add_filter("id", entity_id, FilterOperator::Equals)
    }

    /// Filter by a set of entity ids.
    pub fn by_ids(self, entity_ids: &[i64]) -> Self {
        self.add_filter("id", entity_ids, FilterOperator::In)
    }

    /// Filter by responsible user.
    pub fn by_responsible_user(self, user_id: i64) -> Self {
        self.add_filter("responsible_user_id", user_id, FilterOperator::Equals)
    }

    /// Filter leads by pipeline.
    pub fn by_pipeline(self, pipeline_id: i64) -> Self {
        self.add_filter("pipeline_id", pipeline_id, FilterOperator::Equals)
    }

    /// Filter leads by stage.
    pub fn by_status(self, status_id: i64) -> Self {
        self.add_filter("status_id", status_id, FilterOperator::Equals)
    }

    /// Filter by creation time range. Either bound may be open.
    pub fn created_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        if let Some(from) = from {
            self = self.add_filter("created_at", from, FilterOperator::GreaterThanOrEqual);
        }
        if let Some(to) = to {
            self = self.add_filter("created_at", to, FilterOperator::LessThanOrEqual);
        }
        self
    }

    /// Filter by update time range. Either bound may be open.
    pub fn updated_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        if let Some(from) = from {
            self = self.add_filter("updated_at", from, FilterOperator::GreaterThanOrEqual);
        }
        if let Some(to) = to {
            self = self.add_filter("updated_at", to, FilterOperator::LessThanOrEqual);
        }
        self
    }

    /// Record one sort key.
    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order
            .insert(format!("order[{field}]"), direction.as_str().to_string());
        self
    }

    /// Ask the server to include related data in the response.
    /// Repeated fields are kept once.
    pub fn with_field(mut self, field: &str) -> Self {
        if !self.with_fields.iter().any(|f| f == field) {
            self.with_fields.push(field.to_string());
        }
        self
    }

    /// Include linked contacts.
    pub fn with_contacts(self) -> Self {
        self.with_field("contacts")
    }

    /// Include linked companies.
    pub fn with_companies(self) -> Self {
        self.with_field("companies")
    }

    /// Include linked leads.
    pub fn with_leads(self) -> Self {
        self.with_field("leads")
    }

    /// Include linked catalog elements.
    pub fn with_catalog_elements(self) -> Self {
        self.with_field("catalog_elements")
    }

    /// Set the page size. The provider caps pages at 250 records; out of
    /// range values fail here rather than producing an invalid request.
    pub fn limit(mut self, limit: u32) -> AmoResult<Self> {
        validate::validate_limit(limit)?;
        self.page_params.insert("limit".into(), limit.to_string());
        Ok(self)
    }

    /// Set the page number (1-based).
    pub fn page(mut self, page: u32) -> AmoResult<Self> {
        validate::validate_page(page)?;
        self.page_params.insert("page".into(), page.to_string());
        Ok(self)
    }

    /// Merge the four groups into one flat parameter mapping.
    pub fn build(self) -> QueryParams {
        let mut params = QueryParams::new();
        params.extend(self.filters);
        params.extend(self.order);
        if !self.with_fields.is_empty() {
            params.insert("with".into(), self.with_fields.join(","));
        }
        params.extend(self.page_params);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_build_combined_groups() {
        let params = FilterBuilder::new()
            .add_filter("status_id", vec![1, 2], FilterOperator::In)
            .limit(50)
            .unwrap()
            .order_by("created_at", SortDirection::Desc)
            .build();

        let mut expected = QueryParams::new();
        expected.insert("filter[status_id][in]".into(), "1,2".into());
        expected.insert("limit".into(), "50".into());
        expected.insert("order[created_at]".into(), "desc".into());
        assert_eq!(params, expected);
    }

    #[test]
    fn test_equality_key_has_no_operator_segment() {
        let params = FilterBuilder::new()
            .add_filter("pipeline_id", 7, FilterOperator::Equals)
            .build();
        assert_eq!(params["filter[pipeline_id]"], "7");
    }

    #[test]
    fn test_datetime_value_encodes_as_epoch_seconds() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let params = FilterBuilder::new()
            .add_filter("created_at", dt, FilterOperator::GreaterThanOrEqual)
            .build();
        assert_eq!(params["filter[created_at][gte]"], "1704067200");
    }

    #[test]
    fn test_created_between_open_bounds() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let params = FilterBuilder::new().created_between(Some(from), None).build();
        assert!(params.contains_key("filter[created_at][gte]"));
        assert!(!params.contains_key("filter[created_at][lte]"));
    }

    #[test]
    fn test_limit_boundaries() {
        assert!(FilterBuilder::new().limit(0).is_err());
        assert!(FilterBuilder::new().limit(251).is_err());
        assert!(FilterBuilder::new().limit(1).is_ok());
        assert!(FilterBuilder::new().limit(250).is_ok());
    }

    #[test]
    fn test_page_must_be_positive() {
        assert!(FilterBuilder::new().page(0).is_err());
        let params = FilterBuilder::new().page(3).unwrap().build();
        assert_eq!(params["page"], "3");
    }

    #[test]
    fn test_with_fields_deduplicated_and_joined() {
        let params = FilterBuilder::new()
            .with_contacts()
            .with_companies()
            .with_contacts()
            .build();
        assert_eq!(params["with"], "contacts,companies");
    }

    #[test]
    fn test_sort_direction_parsing() {
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_bool_encodes_as_flag() {
        let params = FilterBuilder::new()
            .add_filter("is_deleted", true, FilterOperator::Equals)
            .build();
        assert_eq!(params["filter[is_deleted]"], "1");
    }

    #[test]
    fn test_by_ids_comma_joins() {
        let params = FilterBuilder::new().by_ids(&[5, 7]).build();
        assert_eq!(params["filter[id][in]"], "5,7");
    }
}
