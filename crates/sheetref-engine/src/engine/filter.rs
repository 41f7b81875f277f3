//! Per-column equality filters for basic-filter requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::column::column_to_offset;
use crate::error::Result;

/// One or many accepted literal values for a column.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValues {
    One(String),
    Many(Vec<String>),
}

impl FilterValues {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            FilterValues::One(value) => vec![value],
            FilterValues::Many(values) => values,
        }
    }
}

impl From<&str> for FilterValues {
    fn from(value: &str) -> Self {
        FilterValues::One(value.to_string())
    }
}

impl From<String> for FilterValues {
    fn from(value: String) -> Self {
        FilterValues::One(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for FilterValues {
    fn from(values: Vec<S>) -> Self {
        FilterValues::Many(values.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for FilterValues {
    fn from(values: [S; N]) -> Self {
        FilterValues::Many(values.into_iter().map(Into::into).collect())
    }
}

/// `{ "condition": { "type": "TEXT_EQ", "values": [...] } }`
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub condition: BooleanCondition,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BooleanCondition {
    #[serde(rename = "type")]
    pub kind: String,
    pub values: Vec<ConditionValue>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionValue {
    pub user_entered_value: String,
}

impl FilterCriterion {
    /// Match rows whose cell equals any of `values`.
    pub fn text_eq(values: impl IntoIterator<Item = String>) -> FilterCriterion {
        FilterCriterion {
            condition: BooleanCondition {
                kind: "TEXT_EQ".to_string(),
                values: values
                    .into_iter()
                    .map(|user_entered_value| ConditionValue { user_entered_value })
                    .collect(),
            },
        }
    }

    /// The literal values this criterion accepts.
    pub fn accepted(&self) -> Vec<&str> {
        self.condition
            .values
            .iter()
            .map(|v| v.user_entered_value.as_str())
            .collect()
    }
}

/// Criteria keyed by 0-based column index.
pub type FilterCriteria = BTreeMap<usize, FilterCriterion>;

/// Build criteria from `(column letters, values)` pairs.
///
/// Column names are letters (`"B"`), not header text. A bad column name
/// fails the whole build.
pub fn build_filter_criteria<I, K, V>(filters: I) -> Result<FilterCriteria>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<FilterValues>,
{
    let mut criteria = FilterCriteria::new();
    for (column, values) in filters {
        let index = column_to_offset(column.as_ref())?;
        criteria.insert(index, FilterCriterion::text_eq(values.into().into_vec()));
    }
    Ok(criteria)
}
