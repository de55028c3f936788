use serde::Serialize;

/// Declarative boolean filter tree in the GHL contact-search wire shape.
///
/// The tree is only ever constructed and serialized here; evaluation happens
/// server side.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum FilterNode {
	Group { group: Combinator, filters: Vec<FilterNode> },
	Leaf { field: String, operator: Operator, value: FilterValue },
}
impl FilterNode {
	pub fn and(filters: Vec<FilterNode>) -> Self {
		Self::Group { group: Combinator::And, filters }
	}

	pub fn or(filters: Vec<FilterNode>) -> Self {
		Self::Group { group: Combinator::Or, filters }
	}

	pub fn leaf(field: impl Into<String>, operator: Operator, value: FilterValue) -> Self {
		Self::Leaf { field: field.into(), operator, value }
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
	And,
	Or,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
	Eq,
	Contains,
	Range,
	Match,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
	Scalar(String),
	List(Vec<String>),
	Range(RangeBounds),
}
impl FilterValue {
	pub fn scalar(value: impl Into<String>) -> Self {
		Self::Scalar(value.into())
	}

	pub fn list<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::List(values.into_iter().map(Into::into).collect())
	}
}

/// Bounds for `Operator::Range` leaves. Unset bounds are omitted from the
/// serialized body.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RangeBounds {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gt: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gte: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub lt: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub lte: Option<f64>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serializes_group_and_leaf_wire_shape() {
		let node = FilterNode::or(vec![FilterNode::and(vec![FilterNode::leaf(
			"tags",
			Operator::Contains,
			FilterValue::list(["atc day 1"]),
		)])]);
		let json = serde_json::to_value(&node).expect("serialize failed");
		assert_eq!(
			json,
			serde_json::json!({
				"group": "OR",
				"filters": [{
					"group": "AND",
					"filters": [{
						"field": "tags",
						"operator": "contains",
						"value": ["atc day 1"],
					}],
				}],
			})
		);
	}

	#[test]
	fn range_bounds_omit_unset_sides() {
		let node = FilterNode::leaf(
			"customFields.TPtURWK4SpGRRn90jsXG",
			Operator::Range,
			FilterValue::Range(RangeBounds { gt: Some(1.0), ..Default::default() }),
		);
		let json = serde_json::to_value(&node).expect("serialize failed");
		assert_eq!(json["value"], serde_json::json!({ "gt": 1.0 }));
	}
}
