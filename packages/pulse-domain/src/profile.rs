use crate::filter::{FilterNode, FilterValue, Operator};

/// Custom field holding the enrollment / pipeline outcome classification.
const ENROLLMENT_FIELD: &str = "customFields.lSLvJkqnLA3fUBEFAfCz";
/// Custom field holding the lead-type classification.
const LEAD_TYPE_FIELD: &str = "customFields.6fEKNMYWRgQiaZFPfQwT";

const LENDING_TOWER_TAGS: &[&str] = &[
	"atc day 1",
	"atc day 2",
	"atc day 3",
	"atc day 7",
	"atc day 17",
	"atc day 35",
	"atc day 48",
	"atc day 69",
	"atc day 90",
	"atc day 125",
	"atc day 167",
	"atc day 241",
	"atc day 331",
];

const PITCHED_DS_TAGS: &[&str] = &[
	"pitched ds atc day 1",
	"pitched ds atc day 3",
	"pitched ds atc day 5",
	"pitched ds atc day 7",
	"pitched ds atc day 10",
	"pitched ds atc day 14",
	"pitched ds atc day 18",
	"pitched ds atc day 22",
	"pitched ds atc day 28",
	"pitched ds atc day 37",
	"pitched ds atc day 42",
	"pitched ds atc day 49",
	"pitched ds atc day 56",
	"pitched ds atc day 63",
];

const PITCHED_DS_REJECTION_VALUES: &[&str] = &[
	"Rejected (Pitched DS",
	"Rejected (Attempting to Contact DS)",
	"Rejected (Approval Call Set DS)",
	"Rejected (Partial DS)",
	"AP (FU) 15+ Days",
];

/// A named aggregation profile. Each variant fixes the tag universe counted
/// by the conversions dashboard and the search-filter tree sent upstream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DashboardProfile {
	#[default]
	LendingTower,
	ReactivationPitchedDs,
	ReactivationLeads,
}
impl DashboardProfile {
	/// Parses the wire selector, falling back to the default profile when the
	/// selector is absent or unrecognized.
	pub fn from_selector(selector: Option<&str>) -> Self {
		match selector {
			Some("lending-tower") => Self::LendingTower,
			Some("reactivation-pitched-ds") => Self::ReactivationPitchedDs,
			Some("reactivation-leads") => Self::ReactivationLeads,
			_ => Self::default(),
		}
	}

	pub fn slug(&self) -> &'static str {
		match self {
			Self::LendingTower => "lending-tower",
			Self::ReactivationPitchedDs => "reactivation-pitched-ds",
			Self::ReactivationLeads => "reactivation-leads",
		}
	}

	/// The ordered category universe for this profile. Tags outside this list
	/// never appear in aggregate output.
	pub fn tags(&self) -> &'static [&'static str] {
		match self {
			Self::LendingTower | Self::ReactivationLeads => LENDING_TOWER_TAGS,
			Self::ReactivationPitchedDs => PITCHED_DS_TAGS,
		}
	}

	/// Builds the profile's filter tree. Pure and deterministic; the shape per
	/// profile is fixed.
	///
	/// The tag-membership operator differs between profiles on purpose: the
	/// lending-tower search was observed using `eq` against the tag list while
	/// the reactivation searches use `contains`. Both are preserved as
	/// observed until the upstream semantics are confirmed.
	pub fn build_filters(&self) -> Vec<FilterNode> {
		match self {
			Self::LendingTower => {
				let arms = ["LDR Enrolled", "ProLaw Enrolled"]
					.into_iter()
					.map(|enrollment| {
						FilterNode::and(vec![
							tag_leaf(self.tags(), Operator::Eq),
							eq_leaf(ENROLLMENT_FIELD, enrollment),
						])
					})
					.collect();

				vec![FilterNode::or(arms)]
			},
			Self::ReactivationPitchedDs => {
				let arms = PITCHED_DS_REJECTION_VALUES
					.iter()
					.map(|rejection| {
						FilterNode::and(vec![
							tag_leaf(self.tags(), Operator::Contains),
							eq_leaf(LEAD_TYPE_FIELD, "Pitched DS Reactivation Lead"),
							eq_leaf(ENROLLMENT_FIELD, *rejection),
						])
					})
					.collect();

				vec![FilterNode::or(arms)]
			},
			Self::ReactivationLeads => {
				// The two arms order their classification leaves differently
				// in the observed search bodies; kept verbatim so the
				// serialized request matches the known-good wire shape.
				let arms = vec![
					FilterNode::and(vec![
						tag_leaf(self.tags(), Operator::Contains),
						eq_leaf(LEAD_TYPE_FIELD, "Reactivation Lead"),
						eq_leaf(ENROLLMENT_FIELD, "LDR Enrolled"),
					]),
					FilterNode::and(vec![
						tag_leaf(self.tags(), Operator::Contains),
						eq_leaf(ENROLLMENT_FIELD, "ProLaw Enrolled"),
						eq_leaf(LEAD_TYPE_FIELD, "Reactivation Lead"),
					]),
				];

				vec![FilterNode::or(arms)]
			},
		}
	}
}

fn tag_leaf(tags: &[&str], operator: Operator) -> FilterNode {
	FilterNode::leaf("tags", operator, FilterValue::list(tags.iter().copied()))
}

fn eq_leaf(field: &str, value: &str) -> FilterNode {
	FilterNode::leaf(field, Operator::Eq, FilterValue::scalar(value))
}
