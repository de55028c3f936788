use serde_json::Value;

use pulse_domain::{
	CallFacts, DashboardProfile, SMS_COST_PER_MESSAGE, call_metrics, count_tags, message_cost,
	normalize_status,
};

fn tags(values: &[&str]) -> Vec<String> {
	values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn aggregate_output_covers_the_whole_universe() {
	let records = [tags(&["a", "a", "c"]), tags(&["b"])];
	let counts = count_tags(records.iter().map(Vec::as_slice), &["a", "b"]);

	assert_eq!(counts.len(), 2);
	assert_eq!(counts["a"], 2);
	assert_eq!(counts["b"], 1);
	assert!(!counts.contains_key("c"));
}

#[test]
fn aggregate_with_no_records_is_all_zeroes() {
	let counts = count_tags(std::iter::empty::<&[String]>(), &["atc day 1", "atc day 2"]);

	assert_eq!(counts.len(), 2);
	assert!(counts.values().all(|count| *count == 0));
}

#[test]
fn profile_selector_parsing_falls_back_to_default() {
	assert_eq!(
		DashboardProfile::from_selector(Some("reactivation-leads")),
		DashboardProfile::ReactivationLeads
	);
	assert_eq!(
		DashboardProfile::from_selector(Some("nonsense")),
		DashboardProfile::LendingTower
	);
	assert_eq!(DashboardProfile::from_selector(None), DashboardProfile::LendingTower);
}

#[test]
fn profile_universes_have_expected_cardinality() {
	assert_eq!(DashboardProfile::LendingTower.tags().len(), 13);
	assert_eq!(DashboardProfile::ReactivationPitchedDs.tags().len(), 14);
	assert_eq!(DashboardProfile::ReactivationLeads.tags().len(), 13);
	assert_eq!(DashboardProfile::LendingTower.tags()[0], "atc day 1");
	assert_eq!(DashboardProfile::ReactivationPitchedDs.tags()[0], "pitched ds atc day 1");
}

#[test]
fn lending_tower_filters_are_an_or_of_two_eq_arms() {
	let filters = DashboardProfile::LendingTower.build_filters();
	let json = serde_json::to_value(&filters).expect("serialize failed");

	let root = &json[0];
	assert_eq!(root["group"], "OR");
	let arms = root["filters"].as_array().expect("OR arms");
	assert_eq!(arms.len(), 2);

	for arm in arms {
		assert_eq!(arm["group"], "AND");
		let leaves = arm["filters"].as_array().expect("AND leaves");
		assert_eq!(leaves[0]["field"], "tags");
		assert_eq!(leaves[0]["operator"], "eq");
		assert_eq!(leaves[0]["value"].as_array().expect("tag list").len(), 13);
		assert_eq!(leaves[1]["field"], "customFields.lSLvJkqnLA3fUBEFAfCz");
		assert_eq!(leaves[1]["operator"], "eq");
	}

	let enrollments: Vec<&Value> = arms.iter().map(|arm| &arm["filters"][1]["value"]).collect();
	assert_eq!(enrollments[0], "LDR Enrolled");
	assert_eq!(enrollments[1], "ProLaw Enrolled");
}

#[test]
fn pitched_ds_filters_fan_out_over_rejection_values() {
	let filters = DashboardProfile::ReactivationPitchedDs.build_filters();
	let json = serde_json::to_value(&filters).expect("serialize failed");

	let arms = json[0]["filters"].as_array().expect("OR arms");
	assert_eq!(arms.len(), 5);

	for arm in arms {
		let leaves = arm["filters"].as_array().expect("AND leaves");
		assert_eq!(leaves.len(), 3);
		assert_eq!(leaves[0]["operator"], "contains");
		assert_eq!(leaves[1]["field"], "customFields.6fEKNMYWRgQiaZFPfQwT");
		assert_eq!(leaves[1]["value"], "Pitched DS Reactivation Lead");
	}

	assert_eq!(arms[0]["filters"][2]["value"], "Rejected (Pitched DS");
	assert_eq!(arms[4]["filters"][2]["value"], "AP (FU) 15+ Days");
}

#[test]
fn reactivation_leads_filters_keep_the_observed_leaf_order() {
	let filters = DashboardProfile::ReactivationLeads.build_filters();
	let json = serde_json::to_value(&filters).expect("serialize failed");

	let arms = json[0]["filters"].as_array().expect("OR arms");
	assert_eq!(arms.len(), 2);

	for arm in arms {
		let leaves = arm["filters"].as_array().expect("AND leaves");
		assert_eq!(leaves.len(), 3);
		assert_eq!(leaves[0]["field"], "tags");
		assert_eq!(leaves[0]["operator"], "contains");
	}

	// The two arms order their classification leaves differently on the wire.
	let first = arms[0]["filters"].as_array().expect("AND leaves");
	assert_eq!(first[1]["field"], "customFields.6fEKNMYWRgQiaZFPfQwT");
	assert_eq!(first[1]["value"], "Reactivation Lead");
	assert_eq!(first[2]["value"], "LDR Enrolled");

	let second = arms[1]["filters"].as_array().expect("AND leaves");
	assert_eq!(second[1]["field"], "customFields.lSLvJkqnLA3fUBEFAfCz");
	assert_eq!(second[1]["value"], "ProLaw Enrolled");
	assert_eq!(second[2]["value"], "Reactivation Lead");
}

#[test]
fn call_metrics_counts_directions_and_fallback_buckets() {
	let calls = [
		CallFacts {
			direction: Some("inbound"),
			call_status: Some("ended"),
			disconnection_reason: Some("user_hangup"),
		},
		CallFacts {
			direction: Some("outbound"),
			call_status: Some("ended"),
			disconnection_reason: None,
		},
		CallFacts { direction: None, call_status: None, disconnection_reason: Some("") },
	];
	let metrics = call_metrics(calls);

	assert_eq!(metrics.total_calls, 3);
	assert_eq!(metrics.inbound, 1);
	assert_eq!(metrics.outbound, 1);
	assert_eq!(metrics.by_status["ended"], 2);
	assert_eq!(metrics.by_status["sin_status"], 1);
	assert_eq!(metrics.by_disconnection_reason["user_hangup"], 1);
	assert_eq!(metrics.by_disconnection_reason["sin_razon"], 2);
}

#[test]
fn status_normalization_defaults_to_pending() {
	assert_eq!(normalize_status(Some("Delivered")), "delivered");
	assert_eq!(normalize_status(Some("  SENT ")), "sent");
	assert_eq!(normalize_status(Some("queued")), "pending");
	assert_eq!(normalize_status(None), "pending");
}

#[test]
fn message_cost_multiplies_the_filtered_count() {
	let statuses = [Some("delivered"), Some("Delivered"), Some("failed"), None];

	let all = message_cost(statuses, SMS_COST_PER_MESSAGE, None);
	assert_eq!(all.counted, 4);
	assert!((all.total - 4.0 * SMS_COST_PER_MESSAGE).abs() < f64::EPSILON);

	let delivered = message_cost(statuses, SMS_COST_PER_MESSAGE, Some("DELIVERED"));
	assert_eq!(delivered.counted, 2);

	// Absent status normalizes into the pending bucket.
	let pending = message_cost(statuses, SMS_COST_PER_MESSAGE, Some("pending"));
	assert_eq!(pending.counted, 1);
}
