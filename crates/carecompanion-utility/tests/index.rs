use carecompanion_utility::index::{
    age_factor, breakdown, condition_factor, health_factor, utility_index, ConditionKeyword,
    Interpretation, MobilityAid, UtilityIndex, UtilityInputs,
};

fn inputs(age: i64, health: i64, mobility: &str, conditions: &str) -> UtilityInputs {
    UtilityInputs {
        age,
        self_rated_health: health,
        mobility_aid: MobilityAid::parse(mobility),
        chronic_conditions_text: conditions.to_string(),
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn age_factor_steps_at_decade_boundaries() {
    assert_eq!(age_factor(49), 1.00);
    assert_eq!(age_factor(50), 0.95);
    assert_eq!(age_factor(59), 0.95);
    assert_eq!(age_factor(60), 0.90);
    assert_eq!(age_factor(70), 0.85);
    assert_eq!(age_factor(79), 0.85);
    assert_eq!(age_factor(80), 0.80);
    assert_eq!(age_factor(104), 0.80);
}

#[test]
fn out_of_range_health_defaults_to_middle_value() {
    assert_eq!(health_factor(1), 0.30);
    assert_eq!(health_factor(5), 1.00);
    assert_eq!(health_factor(0), 0.70);
    assert_eq!(health_factor(6), 0.70);
    assert_eq!(health_factor(-3), 0.70);
}

#[test]
fn mobility_matches_known_categories_ignoring_case() {
    assert_eq!(MobilityAid::parse("None"), MobilityAid::None);
    assert_eq!(MobilityAid::parse("CANE"), MobilityAid::Cane);
    assert_eq!(MobilityAid::parse("Walking Stick"), MobilityAid::Cane);
    assert_eq!(MobilityAid::parse("walking-stick"), MobilityAid::Cane);
    assert_eq!(MobilityAid::parse(" walker "), MobilityAid::Walker);
    assert_eq!(MobilityAid::parse("Wheelchair"), MobilityAid::Wheelchair);

    let other = MobilityAid::parse("crutches");
    assert_eq!(other, MobilityAid::Unrecognized("crutches".to_string()));
    assert_eq!(other.factor(), 1.00);
}

#[test]
fn first_condition_keyword_in_priority_order_wins() {
    assert_eq!(
        ConditionKeyword::first_match("diabetes and hypertension"),
        Some(ConditionKeyword::Diabetes)
    );
    assert_eq!(
        ConditionKeyword::first_match("multiple, incl. heart disease"),
        Some(ConditionKeyword::HeartDisease)
    );
    assert_eq!(
        ConditionKeyword::first_match("Multiple conditions"),
        Some(ConditionKeyword::Multiple)
    );
    assert_eq!(ConditionKeyword::first_match("HYPERTENSION"), Some(ConditionKeyword::Hypertension));
    assert_eq!(ConditionKeyword::first_match("arthritis"), None);
    assert_eq!(condition_factor(""), 1.00);
}

#[test]
fn worked_example_uses_only_first_condition() {
    let breakdown = breakdown(&inputs(75, 3, "walker", "diabetes and hypertension"));

    assert_eq!(breakdown.age_factor, 0.85);
    assert_eq!(breakdown.health_factor, 0.70);
    assert_eq!(breakdown.mobility_factor, 0.90);
    assert_eq!(breakdown.condition_factor, 0.95);
    assert_eq!(breakdown.condition, Some(ConditionKeyword::Diabetes));
    assert!(approx(breakdown.index.value(), 0.85 * 0.70 * 0.90 * 0.95));
    assert!(approx(breakdown.index.value(), 0.508725));
}

#[test]
fn index_stays_in_unit_interval_for_every_category_combination() {
    let ages = [30, 55, 65, 75, 85];
    let mobility = ["none", "cane", "walker", "wheelchair", "something else"];
    let conditions = ["", "diabetes", "hypertension", "heart disease", "multiple"];

    for age in ages {
        for health in 0..=6 {
            for aid in mobility {
                for condition in conditions {
                    let value = utility_index(&inputs(age, health, aid, condition)).value();
                    assert!(value > 0.0 && value <= 1.0, "{age} {health} {aid} {condition} → {value}");
                }
            }
        }
    }
}

#[test]
fn healthiest_inputs_reach_exactly_one() {
    let index = utility_index(&inputs(40, 5, "none", "none reported"));
    assert_eq!(index.value(), 1.0);
    assert_eq!(index.interpretation(), Interpretation::Excellent);
}

#[test]
fn interpretation_thresholds_are_inclusive() {
    assert_eq!(Interpretation::of(0.9), Interpretation::Excellent);
    assert_eq!(Interpretation::of(0.8999), Interpretation::VeryGood);
    assert_eq!(Interpretation::of(0.8), Interpretation::VeryGood);
    assert_eq!(Interpretation::of(0.7), Interpretation::Good);
    assert_eq!(Interpretation::of(0.6), Interpretation::Moderate);
    assert_eq!(Interpretation::of(0.5), Interpretation::Poor);
    assert_eq!(Interpretation::of(0.4999), Interpretation::VeryPoor);
    assert_eq!(Interpretation::VeryGood.to_string(), "very good health state");
}

#[test]
fn stored_values_are_range_checked() {
    assert!(UtilityIndex::new(0.0).is_none());
    assert!(UtilityIndex::new(1.01).is_none());
    assert!(UtilityIndex::new(f64::NAN).is_none());
    assert_eq!(UtilityIndex::new(1.0).map(|i| i.value()), Some(1.0));
    assert_eq!(UtilityIndex::new(0.5089).map(|i| i.to_string()), Some("0.509".to_string()));
}

#[test]
fn deserialized_index_must_lie_in_unit_interval() {
    for bad in ["7.5", "0", "-0.2", "1.0000001"] {
        assert!(
            serde_json::from_str::<UtilityIndex>(bad).is_err(),
            "{bad} should be rejected"
        );
    }
    let index: UtilityIndex = serde_json::from_str("0.85").unwrap();
    assert_eq!(index.value(), 0.85);
    assert_eq!(serde_json::to_string(&index).unwrap(), "0.85");
}
