use super::*;

fn baseline_input() -> QuoteInput {
    QuoteInput {
        survey_type: "level2".to_string(),
        property_value: 250_000.0,
        bedrooms: 3,
        complexity: Some("standard".to_string()),
        distance_band_id: Some("within-10-miles".to_string()),
        ..QuoteInput::default()
    }
}

#[test]
fn baseline_quote_has_no_adjustments() {
    let breakdown = calculate_quote(&baseline_input()).expect("level2 is priced");

    assert_eq!(breakdown.survey.id, "level2");
    assert_eq!(breakdown.base.gross, 545.0);
    assert!(breakdown.adjustments.is_empty());
    assert!(breakdown.value_adjustment.is_zero());
    assert!(breakdown.bedroom_adjustment.is_zero());
    assert!(breakdown.distance_surcharge.is_zero());
    assert_eq!(breakdown.total.gross, 545.0);
    assert_eq!(breakdown.range, QuoteRange { min: 515.0, max: 575.0 });
    assert_eq!(breakdown.distance_band.id, "within-10-miles");
}

#[test]
fn loaded_quote_reports_adjustments_in_priority_order() {
    let input = QuoteInput {
        survey_type: "level2".to_string(),
        property_value: 800_000.0,
        bedrooms: 5,
        complexity: Some("period".to_string()),
        distance_band_id: Some("over-50-miles".to_string()),
        ..QuoteInput::default()
    };

    let breakdown = calculate_quote(&input).expect("level2 is priced");

    let ids: Vec<&str> = breakdown
        .adjustments
        .iter()
        .map(|adjustment| adjustment.id)
        .collect();
    assert_eq!(ids, ["complexity", "extra-bedrooms", "distance"]);

    let amounts: Vec<f64> = breakdown
        .adjustments
        .iter()
        .map(|adjustment| adjustment.amount.gross)
        .collect();
    assert_eq!(amounts, [130.0, 40.0, 55.0]);

    assert_eq!(breakdown.value_adjustment.gross, 170.0);
    assert_eq!(breakdown.total.gross, 940.0);
    assert_eq!(breakdown.total.net + breakdown.total.vat, breakdown.total.gross);
}

#[test]
fn property_metadata_surcharges_lead_the_ordering() {
    let input = QuoteInput {
        survey_type: "level2".to_string(),
        property_value: 425_000.0,
        bedrooms: 4,
        complexity: Some("standard".to_string()),
        property_type: Some("detached-house".to_string()),
        property_age: Some("victorian-edwardian".to_string()),
        extension_status: Some("extended".to_string()),
        distance_band_id: Some("within-20-miles".to_string()),
        ..QuoteInput::default()
    };

    let breakdown = calculate_quote(&input).expect("level2 is priced");

    let reported: Vec<(&str, f64)> = breakdown
        .adjustments
        .iter()
        .map(|adjustment| (adjustment.id, adjustment.amount.gross))
        .collect();
    assert_eq!(
        reported,
        [
            ("property-type", 35.0),
            ("property-age", 50.0),
            ("extension", 60.0),
            ("extra-bedrooms", 20.0),
            ("distance", 12.0),
        ]
    );

    assert_eq!(breakdown.value_adjustment.gross, 70.0);
    assert_eq!(breakdown.total.gross, 792.0);
    assert_eq!(breakdown.range, QuoteRange { min: 760.0, max: 820.0 });
}

#[test]
fn mirror_fields_match_their_list_entries() {
    let input = QuoteInput {
        survey_type: "level2".to_string(),
        property_value: 185_000.0,
        bedrooms: 5,
        distance_band_id: Some("within-35-miles".to_string()),
        ..QuoteInput::default()
    };

    let breakdown = calculate_quote(&input).expect("level2 is priced");

    let bedroom_entry = breakdown
        .adjustments
        .iter()
        .find(|adjustment| adjustment.id == "extra-bedrooms")
        .expect("two extra bedrooms reported");
    assert_eq!(bedroom_entry.amount, breakdown.bedroom_adjustment);
    assert_eq!(bedroom_entry.label, "2 additional bedrooms");

    let distance_entry = breakdown
        .adjustments
        .iter()
        .find(|adjustment| adjustment.id == "distance")
        .expect("travel surcharge reported");
    assert_eq!(distance_entry.amount, breakdown.distance_surcharge);
    assert_eq!(breakdown.distance_surcharge.gross, 22.0);
}

#[test]
fn extras_are_deduplicated_and_totalled() {
    let input = QuoteInput {
        survey_type: "level2".to_string(),
        property_value: 325_000.0,
        bedrooms: 3,
        distance_miles: Some(8.0),
        extras: vec![
            "valuation".to_string(),
            "thermal".to_string(),
            "valuation".to_string(),
            "jacuzzi-inspection".to_string(),
        ],
        ..QuoteInput::default()
    };

    let breakdown = calculate_quote(&input).expect("level2 is priced");

    let applied: Vec<&str> = breakdown
        .applied_extras
        .iter()
        .map(|extra| extra.id)
        .collect();
    assert_eq!(applied, ["valuation", "thermal"]);
    assert_eq!(breakdown.extras_total.gross, 235.0);
    assert_eq!(breakdown.distance_band.id, "within-10-miles");
    assert_eq!(breakdown.value_adjustment.gross, 35.0);
    assert_eq!(breakdown.total.gross, 815.0);
}

#[test]
fn unknown_survey_type_fails_loudly() {
    let input = QuoteInput {
        survey_type: "level9".to_string(),
        ..QuoteInput::default()
    };

    assert_eq!(
        calculate_quote(&input),
        Err(QuoteError::UnsupportedSurveyType("level9".to_string()))
    );
}

#[test]
fn missing_distance_defaults_to_the_farthest_band() {
    let input = QuoteInput {
        survey_type: "level1".to_string(),
        bedrooms: 2,
        ..QuoteInput::default()
    };

    let breakdown = calculate_quote(&input).expect("level1 is priced");
    assert_eq!(breakdown.distance_band.id, "over-50-miles");
    assert_eq!(breakdown.distance_surcharge.gross, 55.0);
    assert_eq!(breakdown.total.gross, 425.0 + 55.0);
}

#[test]
fn unknown_band_id_degrades_instead_of_erroring() {
    let input = QuoteInput {
        survey_type: "level2".to_string(),
        bedrooms: 2,
        distance_band_id: Some("warp-speed".to_string()),
        ..QuoteInput::default()
    };

    let breakdown = calculate_quote(&input).expect("level2 is priced");
    assert_eq!(breakdown.distance_band.id, "over-50-miles");
}

#[test]
fn bedrooms_clamp_into_range() {
    let mut input = baseline_input();
    input.bedrooms = 0;
    let breakdown = calculate_quote(&input).expect("level2 is priced");
    assert!(breakdown.bedroom_adjustment.is_zero());

    input.bedrooms = 12;
    let breakdown = calculate_quote(&input).expect("level2 is priced");
    // 12 caps at 8, leaving 5 chargeable bedrooms at the level2 premium.
    assert_eq!(breakdown.bedroom_adjustment.gross, 100.0);
}

#[test]
fn per_visit_services_skip_bedroom_scaling() {
    for survey in ["damp", "ventilation", "epc"] {
        let input = QuoteInput {
            survey_type: survey.to_string(),
            bedrooms: 8,
            distance_band_id: Some("within-10-miles".to_string()),
            ..QuoteInput::default()
        };

        let breakdown = calculate_quote(&input).expect("service is priced");
        assert!(
            breakdown.bedroom_adjustment.is_zero(),
            "{survey} should not scale by bedrooms"
        );
    }
}

#[test]
fn unsure_is_priced_as_the_most_requested_survey() {
    let mut input = baseline_input();
    input.survey_type = "unsure".to_string();
    let unsure = calculate_quote(&input).expect("unsure is priced");
    let level2 = calculate_quote(&baseline_input()).expect("level2 is priced");

    assert_eq!(unsure.base, level2.base);
    assert_eq!(unsure.total.gross, level2.total.gross);
}

#[test]
fn default_state_totals_satisfy_the_vat_invariant() {
    for tier in SURVEY_TIERS {
        let input = QuoteInput {
            survey_type: tier.id.to_string(),
            bedrooms: 1,
            distance_band_id: Some("within-10-miles".to_string()),
            ..QuoteInput::default()
        };

        let breakdown = calculate_quote(&input).expect("every tier is priced");
        assert_eq!(breakdown.total.gross, tier.base_fee);
        assert_eq!(
            crate::quoting::round2(breakdown.total.net * (1.0 + VAT_RATE)),
            breakdown.total.gross,
            "VAT invariant broken for {}",
            tier.id
        );
        assert_eq!(
            breakdown.total.net + breakdown.total.vat,
            breakdown.total.gross
        );
    }
}

#[test]
fn identical_inputs_produce_identical_breakdowns() {
    let input = QuoteInput {
        survey_type: "level3".to_string(),
        property_value: 645_000.0,
        bedrooms: 5,
        complexity: Some("period".to_string()),
        property_type: Some("detached-house".to_string()),
        distance_miles: Some(42.5),
        extras: vec!["drainage".to_string()],
        ..QuoteInput::default()
    };

    let first = calculate_quote(&input).expect("level3 is priced");
    let second = calculate_quote(&input).expect("level3 is priced");
    assert_eq!(first, second);
}

#[test]
fn totals_sum_every_reported_term() {
    let input = QuoteInput {
        survey_type: "level3".to_string(),
        property_value: 645_000.0,
        bedrooms: 6,
        complexity: Some("extended".to_string()),
        property_type: Some("cottage".to_string()),
        property_age: Some("pre-1900".to_string()),
        distance_band_id: Some("within-50-miles".to_string()),
        extras: vec!["aerial".to_string()],
        ..QuoteInput::default()
    };

    let breakdown = calculate_quote(&input).expect("level3 is priced");

    let rule_sum: f64 = breakdown
        .adjustments
        .iter()
        .map(|adjustment| adjustment.amount.gross)
        .sum();
    assert_eq!(
        breakdown.total.gross,
        breakdown.base.gross
            + breakdown.value_adjustment.gross
            + rule_sum
            + breakdown.extras_total.gross
    );
}
