// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use verge::{
    summarise, AggregationRequest, AggregationResult, Column, DataType, Dataset, DatasetMetadata,
    RequestError, VergeError,
};

fn create_dataset(columns: &[(&str, &[Option<&str>])]) -> Dataset {
    let mut dataset = Dataset::new(DatasetMetadata::named("test-records"));
    for (name, values) in columns {
        let cells: Vec<Option<String>> = values
            .iter()
            .map(|opt| opt.map(|s| s.to_string()))
            .collect();
        let column = Column::from_strings(&cells, DataType::String).unwrap();
        dataset.add_column(name.to_string(), column).unwrap();
    }
    dataset
}

fn count_table(result: AggregationResult) -> verge::CountTable {
    match result {
        AggregationResult::Counts(table) => table,
        other => panic!("Expected count table, got {other:?}"),
    }
}

fn cross_table(result: AggregationResult) -> verge::CrossTable {
    match result {
        AggregationResult::Cross(table) => table,
        other => panic!("Expected cross table, got {other:?}"),
    }
}

#[test]
fn test_descending_counts_with_first_observed_tie_break() {
    let dataset = create_dataset(&[(
        "Weather",
        &[
            Some("Clear"),
            Some("Clear"),
            Some("Rain"),
            Some("Fog"),
            Some("Clear"),
        ],
    )]);
    let request = AggregationRequest::new("Weather");
    let table = count_table(summarise(&dataset, &request).unwrap());

    let entries: Vec<(&str, u64)> = table
        .entries
        .iter()
        .map(|e| (e.category.as_str(), e.count))
        .collect();
    // Rain is first observed before Fog, so the 1-1 tie keeps Rain first.
    assert_eq!(entries, vec![("Clear", 3), ("Rain", 1), ("Fog", 1)]);
}

#[test]
fn test_total_equals_non_missing_observations() {
    let dataset = create_dataset(&[(
        "Weather",
        &[Some("Clear"), None, Some("Rain"), None, Some("Clear")],
    )]);
    let request = AggregationRequest::new("Weather");
    let table = count_table(summarise(&dataset, &request).unwrap());
    assert_eq!(table.total(), 3);
}

#[test]
fn test_absent_field_is_reported_not_raised() {
    let dataset = create_dataset(&[("Weather", &[Some("Clear")])]);
    let request = AggregationRequest::new("Speed_Limit");
    let result = summarise(&dataset, &request).unwrap();
    match result {
        AggregationResult::Absent { field } => assert_eq!(field, "Speed_Limit"),
        other => panic!("Expected absent result, got {other:?}"),
    }
}

#[test]
fn test_repeated_summaries_are_identical() {
    let dataset = create_dataset(&[(
        "Road_Type",
        &[
            Some("Roundabout"),
            Some("Motorway"),
            Some("Roundabout"),
            Some("Slip Road"),
            Some("Motorway"),
        ],
    )]);
    let request = AggregationRequest::new("Road_Type");
    let first = count_table(summarise(&dataset, &request).unwrap());
    let second = count_table(summarise(&dataset, &request).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_default_order_is_non_increasing() {
    let dataset = create_dataset(&[(
        "Time_of_Day",
        &[
            Some("Night"),
            Some("Morning"),
            Some("Morning"),
            Some("Evening"),
            Some("Evening"),
            Some("Evening"),
            Some("Night"),
        ],
    )]);
    let request = AggregationRequest::new("Time_of_Day");
    let table = count_table(summarise(&dataset, &request).unwrap());
    for pair in table.entries.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
}

#[test]
fn test_explicit_order_is_observed_subsequence() {
    let dataset = create_dataset(&[(
        "Weather",
        &[
            Some("Clear"),
            Some("Clear"),
            Some("Rain"),
            Some("Fog"),
            Some("Clear"),
        ],
    )]);
    // Hail never occurs and must not appear as a zero-count entry; Rain is
    // observed but unlisted, so it is not displayed.
    let request = AggregationRequest::new("Weather").with_category_order(vec![
        "Fog".to_string(),
        "Hail".to_string(),
        "Clear".to_string(),
    ]);
    let table = count_table(summarise(&dataset, &request).unwrap());
    let entries: Vec<(&str, u64)> = table
        .entries
        .iter()
        .map(|e| (e.category.as_str(), e.count))
        .collect();
    assert_eq!(entries, vec![("Fog", 1), ("Clear", 3)]);
}

#[test]
fn test_cross_table_counts_and_order() {
    let dataset = create_dataset(&[
        (
            "Weather",
            &[Some("Clear"), Some("Clear"), Some("Rain"), Some("Clear")],
        ),
        (
            "Severity",
            &[Some("Slight"), Some("Fatal"), Some("Slight"), Some("Slight")],
        ),
    ]);
    let request = AggregationRequest::new("Weather").with_secondary("Severity");
    let table = cross_table(summarise(&dataset, &request).unwrap());

    assert_eq!(table.total(), 4);
    let clear_slight = table
        .entries
        .iter()
        .find(|e| e.primary == "Clear" && e.secondary == "Slight")
        .unwrap();
    assert_eq!(clear_slight.count, 2);
    // Clear holds 3 of the 4 observations, so its bucket leads.
    assert_eq!(table.primary_categories(), vec!["Clear", "Rain"]);
    // Within the Clear bucket, Slight (2) precedes Fatal (1).
    let clear_secondaries: Vec<&str> = table
        .entries
        .iter()
        .filter(|e| e.primary == "Clear")
        .map(|e| e.secondary.as_str())
        .collect();
    assert_eq!(clear_secondaries, vec!["Slight", "Fatal"]);
}

#[test]
fn test_cross_table_ignores_rows_missing_either_field() {
    let dataset = create_dataset(&[
        (
            "Weather",
            &[Some("Clear"), Some("Rain"), None, Some("Fog")],
        ),
        (
            "Severity",
            &[Some("Slight"), None, Some("Fatal"), Some("Serious")],
        ),
    ]);
    let request = AggregationRequest::new("Weather").with_secondary("Severity");
    let table = cross_table(summarise(&dataset, &request).unwrap());
    assert_eq!(table.total(), 2);
}

#[test]
fn test_missing_secondary_field_reports_absent() {
    let dataset = create_dataset(&[("Weather", &[Some("Clear")])]);
    let request = AggregationRequest::new("Weather").with_secondary("Severity");
    let result = summarise(&dataset, &request).unwrap();
    match result {
        AggregationResult::Absent { field } => assert_eq!(field, "Severity"),
        other => panic!("Expected absent result, got {other:?}"),
    }
}

#[test]
fn test_secondary_order_applies_uniformly_across_buckets() {
    let dataset = create_dataset(&[
        (
            "Weather",
            &[
                Some("Clear"),
                Some("Clear"),
                Some("Rain"),
                Some("Rain"),
                Some("Rain"),
            ],
        ),
        (
            "Severity",
            &[
                Some("Fatal"),
                Some("Slight"),
                Some("Slight"),
                Some("Slight"),
                Some("Fatal"),
            ],
        ),
    ]);
    let request = AggregationRequest::new("Weather")
        .with_secondary("Severity")
        .with_secondary_order(vec![
            "Slight".to_string(),
            "Serious".to_string(),
            "Fatal".to_string(),
        ]);
    let table = cross_table(summarise(&dataset, &request).unwrap());
    for bucket in table.primary_categories() {
        let secondaries: Vec<&str> = table
            .entries
            .iter()
            .filter(|e| e.primary == bucket)
            .map(|e| e.secondary.as_str())
            .collect();
        assert_eq!(secondaries, vec!["Slight", "Fatal"]);
    }
}

#[test]
fn test_empty_dataset_yields_empty_table() {
    let dataset = create_dataset(&[("Weather", &[])]);
    let request = AggregationRequest::new("Weather");
    let table = count_table(summarise(&dataset, &request).unwrap());
    assert!(table.is_empty());
    assert_eq!(table.total(), 0);
}

#[test]
fn test_all_missing_field_yields_empty_table() {
    let dataset = create_dataset(&[("Weather", &[None, None, None])]);
    let request = AggregationRequest::new("Weather");
    let table = count_table(summarise(&dataset, &request).unwrap());
    assert!(table.is_empty());
}

#[test]
fn test_empty_primary_is_a_contract_violation() {
    let dataset = create_dataset(&[("Weather", &[Some("Clear")])]);
    let request = AggregationRequest::new("  ");
    match summarise(&dataset, &request) {
        Err(VergeError::Request(RequestError::EmptyPrimaryField)) => {}
        other => panic!("Expected contract violation, got {other:?}"),
    }
}

#[test]
fn test_secondary_equal_to_primary_is_a_contract_violation() {
    let dataset = create_dataset(&[("Weather", &[Some("Clear")])]);
    let request = AggregationRequest::new("Weather").with_secondary("Weather");
    match summarise(&dataset, &request) {
        Err(VergeError::Request(RequestError::SecondaryEqualsPrimary { field })) => {
            assert_eq!(field, "Weather");
        }
        other => panic!("Expected contract violation, got {other:?}"),
    }
}
