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

use std::io::Write;
use verge::{
    load_dataset, summarise, synthetic_dataset, AggregationRequest, AggregationResult, SourceRef,
};

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_existing_source_is_loaded_without_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "accidents.csv",
        "Weather,Severity\nClear,Slight\nClear,Fatal\nRain,Slight\n",
    );
    let acquisition = load_dataset(&SourceRef::new(path, "accidents")).unwrap();
    assert!(!acquisition.used_fallback);
    assert_eq!(acquisition.dataset.row_count(), 3);

    let table = match summarise(
        &acquisition.dataset,
        &AggregationRequest::new("Weather"),
    )
    .unwrap()
    {
        AggregationResult::Counts(table) => table,
        other => panic!("Expected count table, got {other:?}"),
    };
    assert_eq!(table.entries[0].category, "Clear");
    assert_eq!(table.entries[0].count, 2);
    assert_eq!(table.total(), 3);
}

#[test]
fn test_missing_source_falls_back_to_synthetic_data() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does_not_exist.csv");
    let acquisition = load_dataset(&SourceRef::new(missing, "accidents")).unwrap();
    assert!(acquisition.used_fallback);
    assert!(acquisition.dataset.row_count() > 0);
    assert!(acquisition.dataset.has_field("Weather"));

    // Summaries over the substitute dataset obey the same contract.
    let table = match summarise(
        &acquisition.dataset,
        &AggregationRequest::new("Weather"),
    )
    .unwrap()
    {
        AggregationResult::Counts(table) => table,
        other => panic!("Expected count table, got {other:?}"),
    };
    assert_eq!(table.total() as usize, acquisition.dataset.row_count());
    for pair in table.entries.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
}

#[test]
fn test_malformed_source_falls_back_to_synthetic_data() {
    let dir = tempfile::tempdir().unwrap();
    // A data row wider than the header is malformation, not data.
    let path = write_fixture(&dir, "ragged.csv", "Weather,Severity\nClear,Slight,Extra\n");
    let acquisition = load_dataset(&SourceRef::new(path, "accidents")).unwrap();
    assert!(acquisition.used_fallback);
    assert!(acquisition.dataset.row_count() > 0);
}

#[test]
fn test_fallback_dataset_is_deterministic() {
    let first = synthetic_dataset().unwrap();
    let second = synthetic_dataset().unwrap();
    assert_eq!(first.row_count(), second.row_count());
    assert_eq!(first.field_names(), second.field_names());
    assert_eq!(first.preview(usize::MAX), second.preview(usize::MAX));
}

#[test]
fn test_short_rows_pad_with_missing_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "short.csv",
        "Weather,Severity\nClear,Slight\nRain\nFog,Serious\n",
    );
    let acquisition = load_dataset(&SourceRef::new(path, "accidents")).unwrap();
    assert!(!acquisition.used_fallback);
    assert_eq!(acquisition.dataset.row_count(), 3);

    let severity = match summarise(
        &acquisition.dataset,
        &AggregationRequest::new("Severity"),
    )
    .unwrap()
    {
        AggregationResult::Counts(table) => table,
        other => panic!("Expected count table, got {other:?}"),
    };
    // The padded cell in the Rain row is missing, not an empty category.
    assert_eq!(severity.total(), 2);
}

#[test]
fn test_empty_cells_are_missing_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "blanks.csv",
        "Weather,Severity\nClear,\n,Slight\nClear,Fatal\n",
    );
    let acquisition = load_dataset(&SourceRef::new(path, "accidents")).unwrap();
    assert!(!acquisition.used_fallback);

    let weather = match summarise(
        &acquisition.dataset,
        &AggregationRequest::new("Weather"),
    )
    .unwrap()
    {
        AggregationResult::Counts(table) => table,
        other => panic!("Expected count table, got {other:?}"),
    };
    assert_eq!(weather.total(), 2);

    let cross = match summarise(
        &acquisition.dataset,
        &AggregationRequest::new("Weather").with_secondary("Severity"),
    )
    .unwrap()
    {
        AggregationResult::Cross(table) => table,
        other => panic!("Expected cross table, got {other:?}"),
    };
    // Only the Clear/Fatal row carries both fields.
    assert_eq!(cross.total(), 1);
}
