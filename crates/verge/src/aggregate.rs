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

use crate::dataset::column::Column;
use crate::dataset::frame::Dataset;
use crate::error::{RequestError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declarative description of one summary: which field to tabulate, an
/// optional second field for a stacked breakdown, and optional explicit
/// category orderings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationRequest {
    pub primary: String,
    #[serde(default)]
    pub secondary: Option<String>,
    #[serde(default)]
    pub category_order: Option<Vec<String>>,
    #[serde(default)]
    pub secondary_order: Option<Vec<String>>,
}
impl AggregationRequest {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
            category_order: None,
            secondary_order: None,
        }
    }
    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }
    pub fn with_category_order(mut self, order: Vec<String>) -> Self {
        self.category_order = Some(order);
        self
    }
    pub fn with_secondary_order(mut self, order: Vec<String>) -> Self {
        self.secondary_order = Some(order);
        self
    }
    pub fn validate(&self) -> std::result::Result<(), RequestError> {
        if self.primary.trim().is_empty() {
            return Err(RequestError::EmptyPrimaryField);
        }
        if let Some(secondary) = &self.secondary {
            if secondary == &self.primary {
                return Err(RequestError::SecondaryEqualsPrimary {
                    field: secondary.clone(),
                });
            }
        }
        Ok(())
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub category: String,
    pub count: u64,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    pub field: String,
    pub entries: Vec<CountEntry>,
}
impl CountTable {
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossEntry {
    pub primary: String,
    pub secondary: String,
    pub count: u64,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTable {
    pub primary_field: String,
    pub secondary_field: String,
    pub entries: Vec<CrossEntry>,
}
impl CrossTable {
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn primary_categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.primary.as_str()) {
                seen.push(entry.primary.as_str());
            }
        }
        seen
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationResult {
    Counts(CountTable),
    Cross(CrossTable),
    Absent { field: String },
}
impl AggregationResult {
    pub fn is_absent(&self) -> bool {
        matches!(self, AggregationResult::Absent { .. })
    }
}

/// Tabulates the requested field(s) of an immutable dataset snapshot.
///
/// A field name missing from the schema is an expected outcome, reported
/// as `AggregationResult::Absent`; only request contract violations return
/// an error. Missing cells never count. The output ordering is part of the
/// contract: explicit order when supplied, otherwise descending count with
/// ties broken by first observation, so repeated calls over the same
/// snapshot are identical.
pub fn summarise(dataset: &Dataset, request: &AggregationRequest) -> Result<AggregationResult> {
    request.validate()?;
    let primary = match dataset.get_column(&request.primary) {
        Some(column) => column,
        None => {
            return Ok(AggregationResult::Absent {
                field: request.primary.clone(),
            })
        }
    };
    match &request.secondary {
        None => Ok(AggregationResult::Counts(count_single(
            primary,
            dataset.row_count(),
            request,
        ))),
        Some(secondary_name) => {
            let secondary = match dataset.get_column(secondary_name) {
                Some(column) => column,
                None => {
                    return Ok(AggregationResult::Absent {
                        field: secondary_name.clone(),
                    })
                }
            };
            Ok(AggregationResult::Cross(count_cross(
                primary,
                secondary,
                secondary_name,
                dataset.row_count(),
                request,
            )))
        }
    }
}

fn count_single(column: &Column, rows: usize, request: &AggregationRequest) -> CountTable {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for i in 0..rows {
        if let Some(value) = column.get_string(i) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    CountTable {
        field: request.primary.clone(),
        entries: order_entries(counts, request.category_order.as_deref()),
    }
}

fn count_cross(
    primary: &Column,
    secondary: &Column,
    secondary_field: &str,
    rows: usize,
    request: &AggregationRequest,
) -> CrossTable {
    // Insertion order of the outer and inner maps records first observation,
    // which the default tie-break relies on.
    let mut buckets: IndexMap<String, IndexMap<String, u64>> = IndexMap::new();
    for i in 0..rows {
        let (primary_value, secondary_value) = match (primary.get_string(i), secondary.get_string(i))
        {
            (Some(p), Some(s)) => (p, s),
            _ => continue,
        };
        *buckets
            .entry(primary_value)
            .or_default()
            .entry(secondary_value)
            .or_insert(0) += 1;
    }
    let bucket_totals: IndexMap<String, u64> = buckets
        .iter()
        .map(|(category, cells)| (category.clone(), cells.values().sum()))
        .collect();
    let mut entries = Vec::new();
    for bucket in order_entries(bucket_totals, request.category_order.as_deref()) {
        let cells = buckets
            .shift_remove(&bucket.category)
            .unwrap_or_default();
        for cell in order_entries(cells, request.secondary_order.as_deref()) {
            entries.push(CrossEntry {
                primary: bucket.category.clone(),
                secondary: cell.category,
                count: cell.count,
            });
        }
    }
    CrossTable {
        primary_field: request.primary.clone(),
        secondary_field: secondary_field.to_string(),
        entries,
    }
}

// Explicit order: the subsequence of the supplied order restricted to
// observed categories, never zero-padded. Default: descending count; the
// stable sort over first-observed insertion order settles ties.
fn order_entries(counts: IndexMap<String, u64>, explicit: Option<&[String]>) -> Vec<CountEntry> {
    match explicit {
        Some(order) => order
            .iter()
            .filter_map(|category| {
                counts.get(category).map(|&count| CountEntry {
                    category: category.clone(),
                    count,
                })
            })
            .collect(),
        None => {
            let mut entries: Vec<CountEntry> = counts
                .into_iter()
                .map(|(category, count)| CountEntry { category, count })
                .collect();
            entries.sort_by(|a, b| b.count.cmp(&a.count));
            entries
        }
    }
}
