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
use crate::dataset::common::{DatasetMetadata, FieldSummary};
use crate::error::DataError;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

/// An immutable snapshot of accident records. Every column shares one
/// length; missing values are `None` cells, so the schema holds for every
/// row. All pipeline entry points borrow the snapshot, which makes
/// independent summaries over it safe to run concurrently.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: HashMap<String, Arc<Column>>,
    pub metadata: DatasetMetadata,
    column_order: Vec<String>,
}
impl Dataset {
    pub fn new(metadata: DatasetMetadata) -> Self {
        Self {
            columns: HashMap::new(),
            metadata,
            column_order: Vec::new(),
        }
    }
    pub fn add_column(&mut self, name: String, column: Column) -> Result<(), DataError> {
        if let Some(first) = self.columns.values().next() {
            if column.len() != first.len() {
                return Err(DataError::LengthMismatch {
                    name,
                    expected: first.len(),
                    actual: column.len(),
                });
            }
        }
        if !self.columns.contains_key(&name) {
            self.column_order.push(name.clone());
        }
        self.columns.insert(name, Arc::new(column));
        self.metadata.column_count = self.columns.len();
        if let Some(first) = self.columns.values().next() {
            self.metadata.row_count = first.len();
        }
        Ok(())
    }
    pub fn row_count(&self) -> usize {
        self.metadata.row_count
    }
    pub fn column_count(&self) -> usize {
        self.metadata.column_count
    }
    pub fn field_names(&self) -> &[String] {
        &self.column_order
    }
    pub fn has_field(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name).map(|arc| arc.as_ref())
    }
    pub fn field_summaries(&self) -> Vec<FieldSummary> {
        self.column_order
            .par_iter()
            .map(|name| {
                let column = &self.columns[name];
                FieldSummary {
                    name: name.clone(),
                    data_type: column.data_type(),
                    null_count: column.null_count(),
                }
            })
            .collect()
    }
    pub fn preview(&self, limit: usize) -> String {
        let sample_size = std::cmp::min(limit, self.row_count());
        let header = self.column_order.join(" | ");
        let mut out = String::new();
        let _ = writeln!(out, "{header}");
        let _ = writeln!(out, "{}", "-".repeat(header.len()));
        for i in 0..sample_size {
            let row: Vec<String> = self
                .column_order
                .iter()
                .map(|name| {
                    self.columns[name]
                        .get_string(i)
                        .unwrap_or_else(|| "NULL".to_string())
                })
                .collect();
            let _ = writeln!(out, "{}", row.join(" | "));
        }
        if self.row_count() > sample_size {
            let _ = writeln!(out, "... ({} more rows)", self.row_count() - sample_size);
        }
        out
    }
}
