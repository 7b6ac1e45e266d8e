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

use crate::dataset::column::ColumnBuilder;
use crate::dataset::common::DatasetMetadata;
use crate::dataset::frame::Dataset;
use crate::error::DataError;
use std::fs::File;
use std::path::Path;
use tracing::debug;
#[derive(Debug)]
pub struct CsvLoader {
    delimiter: u8,
    trim: bool,
}
impl CsvLoader {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
    pub fn read_file(&self, path: &Path, dataset_name: String) -> Result<Dataset, DataError> {
        let file = File::open(path).map_err(|e| DataError::SourceUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .flexible(true)
            .from_reader(file);
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| self.malformed(path, e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(self.malformed(path, "missing header row".to_string()));
        }
        let mut builders: Vec<ColumnBuilder> =
            headers.iter().map(|_| ColumnBuilder::new()).collect();
        let mut row_count = 0;
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.malformed(path, e.to_string()))?;
            if record.len() > headers.len() {
                return Err(self.malformed(
                    path,
                    format!(
                        "row {}: expected {} fields, got {}",
                        line + 1,
                        headers.len(),
                        record.len()
                    ),
                ));
            }
            for (i, builder) in builders.iter_mut().enumerate() {
                // Rows shorter than the header are padded with missing cells.
                let value = record
                    .get(i)
                    .filter(|field| !field.trim().is_empty())
                    .map(str::to_string);
                builder.push(value);
            }
            row_count += 1;
        }
        let metadata = DatasetMetadata::named(dataset_name).with_source_path(path);
        let mut dataset = Dataset::new(metadata);
        for (header, builder) in headers.into_iter().zip(builders) {
            dataset.add_column(header, builder.build())?;
        }
        debug!(
            path = %path.display(),
            rows = row_count,
            columns = dataset.column_count(),
            "loaded CSV source"
        );
        Ok(dataset)
    }
    fn malformed(&self, path: &Path, reason: String) -> DataError {
        DataError::Malformed {
            path: path.display().to_string(),
            reason,
        }
    }
}
impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}
