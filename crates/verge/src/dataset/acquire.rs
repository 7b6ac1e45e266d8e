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

use crate::dataset::frame::Dataset;
use crate::dataset::io::CsvLoader;
use crate::dataset::synthetic::synthetic_dataset;
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub path: PathBuf,
    pub dataset_name: String,
}
impl SourceRef {
    pub fn new(path: impl Into<PathBuf>, dataset_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            dataset_name: dataset_name.into(),
        }
    }
}
#[derive(Debug)]
pub struct Acquisition {
    pub dataset: Dataset,
    pub used_fallback: bool,
}

/// Acquisition failures never reach the aggregation pipeline: an
/// unreachable or malformed source substitutes the seeded synthetic
/// dataset, and the substitution is reported through `used_fallback`.
pub fn load_dataset(source: &SourceRef) -> Result<Acquisition, DataError> {
    match CsvLoader::new().read_file(&source.path, source.dataset_name.clone()) {
        Ok(dataset) => {
            info!(
                source = %source.path.display(),
                rows = dataset.row_count(),
                columns = dataset.column_count(),
                "loaded dataset"
            );
            Ok(Acquisition {
                dataset,
                used_fallback: false,
            })
        }
        Err(error) => {
            warn!(
                source = %source.path.display(),
                %error,
                "source unavailable, substituting synthetic dataset"
            );
            Ok(Acquisition {
                dataset: synthetic_dataset()?,
                used_fallback: true,
            })
        }
    }
}
