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

pub mod acquire;
pub mod column;
pub mod common;
pub mod frame;
pub mod io;
pub mod synthetic;
pub use acquire::{load_dataset, Acquisition, SourceRef};
pub use column::{Column, ColumnBuilder};
pub use common::{DataType, DatasetId, DatasetMetadata, FieldSummary};
pub use frame::Dataset;
pub use io::CsvLoader;
pub use synthetic::synthetic_dataset;
pub fn load_csv<P: AsRef<std::path::Path>>(
    path: P,
    name: String,
) -> Result<Dataset, crate::error::DataError> {
    let loader = CsvLoader::new();
    loader.read_file(path.as_ref(), name)
}
