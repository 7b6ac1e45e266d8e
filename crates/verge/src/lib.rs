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

pub mod aggregate;
pub mod chart;
pub mod dataset;
pub mod error;
pub mod pages;

pub use aggregate::{
    summarise, AggregationRequest, AggregationResult, CountEntry, CountTable, CrossEntry,
    CrossTable,
};
pub use chart::{shape_chart, ChartContent, ChartKind, ChartSpec, Renderer, Series, TextRenderer};
pub use dataset::{
    load_dataset, synthetic_dataset, Acquisition, Column, ColumnBuilder, CsvLoader, DataType,
    Dataset, DatasetId, DatasetMetadata, FieldSummary, SourceRef,
};
pub use error::{DataError, PageError, RequestError, Result, VergeError};
pub use pages::{PageRegistry, PageSpec};

use tracing::info;

#[derive(Debug, Clone)]
pub struct PageOutput {
    pub slug: String,
    pub title: String,
    pub narrative: Option<String>,
    pub content: ChartContent,
}

pub struct Dashboard {
    registry: PageRegistry,
}
impl Dashboard {
    pub fn new() -> Self {
        Self {
            registry: PageRegistry::builtin(),
        }
    }
    pub fn with_registry(registry: PageRegistry) -> Self {
        Self { registry }
    }
    pub fn from_pages_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Ok(Self {
            registry: PageRegistry::from_yaml_file(path)?,
        })
    }
    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }
    pub fn load(&self, source: &SourceRef) -> Result<Acquisition> {
        let acquisition = load_dataset(source)?;
        info!(
            dataset = %acquisition.dataset.metadata.name,
            used_fallback = acquisition.used_fallback,
            "dataset ready"
        );
        Ok(acquisition)
    }
    pub fn run_page(&self, dataset: &Dataset, slug: &str) -> Result<PageOutput> {
        let page = self
            .registry
            .get(slug)
            .ok_or_else(|| PageError::UnknownPage {
                slug: slug.to_string(),
            })?;
        let result = summarise(dataset, &page.to_request())?;
        Ok(PageOutput {
            slug: page.slug.clone(),
            title: page.title.clone(),
            narrative: page.narrative.clone(),
            content: shape_chart(&result, &page.title, &page.primary),
        })
    }
    pub fn run_all(&self, dataset: &Dataset) -> Result<Vec<PageOutput>> {
        self.registry
            .iter()
            .map(|page| self.run_page(dataset, &page.slug))
            .collect()
    }
}
impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
