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

use crate::aggregate::AggregationRequest;
use crate::error::{PageError, Result, VergeError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One dashboard page, described as data rather than code: the field(s)
/// it tabulates, optional explicit orderings, and its narrative text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub narrative: Option<String>,
    pub primary: String,
    #[serde(default)]
    pub secondary: Option<String>,
    #[serde(default)]
    pub category_order: Option<Vec<String>>,
    #[serde(default)]
    pub secondary_order: Option<Vec<String>>,
}
impl PageSpec {
    pub fn to_request(&self) -> AggregationRequest {
        let mut request = AggregationRequest::new(self.primary.clone());
        if let Some(secondary) = &self.secondary {
            request = request.with_secondary(secondary.clone());
        }
        if let Some(order) = &self.category_order {
            request = request.with_category_order(order.clone());
        }
        if let Some(order) = &self.secondary_order {
            request = request.with_secondary_order(order.clone());
        }
        request
    }
}
#[derive(Debug, Clone)]
pub struct PageRegistry {
    pages: Vec<PageSpec>,
}
impl PageRegistry {
    pub fn builtin() -> Self {
        let pages = vec![
            PageSpec {
                slug: "occupation".to_string(),
                title: "Distribution of Biker Occupation".to_string(),
                narrative: Some(
                    "How reported accidents spread across rider occupations, \
                     most frequent first."
                        .to_string(),
                ),
                primary: "Biker_Occupation".to_string(),
                secondary: None,
                category_order: None,
                secondary_order: None,
            },
            PageSpec {
                slug: "weather".to_string(),
                title: "Accident Weather Condition Analysis".to_string(),
                narrative: Some(
                    "Frequency of weather conditions at the time of the reported \
                     accidents. A high count under clear conditions suggests that \
                     factors other than weather drive the majority of crashes."
                        .to_string(),
                ),
                primary: "Weather".to_string(),
                secondary: None,
                category_order: None,
                secondary_order: None,
            },
            PageSpec {
                slug: "time-of-day".to_string(),
                title: "Distribution of Accidents by Time of Day".to_string(),
                narrative: Some(
                    "Accident counts per time-of-day band, for targeting patrol \
                     schedules at the most dangerous periods."
                        .to_string(),
                ),
                primary: "Time_of_Day".to_string(),
                secondary: None,
                category_order: None,
                secondary_order: None,
            },
            PageSpec {
                slug: "road-type".to_string(),
                title: "Distribution of Road Types During Accidents".to_string(),
                narrative: None,
                primary: "Road_Type".to_string(),
                secondary: None,
                category_order: None,
                secondary_order: None,
            },
            PageSpec {
                slug: "weather-severity".to_string(),
                title: "Accident Severity by Weather Condition".to_string(),
                narrative: Some(
                    "Severity breakdown within each weather condition.".to_string(),
                ),
                primary: "Weather".to_string(),
                secondary: Some("Severity".to_string()),
                category_order: None,
                secondary_order: Some(vec![
                    "Slight".to_string(),
                    "Serious".to_string(),
                    "Fatal".to_string(),
                ]),
            },
        ];
        Self { pages }
    }
    pub fn from_pages(pages: Vec<PageSpec>) -> std::result::Result<Self, PageError> {
        let mut slugs: HashSet<&str> = HashSet::new();
        for page in &pages {
            if page.slug.trim().is_empty() {
                return Err(PageError::InvalidPage {
                    slug: page.slug.clone(),
                    reason: "empty slug".to_string(),
                });
            }
            if !slugs.insert(page.slug.as_str()) {
                return Err(PageError::DuplicateSlug {
                    slug: page.slug.clone(),
                });
            }
            if page.primary.trim().is_empty() {
                return Err(PageError::InvalidPage {
                    slug: page.slug.clone(),
                    reason: "empty primary field".to_string(),
                });
            }
            if page.secondary.as_deref() == Some(page.primary.as_str()) {
                return Err(PageError::InvalidPage {
                    slug: page.slug.clone(),
                    reason: "secondary field duplicates primary".to_string(),
                });
            }
        }
        Ok(Self { pages })
    }
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            VergeError::Page(PageError::Config {
                reason: format!("{}: {e}", path.as_ref().display()),
            })
        })?;
        let pages: Vec<PageSpec> = serde_yaml::from_str(&raw).map_err(|e| {
            VergeError::Page(PageError::Config {
                reason: e.to_string(),
            })
        })?;
        Ok(Self::from_pages(pages)?)
    }
    pub fn get(&self, slug: &str) -> Option<&PageSpec> {
        self.pages.iter().find(|page| page.slug == slug)
    }
    pub fn iter(&self) -> impl Iterator<Item = &PageSpec> {
        self.pages.iter()
    }
    pub fn len(&self) -> usize {
        self.pages.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
impl Default for PageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
