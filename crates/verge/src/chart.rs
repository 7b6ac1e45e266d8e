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

use crate::aggregate::{AggregationResult, CrossTable};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write as _;
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    StackedBar,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub name: Option<String>,
    pub points: Vec<(String, u64)>,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub series: Vec<Series>,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartContent {
    Chart(ChartSpec),
    Diagnostic(String),
}

/// Turns an aggregation outcome into renderer-ready content. The series
/// carry the pipeline's ordering; a renderer must not re-sort them.
pub fn shape_chart(result: &AggregationResult, title: &str, x_label: &str) -> ChartContent {
    match result {
        AggregationResult::Counts(table) => ChartContent::Chart(ChartSpec {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: "Count".to_string(),
            kind: ChartKind::Bar,
            series: vec![Series {
                name: None,
                points: table
                    .entries
                    .iter()
                    .map(|entry| (entry.category.clone(), entry.count))
                    .collect(),
            }],
        }),
        AggregationResult::Cross(table) => ChartContent::Chart(ChartSpec {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: "Count".to_string(),
            kind: ChartKind::StackedBar,
            series: stacked_series(table),
        }),
        AggregationResult::Absent { field } => ChartContent::Diagnostic(format!(
            "The dataset does not contain a '{field}' field."
        )),
    }
}

// One series per primary bucket; point order inside a series is the
// bucket's secondary ordering.
fn stacked_series(table: &CrossTable) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    for entry in &table.entries {
        match series.last_mut() {
            Some(current) if current.name.as_deref() == Some(entry.primary.as_str()) => {
                current
                    .points
                    .push((entry.secondary.clone(), entry.count));
            }
            _ => series.push(Series {
                name: Some(entry.primary.clone()),
                points: vec![(entry.secondary.clone(), entry.count)],
            }),
        }
    }
    series
}

pub trait Renderer {
    fn render(&self, content: &ChartContent) -> Result<()>;
}
#[derive(Debug)]
pub struct TextRenderer {
    bar_width: usize,
}
impl TextRenderer {
    pub fn new() -> Self {
        Self { bar_width: 40 }
    }
    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width.max(1);
        self
    }
    pub fn render_to_string(&self, content: &ChartContent) -> String {
        let mut out = String::new();
        match content {
            ChartContent::Diagnostic(message) => {
                let _ = writeln!(out, "[no chart] {message}");
            }
            ChartContent::Chart(spec) => {
                let _ = writeln!(out, "{}", spec.title);
                let _ = writeln!(out, "{}", "=".repeat(spec.title.len()));
                let max = spec
                    .series
                    .iter()
                    .flat_map(|series| series.points.iter().map(|(_, count)| *count))
                    .max()
                    .unwrap_or(0);
                let label_width = spec
                    .series
                    .iter()
                    .flat_map(|series| series.points.iter().map(|(label, _)| label.len()))
                    .max()
                    .unwrap_or(0);
                for series in &spec.series {
                    if let Some(name) = &series.name {
                        let _ = writeln!(out, "{name}:");
                    }
                    for (label, count) in &series.points {
                        let bar = self.scaled_bar(*count, max);
                        let _ = writeln!(out, "  {label:<label_width$} | {bar} {count}");
                    }
                }
                if max == 0 {
                    let _ = writeln!(out, "  (no observations)");
                }
                let _ = writeln!(out, "  {} by {}", spec.y_label, spec.x_label);
            }
        }
        out
    }
    fn scaled_bar(&self, count: u64, max: u64) -> String {
        if max == 0 {
            return String::new();
        }
        let length = ((count as f64 / max as f64) * self.bar_width as f64).round() as usize;
        "#".repeat(length.max(usize::from(count > 0)))
    }
}
impl Renderer for TextRenderer {
    fn render(&self, content: &ChartContent) -> Result<()> {
        let text = self.render_to_string(content);
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(text.as_bytes())?;
        Ok(())
    }
}
impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}
