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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum VergeError {
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("request error: {0}")]
    Request(#[from] RequestError),
    #[error("page error: {0}")]
    Page(#[from] PageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
#[derive(Error, Debug)]
pub enum DataError {
    #[error("source '{path}' is unavailable: {reason}")]
    SourceUnavailable { path: String, reason: String },
    #[error("source '{path}' is malformed: {reason}")]
    Malformed { path: String, reason: String },
    #[error("column '{name}' length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("aggregation request has an empty primary field name")]
    EmptyPrimaryField,
    #[error("secondary field '{field}' duplicates the primary field")]
    SecondaryEqualsPrimary { field: String },
}
#[derive(Error, Debug)]
pub enum PageError {
    #[error("duplicate page slug '{slug}'")]
    DuplicateSlug { slug: String },
    #[error("page '{slug}' is invalid: {reason}")]
    InvalidPage { slug: String, reason: String },
    #[error("no page registered with slug '{slug}'")]
    UnknownPage { slug: String },
    #[error("failed to load page configuration: {reason}")]
    Config { reason: String },
}
pub type Result<T> = std::result::Result<T, VergeError>;
impl VergeError {
    pub fn category(&self) -> &'static str {
        match self {
            VergeError::Data(_) => "Data",
            VergeError::Request(_) => "Request",
            VergeError::Page(_) => "Page",
            VergeError::Io(_) => "I/O",
        }
    }
}
