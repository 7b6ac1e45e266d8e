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
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Fixed seed: the substitute dataset must be identical across runs so that
// every summary derived from it is reproducible.
const FALLBACK_SEED: u64 = 271_828;
const FALLBACK_ROWS: usize = 200;

const WEATHER: &[(&str, u32)] = &[
    ("Clear", 45),
    ("Raining", 20),
    ("Overcast", 15),
    ("Fog", 10),
    ("Windy", 6),
    ("Snowing", 4),
];
const ROAD_TYPE: &[(&str, u32)] = &[
    ("Single Carriageway", 40),
    ("Dual Carriageway", 25),
    ("Roundabout", 15),
    ("Motorway", 12),
    ("Slip Road", 8),
];
const TIME_OF_DAY: &[(&str, u32)] = &[
    ("Morning", 25),
    ("Afternoon", 30),
    ("Evening", 30),
    ("Night", 15),
];
const SEVERITY: &[(&str, u32)] = &[("Slight", 60), ("Serious", 30), ("Fatal", 10)];
const OCCUPATION: &[(&str, u32)] = &[
    ("Student", 25),
    ("Courier", 20),
    ("Office Worker", 20),
    ("Tradesperson", 15),
    ("Unemployed", 12),
    ("Retired", 8),
];

pub fn synthetic_dataset() -> Result<Dataset, DataError> {
    let mut rng = StdRng::seed_from_u64(FALLBACK_SEED);
    let mut dataset = Dataset::new(DatasetMetadata::named("synthetic-accident-records"));
    dataset.add_column(
        "Weather".to_string(),
        sample_column(&mut rng, WEATHER).build(),
    )?;
    dataset.add_column(
        "Road_Type".to_string(),
        sample_column(&mut rng, ROAD_TYPE).build(),
    )?;
    dataset.add_column(
        "Time_of_Day".to_string(),
        sample_column(&mut rng, TIME_OF_DAY).build(),
    )?;
    dataset.add_column(
        "Severity".to_string(),
        sample_column(&mut rng, SEVERITY).build(),
    )?;
    dataset.add_column(
        "Biker_Occupation".to_string(),
        sample_column(&mut rng, OCCUPATION).build(),
    )?;
    let mut rider_age = ColumnBuilder::with_capacity(FALLBACK_ROWS);
    for _ in 0..FALLBACK_ROWS {
        rider_age.push(Some(rng.gen_range(16..75).to_string()));
    }
    dataset.add_column("Rider_Age".to_string(), rider_age.build())?;
    Ok(dataset)
}

fn sample_column(rng: &mut StdRng, table: &[(&str, u32)]) -> ColumnBuilder {
    let dist = WeightedIndex::new(table.iter().map(|(_, weight)| *weight))
        .expect("category weight tables are static and non-empty");
    let mut builder = ColumnBuilder::with_capacity(FALLBACK_ROWS);
    for _ in 0..FALLBACK_ROWS {
        builder.push(Some(table[dist.sample(rng)].0.to_string()));
    }
    builder
}
