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

use std::io::{self, Write};
use tracing::{error, info};
use verge::{Dashboard, Renderer, SourceRef, TextRenderer};

const DEFAULT_SOURCE: &str = "motorbike_accident_severity.csv";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    info!("Starting accident dashboard demo");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
    let dashboard = Dashboard::new();
    let acquisition = dashboard.load(&SourceRef::new(&path, "Motorbike Accident Severity"))?;
    if acquisition.used_fallback {
        println!("Data file '{path}' not found or unreadable. Using synthetic data for demonstration.");
    }
    let dataset = acquisition.dataset;
    let renderer = TextRenderer::new();

    loop {
        println!();
        println!("Menu");
        println!("{}", "=".repeat(40));
        for (index, page) in dashboard.registry().iter().enumerate() {
            println!("{}. {}", index + 1, page.title);
        }
        println!("p. Preview dataset");
        println!("q. Quit");
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        match input {
            "q" | "quit" | "exit" => break,
            "p" => {
                println!("\nDataset Sample ({})", dataset.metadata.name);
                println!("{}", "=".repeat(50));
                print!("{}", dataset.preview(10));
                for summary in dataset.field_summaries() {
                    println!(
                        "{}: {:?} ({} nulls)",
                        summary.name, summary.data_type, summary.null_count
                    );
                }
            }
            _ => {
                let selected = input
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| dashboard.registry().iter().nth(i).cloned());
                match selected {
                    None => println!("Unrecognised option '{input}'"),
                    Some(page) => match dashboard.run_page(&dataset, &page.slug) {
                        Ok(output) => {
                            println!();
                            if let Some(narrative) = &output.narrative {
                                println!("{narrative}");
                                println!();
                            }
                            renderer.render(&output.content)?;
                        }
                        Err(e) => error!("{} error: {e}", e.category()),
                    },
                }
            }
        }
    }

    info!("Dashboard demo finished");
    Ok(())
}
