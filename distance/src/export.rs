use std::fmt::Display;

use itertools::Itertools;

use crate::{error::ValidationError, model::CalculationResult};

pub const CSV_HEADER: &str = "Position,List1Value,List2Value,Distance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Positions are written 1-based.
pub fn to_csv(result: &CalculationResult) -> String {
    let rows = result.pairs.iter().map(|pair| {
        format!("{},{},{},{}", pair.position + 1, pair.value1, pair.value2, pair.distance)
    });

    std::iter::once(CSV_HEADER.to_string()).chain(rows).join("\n") + "\n"
}

pub fn to_json(result: &CalculationResult) -> Result<String, ValidationError> {
    serde_json::to_string_pretty(result).map_err(|err| ValidationError::Internal(err.to_string()))
}

fn table_row(
    position: impl Display,
    list1: impl Display,
    list2: impl Display,
    distance: impl Display,
) -> String {
    format!("{position:>8}  {list1:>12}  {list2:>12}  {distance:>10}")
}

pub fn to_text(result: &CalculationResult) -> String {
    let summary = [
        format!("Total distance: {}", result.total_distance),
        format!(
            "Pairs: {} (processed in {:.3} ms)",
            result.pairs.len(),
            result.metadata.processing_time_ms
        ),
        String::new(),
        table_row("Position", "List 1", "List 2", "Distance"),
    ];
    let rows = result
        .pairs
        .iter()
        .map(|pair| table_row(pair.position + 1, pair.value1, pair.value2, pair.distance));

    summary.into_iter().chain(rows).join("\n") + "\n"
}

#[tracing::instrument(skip(result))]
pub fn render(result: &CalculationResult, format: ExportFormat) -> Result<String, ValidationError> {
    match format {
        ExportFormat::Text => Ok(to_text(result)),
        ExportFormat::Json => to_json(result),
        ExportFormat::Csv => Ok(to_csv(result)),
    }
}
