pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod upload;
pub mod wire;

pub use engine::{calculate, total_distance};
pub use error::{ErrorKind, ValidationError};
pub use export::ExportFormat;
pub use model::{CalculationResult, DistancePair, Metadata, ParsedLists};
pub use parser::{parse, parse_with_limits, preview, ParseLimits};
pub use upload::UploadPolicy;

/// Parses `input` and returns the total distance as text.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> miette::Result<String> {
    let lists = parse(input)?;
    let result = calculate(&lists)?;
    Ok(result.total_distance.to_string())
}
