use std::path::PathBuf;

use chronicler_distance::{parser::DEFAULT_MAX_BYTES, ExportFormat, ParseLimits, UploadPolicy};
use clap::{builder::RangedU64ValueParser, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "chronicler",
    version,
    about = "Total distance between two independently sorted integer columns"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CHRONICLER_MAX_BYTES",
        default_value_t = DEFAULT_MAX_BYTES,
        help = "Largest input accepted, in bytes"
    )]
    pub max_bytes: usize,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate the total distance for a .txt file
    Calculate {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[arg(long, short, help = "Write the export here instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Show the first rows of a .txt file as parsed
    Preview {
        file: PathBuf,
        #[arg(
            long,
            default_value_t = 10,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        lines: usize,
    },
    /// Answer a JSON request read from a file or stdin
    Api {
        #[arg(long, help = "Request body file; stdin when omitted")]
        input: Option<PathBuf>,
    },
    /// Render text in Tengwar
    Transliterate {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Csv,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ExportFormat::Text,
            Format::Json => ExportFormat::Json,
            Format::Csv => ExportFormat::Csv,
        }
    }
}

impl Cli {
    pub fn limits(&self) -> ParseLimits {
        ParseLimits::default().with_max_bytes(self.max_bytes)
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::default().with_max_bytes(self.max_bytes)
    }
}
