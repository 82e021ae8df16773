pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{LexiconShape, OutputFormat};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "lexicon-etl")]
#[command(about = "Parse a frequency dictionary into validated CSV, TSV and JSON tables")]
pub struct CliConfig {
    /// Lexicon source file (UTF-8, tab separated)
    #[arg(long)]
    pub input: String,

    #[arg(long, value_enum, default_value_t = LexiconShape::Chinese)]
    pub shape: LexiconShape,

    /// Override the number of header lines skipped before the first entry
    #[arg(long)]
    pub header_lines: Option<usize>,

    /// Base name of the output files (defaults to the input file stem)
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [OutputFormat::Csv, OutputFormat::Tsv, OutputFormat::Json]
    )]
    pub formats: Vec<OutputFormat>,

    /// Bundle all outputs into a single ZIP file
    #[arg(long)]
    pub zip: bool,

    /// Number of entries to print after a successful run
    #[arg(long, default_value = "10")]
    pub preview: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| {
                std::path::Path::new(&self.input)
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| self.shape.to_string())
    }

    fn input_path(&self) -> &str {
        &self.input
    }

    fn shape(&self) -> LexiconShape {
        self.shape
    }

    fn header_lines(&self) -> Option<usize> {
        self.header_lines
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn compress(&self) -> bool {
        self.zip
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_unique_names("name", [self.source_name().as_str()])?;
        Ok(())
    }
}
