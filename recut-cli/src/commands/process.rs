//! Process command implementation

use anyhow::{Context, Result};
use clap::Args;
use recut_engine::{
    ColumnMapping, ContextPolicy, ExecutionMode, Granularity, GroupKind, HashtagPolicy,
    StatementProcessor, TransformConfig,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{InputFormat, TableReader};
use crate::output::{CsvFormatter, JsonFormatter, MarkdownFormatter, OutputFormatter};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input table
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Input format (default: from file extension)
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Identifier column
    #[arg(long, value_name = "COL")]
    pub id: Option<String>,

    /// Text column
    #[arg(long, value_name = "COL")]
    pub text: Option<String>,

    /// Turn-order column
    #[arg(long, value_name = "COL")]
    pub turn: Option<String>,

    /// Speaker column
    #[arg(long, value_name = "COL")]
    pub speaker: Option<String>,

    /// Data kind (default: chat when a turn column is given, else post)
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Statement granularity
    #[arg(long, value_enum)]
    pub granularity: Option<GranularityArg>,

    /// Context policy
    #[arg(long, value_enum)]
    pub context: Option<ContextArg>,

    /// Rolling window size (number of previous statements)
    #[arg(long, value_name = "N")]
    pub window: Option<usize>,

    /// Do not emit hashtags as statements
    #[arg(long, conflicts_with = "separate_hashtags")]
    pub drop_hashtags: bool,

    /// Emit one statement per hashtag instead of one combined statement
    #[arg(long)]
    pub separate_hashtags: bool,

    /// Speaker label for post sentence rows
    #[arg(long, value_name = "LABEL")]
    pub post_label: Option<String>,

    /// Force parallel processing
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress warnings and logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV with an `ID,Turn,Sentence,Speaker,Context,Statement` header
    Csv,
    /// JSON array of row objects
    Json,
    /// Markdown table
    Markdown,
}

/// Data kind flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    /// One-to-one dialogue
    Chat,
    /// One-to-many post
    Post,
}

/// Granularity flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GranularityArg {
    /// One statement per sentence
    Sentence,
    /// One statement per turn or post
    Turn,
}

/// Context policy flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ContextArg {
    /// Current statement plus the previous N
    Rolling,
    /// Everything from the start of the group
    Whole,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting table processing");
        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let columns = self.column_mapping(&file_config)?;
        let transform = self.transform_config(&file_config, &columns)?;
        let mut engine = file_config.performance.to_engine_config();
        if self.parallel {
            engine.execution_mode = ExecutionMode::Parallel;
        }
        if let Some(threads) = self.threads {
            engine.threads = Some(threads);
        }

        let format = self
            .input_format
            .unwrap_or_else(|| InputFormat::from_path(&self.input));
        let table = TableReader::read_path(&self.input, format)?;
        log::info!(
            "Loaded {} row(s) from {}",
            table.len(),
            self.input.display()
        );

        let processor = StatementProcessor::builder()
            .config(transform)
            .engine_config(engine)
            .build()?;
        let output = processor.process(&table, &columns)?;

        if output.is_empty() && !self.quiet {
            eprintln!("warning: no rows produced; check your column selections and options");
        }

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };
        let mut formatter = self.create_formatter(writer)?;
        for row in &output.rows {
            formatter.format_row(row)?;
        }
        formatter.finish()?;

        log::info!(
            "Wrote {} row(s) in {:.2?}",
            output.report.rows,
            output.report.elapsed
        );
        Ok(())
    }

    /// Merge column flags over the config file
    pub fn column_mapping(&self, config: &CliConfig) -> Result<ColumnMapping> {
        let pick =
            |flag: &Option<String>, file: &Option<String>| flag.clone().or_else(|| file.clone());

        let id = pick(&self.id, &config.columns.id)
            .ok_or_else(|| CliError::ConfigError("no identifier column given (--id)".into()))?;
        let text = pick(&self.text, &config.columns.text)
            .ok_or_else(|| CliError::ConfigError("no text column given (--text)".into()))?;

        Ok(ColumnMapping {
            id,
            text,
            turn: pick(&self.turn, &config.columns.turn),
            speaker: pick(&self.speaker, &config.columns.speaker),
        })
    }

    /// Merge transform flags over the config file
    pub fn transform_config(
        &self,
        config: &CliConfig,
        columns: &ColumnMapping,
    ) -> Result<TransformConfig> {
        let file = config.transform.resolve(GroupKind::infer(columns));
        let mut builder = TransformConfig::builder()
            .kind(match self.kind {
                Some(KindArg::Chat) => GroupKind::Chat,
                Some(KindArg::Post) => GroupKind::Post,
                None => file.kind,
            })
            .granularity(file.granularity)
            .hashtags(file.hashtags)
            .post_speaker_label(file.post_speaker_label.clone());

        if let Some(granularity) = self.granularity {
            builder = builder.granularity(match granularity {
                GranularityArg::Sentence => Granularity::Sentence,
                GranularityArg::Turn => Granularity::Turn,
            });
        }

        let window = self.window.unwrap_or(match file.context {
            ContextPolicy::Rolling { window_size } => window_size,
            ContextPolicy::Whole => recut_engine::context::DEFAULT_WINDOW_SIZE,
        });
        builder = builder.context(match self.context {
            Some(ContextArg::Whole) => ContextPolicy::Whole,
            Some(ContextArg::Rolling) => ContextPolicy::rolling(window),
            None if self.window.is_some() => ContextPolicy::rolling(window),
            None => file.context,
        });

        if self.drop_hashtags {
            builder = builder.hashtags(HashtagPolicy::Drop);
        } else if self.separate_hashtags {
            builder = builder.hashtags(HashtagPolicy::Separate);
        }
        if let Some(label) = &self.post_label {
            builder = builder.post_speaker_label(label.clone());
        }

        Ok(builder.build()?)
    }

    fn create_formatter<'a>(
        &self,
        writer: Box<dyn Write + 'a>,
    ) -> Result<Box<dyn OutputFormatter + 'a>> {
        let formatter: Box<dyn OutputFormatter + 'a> = match self.format {
            OutputFormat::Csv => Box::new(CsvFormatter::new(writer)?),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)?),
        };
        Ok(formatter)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when run from tests
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}
