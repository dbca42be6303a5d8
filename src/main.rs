use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use ideaspace::analysis::pairwise::Grouping;
use ideaspace::analysis::BlankIdeas;
use ideaspace::config::Config;
use ideaspace::data::{ColumnMap, IdeaTable};
use ideaspace::output::report::{write_summary_csv, AnalysisReport};
use ideaspace::output::terminal;
use ideaspace::pipeline::{self, EmbeddingSource};
use ideaspace::stats::{Anova, LabeledSummary};

/// ideaspace: semantic distance analysis for idea generation studies.
///
/// Embeds participants' "uses" for objects with a sentence encoder and
/// measures how similar ideas are to each other and to their group norms.
#[derive(Parser)]
#[command(name = "ideaspace", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the all-MiniLM-L6-v2 sentence model (~90 MB)
    DownloadModel,

    /// Append embedding_0..embedding_383 columns to the input
    Embed(InputArgs),

    /// Cosine distance from each idea to its condition x object centroid
    Centroid {
        #[command(flatten)]
        args: AnalysisArgs,

        #[command(flatten)]
        norm: NormArgs,
    },

    /// Similarity of each idea to the rest of its condition x object group
    LeaveOneOut {
        #[command(flatten)]
        args: AnalysisArgs,

        #[command(flatten)]
        norm: NormArgs,
    },

    /// Pairwise similarity of ideas within groups, with a condition ANOVA
    Pairwise {
        #[command(flatten)]
        args: AnalysisArgs,

        /// Group by participant as well (within-person homogeneity)
        #[arg(long)]
        by_person: bool,
    },

    /// Draw a stratified sample of ideas per condition x object
    ///
    /// Groups are written in the order they first appear in the input, not
    /// sorted by condition and object. Rows with a missing condition or
    /// object are never sampled.
    Sample {
        #[command(flatten)]
        io: InputArgs,

        /// Ideas to draw from each condition x object group
        #[arg(long, default_value = "5")]
        per_group: usize,

        /// Random seed (same seed, same sample)
        #[arg(long, default_value_t = ideaspace::sampling::DEFAULT_SEED)]
        seed: u64,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Idea submissions CSV
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV (default: derived from the input file name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Column holding the idea text
    #[arg(long)]
    idea_column: Option<String>,

    /// Column holding the experimental condition
    #[arg(long)]
    condition_column: Option<String>,

    /// Column holding the object
    #[arg(long)]
    object_column: Option<String>,

    /// Column holding the participant id
    #[arg(long)]
    participant_column: Option<String>,
}

#[derive(Args)]
struct AnalysisArgs {
    #[command(flatten)]
    io: InputArgs,

    /// Reuse embedding_* columns from the input instead of running the model
    #[arg(long)]
    from_columns: bool,

    /// Also write the per-condition summary to this CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print the summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct NormArgs {
    /// Leave blank ideas out of the group norm (they count by default)
    #[arg(long)]
    exclude_blank_from_norm: bool,
}

impl NormArgs {
    fn blanks(&self) -> BlankIdeas {
        if self.exclude_blank_from_norm {
            BlankIdeas::Excluded
        } else {
            BlankIdeas::InNorm
        }
    }
}

impl InputArgs {
    fn columns(&self, config: &Config) -> ColumnMap {
        let base = &config.columns;
        ColumnMap {
            idea: self.idea_column.clone().unwrap_or_else(|| base.idea.clone()),
            condition: self
                .condition_column
                .clone()
                .unwrap_or_else(|| base.condition.clone()),
            object: self
                .object_column
                .clone()
                .unwrap_or_else(|| base.object.clone()),
            participant: self
                .participant_column
                .clone()
                .unwrap_or_else(|| base.participant.clone()),
        }
    }

    fn load(&self, config: &Config) -> Result<IdeaTable> {
        let table = IdeaTable::read_csv(&self.input, &self.columns(config))?;
        if table.is_empty() {
            anyhow::bail!("{} has no rows", self.input.display());
        }
        info!(rows = table.len(), input = %self.input.display(), "Loaded ideas");
        Ok(table)
    }

    fn output_or(&self, suffix: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| pipeline::derive_output(&self.input, suffix))
    }
}

impl AnalysisArgs {
    fn source(&self, config: &Config) -> Result<EmbeddingSource> {
        if self.from_columns {
            return Ok(EmbeddingSource::Columns);
        }
        config.require_model()?;
        Ok(EmbeddingSource::Model {
            model_dir: config.model_dir.clone(),
            batch_size: config.batch_size,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ideaspace=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::DownloadModel => {
            println!("Downloading ONNX model...");
            println!("  Destination: {}", config.model_dir.display());

            ideaspace::embeddings::download::download_model(&config.model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `ideaspace embed` or any analysis command.");
        }

        Commands::Embed(io) => {
            config.require_model()?;
            let table = io.load(&config)?;
            let source = EmbeddingSource::Model {
                model_dir: config.model_dir.clone(),
                batch_size: config.batch_size,
            };
            let embeddings = pipeline::resolve_embeddings(&table, &source).await?;

            let output = io.output_or("with_embeddings");
            let dim = pipeline::per_row::run_embed(&table, &embeddings, &output)?;

            println!(
                "\n{}",
                format!("Wrote {} rows x {dim} embedding columns to {}", table.len(), output.display())
                    .bold()
            );
        }

        Commands::Centroid { args, norm } => {
            let table = args.io.load(&config)?;
            let embeddings = pipeline::resolve_embeddings(&table, &args.source(&config)?).await?;

            let output = args.io.output_or("centroid_distance");
            let result =
                pipeline::per_row::run_centroid(&table, &embeddings, norm.blanks(), &output)?;

            report(
                &args,
                "centroid",
                "Semantic distance to condition x object centroid",
                table.len(),
                &output,
                &result.summary,
            )?;
        }

        Commands::LeaveOneOut { args, norm } => {
            let table = args.io.load(&config)?;
            let embeddings = pipeline::resolve_embeddings(&table, &args.source(&config)?).await?;

            let output = args.io.output_or("leave_one_out");
            let result =
                pipeline::per_row::run_leave_one_out(&table, &embeddings, norm.blanks(), &output)?;

            report(
                &args,
                "leave-one-out",
                "Similarity to the rest of the condition x object group",
                table.len(),
                &output,
                &result.summary,
            )?;
        }

        Commands::Pairwise { args, by_person } => {
            let table = args.io.load(&config)?;
            let grouping = if by_person {
                table.require_participant()?;
                Grouping::Person
            } else {
                Grouping::ConditionObject
            };
            let embeddings = pipeline::resolve_embeddings(&table, &args.source(&config)?).await?;

            let suffix = if by_person {
                "person_pairwise"
            } else {
                "pairwise"
            };
            let output = args.io.output_or(suffix);
            let summary_output = args
                .summary
                .clone()
                .unwrap_or_else(|| pipeline::derive_output(&args.io.input, &format!("{suffix}_summary")));

            let result =
                pipeline::pairwise::run(&table, &embeddings, grouping, &output, &summary_output)?;
            info!(pairs = result.pairs.len(), "Pairwise analysis complete");

            if args.json {
                print_json(
                    "pairwise",
                    &args.io.input,
                    &output,
                    result.pairs.len(),
                    &result.summary,
                    result.anova.as_ref(),
                )?;
            } else {
                terminal::display_summary("Pairwise similarity by condition", &result.summary);
                terminal::display_anova(result.anova.as_ref());
                println!(
                    "\n{}",
                    format!(
                        "{} pairs saved to: {}\nSummary saved to: {}",
                        result.pairs.len(),
                        output.display(),
                        summary_output.display()
                    )
                    .bold()
                );
            }
        }

        Commands::Sample {
            io,
            per_group,
            seed,
        } => {
            let table = io.load(&config)?;
            let output = io.output_or("sample");
            let sampled = pipeline::sample::run(&table, per_group, seed, &output)?;

            terminal::display_sample(&sampled);
            println!(
                "{}",
                format!("Sampled ideas saved to: {}", output.display()).bold()
            );
        }
    }

    Ok(())
}

/// Show or export the summary of a per-row analysis.
fn report(
    args: &AnalysisArgs,
    analysis: &str,
    title: &str,
    rows: usize,
    output: &Path,
    summary: &[LabeledSummary],
) -> Result<()> {
    if let Some(path) = &args.summary {
        write_summary_csv(path, summary)?;
    }

    if args.json {
        return print_json(analysis, &args.io.input, output, rows, summary, None);
    }

    terminal::display_summary(title, summary);
    if let Some(path) = &args.summary {
        println!("\nSummary saved to: {}", path.display());
    }
    println!(
        "\n{}",
        format!("Results saved to: {}", output.display()).bold()
    );
    Ok(())
}

fn print_json(
    analysis: &str,
    input: &Path,
    output: &Path,
    rows: usize,
    summary: &[LabeledSummary],
    anova: Option<&Anova>,
) -> Result<()> {
    let report = AnalysisReport {
        analysis,
        input: input.display().to_string(),
        output: output.display().to_string(),
        rows,
        summary,
        anova,
    };
    println!("{}", report.to_json()?);
    Ok(())
}
