// claimflow CLI - batch partner claim validation

mod exit_codes;
mod job;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use claimflow_io::load;
use claimflow_pipeline::model::PipelineInput;
use exit_codes::{pipeline_exit_code, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};
use job::JobConfig;

#[derive(Parser)]
#[command(name = "claimflow")]
#[command(about = "Validate partner warranty/rebate claims against reference spreadsheets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the validation batch and write the annotated output workbook
    #[command(after_help = "\
Examples:
  claimflow run
  claimflow run --dir exports/march
  claimflow run --config march.job.toml
  claimflow run --json > summary.json")]
    Run {
        /// Path to a TOML job config overriding the default filenames
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory containing the input files (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Write the output workbook here instead of the configured path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the run summary as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Check that all input files exist and required columns are present
    #[command(after_help = "\
Examples:
  claimflow validate
  claimflow validate --config march.job.toml")]
    Validate {
        /// Path to a TOML job config overriding the default filenames
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory containing the input files (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, dir, output, json } => cmd_run(config, dir, output, json),
        Commands::Validate { config, dir } => cmd_validate(config, dir),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    fn pipeline(err: claimflow_pipeline::PipelineError) -> Self {
        let hint = match &err {
            claimflow_pipeline::PipelineError::MissingColumn { table, .. }
                if table == "installation" =>
            {
                Some(
                    "installation headers are matched after trim/lowercase/underscore \
                     normalization; check the file's first row"
                        .to_string(),
                )
            }
            _ => None,
        };
        Self { code: pipeline_exit_code(&err), message: err.to_string(), hint }
    }
}

/// Load the job config (explicit file, or defaults) and resolve paths
/// against the config's directory or `--dir`.
fn resolve_job(config: Option<PathBuf>, dir: Option<PathBuf>) -> Result<JobConfig, CliError> {
    let job = match &config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
            JobConfig::from_toml(&text).map_err(CliError::pipeline)?
        }
        None => JobConfig::default(),
    };

    if let Some(dir) = &dir {
        if !dir.is_dir() {
            return Err(CliError {
                code: EXIT_USAGE,
                message: format!("--dir {} is not a directory", dir.display()),
                hint: None,
            });
        }
    }

    let base = dir
        .or_else(|| {
            config
                .as_deref()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
        })
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(job.resolved(&base))
}

/// Read the six input files into typed record sets. Returns the claims
/// header row as well, for column pass-through in the output.
fn load_input(job: &JobConfig) -> Result<(PipelineInput, Vec<String>), CliError> {
    // Every input has a header row. The sales header is discarded rather
    // than name-matched; its columns are accessed positionally.
    let claims_table = claimflow_io::read_table(&job.claims, true).map_err(CliError::pipeline)?;
    let promo_table = claimflow_io::read_table(&job.promotions, true).map_err(CliError::pipeline)?;
    let sales_table = claimflow_io::read_table(&job.sales, true).map_err(CliError::pipeline)?;
    let billing_table = claimflow_io::read_table(&job.billing, true).map_err(CliError::pipeline)?;
    let prior_table =
        claimflow_io::read_table(&job.prior_claims, true).map_err(CliError::pipeline)?;
    let install_table =
        claimflow_io::read_table(&job.installations, true).map_err(CliError::pipeline)?;

    let (claims, claims_have_model_no) =
        load::load_claims(&claims_table).map_err(CliError::pipeline)?;

    let input = PipelineInput {
        claims,
        claims_have_model_no,
        promos: load::load_promos(&promo_table).map_err(CliError::pipeline)?,
        sales: load::load_sales(&sales_table),
        billing: load::load_billing(&billing_table).map_err(CliError::pipeline)?,
        prior_claims: load::load_prior_claims(&prior_table).map_err(CliError::pipeline)?,
        installations: load::load_installations(&install_table).map_err(CliError::pipeline)?,
    };

    Ok((input, claims_table.headers))
}

fn cmd_run(
    config: Option<PathBuf>,
    dir: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let job = resolve_job(config, dir)?;
    let (input, claims_headers) = load_input(&job)?;

    let result = claimflow_pipeline::run(&input);

    let output_path = output.unwrap_or_else(|| job.output.clone());
    claimflow_io::output::write_output(&output_path, &claims_headers, &result.claims)
        .map_err(CliError::pipeline)?;

    if json {
        let json_str = serde_json::to_string_pretty(&serde_json::json!({
            "meta": result.meta,
            "summary": result.summary,
        }))
        .map_err(|e| CliError {
            code: EXIT_ERROR,
            message: format!("JSON serialization error: {e}"),
            hint: None,
        })?;
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "validated {} claims: {} eligible, {} already claimed, {} NLC over billing, \
         {} installed earlier, {} missing data; total support {:.2}",
        s.total_claims,
        s.eligible,
        s.already_claimed,
        s.nlc_exceeds_billing,
        s.installed_earlier,
        s.null_support,
        s.total_support,
    );
    eprintln!("wrote {}", output_path.display());

    Ok(())
}

fn cmd_validate(config: Option<PathBuf>, dir: Option<PathBuf>) -> Result<(), CliError> {
    let job = resolve_job(config, dir)?;

    for (name, path) in job.inputs() {
        if !path.exists() {
            return Err(CliError::io(format!(
                "{name} file not found: {}",
                path.display()
            )));
        }
    }

    // Loading exercises every structural requirement without writing output.
    let (input, _) = load_input(&job)?;

    eprintln!(
        "valid: {} claims, {} sales, {} promos, {} billing, {} prior claims, {} installations",
        input.claims.len(),
        input.sales.len(),
        input.promos.len(),
        input.billing.len(),
        input.prior_claims.len(),
        input.installations.len(),
    );

    Ok(())
}
