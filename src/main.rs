use clap::{Parser, Subcommand, builder::styling};
use eyre::{Result, WrapErr};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use titanic_etl::cli::{run_all, run_extract, run_load, run_query};
use titanic_etl::config::{
    Config, DEFAULT_DATASET_PATH, DEFAULT_MAX_ROWS, DEFAULT_REPORT_PATH, DEFAULT_SOURCE_URL,
    DatabricksConfig, ExtractConfig, ReportConfig,
};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Titanic ETL: pull the passenger list, load it into Databricks SQL and report on it
#[derive(Parser)]
#[command(name = "titanic-etl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Run a single stage; without one, extract, load and query run in order
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the dataset and keep its first rows
    Extract {
        /// CSV resource to download
        #[arg(short, long, default_value = DEFAULT_SOURCE_URL)]
        url: String,

        /// File to write the truncated dataset to
        #[arg(short, long, default_value = DEFAULT_DATASET_PATH)]
        output: PathBuf,

        /// Rows to keep, header included
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ROWS)]
        lines: usize,
    },

    /// Create the Titanic table if needed and insert an extracted dataset
    Load {
        /// Extracted CSV file
        #[arg(default_value = DEFAULT_DATASET_PATH)]
        dataset: PathBuf,
    },

    /// Run the report queries and rewrite the Markdown report
    Query {
        /// Report file to generate
        #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
        report: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let dotenv = dotenvy::from_filename(&args.env);

    let log_level = match args.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match dotenv {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {
            log::debug!("No {} file, using the process environment", args.env)
        }
        Err(e) => return Err(e).wrap_err_with(|| format!("Failed to read {}", args.env)),
    }

    match args.command {
        None => {
            let config = Config::from_env().wrap_err("Failed to load configuration")?;
            run_all(&config).await?;
        }
        Some(Commands::Extract { url, output, lines }) => {
            log::info!(
                "Extracting {} row(s) from {}",
                lines.cyan(),
                url.bright_black()
            );
            let config = ExtractConfig {
                url,
                file_path: output,
                max_rows: lines,
            };
            run_extract(&config).await?;
        }
        Some(Commands::Load { dataset }) => {
            let databricks =
                DatabricksConfig::from_env().wrap_err("Failed to load configuration")?;
            run_load(&databricks, &dataset).await?;
        }
        Some(Commands::Query { report }) => {
            let databricks =
                DatabricksConfig::from_env().wrap_err("Failed to load configuration")?;
            run_query(&databricks, &ReportConfig { path: report }).await?;
        }
    }

    Ok(())
}
