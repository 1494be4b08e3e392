use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use table_search::input::{parse_column, read_condition_from_path, read_rows_from_path};
use table_search::{AppConfig, AppError, Dependencies};
use table_search_repository::SearchError;
use table_search_shared::PageWindow;

#[derive(Parser)]
#[command(name = "table-search")]
#[command(about = "Index relational tables and search them through OpenSearch", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// OpenSearch URL (overrides OPENSEARCH_URL)
    #[arg(long, global = true)]
    opensearch_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an index with default settings and no mappings
    CreateIndex {
        /// Index name
        name: String,
    },
    /// Create an index for a table, mapping each column type
    CreateTableIndex {
        /// Database name
        database: String,
        /// Table name
        table: String,
        /// Column as NAME:TYPE, repeatable
        #[arg(long = "column", required = true, value_parser = parse_column_arg)]
        columns: Vec<(String, String)>,
    },
    /// Delete an index
    DeleteIndex {
        /// Index name
        name: String,
    },
    /// Load rows from a CSV file into an index
    Dump {
        /// Index name
        index: String,
        /// CSV file with a header line
        file: PathBuf,
    },
    /// Keyword search
    Search {
        /// Keyword to match anywhere in a field
        keyword: String,
        /// Index to search, repeatable
        #[arg(long = "index", required = true)]
        indexes: Vec<String>,
        /// Page to return; requires a single index
        #[arg(long)]
        page: Option<usize>,
        /// Page size used with --page
        #[arg(long, default_value = "10")]
        size: usize,
    },
    /// Structured search from a condition JSON file
    AdvancedSearch {
        /// Condition JSON file
        file: PathBuf,
        /// Page to return
        #[arg(long, default_value = "1")]
        page: usize,
        /// Page size
        #[arg(long, default_value = "10")]
        size: usize,
    },
    /// Fetch one document by id
    Get {
        /// Index name
        index: String,
        /// Document id
        id: String,
    },
    /// Check cluster health
    Health,
}

fn parse_column_arg(arg: &str) -> Result<(String, String), String> {
    parse_column(arg).map_err(|e| e.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match std::env::var("LOG_FORMAT") {
        Ok(format) if format.eq_ignore_ascii_case("json") => builder.json().init(),
        _ => builder.init(),
    }
}

fn window(page: usize, size: usize) -> Result<PageWindow, AppError> {
    Ok(PageWindow::new(page, size).map_err(SearchError::from)?)
}

async fn run(cli: Cli) -> Result<Value, AppError> {
    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.opensearch_url {
        config = config.with_opensearch_url(url);
    }

    let deps = Dependencies::new(config)?;
    let client = deps.client;

    let output = match cli.command {
        Commands::CreateIndex { name } => {
            let acknowledged = client.create_index(&name).await?;
            json!({ "index": name, "acknowledged": acknowledged })
        }
        Commands::CreateTableIndex {
            database,
            table,
            columns,
        } => {
            let columns: BTreeMap<String, String> = columns.into_iter().collect();
            let name = client.create_table_index(&database, &table, &columns).await?;
            json!({ "index": name })
        }
        Commands::DeleteIndex { name } => {
            let acknowledged = client.delete_index(&name).await?;
            json!({ "index": name, "acknowledged": acknowledged })
        }
        Commands::Dump { index, file } => {
            let rows = read_rows_from_path(&file)?;
            info!(index = %index, rows = rows.len(), file = %file.display(), "Dumping rows");
            serde_json::to_value(client.dump(&index, rows).await?)?
        }
        Commands::Search {
            keyword,
            indexes,
            page,
            size,
        } => match page {
            Some(page) => {
                let [index] = indexes.as_slice() else {
                    return Err(AppError::input("--page requires exactly one --index"));
                };
                let result = client
                    .comprehensive_page_search(&keyword, index, window(page, size)?)
                    .await?;
                serde_json::to_value(result)?
            }
            None => serde_json::to_value(client.comprehensive_search(&keyword, &indexes).await?)?,
        },
        Commands::AdvancedSearch { file, page, size } => {
            let condition = read_condition_from_path(&file)?;
            let result = client.advanced_search(&condition, window(page, size)?).await?;
            serde_json::to_value(result)?
        }
        Commands::Get { index, id } => {
            serde_json::to_value(client.get_document(&index, &id).await?)?
        }
        Commands::Health => json!({ "healthy": client.health_check().await? }),
    };

    Ok(output)
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!(error = %e, "Failed to render output");
                process::exit(1);
            }
        },
        Err(e) => {
            error!(error = %e, "Command failed");
            process::exit(1);
        }
    }
}
