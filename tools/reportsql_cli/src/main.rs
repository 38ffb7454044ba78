use std::io::Read;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use reportsql::{
    assemble, parser, ClickHouseConfig, ClickHouseExecutor, CompiledQuery, Executor,
    QueryRequest, ReportRegistry,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reportsql")]
#[command(about = "Compile analytics report requests into parameterized ClickHouse SQL")]
#[command(version)]
struct Args {
    /// Report definitions (YAML)
    #[arg(long, env = "REPORTSQL_REPORTS", default_value = "reports.yaml", global = true)]
    reports: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the reports defined in the reports file
    List,
    /// Print the compiled SQL and bound parameters for a request
    Compile {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Compile a request and run it against ClickHouse
    Run {
        #[command(flatten)]
        query: QueryArgs,

        /// ClickHouse HTTP endpoint (overrides CLICKHOUSE_URL)
        #[arg(long)]
        url: Option<String>,

        /// Database to query (overrides CLICKHOUSE_DATABASE)
        #[arg(long)]
        database: Option<String>,

        /// User (overrides CLICKHOUSE_USER); the password is only read from CLICKHOUSE_PASSWORD
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(ClapArgs)]
struct QueryArgs {
    /// Report name
    report: String,

    /// Request JSON file, or '-' for stdin
    #[arg(long, default_value = "-")]
    request: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let registry = parser::parse_file(&args.reports)
        .with_context(|| format!("Failed to load reports from '{}'", args.reports))?;

    match args.command {
        Commands::List => handle_list(&registry),
        Commands::Compile { query } => handle_compile(&registry, &query),
        Commands::Run { query, url, database, user } => {
            let mut config = ClickHouseConfig::from_env();
            if let Some(url) = url {
                config.url = url;
            }
            if database.is_some() {
                config.database = database;
            }
            if user.is_some() {
                config.user = user;
            }
            handle_run(&registry, &query, &config).await
        }
    }
}

fn handle_list(registry: &ReportRegistry) -> anyhow::Result<()> {
    for name in registry.names() {
        if let Some(config) = registry.get(name) {
            println!("{}\t{}", name, config.table);
        }
    }
    Ok(())
}

fn handle_compile(registry: &ReportRegistry, query: &QueryArgs) -> anyhow::Result<()> {
    let compiled = compile(registry, query)?;
    println!("{}", serde_json::to_string_pretty(&compiled)?);
    Ok(())
}

async fn handle_run(
    registry: &ReportRegistry,
    query: &QueryArgs,
    config: &ClickHouseConfig,
) -> anyhow::Result<()> {
    let compiled = compile(registry, query)?;
    let executor = ClickHouseExecutor::from_config(config);

    let rows = executor
        .execute(&compiled)
        .await
        .with_context(|| format!("Report '{}' failed", query.report))?;

    tracing::info!(report = %query.report, rows = rows.len(), "report finished");
    for row in rows {
        println!("{}", serde_json::to_string(&row)?);
    }
    Ok(())
}

fn compile(registry: &ReportRegistry, query: &QueryArgs) -> anyhow::Result<CompiledQuery> {
    let config = registry
        .get(&query.report)
        .with_context(|| format!("Report '{}' not found", query.report))?;
    let request = read_request(&query.request)?;
    Ok(assemble(config, &request))
}

fn read_request(source: &str) -> anyhow::Result<QueryRequest> {
    let body = if source == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read request from stdin")?;
        body
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read request file '{}'", source))?
    };
    serde_json::from_str(&body).context("Invalid query request")
}
