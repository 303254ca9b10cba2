mod output;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use flexmls_api::{Client, RequestOptions};

use crate::output::{print_results, OutputFormat};

#[derive(Parser)]
#[command(name = "flexmls")]
#[command(about = "Query the flexmls listing API")]
struct Cli {
    /// Output format: pretty or compact
    #[arg(long, default_value = "pretty", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a resource
    Get(RequestArgs),
    /// GET the total row count of a resource
    Count(RequestArgs),
    /// POST a JSON body to a resource
    Post(BodyArgs),
    /// PUT a JSON body to a resource
    Put(BodyArgs),
    /// DELETE a resource
    Delete(RequestArgs),
}

#[derive(Args)]
struct RequestArgs {
    /// Resource path without the version segment (e.g. /listings)
    path: String,

    /// Extra request parameter as KEY=VALUE (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Filter expression (e.g. "City Eq 'Fargo'")
    #[arg(long)]
    filter: Option<String>,

    /// Comma separated fields to return
    #[arg(long)]
    select: Option<String>,

    /// Page number; also asks for pagination metadata
    #[arg(long)]
    page: Option<u64>,

    /// Results per page
    #[arg(long)]
    limit: Option<u64>,
}

#[derive(Args)]
struct BodyArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// JSON body; it is wrapped in the "D" envelope before sending
    #[arg(long)]
    data: String,
}

impl RequestArgs {
    fn options(&self) -> Result<RequestOptions> {
        let mut options = RequestOptions::new();
        for param in &self.params {
            let (key, value) = parse_param(param)?;
            options = options.with_param(key, value);
        }
        if let Some(filter) = &self.filter {
            options = options.with_filter(filter);
        }
        if let Some(select) = &self.select {
            options = options.with_select(select);
        }
        if let Some(page) = self.page {
            options = options.with_pagination().with_page(page);
        }
        if let Some(limit) = self.limit {
            options = options.with_limit(limit);
        }
        Ok(options)
    }
}

fn parse_param(param: &str) -> Result<(&str, &str)> {
    match param.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(anyhow!("Invalid parameter '{}', expected KEY=VALUE", param)),
    }
}

fn parse_body(data: &str) -> Result<serde_json::Value> {
    serde_json::from_str(data).context("--data is not valid JSON")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flexmls=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "compact" => OutputFormat::Compact,
        _ => OutputFormat::Pretty,
    };

    let client = Client::from_env()?;

    let results = match &cli.command {
        Commands::Get(args) => client.get(&args.path, &args.options()?).await?,
        Commands::Count(args) => {
            let options = args.options()?.with_pagination_count();
            client.get(&args.path, &options).await?
        }
        Commands::Post(args) => {
            let body = parse_body(&args.data)?;
            client
                .post(&args.request.path, &body, &args.request.options()?)
                .await?
        }
        Commands::Put(args) => {
            let body = parse_body(&args.data)?;
            client
                .put(&args.request.path, &body, &args.request.options()?)
                .await?
        }
        Commands::Delete(args) => client.delete(&args.path, &args.options()?).await?,
    };

    print_results(&results, &format)?;
    Ok(())
}
