mod echo;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use doclens_core::{AnalyzerConfig, AuditConfig, DocAudit, ModelConfig, save_results};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Audit a documentation page with LLM-backed quality scoring
#[derive(Parser, Debug)]
#[command(name = "doclens")]
#[command(author = "Doclens Contributors")]
#[command(version)]
#[command(about = "Audit documentation pages with LLM-backed quality scoring", long_about = None)]
struct Args {
    /// Documentation URL to analyze (must start with http:// or https://)
    #[arg(value_name = "URL")]
    url: String,

    /// Also generate a revised version of the page content
    #[arg(short, long)]
    revise: bool,

    /// Directory for result snapshots
    #[arg(short, long, default_value = "output", value_name = "DIR")]
    output_dir: PathBuf,

    /// Directory holding the prompt templates
    #[arg(long, default_value = "prompts", value_name = "DIR")]
    prompts_dir: PathBuf,

    /// Model identifier
    #[arg(long, default_value = doclens_core::DEFAULT_MODEL, value_name = "MODEL")]
    model: String,

    /// Model request timeout in seconds
    #[arg(long, default_value = "120", value_name = "SECS")]
    timeout: u64,

    /// Fixed wait after navigation for client-side rendering, in seconds
    #[arg(long, default_value = "15", value_name = "SECS")]
    settle_delay: u64,

    /// Custom User-Agent presented to the target site
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Skip writing result files
    #[arg(long)]
    no_save: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    if args.verbose {
        echo::print_banner();
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("doclens_core=debug,doclens=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    if !args.url.starts_with("http://") && !args.url.starts_with("https://") {
        bail!("please provide a valid URL starting with http:// or https://");
    }
    Url::parse(&args.url).with_context(|| format!("invalid URL: {}", args.url))?;

    let api_key = std::env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY is not set; export it or add it to a .env file")?;

    let mut model = ModelConfig::new(api_key);
    model.model = args.model;
    model.timeout = Duration::from_secs(args.timeout);

    let mut analyzer = AnalyzerConfig::new(model);
    analyzer.template_dir = args.prompts_dir;

    let mut config = AuditConfig::new(analyzer);
    config.browser.settle_delay = Duration::from_secs(args.settle_delay);
    if let Some(user_agent) = args.user_agent {
        config.browser.user_agent = user_agent;
    }

    let audit = DocAudit::new(config).context("failed to initialize the audit pipeline")?;

    let total = if args.revise { 3 } else { 2 };

    echo::print_step(1, total, &format!("Scraping and analyzing {}", args.url.bright_white().underline()));
    let outcome = audit.run(&args.url).await.context("audit failed")?;

    if outcome.report.degraded {
        echo::print_warning("Analysis degraded: the model call failed and a fallback record was substituted");
    }

    echo::print_report(&outcome);

    let revision = if args.revise {
        echo::print_step(2, total, "Generating revised content");
        let text = audit
            .revise(&outcome.content, &outcome.report.analysis)
            .await
            .context("revision failed")?;

        println!("\n{}", "=".repeat(60).dimmed());
        println!("{}", "REVISED CONTENT".bold());
        println!("{}", "=".repeat(60).dimmed());
        println!("{}", text);
        Some(text)
    } else {
        None
    };

    if !args.no_save {
        echo::print_step(total, total, "Saving results");
        let paths = save_results(&args.output_dir, &outcome.url, &outcome.report.analysis, revision.as_deref())
            .context("failed to save results")?;

        echo::print_success(&format!("Analysis written to {}", paths.analysis.display()));
        if let Some(path) = paths.revision {
            echo::print_success(&format!("Revision written to {}", path.display()));
        }
    }

    Ok(())
}
