//! Live contract suite entry point
//!
//! Runs the scenario catalog against the API at `API_BASE_URL`.
//! Run with: cargo test --package conduit-e2e --test e2e -- [--tag @signup] [--id CON-001]
//!
//! Without `API_BASE_URL` the binary prints a skip notice and exits 0.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use conduit_e2e::suites::catalog;
use conduit_e2e::{
    DataGenerator, E2eConfig, E2eResult, RunnerConfig, Selection, SuiteRunner, TraceMode,
};

#[derive(Parser, Debug)]
#[command(name = "conduit-e2e")]
#[command(about = "Contract suite for Conduit-style blogging APIs")]
struct Args {
    /// Base URL of the API under test
    #[arg(long, env = "API_BASE_URL")]
    base_url: Option<String>,

    /// Run only cases carrying this tag (repeatable)
    #[arg(short, long)]
    tag: Vec<String>,

    /// Run only the case with this id or `<suite>/<id>` key (repeatable)
    #[arg(short, long)]
    id: Vec<String>,

    /// List the selected cases and exit
    #[arg(long)]
    list: bool,

    /// Extra attempts for a failing case
    #[arg(long, env = "RETRIES")]
    retries: Option<u32>,

    /// Repeat each selected case this many extra times
    #[arg(long, env = "REPEAT")]
    repeat: Option<u32>,

    /// Cases run at once
    #[arg(short, long, env = "WORKERS")]
    workers: Option<usize>,

    /// Per-case timeout in milliseconds
    #[arg(long, env = "TEST_TIMEOUT")]
    timeout: Option<u64>,

    /// on, off, retain-on-failure or on-first-retry
    #[arg(long, env = "TRACE_VALUE")]
    trace: Option<String>,

    /// Output directory for results
    #[arg(short, long, env = "E2E_OUTPUT_DIR")]
    output: Option<PathBuf>,

    /// Case id or @tag given the way libtest takes a filter
    filter: Option<String>,

    // Flags cargo may forward to every test binary
    #[allow(dead_code)]
    #[arg(long, hide = true)]
    nocapture: bool,
    #[allow(dead_code)]
    #[arg(long, short = 'q', hide = true)]
    quiet: bool,
    #[allow(dead_code)]
    #[arg(long, hide = true)]
    test_threads: Option<usize>,
    #[allow(dead_code)]
    #[arg(long, hide = true)]
    format: Option<String>,
}

impl Args {
    fn apply(&self, config: &mut E2eConfig) {
        if let Some(url) = &self.base_url {
            config.base_url = Some(url.clone());
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
        if let Some(repeat) = self.repeat {
            config.repeat_each = repeat;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(ms) = self.timeout {
            config.test_timeout = std::time::Duration::from_millis(ms);
        }
        if let Some(trace) = &self.trace {
            config.trace_mode = TraceMode::parse_lossy(trace);
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
    }

    fn selection(&self) -> Selection {
        let mut selection = Selection {
            tags: self.tag.clone(),
            ids: self.id.clone(),
        };
        match self.filter.as_deref() {
            Some(tag) if tag.starts_with('@') => selection.tags.push(tag.to_string()),
            Some(id) => selection.ids.push(id.to_string()),
            None => {}
        }
        selection
    }
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let mut config = E2eConfig::from_env()?;
    args.apply(&mut config);
    config.validate()?;

    let cases = catalog()?;
    let selection = args.selection();

    if args.list {
        for case in cases.iter().filter(|c| selection.matches(c)) {
            println!("{}  {}  [{}]", case.key, case.title, case.tags.join(" "));
        }
        return Ok(true);
    }

    if config.base_url.is_none() {
        println!("Skipping: API_BASE_URL is not set; {} case(s) not run", cases.len());
        return Ok(true);
    }

    let http = config.http_accessor()?;
    let generator = DataGenerator::from_config(&config)?;
    let runner = SuiteRunner::new(RunnerConfig::from(&config), http, generator, cases);

    let results = runner.run(&selection).await?;
    runner.write_results(&results)?;

    Ok(results.is_success())
}
