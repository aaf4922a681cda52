use clap::{Parser, Subcommand};
use sitefix::commands::{self, PatchKind};
use sitefix::runner::{self, RunOptions};
use sitefix::templates::Templates;
use sitefix::{config, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; called exactly once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "sitefix")]
#[command(about = "Batch maintenance patches for news-site HTML pages")]
#[command(long_about = "\
Batch maintenance patches for news-site HTML pages

Each command applies one fix to the pages under the site root, prints a line
per page, and ends with a fixed/skipped/failed summary. Every fix checks for
its own output first, so running a command twice is harmless.

Commands and the pages they touch:

  main-tags        every *.html       restore the broken <main> archive tag
  main-tags-list   [main_tags].files  same fix, whitespace-tolerant
  ui-script        every *.html       add the theme toggle / mobile menu script
  hero             [hero].target      swap the home page header and hero block
  layout           *.html minus       replace header and footer markup
                   [layout].exclude

Run 'sitefix gen-config' to print a documented sitefix.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root holding the HTML pages
    #[arg(long, default_value = "News", global = true)]
    root: PathBuf,

    /// Config file [default: <root>/sitefix.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report what would change without writing any file
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print the run report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fix the malformed <main> tag on every page
    MainTags,
    /// Fix the malformed <main> tag on the configured page list
    MainTagsList,
    /// Add the theme toggle and mobile menu script after main.min.js
    UiScript,
    /// Replace the home page header and hero section
    Hero,
    /// Replace headers and footers with the standard site chrome
    Layout,
    /// Print a stock sitefix.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let kind = match cli.command {
        Command::MainTags => PatchKind::MainTags,
        Command::MainTagsList => PatchKind::MainTagsList,
        Command::UiScript => PatchKind::UiScript,
        Command::Hero => PatchKind::Hero,
        Command::Layout => PatchKind::Layout,
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
    };

    let config_path = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(format!("config file not found: {}", path.display()).into());
        }
        Some(path) => path.clone(),
        None => cli.root.join(config::CONFIG_FILENAME),
    };
    let site_config = config::load_config(&config_path)?;
    let templates = Templates::load(&site_config.templates)?;
    init_thread_pool(&site_config.processing);

    let plan = commands::plan(kind, &cli.root, &site_config, &templates)?;
    let report = runner::run(
        plan.patch.as_ref(),
        &plan.files,
        RunOptions {
            dry_run: cli.dry_run,
        },
    );

    if cli.json {
        output::print_run_json(&report)?;
    } else {
        output::print_run(&report);
    }

    Ok(())
}

/// Log to stderr so stdout carries only the report.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
