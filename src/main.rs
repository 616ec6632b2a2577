use clap::{Parser, Subcommand};
use site_rebrand::enhance::{ChatEnhancer, Enhancer, Passthrough};
use site_rebrand::fetch::SourceFetcher;
use site_rebrand::imaging::RustOptimizer;
use site_rebrand::pipeline::{self, Collaborators, RunRequest};
use site_rebrand::types::ImageAssets;
use site_rebrand::{config, content, output};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "site-rebrand")]
#[command(about = "Rebrand a web page into a self-contained static site archive")]
#[command(long_about = "\
Rebrand a web page into a self-contained static site archive

The source page is fetched, its logo and banner are swapped for uploaded
images, its navigation is replaced with links to generated section pages,
and every outbound link and form is pointed at a local placeholder page.

Archive layout:

  website_<uuid>.zip
  ├── modified_website.html        # The rebranded page
  ├── construction.html            # Target of every neutralized link
  ├── submit.html                  # Target of every neutralized form
  ├── images/                      # Banner and logo (optimized when possible)
  └── sections/
      ├── <section>.html           # One page per selected content-map key
      └── submit.html

The content map is a JSON object: {\"about\": \"text\", \"contact\": {\"content\": \"text\"}}.

Run 'site-rebrand gen-config' to generate a documented site-rebrand.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./site-rebrand.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Page to rebrand: http(s) URL or local HTML file
    #[arg(long)]
    source: String,
    /// Content map JSON file
    #[arg(long)]
    content: PathBuf,
    /// Section key to include (repeatable; default: every key)
    #[arg(long = "section")]
    sections: Vec<String>,
    /// Banner image file name in the upload directory
    #[arg(long)]
    banner: Option<String>,
    /// Logo image file name in the upload directory
    #[arg(long)]
    logo: Option<String>,
    /// Upload directory (overrides config)
    #[arg(long)]
    upload_dir: Option<PathBuf>,
    /// Output directory for the archive (overrides config)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Rebrand a page and write the archive
    Build(BuildArgs),
    /// List the section keys of a content map
    Sections {
        /// Content map JSON file
        #[arg(long)]
        content: PathBuf,
    },
    /// Print a stock site-rebrand.toml with all options documented
    GenConfig,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_enhancer(config: &config::EnhanceConfig) -> Box<dyn Enhancer> {
    if !config.enabled {
        return Box::new(Passthrough);
    }
    match ChatEnhancer::from_config(config) {
        Ok(enhancer) => Box::new(enhancer),
        Err(e) => {
            tracing::warn!(error = %e, "enhancement disabled");
            Box::new(Passthrough)
        }
    }
}

fn build(args: BuildArgs, mut config: config::RebrandConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = args.upload_dir {
        config.paths.upload_dir = dir;
    }
    if let Some(dir) = args.output {
        config.paths.output_dir = dir;
    }

    let fetcher = SourceFetcher::new(Duration::from_secs(config.fetch.timeout_secs))?;
    let optimizer = RustOptimizer::new();
    let enhancer = build_enhancer(&config.enhance);
    let collaborators = Collaborators {
        fetcher: &fetcher,
        optimizer: &optimizer,
        enhancer: enhancer.as_ref(),
    };

    let request = RunRequest {
        source: args.source,
        content_path: args.content,
        sections: (!args.sections.is_empty()).then_some(args.sections),
        images: ImageAssets {
            banner: args.banner,
            logo: args.logo,
        },
    };

    let report = pipeline::run(&request, &config, &collaborators)?;
    output::print_run_report(&report);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Build(args) => {
            let config = config::load_config(cli.config.as_deref())?;
            build(args, config)?;
        }
        Command::Sections { content } => {
            let map = content::load_content_map(&content)?;
            output::print_sections_list(&map);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
