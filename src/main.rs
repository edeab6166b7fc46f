use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use mdsite::{Config, Page, site};

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Build a static site from Markdown files")]
struct Cli {
    /// Site config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page and copy static files into the output directory
    Build {
        /// Markdown content directory
        #[arg(long)]
        content: Option<PathBuf>,

        /// Static asset directory
        #[arg(long = "static")]
        static_dir: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// HTML template with {{ Title }} and {{ Content }} placeholders
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Convert a single Markdown file
    Render {
        /// Input Markdown file
        input: PathBuf,

        /// Wrap the body in this template (body HTML only if omitted)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the title of a Markdown file
    Title {
        /// Input Markdown file
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build {
            content,
            static_dir,
            output,
            template,
        } => {
            let mut config = Config::load(&cli.config)?;
            let paths = &mut config.paths;
            if let Some(content) = content {
                paths.content = content;
            }
            if let Some(static_dir) = static_dir {
                paths.static_dir = static_dir;
            }
            if let Some(output) = output {
                paths.output = output;
            }
            if let Some(template) = template {
                paths.template = template;
            }

            let report = site::build(&config)?;
            println!(
                "Generated {} pages ({} skipped), copied {} static files into {}",
                report.pages.len(),
                report.skipped.len(),
                report.copied,
                config.paths.output.display()
            );
            for (path, reason) in &report.skipped {
                println!("  skipped {}: {reason}", path.display());
            }
        }

        Command::Render {
            input,
            template,
            output,
        } => {
            let markdown = read(&input)?;
            let html = match template {
                Some(template) => {
                    let template = read(&template)?;
                    Page::from_markdown(&markdown)
                        .with_context(|| format!("rendering {}", input.display()))?
                        .fill(&template)
                }
                None => mdsite::markdown_to_html(&markdown)
                    .with_context(|| format!("rendering {}", input.display()))?,
            };

            match output {
                Some(output) => {
                    fs::write(&output, html)
                        .with_context(|| format!("writing {}", output.display()))?;
                    println!("Created {}", output.display());
                }
                None => io::stdout().write_all(html.as_bytes())?,
            }
        }

        Command::Title { input } => {
            let markdown = read(&input)?;
            let title = mdsite::extract_title(&markdown)
                .with_context(|| format!("reading title of {}", input.display()))?;
            println!("{title}");
        }
    }

    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
