//! Whole-site generation: output preparation, static asset copying and
//! rendering every markdown page under the content directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::config::Config;
use crate::page::render_page;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("Template not found at {0}")]
    MissingTemplate(PathBuf),

    #[error("Content directory not found at {0}")]
    MissingContent(PathBuf),

    #[error("Refusing to clean {output}: it contains the content directory {content}")]
    UnsafeOutput { output: PathBuf, content: PathBuf },

    #[error("Failed to render {path}: {source}")]
    Render {
        path: PathBuf,
        source: crate::Error,
    },
}

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> SiteError {
    let path = path.to_path_buf();
    move |source| SiteError::Io {
        action,
        path,
        source,
    }
}

/// What a build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Generated pages, in the order they were written.
    pub pages: Vec<PathBuf>,
    /// Markdown sources that failed, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
    /// Number of static files copied.
    pub copied: usize,
}

/// Build the site described by `config`.
///
/// A page that fails to render is skipped with a warning, unless
/// `build.fail_fast` is set, in which case the error ends the build.
pub fn build(config: &Config) -> Result<BuildReport, SiteError> {
    let paths = &config.paths;

    if !paths.content.is_dir() {
        return Err(SiteError::MissingContent(paths.content.clone()));
    }
    let template = match fs::read_to_string(&paths.template) {
        Ok(template) => template,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SiteError::MissingTemplate(paths.template.clone()));
        }
        Err(e) => return Err(io_error("read template", &paths.template)(e)),
    };

    prepare_output(&paths.output, &paths.content, config.build.clean)?;

    let mut report = BuildReport::default();

    if paths.static_dir.is_dir() {
        info!("Copying static files from {}", paths.static_dir.display());
        report.copied = copy_dir_recursive(&paths.static_dir, &paths.output)?;
    } else {
        warn!(
            "Static directory {} not found, skipping",
            paths.static_dir.display()
        );
    }

    let mut sources = Vec::new();
    collect_markdown(&paths.content, Path::new(""), &mut sources)?;

    for relative in sources {
        let source = paths.content.join(&relative);
        let dest = paths
            .output
            .join(&relative)
            .with_extension(&config.build.extension);

        match generate_page(&source, &dest, &template) {
            Ok(()) => {
                info!("Generated {} -> {}", source.display(), dest.display());
                report.pages.push(dest);
            }
            Err(e) if !config.build.fail_fast => {
                warn!("Skipping {}: {e}", source.display());
                report.skipped.push((source, e.to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

/// Render one markdown file through `template` and write it to `dest`.
pub fn generate_page(source: &Path, dest: &Path, template: &str) -> Result<(), SiteError> {
    let markdown = fs::read_to_string(source).map_err(io_error("read", source))?;

    let html = render_page(&markdown, template).map_err(|source_err| SiteError::Render {
        path: source.to_path_buf(),
        source: source_err,
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_error("create directory", parent))?;
    }
    fs::write(dest, html).map_err(io_error("write", dest))
}

/// Recreate `output`, wiping it first when `clean` is set.
fn prepare_output(output: &Path, content: &Path, clean: bool) -> Result<(), SiteError> {
    if clean && output.exists() {
        let output_abs = fs::canonicalize(output).map_err(io_error("resolve", output))?;
        let content_abs = fs::canonicalize(content).map_err(io_error("resolve", content))?;
        if content_abs.starts_with(&output_abs) {
            return Err(SiteError::UnsafeOutput {
                output: output.to_path_buf(),
                content: content.to_path_buf(),
            });
        }

        info!("Deleting {}", output.display());
        fs::remove_dir_all(output).map_err(io_error("remove", output))?;
    }
    fs::create_dir_all(output).map_err(io_error("create directory", output))
}

/// Copy every file under `source` into `dest`, recreating directories.
/// Returns the number of files copied.
pub fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<usize, SiteError> {
    fs::create_dir_all(dest).map_err(io_error("create directory", dest))?;

    let mut copied = 0;
    for from in sorted_entries(source)? {
        let Some(name) = from.file_name() else {
            continue;
        };
        let to = dest.join(name);

        if from.is_dir() {
            copied += copy_dir_recursive(&from, &to)?;
        } else {
            info!(" * {} -> {}", from.display(), to.display());
            fs::copy(&from, &to).map_err(io_error("copy", &from))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Collect `.md` files under `root`, as paths relative to `root`.
fn collect_markdown(
    root: &Path,
    relative: &Path,
    files: &mut Vec<PathBuf>,
) -> Result<(), SiteError> {
    for path in sorted_entries(&root.join(relative))? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let child = relative.join(name);

        if path.is_dir() {
            collect_markdown(root, &child, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(child);
        }
    }
    Ok(())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut entries = fs::read_dir(dir)
        .map_err(io_error("read directory", dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error("read directory", dir))?;
    entries.sort();
    Ok(entries)
}
