//! Building a site on disk: static assets plus one page per markdown file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::SiteError;
use crate::{extract_title, markdown_to_html};

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// What a [`build`] produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub assets_copied: usize,
    pub pages_generated: usize,
}

/// Copy static assets into a fresh output directory, then render every page.
pub fn build(config: &Config) -> Result<BuildReport, SiteError> {
    let paths = &config.paths;
    let base_path = config.site.normalized_base_path();

    let assets_copied = copy_static(&paths.static_dir, &paths.output)?;
    let template = read(&paths.template)?;
    let pages_generated =
        generate_pages_with_template(&paths.content, &template, &paths.output, &base_path)?;

    Ok(BuildReport {
        assets_copied,
        pages_generated,
    })
}

/// Replace `dst` with a copy of `src`. Returns the number of files copied.
///
/// A missing `src` is not an error; nothing is copied and `dst` is left as is.
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    if !src.exists() {
        warn!(src = %src.display(), "static directory does not exist, skipping copy");
        return Ok(0);
    }
    if dst.exists() {
        debug!(dst = %dst.display(), "removing existing output directory");
        fs::remove_dir_all(dst).map_err(|source| SiteError::Remove {
            path: dst.to_path_buf(),
            source,
        })?;
    }
    create_dir(dst)?;
    copy_dir(src, dst)
}

fn copy_dir(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    let mut copied = 0;
    for entry in sorted_entries(src)? {
        let target = dst.join(entry.file_name().unwrap_or_default());
        if entry.is_dir() {
            debug!(dir = %target.display(), "creating directory");
            create_dir(&target)?;
            copied += copy_dir(&entry, &target)?;
        } else {
            debug!(from = %entry.display(), to = %target.display(), "copying file");
            fs::copy(&entry, &target).map_err(|source| SiteError::Copy {
                path: entry.clone(),
                source,
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Render one markdown file into `template` and write it to `dest`.
pub fn generate_page(
    src: &Path,
    template_path: &Path,
    dest: &Path,
    base_path: &str,
) -> Result<(), SiteError> {
    let template = read(template_path)?;
    info!(
        src = %src.display(),
        dest = %dest.display(),
        template = %template_path.display(),
        "generating page"
    );
    render_page(src, &template, dest, base_path)
}

/// Walk `content_dir`, rendering every `.md` file to the mirrored `.html`
/// path under `dest_dir`. Returns the number of pages written.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    base_path: &str,
) -> Result<usize, SiteError> {
    let template = read(template_path)?;
    generate_pages_with_template(content_dir, &template, dest_dir, base_path)
}

fn generate_pages_with_template(
    content_dir: &Path,
    template: &str,
    dest_dir: &Path,
    base_path: &str,
) -> Result<usize, SiteError> {
    let mut generated = 0;
    for entry in sorted_entries(content_dir)? {
        let target = dest_dir.join(entry.file_name().unwrap_or_default());
        if entry.is_dir() {
            create_dir(&target)?;
            generated += generate_pages_with_template(&entry, template, &target, base_path)?;
        } else if entry.extension().is_some_and(|ext| ext == "md") {
            let dest = target.with_extension("html");
            info!(src = %entry.display(), dest = %dest.display(), "generating page");
            render_page(&entry, template, &dest, base_path)?;
            generated += 1;
        } else {
            debug!(path = %entry.display(), "skipping non-markdown content file");
        }
    }
    Ok(generated)
}

fn render_page(src: &Path, template: &str, dest: &Path, base_path: &str) -> Result<(), SiteError> {
    let markdown = read(src)?;
    let convert_err = |source| SiteError::Convert {
        path: src.to_path_buf(),
        source,
    };
    let content = markdown_to_html(&markdown).map_err(convert_err)?;
    let title = extract_title(&markdown).map_err(convert_err)?;

    let page = fill_template(template, &title, &content, base_path);

    if let Some(parent) = dest.parent() {
        create_dir(parent)?;
    }
    fs::write(dest, page).map_err(|source| SiteError::Write {
        path: dest.to_path_buf(),
        source,
    })
}

/// Substitute the placeholders and prefix root-relative `href`/`src` URLs
/// with `base_path`, which must start and end with `/`.
pub fn fill_template(template: &str, title: &str, content: &str, base_path: &str) -> String {
    let page = template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content);
    if base_path == "/" {
        return page;
    }
    page.replace("href=\"/", &format!("href=\"{base_path}"))
        .replace("src=\"/", &format!("src=\"{base_path}"))
}

fn read(path: &Path) -> Result<String, SiteError> {
    fs::read_to_string(path).map_err(|source| SiteError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn create_dir(path: &Path) -> Result<(), SiteError> {
    fs::create_dir_all(path).map_err(|source| SiteError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let read_err = |source| SiteError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(read_err)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    entries.sort();
    Ok(entries)
}
