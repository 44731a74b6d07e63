//! Help and source disclosure for vulnerability modules
//!
//! Both resolvers read from the content root through `safe_join`. Every
//! failure (unknown module, traversal, missing file) degrades to a
//! placeholder; nothing here returns an error to the page.

use crate::error::{LabError, LabResult};
use crate::highlight::Highlighter;
use crate::safe_path::ContentRoot;
use crate::security::is_safe_path_segment;
use lab_common::{basename, modules, SecurityLevel};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Help body served when nothing can be disclosed
pub const NOT_FOUND_PLACEHOLDER: &str = "<p>Not Found</p>";

/// Source text shown when a listing cannot be read
pub const NOT_FOUND_SOURCE: &str = "Not Found";

pub const DEFAULT_LOCALE: &str = "en";

pub const SOURCE_EXTENSION: &str = "rs";
pub const SCRIPT_EXTENSION: &str = "js";

/// Cosmetic rewrites applied to source before display.
///
/// Lab handlers accumulate their page with `html += &format!(...)`; learners
/// read it as a plain print.
pub const DISPLAY_SUBSTITUTIONS: &[(&str, &str)] = &[("html += &format!(", "print!(")];

const VULNERABILITIES_DIR: &str = "vulnerabilities";

/// Resolves localized help pages
pub struct HelpResolver {
    root: ContentRoot,
    default_locale: String,
}

impl HelpResolver {
    pub fn new(root: ContentRoot, default_locale: impl Into<String>) -> Self {
        Self {
            root,
            default_locale: default_locale.into(),
        }
    }

    /// Find the help file for a module.
    ///
    /// Both id and locale are reduced to their base names. The default locale
    /// reads `vulnerabilities/<id>/help/help.html` and relies on the root
    /// check alone. Other locales additionally require the module to be
    /// cataloged.
    pub fn resolve(&self, id: &str, locale: &str) -> LabResult<PathBuf> {
        let locale = basename(locale);

        if locale == self.default_locale {
            let relative = Path::new(VULNERABILITIES_DIR)
                .join(module_segment(id)?)
                .join("help")
                .join("help.html");
            return self.root.resolve(relative);
        }

        let module = Path::new(basename(id))
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        if !modules::is_known(module) {
            return Err(LabError::ModuleNotAllowed { id: id.to_string() });
        }

        let relative = Path::new(VULNERABILITIES_DIR)
            .join(module)
            .join("help")
            .join(format!("help.{}.html", locale));
        self.root.resolve(relative)
    }

    /// Help body for the page, or `NOT_FOUND_PLACEHOLDER`
    pub fn render(&self, id: &str, locale: &str) -> String {
        let content = self.resolve(id, locale).and_then(|path| {
            if !path.is_file() {
                return Err(LabError::NotFound { path });
            }
            Ok(std::fs::read_to_string(path)?)
        });

        match content {
            Ok(help) => help,
            Err(e) => {
                debug!(id, locale, error = %e, "Help not disclosed");
                NOT_FOUND_PLACEHOLDER.to_string()
            }
        }
    }
}

/// One highlighted file in a source listing
#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    /// Path as shown in the page heading, relative to the content root
    pub path: String,
    pub html: String,
    pub found: bool,
}

/// Everything the source page shows for one module and level
#[derive(Debug, Clone, Serialize)]
pub struct SourceListing {
    /// Identifier reduced to its last path component
    pub id: String,
    pub vulnerability: &'static str,
    pub security: SecurityLevel,
    pub source: SourceFile,
    /// Companion client-side script, when one exists
    pub script: Option<SourceFile>,
}

/// Resolves and highlights per-level module sources
pub struct SourceResolver {
    root: ContentRoot,
    highlighter: Arc<Highlighter>,
}

impl SourceResolver {
    pub fn new(root: ContentRoot, highlighter: Arc<Highlighter>) -> Self {
        Self { root, highlighter }
    }

    /// Listing for one module at one level.
    ///
    /// The display name comes from the raw identifier; the path uses its base
    /// name and the normalized level (unknown levels read as `low`).
    pub fn listing(&self, id: &str, security: &str) -> SourceListing {
        let vulnerability = modules::display_name(id);
        let id = basename(id);
        let security = SecurityLevel::normalize(security);

        let path = format!("{}/{}/source/{}.{}", VULNERABILITIES_DIR, id, security, SOURCE_EXTENSION);
        let source = match module_segment(id).and_then(|_| self.root.read_to_string(&path)) {
            Ok(text) => SourceFile {
                html: self.highlighter.highlight(&display_text(&text), SOURCE_EXTENSION),
                path,
                found: true,
            },
            Err(e) => {
                debug!(id, %security, error = %e, "Source not disclosed");
                SourceFile {
                    html: self.highlighter.highlight(NOT_FOUND_SOURCE, "txt"),
                    path,
                    found: false,
                }
            }
        };

        SourceListing {
            id: id.to_string(),
            vulnerability,
            security,
            source,
            script: self.script(id, security),
        }
    }

    /// One listing per level, weakest first
    pub fn listing_all(&self, id: &str) -> Vec<SourceListing> {
        SecurityLevel::ALL
            .iter()
            .map(|level| self.listing(id, level.as_str()))
            .collect()
    }

    fn script(&self, id: &str, security: SecurityLevel) -> Option<SourceFile> {
        if !modules::is_known(id) || !is_safe_path_segment(id) || !is_safe_path_segment(security.as_str()) {
            return None;
        }

        let path = format!("{}/{}/source/{}.{}", VULNERABILITIES_DIR, id, security, SCRIPT_EXTENSION);
        let text = self.root.read_to_string(&path).ok()?;
        Some(SourceFile {
            html: self.highlighter.highlight(&text, SCRIPT_EXTENSION),
            path,
            found: true,
        })
    }
}

/// Base name of a module identifier; dot segments never name a module
fn module_segment(raw: &str) -> LabResult<&str> {
    match basename(raw) {
        "" | "." | ".." => Err(LabError::PathEscapesRoot { path: PathBuf::from(raw) }),
        segment => Ok(segment),
    }
}

/// Apply `DISPLAY_SUBSTITUTIONS`; presentation only, never executed
pub fn display_text(source: &str) -> String {
    DISPLAY_SUBSTITUTIONS
        .iter()
        .fold(source.to_string(), |acc, (from, to)| acc.replace(from, to))
}
