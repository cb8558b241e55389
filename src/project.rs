//! Project metadata and export document settings.
//!
//! A build is described by `conf.json`:
//!
//! ```json
//! {
//!     "PROJECT_DIR": "/work/my-lib",
//!     "PROJECT_TITLE": "My Lib",
//!     "PROJECT_STYLE_DOCX": "None",
//!     "normalize": { "log_node_before": false }
//! }
//! ```
//!
//! The project name and release come from `<PROJECT_DIR>/name-version.txt`,
//! a single `name:version` line.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::info;

use crate::config::NormalizeConfig;
use crate::error::{Error, Result};

/// File under the project directory holding `name:version`.
pub const NAME_VERSION_FILE: &str = "name-version.txt";

/// Root document of every export.
pub const MASTER_DOC: &str = "index";

/// Author used when `conf.json` names none.
pub const DEFAULT_AUTHOR: &str = "exqudens";

/// Year of the copyright line.
pub const COPYRIGHT_YEAR: i32 = 2023;

/// Timestamp format of the DOCX `created` property.
const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Contents of `conf.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(rename = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,
    #[serde(rename = "PROJECT_TITLE")]
    pub project_title: Option<String>,
    /// DOCX style template; the literal string `None` means no template.
    #[serde(rename = "PROJECT_STYLE_DOCX")]
    pub style_docx: Option<String>,
    /// Overrides [`DEFAULT_AUTHOR`].
    #[serde(rename = "PROJECT_AUTHOR")]
    pub author: Option<String>,
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

impl ProjectConfig {
    /// Parse `conf.json` content.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a `conf.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The project directory, which must be set.
    pub fn project_dir(&self) -> Result<&Path> {
        self.project_dir
            .as_deref()
            .ok_or_else(|| Error::MissingKey("PROJECT_DIR".to_string()))
    }

    /// The project title, which must be set.
    pub fn project_title(&self) -> Result<&str> {
        self.project_title
            .as_deref()
            .ok_or_else(|| Error::MissingKey("PROJECT_TITLE".to_string()))
    }

    /// The DOCX style template, if one is configured.
    pub fn style_docx(&self) -> Option<&str> {
        self.style_docx
            .as_deref()
            .filter(|s| !s.is_empty() && *s != "None")
    }
}

/// Resolved project metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Project name from `name-version.txt`.
    pub project: String,
    /// Release from `name-version.txt`.
    pub release: String,
    /// Human title from `conf.json`, used for output file names.
    pub title: String,
    pub author: String,
    pub style_docx: Option<String>,
}

/// DOCX export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxDocument {
    pub start_doc: String,
    pub filename: String,
    pub title: String,
    pub created: String,
    pub subject: String,
    pub keywords: Vec<String>,
    pub toctree_only: bool,
    pub style: Option<String>,
}

/// PDF export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    pub start_doc: String,
    pub filename: String,
    pub title: String,
    pub author: String,
}

impl ProjectInfo {
    /// Resolve metadata for a configuration, reading `name-version.txt`.
    pub fn load(config: &ProjectConfig) -> Result<Self> {
        let project_dir = config.project_dir()?;
        let title = config.project_title()?.to_string();
        info!("projectDir: '{}'", project_dir.display());

        let path = project_dir.join(NAME_VERSION_FILE);
        let content = fs::read_to_string(&path).map_err(|e| Error::InvalidMetadata {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let (project, release) = parse_name_version(&content, &path)?;
        info!("project: '{project}'");
        info!("release: '{release}'");

        Ok(Self {
            project,
            release,
            title,
            author: config
                .author
                .clone()
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            style_docx: config.style_docx().map(str::to_string),
        })
    }

    /// Copyright line, e.g. `2023, exqudens`.
    pub fn copyright(&self) -> String {
        format!("{COPYRIGHT_YEAR}, {}", self.author)
    }

    /// reStructuredText prolog defining `|project|` and `|release|`.
    pub fn rst_prolog(&self) -> String {
        format!(
            ".. |project| replace:: {}\n\n.. |release| replace:: {}\n\n",
            self.project, self.release
        )
    }

    /// Output file stem shared by DOCX and PDF: the title with spaces
    /// replaced by underscores.
    pub fn file_stem(&self) -> String {
        self.title.replace(' ', "_")
    }

    /// DOCX export settings, stamped with `created`.
    pub fn docx_document(&self, created: NaiveDateTime) -> DocxDocument {
        DocxDocument {
            start_doc: MASTER_DOC.to_string(),
            filename: format!("{}.docx", self.file_stem()),
            title: format!("{} documentation", self.project),
            created: created.format(CREATED_FORMAT).to_string(),
            subject: format!("{}-{}", self.project, self.release),
            keywords: vec!["sphinx".to_string()],
            toctree_only: false,
            style: self.style_docx.clone(),
        }
    }

    /// DOCX export settings stamped with the current local time.
    pub fn docx_document_now(&self) -> DocxDocument {
        self.docx_document(chrono::Local::now().naive_local())
    }

    /// PDF export settings.
    pub fn pdf_document(&self) -> PdfDocument {
        PdfDocument {
            start_doc: MASTER_DOC.to_string(),
            filename: self.file_stem(),
            title: self.release.clone(),
            author: self.author.clone(),
        }
    }
}

/// Split a `name:version` line into trimmed parts.
///
/// Anything after a second `:` is ignored, so `lib:1.0:rc` gives `1.0`.
pub fn parse_name_version(content: &str, path: &Path) -> Result<(String, String)> {
    let invalid = |reason: &str| Error::InvalidMetadata {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let (name, rest) = content
        .split_once(':')
        .ok_or_else(|| invalid("expected 'name:version'"))?;
    let version = rest.split(':').next().unwrap_or(rest);
    let name = name.trim();
    let version = version.trim();

    if name.is_empty() {
        return Err(invalid("empty project name"));
    }
    if version.is_empty() {
        return Err(invalid("empty version"));
    }

    Ok((name.to_string(), version.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn info() -> ProjectInfo {
        ProjectInfo {
            project: "exqudens-cpp-test-lib".to_string(),
            release: "1.2.3".to_string(),
            title: "Test Lib Docs".to_string(),
            author: "team".to_string(),
            style_docx: None,
        }
    }

    #[test]
    fn test_parse_name_version() {
        let path = Path::new("name-version.txt");
        assert_eq!(
            parse_name_version(" my-lib : 0.1.0 \n", path).unwrap(),
            ("my-lib".to_string(), "0.1.0".to_string())
        );
        assert!(parse_name_version("my-lib", path).is_err());
        assert!(parse_name_version(":0.1.0", path).is_err());
        assert!(parse_name_version("my-lib:", path).is_err());
    }

    #[test]
    fn test_parse_name_version_ignores_extra_fields() {
        let path = Path::new("name-version.txt");
        assert_eq!(
            parse_name_version("lib:1.0:rc\n", path).unwrap(),
            ("lib".to_string(), "1.0".to_string())
        );
        assert!(parse_name_version("lib::rc", path).is_err());
    }

    #[test]
    fn test_docx_document() {
        let created = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 8, 7)
            .unwrap();
        let docx = info().docx_document(created);

        assert_eq!(docx.start_doc, "index");
        assert_eq!(docx.filename, "Test_Lib_Docs.docx");
        assert_eq!(docx.title, "exqudens-cpp-test-lib documentation");
        assert_eq!(docx.created, "2024-03-05T09:08:07");
        assert_eq!(docx.subject, "exqudens-cpp-test-lib-1.2.3");
        assert_eq!(docx.keywords, vec!["sphinx"]);
        assert!(!docx.toctree_only);
    }

    #[test]
    fn test_pdf_document_and_prolog() {
        let info = info();
        let pdf = info.pdf_document();
        assert_eq!(pdf.filename, "Test_Lib_Docs");
        assert_eq!(pdf.title, "1.2.3");

        assert_eq!(
            info.rst_prolog(),
            ".. |project| replace:: exqudens-cpp-test-lib\n\n.. |release| replace:: 1.2.3\n\n"
        );
        assert_eq!(info.copyright(), "2023, team");
    }

    #[test]
    fn test_style_none_means_unset() {
        let config = ProjectConfig::from_json(
            r#"{"PROJECT_DIR": "/tmp/x", "PROJECT_TITLE": "X", "PROJECT_STYLE_DOCX": "None"}"#,
        )
        .unwrap();
        assert_eq!(config.style_docx(), None);
        assert!(config.normalize.apply);

        let config = ProjectConfig::from_json(
            r#"{"PROJECT_DIR": "/tmp/x", "PROJECT_TITLE": "X", "PROJECT_STYLE_DOCX": "style.docx"}"#,
        )
        .unwrap();
        assert_eq!(config.style_docx(), Some("style.docx"));
    }

    #[test]
    fn test_missing_keys() {
        let config = ProjectConfig::from_json(r#"{"PROJECT_TITLE": "X"}"#).unwrap();
        let err = ProjectInfo::load(&config).unwrap_err();
        assert!(matches!(err, Error::MissingKey(ref key) if key == "PROJECT_DIR"));

        let config = ProjectConfig::from_json(r#"{"PROJECT_DIR": "/tmp"}"#).unwrap();
        let err = ProjectInfo::load(&config).unwrap_err();
        assert!(matches!(err, Error::MissingKey(ref key) if key == "PROJECT_TITLE"));
    }
}
