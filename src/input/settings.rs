use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::latex_string::LatexString;
use crate::utils;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct About {
    name: Option<LatexString>,
}

impl About {
    #[must_use]
    pub fn name(&self) -> Option<&LatexString> {
        self.name.as_ref()
    }
}

/// Describes where the time stamps are found in the exported CSV.
///
/// The defaults match the detailed report export of Clockify.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvSettings {
    start_date_column: String,
    start_time_column: String,
    end_date_column: String,
    end_time_column: String,
    date_format: String,
    time_format: String,
    delimiter: char,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            start_date_column: "Start Date".to_string(),
            start_time_column: "Start Time".to_string(),
            end_date_column: "End Date".to_string(),
            end_time_column: "End Time".to_string(),
            date_format: "%m/%d/%Y".to_string(),
            time_format: "%H:%M:%S".to_string(),
            delimiter: ',',
        }
    }
}

impl CsvSettings {
    #[must_use]
    pub fn start_date_column(&self) -> &str {
        &self.start_date_column
    }

    #[must_use]
    pub fn start_time_column(&self) -> &str {
        &self.start_time_column
    }

    #[must_use]
    pub fn end_date_column(&self) -> &str {
        &self.end_date_column
    }

    #[must_use]
    pub fn end_time_column(&self) -> &str {
        &self.end_time_column
    }

    #[must_use]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    #[must_use]
    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    #[must_use]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    round_to_quarter_hour: bool,
    template: Option<PathBuf>,
    latex_mk_path: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            round_to_quarter_hour: true,
            template: None,
            latex_mk_path: None,
        }
    }
}

impl RenderSettings {
    #[must_use]
    pub fn round_to_quarter_hour(&self) -> bool {
        self.round_to_quarter_hour
    }

    #[must_use]
    pub fn template(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    #[must_use]
    pub fn latex_mk_path(&self) -> Option<&Path> {
        self.latex_mk_path.as_deref()
    }
}

/// The optional settings file, every key has a default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    about: About,
    csv: CsvSettings,
    render: RenderSettings,
}

impl Settings {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open settings `{}`", path.display()))?;

        let mut settings: Self = utils::toml_from_reader(file)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        // a relative template path is relative to the settings file
        if let (Some(template), Some(parent)) = (&settings.render.template, path.parent()) {
            if template.is_relative() {
                settings.render.template = Some(parent.join(template));
            }
        }

        Ok(settings)
    }

    #[must_use]
    pub fn about(&self) -> &About {
        &self.about
    }

    #[must_use]
    pub fn csv(&self) -> &CsvSettings {
        &self.csv
    }

    #[must_use]
    pub fn render(&self) -> &RenderSettings {
        &self.render
    }
}
