use std::path::{Path, PathBuf};

use crate::input::{Settings, VacationRange};
use crate::time::{self, Date, InvalidDate};

/// Everything needed for a single run.
pub struct Config {
    input: PathBuf,
    anchor: Date,
    vacations: Vec<VacationRange>,
    output_dir: PathBuf,
    compile_pdf: bool,
    cleanup: bool,
    settings: Settings,
}

pub struct ConfigBuilder {
    input: PathBuf,
    anchor: Date,
    vacations: Vec<VacationRange>,
    output_dir: Option<PathBuf>,
    compile_pdf: bool,
    cleanup: bool,
    settings: Option<Settings>,
}

impl ConfigBuilder {
    fn new(input: PathBuf, anchor: Date) -> Self {
        Self {
            input,
            anchor,
            vacations: Vec::new(),
            output_dir: None,
            compile_pdf: false,
            cleanup: false,
            settings: None,
        }
    }

    pub fn vacations(&mut self, vacations: impl IntoIterator<Item = VacationRange>) -> &mut Self {
        self.vacations.extend(vacations);
        self
    }

    pub fn output_dir(&mut self, output_dir: impl Into<PathBuf>) -> &mut Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn compile_pdf(&mut self, value: bool) -> &mut Self {
        self.compile_pdf = value;
        self
    }

    pub fn cleanup(&mut self, value: bool) -> &mut Self {
        self.cleanup = value;
        self
    }

    pub fn settings(&mut self, settings: Settings) -> &mut Self {
        self.settings = Some(settings);
        self
    }

    pub fn build(self) -> anyhow::Result<Config> {
        if self.cleanup && !self.compile_pdf {
            anyhow::bail!("-p is required when -c is set");
        }

        Ok(Config {
            input: self.input,
            anchor: self.anchor,
            vacations: self.vacations,
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            compile_pdf: self.compile_pdf,
            cleanup: self.cleanup,
            settings: self.settings.unwrap_or_default(),
        })
    }
}

impl Config {
    #[must_use]
    pub fn builder(input: impl Into<PathBuf>, anchor: Date) -> ConfigBuilder {
        ConfigBuilder::new(input.into(), anchor)
    }

    /// Parses the anchor date in the format `YYYY-MM-DD`.
    pub fn try_from_args(
        input: impl Into<PathBuf>,
        anchor: &str,
    ) -> Result<ConfigBuilder, InvalidDate> {
        let anchor = time::parse_date(anchor, time::ISO_DATE_FORMAT)?;

        Ok(Self::builder(input, anchor))
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn anchor(&self) -> Date {
        self.anchor
    }

    pub fn vacations(&self) -> &[VacationRange] {
        &self.vacations
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn compile_pdf(&self) -> bool {
        self.compile_pdf
    }

    pub fn cleanup(&self) -> bool {
        self.cleanup
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn latex_mk_path(&self) -> &Path {
        self.settings
            .render()
            .latex_mk_path()
            .unwrap_or_else(|| Path::new("latexmk"))
    }
}
