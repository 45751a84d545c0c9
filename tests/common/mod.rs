#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use zeiterfassung::input::{Config, ConfigBuilder, Settings, VacationRange};

pub const CLOCKIFY_HEADER: &str = concat!(
    "\"Project\",\"Client\",\"Description\",\"Task\",\"User\",\"Group\",\"Email\",\"Tags\",",
    "\"Billable\",\"Start Date\",\"Start Time\",\"End Date\",\"End Time\",\"Duration (h)\",",
    "\"Duration (decimal)\"\n"
);

/// Builds the content of a Clockify detailed report.
#[derive(Debug, Clone, Default)]
pub struct ClockifyExport {
    rows: Vec<String>,
}

impl ClockifyExport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, the date has the format `MM/DD/YYYY` and the times `HH:MM:SS`.
    #[must_use]
    pub fn entry(mut self, date: &str, start: &str, end: &str) -> Self {
        self.rows.push(format!(
            concat!(
                "\"Thesis\",\"\",\"Writing\",\"\",\"John Smith\",\"\",\"john@example.com\",\"\",",
                "\"No\",\"{date}\",\"{start}\",\"{date}\",\"{end}\",\"00:00:00\",\"0.00\"\n"
            ),
            date = date,
            start = start,
            end = end
        ));
        self
    }

    #[must_use]
    pub fn to_csv(&self) -> String {
        std::iter::once(CLOCKIFY_HEADER.to_string())
            .chain(self.rows.iter().cloned())
            .collect()
    }
}

/// A scratch directory with the csv file and an output folder.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    #[must_use]
    pub fn new(export: &ClockifyExport) -> Self {
        let dir = TempDir::new().expect("should be able to create a temporary directory");
        fs::write(dir.path().join("times.csv"), export.to_csv()).expect("csv should be writable");

        Self { dir }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.path().join("output")
    }

    #[must_use]
    pub fn config_builder(&self, anchor: &str, vacations: &[&str]) -> ConfigBuilder {
        let mut builder = Config::try_from_args(self.path().join("times.csv"), anchor)
            .expect("anchor should be valid");

        builder
            .output_dir(self.output_dir())
            .vacations(vacations.iter().map(|vacation| {
                vacation
                    .parse::<VacationRange>()
                    .expect("vacation should be valid")
            }));

        builder
    }

    #[must_use]
    pub fn config(&self, anchor: &str, vacations: &[&str]) -> Config {
        self.config_builder(anchor, vacations)
            .build()
            .expect("config should be valid")
    }

    /// Writes a settings file that points to `latex_mk_path` and loads it.
    #[must_use]
    pub fn settings_with_latexmk(&self, latex_mk_path: &Path) -> Settings {
        let path = self.path().join("settings.toml");
        fs::write(
            &path,
            format!(
                "[render]\nlatex_mk_path = {}\n",
                toml::Value::String(latex_mk_path.display().to_string())
            ),
        )
        .expect("settings should be writable");

        Settings::from_file(&path).expect("settings should be valid")
    }

    /// The names of all files in the output folder, sorted.
    #[must_use]
    pub fn output_files(&self) -> Vec<String> {
        let mut files = fs::read_dir(self.output_dir())
            .map(|entries| {
                entries
                    .map(|entry| {
                        entry
                            .expect("entry should be readable")
                            .file_name()
                            .to_string_lossy()
                            .into_owned()
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        files.sort();
        files
    }

    #[must_use]
    pub fn read_output(&self, file_name: &str) -> String {
        fs::read_to_string(self.output_dir().join(file_name))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", file_name, e))
    }
}

/// Writes a shell script that behaves like latexmk: `-v` succeeds and a
/// compile creates `<stem>.pdf` and `<stem>.aux`, unless `fail_compile` is set.
#[cfg(unix)]
pub fn fake_latexmk(dir: &Path, fail_compile: bool) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(if fail_compile {
        "latexmk-failing"
    } else {
        "latexmk-fake"
    });

    let compile = if fail_compile {
        "echo \"! Undefined control sequence.\" >&2\nexit 12\n"
    } else {
        concat!(
            "for arg; do input=\"$arg\"; done\n",
            "stem=\"${input%.tex}\"\n",
            "printf 'pdf' > \"$stem.pdf\"\n",
            "printf 'aux' > \"$stem.aux\"\n",
        )
    };

    fs::write(
        &path,
        format!(
            "#!/bin/sh\nif [ \"$1\" = \"-v\" ]; then echo \"Latexmk, fake\"; exit 0; fi\n{}",
            compile
        ),
    )
    .expect("script should be writable");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("script should be executable");

    path
}

/// Returns the table row of the given day (`DD.MM.`).
#[must_use]
pub fn row_of<'a>(document: &'a str, day: &str) -> Option<&'a str> {
    document.lines().find(|line| line.starts_with(day))
}

pub fn debug_setup() {
    std::env::set_var("RUST_BACKTRACE", "1");
    std::env::set_var("RUST_APP_LOG", "trace");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");
}
