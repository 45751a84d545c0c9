use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use log::{debug, trace};
use tempfile::TempDir;
use thiserror::Error;

use crate::utils;

#[derive(Debug, Error)]
pub enum RenderingError {
    #[error("`{}` could not be found, is a LaTeX distribution installed?", .path.display())]
    ExternalToolMissing { path: PathBuf },
    #[error("`{}` exited with status {:?}: {}", .path.display(), .code, .stderr)]
    ExternalToolFailed {
        path: PathBuf,
        code: Option<i32>,
        stderr: String,
    },
    #[error(transparent)]
    RunError(io::Error),
    #[error(transparent)]
    ReadOutputFile(io::Error),
}

/// Compiles a single LaTeX document with latexmk inside a temporary directory.
pub struct TexRender {
    /// Path to latexmk.
    latex_mk_path: PathBuf,
    /// Name of the document without extension.
    file_stem: String,
    /// Temporary directory holding the source and all generated files.
    working_dir: TempDir,
}

/// The result of a successful latexmk run, the files stay in the temporary
/// directory until this is dropped.
#[derive(Debug)]
pub struct CompiledDocument {
    file_stem: String,
    pdf: Vec<u8>,
    working_dir: TempDir,
}

impl TexRender {
    pub fn from_bytes(file_stem: impl Into<String>, source: impl AsRef<[u8]>) -> anyhow::Result<Self> {
        let file_stem = file_stem.into();
        let working_dir = TempDir::new()?;
        utils::write(
            working_dir.path().join(format!("{}.tex", file_stem)),
            source.as_ref(),
        )?;

        Ok(Self {
            latex_mk_path: "latexmk".into(),
            file_stem,
            working_dir,
        })
    }

    pub fn latex_mk_path(&mut self, latex_mk_path: impl Into<PathBuf>) -> &mut Self {
        self.latex_mk_path = latex_mk_path.into();
        self
    }

    /// Checks that latexmk can be started and reports its version.
    pub fn check_available(latex_mk_path: impl AsRef<Path>) -> Result<(), RenderingError> {
        let latex_mk_path = latex_mk_path.as_ref();

        match Command::new(latex_mk_path).arg("-v").output() {
            Ok(output) if output.status.success() => {
                trace!(
                    "found {}: {}",
                    latex_mk_path.display(),
                    String::from_utf8_lossy(&output.stdout).trim()
                );
                Ok(())
            }
            Ok(output) => Err(RenderingError::ExternalToolFailed {
                path: latex_mk_path.to_path_buf(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(RenderingError::ExternalToolMissing {
                    path: latex_mk_path.to_path_buf(),
                })
            }
            Err(e) => Err(RenderingError::RunError(e)),
        }
    }

    /// Runs latexmk, nothing is written outside of the temporary directory.
    pub fn render(self) -> anyhow::Result<CompiledDocument> {
        let input_file = self.working_dir.path().join(format!("{}.tex", self.file_stem));
        let output_file = self.working_dir.path().join(format!("{}.pdf", self.file_stem));

        let mut cmd = Command::new(&self.latex_mk_path);
        cmd.args([
            "-interaction=nonstopmode",
            "-halt-on-error",
            "-file-line-error",
            "-pdf",
            "-cd",
            "-no-shell-escape",
        ]);

        cmd.arg(&input_file);

        cmd.current_dir(self.working_dir.path());

        let output = cmd.output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                RenderingError::ExternalToolMissing {
                    path: self.latex_mk_path.clone(),
                }
            } else {
                RenderingError::RunError(e)
            }
        })?;

        if !output.status.success() {
            // latexmk failed,
            return Err(anyhow::anyhow!(
                "latexmk failed for `{}` with status: {:?}, stdout: {}, stderr: {}",
                self.file_stem,
                output.status.code(),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            ));
        }

        let pdf = utils::read(output_file).map_err(RenderingError::ReadOutputFile)?;

        Ok(CompiledDocument {
            file_stem: self.file_stem,
            pdf,
            working_dir: self.working_dir,
        })
    }
}

impl CompiledDocument {
    #[must_use]
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    #[must_use]
    pub fn pdf(&self) -> &[u8] {
        &self.pdf
    }

    /// Copies everything latexmk generated except for the source and the pdf.
    pub fn copy_auxiliary_files(&self, target: &Path) -> anyhow::Result<()> {
        let is_auxiliary = |path: &Path| {
            path.is_file()
                && !matches!(
                    path.extension().and_then(OsStr::to_str),
                    Some("tex" | "pdf")
                )
        };

        let mut files = Vec::new();
        for entry in self.working_dir.path().read_dir()? {
            let path = entry?.path();
            if is_auxiliary(&path) {
                files.push(path);
            }
        }

        debug!("keeping {} auxiliary files in {}", files.len(), target.display());

        utils::create_dir_all(target)?;
        fs_extra::copy_items(
            &files,
            target,
            &fs_extra::dir::CopyOptions {
                overwrite: true,
                skip_exist: false,
                ..Default::default()
            },
        )
        .with_context(|| {
            format!(
                "failed to copy auxiliary files from `{}` to `{}`",
                self.working_dir.path().display(),
                target.display()
            )
        })?;

        Ok(())
    }
}
