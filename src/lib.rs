mod latex_generator;
mod latex_string;
mod tex_render;
mod utils;

pub mod input;
pub mod report;
pub mod time;

pub use latex_generator::LatexGenerator;
pub use latex_string::LatexString;
pub use tex_render::{CompiledDocument, RenderingError, TexRender};

use std::path::PathBuf;

use anyhow::Context;
use log::{debug, info};

use crate::input::{Config, RecordParser};

/// Creates the two time sheets for the months after the anchor date.
///
/// Both documents are rendered and compiled before anything is written, so a
/// failing step leaves no partial output behind. Returns the paths of all
/// created `.tex` and `.pdf` files.
pub fn generate_time_sheets(config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let entries = RecordParser::new(config.settings().csv())
        .parse_file(config.input())
        .with_context(|| format!("failed to read `{}`", config.input().display()))?;

    info!("read {} entries from {}", entries.len(), config.input().display());

    let periods = report::build_reports(&entries, config.anchor(), config.vacations())?;

    let generator = LatexGenerator::new(config.settings())?;
    let documents = periods
        .iter()
        .map(|period| (period.file_stem(), generator.generate(period)))
        .collect::<Vec<_>>();

    // everything is compiled in temporary directories before the first file is written
    let compiled = if config.compile_pdf() {
        TexRender::check_available(config.latex_mk_path())?;

        documents
            .iter()
            .map(|(file_stem, source)| {
                let mut render = TexRender::from_bytes(file_stem, source)?;
                render.latex_mk_path(config.latex_mk_path());
                render
                    .render()
                    .with_context(|| format!("failed to compile `{}.tex`", file_stem))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    } else {
        Vec::new()
    };

    let output_dir = config.output_dir();
    utils::create_dir_all(output_dir)
        .with_context(|| format!("failed to create `{}`", output_dir.display()))?;

    if let Ok(path) = dunce::canonicalize(output_dir) {
        debug!("writing output to {}", path.display());
    }

    let mut created = Vec::new();
    for (file_stem, source) in &documents {
        let path = output_dir.join(format!("{}.tex", file_stem));
        utils::write(&path, source)
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        info!("wrote {}", path.display());
        created.push(path);
    }

    for document in &compiled {
        let path = output_dir.join(format!("{}.pdf", document.file_stem()));
        utils::write(&path, document.pdf())
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        info!("wrote {}", path.display());
        created.push(path);

        if !config.cleanup() {
            document.copy_auxiliary_files(output_dir)?;
        }
    }

    Ok(created)
}
