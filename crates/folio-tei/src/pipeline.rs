//! Run orchestration: full generation and motif-only updates.
//!
//! Generation loads one record-store snapshot, selects the series to
//! process, and renders + writes each document sequentially. The motif
//! pathway fetches only the motif collection, encodes the taxonomy once,
//! and splices it into each target file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use folio_core::{filename_from_title, Error, ImageDetailSource, RecordSource, Result};

use crate::document::{patch_motifs_file, write_document};
use crate::header::render_header;
use crate::store::RecordStore;
use crate::surface::render_surfaces;
use crate::taxonomy::encode_motifs;
use crate::TeiContext;

/// Which series a generation run regenerates.
pub enum SeriesSelection {
    /// Every fetched series.
    All,
    /// Exactly the series whose derived filename matches this title's.
    ByTitle(String),
    /// Exactly the series whose derived filenames match `.xml` files present
    /// in this directory.
    FromInputDir(PathBuf),
}

/// Fetch all records and regenerate the selected series' documents.
pub async fn generate<S>(
    source: &S,
    selection: SeriesSelection,
    output_dir: &Path,
    ctx: &TeiContext,
) -> Result<()>
where
    S: RecordSource + ImageDetailSource,
{
    let wanted = match selection {
        SeriesSelection::All => None,
        SeriesSelection::ByTitle(title) => Some(vec![filename_from_title(&title)]),
        SeriesSelection::FromInputDir(dir) => Some(scan_input_dir(&dir)?),
    };

    let store = RecordStore::load(source).await?;

    for series in &store.series {
        if let Some(names) = &wanted {
            if !names.contains(&filename_from_title(&series.title)) {
                continue;
            }
        }
        info!(title = %series.title, "processing series");
        let header = render_header(series, &store, ctx)?;
        let body = render_surfaces(&series.uri, &store.images, source, ctx).await?;
        write_document(output_dir, &series.title, &header, &body)?;
    }

    Ok(())
}

/// Re-apply the motif taxonomy to one existing document.
pub async fn update_motifs_file<S: RecordSource>(
    source: &S,
    file: &Path,
    output_dir: &Path,
    ctx: &TeiContext,
) -> Result<()> {
    validate_xml_target(file)?;
    let block = fetch_motif_block(source, ctx).await?;
    patch_motifs_file(file, output_dir, &block)
}

/// Re-apply the motif taxonomy to every document in a directory.
///
/// A `.keep` placeholder is ignored; any other non-`.xml` entry is an
/// operator error and stops the run before it touches anything else.
pub async fn update_motifs_dir<S: RecordSource>(
    source: &S,
    input_dir: &Path,
    output_dir: &Path,
    ctx: &TeiContext,
) -> Result<()> {
    if !input_dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "directory {} does not exist",
            input_dir.display()
        )));
    }

    let mut targets = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.file_name().is_some_and(|name| name == ".keep") {
            continue;
        }
        validate_xml_target(&path)?;
        targets.push(path);
    }
    targets.sort();

    let block = fetch_motif_block(source, ctx).await?;
    for target in &targets {
        patch_motifs_file(target, output_dir, &block)?;
    }

    Ok(())
}

/// Fetch the motif collection and encode it once.
async fn fetch_motif_block<S: RecordSource>(source: &S, ctx: &TeiContext) -> Result<String> {
    let motifs = source.motifs().await?;
    Ok(encode_motifs(&motifs, &ctx.uri_prefix))
}

/// Derived filenames of the `.xml` documents in a directory.
fn scan_input_dir(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let file_name = entry?.file_name().to_string_lossy().into_owned();
        if file_name.to_lowercase().ends_with(".xml") {
            names.push(file_name[..file_name.len() - 4].to_string());
        }
    }
    debug!(?names, "selecting series from input directory");
    Ok(names)
}

fn validate_xml_target(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::InvalidInput(format!(
            "file {} does not exist",
            path.display()
        )));
    }
    if !path
        .to_string_lossy()
        .to_lowercase()
        .ends_with(".xml")
    {
        return Err(Error::InvalidInput(format!(
            "file {} is not an XML file",
            path.display()
        )));
    }
    Ok(())
}
