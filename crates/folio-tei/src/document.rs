//! Document writer and patcher.
//!
//! First generation wraps header + body in the TEI root and writes a fresh
//! file; updates splice a freshly rendered header (or just a taxonomy block)
//! into an existing document's header region and rewrite the whole file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use folio_core::xml::XmlWriter;
use folio_core::{filename_from_title, Error, Result};

/// TEI namespace declared on every document root.
pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";

const HEADER_OPEN: &str = "<teiHeader";
const HEADER_CLOSE: &str = "</teiHeader>";

/// Wrap header and body fragments in the TEI root element.
pub fn render_document(header: &str, body: &str) -> String {
    let mut w = XmlWriter::new();
    w.open("TEI", &[("xmlns", TEI_NS)]);
    w.raw(header);
    w.raw(body);
    w.close();
    w.finish()
}

/// Write a full document for a series, deriving the filename from the title
/// and overwriting any existing file at that path.
pub fn write_document(
    output_dir: &Path,
    title: &str,
    header: &str,
    body: &str,
) -> Result<PathBuf> {
    let path = output_dir.join(format!("{}.xml", filename_from_title(title)));
    fs::write(&path, render_document(header, body))?;
    info!(path = %path.display(), "wrote document");
    Ok(path)
}

/// Replace the header region of an existing document with a fresh header.
///
/// The document must contain a header region delimited by `<teiHeader` and
/// `</teiHeader>`; the splice runs from the first opening boundary to the
/// first closing boundary. A missing boundary is a malformed target, not a
/// case to paper over.
pub fn splice_header(document: &str, header: &str) -> Result<String> {
    let open = document
        .find(HEADER_OPEN)
        .ok_or_else(|| Error::MalformedDocument(format!("missing {}", HEADER_OPEN)))?;
    let close = document
        .find(HEADER_CLOSE)
        .ok_or_else(|| Error::MalformedDocument(format!("missing {}", HEADER_CLOSE)))?;

    Ok(format!(
        "{}{}{}",
        &document[..open],
        header,
        &document[close + HEADER_CLOSE.len()..]
    ))
}

/// Insert a taxonomy block immediately before the header's closing tag.
///
/// Every other header byte, including any previously spliced taxonomy block,
/// is preserved.
pub fn splice_motifs(document: &str, motif_block: &str) -> Result<String> {
    let close = document
        .find(HEADER_CLOSE)
        .ok_or_else(|| Error::MalformedDocument(format!("missing {}", HEADER_CLOSE)))?;

    Ok(format!(
        "{}{}\n{}{}",
        &document[..close],
        motif_block,
        HEADER_CLOSE,
        &document[close + HEADER_CLOSE.len()..]
    ))
}

/// Patch one file's header in place.
pub fn patch_header_file(path: &Path, header: &str) -> Result<()> {
    let document = fs::read_to_string(path)?;
    let patched = splice_header(&document, header)?;
    fs::write(path, patched)?;
    Ok(())
}

/// Patch one file's motif taxonomy, writing the result under the same file
/// name in the output directory.
pub fn patch_motifs_file(input: &Path, output_dir: &Path, motif_block: &str) -> Result<()> {
    let file_name = input
        .file_name()
        .ok_or_else(|| Error::InvalidInput(format!("{} has no file name", input.display())))?;
    info!(file = %file_name.to_string_lossy(), "patching motif taxonomy");

    let document = fs::read_to_string(input)?;
    let patched = splice_motifs(&document, motif_block)?;
    fs::write(output_dir.join(file_name), patched)?;
    Ok(())
}
