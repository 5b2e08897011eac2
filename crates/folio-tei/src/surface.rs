//! Surface/body assembler.
//!
//! Orders a series' page images, fetches per-page detail records, and emits
//! the transcription body, translation body, and facsimile block. Detail
//! fetches are issued strictly sequentially in ascending `seq_no`; a fetch
//! failure aborts the whole series.

use tracing::debug;

use folio_core::xml::{escape_ampersands, XmlWriter};
use folio_core::{Image, ImageDetailSource, Result};

use crate::TeiContext;

/// Render the body blocks for one series: transcription text, translation
/// text, and facsimile, concatenated in that order.
pub async fn render_surfaces<D: ImageDetailSource>(
    series_uri: &str,
    images: &[Image],
    details: &D,
    ctx: &TeiContext,
) -> Result<String> {
    let mut pages: Vec<&Image> = images
        .iter()
        .filter(|img| img.series.uri == series_uri)
        .collect();
    pages.sort_by_key(|img| img.seq_no);

    let mut transcription = XmlWriter::new();
    transcription.open("text", &[("xml:id", "transcription")]);
    transcription.open("body", &[]);
    let mut translation = XmlWriter::new();
    translation.open("text", &[("xml:id", "translation")]);
    translation.open("body", &[]);
    let mut facsimile = XmlWriter::new();
    facsimile.open("facsimile", &[("xml:id", "prints")]);

    let mut transcribed_any = false;
    let mut translated_any = false;

    for image in pages {
        let detail = details.image_detail(&image.id).await?;
        let page_id = format!("f{:04}", image.seq_no);
        let url = detail.resolved_url(&ctx.iiif_base).unwrap_or_default();
        debug!(%page_id, uri = %image.uri, "rendering surface");

        facsimile.open(
            "surface",
            &[
                ("xml:id", &page_id),
                ("ulx", "0"),
                ("uly", "0"),
                ("lrx", "1000"),
                ("lry", "800"),
                ("sameAs", &image.uri),
            ],
        );
        facsimile.element("label", &[], &image.label);
        facsimile.empty(
            "graphic",
            &[("mimeType", "application/json"), ("url", &url)],
        );
        facsimile.close();

        let anchor = format!("#{}", page_id);
        if let Some(text) = &image.transcription {
            page_paragraph(&mut transcription, &anchor, text);
            transcribed_any = true;
        }
        if let Some(text) = &image.translation {
            page_paragraph(&mut translation, &anchor, text);
            translated_any = true;
        }
    }

    // A body is never left childless.
    if !transcribed_any {
        transcription.element("div", &[], "");
    }
    if !translated_any {
        translation.element("div", &[], "");
    }

    transcription.close().close();
    translation.close().close();
    facsimile.close();

    Ok(transcription.finish() + &translation.finish() + &facsimile.finish())
}

/// Emit a page break and its paragraph, keyed to the surface.
///
/// Only literal `&` is escaped; the source transcriptions carry no other
/// markup-significant characters, and widening the policy would change the
/// published byte output.
fn page_paragraph(w: &mut XmlWriter, anchor: &str, text: &str) {
    w.empty("pb", &[("facs", anchor)]);
    w.open("div", &[("facs", anchor)]);
    w.element("p", &[], &escape_ampersands(text));
    w.close();
}
