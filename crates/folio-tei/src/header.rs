//! Header assembler.
//!
//! Cross-references one series against the agent/person/holding/language
//! collections and renders the `<teiHeader>` block, embedding the motif
//! taxonomy. Pure transformation over the record store; no network or file
//! I/O, so identical inputs produce byte-identical output.

use folio_core::xml::XmlWriter;
use folio_core::{Person, Ref, Result, Series};

use crate::store::RecordStore;
use crate::taxonomy::encode_motifs;
use crate::TeiContext;

/// Render the `<teiHeader>` for one series.
///
/// Agents, people, and languages referenced by the series are expected to
/// resolve; a miss aborts with `Error::NotFound`. Holdings that do not
/// resolve are skipped without comment.
pub fn render_header(series: &Series, store: &RecordStore, ctx: &TeiContext) -> Result<String> {
    let px = |uri: &str| format!("{}{}", ctx.uri_prefix, uri);

    let mut title_stmt = XmlWriter::new();
    title_stmt.open("titleStmt", &[]);
    title_stmt.element("title", &[], &series.title);

    let mut publication_stmt = XmlWriter::new();
    publication_stmt.open("publicationStmt", &[]);

    // Bare <term> elements; wrapped in textClass/keywords at assembly time.
    let mut keywords = XmlWriter::new();

    // Each agent lands in a different header section depending on its role.
    for agent_ref in &series.agents {
        let agent = store.agent(&agent_ref.uri)?;
        let person = store.person(&agent.person.uri)?;

        match agent.role.label.as_str() {
            "Author" => {
                person_element(&mut title_stmt, "author", &agent.person, person, ctx);
            }
            "Publisher" => {
                person_element(&mut publication_stmt, "publisher", &agent.person, person, ctx);
            }
            "Designer" | "Printmaker" => {
                title_stmt.open("respStmt", &[("sameAs", &px(&agent.uri))]);
                title_stmt.element("resp", &[("sameAs", &px(&agent.role.uri))], &agent.role.label);
                person_element(&mut title_stmt, "name", &agent.person, person, ctx);
                title_stmt.close();
            }
            other => {
                keywords.element(
                    "term",
                    &[("type", other), ("sameAs", &px(&agent.uri))],
                    &agent.person.label,
                );
            }
        }
    }

    if let Some(city) = &series.city_of_production {
        publication_stmt.element("pubPlace", &[("sameAs", &px(&city.uri))], &city.label);
    }
    if let Some(date) = &series.date_label {
        publication_stmt.element("date", &[], date);
    }
    publication_stmt.close();

    let classifications: [(&str, &[Ref]); 3] = [
        ("media", &series.media),
        ("school", &series.school),
        ("themes", &series.themes),
    ];
    for (class_type, items) in classifications {
        for item in items {
            keywords.element(
                "term",
                &[("type", class_type), ("sameAs", &px(&item.uri))],
                &item.label,
            );
        }
    }

    // Holdings and languages are collected from the series' images,
    // de-duplicated by URI in first-seen order.
    let mut source_desc = XmlWriter::new();
    source_desc.open("sourceDesc", &[]);
    let mut lang_usage = XmlWriter::new();
    lang_usage.open("langUsage", &[]);

    let mut seen_holdings: Vec<&str> = Vec::new();
    let mut seen_languages: Vec<&str> = Vec::new();

    for image in store.series_images(&series.uri) {
        for holding_ref in &image.holdings {
            if seen_holdings.contains(&holding_ref.uri.as_str()) {
                continue;
            }
            // Only resolved holdings enter the seen set; a dangling
            // reference is skipped and re-checked on its next occurrence.
            if let Some(holding) = store.holding(&holding_ref.uri) {
                seen_holdings.push(holding.uri.as_str());
                source_desc.open("msDesc", &[("sameAs", &px(&holding.uri))]);
                source_desc.open("msIdentifier", &[]);
                source_desc.element(
                    "institution",
                    &[("sameAs", &px(&holding.institution.uri))],
                    &holding.institution.label,
                );
                source_desc.element("idno", &[("type", "URI")], &holding.url);
                source_desc.element("idno", &[], &holding.identifier);
                source_desc.close();
                source_desc.element("p", &[], &holding.label);
                source_desc.close();
            }
        }
        for language_ref in &image.languages {
            if seen_languages.contains(&language_ref.uri.as_str()) {
                continue;
            }
            let language = store.language(&language_ref.uri)?;
            seen_languages.push(language.uri.as_str());
            lang_usage.element("language", &[("ident", &language.iso_code)], &language.label);
        }
    }

    source_desc.close();
    lang_usage.close();
    title_stmt.close();

    let encoding_desc = encode_motifs(&store.motifs, &ctx.uri_prefix);

    let mut header = XmlWriter::new();
    header.open("teiHeader", &[("xml:id", "header")]);
    header.open("fileDesc", &[("sameAs", &px(&series.uri))]);
    header.raw(&title_stmt.finish());
    header.raw(&publication_stmt.finish());
    header.raw(&source_desc.finish());
    header.close();
    header.open("profileDesc", &[]);
    header.open("textClass", &[]);
    header.open("keywords", &[]);
    header.raw(&keywords.finish());
    header.close();
    header.close();
    header.raw(&lang_usage.finish());
    header.close();
    header.raw(&encoding_desc);
    header.close();

    Ok(header.finish())
}

/// Emit a person-bearing element (`author`, `publisher`, `name`).
///
/// Text comes from the agent's embedded person reference; the full person
/// record only contributes the optional external `ref` attribute.
fn person_element(
    w: &mut XmlWriter,
    tag: &'static str,
    person_ref: &Ref,
    person: &Person,
    ctx: &TeiContext,
) {
    let same_as = format!("{}{}", ctx.uri_prefix, person_ref.uri);
    match person.external_ref() {
        Some(external) => {
            w.element(tag, &[("sameAs", &same_as), ("ref", external)], &person_ref.label);
        }
        None => {
            w.element(tag, &[("sameAs", &same_as)], &person_ref.label);
        }
    }
}
