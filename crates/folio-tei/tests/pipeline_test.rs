//! End-to-end pipeline behavior over in-memory stub sources.

use std::collections::HashMap;
use std::fs;

use async_trait::async_trait;

use folio_core::{
    Agent, Error, Holding, Image, ImageDetail, ImageDetailSource, ImageFile, Language, Motif,
    Person, RecordSource, Ref, Result, Series,
};
use folio_tei::pipeline::{generate, update_motifs_dir, update_motifs_file};
use folio_tei::taxonomy::encode_motifs;
use folio_tei::{SeriesSelection, TeiContext};

/// In-memory corpus standing in for the paginated API.
struct StubCorpus {
    series: Vec<Series>,
    agents: Vec<Agent>,
    people: Vec<Person>,
    holdings: Vec<Holding>,
    languages: Vec<Language>,
    images: Vec<Image>,
    motifs: Vec<Motif>,
    details: HashMap<String, ImageDetail>,
}

#[async_trait]
impl RecordSource for StubCorpus {
    async fn series(&self) -> Result<Vec<Series>> {
        Ok(self.series.clone())
    }
    async fn agents(&self) -> Result<Vec<Agent>> {
        Ok(self.agents.clone())
    }
    async fn people(&self) -> Result<Vec<Person>> {
        Ok(self.people.clone())
    }
    async fn holdings(&self) -> Result<Vec<Holding>> {
        Ok(self.holdings.clone())
    }
    async fn languages(&self) -> Result<Vec<Language>> {
        Ok(self.languages.clone())
    }
    async fn images(&self) -> Result<Vec<Image>> {
        Ok(self.images.clone())
    }
    async fn motifs(&self) -> Result<Vec<Motif>> {
        Ok(self.motifs.clone())
    }
}

#[async_trait]
impl ImageDetailSource for StubCorpus {
    async fn image_detail(&self, id: &str) -> Result<ImageDetail> {
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| Error::Request(format!("no detail for {}", id)))
    }
}

fn reference(uri: &str, label: &str) -> Ref {
    Ref {
        uri: uri.to_string(),
        label: label.to_string(),
    }
}

fn motif(uri: &str, label: &str, parent: Option<&str>) -> Motif {
    Motif {
        id: uri.trim_start_matches("/motif/").to_string(),
        uri: uri.to_string(),
        label: label.to_string(),
        name: label.to_string(),
        parent: parent.map(|p| reference(p, "")),
    }
}

fn corpus() -> StubCorpus {
    let mut details = HashMap::new();
    details.insert(
        "img1".to_string(),
        ImageDetail {
            image: Some(ImageFile {
                path: "/plates/01.tif".into(),
            }),
            external_iiif_url: None,
        },
    );
    details.insert(
        "img2".to_string(),
        ImageDetail {
            image: None,
            external_iiif_url: Some("https://other.example/iiif/02".into()),
        },
    );

    StubCorpus {
        series: vec![Series {
            uri: "/series/s1".into(),
            title: "The Great Series.".into(),
            agents: vec![reference("/agent/a1", "")],
            city_of_production: Some(reference("/place/antwerp", "Antwerp")),
            date_label: Some("ca. 1580".into()),
            media: vec![reference("/media/engraving", "Engraving")],
            school: Vec::new(),
            themes: Vec::new(),
        }],
        agents: vec![Agent {
            uri: "/agent/a1".into(),
            person: reference("/person/p1", "Jane Doe"),
            role: reference("/role/author", "Author"),
        }],
        people: vec![Person {
            uri: "/person/p1".into(),
            label: "Jane Doe".into(),
            authoritative_uri: None,
        }],
        holdings: vec![Holding {
            uri: "/holding/h1".into(),
            institution: reference("/inst/lib", "Crown Library"),
            url: "https://lib.example/h1".into(),
            identifier: "MS 42".into(),
            label: "First edition copy".into(),
        }],
        languages: vec![Language {
            uri: "/lang/la".into(),
            iso_code: "la".into(),
            label: "Latin".into(),
        }],
        images: vec![
            Image {
                uri: "/image/i2".into(),
                series: reference("/series/s1", ""),
                seq_no: 2,
                label: "Plate 2".into(),
                id: "img2".into(),
                transcription: None,
                translation: None,
                holdings: Vec::new(),
                languages: Vec::new(),
            },
            Image {
                uri: "/image/i1".into(),
                series: reference("/series/s1", ""),
                seq_no: 1,
                label: "Plate 1".into(),
                id: "img1".into(),
                transcription: Some("In principio & verbo".into()),
                translation: None,
                holdings: vec![reference("/holding/h1", "")],
                languages: vec![reference("/lang/la", "")],
            },
        ],
        motifs: vec![
            motif("/motif/m1", "Animals", None),
            motif("/motif/m2", "Birds", Some("/motif/m1")),
        ],
        details,
    }
}

fn ctx() -> TeiContext {
    TeiContext {
        uri_prefix: "https://x.example".into(),
        iiif_base: "https://iiif.example".into(),
    }
}

#[tokio::test]
async fn generate_all_writes_complete_document() {
    let corpus = corpus();
    let out = tempfile::tempdir().unwrap();

    generate(&corpus, SeriesSelection::All, out.path(), &ctx())
        .await
        .unwrap();

    let doc = fs::read_to_string(out.path().join("the_great_series.xml")).unwrap();
    assert!(doc.starts_with(r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><teiHeader xml:id="header">"#));
    assert!(doc.ends_with("</facsimile></TEI>"));

    // Header cross-references resolved.
    assert!(doc.contains(r#"<author sameAs="https://x.example/person/p1">Jane Doe</author>"#));
    assert!(doc.contains(r#"<pubPlace sameAs="https://x.example/place/antwerp">Antwerp</pubPlace>"#));
    assert!(doc.contains(r#"<language ident="la">Latin</language>"#));
    assert!(doc.contains("<msDesc"));

    // Body: surfaces ordered by seq_no, transcription escaped, IIIF resolved.
    let f1 = doc.find(r#"<surface xml:id="f0001""#).unwrap();
    let f2 = doc.find(r#"<surface xml:id="f0002""#).unwrap();
    assert!(f1 < f2);
    assert!(doc.contains(r#"url="https://iiif.example/plates/01.tif""#));
    assert!(doc.contains(r#"url="https://other.example/iiif/02""#));
    assert!(doc.contains("<p>In principio &amp; verbo</p>"));

    // Block order under the root.
    let header = doc.find("<teiHeader").unwrap();
    let transcription = doc.find(r#"<text xml:id="transcription">"#).unwrap();
    let translation = doc.find(r#"<text xml:id="translation">"#).unwrap();
    let facsimile = doc.find(r#"<facsimile xml:id="prints">"#).unwrap();
    assert!(header < transcription && transcription < translation && translation < facsimile);
}

#[tokio::test]
async fn generate_by_title_matches_derived_filename() {
    let mut corpus = corpus();
    corpus.series.push(Series {
        uri: "/series/s2".into(),
        title: "Other Work".into(),
        agents: Vec::new(),
        city_of_production: None,
        date_label: None,
        media: Vec::new(),
        school: Vec::new(),
        themes: Vec::new(),
    });
    let out = tempfile::tempdir().unwrap();

    generate(
        &corpus,
        SeriesSelection::ByTitle("The Great Series.".into()),
        out.path(),
        &ctx(),
    )
    .await
    .unwrap();

    assert!(out.path().join("the_great_series.xml").is_file());
    assert!(!out.path().join("other_work.xml").exists());
}

#[tokio::test]
async fn generate_from_input_dir_selects_matching_series() {
    let corpus = corpus();
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(input.path().join("the_great_series.xml"), "placeholder").unwrap();
    fs::write(input.path().join("unrelated.xml"), "placeholder").unwrap();

    generate(
        &corpus,
        SeriesSelection::FromInputDir(input.path().to_path_buf()),
        out.path(),
        &ctx(),
    )
    .await
    .unwrap();

    assert!(out.path().join("the_great_series.xml").is_file());
}

#[tokio::test]
async fn motif_patch_roundtrips_against_direct_encoding() {
    let corpus = corpus();
    let out = tempfile::tempdir().unwrap();
    generate(&corpus, SeriesSelection::All, out.path(), &ctx())
        .await
        .unwrap();

    let patched_dir = tempfile::tempdir().unwrap();
    let doc_path = out.path().join("the_great_series.xml");
    update_motifs_file(&corpus, &doc_path, patched_dir.path(), &ctx())
        .await
        .unwrap();

    let patched = fs::read_to_string(patched_dir.path().join("the_great_series.xml")).unwrap();
    let start = patched.rfind("<encodingDesc>").unwrap();
    let end = patched.find("\n</teiHeader>").unwrap();
    assert_eq!(
        &patched[start..end],
        encode_motifs(&corpus.motifs, "https://x.example")
    );
}

#[tokio::test]
async fn update_motifs_dir_patches_every_document_and_skips_keep() {
    let corpus = corpus();
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let doc = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><teiHeader xml:id="header"></teiHeader></TEI>"#;
    fs::write(input.path().join("a.xml"), doc).unwrap();
    fs::write(input.path().join("b.xml"), doc).unwrap();
    fs::write(input.path().join(".keep"), "").unwrap();

    update_motifs_dir(&corpus, input.path(), out.path(), &ctx())
        .await
        .unwrap();

    for name in ["a.xml", "b.xml"] {
        let patched = fs::read_to_string(out.path().join(name)).unwrap();
        assert!(patched.contains(r#"<taxonomy xml:id="motifs">"#));
    }
    assert!(!out.path().join(".keep").exists());
}

#[tokio::test]
async fn update_motifs_dir_missing_directory_is_operator_error() {
    let corpus = corpus();
    let out = tempfile::tempdir().unwrap();

    let err = update_motifs_dir(
        &corpus,
        std::path::Path::new("/nonexistent/input"),
        out.path(),
        &ctx(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn update_motifs_file_rejects_non_xml_target() {
    let corpus = corpus();
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let path = input.path().join("notes.txt");
    fs::write(&path, "not xml").unwrap();

    let err = update_motifs_file(&corpus, &path, out.path(), &ctx())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn detail_fetch_failure_aborts_generation() {
    let mut corpus = corpus();
    corpus.details.remove("img2");
    let out = tempfile::tempdir().unwrap();

    let err = generate(&corpus, SeriesSelection::All, out.path(), &ctx())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Request(_)));
}
