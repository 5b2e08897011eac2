//! In-memory record store for one run.
//!
//! Collections that feed ordered traversals (series, images, motifs) stay as
//! vectors in fetch order; cross-referenced collections get URI-keyed lookup
//! tables. Everything is loaded once per run and passed by reference to the
//! renderers; nothing is mutated after load.

use std::collections::HashMap;

use tracing::info;

use folio_core::{
    Agent, Error, Holding, Image, Language, Motif, Person, RecordSource, Result, Series,
};

/// Snapshot of every fetched collection.
pub struct RecordStore {
    pub series: Vec<Series>,
    pub images: Vec<Image>,
    pub motifs: Vec<Motif>,
    agents: HashMap<String, Agent>,
    people: HashMap<String, Person>,
    holdings: HashMap<String, Holding>,
    languages: HashMap<String, Language>,
}

impl RecordStore {
    /// Fetch every collection from the source, one record type at a time.
    pub async fn load<S: RecordSource>(source: &S) -> Result<Self> {
        let series = source.series().await?;
        let agents = source.agents().await?;
        let people = source.people().await?;
        let holdings = source.holdings().await?;
        let languages = source.languages().await?;
        let images = source.images().await?;
        let motifs = source.motifs().await?;

        info!(
            series = series.len(),
            images = images.len(),
            motifs = motifs.len(),
            "record store loaded"
        );

        Ok(Self::from_parts(
            series, agents, people, holdings, languages, images, motifs,
        ))
    }

    /// Build a store from already-fetched collections.
    pub fn from_parts(
        series: Vec<Series>,
        agents: Vec<Agent>,
        people: Vec<Person>,
        holdings: Vec<Holding>,
        languages: Vec<Language>,
        images: Vec<Image>,
        motifs: Vec<Motif>,
    ) -> Self {
        Self {
            series,
            images,
            motifs,
            agents: agents.into_iter().map(|a| (a.uri.clone(), a)).collect(),
            people: people.into_iter().map(|p| (p.uri.clone(), p)).collect(),
            holdings: holdings.into_iter().map(|h| (h.uri.clone(), h)).collect(),
            languages: languages.into_iter().map(|l| (l.uri.clone(), l)).collect(),
        }
    }

    /// Resolve an agent reference. Every series agent is expected to exist.
    pub fn agent(&self, uri: &str) -> Result<&Agent> {
        self.agents
            .get(uri)
            .ok_or_else(|| Error::NotFound(format!("Agent {}", uri)))
    }

    /// Resolve a person reference. Every agent's person is expected to exist.
    pub fn person(&self, uri: &str) -> Result<&Person> {
        self.people
            .get(uri)
            .ok_or_else(|| Error::NotFound(format!("Person {}", uri)))
    }

    /// Resolve a holding reference. Unresolved holdings are tolerated; the
    /// caller skips them.
    pub fn holding(&self, uri: &str) -> Option<&Holding> {
        self.holdings.get(uri)
    }

    /// Resolve a language reference. Every image language is expected to
    /// exist.
    pub fn language(&self, uri: &str) -> Result<&Language> {
        self.languages
            .get(uri)
            .ok_or_else(|| Error::NotFound(format!("Language {}", uri)))
    }

    /// Images belonging to one series, in fetch order.
    pub fn series_images<'a>(&'a self, series_uri: &'a str) -> impl Iterator<Item = &'a Image> + 'a {
        self.images
            .iter()
            .filter(move |img| img.series.uri == series_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Ref;

    fn store_with_agent() -> RecordStore {
        let agent = Agent {
            uri: "/agent/a1".into(),
            person: Ref {
                uri: "/person/p1".into(),
                label: "Jane Doe".into(),
            },
            role: Ref {
                uri: "/role/author".into(),
                label: "Author".into(),
            },
        };
        RecordStore::from_parts(
            Vec::new(),
            vec![agent],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn test_agent_lookup_hits() {
        let store = store_with_agent();
        assert_eq!(store.agent("/agent/a1").unwrap().role.label, "Author");
    }

    #[test]
    fn test_agent_lookup_miss_is_not_found() {
        let store = store_with_agent();
        let err = store.agent("/agent/missing").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_holding_lookup_miss_is_tolerated() {
        let store = store_with_agent();
        assert!(store.holding("/holding/missing").is_none());
    }

    #[test]
    fn test_series_images_filters_by_uri_in_fetch_order() {
        let image = |uri: &str, series: &str, seq_no: i64| Image {
            uri: uri.into(),
            series: Ref {
                uri: series.into(),
                label: String::new(),
            },
            seq_no,
            label: String::new(),
            id: uri.trim_start_matches("/image/").into(),
            transcription: None,
            translation: None,
            holdings: Vec::new(),
            languages: Vec::new(),
        };
        let store = RecordStore::from_parts(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![
                image("/image/i2", "/series/s1", 2),
                image("/image/i9", "/series/s2", 1),
                image("/image/i1", "/series/s1", 1),
            ],
            Vec::new(),
        );

        let uris: Vec<&str> = store
            .series_images("/series/s1")
            .map(|i| i.uri.as_str())
            .collect();
        assert_eq!(uris, vec!["/image/i2", "/image/i1"]);
    }
}
