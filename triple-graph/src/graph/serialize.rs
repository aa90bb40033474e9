//! Canonical text serialization
//!
//! A serialized graph is UTF-8 text with one triple per line, sorted by the
//! whole canonical triple text, with no trailing newline. Blank lines are
//! skipped when reading and never written.

use super::{ordering, Graph};
use crate::errors::{GraphError, ParseError};
use crate::triple::Triple;

impl Graph {
    /// Serialize every triple in canonical order.
    ///
    /// An empty graph serializes to an empty byte vector. A stored triple
    /// whose text spans more than one line is rejected.
    pub fn marshal(&self) -> Result<Vec<u8>, GraphError> {
        let mut triples = self.triples()?;
        if let Some(broken) = triples.iter().find(|t| t.as_str().contains(['\n', '\r'])) {
            return Err(ParseError::triple(broken.as_str().escape_default().to_string()).into());
        }
        ordering::sort_triples(&mut triples);

        let lines: Vec<&str> = triples.iter().map(Triple::as_str).collect();
        Ok(lines.join("\n").into_bytes())
    }

    /// Parse serialized triples and add them one by one.
    ///
    /// Stops at the first line that fails to parse or add. Triples from
    /// earlier lines stay in the graph.
    pub fn unmarshal(&mut self, data: &[u8]) -> Result<(), GraphError> {
        let builder = self.config.literal_builder();

        for line in data.split(|b| *b == b'\n') {
            let line = std::str::from_utf8(line)
                .map_err(|_| ParseError::triple(String::from_utf8_lossy(line)))?;
            if line.trim().is_empty() {
                continue;
            }

            let triple = Triple::parse(line, &builder)?;
            self.add(std::slice::from_ref(&triple))?;
        }

        Ok(())
    }

    /// `marshal` as a string, returning an empty string on failure.
    ///
    /// The error is logged and dropped. Callers that need it should call
    /// `marshal` directly.
    pub fn flush_string(&self) -> String {
        match self.marshal() {
            Ok(bytes) => String::from_utf8(bytes).unwrap_or_default(),
            Err(e) => {
                tracing::warn!(graph = %self.name(), error = %e, "Failed to marshal graph");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use crate::errors::StoreError;
    use crate::store::{MemoryStore, StoredGraph};
    use crate::triple::{Literal, Node, Predicate};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::SyncSender;
    use std::sync::Arc;

    const FACT_1: &str = "/u<a>\t\"knows\"@[]\t/u<b>";
    const FACT_2: &str = "/u<b>\t\"knows\"@[]\t/u<c>";

    fn triple(line: &str) -> Triple {
        line.parse().unwrap()
    }

    #[test]
    fn test_marshal_sorts_regardless_of_input_order() {
        let graph = Graph::from_triples(
            MemoryStore::shared(),
            None,
            vec![triple(FACT_2), triple(FACT_1)],
        )
        .unwrap();

        let text = String::from_utf8(graph.marshal().unwrap()).unwrap();
        assert_eq!(text, format!("{}\n{}", FACT_1, FACT_2));
        assert_eq!(graph.flush_string(), text);
    }

    #[test]
    fn test_marshal_empty_graph() {
        let graph = Graph::new(MemoryStore::shared(), None).unwrap();
        assert!(graph.marshal().unwrap().is_empty());
        assert_eq!(graph.flush_string(), "");
    }

    #[test]
    fn test_unmarshal_skips_blank_lines() {
        let mut graph = Graph::new(MemoryStore::shared(), None).unwrap();
        let data = format!("\n{}\n   \r\n\t\n{}\r\n", FACT_1, FACT_2);

        graph.unmarshal(data.as_bytes()).unwrap();

        assert_eq!(graph.triples_count(), 2);
        assert_eq!(graph.sorted_triples().unwrap(), vec![triple(FACT_1), triple(FACT_2)]);
    }

    #[test]
    fn test_unmarshal_keeps_lines_before_failure() {
        let mut graph = Graph::new(MemoryStore::shared(), None).unwrap();
        let data = format!("{}\nbroken line\n{}", FACT_1, FACT_2);

        let err = graph.unmarshal(data.as_bytes()).unwrap_err();

        assert!(matches!(err, GraphError::Parse(_)));
        assert_eq!(graph.triples().unwrap(), vec![triple(FACT_1)]);
    }

    #[test]
    fn test_unmarshal_rejects_invalid_utf8() {
        let mut graph = Graph::new(MemoryStore::shared(), None).unwrap();
        assert!(matches!(
            graph.unmarshal(&[0xff, 0xfe, b'\n']),
            Err(GraphError::Parse(ParseError::InvalidTriple(_)))
        ));
    }

    #[test]
    fn test_unmarshal_uses_configured_literal_bound() {
        let mut graph = Graph::new(MemoryStore::shared(), None)
            .unwrap()
            .with_config(GraphConfig::default().with_max_literal_len(4));

        let err = graph
            .unmarshal(b"/u<a>\t\"name\"@[]\t\"Alexander\"^^type:text")
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::Parse(ParseError::LiteralTooLong { len: 9, max: 4 })
        ));
    }

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::shared();
        let original = Graph::from_triples(
            store.clone(),
            None,
            vec![
                triple("/u<john>\t\"name\"@[]\t\"John\"^^type:text"),
                triple("/u<john>\t\"age\"@[]\t\"42\"^^type:int64"),
                triple("/u<john>\t\"met\"@[2016-04-10T04:25:00.000000000Z]\t/u<mary>"),
            ],
        )
        .unwrap();

        let mut copy = Graph::new(store, None).unwrap();
        copy.unmarshal(&original.marshal().unwrap()).unwrap();

        assert_eq!(copy.sorted_triples().unwrap(), original.sorted_triples().unwrap());
    }

    /// Stored graph whose scans always fail.
    struct BrokenScan(Arc<dyn StoredGraph>);

    impl StoredGraph for BrokenScan {
        fn id(&self) -> &str {
            self.0.id()
        }

        fn add_triples(&self, triples: &[Triple]) -> Result<(), StoreError> {
            self.0.add_triples(triples)
        }

        fn remove_triples(&self, triples: &[Triple]) -> Result<(), StoreError> {
            self.0.remove_triples(triples)
        }

        fn exist(&self, triple: &Triple) -> Result<bool, StoreError> {
            self.0.exist(triple)
        }

        fn triples_for_subject_and_predicate(
            &self,
            subject: &Node,
            predicate: &Predicate,
        ) -> Result<Vec<Triple>, StoreError> {
            self.0.triples_for_subject_and_predicate(subject, predicate)
        }

        fn triples(&self, sender: SyncSender<Triple>) -> Result<(), StoreError> {
            // Send part of the data before failing; callers must not see it.
            self.0.triples(sender)?;
            Err(StoreError::Backend("scan interrupted".to_string()))
        }
    }

    #[test]
    fn test_scan_failure_surfaces_from_marshal_only() {
        let mut graph =
            Graph::from_triples(MemoryStore::shared(), None, vec![triple(FACT_1)]).unwrap();
        graph.backing = Arc::new(BrokenScan(graph.backing.clone()));

        assert!(matches!(
            graph.marshal(),
            Err(GraphError::Store(StoreError::Backend(_)))
        ));
        assert!(graph.triples().is_err());
        assert_eq!(graph.flush_string(), "");
    }

    #[test]
    fn test_marshal_rejects_multiline_text() {
        let store = MemoryStore::shared();
        let note = Triple::new(
            Node::parse("/u<a>").unwrap(),
            Predicate::immutable("note").unwrap(),
            Literal::Text("a\nb".to_string()),
        );
        let graph = Graph::from_triples(store.clone(), None, vec![triple(FACT_1), note]).unwrap();

        assert!(matches!(
            graph.marshal(),
            Err(GraphError::Parse(ParseError::InvalidTriple(_)))
        ));
        assert_eq!(graph.flush_string(), "");

        // What does get written always reads back.
        let single = Graph::from_triples(store.clone(), None, vec![triple(FACT_1)]).unwrap();
        let mut copy = Graph::new(store, None).unwrap();
        copy.unmarshal(&single.marshal().unwrap()).unwrap();
        assert_eq!(copy.sorted_triples().unwrap(), vec![triple(FACT_1)]);
    }

    /// Stored graph that accepts one add call, then fails.
    struct FailingAdd {
        inner: Arc<dyn StoredGraph>,
        accepted: AtomicUsize,
    }

    impl StoredGraph for FailingAdd {
        fn id(&self) -> &str {
            self.inner.id()
        }

        fn add_triples(&self, triples: &[Triple]) -> Result<(), StoreError> {
            if self.accepted.fetch_add(1, Ordering::SeqCst) >= 1 {
                return Err(StoreError::Backend("disk full".to_string()));
            }
            self.inner.add_triples(triples)
        }

        fn remove_triples(&self, triples: &[Triple]) -> Result<(), StoreError> {
            self.inner.remove_triples(triples)
        }

        fn exist(&self, triple: &Triple) -> Result<bool, StoreError> {
            self.inner.exist(triple)
        }

        fn triples_for_subject_and_predicate(
            &self,
            subject: &Node,
            predicate: &Predicate,
        ) -> Result<Vec<Triple>, StoreError> {
            self.inner.triples_for_subject_and_predicate(subject, predicate)
        }

        fn triples(&self, sender: SyncSender<Triple>) -> Result<(), StoreError> {
            self.inner.triples(sender)
        }
    }

    #[test]
    fn test_unmarshal_stops_at_first_add_failure() {
        let mut graph = Graph::new(MemoryStore::shared(), None).unwrap();
        graph.backing = Arc::new(FailingAdd {
            inner: graph.backing.clone(),
            accepted: AtomicUsize::new(0),
        });
        let third = "/u<c>\t\"knows\"@[]\t/u<d>";
        let data = format!("{}\n{}\n{}", FACT_1, FACT_2, third);

        let err = graph.unmarshal(data.as_bytes()).unwrap_err();

        assert!(matches!(err, GraphError::Store(StoreError::Backend(_))));
        assert_eq!(graph.triples().unwrap(), vec![triple(FACT_1)]);
        // The failed add still moved the counter; the third line was never read.
        assert_eq!(graph.triples_count(), 2);
    }
}
