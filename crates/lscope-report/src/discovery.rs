//! Listener discovery.
//!
//! The index is driven by the definition registry: each definition's
//! *first* tag decides whether it seeds a lookup. A definition whose
//! listener tag is not its first one is only found when another definition
//! seeds the same tag name.

use indexmap::IndexMap;
use lscope_common::constants::{EVENT_DISPATCHER_ID, EVENT_LISTENER_TAG_SUFFIX};
use lscope_container::{ServiceGraph, TagAttributes};

/// Whether `name` is `<prefix>.event_listener` with a non-empty prefix.
pub fn is_listener_tag(name: &str) -> bool {
    name.len() > EVENT_LISTENER_TAG_SUFFIX.len() && name.ends_with(EVENT_LISTENER_TAG_SUFFIX)
}

/// Discovered listeners: service id to the first attribute set found under
/// the listener tag that matched it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenerIndex {
    records: IndexMap<String, TagAttributes>,
}

impl ListenerIndex {
    /// Records `id`, replacing any previous attribute set.
    pub fn insert(&mut self, id: impl Into<String>, attributes: TagAttributes) {
        let _ = self.records.insert(id.into(), attributes);
    }

    /// Ids in discovery order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Ids in ascending order, as listed in the summary.
    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.ids().collect();
        ids.sort_unstable();
        ids
    }

    /// Tag attributes recorded for `id`.
    pub fn attributes(&self, id: &str) -> Option<&TagAttributes> {
        self.records.get(id)
    }

    /// The `event` attribute recorded for `id`, empty when absent.
    pub fn event(&self, id: &str) -> &str {
        self.attributes(id)
            .and_then(|attrs| attrs.get("event"))
            .map_or("", String::as_str)
    }

    /// Number of listeners.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no listener was discovered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Builds the listener index of `graph`.
///
/// Returns an empty index when the graph has no `event_dispatcher`
/// definition.
pub fn discover_listeners(graph: &ServiceGraph) -> ListenerIndex {
    let mut index = ListenerIndex::default();
    if !graph.has_definition(EVENT_DISPATCHER_ID) {
        tracing::debug!("no event dispatcher defined, skipping listener discovery");
        return index;
    }

    for (id, definition) in graph.definitions() {
        let Some(first_tag) = definition.tags().keys().next() else {
            continue;
        };
        if !is_listener_tag(first_tag) {
            tracing::trace!(service = id, tag = %first_tag, "first tag is not a listener tag");
            continue;
        }
        for (listener_id, attributes) in graph.find_ids_by_tag(first_tag) {
            index.insert(listener_id, attributes.first().cloned().unwrap_or_default());
        }
    }

    tracing::debug!(listeners = index.len(), "listener discovery complete");
    index
}
