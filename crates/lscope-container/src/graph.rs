//! The service graph: a read-only view of a compiled container.
//!
//! Holds definitions, aliases, and raw instances by id, each in
//! registration order, and answers the lookups the reporter needs.

use indexmap::IndexMap;
use lscope_common::constants::SERVICE_CONTAINER_ID;
use lscope_common::error::{LscopeError, Result};

use crate::definition::{Alias, Definition, RawInstance, ServiceEntry, TagAttributes};
use crate::parameters::ParameterBag;

/// A materialized service graph.
#[derive(Debug, Clone)]
pub struct ServiceGraph {
    parameters: ParameterBag,
    definitions: IndexMap<String, Definition>,
    aliases: IndexMap<String, Alias>,
    services: IndexMap<String, RawInstance>,
}

impl ServiceGraph {
    /// Creates an empty graph. The graph registers itself as the raw
    /// instance `service_container`.
    #[must_use]
    pub fn new() -> Self {
        let mut services = IndexMap::new();
        let _ = services.insert(
            SERVICE_CONTAINER_ID.to_string(),
            RawInstance::new(std::any::type_name::<Self>()),
        );
        Self {
            parameters: ParameterBag::new(),
            definitions: IndexMap::new(),
            aliases: IndexMap::new(),
            services,
        }
    }

    /// Replaces the parameters of the graph.
    pub fn set_parameters(&mut self, parameters: ParameterBag) {
        self.parameters = parameters;
    }

    /// Parameters the graph was compiled with.
    pub const fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }

    /// Registers a definition, replacing any alias of the same id.
    pub fn set_definition(&mut self, id: impl Into<String>, definition: Definition) {
        let id = id.into();
        let _ = self.aliases.shift_remove(&id);
        let _ = self.definitions.insert(id, definition);
    }

    /// Registers an alias, replacing any definition of the same id.
    pub fn set_alias(&mut self, id: impl Into<String>, alias: Alias) {
        let id = id.into();
        let _ = self.definitions.shift_remove(&id);
        let _ = self.aliases.insert(id, alias);
    }

    /// Registers an already-built service.
    pub fn set_raw_service(&mut self, id: impl Into<String>, instance: RawInstance) {
        let _ = self.services.insert(id.into(), instance);
    }

    /// Whether a definition exists for `id`.
    pub fn has_definition(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// Returns the definition registered for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LscopeError::UnknownServiceId`] if there is none.
    pub fn definition(&self, id: &str) -> Result<&Definition> {
        self.definitions.get(id).ok_or_else(|| unknown(id))
    }

    /// Whether an alias exists for `id`.
    pub fn has_alias(&self, id: &str) -> bool {
        self.aliases.contains_key(id)
    }

    /// Returns the alias registered for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LscopeError::UnknownServiceId`] if there is none.
    pub fn alias(&self, id: &str) -> Result<&Alias> {
        self.aliases.get(id).ok_or_else(|| unknown(id))
    }

    /// All definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.definitions.iter().map(|(id, def)| (id.as_str(), def))
    }

    /// All aliases in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &Alias)> {
        self.aliases.iter().map(|(id, alias)| (id.as_str(), alias))
    }

    /// Every definition carrying the tag `name`, with the attribute sets
    /// attached under it, in registration order.
    pub fn find_ids_by_tag(&self, name: &str) -> IndexMap<&str, &[TagAttributes]> {
        self.definitions
            .iter()
            .filter_map(|(id, def)| {
                def.tags()
                    .get(name)
                    .map(|attrs| (id.as_str(), attrs.as_slice()))
            })
            .collect()
    }

    /// Returns the raw instance registered for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LscopeError::UnknownServiceId`] if there is none.
    pub fn raw_service(&self, id: &str) -> Result<&RawInstance> {
        self.services.get(id).ok_or_else(|| unknown(id))
    }

    /// Resolves `id` to its entry: a definition first, then an alias,
    /// then a raw instance.
    ///
    /// # Errors
    ///
    /// Returns [`LscopeError::UnknownServiceId`] if no source knows `id`.
    pub fn resolve(&self, id: &str) -> Result<ServiceEntry<'_>> {
        if let Some(def) = self.definitions.get(id) {
            return Ok(ServiceEntry::Definition(def));
        }
        if let Some(alias) = self.aliases.get(id) {
            return Ok(ServiceEntry::Alias(alias));
        }
        self.raw_service(id).map(ServiceEntry::RawInstance)
    }
}

impl Default for ServiceGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown(id: &str) -> LscopeError {
    LscopeError::UnknownServiceId { id: id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listener(event: &str) -> Definition {
        Definition::new("App\\Listener").with_tag("kernel.event_listener", [("event", event)])
    }

    #[test]
    fn empty_graph_knows_itself() {
        let graph = ServiceGraph::new();
        assert!(!graph.has_definition(SERVICE_CONTAINER_ID));
        match graph.resolve(SERVICE_CONTAINER_ID).expect("self reference") {
            ServiceEntry::RawInstance(raw) => assert!(raw.type_name().ends_with("ServiceGraph")),
            other => panic!("expected raw instance, got {other:?}"),
        }
    }

    #[test]
    fn definition_wins_over_alias_and_raw() {
        let mut graph = ServiceGraph::new();
        graph.set_definition(SERVICE_CONTAINER_ID, Definition::new("Custom"));
        assert!(matches!(
            graph.resolve(SERVICE_CONTAINER_ID),
            Ok(ServiceEntry::Definition(_))
        ));
    }

    #[test]
    fn alias_resolves_to_alias_entry() {
        let mut graph = ServiceGraph::new();
        graph.set_definition("mailer", Definition::new("Mailer"));
        graph.set_alias("mail", Alias::new("mailer"));

        match graph.resolve("mail").expect("alias") {
            ServiceEntry::Alias(alias) => assert_eq!(alias.target(), "mailer"),
            other => panic!("expected alias, got {other:?}"),
        }
        assert!(graph.has_alias("mail"));
        assert!(graph.definition("mail").is_err());
    }

    #[test]
    fn setting_alias_replaces_definition() {
        let mut graph = ServiceGraph::new();
        graph.set_definition("x", Definition::new("X"));
        graph.set_alias("x", Alias::new("y"));
        assert!(!graph.has_definition("x"));
        assert!(graph.has_alias("x"));
    }

    #[test]
    fn unknown_id_fails() {
        let graph = ServiceGraph::new();
        let err = graph.resolve("missing").unwrap_err();
        assert!(matches!(err, LscopeError::UnknownServiceId { ref id } if id == "missing"));
    }

    #[test]
    fn find_ids_by_tag_follows_registration_order() {
        let mut graph = ServiceGraph::new();
        graph.set_definition("z.listener", listener("request"));
        graph.set_definition("plain", Definition::new("Plain"));
        graph.set_definition("a.listener", listener("response"));

        let found = graph.find_ids_by_tag("kernel.event_listener");
        let ids: Vec<_> = found.keys().copied().collect();
        assert_eq!(ids, vec!["z.listener", "a.listener"]);
        assert_eq!(found["a.listener"][0]["event"], "response");
    }

    #[test]
    fn definitions_iterate_in_registration_order() {
        let mut graph = ServiceGraph::new();
        graph.set_definition("b", Definition::new("B"));
        graph.set_definition("a", Definition::new("A"));
        let ids: Vec<_> = graph.definitions().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
