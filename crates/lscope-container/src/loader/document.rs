//! Serde model of a container dump and its conversion into a graph.

use std::path::Path;

use indexmap::IndexMap;
use lscope_common::error::{LscopeError, Result};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::definition::{Alias, Definition, TagAttributes};
use crate::graph::ServiceGraph;
use crate::parameters::ParameterBag;

/// Root of a dump document.
///
/// Service entries stay raw values: dumps carry arbitrary tagged values
/// (`!tagged_iterator`, `!php/const`) in keys the graph never reads.
#[derive(Debug, Deserialize)]
pub(crate) struct DumpDocument {
    #[serde(default)]
    parameters: Option<IndexMap<String, Value>>,
    #[serde(default)]
    services: Option<IndexMap<String, Value>>,
}

impl DumpDocument {
    /// Builds the service graph described by this document.
    ///
    /// `origin` only feeds error messages.
    pub(crate) fn into_graph(self, origin: &Path) -> Result<ServiceGraph> {
        let parameters = collect_parameters(self.parameters.unwrap_or_default());
        let mut graph = ServiceGraph::new();

        for (id, service) in self.services.unwrap_or_default() {
            match untagged(&service) {
                Value::Null => graph.set_definition(id, Definition::default()),
                Value::String(reference) => {
                    let Some(target) = reference.strip_prefix('@') else {
                        return Err(invalid(
                            origin,
                            format!("service \"{id}\" must be a mapping or an \"@\" reference"),
                        ));
                    };
                    let target = target.strip_prefix('?').unwrap_or(target);
                    graph.set_alias(id, Alias::new(target));
                }
                Value::Mapping(mapping) => {
                    if let Some(target) = mapping.get("alias") {
                        let Value::String(target) = untagged(target) else {
                            return Err(invalid(
                                origin,
                                format!("alias \"{id}\" must name its target as a string"),
                            ));
                        };
                        graph.set_alias(id, Alias::new(target.as_str()));
                    } else {
                        let definition = build_definition(&id, mapping, &parameters, origin)?;
                        graph.set_definition(id, definition);
                    }
                }
                _ => {
                    return Err(invalid(
                        origin,
                        format!("service \"{id}\" must be a mapping or an \"@\" reference"),
                    ));
                }
            }
        }

        graph.set_parameters(parameters);
        Ok(graph)
    }
}

fn collect_parameters(raw: IndexMap<String, Value>) -> ParameterBag {
    tracing::debug!(parameters = raw.len(), "collecting container parameters");
    let mut bag = ParameterBag::new();
    for (name, value) in raw {
        match scalar_to_string(&value) {
            Some(text) => bag.set(name, text),
            None => tracing::debug!(parameter = %name, "skipping non-scalar parameter"),
        }
    }
    bag
}

fn build_definition(
    id: &str,
    dump: &Mapping,
    parameters: &ParameterBag,
    origin: &Path,
) -> Result<Definition> {
    let public = match dump.get("public").map(untagged) {
        None | Some(Value::Null) => true,
        Some(Value::Bool(public)) => *public,
        Some(_) => {
            return Err(invalid(
                origin,
                format!("\"public\" of service \"{id}\" must be a boolean"),
            ));
        }
    };
    let mut definition = Definition::default().with_public(public);
    if let Some(class) = text_field(dump, "class", id, origin)? {
        definition.set_class(Some(parameters.resolve(&class)?));
    }
    if let Some(scope) = text_field(dump, "scope", id, origin)? {
        definition = definition.with_scope(parameters.resolve(&scope)?);
    }

    let tags = match dump.get("tags").map(untagged) {
        None | Some(Value::Null) => return Ok(definition),
        Some(Value::Sequence(tags)) => tags,
        Some(_) => {
            return Err(invalid(
                origin,
                format!("\"tags\" of service \"{id}\" must be a list"),
            ));
        }
    };
    for tag in tags {
        let (name, attributes) = match untagged(tag) {
            Value::String(name) => (name.clone(), TagAttributes::new()),
            Value::Mapping(raw) => build_tag(id, raw, origin)?,
            _ => {
                return Err(invalid(
                    origin,
                    format!("a \"tags\" entry of service \"{id}\" must be a name or a mapping"),
                ));
            }
        };
        definition.add_tag(name, attributes);
    }

    Ok(definition)
}

/// Splits a `{ name: ..., attr: ... }` tag entry into its name and
/// attributes. Null attributes count as absent.
fn build_tag(id: &str, raw: &Mapping, origin: &Path) -> Result<(String, TagAttributes)> {
    let Some(Value::String(name)) = raw.get("name").map(untagged) else {
        return Err(invalid(
            origin,
            format!("a \"tags\" entry is missing a \"name\" key for service \"{id}\""),
        ));
    };

    let mut attributes = TagAttributes::new();
    for (key, value) in raw {
        let Some(key) = scalar_to_string(key) else {
            return Err(invalid(
                origin,
                format!("tag \"{name}\" of service \"{id}\" has a non-scalar attribute name"),
            ));
        };
        let value = untagged(value);
        if key == "name" || value.is_null() {
            continue;
        }
        let Some(text) = scalar_to_string(value) else {
            return Err(invalid(
                origin,
                format!("tag \"{name}\" attribute \"{key}\" of service \"{id}\" must be a scalar"),
            ));
        };
        let _ = attributes.insert(key, text);
    }
    Ok((name.clone(), attributes))
}

/// Optional scalar field of a definition, `None` when missing or null.
fn text_field(dump: &Mapping, key: &str, id: &str, origin: &Path) -> Result<Option<String>> {
    match dump.get(key).map(untagged) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(value).map(Some).ok_or_else(|| {
            invalid(
                origin,
                format!("\"{key}\" of service \"{id}\" must be a scalar"),
            )
        }),
    }
}

/// Strips YAML tags, e.g. `!php/const Foo::BAR` reads as `Foo::BAR`.
fn untagged(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untagged(&tagged.value),
        other => other,
    }
}

/// Renders a scalar YAML/JSON value as text; `None` for sequences and mappings.
fn scalar_to_string(value: &Value) -> Option<String> {
    match untagged(value) {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn invalid(origin: &Path, message: String) -> LscopeError {
    LscopeError::InvalidDump {
        path: origin.to_path_buf(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ServiceEntry;

    fn parse(yaml: &str) -> Result<ServiceGraph> {
        let doc: DumpDocument = serde_yaml::from_str(yaml)?;
        doc.into_graph(Path::new("dump.yaml"))
    }

    #[test]
    fn empty_document_yields_only_self_reference() {
        let graph = parse("{}").expect("parse");
        assert_eq!(graph.definitions().count(), 0);
        assert!(graph.raw_service("service_container").is_ok());
    }

    #[test]
    fn null_sections_are_accepted() {
        let graph = parse("parameters: ~\nservices: ~\n").expect("parse");
        assert_eq!(graph.definitions().count(), 0);
    }

    #[test]
    fn definition_fields_and_defaults() {
        let graph = parse(
            r"
services:
    mailer:
        class: App\Mailer
    request.handler:
        class: App\Handler
        scope: request
        public: false
    bare: ~
",
        )
        .expect("parse");

        let mailer = graph.definition("mailer").expect("mailer");
        assert_eq!(mailer.class(), Some("App\\Mailer"));
        assert_eq!(mailer.scope(), "container");
        assert!(mailer.is_public());

        let handler = graph.definition("request.handler").expect("handler");
        assert_eq!(handler.scope(), "request");
        assert!(!handler.is_public());

        assert_eq!(graph.definition("bare").expect("bare").class(), None);
    }

    #[test]
    fn tags_keep_order_and_stringify_scalars() {
        let graph = parse(
            r"
services:
    a.listener:
        class: App\Listener
        tags:
            - { name: monolog.logger, channel: request }
            - { name: kernel.event_listener, event: request, method: onRequest, priority: -10 }
            - kernel.reset
",
        )
        .expect("parse");

        let def = graph.definition("a.listener").expect("listener");
        let names: Vec<_> = def.tags().keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["monolog.logger", "kernel.event_listener", "kernel.reset"]
        );
        let attrs = &def.tag("kernel.event_listener")[0];
        assert_eq!(attrs["priority"], "-10");
        assert!(!attrs.contains_key("name"));
        assert!(def.tag("kernel.reset")[0].is_empty());
    }

    #[test]
    fn both_alias_spellings() {
        let graph = parse(
            r"
services:
    mailer: { class: App\Mailer }
    short: '@mailer'
    long: { alias: mailer, public: false }
",
        )
        .expect("parse");

        assert!(matches!(graph.resolve("short"), Ok(ServiceEntry::Alias(a)) if a.target() == "mailer"));
        assert_eq!(graph.alias("long").expect("alias").target(), "mailer");
    }

    #[test]
    fn class_placeholders_are_resolved() {
        let graph = parse(
            r"
parameters:
    listener.class: App\RequestListener
services:
    a.listener:
        class: '%listener.class%'
",
        )
        .expect("parse");
        assert_eq!(
            graph.definition("a.listener").expect("def").class(),
            Some("App\\RequestListener")
        );
        assert_eq!(
            graph.parameters().get("listener.class"),
            Some("App\\RequestListener")
        );
    }

    #[test]
    fn unknown_parameter_fails() {
        let err = parse("services:\n    x: { class: '%missing%' }\n").unwrap_err();
        assert!(matches!(err, LscopeError::ParameterNotFound { .. }));
    }

    #[test]
    fn tag_without_name_fails() {
        let err = parse("services:\n    x:\n        tags: [{ event: request }]\n").unwrap_err();
        assert!(matches!(err, LscopeError::InvalidDump { .. }), "got {err:?}");
    }

    #[test]
    fn tagged_values_are_read_or_ignored() {
        let graph = parse(
            r"
services:
    a.listener:
        class: App\Listener
        arguments: [!tagged_iterator app.handler, '@logger']
        calls:
            - [setLocator, [!service_locator { mailer: '@mailer' }]]
        tags:
            - name: kernel.event_listener
              event: request
              priority: !php/const App\Listener::PRIORITY
    handler: !service { class: App\Handler }
",
        )
        .expect("parse");

        let def = graph.definition("a.listener").expect("listener");
        let attrs = &def.tag("kernel.event_listener")[0];
        assert_eq!(attrs["event"], "request");
        assert_eq!(attrs["priority"], "App\\Listener::PRIORITY");
        assert_eq!(graph.definition("handler").expect("handler").class(), Some("App\\Handler"));
    }

    #[test]
    fn null_tag_attributes_are_absent() {
        let graph = parse(
            r"
services:
    a.listener:
        class: App\Listener
        tags:
            - { name: kernel.event_listener, event: request, method: ~, priority: ~ }
",
        )
        .expect("parse");

        let attrs = &graph.definition("a.listener").expect("listener").tag("kernel.event_listener")[0];
        assert_eq!(attrs["event"], "request");
        assert!(!attrs.contains_key("method"));
        assert!(!attrs.contains_key("priority"));
    }

    #[test]
    fn sequence_service_fails() {
        let err = parse("services:\n    x: [a, b]\n").unwrap_err();
        assert!(matches!(err, LscopeError::InvalidDump { .. }), "got {err:?}");
    }

    #[test]
    fn non_reference_string_fails() {
        let err = parse("services:\n    x: mailer\n").unwrap_err();
        assert!(err.to_string().contains("\"@\" reference"), "got {err}");
    }
}
