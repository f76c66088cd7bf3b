//! Detail view of a single service.
//!
//! Works for any id in the graph, listener or not. Unlike discovery, every
//! listener tag of a definition is listed, whatever its position.

use lscope_common::error::Result;
use lscope_container::{Definition, ServiceEntry, ServiceGraph, TagAttributes};

use crate::discovery::is_listener_tag;
use crate::format::{field, section};

const DEFAULT_PRIORITY: &str = "0";

/// Renders everything known about `id`.
///
/// # Errors
///
/// Returns [`LscopeError::UnknownServiceId`](lscope_common::error::LscopeError::UnknownServiceId)
/// if `id` is neither a definition, an alias, nor a raw instance.
pub fn render_detail(graph: &ServiceGraph, id: &str) -> Result<Vec<String>> {
    let entry = graph.resolve(id)?;

    let mut lines = vec![
        section(&format!("Information for listener {id}")),
        String::new(),
    ];
    match entry {
        ServiceEntry::Definition(definition) => render_definition(&mut lines, id, definition),
        ServiceEntry::Alias(alias) => {
            lines.push(format!("This service is an alias for the service {alias}"));
        }
        ServiceEntry::RawInstance(instance) => {
            lines.push(field("Service Id", 13, id));
            lines.push(field("Class", 13, instance.type_name()));
        }
    }
    Ok(lines)
}

fn render_definition(lines: &mut Vec<String>, id: &str, definition: &Definition) {
    lines.push(field("Listener Id", 14, id));
    lines.push(field("Class", 14, definition.class().unwrap_or_default()));
    lines.push("Listens to:".to_string());

    for (tag, occurrences) in definition.tags() {
        if !is_listener_tag(tag) {
            continue;
        }
        for attributes in occurrences {
            let priority = attributes
                .get("priority")
                .map_or(DEFAULT_PRIORITY, String::as_str);
            lines.push(field("  -Event", 17, attribute(attributes, "event")));
            lines.push(field("  -Method", 17, attribute(attributes, "method")));
            lines.push(field("  -Priority", 17, priority));
        }
    }

    let tags = if definition.has_tags() {
        definition
            .tags()
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        "-".to_string()
    };
    lines.push(field("Tags", 13, &tags));
    lines.push(field(
        "Public",
        13,
        if definition.is_public() { "yes" } else { "no" },
    ));
}

fn attribute<'a>(attributes: &'a TagAttributes, key: &str) -> &'a str {
    attributes.get(key).map_or("", String::as_str)
}
