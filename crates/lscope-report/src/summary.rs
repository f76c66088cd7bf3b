//! Summary table of every discovered listener.

use lscope_common::error::Result;
use lscope_container::{ServiceEntry, ServiceGraph};

use crate::discovery::ListenerIndex;
use crate::format::{section, width_of};

const MIN_NAME_WIDTH: usize = 4;
const MIN_SCOPE_WIDTH: usize = 30;

struct Row<'a> {
    id: &'a str,
    event: &'a str,
    class: String,
}

/// Renders the listener table.
///
/// Rows are sorted by id. Private definitions are left out unless
/// `show_private` is set. The event column is as wide as the longest scope
/// of the listed definitions, and never narrower than 30 columns.
///
/// # Errors
///
/// Returns an error if an indexed id no longer resolves in `graph`.
pub fn render_summary(
    graph: &ServiceGraph,
    listeners: &ListenerIndex,
    show_private: bool,
) -> Result<Vec<String>> {
    let label = if show_private {
        "Public and private (services) listeners"
    } else {
        "Public (services) listeners"
    };

    let mut name_width = MIN_NAME_WIDTH;
    let mut scope_width = MIN_SCOPE_WIDTH;
    let mut rows = Vec::with_capacity(listeners.len());

    for id in listeners.sorted_ids() {
        let row = match graph.resolve(id)? {
            ServiceEntry::Definition(definition) => {
                if !show_private && !definition.is_public() {
                    tracing::trace!(service = id, "hiding private listener");
                    continue;
                }
                scope_width = scope_width.max(width_of(definition.scope()));
                Row {
                    id,
                    event: listeners.event(id),
                    class: definition.class().unwrap_or_default().to_string(),
                }
            }
            ServiceEntry::Alias(alias) => Row {
                id,
                event: "n/a",
                class: format!("alias for {alias}"),
            },
            ServiceEntry::RawInstance(instance) => Row {
                id,
                event: "",
                class: instance.type_name().to_string(),
            },
        };
        name_width = name_width.max(width_of(id));
        rows.push(row);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(section(label));
    lines.push(format_row("Name", "Event", "Class Name", name_width, scope_width));
    lines.extend(
        rows.iter()
            .map(|row| format_row(row.id, row.event, &row.class, name_width, scope_width)),
    );
    Ok(lines)
}

fn format_row(id: &str, event: &str, class: &str, name_width: usize, scope_width: usize) -> String {
    format!("{id:<name_width$} {event:<scope_width$} {class}")
}
