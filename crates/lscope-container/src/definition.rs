//! Service entries held by a [`ServiceGraph`](crate::graph::ServiceGraph).

use std::fmt;

use indexmap::IndexMap;
use lscope_common::constants::DEFAULT_SCOPE;

/// Attributes of one tag occurrence, e.g. `{event, method, priority}`.
pub type TagAttributes = IndexMap<String, String>;

/// Tags of a definition: tag name to every attribute set attached under it,
/// in the order the tags were first attached.
pub type Tags = IndexMap<String, Vec<TagAttributes>>;

/// A service definition: how the container would build the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    class: Option<String>,
    scope: String,
    public: bool,
    tags: Tags,
}

impl Default for Definition {
    fn default() -> Self {
        Self {
            class: None,
            scope: DEFAULT_SCOPE.to_string(),
            public: true,
            tags: Tags::new(),
        }
    }
}

impl Definition {
    /// Creates a public definition for `class` in the default scope.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    /// Sets the scope the service lives in.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the visibility.
    #[must_use]
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Attaches a tag, builder style. See [`Self::add_tag`].
    #[must_use]
    pub fn with_tag<K, V>(mut self, name: &str, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.add_tag(
            name,
            attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Attaches a tag. Repeating a tag name appends another attribute set
    /// under it without changing the tag's position.
    pub fn add_tag(&mut self, name: impl Into<String>, attributes: TagAttributes) {
        self.tags.entry(name.into()).or_default().push(attributes);
    }

    /// Replaces the class name.
    pub fn set_class(&mut self, class: Option<String>) {
        self.class = class;
    }

    /// Class of the service, if the definition declares one.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Scope name.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Whether the service can be fetched from outside the container.
    pub const fn is_public(&self) -> bool {
        self.public
    }

    /// All tags in attachment order.
    pub const fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Attribute sets attached under `name`.
    pub fn tag(&self, name: &str) -> &[TagAttributes] {
        self.tags.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether any tag is attached.
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

/// A second id pointing at another service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    target: String,
}

impl Alias {
    /// Creates an alias for `target`.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Id of the aliased service.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target)
    }
}

/// An already-built service of which only the runtime type is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInstance {
    type_name: String,
}

impl RawInstance {
    /// Creates an instance record for `type_name`.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    /// Runtime type name of the instance.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// What a service id resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceEntry<'a> {
    /// A full definition.
    Definition(&'a Definition),
    /// An alias to another id.
    Alias(&'a Alias),
    /// A raw instance with no metadata.
    RawInstance(&'a RawInstance),
}
