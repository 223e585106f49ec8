//! The schema document tree and its builder.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// JSON Schema `type` of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// `"object"`: a record with properties, or the permissive fallback.
    Object,
    /// `"array"`: a sequence with an `items` node.
    Array,
    /// `"string"`.
    String,
    /// `"integer"`.
    Integer,
    /// `"number"`.
    Number,
    /// `"boolean"`.
    Boolean,
}

impl SchemaKind {
    /// The JSON Schema keyword for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchemaKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A node of a derived schema document.
///
/// Object nodes built with [`SchemaNode::object`] are *closed records*: every
/// property is listed in `required` and `additionalProperties` is `false`.
/// The `additionalProperties: false` keyword is emitted on every node, scalar
/// ones included, so the whole document has one uniform shape.
///
/// Nodes are built bottom-up:
///
/// ```
/// use pneuma_schema::SchemaNode;
///
/// let pet = SchemaNode::object()
///     .field("Name", SchemaNode::string().describe("a dog's name"))
///     .field("Tags", SchemaNode::array(SchemaNode::string()));
///
/// assert_eq!(pet.required(), vec!["Name", "Tags"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    kind: SchemaKind,
    properties: Option<Vec<(String, SchemaNode)>>,
    items: Option<Box<SchemaNode>>,
    description: Option<String>,
}

impl SchemaNode {
    fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            properties: None,
            items: None,
            description: None,
        }
    }

    /// An empty record. Add fields with [`SchemaNode::field`].
    #[must_use]
    pub fn object() -> Self {
        Self {
            properties: Some(Vec::new()),
            ..Self::of(SchemaKind::Object)
        }
    }

    /// An `object` node without properties.
    ///
    /// Used for values whose shape cannot be described (maps, arbitrary
    /// JSON). It is a permissive fallback, not an error.
    #[must_use]
    pub fn opaque() -> Self {
        Self::of(SchemaKind::Object)
    }

    /// An `array` node whose elements follow `items`.
    #[must_use]
    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaKind::Array)
        }
    }

    /// A `string` node.
    #[must_use]
    pub fn string() -> Self {
        Self::of(SchemaKind::String)
    }

    /// An `integer` node.
    #[must_use]
    pub fn integer() -> Self {
        Self::of(SchemaKind::Integer)
    }

    /// A `number` node.
    #[must_use]
    pub fn number() -> Self {
        Self::of(SchemaKind::Number)
    }

    /// A `boolean` node.
    #[must_use]
    pub fn boolean() -> Self {
        Self::of(SchemaKind::Boolean)
    }

    /// Append a required property.
    ///
    /// Calling this on a non-record node turns it into a record. A name that
    /// is already present is replaced in place, so names stay unique and keep
    /// their first position.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        let name = name.into();
        self.kind = SchemaKind::Object;
        self.items = None;
        let properties = self.properties.get_or_insert_with(Vec::new);
        match properties.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = node,
            None => properties.push((name, node)),
        }
        self
    }

    /// Attach a free-text hint as the node's `description`.
    ///
    /// An empty hint clears the description.
    #[must_use]
    pub fn describe(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        self.description = (!hint.is_empty()).then_some(hint);
        self
    }

    /// The node's kind.
    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// Whether this is a record (an object node with a property list).
    pub fn is_record(&self) -> bool {
        self.kind == SchemaKind::Object && self.properties.is_some()
    }

    /// Properties in declaration order. Empty for non-record nodes.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.properties
            .iter()
            .flatten()
            .map(|(name, node)| (name.as_str(), node))
    }

    /// Look up a direct property by name.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, node)| node)
    }

    /// The `required` list: every property name, in declaration order.
    pub fn required(&self) -> Vec<&str> {
        self.properties().map(|(name, _)| name).collect()
    }

    /// Element schema of an array node.
    pub fn items(&self) -> Option<&SchemaNode> {
        self.items.as_deref()
    }

    /// The attached hint, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Render the document as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        // Serializing this type into a Value has no failure path: every key is
        // a string and every leaf is a string, bool or nested node.
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Render the document as indented JSON text.
    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind)?;
        if let Some(properties) = &self.properties {
            map.serialize_entry("properties", &Properties(properties))?;
            map.serialize_entry("required", &self.required())?;
        }
        if let Some(items) = &self.items {
            map.serialize_entry("items", items)?;
        }
        map.serialize_entry("additionalProperties", &false)?;
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.end()
    }
}

struct Properties<'a>(&'a [(String, SchemaNode)]);

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_nodes_carry_additional_properties() {
        assert_eq!(
            SchemaNode::integer().to_value(),
            json!({ "type": "integer", "additionalProperties": false })
        );
    }

    #[test]
    fn record_lists_every_field_as_required() {
        let node = SchemaNode::object()
            .field("Name", SchemaNode::string())
            .field("Age", SchemaNode::integer());
        assert_eq!(
            node.to_value(),
            json!({
                "type": "object",
                "properties": {
                    "Name": { "type": "string", "additionalProperties": false },
                    "Age": { "type": "integer", "additionalProperties": false }
                },
                "required": ["Name", "Age"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn property_order_is_declaration_order() {
        let node = SchemaNode::object()
            .field("zeta", SchemaNode::boolean())
            .field("alpha", SchemaNode::boolean());
        let text = serde_json::to_string(&node).unwrap();
        assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
    }

    #[test]
    fn duplicate_field_replaces_in_place() {
        let node = SchemaNode::object()
            .field("a", SchemaNode::string())
            .field("b", SchemaNode::string())
            .field("a", SchemaNode::integer());
        assert_eq!(node.required(), vec!["a", "b"]);
        assert_eq!(node.property("a").unwrap().kind(), SchemaKind::Integer);
    }

    #[test]
    fn empty_hint_clears_description() {
        let node = SchemaNode::string().describe("x").describe("");
        assert_eq!(node.description(), None);
        assert!(node.to_value().get("description").is_none());
    }

    #[test]
    fn array_node_has_items() {
        let node = SchemaNode::array(SchemaNode::number()).describe("prices");
        assert_eq!(
            node.to_value(),
            json!({
                "type": "array",
                "items": { "type": "number", "additionalProperties": false },
                "additionalProperties": false,
                "description": "prices"
            })
        );
    }

    #[test]
    fn opaque_is_object_without_properties() {
        let node = SchemaNode::opaque();
        assert_eq!(node.kind(), SchemaKind::Object);
        assert!(!node.is_record());
        assert_eq!(
            node.to_value(),
            json!({ "type": "object", "additionalProperties": false })
        );
    }

    #[test]
    fn empty_record_still_emits_properties_and_required() {
        assert_eq!(
            SchemaNode::object().to_value(),
            json!({
                "type": "object",
                "properties": {},
                "required": [],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn pretty_rendering_is_indented() {
        let text = SchemaNode::object()
            .field("a", SchemaNode::string())
            .to_json_string_pretty()
            .unwrap();
        assert!(text.contains("\n  \"type\": \"object\""));
    }
}
