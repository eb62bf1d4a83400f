//! Generic map-of-maps view over the document models of each structured format

/// A node of a deserialized document that field addresses can walk through
pub trait FieldTree: Sized {
    /// An empty map node, used to create missing intermediate segments
    fn new_map() -> Self;

    /// A string scalar node holding `value`
    fn from_version(value: &str) -> Self;

    fn is_map(&self) -> bool;

    /// Child of a map node, `None` if absent or if this node is not a map
    fn child(&self, key: &str) -> Option<&Self>;

    fn child_mut(&mut self, key: &str) -> Option<&mut Self>;

    /// Insert or replace a child. No-op on non-map nodes.
    fn insert_child(&mut self, key: &str, value: Self);

    /// Render a scalar leaf as text, `None` for maps, arrays and null
    fn scalar_string(&self) -> Option<String>;
}

impl FieldTree for serde_json::Value {
    fn new_map() -> Self {
        serde_json::Value::Object(serde_json::Map::new())
    }

    fn from_version(value: &str) -> Self {
        serde_json::Value::String(value.to_string())
    }

    fn is_map(&self) -> bool {
        self.is_object()
    }

    fn child(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut Self> {
        self.as_object_mut()?.get_mut(key)
    }

    fn insert_child(&mut self, key: &str, value: Self) {
        if let Some(map) = self.as_object_mut() {
            map.insert(key.to_string(), value);
        }
    }

    fn scalar_string(&self) -> Option<String> {
        match self {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl FieldTree for toml::Value {
    fn new_map() -> Self {
        toml::Value::Table(toml::Table::new())
    }

    fn from_version(value: &str) -> Self {
        toml::Value::String(value.to_string())
    }

    fn is_map(&self) -> bool {
        self.is_table()
    }

    fn child(&self, key: &str) -> Option<&Self> {
        self.as_table()?.get(key)
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut Self> {
        self.as_table_mut()?.get_mut(key)
    }

    fn insert_child(&mut self, key: &str, value: Self) {
        if let Some(table) = self.as_table_mut() {
            table.insert(key.to_string(), value);
        }
    }

    fn scalar_string(&self) -> Option<String> {
        match self {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            toml::Value::Float(f) => Some(f.to_string()),
            toml::Value::Boolean(b) => Some(b.to_string()),
            toml::Value::Datetime(d) => Some(d.to_string()),
            toml::Value::Array(_) | toml::Value::Table(_) => None,
        }
    }
}

impl FieldTree for serde_yaml::Value {
    fn new_map() -> Self {
        serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
    }

    fn from_version(value: &str) -> Self {
        serde_yaml::Value::String(value.to_string())
    }

    fn is_map(&self) -> bool {
        self.is_mapping()
    }

    fn child(&self, key: &str) -> Option<&Self> {
        self.as_mapping()?.get(key)
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut Self> {
        self.as_mapping_mut()?.get_mut(key)
    }

    fn insert_child(&mut self, key: &str, value: Self) {
        if let Some(mapping) = self.as_mapping_mut() {
            mapping.insert(serde_yaml::Value::String(key.to_string()), value);
        }
    }

    fn scalar_string(&self) -> Option<String> {
        match self {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}
