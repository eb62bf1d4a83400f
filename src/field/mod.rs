//! Field addressing
//!
//! A field address is a dot-separated key path such as `tool.poetry.version`.
//! [`get`] and [`set`] walk any [`FieldTree`] (JSON, TOML or YAML document
//! model). Addresses never index into arrays.

pub mod tree;

pub use tree::FieldTree;

/// Error type for field address evaluation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("field address must not be empty")]
    EmptyAddress,

    #[error("field address '{address}' contains an empty segment")]
    EmptySegment { address: String },

    #[error("field '{address}' not found")]
    NotFound { address: String },

    #[error("field '{address}': '{segment}' is not a map")]
    TypeMismatch { address: String, segment: String },

    #[error("field '{address}' is not a scalar value")]
    NotScalar { address: String },
}

fn segments(address: &str) -> Result<Vec<&str>, FieldError> {
    if address.is_empty() {
        return Err(FieldError::EmptyAddress);
    }

    let segments: Vec<&str> = address.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(FieldError::EmptySegment {
            address: address.to_string(),
        });
    }

    Ok(segments)
}

/// Look up the node at `address`
pub fn get<'a, T: FieldTree>(tree: &'a T, address: &str) -> Result<&'a T, FieldError> {
    let segments = segments(address)?;

    let mut current = tree;
    for (index, segment) in segments.iter().enumerate() {
        if !current.is_map() {
            return Err(FieldError::TypeMismatch {
                address: address.to_string(),
                segment: segments[..index].join("."),
            });
        }
        current = current.child(segment).ok_or_else(|| FieldError::NotFound {
            address: address.to_string(),
        })?;
    }

    Ok(current)
}

/// Look up the scalar at `address` and render it as text
pub fn get_scalar<T: FieldTree>(tree: &T, address: &str) -> Result<String, FieldError> {
    get(tree, address)?
        .scalar_string()
        .ok_or_else(|| FieldError::NotScalar {
            address: address.to_string(),
        })
}

/// Store `value` as a string at `address`
///
/// Missing intermediate maps are created. An existing intermediate value that
/// is not a map is never replaced.
pub fn set<T: FieldTree>(tree: &mut T, address: &str, value: &str) -> Result<(), FieldError> {
    let segments = segments(address)?;
    let Some((last, parents)) = segments.split_last() else {
        return Err(FieldError::EmptyAddress);
    };

    let mismatch = |depth: usize| FieldError::TypeMismatch {
        address: address.to_string(),
        segment: segments[..depth].join("."),
    };

    let mut current = tree;
    for (index, segment) in parents.iter().enumerate() {
        if !current.is_map() {
            return Err(mismatch(index));
        }
        if current.child(segment).is_none() {
            current.insert_child(segment, T::new_map());
        }
        current = current
            .child_mut(segment)
            .ok_or_else(|| FieldError::NotFound {
                address: address.to_string(),
            })?;
    }

    if !current.is_map() {
        return Err(mismatch(parents.len()));
    }
    current.insert_child(last, T::from_version(value));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("version", "1.2.3")]
    #[case("tool.poetry.version", "0.4.0")]
    #[case("build", "42")]
    #[case("private", "true")]
    fn get_scalar_returns_leaf_as_text(#[case] address: &str, #[case] expected: &str) {
        let tree = json!({
            "version": "1.2.3",
            "build": 42,
            "private": true,
            "tool": { "poetry": { "version": "0.4.0" } }
        });

        assert_eq!(get_scalar(&tree, address).unwrap(), expected);
    }

    #[test]
    fn get_missing_segment_is_not_found() {
        let tree = json!({ "tool": { "poetry": {} } });

        assert_eq!(
            get(&tree, "tool.poetry.version").unwrap_err(),
            FieldError::NotFound {
                address: "tool.poetry.version".to_string()
            }
        );
    }

    #[test]
    fn get_through_scalar_is_type_mismatch() {
        let tree = json!({ "tool": "poetry" });

        assert_eq!(
            get(&tree, "tool.poetry.version").unwrap_err(),
            FieldError::TypeMismatch {
                address: "tool.poetry.version".to_string(),
                segment: "tool".to_string(),
            }
        );
    }

    #[test]
    fn get_scalar_on_map_is_not_scalar() {
        let tree = json!({ "package": { "version": "1.0.0" } });

        assert!(matches!(
            get_scalar(&tree, "package"),
            Err(FieldError::NotScalar { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("package..version")]
    fn empty_addresses_are_rejected(#[case] address: &str) {
        let mut tree = json!({});

        assert!(get(&tree, address).is_err());
        assert!(set(&mut tree, address, "1.0.0").is_err());
    }

    #[test]
    fn set_replaces_existing_leaf() {
        let mut tree = json!({ "name": "app", "version": "1.0.0" });

        set(&mut tree, "version", "2.0.0").unwrap();

        assert_eq!(tree, json!({ "name": "app", "version": "2.0.0" }));
    }

    #[test]
    fn set_creates_missing_intermediate_maps() {
        let mut tree = json!({ "name": "app" });

        set(&mut tree, "tool.poetry.version", "0.1.0").unwrap();

        assert_eq!(
            tree,
            json!({ "name": "app", "tool": { "poetry": { "version": "0.1.0" } } })
        );
    }

    #[test]
    fn set_never_overwrites_scalar_with_map() {
        let mut tree = json!({ "tool": "poetry" });

        let err = set(&mut tree, "tool.poetry.version", "0.1.0").unwrap_err();

        assert_eq!(
            err,
            FieldError::TypeMismatch {
                address: "tool.poetry.version".to_string(),
                segment: "tool".to_string(),
            }
        );
        assert_eq!(tree, json!({ "tool": "poetry" }));
    }

    #[test]
    fn set_on_non_map_root_is_type_mismatch() {
        let mut tree = json!(["1.0.0"]);

        assert!(matches!(
            set(&mut tree, "version", "2.0.0"),
            Err(FieldError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn toml_tree_supports_nested_get_and_set() {
        let mut tree: toml::Value = toml::from_str(
            r#"
[package]
name = "demo"
version = "0.1.0"
"#,
        )
        .unwrap();

        assert_eq!(get_scalar(&tree, "package.version").unwrap(), "0.1.0");

        set(&mut tree, "package.version", "0.2.0").unwrap();
        assert_eq!(get_scalar(&tree, "package.version").unwrap(), "0.2.0");
    }

    #[test]
    fn yaml_tree_supports_nested_get_and_set() {
        let mut tree: serde_yaml::Value =
            serde_yaml::from_str("apiVersion: v2\nversion: 1.4.0\n").unwrap();

        assert_eq!(get_scalar(&tree, "version").unwrap(), "1.4.0");

        set(&mut tree, "metadata.version", "1.5.0").unwrap();
        assert_eq!(get_scalar(&tree, "metadata.version").unwrap(), "1.5.0");
    }
}
