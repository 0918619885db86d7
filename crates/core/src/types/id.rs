//! Newtype keys for type-safe catalog references.
//!
//! Use the `define_key!` macro to create type-safe string wrappers that
//! prevent accidentally mixing product identifiers with category keys.

/// Macro to define a type-safe string key wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>`, `Display` and `Borrow<str>` implementations
///
/// # Example
///
/// ```rust
/// # use confeitaria_core::define_key;
/// define_key!(FlavorKey);
/// define_key!(BoxKey);
///
/// let flavor = FlavorKey::new("morango");
/// let boxed = BoxKey::new("morango");
///
/// // These are different types, so this won't compile:
/// // let _: FlavorKey = boxed;
/// assert_eq!(flavor.as_str(), boxed.as_str());
/// ```
#[macro_export]
macro_rules! define_key {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new key from anything string-like.
            #[must_use]
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Get the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the key and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }

        impl From<$name> for String {
            fn from(key: $name) -> Self {
                key.0
            }
        }

        impl ::core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key!(ProductId);
define_key!(CategoryKey);

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_product_id_serializes_as_plain_string() {
        let id = ProductId::new("14");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"14\""));
    }

    #[test]
    fn test_map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(ProductId::new("1"), 3);
        assert_eq!(map.get("1"), Some(&3));
        assert_eq!(map.get("2"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CategoryKey::new("bolos").to_string(), "bolos");
    }
}
