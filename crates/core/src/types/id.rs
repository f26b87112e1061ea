//! Newtype IDs for type-safe record references.
//!
//! The backend identifies records by opaque strings (its `_id` field). Use
//! the `define_id!` macro to wrap them so a product id cannot be passed where
//! a user id is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()`, `as_str()`, `Display`, `AsRef<str>`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use storebuilder_core::define_id;
/// define_id!(OrderId);
/// define_id!(InvoiceId);
///
/// let order = OrderId::new("64f1c2");
/// assert_eq!(order.as_str(), "64f1c2");
///
/// // These are different types, so this won't compile:
/// // let _: InvoiceId = order;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

define_id!(UserId);
define_id!(ProductId);
define_id!(CategoryId);
define_id!(BannerId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_transparent_in_json() {
        let id: ProductId = serde_json::from_str("\"65a0f9\"").unwrap();
        assert_eq!(id.as_str(), "65a0f9");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65a0f9\"");
    }

    #[test]
    fn test_id_display_and_conversions() {
        let id = UserId::from("u-1");
        assert_eq!(id.to_string(), "u-1");
        assert_eq!(UserId::from("u-1".to_string()), id);
        assert_eq!(id.as_ref(), "u-1");
    }
}
