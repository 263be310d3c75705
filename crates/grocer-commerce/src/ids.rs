//! Newtype IDs for type-safe identifiers.
//!
//! Product ids and cart line ids are strings or numbers on the wire;
//! json-server style stores hand out numbers for either. Keeping them as
//! separate newtypes stops a line id from being passed where a product id
//! is expected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Macro to generate newtype ID structs.
///
/// Equality and hashing follow the text form only. An id decoded from a
/// JSON number keeps that number and encodes back as one.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone)]
        pub struct $name {
            text: String,
            number: Option<serde_json::Number>,
        }

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self {
                    text: id.into(),
                    number: None,
                }
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.text
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.text == other.text
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.text.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.text)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self {
                    text: n.to_string(),
                    number: Some(n.into()),
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.text
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                match &self.number {
                    Some(number) => number.serialize(serializer),
                    None => serializer.serialize_str(&self.text),
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let id = match RawId::deserialize(deserializer)? {
                    RawId::Text(text) => Self::new(text),
                    RawId::Number(number) => Self {
                        text: number.to_string(),
                        number: Some(number),
                    },
                };
                Ok(id)
            }
        }
    };
}

define_id!(ProductId);
define_id!(LineId);

/// Wire form of an identifier: either a JSON string or a JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}
