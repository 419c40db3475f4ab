use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
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

string_id!(
    /// A construction project identifier, e.g. "p-1700000000000".
    ProjectId
);

string_id!(
    /// A task identifier, unique within its owning project.
    TaskId
);

string_id!(
    /// A PCCC inventory record identifier, e.g. "pccc-1".
    MaterialId
);

string_id!(
    /// A calendar note identifier.
    NoteId
);

string_id!(
    /// A QA/QC acceptance record identifier, e.g. "qa-1".
    AcceptanceTaskId
);

string_id!(
    /// Identifier for the owned sub-records of a project (workers, stages, documents).
    RecordId
);
