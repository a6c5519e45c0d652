use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::math::Fnv1a64;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier (e.g. one read from a snapshot).
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Mint a fresh identifier, unique within this process.
            pub fn generate() -> Self {
                Self(next_id($prefix))
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }
    };
}

string_id!(
    /// Stable identity of a layout element.
    ElementId,
    "id"
);

string_id!(
    /// Stable identity of a layout collection.
    CollectionId,
    "col"
);

static COUNTER: AtomicU64 = AtomicU64::new(0);
static SESSION: OnceLock<u32> = OnceLock::new();

// `<prefix>_<session><counter>`; the session half differs between processes.
fn next_id(prefix: &str) -> String {
    let session = *SESSION.get_or_init(|| {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let mut h = Fnv1a64::new_default();
        h.write_bytes(&nanos.to_le_bytes());
        h.write_u64(u64::from(std::process::id()));
        h.finish() as u32
    });
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}_{session:08x}{n:08x}")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/ids.rs"]
mod tests;
