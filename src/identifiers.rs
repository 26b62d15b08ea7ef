//! External identifier resolution
//!
//! Raw records carry the identifier of their upstream source. A separate
//! assignment step maps every composite external id (`uuid:<id>` or
//! `univaf_v0:<id>`) to a stable internal integer id; this module loads that
//! table and answers lookups against it.

use crate::constants::{
    IDS_EXTERNAL_ID_COLUMN, IDS_INTERNAL_ID_COLUMN, UNIVAF_V0_ID_PREFIX, UUID_ID_PREFIX,
};
use crate::error::{ProcessorError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Outcome of looking up a composite id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveResult {
    Found(i64),
    Missing,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    external_id: String,
    id: i64,
}

/// Immutable mapping from composite external id to internal id
#[derive(Debug, Clone, Default)]
pub struct IdentifierTable {
    ids: HashMap<String, i64>,
}

impl IdentifierTable {
    /// Build a table from `(composite id, internal id)` pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            ids: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Load the identifier table from a CSV file with at least
    /// `external_id` and `id` columns. Extra columns are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading identifier table: {}", path.display());

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| ProcessorError::FileRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let headers = reader.headers()?.clone();
        for required in [IDS_EXTERNAL_ID_COLUMN, IDS_INTERNAL_ID_COLUMN] {
            if !headers.iter().any(|h| h == required) {
                return Err(ProcessorError::configuration(format!(
                    "Identifier table {} has no '{}' column",
                    path.display(),
                    required
                )));
            }
        }

        let mut ids = HashMap::new();
        for row in reader.deserialize::<IdRow>() {
            let row = row?;
            if let Some(previous) = ids.insert(row.external_id.clone(), row.id) {
                if previous != row.id {
                    warn!(
                        "Identifier {} mapped twice ({} and {}), keeping {}",
                        row.external_id, previous, row.id, row.id
                    );
                }
            }
        }

        info!(
            "Loaded {} external identifiers from {}",
            ids.len(),
            path.display()
        );
        Ok(Self { ids })
    }

    /// Look up a composite id
    pub fn resolve(&self, composite_id: &str) -> ResolveResult {
        match self.ids.get(composite_id) {
            Some(&id) => ResolveResult::Found(id),
            None => ResolveResult::Missing,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Whether a raw id is a syntactically valid UUID
pub fn is_uuid(raw_id: &str) -> bool {
    Uuid::parse_str(raw_id).is_ok()
}

/// Composite id used as the identifier table key for a raw id
pub fn composite_id(raw_id: &str) -> String {
    let prefix = if is_uuid(raw_id) {
        UUID_ID_PREFIX
    } else {
        UNIVAF_V0_ID_PREFIX
    };
    format!("{}:{}", prefix, raw_id)
}
