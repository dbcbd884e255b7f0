use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Parameters for list operations.
///
/// `limit` is optional on the wire; callers resolve it against the configured
/// default with [`ListParams::limit_or`]. No upper bound is applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Maximum number of results to return.
    #[serde(default)]
    pub limit: Option<usize>,

    /// Offset for pagination.
    #[serde(default)]
    pub offset: usize,
}

impl ListParams {
    pub fn new(limit: Option<usize>, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Reject an explicit `limit=0`.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.limit == Some(0) {
            return Err(ServiceError::Validation("limit must be at least 1".into()));
        }
        Ok(())
    }

    /// The requested limit, or `default` when none was given.
    pub fn limit_or(&self, default: usize) -> usize {
        self.limit.unwrap_or(default)
    }
}

/// Result wrapper for list operations.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Length of a store identifier produced by [`new_id`].
pub const ID_LEN: usize = 32;

/// Generate a new random ID (UUIDv4, no dashes, lowercase hex).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Whether `s` has the shape of an identifier produced by [`new_id`].
///
/// This is a syntactic check only; it says nothing about existence.
pub fn is_valid_id(s: &str) -> bool {
    s.len() == ID_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Merge a JSON patch into a base value.
///
/// For each key in `patch`:
/// - If the value is `null`, the key is removed from `base`.
/// - Otherwise, the key is set to the patch value.
///
/// This follows RFC 7386 (JSON Merge Patch) semantics.
pub fn merge_patch(base: &mut serde_json::Value, patch: &serde_json::Value) {
    if let (Some(base_obj), Some(patch_obj)) = (base.as_object_mut(), patch.as_object()) {
        for (key, value) in patch_obj {
            if value.is_null() {
                base_obj.remove(key);
            } else if value.is_object() {
                let entry = base_obj
                    .entry(key.clone())
                    .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
                merge_patch(entry, value);
            } else {
                base_obj.insert(key.clone(), value.clone());
            }
        }
    } else {
        *base = patch.clone();
    }
}
