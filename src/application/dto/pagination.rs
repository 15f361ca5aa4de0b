// src/application/dto/pagination.rs
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of a newest-first keyset listing. `next_cursor` is the opaque
/// token for the following page and is absent on the last one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> CursorPage<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        let has_more = next_cursor.is_some();
        Self {
            items,
            next_cursor,
            has_more,
        }
    }

    /// Builds a page from repository rows, converting each into `T`.
    pub fn from_rows<R: Into<T>>(rows: Vec<R>, next_cursor: Option<String>) -> Self {
        Self::new(rows.into_iter().map(Into::into).collect(), next_cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_more_follows_cursor() {
        let last: CursorPage<u64> = CursorPage::from_rows(vec![1u32, 2], None);
        assert!(!last.has_more);
        assert_eq!(last.items, vec![1, 2]);

        let more: CursorPage<u64> = CursorPage::new(vec![3], Some("abc".into()));
        assert!(more.has_more);
        let json = serde_json::to_value(&last).unwrap();
        assert!(json.get("next_cursor").is_none());
    }
}
