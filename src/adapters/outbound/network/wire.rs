use crate::query_engine::domain::Page;
use serde::Deserialize;

/// A list endpoint that answers unique-key lookups with a bare object
///
/// The page variant is tried first: it requires `results`, which no entity
/// payload carries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrPage<T> {
    Page(Page<T>),
    One(T),
}

impl<T> OneOrPage<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrPage::Page(page) => page.results,
            OneOrPage::One(entity) => vec![entity],
        }
    }
}

/// Answer to a `limit=1` count request; a listing without `count` is an error
#[derive(Debug, Deserialize)]
pub struct Count {
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_engine::domain::ProductStream;

    #[test]
    fn test_single_object() {
        let decoded: OneOrPage<ProductStream> =
            serde_json::from_str(r#"{"ofuri": "o:redhat:rhel:9.2.0.z", "name": "rhel-9.2.0.z"}"#)
                .unwrap();
        let streams = decoded.into_vec();
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].name, "rhel-9.2.0.z");
    }

    #[test]
    fn test_page() {
        let decoded: OneOrPage<ProductStream> = serde_json::from_str(
            r#"{"count": 2, "results": [{"name": "rhel-9.2.0.z"}, {"name": "rhel-9.3.0"}]}"#,
        )
        .unwrap();
        assert_eq!(decoded.into_vec().len(), 2);
    }

    #[test]
    fn test_empty_page() {
        let decoded: OneOrPage<ProductStream> =
            serde_json::from_str(r#"{"count": 0, "results": []}"#).unwrap();
        assert!(decoded.into_vec().is_empty());
    }

    #[test]
    fn test_count_is_required() {
        let decoded: Count =
            serde_json::from_str(r#"{"count": 3600, "results": [{"name": "curl"}]}"#).unwrap();
        assert_eq!(decoded.count, 3600);

        let missing = serde_json::from_str::<Count>(r#"{"results": []}"#);
        assert!(missing.is_err());
    }
}
