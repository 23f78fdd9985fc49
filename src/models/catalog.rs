use serde::{Deserialize, Deserializer};

/// A movie in the catalog
///
/// `index` is the entry's position in the loaded catalog and doubles as its
/// row/column in the similarity matrix. It is assigned at load time, never read
/// from the source file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogEntry {
    #[serde(skip_deserializing)]
    pub index: usize,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub director: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cast: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(default)]
    pub poster_url: Option<String>,
}

/// Dataframe exports write missing metadata as `null`; treat it like an absent field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CatalogEntry {
    /// Creates an entry with only a title; metadata is left empty
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            index: 0,
            title: title.into(),
            genres: String::new(),
            director: String::new(),
            cast: String::new(),
            overview: String::new(),
            poster_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_metadata() {
        let json = r#"{"title": "Inception", "genres": "Action Sci-Fi"}"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.title, "Inception");
        assert_eq!(entry.genres, "Action Sci-Fi");
        assert_eq!(entry.director, "");
        assert_eq!(entry.poster_url, None);
    }

    #[test]
    fn test_null_metadata_becomes_empty() {
        let json = r#"{"title": "Heat", "genres": null, "cast": null, "overview": null, "poster_url": null}"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.genres, "");
        assert_eq!(entry.cast, "");
        assert_eq!(entry.overview, "");
        assert_eq!(entry.poster_url, None);
    }

    #[test]
    fn test_index_is_not_read_from_source() {
        let json = r#"{"index": 42, "title": "Heat"}"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.index, 0);
    }
}
