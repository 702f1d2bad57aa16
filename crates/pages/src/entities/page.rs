use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A user-authored page, addressed by `slug` under `/page/:slug`.
///
/// Slugs are not guaranteed unique; lookups take the first match in stored
/// order. Only `slug` must be a string. A missing or null `title`/`content`
/// reads as empty and any other JSON value as its JSON text. Fields the admin
/// screens add beyond these three are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicPage {
    pub slug: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DynamicPage {
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// Location of this page inside the site.
    pub fn path(&self) -> String {
        format!("/page/{}", self.slug)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_fields_are_preserved() {
        let stored = json!({
            "id": "p-1",
            "slug": "about",
            "title": "About",
            "content": "X",
            "createdAt": "2024-05-01"
        });

        let page: DynamicPage = serde_json::from_value(stored.clone()).unwrap();
        assert_eq!(page.slug, "about");
        assert_eq!(page.path(), "/page/about");
        assert_eq!(serde_json::to_value(&page).unwrap(), stored);
    }

    #[test]
    fn test_only_slug_is_required() {
        let partial: DynamicPage =
            serde_json::from_value(json!({"slug": "about", "title": "About"})).unwrap();
        assert_eq!(partial.title, "About");
        assert_eq!(partial.content, "");

        let odd: DynamicPage =
            serde_json::from_value(json!({"slug": "n", "title": 7, "content": null})).unwrap();
        assert_eq!(odd.title, "7");
        assert_eq!(odd.content, "");

        assert!(serde_json::from_value::<DynamicPage>(json!({"title": "About"})).is_err());
        assert!(serde_json::from_value::<DynamicPage>(json!({"slug": 3})).is_err());
    }
}
