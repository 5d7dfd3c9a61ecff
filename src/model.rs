use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i64,
}

/// A validated bookmark that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i64,
}

impl NewBookmark {
    pub fn with_id(self, id: i64) -> Bookmark {
        Bookmark {
            id,
            title: self.title,
            url: self.url,
            description: self.description,
            rating: self.rating,
        }
    }
}

/// A validated partial update. `None` means the field is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i64>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.description.is_none() && self.rating.is_none()
    }

    pub fn apply(self, bookmark: &mut Bookmark) {
        if let Some(title) = self.title {
            bookmark.title = title;
        }
        if let Some(url) = self.url {
            bookmark.url = url;
        }
        if let Some(description) = self.description {
            bookmark.description = description;
        }
        if let Some(rating) = self.rating {
            bookmark.rating = rating;
        }
    }
}

/// Raw request body for create and update. Values stay loosely typed until
/// they go through the validator; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkInput {
    #[serde(default)]
    pub title: Option<JsonValue>,
    #[serde(default)]
    pub url: Option<JsonValue>,
    #[serde(default)]
    pub description: Option<JsonValue>,
    #[serde(default)]
    pub rating: Option<JsonValue>,
}
