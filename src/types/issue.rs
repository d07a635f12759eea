use serde::{Deserialize, Deserializer, Serialize};

use super::{Attachment, User};

/// An issue as returned by `GET /api/issues[/<id>]`.
///
/// Only the requested fields are present in the response; everything
/// optional falls back to an empty value.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Issue {
    #[serde(rename(deserialize = "idReadable"))]
    pub id: String,
    #[serde(rename(deserialize = "summary"), default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "tag_names")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<User>,
}

#[derive(Deserialize)]
struct TagRef {
    name: String,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn tag_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags: Option<Vec<TagRef>> = Option::deserialize(deserializer)?;
    Ok(tags
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.name)
        .collect())
}
