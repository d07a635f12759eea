use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}
