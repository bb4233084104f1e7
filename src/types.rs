//! Wire and storage shapes shared by the client and the CLI.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cached profile of the signed-in user, as returned by `/api/users/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    pub created_at: String,
}

/// Body of `PUT /api/users/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyUpdate {
    pub strategy: String,
}

/// Body of `POST /api/sparks`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSpark {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewSpark {
    /// The spark created by the sparks smoke test.
    #[must_use]
    pub fn smoke_test() -> Self {
        Self {
            title: "Test Spark".to_owned(),
            content: "This is a test spark created during authentication testing".to_owned(),
            tags: vec!["test".to_owned()],
        }
    }
}

/// Combined result of listing then creating sparks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparksSmokeReport {
    pub get_sparks: Vec<Value>,
    pub create_spark: Value,
}
