use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: Option<i32>,
    pub stars: f64,
    pub rating: i32,
    pub profile: Option<String>,
    pub rides_created: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub age: Option<i32>,
    pub profile: Option<String>,
}

/// Creator fields joined into a single-ride response.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorProfile {
    pub name: String,
    pub age: Option<i32>,
    pub stars: f64,
    pub rating: i32,
    pub profile: Option<String>,
    pub rides_created: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Creator fields joined into list and search responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatorSummary {
    pub name: String,
    pub stars: f64,
}

impl User {
    pub fn new(details: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: details.name,
            age: details.age,
            stars: 0.0,
            rating: 0,
            profile: details.profile,
            rides_created: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn profile_view(&self) -> CreatorProfile {
        CreatorProfile {
            name: self.name.clone(),
            age: self.age,
            stars: self.stars,
            rating: self.rating,
            profile: self.profile.clone(),
            rides_created: self.rides_created.clone(),
            created_at: self.created_at,
        }
    }

    pub fn summary_view(&self) -> CreatorSummary {
        CreatorSummary {
            name: self.name.clone(),
            stars: self.stars,
        }
    }
}
