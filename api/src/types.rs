//! Wire DTOs for the adoption backend.
//!
//! DESIGN
//! ======
//! Keys are camelCase on the wire. Identifiers arrive as numbers from some
//! endpoints and strings from others; they are normalized to `String` at
//! decode time so the rest of the code never branches on id representation.
//! Unknown enum tags are decode errors.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Account role; drives which chrome and profile view is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    General,
    Foundation,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Foundation => "Foundation",
            Self::Admin => "Admin",
        }
    }
}

/// Locally persisted mirror of the signed-in user (local key `user`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: Option<String>,
    pub user_type: Role,
}

impl UserSnapshot {
    /// Build the snapshot persisted after a successful login.
    #[must_use]
    pub fn from_metadata(meta: &UserMetadata) -> Self {
        Self {
            id: meta.user_id.clone(),
            email: meta.email.clone(),
            name: display_name(
                meta.user_type,
                meta.foundation_name.as_deref(),
                &meta.firstname,
                meta.lastname.as_deref(),
                &meta.email,
            ),
            image: meta.image.clone(),
            firstname: meta.firstname.clone(),
            lastname: meta.lastname.clone(),
            user_type: meta.user_type,
        }
    }

    /// Build a snapshot from a fresh `/user/info` response.
    #[must_use]
    pub fn from_info(info: &UserInfo) -> Self {
        Self {
            id: info.id.clone(),
            email: info.email.clone(),
            name: display_name(
                info.user_type,
                info.foundation_name.as_deref(),
                &info.firstname,
                info.lastname.as_deref(),
                &info.email,
            ),
            image: info.image.clone(),
            firstname: info.firstname.clone(),
            lastname: info.lastname.clone(),
            user_type: info.user_type,
        }
    }

    #[must_use]
    pub fn is_foundation(&self) -> bool {
        self.user_type == Role::Foundation
    }
}

/// Foundation accounts show their foundation name; everyone else shows
/// `firstname lastname`, falling back to the email.
fn display_name(role: Role, foundation: Option<&str>, first: &str, last: Option<&str>, email: &str) -> String {
    if role == Role::Foundation {
        if let Some(name) = foundation.map(str::trim).filter(|name| !name.is_empty()) {
            return name.to_owned();
        }
    }
    let full = format!("{} {}", first.trim(), last.unwrap_or_default().trim());
    let full = full.trim();
    if full.is_empty() { email.to_owned() } else { full.to_owned() }
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `data` of a successful `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_metadata: UserMetadata,
    pub token: String,
}

/// Identity block returned alongside the login token.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetadata {
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: Option<String>,
    pub user_type: Role,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub foundation_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterGeneralBody {
    pub email: String,
    pub password: String,
    pub firstname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// ISO date (`YYYY-MM-DD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFoundationBody {
    pub email: String,
    pub password: String,
    pub foundation_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgetPasswordBody {
    pub new_password: String,
}

// =============================================================================
// USERS
// =============================================================================

/// `data` of `GET /user/info`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub user_type: Role,
    #[serde(default)]
    pub foundation_name: Option<String>,
}

/// Partial profile update; absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl UpdateUserBody {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdoptionStatus {
    Pending,
    Approved,
    Rejected,
}

/// One row of `GET /user/adoption-request`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub pet_id: String,
    #[serde(default)]
    pub pet_name: Option<String>,
    #[serde(default)]
    pub pet_image: Option<String>,
    pub status: AdoptionStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// =============================================================================
// PETS
// =============================================================================

/// Filters for `GET /pet/list`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PetListQuery {
    pub foundation_id: Option<String>,
    pub species: Option<String>,
}

impl PetListQuery {
    /// Query-string pairs, skipping unset filters.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.foundation_id.as_deref().filter(|id| !id.is_empty()) {
            pairs.push(("foundationId".to_owned(), id.to_owned()));
        }
        if let Some(species) = self.species.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("species".to_owned(), species.to_owned()));
        }
        pairs
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub foundation_id: Option<String>,
    #[serde(default)]
    pub foundation_name: Option<String>,
    #[serde(default)]
    pub is_adopted: bool,
}

/// Compact pet card returned by `GET /pet/suggest`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetMetadata {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub foundation_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPetBody {
    pub name: String,
    pub species: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub images: Vec<String>,
}

/// `data` of `POST /upload`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub filename: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub image_id: String,
    pub image_url: String,
}

// =============================================================================
// FOUNDATIONS, QUIZ, NEWS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Foundation {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityQuestion {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub question: String,
    pub choices: Vec<PersonalityChoice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityChoice {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityAnswer {
    pub question_id: String,
    pub choice_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PersonalityAnswerBody {
    pub answers: Vec<PersonalityAnswer>,
}

/// Campaign or news post published by a foundation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub foundation_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =============================================================================
// ID NORMALIZATION
// =============================================================================

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(serde_json::Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        value => id_from_value(value).map(Some).map_err(D::Error::custom),
    }
}

fn id_from_value(value: serde_json::Value) -> Result<String, String> {
    match value {
        serde_json::Value::String(id) if !id.is_empty() => Ok(id),
        serde_json::Value::Number(number) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
        other => Err(format!("expected string or integer id, got {other}")),
    }
}
