use serde::{Deserialize, Serialize};

/// Free-form profile fields not covered by the primary profile record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileExtras {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// Partial update for [`ProfileExtras`]. A `Some` field replaces the stored
/// value; a `None` field keeps it. Clearing a stored field is not
/// expressible; callers that want a blank value set an empty string.
#[derive(Debug, Clone, Default)]
pub struct ProfileExtrasUpdate {
    pub headline: Option<String>,
    pub about: Option<String>,
    pub zip: Option<String>,
}

impl ProfileExtras {
    /// Shallow merge: provided fields overwrite, absent fields survive.
    pub fn apply(&mut self, update: ProfileExtrasUpdate) {
        if update.headline.is_some() {
            self.headline = update.headline;
        }
        if update.about.is_some() {
            self.about = update.about;
        }
        if update.zip.is_some() {
            self.zip = update.zip;
        }
    }
}

/// Candidate profile as the rest of the client consumes it, after
/// normalization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Profile {
    pub uid: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub headline: Option<String>,
    pub age: Option<u32>,
}

/// Candidate profile as the remote API ships it.
///
/// Field names vary between endpoints, so every candidate spelling is
/// optional here and resolved exactly once by [`RawProfile::normalize`]
/// instead of scattering fallback chains across call sites.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    pub user_id: Option<String>,
    pub uid: Option<String>,
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub photo_url: Option<String>,
    pub avatar_url: Option<String>,
    pub image: Option<String>,
    pub headline: Option<String>,
    pub age: Option<u32>,
}

impl RawProfile {
    /// Resolves each attribute to the first non-empty candidate field.
    ///
    /// Returns `None` when no usable identifier is present; such records
    /// cannot be liked or messaged and are dropped.
    pub fn normalize(self) -> Option<Profile> {
        let uid = first_non_empty([self.user_id, self.uid, self.id])?;
        let display_name = first_non_empty([self.display_name, self.name, self.full_name])
            .unwrap_or_else(|| uid.clone());
        let photo_url = first_non_empty([self.photo_url, self.avatar_url, self.image]);

        Some(Profile {
            uid,
            display_name,
            photo_url,
            headline: self.headline,
            age: self.age,
        })
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}
