//! Lookups against the user-profile collection.

use tracing::warn;

use skillforge_shared::constants::UNKNOWN_CREATOR;
use skillforge_shared::UserProfile;

use crate::document::CollectionPath;
use crate::error::Result;
use crate::store::Store;

impl Store {
    /// Fetch a profile by user identifier; `None` when no such profile
    /// exists.
    pub async fn get_user(&self, id: &str) -> Result<Option<UserProfile>> {
        let doc = self.backend().get(&CollectionPath::users(), id).await?;
        match doc {
            Some(doc) => {
                let mut profile: UserProfile = serde_json::from_value(doc.data)?;
                profile.id = doc.id;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// Create a profile.  Mostly used by tests and seeding.
    pub async fn create_user(&self, display_name: &str) -> Result<UserProfile> {
        let mut profile = UserProfile {
            id: String::new(),
            display_name: display_name.to_string(),
        };
        let body = serde_json::json!({ "display_name": profile.display_name });
        profile.id = self.backend().insert(&CollectionPath::users(), body).await?;
        Ok(profile)
    }

    /// Resolve a creator's display name, degrading to the
    /// [`UNKNOWN_CREATOR`] sentinel on a missing profile or a failed
    /// lookup.  Never returns an error: one bad profile must not abort a
    /// whole fetch batch.
    pub async fn resolve_creator_name(&self, creator_id: &str) -> String {
        match self.get_user(creator_id).await {
            Ok(Some(profile)) => profile.display_name,
            Ok(None) => UNKNOWN_CREATOR.to_string(),
            Err(e) => {
                warn!(creator_id = %creator_id, error = %e, "creator lookup failed");
                UNKNOWN_CREATOR.to_string()
            }
        }
    }
}
