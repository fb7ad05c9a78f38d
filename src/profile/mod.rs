//! Farmer profile store.
//!
//! Thread-safe in-memory storage of farmer accounts and their agronomic
//! profiles. Credentials are not handled here.

mod account;
mod error;

pub use account::*;
pub use error::*;

use crate::advisory::FarmerProfile;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Store of registered farmers, keyed by username.
///
/// Uses lock-free concurrent maps (DashMap) so request handlers can share one
/// instance behind an `Arc`.
///
/// # Examples
///
/// ```
/// use advisor::profile::{ProfileStore, Registration};
///
/// let store = ProfileStore::new();
/// store
///     .register(Registration {
///         username: "ravi".to_string(),
///         email: "ravi@example.com".to_string(),
///         location: Some("Telangana".to_string()),
///         soil_type: Some("black".to_string()),
///         season: Some("Kharif".to_string()),
///         ..Default::default()
///     })
///     .unwrap();
///
/// let profile = store.complete_profile("ravi").unwrap();
/// assert_eq!(profile.soil_type, "Black");
/// ```
pub struct ProfileStore {
    accounts: DashMap<String, FarmerAccount>,
    /// Lower-cased email -> username
    emails: DashMap<String, String>,
}

impl ProfileStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            emails: DashMap::new(),
        }
    }

    /// Register a new farmer.
    ///
    /// # Errors
    ///
    /// Duplicate usernames are reported before duplicate emails, and both
    /// before form validation errors.
    pub fn register(&self, registration: Registration) -> Result<FarmerAccount, ProfileError> {
        let username = registration.username.trim().to_string();
        let email = registration.email.trim().to_string();

        let account_slot = match self.accounts.entry(username.clone()) {
            Entry::Occupied(_) => return Err(ProfileError::DuplicateUsername(username)),
            Entry::Vacant(slot) => slot,
        };
        let email_slot = match self.emails.entry(email.to_lowercase()) {
            Entry::Occupied(_) => return Err(ProfileError::DuplicateEmail(email)),
            Entry::Vacant(slot) => slot,
        };

        let profile = registration.validated_profile()?;

        let now = Utc::now();
        let account = FarmerAccount {
            username: username.clone(),
            email,
            mobile: registration.mobile.unwrap_or_default(),
            profile,
            registered_at: now,
            updated_at: now,
        };

        email_slot.insert(username);
        account_slot.insert(account.clone());

        tracing::info!(
            username = %account.username,
            has_profile = account.profile.is_some(),
            "Registered farmer"
        );
        Ok(account)
    }

    /// Get a farmer account by username.
    pub fn get(&self, username: &str) -> Option<FarmerAccount> {
        self.accounts.get(username).map(|entry| entry.value().clone())
    }

    /// Replace (or create) the farmer's profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` for an unknown username and
    /// `ProfileError::Invalid` when the form does not validate.
    pub fn edit_profile(
        &self,
        username: &str,
        update: ProfileUpdate,
    ) -> Result<FarmerAccount, ProfileError> {
        let profile = update.validated_profile()?;

        let mut account = self
            .accounts
            .get_mut(username)
            .ok_or_else(|| ProfileError::NotFound(username.to_string()))?;

        if let Some(mobile) = update.mobile {
            account.mobile = mobile;
        }
        account.profile = Some(profile);
        account.updated_at = Utc::now();

        tracing::info!(username = %username, "Updated farmer profile");
        Ok(account.clone())
    }

    /// The farmer's profile, only if soil type, season and location are all set.
    ///
    /// `None` covers both an unknown farmer and an incomplete profile.
    pub fn complete_profile(&self, username: &str) -> Option<FarmerProfile> {
        self.accounts
            .get(username)
            .and_then(|entry| entry.profile.clone())
            .filter(FarmerProfile::is_complete)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Number of registered farmers.
    pub fn count(&self) -> usize {
        self.accounts.len()
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}
