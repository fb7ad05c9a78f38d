use super::ProfileError;
use crate::advisory::FarmerProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Soil types offered at registration.
pub const SOIL_CHOICES: [&str; 6] = ["Black", "Red", "Sandy", "Alluvial", "Laterite", "Loamy"];

/// Growing seasons offered at registration.
pub const SEASON_CHOICES: [&str; 3] = ["Kharif", "Rabi", "Zaid"];

pub const USERNAME_MAX_LEN: usize = 150;
pub const MOBILE_MAX_LEN: usize = 10;
pub const LOCATION_MAX_LEN: usize = 100;
/// Limit for free-text soil type and season on profile edit.
pub const CATEGORY_MAX_LEN: usize = 50;

/// A registered farmer.
///
/// `profile` is `None` until the farmer fills in soil, season and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerAccount {
    pub username: String,
    pub email: String,
    pub mobile: String,
    pub profile: Option<FarmerProfile>,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration form.
///
/// Profile fields are all-or-none: a farmer may register first and complete
/// the profile later.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub soil_type: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
}

impl Registration {
    /// Validate the form, returning the profile it carries (if any).
    ///
    /// Soil type and season must be one of the offered choices (any case) and
    /// are stored in their canonical spelling.
    pub(crate) fn validated_profile(&self) -> Result<Option<FarmerProfile>, ProfileError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ProfileError::invalid("username", "This field is required."));
        }
        if username.chars().count() > USERNAME_MAX_LEN {
            return Err(ProfileError::invalid(
                "username",
                &format!("Ensure this value has at most {} characters.", USERNAME_MAX_LEN),
            ));
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
        {
            return Err(ProfileError::invalid(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            ));
        }
        validate_email(&self.email)?;
        if let Some(mobile) = &self.mobile {
            validate_len("mobile", mobile, MOBILE_MAX_LEN)?;
        }

        let fields = [&self.location, &self.soil_type, &self.season];
        let given = fields
            .iter()
            .filter(|f| f.as_deref().is_some_and(|v| !v.trim().is_empty()))
            .count();

        match given {
            0 => Ok(None),
            3 => {
                let location = self.location.as_deref().unwrap_or_default();
                validate_len("location", location, LOCATION_MAX_LEN)?;
                let soil_type = canonical_choice(
                    "soil_type",
                    self.soil_type.as_deref().unwrap_or_default(),
                    &SOIL_CHOICES,
                )?;
                let season = canonical_choice(
                    "season",
                    self.season.as_deref().unwrap_or_default(),
                    &SEASON_CHOICES,
                )?;
                Ok(Some(FarmerProfile::new(soil_type, season, location)))
            }
            _ => Err(ProfileError::invalid(
                "profile",
                "location, soil_type and season must be provided together",
            )),
        }
    }
}

/// Profile edit form. Creates the profile when the farmer has none.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub mobile: Option<String>,
    pub location: String,
    pub soil_type: String,
    pub season: String,
}

impl ProfileUpdate {
    pub(crate) fn validated_profile(&self) -> Result<FarmerProfile, ProfileError> {
        if let Some(mobile) = &self.mobile {
            validate_len("mobile", mobile, MOBILE_MAX_LEN)?;
        }
        validate_required("location", &self.location, LOCATION_MAX_LEN)?;
        validate_required("soil_type", &self.soil_type, CATEGORY_MAX_LEN)?;
        validate_required("season", &self.season, CATEGORY_MAX_LEN)?;

        Ok(FarmerProfile::new(&self.soil_type, &self.season, &self.location))
    }
}

fn validate_email(email: &str) -> Result<(), ProfileError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ProfileError::invalid("email", "Enter a valid email address."))
    }
}

fn validate_len(field: &str, value: &str, max: usize) -> Result<(), ProfileError> {
    if value.chars().count() > max {
        return Err(ProfileError::invalid(
            field,
            &format!("Ensure this value has at most {} characters.", max),
        ));
    }
    Ok(())
}

fn validate_required(field: &str, value: &str, max: usize) -> Result<(), ProfileError> {
    if value.trim().is_empty() {
        return Err(ProfileError::invalid(field, "This field is required."));
    }
    validate_len(field, value, max)
}

fn canonical_choice(
    field: &str,
    value: &str,
    choices: &[&'static str],
) -> Result<&'static str, ProfileError> {
    let value = value.trim();
    choices
        .iter()
        .find(|c| c.eq_ignore_ascii_case(value))
        .copied()
        .ok_or_else(|| {
            ProfileError::invalid(
                field,
                &format!(
                    "Select a valid choice. {} is not one of the available choices ({}).",
                    value,
                    choices.join(", ")
                ),
            )
        })
}
