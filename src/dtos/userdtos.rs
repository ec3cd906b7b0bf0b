use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::usermodel::{User, UserRole, UserStatus};

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    // Supports international formats with an optional country prefix.
    let phone_regex = regex::Regex::new(r"^\+?[0-9]{10,15}$")
        .map_err(|_| ValidationError::new("invalid_phone_regex"))?;

    if !phone_regex.is_match(phone) {
        let mut error = ValidationError::new("invalid_phone");
        error.message = Some(Cow::from(
            "Phone number must be 10-15 digits with an optional leading +",
        ));
        return Err(error);
    }
    Ok(())
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RequestOtpDto {
    #[validate(custom = "validate_phone")]
    pub phone: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpDto {
    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub otp: String,

    // Profile seed for first-time logins; ignored for known phones.
    #[validate(length(min = 1, max = 100, message = "Name must be between 1-100 characters"))]
    pub name: Option<String>,

    pub role: Option<UserRole>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserProfileDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Village must be between 1-100 characters"))]
    pub village: Option<String>,

    #[validate(url(message = "Invalid photo URL"))]
    pub photo_url: Option<String>,

    #[validate(range(min = 0.0, message = "Land area cannot be negative"))]
    pub land_acres: Option<f64>,

    #[validate(range(min = 0, message = "Animal count cannot be negative"))]
    pub animal_count: Option<i32>,

    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserStatusDto {
    pub status: UserStatus,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUserDto {
    pub id: String,
    pub phone: String,
    pub name: String,
    pub village: Option<String>,
    pub photo_url: Option<String>,
    pub land_acres: Option<f64>,
    pub animal_count: Option<i32>,
    pub skills: Option<Vec<String>>,
    pub role: String,
    pub status: String,
    pub rating_avg: f64,
    pub rating_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            phone: user.phone.to_owned(),
            name: user.name.to_owned(),
            village: user.village.clone(),
            photo_url: user.photo_url.clone(),
            land_acres: user.land_acres,
            animal_count: user.animal_count,
            skills: user.skills.clone(),
            role: user.role.to_str().to_string(),
            status: user.status.to_str().to_string(),
            rating_avg: user.rating_avg,
            rating_count: user.rating_count,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequestedDto {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_otp: Option<String>,
}

/// Compact identity block embedded in job, attendance and rating payloads.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub photo_url: Option<String>,
    pub rating_avg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_validation_accepts_international_format() {
        let dto = RequestOtpDto {
            phone: "+919876543210".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn phone_validation_rejects_garbage() {
        for bad in ["", "12345", "not-a-phone", "+12-34-56"] {
            let dto = RequestOtpDto {
                phone: bad.to_string(),
            };
            assert!(dto.validate().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn otp_must_be_six_digits() {
        let dto = VerifyOtpDto {
            phone: "+919876543210".to_string(),
            otp: "1234".to_string(),
            name: None,
            role: None,
        };
        assert!(dto.validate().is_err());
    }
}
