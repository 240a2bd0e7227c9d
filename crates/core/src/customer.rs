//! Customer transfer objects.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::patch::Patch;
use crate::types::{DbId, Timestamp};
use crate::validation::{check_max_len, error, not_blank};

/// Maximum length of a customer name, in characters.
pub const CUSTOMER_NAME_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub version: Option<i32>,
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[serde(default)]
    pub created_date: Option<Timestamp>,
    #[serde(default)]
    pub updated_date: Option<Timestamp>,
}

/// Partial update body for `PATCH /customer/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default)]
    pub version: Option<i32>,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
}

impl CustomerPatch {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.non_blank(),
            email: self.email.non_blank(),
            ..self
        }
    }
}

impl Validate for CustomerPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.is_clear() {
            errors.add("name", error("required", "may not be null"));
        }
        if let Some(name) = self.name.as_set() {
            check_max_len(
                &mut errors,
                "name",
                name,
                CUSTOMER_NAME_MAX_LEN,
                "must be between 1 and 255 characters",
            );
        }
        if let Some(email) = self.email.as_set() {
            if !email.trim().is_empty() && !validator::ValidateEmail::validate_email(email) {
                errors.add("email", error("email", "must be a valid email address"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
