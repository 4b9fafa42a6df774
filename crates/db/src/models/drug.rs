//! Drug reference-data model and DTOs.
//!
//! Levels are stored as free text in both milligram and microgram columns.
//! Only the `*_level_mg` columns feed blood-level classification.

use bloodlevel_core::classification::RangeText;
use bloodlevel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `drugs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Drug {
    pub id: DbId,
    pub drug_name: String,
    pub drug_metadata: Option<String>,
    pub normal_level_mg: Option<String>,
    pub normal_level_ug: Option<String>,
    pub toxic_level_mg: Option<String>,
    pub toxic_level_ug: Option<String>,
    pub lethal_level_mg: Option<String>,
    pub lethal_level_ug: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Drug {
    /// The milligram range strings used for classification.
    pub fn mg_ranges(&self) -> RangeText<'_> {
        RangeText {
            normal: self.normal_level_mg.as_deref(),
            toxic: self.toxic_level_mg.as_deref(),
            lethal: self.lethal_level_mg.as_deref(),
        }
    }
}

/// DTO for creating a new drug.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateDrug {
    #[validate(length(min = 1, max = 255))]
    pub drug_name: String,
    pub drug_metadata: Option<String>,
    pub normal_level_mg: Option<String>,
    pub normal_level_ug: Option<String>,
    pub toxic_level_mg: Option<String>,
    pub toxic_level_ug: Option<String>,
    pub lethal_level_mg: Option<String>,
    pub lethal_level_ug: Option<String>,
}

/// DTO for partially updating a drug.
///
/// Nullable columns use `Option<Option<String>>`: a missing key leaves the
/// column unchanged, an explicit `null` clears it, and a string sets it.
/// `drug_name` cannot be cleared, so `null` and a missing key both keep it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDrug {
    #[validate(length(min = 1, max = 255))]
    pub drug_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub drug_metadata: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub normal_level_mg: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub normal_level_ug: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub toxic_level_mg: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub toxic_level_ug: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub lethal_level_mg: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub lethal_level_ug: Option<Option<String>>,
}

/// Marks a key as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_missing_null_and_value() {
        let dto: UpdateDrug = serde_json::from_value(serde_json::json!({
            "normal_level_mg": null,
            "toxic_level_mg": "10-20",
        }))
        .unwrap();

        assert_eq!(dto.drug_name, None);
        assert_eq!(dto.drug_metadata, None);
        assert_eq!(dto.normal_level_mg, Some(None));
        assert_eq!(dto.toxic_level_mg, Some(Some("10-20".to_string())));
        assert_eq!(dto.lethal_level_mg, None);
    }

    #[test]
    fn create_requires_non_empty_name() {
        let dto = CreateDrug {
            drug_name: String::new(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        let dto = CreateDrug {
            drug_name: "Lithium".to_string(),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn update_rejects_empty_name_but_allows_missing() {
        let dto = UpdateDrug {
            drug_name: Some(String::new()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
        assert!(UpdateDrug::default().validate().is_ok());
    }
}
