//! Seed record shape and field validation.

use serde::{Deserialize, Serialize};

use crate::error::RecordValidationError;

/// Maximum destination name length accepted by the backend schema.
pub const DESTINATION_NAME_MAX: usize = 50;

/// One destination entry in a seed registry.
///
/// Field constraints mirror the backend's domain validation so a registry can
/// be checked before any database work starts. `price` is an integer amount
/// in the catalog's display currency; zero is a legitimate value (free
/// attractions exist), negative amounts are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct DestinationRecord {
    /// Short display label, at most [`DESTINATION_NAME_MAX`] characters.
    pub name: String,
    /// Relative path of the uploaded image backing this record.
    pub image: String,
    /// Free-text description shown on the catalog page.
    pub description: String,
    /// Non-negative price.
    pub price: i32,
    /// Promotional flag.
    #[serde(default)]
    pub on_offer: bool,
}

impl DestinationRecord {
    /// Check all field constraints, returning the first violation found.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        if self.name.chars().count() > DESTINATION_NAME_MAX {
            return Err(RecordValidationError::NameTooLong {
                max: DESTINATION_NAME_MAX,
            });
        }
        if self.image.trim().is_empty() {
            return Err(RecordValidationError::EmptyImage);
        }
        if self.description.trim().is_empty() {
            return Err(RecordValidationError::EmptyDescription);
        }
        if self.price < 0 {
            return Err(RecordValidationError::NegativePrice { price: self.price });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for record validation.
    use rstest::rstest;

    use super::*;

    fn record(name: &str, image: &str, description: &str, price: i32) -> DestinationRecord {
        DestinationRecord {
            name: name.to_owned(),
            image: image.to_owned(),
            description: description.to_owned(),
            price,
            on_offer: false,
        }
    }

    #[rstest]
    #[case(record("Lalibela", "pics/lalibela.jpg", "Rock-hewn churches.", 2500))]
    #[case(record("Free Destination", "pics/free.jpg", "No entry fee.", 0))]
    #[case(record(&"A".repeat(50), "pics/a.jpg", "Exactly at the limit.", 10))]
    fn accepts_valid_records(#[case] record: DestinationRecord) {
        record.validate().expect("record should validate");
    }

    #[rstest]
    #[case(record("", "pics/x.jpg", "desc", 1), RecordValidationError::EmptyName)]
    #[case(record("   ", "pics/x.jpg", "desc", 1), RecordValidationError::EmptyName)]
    #[case(
        record(&"A".repeat(51), "pics/x.jpg", "desc", 1),
        RecordValidationError::NameTooLong { max: DESTINATION_NAME_MAX }
    )]
    #[case(record("Axum", "", "desc", 1), RecordValidationError::EmptyImage)]
    #[case(record("Axum", "pics/x.jpg", "  ", 1), RecordValidationError::EmptyDescription)]
    #[case(
        record("Axum", "pics/x.jpg", "desc", -5),
        RecordValidationError::NegativePrice { price: -5 }
    )]
    fn rejects_invalid_records(
        #[case] record: DestinationRecord,
        #[case] expected: RecordValidationError,
    ) {
        let err = record.validate().expect_err("record must be rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn on_offer_defaults_to_false_when_absent() {
        let json = r#"{
            "name": "Harar",
            "image": "pics/harar.jpg",
            "description": "Walled city.",
            "price": 1400
        }"#;
        let record: DestinationRecord = serde_json::from_str(json).expect("record parses");
        assert!(!record.on_offer);
    }
}
