//! Destination catalog data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use destination_data::DestinationRecord;

/// Validation errors returned by the destination value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Name exceeds the schema limit.
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Image reference was missing or blank.
    EmptyImage,
    /// Description was missing or blank.
    EmptyDescription,
    /// Price was negative; zero is a legitimate price.
    NegativePrice {
        /// The offending amount.
        price: i32,
    },
}

impl fmt::Display for DestinationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "destination name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "destination name must be at most {max} characters")
            }
            Self::EmptyImage => write!(f, "image reference must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::NegativePrice { price } => {
                write!(f, "price must not be negative (got {price})")
            }
        }
    }
}

impl std::error::Error for DestinationValidationError {}

/// Stable destination identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(Uuid);

impl DestinationId {
    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Maximum destination name length, matching the `VARCHAR(50)` column.
pub const DESTINATION_NAME_MAX: usize = 50;

/// Short display label for a destination.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - At most [`DESTINATION_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DestinationName(String);

impl DestinationName {
    /// Validate and construct a [`DestinationName`].
    ///
    /// # Errors
    ///
    /// Returns [`DestinationValidationError`] for blank or over-long input.
    pub fn new(name: impl Into<String>) -> Result<Self, DestinationValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DestinationValidationError::EmptyName);
        }
        if trimmed.chars().count() > DESTINATION_NAME_MAX {
            return Err(DestinationValidationError::NameTooLong {
                max: DESTINATION_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DestinationName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DestinationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DestinationName> for String {
    fn from(value: DestinationName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DestinationName {
    type Error = DestinationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Relative path of the uploaded image backing a destination.
///
/// The file store itself is outside this application; the catalog only keeps
/// the reference (e.g. `pics/lalibela.jpg`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageRef(String);

impl ImageRef {
    /// Validate and construct an [`ImageRef`].
    ///
    /// # Errors
    ///
    /// Returns [`DestinationValidationError::EmptyImage`] for blank input.
    pub fn new(path: impl Into<String>) -> Result<Self, DestinationValidationError> {
        let path = path.into();
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(DestinationValidationError::EmptyImage);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.0
    }
}

impl TryFrom<String> for ImageRef {
    type Error = DestinationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-text description shown on the catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Validate and construct a [`Description`].
    ///
    /// # Errors
    ///
    /// Returns [`DestinationValidationError::EmptyDescription`] for blank
    /// input.
    pub fn new(text: impl Into<String>) -> Result<Self, DestinationValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DestinationValidationError::EmptyDescription);
        }
        Ok(Self(text))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl TryFrom<String> for Description {
    type Error = DestinationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-negative price in the catalog's display currency.
///
/// Zero is accepted: the original dataset includes free attractions and the
/// store has never rejected them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Price(i32);

impl Price {
    /// Validate and construct a [`Price`].
    ///
    /// # Errors
    ///
    /// Returns [`DestinationValidationError::NegativePrice`] for negative
    /// amounts.
    pub fn try_new(amount: i32) -> Result<Self, DestinationValidationError> {
        if amount < 0 {
            return Err(DestinationValidationError::NegativePrice { price: amount });
        }
        Ok(Self(amount))
    }

    /// The amount as stored.
    #[must_use]
    pub fn amount(&self) -> i32 {
        self.0
    }
}

impl From<Price> for i32 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl TryFrom<i32> for Price {
    type Error = DestinationValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

/// A catalog entry representing a travel location available for browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    id: DestinationId,
    name: DestinationName,
    image: ImageRef,
    description: Description,
    price: Price,
    on_offer: bool,
}

impl Destination {
    /// Build a destination from validated components.
    #[must_use]
    pub fn new(id: DestinationId, fields: NewDestination) -> Self {
        let NewDestination {
            name,
            image,
            description,
            price,
            on_offer,
        } = fields;
        Self {
            id,
            name,
            image,
            description,
            price,
            on_offer,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &DestinationId {
        &self.id
    }

    /// Display label.
    #[must_use]
    pub fn name(&self) -> &DestinationName {
        &self.name
    }

    /// Image reference.
    #[must_use]
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Price.
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Promotional flag.
    #[must_use]
    pub fn on_offer(&self) -> bool {
        self.on_offer
    }
}

/// Validated fields for a destination that does not exist yet.
///
/// The identifier is assigned by the store at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDestination {
    /// Display label.
    pub name: DestinationName,
    /// Image reference.
    pub image: ImageRef,
    /// Free-text description.
    pub description: Description,
    /// Price.
    pub price: Price,
    /// Promotional flag.
    pub on_offer: bool,
}

impl NewDestination {
    /// Validate raw parts into a [`NewDestination`].
    ///
    /// # Errors
    ///
    /// Returns the first [`DestinationValidationError`] encountered.
    pub fn try_from_parts(
        name: &str,
        image: &str,
        description: &str,
        price: i32,
        on_offer: bool,
    ) -> Result<Self, DestinationValidationError> {
        Ok(Self {
            name: DestinationName::new(name)?,
            image: ImageRef::new(image)?,
            description: Description::new(description)?,
            price: Price::try_new(price)?,
            on_offer,
        })
    }
}

impl TryFrom<&DestinationRecord> for NewDestination {
    type Error = DestinationValidationError;

    fn try_from(record: &DestinationRecord) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &record.name,
            &record.image,
            &record.description,
            record.price,
            record.on_offer,
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Lalibela", 2500)]
    #[case("Free Destination", 0)]
    fn accepts_valid_destinations(#[case] name: &str, #[case] price: i32) {
        let fields = NewDestination::try_from_parts(
            name,
            "pics/test.jpg",
            "A place worth seeing.",
            price,
            false,
        )
        .expect("fields should validate");
        assert_eq!(fields.name.as_ref(), name);
        assert_eq!(fields.price.amount(), price);
    }

    #[rstest]
    fn accepts_name_exactly_at_limit() {
        let name = "A".repeat(50);
        NewDestination::try_from_parts(&name, "pics/a.jpg", "desc", 10, true)
            .expect("50-character name should validate");
    }

    #[rstest]
    #[case("", "pics/a.jpg", "desc", 1, DestinationValidationError::EmptyName)]
    #[case("Axum", " ", "desc", 1, DestinationValidationError::EmptyImage)]
    #[case("Axum", "pics/a.jpg", "", 1, DestinationValidationError::EmptyDescription)]
    #[case(
        "Axum",
        "pics/a.jpg",
        "desc",
        -1,
        DestinationValidationError::NegativePrice { price: -1 }
    )]
    fn rejects_invalid_fields(
        #[case] name: &str,
        #[case] image: &str,
        #[case] description: &str,
        #[case] price: i32,
        #[case] expected: DestinationValidationError,
    ) {
        let err = NewDestination::try_from_parts(name, image, description, price, false)
            .expect_err("fields must be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn rejects_over_long_names() {
        let name = "A".repeat(51);
        let err = NewDestination::try_from_parts(&name, "pics/a.jpg", "desc", 1, false)
            .expect_err("51-character name must fail");
        assert_eq!(
            err,
            DestinationValidationError::NameTooLong {
                max: DESTINATION_NAME_MAX
            }
        );
    }

    #[rstest]
    fn converts_seed_records() {
        let record = destination_data::DestinationRecord {
            name: "Harar".to_owned(),
            image: "pics/harar.jpg".to_owned(),
            description: "Walled city.".to_owned(),
            price: 1400,
            on_offer: false,
        };
        let fields = NewDestination::try_from(&record).expect("record should convert");
        assert_eq!(fields.name.as_ref(), "Harar");
        assert!(!fields.on_offer);
    }
}
