use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

/// Fixed data the booking flow types into the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestData {
    pub deluxe_king:       RoomFixture,
    pub bed_and_breakfast: AddOnFixture,
    pub guest_details:     GuestDetails,
    pub card_details:      CardDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFixture {
    pub room_item_id: String,
    pub name:         String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnFixture {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name:  String,
    pub email:      String,
    pub phone:      String,
    pub address:    Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1:    String,
    pub city:     String,
    pub postcode: String,
    pub country:  String,
}

/// Payment card typed into the payment form.
///
/// `Debug` masks the number and CVC so the card never lands in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub number:      String,
    pub expiry:      String,
    pub cvc:         String,
    pub holder_name: String,
}

impl CardDetails {
    /// Card number with every digit but the last four replaced
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();
        let visible = digits.len().saturating_sub(4);
        digits
            .iter()
            .enumerate()
            .map(|(i, digit)| if i < visible { '*' } else { *digit })
            .collect()
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &self.masked_number())
            .field("expiry", &self.expiry)
            .field("cvc", &"***")
            .field("holder_name", &self.holder_name)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TestData {
    /// Parses a fixture document in the front end's camelCase JSON shape
    ///
    /// # Errors
    /// Returns `FixtureError::Json` if the document doesn't match.
    pub fn from_json_str(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    /// Returns `FixtureError::Io` if the file can't be read and
    /// `FixtureError::Json` if it can't be parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl Default for TestData {
    fn default() -> Self {
        Self {
            deluxe_king:       RoomFixture {
                room_item_id: "deluxe-king".to_owned(),
                name:         "Deluxe King".to_owned(),
            },
            bed_and_breakfast: AddOnFixture {
                name: "Bed and Breakfast".to_owned(),
            },
            guest_details:     GuestDetails {
                first_name: "Jane".to_owned(),
                last_name:  "Tester".to_owned(),
                email:      "jane.tester@example.com".to_owned(),
                phone:      "+44 20 7946 0958".to_owned(),
                address:    Address {
                    line1:    "10 Downing Street".to_owned(),
                    city:     "London".to_owned(),
                    postcode: "SW1A 2AA".to_owned(),
                    country:  "United Kingdom".to_owned(),
                },
            },
            // Stripe's documented test card
            card_details:      CardDetails {
                number:      "4242 4242 4242 4242".to_owned(),
                expiry:      "12/34".to_owned(),
                cvc:         "123".to_owned(),
                holder_name: "Jane Tester".to_owned(),
            },
        }
    }
}
