//! Location value objects: postal address and GPS coordinates.

use serde::Serialize;

use crate::error::ValidationError;

/// GPS coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsCode {
    latitude: f64,
    longitude: f64,
}

impl GpsCode {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidGpsCoordinates`] when latitude is
    /// outside `[-90, 90]` or longitude outside `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::InvalidGpsCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Countries whose postal code format is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Country {
    Portugal,
    Usa,
    France,
    Uk,
}

impl Country {
    fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        [
            ("Portugal", Self::Portugal),
            ("USA", Self::Usa),
            ("France", Self::France),
            ("UK", Self::Uk),
        ]
        .into_iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(name))
        .map(|(_, country)| country)
    }

    fn accepts_zip_code(self, zip: &str) -> bool {
        let bytes = zip.as_bytes();
        let digits = |range: &[u8]| !range.is_empty() && range.iter().all(u8::is_ascii_digit);
        match self {
            // 4000-000
            Self::Portugal => {
                bytes.len() == 8 && bytes[4] == b'-' && digits(&bytes[..4]) && digits(&bytes[5..])
            }
            // 12345 or 12345-6789
            Self::Usa => match bytes.len() {
                5 => digits(bytes),
                10 => bytes[5] == b'-' && digits(&bytes[..5]) && digits(&bytes[6..]),
                _ => false,
            },
            Self::France => bytes.len() == 5 && digits(bytes),
            Self::Uk => is_uk_postcode(zip),
        }
    }
}

// Outward code (A9, A99, AA9, AA99, A9A, AA9A), one space, inward code (9AA).
fn is_uk_postcode(zip: &str) -> bool {
    let Some((outward, inward)) = zip.split_once(' ') else {
        return false;
    };
    let inward: Vec<char> = inward.chars().collect();
    let inward_ok = inward.len() == 3
        && inward[0].is_ascii_digit()
        && inward[1..].iter().all(char::is_ascii_alphabetic);

    let outward: Vec<char> = outward.chars().collect();
    let letters = outward
        .iter()
        .take_while(|c| c.is_ascii_alphabetic())
        .count();
    let rest = &outward[letters..];
    let outward_ok = (1..=2).contains(&letters)
        && match rest {
            [d] => d.is_ascii_digit(),
            [d, x] => d.is_ascii_digit() && x.is_ascii_alphanumeric(),
            _ => false,
        };

    inward_ok && outward_ok
}

/// A postal address with a country-validated zip code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    street: String,
    door_number: String,
    zip_code: String,
    city: String,
    country: Country,
}

impl Address {
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankField`] for blank parts,
    /// [`ValidationError::UnsupportedCountry`] for countries without a known
    /// zip code format and [`ValidationError::InvalidZipCode`] when the zip
    /// code does not match the country's format.
    pub fn new(
        street: &str,
        door_number: &str,
        zip_code: &str,
        city: &str,
        country: &str,
    ) -> Result<Self, ValidationError> {
        let street = non_blank(street, "street")?;
        let door_number = non_blank(door_number, "door number")?;
        let zip_code = non_blank(zip_code, "zip code")?;
        let city = non_blank(city, "city")?;
        let country_name = non_blank(country, "country")?;

        let country = Country::parse(&country_name)
            .ok_or_else(|| ValidationError::UnsupportedCountry(country_name.clone()))?;
        if !country.accepts_zip_code(&zip_code) {
            return Err(ValidationError::InvalidZipCode {
                country: country_name,
                zip_code,
            });
        }

        Ok(Self {
            street,
            door_number,
            zip_code,
            city,
            country,
        })
    }

    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    #[must_use]
    pub fn door_number(&self) -> &str {
        &self.door_number
    }

    #[must_use]
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn country(&self) -> Country {
        self.country
    }
}

fn non_blank(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(value.to_string())
}

/// Where the house stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub address: Address,
    pub gps: GpsCode,
}

impl Location {
    #[must_use]
    pub fn new(address: Address, gps: GpsCode) -> Self {
        Self { address, gps }
    }
}
