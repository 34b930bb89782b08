//! The decoded license record.
//!
//! The payload is a JSON object containing at least:
//! - `email`: customer email
//! - `purchaseDate`: when the license was bought
//! - `expiryDate`: when it stops being valid
//! - `version`: product version the license was issued for
//!
//! Dates are kept exactly as the issuing tool wrote them. Any further fields
//! are preserved in [`License::extra`] so newer issuers stay readable.

use crate::error::InvalidLicenseKind;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields every license payload must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["email", "purchaseDate", "expiryDate", "version"];

/// A decoded license.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    email: String,
    purchase_date: String,
    expiry_date: String,
    version: String,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl License {
    /// Creates a license with the required fields.
    pub fn new(
        email: impl Into<String>,
        purchase_date: impl Into<String>,
        expiry_date: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            purchase_date: purchase_date.into(),
            expiry_date: expiry_date.into(),
            version: version.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Adds a field beyond the required set.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Parses decrypted plaintext.
    ///
    /// The plaintext must be a JSON object holding every field in
    /// [`REQUIRED_FIELDS`] as a string.
    pub fn from_json_slice(plaintext: &[u8]) -> Result<Self, InvalidLicenseKind> {
        let value: serde_json::Value = serde_json::from_slice(plaintext)
            .map_err(|e| InvalidLicenseKind::MalformedPayload(format!("invalid JSON: {e}")))?;

        let object = value.as_object().ok_or_else(|| {
            InvalidLicenseKind::MalformedPayload("payload is not a JSON object".to_string())
        })?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
            return Err(InvalidLicenseKind::MissingField(*missing));
        }

        serde_json::from_value(value)
            .map_err(|e| InvalidLicenseKind::MalformedPayload(e.to_string()))
    }

    /// Customer email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Purchase date as issued.
    #[must_use]
    pub fn purchase_date(&self) -> &str {
        &self.purchase_date
    }

    /// Expiry date as issued.
    #[must_use]
    pub fn expiry_date(&self) -> &str {
        &self.expiry_date
    }

    /// Product version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Fields beyond the required set.
    #[must_use]
    pub fn extra(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }

    /// Purchase instant, if the date is RFC 3339 or `YYYY-MM-DD`.
    #[must_use]
    pub fn purchased_at(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.purchase_date).or_else(|| start_of_day(&self.purchase_date))
    }

    /// The instant the license stops being valid.
    ///
    /// A bare `YYYY-MM-DD` expiry covers that whole day, so the instant is the
    /// following midnight UTC. Returns `None` for dates in other formats.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.expiry_date).or_else(|| {
            NaiveDate::parse_from_str(&self.expiry_date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.succ_opt())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
    }

    /// Whether the license has expired at `now`, or `None` if the expiry date
    /// cannot be interpreted.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> Option<bool> {
        self.expires_at().map(|exp| now >= exp)
    }
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn start_of_day(s: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
