use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Shared secret used to sign every request.
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct ApiKey(String);

impl ApiKey {
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the secret.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Merchant publisher id, sent on every call as `pub_id`.
///
/// Invariant: non-empty after trimming.
pub struct PublisherId(String);

impl PublisherId {
    pub const FIELD: &'static str = "pub_id";

    /// Create a validated [`PublisherId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated publisher id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Merchant username for HTTP Basic authentication.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Merchant password for HTTP Basic authentication.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Optional integration tag sent as `source`.
///
/// Invariant: non-empty after trimming.
pub struct SourceTag(String);

impl SourceTag {
    pub const FIELD: &'static str = "source";

    /// Create a validated [`SourceTag`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Scalar request parameter value.
///
/// Only an empty string counts as empty; `0`, `0.0`, `false` and `"0"` are
/// all meaningful values.
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Str(value) if value.is_empty())
    }

    /// String form used both on the wire and in the signature.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Str(value) => value.clone(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Bool(true) => "1".to_owned(),
            Self::Bool(false) => "0".to_owned(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&Msisdn> for ParamValue {
    fn from(value: &Msisdn) -> Self {
        Self::Str(value.as_str().to_owned())
    }
}

impl From<&CountryCode> for ParamValue {
    fn from(value: &CountryCode) -> Self {
        Self::Str(value.as_str().to_owned())
    }
}

impl From<Amount> for ParamValue {
    fn from(value: Amount) -> Self {
        Self::Str(value.to_wire())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Subscriber phone number in international format, digits only (`msisdn`).
///
/// A leading `+` is accepted and stripped.
pub struct Msisdn(String);

impl Msisdn {
    pub const FIELD: &'static str = "msisdn";

    /// Create a validated [`Msisdn`] from already-international digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidMsisdn {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(digits.to_owned()))
    }

    /// Parse a number in any national or international notation.
    ///
    /// `default_region` is used when the input carries no country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, raw).map_err(|_| {
            ValidationError::InvalidMsisdn {
                input: raw.to_owned(),
            }
        })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        Self::new(e164)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Two-letter ISO 3166 country code (`country_code`), kept in the caller's case.
pub struct CountryCode(String);

impl CountryCode {
    pub const FIELD: &'static str = "country_code";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if trimmed.len() != 2 || !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCountryCode {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Monetary amount sent with exactly two decimals (`10` becomes `"10.00"`).
///
/// Invariant: finite and non-negative.
pub struct Amount(f64);

impl Amount {
    pub const FIELD: &'static str = "amount";

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidAmount {
                field: Self::FIELD,
                input: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Two-decimal rendering, rounding half away from zero.
    ///
    /// Cents are first cut to 15 significant digits so that inputs such as
    /// `1.005` (stored as `1.00499...`) round up like PHP's `number_format`.
    pub fn to_wire(self) -> String {
        let cents = self.0 * 100.0;
        let cents = format!("{cents:.14e}").parse::<f64>().unwrap_or(cents);
        let rounded = cents.round() / 100.0;
        format!("{rounded:.2}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Transaction status code reported by `checkTransactionStatus`.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct TransactionStatusCode(i32);

impl TransactionStatusCode {
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known variant, if one exists.
    pub fn known_kind(self) -> Option<KnownTransactionStatus> {
        KnownTransactionStatus::from_code(self.0)
    }

    /// Returns `true` if the end user was charged (fully or partially).
    pub fn is_success(self) -> bool {
        matches!(self.known_kind(), Some(kind) if kind.is_success())
    }

    /// Returns `true` if the transaction will not change state any more.
    pub fn is_final(self) -> bool {
        matches!(self.known_kind(), Some(kind) if kind.is_final())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known transaction status codes.
pub enum KnownTransactionStatus {
    Delivered,
    Billed,
    OverSpendLimit,
    NoCredit,
    Failed,
    Pending,
    Sent,
    BillingBlocked,
    Refunded,
    Confirmed,
    PartialSuccess,
    NotFullAmount,
}

impl KnownTransactionStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            20000 => Self::Delivered,
            20001 => Self::Billed,
            20002 => Self::OverSpendLimit,
            20003 => Self::NoCredit,
            20004 => Self::Failed,
            20005 => Self::Pending,
            20006 => Self::Sent,
            20007 => Self::BillingBlocked,
            20008 => Self::Refunded,
            20009 => Self::Confirmed,
            20010 => Self::PartialSuccess,
            20011 => Self::NotFullAmount,
            _ => return None,
        })
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Delivered => 20000,
            Self::Billed => 20001,
            Self::OverSpendLimit => 20002,
            Self::NoCredit => 20003,
            Self::Failed => 20004,
            Self::Pending => 20005,
            Self::Sent => 20006,
            Self::BillingBlocked => 20007,
            Self::Refunded => 20008,
            Self::Confirmed => 20009,
            Self::PartialSuccess => 20010,
            Self::NotFullAmount => 20011,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::Delivered | Self::Billed | Self::PartialSuccess | Self::NotFullAmount
        )
    }

    pub fn is_final(self) -> bool {
        !matches!(self, Self::Pending | Self::Sent | Self::Confirmed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Campaign product type (`product_type`).
pub enum ProductType {
    VirtualCurrency,
    VirtualGoods,
    Donation,
}

impl ProductType {
    pub fn from_wire(value: &str) -> Option<Self> {
        Some(match value.trim() {
            "vc" => Self::VirtualCurrency,
            "vg" => Self::VirtualGoods,
            "do" => Self::Donation,
            _ => return None,
        })
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::VirtualCurrency => "vc",
            Self::VirtualGoods => "vg",
            Self::Donation => "do",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Purchase confirmation mechanism (`optin_method`).
pub enum OptinMethod {
    /// The subscriber replies to an SMS.
    Mo,
    /// Off-portal redirect.
    OffPortal,
    /// The subscriber enters a PIN received by SMS.
    Pin,
}

impl OptinMethod {
    pub fn from_wire(value: &str) -> Option<Self> {
        Some(match value.trim() {
            "MO" => Self::Mo,
            "OP" => Self::OffPortal,
            "PIN" => Self::Pin,
            _ => return None,
        })
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Mo => "MO",
            Self::OffPortal => "OP",
            Self::Pin => "PIN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Billing channel (`billing_type`).
pub enum BillingType {
    PremiumSms,
    DirectCarrierBilling,
}

impl BillingType {
    pub fn from_wire(value: &str) -> Option<Self> {
        Some(match value.trim() {
            "PSMS" => Self::PremiumSms,
            "DCB" => Self::DirectCarrierBilling,
            _ => return None,
        })
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::PremiumSms => "PSMS",
            Self::DirectCarrierBilling => "DCB",
        }
    }
}
