use crate::domain::validation::ValidationError;
use crate::domain::value::{Amount, CountryCode, Msisdn, ParamValue};

fn required(field: &'static str, value: impl Into<ParamValue>) -> Result<ParamValue, ValidationError> {
    let value = value.into();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value)
}

fn present(
    field: &'static str,
    value: Option<ParamValue>,
) -> Result<Option<ParamValue>, ValidationError> {
    value.map(|value| required(field, value)).transpose()
}

#[derive(Debug, Clone, Default)]
pub struct InitiateTransactionOptions {
    pub transaction_ref: Option<String>,
    pub price_point: Option<Amount>,
    pub zip_code: Option<String>,
    pub session_id: Option<String>,
    pub browser_user_agent: Option<String>,
    pub thank_you_url: Option<String>,
}

/// Start a purchase for a subscriber (`initiateTransaction`).
#[derive(Debug, Clone)]
pub struct InitiateTransaction {
    pub(crate) service_id: ParamValue,
    pub(crate) msisdn: Msisdn,
    pub(crate) consumer_id: ParamValue,
    pub(crate) credit_amount: ParamValue,
    pub(crate) options: InitiateTransactionOptions,
}

impl InitiateTransaction {
    pub fn new(
        service_id: impl Into<ParamValue>,
        msisdn: Msisdn,
        consumer_id: impl Into<ParamValue>,
        credit_amount: impl Into<ParamValue>,
        options: InitiateTransactionOptions,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            service_id: required("service_id", service_id)?,
            msisdn,
            consumer_id: required("consumer_id", consumer_id)?,
            credit_amount: required("credit_amount", credit_amount)?,
            options,
        })
    }
}

/// Fetch the confirmation state of a transaction group (`verifyTransaction`).
///
/// At least one of `transaction_group_id` and `transaction_id` is required.
#[derive(Debug, Clone)]
pub struct VerifyTransaction {
    pub(crate) service_id: ParamValue,
    pub(crate) transaction_group_id: Option<ParamValue>,
    pub(crate) transaction_id: Option<ParamValue>,
}

impl VerifyTransaction {
    pub const LOOKUP_FIELDS: &'static [&'static str] = &["transaction_group_id", "transaction_id"];

    pub fn new(
        service_id: impl Into<ParamValue>,
        transaction_group_id: Option<ParamValue>,
        transaction_id: Option<ParamValue>,
    ) -> Result<Self, ValidationError> {
        let service_id = required("service_id", service_id)?;
        if transaction_group_id.is_none() && transaction_id.is_none() {
            return Err(ValidationError::MissingOneOf {
                fields: Self::LOOKUP_FIELDS,
            });
        }
        Ok(Self {
            service_id,
            transaction_group_id: present("transaction_group_id", transaction_group_id)?,
            transaction_id: present("transaction_id", transaction_id)?,
        })
    }

    pub fn for_group(
        service_id: impl Into<ParamValue>,
        transaction_group_id: impl Into<ParamValue>,
    ) -> Result<Self, ValidationError> {
        Self::new(service_id, Some(transaction_group_id.into()), None)
    }

    pub fn for_transaction(
        service_id: impl Into<ParamValue>,
        transaction_id: impl Into<ParamValue>,
    ) -> Result<Self, ValidationError> {
        Self::new(service_id, None, Some(transaction_id.into()))
    }
}

/// Look up billing status by group id, transaction id or merchant reference
/// (`checkTransactionStatus`).
#[derive(Debug, Clone)]
pub struct CheckTransactionStatus {
    pub(crate) transaction_group_id: Option<ParamValue>,
    pub(crate) transaction_id: Option<ParamValue>,
    pub(crate) transaction_ref: Option<ParamValue>,
}

impl CheckTransactionStatus {
    pub const LOOKUP_FIELDS: &'static [&'static str] =
        &["transaction_group_id", "transaction_id", "trans_ref"];

    pub fn new(
        transaction_group_id: Option<ParamValue>,
        transaction_id: Option<ParamValue>,
        transaction_ref: Option<ParamValue>,
    ) -> Result<Self, ValidationError> {
        if transaction_group_id.is_none() && transaction_id.is_none() && transaction_ref.is_none()
        {
            return Err(ValidationError::MissingOneOf {
                fields: Self::LOOKUP_FIELDS,
            });
        }
        Ok(Self {
            transaction_group_id: present("transaction_group_id", transaction_group_id)?,
            transaction_id: present("transaction_id", transaction_id)?,
            transaction_ref: present("trans_ref", transaction_ref)?,
        })
    }

    pub fn for_group(transaction_group_id: impl Into<ParamValue>) -> Result<Self, ValidationError> {
        Self::new(Some(transaction_group_id.into()), None, None)
    }

    pub fn for_transaction(transaction_id: impl Into<ParamValue>) -> Result<Self, ValidationError> {
        Self::new(None, Some(transaction_id.into()), None)
    }

    pub fn for_reference(transaction_ref: impl Into<ParamValue>) -> Result<Self, ValidationError> {
        Self::new(None, None, Some(transaction_ref.into()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompleteTransactionOptions {
    pub pin_code: Option<String>,
    pub message_number: Option<u32>,
    pub message_count: Option<u32>,
}

/// Confirm a transaction group, e.g. with the PIN the subscriber received
/// (`completeTransaction`).
#[derive(Debug, Clone)]
pub struct CompleteTransaction {
    pub(crate) service_id: ParamValue,
    pub(crate) transaction_group_id: ParamValue,
    pub(crate) pin_code: Option<ParamValue>,
    pub(crate) message_number: Option<u32>,
    pub(crate) message_count: Option<u32>,
}

impl CompleteTransaction {
    pub fn new(
        service_id: impl Into<ParamValue>,
        transaction_group_id: impl Into<ParamValue>,
        options: CompleteTransactionOptions,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            service_id: required("service_id", service_id)?,
            transaction_group_id: required("transaction_group_id", transaction_group_id)?,
            pin_code: present("pincode", options.pin_code.map(ParamValue::from))?,
            message_number: options.message_number,
            message_count: options.message_count,
        })
    }
}

/// Send the confirmation message again (`resendConfirmation`).
#[derive(Debug, Clone)]
pub struct ResendConfirmation {
    pub(crate) service_id: ParamValue,
    pub(crate) transaction_group_id: Option<ParamValue>,
    pub(crate) transaction_id: Option<ParamValue>,
}

impl ResendConfirmation {
    pub const LOOKUP_FIELDS: &'static [&'static str] = VerifyTransaction::LOOKUP_FIELDS;

    pub fn new(
        service_id: impl Into<ParamValue>,
        transaction_group_id: Option<ParamValue>,
        transaction_id: Option<ParamValue>,
    ) -> Result<Self, ValidationError> {
        if transaction_group_id.is_none() && transaction_id.is_none() {
            return Err(ValidationError::MissingOneOf {
                fields: Self::LOOKUP_FIELDS,
            });
        }
        Ok(Self {
            service_id: required("service_id", service_id)?,
            transaction_group_id: present("transaction_group_id", transaction_group_id)?,
            transaction_id: present("transaction_id", transaction_id)?,
        })
    }

    pub fn for_group(
        service_id: impl Into<ParamValue>,
        transaction_group_id: impl Into<ParamValue>,
    ) -> Result<Self, ValidationError> {
        Self::new(service_id, Some(transaction_group_id.into()), None)
    }

    pub fn for_transaction(
        service_id: impl Into<ParamValue>,
        transaction_id: impl Into<ParamValue>,
    ) -> Result<Self, ValidationError> {
        Self::new(service_id, None, Some(transaction_id.into()))
    }
}

/// Cancel a subscriber's recurring purchase (`processOptOut`).
#[derive(Debug, Clone)]
pub struct ProcessOptOut {
    pub(crate) user_id: ParamValue,
    pub(crate) transaction_group_id: ParamValue,
}

impl ProcessOptOut {
    pub fn new(
        user_id: impl Into<ParamValue>,
        transaction_group_id: impl Into<ParamValue>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id: required("user_id", user_id)?,
            transaction_group_id: required("transaction_group_id", transaction_group_id)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionHistoryOptions {
    pub country_code: Option<CountryCode>,
    pub report_status_code: Option<ParamValue>,
}

/// Bulk transaction report for a campaign and date range
/// (`getTransactionHistory`). The server answers with CSV.
#[derive(Debug, Clone)]
pub struct GetTransactionHistory {
    pub(crate) campaign_id: ParamValue,
    pub(crate) from_date: ParamValue,
    pub(crate) to_date: ParamValue,
    pub(crate) options: TransactionHistoryOptions,
}

impl GetTransactionHistory {
    pub fn new(
        campaign_id: impl Into<ParamValue>,
        from_date: impl Into<ParamValue>,
        to_date: impl Into<ParamValue>,
        options: TransactionHistoryOptions,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            campaign_id: required("campaign_id", campaign_id)?,
            from_date: required("from_date", from_date)?,
            to_date: required("to_date", to_date)?,
            options,
        })
    }
}

/// Simulate an inbound subscriber SMS; only meaningful against test services
/// (`spoofMO`).
#[derive(Debug, Clone)]
pub struct SpoofMo {
    pub(crate) msisdn: Msisdn,
    pub(crate) short_code: ParamValue,
    pub(crate) keyword: ParamValue,
}

impl SpoofMo {
    pub fn new(
        msisdn: Msisdn,
        short_code: impl Into<ParamValue>,
        keyword: impl Into<ParamValue>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            msisdn,
            short_code: required("short_code", short_code)?,
            keyword: required("keyword", keyword)?,
        })
    }
}

/// Countries a campaign is available in (`getCountries`).
#[derive(Debug, Clone)]
pub struct GetCountries {
    pub(crate) campaign_id: ParamValue,
}

impl GetCountries {
    pub fn new(campaign_id: impl Into<ParamValue>) -> Result<Self, ValidationError> {
        Ok(Self {
            campaign_id: required("campaign_id", campaign_id)?,
        })
    }
}

/// Locale, numbering plan, currency and support details of a country
/// (`getCountryInfo`).
#[derive(Debug, Clone)]
pub struct GetCountryInfo {
    pub(crate) country_code: CountryCode,
}

impl GetCountryInfo {
    pub fn new(country_code: CountryCode) -> Self {
        Self { country_code }
    }
}

/// Carriers operating in a country (`getCarriers`).
#[derive(Debug, Clone)]
pub struct GetCarriers {
    pub(crate) country_code: CountryCode,
}

impl GetCarriers {
    pub fn new(country_code: CountryCode) -> Self {
        Self { country_code }
    }
}

/// Billing services of a campaign in a country (`getServices`).
#[derive(Debug, Clone)]
pub struct GetServices {
    pub(crate) campaign_id: ParamValue,
    pub(crate) country_code: CountryCode,
}

impl GetServices {
    pub fn new(
        campaign_id: impl Into<ParamValue>,
        country_code: CountryCode,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            campaign_id: required("campaign_id", campaign_id)?,
            country_code,
        })
    }
}

/// Resolve the service matching a carrier and price point
/// (`getServiceDetails`).
#[derive(Debug, Clone)]
pub struct GetServiceDetails {
    pub(crate) campaign_id: ParamValue,
    pub(crate) carrier_code: ParamValue,
    pub(crate) price_point: Amount,
    pub(crate) is_subscription: bool,
    pub(crate) credit_amount: Option<Amount>,
}

impl GetServiceDetails {
    pub fn new(
        campaign_id: impl Into<ParamValue>,
        carrier_code: impl Into<ParamValue>,
        price_point: Amount,
        is_subscription: bool,
        credit_amount: Option<Amount>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            campaign_id: required("campaign_id", campaign_id)?,
            carrier_code: required("carrier_code", carrier_code)?,
            price_point,
            is_subscription,
            credit_amount,
        })
    }
}

/// Campaign branding and per-country settings (`getCampaignInfo`).
#[derive(Debug, Clone)]
pub struct GetCampaignInfo {
    pub(crate) campaign_id: ParamValue,
    pub(crate) country_code: Option<CountryCode>,
    pub(crate) internal: bool,
}

impl GetCampaignInfo {
    pub fn new(
        campaign_id: impl Into<ParamValue>,
        country_code: Option<CountryCode>,
        internal: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            campaign_id: required("campaign_id", campaign_id)?,
            country_code,
            internal,
        })
    }
}

/// Everything a payment page needs for one campaign, country and carrier
/// (`getApplicationData`).
#[derive(Debug, Clone)]
pub struct GetApplicationData {
    pub(crate) campaign_id: ParamValue,
    pub(crate) country_code: CountryCode,
    pub(crate) carrier_code: ParamValue,
}

impl GetApplicationData {
    pub fn new(
        campaign_id: impl Into<ParamValue>,
        country_code: CountryCode,
        carrier_code: impl Into<ParamValue>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            campaign_id: required("campaign_id", campaign_id)?,
            country_code,
            carrier_code: required("carrier_code", carrier_code)?,
        })
    }
}

/// Terms and conditions text (`getTerms`).
#[derive(Debug, Clone)]
pub struct GetTerms {
    pub(crate) country_code: CountryCode,
    pub(crate) output_type: ParamValue,
    pub(crate) purchase_type: ParamValue,
    pub(crate) service_id: Option<ParamValue>,
}

impl GetTerms {
    pub fn new(
        country_code: CountryCode,
        output_type: impl Into<ParamValue>,
        purchase_type: impl Into<ParamValue>,
        service_id: Option<ParamValue>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            country_code,
            output_type: required("output_type", output_type)?,
            purchase_type: required("purchase_type", purchase_type)?,
            service_id: present("service_id", service_id)?,
        })
    }
}

/// Consumer support phone number for a country (`getHelpLine`).
#[derive(Debug, Clone)]
pub struct GetHelpLine {
    pub(crate) country_code: CountryCode,
}

impl GetHelpLine {
    pub fn new(country_code: CountryCode) -> Self {
        Self { country_code }
    }
}

/// Resolve the subscriber number of a handset by IMEI (`getMSISDN`).
#[derive(Debug, Clone)]
pub struct GetMsisdn {
    pub(crate) imei: ParamValue,
}

impl GetMsisdn {
    pub fn new(imei: impl Into<ParamValue>) -> Result<Self, ValidationError> {
        Ok(Self {
            imei: required("imei", imei)?,
        })
    }
}

/// Check a subscriber number and resolve its network (`validateMSISDN`).
#[derive(Debug, Clone)]
pub struct ValidateMsisdn {
    pub(crate) country_code: CountryCode,
    pub(crate) msisdn: Msisdn,
}

impl ValidateMsisdn {
    pub fn new(country_code: CountryCode, msisdn: Msisdn) -> Self {
        Self {
            country_code,
            msisdn,
        }
    }
}
