use std::collections::BTreeMap;

use crate::domain::value::{BillingType, OptinMethod, ProductType, TransactionStatusCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiateTransactionResponse {
    pub user_id: String,
    pub transaction_group_id: String,
    pub total_transactions: u32,
    /// Ids of the individual billing messages, in document order.
    pub transaction_ids: Vec<String>,
    pub optin_method: String,
    pub billing_type: String,
    pub offportal_url: Option<String>,
}

impl InitiateTransactionResponse {
    pub fn optin_method_kind(&self) -> Option<OptinMethod> {
        OptinMethod::from_wire(&self.optin_method)
    }

    pub fn billing_type_kind(&self) -> Option<BillingType> {
        BillingType::from_wire(&self.billing_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyTransactionResponse {
    pub transaction_group_id: String,
    pub transactions: Vec<TransactionConfirmation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionConfirmation {
    pub transaction_id: String,
    pub confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTransactionStatusResponse {
    pub transaction_group_id: String,
    pub total_price_point: String,
    pub total_commodity_amount: String,
    pub transactions: Vec<TransactionStatusInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionStatusInfo {
    pub transaction_id: String,
    pub merchant_reference: Option<String>,
    pub confirmation_status: String,
    pub status_code: TransactionStatusCode,
    pub status_title: String,
    pub status_description: String,
    pub service_id: String,
    pub price_point: String,
    pub commodity_amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTransactionResponse {
    pub transaction_group_id: String,
    pub confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendConfirmationResponse {
    pub confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptOutResponse {
    pub message: String,
}

/// Rows of the CSV transaction report, keyed by the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionHistoryResponse {
    pub transactions: Vec<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoofMoResponse {
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryInfo {
    pub code: String,
    pub title: String,
    pub title_local: String,
    pub continent: String,
    pub language_code: String,
    pub text_direction: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub symbol: String,
    pub symbol_local: String,
    pub prefix: String,
}

/// Numbering plan of a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsisdnInfo {
    pub international_prefix: String,
    pub local_prefix: String,
    pub suffix: String,
    pub remember_allowed: String,
    pub network_lookup_available: String,
    pub mo_reachable: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountriesResponse {
    pub countries: Vec<CountryListing>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryListing {
    pub country: CountryInfo,
    pub network_lookup_available: String,
    pub currency: CurrencyInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryInfoResponse {
    pub country: CountryInfo,
    pub msisdn: MsisdnInfo,
    pub currency: CurrencyInfo,
    pub support_number: String,
    pub support_email: String,
    pub terms: TermsInfo,
}

/// Terms text per purchase kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermsInfo {
    pub once_off: String,
    pub subscription: String,
    pub direct_bill: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarriersResponse {
    pub country: CarrierCountryInfo,
    pub carriers: Vec<CarrierInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierCountryInfo {
    pub code: String,
    pub lookup_available: String,
    pub msisdn_local_prefix: String,
    pub msisdn_international_prefix: String,
    pub msisdn_suffix: String,
    pub msisdn_remember: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierInfo {
    pub code: String,
    pub title: String,
    pub tier: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesResponse {
    pub country: ServicesCountryInfo,
    /// One entry per service, flattened across short codes and carriers.
    pub services: Vec<ServiceInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesCountryInfo {
    pub country_code: String,
    pub currency_symbol: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub service_id: String,
    pub service_type: String,
    pub carrier_code: String,
    pub short_code: String,
    pub price_point: String,
    pub aggregator_ref: String,
    pub charges: Charges,
}

/// Merchant-side fees of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charges {
    pub per_mo: String,
    pub per_mt: String,
    pub per_bulk_mt: String,
    pub per_failed_transaction: String,
    pub per_network_lookup: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDetailsResponse {
    pub service_id: String,
    pub frequency_period: Option<String>,
    pub short_code: String,
    pub country_code: String,
    pub charge_type: String,
    pub terms: Option<String>,
    pub currency_prefix: String,
    pub currency_symbol: String,
    pub language_code: String,
    pub support_number: String,
    pub total_messages: u32,
    pub credit_amount: String,
    pub credit_title: String,
    pub initial_optin: Option<OptinInfo>,
    pub secondary_optin: Option<OptinInfo>,
    pub suppression: Option<Suppression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptinInfo {
    pub keyword: String,
    pub confirmation_text: String,
    pub content_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suppression {
    pub confirmation_mt: String,
    pub content_mt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignInfoResponse {
    pub id: String,
    pub name: String,
    pub countries: Vec<CampaignCountryInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignCountryInfo {
    pub code: String,
    pub brand_name: String,
    pub credit_title: String,
    pub send_confirmation: String,
    pub product_type: String,
    pub adult_allowed: String,
    pub gambling_allowed: String,
    pub accept_bitcoin: String,
}

impl CampaignCountryInfo {
    pub fn product_type_kind(&self) -> Option<ProductType> {
        ProductType::from_wire(&self.product_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDataResponse {
    pub campaign_id: String,
    pub brand_id: String,
    pub application_name: String,
    pub support_number: String,
    pub currency_symbol: String,
    pub suppress_messages: String,
    pub credit_amount: String,
    pub price_point: String,
    pub short_code: String,
    pub keyword_initial_optin: Option<String>,
    pub keyword_secondary_optin: Option<String>,
    pub is_subscription: String,
    pub message_frequency: Option<String>,
    pub billing_frequency: Option<String>,
    pub billing_frequency_name: Option<String>,
    pub period_suffix: Option<String>,
    pub enable_mobile_tracker: String,
    pub show_skip_button: String,
    pub header: Option<String>,
    pub terms_full: Option<String>,
    pub mo_reachable: String,
    pub show_confirmation_dialog: String,
    pub confirmation_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermsResponse {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLineResponse {
    pub help_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsisdnLookupResponse {
    pub msisdn: String,
    pub country_code: String,
    pub carrier_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateMsisdnResponse {
    pub msisdn: String,
    pub country_code: String,
    pub network_id: String,
    pub network_code: String,
    pub network_title: String,
    pub network_tier_level: String,
}
