//! Typed Rust client for the Text2Pay premium-SMS / direct-carrier-billing API.
//!
//! The crate is split in three layers: a domain layer of strong types (request
//! and response values, validation), a transport layer for wire-format quirks
//! (request signing, XML/CSV decoding) and a small client layer performing the
//! HTTP call.
//!
//! Every remote action is a request type implementing [`Action`]; run it with
//! [`Text2PayClient::execute`].
//!
//! ```rust,no_run
//! use text2pay::{
//!     CheckTransactionStatus, Connection, KnownTransactionStatus, Text2PayClient, Text2PayError,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Text2PayError> {
//!     let connection = Connection::new("api-key", "1234", "merchant", "password")?;
//!     let client = Text2PayClient::new(connection)?;
//!
//!     let status = client
//!         .execute(CheckTransactionStatus::for_reference("order-42")?)
//!         .await?;
//!     for transaction in &status.transactions {
//!         if transaction.status_code.known_kind() == Some(KnownTransactionStatus::Billed) {
//!             println!("{} billed", transaction.transaction_id);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    Connection, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, LIB_ERROR_CONNECTIVITY, LIB_ERROR_INVALID_ARG,
    LIB_ERROR_UNKNOWN, Text2PayClient, Text2PayClientBuilder, Text2PayError,
};
pub use domain::{
    ActionKind, Amount, ApiKey, ApplicationDataResponse, BillingType, CampaignCountryInfo,
    CampaignInfoResponse, CarrierCountryInfo, CarrierInfo, CarriersResponse, Charges,
    CheckTransactionStatus, CheckTransactionStatusResponse, CompleteTransaction,
    CompleteTransactionOptions, CompleteTransactionResponse, CountriesResponse, CountryCode,
    CountryInfo, CountryInfoResponse, CountryListing, CurrencyInfo, GetApplicationData,
    GetCampaignInfo, GetCarriers, GetCountries, GetCountryInfo, GetHelpLine, GetMsisdn,
    GetServiceDetails, GetServices, GetTerms, GetTransactionHistory, HelpLineResponse,
    InitiateTransaction, InitiateTransactionOptions, InitiateTransactionResponse,
    KnownTransactionStatus, Msisdn, MsisdnInfo, MsisdnLookupResponse, OptinInfo, OptinMethod,
    ParamValue, Password, ProcessOptOut, ProcessOptOutResponse, ProductType, PublisherId,
    ResendConfirmation, ResendConfirmationResponse, ServiceDetailsResponse, ServiceInfo,
    ServicesCountryInfo, ServicesResponse, SourceTag, SpoofMo, SpoofMoResponse, Suppression,
    TermsInfo, TermsResponse, TransactionConfirmation, TransactionHistoryOptions,
    TransactionHistoryResponse, TransactionStatusCode, TransactionStatusInfo, Username,
    ValidateMsisdn, ValidateMsisdnResponse, ValidationError, VerifyTransaction,
    VerifyTransactionResponse,
};
pub use transport::{
    API_SUCCESS, Action, DecodeError, Payload, PayloadKind, RequestParams, ResponseError,
    SIGNATURE_FIELD, XmlMap, XmlNode, check_response, classify, coerce_empty_to_null,
    coerce_to_sequence, is_plain_error, is_xml, parse_csv, sign, xml_to_tree,
};
