//! Domain layer: strong types with validation and invariants (no I/O).

mod action;
mod request;
mod response;
mod validation;
mod value;

pub use action::ActionKind;
pub use request::{
    CheckTransactionStatus, CompleteTransaction, CompleteTransactionOptions, GetApplicationData,
    GetCampaignInfo, GetCarriers, GetCountries, GetCountryInfo, GetHelpLine, GetMsisdn,
    GetServiceDetails, GetServices, GetTerms, GetTransactionHistory, InitiateTransaction,
    InitiateTransactionOptions, ProcessOptOut, ResendConfirmation, SpoofMo,
    TransactionHistoryOptions, ValidateMsisdn, VerifyTransaction,
};
pub use response::{
    ApplicationDataResponse, CampaignCountryInfo, CampaignInfoResponse, CarrierCountryInfo,
    CarrierInfo, CarriersResponse, Charges, CheckTransactionStatusResponse,
    CompleteTransactionResponse, CountriesResponse, CountryInfo, CountryInfoResponse,
    CountryListing, CurrencyInfo, HelpLineResponse, InitiateTransactionResponse, MsisdnInfo,
    MsisdnLookupResponse, OptinInfo, ProcessOptOutResponse, ResendConfirmationResponse,
    ServiceDetailsResponse, ServiceInfo, ServicesCountryInfo, ServicesResponse, SpoofMoResponse,
    Suppression, TermsInfo, TermsResponse, TransactionConfirmation, TransactionHistoryResponse,
    TransactionStatusInfo, ValidateMsisdnResponse, VerifyTransactionResponse,
};
pub use validation::ValidationError;
pub use value::{
    Amount, ApiKey, BillingType, CountryCode, KnownTransactionStatus, Msisdn, OptinMethod,
    ParamValue, Password, ProductType, PublisherId, SourceTag, TransactionStatusCode, Username,
};
