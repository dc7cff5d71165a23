use std::fmt;

/// Every remote action the API exposes, keyed by its literal wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    InitiateTransaction,
    VerifyTransaction,
    CheckTransactionStatus,
    CompleteTransaction,
    ResendConfirmation,
    ProcessOptOut,
    GetTransactionHistory,
    SpoofMo,
    GetCountries,
    GetCountryInfo,
    GetCarriers,
    GetServices,
    GetServiceDetails,
    GetCampaignInfo,
    GetApplicationData,
    GetTerms,
    GetHelpLine,
    GetMsisdn,
    ValidateMsisdn,
}

impl ActionKind {
    /// Form field carrying the action name.
    pub const FIELD: &'static str = "action";

    pub const ALL: [Self; 19] = [
        Self::InitiateTransaction,
        Self::VerifyTransaction,
        Self::CheckTransactionStatus,
        Self::CompleteTransaction,
        Self::ResendConfirmation,
        Self::ProcessOptOut,
        Self::GetTransactionHistory,
        Self::SpoofMo,
        Self::GetCountries,
        Self::GetCountryInfo,
        Self::GetCarriers,
        Self::GetServices,
        Self::GetServiceDetails,
        Self::GetCampaignInfo,
        Self::GetApplicationData,
        Self::GetTerms,
        Self::GetHelpLine,
        Self::GetMsisdn,
        Self::ValidateMsisdn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::InitiateTransaction => "initiateTransaction",
            Self::VerifyTransaction => "verifyTransaction",
            Self::CheckTransactionStatus => "checkTransactionStatus",
            Self::CompleteTransaction => "completeTransaction",
            Self::ResendConfirmation => "resendConfirmation",
            Self::ProcessOptOut => "processOptOut",
            Self::GetTransactionHistory => "getTransactionHistory",
            Self::SpoofMo => "spoofMO",
            Self::GetCountries => "getCountries",
            Self::GetCountryInfo => "getCountryInfo",
            Self::GetCarriers => "getCarriers",
            Self::GetServices => "getServices",
            Self::GetServiceDetails => "getServiceDetails",
            Self::GetCampaignInfo => "getCampaignInfo",
            Self::GetApplicationData => "getApplicationData",
            Self::GetTerms => "getTerms",
            Self::GetHelpLine => "getHelpLine",
            Self::GetMsisdn => "getMSISDN",
            Self::ValidateMsisdn => "validateMSISDN",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether the server answers this action with CSV rather than XML.
    pub fn returns_csv(self) -> bool {
        matches!(self, Self::GetTransactionHistory)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::ActionKind;

    #[test]
    fn names_round_trip_and_are_unique() {
        let names: HashSet<_> = ActionKind::ALL.iter().map(|kind| kind.name()).collect();
        assert_eq!(names.len(), ActionKind::ALL.len());

        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ActionKind::from_name("sendSms"), None);
    }

    #[test]
    fn only_history_is_csv() {
        let csv: Vec<_> = ActionKind::ALL
            .into_iter()
            .filter(|kind| kind.returns_csv())
            .collect();
        assert_eq!(csv, vec![ActionKind::GetTransactionHistory]);
        assert_eq!(ActionKind::GetMsisdn.to_string(), "getMSISDN");
    }
}
