//! Subscriber number lookups.

use super::action::Action;
use super::normalize::DecodeError;
use super::params::RequestParams;
use super::response::Payload;
use crate::domain::{
    ActionKind, GetMsisdn, MsisdnLookupResponse, ValidateMsisdn, ValidateMsisdnResponse,
    ValidationError,
};

impl Action for GetMsisdn {
    const KIND: ActionKind = ActionKind::GetMsisdn;
    type Response = MsisdnLookupResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("imei", self.imei.clone())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        Ok(MsisdnLookupResponse {
            msisdn: tree.text("msisdn")?,
            country_code: tree.text("country_code")?,
            carrier_code: tree.text("carrier_code")?,
        })
    }
}

impl Action for ValidateMsisdn {
    const KIND: ActionKind = ActionKind::ValidateMsisdn;
    type Response = ValidateMsisdnResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("country_code", &self.country_code)?;
        params.set_argument("msisdn", &self.msisdn)
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        Ok(ValidateMsisdnResponse {
            msisdn: tree.text("msisdn")?,
            country_code: tree.text("country_code")?,
            network_id: tree.text("network_id")?,
            network_code: tree.text("network_code")?,
            network_title: tree.text("network_title")?,
            network_tier_level: tree.text("network_tierlevel")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CountryCode, Msisdn, ParamValue, PublisherId};
    use crate::transport::check_response;

    #[test]
    fn validate_msisdn_encodes_and_decodes() {
        let request = ValidateMsisdn::new(
            CountryCode::new("US").unwrap(),
            Msisdn::new("+1 555 123 4567".replace(' ', "")).unwrap(),
        );
        let mut params = RequestParams::new(&PublisherId::new("1").unwrap());
        request.encode(&mut params).unwrap();
        assert_eq!(params.get("msisdn"), Some(&ParamValue::from("15551234567")));

        let raw = r#"<response>
            <msisdn>15551234567</msisdn><country_code>US</country_code>
            <network_id>310</network_id><network_code>att</network_code>
            <network_title>AT&amp;T</network_title><network_tierlevel>1</network_tierlevel>
        </response>"#;
        let response = ValidateMsisdn::decode(check_response(raw).unwrap()).unwrap();
        assert_eq!(response.network_title, "AT&T");
        assert_eq!(response.network_tier_level, "1");
    }

    #[test]
    fn msisdn_lookup_decodes() {
        let raw = "<response><msisdn>447700900123</msisdn><country_code>GB</country_code><carrier_code>vodafone_uk</carrier_code></response>";
        let response = GetMsisdn::decode(check_response(raw).unwrap()).unwrap();
        assert_eq!(
            response,
            MsisdnLookupResponse {
                msisdn: "447700900123".to_owned(),
                country_code: "GB".to_owned(),
                carrier_code: "vodafone_uk".to_owned(),
            }
        );
    }

    #[test]
    fn empty_imei_is_rejected() {
        assert_eq!(
            GetMsisdn::new("").unwrap_err(),
            ValidationError::Empty { field: "imei" }
        );
    }
}
