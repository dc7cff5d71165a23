//! Country, carrier, service and campaign metadata actions.

use super::action::Action;
use super::normalize::{DecodeError, XmlNode};
use super::params::RequestParams;
use super::response::Payload;
use crate::domain::{
    ActionKind, ApplicationDataResponse, CampaignCountryInfo, CampaignInfoResponse,
    CarrierCountryInfo, CarrierInfo, CarriersResponse, Charges, CountriesResponse, CountryInfo,
    CountryInfoResponse, CountryListing, CurrencyInfo, GetApplicationData, GetCampaignInfo,
    GetCarriers, GetCountries, GetCountryInfo, GetHelpLine, GetServiceDetails, GetServices,
    GetTerms, HelpLineResponse, MsisdnInfo, OptinInfo, ServiceDetailsResponse, ServiceInfo,
    ServicesCountryInfo, ServicesResponse, Suppression, TermsInfo, TermsResponse,
    ValidationError,
};

impl Action for GetCountries {
    const KIND: ActionKind = ActionKind::GetCountries;
    type Response = CountriesResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("campaign_id", self.campaign_id.clone())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        let countries = tree
            .field("countries")?
            .optional_items("country")?
            .iter()
            .map(|country| {
                Ok(CountryListing {
                    country: CountryInfo {
                        code: country.attr("code")?,
                        title: country.attr("title")?,
                        title_local: country.attr("title_local")?,
                        continent: country.attr("continent_name")?,
                        language_code: country.attr("language_code")?,
                        text_direction: country.attr("text_direction")?,
                    },
                    network_lookup_available: country.attr("network_lookup_available")?,
                    currency: CurrencyInfo {
                        symbol: country.attr("currency_symbol")?,
                        symbol_local: country.attr("currency_symbol_local")?,
                        prefix: country.attr("currency_prefix")?,
                    },
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(CountriesResponse { countries })
    }
}

impl Action for GetCountryInfo {
    const KIND: ActionKind = ActionKind::GetCountryInfo;
    type Response = CountryInfoResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("country_code", &self.country_code)
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        let country = tree.field("country")?;
        let language = country.field("language")?;
        let msisdn = country.field("msisdn")?;
        let currency = country.field("currency")?;
        let support = country.field("support")?;
        let campaign_terms = country.field("terms")?.optional_items("campaign")?;
        let term = |idx: usize| {
            campaign_terms
                .get(idx)
                .and_then(XmlNode::as_text)
                .unwrap_or_default()
                .to_owned()
        };

        Ok(CountryInfoResponse {
            country: CountryInfo {
                code: country.attr("code")?,
                title: country.attr("title")?,
                title_local: country.attr("title_local")?,
                continent: country.field("continent")?.attr("name")?,
                language_code: language.attr("code")?,
                text_direction: language.attr("text_direction")?,
            },
            msisdn: MsisdnInfo {
                international_prefix: msisdn.attr("international_prefix")?,
                local_prefix: msisdn.attr("local_prefix")?,
                suffix: msisdn.attr("suffix")?,
                remember_allowed: msisdn.attr("remember_allowed")?,
                network_lookup_available: msisdn.attr("network_lookup_available")?,
                mo_reachable: msisdn.attr("mo_reachable")?,
                reference: msisdn.attr("reference")?,
            },
            currency: CurrencyInfo {
                symbol: currency.attr("symbol")?,
                symbol_local: currency.attr("symbol_local")?,
                prefix: currency.attr("prefix")?,
            },
            support_number: support.attr("number")?,
            support_email: support.attr("email")?,
            terms: TermsInfo {
                once_off: term(0),
                subscription: term(1),
                direct_bill: term(2),
            },
        })
    }
}

impl Action for GetCarriers {
    const KIND: ActionKind = ActionKind::GetCarriers;
    type Response = CarriersResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("country_code", &self.country_code)
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        let country = tree.field("country")?;
        let carriers = tree
            .field("carriers")?
            .optional_items("carrier")?
            .iter()
            .map(|carrier| {
                Ok(CarrierInfo {
                    code: carrier.attr("code")?,
                    title: carrier.attr("title")?,
                    tier: carrier.attr("tier")?,
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(CarriersResponse {
            country: CarrierCountryInfo {
                code: country.attr("code")?,
                lookup_available: country.attr("hlr_lookup")?,
                msisdn_local_prefix: country.attr("msisdn_local_prefix")?,
                msisdn_international_prefix: country.attr("msisdn_international_prefix")?,
                msisdn_suffix: country.attr("msisdn_suffix")?,
                msisdn_remember: country.attr("msisdn_remember")?,
            },
            carriers,
        })
    }
}

impl Action for GetServices {
    const KIND: ActionKind = ActionKind::GetServices;
    type Response = ServicesResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("campaign_id", self.campaign_id.clone())?;
        params.set_argument("country_code", &self.country_code)
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        let country = tree.field("country")?;

        let mut services = Vec::new();
        for short_code in country.optional_items("shortcode")? {
            let short_code_value = short_code.attr("code")?;
            for carrier in short_code.optional_items("carrier")? {
                let carrier_code = carrier.attr("code")?;
                let service_type = carrier.field("type")?;
                let type_name = service_type.attr("name")?;
                for service in service_type.optional_items("service")? {
                    let charges = service.field("charges")?;
                    services.push(ServiceInfo {
                        service_id: service.attr("id")?,
                        service_type: type_name.clone(),
                        carrier_code: carrier_code.clone(),
                        short_code: short_code_value.clone(),
                        price_point: service.field("pricepoint")?.attr("amount")?,
                        aggregator_ref: service.field("aggregator")?.attr("reference")?,
                        charges: Charges {
                            per_mo: charges.attr("per_mo")?,
                            per_mt: charges.attr("per_mt")?,
                            per_bulk_mt: charges.attr("per_bulk_mt")?,
                            per_failed_transaction: charges.attr("per_failed_trans")?,
                            per_network_lookup: charges.attr("network_lookup")?,
                        },
                    });
                }
            }
        }

        Ok(ServicesResponse {
            country: ServicesCountryInfo {
                country_code: country.attr("code")?,
                currency_symbol: country.attr("symbol")?,
                currency_code: country.attr("currency")?,
            },
            services,
        })
    }
}

fn decode_optin(node: &XmlNode) -> Result<OptinInfo, DecodeError> {
    Ok(OptinInfo {
        keyword: node.text("keyword")?,
        confirmation_text: node.text("confirmation_text")?,
        content_text: node.text("content_text")?,
    })
}

impl Action for GetServiceDetails {
    const KIND: ActionKind = ActionKind::GetServiceDetails;
    type Response = ServiceDetailsResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("campaign_id", self.campaign_id.clone())?;
        params.set_argument("carrier_code", self.carrier_code.clone())?;
        params.set_argument("price_point", self.price_point)?;
        params.set_argument("is_subscription", self.is_subscription)?;
        params.set_optional(
            "credit_amount",
            self.credit_amount.filter(|amount| amount.value() != 0.0),
        )
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        let suppression = match tree.optional_field("suppression")? {
            Some(node) => Some(Suppression {
                confirmation_mt: node.text("confirmation_mt")?,
                content_mt: node.text("content_mt")?,
            }),
            None => None,
        };

        Ok(ServiceDetailsResponse {
            service_id: tree.text("service_id")?,
            frequency_period: tree.optional_text("frequency_period")?,
            short_code: tree.text("short_code")?,
            country_code: tree.text("country_code")?,
            charge_type: tree.text("charge_type")?,
            terms: tree.optional_text("terms")?,
            currency_prefix: tree.text("currency_prefix")?,
            currency_symbol: tree.text("currency_symbol")?,
            language_code: tree.text("language_code")?,
            support_number: tree.text("support_number")?,
            total_messages: tree.number("total_messages")?,
            credit_amount: tree.text("credit_amount")?,
            credit_title: tree.text("credit_title")?,
            initial_optin: tree
                .optional_field("initialoptin")?
                .map(decode_optin)
                .transpose()?,
            secondary_optin: tree
                .optional_field("secondaryoptin")?
                .map(decode_optin)
                .transpose()?,
            suppression,
        })
    }
}

impl Action for GetCampaignInfo {
    const KIND: ActionKind = ActionKind::GetCampaignInfo;
    type Response = CampaignInfoResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("campaign_id", self.campaign_id.clone())?;
        params.set_optional("country_code", self.country_code.as_ref())?;
        if self.internal {
            params.set_argument("type", "internal")?;
        }
        Ok(())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        let campaign = tree.field("campaign")?;
        let countries = campaign
            .optional_items("country")?
            .iter()
            .map(|country| {
                Ok(CampaignCountryInfo {
                    code: country.attr("code")?,
                    brand_name: country.text("brand_name")?,
                    credit_title: country.text("credit_title")?,
                    send_confirmation: country.text("send_confirmation")?,
                    product_type: country.text("product_type")?,
                    adult_allowed: country.text("adult_allowed")?,
                    gambling_allowed: country.text("gambling_allowed")?,
                    accept_bitcoin: country.text("accept_bitcoin")?,
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(CampaignInfoResponse {
            id: campaign.attr("id")?,
            name: campaign.attr("name")?,
            countries,
        })
    }
}

impl Action for GetApplicationData {
    const KIND: ActionKind = ActionKind::GetApplicationData;
    type Response = ApplicationDataResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("campaign_id", self.campaign_id.clone())?;
        params.set_argument("country_code", &self.country_code)?;
        params.set_argument("carrier_code", self.carrier_code.clone())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        Ok(ApplicationDataResponse {
            campaign_id: tree.text("campaign_id")?,
            brand_id: tree.text("brand_id")?,
            application_name: tree.text("application_name")?,
            support_number: tree.text("support_number")?,
            currency_symbol: tree.text("currency_symbol")?,
            suppress_messages: tree.text("suppress_messages")?,
            credit_amount: tree.text("credit_amount")?,
            price_point: tree.text("price_point")?,
            short_code: tree.text("short_code")?,
            keyword_initial_optin: tree.optional_text("keyword_initialoptin")?,
            keyword_secondary_optin: tree.optional_text("keyword_secondaryoptin")?,
            is_subscription: tree.text("is_subscription")?,
            message_frequency: tree.optional_text("message_frequency")?,
            billing_frequency: tree.optional_text("billing_frequency")?,
            billing_frequency_name: tree.optional_text("billing_frequency_name")?,
            period_suffix: tree.optional_text("period_suffix")?,
            enable_mobile_tracker: tree.text("enable_mobile_tracker")?,
            show_skip_button: tree.text("show_skip_button")?,
            header: tree.optional_text("header")?,
            terms_full: tree.optional_text("terms_full")?,
            mo_reachable: tree.text("mo_reachable")?,
            show_confirmation_dialog: tree.text("show_confirmation_dialog")?,
            confirmation_text: tree.optional_text("confirmation_text")?,
        })
    }
}

impl Action for GetTerms {
    const KIND: ActionKind = ActionKind::GetTerms;
    type Response = TermsResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("country_code", &self.country_code)?;
        params.set_argument("output_type", self.output_type.clone())?;
        params.set_argument("purchase_type", self.purchase_type.clone())?;
        if let Some(service_id) = &self.service_id {
            params.set_argument("service_id", service_id.clone())?;
        }
        Ok(())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        let text = tree.field("country")?.text("text")?;
        Ok(TermsResponse {
            text: text.trim().to_owned(),
        })
    }
}

impl Action for GetHelpLine {
    const KIND: ActionKind = ActionKind::GetHelpLine;
    type Response = HelpLineResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("country_code", &self.country_code)
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        Ok(HelpLineResponse {
            help_line: tree.field("country")?.attr("helpline")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, CountryCode, ParamValue, ProductType, PublisherId};
    use crate::transport::check_response;

    fn params() -> RequestParams {
        RequestParams::new(&PublisherId::new("1").unwrap())
    }

    fn decode<A: Action>(raw: &str) -> Result<A::Response, DecodeError> {
        A::decode(check_response(raw).unwrap())
    }

    fn us() -> CountryCode {
        CountryCode::new("US").unwrap()
    }

    #[test]
    fn countries_single_entry_is_a_list() {
        let raw = r#"<response><countries>
            <country code="US" title="United States" title_local="United States"
                     continent_name="North America" language_code="en" text_direction="ltr"
                     network_lookup_available="1" currency_symbol="$"
                     currency_symbol_local="$" currency_prefix="1"/>
        </countries></response>"#;

        let response = decode::<GetCountries>(raw).unwrap();
        assert_eq!(response.countries.len(), 1);
        let listing = &response.countries[0];
        assert_eq!(listing.country.code, "US");
        assert_eq!(listing.country.continent, "North America");
        assert_eq!(listing.network_lookup_available, "1");
        assert_eq!(listing.currency.symbol, "$");
    }

    #[test]
    fn countries_empty_list() {
        let response = decode::<GetCountries>("<response><countries/></response>").unwrap();
        assert!(response.countries.is_empty());
    }

    #[test]
    fn country_info_reads_nested_attributes_and_terms() {
        let raw = r#"<response><country code="GB" title="United Kingdom" title_local="United Kingdom">
            <continent name="Europe"/>
            <language code="en" text_direction="ltr"/>
            <msisdn international_prefix="44" local_prefix="0" suffix="10" remember_allowed="1"
                    network_lookup_available="0" mo_reachable="1" reference="07xxx"/>
            <currency symbol="£" symbol_local="£" prefix="GBP"/>
            <support number="0800 123" email="help@example.com"/>
            <terms>
              <campaign>Once off terms</campaign>
              <campaign>Subscription terms</campaign>
              <campaign>Direct bill terms</campaign>
            </terms>
        </country></response>"#;

        let response = decode::<GetCountryInfo>(raw).unwrap();
        assert_eq!(response.country.continent, "Europe");
        assert_eq!(response.country.text_direction, "ltr");
        assert_eq!(response.msisdn.reference, "07xxx");
        assert_eq!(response.currency.symbol, "£");
        assert_eq!(response.support_email, "help@example.com");
        assert_eq!(response.terms.subscription, "Subscription terms");
        assert_eq!(response.terms.direct_bill, "Direct bill terms");
    }

    #[test]
    fn carriers_decode() {
        let raw = r#"<response>
            <country code="US" hlr_lookup="1" msisdn_local_prefix="" msisdn_international_prefix="1"
                     msisdn_suffix="10" msisdn_remember="1"/>
            <carriers>
              <carrier code="att" title="AT&amp;T" tier="1"/>
              <carrier code="tmo" title="T-Mobile" tier="1"/>
            </carriers>
        </response>"#;

        let response = decode::<GetCarriers>(raw).unwrap();
        assert_eq!(response.country.lookup_available, "1");
        assert_eq!(response.country.msisdn_local_prefix, "");
        assert_eq!(response.carriers.len(), 2);
        assert_eq!(response.carriers[0].title, "AT&T");
    }

    #[test]
    fn services_are_flattened_per_service() {
        let raw = r#"<response><country code="US" symbol="$" currency="USD">
            <shortcode code="12345">
              <carrier code="att">
                <type name="once_off">
                  <service id="1">
                    <pricepoint amount="1.99"/>
                    <aggregator reference="agg-1"/>
                    <charges per_mo="0.01" per_mt="0.02" per_bulk_mt="0.03"
                             per_failed_trans="0.04" network_lookup="0.05"/>
                  </service>
                  <service id="2">
                    <pricepoint amount="4.99"/>
                    <aggregator reference="agg-2"/>
                    <charges per_mo="0" per_mt="0" per_bulk_mt="0" per_failed_trans="0" network_lookup="0"/>
                  </service>
                </type>
              </carrier>
            </shortcode>
        </country></response>"#;

        let response = decode::<GetServices>(raw).unwrap();
        assert_eq!(response.country.currency_code, "USD");
        assert_eq!(response.services.len(), 2);

        let first = &response.services[0];
        assert_eq!(first.short_code, "12345");
        assert_eq!(first.carrier_code, "att");
        assert_eq!(first.service_type, "once_off");
        assert_eq!(first.price_point, "1.99");
        assert_eq!(first.charges.per_failed_transaction, "0.04");
        assert_eq!(response.services[1].service_id, "2");
    }

    #[test]
    fn service_details_encodes_amounts_and_flag() {
        let request = GetServiceDetails::new(
            12,
            "att",
            Amount::new(5.0).unwrap(),
            true,
            Some(Amount::new(0.0).unwrap()),
        )
        .unwrap();

        let mut params = params();
        request.encode(&mut params).unwrap();
        assert_eq!(params.get("price_point"), Some(&ParamValue::from("5.00")));
        assert_eq!(params.get("is_subscription").map(ParamValue::to_wire).as_deref(), Some("1"));
        assert!(!params.contains("credit_amount"));
    }

    #[test]
    fn service_details_optional_blocks() {
        let raw = r#"<response>
            <service_id>77</service_id>
            <frequency_period/>
            <short_code>12345</short_code>
            <country_code>US</country_code>
            <charge_type>once_off</charge_type>
            <terms>Some terms</terms>
            <currency_prefix>USD</currency_prefix>
            <currency_symbol>$</currency_symbol>
            <language_code>en</language_code>
            <support_number>1-800</support_number>
            <total_messages>1</total_messages>
            <credit_amount>100</credit_amount>
            <credit_title>coins</credit_title>
            <initialoptin>
              <keyword>YES</keyword>
              <confirmation_text>Reply YES</confirmation_text>
              <content_text>Thanks</content_text>
            </initialoptin>
            <secondaryoptin/>
            <suppression>
              <confirmation_mt>0</confirmation_mt>
              <content_mt>1</content_mt>
            </suppression>
        </response>"#;

        let response = decode::<GetServiceDetails>(raw).unwrap();
        assert_eq!(response.frequency_period, None);
        assert_eq!(response.terms.as_deref(), Some("Some terms"));
        assert_eq!(response.total_messages, 1);
        assert_eq!(
            response.initial_optin,
            Some(OptinInfo {
                keyword: "YES".to_owned(),
                confirmation_text: "Reply YES".to_owned(),
                content_text: "Thanks".to_owned(),
            })
        );
        assert_eq!(response.secondary_optin, None);
        assert_eq!(
            response.suppression.map(|s| s.content_mt).as_deref(),
            Some("1")
        );
    }

    #[test]
    fn campaign_info_requests_internal_type() {
        let mut params = params();
        GetCampaignInfo::new(9, Some(us()), true)
            .unwrap()
            .encode(&mut params)
            .unwrap();
        assert_eq!(params.get("type"), Some(&ParamValue::from("internal")));
        assert_eq!(params.get("country_code"), Some(&ParamValue::from("US")));

        let mut params = self::params();
        GetCampaignInfo::new(9, None, false)
            .unwrap()
            .encode(&mut params)
            .unwrap();
        assert!(!params.contains("type"));
        assert!(!params.contains("country_code"));
    }

    #[test]
    fn campaign_info_decodes_countries() {
        let raw = r#"<response><campaign id="9" name="Coins">
            <country code="US">
              <brand_name>Acme</brand_name>
              <credit_title>coins</credit_title>
              <send_confirmation>1</send_confirmation>
              <product_type>vc</product_type>
              <adult_allowed>0</adult_allowed>
              <gambling_allowed>0</gambling_allowed>
              <accept_bitcoin>0</accept_bitcoin>
            </country>
        </campaign></response>"#;

        let response = decode::<GetCampaignInfo>(raw).unwrap();
        assert_eq!(response.name, "Coins");
        assert_eq!(response.countries.len(), 1);
        assert_eq!(
            response.countries[0].product_type_kind(),
            Some(ProductType::VirtualCurrency)
        );
    }

    #[test]
    fn application_data_maps_empty_elements_to_none() {
        let raw = r#"<response>
            <campaign_id>9</campaign_id><brand_id>3</brand_id>
            <application_name>Coins</application_name><support_number>1-800</support_number>
            <currency_symbol>$</currency_symbol><suppress_messages>0</suppress_messages>
            <credit_amount>100</credit_amount><price_point>1.99</price_point>
            <short_code>12345</short_code>
            <keyword_initialoptin>GO</keyword_initialoptin><keyword_secondaryoptin/>
            <is_subscription>0</is_subscription>
            <message_frequency/><billing_frequency/><billing_frequency_name/><period_suffix/>
            <enable_mobile_tracker>0</enable_mobile_tracker><show_skip_button>1</show_skip_button>
            <header/><terms_full><![CDATA[<p>Terms</p>]]></terms_full>
            <mo_reachable>1</mo_reachable><show_confirmation_dialog>0</show_confirmation_dialog>
            <confirmation_text/>
        </response>"#;

        let response = decode::<GetApplicationData>(raw).unwrap();
        assert_eq!(response.keyword_initial_optin.as_deref(), Some("GO"));
        assert_eq!(response.keyword_secondary_optin, None);
        assert_eq!(response.message_frequency, None);
        assert_eq!(response.terms_full.as_deref(), Some("<p>Terms</p>"));
        assert_eq!(response.show_skip_button, "1");
        assert_eq!(response.confirmation_text, None);
    }

    #[test]
    fn terms_text_is_trimmed() {
        let raw = "<response><country><text>\n   Pay by phone.\n </text></country></response>";
        assert_eq!(decode::<GetTerms>(raw).unwrap().text, "Pay by phone.");

        let mut params = params();
        GetTerms::new(us(), "html", "subscription", Some(ParamValue::Int(0)))
            .unwrap()
            .encode(&mut params)
            .unwrap();
        assert_eq!(params.get("service_id"), Some(&ParamValue::Int(0)));
    }

    #[test]
    fn help_line_attribute() {
        let raw = r#"<response><country code="US" helpline="1-800-555-0100"/></response>"#;
        assert_eq!(decode::<GetHelpLine>(raw).unwrap().help_line, "1-800-555-0100");
    }

    #[test]
    fn missing_attribute_is_reported() {
        let raw = r#"<response><country code="US"/></response>"#;
        assert!(matches!(
            decode::<GetHelpLine>(raw),
            Err(DecodeError::MissingAttribute { attribute }) if attribute == "helpline"
        ));
    }
}
