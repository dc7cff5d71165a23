//! Purchase lifecycle actions.

use super::action::Action;
use super::normalize::{DecodeError, XmlNode, parse_csv};
use super::params::RequestParams;
use super::response::Payload;
use crate::domain::{
    ActionKind, CheckTransactionStatus, CheckTransactionStatusResponse, CompleteTransaction,
    CompleteTransactionResponse, GetTransactionHistory, InitiateTransaction,
    InitiateTransactionResponse, ParamValue, ProcessOptOut, ProcessOptOutResponse, ResendConfirmation,
    ResendConfirmationResponse, SpoofMo, SpoofMoResponse, TransactionConfirmation,
    TransactionHistoryResponse, TransactionStatusCode, TransactionStatusInfo, ValidationError,
    VerifyTransaction, VerifyTransactionResponse,
};

const TRANSACTION_ID_PREFIX: &str = "transaction_id_";

impl Action for InitiateTransaction {
    const KIND: ActionKind = ActionKind::InitiateTransaction;
    type Response = InitiateTransactionResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("service_id", self.service_id.clone())?;
        params.set_argument("msisdn", &self.msisdn)?;
        params.set_argument("consumer_id", self.consumer_id.clone())?;
        params.set_argument("credit_amount", self.credit_amount.clone())?;

        let options = &self.options;
        params.set_optional("trans_ref", options.transaction_ref.as_deref())?;
        params.set_optional(
            "price_point",
            options.price_point.filter(|amount| amount.value() != 0.0),
        )?;
        params.set_optional("zipcode", options.zip_code.as_deref())?;
        params.set_optional("session_id", options.session_id.as_deref())?;
        params.set_optional("browser_ua", options.browser_user_agent.as_deref())?;
        params.set_optional("thank_you_url", options.thank_you_url.as_deref())?;
        Ok(())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        let transaction_ids = match tree.as_map() {
            Some(map) => map
                .children()
                .filter(|(name, _)| name.starts_with(TRANSACTION_ID_PREFIX))
                .flat_map(|(name, node)| node.as_sequence().iter().map(move |item| (name, item)))
                .map(|(name, item)| {
                    item.as_text()
                        .map(str::to_owned)
                        .ok_or_else(|| DecodeError::UnexpectedShape {
                            field: name.to_owned(),
                            expected: "text",
                        })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(InitiateTransactionResponse {
            user_id: tree.text("user_id")?,
            transaction_group_id: tree.text("transaction_group_id")?,
            total_transactions: tree.number("total_transactions")?,
            transaction_ids,
            optin_method: tree.text("optin_method")?,
            billing_type: tree.text("billing_type")?,
            offportal_url: tree.optional_text("offportal_url")?,
        })
    }
}

fn encode_lookup(
    params: &mut RequestParams,
    service_id: &ParamValue,
    transaction_group_id: Option<&ParamValue>,
    transaction_id: Option<&ParamValue>,
) -> Result<(), ValidationError> {
    params.set_argument("service_id", service_id.clone())?;
    if let Some(group) = transaction_group_id {
        params.set_argument("transaction_group_id", group.clone())?;
    }
    if let Some(id) = transaction_id {
        params.set_argument("transaction_id", id.clone())?;
    }
    Ok(())
}

impl Action for VerifyTransaction {
    const KIND: ActionKind = ActionKind::VerifyTransaction;
    type Response = VerifyTransactionResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        encode_lookup(
            params,
            &self.service_id,
            self.transaction_group_id.as_ref(),
            self.transaction_id.as_ref(),
        )
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        let group = tree.field("transaction_group_id")?;
        let transactions = group
            .items("transaction_id")?
            .iter()
            .map(|item| {
                Ok(TransactionConfirmation {
                    transaction_id: item.attr("id")?,
                    confirmation: item.text("confirmation")?,
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(VerifyTransactionResponse {
            transaction_group_id: group.attr("id")?,
            transactions,
        })
    }
}

fn decode_status_info(item: &XmlNode) -> Result<TransactionStatusInfo, DecodeError> {
    Ok(TransactionStatusInfo {
        transaction_id: item.attr("id")?,
        merchant_reference: item.optional_text("merchant_reference")?,
        confirmation_status: item.text("confirmation_status")?,
        status_code: TransactionStatusCode::new(item.number("status_code")?),
        status_title: item.text("status_title")?,
        status_description: item.text("status_description")?,
        service_id: item.text("service_id")?,
        price_point: item.text("price_point")?,
        commodity_amount: item.text("commodity_amount")?,
    })
}

impl Action for CheckTransactionStatus {
    const KIND: ActionKind = ActionKind::CheckTransactionStatus;
    type Response = CheckTransactionStatusResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        if let Some(group) = &self.transaction_group_id {
            params.set_argument("transaction_group_id", group.clone())?;
        }
        if let Some(id) = &self.transaction_id {
            params.set_argument("transaction_id", id.clone())?;
        }
        if let Some(reference) = &self.transaction_ref {
            params.set_argument("trans_ref", reference.clone())?;
        }
        Ok(())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        let group = tree.field("transaction_group_id")?;
        let transactions = group
            .items("transaction_id")?
            .iter()
            .map(decode_status_info)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CheckTransactionStatusResponse {
            transaction_group_id: group.attr("id")?,
            total_price_point: group.attr("total_price_point")?,
            total_commodity_amount: group.attr("total_commodity_amount")?,
            transactions,
        })
    }
}

impl Action for CompleteTransaction {
    const KIND: ActionKind = ActionKind::CompleteTransaction;
    type Response = CompleteTransactionResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("service_id", self.service_id.clone())?;
        params.set_argument("transaction_group_id", self.transaction_group_id.clone())?;
        if let Some(pin) = &self.pin_code {
            params.set_argument("pincode", pin.clone())?;
        }
        params.set_optional("message_number", self.message_number)?;
        params.set_optional("message_count", self.message_count)?;
        Ok(())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        Ok(CompleteTransactionResponse {
            transaction_group_id: tree.text("transaction_group_id")?,
            confirmation: tree.text("confirmation")?,
        })
    }
}

impl Action for ResendConfirmation {
    const KIND: ActionKind = ActionKind::ResendConfirmation;
    type Response = ResendConfirmationResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        encode_lookup(
            params,
            &self.service_id,
            self.transaction_group_id.as_ref(),
            self.transaction_id.as_ref(),
        )
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        Ok(ResendConfirmationResponse {
            confirmation: tree.text("confirmation")?,
        })
    }
}

impl Action for ProcessOptOut {
    const KIND: ActionKind = ActionKind::ProcessOptOut;
    type Response = ProcessOptOutResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("user_id", self.user_id.clone())?;
        params.set_argument("transaction_group_id", self.transaction_group_id.clone())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        Ok(ProcessOptOutResponse {
            message: tree.text("message")?.trim().to_owned(),
        })
    }
}

impl Action for GetTransactionHistory {
    const KIND: ActionKind = ActionKind::GetTransactionHistory;
    type Response = TransactionHistoryResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("campaign_id", self.campaign_id.clone())?;
        params.set_argument("from_date", self.from_date.clone())?;
        params.set_argument("to_date", self.to_date.clone())?;
        params.set_optional("country_code", self.options.country_code.as_ref())?;
        params.set_optional("report_status_code", self.options.report_status_code.clone())?;
        Ok(())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let raw = payload.into_text()?;
        Ok(TransactionHistoryResponse {
            transactions: parse_csv(&raw)?,
        })
    }
}

impl Action for SpoofMo {
    const KIND: ActionKind = ActionKind::SpoofMo;
    type Response = SpoofMoResponse;

    fn encode(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        params.set_argument("msisdn", &self.msisdn)?;
        params.set_argument("short_code", self.short_code.clone())?;
        params.set_argument("keyword", self.keyword.clone())
    }

    fn decode(payload: Payload) -> Result<Self::Response, DecodeError> {
        let tree = payload.into_xml()?;
        Ok(SpoofMoResponse {
            outcome: tree.text("outcome")?,
        })
    }
}
