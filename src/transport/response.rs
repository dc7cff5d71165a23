use super::normalize::{DecodeError, XmlNode, is_plain_error, is_xml, xml_to_tree};

/// `error_code` value the API uses for success.
pub const API_SUCCESS: i64 = 0;

const ERROR_CODE_FIELD: &str = "error_code";
const MESSAGE_FIELD: &str = "message";

/// How a raw body was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Xml,
    PlainError,
    Text,
}

pub fn classify(raw: &str) -> PayloadKind {
    if is_xml(raw) {
        PayloadKind::Xml
    } else if is_plain_error(raw) {
        PayloadKind::PlainError
    } else {
        PayloadKind::Text
    }
}

/// A response body that passed the error checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Xml(XmlNode),
    /// Anything that is not XML, e.g. the CSV transaction report.
    Text(String),
}

impl Payload {
    pub fn into_xml(self) -> Result<XmlNode, DecodeError> {
        match self {
            Self::Xml(tree) => Ok(tree),
            Self::Text(_) => Err(DecodeError::UnexpectedPayload { expected: "XML" }),
        }
    }

    pub fn into_text(self) -> Result<String, DecodeError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Xml(_) => Err(DecodeError::UnexpectedPayload { expected: "text" }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("API error {code}: {}", .message.as_deref().unwrap_or("no message"))]
    Api { code: i64, message: Option<String> },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Parse a raw body and surface any error it reports.
pub fn check_response(raw: &str) -> Result<Payload, ResponseError> {
    match classify(raw) {
        PayloadKind::Xml => {
            let tree = xml_to_tree(raw)?;
            check_xml_error(&tree)?;
            Ok(Payload::Xml(tree))
        }
        PayloadKind::PlainError => Err(plain_error(raw)),
        PayloadKind::Text => Ok(Payload::Text(raw.to_owned())),
    }
}

fn check_xml_error(tree: &XmlNode) -> Result<(), ResponseError> {
    let Some(map) = tree.as_map() else {
        return Ok(());
    };
    if map.child(ERROR_CODE_FIELD).is_none() {
        return Ok(());
    }

    let code = tree.number::<i64>(ERROR_CODE_FIELD)?;
    if code == API_SUCCESS {
        return Ok(());
    }
    let message = tree.optional_text(MESSAGE_FIELD)?.filter(|m| !m.trim().is_empty());
    Err(ResponseError::Api { code, message })
}

fn plain_error(raw: &str) -> ResponseError {
    let (code, message) = raw.split_once(',').unwrap_or((raw, ""));
    match code.trim().parse::<i64>() {
        Ok(code) => {
            let message = message.trim();
            ResponseError::Api {
                code,
                message: (!message.is_empty()).then(|| message.to_owned()),
            }
        }
        Err(_) => ResponseError::Decode(DecodeError::UnexpectedPayload {
            expected: "<code>,<message>",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_by_leading_character_and_shape() {
        assert_eq!(classify("<response/>"), PayloadKind::Xml);
        assert_eq!(classify("20004,Failed"), PayloadKind::PlainError);
        assert_eq!(classify("a,b,c\n1,2,3\n"), PayloadKind::Text);
    }

    #[test]
    fn xml_error_code_is_surfaced() {
        let raw = "<response><error_code>20004</error_code><message>Failed</message></response>";
        match check_response(raw) {
            Err(ResponseError::Api { code, message }) => {
                assert_eq!(code, 20004);
                assert_eq!(message.as_deref(), Some("Failed"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn xml_error_without_message() {
        let raw = "<response><error_code>101</error_code><message/></response>";
        assert!(matches!(
            check_response(raw),
            Err(ResponseError::Api { code: 101, message: None })
        ));
    }

    #[test]
    fn success_sentinel_is_not_an_error() {
        let raw = "<response><error_code>0</error_code><help_line>1-800</help_line></response>";
        let tree = check_response(raw).unwrap().into_xml().unwrap();
        assert_eq!(tree.text("help_line").unwrap(), "1-800");
    }

    #[test]
    fn plain_text_error_is_surfaced() {
        match check_response("20004,Failed transaction") {
            Err(ResponseError::Api { code, message }) => {
                assert_eq!(code, 20004);
                assert_eq!(message.as_deref(), Some("Failed transaction"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_xml_is_a_decode_error() {
        assert!(matches!(
            check_response("<response><a></response>"),
            Err(ResponseError::Decode(DecodeError::Xml(_)))
        ));
    }

    #[test]
    fn csv_passes_through_as_text() {
        let payload = check_response("a,b,c\n1,2,3\n").unwrap();
        assert_eq!(payload.clone().into_text().unwrap(), "a,b,c\n1,2,3\n");
        assert!(matches!(
            payload.into_xml(),
            Err(DecodeError::UnexpectedPayload { .. })
        ));
    }
}
