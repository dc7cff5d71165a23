//! Transport layer: wire-format details (signing, parameters, XML/CSV decoding).

mod action;
mod catalog;
mod normalize;
mod params;
mod response;
mod signature;
mod subscriber;
mod transaction;

pub use action::Action;
pub use normalize::{
    DecodeError, XmlMap, XmlNode, coerce_empty_to_null, coerce_to_sequence, is_plain_error,
    is_xml, parse_csv, xml_to_tree,
};
pub use params::RequestParams;
pub use response::{API_SUCCESS, Payload, PayloadKind, ResponseError, check_response, classify};
pub use signature::{SIGNATURE_FIELD, sign};
