//! JSON-RPC 2.0 request and response envelopes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcError;

#[derive(Debug, Serialize)]
pub struct Request<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> Request<'a> {
    pub fn new(id: u64, method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<ErrorObject>,
}

/// Decode a response body into `T`. An error object wins over any result; an absent
/// result is read as `null`.
pub fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T, RpcError> {
    let response: Response =
        serde_json::from_slice(body).map_err(|e| RpcError::Decode(e.to_string()))?;
    if let Some(error) = response.error {
        return Err(RpcError::Node {
            code: error.code,
            message: error.message,
        });
    }
    serde_json::from_value(response.result).map_err(|e| RpcError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_shape() {
        let req = Request::new(7, "ledger.getFrontierMomentum", json!([]));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"jsonrpc": "2.0", "id": 7, "method": "ledger.getFrontierMomentum", "params": []})
        );
    }

    #[test]
    fn result_is_decoded() {
        let n: u64 = decode_response(br#"{"jsonrpc":"2.0","id":1,"result":42}"#).unwrap();
        assert_eq!(n, 42);
    }

    #[test]
    fn null_result_decodes_as_none_or_unit() {
        let none: Option<u64> = decode_response(br#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert_eq!(none, None);
        let () = decode_response(br#"{"jsonrpc":"2.0","id":1}"#).unwrap();
    }

    #[test]
    fn error_object_becomes_node_error() {
        let err = decode_response::<u64>(
            br#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"account-block from-block already received"}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RpcError::Node {
                code: -32000,
                message: "account-block from-block already received".into()
            }
        );
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            decode_response::<u64>(b"<html>bad gateway</html>"),
            Err(RpcError::Decode(_))
        ));
        assert!(matches!(
            decode_response::<u64>(br#"{"result":"not a number"}"#),
            Err(RpcError::Decode(_))
        ));
    }
}
