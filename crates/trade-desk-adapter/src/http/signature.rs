/*
[INPUT]:  Decoded API secret, request line, optional request body
[OUTPUT]: Base64 HMAC-SHA256 signature and replayable body copy
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use std::fmt;
use std::io::{self, Read};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use reqwest::RequestBuilder;
use sha2::Sha256;

use crate::http::{Result, TradeDeskError};

type HmacSha256 = Hmac<Sha256>;

pub const ACCESS_KEY_HEADER: &str = "ACCESS-KEY";
pub const ACCESS_PASSPHRASE_HEADER: &str = "ACCESS-PASSPHRASE";
pub const ACCESS_TIMESTAMP_HEADER: &str = "ACCESS-TIMESTAMP";
pub const ACCESS_SIGN_HEADER: &str = "ACCESS-SIGN";

/// Signs requests with HMAC-SHA256 over `timestamp + method + path + body`.
#[derive(Clone)]
pub struct RequestSigner {
    mac: HmacSha256,
}

impl RequestSigner {
    /// Create a signer from the raw secret bytes.
    pub fn new(secret: &[u8]) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| TradeDeskError::Config(format!("invalid HMAC key: {e}")))?;
        Ok(Self { mac })
    }

    /// Create a signer from the base64 secret handed out by the exchange.
    pub fn from_base64(secret: &str) -> Result<Self> {
        let secret = BASE64.decode(secret)?;
        Self::new(&secret)
    }

    /// Signature for an in-memory body.
    pub fn sign(&self, timestamp: &str, method: &str, request_path: &str, body: &[u8]) -> String {
        let mut mac = self.request_line_mac(timestamp, method, request_path);
        mac.update(body);
        BASE64.encode(mac.finalize().into_bytes())
    }

    /// Signature for a streamed body.
    ///
    /// The body is read once through a tee; the returned buffer holds every
    /// byte that went into the digest and is what must be transmitted.
    pub fn sign_reader<R: Read>(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        body: Option<R>,
    ) -> io::Result<(String, Option<Vec<u8>>)> {
        let mut mac = self.request_line_mac(timestamp, method, request_path);

        let body = match body {
            Some(reader) => {
                let mut tee = TeeReader::new(reader, &mut mac);
                io::copy(&mut tee, &mut io::sink())?;
                Some(tee.into_buffer())
            }
            None => None,
        };

        Ok((BASE64.encode(mac.finalize().into_bytes()), body))
    }

    fn request_line_mac(&self, timestamp: &str, method: &str, request_path: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(timestamp.as_bytes());
        mac.update(method.as_bytes());
        mac.update(request_path.as_bytes());
        mac
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

/// Reader that feeds every byte it yields into a MAC and keeps a copy.
struct TeeReader<'a, R> {
    inner: R,
    mac: &'a mut HmacSha256,
    buffer: Vec<u8>,
}

impl<'a, R: Read> TeeReader<'a, R> {
    fn new(inner: R, mac: &'a mut HmacSha256) -> Self {
        Self {
            inner,
            mac,
            buffer: Vec::new(),
        }
    }

    fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }
}

impl<R: Read> Read for TeeReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        let chunk = &buf[..read];
        self.mac.update(chunk);
        self.buffer.extend_from_slice(chunk);
        Ok(read)
    }
}

/// Authentication headers for a single request.
///
/// The timestamp is part of the signed message, so a set of headers is only
/// good for the request it was produced for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub key: String,
    pub passphrase: String,
    pub timestamp: String,
    pub signature: String,
}

impl AuthHeaders {
    pub fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(ACCESS_KEY_HEADER, &self.key)
            .header(ACCESS_PASSPHRASE_HEADER, &self.passphrase)
            .header(ACCESS_TIMESTAMP_HEADER, &self.timestamp)
            .header(ACCESS_SIGN_HEADER, &self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my-secret";

    fn signer() -> RequestSigner {
        RequestSigner::new(SECRET).unwrap()
    }

    fn reference(message: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET).unwrap();
        mac.update(message);
        BASE64.encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_sign_matches_single_concatenated_message() {
        let signature = signer().sign("1700000000", "GET", "/products/BTC-USD/ticker", b"");
        assert_eq!(
            signature,
            reference(b"1700000000GET/products/BTC-USD/ticker")
        );
    }

    #[test]
    fn test_sign_covers_body_in_same_digest() {
        let body = br#"{"type":"limit"}"#;
        let signature = signer().sign("1700000000", "POST", "/orders", body);

        let mut message = b"1700000000POST/orders".to_vec();
        message.extend_from_slice(body);
        assert_eq!(signature, reference(&message));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let signer = signer();
        let first = signer.sign("1700000000", "POST", "/orders", b"{}");
        let second = signer.sign("1700000000", "POST", "/orders", b"{}");
        assert_eq!(first, second);
    }

    #[test]
    fn test_sign_changes_with_any_input() {
        let signer = signer();
        let base = signer.sign("1700000000", "POST", "/orders", b"{}");

        assert_ne!(base, signer.sign("1700000001", "POST", "/orders", b"{}"));
        assert_ne!(base, signer.sign("1700000000", "PUT", "/orders", b"{}"));
        assert_ne!(base, signer.sign("1700000000", "POST", "/orderz", b"{}"));
        assert_ne!(base, signer.sign("1700000000", "POST", "/orders", b"{ }"));

        let other_key = RequestSigner::new(b"my-secreT").unwrap();
        assert_ne!(base, other_key.sign("1700000000", "POST", "/orders", b"{}"));
    }

    #[test]
    fn test_sign_reader_leaves_body_intact() {
        let body = br#"{"product_id":"BTC-USD","side":"buy","size":"0.01"}"#;
        let (signature, replay) = signer()
            .sign_reader("1700000000", "POST", "/orders", Some(&body[..]))
            .unwrap();

        assert_eq!(replay.as_deref(), Some(&body[..]));
        assert_eq!(signature, signer().sign("1700000000", "POST", "/orders", body));
    }

    #[test]
    fn test_sign_reader_handles_chunked_reads() {
        let body: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let reader = io::Cursor::new(body.clone()).chain(io::Cursor::new(Vec::new()));

        let (signature, replay) = signer()
            .sign_reader("1700000000", "POST", "/orders", Some(reader))
            .unwrap();

        assert_eq!(replay, Some(body.clone()));
        assert_eq!(signature, signer().sign("1700000000", "POST", "/orders", &body));
    }

    #[test]
    fn test_sign_reader_without_body() {
        let (signature, replay) = signer()
            .sign_reader::<&[u8]>("1700000000", "GET", "/products/BTC-USD/ticker", None)
            .unwrap();

        assert!(replay.is_none());
        assert_eq!(
            signature,
            reference(b"1700000000GET/products/BTC-USD/ticker")
        );
    }

    #[test]
    fn test_from_base64_decodes_secret() {
        let signer = RequestSigner::from_base64("bXktc2VjcmV0").unwrap();
        assert_eq!(
            signer.sign("1", "GET", "/", b""),
            reference(b"1GET/")
        );
    }

    #[test]
    fn test_from_base64_rejects_malformed_secret() {
        let err = RequestSigner::from_base64("not base64!").unwrap_err();
        assert!(matches!(err, TradeDeskError::InvalidSecret(_)));
    }

    #[test]
    fn test_debug_hides_key_material() {
        let rendered = format!("{:?}", signer());
        assert_eq!(rendered, "RequestSigner { .. }");
    }
}
