//! src/pem/block.rs
//! PEM envelope parsing (RFC 1421 / RFC 7468, with encapsulated headers)

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::BruteError;

const BEGIN: &str = "-----BEGIN ";
const END: &str = "-----END ";
const DASHES: &str = "-----";

/// One decoded PEM block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    label: String,
    headers: Vec<(String, String)>,
    contents: Vec<u8>,
}

impl PemBlock {
    /// Parse the first PEM block in `input`. Text before the block is ignored.
    ///
    /// # Errors
    ///
    /// [`BruteError::Pem`] if there is no block, the END line is missing or
    /// mismatched, or the body is not valid base64.
    pub fn parse(input: &[u8]) -> Result<Self, BruteError> {
        let text = std::str::from_utf8(input)
            .map_err(|_| BruteError::Pem("key file is not valid UTF-8 text".into()))?;
        let mut lines = text.lines().map(str::trim_end);

        let label = lines
            .by_ref()
            .find_map(|line| {
                line.strip_prefix(BEGIN)
                    .and_then(|rest| rest.strip_suffix(DASHES))
            })
            .ok_or_else(|| BruteError::Pem("no PEM BEGIN line found".into()))?
            .to_string();

        let mut headers: Vec<(String, String)> = Vec::new();
        let mut body = String::new();
        let mut in_headers = true;
        let mut closed = false;

        for line in lines {
            if let Some(rest) = line.strip_prefix(END) {
                let end_label = rest.strip_suffix(DASHES).unwrap_or(rest);
                if end_label != label {
                    return Err(BruteError::Pem(format!(
                        "END label {end_label:?} does not match BEGIN label {label:?}"
                    )));
                }
                closed = true;
                break;
            }

            if in_headers {
                if line.trim().is_empty() {
                    in_headers = false;
                    continue;
                }
                if line.starts_with([' ', '\t']) {
                    if let Some((_, value)) = headers.last_mut() {
                        value.push_str(line.trim());
                        continue;
                    }
                }
                if let Some((name, value)) = line.split_once(':') {
                    headers.push((name.trim().to_string(), value.trim().to_string()));
                    continue;
                }
                in_headers = false;
            }

            body.extend(line.chars().filter(|c| !c.is_ascii_whitespace()));
        }

        if !closed {
            return Err(BruteError::Pem(format!("missing END line for {label:?}")));
        }

        let contents = STANDARD
            .decode(body.as_bytes())
            .map_err(|e| BruteError::Pem(format!("invalid base64 body: {e}")))?;

        Ok(Self {
            label,
            headers,
            contents,
        })
    }

    /// The block label, e.g. `RSA PRIVATE KEY`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value of the first header named `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The base64-decoded body.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}
