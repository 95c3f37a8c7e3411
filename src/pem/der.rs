//! src/pem/der.rs
//! Minimal DER reader and private-key structure checks
//!
//! Only what encrypted keys need: definite lengths, low tag numbers, and a
//! shape check for the three private key encodings a decrypted PEM body can
//! hold. Values are never interpreted beyond small integers.

pub const TAG_INTEGER: u8 = 0x02;
pub const TAG_OCTET_STRING: u8 = 0x04;
pub const TAG_NULL: u8 = 0x05;
pub const TAG_OID: u8 = 0x06;
pub const TAG_SEQUENCE: u8 = 0x30;
pub const TAG_CONTEXT_0: u8 = 0xa0;
pub const TAG_CONTEXT_1: u8 = 0xa1;
pub const TAG_CONTEXT_1_PRIMITIVE: u8 = 0x81;

/// Cursor over a run of DER TLVs.
#[derive(Debug, Clone, Copy)]
pub struct DerReader<'a> {
    input: &'a [u8],
}

impl<'a> DerReader<'a> {
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    #[must_use]
    pub fn peek_tag(&self) -> Option<u8> {
        self.input.first().copied()
    }

    /// Read one TLV, returning its tag and contents.
    pub fn read_any(&mut self) -> Option<(u8, &'a [u8])> {
        let (&tag, rest) = self.input.split_first()?;
        if tag & 0x1f == 0x1f {
            return None; // high tag numbers never occur in key structures
        }

        let (&first, rest) = rest.split_first()?;
        let (len, rest) = match first {
            0x00..=0x7f => (usize::from(first), rest),
            0x81..=0x84 => {
                let n = usize::from(first & 0x7f);
                if rest.len() < n {
                    return None;
                }
                let (len_bytes, rest) = rest.split_at(n);
                let len = len_bytes
                    .iter()
                    .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));
                (len, rest)
            }
            _ => return None, // indefinite or oversized length
        };

        if rest.len() < len {
            return None;
        }
        let (value, rest) = rest.split_at(len);
        self.input = rest;
        Some((tag, value))
    }

    /// Read one TLV that must carry `tag`.
    pub fn read(&mut self, tag: u8) -> Option<&'a [u8]> {
        let mut ahead = *self;
        match ahead.read_any()? {
            (found, value) if found == tag => {
                *self = ahead;
                Some(value)
            }
            _ => None,
        }
    }

    /// Read a TLV with `tag` if it is next; leave the reader untouched otherwise.
    pub fn read_optional(&mut self, tag: u8) -> Option<&'a [u8]> {
        if self.peek_tag() == Some(tag) {
            self.read(tag)
        } else {
            None
        }
    }

    /// Read a non-negative INTEGER that fits in a `u64`.
    pub fn read_small_uint(&mut self) -> Option<u64> {
        let mut ahead = *self;
        let bytes = ahead.read(TAG_INTEGER)?;
        let (&head, _) = bytes.split_first()?;
        if head & 0x80 != 0 {
            return None;
        }
        let digits = if head == 0 { &bytes[1..] } else { bytes };
        if digits.len() > 8 {
            return None;
        }
        *self = ahead;
        Some(digits.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Read a non-empty INTEGER without interpreting it.
    pub fn read_integer(&mut self) -> Option<&'a [u8]> {
        let mut ahead = *self;
        let bytes = ahead.read(TAG_INTEGER)?;
        if bytes.is_empty() {
            return None;
        }
        *self = ahead;
        Some(bytes)
    }
}

/// Contents of the single TLV that spans all of `der`, if it carries `tag`.
#[must_use]
pub fn read_whole(der: &[u8], tag: u8) -> Option<&[u8]> {
    let mut reader = DerReader::new(der);
    let value = reader.read(tag)?;
    reader.is_empty().then_some(value)
}

/// The private key encodings recognised after decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFormat {
    /// PKCS#1 `RSAPrivateKey`.
    Pkcs1,
    /// PKCS#8 `PrivateKeyInfo` / `OneAsymmetricKey`.
    Pkcs8,
    /// SEC1 `ECPrivateKey`.
    Sec1,
}

impl KeyFormat {
    /// Identify `der`, trying PKCS#1, PKCS#8 and SEC1 in that order.
    #[must_use]
    pub fn detect(der: &[u8]) -> Option<Self> {
        if is_pkcs1(der).is_some() {
            Some(Self::Pkcs1)
        } else if is_pkcs8(der).is_some() {
            Some(Self::Pkcs8)
        } else if is_sec1(der).is_some() {
            Some(Self::Sec1)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pkcs1 => "PKCS#1",
            Self::Pkcs8 => "PKCS#8",
            Self::Sec1 => "SEC1",
        }
    }
}

impl std::fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// RSAPrivateKey ::= SEQUENCE { version, n, e, d, p, q, dP, dQ, qInv, otherPrimeInfos OPTIONAL }
fn is_pkcs1(der: &[u8]) -> Option<()> {
    let mut key = DerReader::new(read_whole(der, TAG_SEQUENCE)?);
    let version = key.read_small_uint()?;
    if version > 1 {
        return None;
    }
    for _ in 0..8 {
        key.read_integer()?;
    }
    if version == 1 {
        key.read_optional(TAG_SEQUENCE);
    }
    key.is_empty().then_some(())
}

// PrivateKeyInfo ::= SEQUENCE { version, AlgorithmIdentifier, OCTET STRING,
//                               [0] attributes OPTIONAL, [1] publicKey OPTIONAL }
fn is_pkcs8(der: &[u8]) -> Option<()> {
    let mut info = DerReader::new(read_whole(der, TAG_SEQUENCE)?);
    if info.read_small_uint()? > 1 {
        return None;
    }
    let mut algorithm = DerReader::new(info.read(TAG_SEQUENCE)?);
    if algorithm.read(TAG_OID)?.is_empty() {
        return None;
    }
    info.read(TAG_OCTET_STRING)?;
    info.read_optional(TAG_CONTEXT_0);
    if info.read_optional(TAG_CONTEXT_1_PRIMITIVE).is_none() {
        info.read_optional(TAG_CONTEXT_1);
    }
    info.is_empty().then_some(())
}

// ECPrivateKey ::= SEQUENCE { version(1), OCTET STRING, [0] params OPTIONAL, [1] publicKey OPTIONAL }
fn is_sec1(der: &[u8]) -> Option<()> {
    let mut key = DerReader::new(read_whole(der, TAG_SEQUENCE)?);
    if key.read_small_uint()? != 1 {
        return None;
    }
    key.read(TAG_OCTET_STRING)?;
    key.read_optional(TAG_CONTEXT_0);
    key.read_optional(TAG_CONTEXT_1);
    key.is_empty().then_some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
        let mut out = vec![tag];
        match content.len() {
            n @ 0..=0x7f => out.push(n as u8),
            n @ 0x80..=0xff => out.extend([0x81, n as u8]),
            n => out.extend([0x82, (n >> 8) as u8, n as u8]),
        }
        out.extend_from_slice(content);
        out
    }

    fn int(v: u8) -> Vec<u8> {
        tlv(TAG_INTEGER, &[v])
    }

    fn pkcs1(version: u8) -> Vec<u8> {
        let mut body = int(version);
        for i in 1..=8 {
            body.extend(int(i));
        }
        tlv(TAG_SEQUENCE, &body)
    }

    fn pkcs8() -> Vec<u8> {
        let algorithm = [tlv(TAG_OID, &[0x2a, 0x86, 0x48]), tlv(TAG_NULL, &[])].concat();
        let body = [
            int(0),
            tlv(TAG_SEQUENCE, &algorithm),
            tlv(TAG_OCTET_STRING, &pkcs1(0)),
        ]
        .concat();
        tlv(TAG_SEQUENCE, &body)
    }

    fn sec1() -> Vec<u8> {
        let body = [
            int(1),
            tlv(TAG_OCTET_STRING, &[7u8; 32]),
            tlv(TAG_CONTEXT_0, &tlv(TAG_OID, &[0x2a, 0x86])),
        ]
        .concat();
        tlv(TAG_SEQUENCE, &body)
    }

    #[test]
    fn detects_each_format() {
        assert_eq!(KeyFormat::detect(&pkcs1(0)), Some(KeyFormat::Pkcs1));
        assert_eq!(KeyFormat::detect(&pkcs8()), Some(KeyFormat::Pkcs8));
        assert_eq!(KeyFormat::detect(&sec1()), Some(KeyFormat::Sec1));
    }

    #[test]
    fn rejects_trailing_bytes_and_garbage() {
        let mut trailing = pkcs1(0);
        trailing.push(0);
        assert_eq!(KeyFormat::detect(&trailing), None);
        assert_eq!(KeyFormat::detect(b"definitely not DER"), None);
        assert_eq!(KeyFormat::detect(&[]), None);
        assert_eq!(KeyFormat::detect(&tlv(TAG_SEQUENCE, &[])), None);
    }

    #[test]
    fn pkcs1_version_rules() {
        assert_eq!(KeyFormat::detect(&pkcs1(2)), None);

        let mut multi = pkcs1(1);
        let body = [&multi[2..], &tlv(TAG_SEQUENCE, &[])[..]].concat();
        multi = tlv(TAG_SEQUENCE, &body);
        assert_eq!(KeyFormat::detect(&multi), Some(KeyFormat::Pkcs1));
    }

    #[test]
    fn long_form_lengths() {
        let value = vec![0x55u8; 300];
        let encoded = tlv(TAG_OCTET_STRING, &value);
        assert_eq!(&encoded[..4], &[TAG_OCTET_STRING, 0x82, 0x01, 0x2c]);
        assert_eq!(read_whole(&encoded, TAG_OCTET_STRING), Some(&value[..]));
    }

    #[test]
    fn indefinite_and_truncated_lengths_fail() {
        assert!(DerReader::new(&[TAG_SEQUENCE, 0x80, 0, 0]).read_any().is_none());
        assert!(DerReader::new(&[TAG_OCTET_STRING, 0x05, 1, 2]).read_any().is_none());
        assert!(DerReader::new(&[TAG_OCTET_STRING, 0x82, 0x01]).read_any().is_none());
    }

    #[test]
    fn small_uints() {
        let encoded = [tlv(TAG_INTEGER, &[0x00, 0x80]), tlv(TAG_INTEGER, &[0x03, 0xe8])].concat();
        let mut reader = DerReader::new(&encoded);
        assert_eq!(reader.read_small_uint(), Some(128));
        assert_eq!(reader.read_small_uint(), Some(1000));
        assert!(reader.is_empty());

        let negative = tlv(TAG_INTEGER, &[0xff]);
        let mut reader = DerReader::new(&negative);
        assert_eq!(reader.read_small_uint(), None);
        assert!(!reader.is_empty());
    }
}
