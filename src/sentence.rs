//! NMEA-0183 sentence framing and checksum verification
use std::str::FromStr;

use crate::{
    error::{Error, FormatError},
    talker::TalkerId,
};

/// Computes the NMEA checksum of given sentence body:
/// XOR of all bytes located between `$` and `*` (both excluded).
/// ```
/// use nmea_gnss::sentence::checksum;
/// let body = "GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
/// assert_eq!(checksum(body), 0x47);
/// ```
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |crc, b| crc ^ b)
}

/// [Sentence] is a framed and checksum verified NMEA line.
/// It can only be obtained by parsing (validating) a raw line.
/// ```
/// use std::str::FromStr;
/// use nmea_gnss::prelude::{Sentence, TalkerId};
///
/// let sentence = Sentence::from_str(
///     "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n")
///     .unwrap();
///
/// assert_eq!(sentence.talker(), TalkerId::GP);
/// assert_eq!(sentence.kind(), "GGA");
/// assert_eq!(sentence.field(1), "123519");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentence {
    talker: TalkerId,
    kind: String,
    fields: Vec<String>,
}

impl Sentence {
    /// Sentence source
    pub fn talker(&self) -> TalkerId {
        self.talker
    }
    /// Sentence type, like `GSV`
    pub fn kind(&self) -> &str {
        &self.kind
    }
    /// All comma separated fields. Index 0 is the address field (`GPGSV`).
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
    /// Returns field at given index, empty when out of range.
    /// This is convenient because short sentences are frequent:
    /// receivers tend to omit trailing empty fields.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.as_str()).unwrap_or("")
    }
    /// Number of fields, including the address field
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromStr for Sentence {
    type Err = Error;
    /// Validates one raw line, tolerating trailing whitespaces and CR/LF.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end();

        if !line.starts_with('$') {
            return Err(FormatError::MissingStartDelimiter.into());
        }

        if !line.is_ascii() {
            return Err(FormatError::NonAscii.into());
        }

        let offset = line
            .rfind('*')
            .ok_or(FormatError::MissingChecksumDelimiter)?;

        let (data, supplied) = line.split_at(offset);
        let supplied = &supplied[1..];
        let body = &data[1..];

        let computed = checksum(body);
        if !format!("{:02X}", computed).eq_ignore_ascii_case(supplied) {
            return Err(Error::Checksum {
                supplied: supplied.to_string(),
                computed,
            });
        }

        let fields = body.split(',').map(|f| f.to_string()).collect::<Vec<_>>();

        let address = &fields[0];
        if address.len() < 3 {
            return Err(FormatError::InvalidAddress(address.to_string()).into());
        }

        let talker = TalkerId::from_str(&address[..2])
            .map_err(|_| FormatError::InvalidAddress(address.to_string()))?;

        Ok(Self {
            talker,
            kind: address[2..].to_string(),
            fields,
        })
    }
}

impl std::fmt::Display for Sentence {
    /// Formats [Sentence] back to a valid NMEA line (without termination)
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let body = self.fields.join(",");
        write!(f, "${}*{:02X}", body, checksum(&body))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Rejection;

    const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";

    #[test]
    fn reference_checksum() {
        assert_eq!(
            checksum("GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,"),
            0x47
        );
        assert_eq!(checksum(""), 0);
    }
    #[test]
    fn validation() {
        let sentence = Sentence::from_str(GGA).unwrap();
        assert_eq!(sentence.talker(), TalkerId::GP);
        assert_eq!(sentence.kind(), "GGA");
        assert_eq!(sentence.len(), 15);
        assert_eq!(sentence.field(0), "GPGGA");
        assert_eq!(sentence.field(9), "545.4");
        assert_eq!(sentence.field(14), "");
        assert_eq!(sentence.field(15), "");
        assert_eq!(sentence.to_string(), GGA);
    }
    #[test]
    fn trailing_whitespaces() {
        for line in [
            format!("{}\r\n", GGA),
            format!("{}\n", GGA),
            format!("{}  ", GGA),
        ] {
            assert!(Sentence::from_str(&line).is_ok(), "rejected \"{}\"", line);
        }
    }
    #[test]
    fn lowercase_checksum() {
        let body = "GPTXT,01,01,02,ANTSTATUS=OK";
        let crc = format!("{:02x}", checksum(body));
        let line = format!("${}*{}", body, crc);
        assert!(Sentence::from_str(&line).is_ok());
    }
    #[test]
    fn checksum_mismatch() {
        let line = GGA.replace("*47", "*48");
        match Sentence::from_str(&line) {
            Err(Error::Checksum { supplied, computed }) => {
                assert_eq!(supplied, "48");
                assert_eq!(computed, 0x47);
            },
            other => panic!("unexpected result: {:?}", other),
        }
        // single digit checksums are not tolerated
        let body = "GPGSV,1,1,00,,,,";
        let line = format!("${}*{:X}", body, checksum(body) & 0x0f);
        let err = Sentence::from_str(&line).unwrap_err();
        assert_eq!(err.kind(), Rejection::Checksum);
    }
    #[test]
    fn framing_errors() {
        for (line, expected) in [
            (&GGA[1..], FormatError::MissingStartDelimiter),
            ("", FormatError::MissingStartDelimiter),
            (
                "$GPGGA,123519,4807.038,N",
                FormatError::MissingChecksumDelimiter,
            ),
        ] {
            match Sentence::from_str(line) {
                Err(Error::Format(e)) => assert_eq!(e, expected),
                other => panic!("\"{}\": unexpected result {:?}", line, other),
            }
        }
    }
    #[test]
    fn splits_on_last_delimiter() {
        // '*' in the payload is part of the checksummed body
        let body = "GPTXT,01,01,02,A*B";
        let line = format!("${}*{:02X}", body, checksum(body));
        let sentence = Sentence::from_str(&line).unwrap();
        assert_eq!(sentence.field(4), "A*B");
    }
    #[test]
    fn invalid_address() {
        let body = "GP,1,2";
        let line = format!("${}*{:02X}", body, checksum(body));
        match Sentence::from_str(&line) {
            Err(Error::Format(FormatError::InvalidAddress(address))) => {
                assert_eq!(address, "GP");
            },
            other => panic!("unexpected result {:?}", other),
        }
    }
    #[test]
    fn non_ascii() {
        let err = Sentence::from_str("$GPTXT,é*00").unwrap_err();
        assert_eq!(err.kind(), Rejection::Format);
    }
}
