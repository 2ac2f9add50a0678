#[cfg(test)]
mod test {
    use crate::prelude::*;
    use crate::tests::toolkit::sentence;
    use rand::{distributions::Alphanumeric, Rng};
    use std::str::FromStr;

    const HEX: &[u8] = b"0123456789ABCDEF";

    fn random_body<R: Rng>(rng: &mut R) -> String {
        let mut body = String::from("GP");
        // address field needs a sentence type
        body.push(rng.sample(Alphanumeric) as char);
        let size = rng.gen_range(3..70);
        for _ in 0..size {
            if rng.gen_bool(0.15) {
                body.push(',');
            } else {
                body.push(rng.sample(Alphanumeric) as char);
            }
        }
        body
    }

    #[test]
    fn reference_sentence() {
        let body = "GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
        assert_eq!(checksum(body), 0x47);
        assert!(Sentence::from_str(&format!("${}*47", body)).is_ok());
        match Sentence::from_str(&format!("${}*48", body)) {
            Err(Error::Checksum { supplied, computed }) => {
                assert_eq!(supplied, "48");
                assert_eq!(computed, 0x47);
            },
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn round_trip() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let body = random_body(&mut rng);
            let line = sentence(&body);
            let validated = Sentence::from_str(&line)
                .unwrap_or_else(|e| panic!("failed to validate \"{}\": {}", line, e));
            assert_eq!(validated.to_string(), line);

            // checksum is case insensitive
            let lowercase = format!("${}*{:02x}", body, checksum(&body));
            assert!(Sentence::from_str(&lowercase).is_ok(), "\"{}\"", lowercase);
        }
    }

    #[test]
    fn single_character_flip() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let body = random_body(&mut rng);
            let line = sentence(&body);

            // flip one of the two checksum digits
            let mut bytes = line.clone().into_bytes();
            let index = bytes.len() - rng.gen_range(1..=2);
            let original = bytes[index];
            let mut flipped = original;
            while flipped == original {
                flipped = HEX[rng.gen_range(0..HEX.len())];
            }
            bytes[index] = flipped;

            let corrupted = String::from_utf8(bytes).unwrap();
            let err = Sentence::from_str(&corrupted).unwrap_err();
            assert_eq!(err.kind(), Rejection::Checksum, "\"{}\"", corrupted);
        }
    }

    #[test]
    fn body_corruption() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let body = random_body(&mut rng);
            let line = sentence(&body);

            // any single byte substitution within the body is detected
            let mut bytes = line.clone().into_bytes();
            let index = rng.gen_range(1..=body.len());
            let original = bytes[index];
            let mut substitute = original;
            while substitute == original {
                substitute = rng.sample(Alphanumeric);
            }
            bytes[index] = substitute;

            let corrupted = String::from_utf8(bytes).unwrap();
            assert!(Sentence::from_str(&corrupted).is_err(), "\"{}\"", corrupted);
        }
    }
}
