use crate::wire::sample::Sample;

/// Byte marking the end of one wire message.
pub const TERMINATOR: u8 = b'.';

/// Frame parse failure. The raw message text travels with the error so the
/// host can log what was dropped; the bytes themselves are already consumed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed frame {0:?}")]
    Malformed(String),
}

/// Streaming decoder for the `"<angle>,<distance>."` wire format.
///
/// Feeds of arbitrary byte chunks are accumulated; every terminated message
/// is parsed exactly once, and an unterminated tail stays buffered across
/// calls with no cap. Never blocks, performs no I/O.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes currently buffered without a terminator.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Appends `chunk` and drains every terminated message, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<Sample, DecodeError>> {
        self.buffer.extend_from_slice(chunk);

        let mut outcomes = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == TERMINATOR) {
            let message: Vec<u8> = self.buffer.drain(..=pos).take(pos).collect();
            outcomes.push(parse_message(&message));
        }
        outcomes
    }
}

fn parse_message(raw: &[u8]) -> Result<Sample, DecodeError> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| DecodeError::Malformed(String::from_utf8_lossy(raw).into_owned()))?;
    let malformed = || DecodeError::Malformed(text.to_owned());

    // First comma only: a second comma stays in the distance field and
    // fails integer parsing below.
    let (angle, distance) = text.split_once(',').ok_or_else(malformed)?;
    let angle_deg = angle.trim().parse::<i32>().map_err(|_| malformed())?;
    let distance_cm = distance.trim().parse::<i32>().map_err(|_| malformed())?;

    Ok(Sample {
        angle_deg,
        distance_cm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::sample::SampleStore;

    fn sample(angle_deg: i32, distance_cm: i32) -> Sample {
        Sample {
            angle_deg,
            distance_cm,
        }
    }

    #[test]
    fn whole_frame_decodes() {
        let mut decoder = FrameDecoder::new();
        let outcomes = decoder.feed(b"045,012.");
        assert_eq!(outcomes, vec![Ok(sample(45, 12))]);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn byte_at_a_time_feed_matches_whole_frame() {
        let mut decoder = FrameDecoder::new();
        let mut outcomes = Vec::new();
        for byte in b"045,012." {
            outcomes.extend(decoder.feed(&[*byte]));
        }
        assert_eq!(outcomes, vec![Ok(sample(45, 12))]);
    }

    #[test]
    fn concatenated_messages_decode_in_order() {
        let mut decoder = FrameDecoder::new();
        let mut store = SampleStore::default();
        let outcomes = decoder.feed(b"010,005.020,999.");
        assert_eq!(outcomes, vec![Ok(sample(10, 5)), Ok(sample(20, 999))]);

        for outcome in outcomes.into_iter().flatten() {
            store.record(outcome);
        }
        assert_eq!(*store.current(), sample(20, 999));
    }

    #[test]
    fn malformed_frame_does_not_clobber_store() {
        let mut decoder = FrameDecoder::new();
        let mut store = SampleStore::default();
        store.record(sample(90, 20));

        let outcomes = decoder.feed(b"abc,xyz.");
        assert_eq!(
            outcomes,
            vec![Err(DecodeError::Malformed("abc,xyz".into()))]
        );
        assert_eq!(*store.current(), sample(90, 20));
    }

    #[test]
    fn extra_comma_contaminates_distance_field() {
        let mut decoder = FrameDecoder::new();
        let outcomes = decoder.feed(b"30,12,99.");
        assert_eq!(outcomes, vec![Err(DecodeError::Malformed("30,12,99".into()))]);
    }

    #[test]
    fn unterminated_tail_survives_across_feeds() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(b"07,1").is_empty());
        assert_eq!(decoder.pending(), 4);

        let outcomes = decoder.feed(b"5.");
        assert_eq!(outcomes, vec![Ok(sample(7, 15))]);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn fields_are_trimmed_before_parsing() {
        let mut decoder = FrameDecoder::new();
        let outcomes = decoder.feed(b" 120 , 33 .");
        assert_eq!(outcomes, vec![Ok(sample(120, 33))]);
    }

    #[test]
    fn signed_angle_parses() {
        let mut decoder = FrameDecoder::new();
        let outcomes = decoder.feed(b"-15,22.");
        assert_eq!(outcomes, vec![Ok(sample(-15, 22))]);
    }

    #[test]
    fn missing_comma_is_malformed() {
        let mut decoder = FrameDecoder::new();
        let outcomes = decoder.feed(b"4512.");
        assert_eq!(outcomes, vec![Err(DecodeError::Malformed("4512".into()))]);
    }

    #[test]
    fn empty_field_is_malformed() {
        let mut decoder = FrameDecoder::new();
        let outcomes = decoder.feed(b",7.");
        assert_eq!(outcomes, vec![Err(DecodeError::Malformed(",7".into()))]);
    }

    #[test]
    fn invalid_utf8_message_is_malformed_and_later_frames_survive() {
        let mut decoder = FrameDecoder::new();
        let outcomes = decoder.feed(b"\xff\xfe.090,010.");
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], Err(DecodeError::Malformed(_))));
        assert_eq!(outcomes[1], Ok(sample(90, 10)));
    }

    #[test]
    fn round_trip_through_encoder() {
        let mut decoder = FrameDecoder::new();
        let frame = sample(135, 27).to_wire();
        let outcomes = decoder.feed(frame.as_bytes());
        assert_eq!(outcomes, vec![Ok(sample(135, 27))]);
    }
}
