//! Failure reason decoding
//!
//! The engine reports call setup failures as a bare numeric code on a
//! `CallFailureReason` event. [`decode`] turns that code into the
//! vendor-documented description so the consumer's `CallEnd` carries a
//! usable diagnostic instead of an opaque integer.

/// Vendor-documented failure descriptions, indexed by code 1..=14.
const FAILURE_REASONS: [&str; 14] = [
    "Miscellaneous error",
    "User or phone number does not exist. Check that a prefix is entered \
     for the phone number, either in the form 003725555555 or +3725555555; \
     the form 3725555555 is incorrect.",
    "User is offline",
    "No proxy found",
    "Session terminated.",
    "No common codec found.",
    "Sound I/O error.",
    "Problem with remote sound device.",
    "Call blocked by recipient.",
    "Recipient not a friend.",
    "Current user not authorized by recipient.",
    "Sound recording error.",
    "Failure to call a commercial contact.",
    "Conference call has been dropped by the host. Note that this does not \
     normally indicate abnormal call termination. Call being dropped for \
     all the participants when the conference host leaves the call is \
     expected behaviour.",
];

/// Decode an engine failure code into its documented description.
///
/// Codes 1 through 14 map to the vendor table; code 0 and anything above
/// 14 decode to the empty string. Total over all `u32` values.
pub fn decode(code: u32) -> &'static str {
    match code {
        1..=14 => FAILURE_REASONS[(code - 1) as usize],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_number_text() {
        assert!(decode(2).starts_with("User or phone number does not exist"));
    }

    #[test]
    fn zero_decodes_empty() {
        assert_eq!(decode(0), "");
    }

    #[test]
    fn codes_above_table_decode_empty() {
        assert_eq!(decode(15), "");
        assert_eq!(decode(u32::MAX), "");
    }

    #[test]
    fn every_table_code_has_text() {
        for code in 1..=14 {
            assert!(!decode(code).is_empty(), "code {} missing text", code);
        }
    }
}
