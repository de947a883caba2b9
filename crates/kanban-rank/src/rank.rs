//! The `LexoRank` key type and its algebra.
//!
//! Canonical string form:
//!
//! ```text
//! <bucket> '|' <whole> ':' <frac>
//! ```
//!
//! - `bucket` is one digit `0`..`2`. Every key this crate generates lives in
//!   bucket `0`; parsing accepts the other buckets for legacy data, and all
//!   operations preserve the bucket of their input.
//! - `whole` is exactly six base-36 digits (`0-9a-z`).
//! - `frac` is zero or more base-36 digits with no trailing `0`, so each key
//!   has exactly one canonical spelling and string comparison of canonical
//!   keys coincides with numeric order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MalformedKey, RankError};

const BASE: u32 = 36;
const WHOLE_DIGITS: usize = 6;
/// `next`/`prev` advance by whole steps of this size, leaving room for
/// later insertions between consecutive appends.
const STEP: u32 = 8;
/// Value of the whole part `zzzzzz`.
const MAX_WHOLE: u32 = BASE.pow(WHOLE_DIGITS as u32) - 1;
const MAX_BUCKET: u8 = 2;

/// A totally ordered, densely insertable order key.
///
/// Field order matters: the derived `Ord` compares bucket, then whole part,
/// then fraction digits, which is exactly string comparison of the canonical
/// form.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LexoRank {
    bucket: u8,
    whole: u32,
    /// Base-36 digit values, canonical: no trailing zero.
    frac: Vec<u8>,
}

impl LexoRank {
    /// The smallest key, `0|000000:`.
    pub fn min() -> Self {
        Self {
            bucket: 0,
            whole: 0,
            frac: Vec::new(),
        }
    }

    /// The largest key, `0|zzzzzz:`. [`LexoRank::parse`] rejects anything
    /// that would sort above it.
    pub fn max() -> Self {
        Self {
            bucket: 0,
            whole: MAX_WHOLE,
            frac: Vec::new(),
        }
    }

    /// The key midway between [`LexoRank::min`] and [`LexoRank::max`],
    /// `0|hzzzzz:`.
    pub fn middle() -> Self {
        Self {
            bucket: 0,
            whole: MAX_WHOLE / 2,
            frac: Vec::new(),
        }
    }

    pub fn bucket(&self) -> u8 {
        self.bucket
    }

    /// A key strictly greater than `self`, chosen to leave room for further
    /// appends: the ceiling of the whole part advanced by a step of 8.
    /// Within a step of the top of the key space this falls back to
    /// bisection against the bucket maximum; at the maximum itself it
    /// saturates and returns `self` unchanged.
    pub fn next(&self) -> Self {
        if self.whole == MAX_WHOLE {
            return self.clone();
        }
        let ceil = if self.frac.is_empty() {
            self.whole
        } else {
            self.whole + 1
        };
        let stepped = ceil + STEP;
        if stepped >= MAX_WHOLE {
            let top = Self {
                bucket: self.bucket,
                whole: MAX_WHOLE,
                frac: Vec::new(),
            };
            return Self::midpoint(self, &top);
        }
        Self {
            bucket: self.bucket,
            whole: stepped,
            frac: Vec::new(),
        }
    }

    /// Mirror image of [`LexoRank::next`]: the whole part reduced by a step
    /// of 8, bisection against the bucket minimum near the bottom, and
    /// saturation at the minimum itself.
    pub fn prev(&self) -> Self {
        if self.whole == 0 && self.frac.is_empty() {
            return self.clone();
        }
        if self.whole <= STEP {
            let bottom = Self {
                bucket: self.bucket,
                whole: 0,
                frac: Vec::new(),
            };
            return Self::midpoint(&bottom, self);
        }
        Self {
            bucket: self.bucket,
            whole: self.whole - STEP,
            frac: Vec::new(),
        }
    }

    /// The digit-wise arithmetic mean of two distinct keys, extending
    /// precision by one digit when the gap is a single unit. Argument order
    /// does not matter. Fraction digits are unbounded, so repeated bisection
    /// never exhausts the key space.
    pub fn between(&self, other: &Self) -> Result<Self, RankError> {
        if self.bucket != other.bucket {
            return Err(RankError::NoKeyBetween {
                a: self.to_string(),
                b: other.to_string(),
                reason: "keys are in different buckets".to_string(),
            });
        }
        match self.cmp(other) {
            Ordering::Equal => Err(RankError::NoKeyBetween {
                a: self.to_string(),
                b: other.to_string(),
                reason: "keys are equal".to_string(),
            }),
            Ordering::Less => Ok(Self::midpoint(self, other)),
            Ordering::Greater => Ok(Self::midpoint(other, self)),
        }
    }

    /// Reconstructs a key from its persisted string form.
    pub fn parse(raw: &str) -> Result<Self, MalformedKey> {
        let err = |reason: &str| MalformedKey {
            raw: raw.to_string(),
            reason: reason.to_string(),
        };

        let bytes = raw.as_bytes();
        if bytes.len() < WHOLE_DIGITS + 3 {
            return Err(err("too short"));
        }
        let bucket = match bytes[0] {
            b @ b'0'..=b'2' => b - b'0',
            _ => return Err(err("bucket must be a digit 0-2")),
        };
        debug_assert!(bucket <= MAX_BUCKET);
        if bytes[1] != b'|' {
            return Err(err("expected `|` after the bucket"));
        }
        let mut whole = 0u32;
        for &b in &bytes[2..2 + WHOLE_DIGITS] {
            let Some(d) = digit_value(b) else {
                return Err(err("whole part must be six base-36 digits"));
            };
            whole = whole * BASE + u32::from(d);
        }
        if bytes[2 + WHOLE_DIGITS] != b':' {
            return Err(err("expected `:` after the whole part"));
        }
        let mut frac = Vec::with_capacity(bytes.len() - WHOLE_DIGITS - 3);
        for &b in &bytes[WHOLE_DIGITS + 3..] {
            let Some(d) = digit_value(b) else {
                return Err(err("fraction must be base-36 digits"));
            };
            frac.push(d);
        }
        if frac.last() == Some(&0) {
            return Err(err("fraction has a trailing zero"));
        }
        if whole == MAX_WHOLE && !frac.is_empty() {
            return Err(err("key sorts above the maximum"));
        }
        Ok(Self {
            bucket,
            whole,
            frac,
        })
    }

    /// Midpoint of `lo < hi` in the same bucket. Appends one half-base digit
    /// when the sum is odd, so the result is strictly between its inputs.
    fn midpoint(lo: &Self, hi: &Self) -> Self {
        debug_assert_eq!(lo.bucket, hi.bucket);
        debug_assert!(lo < hi);

        let frac_len = lo.frac.len().max(hi.frac.len());
        let lo_row = lo.digit_row(frac_len);
        let hi_row = hi.digit_row(frac_len);

        // Sum with one extra leading slot for the addition carry.
        let mut sum = vec![0u8; lo_row.len() + 1];
        let mut carry = 0u8;
        for i in (0..lo_row.len()).rev() {
            let s = lo_row[i] + hi_row[i] + carry;
            sum[i + 1] = s % BASE as u8;
            carry = s / BASE as u8;
        }
        sum[0] = carry;

        // Halve, most significant digit first.
        let mut mid = Vec::with_capacity(sum.len() + 1);
        let mut rem = 0u8;
        for &d in &sum {
            let cur = rem * BASE as u8 + d;
            mid.push(cur / 2);
            rem = cur % 2;
        }
        if rem != 0 {
            mid.push(BASE as u8 / 2);
        }
        // The carry slot of a mean of two in-range keys is always zero.
        debug_assert_eq!(mid[0], 0);

        let whole = mid[1..=WHOLE_DIGITS]
            .iter()
            .fold(0u32, |w, &d| w * BASE + u32::from(d));
        let mut frac = mid[WHOLE_DIGITS + 1..].to_vec();
        while frac.last() == Some(&0) {
            frac.pop();
        }
        Self {
            bucket: lo.bucket,
            whole,
            frac,
        }
    }

    /// Whole digits followed by the fraction, zero-padded to `frac_len`.
    fn digit_row(&self, frac_len: usize) -> Vec<u8> {
        let mut row = Vec::with_capacity(WHOLE_DIGITS + frac_len);
        row.extend_from_slice(&whole_digits(self.whole));
        row.extend_from_slice(&self.frac);
        row.resize(WHOLE_DIGITS + frac_len, 0);
        row
    }
}

fn whole_digits(mut whole: u32) -> [u8; WHOLE_DIGITS] {
    let mut digits = [0u8; WHOLE_DIGITS];
    for slot in digits.iter_mut().rev() {
        *slot = (whole % BASE) as u8;
        whole /= BASE;
    }
    digits
}

fn digit_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'z' => Some(b - b'a' + 10),
        _ => None,
    }
}

fn digit_char(d: u8) -> char {
    if d < 10 {
        (b'0' + d) as char
    } else {
        (b'a' + d - 10) as char
    }
}

impl fmt::Display for LexoRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|", self.bucket)?;
        for d in whole_digits(self.whole) {
            write!(f, "{}", digit_char(d))?;
        }
        write!(f, ":")?;
        for &d in &self.frac {
            write!(f, "{}", digit_char(d))?;
        }
        Ok(())
    }
}

impl fmt::Debug for LexoRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LexoRank({self})")
    }
}

impl FromStr for LexoRank {
    type Err = MalformedKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LexoRank::parse(s)
    }
}

impl TryFrom<String> for LexoRank {
    type Error = MalformedKey;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        LexoRank::parse(&s)
    }
}

impl From<LexoRank> for String {
    fn from(rank: LexoRank) -> String {
        rank.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(raw: &str) -> LexoRank {
        LexoRank::parse(raw).unwrap()
    }

    #[test]
    fn well_known_constants() {
        assert_eq!(LexoRank::min().to_string(), "0|000000:");
        assert_eq!(LexoRank::max().to_string(), "0|zzzzzz:");
        assert_eq!(LexoRank::middle().to_string(), "0|hzzzzz:");
        assert!(LexoRank::min() < LexoRank::middle());
        assert!(LexoRank::middle() < LexoRank::max());
    }

    #[test]
    fn parse_round_trips_canonical_keys() {
        for raw in ["0|000000:", "0|hzzzzz:i", "2|00000g:", "0|zzzzzy:0z"] {
            assert_eq!(rank(raw).to_string(), raw);
        }
    }

    #[test]
    fn parse_rejects_malformed_keys() {
        for (raw, fragment) in [
            ("", "too short"),
            ("0|00000:", "too short"),
            ("3|000000:", "bucket"),
            ("0-000000:", "after the bucket"),
            ("0|00000î:", "base-36"),
            ("0|000000;", "after the whole part"),
            ("0|000000:A", "fraction"),
            ("0|000000:10", "trailing zero"),
            ("0|zzzzzz:1", "above the maximum"),
        ] {
            let err = LexoRank::parse(raw).unwrap_err();
            assert!(
                err.reason.contains(fragment),
                "`{raw}`: expected {fragment:?} in {:?}",
                err.reason
            );
            assert_eq!(err.raw, raw);
        }
    }

    #[test]
    fn next_steps_by_eight() {
        assert_eq!(LexoRank::min().next().to_string(), "0|000008:");
        assert_eq!(LexoRank::min().next().next().to_string(), "0|00000g:");
        // Fractional input rounds up to the next whole before stepping.
        assert_eq!(rank("0|000004:i").next().to_string(), "0|00000d:");
    }

    #[test]
    fn next_is_strictly_greater_until_the_maximum() {
        let near_top = rank("0|zzzzzy:");
        let stepped = near_top.next();
        assert!(stepped > near_top);
        assert!(stepped < LexoRank::max());
        assert_eq!(LexoRank::max().next(), LexoRank::max());
    }

    #[test]
    fn prev_steps_by_eight() {
        assert_eq!(rank("0|00000g:").prev().to_string(), "0|000008:");
        assert_eq!(LexoRank::middle().prev().to_string(), "0|hzzzzr:");
    }

    #[test]
    fn prev_is_strictly_smaller_until_the_minimum() {
        let near_bottom = rank("0|000004:");
        let stepped = near_bottom.prev();
        assert!(stepped < near_bottom);
        assert!(stepped > LexoRank::min());

        let fractional = rank("0|000000:i");
        let below = fractional.prev();
        assert!(below < fractional);
        assert!(below > LexoRank::min());

        assert_eq!(LexoRank::min().prev(), LexoRank::min());
    }

    #[test]
    fn between_takes_the_midpoint() {
        let mid = LexoRank::min().between(&rank("0|000008:")).unwrap();
        assert_eq!(mid.to_string(), "0|000004:");
        // Adjacent wholes force a fraction digit.
        let tight = rank("0|000004:").between(&rank("0|000005:")).unwrap();
        assert_eq!(tight.to_string(), "0|000004:i");
    }

    #[test]
    fn between_ignores_argument_order() {
        let a = rank("0|00000g:");
        let b = rank("0|00000w:");
        assert_eq!(a.between(&b).unwrap(), b.between(&a).unwrap());
    }

    #[test]
    fn between_refuses_equal_keys_and_mixed_buckets() {
        let a = rank("0|00000g:");
        assert!(matches!(
            a.between(&a),
            Err(RankError::NoKeyBetween { .. })
        ));
        let other_bucket = rank("1|00000g:");
        assert!(matches!(
            a.between(&other_bucket),
            Err(RankError::NoKeyBetween { .. })
        ));
    }

    #[test]
    fn fifty_bisections_stay_strictly_ordered() {
        let mut lo = LexoRank::min().next();
        let hi = lo.next();
        for _ in 0..50 {
            let mid = lo.between(&hi).unwrap();
            assert!(lo < mid && mid < hi);
            assert!(lo.to_string() < mid.to_string());
            assert!(mid.to_string() < hi.to_string());
            lo = mid;
        }
    }

    #[test]
    fn random_bisection_preserves_total_order() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut keys = vec![LexoRank::min(), LexoRank::max()];
        for _ in 0..300 {
            let i = rng.gen_range(0..keys.len() - 1);
            let mid = keys[i].between(&keys[i + 1]).unwrap();
            assert!(keys[i] < mid && mid < keys[i + 1]);
            keys.insert(i + 1, mid);
        }
        let strings: Vec<String> = keys.iter().map(ToString::to_string).collect();
        let mut sorted = strings.clone();
        sorted.sort();
        assert_eq!(strings, sorted);
    }

    #[test]
    fn operations_preserve_the_bucket() {
        let legacy = rank("1|00000g:");
        assert_eq!(legacy.next().bucket(), 1);
        assert_eq!(legacy.prev().bucket(), 1);
        assert_eq!(
            legacy.between(&rank("1|00000w:")).unwrap().bucket(),
            1
        );
    }

    #[test]
    fn ordering_agrees_with_string_comparison() {
        let mut keys = vec![
            LexoRank::max(),
            rank("0|000000:i"),
            LexoRank::min(),
            rank("0|00000g:2x"),
            rank("0|00000g:"),
            LexoRank::middle(),
        ];
        keys.sort();
        let strings: Vec<String> = keys.iter().map(ToString::to_string).collect();
        let mut sorted = strings.clone();
        sorted.sort();
        assert_eq!(strings, sorted);
    }

    #[test]
    fn serde_uses_the_string_form() {
        let key = rank("0|hzzzzz:i");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"0|hzzzzz:i\"");
        let back: LexoRank = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<LexoRank>("\"0|bad\"").is_err());
    }
}
