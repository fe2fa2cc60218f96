#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Arbitrary-precision non-negative integers for model counts.
//!
//! Counts in projected model counting are sums and differences of powers of
//! two whose exponents can reach the number of relevant variables, so they do
//! not fit any machine word. `Number` stores the value as little-endian 32-bit
//! words and supports exactly what the counter needs: adding and subtracting
//! powers of two and other numbers, comparison, `log2` for progress
//! milestones and decimal rendering.
//!
//! The representation is canonical: the highest word is never zero, so zero is
//! the empty word sequence and derived equality is value equality.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

const WORD_BITS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Number {
    words: Vec<u32>,
}

impl Number {
    #[must_use]
    pub const fn zero() -> Self {
        Self { words: Vec::new() }
    }

    /// `2^exponent`.
    #[must_use]
    pub fn power_of_two(exponent: usize) -> Self {
        let mut number = Self::zero();
        number.add_power_of_two(exponent);
        number
    }

    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let mut number = Self {
            words: vec![value as u32, (value >> 32) as u32],
        };
        number.normalize();
        number
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.words.is_empty()
    }

    /// The value if it fits in 64 bits.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        match self.words.as_slice() {
            [] => Some(0),
            [lo] => Some(u64::from(*lo)),
            [lo, hi] => Some(u64::from(*lo) | (u64::from(*hi) << 32)),
            _ => None,
        }
    }

    /// Position of the highest set bit, `None` for zero.
    #[must_use]
    pub fn log2(&self) -> Option<usize> {
        let top = *self.words.last()?;
        Some((self.words.len() - 1) * WORD_BITS + (WORD_BITS - 1 - top.leading_zeros() as usize))
    }

    pub fn add_power_of_two(&mut self, exponent: usize) {
        let word = exponent / WORD_BITS;
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        self.add_at(word, 1 << (exponent % WORD_BITS));
    }

    pub fn sub_power_of_two(&mut self, exponent: usize) {
        let word = exponent / WORD_BITS;
        debug_assert!(word < self.words.len(), "subtracting 2^{exponent} underflows");
        self.sub_at(word, 1 << (exponent % WORD_BITS));
        self.normalize();
    }

    pub fn add(&mut self, other: &Self) {
        if self.words.len() < other.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        let mut carry = 0u64;
        for (i, word) in self.words.iter_mut().enumerate() {
            let rhs = other.words.get(i).copied().unwrap_or(0);
            if rhs == 0 && carry == 0 && i >= other.words.len() {
                break;
            }
            let sum = u64::from(*word) + u64::from(rhs) + carry;
            #[allow(clippy::cast_possible_truncation)]
            {
                *word = sum as u32;
            }
            carry = sum >> WORD_BITS;
        }
        if carry != 0 {
            #[allow(clippy::cast_possible_truncation)]
            self.words.push(carry as u32);
        }
    }

    /// Subtracts `other`, which must not exceed `self`.
    pub fn sub(&mut self, other: &Self) {
        debug_assert!(*self >= *other, "subtraction underflows");
        let mut borrow = 0i64;
        for (i, word) in self.words.iter_mut().enumerate() {
            let rhs = other.words.get(i).copied().unwrap_or(0);
            if rhs == 0 && borrow == 0 && i >= other.words.len() {
                break;
            }
            let mut diff = i64::from(*word) - i64::from(rhs) - borrow;
            borrow = 0;
            if diff < 0 {
                diff += 1 << WORD_BITS;
                borrow = 1;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                *word = diff as u32;
            }
        }
        self.normalize();
    }

    fn add_at(&mut self, mut word: usize, value: u32) {
        let (sum, mut carry) = self.words[word].overflowing_add(value);
        self.words[word] = sum;
        while carry {
            word += 1;
            if word == self.words.len() {
                self.words.push(0);
            }
            let (sum, overflow) = self.words[word].overflowing_add(1);
            self.words[word] = sum;
            carry = overflow;
        }
    }

    fn sub_at(&mut self, mut word: usize, value: u32) {
        let (diff, mut borrow) = self.words[word].overflowing_sub(value);
        self.words[word] = diff;
        while borrow {
            word += 1;
            debug_assert!(word < self.words.len());
            let (diff, underflow) = self.words[word].overflowing_sub(1);
            self.words[word] = diff;
            borrow = underflow;
        }
    }

    fn normalize(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.words
            .len()
            .cmp(&other.words.len())
            .then_with(|| self.words.iter().rev().cmp(other.words.iter().rev()))
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        const CHUNK: u64 = 1_000_000_000;

        if self.is_zero() {
            return write!(f, "0");
        }

        let mut words = self.words.clone();
        let mut chunks = Vec::new();
        while !words.is_empty() {
            let mut rem = 0u64;
            for word in words.iter_mut().rev() {
                let cur = (rem << WORD_BITS) | u64::from(*word);
                #[allow(clippy::cast_possible_truncation)]
                {
                    *word = (cur / CHUNK) as u32;
                }
                rem = cur % CHUNK;
            }
            chunks.push(rem);
            while words.last() == Some(&0) {
                words.pop();
            }
        }

        let mut chunks = chunks.iter().rev();
        if let Some(first) = chunks.next() {
            write!(f, "{first}")?;
        }
        for chunk in chunks {
            write!(f, "{chunk:09}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        let zero = Number::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.to_string(), "0");
        assert_eq!(zero.log2(), None);
    }

    #[test]
    fn test_powers_of_two() {
        assert_eq!(Number::power_of_two(0).to_string(), "1");
        assert_eq!(Number::power_of_two(10).to_string(), "1024");
        assert_eq!(Number::power_of_two(64).to_string(), "18446744073709551616");
        assert_eq!(
            Number::power_of_two(100).to_string(),
            "1267650600228229401496703205376"
        );
        assert_eq!(Number::power_of_two(77).log2(), Some(77));
    }

    #[test]
    fn test_carry_across_words() {
        let mut n = Number::from_u64(u64::from(u32::MAX));
        n.add_power_of_two(0);
        assert_eq!(n.to_u64(), Some(1 << 32));

        n.sub_power_of_two(0);
        assert_eq!(n.to_u64(), Some(u64::from(u32::MAX)));
    }

    #[test]
    fn test_add_then_sub_is_identity() {
        let mut n = Number::from_u64(12345);
        let before = n.clone();
        n.add_power_of_two(70);
        assert_ne!(n, before);
        n.sub_power_of_two(70);
        assert_eq!(n, before);
    }

    #[test]
    fn test_add_and_sub_numbers() {
        let mut a = Number::power_of_two(40);
        let b = Number::from_u64(7);
        a.add(&b);
        assert_eq!(a.to_u64(), Some((1 << 40) + 7));

        a.sub(&Number::power_of_two(40));
        assert_eq!(a, b);

        a.sub(&b);
        assert!(a.is_zero());
    }

    #[test]
    fn test_ordering() {
        let small = Number::from_u64(5);
        let big = Number::power_of_two(33);
        assert!(small < big);
        assert!(Number::zero() < small);
        assert_eq!(big.cmp(&Number::power_of_two(33)), Ordering::Equal);
    }

    #[test]
    fn test_decimal_rendering_with_inner_zero_chunks() {
        let mut n = Number::from_u64(1_000_000_000_000_000_007);
        assert_eq!(n.to_string(), "1000000000000000007");
        n.add(&Number::from_u64(3));
        assert_eq!(n.to_string(), "1000000000000000010");
    }
}
