//! Strongly typed values exchanged between client and server.
//!
//! Integer values ([`PrivateKey`], [`Verifier`], [`PublicKey`] and [`EphemeralSecret`])
//! are written as hex without leading zeros.
//! Byte strings ([`Salt`], [`Proof`] and [`SessionKey`]) are written with every byte.
//!
//! Secrets are zeroed on drop and never printed.

use crate::bigint;
use crate::error::SrpError;
use crate::hex::{hex_decode, hex_decode_integer, hex_encode, hex_encode_integer};
use rand::{CryptoRng, RngCore};
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Size of a generated salt in bytes.
#[doc(alias = "s")]
pub const SALT_LENGTH: usize = 32;

/// Size in bytes of the random data an ephemeral secret is drawn from.
#[doc(alias = "a")]
#[doc(alias = "b")]
pub const EPHEMERAL_SECRET_LENGTH: usize = 32;

macro_rules! key_wrapper {
    ($(#[$meta:meta])* $name: ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            key: Vec<u8>,
        }

        impl $name {
            /// Returns the value as **big endian** bytes.
            #[must_use]
            pub fn as_be(&self) -> &[u8] {
                &self.key
            }
        }
    };
}

// Integers are stored without leading zeros so equal values have equal bytes.
macro_rules! key_integer {
    ($name: ident) => {
        impl $name {
            /// Creates the value from **big endian** bytes. Leading zeros are ignored.
            #[must_use]
            pub fn from_be_bytes(key: &[u8]) -> Self {
                Self {
                    key: crate::hex::strip_leading_zeros(key).to_vec(),
                }
            }

            /// Parses wire hex. Case, odd length and leading zeros do not matter.
            ///
            /// # Errors
            ///
            /// [`SrpError::InvalidEncoding`] if `s` is not hex.
            pub fn from_hex(s: &str) -> Result<Self, SrpError> {
                Ok(Self {
                    key: hex_decode_integer(s)?,
                })
            }

            /// Canonical wire hex, lowercase without leading zeros.
            #[must_use]
            pub fn to_hex(&self) -> String {
                hex_encode_integer(&self.key)
            }

            pub(crate) fn to_bigint(&self) -> bigint::Integer {
                bigint::Integer::from_bytes_be(&self.key)
            }
        }

        impl From<bigint::Integer> for $name {
            fn from(b: bigint::Integer) -> Self {
                Self {
                    key: b.to_bytes_be(),
                }
            }
        }
    };
}

macro_rules! key_bytes {
    ($name: ident) => {
        impl $name {
            /// Creates the value from bytes, used exactly as given.
            #[must_use]
            pub fn from_be_bytes(key: &[u8]) -> Self {
                Self { key: key.to_vec() }
            }

            /// Parses wire hex. Odd length input is left padded with a `0`.
            ///
            /// # Errors
            ///
            /// [`SrpError::InvalidEncoding`] if `s` is not hex.
            pub fn from_hex(s: &str) -> Result<Self, SrpError> {
                Ok(Self {
                    key: hex_decode(s)?,
                })
            }

            /// Lowercase hex of every byte.
            #[must_use]
            pub fn to_hex(&self) -> String {
                hex_encode(&self.key)
            }
        }
    };
}

macro_rules! key_public {
    ($name: ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = SrpError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

macro_rules! key_exact_eq {
    ($name: ident) => {
        impl Eq for $name {}
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.key == other.key
            }
        }
    };
}

// Secrets are wiped on drop, never printed and compared in constant time.
macro_rules! key_secret {
    ($name: ident) => {
        impl Drop for $name {
            fn drop(&mut self) {
                self.key.zeroize();
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(<redacted>)", stringify!($name))
            }
        }

        impl Eq for $name {}
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.key.len() == other.key.len() && bool::from(self.key.ct_eq(&other.key))
            }
        }
    };
}

key_wrapper!(
    /// Per user random salt `s`.
    ///
    /// Public, stored alongside the [`Verifier`] and sent to the client.
    /// The bytes are hashed exactly as given, so leading zero bytes are significant.
    Salt
);
key_bytes!(Salt);
key_public!(Salt);
key_exact_eq!(Salt);

impl Salt {
    pub(crate) fn randomized<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, SrpError> {
        let mut key = vec![0_u8; SALT_LENGTH];
        rng.try_fill_bytes(&mut key)?;
        Ok(Self { key })
    }
}

key_wrapper!(
    /// Password derived scalar `x = H(s | H(I | ":" | P))`.
    ///
    /// Must never be transmitted or persisted.
    PrivateKey
);
key_integer!(PrivateKey);
key_secret!(PrivateKey);

key_wrapper!(
    /// Password verifier `v = g^x % N`.
    ///
    /// Stored by the server in place of the password.
    Verifier
);
key_integer!(Verifier);
key_public!(Verifier);
key_exact_eq!(Verifier);

key_wrapper!(
    /// Public ephemeral, `A` for the client and `B` for the server.
    ///
    /// Not validated on construction since validity depends on the group.
    /// Every operation receiving a peer public ephemeral rejects values that are `0 (mod N)`.
    PublicKey
);
key_integer!(PublicKey);
key_public!(PublicKey);
key_exact_eq!(PublicKey);

key_wrapper!(
    /// Secret ephemeral, `a` for the client and `b` for the server.
    ///
    /// Kept by the party that generated it for the duration of a single attempt.
    EphemeralSecret
);
key_integer!(EphemeralSecret);
key_secret!(EphemeralSecret);

impl EphemeralSecret {
    /// Random value in `[1, N)`.
    pub(crate) fn randomized<R: RngCore + CryptoRng>(
        rng: &mut R,
        large_safe_prime: &bigint::Integer,
    ) -> Result<Self, SrpError> {
        let mut bytes = [0_u8; EPHEMERAL_SECRET_LENGTH];
        loop {
            rng.try_fill_bytes(&mut bytes)?;
            let value = bigint::Integer::from_bytes_be(&bytes) % large_safe_prime.clone();
            if !value.is_zero() {
                bytes.zeroize();
                return Ok(value.into());
            }
        }
    }
}

key_wrapper!(
    /// Proof `M1` from the client or `M2` from the server.
    Proof
);
key_bytes!(Proof);
key_public!(Proof);

// Equal wire values may differ in leading zeros.
impl Eq for Proof {}
impl PartialEq for Proof {
    fn eq(&self, other: &Self) -> bool {
        let lhs = crate::hex::strip_leading_zeros(&self.key);
        let rhs = crate::hex::strip_leading_zeros(&other.key);
        lhs.len() == rhs.len() && bool::from(lhs.ct_eq(rhs))
    }
}

impl Proof {
    /// Constant time comparison against `expected`.
    ///
    /// Leading zero bytes of `self` are ignored since peers may send proofs as integers.
    pub(crate) fn matches(&self, expected: &Proof) -> bool {
        let received = crate::hex::strip_leading_zeros(&self.key);
        if received.len() > expected.key.len() {
            return false;
        }

        let mut padded = vec![0_u8; expected.key.len()];
        let offset = padded.len() - received.len();
        padded[offset..].clone_from_slice(received);

        bool::from(padded.ct_eq(&expected.key))
    }
}

key_wrapper!(
    /// Session key `K = H(S)`.
    ///
    /// Only trusted once the peer proof has been verified.
    SessionKey
);
key_bytes!(SessionKey);
key_secret!(SessionKey);
