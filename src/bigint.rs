#[cfg(all(feature = "srp-default-math", not(feature = "srp-fast-math")))]
use num_bigint::BigUint;
#[cfg(all(feature = "srp-default-math", not(feature = "srp-fast-math")))]
use num_traits::Zero;
#[cfg(feature = "srp-fast-math")]
use rug::integer::Order;
#[cfg(feature = "srp-fast-math")]
use rug::Integer as RugInt;
use std::ops;

#[cfg(not(any(feature = "srp-fast-math", feature = "srp-default-math")))]
compile_error!("Either the 'srp-fast-math' feature or the 'srp-default-math' feature must be enabled.\n\n The features exclusively select an arbitrary integer library.\n Use 'srp-default-math' if you want pure Rust compilation, but slower execution speed. Use 'srp-fast-math' if you want exceptional execution speed but external dependencies.");

/// Non-negative arbitrary precision integer.
///
/// All byte conversions are **big endian**.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Integer {
    #[cfg(all(feature = "srp-default-math", not(feature = "srp-fast-math")))]
    value: BigUint,
    #[cfg(feature = "srp-fast-math")]
    value: RugInt,
}

impl Integer {
    /// Minimal big endian representation. Zero is the empty slice.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let bytes = self.to_bytes_be_raw();
        let first_non_zero = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        bytes[first_non_zero..].to_vec()
    }

    /// Left pads with zeros to `width` bytes.
    ///
    /// Values wider than `width` are returned unpadded, this never happens for
    /// values reduced modulo the large safe prime.
    pub fn to_padded_bytes_be(&self, width: usize) -> Vec<u8> {
        let value = self.to_bytes_be();
        if value.len() >= width {
            return value;
        }

        let mut array = vec![0_u8; width];
        array[width - value.len()..].clone_from_slice(&value);

        array
    }

    pub fn mod_large_safe_prime_is_zero(&self, large_safe_prime: &Self) -> bool {
        (self.clone() % large_safe_prime.clone()).is_zero()
    }

    #[cfg(feature = "srp-fast-math")]
    pub fn is_zero(&self) -> bool {
        self.value == RugInt::new()
    }
    #[cfg(all(feature = "srp-default-math", not(feature = "srp-fast-math")))]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    #[cfg(feature = "srp-fast-math")]
    fn to_bytes_be_raw(&self) -> Vec<u8> {
        self.value.to_digits::<u8>(Order::Msf)
    }
    #[cfg(all(feature = "srp-default-math", not(feature = "srp-fast-math")))]
    fn to_bytes_be_raw(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    #[cfg(feature = "srp-fast-math")]
    pub fn modpow(&self, exponent: &Self, modulus: &Self) -> Self {
        if exponent.is_zero() {
            // rug refuses non-positive exponents for the secure variant.
            return Self::from(1) % modulus.clone();
        }
        Self::from_bigint(
            self.value
                .clone()
                .secure_pow_mod(&exponent.value, &modulus.value),
        )
    }
    #[cfg(all(feature = "srp-default-math", not(feature = "srp-fast-math")))]
    pub fn modpow(&self, exponent: &Self, modulus: &Self) -> Self {
        Self::from_bigint(self.value.modpow(&exponent.value, &modulus.value))
    }

    #[cfg(feature = "srp-fast-math")]
    pub fn from_bytes_be(v: &[u8]) -> Self {
        Self::from_bigint(RugInt::from_digits(v, Order::Msf))
    }
    #[cfg(all(feature = "srp-default-math", not(feature = "srp-fast-math")))]
    pub fn from_bytes_be(v: &[u8]) -> Self {
        Self::from_bigint(BigUint::from_bytes_be(v))
    }

    #[cfg(feature = "srp-fast-math")]
    const fn from_bigint(bigint: RugInt) -> Self {
        Self { value: bigint }
    }
    #[cfg(all(feature = "srp-default-math", not(feature = "srp-fast-math")))]
    const fn from_bigint(bigint: BigUint) -> Self {
        Self { value: bigint }
    }
}

impl From<u8> for Integer {
    #[cfg(feature = "srp-fast-math")]
    fn from(v: u8) -> Self {
        Self::from_bigint(RugInt::from(v))
    }

    #[cfg(all(not(feature = "srp-fast-math"), feature = "srp-default-math"))]
    fn from(v: u8) -> Self {
        Self::from_bigint(BigUint::from(v))
    }
}

impl ops::Mul<Integer> for Integer {
    type Output = Self;

    fn mul(self, rhs: Integer) -> Self::Output {
        Self::from_bigint(self.value * rhs.value)
    }
}

impl ops::Add<Integer> for Integer {
    type Output = Self;

    fn add(self, rhs: Integer) -> Self::Output {
        Self::from_bigint(self.value + rhs.value)
    }
}

// Callers guarantee `self >= rhs`, the default backend panics on underflow.
impl ops::Sub<Integer> for Integer {
    type Output = Self;

    fn sub(self, rhs: Integer) -> Self::Output {
        Self::from_bigint(self.value - rhs.value)
    }
}

impl ops::Rem<Integer> for Integer {
    type Output = Self;

    fn rem(self, rhs: Integer) -> Self::Output {
        Self::from_bigint(self.value % rhs.value)
    }
}
