//! Group parameters.
//!
//! The five groups from [RFC5054 Appendix A](https://tools.ietf.org/html/rfc5054#appendix-A)
//! are supported. The large safe primes are fixed constants, never generated.
//!
//! Client and server must be configured with the same group. A mismatch is not detected
//! as a distinct error, it surfaces as a proof mismatch.

use crate::bigint;
use crate::error::SrpError;
use crate::srp_internal::{calculate_k, calculate_xor_hash};
use digest::Digest;
use hex_literal::hex;
use once_cell::sync::OnceCell;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::convert::TryFrom;
use std::fmt;
use std::marker::PhantomData;

const LARGE_SAFE_PRIME_1024: [u8; 128] = hex!(
    "
    EEAF0AB9ADB38DD69C33F80AFA8FC5E86072618775FF3C0B9EA2314C9C256576
    D674DF7496EA81D3383B4813D692C6E0E0D5D8E250B98BE48E495C1D6089DAD1
    5DC7D7B46154D6B6CE8EF4AD69B15D4982559B297BCF1885C529F566660E57EC
    68EDBC3C05726CC02FD4CBF4976EAA9AFD5138FE8376435B9FC61D2FC0EB06E3
    "
);

const LARGE_SAFE_PRIME_1536: [u8; 192] = hex!(
    "
    9DEF3CAFB939277AB1F12A8617A47BBBDBA51DF499AC4C80BEEEA9614B19CC4D
    5F4F5F556E27CBDE51C6A94BE4607A291558903BA0D0F84380B655BB9A22E8DC
    DF028A7CEC67F0D08134B1C8B97989149B609E0BE3BAB63D47548381DBC5B1FC
    764E3F4B53DD9DA1158BFD3E2B9C8CF56EDF019539349627DB2FD53D24B7C486
    65772E437D6C7F8CE442734AF7CCB7AE837C264AE3A9BEB87F8A2FE9B8B5292E
    5A021FFF5E91479E8CE7A28C2442C6F315180F93499A234DCF76E3FED135F9BB
    "
);

const LARGE_SAFE_PRIME_2048: [u8; 256] = hex!(
    "
    AC6BDB41324A9A9BF166DE5E1389582FAF72B6651987EE07FC3192943DB56050
    A37329CBB4A099ED8193E0757767A13DD52312AB4B03310DCD7F48A9DA04FD50
    E8083969EDB767B0CF6095179A163AB3661A05FBD5FAAAE82918A9962F0B93B8
    55F97993EC975EEAA80D740ADBF4FF747359D041D5C33EA71D281E446B14773B
    CA97B43A23FB801676BD207A436C6481F1D2B9078717461A5B9D32E688F87748
    544523B524B0D57D5EA77A2775D2ECFA032CFBDBF52FB3786160279004E57AE6
    AF874E7303CE53299CCC041C7BC308D82A5698F3A8D0C38271AE35F8E9DBFBB6
    94B5C803D89F7AE435DE236D525F54759B65E372FCD68EF20FA7111F9E4AFF73
    "
);

const LARGE_SAFE_PRIME_3072: [u8; 384] = hex!(
    "
    FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74
    020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437
    4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED
    EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05
    98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB
    9ED529077096966D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B
    E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718
    3995497CEA956AE515D2261898FA051015728E5A8AAAC42DAD33170D04507A33
    A85521ABDF1CBA64ECFB850458DBEF0A8AEA71575D060C7DB3970F85A6E1E4C7
    ABF5AE8CDB0933D71E8C94E04A25619DCEE3D2261AD2EE6BF12FFA06D98A0864
    D87602733EC86A64521F2B18177B200CBBE117577A615D6C770988C0BAD946E2
    08E24FA074E5AB3143DB5BFCE0FD108E4B82D120A93AD2CAFFFFFFFFFFFFFFFF
    "
);

const LARGE_SAFE_PRIME_4096: [u8; 512] = hex!(
    "
    FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74
    020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437
    4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED
    EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05
    98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB
    9ED529077096966D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B
    E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718
    3995497CEA956AE515D2261898FA051015728E5A8AAAC42DAD33170D04507A33
    A85521ABDF1CBA64ECFB850458DBEF0A8AEA71575D060C7DB3970F85A6E1E4C7
    ABF5AE8CDB0933D71E8C94E04A25619DCEE3D2261AD2EE6BF12FFA06D98A0864
    D87602733EC86A64521F2B18177B200CBBE117577A615D6C770988C0BAD946E2
    08E24FA074E5AB3143DB5BFCE0FD108E4B82D120A92108011A723C12A787E6D7
    88719A10BDBA5B2699C327186AF4E23C1A946834B6150BDA2583E9CA2AD44CE8
    DBBBC2DB04DE8EF92E8EFC141FBECAA6287C59474E6BC05D99B2964FA090C3A2
    233BA186515BE7ED1F612970CEE2D7AFB81BDD762170481CD0069127D5B05AA9
    93B4EA988D8FDDC186FFB7DC90A6C08F4DF435C934063199FFFFFFFFFFFFFFFF
    "
);

/// One of the [RFC5054](https://tools.ietf.org/html/rfc5054#appendix-A) groups.
///
/// Defaults to [`SrpGroup::Rfc5054_2048`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SrpGroup {
    /// 1024-bit group, generator 2.
    Rfc5054_1024,
    /// 1536-bit group, generator 2.
    Rfc5054_1536,
    /// 2048-bit group, generator 2.
    Rfc5054_2048,
    /// 3072-bit group, generator 5.
    Rfc5054_3072,
    /// 4096-bit group, generator 5.
    Rfc5054_4096,
}

impl Default for SrpGroup {
    fn default() -> Self {
        Self::Rfc5054_2048
    }
}

impl SrpGroup {
    /// Every supported group, smallest first.
    pub const ALL: [SrpGroup; 5] = [
        Self::Rfc5054_1024,
        Self::Rfc5054_1536,
        Self::Rfc5054_2048,
        Self::Rfc5054_3072,
        Self::Rfc5054_4096,
    ];

    /// # Errors
    ///
    /// [`SrpError::InvalidGroup`] if `bits` is not one of 1024, 1536, 2048, 3072 or 4096.
    pub const fn from_bit_size(bits: u32) -> Result<Self, SrpError> {
        match bits {
            1024 => Ok(Self::Rfc5054_1024),
            1536 => Ok(Self::Rfc5054_1536),
            2048 => Ok(Self::Rfc5054_2048),
            3072 => Ok(Self::Rfc5054_3072),
            4096 => Ok(Self::Rfc5054_4096),
            _ => Err(SrpError::InvalidGroup(bits)),
        }
    }

    /// Size of the large safe prime in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Rfc5054_1024 => 1024,
            Self::Rfc5054_1536 => 1536,
            Self::Rfc5054_2048 => 2048,
            Self::Rfc5054_3072 => 3072,
            Self::Rfc5054_4096 => 4096,
        }
    }

    /// Size of the large safe prime in bytes.
    /// Every padded value has this width.
    #[doc(alias = "N")]
    #[must_use]
    pub const fn large_safe_prime_length(self) -> usize {
        self.bits() as usize / 8
    }

    /// Big endian large safe prime `N`.
    #[doc(alias = "N")]
    #[must_use]
    pub const fn large_safe_prime(self) -> &'static [u8] {
        match self {
            Self::Rfc5054_1024 => &LARGE_SAFE_PRIME_1024,
            Self::Rfc5054_1536 => &LARGE_SAFE_PRIME_1536,
            Self::Rfc5054_2048 => &LARGE_SAFE_PRIME_2048,
            Self::Rfc5054_3072 => &LARGE_SAFE_PRIME_3072,
            Self::Rfc5054_4096 => &LARGE_SAFE_PRIME_4096,
        }
    }

    /// Generator `g`. There are no generators greater than 255.
    #[doc(alias = "g")]
    #[must_use]
    pub const fn generator(self) -> u8 {
        match self {
            Self::Rfc5054_1024 | Self::Rfc5054_1536 | Self::Rfc5054_2048 => 2,
            Self::Rfc5054_3072 | Self::Rfc5054_4096 => 5,
        }
    }
}

impl TryFrom<u32> for SrpGroup {
    type Error = SrpError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bit_size(bits)
    }
}

impl fmt::Display for SrpGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RFC5054-{}", self.bits())
    }
}

/// `N`, `g` and the values derived from them for one group and hash function.
///
/// `k = H(N | PAD(g))` and `H(N) xor H(g)` are computed on first use and cached for the
/// lifetime of the instance. The struct is immutable otherwise and can be shared between threads.
pub struct GroupParameters<D = Sha256> {
    group: SrpGroup,
    large_safe_prime: bigint::Integer,
    generator: bigint::Integer,
    k: OnceCell<bigint::Integer>,
    xor_hash: OnceCell<Vec<u8>>,
    _digest: PhantomData<fn() -> D>,
}

impl<D: Digest> GroupParameters<D> {
    /// Creates the parameters for `group`.
    #[must_use]
    pub fn new(group: SrpGroup) -> Self {
        tracing::trace!(%group, "building group parameters");

        Self {
            group,
            large_safe_prime: bigint::Integer::from_bytes_be(group.large_safe_prime()),
            generator: bigint::Integer::from(group.generator()),
            k: OnceCell::new(),
            xor_hash: OnceCell::new(),
            _digest: PhantomData,
        }
    }

    /// # Errors
    ///
    /// [`SrpError::InvalidGroup`] if `bits` is not a supported size.
    pub fn for_bit_size(bits: u32) -> Result<Self, SrpError> {
        Ok(Self::new(SrpGroup::from_bit_size(bits)?))
    }

    /// The configured group.
    #[must_use]
    pub const fn group(&self) -> SrpGroup {
        self.group
    }

    /// Width in bytes every padded value is padded to.
    #[must_use]
    pub const fn large_safe_prime_length(&self) -> usize {
        self.group.large_safe_prime_length()
    }

    /// The multiplier `k = H(N | PAD(g))` as big endian bytes.
    #[doc(alias = "k")]
    #[must_use]
    pub fn multiplier(&self) -> Vec<u8> {
        self.k().to_bytes_be()
    }

    pub(crate) const fn large_safe_prime(&self) -> &bigint::Integer {
        &self.large_safe_prime
    }

    pub(crate) const fn generator(&self) -> &bigint::Integer {
        &self.generator
    }

    pub(crate) fn k(&self) -> &bigint::Integer {
        self.k.get_or_init(|| {
            tracing::trace!(group = %self.group, "computing multiplier");
            calculate_k::<D>(self)
        })
    }

    pub(crate) fn xor_hash(&self) -> &[u8] {
        self.xor_hash.get_or_init(|| calculate_xor_hash::<D>(self))
    }

    /// `PAD()` from [RFC5054](https://tools.ietf.org/html/rfc5054#section-2.1).
    pub(crate) fn pad(&self, value: &bigint::Integer) -> Vec<u8> {
        value.to_padded_bytes_be(self.large_safe_prime_length())
    }
}

impl<D: Digest> Default for GroupParameters<D> {
    fn default() -> Self {
        Self::new(SrpGroup::default())
    }
}

// Manual impls to avoid requiring `D: Clone + Debug`.
impl<D> Clone for GroupParameters<D> {
    fn clone(&self) -> Self {
        Self {
            group: self.group,
            large_safe_prime: self.large_safe_prime.clone(),
            generator: self.generator.clone(),
            k: self.k.clone(),
            xor_hash: self.xor_hash.clone(),
            _digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for GroupParameters<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupParameters")
            .field("group", &self.group)
            .finish()
    }
}
