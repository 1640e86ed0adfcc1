//! Contains all functionality related to the client part.
//!
//! All wire values are **big endian** and exchanged as hex, see [`crate::key`].
//!
//! # Usage
//!
//! [`SrpClient`] only holds the group configuration. Every method is a function of its
//! arguments, so a single instance can serve any number of concurrent attempts.
//! The values of an attempt live in what the caller holds between calls.
//!
//! The order of operations for a single authentication attempt is:
//! ```text
//! generate_ephemeral -> derive_session -> verify_session
//! ```
//! Registration only needs [`SrpClient::generate_salt`], [`SrpClient::derive_private_key`]
//! and [`SrpClient::derive_verifier`]. The salt and verifier are sent to the server,
//! the private key is discarded.
//!
//! # Example
//!
//! ```rust
//! use srp6a::{SrpClient, SrpGroup, SrpServer};
//!
//! # fn main() -> Result<(), srp6a::SrpError> {
//! let client = SrpClient::new(SrpGroup::Rfc5054_2048);
//! let server = SrpServer::new(SrpGroup::Rfc5054_2048);
//!
//! // Registration
//! let salt = client.generate_salt()?;
//! let x = client.derive_private_key(&salt, "alice", "password123");
//! let verifier = client.derive_verifier(&x);
//!
//! // Authentication
//! let client_ephemeral = client.generate_ephemeral()?;
//! let server_ephemeral = server.generate_ephemeral(&verifier)?;
//!
//! let client_session = client.derive_session(
//!     client_ephemeral.secret(),
//!     server_ephemeral.public(),
//!     &salt,
//!     "alice",
//!     &x,
//! )?;
//! let server_session = server.derive_session(
//!     server_ephemeral.secret(),
//!     client_ephemeral.public(),
//!     &salt,
//!     "alice",
//!     &verifier,
//!     client_session.proof(),
//! )?;
//!
//! client.verify_session(client_ephemeral.public(), &client_session, server_session.proof())?;
//! assert_eq!(client_session.key(), server_session.key());
//! # Ok(())
//! # }
//! ```

use digest::Digest;
use rand::{CryptoRng, RngCore};
use sha2::Sha256;

use crate::error::SrpError;
use crate::key::{EphemeralSecret, PrivateKey, Proof, PublicKey, Salt, SessionKey, Verifier};
use crate::primes::{GroupParameters, SrpGroup};
use crate::srp_internal::{calculate_password_verifier, calculate_x};
use crate::srp_internal_client;
use crate::srp_internal_client::{calculate_client_public_key, verify_server_proof};

/// Client ephemeral key pair for a single authentication attempt.
///
/// The public key `A` is sent to the server, the secret `a` is kept until
/// [`SrpClient::derive_session`] has been called.
#[derive(Debug, Clone)]
pub struct ClientEphemeral {
    secret: EphemeralSecret,
    public: PublicKey,
}

impl ClientEphemeral {
    /// Called `a` in [RFC2945](https://tools.ietf.org/html/rfc2945).
    #[doc(alias = "a")]
    #[must_use]
    pub const fn secret(&self) -> &EphemeralSecret {
        &self.secret
    }

    /// Called `A` in [RFC2945](https://tools.ietf.org/html/rfc2945).
    #[doc(alias = "A")]
    #[must_use]
    pub const fn public(&self) -> &PublicKey {
        &self.public
    }
}

/// Result of [`SrpClient::derive_session`].
///
/// The proof is sent to the server. The key must not be used before
/// [`SrpClient::verify_session`] has succeeded.
#[derive(Debug, Clone)]
pub struct ClientSession {
    key: SessionKey,
    proof: Proof,
}

impl ClientSession {
    /// Called `K` in [RFC2945](https://tools.ietf.org/html/rfc2945).
    #[doc(alias = "K")]
    #[must_use]
    pub const fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Called `M1` in [RFC5054](https://tools.ietf.org/html/rfc5054), `M` in [RFC2945](https://tools.ietf.org/html/rfc2945).
    #[doc(alias = "M")]
    #[doc(alias = "M1")]
    #[must_use]
    pub const fn proof(&self) -> &Proof {
        &self.proof
    }
}

/// Client side of SRP-6a for one group and hash function.
///
/// Defaults to SHA-256. Use [`SrpClient::with_digest`] for any other [`Digest`].
///
/// The server must be configured with the same group and hash function.
/// A mismatch is not detected up front, it surfaces as a failed proof.
pub struct SrpClient<D = Sha256> {
    params: GroupParameters<D>,
}

impl<D> Clone for SrpClient<D> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
        }
    }
}

impl<D> std::fmt::Debug for SrpClient<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SrpClient")
            .field("params", &self.params)
            .finish()
    }
}

impl SrpClient {
    /// Creates a SHA-256 client for `group`.
    #[must_use]
    pub fn new(group: SrpGroup) -> Self {
        Self::with_digest(group)
    }
}

impl Default for SrpClient {
    fn default() -> Self {
        Self::new(SrpGroup::default())
    }
}

impl<D: Digest> SrpClient<D> {
    /// Creates a client for `group` using `D` as the hash function.
    #[must_use]
    pub fn with_digest(group: SrpGroup) -> Self {
        Self::from_parameters(GroupParameters::new(group))
    }

    /// Creates a client from already built parameters, reusing their cached values.
    #[must_use]
    pub const fn from_parameters(params: GroupParameters<D>) -> Self {
        Self { params }
    }

    /// The configured group.
    #[must_use]
    pub const fn group(&self) -> SrpGroup {
        self.params.group()
    }

    /// Group parameters, including `N` and `g` for sending to the peer.
    #[must_use]
    pub const fn parameters(&self) -> &GroupParameters<D> {
        &self.params
    }

    /// Generates a new random salt for registration or a password change.
    ///
    /// # Errors
    ///
    /// [`SrpError::RandomSource`] if the operating system random source fails.
    pub fn generate_salt(&self) -> Result<Salt, SrpError> {
        self.generate_salt_with_rng(&mut rand::thread_rng())
    }

    /// Same as [`SrpClient::generate_salt`] with a caller supplied random source.
    ///
    /// # Errors
    ///
    /// [`SrpError::RandomSource`] if `rng` fails.
    pub fn generate_salt_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<Salt, SrpError> {
        Salt::randomized(rng)
    }

    /// Calculates `x = H(s | H(I | ":" | P)) % N`.
    ///
    /// Deterministic, so the password does not need to be stored between registration and
    /// authentication. The result must not outlive the attempt it was derived for.
    #[doc(alias = "x")]
    #[must_use]
    pub fn derive_private_key(&self, salt: &Salt, identity: &str, password: &str) -> PrivateKey {
        calculate_x(identity, password, salt, &self.params)
    }

    /// Calculates the password verifier `v = g^x % N` to be stored by the server.
    #[doc(alias = "v")]
    #[must_use]
    pub fn derive_verifier(&self, private_key: &PrivateKey) -> Verifier {
        calculate_password_verifier(private_key, &self.params)
    }

    /// Generates `a` in `[1, N)` and `A = g^a % N`.
    ///
    /// # Errors
    ///
    /// [`SrpError::RandomSource`] if the operating system random source fails.
    pub fn generate_ephemeral(&self) -> Result<ClientEphemeral, SrpError> {
        self.generate_ephemeral_with_rng(&mut rand::thread_rng())
    }

    /// Same as [`SrpClient::generate_ephemeral`] with a caller supplied random source.
    ///
    /// # Errors
    ///
    /// [`SrpError::RandomSource`] if `rng` fails.
    pub fn generate_ephemeral_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<ClientEphemeral, SrpError> {
        let secret = EphemeralSecret::randomized(rng, self.params.large_safe_prime())?;
        let public = calculate_client_public_key(&secret, &self.params);

        Ok(ClientEphemeral { secret, public })
    }

    /// Derives the session key and the client proof from the server public key `B`.
    ///
    /// `A` is recomputed from `a`. Use [`SrpClient::derive_session_with_public_ephemeral`]
    /// to pass it in instead.
    ///
    /// # Errors
    ///
    /// [`SrpError::InvalidEphemeral`] if `B` is `0 (mod N)` or `u` is zero.
    /// The attempt must be restarted with new ephemerals.
    pub fn derive_session(
        &self,
        client_secret_ephemeral: &EphemeralSecret,
        server_public_ephemeral: &PublicKey,
        salt: &Salt,
        identity: &str,
        private_key: &PrivateKey,
    ) -> Result<ClientSession, SrpError> {
        let client_public_ephemeral =
            calculate_client_public_key(client_secret_ephemeral, &self.params);

        self.derive_session_with_public_ephemeral(
            client_secret_ephemeral,
            &client_public_ephemeral,
            server_public_ephemeral,
            salt,
            identity,
            private_key,
        )
    }

    /// Same as [`SrpClient::derive_session`] but with an already calculated `A`.
    ///
    /// `client_public_ephemeral` must be the value sent to the server, otherwise
    /// the server rejects the proof.
    ///
    /// # Errors
    ///
    /// [`SrpError::InvalidEphemeral`] if `B` is `0 (mod N)` or `u` is zero.
    pub fn derive_session_with_public_ephemeral(
        &self,
        client_secret_ephemeral: &EphemeralSecret,
        client_public_ephemeral: &PublicKey,
        server_public_ephemeral: &PublicKey,
        salt: &Salt,
        identity: &str,
        private_key: &PrivateKey,
    ) -> Result<ClientSession, SrpError> {
        let (key, proof) = srp_internal_client::derive_client_session(
            client_secret_ephemeral,
            client_public_ephemeral,
            server_public_ephemeral,
            salt,
            identity,
            private_key,
            &self.params,
        )
        .map_err(|e| {
            tracing::debug!(group = %self.group(), error = %e, "client session aborted");
            e
        })?;

        Ok(ClientSession { key, proof })
    }

    /// Verifies the server proof `M2` against the session.
    ///
    /// Only after this succeeds has the server proven knowledge of the verifier,
    /// and only then may [`ClientSession::key`] be used.
    ///
    /// # Errors
    ///
    /// [`SrpError::InvalidServerProof`] if the proofs do not match.
    pub fn verify_session(
        &self,
        client_public_ephemeral: &PublicKey,
        session: &ClientSession,
        server_proof: &Proof,
    ) -> Result<(), SrpError> {
        verify_server_proof(
            client_public_ephemeral,
            &session.proof,
            &session.key,
            server_proof,
            &self.params,
        )
        .map_err(|e| {
            tracing::debug!(group = %self.group(), error = %e, "server proof rejected");
            e
        })
    }
}

/// [`SrpClient::generate_salt`] with the default group and SHA-256.
///
/// # Errors
///
/// [`SrpError::RandomSource`] if the operating system random source fails.
pub fn generate_salt() -> Result<Salt, SrpError> {
    SrpClient::default().generate_salt()
}

/// [`SrpClient::derive_private_key`] with the default group and SHA-256.
#[must_use]
pub fn derive_private_key(salt: &Salt, identity: &str, password: &str) -> PrivateKey {
    SrpClient::default().derive_private_key(salt, identity, password)
}

/// [`SrpClient::derive_verifier`] with the default group and SHA-256.
#[must_use]
pub fn derive_verifier(private_key: &PrivateKey) -> Verifier {
    SrpClient::default().derive_verifier(private_key)
}

/// [`SrpClient::generate_ephemeral`] with the default group and SHA-256.
///
/// # Errors
///
/// [`SrpError::RandomSource`] if the operating system random source fails.
pub fn generate_client_ephemeral() -> Result<ClientEphemeral, SrpError> {
    SrpClient::default().generate_ephemeral()
}

/// [`SrpClient::derive_session`] with the default group and SHA-256.
///
/// # Errors
///
/// See [`SrpClient::derive_session`].
pub fn derive_client_session(
    client_secret_ephemeral: &EphemeralSecret,
    server_public_ephemeral: &PublicKey,
    salt: &Salt,
    identity: &str,
    private_key: &PrivateKey,
) -> Result<ClientSession, SrpError> {
    SrpClient::default().derive_session(
        client_secret_ephemeral,
        server_public_ephemeral,
        salt,
        identity,
        private_key,
    )
}

/// [`SrpClient::verify_session`] with the default group and SHA-256.
///
/// # Errors
///
/// See [`SrpClient::verify_session`].
pub fn verify_session(
    client_public_ephemeral: &PublicKey,
    session: &ClientSession,
    server_proof: &Proof,
) -> Result<(), SrpError> {
    SrpClient::default().verify_session(client_public_ephemeral, session, server_proof)
}
