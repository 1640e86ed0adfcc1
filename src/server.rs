//! Contains all functionality related to the server part,
//! including the generation of values for the account store.
//!
//! All wire values are **big endian** and exchanged as hex, see [`crate::key`].
//!
//! # Generating stored values
//!
//! When signing up a new user the client, or a trusted registration service, derives the
//! salt and password verifier which are then stored by identity.
//! The server never needs the password, only the [`Salt`] and [`Verifier`].
//!
//! This could look something like this:
//! ```
//! use srp6a::{SrpError, SrpGroup, SrpServer};
//! use srp6a::key::{Salt, Verifier};
//!
//! fn register(identity: &str, password: &str) -> Result<(), SrpError> {
//!     let server = SrpServer::new(SrpGroup::Rfc5054_2048);
//!
//!     let salt = server.generate_salt()?;
//!     let x = server.derive_private_key(&salt, identity, password);
//!     let verifier = server.derive_verifier(&x);
//!
//!     save_values_to_database(identity, &salt, &verifier);
//!     Ok(())
//! }
//!
//! fn save_values_to_database(identity: &str, salt: &Salt, verifier: &Verifier) {
//!     // Store `salt.to_hex()` and `verifier.to_hex()`.
//! }
//! # register("alice", "password123").unwrap();
//! ```
//!
//! # Authenticating on the server
//!
//! * [`SrpServer::generate_ephemeral`] is called with the stored verifier. The public part `B`
//! is sent to the client together with the salt, the secret part `b` is kept.
//! * [`SrpServer::derive_session`] is called with the client public key `A` and the client proof.
//! It only returns the server proof `M2` after the client proof has been verified.
//!
//! The server does _NOT_ provide any rate limiting or expiration of pending attempts,
//! that is up to the caller.

use digest::Digest;
use rand::{CryptoRng, RngCore};
use sha2::Sha256;

use crate::error::SrpError;
use crate::key::{EphemeralSecret, PrivateKey, Proof, PublicKey, Salt, SessionKey, Verifier};
use crate::primes::{GroupParameters, SrpGroup};
use crate::srp_internal;
use crate::srp_internal::{calculate_password_verifier, calculate_server_public_key, calculate_x};

/// Server ephemeral key pair for a single authentication attempt.
#[derive(Debug, Clone)]
pub struct ServerEphemeral {
    secret: EphemeralSecret,
    public: PublicKey,
}

impl ServerEphemeral {
    /// Called `b` in [RFC2945](https://tools.ietf.org/html/rfc2945).
    #[doc(alias = "b")]
    #[must_use]
    pub const fn secret(&self) -> &EphemeralSecret {
        &self.secret
    }

    /// Called `B` in [RFC2945](https://tools.ietf.org/html/rfc2945).
    #[doc(alias = "B")]
    #[must_use]
    pub const fn public(&self) -> &PublicKey {
        &self.public
    }
}

/// Result of a successful [`SrpServer::derive_session`].
///
/// Existence of this struct means the client has proven knowledge of the password.
#[derive(Debug, Clone)]
pub struct ServerSession {
    key: SessionKey,
    proof: Proof,
}

impl ServerSession {
    /// Called `K` in [RFC2945](https://tools.ietf.org/html/rfc2945).
    #[doc(alias = "K")]
    #[must_use]
    pub const fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Called `M2` in [RFC5054](https://tools.ietf.org/html/rfc5054).
    /// Sent to the client so it can verify the server.
    #[doc(alias = "M2")]
    #[must_use]
    pub const fn proof(&self) -> &Proof {
        &self.proof
    }
}

/// Server side of SRP-6a for one group and hash function.
///
/// Defaults to SHA-256. Use [`SrpServer::with_digest`] for any other [`Digest`].
pub struct SrpServer<D = Sha256> {
    params: GroupParameters<D>,
}

impl<D> Clone for SrpServer<D> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
        }
    }
}

impl<D> std::fmt::Debug for SrpServer<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SrpServer")
            .field("params", &self.params)
            .finish()
    }
}

impl SrpServer {
    /// Creates a SHA-256 server for `group`.
    #[must_use]
    pub fn new(group: SrpGroup) -> Self {
        Self::with_digest(group)
    }
}

impl Default for SrpServer {
    fn default() -> Self {
        Self::new(SrpGroup::default())
    }
}

impl<D: Digest> SrpServer<D> {
    /// Creates a server for `group` using `D` as the hash function.
    #[must_use]
    pub fn with_digest(group: SrpGroup) -> Self {
        Self::from_parameters(GroupParameters::new(group))
    }

    /// Creates a server from already built parameters.
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

    /// Generates a new random salt.
    ///
    /// # Errors
    ///
    /// [`SrpError::RandomSource`] if the operating system random source fails.
    pub fn generate_salt(&self) -> Result<Salt, SrpError> {
        self.generate_salt_with_rng(&mut rand::thread_rng())
    }

    /// Same as [`SrpServer::generate_salt`] with a caller supplied random source.
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

    /// Identical to [`SrpClient::derive_private_key`](crate::SrpClient::derive_private_key).
    #[doc(alias = "x")]
    #[must_use]
    pub fn derive_private_key(&self, salt: &Salt, identity: &str, password: &str) -> PrivateKey {
        calculate_x(identity, password, salt, &self.params)
    }

    /// Identical to [`SrpClient::derive_verifier`](crate::SrpClient::derive_verifier).
    #[doc(alias = "v")]
    #[must_use]
    pub fn derive_verifier(&self, private_key: &PrivateKey) -> Verifier {
        calculate_password_verifier(private_key, &self.params)
    }

    /// Generates `b` in `[1, N)` and `B = (k * v + g^b) % N`.
    ///
    /// # Errors
    ///
    /// [`SrpError::RandomSource`] if the operating system random source fails.
    pub fn generate_ephemeral(&self, verifier: &Verifier) -> Result<ServerEphemeral, SrpError> {
        self.generate_ephemeral_with_rng(verifier, &mut rand::thread_rng())
    }

    /// Same as [`SrpServer::generate_ephemeral`] with a caller supplied random source.
    ///
    /// # Errors
    ///
    /// [`SrpError::RandomSource`] if `rng` fails.
    pub fn generate_ephemeral_with_rng<R: RngCore + CryptoRng>(
        &self,
        verifier: &Verifier,
        rng: &mut R,
    ) -> Result<ServerEphemeral, SrpError> {
        loop {
            let secret = EphemeralSecret::randomized(rng, self.params.large_safe_prime())?;
            let public = calculate_server_public_key(verifier, &secret, &self.params);

            // The client would reject it.
            if public.to_bigint().is_zero() {
                tracing::trace!(group = %self.group(), "server public ephemeral is zero, redrawing");
                continue;
            }

            return Ok(ServerEphemeral { secret, public });
        }
    }

    /// Verifies the client proof and derives the session key.
    ///
    /// `server_secret_ephemeral` must be the secret from the [`ServerEphemeral`] whose public key
    /// was sent to this client, and `verifier` the one it was generated with.
    ///
    /// # Errors
    ///
    /// * [`SrpError::InvalidEphemeral`] if `A` is `0 (mod N)` or `u` is zero.
    /// * [`SrpError::InvalidClientProof`] if the client proof does not match,
    /// usually because of a wrong password. Nothing about the session is released.
    pub fn derive_session(
        &self,
        server_secret_ephemeral: &EphemeralSecret,
        client_public_ephemeral: &PublicKey,
        salt: &Salt,
        identity: &str,
        verifier: &Verifier,
        client_proof: &Proof,
    ) -> Result<ServerSession, SrpError> {
        let (key, proof) = srp_internal::derive_server_session(
            server_secret_ephemeral,
            client_public_ephemeral,
            salt,
            identity,
            verifier,
            client_proof,
            &self.params,
        )
        .map_err(|e| {
            tracing::debug!(group = %self.group(), error = %e, "server session aborted");
            e
        })?;

        Ok(ServerSession { key, proof })
    }
}

/// [`SrpServer::generate_ephemeral`] with the default group and SHA-256.
///
/// # Errors
///
/// [`SrpError::RandomSource`] if the operating system random source fails.
pub fn generate_server_ephemeral(verifier: &Verifier) -> Result<ServerEphemeral, SrpError> {
    SrpServer::default().generate_ephemeral(verifier)
}

/// [`SrpServer::derive_session`] with the default group and SHA-256.
///
/// # Errors
///
/// See [`SrpServer::derive_session`].
pub fn derive_server_session(
    server_secret_ephemeral: &EphemeralSecret,
    client_public_ephemeral: &PublicKey,
    salt: &Salt,
    identity: &str,
    verifier: &Verifier,
    client_proof: &Proof,
) -> Result<ServerSession, SrpError> {
    SrpServer::default().derive_session(
        server_secret_ephemeral,
        client_public_ephemeral,
        salt,
        identity,
        verifier,
        client_proof,
    )
}
