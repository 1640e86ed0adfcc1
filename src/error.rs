//! The various errors that can happen during the SRP-6a process.
//!
//! [`SrpError`] is an enum that can represent all the error types.
//! Every variant is fatal to the authentication attempt it was returned from.
//! No partial session key is ever returned alongside an error, so the only
//! correct reaction is to restart the attempt with fresh ephemerals.
//!
//! [`InvalidEphemeralError`] describes why a public ephemeral or the scrambling
//! parameter `u` was rejected.
//!
//! Whether repeated [`SrpError::InvalidEphemeral`] or [`SrpError::InvalidClientProof`]
//! errors should be treated as an attack signal is left to the application.

use thiserror::Error;

/// Enum that covers all SRP-6a error types.
#[derive(Debug, Error)]
pub enum SrpError {
    /// The requested group bit size is not one of 1024, 1536, 2048, 3072 or 4096.
    #[error("Unsupported group size: {0} bits.")]
    InvalidGroup(u32),
    /// The peer public ephemeral is `0 (mod N)` or the scrambling parameter is zero.
    #[error(transparent)]
    InvalidEphemeral(#[from] InvalidEphemeralError),
    /// The client proof received by the server does not match.
    ///
    /// Usually because of a wrong password.
    /// Neither the server proof nor the session key may be released.
    #[error("Client proof does not match.")]
    InvalidClientProof,
    /// The server proof received by the client does not match.
    ///
    /// The session key must not be trusted.
    #[error("Server proof does not match.")]
    InvalidServerProof,
    /// A wire value is not valid hexadecimal.
    #[error("Value is not valid hex: {0}")]
    InvalidEncoding(#[from] hex::FromHexError),
    /// The secure random source failed.
    #[error("Random number generator failed: {0}")]
    RandomSource(#[from] rand::Error),
}

/// A public ephemeral is invalid either if it is equal to 0, or the public ephemeral modulus the
/// large safe prime is zero.
/// The scrambling parameter `u` is invalid if it is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidEphemeralError {
    /// The public ephemeral is zero.
    #[error("Public ephemeral is zero.")]
    PublicKeyIsZero,
    /// The public ephemeral modulus the large safe prime is zero.
    #[error("Public ephemeral modulus the large safe prime is zero.")]
    PublicKeyModLargeSafePrimeIsZero,
    /// `u = H(PAD(A) | PAD(B))` is zero.
    #[error("Scrambling parameter is zero.")]
    ScramblerIsZero,
}
