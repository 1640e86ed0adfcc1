//! An implementation of the SRP-6a password authenticated key exchange
//! as described in [RFC2945] and [RFC5054].
//!
//! The client proves knowledge of a password to a server that only stores a salt and a
//! password verifier, and both sides end up with the same session key.
//! Neither the password nor anything that allows an offline guess against it is transmitted.
//!
//! The crate only does the math. Transport, account storage, rate limiting and session
//! management are left to the caller.
//!
//! # Usage
//!
//! The crate is split into:
//! * A [`client`] module containing [`SrpClient`].
//! * A [`server`] module containing [`SrpServer`].
//! * A [`key`] module with the strongly typed values exchanged between them.
//! * An [`error`] module for errors that are shared by all modules.
//!
//! Both façades are configured with an [`SrpGroup`] and optionally a hash function,
//! SHA-256 by default. Client and server must use the same configuration.
//!
//! For the default 2048 bit group with SHA-256 there are free functions such as
//! [`derive_private_key`] and [`derive_server_session`] that skip creating a façade.
//!
//! All values cross the wire as lowercase big endian hex.
//! Integers are sent without leading zeros and parsing ignores case and leading zeros.
//!
//! ```toml
//! [dependencies]
//! srp6a = "0.1"
//! ```
//!
//! Then go to either the [`client`] module or [`server`] module for specific instructions.
//!
//! # Features
//!
//! * `srp-default-math` (default) uses [`num-bigint`](https://crates.io/crates/num-bigint).
//! * `srp-fast-math` uses [`rug`](https://crates.io/crates/rug), which requires GMP.
//! * `serde` implements `Serialize` and `Deserialize` for [`SrpGroup`] and the public wire values.
//!
//! # Other implementations
//!
//! * [srp](https://crates.io/crates/srp) from RustCrypto.
//! * [thinbus-srp-npm](https://github.com/simbo1905/thinbus-srp-npm) for JavaScript.
//!
//! [RFC2945]: https://tools.ietf.org/html/rfc2945
//! [RFC5054]: https://tools.ietf.org/html/rfc5054

#![doc(html_root_url = "https://docs.rs/srp6a/0.1.0")]
#![forbid(unsafe_code)]
#![warn(
    clippy::perf,
    clippy::correctness,
    clippy::style,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::unseparated_literal_suffix,
    missing_docs
)]

pub use client::{
    derive_client_session, derive_private_key, derive_verifier, generate_client_ephemeral,
    generate_salt, verify_session, ClientEphemeral, ClientSession, SrpClient,
};
pub use error::{InvalidEphemeralError, SrpError};
pub use key::{
    EphemeralSecret, PrivateKey, Proof, PublicKey, Salt, SessionKey, Verifier,
    EPHEMERAL_SECRET_LENGTH, SALT_LENGTH,
};
pub use primes::{GroupParameters, SrpGroup};
pub use server::{
    derive_server_session, generate_server_ephemeral, ServerEphemeral, ServerSession, SrpServer,
};

pub(crate) mod bigint;
pub mod client;
pub mod error;
pub(crate) mod hash;
pub(crate) mod hex;
pub mod key;
pub(crate) mod primes;
pub mod server;
pub(crate) mod srp_internal;
pub(crate) mod srp_internal_client;
#[cfg(test)]
mod test;
