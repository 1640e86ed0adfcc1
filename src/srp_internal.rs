//! Computations shared by the client and the server, and the server only computations.
//!
//! Notation follows [RFC2945] and [RFC5054]:
//!
//! * `N` the large safe prime, `g` the generator and `k = H(N | PAD(g))` the multiplier.
//! * `H()` the configured hash function.
//! * `PAD()` left pads with zeros to the length of `N`.
//! * `|` concatenation.
//!
//! [RFC2945]: https://tools.ietf.org/html/rfc2945
//! [RFC5054]: https://tools.ietf.org/html/rfc5054

use digest::Digest;

use crate::bigint;
use crate::error::{InvalidEphemeralError, SrpError};
use crate::hash::{hash, hash_length};
use crate::key::{EphemeralSecret, PrivateKey, Proof, PublicKey, Salt, SessionKey, Verifier};
use crate::primes::GroupParameters;
use zeroize::Zeroizing;

/// `k = H(N | PAD(g))`.
pub(crate) fn calculate_k<D: Digest>(params: &GroupParameters<D>) -> bigint::Integer {
    let n = params.large_safe_prime().to_bytes_be();
    let g = params.pad(params.generator());

    bigint::Integer::from_bytes_be(&hash::<D>(&[&n, &g]))
}

/// `H(N) xor H(g)`, the first part of the client proof.
///
/// `g` is hashed without padding.
pub(crate) fn calculate_xor_hash<D: Digest>(params: &GroupParameters<D>) -> Vec<u8> {
    let large_safe_prime_hash = hash::<D>(&[&params.large_safe_prime().to_bytes_be()]);
    let g_hash = hash::<D>(&[&params.generator().to_bytes_be()]);

    large_safe_prime_hash
        .iter()
        .zip(g_hash.iter())
        .map(|(n, g)| n ^ g)
        .collect()
}

/// Calculate the `x` value which is used for generating the password verifier `v`. See [calculate_password_verifier].
///
/// `x` is calculated as `H( salt | H( identity | : | password ) ) % N` as described on page 3 of [RFC2945]
/// and page 8 of [RFC5054].
///
/// Identity and password are hashed as their UTF-8 bytes with no normalization.
/// Empty values are valid.
///
/// Notice that `x` should only be calculated when a user registers or changes their password,
/// and when the client authenticates. It must never be stored.
///
/// [RFC2945]: https://tools.ietf.org/html/rfc2945
/// [RFC5054]: https://tools.ietf.org/html/rfc5054
pub(crate) fn calculate_x<D: Digest>(
    identity: &str,
    password: &str,
    salt: &Salt,
    params: &GroupParameters<D>,
) -> PrivateKey {
    let p = Zeroizing::new(
        D::new()
            .chain_update(identity.as_bytes())
            .chain_update(b":")
            .chain_update(password.as_bytes())
            .finalize()
            .to_vec(),
    );
    let x = Zeroizing::new(hash::<D>(&[salt.as_be(), p.as_slice()]));

    let x = bigint::Integer::from_bytes_be(&x);

    (x % params.large_safe_prime().clone()).into()
}

/// `v = g^x % N`.
pub(crate) fn calculate_password_verifier<D: Digest>(
    x: &PrivateKey,
    params: &GroupParameters<D>,
) -> Verifier {
    params
        .generator()
        .modpow(&x.to_bigint(), params.large_safe_prime())
        .into()
}

/// `B = (k * v + g^b) % N`.
pub(crate) fn calculate_server_public_key<D: Digest>(
    password_verifier: &Verifier,
    server_private_key: &EphemeralSecret,
    params: &GroupParameters<D>,
) -> PublicKey {
    let large_safe_prime = params.large_safe_prime();

    let server_public_key = (params.k().clone() * password_verifier.to_bigint()
        + params
            .generator()
            .modpow(&server_private_key.to_bigint(), large_safe_prime))
        % large_safe_prime.clone();

    server_public_key.into()
}

/// Rejects a peer public ephemeral that is `0 (mod N)`.
///
/// Both sides must call this before any other computation with the peer value,
/// otherwise the peer can force `S` to zero.
pub(crate) fn validate_public_key<D: Digest>(
    public_key: &PublicKey,
    params: &GroupParameters<D>,
) -> Result<(), InvalidEphemeralError> {
    let key = public_key.to_bigint();

    if key.is_zero() {
        return Err(InvalidEphemeralError::PublicKeyIsZero);
    }
    if key.mod_large_safe_prime_is_zero(params.large_safe_prime()) {
        return Err(InvalidEphemeralError::PublicKeyModLargeSafePrimeIsZero);
    }

    Ok(())
}

/// `u = H(PAD(A) | PAD(B))`.
pub(crate) fn calculate_u<D: Digest>(
    client_public_key: &PublicKey,
    server_public_key: &PublicKey,
    params: &GroupParameters<D>,
) -> Result<bigint::Integer, InvalidEphemeralError> {
    let u = bigint::Integer::from_bytes_be(&hash::<D>(&[
        &params.pad(&client_public_key.to_bigint()),
        &params.pad(&server_public_key.to_bigint()),
    ]));

    if u.is_zero() {
        return Err(InvalidEphemeralError::ScramblerIsZero);
    }

    Ok(u)
}

/// Calculate the server `S` value, `(A * v^u % N)^b % N`.
#[allow(non_snake_case)] // There is no better descriptor than 'S'
pub(crate) fn calculate_server_S<D: Digest>(
    client_public_key: &PublicKey,
    password_verifier: &Verifier,
    u: &bigint::Integer,
    server_private_key: &EphemeralSecret,
    params: &GroupParameters<D>,
) -> bigint::Integer {
    let large_safe_prime = params.large_safe_prime();

    let vu = password_verifier.to_bigint().modpow(u, large_safe_prime);
    let avu = (client_public_key.to_bigint() * vu) % large_safe_prime.clone();

    avu.modpow(&server_private_key.to_bigint(), large_safe_prime)
}

/// `K = H(PAD(S))`.
#[allow(non_snake_case)]
pub(crate) fn calculate_session_key<D: Digest>(
    S: &bigint::Integer,
    params: &GroupParameters<D>,
) -> SessionKey {
    SessionKey::from_be_bytes(&hash::<D>(&[&params.pad(S)]))
}

/// `M1 = H(H(N) xor H(g) | H(I) | s | PAD(A) | PAD(B) | K)`.
pub(crate) fn calculate_client_proof<D: Digest>(
    identity: &str,
    session_key: &SessionKey,
    client_public_key: &PublicKey,
    server_public_key: &PublicKey,
    salt: &Salt,
    params: &GroupParameters<D>,
) -> Proof {
    let identity_hash = hash::<D>(&[identity.as_bytes()]);

    let out = hash::<D>(&[
        params.xor_hash(),
        &identity_hash,
        salt.as_be(),
        &params.pad(&client_public_key.to_bigint()),
        &params.pad(&server_public_key.to_bigint()),
        session_key.as_be(),
    ]);

    Proof::from_be_bytes(&out)
}

/// `M2 = H(PAD(A) | M1 | K)`.
///
/// `M1` is hashed at the full hash width.
pub(crate) fn calculate_server_proof<D: Digest>(
    client_public_key: &PublicKey,
    client_proof: &Proof,
    session_key: &SessionKey,
    params: &GroupParameters<D>,
) -> Proof {
    let m1 = bigint::Integer::from_bytes_be(client_proof.as_be())
        .to_padded_bytes_be(hash_length::<D>());

    let out = hash::<D>(&[
        &params.pad(&client_public_key.to_bigint()),
        &m1,
        session_key.as_be(),
    ]);

    Proof::from_be_bytes(&out)
}

/// Server side of the session derivation.
///
/// Validates `A`, recomputes `B`, derives `K` and only returns `M2` if `client_proof` matches.
pub(crate) fn derive_server_session<D: Digest>(
    server_private_key: &EphemeralSecret,
    client_public_key: &PublicKey,
    salt: &Salt,
    identity: &str,
    password_verifier: &Verifier,
    client_proof: &Proof,
    params: &GroupParameters<D>,
) -> Result<(SessionKey, Proof), SrpError> {
    validate_public_key(client_public_key, params)?;

    let server_public_key =
        calculate_server_public_key(password_verifier, server_private_key, params);
    let u = calculate_u(client_public_key, &server_public_key, params)?;

    #[allow(non_snake_case)]
    let S = calculate_server_S(
        client_public_key,
        password_verifier,
        &u,
        server_private_key,
        params,
    );
    let session_key = calculate_session_key(&S, params);

    let expected = calculate_client_proof(
        identity,
        &session_key,
        client_public_key,
        &server_public_key,
        salt,
        params,
    );

    if !client_proof.matches(&expected) {
        return Err(SrpError::InvalidClientProof);
    }

    let server_proof = calculate_server_proof(client_public_key, &expected, &session_key, params);

    Ok((session_key, server_proof))
}

#[cfg(test)]
mod test {
    use crate::error::InvalidEphemeralError;
    use crate::key::{EphemeralSecret, PublicKey, Salt};
    use crate::primes::{GroupParameters, SrpGroup};
    use crate::srp_internal::{
        calculate_password_verifier, calculate_server_S, calculate_server_public_key,
        calculate_u, calculate_x, calculate_xor_hash, validate_public_key,
    };
    use crate::srp_internal_client::{calculate_client_S, calculate_client_public_key};
    use hex_literal::hex;
    use sha1::Sha1;
    use sha2::Sha256;

    mod rfc5054 {
        // Test vectors from RFC5054 Appendix B. SHA-1 with the 1024-bit group.
        pub const IDENTITY: &str = "alice";
        pub const PASSWORD: &str = "password123";
        pub const SALT: &str = "BEB25379D1A8581EB5A727673A2441EE";
        pub const X: &str = "94B7555AABE9127CC58CCF4993DB6CF84D16C124";
        pub const V: &str = "7E273DE8696FFC4F4E337D05B4B375BEB0DDE1569E8FA00A9886D8129BADA1F1822223CA1A605B530E379BA4729FDC59F105B4787E5186F5C671085A1447B52A48CF1970B4FB6F8400BBF4CEBFBB168152E08AB5EA53D15C1AFF87B2B9DA6E04E058AD51CC72BFC9033B564E26480D78E955A5E29E7AB245DB2BE315E2099AFB";
        pub const A_PRIVATE: &str =
            "60975527035CF2AD1989806F0407210BC81EDC04E2762A56AFD529DDDA2D4393";
        pub const B_PRIVATE: &str =
            "E487CB59D31AC550471E81F00F6928E01DDA08E974A004F49E61F5D105284D20";
        pub const A_PUBLIC: &str = "61D5E490F6F1B79547B0704C436F523DD0E560F0C64115BB72557EC44352E8903211C04692272D8B2D1A5358A2CF1B6E0BFCF99F921530EC8E39356179EAE45E42BA92AEACED825171E1E8B9AF6D9C03E1327F44BE087EF06530E69F66615261EEF54073CA11CF5858F0EDFDFE15EFEAB349EF5D76988A3672FAC47B0769447B";
        pub const B_PUBLIC: &str = "BD0C61512C692C0CB6D041FA01BB152D4916A1E77AF46AE105393011BAF38964DC46A0670DD125B95A981652236F99D9B681CBF87837EC996C6DA04453728610D0C6DDB58B318885D7D82C7F8DEB75CE7BD4FBAA37089E6F9C6059F388838E7A00030B331EB76840910440B1B27AAEAEEB4012B7D7665238A8E3FB004B117B58";
        pub const U: &str = "CE38B9593487DA98554ED47D70A7AE5F462EF019";
        pub const PREMASTER_SECRET: &str = "B0DC82BABCF30674AE450C0287745E7990A3381F63B387AAF271A10D233861E359B48220F7C4693C9AE12B0A6F67809F0876E2D013800D6C41BB59B6D5979B5C00A172B4A2A5903A0BDCAF8A709585EB2AFAFA8F3499B200210DCC1F10EB33943CD67FC88A2F39A4BE5BEC4EC0A3212DC346D7E474B29EDE8A469FFECA686E5A";
    }

    fn params() -> GroupParameters<Sha1> {
        GroupParameters::new(SrpGroup::Rfc5054_1024)
    }

    fn decode(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    #[test]
    fn rfc5054_x() {
        let salt = Salt::from_hex(rfc5054::SALT).unwrap();
        let x = calculate_x(rfc5054::IDENTITY, rfc5054::PASSWORD, &salt, &params());
        assert_eq!(x.as_be(), decode(rfc5054::X).as_slice());
    }

    #[test]
    fn rfc5054_verifier() {
        let salt = Salt::from_hex(rfc5054::SALT).unwrap();
        let x = calculate_x(rfc5054::IDENTITY, rfc5054::PASSWORD, &salt, &params());
        let v = calculate_password_verifier(&x, &params());
        assert_eq!(v.as_be(), decode(rfc5054::V).as_slice());
    }

    #[test]
    fn rfc5054_public_keys() {
        let params = params();
        let a = EphemeralSecret::from_hex(rfc5054::A_PRIVATE).unwrap();
        let b = EphemeralSecret::from_hex(rfc5054::B_PRIVATE).unwrap();
        let v = crate::key::Verifier::from_hex(rfc5054::V).unwrap();

        let client_public_key = calculate_client_public_key(&a, &params);
        assert_eq!(client_public_key.as_be(), decode(rfc5054::A_PUBLIC).as_slice());

        let server_public_key = calculate_server_public_key(&v, &b, &params);
        assert_eq!(server_public_key.as_be(), decode(rfc5054::B_PUBLIC).as_slice());
    }

    #[test]
    #[allow(non_snake_case)]
    fn rfc5054_premaster_secret() {
        let params = params();
        let salt = Salt::from_hex(rfc5054::SALT).unwrap();
        let x = calculate_x(rfc5054::IDENTITY, rfc5054::PASSWORD, &salt, &params);
        let v = calculate_password_verifier(&x, &params);
        let a = EphemeralSecret::from_hex(rfc5054::A_PRIVATE).unwrap();
        let b = EphemeralSecret::from_hex(rfc5054::B_PRIVATE).unwrap();
        let A = PublicKey::from_hex(rfc5054::A_PUBLIC).unwrap();
        let B = PublicKey::from_hex(rfc5054::B_PUBLIC).unwrap();

        let u = calculate_u(&A, &B, &params).unwrap();
        assert_eq!(u.to_bytes_be(), decode(rfc5054::U));

        let client_S = calculate_client_S(&B, &x, &a, &u, &params);
        let server_S = calculate_server_S(&A, &v, &u, &b, &params);
        assert_eq!(client_S.to_bytes_be(), decode(rfc5054::PREMASTER_SECRET));
        assert_eq!(server_S.to_bytes_be(), decode(rfc5054::PREMASTER_SECRET));
    }

    #[test]
    fn xor_hash_is_hash_width() {
        let params = GroupParameters::<Sha256>::new(SrpGroup::Rfc5054_2048);
        let xor_hash = calculate_xor_hash(&params);
        assert_eq!(xor_hash.len(), 32);
        assert_eq!(
            xor_hash,
            hex!("4a76a9a2402bdd18123389b72ebbda50a30f65aedb90d7273130edea4b29cc4c")
        );
    }

    #[test]
    fn public_key_zero_and_multiples_are_rejected() {
        for group in SrpGroup::ALL {
            let params = GroupParameters::<Sha256>::new(group);
            let zero = PublicKey::from_hex("0").unwrap();
            assert_eq!(
                validate_public_key(&zero, &params),
                Err(InvalidEphemeralError::PublicKeyIsZero)
            );

            let prime = PublicKey::from_be_bytes(group.large_safe_prime());
            assert_eq!(
                validate_public_key(&prime, &params),
                Err(InvalidEphemeralError::PublicKeyModLargeSafePrimeIsZero)
            );

            let double = PublicKey::from(
                params.large_safe_prime().clone() * crate::bigint::Integer::from(2),
            );
            assert_eq!(
                validate_public_key(&double, &params),
                Err(InvalidEphemeralError::PublicKeyModLargeSafePrimeIsZero)
            );

            let one = PublicKey::from_hex("1").unwrap();
            assert_eq!(validate_public_key(&one, &params), Ok(()));
        }
    }
}
