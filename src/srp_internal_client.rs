use digest::Digest;

use crate::bigint;
use crate::error::SrpError;
use crate::key::{EphemeralSecret, PrivateKey, Proof, PublicKey, Salt, SessionKey};
use crate::primes::GroupParameters;
use crate::srp_internal::{
    calculate_client_proof, calculate_server_proof, calculate_session_key, calculate_u,
    validate_public_key,
};

pub(crate) fn calculate_client_public_key<D: Digest>(
    client_private_key: &EphemeralSecret,
    params: &GroupParameters<D>,
) -> PublicKey {
    // `A = g^a % N`
    params
        .generator()
        .modpow(&client_private_key.to_bigint(), params.large_safe_prime())
        .into()
}

#[allow(non_snake_case)]
pub(crate) fn calculate_client_S<D: Digest>(
    server_public_key: &PublicKey,
    x: &PrivateKey,
    client_private_key: &EphemeralSecret,
    u: &bigint::Integer,
    params: &GroupParameters<D>,
) -> bigint::Integer {
    let large_safe_prime = params.large_safe_prime();
    let x = x.to_bigint();

    // S = (B - (k * g^x % N))^(a + u * x) % N
    // Kept non-negative by adding N before subtracting.
    let kgx = (params.k().clone() * params.generator().modpow(&x, large_safe_prime))
        % large_safe_prime.clone();
    let b = server_public_key.to_bigint() % large_safe_prime.clone();
    let base = (b + large_safe_prime.clone() - kgx) % large_safe_prime.clone();

    base.modpow(
        &(client_private_key.to_bigint() + u.clone() * x),
        large_safe_prime,
    )
}

/// Client side of the session derivation.
///
/// Validates `B` before anything else. Returns `K` and `M1`.
pub(crate) fn derive_client_session<D: Digest>(
    client_private_key: &EphemeralSecret,
    client_public_key: &PublicKey,
    server_public_key: &PublicKey,
    salt: &Salt,
    identity: &str,
    x: &PrivateKey,
    params: &GroupParameters<D>,
) -> Result<(SessionKey, Proof), SrpError> {
    validate_public_key(server_public_key, params)?;

    let u = calculate_u(client_public_key, server_public_key, params)?;

    #[allow(non_snake_case)]
    let S = calculate_client_S(server_public_key, x, client_private_key, &u, params);
    let session_key = calculate_session_key(&S, params);

    let client_proof = calculate_client_proof(
        identity,
        &session_key,
        client_public_key,
        server_public_key,
        salt,
        params,
    );

    Ok((session_key, client_proof))
}

/// Recomputes `M2 = H(PAD(A) | M1 | K)` and compares it with `server_proof` in constant time.
pub(crate) fn verify_server_proof<D: Digest>(
    client_public_key: &PublicKey,
    client_proof: &Proof,
    session_key: &SessionKey,
    server_proof: &Proof,
    params: &GroupParameters<D>,
) -> Result<(), SrpError> {
    let expected = calculate_server_proof(client_public_key, client_proof, session_key, params);

    if !server_proof.matches(&expected) {
        return Err(SrpError::InvalidServerProof);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use crate::error::{InvalidEphemeralError, SrpError};
    use crate::key::{EphemeralSecret, PrivateKey, Proof, PublicKey, Salt};
    use crate::primes::{GroupParameters, SrpGroup};
    use crate::srp_internal::derive_server_session;
    use crate::srp_internal::{calculate_password_verifier, calculate_server_public_key};
    use crate::srp_internal_client::{
        calculate_client_public_key, derive_client_session, verify_server_proof,
    };
    use sha2::Sha256;

    // Fixed inputs, expected values computed independently.
    const SALT: &str = "c0ffee00c0ffee00c0ffee00c0ffee00";
    const IDENTITY: &str = "test_user@example.com";
    const X: &str = "4c4e0e8b9a2f1d2c3b4a59687766554433221100ffeeddccbbaa998877665544";
    const A_PRIVATE: &str = "0101010101010101010101010101010101010101010101010101010101010101";
    const B_PRIVATE: &str = "0202020202020202020202020202020202020202020202020202020202020202";

    fn params() -> GroupParameters<Sha256> {
        GroupParameters::new(SrpGroup::Rfc5054_2048)
    }

    #[test]
    fn client_and_server_agree() {
        let params = params();
        let salt = Salt::from_hex(SALT).unwrap();
        let x = PrivateKey::from_hex(X).unwrap();
        let v = calculate_password_verifier(&x, &params);
        let a = EphemeralSecret::from_hex(A_PRIVATE).unwrap();
        let b = EphemeralSecret::from_hex(B_PRIVATE).unwrap();

        let client_public_key = calculate_client_public_key(&a, &params);
        let server_public_key = calculate_server_public_key(&v, &b, &params);

        let (client_key, client_proof) = derive_client_session(
            &a,
            &client_public_key,
            &server_public_key,
            &salt,
            IDENTITY,
            &x,
            &params,
        )
        .unwrap();

        let (server_key, server_proof) = derive_server_session(
            &b,
            &client_public_key,
            &salt,
            IDENTITY,
            &v,
            &client_proof,
            &params,
        )
        .unwrap();

        assert_eq!(client_key, server_key);
        verify_server_proof(
            &client_public_key,
            &client_proof,
            &client_key,
            &server_proof,
            &params,
        )
        .unwrap();
    }

    #[test]
    fn server_public_key_zero_is_rejected() {
        let params = params();
        let a = EphemeralSecret::from_hex(A_PRIVATE).unwrap();
        let client_public_key = calculate_client_public_key(&a, &params);

        let e = derive_client_session(
            &a,
            &client_public_key,
            &PublicKey::from_hex("0").unwrap(),
            &Salt::from_hex(SALT).unwrap(),
            IDENTITY,
            &PrivateKey::from_hex(X).unwrap(),
            &params,
        );

        assert!(matches!(
            e,
            Err(SrpError::InvalidEphemeral(
                InvalidEphemeralError::PublicKeyIsZero
            ))
        ));
    }

    #[test]
    fn wrong_server_proof_is_rejected() {
        let params = params();
        let a = EphemeralSecret::from_hex(A_PRIVATE).unwrap();
        let client_public_key = calculate_client_public_key(&a, &params);
        let session_key = crate::key::SessionKey::from_hex(X).unwrap();
        let client_proof = Proof::from_hex(X).unwrap();

        let e = verify_server_proof(
            &client_public_key,
            &client_proof,
            &session_key,
            &Proof::from_hex("00").unwrap(),
            &params,
        );

        assert!(matches!(e, Err(SrpError::InvalidServerProof)));
    }
}
