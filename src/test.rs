use crate::client::SrpClient;
use crate::key::{Proof, PublicKey, Salt, Verifier};
use crate::primes::SrpGroup;
use crate::server::SrpServer;

#[test]
fn authenticate_with_self() {
    let identity = "A";
    let password = "A";

    let client = SrpClient::new(SrpGroup::Rfc5054_2048);
    let server = SrpServer::new(SrpGroup::Rfc5054_2048);

    // Registration values go through their wire form like they would through a database.
    let client_salt = client.generate_salt().unwrap();
    let x = client.derive_private_key(&client_salt, identity, password);
    let stored_verifier = client.derive_verifier(&x).to_hex();
    let stored_salt = client_salt.to_hex();

    let server_salt = Salt::from_hex(&stored_salt).unwrap();
    let password_verifier = Verifier::from_hex(&stored_verifier).unwrap();
    let server_ephemeral = server.generate_ephemeral(&password_verifier).unwrap();
    let server_public_key = server_ephemeral.public().to_hex();

    let client_ephemeral = client.generate_ephemeral().unwrap();
    let client_public_key = client_ephemeral.public().to_hex();
    let client_session = client
        .derive_session(
            client_ephemeral.secret(),
            &PublicKey::from_hex(&server_public_key).unwrap(),
            &client_salt,
            identity,
            &x,
        )
        .unwrap();

    let server_session = match server.derive_session(
        server_ephemeral.secret(),
        &PublicKey::from_hex(&client_public_key).unwrap(),
        &server_salt,
        identity,
        &password_verifier,
        &Proof::from_hex(&client_session.proof().to_hex()).unwrap(),
    ) {
        Ok(s) => s,
        Err(e) => {
            panic!(
                "'{}'\
                \nverifier: {}\
                \nclient_salt: {}\
                \nserver_salt: {}\
                \nserver_public_key: {}\
                \nclient_public_key: {}",
                e,
                stored_verifier,
                client_salt,
                server_salt,
                server_public_key,
                client_public_key,
            )
        }
    };

    let server_proof = Proof::from_hex(&server_session.proof().to_hex()).unwrap();
    if let Err(e) = client.verify_session(client_ephemeral.public(), &client_session, &server_proof)
    {
        panic!(
            "'{}'\
            \nverifier: {}\
            \nserver_public_key: {}\
            \nclient_public_key: {}",
            e, stored_verifier, server_public_key, client_public_key,
        )
    }

    assert_eq!(server_session.key(), client_session.key());
}
