use criterion::{black_box, criterion_group, criterion_main, Criterion};
use srp6a::{Salt, SrpClient, SrpGroup, SrpServer, Verifier};

fn authenticate(client: &SrpClient, server: &SrpServer, salt: &Salt, verifier: &Verifier) {
    let client_ephemeral = client.generate_ephemeral().unwrap();
    let server_ephemeral = server.generate_ephemeral(verifier).unwrap();

    let x = client.derive_private_key(salt, black_box("A"), black_box("A"));
    let client_session = client
        .derive_session(
            client_ephemeral.secret(),
            server_ephemeral.public(),
            salt,
            "A",
            &x,
        )
        .unwrap();

    let server_session = server
        .derive_session(
            server_ephemeral.secret(),
            client_ephemeral.public(),
            salt,
            "A",
            verifier,
            client_session.proof(),
        )
        .unwrap();

    client
        .verify_session(
            client_ephemeral.public(),
            &client_session,
            server_session.proof(),
        )
        .unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let salt: Salt = black_box("789cd089496c155b1c160dff637447669e4641bd99f48f0dd6c8a05ed970ce7d")
        .parse()
        .unwrap();

    for group in [SrpGroup::Rfc5054_1024, SrpGroup::Rfc5054_2048, SrpGroup::Rfc5054_4096] {
        let client = SrpClient::new(group);
        let server = SrpServer::new(group);
        let verifier = client.derive_verifier(&client.derive_private_key(&salt, "A", "A"));

        c.bench_function(&format!("authenticate {}", group), |b| {
            b.iter(|| authenticate(&client, &server, &salt, &verifier))
        });
    }

    c.bench_function("register", |b| {
        let client = SrpClient::default();
        b.iter(|| {
            let salt = client.generate_salt().unwrap();
            let x = client.derive_private_key(&salt, black_box("A"), black_box("A"));
            client.derive_verifier(&x)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
