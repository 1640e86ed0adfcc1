use digest::Digest;

/// `H(parts[0] | parts[1] | ...)`.
pub(crate) fn hash<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut d = D::new();
    for part in parts {
        d.update(part);
    }
    d.finalize().to_vec()
}

pub(crate) fn hash_length<D: Digest>() -> usize {
    <D as Digest>::output_size()
}

#[cfg(test)]
mod test {
    use crate::hash::{hash, hash_length};
    use hex_literal::hex;
    use sha2::Sha256;

    #[test]
    fn concatenates_in_call_order() {
        let joined = hash::<Sha256>(&[b"ab", b"c"]);
        let single = hash::<Sha256>(&[b"abc"]);
        assert_eq!(joined, single);
        assert_eq!(
            single,
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            hash::<Sha256>(&[]),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
        assert_eq!(hash_length::<Sha256>(), 32);
    }
}
