use rand::SeedableRng;
use rand::rngs::StdRng;
use secp::{Context, Message, PublicKey, RecoverableSignature, SecretKey, Signature};
use sha2::{Digest, Sha256};
use tracing::info;

fn main() {
    tracing_subscriber::fmt::init();

    let mut rng = StdRng::seed_from_u64(42);
    let ctx = Context::with_seed(&[0x2a; 32]);

    let sk = SecretKey::random(&mut rng);
    let pk = sk.public_key(&ctx);
    info!(public_key = ?pk, "generated key pair");

    let sk_bytes = bincode::serialize(&sk).expect("serialize sk");
    let pk_bytes = bincode::serialize(&pk).expect("serialize pk");

    let digest: [u8; 32] = Sha256::digest(b"hello secp256k1").into();
    let msg = Message::from_bytes(digest);

    let sig = sk.sign(&ctx, &msg).expect("sign");
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");
    info!(der = %hex::encode(sig.to_der()), "signed message");

    let sk2: SecretKey = bincode::deserialize(&sk_bytes).expect("deserialize sk");
    let pk2: PublicKey = bincode::deserialize(&pk_bytes).expect("deserialize pk");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    assert!(pk2.verify(&ctx, &msg, &sig2));
    info!("signature verified");

    let recoverable: RecoverableSignature = sk2.sign_recoverable(&ctx, &msg).expect("sign");
    let recovered = PublicKey::recover(&ctx, &msg, &recoverable).expect("recover");
    assert_eq!(recovered, pk);
    info!(recovery_id = recoverable.recovery_id().to_u8(), "recovered public key");

    let peer = SecretKey::random(&mut rng);
    let ours = sk.ecdh(&ctx, &peer.public_key(&ctx)).expect("ecdh");
    let theirs = peer.ecdh(&ctx, &pk).expect("ecdh");
    assert_eq!(ours, theirs);
    info!("shared secrets match");
}

