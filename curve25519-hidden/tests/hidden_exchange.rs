// -*- mode: rust; -*-
//
// This file is part of curve25519-hidden.
// See LICENSE for licensing information.

//! Integration test: an X25519 exchange carried over hidden encodings.

use rand::{thread_rng, Rng};

use curve25519_hidden::{hide, mul_base_dirty, unhide, x25519, MontgomeryPoint};

/// A dirty ephemeral key together with a hidden encoding of its public point.
fn hidden_keypair() -> ([u8; 32], [u8; 32]) {
    let mut rng = thread_rng();
    loop {
        let secret: [u8; 32] = rng.gen();
        if let Some(representative) = hide(&mul_base_dirty(&secret), rng.gen()) {
            return (secret, representative);
        }
    }
}

#[test]
fn exchange_over_representatives() {
    for _ in 0..100 {
        let (alice_secret, alice_hidden) = hidden_keypair();
        let (bob_secret, bob_hidden) = hidden_keypair();

        let alice_shared = x25519(alice_secret, unhide(&bob_hidden).to_bytes());
        let bob_shared = x25519(bob_secret, unhide(&alice_hidden).to_bytes());
        assert_eq!(alice_shared, bob_shared);
    }
}

#[test]
fn shared_points_hide_about_half_the_time() {
    let mut hidden = 0usize;
    for _ in 0..2_000 {
        let (alice_secret, _) = hidden_keypair();
        let (_, bob_hidden) = hidden_keypair();
        let shared = MontgomeryPoint(x25519(alice_secret, unhide(&bob_hidden).to_bytes()));
        if hide(&shared, 0).is_some() {
            hidden += 1;
        }
    }
    assert!((800..=1200).contains(&hidden), "hidden: {hidden}");
}
