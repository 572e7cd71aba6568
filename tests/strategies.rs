use std::thread;

use saphash::derivation::{
    HeapScratch, PooledScratch, SapParams, ScratchBuffer, StackScratch, Strategy, chain_into,
    sap_hash, sap_hash_naive, sap_hash_strategy, sap_hash_unrolled_with, sap_hash_with,
};
use saphash::derivation::sap::scratch::{POOL_CAPACITY, STACK_SCRATCH_LEN};
use saphash::hash::{ChainDigest, HashAlgorithm};

const PASSWORD: &str = "Klartext-Kennwort";
const SALT: [u8; 16] = [
    0x0f, 0x8e, 0x11, 0x3e, 0xc6, 0x39, 0x8b, 0x93, 0x15, 0xff, 0x4a, 0xf3, 0xac, 0x5c, 0xd6, 0x25,
];

fn all_strategies_agree(password: &str, salt: &[u8], params: &SapParams) {
    let expected = sap_hash_naive(password, salt, params).unwrap();

    for strategy in Strategy::ALL {
        let got = sap_hash_strategy(password, salt, params, strategy).unwrap();
        assert_eq!(
            got,
            expected,
            "strategy {} diverges for {} x {}",
            strategy.name(),
            params.algorithm,
            params.rounds
        );
    }
}

// -------------------------------------------------------
// 1. STRATEGY EQUIVALENCE
// -------------------------------------------------------

#[test]
fn strategies_agree_on_reference_vector() {
    let params = SapParams::new(HashAlgorithm::Sha1, 5000);

    for strategy in Strategy::ALL {
        let got = sap_hash_strategy(PASSWORD, &SALT, &params, strategy).unwrap();
        assert_eq!(got.to_hex(), "ca9c3dedfc17a8bd76346b1780e0f284db57572a");
    }
}

#[test]
fn strategies_agree_for_every_algorithm() {
    for algorithm in HashAlgorithm::ALL {
        all_strategies_agree(PASSWORD, &SALT, &SapParams::new(algorithm, 64));
    }
}

#[test]
fn unrolled_schedule_handles_every_remainder() {
    // Rounds around multiples of the unroll factor, including the first one.
    for rounds in 1..=13 {
        let params = SapParams::new(HashAlgorithm::Sha256, rounds);
        let expected = sap_hash_naive(PASSWORD, &SALT, &params).unwrap();

        assert_eq!(
            sap_hash_unrolled_with::<HeapScratch>(PASSWORD, &SALT, &params).unwrap(),
            expected
        );
        assert_eq!(
            sap_hash_unrolled_with::<StackScratch>(PASSWORD, &SALT, &params).unwrap(),
            expected
        );
        assert_eq!(
            sap_hash_unrolled_with::<PooledScratch>(PASSWORD, &SALT, &params).unwrap(),
            expected
        );
    }
}

#[test]
fn strategies_agree_on_empty_inputs() {
    for algorithm in HashAlgorithm::ALL {
        all_strategies_agree("", &[], &SapParams::new(algorithm, 9));
        all_strategies_agree("", &SALT, &SapParams::new(algorithm, 9));
        all_strategies_agree(PASSWORD, &[], &SapParams::new(algorithm, 9));
    }
}

#[test]
fn strategies_agree_when_salt_exceeds_digest() {
    let salt = [0xa5u8; 80];
    all_strategies_agree(PASSWORD, &salt, &SapParams::new(HashAlgorithm::Sha1, 5));
    all_strategies_agree(PASSWORD, &salt, &SapParams::new(HashAlgorithm::Sha512, 5));
}

#[test]
fn strategies_agree_on_long_password() {
    // Longer than the inline stack region, forcing a spill.
    let password = "p".repeat(STACK_SCRATCH_LEN + 37);
    for algorithm in HashAlgorithm::ALL {
        all_strategies_agree(&password, &SALT, &SapParams::new(algorithm, 11));
    }
}

#[test]
fn strategies_reject_zero_rounds() {
    let params = SapParams::new(HashAlgorithm::Sha1, 0);
    for strategy in Strategy::ALL {
        assert!(sap_hash_strategy(PASSWORD, &SALT, &params, strategy).is_err());
    }
}

#[test]
fn default_entry_point_matches_reference() {
    let params = SapParams::new(HashAlgorithm::Sha384, 31);
    assert_eq!(
        sap_hash(PASSWORD, &SALT, &params).unwrap(),
        sap_hash_naive(PASSWORD, &SALT, &params).unwrap()
    );
}

// -------------------------------------------------------
// 2. SCRATCH REGIONS
// -------------------------------------------------------

#[test]
fn scratch_regions_have_requested_length_and_are_zeroed() {
    for len in [0, 1, 20, 63, 64, 65, 300] {
        let mut heap = HeapScratch::acquire(len);
        let mut pooled = PooledScratch::acquire(len);
        let mut stack = StackScratch::acquire(len);

        assert_eq!(heap.as_mut_slice().len(), len);
        assert_eq!(pooled.as_mut_slice().len(), len);
        assert_eq!(stack.as_mut_slice().len(), len);

        assert!(heap.as_mut_slice().iter().all(|&b| b == 0));
        assert!(pooled.as_mut_slice().iter().all(|&b| b == 0));
        assert!(stack.as_mut_slice().iter().all(|&b| b == 0));
    }
}

#[test]
fn pooled_buffers_come_back_wiped() {
    {
        let mut first = PooledScratch::acquire(48);
        first.as_mut_slice().fill(0xee);
    }

    let mut second = PooledScratch::acquire(48);
    assert!(second.as_mut_slice().iter().all(|&b| b == 0));
}

#[test]
fn live_pooled_buffers_are_distinct() {
    let mut a = PooledScratch::acquire(32);
    let mut b = PooledScratch::acquire(32);

    a.as_mut_slice().fill(1);
    b.as_mut_slice().fill(2);

    assert!(a.as_mut_slice().iter().all(|&x| x == 1));
    assert!(b.as_mut_slice().iter().all(|&x| x == 2));
}

#[test]
fn pool_never_exceeds_capacity() {
    let held: Vec<PooledScratch> = (0..POOL_CAPACITY * 2)
        .map(|_| PooledScratch::acquire(16))
        .collect();
    drop(held);

    assert!(PooledScratch::idle_buffers() <= POOL_CAPACITY);
}

#[test]
fn stack_scratch_spills_only_when_too_long() {
    assert!(!StackScratch::acquire(STACK_SCRATCH_LEN).spilled());
    assert!(StackScratch::acquire(STACK_SCRATCH_LEN + 1).spilled());
}

#[test]
fn pooled_strategy_is_correct_across_threads() {
    let params = SapParams::new(HashAlgorithm::Sha1, 5000);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(move || {
                (0..4)
                    .map(|_| sap_hash_with::<PooledScratch>(PASSWORD, &SALT, &params).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for hashed in handle.join().unwrap() {
            assert_eq!(hashed.to_hex(), "ca9c3dedfc17a8bd76346b1780e0f284db57572a");
        }
    }
}

// -------------------------------------------------------
// 3. INJECTED DIGEST
// -------------------------------------------------------

/// Toy digest: XOR-folds the input into `len` bytes, seeded with the length.
struct XorFold {
    len: usize,
}

impl ChainDigest for XorFold {
    fn output_len(&self) -> usize {
        self.len
    }

    fn digest_into(&self, input: &[u8], out: &mut [u8]) {
        out.fill(input.len() as u8);
        for (i, b) in input.iter().enumerate() {
            out[i % self.len] ^= b.rotate_left((i % 7) as u32);
        }
    }
}

fn xor_fold_chain(password: &[u8], salt: &[u8], digest: &XorFold, rounds: u32) -> Vec<u8> {
    let mut state = vec![0u8; digest.len];
    digest.digest_into(&[password, salt].concat(), &mut state);
    for _ in 1..rounds {
        let input = [password, &state[..]].concat();
        digest.digest_into(&input, &mut state);
    }
    state
}

#[test]
fn chain_drives_any_digest() {
    let digest = XorFold { len: 12 };
    let mut out = [0u8; 12];

    chain_into::<_, StackScratch>(PASSWORD.as_bytes(), &SALT, &digest, 25, &mut out).unwrap();

    assert_eq!(out.to_vec(), xor_fold_chain(PASSWORD.as_bytes(), &SALT, &digest, 25));
}

#[test]
fn chain_into_rejects_zero_rounds() {
    let mut out = [0u8; 20];
    let result =
        chain_into::<_, HeapScratch>(PASSWORD.as_bytes(), &SALT, &HashAlgorithm::Sha1, 0, &mut out);
    assert!(result.is_err());
}
