//! Workload generation for the Bloom set benchmarks
//!
//! Workloads are seeded so runs compare like with like.

pub mod workload {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Fixed seed shared by every benchmark
    pub const SEED: u64 = 0x0B10_0B5E_7000_0001;

    const TLDS: [&str; 6] = ["com", "net", "org", "io", "it", "info"];

    /// Random lowercase hostname such as `kqzv.xmfa.net`
    pub fn random_hostname<R: Rng>(rng: &mut R) -> String {
        let labels = rng.gen_range(1..=3);
        let mut host = String::new();
        for _ in 0..labels {
            let len = rng.gen_range(3..=12);
            host.extend((0..len).map(|_| char::from(rng.gen_range(b'a'..=b'z'))));
            host.push('.');
        }
        host.push_str(TLDS[rng.gen_range(0..TLDS.len())]);
        host
    }

    /// Blocklist and query list drawn from disjoint namespaces.
    ///
    /// Blocked hosts end in `.blocked`, so no query can be a true member and
    /// every positive lookup on a query is a false positive.
    pub fn hostnames(blocked: usize, queries: usize) -> (Vec<String>, Vec<String>) {
        let mut rng = StdRng::seed_from_u64(SEED);
        let hosts = (0..blocked)
            .map(|_| format!("{}.blocked", random_hostname(&mut rng)))
            .collect();
        let domains = (0..queries).map(|_| random_hostname(&mut rng)).collect();
        (hosts, domains)
    }

    /// `count` random 32-byte keys
    pub fn random_keys(count: usize) -> Vec<[u8; 32]> {
        let mut rng = StdRng::seed_from_u64(SEED);
        (0..count)
            .map(|_| {
                let mut key = [0u8; 32];
                rng.fill(&mut key);
                key
            })
            .collect()
    }

}
