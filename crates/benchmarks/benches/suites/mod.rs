pub mod blocker;
pub mod bloom_set;
pub mod lookup;
