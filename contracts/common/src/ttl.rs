use soroban_sdk::{Env, IntoVal, Val};

/// Ledgers per day at a five second close time.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Entries are bumped once their remaining TTL drops below this.
pub const TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;

/// Remaining TTL after a bump.
pub const TTL_EXTEND_TO: u32 = 90 * DAY_IN_LEDGERS;

/// Extends the TTL of the contract instance and everything in instance
/// storage.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of one persistent entry. The entry must exist.
pub fn bump_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
