use soroban_sdk::{symbol_short, Env, Symbol};

const SETTLEMENT_LOCK: Symbol = symbol_short!("SETL_LCK");

/// Returned when a settlement is already running in the current invocation
/// stack.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LockHeld;

/// A scope guard that marks a settlement as in progress in instance storage
/// and clears the mark on drop.
///
/// Token transfers call out to another contract; holding the lock across the
/// call means a callback into any other locked entry point is rejected.
pub struct SettlementLock<'a> {
    env: &'a Env,
}

impl<'a> SettlementLock<'a> {
    /// Acquires the lock, or returns [`LockHeld`] if a settlement higher in
    /// the call stack already holds it.
    pub fn acquire(env: &'a Env) -> Result<Self, LockHeld> {
        if is_settling(env) {
            return Err(LockHeld);
        }

        env.storage().instance().set(&SETTLEMENT_LOCK, &true);

        Ok(Self { env })
    }
}

impl Drop for SettlementLock<'_> {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&SETTLEMENT_LOCK);
    }
}

/// Whether a settlement currently holds the lock.
pub fn is_settling(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<_, bool>(&SETTLEMENT_LOCK)
        .unwrap_or(false)
}
