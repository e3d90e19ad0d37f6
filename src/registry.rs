//! Detection of table identities shared by live instances.
//!
//! Two tables with the same identity overwrite each other's saved widths.
//! The store cannot tell, so tables register their identity here while
//! alive and a warning is logged when an identity is taken twice.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use tracing::warn;

fn live() -> &'static Mutex<HashMap<String, usize>> {
    static LIVE: OnceLock<Mutex<HashMap<String, usize>>> = OnceLock::new();
    LIVE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Registration of a table identity. Unregisters on drop.
#[derive(Debug)]
pub struct IdentityGuard {
    table_id: String,
}

impl IdentityGuard {
    /// Registers `table_id`, warning if another live table already holds it.
    pub fn register(table_id: &str) -> Self {
        if let Ok(mut guard) = live().lock() {
            let count = guard.entry(table_id.to_string()).or_insert(0);
            *count += 1;
            if *count > 1 {
                warn!(
                    table = table_id,
                    instances = *count,
                    "table identity used by more than one live table; saved widths will collide"
                );
            }
        }
        Self {
            table_id: table_id.to_string(),
        }
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }
}

impl Drop for IdentityGuard {
    fn drop(&mut self) {
        if let Ok(mut guard) = live().lock()
            && let Some(count) = guard.get_mut(&self.table_id)
        {
            *count -= 1;
            if *count == 0 {
                guard.remove(&self.table_id);
            }
        }
    }
}

/// Number of live tables registered under `table_id`.
pub fn live_count(table_id: &str) -> usize {
    live()
        .lock()
        .map(|g| g.get(table_id).copied().unwrap_or(0))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_drop() {
        let id = "registry-test-register";
        assert_eq!(live_count(id), 0);

        let a = IdentityGuard::register(id);
        let b = IdentityGuard::register(id);
        assert_eq!(live_count(id), 2);
        assert_eq!(a.table_id(), id);

        drop(a);
        assert_eq!(live_count(id), 1);
        drop(b);
        assert_eq!(live_count(id), 0);
    }
}
