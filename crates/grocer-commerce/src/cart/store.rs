//! The external cart store contract.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::cart::{CartLine, NewCartLine};
use crate::error::StoreError;
use crate::ids::LineId;

/// CRUD access to the authoritative cart.
///
/// The store is the single source of truth for cart contents. Callers
/// re-read [`CartStore::list`] after every mutation rather than patching a
/// local copy.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// List every line in the cart.
    async fn list(&self) -> Result<Vec<CartLine>, StoreError>;

    /// Create a line and return it with its store-assigned id.
    async fn create(&self, line: NewCartLine) -> Result<CartLine, StoreError>;

    /// Replace all fields of line `id`.
    async fn update(&self, id: &LineId, line: CartLine) -> Result<CartLine, StoreError>;

    /// Delete line `id`.
    async fn delete(&self, id: &LineId) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: CartStore + ?Sized> CartStore for Arc<T> {
    async fn list(&self) -> Result<Vec<CartLine>, StoreError> {
        (**self).list().await
    }

    async fn create(&self, line: NewCartLine) -> Result<CartLine, StoreError> {
        (**self).create(line).await
    }

    async fn update(&self, id: &LineId, line: CartLine) -> Result<CartLine, StoreError> {
        (**self).update(id, line).await
    }

    async fn delete(&self, id: &LineId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}

#[async_trait]
impl<T: CartStore + ?Sized> CartStore for Box<T> {
    async fn list(&self) -> Result<Vec<CartLine>, StoreError> {
        (**self).list().await
    }

    async fn create(&self, line: NewCartLine) -> Result<CartLine, StoreError> {
        (**self).create(line).await
    }

    async fn update(&self, id: &LineId, line: CartLine) -> Result<CartLine, StoreError> {
        (**self).update(id, line).await
    }

    async fn delete(&self, id: &LineId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}

/// Store operations, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Default)]
struct StoreState {
    lines: Vec<CartLine>,
    next_id: u64,
    /// Pending failures as (operation, remaining calls before it fires).
    failures: Vec<(StoreOp, usize)>,
}

impl StoreState {
    fn check_failure(&mut self, op: StoreOp) -> Result<(), StoreError> {
        let mut fired = false;
        self.failures.retain_mut(|(target, remaining)| {
            if *target != op || fired {
                return true;
            }
            if *remaining == 0 {
                fired = true;
                return false;
            }
            *remaining -= 1;
            true
        });
        if fired {
            Err(StoreError::Transport(format!("injected {:?} failure", op)))
        } else {
            Ok(())
        }
    }
}

/// In-process cart store (for development/testing).
///
/// Assigns sequential line ids, keeps a version token per line and rejects
/// updates that carry a stale one. Failures can be injected per operation
/// to exercise partial-failure paths.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    state: Mutex<StoreState>,
}

impl InMemoryCartStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `lines`, kept in the given order.
    ///
    /// New ids continue after the highest numeric id among them.
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.lock() {
            state.next_id = lines
                .iter()
                .filter_map(|line| line.id.as_str().parse::<u64>().ok())
                .max()
                .unwrap_or(0);
            state.lines = lines;
        }
        store
    }

    /// Make the `nth` (zero-based) future call of `op` fail with a
    /// transport error. Calls before it succeed normally.
    pub fn fail_on(&self, op: StoreOp, nth: usize) {
        if let Ok(mut state) = self.state.lock() {
            state.failures.push((op, nth));
        }
    }

    /// Current contents, bypassing failure injection.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.state
            .lock()
            .map(|state| state.lines.clone())
            .unwrap_or_default()
    }

    fn state(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Transport("cart store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn list(&self) -> Result<Vec<CartLine>, StoreError> {
        let mut state = self.state()?;
        state.check_failure(StoreOp::List)?;
        Ok(state.lines.clone())
    }

    async fn create(&self, line: NewCartLine) -> Result<CartLine, StoreError> {
        let mut state = self.state()?;
        state.check_failure(StoreOp::Create)?;
        state.next_id += 1;
        let mut created = line.into_line(LineId::from(state.next_id));
        created.version = Some(1);
        state.lines.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &LineId, line: CartLine) -> Result<CartLine, StoreError> {
        let mut state = self.state()?;
        state.check_failure(StoreOp::Update)?;
        let stored = state
            .lines
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let current = stored.version.unwrap_or(0);
        if let Some(expected) = line.version {
            if expected != current {
                return Err(StoreError::Conflict {
                    id: id.to_string(),
                    expected,
                    found: current,
                });
            }
        }

        *stored = CartLine {
            id: id.clone(),
            version: Some(current + 1),
            ..line
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: &LineId) -> Result<(), StoreError> {
        let mut state = self.state()?;
        state.check_failure(StoreOp::Delete)?;
        let before = state.lines.len();
        state.lines.retain(|l| &l.id != id);
        if state.lines.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
