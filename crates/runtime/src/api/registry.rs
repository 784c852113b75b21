//! Provider registry binding AI seats to decision providers.
//!
//! Provider instances are stored once per [`ProviderKind`] and shared across
//! seats. A seat resolves to its explicit binding, or to the default kind.

use std::collections::HashMap;
use std::sync::Arc;

use game_core::PlayerId;

use super::{DecisionProvider, ProviderKind, Result, RuntimeError};

/// ```text
/// ProviderRegistry
/// ├── providers: HashMap<ProviderKind, Provider>
/// ├── seat_bindings: HashMap<PlayerId, ProviderKind>
/// └── default_kind: ProviderKind
/// ```
pub struct ProviderRegistry {
    /// Seats of the same kind share one instance.
    providers: HashMap<ProviderKind, Arc<dyn DecisionProvider>>,

    /// Sparse: only seats that differ from the default.
    seat_bindings: HashMap<PlayerId, ProviderKind>,

    default_kind: ProviderKind,
}

impl ProviderRegistry {
    /// Empty registry defaulting to [`ProviderKind::Random`].
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            seat_bindings: HashMap::new(),
            default_kind: ProviderKind::Random,
        }
    }

    /// Registers `provider` for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: ProviderKind, provider: impl DecisionProvider + 'static) {
        self.providers.insert(kind, Arc::new(provider));
    }

    pub fn register_arc(&mut self, kind: ProviderKind, provider: Arc<dyn DecisionProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn bind_seat(&mut self, seat: PlayerId, kind: ProviderKind) {
        self.seat_bindings.insert(seat, kind);
    }

    /// Returns the previous binding, if any.
    pub fn unbind_seat(&mut self, seat: PlayerId) -> Option<ProviderKind> {
        self.seat_bindings.remove(&seat)
    }

    pub fn set_default(&mut self, kind: ProviderKind) {
        self.default_kind = kind;
    }

    pub fn default_kind(&self) -> ProviderKind {
        self.default_kind
    }

    pub fn seat_kind(&self, seat: PlayerId) -> ProviderKind {
        self.seat_bindings
            .get(&seat)
            .copied()
            .unwrap_or(self.default_kind)
    }

    /// # Errors
    ///
    /// `RuntimeError::ProviderNotSet` if the seat's kind has no provider.
    pub fn get_for_seat(&self, seat: PlayerId) -> Result<Arc<dyn DecisionProvider>> {
        self.get(self.seat_kind(seat))
    }

    pub fn get(&self, kind: ProviderKind) -> Result<Arc<dyn DecisionProvider>> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or(RuntimeError::ProviderNotSet { kind })
    }

    pub fn has(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub fn clear_bindings(&mut self) {
        self.seat_bindings.clear();
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
