//! Reducer-driven state

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::persisted::Persisted;

/// A state that changes only through actions
pub trait Reducer: Sized {
    type Action;

    /// Next state after `action`. Must not mutate `self`.
    fn reduce(&self, action: Self::Action) -> Self;
}

/// Apply `action` to a persisted state as a functional update
pub fn reduce_persisted<S>(state: &mut Persisted<S>, action: S::Action)
where
    S: Reducer + Serialize + DeserializeOwned + Clone,
{
    state.update(|prev| prev.reduce(action));
}
