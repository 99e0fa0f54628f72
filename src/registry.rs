//! Command and event storage
//!
//! Each category lives in a `Partition`: two maps, enabled and disabled. A
//! name is in at most one of them, and enable/disable moves the descriptor
//! itself between the maps.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::event::EventKind;
use crate::handler::HandlerDescriptor;

#[derive(Debug)]
pub struct Partition<K> {
    enabled: HashMap<K, HandlerDescriptor>,
    disabled: HashMap<K, HandlerDescriptor>,
}

impl<K: Eq + Hash> Partition<K> {
    pub fn new() -> Self {
        Self {
            enabled: HashMap::new(),
            disabled: HashMap::new(),
        }
    }

    /// Insert into the requested side, replacing any entry under the same
    /// name on either side. Returns the replaced descriptor.
    pub fn insert(
        &mut self,
        key: K,
        descriptor: HandlerDescriptor,
        disabled: bool,
    ) -> Option<HandlerDescriptor> {
        let (target, other) = if disabled {
            (&mut self.disabled, &mut self.enabled)
        } else {
            (&mut self.enabled, &mut self.disabled)
        };
        let stale = other.remove(&key);
        target.insert(key, descriptor).or(stale)
    }

    /// Remove from the enabled side only
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.enabled.remove(key).is_some()
    }

    pub fn disable<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.enabled.remove_entry(key) {
            Some((key, descriptor)) => {
                self.disabled.insert(key, descriptor);
                true
            }
            None => false,
        }
    }

    pub fn enable<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.disabled.remove_entry(key) {
            Some((key, descriptor)) => {
                self.enabled.insert(key, descriptor);
                true
            }
            None => false,
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut HandlerDescriptor>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.enabled.get_mut(key)
    }

    pub fn is_enabled<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.enabled.contains_key(key)
    }

    pub fn is_disabled<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.disabled.contains_key(key)
    }

    pub fn enabled(&self) -> &HashMap<K, HandlerDescriptor> {
        &self.enabled
    }

    pub fn disabled(&self) -> &HashMap<K, HandlerDescriptor> {
        &self.disabled
    }
}

impl<K: Eq + Hash> Default for Partition<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// All handlers a shell knows about
#[derive(Debug, Default)]
pub struct Registry {
    pub commands: Partition<String>,
    pub events: Partition<EventKind>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
}
