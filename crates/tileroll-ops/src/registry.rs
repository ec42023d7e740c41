//! Operator catalog.
//!
//! Hosts discover operators by class name and list them by menu category.
//! Each [`Description`] carries a factory that builds the operator around
//! a host-supplied [`NodeBase`].
//!
//! ```rust
//! use tileroll_ops::Registry;
//!
//! let registry = Registry::with_builtins();
//! let desc = registry.find("TileRoll").unwrap();
//! assert_eq!(desc.category(), "Transform");
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use crate::node::{NodeBase, Operator};
use crate::{OpsError, OpsResult};

/// Factory building an operator around its node base.
pub type BuildFn = fn(Box<dyn NodeBase>) -> Box<dyn Operator>;

/// Registration metadata for one operator class.
#[derive(Debug, Clone, Copy)]
pub struct Description {
    /// Stable class name.
    pub class: &'static str,
    /// Menu path, `Category/Name`.
    pub menu: &'static str,
    /// One-line help.
    pub help: &'static str,
    /// Factory.
    pub build: BuildFn,
}

impl Description {
    /// First segment of the menu path.
    pub fn category(&self) -> &'static str {
        self.menu.split('/').next().unwrap_or(self.menu)
    }
}

/// Class name to description map.
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<&'static str, Description>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the operators this crate provides.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.entries.insert(crate::roll::CLASS, crate::roll::DESCRIPTION);
        registry
    }

    /// Adds a description.
    ///
    /// # Errors
    ///
    /// [`OpsError::DuplicateOperator`] if the class is already registered.
    pub fn register(&mut self, desc: Description) -> OpsResult<()> {
        if self.entries.contains_key(desc.class) {
            return Err(OpsError::DuplicateOperator(desc.class));
        }
        debug!(class = desc.class, menu = desc.menu, "Registered operator");
        self.entries.insert(desc.class, desc);
        Ok(())
    }

    /// Looks up a class.
    pub fn find(&self, class: &str) -> Option<&Description> {
        self.entries.get(class)
    }

    /// Descriptions whose menu category is `category`, sorted by class.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Description> {
        self.entries.values().filter(move |d| d.category() == category)
    }

    /// All registered class names, sorted.
    pub fn classes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Builds an operator of `class` around `base`.
    ///
    /// # Errors
    ///
    /// [`OpsError::UnknownOperator`] if no such class is registered.
    pub fn create(&self, class: &str, base: Box<dyn NodeBase>) -> OpsResult<Box<dyn Operator>> {
        let desc = self
            .find(class)
            .ok_or_else(|| OpsError::UnknownOperator(class.to_string()))?;
        Ok((desc.build)(base))
    }
}
