//! Style roots: where custom properties are read and written.
//!
//! A [`StyleRoot`] is the scope custom properties live on, the equivalent of a
//! document's root style declaration. The crate ships [`MemoryRoot`], an
//! ordered in-memory scope that can render itself as a `:root { ... }` block.
//!
//! Hosts with a live document implement [`StyleRoot`] over their own handle.
//!
//! # Binding
//!
//! A [`VariableManager`](crate::VariableManager) holds its root through a
//! [`RootHandle`], which starts either bound (a root was supplied up front) or
//! unbound with a binder closure. Every operation asks the handle for the root,
//! which retries the binder while unbound. Once bound, the handle never
//! returns to the unbound state.

use std::fmt;

/// A scope holding named custom properties.
pub trait StyleRoot {
    /// Returns the value bound to `name`, if any.
    fn property(&self, name: &str) -> Option<String>;

    /// Binds `name` to `value`, replacing any previous value.
    fn set_property(&mut self, name: &str, value: &str);

    /// Removes `name`, returning its previous value.
    fn remove_property(&mut self, name: &str) -> Option<String>;
}

/// In-memory style root preserving first-insertion order.
///
/// Overwriting a property keeps its original position, which mirrors how a
/// browser's style declaration lists properties.
///
/// # Example
///
/// ```rust
/// use cssvars::{MemoryRoot, StyleRoot};
///
/// let mut root = MemoryRoot::new();
/// root.set_property("--brand", "#3366CC");
/// root.set_property("--gap", "4px");
///
/// assert_eq!(root.property("--gap").as_deref(), Some("4px"));
/// assert_eq!(root.to_css(), ":root {\n  --brand: #3366CC;\n  --gap: 4px;\n}\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRoot {
    properties: Vec<(String, String)>,
}

impl MemoryRoot {
    /// Creates an empty root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bound properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no property is bound.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Renders the bound properties as a `:root` rule.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.iter() {
            css.push_str("  ");
            css.push_str(name);
            css.push_str(": ");
            css.push_str(value);
            css.push_str(";\n");
        }
        css.push_str("}\n");
        css
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|(n, _)| n == name)
    }
}

impl StyleRoot for MemoryRoot {
    fn property(&self, name: &str) -> Option<String> {
        self.position(name).map(|i| self.properties[i].1.clone())
    }

    fn set_property(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(i) => self.properties[i].1 = value.to_string(),
            None => self
                .properties
                .push((name.to_string(), value.to_string())),
        }
    }

    fn remove_property(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|i| self.properties.remove(i).1)
    }
}

impl<R: StyleRoot + ?Sized> StyleRoot for Box<R> {
    fn property(&self, name: &str) -> Option<String> {
        (**self).property(name)
    }

    fn set_property(&mut self, name: &str, value: &str) {
        (**self).set_property(name, value)
    }

    fn remove_property(&mut self, name: &str) -> Option<String> {
        (**self).remove_property(name)
    }
}

/// Closure that tries to produce a style root.
pub type RootBinder<R> = Box<dyn FnMut() -> Option<R> + Send>;

/// A style root that is either bound or waiting for its binder to succeed.
pub enum RootHandle<R> {
    /// No root yet; the binder is retried on every access.
    Unbound(RootBinder<R>),
    /// Root available for the rest of the handle's life.
    Bound(R),
}

impl<R: StyleRoot> RootHandle<R> {
    /// A handle that is bound from the start.
    pub fn bound(root: R) -> Self {
        RootHandle::Bound(root)
    }

    /// A handle that binds on first successful call to `binder`.
    pub fn lazy<F>(binder: F) -> Self
    where
        F: FnMut() -> Option<R> + Send + 'static,
    {
        RootHandle::Unbound(Box::new(binder))
    }

    /// Returns true once a root has been bound.
    pub fn is_bound(&self) -> bool {
        matches!(self, RootHandle::Bound(_))
    }

    /// Binds if needed and returns the root, or `None` if still unavailable.
    pub fn get(&mut self) -> Option<&mut R> {
        let fresh = match self {
            RootHandle::Unbound(binder) => binder(),
            RootHandle::Bound(_) => None,
        };
        if let Some(root) = fresh {
            tracing::debug!("style root bound");
            *self = RootHandle::Bound(root);
        }

        match self {
            RootHandle::Bound(root) => Some(root),
            RootHandle::Unbound(_) => None,
        }
    }

    /// Returns the root without attempting to bind.
    pub fn peek(&self) -> Option<&R> {
        match self {
            RootHandle::Bound(root) => Some(root),
            RootHandle::Unbound(_) => None,
        }
    }

    /// Consumes the handle, returning the root if bound.
    pub fn into_inner(self) -> Option<R> {
        match self {
            RootHandle::Bound(root) => Some(root),
            RootHandle::Unbound(_) => None,
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for RootHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootHandle::Unbound(_) => f.write_str("Unbound"),
            RootHandle::Bound(root) => f.debug_tuple("Bound").field(root).finish(),
        }
    }
}
