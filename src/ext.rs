//! Extension ids for node extension slots.
//!
//! Foreign-binding shims attach externally-owned data to nodes (see
//! [`crate::node::NodeRef::set_extension`]). Slots are keyed by an
//! [`ExtensionId`] registered once per context, so independent bindings
//! never collide on a node.

/// Id of a registered extension, valid context-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtensionId(pub(crate) u32);

/// Per-context name → id registry. Registration is idempotent.
#[derive(Debug, Default)]
pub(crate) struct ExtensionRegistry {
    names: Vec<String>,
}

impl ExtensionRegistry {
    pub(crate) fn register(&mut self, name: &str) -> ExtensionId {
        if let Some(index) = self.names.iter().position(|known| known == name) {
            return ExtensionId(index as u32);
        }
        self.names.push(name.to_string());
        ExtensionId((self.names.len() - 1) as u32)
    }
}
