//! Selection of the lock graph nodes that can be updated

use crate::lock::{FlakeLock, InputType, LockedInput, OriginalInput};
use crate::observer::{EventKind, ExtractEvent, ExtractObserver};

/// A node that passed every walk filter and is ready for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkedInput<'a> {
    /// Node name in the lock graph
    pub name: &'a str,
    /// Pinned record
    pub locked: &'a LockedInput,
    /// Declared reference
    pub original: &'a OriginalInput,
}

/// Walk the graph and return the updatable inputs, sorted by node name.
///
/// The root node is never returned. Nodes that are not a direct input of
/// root, placeholders without `locked`/`original`, and indirect references
/// are skipped and reported to `observer`.
pub fn walk<'a>(lock: &'a FlakeLock, observer: &dyn ExtractObserver) -> Vec<WalkedInput<'a>> {
    let mut walked = Vec::new();

    for (name, node) in &lock.nodes {
        if *name == lock.root {
            continue;
        }

        if !lock.is_root_input(name) {
            observer.observe(ExtractEvent::node(
                EventKind::NotRootInput,
                name,
                format!(
                    "flake.lock is inconsistent: '{name}' is not a direct input of '{}'",
                    lock.root
                ),
            ));
            continue;
        }

        let (Some(locked), Some(original)) = (&node.locked, &node.original) else {
            observer.observe(ExtractEvent::node(
                EventKind::EmptyNode,
                name,
                format!("input '{name}' has no locked or original entry"),
            ));
            continue;
        };

        if original.input_type == InputType::Indirect {
            observer.observe(ExtractEvent::node(
                EventKind::IndirectInput,
                name,
                format!("input '{name}' is an indirect registry reference"),
            ));
            continue;
        }

        walked.push(WalkedInput {
            name,
            locked,
            original,
        });
    }

    walked
}
