use ir::{CallChain, CodeLocator, NodeId};
use std::collections::HashSet;
use tracing::debug;

/// Resolves the nodes of a path to their declaring file and source.
///
/// A node already seen in the same path is skipped, as is a node the
/// locator cannot find. The chain may end up empty.
pub fn materialize(path: &[NodeId], locator: &dyn CodeLocator) -> CallChain {
    let mut seen: HashSet<&NodeId> = HashSet::new();
    let mut chain = CallChain::default();
    for node in path {
        if !seen.insert(node) {
            continue;
        }
        match locator.locate(&node.owner, &node.member) {
            Some(block) => {
                chain.chain.push(format!("{}:{}", block.file_path, node.member));
                chain.code.push(block.source);
            }
            None => debug!(method = %node, "No source found, node left out of chain"),
        }
    }
    chain
}
