//! Reconstructs the syntax tree from the front-end's textual dump.
//!
//! The dump encodes the tree shape purely through indentation: each line is
//! one node, and a line indented one unit deeper than its predecessor is
//! that predecessor's child. The parser keeps a stack of open nodes and
//! folds finished subtrees into their parents as the indentation retreats.

use log::debug;
use thiserror::Error;

use crate::ast::line::{decode, split_line};
use crate::ast::nodes::{Node, NodeKind};
use crate::ast::position::PositionContext;

/// Hard failures while interpreting the dump. Translation aborts on these;
/// there is no partial output.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("malformed dump at line {line}: {reason}")]
    Malformed {
        line: usize,
        reason: String,
        text: String,
    },
    #[error("dump did not contain a translation unit")]
    MissingRoot,
}

/// Parses a complete dump into its single root node.
///
/// The root is always a `TranslationUnitDecl`; anything else in root
/// position is a malformed dump. Unknown node kinds survive as
/// [`NodeKind::Unknown`] leaves (or subtrees) for the translator to judge.
pub fn parse(input: &str) -> Result<Node, DumpError> {
    let mut ctx = PositionContext::new();
    // Stack of (depth, open node). Nodes are folded into their parent as
    // soon as a line at the same or a shallower depth arrives.
    let mut stack: Vec<(usize, Node)> = Vec::new();
    let mut nodes = 0usize;

    for (index, text) in input.lines().enumerate() {
        let line = index + 1;
        if text.trim().is_empty() {
            continue;
        }

        let malformed = |reason: String| DumpError::Malformed {
            line,
            reason,
            text: text.to_string(),
        };

        let split = split_line(text).map_err(malformed)?;
        let depth = split.depth;
        let node = decode(split, &mut ctx).map_err(malformed)?;
        nodes += 1;

        if stack.is_empty() {
            if depth != 0 {
                return Err(malformed("first node must be at depth zero".to_string()));
            }
            if !matches!(node.kind, NodeKind::TranslationUnitDecl) {
                return Err(malformed(format!(
                    "expected TranslationUnitDecl at the root, found {}",
                    node.kind_name()
                )));
            }
            stack.push((depth, node));
            continue;
        }

        let top_depth = stack.last().map(|(d, _)| *d).unwrap_or(0);
        if depth > top_depth + 1 {
            return Err(malformed(format!(
                "indentation jumps from depth {} to {}",
                top_depth, depth
            )));
        }
        if depth == 0 {
            return Err(malformed("second root node in one dump".to_string()));
        }

        while stack.len() > 1 && stack.last().map(|(d, _)| *d >= depth).unwrap_or(false) {
            let (_, finished) = stack.pop().expect("stack underflow");
            stack
                .last_mut()
                .expect("stack underflow")
                .1
                .add_child(finished);
        }

        stack.push((depth, node));
    }

    while stack.len() > 1 {
        let (_, finished) = stack.pop().expect("stack underflow");
        stack
            .last_mut()
            .expect("stack underflow")
            .1
            .add_child(finished);
    }

    let root = stack.pop().map(|(_, n)| n).ok_or(DumpError::MissingRoot)?;
    debug!("parsed {} dump nodes", nodes);
    Ok(root)
}
