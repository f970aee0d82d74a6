//! `switch` translation.
//!
//! C cases fall through by default and Go cases do not, so every arm that
//! is not terminated by a `break` gets an explicit `fallthrough` marker.
//! The default arm is emitted last whatever its input order, and a
//! trailing `fallthrough` that would have nowhere to go is dropped.

use crate::ast::{Node, NodeKind};
use crate::goast::{Expr, Stmt};
use crate::transpiler::{TranspileError, Transpiler};

/// One arm under construction.
struct Arm {
    values: Vec<Expr>,
    body: Vec<Stmt>,
    /// Set when the arm ended on a `break` at the top level; such arms do
    /// not fall through.
    terminated: bool,
}

impl Transpiler<'_> {
    pub(crate) fn transpile_switch(
        &mut self,
        node: &Node,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TranspileError> {
        let children = Self::real_children(node);
        let [.., cond, body] = children.as_slice() else {
            return Err(TranspileError::invariant("SwitchStmt without a body"));
        };

        // The scrutinee is translated as-is, not cast to boolean.
        let (tag, tag_type) = self.transpile_expr(cond)?;

        let mut arms: Vec<Arm> = Vec::new();
        for child in Self::real_children(body) {
            self.switch_item(child, &tag_type, &mut arms)?;
        }

        // Fall-through is decided against the written order: an arm that
        // is not terminated by a break carries into its written successor,
        // and the written-last arm falls off the end.
        let input_last = arms.len().saturating_sub(1);
        let mut falls: Vec<bool> = arms
            .iter()
            .enumerate()
            .map(|(index, arm)| !arm.terminated && index != input_last)
            .collect();

        // The default arm goes last regardless of where it was written.
        if let Some(index) = arms.iter().position(|arm| arm.values.is_empty()) {
            let default = arms.remove(index);
            let fall = falls.remove(index);
            arms.push(default);
            falls.push(fall);
        }

        // Go rejects a fallthrough with nowhere to go.
        if let Some(last) = falls.last_mut() {
            *last = false;
        }

        let cases = arms
            .into_iter()
            .zip(falls)
            .map(|(mut arm, falls_through)| {
                if falls_through {
                    arm.body.push(Stmt::Fallthrough);
                }
                crate::goast::CaseClause {
                    values: arm.values,
                    body: arm.body,
                }
            })
            .collect();

        out.push(Stmt::Switch { tag, cases });
        Ok(())
    }

    /// One item of the switch body: a case label opens an arm, a break
    /// terminates the open arm, anything else belongs to it.
    fn switch_item(
        &mut self,
        node: &Node,
        tag_type: &str,
        arms: &mut Vec<Arm>,
    ) -> Result<(), TranspileError> {
        match &node.kind {
            NodeKind::CaseStmt => {
                let children = Self::real_children(node);
                let (&value, rest) = children.split_first().ok_or_else(|| {
                    TranspileError::invariant("CaseStmt without a value")
                })?;
                let value = self.transpile_expr_cast(value, tag_type)?;
                arms.push(Arm {
                    values: vec![value],
                    body: Vec::new(),
                    terminated: false,
                });
                // `case 1: case 2: stmt` nests; the inner label opens the
                // next arm and the statement belongs to it.
                if let Some(&sub) = rest.last() {
                    self.switch_item(sub, tag_type, arms)?;
                }
            }
            NodeKind::DefaultStmt => {
                arms.push(Arm {
                    values: Vec::new(),
                    body: Vec::new(),
                    terminated: false,
                });
                if let Some(&sub) = Self::real_children(node).last() {
                    self.switch_item(sub, tag_type, arms)?;
                }
            }
            NodeKind::BreakStmt => {
                if let Some(arm) = arms.last_mut() {
                    arm.terminated = true;
                }
            }
            _ => {
                let Some(arm) = arms.last_mut() else {
                    // Statements before the first label are unreachable in
                    // C as well; drop them with a note.
                    self.unsupported(node, "statement before the first switch label");
                    return Ok(());
                };
                if arm.terminated {
                    // Unreachable code after the break; C allows it.
                    return Ok(());
                }
                let mut body = std::mem::take(&mut arm.body);
                self.transpile_stmt(node, &mut body)?;
                if let Some(arm) = arms.last_mut() {
                    arm.body = body;
                }
            }
        }
        Ok(())
    }
}
