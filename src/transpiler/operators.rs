//! Binary, unary and conditional operators.
//!
//! Go has no value-context assignment, increment or ternary, so those
//! become immediately-invoked function literals that preserve the C
//! evaluation order and result value. Statement contexts intercept the
//! common cases first and emit plain Go statements instead.

use crate::ast::Node;
use crate::goast::{Expr, Stmt};
use crate::transpiler::{TranspileError, Transpiler};
use crate::types::cast::cast_expr;

/// Signedness class of a numeric Go spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericClass {
    Float,
    Signed,
    Unsigned,
}

fn numeric_info(go_spelling: &str) -> Option<(u8, NumericClass)> {
    Some(match go_spelling {
        "float64" => (64, NumericClass::Float),
        "float32" => (32, NumericClass::Float),
        "int64" => (64, NumericClass::Signed),
        "int" | "int32" | "rune" => (32, NumericClass::Signed),
        "int16" => (16, NumericClass::Signed),
        "int8" => (8, NumericClass::Signed),
        "uint64" => (64, NumericClass::Unsigned),
        "uint" | "uint32" => (32, NumericClass::Unsigned),
        "uint16" => (16, NumericClass::Unsigned),
        "byte" | "uint8" => (8, NumericClass::Unsigned),
        _ => return None,
    })
}

/// The usual arithmetic conversions over resolved Go spellings: if either
/// side is floating the common type is the wider float; otherwise both
/// sides promote to at least `int` and the wider (or unsigned, at equal
/// rank) side wins.
pub(crate) fn usual_arithmetic_conversion(lhs: &str, rhs: &str) -> Option<String> {
    let (lhs_bits, lhs_class) = numeric_info(lhs)?;
    let (rhs_bits, rhs_class) = numeric_info(rhs)?;

    if lhs_class == NumericClass::Float || rhs_class == NumericClass::Float {
        if (lhs_class == NumericClass::Float && lhs_bits == 64)
            || (rhs_class == NumericClass::Float && rhs_bits == 64)
        {
            return Some("float64".to_string());
        }
        return Some("float32".to_string());
    }

    // Integer promotion: everything below int widens to int first.
    let promote = |spelling: &str, bits: u8, class: NumericClass| {
        if bits < 32 {
            ("int".to_string(), 32, NumericClass::Signed)
        } else {
            (spelling.to_string(), bits, class)
        }
    };
    let (lhs, lhs_bits, lhs_class) = promote(lhs, lhs_bits, lhs_class);
    let (rhs, rhs_bits, rhs_class) = promote(rhs, rhs_bits, rhs_class);

    if lhs == rhs {
        return Some(lhs);
    }
    if lhs_class == rhs_class {
        return Some(if lhs_bits >= rhs_bits { lhs } else { rhs });
    }
    if lhs_class == NumericClass::Unsigned && lhs_bits >= rhs_bits {
        return Some(lhs);
    }
    if rhs_class == NumericClass::Unsigned && rhs_bits >= lhs_bits {
        return Some(rhs);
    }
    Some(if lhs_class == NumericClass::Signed { lhs } else { rhs })
}

impl Transpiler<'_> {
    pub(crate) fn transpile_binary(
        &mut self,
        node: &Node,
        opcode: &str,
    ) -> Result<(Expr, String), TranspileError> {
        match opcode {
            "=" | "+=" | "-=" | "*=" | "/=" | "%=" | "&=" | "|=" | "^=" | "<<=" | ">>=" => {
                self.assign_as_value(node, opcode)
            }
            "," => self.comma_as_value(node),
            _ => self.transpile_plain_binary(node, opcode),
        }
    }

    fn operands<'n>(&self, node: &'n Node) -> Result<(&'n Node, &'n Node), TranspileError> {
        let children = Self::real_children(node);
        match children.as_slice() {
            [lhs, rhs] => Ok((*lhs, *rhs)),
            _ => Err(TranspileError::invariant(format!(
                "{} node {} does not have two operands",
                node.kind_name(),
                node.address
            ))),
        }
    }

    fn transpile_plain_binary(
        &mut self,
        node: &Node,
        opcode: &str,
    ) -> Result<(Expr, String), TranspileError> {
        let (lhs_node, rhs_node) = self.operands(node)?;

        match opcode {
            "&&" | "||" => {
                let lhs = self.transpile_cond(lhs_node)?;
                let rhs = self.transpile_cond(rhs_node)?;
                Ok((Expr::binary(opcode, lhs, rhs), "_Bool".to_string()))
            }
            "==" | "!=" | "<" | ">" | "<=" | ">=" => {
                let (lhs, lhs_type) = self.transpile_expr(lhs_node)?;
                let (rhs, rhs_type) = self.transpile_expr(rhs_node)?;

                // NULL on either side compares the other against nil.
                if rhs_type == "null" {
                    return Ok((Expr::binary(opcode, lhs, Expr::Nil), "_Bool".to_string()));
                }
                if lhs_type == "null" {
                    return Ok((Expr::binary(opcode, Expr::Nil, rhs), "_Bool".to_string()));
                }

                let lhs_go = self.resolve_soft(&lhs_type, node);
                let rhs_go = self.resolve_soft(&rhs_type, node);
                if let Some(common) = usual_arithmetic_conversion(&lhs_go, &rhs_go) {
                    let lhs = cast_expr(self.program, lhs, &lhs_go, &common);
                    let rhs = cast_expr(self.program, rhs, &rhs_go, &common);
                    return Ok((Expr::binary(opcode, lhs, rhs), "_Bool".to_string()));
                }
                Ok((Expr::binary(opcode, lhs, rhs), "_Bool".to_string()))
            }
            "+" | "-" | "*" | "/" | "%" | "&" | "|" | "^" | "<<" | ">>" => {
                let (lhs, lhs_type) = self.transpile_expr(lhs_node)?;
                let (rhs, rhs_type) = self.transpile_expr(rhs_node)?;
                let lhs_go = self.resolve_soft(&lhs_type, node);
                let rhs_go = self.resolve_soft(&rhs_type, node);

                // Pointer arithmetic adjusts the slice window instead of
                // doing byte arithmetic. A Go slice cannot widen backwards,
                // so pointer retreat and pointer difference have no
                // rendition without a tracked base; those leave a marked
                // stub rather than a plausible-looking wrong pointer.
                if lhs_go.starts_with("[]") && numeric_info(&rhs_go).is_some() {
                    if opcode == "+" {
                        return Ok((
                            Expr::Slice {
                                expr: Box::new(lhs),
                                low: Some(Box::new(rhs)),
                                high: None,
                            },
                            lhs_type,
                        ));
                    }
                    self.unsupported(node, "pointer subtraction (needs a tracked base)");
                    return Ok(self.placeholder(node));
                }
                if rhs_go.starts_with("[]") && numeric_info(&lhs_go).is_some() && opcode == "+" {
                    return Ok((
                        Expr::Slice {
                            expr: Box::new(rhs),
                            low: Some(Box::new(lhs)),
                            high: None,
                        },
                        rhs_type,
                    ));
                }
                if opcode == "-" && lhs_go.starts_with("[]") && rhs_go.starts_with("[]") {
                    self.unsupported(node, "pointer difference (needs a tracked base)");
                    return Ok(self.placeholder(node));
                }

                if matches!(opcode, "<<" | ">>") {
                    // Go accepts any integer shift count; only the shifted
                    // side needs to reach the result type.
                    let result = self.expr_type(node)?;
                    let result_go = self.resolve_soft(&result, node);
                    let lhs = cast_expr(self.program, lhs, &lhs_go, &result_go);
                    return Ok((Expr::binary(opcode, lhs, rhs), result));
                }

                if let Some(common) = usual_arithmetic_conversion(&lhs_go, &rhs_go) {
                    let lhs = cast_expr(self.program, lhs, &lhs_go, &common);
                    let rhs = cast_expr(self.program, rhs, &rhs_go, &common);
                    return Ok((Expr::binary(opcode, lhs, rhs), self.expr_type(node)?));
                }

                Ok((Expr::binary(opcode, lhs, rhs), self.expr_type(node)?))
            }
            _ => {
                self.unsupported(node, &format!("binary operator '{}'", opcode));
                Ok(self.placeholder(node))
            }
        }
    }

    /// Builds the statement form of an assignment, used directly by
    /// statement contexts and wrapped in a function literal elsewhere.
    pub(crate) fn transpile_assign_stmt(
        &mut self,
        node: &Node,
        opcode: &str,
    ) -> Result<(Stmt, Expr, String), TranspileError> {
        let (lhs_node, rhs_node) = self.operands(node)?;
        let (lhs, lhs_type) = self.transpile_expr(lhs_node)?;
        let lhs_go = self.resolve_soft(&lhs_type, node);

        // Pointer advance rewrites the slice window. Pointer retreat
        // cannot (a Go slice never widens backwards), and `-=` does not
        // exist on slice values at all, so it leaves a marked stub.
        if lhs_go.starts_with("[]") && (opcode == "+=" || opcode == "-=") {
            if opcode == "-=" {
                self.unsupported(node, "pointer subtraction (needs a tracked base)");
                let stmt = Stmt::Assign {
                    lhs: Expr::ident("_"),
                    op: "=".to_string(),
                    rhs: Expr::Raw("0 /* pointer subtraction */".to_string()),
                };
                return Ok((stmt, lhs, lhs_type));
            }
            let (rhs, _) = self.transpile_expr(rhs_node)?;
            let stmt = Stmt::Assign {
                lhs: lhs.clone(),
                op: "=".to_string(),
                rhs: Expr::Slice {
                    expr: Box::new(lhs.clone()),
                    low: Some(Box::new(rhs)),
                    high: None,
                },
            };
            return Ok((stmt, lhs, lhs_type));
        }

        let rhs = self.transpile_expr_cast(rhs_node, &lhs_type)?;
        let stmt = Stmt::Assign {
            lhs: lhs.clone(),
            op: opcode.to_string(),
            rhs,
        };
        Ok((stmt, lhs, lhs_type))
    }

    fn assign_as_value(
        &mut self,
        node: &Node,
        opcode: &str,
    ) -> Result<(Expr, String), TranspileError> {
        let (stmt, lhs, lhs_type) = self.transpile_assign_stmt(node, opcode)?;
        let ret = self.resolve_soft(&lhs_type, node);
        let closure = Expr::Closure {
            ret,
            body: vec![stmt, Stmt::Return(Some(lhs))],
        };
        Ok((
            Expr::Call {
                callee: Box::new(closure),
                args: vec![],
            },
            lhs_type,
        ))
    }

    fn comma_as_value(&mut self, node: &Node) -> Result<(Expr, String), TranspileError> {
        let (lhs_node, rhs_node) = self.operands(node)?;
        let mut body = Vec::new();
        self.transpile_stmt(lhs_node, &mut body)?;
        let (rhs, rhs_type) = self.transpile_expr(rhs_node)?;
        let ret = self.resolve_soft(&rhs_type, node);
        body.push(Stmt::Return(Some(rhs)));
        let closure = Expr::Closure { ret, body };
        Ok((
            Expr::Call {
                callee: Box::new(closure),
                args: vec![],
            },
            rhs_type,
        ))
    }

    pub(crate) fn transpile_unary(
        &mut self,
        node: &Node,
        opcode: &str,
        is_prefix: bool,
    ) -> Result<(Expr, String), TranspileError> {
        let child = self.first_expr_child(node)?;

        match opcode {
            "++" | "--" => self.inc_dec_as_value(node, child, opcode == "++", is_prefix),
            "!" => {
                let cond = self.transpile_cond(child)?;
                Ok((Expr::unary("!", cond), "_Bool".to_string()))
            }
            "-" => {
                let (expr, _) = self.transpile_expr(child)?;
                Ok((Expr::unary("-", expr), self.expr_type(node)?))
            }
            "+" => {
                let (expr, _) = self.transpile_expr(child)?;
                Ok((expr, self.expr_type(node)?))
            }
            "~" => {
                let (expr, _) = self.transpile_expr(child)?;
                Ok((Expr::unary("^", expr), self.expr_type(node)?))
            }
            "*" => {
                let (expr, c_type) = self.transpile_expr(child)?;
                let go = self.resolve_soft(&c_type, node);
                let expr = if go.starts_with("[]") {
                    Expr::Index {
                        expr: Box::new(expr),
                        index: Box::new(Expr::int(0)),
                    }
                } else {
                    Expr::unary("*", expr)
                };
                Ok((expr, self.expr_type(node)?))
            }
            "&" => {
                let (expr, c_type) = self.transpile_expr(child)?;
                let operand_go = self.resolve_soft(&c_type, node);
                if self.program.record(&operand_go).is_some() {
                    return Ok((Expr::unary("&", expr), self.expr_type(node)?));
                }
                // Addresses of scalars become one-element slice windows so
                // they fit the slice rendition of C pointers.
                self.program.add_import("unsafe");
                let window = Expr::Slice {
                    expr: Box::new(Expr::conv(
                        &format!("*[1]{}", operand_go),
                        Expr::call("unsafe.Pointer", vec![Expr::unary("&", expr)]),
                    )),
                    low: None,
                    high: None,
                };
                Ok((window, self.expr_type(node)?))
            }
            _ => {
                self.unsupported(node, &format!("unary operator '{}'", opcode));
                Ok(self.placeholder(node))
            }
        }
    }

    /// `x++` in value position: C says postfix yields the prior value.
    fn inc_dec_as_value(
        &mut self,
        node: &Node,
        child: &Node,
        is_inc: bool,
        is_prefix: bool,
    ) -> Result<(Expr, String), TranspileError> {
        let (expr, c_type) = self.transpile_expr(child)?;
        let ret = self.resolve_soft(&c_type, node);

        let body = if is_prefix {
            vec![
                Stmt::IncDec {
                    expr: expr.clone(),
                    is_inc,
                },
                Stmt::Return(Some(expr)),
            ]
        } else {
            vec![
                Stmt::VarDecl {
                    name: "prior".to_string(),
                    ty: ret.clone(),
                    init: Some(expr.clone()),
                },
                Stmt::IncDec {
                    expr,
                    is_inc,
                },
                Stmt::Return(Some(Expr::ident("prior"))),
            ]
        };

        let closure = Expr::Closure { ret, body };
        Ok((
            Expr::Call {
                callee: Box::new(closure),
                args: vec![],
            },
            c_type,
        ))
    }

    pub(crate) fn transpile_conditional(
        &mut self,
        node: &Node,
    ) -> Result<(Expr, String), TranspileError> {
        let children = Self::real_children(node);
        let [cond, then, other] = children.as_slice() else {
            return Err(TranspileError::invariant(
                "ConditionalOperator without three children",
            ));
        };

        let result_type = self.expr_type(node)?;
        let ret = self.resolve_soft(&result_type, node);
        let cond = self.transpile_cond(cond)?;

        if ret.is_empty() {
            // A void ternary only occurs in statement position.
            let (then, _) = self.transpile_expr(then)?;
            let (other, _) = self.transpile_expr(other)?;
            let closure = Expr::Closure {
                ret,
                body: vec![Stmt::If {
                    cond,
                    then: vec![Stmt::Expr(then)],
                    els: vec![Stmt::Expr(other)],
                }],
            };
            return Ok((
                Expr::Call {
                    callee: Box::new(closure),
                    args: vec![],
                },
                result_type,
            ));
        }

        let then = self.transpile_expr_cast(then, &result_type)?;
        let other = self.transpile_expr_cast(other, &result_type)?;
        let closure = Expr::Closure {
            ret,
            body: vec![
                Stmt::If {
                    cond,
                    then: vec![Stmt::Return(Some(then))],
                    els: vec![],
                },
                Stmt::Return(Some(other)),
            ],
        };
        Ok((
            Expr::Call {
                callee: Box::new(closure),
                args: vec![],
            },
            result_type,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_widen_to_the_larger_float() {
        assert_eq!(
            usual_arithmetic_conversion("int", "float64").as_deref(),
            Some("float64")
        );
        assert_eq!(
            usual_arithmetic_conversion("float32", "int64").as_deref(),
            Some("float32")
        );
        assert_eq!(
            usual_arithmetic_conversion("float32", "float64").as_deref(),
            Some("float64")
        );
    }

    #[test]
    fn small_integers_promote_to_int() {
        assert_eq!(
            usual_arithmetic_conversion("int8", "int16").as_deref(),
            Some("int")
        );
        assert_eq!(
            usual_arithmetic_conversion("byte", "byte").as_deref(),
            Some("int")
        );
    }

    #[test]
    fn unsigned_wins_at_equal_or_greater_rank() {
        assert_eq!(
            usual_arithmetic_conversion("int", "uint").as_deref(),
            Some("uint")
        );
        assert_eq!(
            usual_arithmetic_conversion("uint64", "int32").as_deref(),
            Some("uint64")
        );
        assert_eq!(
            usual_arithmetic_conversion("int64", "uint32").as_deref(),
            Some("int64")
        );
    }

    #[test]
    fn non_numeric_operands_have_no_common_type() {
        assert_eq!(usual_arithmetic_conversion("[]byte", "int"), None);
    }
}
