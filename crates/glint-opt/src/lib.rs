//! Dead-loop elimination and unary constant folding over a parsed
//! program, applied once per top-level lambda before evaluation.

mod optimizer;

pub use optimizer::optimize;

#[cfg(test)]
mod tests {
    use super::*;
    use glint_ast::{Node, NodeRef};
    use glint_lex::tokenize;
    use glint_par::parse;

    fn parse_one(source: &str) -> NodeRef {
        let tokens = tokenize(source).unwrap();
        let mut items = parse(tokens).unwrap();
        assert_eq!(items.len(), 1);
        items.pop().unwrap()
    }

    fn body_stmts(lambda: &NodeRef) -> Vec<NodeRef> {
        match lambda.as_ref() {
            Node::Lambda { body, .. } => match body.as_ref() {
                Node::Block(stmts) => stmts.borrow().clone(),
                other => panic!("expected block body, got {other:?}"),
            },
            other => panic!("expected lambda, got {other:?}"),
        }
    }

    #[test]
    fn dead_empty_while_with_literal_condition_is_removed() {
        let main = parse_one("lambda main() { while (1) {} print(1); }");
        optimize(std::slice::from_ref(&main));
        let stmts = body_stmts(&main);
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0].as_ref(), Node::Call { .. }));
    }

    #[test]
    fn dead_empty_for_with_no_condition_is_removed() {
        let main = parse_one("lambda main() { for (;;) {} print(1); }");
        optimize(std::slice::from_ref(&main));
        let stmts = body_stmts(&main);
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0].as_ref(), Node::Call { .. }));
    }

    #[test]
    fn dead_empty_for_with_truthy_literal_condition_is_removed() {
        let main = parse_one("lambda main() { for (i = 0; 1; ++i) {} print(1); }");
        optimize(std::slice::from_ref(&main));
        let stmts = body_stmts(&main);
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0].as_ref(), Node::Call { .. }));
    }

    #[test]
    fn while_with_symbol_condition_is_left_alone() {
        let main = parse_one("lambda main() { x = 1; while (x) {} }");
        optimize(std::slice::from_ref(&main));
        let stmts = body_stmts(&main);
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[1].as_ref(), Node::While { .. }));
    }

    #[test]
    fn while_with_nonempty_body_is_left_alone() {
        let main = parse_one("lambda main() { while (1) { print(1); } }");
        optimize(std::slice::from_ref(&main));
        let stmts = body_stmts(&main);
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0].as_ref(), Node::While { .. }));
    }

    #[test]
    fn nested_dead_loop_collapses_in_a_single_pass() {
        let main = parse_one("lambda main() { while (1) { while (1) {} } }");
        optimize(std::slice::from_ref(&main));
        let stmts = body_stmts(&main);
        assert!(stmts.is_empty());
    }

    #[test]
    fn unary_increment_on_integer_literal_folds() {
        let main = parse_one("lambda main() { ++1; }");
        optimize(std::slice::from_ref(&main));
        let stmts = body_stmts(&main);
        assert_eq!(stmts.len(), 1);
        match stmts[0].as_ref() {
            Node::Integer(c) => assert_eq!(c.get(), 2),
            other => panic!("expected folded integer, got {other:?}"),
        }
    }

    #[test]
    fn unary_decrement_on_float_literal_folds() {
        let main = parse_one("lambda main() { --1.5; }");
        optimize(std::slice::from_ref(&main));
        let stmts = body_stmts(&main);
        match stmts[0].as_ref() {
            Node::Float(c) => assert_eq!(c.get(), 0.5),
            other => panic!("expected folded float, got {other:?}"),
        }
    }

    #[test]
    fn unary_fold_does_not_apply_to_a_symbol_operand() {
        let main = parse_one("lambda main() { x = 1; ++x; }");
        optimize(std::slice::from_ref(&main));
        let stmts = body_stmts(&main);
        assert!(matches!(stmts[1].as_ref(), Node::Unary { .. }));
    }

    #[test]
    fn optimizing_twice_is_a_no_op_the_second_time() {
        let main = parse_one(
            "lambda main() { while (1) { while (1) {} } ++1; while (x) {} }",
        );
        optimize(std::slice::from_ref(&main));
        let first = body_stmts(&main).len();
        optimize(std::slice::from_ref(&main));
        let second = body_stmts(&main).len();
        assert_eq!(first, second);
    }

    #[test]
    fn dead_loop_inside_if_branch_is_removed() {
        let main = parse_one("lambda main() { if (1) { while (1) {} } }");
        optimize(std::slice::from_ref(&main));
        match main.as_ref() {
            Node::Lambda { body, .. } => match body.as_ref() {
                Node::Block(stmts) => match stmts.borrow()[0].as_ref() {
                    Node::If { then_block, .. } => match then_block.as_ref() {
                        Node::Block(inner) => assert!(inner.borrow().is_empty()),
                        other => panic!("expected block, got {other:?}"),
                    },
                    other => panic!("expected if, got {other:?}"),
                },
                other => panic!("expected block, got {other:?}"),
            },
            other => panic!("expected lambda, got {other:?}"),
        }
    }
}
