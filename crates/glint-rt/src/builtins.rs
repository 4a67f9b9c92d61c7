//! The fixed built-in library. Dispatched by name before falling back to
//! a user-defined lambda lookup — `call` returns `None` for a name it
//! doesn't recognize so the evaluator can try that fallback.

use glint_ast::{Node, NodeRef};
use glint_util::Symbol;

use crate::error::RuntimeError;
use crate::sink::Sink;
use crate::value::EvalValue;

pub fn call(
    name: Symbol,
    args: &[NodeRef],
    sink: &mut dyn Sink,
) -> Option<Result<EvalValue, RuntimeError>> {
    match name.as_str() {
        "print" => Some(print_values(args, sink, false)),
        "println" => Some(print_values(args, sink, true)),
        "integer?" => Some(predicate(name, args, |n| matches!(n, Node::Integer(_)))),
        "float?" => Some(predicate(name, args, |n| matches!(n, Node::Float(_)))),
        "string?" => Some(predicate(name, args, |n| matches!(n, Node::String(_)))),
        "array?" => Some(predicate(name, args, |n| matches!(n, Node::Array(_)))),
        "procedure?" => Some(predicate(name, args, |n| matches!(n, Node::Lambda { .. }))),
        "procedure-arity" => Some(procedure_arity(name, args)),
        "array-get" => Some(array_get(name, args)),
        "array-set" => Some(array_set(name, args)),
        "read_file" => Some(read_file(name, args)),
        _ => None,
    }
}

fn one_arg<'a>(name: Symbol, args: &'a [NodeRef]) -> Result<&'a NodeRef, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::ArityMismatch {
            name,
            expected: 1,
            found: args.len(),
        });
    }
    Ok(&args[0])
}

fn print_values(
    args: &[NodeRef],
    sink: &mut dyn Sink,
    newline: bool,
) -> Result<EvalValue, RuntimeError> {
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            sink.write_str(" ");
        }
        sink.write_str(&a.to_string());
    }
    if newline {
        sink.write_str("\n");
    }
    Ok(EvalValue::Void)
}

fn predicate(
    name: Symbol,
    args: &[NodeRef],
    test: impl Fn(&Node) -> bool,
) -> Result<EvalValue, RuntimeError> {
    let arg = one_arg(name, args)?;
    Ok(EvalValue::Value(Node::integer(
        if test(arg.as_ref()) { 1 } else { 0 },
    )))
}

fn procedure_arity(name: Symbol, args: &[NodeRef]) -> Result<EvalValue, RuntimeError> {
    let arg = one_arg(name, args)?;
    match arg.as_ref() {
        Node::Lambda { params, .. } => Ok(EvalValue::Value(Node::integer(params.len() as i32))),
        other => Err(RuntimeError::WrongOperandKind {
            op: "procedure-arity".to_string(),
            found: other.kind_name(),
        }),
    }
}

fn as_index(node: &NodeRef, op: &str) -> Result<i32, RuntimeError> {
    match node.as_ref() {
        Node::Integer(c) => Ok(c.get()),
        other => Err(RuntimeError::WrongOperandKind {
            op: op.to_string(),
            found: other.kind_name(),
        }),
    }
}

fn array_get(name: Symbol, args: &[NodeRef]) -> Result<EvalValue, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::ArityMismatch {
            name,
            expected: 2,
            found: args.len(),
        });
    }
    let Node::Array(elems) = args[0].as_ref() else {
        return Err(RuntimeError::WrongOperandKind {
            op: "array-get".to_string(),
            found: args[0].kind_name(),
        });
    };
    let index = as_index(&args[1], "array-get")?;
    let elems = elems.borrow();
    let element = usize::try_from(index)
        .ok()
        .and_then(|i| elems.get(i))
        .cloned()
        .ok_or(RuntimeError::IndexOutOfRange {
            index,
            len: elems.len(),
        })?;
    Ok(EvalValue::Value(element))
}

/// The replacement value's kind must match the existing element's kind
/// (int/float/string, per spec); `mem::discriminant` compares the node's
/// variant tag without caring about its payload.
fn array_set(name: Symbol, args: &[NodeRef]) -> Result<EvalValue, RuntimeError> {
    if args.len() != 3 {
        return Err(RuntimeError::ArityMismatch {
            name,
            expected: 3,
            found: args.len(),
        });
    }
    let Node::Array(elems) = args[0].as_ref() else {
        return Err(RuntimeError::WrongOperandKind {
            op: "array-set".to_string(),
            found: args[0].kind_name(),
        });
    };
    let index = as_index(&args[1], "array-set")?;
    let mut elems = elems.borrow_mut();
    let slot = usize::try_from(index)
        .ok()
        .filter(|&i| i < elems.len())
        .ok_or(RuntimeError::IndexOutOfRange {
            index,
            len: elems.len(),
        })?;
    if std::mem::discriminant(elems[slot].as_ref()) != std::mem::discriminant(args[2].as_ref()) {
        return Err(RuntimeError::ArraySetKindMismatch);
    }
    elems[slot] = args[2].clone();
    Ok(EvalValue::Void)
}

fn read_file(name: Symbol, args: &[NodeRef]) -> Result<EvalValue, RuntimeError> {
    let arg = one_arg(name, args)?;
    let Node::String(path) = arg.as_ref() else {
        return Err(RuntimeError::WrongOperandKind {
            op: "read_file".to_string(),
            found: arg.kind_name(),
        });
    };
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| RuntimeError::FileReadError {
        path: path.to_string(),
        detail: e.to_string(),
    })?;
    Ok(EvalValue::Value(Node::string(contents)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::StringSink;

    fn n(name: &str) -> Symbol {
        Symbol::intern(name)
    }

    #[test]
    fn print_joins_with_spaces_and_no_trailing_newline() {
        let mut sink = StringSink::new();
        call(n("print"), &[Node::integer(1), Node::integer(2)], &mut sink)
            .unwrap()
            .unwrap();
        assert_eq!(sink.contents(), "1 2");
    }

    #[test]
    fn println_appends_a_newline() {
        let mut sink = StringSink::new();
        call(n("println"), &[Node::integer(1)], &mut sink).unwrap().unwrap();
        assert_eq!(sink.contents(), "1\n");
    }

    #[test]
    fn integer_predicate_matches_only_integers() {
        let mut sink = StringSink::new();
        let yes = call(n("integer?"), &[Node::integer(1)], &mut sink).unwrap().unwrap();
        let no = call(n("integer?"), &[Node::float(1.0)], &mut sink).unwrap().unwrap();
        assert!(matches!(yes, EvalValue::Value(v) if matches!(v.as_ref(), Node::Integer(c) if c.get() == 1)));
        assert!(matches!(no, EvalValue::Value(v) if matches!(v.as_ref(), Node::Integer(c) if c.get() == 0)));
    }

    #[test]
    fn array_get_out_of_range_is_an_error() {
        let mut sink = StringSink::new();
        let arr = Node::array(vec![Node::integer(1)]);
        let err = call(n("array-get"), &[arr, Node::integer(5)], &mut sink)
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, RuntimeError::IndexOutOfRange { index: 5, len: 1 }));
    }

    #[test]
    fn array_set_rejects_a_kind_mismatch() {
        let mut sink = StringSink::new();
        let arr = Node::array(vec![Node::integer(1)]);
        let err = call(
            n("array-set"),
            &[arr, Node::integer(0), Node::string("nope")],
            &mut sink,
        )
        .unwrap()
        .unwrap_err();
        assert_eq!(err, RuntimeError::ArraySetKindMismatch);
    }

    #[test]
    fn array_set_mutates_visibly_through_the_shared_handle() {
        let mut sink = StringSink::new();
        let arr = Node::array(vec![Node::integer(1)]);
        let alias = arr.clone();
        call(n("array-set"), &[arr, Node::integer(0), Node::integer(9)], &mut sink)
            .unwrap()
            .unwrap();
        let Node::Array(elems) = alias.as_ref() else { unreachable!() };
        match elems.borrow()[0].as_ref() {
            Node::Integer(c) => assert_eq!(c.get(), 9),
            other => panic!("expected integer, got {other:?}"),
        }
    }

    #[test]
    fn unknown_name_returns_none() {
        let mut sink = StringSink::new();
        assert!(call(n("not-a-builtin"), &[], &mut sink).is_none());
    }
}
