//! Property-based tests for compilation and evaluation.

use proptest::prelude::*;
use punyexpr::tokenizer::RESERVED_WORDS;
use punyexpr::{compile, tokenize, Context, Value};

fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("reserved word", |s| {
        s != "typeof" && !RESERVED_WORDS.contains(&s.as_str())
    })
}

fn arb_operand() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..10_000).prop_map(|n| n.to_string()),
        "[a-z ]{0,10}".prop_map(|s| format!("'{}'", s)),
        arb_ident(),
        Just("true".to_string()),
        Just("null".to_string()),
    ]
}

fn arb_binop() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("+"),
        Just("-"),
        Just("*"),
        Just("/"),
        Just("%"),
        Just("**"),
        Just("=="),
        Just("!=="),
        Just("<"),
        Just(">="),
        Just("&&"),
        Just("||"),
    ]
}

fn arb_expr() -> impl Strategy<Value = String> {
    arb_operand().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), arb_binop(), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            inner.clone().prop_map(|e| format!("({})", e)),
            inner.clone().prop_map(|e| format!("!{}", e)),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, a, b)| format!("{} ? {} : {}", c, a, b)),
            prop::collection::vec(inner, 0..4).prop_map(|items| format!("[{}]", items.join(", "))),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn tokenize_and_compile_never_panic(input in "\\PC{0,40}") {
        let _ = tokenize(&input);
        let _ = compile(&input);
    }

    #[test]
    fn integer_sums_match(a in 0i64..1_000_000, b in 0i64..1_000_000) {
        let expr = compile(&format!("{} + {}", a, b)).unwrap();
        prop_assert_eq!(expr.evaluate(&Context::new()).unwrap(), Value::from(a + b));
    }

    #[test]
    fn generated_expressions_compile(source in arb_expr()) {
        let expr = compile(&source).unwrap();
        prop_assert_eq!(expr.source_text(), source.as_str());
        let ast = expr.to_ast();
        prop_assert_eq!(ast.at, 0);
        prop_assert_eq!(ast.length, source.len());
    }

    #[test]
    fn compilation_is_deterministic(source in arb_expr()) {
        let first = compile(&source).unwrap();
        let second = compile(&source).unwrap();
        prop_assert_eq!(first.root(), second.root());
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn evaluation_is_repeatable(source in arb_expr(), n in 0i32..100) {
        let expr = compile(&source).unwrap();
        let ctx: Context = expr
            .contextual_names()
            .into_iter()
            .map(|name| (name.to_string(), Value::from(n)))
            .collect();
        let first = expr.evaluate(&ctx);
        let second = expr.evaluate(&ctx);
        prop_assert_eq!(first.is_ok(), second.is_ok());
        if let (Ok(a), Ok(b)) = (first, second) {
            prop_assert_eq!(a.to_string(), b.to_string());
        }
    }
}
