mod constant_tests {
    use crate::compiler::{semantics::SemanticError, source::MemorySources};

    use super::super::{resolve_file, resolve_str};

    fn value_of(text: &str) -> i64 {
        let result = match resolve_str(&format!("const X = {};", text)) {
            Ok(result) => result,
            Err(e) => panic!("failed to evaluate {:?}: {}", text, e),
        };
        result.constant_value("X").unwrap()
    }

    fn eval_err(text: &str) -> (u32, SemanticError) {
        let err = resolve_str(text).expect_err("Expected a semantic error");
        (err.location().line(), err.inner().clone())
    }

    #[test]
    fn test_arithmetic() {
        for (text, expected) in vec![
            ("12 * (2 + 3)", 60),
            ("9 << 2", 36),
            ("12 / 2 + 9 * 7 << 1", 138),
            ("-7 * -9", 63),
            ("~12", -13),
            ("~0", -1),
            ("-(3)", -3),
            ("1 - 2 - 3", -4),
            ("-7 / 2", -3),
            ("256 >> 4", 16),
            ("1 << 63", i64::MIN),
            ("9223372036854775807 + 1", i64::MIN),
            ("-9223372036854775808", i64::MIN),
        ] {
            assert_eq!(value_of(text), expected, "{}", text);
        }
    }

    #[test]
    fn test_shift_errors() {
        let (_, err) = eval_err("const X = 1 << 64;");
        assert_eq!(err, SemanticError::ShiftCountTooLarge(64));

        let (_, err) = eval_err("const X = 1 >> -1;");
        assert_eq!(err, SemanticError::ShiftNegativeCount(-1));

        let (_, err) = eval_err("const X = -1 << 2;");
        assert_eq!(err, SemanticError::ShiftNegativeOperand(-1));

        for text in vec!["const X = 1 << 64;", "const X = 1 >> -1;", "const X = -1 << 2;"] {
            let (_, err) = eval_err(text);
            assert!(format!("{}", err).contains("shift"), "{}", err);
        }
    }

    #[test]
    fn test_division_by_zero() {
        let (line, err) = eval_err("const A = 0;\nconst X = 10 / A;");
        assert_eq!(line, 2);
        assert_eq!(err, SemanticError::DivisionByZero);
        assert_eq!(format!("{}", err), "division by zero");
    }

    #[test]
    fn test_references() {
        let result = resolve_str(
            "const C = 5;
             const A = C + 1;
             const B = C * 2;
             const D = A + B;
             const E = F;
             const F = 2;",
        )
        .unwrap();
        assert_eq!(result.constant_value("A"), Some(6));
        assert_eq!(result.constant_value("B"), Some(10));
        assert_eq!(result.constant_value("D"), Some(16));
        assert_eq!(result.constant_value("E"), Some(2));

        let order: Vec<_> = result
            .get_resolved_constants()
            .iter()
            .map(|rc| result.get_constants()[rc.index()].get_name())
            .collect();
        assert_eq!(order, vec!["C", "A", "B", "D", "E", "F"]);
    }

    #[test]
    fn test_diamond_is_not_recursive() {
        let result = resolve_str("const X = C; const Y = C; const Z = X + Y; const C = 7 * 3;").unwrap();
        assert_eq!(result.constant_value("X"), result.constant_value("Y"));
        assert_eq!(result.constant_value("Z"), Some(42));
    }

    #[test]
    fn test_recursive_constants() {
        let (line, err) = eval_err("const a = b;\nconst b = a;");
        assert_eq!(line, 2);
        assert_eq!(err, SemanticError::RecursiveConstant("a".into()));
        assert!(format!("{}", err).contains("recursive"));

        let (_, err) = eval_err("const a = a + 1;");
        assert_eq!(err, SemanticError::RecursiveConstant("a".into()));

        let (_, err) = eval_err("const a = b; const b = c; const c = 1 + a;");
        assert!(matches!(err, SemanticError::RecursiveConstant(_)));
    }

    #[test]
    fn test_undefined_constant() {
        let (_, err) = eval_err("const a = nope * 2;");
        assert_eq!(err, SemanticError::UndefinedConstant("nope".into()));
    }

    #[test]
    fn test_duplicate_constant() {
        let (line, err) = eval_err("const a = 1;\nconst a = 2;");
        assert_eq!(line, 2);
        assert_eq!(format!("{}", err), "constant 'a' already defined");
    }

    #[test]
    fn test_included_constants() {
        let sources = MemorySources::new()
            .with("a", "include \"b\" const A = B << 1;")
            .with("b", "const B = 4;");
        let result = resolve_file(&sources, "a").unwrap();
        assert_eq!(result.constant_value("A"), Some(8));
        assert_eq!(result.constant_value("B"), Some(4));
        assert!(result.get_constants()[0].was_included());

        let sources = MemorySources::new()
            .with("a", "include \"b\" const B = 1;")
            .with("b", "const B = 4;");
        let err = resolve_file(&sources, "a").unwrap_err();
        assert_eq!(err.location().file(), "a");
        assert_eq!(*err.inner(), SemanticError::DuplicateConstant("B".into()));
    }
}
