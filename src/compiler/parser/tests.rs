#[cfg(test)]
pub mod tests {
    use crate::compiler::{
        ast::*,
        lexer::{tokens::Lex, tokens::Primitive, LexerError},
        parser::{Parser, ParserError, ParserResult},
        source::{MemorySources, SourceResolver},
    };

    fn parse_file(sources: &MemorySources, name: &str) -> ParserResult<ParseResult> {
        let unit = sources.open(None, name).unwrap();
        Parser::new(sources).parse(&unit)
    }

    fn parse(text: &str) -> ParseResult {
        let sources = MemorySources::new().with("test", text);
        match parse_file(&sources, "test") {
            Ok(result) => result,
            Err(e) => panic!("failed to parse {:?}: {}", text, e),
        }
    }

    fn parse_err(text: &str) -> (u32, ParserError) {
        let sources = MemorySources::new().with("test", text);
        let err = parse_file(&sources, "test").expect_err("Expected a parser error");
        assert_eq!(err.location().file(), "test");
        (err.location().line(), err.inner().clone())
    }

    fn field_type(result: &ParseResult, field: &str) -> Type {
        result.get_structs()[0]
            .get_field(field)
            .map(|f| f.ty.clone())
            .unwrap()
    }

    fn constant_str(result: &ParseResult, name: &str) -> String {
        let c = result
            .get_constants()
            .iter()
            .find(|c| c.get_name() == name)
            .unwrap();
        format!("{}", c.get_expression())
    }

    fn u8_ty() -> Type {
        Type::Primitive(Primitive::U8)
    }

    #[test]
    fn parse_empty_file() {
        let result = parse("");
        assert_eq!(result.get_filename(), "test");
        assert!(result.get_structs().is_empty());
        assert!(result.get_constants().is_empty());
        assert!(result.get_includes().is_empty());
        assert!(!result.is_resolved());
    }

    #[test]
    fn parse_struct_fields() {
        let result = parse("struct Foo {\n  u8 a;\n  u32 b, c;\n}");
        let foo = &result.get_structs()[0];
        assert_eq!(foo.get_name(), "Foo");
        assert_eq!(foo.location().line(), 1);
        assert!(!foo.was_included());
        assert_eq!(foo.size_bytes(), None);

        let fields = foo.get_fields();
        assert_eq!(
            fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert_eq!(fields[0].ty, u8_ty());
        assert_eq!(fields[1].ty, Type::Primitive(Primitive::U32));
        assert_eq!(fields[2].ty, Type::Primitive(Primitive::U32));
        assert_eq!(fields[0].loc.line(), 2);
        assert_eq!(fields[2].loc.line(), 3);
        assert_eq!(fields[0].offset_bytes(), None);
    }

    #[test]
    fn parse_struct_terminator_is_optional() {
        let result = parse("struct A {}; struct B {} struct C { u8 x; };");
        assert_eq!(
            result
                .get_structs()
                .iter()
                .map(|s| s.get_name())
                .collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn parse_duplicate_names_are_kept() {
        let result = parse("struct A {} struct A {} const X = 1; const X = 2;");
        assert_eq!(result.get_structs().len(), 2);
        assert_eq!(result.get_constants().len(), 2);
    }

    #[test]
    fn parse_base_types() {
        let result = parse("struct Foo { u8 a; i16 b; f64 c; void* d; Bar e; }");
        assert_eq!(field_type(&result, "b"), Type::Primitive(Primitive::I16));
        assert_eq!(field_type(&result, "c"), Type::Primitive(Primitive::F64));
        assert_eq!(field_type(&result, "d"), Type::Pointer(Box::new(Type::Void)));
        match field_type(&result, "e") {
            Type::Struct(sref) => {
                assert_eq!(sref.get_name(), "Bar");
                assert!(!sref.is_resolved());
            }
            ty => panic!("Expected a struct reference, got {}", ty),
        }
    }

    #[test]
    fn parse_type_suffixes() {
        let result = parse("struct Foo { u8[12] a; u8*[4] b; u8** c; u8[2][3] d; }");
        assert_eq!(field_type(&result, "a"), Type::Array(Box::new(u8_ty()), 12));
        assert_eq!(
            field_type(&result, "b"),
            Type::Array(Box::new(Type::Pointer(Box::new(u8_ty()))), 4)
        );
        assert_eq!(
            field_type(&result, "c"),
            Type::Pointer(Box::new(Type::Pointer(Box::new(u8_ty()))))
        );
        assert_eq!(
            field_type(&result, "d"),
            Type::Array(Box::new(Type::Array(Box::new(u8_ty()), 2)), 3)
        );
    }

    #[test]
    fn parse_pointer_to_array_is_an_error() {
        let (line, err) = parse_err("struct Foo {\n u8[4]* a;\n}");
        assert_eq!(line, 2);
        assert_eq!(err, ParserError::PointerToArray);
        assert_eq!(format!("{}", err), "cannot declare pointer to array type");
    }

    #[test]
    fn parse_negative_array_bound_is_an_error() {
        let (_, err) = parse_err("struct Foo { u8[-1] a; }");
        assert_eq!(err, ParserError::NegativeArrayBound(-1));
        assert_eq!(format!("{}", err), "array bounds must be positive; got -1");
    }

    #[test]
    fn parse_function_types() {
        let result = parse("struct Foo { i32(i32 i, u8* j)* fp; void()* cb; }");
        assert_eq!(
            field_type(&result, "fp"),
            Type::Pointer(Box::new(Type::Function(FunctionId::new(0))))
        );
        assert_eq!(
            field_type(&result, "cb"),
            Type::Pointer(Box::new(Type::Function(FunctionId::new(1))))
        );

        let fp = result.get_function_type(FunctionId::new(0));
        assert_eq!(*fp.get_return_type(), Type::Primitive(Primitive::I32));
        assert_eq!(
            *fp.get_params(),
            vec![
                Parameter::new("i", Type::Primitive(Primitive::I32)),
                Parameter::new("j", Type::Pointer(Box::new(u8_ty()))),
            ]
        );
        assert!(!fp.was_included());

        let cb = result.get_function_type(FunctionId::new(1));
        assert_eq!(*cb.get_return_type(), Type::Void);
        assert!(cb.get_params().is_empty());
    }

    #[test]
    fn parse_nested_function_types() {
        // The inner literal is finished first and so is registered first
        let result = parse("struct Foo { u8(u16(u8 x)* cb)* fp; }");
        assert_eq!(result.get_function_types().len(), 2);
        assert_eq!(
            field_type(&result, "fp"),
            Type::Pointer(Box::new(Type::Function(FunctionId::new(1))))
        );
        let outer = result.get_function_type(FunctionId::new(1));
        assert_eq!(
            outer.get_params()[0].ty,
            Type::Pointer(Box::new(Type::Function(FunctionId::new(0))))
        );
        let inner = result.get_function_type(FunctionId::new(0));
        assert_eq!(*inner.get_return_type(), Type::Primitive(Primitive::U16));
    }

    #[test]
    fn parse_function_returning_pointer() {
        let result = parse("struct Foo { u8*()* f; }");
        let f = result.get_function_type(FunctionId::new(0));
        assert_eq!(*f.get_return_type(), Type::Pointer(Box::new(u8_ty())));
    }

    #[test]
    fn parse_function_params_need_commas() {
        let (_, err) = parse_err("struct Foo { u8(u8 a u8 b)* f; }");
        assert_eq!(
            err,
            ParserError::ExpectedButFound(Lex::Comma, Lex::Primitive(Primitive::U8))
        );
    }

    #[test]
    fn parse_constants() {
        let result = parse("const A = 12 * (2 + 3);\nconst B = A;");
        assert_eq!(constant_str(&result, "A"), "(12 * (2 + 3))");
        assert_eq!(constant_str(&result, "B"), "A");
        assert_eq!(result.get_constants()[1].location().line(), 2);
    }

    #[test]
    fn parse_operator_precedence() {
        let result = parse(
            "const A = 12 / 2 + 9 * 7 << 1;
             const B = 1 - 2 - 3;
             const C = 1 << 2 >> 3;
             const D = 2 * 3 + 4;
             const E = 2 + 3 * 4;",
        );
        assert_eq!(constant_str(&result, "A"), "(((12 / 2) + (9 * 7)) << 1)");
        assert_eq!(constant_str(&result, "B"), "((1 - 2) - 3)");
        assert_eq!(constant_str(&result, "C"), "((1 << 2) >> 3)");
        assert_eq!(constant_str(&result, "D"), "((2 * 3) + 4)");
        assert_eq!(constant_str(&result, "E"), "(2 + (3 * 4))");
    }

    #[test]
    fn parse_unary_operators() {
        let result = parse("const A = ~12; const B = -(3); const C = -7 * -9; const D = ~~A;");
        assert_eq!(constant_str(&result, "A"), "~12");
        assert_eq!(constant_str(&result, "B"), "-3");
        assert_eq!(constant_str(&result, "C"), "(-7 * -9)");
        assert_eq!(constant_str(&result, "D"), "~~A");

        match result.get_constants()[1].get_expression() {
            Expression::UnaryOp(_, UnaryOperator::Negate, operand) => {
                assert!(matches!(**operand, Expression::Literal(_, 3)))
            }
            e => panic!("Expected a negation, got {}", e),
        }
    }

    #[test]
    fn parse_constant_terminator_is_optional() {
        let result = parse("const A = 1 const B = 2");
        assert_eq!(result.get_constants().len(), 2);
    }

    #[test]
    fn parse_expression_errors() {
        let (_, err) = parse_err("const A = ;");
        assert_eq!(err, ParserError::ExpectedAtom(Lex::Semicolon));

        let (_, err) = parse_err("const A = (1 + 2;");
        assert_eq!(err, ParserError::ExpectedButFound(Lex::RParen, Lex::Semicolon));

        let (_, err) = parse_err("const A 1;");
        assert_eq!(err, ParserError::ExpectedButFound(Lex::Assign, Lex::Integer(1)));
        assert_eq!(format!("{}", err), "expected =, got integer literal 1");
    }

    #[test]
    fn parse_file_scope_errors() {
        let (line, err) = parse_err("\nfoo");
        assert_eq!(line, 2);
        assert_eq!(err, ParserError::UnexpectedAtFileScope(Lex::Identifier("foo".into())));
        assert_eq!(format!("{}", err), "unexpected identifier foo at file scope");

        let (_, err) = parse_err("struct 12 {}");
        assert_eq!(
            format!("{}", err),
            "expected identifier, got integer literal 12"
        );
    }

    #[test]
    fn parse_struct_errors() {
        let (_, err) = parse_err("struct A { 12 a; }");
        assert_eq!(err, ParserError::ExpectedType(Lex::Integer(12)));

        let (_, err) = parse_err("struct A { u8 a }");
        assert_eq!(err, ParserError::ExpectedButFound(Lex::Semicolon, Lex::RBrace));

        let (_, err) = parse_err("struct A { u8 a;");
        assert_eq!(err, ParserError::ExpectedType(Lex::Eof));
    }

    #[test]
    fn parse_lexer_errors_are_reported() {
        let (line, err) = parse_err("struct A {\n u8 ?; }");
        assert_eq!(line, 2);
        assert_eq!(err, ParserError::Lexical(LexerError::IllegalCharacter('?')));
    }

    #[test]
    fn parse_include() {
        let sources = MemorySources::new()
            .with("a", "struct A { B b; }\ninclude \"b\";\nconst R = Q;")
            .with("b", "struct B { u8 x; } const Q = 1;");
        let result = parse_file(&sources, "a").unwrap();

        assert_eq!(*result.get_includes(), vec!["b".to_string()]);
        let names: Vec<_> = result
            .get_structs()
            .iter()
            .map(|s| (s.get_name(), s.was_included()))
            .collect();
        assert_eq!(names, vec![("A", false), ("B", true)]);

        let consts: Vec<_> = result
            .get_constants()
            .iter()
            .map(|c| (c.get_name(), c.was_included()))
            .collect();
        assert_eq!(consts, vec![("Q", true), ("R", false)]);
        assert_eq!(result.get_structs()[1].location().file(), "b");
    }

    #[test]
    fn parse_nested_includes_are_flagged() {
        let sources = MemorySources::new()
            .with("a", "include \"b\"")
            .with("b", "include \"c\" struct B {}")
            .with("c", "struct C {}");
        let result = parse_file(&sources, "a").unwrap();

        assert_eq!(*result.get_includes(), vec!["b".to_string()]);
        assert_eq!(result.get_structs().len(), 2);
        assert!(result.get_structs().iter().all(|s| s.was_included()));
    }

    #[test]
    fn parse_include_relative_to_including_file() {
        let sources = MemorySources::new()
            .with("dir/a", "include \"b\"")
            .with("dir/b", "const B = 1;");
        let result = parse_file(&sources, "dir/a").unwrap();
        assert_eq!(result.get_constants()[0].location().file(), "dir/b");
    }

    #[test]
    fn parse_include_not_found() {
        let sources = MemorySources::new().with("a", "\ninclude \"nope\";");
        let err = parse_file(&sources, "a").unwrap_err();
        assert_eq!(err.location().line(), 2);
        assert_eq!(
            format!("{}", err),
            "a(2): file not found: 'nope' - cannot find 'nope' in any include paths"
        );
    }

    #[test]
    fn parse_include_cycle() {
        let sources = MemorySources::new()
            .with("a", "include \"b\"")
            .with("b", "\ninclude \"a\"");
        let err = parse_file(&sources, "a").unwrap_err();
        assert_eq!(err.location().file(), "b");
        assert_eq!(err.location().line(), 2);
        assert_eq!(*err.inner(), ParserError::IncludeCycle("a".into()));

        let sources = MemorySources::new().with("a", "include \"a\"");
        let err = parse_file(&sources, "a").unwrap_err();
        assert_eq!(*err.inner(), ParserError::IncludeCycle("a".into()));
    }

    #[test]
    fn parse_same_file_included_twice_is_not_a_cycle() {
        let sources = MemorySources::new()
            .with("a", "include \"b\" include \"c\"")
            .with("b", "include \"c\"")
            .with("c", "const C = 1;");
        let result = parse_file(&sources, "a").unwrap();
        assert_eq!(result.get_constants().len(), 2);
    }

    #[test]
    fn parse_included_function_types_keep_their_targets() {
        let sources = MemorySources::new()
            .with("a", "struct A { u16()* g; }\ninclude \"b\"")
            .with("b", "struct B { u8(u8 x)* f; }");
        let result = parse_file(&sources, "a").unwrap();

        assert_eq!(result.get_function_types().len(), 2);
        assert!(!result.get_function_types()[0].was_included());
        assert!(result.get_function_types()[1].was_included());

        let b = result.find_struct("B").unwrap();
        assert_eq!(
            b.get_fields()[0].ty,
            Type::Pointer(Box::new(Type::Function(FunctionId::new(1))))
        );
        assert_eq!(
            *result.get_function_type(FunctionId::new(1)).get_return_type(),
            u8_ty()
        );
    }
}
