use cxxi_model::{
    CppModifier, CppType, CppTypeKind, DescriptorError, Library, MethodCategory,
    MethodDescriptor,
};

#[test]
fn test_descriptor_from_toml() {
    let source = r#"
        name = "setGeometry"
        virtual = true
        returns = { kind = "void" }
        params = [
            { name = "rect", type = { kind = "class", name = "QRect", modifiers = ["const", "reference"] } },
            { name = "animate", type = { kind = "bool" } },
        ]
    "#;
    let method: MethodDescriptor = toml::from_str(source).expect("Failed to parse descriptor");

    assert_eq!(method.name, "setGeometry");
    assert!(method.flags.is_virtual);
    assert!(!method.flags.is_static);
    assert!(method.generate_wrapper);
    assert!(method.return_type.is_void());
    assert_eq!(method.parameters.len(), 2);
    assert_eq!(method.parameters[0].name, "rect");
    assert_eq!(
        method.parameters[0].ty.modifiers,
        vec![CppModifier::Const, CppModifier::Reference]
    );
    assert_eq!(method.validate(), Ok(MethodCategory::Virtual));
}

#[test]
fn test_descriptor_defaults() {
    let method: MethodDescriptor = toml::from_str(r#"name = "clear""#).unwrap();
    assert_eq!(method.return_type, CppType::void());
    assert!(method.parameters.is_empty());
    assert!(method.generate_wrapper);
    assert_eq!(method.category(), Ok(MethodCategory::Instance));
}

#[test]
fn test_descriptor_suppressed_wrapper() {
    let method: MethodDescriptor =
        toml::from_str("name = \"metaObject\"\ngenerate_wrapper = false").unwrap();
    assert!(!method.generate_wrapper);
}

#[test]
fn test_library_from_toml() {
    let source = r#"
        name = "QtGui"
        namespace = "Qt.Gui"

        [[class]]
        name = "QWidget"
        bases = ["QObject", "QPaintDevice"]

        [[class.method]]
        name = "QWidget"
        constructor = true

        [[class.method]]
        name = "show"
    "#;
    let library: Library = toml::from_str(source).unwrap();
    assert_eq!(library.namespace.as_deref(), Some("Qt.Gui"));

    let widget = library.class("QWidget").unwrap();
    assert_eq!(widget.non_primary_bases(), &["QPaintDevice".to_string()]);
    assert_eq!(widget.methods.len(), 2);
    assert_eq!(widget.methods[0].category(), Ok(MethodCategory::Constructor));
}

#[test]
fn test_descriptor_json_round_trip_keeps_flags() {
    let method = MethodDescriptor::new("size")
        .returning(CppType::named(CppTypeKind::Class, "QSize"))
        .with_parameter("hint", CppType::new(CppTypeKind::Int));
    let json = serde_json::to_string(&method).unwrap();
    let back: MethodDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, method);
}

#[test]
fn test_invalid_descriptor_is_parsed_then_rejected() {
    let method: MethodDescriptor =
        toml::from_str("name = \"weird\"\nconstructor = true\ndestructor = true").unwrap();
    assert!(matches!(
        method.validate(),
        Err(DescriptorError::ConflictingFlags { .. })
    ));
}
