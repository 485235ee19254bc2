//! End-to-end pipeline tests: source text through parsing, assembly, and
//! validation to the fully-qualified definition map.

use fpp::ast::Deriving;
use fpp::{CompilerPipeline, ErrorCategory, ErrorKind};

const SHOP_UNIT: &str = "namespace Shop {\n\
    use Billing\\Invoice as Bill;\n\
    enum Color = Red | Green | Blue\n\
    string Email;\n\
    uuid OrderId;\n\
    data Address = { string $street, string $city }\n\
    command PlaceOrder : OrderCommand (OrderId) = PlaceOrder as place-order { OrderId, Address };\n\
    marker OrderCommand;\n\
}";

#[test]
fn a_valid_unit_compiles_to_qualified_definitions() {
    let unit = CompilerPipeline::default()
        .compile("shop.fpp", SHOP_UNIT)
        .expect("unit should compile");

    assert_eq!(unit.len(), 6);
    for name in [
        r"Shop\Color",
        r"Shop\Email",
        r"Shop\OrderId",
        r"Shop\Address",
        r"Shop\PlaceOrder",
        r"Shop\OrderCommand",
    ] {
        assert!(unit.get(name).is_some(), "missing {name}");
    }
}

#[test]
fn assembled_names_follow_the_namespace_backslash_type_shape() {
    let unit = CompilerPipeline::default()
        .compile("shop.fpp", SHOP_UNIT)
        .unwrap();
    let color = unit.get(r"Shop\Color").unwrap();
    assert_eq!(color.namespace, "Shop");
    assert_eq!(color.type_name, "Color");
    assert_eq!(color.fully_qualified_name(), r"Shop\Color");
}

#[test]
fn imports_are_attached_to_every_definition() {
    let unit = CompilerPipeline::default()
        .compile("shop.fpp", SHOP_UNIT)
        .unwrap();
    for name in unit.sorted_names() {
        let definition = unit.get(name).unwrap();
        assert_eq!(definition.imports.len(), 1, "imports missing on {name}");
        assert_eq!(definition.imports[0].qualified_name, r"Billing\Invoice");
        assert_eq!(definition.imports[0].alias.as_deref(), Some("Bill"));
    }
}

#[test]
fn enum_constructors_are_namespace_qualified_but_scalar_shapes_stay_bare() {
    let unit = CompilerPipeline::default()
        .compile("shop.fpp", SHOP_UNIT)
        .unwrap();
    let color = unit.get(r"Shop\Color").unwrap();
    assert_eq!(color.constructors[0].name, r"Shop\Red");

    let email = unit.get(r"Shop\Email").unwrap();
    assert_eq!(email.constructors[0].name, "String");
}

#[test]
fn parsing_is_deterministic() {
    let pipeline = CompilerPipeline::default();
    let first = pipeline.compile("shop.fpp", SHOP_UNIT).unwrap();
    let second = pipeline.compile("shop.fpp", SHOP_UNIT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn duplicate_fully_qualified_names_are_rejected() {
    let source = "namespace Shop {\nint Age;\nint Age;\n}";
    let error = CompilerPipeline::default()
        .compile("dup.fpp", source)
        .unwrap_err();
    assert_eq!(
        error.kind,
        ErrorKind::DuplicateDefinition {
            name: r"Shop\Age".to_string()
        }
    );
    assert_eq!(error.kind.category(), ErrorCategory::Assembly);
}

#[test]
fn statement_form_content_after_a_second_namespace_is_dropped() {
    let source = "namespace One;\nint Age;\nnamespace Two;\nstring Name;";
    let unit = CompilerPipeline::default().compile("multi.fpp", source).unwrap();
    assert_eq!(unit.len(), 1);
    assert!(unit.get(r"One\Age").is_some());
    assert!(unit.get(r"Two\Name").is_none());
}

#[test]
fn trailing_garbage_is_a_parse_error() {
    let source = "namespace One;\nint Age;\ngarbage";
    let error = CompilerPipeline::default()
        .compile("garbage.fpp", source)
        .unwrap_err();
    assert!(matches!(error.kind, ErrorKind::UnconsumedInput { .. }));
    assert_eq!(error.kind.category(), ErrorCategory::Parse);
}

#[test]
fn a_unit_without_any_namespace_yields_no_parse() {
    let error = CompilerPipeline::default()
        .compile("bare.fpp", "enum Color = Red | Green\n")
        .unwrap_err();
    assert!(matches!(error.kind, ErrorKind::NoParse { .. }));
}

#[test]
fn validation_failures_surface_with_definition_and_deriving() {
    let source = "namespace Shop;\nuuid OrderId : Sortable;";
    let errors = CompilerPipeline::default()
        .check("bad.fpp", source)
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    let kind = &errors[0].kind;
    assert_eq!(kind.category(), ErrorCategory::Validation);
    assert_eq!(kind.definition(), Some(r"Shop\OrderId"));
    assert_eq!(kind.deriving(), Some(Deriving::Uuid));
}

#[test]
fn check_collects_errors_across_definitions() {
    let source = "namespace Shop;\nuuid A : M;\nuuid B : M;";
    let errors = CompilerPipeline::default()
        .check("bad.fpp", source)
        .unwrap_err();
    assert_eq!(errors.len(), 2);
}

#[test]
fn invalid_definitions_never_reach_the_output() {
    let source = "namespace Shop;\nuuid OrderId : Sortable;";
    assert!(CompilerPipeline::default().compile("bad.fpp", source).is_err());
}

#[test]
fn validation_can_be_switched_off_for_raw_ast_tooling() {
    let source = "namespace Shop;\nuuid OrderId : Sortable;";
    let pipeline = CompilerPipeline { validate: false };
    let unit = pipeline.compile("bad.fpp", source).unwrap();
    assert!(unit.get(r"Shop\OrderId").is_some());
}

#[test]
fn wrapper_definitions_pass_their_implied_derivings() {
    // The implicit String constructor satisfies FromString/FromScalar/ToScalar.
    let source = "namespace Shop;\nstring Email;\nbool Active;\nfloat Price;";
    let unit = CompilerPipeline::default().compile("ok.fpp", source).unwrap();
    assert_eq!(unit.len(), 3);
    assert!(unit.get(r"Shop\Email").unwrap().has_deriving(Deriving::FromString));
}
