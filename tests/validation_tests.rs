//! Deriving-validation rules exercised on directly constructed definitions:
//! structural shapes, condition bans, and mutual-exclusion lookups.

use std::collections::BTreeSet;

use fpp::ast::{Argument, Condition, Constructor, Definition, Deriving};
use fpp::validation::{check_definition, forbidden_with};
use fpp::ErrorKind;

fn definition(
    name: &str,
    constructors: Vec<Constructor>,
    derivings: &[Deriving],
) -> Definition {
    let mut def = Definition::named(name);
    def.namespace = "Shop".to_string();
    def.constructors = constructors;
    def.derivings = derivings.iter().copied().collect::<BTreeSet<_>>();
    def
}

fn conflicts(violations: &[ErrorKind]) -> Vec<(Deriving, Deriving)> {
    violations
        .iter()
        .filter_map(|kind| match kind {
            ErrorKind::ConflictingDerivings {
                deriving, other, ..
            } => Some((*deriving, *other)),
            _ => None,
        })
        .collect()
}

#[test]
fn enum_and_command_conflict_in_both_directions() {
    let def = definition(
        "Order",
        vec![Constructor::nullary("A"), Constructor::nullary("B")],
        &[Deriving::Enum, Deriving::Command],
    );
    let found = conflicts(&check_definition(&def));
    assert!(found.contains(&(Deriving::Enum, Deriving::Command)));
    assert!(found.contains(&(Deriving::Command, Deriving::Enum)));
}

#[test]
fn uuid_with_two_constructors_is_an_arity_error() {
    let def = definition(
        "UserId",
        vec![Constructor::nullary("A"), Constructor::nullary("B")],
        &[Deriving::Uuid],
    );
    let violations = check_definition(&def);
    assert!(violations.iter().any(|kind| matches!(
        kind,
        ErrorKind::ConstructorCount {
            deriving: Deriving::Uuid,
            expected: "exactly 1",
            actual: 2,
            ..
        }
    )));
}

#[test]
fn uuid_with_one_nullary_constructor_passes() {
    let def = definition("UserId", vec![Constructor::nullary("Uuid")], &[Deriving::Uuid]);
    assert!(check_definition(&def).is_empty());
}

#[test]
fn uuid_forbids_conditions() {
    let mut def = definition("UserId", vec![Constructor::nullary("Uuid")], &[Deriving::Uuid]);
    def.conditions = vec![Condition::new("Sortable")];
    let violations = check_definition(&def);
    assert!(violations.iter().any(|kind| matches!(
        kind,
        ErrorKind::ConditionsForbidden {
            deriving: Deriving::Uuid,
            count: 1,
            ..
        }
    )));
}

#[test]
fn enum_needs_at_least_two_nullary_constructors() {
    let one = definition("Color", vec![Constructor::nullary("Red")], &[Deriving::Enum]);
    assert!(check_definition(&one).iter().any(|kind| matches!(
        kind,
        ErrorKind::ConstructorCount {
            expected: "at least 2",
            ..
        }
    )));

    let mut with_args = Constructor::nullary("Green");
    with_args.arguments.push(Argument::plain("value", "int"));
    let argued = definition(
        "Color",
        vec![Constructor::nullary("Red"), with_args],
        &[Deriving::Enum],
    );
    assert!(check_definition(&argued)
        .iter()
        .any(|kind| matches!(kind, ErrorKind::ArgumentCount { .. })));
}

#[test]
fn enum_accepts_constructors_qualified_with_its_own_namespace() {
    let def = definition(
        "Color",
        vec![
            Constructor::nullary(r"Shop\Red"),
            Constructor::nullary(r"Shop\Green"),
        ],
        &[Deriving::Enum],
    );
    assert!(check_definition(&def).is_empty());
}

#[test]
fn enum_rejects_constructors_from_a_foreign_namespace() {
    let def = definition(
        "Color",
        vec![
            Constructor::nullary(r"Shop\Red"),
            Constructor::nullary(r"Shop\Paint\Green"),
        ],
        &[Deriving::Enum],
    );
    assert!(check_definition(&def).iter().any(|kind| matches!(
        kind,
        ErrorKind::QualifiedConstructor {
            deriving: Deriving::Enum,
            ..
        }
    )));
}

#[test]
fn from_array_wants_a_single_constructor_with_two_arguments() {
    let mut thin = Constructor::nullary("Person");
    thin.arguments.push(Argument::plain("name", "string"));
    let def = definition("Person", vec![thin], &[Deriving::FromArray]);
    assert!(check_definition(&def).iter().any(|kind| matches!(
        kind,
        ErrorKind::ArgumentCount {
            deriving: Deriving::FromArray,
            expected: "at least 2",
            ..
        }
    )));

    let mut wide = Constructor::nullary("Person");
    wide.arguments.push(Argument::plain("name", "string"));
    wide.arguments.push(Argument::plain("age", "int"));
    let ok = definition("Person", vec![wide], &[Deriving::FromArray]);
    assert!(check_definition(&ok).is_empty());
}

#[test]
fn from_scalar_exempts_the_scalar_constructor_shapes() {
    let scalar = definition("Email", vec![Constructor::nullary("String")], &[Deriving::FromScalar]);
    assert!(check_definition(&scalar).is_empty());

    let mut custom = Constructor::nullary("Email");
    custom.arguments.push(Argument::plain("a", "string"));
    custom.arguments.push(Argument::plain("b", "string"));
    let def = definition("Email", vec![custom], &[Deriving::FromScalar]);
    assert!(check_definition(&def).iter().any(|kind| matches!(
        kind,
        ErrorKind::ArgumentCount {
            deriving: Deriving::FromScalar,
            expected: "exactly 1",
            ..
        }
    )));
}

#[test]
fn from_string_requires_a_plain_single_argument() {
    // The String constructor shape is exempt outright.
    let exempt = definition("Email", vec![Constructor::nullary("String")], &[Deriving::FromString]);
    assert!(check_definition(&exempt).is_empty());

    let mut plain = Constructor::nullary("Email");
    plain.arguments.push(Argument::plain("address", "string"));
    let ok = definition("Email", vec![plain], &[Deriving::FromString]);
    assert!(check_definition(&ok).is_empty());

    let mut nullable = Constructor::nullary("Email");
    let mut argument = Argument::plain("address", "string");
    argument.nullable = true;
    nullable.arguments.push(argument);
    let bad = definition("Email", vec![nullable], &[Deriving::FromString]);
    assert!(check_definition(&bad).iter().any(|kind| matches!(
        kind,
        ErrorKind::ArgumentShape {
            deriving: Deriving::FromString,
            ..
        }
    )));
}

#[test]
fn to_scalar_checks_every_constructor() {
    let mut single = Constructor::nullary("Wrapped");
    single.arguments.push(Argument::plain("value", "int"));
    let mut wide = Constructor::nullary("Pair");
    wide.arguments.push(Argument::plain("a", "int"));
    wide.arguments.push(Argument::plain("b", "int"));

    let def = definition(
        "Wrapper",
        vec![Constructor::nullary("Int"), single, wide],
        &[Deriving::ToScalar],
    );
    let violations = check_definition(&def);
    assert_eq!(
        violations
            .iter()
            .filter(|kind| matches!(kind, ErrorKind::ArgumentCount { .. }))
            .count(),
        1
    );
}

#[test]
fn exception_forbids_conditions_only() {
    let mut def = definition("NotFound", vec![Constructor::nullary("NotFound")], &[Deriving::Exception]);
    assert!(check_definition(&def).is_empty());

    def.conditions = vec![Condition::new("Marker")];
    assert!(check_definition(&def).iter().any(|kind| matches!(
        kind,
        ErrorKind::ConditionsForbidden {
            deriving: Deriving::Exception,
            ..
        }
    )));
}

#[test]
fn every_declared_deriving_runs_without_short_circuit() {
    // Uuid structural failure and two conflict directions at once.
    let def = definition(
        "Mess",
        vec![Constructor::nullary("A"), Constructor::nullary("B")],
        &[Deriving::Uuid, Deriving::Command],
    );
    let violations = check_definition(&def);
    assert!(violations
        .iter()
        .any(|kind| matches!(kind, ErrorKind::ConstructorCount { .. })));
    assert_eq!(conflicts(&violations).len(), 2);
}

#[test]
fn violations_name_the_definition_and_the_deriving() {
    let def = definition(
        "UserId",
        vec![Constructor::nullary("A"), Constructor::nullary("B")],
        &[Deriving::Uuid],
    );
    let violations = check_definition(&def);
    let kind = violations.first().expect("violation expected");
    assert_eq!(kind.definition(), Some(r"Shop\UserId"));
    assert_eq!(kind.deriving(), Some(Deriving::Uuid));
}

#[test]
fn the_exact_forbidden_tables_are_preserved() {
    assert!(forbidden_with(Deriving::Enum).contains(&Deriving::Command));
    assert!(forbidden_with(Deriving::Command).is_empty());
    // A documented asymmetry in the source tables.
    assert!(!forbidden_with(Deriving::Uuid).contains(&Deriving::AggregateChanged));
    assert!(forbidden_with(Deriving::Exception).contains(&Deriving::Uuid));
}
