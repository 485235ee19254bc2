//! The per-deriving rule catalogue.
//!
//! Each deriving carries a closed forbidden-with list and, for the
//! structural tags, a shape rule. The lists replicate their source tables
//! verbatim and are deliberately not derived from a symmetric compatibility
//! relation: the tables are the ground truth and are not perfectly
//! symmetric. The pair check consults both sides' lists, so a conflicting
//! pair is reported from each declared deriving's run.

use crate::ast::{Definition, Deriving, NAMESPACE_SEPARATOR};
use crate::diagnostics::ErrorKind;

/// The derivings that may not be declared together with `deriving`.
pub const fn forbidden_with(deriving: Deriving) -> &'static [Deriving] {
    use Deriving::*;
    match deriving {
        Enum => &[
            Command,
            DomainEvent,
            AggregateChanged,
            MicroAggregateChanged,
            Query,
            ToArray,
            ToScalar,
            ToString,
            Uuid,
        ],
        Uuid => &[
            Command,
            DomainEvent,
            Enum,
            Equals,
            FromArray,
            FromScalar,
            FromString,
            Query,
            MicroAggregateChanged,
            ToArray,
            ToScalar,
            ToString,
        ],
        FromArray | FromScalar | FromString => &[
            AggregateChanged,
            Command,
            DomainEvent,
            Enum,
            Query,
            MicroAggregateChanged,
            Uuid,
        ],
        ToScalar => &[
            AggregateChanged,
            Command,
            DomainEvent,
            Enum,
            Exception,
            Query,
            MicroAggregateChanged,
            Uuid,
        ],
        Exception => &[
            AggregateChanged,
            DomainEvent,
            Enum,
            Equals,
            FromArray,
            FromScalar,
            FromString,
            Query,
            MicroAggregateChanged,
            ToArray,
            ToScalar,
            ToString,
            Uuid,
        ],
        AggregateChanged | Command | DomainEvent | Equals | MicroAggregateChanged | Query
        | ToArray | ToString => &[],
    }
}

/// Reports a conflict for every co-declared deriving that either side's
/// forbidden list names.
pub fn check_conflicts(
    definition: &Definition,
    deriving: Deriving,
    violations: &mut Vec<ErrorKind>,
) {
    for &other in &definition.derivings {
        if other == deriving {
            continue;
        }
        if forbidden_with(deriving).contains(&other) || forbidden_with(other).contains(&deriving) {
            violations.push(ErrorKind::ConflictingDerivings {
                definition: definition.fully_qualified_name(),
                deriving,
                other,
            });
        }
    }
}

/// Dispatches to the structural rule for `deriving`, if it has one.
pub fn check_structure(
    definition: &Definition,
    deriving: Deriving,
    violations: &mut Vec<ErrorKind>,
) {
    match deriving {
        Deriving::Enum => check_enum(definition, violations),
        Deriving::Uuid => check_uuid(definition, violations),
        Deriving::FromArray => check_from_array(definition, violations),
        Deriving::FromScalar => check_from_scalar(definition, violations),
        Deriving::FromString => check_from_string(definition, violations),
        Deriving::ToScalar => check_to_scalar(definition, violations),
        Deriving::Exception => check_exception(definition, violations),
        // Tag-only derivings: no shape of their own.
        Deriving::AggregateChanged
        | Deriving::Command
        | Deriving::DomainEvent
        | Deriving::Equals
        | Deriving::MicroAggregateChanged
        | Deriving::Query
        | Deriving::ToArray
        | Deriving::ToString => {}
    }
}

fn check_enum(definition: &Definition, violations: &mut Vec<ErrorKind>) {
    let name = definition.fully_qualified_name();

    require_no_conditions(definition, Deriving::Enum, violations);

    if definition.constructors.len() < 2 {
        violations.push(ErrorKind::ConstructorCount {
            definition: name.clone(),
            deriving: Deriving::Enum,
            expected: "at least 2",
            actual: definition.constructors.len(),
        });
    }

    let own_prefix = format!("{}{}", definition.namespace, NAMESPACE_SEPARATOR);
    for constructor in &definition.constructors {
        if !constructor.arguments.is_empty() {
            violations.push(ErrorKind::ArgumentCount {
                definition: name.clone(),
                deriving: Deriving::Enum,
                constructor: constructor.name.clone(),
                expected: "exactly 0",
                actual: constructor.arguments.len(),
            });
        }

        let local = constructor
            .name
            .strip_prefix(&own_prefix)
            .unwrap_or(&constructor.name);
        if local.contains(NAMESPACE_SEPARATOR) {
            violations.push(ErrorKind::QualifiedConstructor {
                definition: name.clone(),
                deriving: Deriving::Enum,
                constructor: constructor.name.clone(),
            });
        }
    }
}

fn check_uuid(definition: &Definition, violations: &mut Vec<ErrorKind>) {
    require_no_conditions(definition, Deriving::Uuid, violations);

    match single_constructor(definition, Deriving::Uuid, violations) {
        Some(constructor) if !constructor.arguments.is_empty() => {
            violations.push(ErrorKind::ArgumentCount {
                definition: definition.fully_qualified_name(),
                deriving: Deriving::Uuid,
                constructor: constructor.name.clone(),
                expected: "exactly 0",
                actual: constructor.arguments.len(),
            });
        }
        _ => {}
    }
}

fn check_from_array(definition: &Definition, violations: &mut Vec<ErrorKind>) {
    match single_constructor(definition, Deriving::FromArray, violations) {
        Some(constructor) if constructor.arguments.len() < 2 => {
            violations.push(ErrorKind::ArgumentCount {
                definition: definition.fully_qualified_name(),
                deriving: Deriving::FromArray,
                constructor: constructor.name.clone(),
                expected: "at least 2",
                actual: constructor.arguments.len(),
            });
        }
        _ => {}
    }
}

fn check_from_scalar(definition: &Definition, violations: &mut Vec<ErrorKind>) {
    match single_constructor(definition, Deriving::FromScalar, violations) {
        Some(constructor)
            if !constructor.is_scalar_shape() && constructor.arguments.len() != 1 =>
        {
            violations.push(ErrorKind::ArgumentCount {
                definition: definition.fully_qualified_name(),
                deriving: Deriving::FromScalar,
                constructor: constructor.name.clone(),
                expected: "exactly 1",
                actual: constructor.arguments.len(),
            });
        }
        _ => {}
    }
}

fn check_from_string(definition: &Definition, violations: &mut Vec<ErrorKind>) {
    let Some(constructor) = single_constructor(definition, Deriving::FromString, violations)
    else {
        return;
    };
    if constructor.name == "String" {
        return;
    }
    if constructor.arguments.len() != 1 {
        violations.push(ErrorKind::ArgumentCount {
            definition: definition.fully_qualified_name(),
            deriving: Deriving::FromString,
            constructor: constructor.name.clone(),
            expected: "exactly 1",
            actual: constructor.arguments.len(),
        });
        return;
    }
    let argument = &constructor.arguments[0];
    if argument.is_list || argument.nullable {
        violations.push(ErrorKind::ArgumentShape {
            definition: definition.fully_qualified_name(),
            deriving: Deriving::FromString,
            constructor: constructor.name.clone(),
            argument: argument.name.clone(),
            requirement: "neither nullable nor a list".to_string(),
        });
    }
}

fn check_to_scalar(definition: &Definition, violations: &mut Vec<ErrorKind>) {
    for constructor in &definition.constructors {
        if constructor.is_scalar_shape() || constructor.arguments.len() == 1 {
            continue;
        }
        violations.push(ErrorKind::ArgumentCount {
            definition: definition.fully_qualified_name(),
            deriving: Deriving::ToScalar,
            constructor: constructor.name.clone(),
            expected: "exactly 1",
            actual: constructor.arguments.len(),
        });
    }
}

// The generated base class is a rendering concern the caller may override;
// structurally an exception only forbids conditions.
fn check_exception(definition: &Definition, violations: &mut Vec<ErrorKind>) {
    require_no_conditions(definition, Deriving::Exception, violations);
}

fn require_no_conditions(
    definition: &Definition,
    deriving: Deriving,
    violations: &mut Vec<ErrorKind>,
) {
    if !definition.conditions.is_empty() {
        violations.push(ErrorKind::ConditionsForbidden {
            definition: definition.fully_qualified_name(),
            deriving,
            count: definition.conditions.len(),
        });
    }
}

// Enforces the exactly-one-constructor shape shared by several derivings;
// returns the constructor when the count is right.
fn single_constructor<'a>(
    definition: &'a Definition,
    deriving: Deriving,
    violations: &mut Vec<ErrorKind>,
) -> Option<&'a crate::ast::Constructor> {
    if definition.constructors.len() == 1 {
        definition.constructors.first()
    } else {
        violations.push(ErrorKind::ConstructorCount {
            definition: definition.fully_qualified_name(),
            deriving,
            expected: "exactly 1",
            actual: definition.constructors.len(),
        });
        None
    }
}
