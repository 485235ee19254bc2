//! Folds parsed namespace blocks into the fully-qualified-name map the
//! validator and the external renderer consume.

use std::collections::{HashMap, HashSet};

use crate::ast::{Definition, Import, NAMESPACE_SEPARATOR};
use crate::diagnostics::ErrorKind;

/// Constructor names that denote primitive scalar shapes rather than
/// generated types; these are never namespace-qualified.
const PRIMITIVE_CONSTRUCTORS: [&str; 6] = ["Bool", "Float", "Int", "String", "Guid", "Uuid"];

/// One parsed namespace: its (possibly segmented) name, the `use` imports
/// declared before the first construct, and the constructs themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceBlock {
    pub namespace: String,
    pub imports: Vec<Import>,
    pub definitions: Vec<Definition>,
}

/// Builds the `"<Namespace>\<TypeName>" -> Definition` mapping for one
/// compilation unit. Each definition is copied, namespace-qualified, and
/// handed the enclosing block's import list; duplicate fully qualified names
/// and duplicate constructor names within one definition are rejected.
pub fn assemble(blocks: &[NamespaceBlock]) -> Result<HashMap<String, Definition>, ErrorKind> {
    let mut definitions = HashMap::new();

    for block in blocks {
        for declared in &block.definitions {
            let mut definition = declared.clone();
            definition.namespace = block.namespace.clone();
            definition.imports = block.imports.clone();

            let mut seen = HashSet::new();
            for constructor in &definition.constructors {
                if !seen.insert(constructor.name.clone()) {
                    return Err(ErrorKind::DuplicateConstructor {
                        definition: definition.fully_qualified_name(),
                        constructor: constructor.name.clone(),
                    });
                }
            }

            qualify_constructors(&mut definition);

            let name = definition.fully_qualified_name();
            if definitions.insert(name.clone(), definition).is_some() {
                return Err(ErrorKind::DuplicateDefinition { name });
            }
        }
    }

    Ok(definitions)
}

// Constructor names are re-tagged with the namespace prefix so generated
// code can refer to them unambiguously. Primitive scalar shapes stay bare.
fn qualify_constructors(definition: &mut Definition) {
    if definition.namespace.is_empty() {
        return;
    }
    for constructor in &mut definition.constructors {
        if PRIMITIVE_CONSTRUCTORS.contains(&constructor.name.as_str()) {
            continue;
        }
        if constructor.name.contains(NAMESPACE_SEPARATOR) {
            continue;
        }
        constructor.name = format!(
            "{}{}{}",
            definition.namespace, NAMESPACE_SEPARATOR, constructor.name
        );
    }
}
