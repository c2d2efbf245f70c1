//! Pass 2: cross-cutting consistency checks that need pass 1's derived
//! facts — section usefulness, sections on id-less objects, and
//! command-line option consistency against the semantic graph.

use std::collections::HashMap;

use relforge_naming::Options;
use relforge_semantics::{ClassId, ClassKind, SemanticUnit};

use crate::diagnostics::{DiagnosticSink, ErrorKind};

pub fn run(unit: &SemanticUnit, options: &Options, sink: &mut DiagnosticSink) {
    if let Err(message) = options.check_consistency() {
        sink.error(ErrorKind::OptionError, relforge_semantics::SourceLoc::synthetic(), message);
    }

    for class_id in unit.class_ids() {
        if unit.class(class_id).kind() == ClassKind::Object {
            validate_sections(unit, class_id, sink);
        }
    }
}

fn validate_sections(unit: &SemanticUnit, class_id: ClassId, sink: &mut DiagnosticSink) {
    let class = unit.class(class_id);
    let has_id = class.members.iter().any(|&m| unit.member(m).annotations.has("id"));

    let mut sections: HashMap<String, Vec<relforge_semantics::MemberId>> = HashMap::new();
    for &member_id in &class.members {
        let member = unit.member(member_id);
        if let Ok(name) = member.annotations.get_str("section") {
            sections.entry(name.to_string()).or_default().push(member_id);
        }
    }

    if !sections.is_empty() && !has_id {
        sink.error(ErrorKind::SemanticError, class.loc.clone(), "object without id cannot have sections");
        return;
    }

    for (name, members) in &sections {
        let first_loc = unit.member(members[0]).loc.clone();
        let all_readonly = members
            .iter()
            .all(|&m| unit.member(m).annotations.has("readonly"));

        let eager = unit
            .class(class_id)
            .annotations
            .get_str(&format!("section-{}-load", name))
            .map(|v| v == "eager")
            .unwrap_or(false);

        if eager && all_readonly {
            sink.error(
                ErrorKind::SemanticError,
                first_loc,
                format!("eager-loaded section '{}' with only readonly members is pointless", name),
            );
        }
    }
}
