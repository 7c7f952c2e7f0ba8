//! Hungarian naming check for variables and parameters
//!
//! Code Quality Principle: Complete Feedback - identifiers follow `[s][a]{prefix}[{name}]`
//! - Each marker is checked on its own, so one identifier can fail several of them
//! - The scan offset only moves past markers that were actually present

use crate::analyzer::types::{classify, TypeDescriptor, ARRAY_MARKER, STATIC_MARKER};
use crate::domain::syntax::{DeclarationNode, DiagnosticSink};
use crate::domain::violations::{Finding, RuleId};

/// Checks one declaration at a time; holds no per-file state
#[derive(Debug, Default, Clone, Copy)]
pub struct HungarianNaming;

impl HungarianNaming {
    pub fn new() -> Self {
        Self
    }

    /// Check one declaration and return its findings in discovery order
    pub fn check<D: DeclarationNode + ?Sized>(&self, declaration: &D) -> Vec<Finding> {
        let mut findings = Vec::new();
        self.check_into(declaration, &mut findings);
        findings
    }

    /// Check one declaration, reporting findings to `sink`
    pub fn check_into<D, S>(&self, declaration: &D, sink: &mut S)
    where
        D: DeclarationNode + ?Sized,
        S: DiagnosticSink + ?Sized,
    {
        let mut scan = PrefixScan::new(declaration, sink);

        if declaration.is_static() {
            scan.expect_marker("static", STATIC_MARKER);
        }

        if declaration.is_variadic() {
            scan.expect_marker("varargs", ARRAY_MARKER);
        }

        if declaration.array_depth() > 0 {
            scan.expect_marker("array", ARRAY_MARKER);
        }

        match classify(declaration.declared_type()) {
            Ok(descriptor) => scan.expect_type(&descriptor),
            Err(e) => tracing::debug!(
                "Skipping naming check for '{}' at line {}: {}",
                declaration.identifier(),
                declaration.line(),
                e
            ),
        }
    }
}

/// Walks an identifier left to right, one required prefix at a time
struct PrefixScan<'a, D: ?Sized, S: ?Sized> {
    declaration: &'a D,
    sink: &'a mut S,
    offset: usize,
}

impl<'a, D, S> PrefixScan<'a, D, S>
where
    D: DeclarationNode + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    fn new(declaration: &'a D, sink: &'a mut S) -> Self {
        Self { declaration, sink, offset: 0 }
    }

    /// Static or array marker: advance past it only if present
    fn expect_marker(&mut self, description: &str, marker: &str) {
        if self.has_prefix_at_offset(marker) {
            self.offset += marker.len();
        } else {
            self.report(description, marker);
        }
    }

    /// Base-type prefix: always the last component checked
    fn expect_type(&mut self, descriptor: &TypeDescriptor) {
        let prefix = descriptor.prefix();
        if !self.has_prefix_at_offset(&prefix) {
            self.report(descriptor.description(), &prefix);
        }
    }

    fn has_prefix_at_offset(&self, prefix: &str) -> bool {
        self.declaration
            .identifier()
            .get(self.offset..)
            .is_some_and(|rest| rest.starts_with(prefix))
    }

    fn report(&mut self, description: &str, prefix: &str) {
        let message = format!(
            "Prepend {}{} name '{}' with '{}'",
            description,
            self.declaration.role().message_suffix(),
            self.declaration.identifier(),
            prefix
        );
        self.sink.report(Finding::new(RuleId::HungarianNaming, self.declaration.line(), message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::syntax::{Declaration, DeclarationRole, PrimitiveKind, TypeRef};
    use rstest::rstest;

    fn messages(declaration: &Declaration) -> Vec<String> {
        HungarianNaming::new().check(declaration).into_iter().map(|f| f.message).collect()
    }

    fn field(identifier: &str, declared_type: TypeRef) -> Declaration {
        Declaration::new(identifier, 10, declared_type)
    }

    #[rstest]
    #[case(PrimitiveKind::Boolean)]
    #[case(PrimitiveKind::Byte)]
    #[case(PrimitiveKind::Char)]
    #[case(PrimitiveKind::Double)]
    #[case(PrimitiveKind::Float)]
    #[case(PrimitiveKind::Int)]
    #[case(PrimitiveKind::Long)]
    #[case(PrimitiveKind::Short)]
    fn test_static_primitive_prefix_combinations(#[case] kind: PrimitiveKind) {
        let ty = TypeRef::primitive(kind);
        let prefix = kind.prefix();
        let static_field = |name: &str| field(name, ty.clone()).with_static();

        assert!(messages(&static_field(format!("s{prefix}Name").as_str())).is_empty());
        // missing static marker
        assert_eq!(messages(&static_field(format!("{prefix}Name").as_str())).len(), 1);
        // missing type prefix
        assert_eq!(messages(&static_field("sName")).len(), 1);
        // missing both
        assert_eq!(messages(&static_field("Name")).len(), 2);
    }

    #[test]
    fn test_failed_static_marker_does_not_advance_offset() {
        let declaration = field("ms11", TypeRef::primitive(PrimitiveKind::Int)).with_static();

        assert_eq!(
            messages(&declaration),
            vec![
                "Prepend static member name 'ms11' with 's'".to_string(),
                "Prepend int member name 'ms11' with 'i'".to_string(),
            ]
        );
        let passing = field("si11", TypeRef::primitive(PrimitiveKind::Int)).with_static();
        assert!(messages(&passing).is_empty());
    }

    #[test]
    fn test_primitive_arrays() {
        let int_array = TypeRef::primitive(PrimitiveKind::Int).array_of(1);

        assert!(messages(&field("ai12", int_array.clone())).is_empty());
        assert_eq!(
            messages(&field("i12", int_array.clone())),
            vec!["Prepend array member name 'i12' with 'a'".to_string()]
        );
        assert_eq!(
            messages(&field("a12", int_array)),
            vec!["Prepend int member name 'a12' with 'i'".to_string()]
        );
    }

    #[test]
    fn test_multi_dimensional_array_needs_single_marker() {
        let grid = TypeRef::primitive(PrimitiveKind::Double).array_of(2);

        assert!(messages(&field("adGrid", grid.clone())).is_empty());
        assert_eq!(messages(&field("aadGrid", grid)).len(), 1);
    }

    #[test]
    fn test_static_array_of_strings() {
        let strings = TypeRef::class("String").array_of(1);

        assert!(messages(&field("sas20", strings.clone()).with_static()).is_empty());
        assert_eq!(
            messages(&field("ms20", strings).with_static()),
            vec![
                "Prepend static member name 'ms20' with 's'".to_string(),
                "Prepend array member name 'ms20' with 'a'".to_string(),
                "Prepend String member name 'ms20' with 's'".to_string(),
            ]
        );
    }

    #[rstest]
    #[case("String", "s19", "m19", "Prepend String member name 'm19' with 's'")]
    #[case(
        "StringBuffer",
        "sb21",
        "m21",
        "Prepend StringBuffer or StringBuilder member name 'm21' with 'sb'"
    )]
    #[case(
        "StringBuilder",
        "sbName",
        "name",
        "Prepend StringBuffer or StringBuilder member name 'name' with 'sb'"
    )]
    #[case("Object", "o15", "m15", "Prepend Object member name 'm15' with 'o'")]
    fn test_fixed_named_types(
        #[case] type_name: &str,
        #[case] passing: &str,
        #[case] failing: &str,
        #[case] message: &str,
    ) {
        assert!(messages(&field(passing, TypeRef::class(type_name))).is_empty());
        assert_eq!(messages(&field(failing, TypeRef::class(type_name))), vec![message.to_string()]);
    }

    #[test]
    fn test_nested_class_prefix_ignores_outer_names() {
        let nested = TypeRef::class("HungarianVariableNameFail.A.B");

        assert!(messages(&field("b23", nested.clone())).is_empty());
        assert_eq!(
            messages(&field("m23", nested)),
            vec!["Prepend B member name 'm23' with 'b'".to_string()]
        );
    }

    #[test]
    fn test_user_class_prefix_is_lowercased_class_name() {
        let map = TypeRef::class("Map");

        assert!(messages(&field("map25", map.clone())).is_empty());
        assert!(messages(&field("amap26", map.clone().array_of(1))).is_empty());
        assert_eq!(
            messages(&field("m25", map)),
            vec!["Prepend Map member name 'm25' with 'map'".to_string()]
        );
    }

    #[test]
    fn test_varargs_parameter() {
        let param = |name: &str| {
            Declaration::new(name, 60, TypeRef::class("Object"))
                .with_variadic()
                .with_role(DeclarationRole::Parameter)
        };

        assert!(messages(&param("aoParam")).is_empty());
        assert_eq!(
            messages(&param("oParam")),
            vec!["Prepend varargs parameter name 'oParam' with 'a'".to_string()]
        );
    }

    #[test]
    fn test_varargs_with_array_layer_checks_both_markers() {
        let declaration = Declaration::new("aoParam", 60, TypeRef::class("Object").array_of(1))
            .with_variadic()
            .with_role(DeclarationRole::Parameter);

        // varargs consumes the only 'a', so the array check fails on 'o'
        // and the type check still finds 'o' at the unadvanced offset
        assert_eq!(
            messages(&declaration),
            vec!["Prepend array parameter name 'aoParam' with 'a'".to_string()]
        );

        let doubled = Declaration { identifier: "aaoParam".to_string(), ..declaration };
        assert!(messages(&doubled).is_empty());
    }

    #[test]
    fn test_role_suffixes() {
        let ty = TypeRef::primitive(PrimitiveKind::Long);

        assert_eq!(
            messages(&field("x", ty.clone()).with_role(DeclarationRole::Parameter)),
            vec!["Prepend long parameter name 'x' with 'l'".to_string()]
        );
        assert_eq!(
            messages(&field("x", ty).with_role(DeclarationRole::Other)),
            vec!["Prepend long name 'x' with 'l'".to_string()]
        );
    }

    #[test]
    fn test_unresolvable_type_is_skipped_silently() {
        assert!(messages(&field("anything", TypeRef::Unresolved)).is_empty());

        // markers are still checked before classification gives up
        assert_eq!(
            messages(&field("x", TypeRef::Unresolved.array_of(1)).with_static()),
            vec![
                "Prepend static member name 'x' with 's'".to_string(),
                "Prepend array member name 'x' with 'a'".to_string(),
            ]
        );
    }

    #[test]
    fn test_findings_carry_declaration_line() {
        let declaration =
            Declaration::new("m1", 16, TypeRef::primitive(PrimitiveKind::Boolean)).with_static();
        let findings = HungarianNaming::new().check(&declaration);

        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.line == 16 && f.rule == RuleId::HungarianNaming));
    }

    #[test]
    fn test_check_is_idempotent() {
        let declaration = field("ms12", TypeRef::primitive(PrimitiveKind::Int).array_of(1))
            .with_static();
        let checker = HungarianNaming::new();

        assert_eq!(checker.check(&declaration), checker.check(&declaration));
    }

    #[test]
    fn test_short_identifier_never_panics() {
        assert_eq!(messages(&field("", TypeRef::class("String"))).len(), 1);
        assert_eq!(messages(&field("é", TypeRef::class("String")).with_static()).len(), 2);
    }
}
