//! Javadoc template check for class, interface, constructor and method comments
//!
//! Code Quality Principle: Consistent Headers - every documented definition follows one layout
//! - A `//====...` bar sits directly above the doc comment of non-nested definitions
//! - The top-level class states its copyright
//! - `@param` tags say something about the parameter

use crate::domain::syntax::{DefinitionKind, DefinitionNode, DiagnosticSink, DocBlock, SourceLines};
use crate::domain::violations::{Finding, RuleId};
use crate::patterns::{self, BarStyle};

pub const COMMENT_BAR_MESSAGE: &str = "Missing or incorrect equals sign bar above Javadoc comment";
pub const COPYRIGHT_MESSAGE: &str = "Missing or incorrect copyright line in Javadoc comment";
pub const TRIVIAL_PARAM_MESSAGE: &str = "Empty or trivial Javadoc parameter comment";

/// Checks one definition and its doc comment; holds no per-file state
#[derive(Debug, Default, Clone, Copy)]
pub struct JavadocTemplate;

impl JavadocTemplate {
    pub fn new() -> Self {
        Self
    }

    /// Check one definition and return its findings in discovery order
    pub fn check<N, L>(&self, node: &N, doc: Option<DocBlock>, lines: &L) -> Vec<Finding>
    where
        N: DefinitionNode + ?Sized,
        L: SourceLines + ?Sized,
    {
        let mut findings = Vec::new();
        self.check_into(node, doc, lines, &mut findings);
        findings
    }

    /// Check one definition, reporting findings to `sink`
    pub fn check_into<N, L, S>(&self, node: &N, doc: Option<DocBlock>, lines: &L, sink: &mut S)
    where
        N: DefinitionNode + ?Sized,
        L: SourceLines + ?Sized,
        S: DiagnosticSink + ?Sized,
    {
        // a missing doc comment is another rule's business
        let Some(doc) = doc else {
            return;
        };

        // the template covers classes, interfaces, constructors and methods only
        if matches!(node.kind(), DefinitionKind::Enum | DefinitionKind::Annotation) {
            tracing::debug!("Skipping doc template for {:?} at line {}", node.kind(), node.line());
            return;
        }

        self.check_comment_bar(node, doc, lines, sink);
        self.check_contents(node, doc, lines, sink);
    }

    fn check_comment_bar<N, L, S>(&self, node: &N, doc: DocBlock, lines: &L, sink: &mut S)
    where
        N: DefinitionNode + ?Sized,
        L: SourceLines + ?Sized,
        S: DiagnosticSink + ?Sized,
    {
        if is_nested(node) {
            tracing::debug!("Skipping comment bar for nested definition at line {}", node.line());
            return;
        }

        let style = match node.kind() {
            DefinitionKind::Class | DefinitionKind::Interface => BarStyle::Class,
            _ => BarStyle::Member,
        };

        let bar_line = doc.start_line.saturating_sub(1);
        let present = lines.line(bar_line).is_some_and(|line| patterns::is_comment_bar(line, style));

        if !present {
            sink.report(Finding::new(RuleId::CommentBar, bar_line.max(1), COMMENT_BAR_MESSAGE));
        }
    }

    fn check_contents<N, L, S>(&self, node: &N, doc: DocBlock, lines: &L, sink: &mut S)
    where
        N: DefinitionNode + ?Sized,
        L: SourceLines + ?Sized,
        S: DiagnosticSink + ?Sized,
    {
        let top_class = node.kind() == DefinitionKind::Class && !node.has_parent();
        let callable = node.kind().is_callable();

        if !top_class && !callable {
            return;
        }

        let mut found_copyright = false;

        for number in doc.content_lines() {
            let Some(line) = lines.line(number) else {
                continue;
            };

            if top_class && !found_copyright {
                if let Some(owner) = patterns::copyright_owner(line) {
                    tracing::debug!("Copyright line for '{}' found at line {}", owner, number);
                    found_copyright = true;
                }
            }

            if callable && patterns::is_trivial_param_line(line) {
                sink.report(Finding::new(RuleId::TrivialParam, number, TRIVIAL_PARAM_MESSAGE));
            }
        }

        if top_class && !found_copyright {
            sink.report(Finding::new(RuleId::Copyright, doc.end_line, COPYRIGHT_MESSAGE));
        }
    }
}

/// Nesting depth counts the node itself when it defines a type; above one means nested
fn is_nested<N: DefinitionNode + ?Sized>(node: &N) -> bool {
    let depth = node.enclosing_types() + usize::from(node.kind().is_type());
    depth > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::syntax::Definition;
    use crate::patterns::comment_bar;

    fn source(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    fn rules(findings: &[Finding]) -> Vec<(RuleId, u32)> {
        findings.iter().map(|f| (f.rule, f.line)).collect()
    }

    /// The passing template fixture
    fn passing_file() -> Vec<String> {
        source(&[
            "package name.wadewalker.checks;",
            "",
            &comment_bar(0),
            "/**",
            " * Tests Javadoc comments that match the template.",
            " *",
            " * Copyright (c) 2011 Wade Walker. All rights reserved.",
            " * @author Wade Walker",
            " */",
            "public class Test {",
            "",
            &comment_bar(4),
            "    /**",
            "     * Constructor.",
            "     */",
            "    public Test() {",
            "    }",
            "",
            &comment_bar(4),
            "    /**",
            "     * Normal method comment.",
            "     * ",
            "     * @param iParam With some comment.",
            "     */",
            "    public void method1( int iParam ) {",
            "",
            "        /**",
            "         * Inner classes don't need bars.",
            "         */",
            "        class InnerClass {",
            "",
            "            /**",
            "             * Inner class methods don't need bars.",
            "             */",
            "            void innerClassMethod1() {",
            "            }",
            "        }",
            "    }",
            "}",
        ])
    }

    /// The failing template fixture
    fn failing_file() -> Vec<String> {
        source(&[
            "package name.wadewalker.checks;",
            "",
            "/**",
            " * Tests Javadoc comments that don't match the template.",
            " *",
            " * Missing copyright line here.",
            " *",
            " * @author Wade Walker",
            " */",
            "public class Test {",
            "",
            "    /**",
            "     * Constructor.",
            "     */",
            "    public Test() {",
            "    }",
            "",
            "    //====",
            "    /**",
            "     * Tests the trivial parameter comment that Eclipse generates by default.",
            "     * ",
            "     * @param iWhatever int",
            "     */",
            "    public void method1( int iWhatever ) {",
            "    }",
            "",
            &format!("        {}", comment_bar(0)),
            "    /**",
            "     * Insures that equals sign bars can be indented by multiples of four.",
            "     */",
            "    public void method2() {",
            "    }",
            "}",
        ])
    }

    #[test]
    fn test_passing_template_has_no_findings() {
        let lines = passing_file();
        let checker = JavadocTemplate::new();
        let definitions = [
            (Definition::new(DefinitionKind::Class, 10), DocBlock::new(4, 9)),
            (Definition::new(DefinitionKind::Constructor, 16).nested_in(1), DocBlock::new(13, 15)),
            (Definition::new(DefinitionKind::Method, 25).nested_in(1), DocBlock::new(20, 24)),
            (Definition::new(DefinitionKind::Class, 30).nested_in(1), DocBlock::new(27, 29)),
            (Definition::new(DefinitionKind::Method, 35).nested_in(2), DocBlock::new(32, 34)),
        ];

        for (definition, doc) in definitions {
            let findings = checker.check(&definition, Some(doc), &lines);
            assert!(findings.is_empty(), "unexpected findings for {definition:?}: {findings:?}");
        }
    }

    #[test]
    fn test_failing_template_findings() {
        let lines = failing_file();
        let checker = JavadocTemplate::new();

        let class = Definition::new(DefinitionKind::Class, 10);
        assert_eq!(
            rules(&checker.check(&class, Some(DocBlock::new(3, 9)), &lines)),
            vec![(RuleId::CommentBar, 2), (RuleId::Copyright, 9)]
        );

        let constructor = Definition::new(DefinitionKind::Constructor, 15).nested_in(1);
        assert_eq!(
            rules(&checker.check(&constructor, Some(DocBlock::new(12, 14)), &lines)),
            vec![(RuleId::CommentBar, 11)]
        );

        let method1 = Definition::new(DefinitionKind::Method, 24).nested_in(1);
        assert_eq!(
            rules(&checker.check(&method1, Some(DocBlock::new(19, 23)), &lines)),
            vec![(RuleId::CommentBar, 18), (RuleId::TrivialParam, 22)]
        );

        // indented by eight: still a multiple of four
        let method2 = Definition::new(DefinitionKind::Method, 31).nested_in(1);
        assert!(checker.check(&method2, Some(DocBlock::new(28, 30)), &lines).is_empty());
    }

    #[test]
    fn test_messages_are_verbatim() {
        let lines = failing_file();
        let class = Definition::new(DefinitionKind::Class, 10);
        let messages: Vec<_> = JavadocTemplate::new()
            .check(&class, Some(DocBlock::new(3, 9)), &lines)
            .into_iter()
            .map(|f| f.message)
            .collect();

        assert_eq!(
            messages,
            vec![
                "Missing or incorrect equals sign bar above Javadoc comment".to_string(),
                "Missing or incorrect copyright line in Javadoc comment".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_doc_block_is_skipped() {
        let lines = failing_file();
        let class = Definition::new(DefinitionKind::Class, 10);

        assert!(JavadocTemplate::new().check(&class, None, &lines).is_empty());
    }

    #[test]
    fn test_nested_class_bar_never_checked() {
        let lines = source(&["    garbage", "    /**", "     * Nested.", "     */", "    class A {"]);
        let nested = Definition::new(DefinitionKind::Class, 5).nested_in(1);

        assert!(JavadocTemplate::new().check(&nested, Some(DocBlock::new(2, 4)), &lines).is_empty());
    }

    #[test]
    fn test_enum_and_annotation_docs_are_not_checked() {
        let lines = source(&[&comment_bar(0), "/**", " * Colors.", " */", "enum Color {"]);

        for kind in [DefinitionKind::Enum, DefinitionKind::Annotation] {
            let definition = Definition::new(kind, 5);
            assert!(JavadocTemplate::new().check(&definition, Some(DocBlock::new(2, 4)), &lines).is_empty());
        }

        let no_bar = source(&["", "/**", " * Colors.", " */", "enum Color {"]);
        let enumeration = Definition::new(DefinitionKind::Enum, 5);
        assert!(JavadocTemplate::new().check(&enumeration, Some(DocBlock::new(2, 4)), &no_bar).is_empty());
    }

    #[test]
    fn test_class_bar_must_be_flush_left() {
        let lines = source(&[&comment_bar(4), "/**", " * Interface.", " */", "interface I {"]);
        let interface = Definition::new(DefinitionKind::Interface, 5);

        assert_eq!(
            rules(&JavadocTemplate::new().check(&interface, Some(DocBlock::new(2, 4)), &lines)),
            vec![(RuleId::CommentBar, 1)]
        );
    }

    #[test]
    fn test_doc_block_on_first_line_reports_bar_at_line_one() {
        let lines = source(&["/**", " * Interface.", " */", "interface I {"]);
        let interface = Definition::new(DefinitionKind::Interface, 4);

        assert_eq!(
            rules(&JavadocTemplate::new().check(&interface, Some(DocBlock::new(1, 3)), &lines)),
            vec![(RuleId::CommentBar, 1)]
        );
    }

    #[test]
    fn test_copyright_only_required_on_top_level_class() {
        let bar = comment_bar(0);
        let lines = source(&[&bar, "/**", " * No copyright.", " */", "interface I {"]);

        let interface = Definition::new(DefinitionKind::Interface, 5);
        assert!(JavadocTemplate::new().check(&interface, Some(DocBlock::new(2, 4)), &lines).is_empty());

        let member_lines = source(&[&comment_bar(4), "    /**", "     * No copyright.", "     */"]);
        let nested = Definition::new(DefinitionKind::Class, 5).nested_in(1);
        assert!(JavadocTemplate::new()
            .check(&nested, Some(DocBlock::new(2, 4)), &member_lines)
            .is_empty());
    }

    #[test]
    fn test_public_copyright_wording_accepted() {
        let bar = comment_bar(0);
        let lines = source(&[
            &bar,
            "/**",
            " * Utility class.",
            " * Copyright (c) 2011-2016 Wade Walker. Free for any use, but credit is appreciated.",
            " */",
            "public class Util {",
        ]);
        let class = Definition::new(DefinitionKind::Class, 6);

        assert!(JavadocTemplate::new().check(&class, Some(DocBlock::new(2, 5)), &lines).is_empty());
    }

    #[test]
    fn test_copyright_on_closing_line_is_not_seen() {
        let bar = comment_bar(0);
        let lines = source(&[
            &bar,
            "/**",
            " * Copyright (c) 2011 Wade Walker. All rights reserved.",
        ]);
        let class = Definition::new(DefinitionKind::Class, 4);

        assert_eq!(
            rules(&JavadocTemplate::new().check(&class, Some(DocBlock::new(2, 3)), &lines)),
            vec![(RuleId::Copyright, 3)]
        );
    }

    #[test]
    fn test_every_trivial_param_is_reported() {
        let bar = comment_bar(4);
        let lines = source(&[
            &bar,
            "    /**",
            "     * Adds.",
            "     * @param iA",
            "     * @param iB the second operand",
            "     * @param iC value",
            "     */",
            "    int add( int iA, int iB, int iC ) {",
        ]);
        let method = Definition::new(DefinitionKind::Method, 8).nested_in(1);

        assert_eq!(
            rules(&JavadocTemplate::new().check(&method, Some(DocBlock::new(2, 7)), &lines)),
            vec![(RuleId::TrivialParam, 4), (RuleId::TrivialParam, 6)]
        );
    }

    #[test]
    fn test_trivial_params_ignored_outside_callables() {
        let bar = comment_bar(0);
        let lines = source(&[
            &bar,
            "/**",
            " * Generic holder.",
            " * @param T",
            " */",
            "interface Holder<T> {",
        ]);
        let interface = Definition::new(DefinitionKind::Interface, 6);

        assert!(JavadocTemplate::new().check(&interface, Some(DocBlock::new(2, 5)), &lines).is_empty());
    }
}
