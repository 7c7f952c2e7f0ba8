//! Compiled line patterns for the Javadoc template check
//!
//! Architectural Principle: Service Layer - every line classification the doc check needs
//! lives behind one small API
//! - Patterns are compiled once on first use and shared read-only across threads
//! - All matching is whole-line, so callers pass a single raw source line

use lazy_static::lazy_static;
use regex::Regex;

/// Number of `=` characters in a comment bar
pub const BAR_WIDTH: usize = 78;

/// Whitespace as `java.util.regex` defines `\s`: ASCII only
const WS: &str = r"[ \t\n\x0B\f\r]";
/// Complement of [`WS`]
const NON_WS: &str = r"[^ \t\n\x0B\f\r]";

lazy_static! {
    /// `//` plus the bar, flush left (classes and interfaces)
    static ref CLASS_COMMENT_BAR: Regex = Regex::new(&format!(r"^//={{{BAR_WIDTH}}}$"))
        .expect("class comment bar pattern is valid");

    /// `//` plus the bar, indented by a multiple of four (constructors and methods)
    static ref MEMBER_COMMENT_BAR: Regex =
        Regex::new(&format!(r"^({WS}{{4}})+//={{{BAR_WIDTH}}}$"))
            .expect("member comment bar pattern is valid");

    /// Either accepted copyright wording, owner captured
    static ref COPYRIGHT_LINE: Regex = Regex::new(&format!(
        r"^ \* Copyright \(c\) [0-9]{{4}}({WS}*-{WS}*[0-9]{{4}})? (?P<owner>{NON_WS}.*?)\. (All rights reserved\.|Free for any use, but credit is appreciated\.){WS}*$"
    ))
    .expect("copyright pattern is valid");

    /// `@param` followed by the name and at most one more word
    static ref TRIVIAL_PARAM: Regex =
        Regex::new(&format!(r"^.*@param({WS}+{NON_WS}+){{1,2}}$"))
            .expect("trivial param pattern is valid");
}

/// Which separator bar a doc comment needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStyle {
    /// No indentation
    Class,
    /// Indented by one or more groups of four whitespace characters
    Member,
}

/// Whether `line` is a correctly formatted comment bar of the given style
pub fn is_comment_bar(line: &str, style: BarStyle) -> bool {
    match style {
        BarStyle::Class => CLASS_COMMENT_BAR.is_match(line),
        BarStyle::Member => MEMBER_COMMENT_BAR.is_match(line),
    }
}

/// Whether `line` is one of the accepted copyright lines
pub fn is_copyright_line(line: &str) -> bool {
    COPYRIGHT_LINE.is_match(line)
}

/// Owner named on a copyright line, if the line is one
pub fn copyright_owner(line: &str) -> Option<&str> {
    COPYRIGHT_LINE.captures(line).and_then(|caps| caps.name("owner")).map(|m| m.as_str())
}

/// Whether `line` is a `@param` tag with no real description
pub fn is_trivial_param_line(line: &str) -> bool {
    TRIVIAL_PARAM.is_match(line)
}

/// A correctly formatted bar, for building fixtures and fix suggestions
pub fn comment_bar(indent: usize) -> String {
    format!("{}//{}", " ".repeat(indent), "=".repeat(BAR_WIDTH))
}
