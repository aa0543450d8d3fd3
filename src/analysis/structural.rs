//! Lexical extraction and comparison of class/method declarations.

use super::findings::Finding;
use regex::Regex;
use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Access modifier (optional), optional `static`/`final`, the literal
/// `class`, then the identifier to record.
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:public|private|protected)\s+)?(?:(?:static|final)\s+)*class\s+(\w+)")
        .expect("class declaration pattern is valid")
});

/// Access modifier (required - package-private methods are intentionally not
/// matched), optional modifiers, optional generic type parameters, a return
/// type token, the method name, and a parenthesized parameter list.
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:public|private|protected)\s+(?:(?:static|final|synchronized|abstract|native|strictfp)\s+)*(?:<[^>]*>\s*)?[\w$.]+(?:<[^>]*>)?(?:\[\])*\s+(\w+)\s*\(([^)]*)\)",
    )
    .expect("method declaration pattern is valid")
});

/// Declarations extracted from one source body.
///
/// A method entry is the normalized `"<name>(<raw-parameter-text>)"` string.
/// The parameter text is recorded verbatim: cosmetic formatting differences
/// in the parameter list are treated as a signature change. Callers needing
/// stricter semantics must normalize upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSet {
    pub classes: BTreeSet<String>,
    pub methods: BTreeSet<String>,
}

impl DeclarationSet {
    /// True when no declaration matched at all, e.g. an interface-only or
    /// enum-only file. Expected behavior, not a failure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.methods.is_empty()
    }
}

/// Line-oriented extractor and comparator for class/method declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralAnalyzer;

impl StructuralAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extract class and method declarations from raw source text.
    #[must_use]
    pub fn extract(&self, source: &str) -> DeclarationSet {
        let mut set = DeclarationSet::default();
        for line in source.lines() {
            if let Some(caps) = CLASS_RE.captures(line) {
                set.classes.insert(caps[1].to_string());
            } else if let Some(caps) = METHOD_RE.captures(line) {
                set.methods.insert(format!("{}({})", &caps[1], &caps[2]));
            }
        }
        set
    }

    /// Compare two versions of one file and emit critical findings.
    ///
    /// `file` is the fully-qualified class name used as the reporting label.
    /// Pass an empty `to_source` for removed-file mode: every class and
    /// method in `from_source` is then a removal candidate.
    #[must_use]
    pub fn compare(&self, file: &str, from_source: &str, to_source: &str) -> Vec<Finding> {
        let from = self.extract(from_source);
        let to = self.extract(to_source);

        let mut findings = Vec::new();

        let removed_classes: Vec<&String> = from.classes.difference(&to.classes).collect();
        for class in &removed_classes {
            findings.push(Finding::removed_class(file, class.as_str()));
        }

        // A removed method is redundant when its owning class already
        // appears in the removals; owning is judged by simple-name suffix
        // match on the reporting label.
        let owner_removed = removed_classes
            .iter()
            .any(|class| simple_name_matches(file, class));
        for method in from.methods.difference(&to.methods) {
            if owner_removed {
                tracing::debug!(file, method, "Suppressing removed method - owning class removed");
                continue;
            }
            findings.push(Finding::removed_method(file, method.as_str()));
        }

        findings.extend(self.detect_modified_signatures(file, from_source, to_source));
        findings
    }

    /// Walk the line diff: for each removed method-declaration line, the
    /// nearest following added line with the same extracted method name is
    /// evidence of a signature change. A method reported here may also
    /// appear as a removed method; the duplicate is accepted rather than
    /// reconciled.
    fn detect_modified_signatures(
        &self,
        file: &str,
        from_source: &str,
        to_source: &str,
    ) -> Vec<Finding> {
        let diff = TextDiff::from_lines(from_source, to_source);
        let changes: Vec<(ChangeTag, String)> = diff
            .iter_all_changes()
            .map(|c| (c.tag(), c.value().trim_end_matches('\n').to_string()))
            .collect();

        let mut findings = Vec::new();
        for (idx, (tag, line)) in changes.iter().enumerate() {
            if *tag != ChangeTag::Delete {
                continue;
            }
            let Some(name) = method_name(line) else {
                continue;
            };
            let matched = changes[idx + 1..]
                .iter()
                .find(|(t, l)| {
                    *t == ChangeTag::Insert && method_name(l).as_deref() == Some(name.as_str())
                });
            if let Some((_, added)) = matched {
                findings.push(Finding::modified_signature(file, &name, line, added));
            }
        }
        findings
    }
}

/// Extract the method name from a declaration line, if it is one.
fn method_name(line: &str) -> Option<String> {
    METHOD_RE.captures(line).map(|caps| caps[1].to_string())
}

/// True if `class_simple_name` is the simple-name suffix of the label.
fn simple_name_matches(label: &str, class_simple_name: &str) -> bool {
    label == class_simple_name
        || label.ends_with(&format!(".{class_simple_name}"))
        || label.ends_with(&format!("${class_simple_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FindingKind;

    const ANALYZER: StructuralAnalyzer = StructuralAnalyzer;

    #[test]
    fn test_extract_classes_and_methods() {
        let source = r"
package com.example;

public final class Foo {
    public void bar(int x) {
        helper();
    }

    private static String name(String prefix, int n) {
        return prefix + n;
    }

    void packagePrivate() {}
}
";
        let set = ANALYZER.extract(source);
        assert_eq!(set.classes, ["Foo".to_string()].into());
        assert_eq!(
            set.methods,
            [
                "bar(int x)".to_string(),
                "name(String prefix, int n)".to_string()
            ]
            .into()
        );
    }

    #[test]
    fn test_package_private_methods_not_matched() {
        let set = ANALYZER.extract("class Foo {\n    void quiet() {}\n}");
        assert!(set.methods.is_empty(), "documented limitation: access modifier required");
        assert_eq!(set.classes.len(), 1);
    }

    #[test]
    fn test_generic_and_array_return_types() {
        let source = "public class Box {\n    public List<String> names() { return null; }\n    public int[] counts() { return null; }\n}";
        let set = ANALYZER.extract(source);
        assert!(set.methods.contains("names()"));
        assert!(set.methods.contains("counts()"));
    }

    #[test]
    fn test_constructors_not_recorded_as_methods() {
        let set = ANALYZER.extract("public class Foo {\n    public Foo(int x) {}\n}");
        assert!(set.methods.is_empty());
    }

    #[test]
    fn test_interface_only_file_yields_empty_sets() {
        let set = ANALYZER.extract("public interface Greeter {\n    String greet(String name);\n}");
        assert!(set.is_empty());
    }

    #[test]
    fn test_cosmetic_parameter_formatting_is_a_different_entry() {
        let a = ANALYZER.extract("public class A {\n    public void f(int x,int y) {}\n}");
        let b = ANALYZER.extract("public class A {\n    public void f(int x, int y) {}\n}");
        assert_ne!(a.methods, b.methods, "verbatim parameter text, no normalization");
    }

    #[test]
    fn test_removed_class_suppresses_its_methods() {
        let from = "public class Foo {\n    public void foo(int x) {}\n}";
        let findings = ANALYZER.compare("com.example.Foo", from, "");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::RemovedClass);
        assert_eq!(findings[0].label, "Foo");
        assert!(
            !findings.iter().any(|f| f.kind == FindingKind::RemovedMethod),
            "removed methods of a removed class are redundant"
        );
    }

    #[test]
    fn test_removed_method_with_surviving_class() {
        let from = "public class Foo {\n    public void keep() {}\n    public void gone(int x) {}\n}";
        let to = "public class Foo {\n    public void keep() {}\n}";
        let findings = ANALYZER.compare("com.example.Foo", from, to);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::RemovedMethod);
        assert_eq!(findings[0].label, "gone(int x)");
    }

    #[test]
    fn test_modified_signature_detected_with_evidence() {
        let from = "public class Foo {\n    public void handle(int code) {}\n}";
        let to = "public class Foo {\n    public void handle(int code, String reason) {}\n}";
        let findings = ANALYZER.compare("com.example.Foo", from, to);

        let modified: Vec<_> = findings
            .iter()
            .filter(|f| f.kind == FindingKind::ModifiedSignature)
            .collect();
        assert_eq!(modified.len(), 1);
        assert_eq!(modified[0].label, "handle");
        let evidence = modified[0].evidence.as_ref().unwrap();
        assert!(evidence.removed_line.contains("int code)"));
        assert!(evidence.added_line.contains("String reason"));

        // Known limitation: the same method also shows up as removed
        assert!(findings.iter().any(|f| f.kind == FindingKind::RemovedMethod));
    }

    #[test]
    fn test_renamed_method_is_not_a_signature_change() {
        let from = "public class Foo {\n    public void bar(int x) {}\n}";
        let to = "public class Foo {\n    public void baz(int x) {}\n}";
        let findings = ANALYZER.compare("com.example.Foo", from, to);

        // Names differ, so no match is found; falls through to an
        // independent removal (the addition is unflagged).
        assert!(findings.iter().all(|f| f.kind != FindingKind::ModifiedSignature));
        assert!(findings
            .iter()
            .any(|f| f.kind == FindingKind::RemovedMethod && f.label == "bar(int x)"));
    }

    #[test]
    fn test_unrelated_file_label_does_not_suppress() {
        // Multi-class file: the file label matches Outer, not Helper
        let from = "public class Outer {\n    public void run() {}\n}\nclass Helper {\n    public void assist() {}\n}";
        let to = "public class Outer {\n    public void run() {}\n}";
        let findings = ANALYZER.compare("com.example.Outer", from, to);

        assert!(findings
            .iter()
            .any(|f| f.kind == FindingKind::RemovedClass && f.label == "Helper"));
        assert!(
            findings
                .iter()
                .any(|f| f.kind == FindingKind::RemovedMethod && f.label == "assist()"),
            "suppression is by simple-name suffix match on the label, which Helper fails"
        );
    }
}
