//! pubspec.yaml convention checks.
//!
//! [`validate`] runs two independent passes over the same text: a structural
//! parse into a [`Pubspec`], and a line scan for major section order. A parse
//! failure stops validation; every other check reports independently.

use serde::Serialize;
use url::Url;

use crate::diagnostics::{Diagnostic, E000, O001, R001, R002, R003, R004};
use crate::models::{PublishTo, Pubspec};
use crate::parser::parse_pubspec;

/// Canonical order of major top-level sections.
pub const MAJOR_SECTIONS: &[&str] = &[
    "environment:",
    "flutter:",
    "dependencies:",
    "dev_dependencies:",
];

/// Required prefix of a published package's `issue_tracker` link.
pub const EXPECTED_ISSUE_LINK_PREFIX: &str =
    "https://github.com/flutter/flutter/issues?q=is%3Aissue+is%3Aopen+label%3A";

/// Indentation for list items inside a multi-line diagnostic.
const LIST_INDENT: &str = "  ";

/// Outcome of validating one package's pubspec.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// `true` if no check failed.
    pub passed: bool,
    /// Diagnostics in check order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            passed: diagnostics.is_empty(),
            diagnostics,
        }
    }
}

/// Validate pubspec.yaml text for the package named `package_name`.
///
/// `package_name` is the package's directory name, which published
/// repository links must end with.
#[must_use]
pub fn validate(content: &str, package_name: &str) -> ValidationResult {
    let pubspec = match parse_pubspec(content) {
        Ok(p) => p,
        Err(e) => {
            return ValidationResult::from_diagnostics(vec![Diagnostic::new(
                E000,
                format!("Cannot parse pubspec.yaml: {e}"),
            )]);
        }
    };

    let mut diags = Vec::new();
    diags.extend(check_section_order(content));
    diags.extend(check_publish_policy(&pubspec, package_name));
    ValidationResult::from_diagnostics(diags)
}

/// Returns `true` if the major section headers in `content` appear in
/// canonical relative order.
///
/// A line counts when, after trailing whitespace is trimmed, it equals a
/// header token. Indented lines never match. Any other line, and repeated or
/// absent headers, are ignored.
#[must_use]
pub fn sections_in_order(content: &str) -> bool {
    let mut previous = 0;
    for line in content.lines() {
        let Some(index) = MAJOR_SECTIONS
            .iter()
            .position(|section| *section == line.trim_end())
        else {
            continue;
        };
        if index < previous {
            return false;
        }
        previous = index;
    }
    true
}

/// O001: Check major section order in the raw text.
#[must_use]
pub fn check_section_order(content: &str) -> Option<Diagnostic> {
    if sections_in_order(content) {
        return None;
    }
    let mut message = String::from("Major sections should follow standard repository ordering:");
    for section in MAJOR_SECTIONS {
        message.push('\n');
        message.push_str(LIST_INDENT);
        message.push_str(section);
    }
    Some(Diagnostic::new(O001, message))
}

/// R001–R004: Link policy for packages that will be published.
///
/// Returns nothing for `publish_to: none`.
#[must_use]
pub fn check_publish_policy(pubspec: &Pubspec, package_name: &str) -> Vec<Diagnostic> {
    match pubspec.publish_to {
        PublishTo::Unpublished => Vec::new(),
        PublishTo::Registry(_) => {
            let mut diags = check_repository_links(pubspec, package_name);
            diags.extend(check_issue_tracker(pubspec));
            diags
        }
    }
}

/// R001 + R002 + R003: `repository` must be present and end with the
/// package name; `homepage` must not be present.
fn check_repository_links(pubspec: &Pubspec, package_name: &str) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    match pubspec.repository.as_deref() {
        None => {
            diags.push(Diagnostic::new(R001, "Missing repository").with_field("repository"));
        }
        Some(repository) => {
            if !url_path(repository).ends_with(package_name) {
                diags.push(
                    Diagnostic::new(
                        R002,
                        "The \"repository\" link should end with the package name.",
                    )
                    .with_field("repository")
                    .with_suggestion(format!(
                        "Point the link at the package directory, ending in '{package_name}'"
                    )),
                );
            }
        }
    }

    if pubspec.homepage.is_some() {
        diags.push(
            Diagnostic::new(
                R003,
                "Found a \"homepage\" entry; only \"repository\" should be used.",
            )
            .with_field("homepage")
            .with_suggestion("Remove the homepage entry"),
        );
    }

    diags
}

/// R004: `issue_tracker` must start with the flutter/flutter label search prefix.
fn check_issue_tracker(pubspec: &Pubspec) -> Option<Diagnostic> {
    let ok = pubspec
        .issue_tracker
        .as_deref()
        .is_some_and(|link| link.starts_with(EXPECTED_ISSUE_LINK_PREFIX));
    if ok {
        return None;
    }
    Some(
        Diagnostic::new(
            R004,
            format!(
                "A package should have an \"issue_tracker\" link to a search for open \
                 flutter/flutter bugs with the appropriate label:\n{LIST_INDENT}{EXPECTED_ISSUE_LINK_PREFIX}"
            ),
        )
        .with_field("issue_tracker"),
    )
}

/// Path component of a URL; the text as written if it is not an absolute URL.
fn url_path(link: &str) -> String {
    Url::parse(link)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| link.to_string())
}
