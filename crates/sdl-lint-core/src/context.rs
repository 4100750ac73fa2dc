//! Context types for rule execution.

use crate::sdl::{NodeLoc, ParsedDocument, Source, TokenStream};
use crate::types::{Location, Severity, Violation};
use std::path::{Path, PathBuf};

/// Context provided to rules for a single schema document.
///
/// Besides the file metadata it exposes the raw source and token stream of the
/// document, and acts as the violation sink: [`DocumentContext::violation`]
/// resolves a node or an explicit byte offset into a reportable [`Location`].
#[derive(Debug, Clone)]
pub struct DocumentContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Original document body.
    pub source: &'a Source,
    /// Every token of the document, comments included.
    pub tokens: &'a TokenStream,
}

impl<'a> DocumentContext<'a> {
    /// Creates a new document context.
    #[must_use]
    pub fn new(path: &'a Path, parsed: &'a ParsedDocument, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            relative_path,
            source: &parsed.source,
            tokens: &parsed.tokens,
        }
    }

    /// Returns the byte offset where a node starts.
    #[must_use]
    pub fn node_start(&self, loc: NodeLoc) -> usize {
        self.tokens.get(loc.start_token).map_or(0, |t| t.start)
    }

    /// Resolves a byte offset to a location in this document.
    ///
    /// The span covers one byte, or none at the very end of the body.
    #[must_use]
    pub fn location_at(&self, offset: usize) -> Location {
        let (line, column) = self.source.position(offset);
        let length = usize::from(offset < self.source.body().len());
        Location::new(self.relative_path.clone(), line, column).with_span(offset, length)
    }

    /// Builds a violation for `node`.
    ///
    /// When `offset` is given it is an absolute byte offset into the body and
    /// overrides the node's own start position.
    #[must_use]
    pub fn violation(
        &self,
        code: &str,
        rule: &str,
        severity: Severity,
        node: NodeLoc,
        offset: Option<usize>,
        message: impl Into<String>,
    ) -> Violation {
        let offset = offset.unwrap_or_else(|| self.node_start(node));
        Violation::new(code, rule, severity, self.location_at(offset), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdl::parse;

    #[test]
    fn test_relative_path() {
        let parsed = parse("scalar A").expect("should parse");
        let path = Path::new("/project/schema/a.graphql");
        let ctx = DocumentContext::new(path, &parsed, Path::new("/project"));
        assert_eq!(ctx.relative_path, PathBuf::from("schema/a.graphql"));
    }

    #[test]
    fn test_violation_defaults_to_node_start() {
        let parsed = parse("\n  type A {\n    a: Int\n  }").expect("should parse");
        let ctx = DocumentContext::new(Path::new("a.graphql"), &parsed, Path::new("."));
        let field = &parsed
            .document
            .type_definitions()
            .next()
            .expect("a type")
            .fields[0];

        let v = ctx.violation("X001", "x", Severity::Error, field.loc, None, "msg");
        assert_eq!((v.location.line, v.location.column), (3, 5));
        assert_eq!(v.location.length, 1);
    }

    #[test]
    fn test_violation_with_explicit_offset() {
        let parsed = parse("type A {\n  a: Int\n}").expect("should parse");
        let ctx = DocumentContext::new(Path::new("a.graphql"), &parsed, Path::new("."));
        let a = parsed.document.type_definitions().next().expect("a type");

        let v = ctx.violation("X001", "x", Severity::Error, a.loc, Some(11), "msg");
        assert_eq!((v.location.line, v.location.column), (2, 3));
    }
}
