//! GraphQL schema definition language front end.
//!
//! Lexes and parses a document while keeping the full token stream, so rules
//! can inspect the raw text of descriptions and the layout around them.

mod ast;
mod description;
mod error;
mod lexer;
mod parser;
mod source;
mod strings;
mod token;
mod visit;

pub use ast::{
    Argument, ConstValue, Definition, Described, Directive, DirectiveDefinition, Document,
    EnumValueDefinition, FieldDefinition, InputValueDefinition, Name, NodeLoc,
    OperationType, OperationTypeDefinition, SchemaDefinition, StringValue, TypeDefinition,
    TypeKind, TypeRef,
};
pub use description::get_description;
pub use error::SyntaxError;
pub use lexer::tokenize;
pub use parser::parse_document;
pub use source::Source;
pub use strings::{block_string_value, dedent_block_string_value, string_value};
pub use token::{Token, TokenIndex, TokenKind, TokenStream};
pub use visit::{walk_document, Ancestor, Ancestors, VisitAction, Visitor};

/// A document together with the source and tokens it was parsed from.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Original source text.
    pub source: Source,
    /// Every token, comments included.
    pub tokens: TokenStream,
    /// Syntax tree.
    pub document: Document,
}

/// Lexes and parses a schema document.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the body is not a valid schema document.
pub fn parse(body: impl Into<String>) -> Result<ParsedDocument, SyntaxError> {
    let source = Source::new(body);
    let tokens = tokenize(&source)?;
    let document = parse_document(&source, &tokens)?;
    Ok(ParsedDocument {
        source,
        tokens,
        document,
    })
}
