//! Recursive-descent parser for GraphQL schema documents.
//!
//! The parser walks the full token stream but never stops on comments; every
//! node records the indices of its first and last significant token.

use crate::sdl::ast::{
    Argument, ConstValue, Definition, Directive, DirectiveDefinition, Document,
    EnumValueDefinition, FieldDefinition, InputValueDefinition, Name, NodeLoc, OperationType,
    OperationTypeDefinition, SchemaDefinition, StringValue, TypeDefinition, TypeKind, TypeRef,
};
use crate::sdl::error::SyntaxError;
use crate::sdl::source::Source;
use crate::sdl::strings::{block_string_value, string_value};
use crate::sdl::token::{Token, TokenIndex, TokenKind, TokenStream};

/// Parses a token stream into a [`Document`].
///
/// # Errors
///
/// Returns a [`SyntaxError`] at the first token that does not fit the
/// schema definition grammar.
pub fn parse_document(source: &Source, tokens: &TokenStream) -> Result<Document, SyntaxError> {
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        last: 0,
        depth: 0,
    };
    parser.document()
}

struct Parser<'a> {
    source: &'a Source,
    tokens: &'a TokenStream,
    /// Current significant token.
    pos: TokenIndex,
    /// Last consumed significant token.
    last: TokenIndex,
    /// Open list types and list or object values.
    depth: usize,
}

/// Deepest list type or list/object value the parser accepts.
const MAX_NESTING: usize = 64;

impl<'a> Parser<'a> {
    // ── token cursor ──

    fn token(&self, index: TokenIndex) -> Token {
        self.tokens
            .get(index)
            .copied()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, 0, 0, 1, 1))
    }

    fn peek(&self) -> Token {
        self.token(self.pos)
    }

    fn text(&self, token: Token) -> &'a str {
        self.source.slice(token.start, token.end)
    }

    fn peek_text(&self) -> &'a str {
        self.text(self.peek())
    }

    /// Index of the next significant token after `index`.
    fn next_significant(&self, index: TokenIndex) -> TokenIndex {
        let mut next = index;
        loop {
            match self.tokens.next(next) {
                Some(i) if self.token(i).kind == TokenKind::Comment => next = i,
                Some(i) => return i,
                None => return index,
            }
        }
    }

    fn advance(&mut self) -> TokenIndex {
        let consumed = self.pos;
        self.last = consumed;
        self.pos = self.next_significant(consumed);
        consumed
    }

    fn loc_from(&self, start: TokenIndex) -> NodeLoc {
        NodeLoc::new(start, self.last)
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let token = self.peek();
        SyntaxError::new(message, token.line, token.column)
    }

    /// Runs `parse` one nesting level deeper, failing once [`MAX_NESTING`] is exceeded.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(format!("Nesting deeper than {MAX_NESTING} levels.")));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn unexpected(&self) -> SyntaxError {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            self.error("Unexpected <EOF>.")
        } else {
            self.error(format!(
                "Unexpected {} \"{}\".",
                token.kind.describe(),
                self.text(token)
            ))
        }
    }

    fn at_punct(&self, punct: &str) -> bool {
        self.peek().kind == TokenKind::Punctuator && self.peek_text() == punct
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek().kind == TokenKind::Name && self.peek_text() == keyword
    }

    fn skip_punct(&mut self, punct: &str) -> bool {
        if self.at_punct(punct) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, punct: &str) -> Result<TokenIndex, SyntaxError> {
        if self.at_punct(punct) {
            Ok(self.advance())
        } else {
            Err(self.error(format!(
                "Expected \"{punct}\", found {}.",
                self.found_description()
            )))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<TokenIndex, SyntaxError> {
        if self.at_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.error(format!(
                "Expected \"{keyword}\", found {}.",
                self.found_description()
            )))
        }
    }

    fn found_description(&self) -> String {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => "<EOF>".to_string(),
            kind => format!("{} \"{}\"", kind.describe(), self.text(token)),
        }
    }

    // ── document ──

    fn document(&mut self) -> Result<Document, SyntaxError> {
        // Step off the start-of-file marker onto the first significant token.
        self.pos = self.next_significant(0);
        let mut definitions = Vec::new();
        while self.peek().kind != TokenKind::Eof {
            definitions.push(self.definition()?);
        }
        let end = self.pos;
        Ok(Document {
            definitions,
            loc: NodeLoc::new(0, end),
        })
    }

    fn definition(&mut self) -> Result<Definition, SyntaxError> {
        let start = self.pos;
        let description = self.optional_description();

        if self.peek().kind != TokenKind::Name {
            return Err(self.unexpected());
        }

        match self.peek_text() {
            "schema" => Ok(Definition::Schema(self.schema_definition(start, description)?)),
            "directive" => Ok(Definition::Directive(
                self.directive_definition(start, description)?,
            )),
            "scalar" | "type" | "interface" | "union" | "enum" | "input" => Ok(Definition::Type(
                self.type_definition(start, description, false)?,
            )),
            "extend" => {
                if description.is_some() {
                    return Err(self.error(
                        "Unexpected description, descriptions are supported only on type definitions.",
                    ));
                }
                self.advance();
                if self.at_keyword("schema") {
                    let mut schema = self.schema_definition(start, None)?;
                    schema.extension = true;
                    Ok(Definition::Schema(schema))
                } else {
                    Ok(Definition::Type(self.type_definition(start, None, true)?))
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    fn optional_description(&mut self) -> Option<StringValue> {
        if self.peek().kind.is_delimited_string() {
            Some(self.string_literal())
        } else {
            None
        }
    }

    fn string_literal(&mut self) -> StringValue {
        let token = self.peek();
        let index = self.advance();
        let raw = self.text(token);
        let block = token.kind == TokenKind::BlockString;
        let value = if block {
            block_string_value(raw)
        } else {
            string_value(raw)
        };
        StringValue {
            value,
            block,
            loc: NodeLoc::new(index, index),
        }
    }

    fn name(&mut self) -> Result<Name, SyntaxError> {
        let token = self.peek();
        if token.kind != TokenKind::Name {
            return Err(self.error(format!(
                "Expected Name, found {}.",
                self.found_description()
            )));
        }
        let index = self.advance();
        Ok(Name {
            value: self.text(token).to_string(),
            loc: NodeLoc::new(index, index),
        })
    }

    // ── schema ──

    fn schema_definition(
        &mut self,
        start: TokenIndex,
        description: Option<StringValue>,
    ) -> Result<SchemaDefinition, SyntaxError> {
        self.expect_keyword("schema")?;
        let directives = self.directives()?;
        let mut operation_types = Vec::new();
        if self.skip_punct("{") {
            while !self.skip_punct("}") {
                operation_types.push(self.operation_type_definition()?);
            }
        }
        Ok(SchemaDefinition {
            description,
            extension: false,
            directives,
            operation_types,
            loc: self.loc_from(start),
        })
    }

    fn operation_type_definition(&mut self) -> Result<OperationTypeDefinition, SyntaxError> {
        let start = self.pos;
        let operation = match self.peek_text() {
            "query" => OperationType::Query,
            "mutation" => OperationType::Mutation,
            "subscription" => OperationType::Subscription,
            _ => return Err(self.unexpected()),
        };
        self.advance();
        self.expect_punct(":")?;
        let ty = self.name()?;
        Ok(OperationTypeDefinition {
            operation,
            ty,
            loc: self.loc_from(start),
        })
    }

    // ── directive definitions ──

    fn directive_definition(
        &mut self,
        start: TokenIndex,
        description: Option<StringValue>,
    ) -> Result<DirectiveDefinition, SyntaxError> {
        self.expect_keyword("directive")?;
        self.expect_punct("@")?;
        let name = self.name()?;
        let arguments = self.argument_definitions()?;
        let repeatable = self.skip_keyword("repeatable");
        self.expect_keyword("on")?;
        self.skip_punct("|");
        let mut locations = vec![self.name()?];
        while self.skip_punct("|") {
            locations.push(self.name()?);
        }
        Ok(DirectiveDefinition {
            description,
            name,
            arguments,
            repeatable,
            locations,
            loc: self.loc_from(start),
        })
    }

    // ── type definitions ──

    fn type_definition(
        &mut self,
        start: TokenIndex,
        description: Option<StringValue>,
        extension: bool,
    ) -> Result<TypeDefinition, SyntaxError> {
        let kind = match self.peek_text() {
            "scalar" => TypeKind::Scalar,
            "type" => TypeKind::Object,
            "interface" => TypeKind::Interface,
            "union" => TypeKind::Union,
            "enum" => TypeKind::Enum,
            "input" => TypeKind::InputObject,
            _ => return Err(self.unexpected()),
        };
        self.advance();
        let name = self.name()?;

        let mut definition = TypeDefinition {
            kind,
            extension,
            description,
            name,
            interfaces: Vec::new(),
            directives: Vec::new(),
            fields: Vec::new(),
            input_fields: Vec::new(),
            enum_values: Vec::new(),
            union_members: Vec::new(),
            loc: NodeLoc::new(start, start),
        };

        match kind {
            TypeKind::Scalar => {
                definition.directives = self.directives()?;
            }
            TypeKind::Object | TypeKind::Interface => {
                definition.interfaces = self.implements_interfaces()?;
                definition.directives = self.directives()?;
                definition.fields = self.fields_definition()?;
            }
            TypeKind::Union => {
                definition.directives = self.directives()?;
                if self.skip_punct("=") {
                    self.skip_punct("|");
                    definition.union_members.push(self.name()?);
                    while self.skip_punct("|") {
                        definition.union_members.push(self.name()?);
                    }
                }
            }
            TypeKind::Enum => {
                definition.directives = self.directives()?;
                if self.skip_punct("{") {
                    while !self.skip_punct("}") {
                        definition.enum_values.push(self.enum_value_definition()?);
                    }
                }
            }
            TypeKind::InputObject => {
                definition.directives = self.directives()?;
                if self.skip_punct("{") {
                    while !self.skip_punct("}") {
                        definition.input_fields.push(self.input_value_definition()?);
                    }
                }
            }
        }

        definition.loc = self.loc_from(start);
        Ok(definition)
    }

    /// `implements A & B`; a leading `&` is allowed.
    fn implements_interfaces(&mut self) -> Result<Vec<Name>, SyntaxError> {
        let mut interfaces = Vec::new();
        if self.skip_keyword("implements") {
            self.skip_punct("&");
            interfaces.push(self.name()?);
            while self.skip_punct("&") {
                interfaces.push(self.name()?);
            }
        }
        Ok(interfaces)
    }

    fn fields_definition(&mut self) -> Result<Vec<FieldDefinition>, SyntaxError> {
        let mut fields = Vec::new();
        if self.skip_punct("{") {
            while !self.skip_punct("}") {
                fields.push(self.field_definition()?);
            }
        }
        Ok(fields)
    }

    fn field_definition(&mut self) -> Result<FieldDefinition, SyntaxError> {
        let start = self.pos;
        let description = self.optional_description();
        let name = self.name()?;
        let arguments = self.argument_definitions()?;
        self.expect_punct(":")?;
        let ty = self.type_ref()?;
        let directives = self.directives()?;
        Ok(FieldDefinition {
            description,
            name,
            arguments,
            ty,
            directives,
            loc: self.loc_from(start),
        })
    }

    fn argument_definitions(&mut self) -> Result<Vec<InputValueDefinition>, SyntaxError> {
        let mut arguments = Vec::new();
        if self.skip_punct("(") {
            while !self.skip_punct(")") {
                arguments.push(self.input_value_definition()?);
            }
        }
        Ok(arguments)
    }

    fn input_value_definition(&mut self) -> Result<InputValueDefinition, SyntaxError> {
        let start = self.pos;
        let description = self.optional_description();
        let name = self.name()?;
        self.expect_punct(":")?;
        let ty = self.type_ref()?;
        let default_value = if self.skip_punct("=") {
            Some(self.const_value()?)
        } else {
            None
        };
        let directives = self.directives()?;
        Ok(InputValueDefinition {
            description,
            name,
            ty,
            default_value,
            directives,
            loc: self.loc_from(start),
        })
    }

    fn enum_value_definition(&mut self) -> Result<EnumValueDefinition, SyntaxError> {
        let start = self.pos;
        let description = self.optional_description();
        if matches!(self.peek_text(), "true" | "false" | "null") {
            return Err(self.error(format!(
                "{} is reserved and cannot be used for an enum value.",
                self.peek_text()
            )));
        }
        let name = self.name()?;
        let directives = self.directives()?;
        Ok(EnumValueDefinition {
            description,
            name,
            directives,
            loc: self.loc_from(start),
        })
    }

    fn type_ref(&mut self) -> Result<TypeRef, SyntaxError> {
        let inner = if self.skip_punct("[") {
            let item = self.nested(Self::type_ref)?;
            self.expect_punct("]")?;
            TypeRef::List(Box::new(item))
        } else {
            TypeRef::Named(self.name()?)
        };
        if self.skip_punct("!") {
            Ok(TypeRef::NonNull(Box::new(inner)))
        } else {
            Ok(inner)
        }
    }

    // ── directives and values ──

    fn directives(&mut self) -> Result<Vec<Directive>, SyntaxError> {
        let mut directives = Vec::new();
        while self.at_punct("@") {
            let start = self.advance();
            let name = self.name()?;
            let mut arguments = Vec::new();
            if self.skip_punct("(") {
                while !self.skip_punct(")") {
                    let arg_start = self.pos;
                    let arg_name = self.name()?;
                    self.expect_punct(":")?;
                    let value = self.const_value()?;
                    arguments.push(Argument {
                        name: arg_name,
                        value,
                        loc: self.loc_from(arg_start),
                    });
                }
            }
            directives.push(Directive {
                name,
                arguments,
                loc: self.loc_from(start),
            });
        }
        Ok(directives)
    }

    fn const_value(&mut self) -> Result<ConstValue, SyntaxError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Int => {
                self.advance();
                Ok(ConstValue::Int(self.text(token).to_string()))
            }
            TokenKind::Float => {
                self.advance();
                Ok(ConstValue::Float(self.text(token).to_string()))
            }
            TokenKind::String | TokenKind::BlockString => {
                Ok(ConstValue::String(self.string_literal()))
            }
            TokenKind::Name => {
                self.advance();
                Ok(match self.text(token) {
                    "true" => ConstValue::Boolean(true),
                    "false" => ConstValue::Boolean(false),
                    "null" => ConstValue::Null,
                    other => ConstValue::Enum(other.to_string()),
                })
            }
            TokenKind::Punctuator if self.at_punct("[") => {
                self.advance();
                let mut items = Vec::new();
                while !self.skip_punct("]") {
                    items.push(self.nested(Self::const_value)?);
                }
                Ok(ConstValue::List(items))
            }
            TokenKind::Punctuator if self.at_punct("{") => {
                self.advance();
                let mut fields = Vec::new();
                while !self.skip_punct("}") {
                    let name = self.name()?;
                    self.expect_punct(":")?;
                    fields.push((name, self.nested(Self::const_value)?));
                }
                Ok(ConstValue::Object(fields))
            }
            _ => Err(self.unexpected()),
        }
    }
}
