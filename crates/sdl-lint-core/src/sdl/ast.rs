//! Abstract syntax tree for GraphQL schema documents.
//!
//! Nodes do not own text: each carries a [`NodeLoc`] naming its first and
//! last token in the document's [`TokenStream`](crate::sdl::TokenStream), so
//! rules can always get back to the raw layout around a node.

use crate::sdl::token::TokenIndex;

/// Token range of a node, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeLoc {
    /// First token of the node (its description, when it has one).
    pub start_token: TokenIndex,
    /// Last token of the node.
    pub end_token: TokenIndex,
}

impl NodeLoc {
    /// Creates a new token range.
    #[must_use]
    pub fn new(start_token: TokenIndex, end_token: TokenIndex) -> Self {
        Self {
            start_token,
            end_token,
        }
    }
}

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Identifier text.
    pub value: String,
    /// Token range.
    pub loc: NodeLoc,
}

/// A string literal, with its value already unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringValue {
    /// Unescaped value.
    pub value: String,
    /// Whether the literal used `"""` delimiters.
    pub block: bool,
    /// Token range.
    pub loc: NodeLoc,
}

/// A constant input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstValue {
    /// Integer literal, kept as written.
    Int(String),
    /// Float literal, kept as written.
    Float(String),
    /// String or block string literal.
    String(StringValue),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`.
    Null,
    /// Enum value.
    Enum(String),
    /// `[...]` list.
    List(Vec<ConstValue>),
    /// `{...}` input object.
    Object(Vec<(Name, ConstValue)>),
}

/// A `name: value` pair inside a directive application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Argument name.
    pub name: Name,
    /// Argument value.
    pub value: ConstValue,
    /// Token range.
    pub loc: NodeLoc,
}

/// A directive application such as `@deprecated(reason: "...")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Directive name without the `@`.
    pub name: Name,
    /// Arguments in source order.
    pub arguments: Vec<Argument>,
    /// Token range.
    pub loc: NodeLoc,
}

/// A type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// `Name`
    Named(Name),
    /// `[Type]`
    List(Box<TypeRef>),
    /// `Type!`
    NonNull(Box<TypeRef>),
}

/// An argument or input object field definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValueDefinition {
    /// Description literal, if any.
    pub description: Option<StringValue>,
    /// Declared name.
    pub name: Name,
    /// Declared type.
    pub ty: TypeRef,
    /// Default value, if any.
    pub default_value: Option<ConstValue>,
    /// Applied directives.
    pub directives: Vec<Directive>,
    /// Token range.
    pub loc: NodeLoc,
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Description literal, if any.
    pub description: Option<StringValue>,
    /// Declared name.
    pub name: Name,
    /// Field arguments.
    pub arguments: Vec<InputValueDefinition>,
    /// Declared type.
    pub ty: TypeRef,
    /// Applied directives.
    pub directives: Vec<Directive>,
    /// Token range.
    pub loc: NodeLoc,
}

impl FieldDefinition {
    /// Returns true if a directive with the given name is applied.
    #[must_use]
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name.value == name)
    }
}

/// A value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDefinition {
    /// Description literal, if any.
    pub description: Option<StringValue>,
    /// Declared name.
    pub name: Name,
    /// Applied directives.
    pub directives: Vec<Directive>,
    /// Token range.
    pub loc: NodeLoc,
}

/// The kind of a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `scalar`
    Scalar,
    /// `type`
    Object,
    /// `interface`
    Interface,
    /// `union`
    Union,
    /// `enum`
    Enum,
    /// `input`
    InputObject,
}

impl TypeKind {
    /// Lower-case label used in messages, e.g. `input object`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Object => "object",
            Self::Interface => "interface",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::InputObject => "input object",
        }
    }
}

/// A type definition or type extension.
///
/// Only the members that apply to `kind` are populated: `fields` for object
/// and interface types, `input_fields` for input objects, `enum_values` for
/// enums and `union_members` for unions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    /// Which kind of type this is.
    pub kind: TypeKind,
    /// True for `extend ...` declarations.
    pub extension: bool,
    /// Description literal, if any. Always `None` for extensions.
    pub description: Option<StringValue>,
    /// Declared name.
    pub name: Name,
    /// Interfaces named after `implements`.
    pub interfaces: Vec<Name>,
    /// Applied directives.
    pub directives: Vec<Directive>,
    /// Fields of object and interface types.
    pub fields: Vec<FieldDefinition>,
    /// Fields of input object types.
    pub input_fields: Vec<InputValueDefinition>,
    /// Values of enum types.
    pub enum_values: Vec<EnumValueDefinition>,
    /// Members of union types.
    pub union_members: Vec<Name>,
    /// Token range.
    pub loc: NodeLoc,
}

impl TypeDefinition {
    /// Returns true if a field with the given name is declared here.
    #[must_use]
    pub fn declares_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name.value == name)
    }
}

/// Root operation kind in a schema definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// `query`
    Query,
    /// `mutation`
    Mutation,
    /// `subscription`
    Subscription,
}

/// `query: Query` inside a schema definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationTypeDefinition {
    /// Operation kind.
    pub operation: OperationType,
    /// Root type name.
    pub ty: Name,
    /// Token range.
    pub loc: NodeLoc,
}

/// A `schema { ... }` definition or `extend schema` extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinition {
    /// Description literal, if any.
    pub description: Option<StringValue>,
    /// True for `extend schema`.
    pub extension: bool,
    /// Applied directives.
    pub directives: Vec<Directive>,
    /// Root operation types.
    pub operation_types: Vec<OperationTypeDefinition>,
    /// Token range.
    pub loc: NodeLoc,
}

/// A `directive @name on ...` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveDefinition {
    /// Description literal, if any.
    pub description: Option<StringValue>,
    /// Directive name without the `@`.
    pub name: Name,
    /// Declared arguments.
    pub arguments: Vec<InputValueDefinition>,
    /// Whether the directive is `repeatable`.
    pub repeatable: bool,
    /// Allowed locations.
    pub locations: Vec<Name>,
    /// Token range.
    pub loc: NodeLoc,
}

/// A top-level definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    /// `schema` / `extend schema`
    Schema(SchemaDefinition),
    /// `directive @...`
    Directive(DirectiveDefinition),
    /// Any named type definition or extension.
    Type(TypeDefinition),
}

/// A parsed schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Definitions in source order.
    pub definitions: Vec<Definition>,
    /// Token range, from the start-of-file to the end-of-file token.
    pub loc: NodeLoc,
}

impl Document {
    /// Iterates over the type definitions and extensions of the document.
    pub fn type_definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Type(t) => Some(t),
            _ => None,
        })
    }
}

/// A node that may carry a description.
pub trait Described {
    /// Token range of the node.
    fn loc(&self) -> NodeLoc;

    /// Description literal, if any.
    fn description(&self) -> Option<&StringValue>;
}

macro_rules! impl_described {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Described for $ty {
                fn loc(&self) -> NodeLoc {
                    self.loc
                }

                fn description(&self) -> Option<&StringValue> {
                    self.description.as_ref()
                }
            }
        )*
    };
}

impl_described!(
    TypeDefinition,
    FieldDefinition,
    InputValueDefinition,
    EnumValueDefinition,
    SchemaDefinition,
    DirectiveDefinition,
);
