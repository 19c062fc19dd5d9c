use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DtogenError, Result};

/// Built-in scalar types of the source object model.
///
/// Every primitive maps to a fixed TypeScript alias and is never emitted as a
/// declaration of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    String,
    Char,
    Guid,
    DateTimeOffset,
    Byte,
    SByte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    Boolean,
    Object,
    Void,
}

impl Primitive {
    /// Look up a primitive by keyword, framework name, or Rust name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.rsplit(['.', ':']).next().unwrap_or(name);
        let primitive = match name {
            "string" | "String" | "str" => Primitive::String,
            "char" | "Char" => Primitive::Char,
            "Guid" | "Uuid" => Primitive::Guid,
            "DateTimeOffset" => Primitive::DateTimeOffset,
            "byte" | "Byte" | "u8" => Primitive::Byte,
            "sbyte" | "SByte" | "i8" => Primitive::SByte,
            "short" | "Int16" | "i16" => Primitive::Int16,
            "ushort" | "UInt16" | "u16" => Primitive::UInt16,
            "int" | "Int32" | "i32" => Primitive::Int32,
            "uint" | "UInt32" | "u32" => Primitive::UInt32,
            "long" | "Int64" | "i64" | "isize" => Primitive::Int64,
            "ulong" | "UInt64" | "u64" | "usize" => Primitive::UInt64,
            "float" | "Single" | "f32" => Primitive::Single,
            "double" | "Double" | "f64" => Primitive::Double,
            "decimal" | "Decimal" => Primitive::Decimal,
            "bool" | "Boolean" => Primitive::Boolean,
            "object" | "Object" => Primitive::Object,
            "void" | "Void" => Primitive::Void,
            _ => return None,
        };
        Some(primitive)
    }

    /// Canonical name used when rendering type expressions.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Char => "char",
            Primitive::Guid => "Guid",
            Primitive::DateTimeOffset => "DateTimeOffset",
            Primitive::Byte => "byte",
            Primitive::SByte => "sbyte",
            Primitive::Int16 => "short",
            Primitive::UInt16 => "ushort",
            Primitive::Int32 => "int",
            Primitive::UInt32 => "uint",
            Primitive::Int64 => "long",
            Primitive::UInt64 => "ulong",
            Primitive::Single => "float",
            Primitive::Double => "double",
            Primitive::Decimal => "decimal",
            Primitive::Boolean => "bool",
            Primitive::Object => "object",
            Primitive::Void => "void",
        }
    }

    /// Generate TypeScript type.
    pub fn to_typescript(&self) -> &'static str {
        match self {
            Primitive::String | Primitive::Char | Primitive::Guid | Primitive::DateTimeOffset => {
                "string"
            }
            Primitive::Byte
            | Primitive::SByte
            | Primitive::Int16
            | Primitive::UInt16
            | Primitive::Int32
            | Primitive::UInt32
            | Primitive::Int64
            | Primitive::UInt64
            | Primitive::Single
            | Primitive::Double
            | Primitive::Decimal => "number",
            Primitive::Boolean => "boolean",
            Primitive::Object => "any",
            Primitive::Void => "void",
        }
    }

    /// Whether values of this type can only be absent through a nullable wrapper.
    pub fn is_value_type(&self) -> bool {
        !matches!(
            self,
            Primitive::String | Primitive::Object | Primitive::Void
        )
    }
}

/// The fixed set of generic wrappers the converter understands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wrapper {
    /// Async result (`Task<T>`, `ValueTask<T>`, `Future<T>`).
    Task,
    /// Sequence of `T` (`IEnumerable<T>`, `List<T>`, `Vec<T>`, ...).
    Enumerable,
    /// One-to-many relationship collection (`ICollection<T>`).
    Collection,
    /// Optional value type (`Nullable<T>`).
    Nullable,
    /// Key/value map (`Dictionary<K, V>`, `HashMap<K, V>`, ...).
    Dictionary,
    /// Any other generic definition.
    Custom(String),
}

impl Wrapper {
    /// Classify a generic definition by name.
    pub fn from_name(name: &str) -> Self {
        let simple = name.rsplit(['.', ':']).next().unwrap_or(name);
        match simple {
            "Task" | "ValueTask" | "Future" => Wrapper::Task,
            "IEnumerable" | "IList" | "List" | "IReadOnlyList" | "IReadOnlyCollection"
            | "HashSet" | "ISet" | "SortedSet" | "Queue" | "Stack" | "LinkedList" | "Vec"
            | "VecDeque" | "BTreeSet" => Wrapper::Enumerable,
            "ICollection" | "Collection" => Wrapper::Collection,
            "Nullable" | "Option" => Wrapper::Nullable,
            "Dictionary" | "IDictionary" | "IReadOnlyDictionary" | "SortedDictionary"
            | "HashMap" | "BTreeMap" => Wrapper::Dictionary,
            _ => Wrapper::Custom(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Wrapper::Task => "Task",
            Wrapper::Enumerable => "IEnumerable",
            Wrapper::Collection => "ICollection",
            Wrapper::Nullable => "Nullable",
            Wrapper::Dictionary => "Dictionary",
            Wrapper::Custom(name) => name,
        }
    }

    /// Number of type arguments the wrapper takes, if fixed.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Wrapper::Task | Wrapper::Enumerable | Wrapper::Collection | Wrapper::Nullable => {
                Some(1)
            }
            Wrapper::Dictionary => Some(2),
            Wrapper::Custom(_) => None,
        }
    }

    /// Whether an instantiation is a sequence of its first argument.
    pub fn is_enumerable(&self) -> bool {
        matches!(self, Wrapper::Enumerable | Wrapper::Collection)
    }
}

/// A usage of a type: a property's declared type or an endpoint result.
///
/// Declarations are referenced by name, so cyclic models (`Account` holding
/// transactions that point back at their `Account`) stay finite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Primitive(Primitive),
    /// Simple or dot-qualified name of a declared type.
    Named(String),
    Array(Box<TypeRef>),
    Generic { wrapper: Wrapper, args: Vec<TypeRef> },
}

impl TypeRef {
    /// Parse a type expression such as `Task<List<OrderDto>>` or `int?`.
    pub fn parse(expr: &str) -> Result<Self> {
        let mut parser = ExprParser::new(expr);
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if let Some(c) = parser.peek() {
            return Err(parser.error(format!("unexpected `{}`", c)));
        }
        Ok(ty)
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    pub fn generic(wrapper: Wrapper, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic { wrapper, args }
    }

    pub fn task(inner: TypeRef) -> Self {
        Self::generic(Wrapper::Task, vec![inner])
    }

    pub fn list(element: TypeRef) -> Self {
        Self::generic(Wrapper::Enumerable, vec![element])
    }

    pub fn collection(element: TypeRef) -> Self {
        Self::generic(Wrapper::Collection, vec![element])
    }

    pub fn dictionary(key: TypeRef, value: TypeRef) -> Self {
        Self::generic(Wrapper::Dictionary, vec![key, value])
    }

    pub fn nullable(inner: TypeRef) -> Self {
        Self::generic(Wrapper::Nullable, vec![inner])
    }

    /// Optional form of `inner`: value primitives get a nullable wrapper,
    /// reference types are already nullable and stay as they are.
    pub fn optional(inner: TypeRef) -> Self {
        match inner {
            TypeRef::Primitive(p) if p.is_value_type() => Self::nullable(TypeRef::Primitive(p)),
            other => other,
        }
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, TypeRef::Generic { .. })
    }

    /// Unqualified name, as used for file names and forward references.
    pub fn simple_name(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.name().to_string(),
            TypeRef::Named(name) => simple_name(name).to_string(),
            TypeRef::Array(element) => format!("{}[]", element.simple_name()),
            TypeRef::Generic { wrapper, .. } => simple_name(wrapper.name()).to_string(),
        }
    }

    /// Element type of an array or of an enumerable instantiation.
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array(element) => Some(element),
            TypeRef::Generic { wrapper, args } if wrapper.is_enumerable() => args.first(),
            _ => None,
        }
    }

    /// Wrapped value type of a nullable instantiation.
    pub fn nullable_value_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Generic {
                wrapper: Wrapper::Nullable,
                args,
            } => args.first().filter(|arg| match arg {
                TypeRef::Primitive(p) => p.is_value_type(),
                _ => true,
            }),
            _ => None,
        }
    }
}

/// Last dot-separated segment of a qualified name.
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{}", p.name()),
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::Array(element) => write!(f, "{}[]", element),
            TypeRef::Generic { wrapper, args } => {
                write!(f, "{}<", wrapper.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = DtogenError;

    fn try_from(value: String) -> Result<Self> {
        TypeRef::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

impl std::str::FromStr for TypeRef {
    type Err = DtogenError;

    fn from_str(s: &str) -> Result<Self> {
        TypeRef::parse(s)
    }
}

/// Recursive-descent parser for type expressions.
struct ExprParser<'a> {
    expr: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> ExprParser<'a> {
    fn new(expr: &'a str) -> Self {
        Self {
            expr,
            chars: expr.char_indices().peekable(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> DtogenError {
        DtogenError::InvalidTypeExpression {
            expr: self.expr.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.chars.next();
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            Some((_, c)) => Err(self.error(format!("expected `{}`, found `{}`", expected, c))),
            None => Err(self.error(format!("expected `{}`, found end of input", expected))),
        }
    }

    fn parse_ident(&mut self) -> Result<String> {
        self.skip_whitespace();
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '.' | ':') {
                ident.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        if ident.is_empty() {
            return Err(self.error("expected a type name"));
        }
        Ok(ident)
    }

    fn parse_type(&mut self) -> Result<TypeRef> {
        let name = self.parse_ident()?;
        self.skip_whitespace();

        let mut ty = if self.peek() == Some('<') {
            self.chars.next();
            let mut args = vec![self.parse_type()?];
            loop {
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => {
                        self.chars.next();
                        args.push(self.parse_type()?);
                    }
                    _ => break,
                }
            }
            self.expect('>')?;

            let wrapper = Wrapper::from_name(&name);
            if let Some(arity) = wrapper.arity() {
                if arity != args.len() {
                    return Err(self.error(format!(
                        "`{}` takes {} type argument(s), found {}",
                        name,
                        arity,
                        args.len()
                    )));
                }
            }
            TypeRef::generic(wrapper, args)
        } else if let Some(primitive) = Primitive::from_name(&name) {
            TypeRef::Primitive(primitive)
        } else {
            TypeRef::Named(name)
        };

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('[') => {
                    self.chars.next();
                    self.expect(']')?;
                    ty = TypeRef::array(ty);
                }
                Some('?') => {
                    self.chars.next();
                    ty = TypeRef::optional(ty);
                }
                _ => break,
            }
        }

        Ok(ty)
    }
}
