//! Intermediate representation of a profile workbook
//!
//! The IR mirrors the two sheets of the workbook: enumerated types with their
//! values, and messages with their fields. It is easier to generate sources
//! from than raw cells.

use std::str::FromStr;

/// Intermediate representation of a complete profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileIr {
    /// Types in sheet order
    pub types: Vec<TypeDef>,

    /// Messages in sheet order
    pub messages: Vec<MessageDef>,
}

impl ProfileIr {
    /// Look up a type by its workbook name
    pub fn type_named(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Look up a message by its workbook name
    pub fn message_named(&self, name: &str) -> Option<&MessageDef> {
        self.messages.iter().find(|m| m.name == name)
    }
}

/// A named type from the `Types` sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Workbook name, e.g. `mesg_num`
    pub name: String,

    /// Underlying base type
    pub base_type: BaseType,

    /// Enumerated values in sheet order
    pub values: Vec<ValueDef>,
}

impl TypeDef {
    /// Go identifier for the type, e.g. `MesgNum`
    pub fn go_name(&self) -> String {
        camel_case(&self.name)
    }
}

/// One enumerated value of a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDef {
    /// Workbook name, e.g. `file_id`
    pub name: String,

    /// Literal value as written (decimal or `0x` hex)
    pub value: String,

    /// Optional comment
    pub comment: Option<String>,
}

/// A message from the `Messages` sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDef {
    /// Workbook name, e.g. `file_id`
    pub name: String,

    /// Fields with a field number, in sheet order
    pub fields: Vec<FieldDef>,
}

impl MessageDef {
    /// Go identifier of the generated struct, e.g. `FileIdMsg`
    pub fn go_name(&self) -> String {
        format!("{}Msg", camel_case(&self.name))
    }
}

/// A message field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field definition number
    pub number: u8,

    /// Workbook name, e.g. `serial_number`
    pub name: String,

    /// Base type or profile type name
    pub type_name: String,

    /// Whether the field holds an array
    pub array: bool,

    /// Scale, if any
    pub scale: Option<String>,

    /// Offset, if any
    pub offset: Option<String>,

    /// Units, if any
    pub units: Option<String>,
}

/// Base types a profile type or field can be built on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    /// `enum`
    Enum,
    /// `sint8`
    Sint8,
    /// `uint8`
    Uint8,
    /// `uint8z`
    Uint8z,
    /// `sint16`
    Sint16,
    /// `uint16`
    Uint16,
    /// `uint16z`
    Uint16z,
    /// `sint32`
    Sint32,
    /// `uint32`
    Uint32,
    /// `uint32z`
    Uint32z,
    /// `sint64`
    Sint64,
    /// `uint64`
    Uint64,
    /// `uint64z`
    Uint64z,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `string`
    String,
    /// `byte`
    Byte,
    /// `bool`
    Bool,
}

impl BaseType {
    /// Go type used for values of this base type
    pub fn go_type(self) -> &'static str {
        match self {
            BaseType::Enum | BaseType::Byte => "byte",
            BaseType::Sint8 => "int8",
            BaseType::Uint8 | BaseType::Uint8z => "uint8",
            BaseType::Sint16 => "int16",
            BaseType::Uint16 | BaseType::Uint16z => "uint16",
            BaseType::Sint32 => "int32",
            BaseType::Uint32 | BaseType::Uint32z => "uint32",
            BaseType::Sint64 => "int64",
            BaseType::Uint64 | BaseType::Uint64z => "uint64",
            BaseType::Float32 => "float32",
            BaseType::Float64 => "float64",
            BaseType::String => "string",
            BaseType::Bool => "bool",
        }
    }
}

impl FromStr for BaseType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "enum" => BaseType::Enum,
            "sint8" => BaseType::Sint8,
            "uint8" => BaseType::Uint8,
            "uint8z" => BaseType::Uint8z,
            "sint16" => BaseType::Sint16,
            "uint16" => BaseType::Uint16,
            "uint16z" => BaseType::Uint16z,
            "sint32" => BaseType::Sint32,
            "uint32" => BaseType::Uint32,
            "uint32z" => BaseType::Uint32z,
            "sint64" => BaseType::Sint64,
            "uint64" => BaseType::Uint64,
            "uint64z" => BaseType::Uint64z,
            "float32" => BaseType::Float32,
            "float64" => BaseType::Float64,
            "string" => BaseType::String,
            "byte" => BaseType::Byte,
            "bool" => BaseType::Bool,
            _ => return Err(()),
        })
    }
}

/// `snake_case` → `CamelCase`
///
/// Empty segments are dropped, so `left__right` and `_left_right` both give
/// `LeftRight`. Leading digits are kept as is.
pub fn camel_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
