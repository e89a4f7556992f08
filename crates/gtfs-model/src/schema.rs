//! Declarative description of GTFS tables.
//!
//! A [`TableSchema`] lists the columns a table may carry, the semantic type
//! of each column, whether it must be populated, and its key roles. Schemas
//! are `const` data defined once per table; nothing mutates them at runtime.
//!
//! Column order in a schema says nothing about the order in the file: the
//! loader resolves every field by exact header name.

use std::fmt;

/// Semantic type of a column, which decides how its raw text is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Id,
    Text,
    Url,
    Email,
    PhoneNumber,
    Timezone,
    LanguageCode,
    Date,
    Time,
    Color,
    Enum,
    Integer,
    NonNegativeInteger,
    Float,
    NonNegativeFloat,
    Latitude,
    Longitude,
}

impl FieldType {
    /// Name used in notice contexts.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Id => "id",
            FieldType::Text => "text",
            FieldType::Url => "url",
            FieldType::Email => "email",
            FieldType::PhoneNumber => "phone_number",
            FieldType::Timezone => "timezone",
            FieldType::LanguageCode => "language_code",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Color => "color",
            FieldType::Enum => "enum",
            FieldType::Integer => "integer",
            FieldType::NonNegativeInteger => "non_negative_integer",
            FieldType::Float => "float",
            FieldType::NonNegativeFloat => "non_negative_float",
            FieldType::Latitude => "latitude",
            FieldType::Longitude => "longitude",
        }
    }

    /// Whether a parsed numeric value lies within the range of this type.
    ///
    /// Non-numeric types accept every value.
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            FieldType::NonNegativeInteger | FieldType::NonNegativeFloat => value >= 0.0,
            FieldType::Latitude => (-90.0..=90.0).contains(&value),
            FieldType::Longitude => (-180.0..=180.0).contains(&value),
            _ => true,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a column, or a whole file, must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    Required,
    /// Required only under conditions that rules check later.
    ConditionallyRequired,
    Optional,
}

/// Column of another table referenced by a foreign key.
///
/// Never enforced by the loader; reference checks belong to validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForeignKey {
    pub table: &'static str,
    pub field: &'static str,
}

/// A single column of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
    pub presence: Presence,
    /// Raw value substituted when the cell is empty or invalid.
    pub default_value: Option<&'static str>,
    /// Part of the primary key used to index the table.
    pub primary_key: bool,
    /// A column can be both part of the primary key and a reference,
    /// e.g. `stop_times.trip_id`.
    pub foreign_key: Option<ForeignKey>,
}

impl FieldSchema {
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self::new(name, field_type, Presence::Required)
    }

    pub const fn conditionally_required(name: &'static str, field_type: FieldType) -> Self {
        Self::new(name, field_type, Presence::ConditionallyRequired)
    }

    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self::new(name, field_type, Presence::Optional)
    }

    const fn new(name: &'static str, field_type: FieldType, presence: Presence) -> Self {
        Self {
            name,
            field_type,
            presence,
            default_value: None,
            primary_key: false,
            foreign_key: None,
        }
    }

    pub const fn with_default(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub const fn foreign_key(mut self, table: &'static str, field: &'static str) -> Self {
        self.foreign_key = Some(ForeignKey { table, field });
        self
    }

    /// Only unconditionally required fields make the loader discard a row.
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }
}

/// Static description of one GTFS file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Canonical file name, e.g. `stops.txt`.
    pub filename: &'static str,
    pub presence: Presence,
    pub fields: &'static [FieldSchema],
}

impl TableSchema {
    /// Look up a field by its column name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields forming the primary key, in schema order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &'static FieldSchema> {
        self.fields.iter().filter(|field| field.is_primary_key())
    }

    /// Fields referencing another table.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &'static FieldSchema> {
        self.fields
            .iter()
            .filter(|field| field.foreign_key.is_some())
    }

    /// Columns that must appear in the header.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSchema> {
        self.fields.iter().filter(|field| field.is_required())
    }

    /// Comma-joined primary key column names, `None` for unkeyed tables.
    pub fn primary_key_name(&self) -> Option<String> {
        let names: Vec<&str> = self.primary_key_fields().map(|field| field.name).collect();
        if names.is_empty() {
            None
        } else {
            Some(names.join(","))
        }
    }
}
