//! Structured-record introspection.
//!
//! The traversal core never reflects over host types itself. It requires one
//! capability: given a record instance, enumerate its declared fields grouped
//! by declaring type, most-derived first, with visibility metadata and the
//! current value. Hosts supply an [`Inspect`] adapter per record type;
//! [`DynRecord`] is a ready-made data-driven adapter for hosts (and tests)
//! that don't want to write one.

use std::cell::RefCell;
use std::rc::Rc;

use bitflags::bitflags;

use crate::error::InspectError;
use crate::value::Value;

bitflags! {
    /// Visibility and storage modifiers of a record field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldModifiers: u8 {
        /// Publicly readable.
        const PUBLIC = 1 << 0;
        /// Visible to the declaring type and its descendants.
        const PROTECTED = 1 << 1;
        /// Visible to the declaring type only.
        const PRIVATE = 1 << 2;
        /// Shared across instances of the type.
        const STATIC = 1 << 3;
        /// Write-once.
        const READONLY = 1 << 4;
    }
}

impl FieldModifiers {
    /// Whether the field is readable without a visibility bypass.
    #[must_use]
    pub fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    /// Modifier names in declaration order, lowercase.
    #[must_use]
    pub fn labels(self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.contains(Self::PUBLIC) {
            out.push("public");
        }
        if self.contains(Self::PROTECTED) {
            out.push("protected");
        }
        if self.contains(Self::PRIVATE) {
            out.push("private");
        }
        if self.contains(Self::STATIC) {
            out.push("static");
        }
        if self.contains(Self::READONLY) {
            out.push("readonly");
        }
        out
    }

    /// Combined label, names joined with `-` (e.g. "private-static").
    ///
    /// Doubles as a styling hook for the markup layer.
    #[must_use]
    pub fn label(self) -> String {
        self.labels().join("-")
    }
}

impl Default for FieldModifiers {
    fn default() -> Self {
        Self::PUBLIC
    }
}

/// One declared field of a record.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Visibility and storage modifiers.
    pub modifiers: FieldModifiers,
    /// Current value; `None` when the adapter could not read the field.
    pub value: Option<Value>,
}

impl Field {
    /// A readable field.
    #[must_use]
    pub fn new(name: impl Into<String>, modifiers: FieldModifiers, value: Value) -> Self {
        Self {
            name: name.into(),
            modifiers,
            value: Some(value),
        }
    }

    /// A field whose value the adapter could not read.
    #[must_use]
    pub fn unreadable(name: impl Into<String>, modifiers: FieldModifiers) -> Self {
        Self {
            name: name.into(),
            modifiers,
            value: None,
        }
    }
}

/// Fields declared at one type of a record's inheritance chain.
#[derive(Debug, Clone)]
pub struct FieldGroup {
    /// The declaring type's name.
    pub declared_in: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

/// Field-enumeration capability for structured records.
///
/// Adapters must yield groups ordered most-derived type first, then each
/// ancestor in order, and must read fields without mutating the instance.
/// Non-public fields are expected to be readable through the adapter — this
/// is a diagnostic tool and private state is exactly what it exists to show.
pub trait Inspect {
    /// Runtime type name of the instance.
    fn type_name(&self) -> &str;

    /// Ancestor type names, most-derived first, excluding the type itself.
    fn ancestors(&self) -> Vec<String>;

    /// Declared fields grouped by declaring type, most-derived first.
    ///
    /// An `Err` here is a bug in the host's introspection layer and aborts
    /// the dump; a single unreadable field should instead be reported as
    /// [`Field::unreadable`].
    fn fields(&self) -> Result<Vec<FieldGroup>, InspectError>;
}

/// A data-driven record: type name, ancestor chain, and fields registered
/// under their declaring type.
///
/// Interior mutability lets callers close record cycles after sharing the
/// handle:
///
/// ```
/// use std::rc::Rc;
/// use fdump_core::inspect::{DynRecord, FieldModifiers};
/// use fdump_core::value::Value;
///
/// let node = Rc::new(DynRecord::new("ListNode"));
/// node.set_field("ListNode", "next", FieldModifiers::PUBLIC, Value::record(node.clone()));
/// ```
#[derive(Debug, Default)]
pub struct DynRecord {
    type_name: String,
    ancestors: Vec<String>,
    fields: RefCell<Vec<(String, Field)>>,
}

impl DynRecord {
    /// Create a record of the given runtime type with no ancestors.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ancestors: Vec::new(),
            fields: RefCell::new(Vec::new()),
        }
    }

    /// Append an ancestor type name (call in most-derived-first order).
    #[must_use]
    pub fn ancestor(mut self, type_name: impl Into<String>) -> Self {
        self.ancestors.push(type_name.into());
        self
    }

    /// Register a readable field under its declaring type.
    ///
    /// Re-registering a `(declaring type, name)` pair replaces the value in
    /// place, keeping the original position.
    pub fn set_field(
        &self,
        declared_in: impl Into<String>,
        name: impl Into<String>,
        modifiers: FieldModifiers,
        value: Value,
    ) {
        self.set(declared_in.into(), Field::new(name, modifiers, value));
    }

    /// Register a field whose value cannot be read.
    pub fn set_unreadable_field(
        &self,
        declared_in: impl Into<String>,
        name: impl Into<String>,
        modifiers: FieldModifiers,
    ) {
        self.set(declared_in.into(), Field::unreadable(name, modifiers));
    }

    fn set(&self, declared_in: String, field: Field) {
        let mut fields = self.fields.borrow_mut();
        if let Some(slot) = fields
            .iter_mut()
            .find(|(d, f)| *d == declared_in && f.name == field.name)
        {
            slot.1 = field;
        } else {
            fields.push((declared_in, field));
        }
    }
}

impl Inspect for DynRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn ancestors(&self) -> Vec<String> {
        self.ancestors.clone()
    }

    fn fields(&self) -> Result<Vec<FieldGroup>, InspectError> {
        let fields = self.fields.borrow();
        let mut groups: Vec<FieldGroup> = Vec::new();

        // Chain order first: the type itself, then each ancestor.
        for chain_type in std::iter::once(self.type_name.as_str())
            .chain(self.ancestors.iter().map(String::as_str))
        {
            let matched: Vec<Field> = fields
                .iter()
                .filter(|(d, _)| d == chain_type)
                .map(|(_, f)| f.clone())
                .collect();
            if !matched.is_empty() {
                groups.push(FieldGroup {
                    declared_in: chain_type.to_owned(),
                    fields: matched,
                });
            }
        }

        // Stray declaring types not on the chain trail behind, first-seen order.
        for (declared_in, field) in fields.iter() {
            if declared_in != &self.type_name && !self.ancestors.contains(declared_in) {
                match groups.iter_mut().find(|g| &g.declared_in == declared_in) {
                    Some(group) => group.fields.push(field.clone()),
                    None => groups.push(FieldGroup {
                        declared_in: declared_in.clone(),
                        fields: vec![field.clone()],
                    }),
                }
            }
        }

        Ok(groups)
    }
}

/// Helper for `Rc`-wrapped construction in one expression.
impl DynRecord {
    /// Wrap into the shared handle form used by [`Value::record`].
    #[must_use]
    pub fn into_ref(self) -> Rc<Self> {
        Rc::new(self)
    }
}
