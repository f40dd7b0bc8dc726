//! Code contexts and their arena.
//!
//! A [`CodeContext`] is the resolved documentation target of one syntax
//! node. Contexts refer to each other by [`ContextId`]; the parent link is
//! an index, never an owning pointer.

use pld_doc::{Tag, TagBody, Visibility};
use pld_ir::{Name, TextSpan};
use pld_parse::{ParamMode, TypeDeclKind, UnitKind};

/// Index of a context in its [`ContextArena`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ContextId(u32);

impl ContextId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a context documents.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ContextKind {
    Package,
    PackageBody,
    ObjectType,
    TypeBody,
    Procedure,
    Function,
    Constructor,
    Cursor,
    Variable,
    Constant,
    Exception,
    Subtype,
    Record,
    /// Collection, ref cursor or other `TYPE` declaration.
    Type,
    Field,
    Attribute,
    Parameter,
}

impl ContextKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContextKind::Package => "package",
            ContextKind::PackageBody => "package body",
            ContextKind::ObjectType => "object type",
            ContextKind::TypeBody => "type body",
            ContextKind::Procedure => "procedure",
            ContextKind::Function => "function",
            ContextKind::Constructor => "constructor",
            ContextKind::Cursor => "cursor",
            ContextKind::Variable => "variable",
            ContextKind::Constant => "constant",
            ContextKind::Exception => "exception",
            ContextKind::Subtype => "subtype",
            ContextKind::Record => "record",
            ContextKind::Type => "type",
            ContextKind::Field => "field",
            ContextKind::Attribute => "attribute",
            ContextKind::Parameter => "parameter",
        }
    }

    /// Routines, cursors and constructors: members that take parameters
    /// and share overload ids.
    pub fn is_method(self) -> bool {
        matches!(
            self,
            ContextKind::Procedure
                | ContextKind::Function
                | ContextKind::Constructor
                | ContextKind::Cursor
        )
    }

    /// Kinds whose members are contexts of their own.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ContextKind::Package | ContextKind::ObjectType | ContextKind::Record
        )
    }
}

/// One resolved documentation target.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeContext {
    pub kind: ContextKind,
    pub name: Name,
    /// Stable id, unique within the enclosing container: the name, or
    /// `NAME-n` for methods, or `PARENT.NAME` for parameters and fields.
    pub id: String,
    /// Declaration text as written.
    pub header: String,
    pub span: Option<TextSpan>,
    pub parent: Option<ContextId>,
    pub children: Vec<ContextId>,
    /// Tags not consumed by binding: links, visibility, generic tags.
    pub annotations: Vec<Tag>,
    pub description: String,
    pub throws: Vec<ThrowsDoc>,
    pub detail: Detail,
}

impl CodeContext {
    /// Visibility from the last visibility tag, if any.
    pub fn visibility(&self) -> Option<&Visibility> {
        self.annotations.iter().rev().find_map(|tag| match &tag.body {
            TagBody::Visibility(visibility) => Some(visibility),
            _ => None,
        })
    }

    /// Text of a `@deprecated` tag, if present (possibly empty).
    pub fn deprecated(&self) -> Option<String> {
        self.annotations
            .iter()
            .find(|tag| tag.marker == "deprecated")
            .map(|tag| tag.content.text())
    }

    /// Annotations with the given kind string (`link`, `since`, ...).
    pub fn annotations_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.annotations.iter().filter(move |tag| tag.kind() == kind)
    }
}

/// Kind-specific context data.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Detail {
    #[default]
    None,
    Unit(UnitDetail),
    Method(MethodDetail),
    Record(RecordDetail),
    /// Variables and constants.
    Variable(TypedDetail),
    Subtype {
        base_type: String,
        constraints: Vec<String>,
    },
    Type {
        kind: TypeDeclKind,
        /// Text after `IS`, e.g. `TABLE OF emp_rec INDEX BY PLS_INTEGER`.
        definition: String,
    },
    Parameter(ParameterDetail),
    Field(TypedDetail),
    Attribute(TypedDetail),
    Exception {
        /// Error codes bound by `PRAGMA EXCEPTION_INIT`.
        codes: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnitDetail {
    pub unit: UnitKind,
    pub authid: Option<String>,
    /// Supertype of an `UNDER` object type.
    pub base_type: Option<String>,
    pub modifiers: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MethodDetail {
    pub params: Vec<ContextId>,
    pub returns: Option<ReturnDoc>,
    /// Declaration text up to the end of the header.
    pub signature: String,
    pub modifiers: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordDetail {
    pub fields: Vec<ContextId>,
}

/// Declared type and default of a variable, field or attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypedDetail {
    pub type_name: String,
    pub default_value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterDetail {
    pub mode: ParamMode,
    pub nocopy: bool,
    pub type_name: String,
    pub default_value: Option<String>,
    /// `{type}` written in the `@param` tag.
    pub doc_type: Option<String>,
    /// Written as `@param [name]`.
    pub optional: bool,
}

/// A function's return, with its `@return` documentation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReturnDoc {
    pub type_name: String,
    pub description: String,
    pub doc_type: Option<String>,
}

/// One `@throws` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ThrowsDoc {
    pub name: Name,
    pub description: String,
    pub target: ThrowsTarget,
}

/// What a `@throws` name resolved to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ThrowsTarget {
    /// An exception declared in an enclosing container.
    Declared(ContextId),
    /// `NO_DATA_FOUND`, `VALUE_ERROR`, ...
    Predefined,
    /// A numeric error code such as `-20001` or `ORA-01403`.
    ErrorCode,
    Unknown,
}

/// Arena of every context of a resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContextArena {
    contexts: Vec<CodeContext>,
}

impl ContextArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a context and link it to its parent.
    pub fn alloc(&mut self, context: CodeContext) -> ContextId {
        let id = ContextId(u32::try_from(self.contexts.len()).unwrap_or(u32::MAX));
        if let Some(parent) = context.parent {
            self.contexts[parent.index()].children.push(id);
        }
        self.contexts.push(context);
        id
    }

    pub fn get(&self, id: ContextId) -> &CodeContext {
        &self.contexts[id.index()]
    }

    pub fn get_mut(&mut self, id: ContextId) -> &mut CodeContext {
        &mut self.contexts[id.index()]
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Every context with its id, in creation (source) order.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "ids are bounded by alloc"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (ContextId, &CodeContext)> {
        self.contexts
            .iter()
            .enumerate()
            .map(|(index, context)| (ContextId(index as u32), context))
    }

    pub fn children(&self, id: ContextId) -> impl Iterator<Item = (ContextId, &CodeContext)> {
        self.get(id)
            .children
            .iter()
            .map(move |&child| (child, self.get(child)))
    }

    /// Child of `parent` with the given id string.
    pub fn child_by_id(&self, parent: ContextId, id: &str) -> Option<ContextId> {
        self.get(parent)
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).id == id)
    }

    /// Ids from the outermost ancestor down, joined with `/`,
    /// e.g. `EMP_API/GET-1`.
    pub fn path(&self, id: ContextId) -> String {
        let mut parts = vec![self.get(id).id.as_str()];
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            let context = self.get(parent);
            parts.push(&context.id);
            current = context.parent;
        }
        parts.reverse();
        parts.join("/")
    }
}
