//! Context construction, one method per declaration kind.

use pld_ir::Name;
use pld_parse::{MethodKind, NodeId, NodeKind, ParamMode, SyntaxTree, TypeDeclKind, UnitKind};

use super::Resolver;
use crate::{
    CodeContext, ContextId, ContextKind, Detail, MethodDetail, ParameterDetail, RecordDetail,
    ReturnDoc, TypedDetail, UnitDetail,
};

impl Resolver<'_> {
    /// Allocate a context with the common fields filled in.
    fn alloc(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        kind: ContextKind,
        context_id: String,
        parent: Option<ContextId>,
        detail: Detail,
    ) -> ContextId {
        let context = CodeContext {
            kind,
            name: node_name(tree, id),
            id: context_id,
            header: tree.header(id),
            span: tree.span(id),
            parent,
            children: Vec::new(),
            annotations: Vec::new(),
            description: String::new(),
            throws: Vec::new(),
            detail,
        };
        tracing::trace!(kind = kind.as_str(), id = %context.id, "context");
        self.contexts.alloc(context)
    }

    /// Plain members use their name as id.
    fn member(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        kind: ContextKind,
        parent: Option<ContextId>,
        detail: Detail,
    ) -> ContextId {
        let context_id = node_name(tree, id).to_string();
        self.alloc(tree, id, kind, context_id, parent, detail)
    }

    /// Parameters and fields: `PARENT_ID.NAME`.
    fn qualified(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        kind: ContextKind,
        parent: Option<ContextId>,
        detail: Detail,
    ) -> ContextId {
        let name = node_name(tree, id);
        let context_id = match parent {
            Some(parent) => format!("{}.{name}", self.contexts.get(parent).id),
            None => name.to_string(),
        };
        self.alloc(tree, id, kind, context_id, parent, detail)
    }

    pub(super) fn declare_unit(&mut self, tree: &SyntaxTree, id: NodeId, unit: UnitKind) -> ContextId {
        let kind = match unit {
            UnitKind::Package => ContextKind::Package,
            UnitKind::PackageBody => ContextKind::PackageBody,
            UnitKind::ObjectType => ContextKind::ObjectType,
            UnitKind::TypeBody => ContextKind::TypeBody,
            UnitKind::Procedure => ContextKind::Procedure,
            UnitKind::Function => ContextKind::Function,
        };
        let detail = match unit {
            UnitKind::Procedure | UnitKind::Function => Detail::Method(method_detail(tree, id)),
            _ => Detail::Unit(unit_detail(tree, id, unit)),
        };
        self.member(tree, id, kind, None, detail)
    }

    /// Methods inside a container get overload ids.
    pub(super) fn declare_method(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        method: MethodKind,
        parent: Option<ContextId>,
    ) -> ContextId {
        let kind = match method {
            MethodKind::Procedure => ContextKind::Procedure,
            MethodKind::Function => ContextKind::Function,
            MethodKind::Constructor => ContextKind::Constructor,
            MethodKind::Cursor => ContextKind::Cursor,
        };
        let name = node_name(tree, id);
        let in_container = parent.is_some_and(|p| self.contexts.get(p).kind.is_container());
        let context_id = if in_container {
            self.scope().ids.next(name.last())
        } else {
            name.to_string()
        };
        let detail = Detail::Method(method_detail(tree, id));
        self.alloc(tree, id, kind, context_id, parent, detail)
    }

    pub(super) fn declare_parameter(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        mode: ParamMode,
        parent: Option<ContextId>,
    ) -> ContextId {
        let detail = ParameterDetail {
            mode,
            nocopy: modifiers(tree, id).iter().any(|m| m == "NOCOPY"),
            type_name: type_text(tree, id),
            default_value: default_text(tree, id),
            doc_type: None,
            optional: false,
        };
        self.qualified(tree, id, ContextKind::Parameter, parent, Detail::Parameter(detail))
    }

    pub(super) fn declare_field(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        parent: Option<ContextId>,
    ) -> ContextId {
        let detail = Detail::Field(typed_detail(tree, id));
        self.qualified(tree, id, ContextKind::Field, parent, detail)
    }

    pub(super) fn declare_attribute(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        parent: Option<ContextId>,
    ) -> ContextId {
        let detail = Detail::Attribute(typed_detail(tree, id));
        self.member(tree, id, ContextKind::Attribute, parent, detail)
    }

    pub(super) fn declare_variable(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        constant: bool,
        parent: Option<ContextId>,
    ) -> ContextId {
        let kind = if constant {
            ContextKind::Constant
        } else {
            ContextKind::Variable
        };
        let detail = Detail::Variable(typed_detail(tree, id));
        self.member(tree, id, kind, parent, detail)
    }

    pub(super) fn declare_exception(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        parent: Option<ContextId>,
    ) -> ContextId {
        let detail = Detail::Exception { codes: Vec::new() };
        let context = self.member(tree, id, ContextKind::Exception, parent, detail);
        let name = node_name(tree, id).last().to_owned();
        let scope = self.scope();
        scope.exceptions.entry(name).or_insert(context);
        scope.declared.push(context);
        context
    }

    pub(super) fn declare_subtype(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        parent: Option<ContextId>,
    ) -> ContextId {
        let detail = Detail::Subtype {
            base_type: type_text(tree, id),
            constraints: modifiers(tree, id),
        };
        self.member(tree, id, ContextKind::Subtype, parent, detail)
    }

    pub(super) fn declare_record(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        parent: Option<ContextId>,
    ) -> ContextId {
        let detail = Detail::Record(RecordDetail::default());
        self.member(tree, id, ContextKind::Record, parent, detail)
    }

    pub(super) fn declare_type(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        kind: TypeDeclKind,
        parent: Option<ContextId>,
    ) -> ContextId {
        let definition = tree
            .flat_text_after(id, "IS")
            .or_else(|| tree.flat_text_after(id, "AS"))
            .unwrap_or_default();
        let definition = definition.trim_end_matches(';').trim_end().to_owned();
        let detail = Detail::Type { kind, definition };
        self.member(tree, id, ContextKind::Type, parent, detail)
    }

    /// `PRAGMA EXCEPTION_INIT(name, code)` binds an error code to an
    /// exception when the container closes.
    pub(super) fn note_pragma(&mut self, tree: &SyntaxTree, id: NodeId) {
        if node_name(tree, id).last() != "EXCEPTION_INIT" {
            return;
        }
        let text = tree.flat_text(id);
        let Some(args) = text
            .split_once('(')
            .and_then(|(_, rest)| rest.rsplit_once(')'))
            .map(|(args, _)| args)
        else {
            return;
        };
        if let Some((name, code)) = args.split_once(',') {
            let code: String = code.chars().filter(|c| !c.is_whitespace()).collect();
            self.scope()
                .exception_inits
                .push((Name::parse(name.trim()), code));
        }
    }
}

fn node_name(tree: &SyntaxTree, id: NodeId) -> Name {
    tree.name(id).cloned().unwrap_or_default()
}

/// Names of a node's `Modifier` children.
fn modifiers(tree: &SyntaxTree, id: NodeId) -> Vec<String> {
    tree.children_where(id, |kind| kind == NodeKind::Modifier)
        .filter_map(|modifier| tree.name(modifier).map(ToString::to_string))
        .collect()
}

fn type_text(tree: &SyntaxTree, id: NodeId) -> String {
    tree.child(id, NodeKind::TypeExpr)
        .map(|ty| tree.flat_text(ty))
        .unwrap_or_default()
}

fn default_text(tree: &SyntaxTree, id: NodeId) -> Option<String> {
    tree.child(id, NodeKind::Expression)
        .map(|expr| tree.flat_text(expr))
}

fn typed_detail(tree: &SyntaxTree, id: NodeId) -> TypedDetail {
    TypedDetail {
        type_name: type_text(tree, id),
        default_value: default_text(tree, id),
    }
}

fn method_detail(tree: &SyntaxTree, id: NodeId) -> MethodDetail {
    let returns = tree.child(id, NodeKind::Return).map(|ret| ReturnDoc {
        type_name: type_text(tree, ret),
        ..ReturnDoc::default()
    });
    MethodDetail {
        params: Vec::new(),
        returns,
        signature: tree.header(id),
        modifiers: modifiers(tree, id),
    }
}

fn unit_detail(tree: &SyntaxTree, id: NodeId, unit: UnitKind) -> UnitDetail {
    let mut detail = UnitDetail {
        unit,
        authid: None,
        base_type: None,
        modifiers: Vec::new(),
    };
    for modifier in tree.children_where(id, |kind| kind == NodeKind::Modifier) {
        let Some(name) = tree.name(modifier).map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "AUTHID" => {
                detail.authid = tree.words(modifier).get(1).map(|word| (*word).to_owned());
            }
            "UNDER" => {
                detail.base_type = tree
                    .child(modifier, NodeKind::TypeExpr)
                    .and_then(|ty| tree.name(ty))
                    .map(ToString::to_string);
            }
            _ => {}
        }
        detail.modifiers.push(name);
    }
    detail
}
