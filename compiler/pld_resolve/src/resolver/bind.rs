//! Tag binding.

use pld_diagnostic::ErrorCode;
use pld_doc::{ParamTag, Tag, TagBody};
use pld_ir::Name;
use rustc_hash::FxHashSet;

use super::{PendingThrows, Resolver, Scope};
use crate::{ContextId, ContextKind, Detail, ThrowsDoc, ThrowsTarget};

/// Exceptions raised by the runtime without a declaration.
const PREDEFINED_EXCEPTIONS: &[&str] = &[
    "ACCESS_INTO_NULL",
    "CASE_NOT_FOUND",
    "COLLECTION_IS_NULL",
    "CURSOR_ALREADY_OPEN",
    "DUP_VAL_ON_INDEX",
    "INVALID_CURSOR",
    "INVALID_NUMBER",
    "LOGIN_DENIED",
    "NO_DATA_FOUND",
    "NO_DATA_NEEDED",
    "NOT_LOGGED_ON",
    "PROGRAM_ERROR",
    "ROWTYPE_MISMATCH",
    "SELF_IS_NULL",
    "STORAGE_ERROR",
    "SUBSCRIPT_BEYOND_COUNT",
    "SUBSCRIPT_OUTSIDE_LIMIT",
    "SYS_INVALID_ROWID",
    "TIMEOUT_ON_RESOURCE",
    "TOO_MANY_ROWS",
    "VALUE_ERROR",
    "ZERO_DIVIDE",
];

/// Which tag kinds a context has already bound, for duplicate detection.
#[derive(Default)]
struct Bound {
    params: FxHashSet<String>,
    returns: bool,
}

impl Resolver<'_> {
    /// Apply a context's own tags to it and its members.
    pub(super) fn bind(&mut self, context: ContextId, tags: &[Tag]) {
        let mut description = Vec::new();
        let mut bound = Bound::default();
        for tag in tags {
            match &tag.body {
                TagBody::Description => {
                    let text = tag.content.text();
                    if !text.is_empty() {
                        description.push(text);
                    }
                }
                TagBody::Param(param) => self.bind_param(context, tag, param, &mut bound),
                TagBody::Return { type_expr } => {
                    let doc_type = type_expr.as_ref().map(|expr| expr.text.clone());
                    self.bind_return(context, tag, doc_type, &mut bound);
                }
                TagBody::Throws { name: Some(name) } => {
                    self.scope().pending_throws.push(PendingThrows {
                        context,
                        name: name.clone(),
                        description: tag.content.text(),
                        at: tag.span.start.clone(),
                    });
                }
                TagBody::Throws { name: None } => self.orphan(tag, "`@throws` without a name"),
                TagBody::Link { .. } | TagBody::Visibility(_) | TagBody::Generic => {
                    self.contexts.get_mut(context).annotations.push(tag.clone());
                }
            }
        }
        if !description.is_empty() {
            self.contexts.get_mut(context).description = description.join("\n\n");
        }
    }

    /// `@param` on a method binds to a parameter; on a record or object
    /// type, to a field or attribute that has no description of its own.
    fn bind_param(&mut self, context: ContextId, tag: &Tag, param: &ParamTag, bound: &mut Bound) {
        let Some((members, what)) = self.param_targets(context) else {
            self.contexts.get_mut(context).annotations.push(tag.clone());
            return;
        };

        let Some(name) = &param.name else {
            self.orphan(tag, "`@param` without a name");
            return;
        };
        if !bound.params.insert(name.to_string()) {
            self.duplicate(tag, &format!("`@param {name}`"));
            return;
        }
        let Some(member) = members
            .into_iter()
            .find(|&member| self.contexts.get(member).name.same_base(name))
        else {
            let owner = self.contexts.get(context).name.to_string();
            self.orphan(tag, &format!("`@param {name}` matches no {what} of `{owner}`"));
            return;
        };

        let text = tag.content.text();
        let member = self.contexts.get_mut(member);
        match member.kind {
            ContextKind::Parameter => {
                if !text.is_empty() {
                    member.description = text;
                }
            }
            _ => {
                if member.description.is_empty() {
                    member.description = text;
                }
            }
        }
        if let Detail::Parameter(detail) = &mut member.detail {
            detail.doc_type = param.type_expr.as_ref().map(|expr| expr.text.clone());
            detail.optional = param.optional;
            if detail.default_value.is_none() {
                detail.default_value.clone_from(&param.default_value);
            }
        }
    }

    /// Members a `@param` on `context` may describe.
    fn param_targets(&self, context: ContextId) -> Option<(Vec<ContextId>, &'static str)> {
        let owner = self.contexts.get(context);
        match (&owner.detail, owner.kind) {
            (Detail::Method(method), _) => Some((method.params.clone(), "parameter")),
            (Detail::Record(record), _) => Some((record.fields.clone(), "field")),
            (_, ContextKind::ObjectType) => Some((
                owner
                    .children
                    .iter()
                    .copied()
                    .filter(|&child| self.contexts.get(child).kind == ContextKind::Attribute)
                    .collect(),
                "attribute",
            )),
            _ => None,
        }
    }

    fn bind_return(
        &mut self,
        context: ContextId,
        tag: &Tag,
        doc_type: Option<String>,
        bound: &mut Bound,
    ) {
        let owner = self.contexts.get(context);
        let name = owner.name.to_string();
        let returns_value =
            matches!(&owner.detail, Detail::Method(method) if method.returns.is_some());
        if !owner.kind.is_method() {
            self.contexts.get_mut(context).annotations.push(tag.clone());
            return;
        }
        if bound.returns {
            self.duplicate(tag, "`@return`");
            return;
        }
        bound.returns = true;
        if !returns_value {
            self.orphan(tag, &format!("`@return` on `{name}`, which returns nothing"));
            return;
        }
        if let Detail::Method(method) = &mut self.contexts.get_mut(context).detail {
            if let Some(returns) = &mut method.returns {
                returns.description = tag.content.text();
                returns.doc_type = doc_type;
            }
        }
    }

    // ─── Throws ─────────────────────────────────────────────────────

    /// Bind deferred work of a closed container against it and every
    /// scope still open around it.
    pub(super) fn close_scope(&mut self, scope: Scope) {
        for (name, code) in &scope.exception_inits {
            let Some(exception) = self.find_exception(&scope, name) else {
                continue;
            };
            if let Detail::Exception { codes } = &mut self.contexts.get_mut(exception).detail {
                if !codes.contains(code) {
                    codes.push(code.clone());
                }
            }
        }

        for pending in &scope.pending_throws {
            let target = self.throws_target(&scope, &pending.name);
            tracing::trace!(name = %pending.name, ?target, "throws");
            if target == ThrowsTarget::Unknown && self.config.warn_orphan_tags {
                self.warn(
                    ErrorCode::W2002,
                    format!("`@throws {}` names no known exception", pending.name),
                    Some(pending.at.clone()),
                );
            }
            self.contexts.get_mut(pending.context).throws.push(ThrowsDoc {
                name: pending.name.clone(),
                description: pending.description.clone(),
                target,
            });
        }
    }

    fn scopes_from<'s>(&'s self, innermost: &'s Scope) -> impl Iterator<Item = &'s Scope> {
        std::iter::once(innermost).chain(self.scopes.iter().rev())
    }

    fn find_exception(&self, scope: &Scope, name: &Name) -> Option<ContextId> {
        self.scopes_from(scope)
            .find_map(|scope| scope.exceptions.get(name.last()).copied())
    }

    fn throws_target(&self, scope: &Scope, name: &Name) -> ThrowsTarget {
        if let Some(exception) = self.find_exception(scope, name) {
            return ThrowsTarget::Declared(exception);
        }
        if let Some(code) = error_code(&name.to_string()) {
            // An exception bound to this code by EXCEPTION_INIT.
            let declared = self.scopes_from(scope).find_map(|scope| {
                scope.declared.iter().copied().find(|&exception| {
                    matches!(
                        &self.contexts.get(exception).detail,
                        Detail::Exception { codes }
                            if codes.iter().any(|c| error_code(c) == Some(code))
                    )
                })
            });
            return declared.map_or(ThrowsTarget::ErrorCode, ThrowsTarget::Declared);
        }
        if PREDEFINED_EXCEPTIONS.contains(&name.last()) {
            return ThrowsTarget::Predefined;
        }
        ThrowsTarget::Unknown
    }

    // ─── Diagnostics ────────────────────────────────────────────────

    fn orphan(&mut self, tag: &Tag, message: &str) {
        if self.config.warn_orphan_tags {
            self.warn(
                ErrorCode::W2002,
                message.to_owned(),
                Some(tag.span.start.clone()),
            );
        }
    }

    fn duplicate(&mut self, tag: &Tag, what: &str) {
        self.warn(
            ErrorCode::W2003,
            format!("duplicate {what} ignored"),
            Some(tag.span.start.clone()),
        );
    }
}

/// `-20001`, `20001` or `ORA-20001` as a number; anything else is `None`.
fn error_code(text: &str) -> Option<i64> {
    let digits = text
        .strip_prefix("ORA")
        .or_else(|| text.strip_prefix("ora"))
        .unwrap_or(text);
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::error_code;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_codes() {
        assert_eq!(error_code("-20001"), Some(-20001));
        assert_eq!(error_code("ORA-01403"), Some(-1403));
        assert_eq!(error_code("100"), Some(100));
        assert_eq!(error_code("NO_DATA_FOUND"), None);
        assert_eq!(error_code("ORA"), None);
    }
}
