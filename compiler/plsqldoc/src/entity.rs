//! Consumer-facing entity model.
//!
//! An [`Entity`] is a resolved context flattened for renderers: plain
//! strings instead of tags, members sorted into buckets, overloads of a
//! routine grouped under one name. Entities hidden by `@private` or
//! `@internal` are dropped unless [`DocConfig::include_private`] is set.

use pld_doc::{LinkTarget, Tag, TagBody, Visibility};
use pld_ir::TextSpan;
use pld_resolve::{
    CodeContext, ContextId, ContextKind, Detail, ParameterDetail, Resolution, ThrowsDoc,
    ThrowsTarget,
};
use serde::Serialize;

use crate::{DocConfig, Document};

/// One documented construct.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Entity {
    pub kind: &'static str,
    pub name: String,
    pub id: String,
    /// Ids from the top-level unit down, e.g. `EMP_API/GET-1`.
    pub path: String,
    pub header: String,
    /// `start` rendered with the run's position format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<TextSpan>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Type declaration body, or subtype constraints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error_codes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<ReturnEntity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<ThrowsEntity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkEntity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Members::is_empty")]
    pub members: Members,
}

/// Members of a container, by bucket, each in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Members {
    pub routines: Vec<Overloads>,
    /// Records, collection types, subtypes.
    pub types: Vec<Entity>,
    pub constants: Vec<Entity>,
    pub variables: Vec<Entity>,
    pub exceptions: Vec<Entity>,
    /// Record fields and object attributes.
    pub fields: Vec<Entity>,
}

impl Members {
    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
            && self.types.is_empty()
            && self.constants.is_empty()
            && self.variables.is_empty()
            && self.exceptions.is_empty()
            && self.fields.is_empty()
    }

    /// Add a routine to the group of its name, opening one on first sight.
    fn push_routine(&mut self, entity: Entity) {
        match self
            .routines
            .iter_mut()
            .find(|group| group.name == entity.name)
        {
            Some(group) => group.overloads.push(entity),
            None => self.routines.push(Overloads {
                name: entity.name.clone(),
                overloads: vec![entity],
            }),
        }
    }
}

/// Every routine of one name in a container.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overloads {
    pub name: String,
    pub overloads: Vec<Entity>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParamEntity {
    pub name: String,
    pub mode: &'static str,
    pub nocopy: bool,
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub optional: bool,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReturnEntity {
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThrowsEntity {
    pub name: String,
    pub description: String,
    /// `declared`, `predefined`, `error code` or `unknown`.
    pub resolution: &'static str,
    /// Path of the declared exception.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkEntity {
    /// `url`, `hash`, `identifier`, `expression` or `missing`.
    pub kind: &'static str,
    /// The target as written.
    pub reference: String,
    /// Normalized name for hash and identifier links, else the reference.
    pub target: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

/// Any tag not modelled elsewhere: `@since`, `@author`, `@example`, ...
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Annotation {
    pub kind: String,
    pub text: String,
}

/// Entities of a document's top-level units.
pub(crate) fn build(document: &Document, config: &DocConfig) -> Vec<Entity> {
    let builder = Builder {
        resolution: &document.resolution,
        config,
    };
    document
        .resolution
        .units
        .iter()
        .filter_map(|&id| builder.entity(id))
        .collect()
}

struct Builder<'a> {
    resolution: &'a Resolution,
    config: &'a DocConfig,
}

impl Builder<'_> {
    fn entity(&self, id: ContextId) -> Option<Entity> {
        let context = self.resolution.context(id);
        let visibility = context.visibility();
        if !self.config.include_private && visibility.is_some_and(Visibility::is_hidden) {
            tracing::trace!(id = %context.id, "hidden");
            return None;
        }

        let mut entity = Entity {
            kind: context.kind.as_str(),
            name: context.name.to_string(),
            id: context.id.clone(),
            path: self.resolution.contexts.path(id),
            header: context.header.clone(),
            location: context.span.as_ref().map(|span| {
                span.start
                    .display(self.config.position_format)
                    .to_string()
            }),
            span: context.span.clone(),
            description: context.description.clone(),
            throws: context.throws.iter().map(|t| self.throws(t)).collect(),
            links: self.links(id, context),
            annotations: annotations(context),
            deprecated: context.deprecated(),
            visibility: visibility.map(|v| v.as_str().to_owned()),
            ..Entity::default()
        };

        match &context.detail {
            Detail::Unit(unit) => {
                entity.authid.clone_from(&unit.authid);
                entity.base_type.clone_from(&unit.base_type);
                entity.members = self.members(id);
            }
            Detail::Method(method) => {
                entity.params = method.params.iter().map(|&p| self.param(p)).collect();
                entity.returns = method.returns.as_ref().map(|returns| ReturnEntity {
                    type_name: returns.type_name.clone(),
                    doc_type: returns.doc_type.clone(),
                    description: returns.description.clone(),
                });
            }
            Detail::Record(_) => entity.members = self.members(id),
            Detail::Variable(typed) | Detail::Field(typed) | Detail::Attribute(typed) => {
                entity.type_name = Some(typed.type_name.clone());
                entity.default_value.clone_from(&typed.default_value);
            }
            Detail::Subtype {
                base_type,
                constraints,
            } => {
                entity.type_name = Some(base_type.clone());
                entity.definition = (!constraints.is_empty()).then(|| constraints.join(" "));
            }
            Detail::Type { definition, .. } => entity.definition = Some(definition.clone()),
            Detail::Parameter(parameter) => {
                entity.type_name = Some(parameter.type_name.clone());
                entity.default_value.clone_from(&parameter.default_value);
            }
            Detail::Exception { codes } => entity.error_codes.clone_from(codes),
            Detail::None => {}
        }
        Some(entity)
    }

    fn members(&self, id: ContextId) -> Members {
        let mut members = Members::default();
        for (child_id, child) in self.resolution.contexts.children(id) {
            if child.kind == ContextKind::Parameter {
                continue;
            }
            let Some(entity) = self.entity(child_id) else {
                continue;
            };
            match child.kind {
                ContextKind::Procedure
                | ContextKind::Function
                | ContextKind::Constructor
                | ContextKind::Cursor => members.push_routine(entity),
                ContextKind::Constant => members.constants.push(entity),
                ContextKind::Variable => members.variables.push(entity),
                ContextKind::Exception => members.exceptions.push(entity),
                ContextKind::Field | ContextKind::Attribute => members.fields.push(entity),
                ContextKind::Record
                | ContextKind::Type
                | ContextKind::Subtype
                | ContextKind::Package
                | ContextKind::PackageBody
                | ContextKind::ObjectType
                | ContextKind::TypeBody
                | ContextKind::Parameter => members.types.push(entity),
            }
        }
        members
    }

    fn param(&self, id: ContextId) -> ParamEntity {
        let context = self.resolution.context(id);
        let default = ParameterDetail::default();
        let detail = match &context.detail {
            Detail::Parameter(detail) => detail,
            _ => &default,
        };
        ParamEntity {
            name: context.name.to_string(),
            mode: detail.mode.as_str(),
            nocopy: detail.nocopy,
            type_name: detail.type_name.clone(),
            doc_type: detail.doc_type.clone(),
            default_value: detail.default_value.clone(),
            optional: detail.optional,
            description: context.description.clone(),
        }
    }

    fn throws(&self, throws: &ThrowsDoc) -> ThrowsEntity {
        let (resolution, target) = match &throws.target {
            ThrowsTarget::Declared(exception) => {
                ("declared", Some(self.resolution.contexts.path(*exception)))
            }
            ThrowsTarget::Predefined => ("predefined", None),
            ThrowsTarget::ErrorCode => ("error code", None),
            ThrowsTarget::Unknown => ("unknown", None),
        };
        ThrowsEntity {
            name: throws.name.to_string(),
            description: throws.description.clone(),
            resolution,
            target,
        }
    }

    /// `@see` and `@link` block tags, then inline `{@link}` tags of the
    /// description.
    fn links(&self, id: ContextId, context: &CodeContext) -> Vec<LinkEntity> {
        let inline = self
            .resolution
            .comment_for(id)
            .into_iter()
            .flat_map(|comment| comment.tags.iter())
            .filter(|tag| tag.is_description())
            .flat_map(|tag| tag.content.inline_tags());
        context
            .annotations
            .iter()
            .chain(inline)
            .filter_map(link)
            .collect()
    }
}

fn link(tag: &Tag) -> Option<LinkEntity> {
    let TagBody::Link { target, reference } = &tag.body else {
        return None;
    };
    let (kind, resolved, args) = match target {
        LinkTarget::Url(url) => ("url", url.clone(), None),
        LinkTarget::Hash(to) => ("hash", to.name.to_string(), to.args.clone()),
        LinkTarget::Identifier(to) => ("identifier", to.name.to_string(), to.args.clone()),
        LinkTarget::Expression(expr) => ("expression", expr.text.clone(), None),
        LinkTarget::Missing => ("missing", String::new(), None),
    };
    Some(LinkEntity {
        kind,
        reference: reference.clone(),
        target: resolved,
        text: tag.display_text(),
        args,
    })
}

/// Annotations other than links, visibility and deprecation, which have
/// fields of their own.
fn annotations(context: &CodeContext) -> Vec<Annotation> {
    context
        .annotations
        .iter()
        .filter(|tag| {
            !matches!(tag.body, TagBody::Link { .. } | TagBody::Visibility(_))
                && tag.marker != "deprecated"
        })
        .map(|tag| Annotation {
            kind: tag.kind().to_owned(),
            text: tag.content.text(),
        })
        .collect()
}
