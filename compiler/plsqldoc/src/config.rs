use pld_ir::PositionFormat;
use pld_resolve::ResolveConfig;

/// Settings for one documentation run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DocConfig {
    /// How positions are rendered in errors and entity locations.
    pub position_format: PositionFormat,
    /// Keep entities tagged `@private` or `@internal`.
    pub include_private: bool,
    /// Warn about `@param`, `@return` and `@throws` tags with nothing to
    /// bind to.
    pub warn_orphan_tags: bool,
    /// Process files of a [`document_all`](crate::document_all) run on the
    /// rayon pool.
    pub parallel: bool,
}

impl Default for DocConfig {
    fn default() -> Self {
        DocConfig {
            position_format: PositionFormat::Full,
            include_private: false,
            warn_orphan_tags: true,
            parallel: true,
        }
    }
}

impl DocConfig {
    pub(crate) fn resolve_config(&self) -> ResolveConfig {
        ResolveConfig {
            warn_orphan_tags: self.warn_orphan_tags,
        }
    }
}
