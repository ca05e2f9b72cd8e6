use crate::core::emitter::Emitter;
use crate::core::markup::{ElementTree, RenderOptions};
use crate::domain::entity::EntityId;
use crate::domain::graph::NmlGraph;
use crate::domain::ports::MarkupBuilder;
use crate::utils::error::Result;

impl NmlGraph {
    /// Serializes `root` and everything reachable from it into `builder`.
    ///
    /// With no `parent` the root entity becomes the document root and, for a
    /// network object, binds the `nml` namespace. The walk does not detect
    /// cycles; a graph whose relations loop back on themselves never ends.
    pub fn serialize<B: MarkupBuilder>(
        &self,
        root: impl Into<EntityId>,
        builder: &mut B,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let root = root.into();
        let mut emitter = Emitter::new(self, builder);
        let element = emitter.emit(root, parent)?;
        tracing::debug!("Serialized {} with {} elements", root, emitter.emitted());
        Ok(element)
    }

    pub fn to_document(&self, root: impl Into<EntityId>) -> Result<ElementTree> {
        let mut tree = ElementTree::new();
        self.serialize(root, &mut tree, None)?;
        Ok(tree)
    }

    pub fn to_xml_string(&self, root: impl Into<EntityId>) -> Result<String> {
        self.render(root, &RenderOptions::default())
    }

    pub fn render(&self, root: impl Into<EntityId>, options: &RenderOptions) -> Result<String> {
        Ok(self.to_document(root)?.render(options))
    }
}
