//! Interfaces the object model consumes from its collaborators.

/// Decides whether a candidate identifier is an absolute URI with a scheme.
pub trait UriValidator {
    fn is_valid_absolute_uri(&self, candidate: &str) -> bool;
}

/// Builds the markup tree the serializer writes into.
///
/// Namespace bindings are applied once, on the root element.
pub trait MarkupBuilder {
    type Element: Copy;

    fn create_root(&mut self, tag: &str, namespaces: &[(&str, &str)]) -> Self::Element;
    fn create_child(&mut self, parent: Self::Element, tag: &str) -> Self::Element;
    fn set_attribute(&mut self, element: Self::Element, key: &str, value: &str);
}
