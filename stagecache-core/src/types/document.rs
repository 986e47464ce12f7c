//! Document type and related structures.
//!
//! Documents are the unit of data flowing through a pipeline: the raw record
//! produced by a source reader plus whatever annotations preprocessing
//! attaches to it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A span-level annotation attached to a document by a preprocessing stage.
///
/// # Examples
///
/// ```rust
/// use stagecache_core::types::Annotation;
///
/// let token = Annotation::new("Token", 0, 5).with_attribute("pos", "NOUN");
/// assert_eq!(token.kind, "Token");
/// assert_eq!(token.len(), 5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Annotation {
    /// Annotation type name (e.g. `Token`, `Sentence`, `NamedEntity`).
    pub kind: String,

    /// Start offset into the document content, in bytes.
    pub start: usize,

    /// End offset into the document content, in bytes (exclusive).
    pub end: usize,

    /// Free-form attributes of the annotation.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl Annotation {
    /// Create a new annotation covering `start..end`.
    pub fn new<S: Into<String>>(kind: S, start: usize, end: usize) -> Self {
        Self {
            kind: kind.into(),
            start,
            end,
            attributes: HashMap::new(),
        }
    }

    /// Add or update an attribute.
    #[must_use]
    pub fn with_attribute<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Length of the covered span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the annotation covers an empty span.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Represents a document flowing through the pipeline.
///
/// A document contains the original content along with metadata about its
/// source and the annotations added by preprocessing. Documents are what the
/// cache persists and what a cache-backed reader hands back.
///
/// # Examples
///
/// ```rust
/// use stagecache_core::types::Document;
///
/// let doc = Document::new("This is the document content.")
///     .with_metadata("source", "example.txt");
/// assert_eq!(doc.get_metadata_string("source"), Some("example.txt".to_string()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: Uuid,

    /// Raw content of the document.
    pub content: String,

    /// Document metadata (source, language, etc.).
    ///
    /// Common metadata keys include:
    /// - `source`: Original file path or URL
    /// - `language`: Document language
    /// - `title`: Document title
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    /// Annotations attached by preprocessing, in insertion order.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Document {
    /// Create a new document with the given content.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stagecache_core::types::Document;
    ///
    /// let doc = Document::new("Hello, world!");
    /// assert_eq!(doc.content, "Hello, world!");
    /// assert!(doc.metadata.is_empty());
    /// assert!(doc.annotations.is_empty());
    /// ```
    pub fn new<S: Into<String>>(content: S) -> Self {
        Self::with_id(Uuid::new_v4(), content)
    }

    /// Create a new document with a specific ID.
    pub fn with_id<S: Into<String>>(id: Uuid, content: S) -> Self {
        Self {
            id,
            content: content.into(),
            metadata: HashMap::new(),
            annotations: Vec::new(),
        }
    }

    /// Create a builder for constructing documents with fluent API.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// Add or update metadata for this document.
    #[must_use]
    pub fn with_metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach an annotation to this document.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Get metadata value by key.
    pub fn get_metadata(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    /// Get metadata value as a string.
    pub fn get_metadata_string(&self, key: &str) -> Option<String> {
        self.metadata.get(key)?.as_str().map(String::from)
    }

    /// Iterate over the annotations of one kind.
    pub fn annotations_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Annotation> {
        self.annotations.iter().filter(move |a| a.kind == kind)
    }

    /// Check if any preprocessing stage annotated this document.
    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// Get the document size in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Builder for creating documents with a fluent API.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    id: Option<Uuid>,
    content: Option<String>,
    metadata: HashMap<String, serde_json::Value>,
    annotations: Vec<Annotation>,
}

impl DocumentBuilder {
    /// Create a new document builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document ID.
    #[must_use]
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the document content.
    #[must_use]
    pub fn content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add metadata to the document.
    #[must_use]
    pub fn metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Add an annotation to the document.
    #[must_use]
    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Build the document.
    ///
    /// # Panics
    ///
    /// Panics if content is not set.
    pub fn build(self) -> Document {
        Document {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            content: self.content.expect("Document content is required"),
            metadata: self.metadata,
            annotations: self.annotations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new("Test content");
        assert_eq!(doc.content, "Test content");
        assert!(doc.metadata.is_empty());
        assert!(!doc.is_annotated());
        assert!(!doc.is_empty());
        assert_eq!(doc.size(), 12);
    }

    #[test]
    fn test_document_builder() {
        let doc = Document::builder()
            .content("Test content")
            .metadata("source", "test.txt")
            .annotation(Annotation::new("Token", 0, 4))
            .build();

        assert_eq!(
            doc.get_metadata_string("source"),
            Some("test.txt".to_string())
        );
        assert_eq!(doc.annotations.len(), 1);
        assert!(doc.is_annotated());
    }

    #[test]
    fn test_annotations_of_kind() {
        let doc = Document::new("Hello big world")
            .with_annotation(Annotation::new("Token", 0, 5))
            .with_annotation(Annotation::new("Sentence", 0, 15))
            .with_annotation(Annotation::new("Token", 6, 9));

        let tokens: Vec<_> = doc.annotations_of("Token").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].start, 6);
    }

    #[test]
    fn test_document_json_keeps_annotations() {
        let doc = Document::new("Rust")
            .with_metadata("lang", "en")
            .with_annotation(Annotation::new("Token", 0, 4).with_attribute("pos", "PROPN"));

        let json = serde_json::to_string(&doc).unwrap();
        let decoded: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_annotation_span() {
        let empty = Annotation::new("Marker", 3, 3);
        assert!(empty.is_empty());
        assert_eq!(Annotation::new("Token", 2, 7).len(), 5);
    }
}
