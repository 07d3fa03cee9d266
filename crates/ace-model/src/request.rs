//! Change requests
//!
//! A [`ChangeRequest`] is the immutable entry point of the pipeline: either a
//! visual DOM edit captured by the shell, or a free-text instruction.

use serde::{Deserialize, Serialize};

/// A requested change, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChangeRequest {
    /// Visual edit captured from the rendered DOM
    Visual(VisualEdit),
    /// Natural-language instruction
    NaturalLanguage(NaturalLanguageEdit),
}

impl ChangeRequest {
    /// Property deltas carried by the request (empty for natural language)
    #[inline]
    #[must_use]
    pub fn deltas(&self) -> &[PropertyDelta] {
        match self {
            ChangeRequest::Visual(edit) => &edit.deltas,
            ChangeRequest::NaturalLanguage(_) => &[],
        }
    }

    /// Human-readable summary of the request
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            ChangeRequest::Visual(edit) => {
                let props: Vec<&str> = edit.deltas.iter().map(|d| d.property.as_str()).collect();
                format!("visual edit on <{}>: {}", edit.element.tag, props.join(", "))
            }
            ChangeRequest::NaturalLanguage(edit) => edit.instruction.clone(),
        }
    }

    /// Whether this request originated from a visual edit
    #[inline]
    #[must_use]
    pub fn is_visual(&self) -> bool {
        matches!(self, ChangeRequest::Visual(_))
    }
}

/// Visual edit: a target element plus the observed property deltas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualEdit {
    /// Descriptor of the edited DOM element
    pub element: ElementDescriptor,
    /// Observed property changes
    pub deltas: Vec<PropertyDelta>,
}

impl VisualEdit {
    /// Create a visual edit
    #[inline]
    #[must_use]
    pub fn new(element: ElementDescriptor, deltas: Vec<PropertyDelta>) -> Self {
        Self { element, deltas }
    }
}

/// Descriptor of a DOM element as captured by the shell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementDescriptor {
    /// CSS selector, when the shell could compute one
    pub selector: Option<String>,
    /// Tag name (lowercase)
    pub tag: String,
    /// Class list
    pub classes: Vec<String>,
    /// Short sample of the element's text content
    pub text_sample: Option<String>,
}

impl ElementDescriptor {
    /// Create a descriptor for a tag
    #[inline]
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            selector: None,
            tag: tag.into(),
            classes: Vec::new(),
            text_sample: None,
        }
    }

    /// With a CSS selector
    #[inline]
    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// With class names
    #[inline]
    #[must_use]
    pub fn with_classes(mut self, classes: Vec<String>) -> Self {
        self.classes = classes;
        self
    }

    /// With a text sample
    #[inline]
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_sample = Some(text.into());
        self
    }
}

/// Natural-language instruction with an optional target hint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaturalLanguageEdit {
    /// Free-text instruction
    pub instruction: String,
    /// Optional selector or component-name hint
    pub target_hint: Option<String>,
}

impl NaturalLanguageEdit {
    /// Create an instruction without a hint
    #[inline]
    #[must_use]
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            target_hint: None,
        }
    }

    /// With a target hint
    #[inline]
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.target_hint = Some(hint.into());
        self
    }
}

/// One observed property change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDelta {
    /// CSS property or content field name
    pub property: String,
    /// Value before the edit, when known
    pub before: Option<String>,
    /// Value after the edit
    pub after: String,
    /// Delta classification
    pub category: DeltaCategory,
}

impl PropertyDelta {
    /// Create a delta
    #[inline]
    #[must_use]
    pub fn new(
        property: impl Into<String>,
        before: Option<String>,
        after: impl Into<String>,
        category: DeltaCategory,
    ) -> Self {
        Self {
            property: property.into(),
            before,
            after: after.into(),
            category,
        }
    }

    /// Shorthand for a styling delta with a known previous value
    #[inline]
    #[must_use]
    pub fn styling(
        property: impl Into<String>,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        Self::new(property, Some(before.into()), after, DeltaCategory::Styling)
    }
}

/// Category of a property delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeltaCategory {
    /// Visual styling (color, size, spacing)
    Styling,
    /// Text or media content
    Content,
    /// Positioning and flow
    Layout,
    /// Element structure
    Structure,
}
