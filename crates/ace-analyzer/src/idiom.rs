//! Styling-idiom strategies
//!
//! Converts a requested property/value delta into the target file's styling
//! idiom. Strategies are capability-tagged and injected into the analyzer
//! through an [`IdiomTable`] rather than looked up via ambient state.

use ace_model::{DirectChange, PropertyDelta, StylingIdiom};
use ace_repo::ThemeTable;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Properties with small, enumerable value spaces
static ENUMERABLE_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "color",
        "background-color",
        "font-size",
        "font-weight",
        "margin",
        "margin-top",
        "margin-bottom",
        "margin-left",
        "margin-right",
        "padding",
        "padding-top",
        "padding-bottom",
        "padding-left",
        "padding-right",
        "text-align",
    ]
    .into_iter()
    .collect()
});

/// Layout-affecting properties
static LAYOUT_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "display",
        "position",
        "flex",
        "flex-direction",
        "flex-wrap",
        "grid-template-columns",
        "grid-template-rows",
        "gap",
        "align-items",
        "justify-content",
        "width",
        "height",
        "top",
        "left",
        "right",
        "bottom",
    ]
    .into_iter()
    .collect()
});

/// Confidence in mapping a property delta
///
/// High for simple, enumerable properties, medium for layout properties,
/// low otherwise.
#[must_use]
pub fn property_confidence(property: &str) -> f64 {
    let property = property.to_lowercase();
    if ENUMERABLE_PROPERTIES.contains(property.as_str()) {
        0.9
    } else if LAYOUT_PROPERTIES.contains(property.as_str()) {
        0.7
    } else {
        0.5
    }
}

/// Pluggable property-delta conversion for one styling idiom
pub trait IdiomStrategy: Send + Sync + std::fmt::Debug {
    /// The idiom this strategy handles
    fn idiom(&self) -> StylingIdiom;

    /// Convert a delta into a direct change in this idiom
    fn convert(&self, delta: &PropertyDelta, theme: &ThemeTable) -> DirectChange;
}

/// Conventional utility-class prefix for a property, if any
#[must_use]
pub fn utility_prefix(property: &str) -> Option<&'static str> {
    match property {
        "font-size" | "color" | "text-align" => Some("text"),
        "background-color" => Some("bg"),
        "margin" => Some("m"),
        "margin-top" => Some("mt"),
        "margin-bottom" => Some("mb"),
        "margin-left" => Some("ml"),
        "margin-right" => Some("mr"),
        "padding" => Some("p"),
        "padding-top" => Some("pt"),
        "padding-bottom" => Some("pb"),
        "padding-left" => Some("pl"),
        "padding-right" => Some("pr"),
        "font-weight" => Some("font"),
        "width" => Some("w"),
        "height" => Some("h"),
        "gap" => Some("gap"),
        "border-radius" => Some("rounded"),
        _ => None,
    }
}

/// Utility-class idiom: map deltas onto utility tokens
///
/// Exact theme-table lookup first; on miss, synthesize an arbitrary-value
/// token from the property's utility prefix.
#[derive(Debug, Default)]
pub struct UtilityClassStrategy;

impl IdiomStrategy for UtilityClassStrategy {
    fn idiom(&self) -> StylingIdiom {
        StylingIdiom::UtilityClasses
    }

    fn convert(&self, delta: &PropertyDelta, theme: &ThemeTable) -> DirectChange {
        let property = delta.property.to_lowercase();
        let base_confidence = property_confidence(&property);

        if let Some(token) = theme.token_for(&property, &delta.after) {
            return DirectChange::new(
                delta.property.clone(),
                delta.before.clone(),
                token,
                base_confidence,
            );
        }

        // No exact token: synthesize an arbitrary-value utility. Slightly
        // less certain than a theme hit.
        let replacement = match utility_prefix(&property) {
            Some(prefix) => format!("{}-[{}]", prefix, delta.after),
            None => format!("[{}:{}]", property, delta.after),
        };
        DirectChange::new(
            delta.property.clone(),
            delta.before.clone(),
            replacement,
            (base_confidence - 0.15).max(0.0),
        )
    }
}

/// Scoped/component-local idiom: camelCase property pairs
#[derive(Debug)]
pub struct CamelCaseStrategy {
    idiom: StylingIdiom,
}

impl CamelCaseStrategy {
    /// Strategy for scoped styles
    #[inline]
    #[must_use]
    pub fn scoped() -> Self {
        Self {
            idiom: StylingIdiom::ScopedStyles,
        }
    }

    /// Strategy for component-local style modules
    #[inline]
    #[must_use]
    pub fn component() -> Self {
        Self {
            idiom: StylingIdiom::ComponentStyles,
        }
    }
}

/// Convert a kebab-case CSS property to camelCase
#[must_use]
pub fn to_camel_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper_next = false;
    for ch in property.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

impl IdiomStrategy for CamelCaseStrategy {
    fn idiom(&self) -> StylingIdiom {
        self.idiom
    }

    fn convert(&self, delta: &PropertyDelta, _theme: &ThemeTable) -> DirectChange {
        let property = delta.property.to_lowercase();
        let replacement = format!("{}: '{}'", to_camel_case(&property), delta.after);
        DirectChange::new(
            delta.property.clone(),
            delta.before.clone(),
            replacement,
            property_confidence(&property),
        )
    }
}

/// Plain-stylesheet idiom: kebab-case declarations
#[derive(Debug, Default)]
pub struct StylesheetStrategy;

impl IdiomStrategy for StylesheetStrategy {
    fn idiom(&self) -> StylingIdiom {
        StylingIdiom::Stylesheet
    }

    fn convert(&self, delta: &PropertyDelta, _theme: &ThemeTable) -> DirectChange {
        let property = delta.property.to_lowercase();
        let replacement = format!("{}: {};", property, delta.after);
        DirectChange::new(
            delta.property.clone(),
            delta.before.clone(),
            replacement,
            property_confidence(&property),
        )
    }
}

/// Capability-tagged strategy table keyed by styling idiom
#[derive(Debug, Default)]
pub struct IdiomTable {
    strategies: Vec<Box<dyn IdiomStrategy>>,
}

impl IdiomTable {
    /// Create an empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table covering all four built-in idioms
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register(Box::new(UtilityClassStrategy));
        table.register(Box::new(CamelCaseStrategy::scoped()));
        table.register(Box::new(CamelCaseStrategy::component()));
        table.register(Box::new(StylesheetStrategy));
        table
    }

    /// Register a strategy
    pub fn register(&mut self, strategy: Box<dyn IdiomStrategy>) {
        self.strategies.push(strategy);
    }

    /// Strategy for an idiom, if registered
    #[must_use]
    pub fn for_idiom(&self, idiom: StylingIdiom) -> Option<&dyn IdiomStrategy> {
        self.strategies
            .iter()
            .find(|s| s.idiom() == idiom)
            .map(Box::as_ref)
    }

    /// Number of registered strategies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether the table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(property: &str, after: &str) -> PropertyDelta {
        PropertyDelta::styling(property, "old", after)
    }

    #[test]
    fn property_confidence_tiers() {
        assert_eq!(property_confidence("color"), 0.9);
        assert_eq!(property_confidence("display"), 0.7);
        assert_eq!(property_confidence("mask-border-outset"), 0.5);
    }

    #[test]
    fn utility_exact_token() {
        let theme = ThemeTable::with_defaults();
        let change = UtilityClassStrategy.convert(&delta("font-size", "16px"), &theme);
        assert_eq!(change.replacement, "text-base");
        assert_eq!(change.confidence, 0.9);
    }

    #[test]
    fn utility_arbitrary_value_on_miss() {
        let theme = ThemeTable::with_defaults();
        let change = UtilityClassStrategy.convert(&delta("font-size", "17px"), &theme);
        assert_eq!(change.replacement, "text-[17px]");
        assert!(change.confidence < 0.9);
    }

    #[test]
    fn utility_unknown_property_uses_arbitrary_declaration() {
        let theme = ThemeTable::with_defaults();
        let change = UtilityClassStrategy.convert(&delta("letter-spacing", "0.1em"), &theme);
        assert_eq!(change.replacement, "[letter-spacing:0.1em]");
    }

    #[test]
    fn camel_case_conversion() {
        assert_eq!(to_camel_case("font-size"), "fontSize");
        assert_eq!(to_camel_case("background-color"), "backgroundColor");
        assert_eq!(to_camel_case("color"), "color");
    }

    #[test]
    fn scoped_strategy_emits_camel_case_pair() {
        let theme = ThemeTable::new();
        let change = CamelCaseStrategy::scoped().convert(&delta("font-size", "16px"), &theme);
        assert_eq!(change.replacement, "fontSize: '16px'");
    }

    #[test]
    fn stylesheet_strategy_keeps_kebab_case() {
        let theme = ThemeTable::new();
        let change = StylesheetStrategy.convert(&delta("font-size", "16px"), &theme);
        assert_eq!(change.replacement, "font-size: 16px;");
    }

    #[test]
    fn table_covers_all_idioms() {
        let table = IdiomTable::with_defaults();
        assert_eq!(table.len(), 4);
        for idiom in [
            StylingIdiom::UtilityClasses,
            StylingIdiom::ScopedStyles,
            StylingIdiom::ComponentStyles,
            StylingIdiom::Stylesheet,
        ] {
            assert!(table.for_idiom(idiom).is_some());
        }
    }
}
