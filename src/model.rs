// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Object model of a parsed feature suite.
//!
//! These types are the read-only snapshot every downstream consumer works
//! against: a [`Feature`] with its ordered [`FeatureElement`]s, where a
//! [`ScenarioOutline`] additionally owns its ordered [`Example`] blocks.
//! They are produced once by the [`parser`] and never mutated afterwards,
//! except for the build-time tag annotations applied by the crawler.
//!
//! [`parser`]: crate::parser

/// A parsed Gherkin feature: name, tags and its ordered elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    /// Name of this [`Feature`].
    pub name: String,

    /// Free-form description, if the feature carries one.
    pub description: Option<String>,

    /// Tags of this [`Feature`].
    ///
    /// Stored in declaration order; use [`Feature::display_tags()`] for the
    /// alphabetical ordering renderers display.
    pub tags: Vec<String>,

    /// Ordered [`Scenario`]s and [`ScenarioOutline`]s of this [`Feature`].
    pub elements: Vec<FeatureElement>,

    /// Whether a hide-tag matched this [`Feature`].
    ///
    /// Only an annotation: the visibility decision belongs to renderers.
    pub hidden: bool,
}

impl Feature {
    /// Tags of this [`Feature`] sorted alphabetically.
    #[must_use]
    pub fn display_tags(&self) -> Vec<&str> {
        let mut tags: Vec<_> = self.tags.iter().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

/// Single element of a [`Feature`]: either a plain [`Scenario`] or a
/// [`ScenarioOutline`] instantiated by [`Example`] tables.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureElement {
    /// Plain [`Scenario`] without any [`Example`]s.
    Scenario(Scenario),

    /// [`ScenarioOutline`] with one or more [`Example`] blocks.
    Outline(ScenarioOutline),
}

impl FeatureElement {
    /// Name of the underlying element.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scenario(sc) => &sc.name,
            Self::Outline(outline) => &outline.name,
        }
    }

    /// Tags of the underlying element.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Scenario(sc) => &sc.tags,
            Self::Outline(outline) => &outline.tags,
        }
    }

    /// Whether a hide-tag matched the underlying element.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        match self {
            Self::Scenario(sc) => sc.hidden,
            Self::Outline(outline) => outline.hidden,
        }
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        match self {
            Self::Scenario(sc) => sc.hidden = hidden,
            Self::Outline(outline) => outline.hidden = hidden,
        }
    }
}

/// A plain scenario: ordered [`Step`]s, no examples.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    /// Name of this [`Scenario`].
    pub name: String,

    /// Free-form description, if present.
    pub description: Option<String>,

    /// Tags of this [`Scenario`].
    pub tags: Vec<String>,

    /// Ordered [`Step`]s of this [`Scenario`].
    pub steps: Vec<Step>,

    /// Whether a hide-tag matched this [`Scenario`].
    pub hidden: bool,
}

/// A parameterized scenario instantiated by one or more [`Example`] tables.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioOutline {
    /// Name of this [`ScenarioOutline`].
    pub name: String,

    /// Free-form description, if present.
    pub description: Option<String>,

    /// Tags of this [`ScenarioOutline`].
    pub tags: Vec<String>,

    /// Ordered template [`Step`]s of this [`ScenarioOutline`].
    pub steps: Vec<Step>,

    /// Ordered [`Example`] blocks, in declaration order.
    pub examples: Vec<Example>,

    /// Whether a hide-tag matched this [`ScenarioOutline`].
    pub hidden: bool,
}

impl ScenarioOutline {
    /// All example rows of this outline, every block concatenated in
    /// declaration order.
    ///
    /// This single ordered stream is the candidate order result binding runs
    /// over, so duplicate value tuples across blocks bind to distinct records
    /// in first-declared order.
    pub fn flattened_rows(&self) -> impl Iterator<Item = &[String]> {
        self.examples
            .iter()
            .flat_map(|ex| ex.table.rows.iter().map(Vec::as_slice))
    }
}

/// A named or unnamed table of concrete parameter rows instantiating a
/// [`ScenarioOutline`].
#[derive(Clone, Debug, PartialEq)]
pub struct Example {
    /// Optional name of this [`Example`] block.
    pub name: Option<String>,

    /// Free-form description, if present.
    pub description: Option<String>,

    /// Tags of this [`Example`] block.
    pub tags: Vec<String>,

    /// The parameter table of this block.
    pub table: TableArgument,
}

/// A header row plus ordered data rows of string cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableArgument {
    /// Column names.
    pub header: Vec<String>,

    /// Ordered data rows.
    pub rows: Vec<Vec<String>>,
}

impl TableArgument {
    /// Builds a [`TableArgument`] from raw rows, treating the first row as
    /// the header.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut rows = rows.into_iter();
        match rows.next() {
            Some(header) => Self { header, rows: rows.collect() },
            None => Self::default(),
        }
    }

    /// Builds a [`TableArgument`] from a [`gherkin::Table`].
    #[must_use]
    pub fn from_gherkin(table: &gherkin::Table) -> Self {
        Self::from_rows(table.rows.clone())
    }
}

/// Single step of a [`Scenario`] or [`ScenarioOutline`].
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Keyword of this [`Step`] (`Given`, `When`, ...), as written.
    pub keyword: String,

    /// Text of this [`Step`] after the keyword.
    pub text: String,

    /// Attached docstring, if any.
    pub docstring: Option<String>,

    /// Attached data table, if any.
    pub table: Option<TableArgument>,
}

impl From<&gherkin::Step> for Step {
    fn from(step: &gherkin::Step) -> Self {
        Self {
            keyword: step.keyword.clone(),
            text: step.value.clone(),
            docstring: step.docstring.clone(),
            table: step.table.as_ref().map(TableArgument::from_gherkin),
        }
    }
}

impl From<&gherkin::Scenario> for FeatureElement {
    fn from(scenario: &gherkin::Scenario) -> Self {
        let steps = scenario.steps.iter().map(Step::from).collect();
        if scenario.examples.is_empty() {
            Self::Scenario(Scenario {
                name: scenario.name.clone(),
                description: scenario.description.clone(),
                tags: scenario.tags.clone(),
                steps,
                hidden: false,
            })
        } else {
            Self::Outline(ScenarioOutline {
                name: scenario.name.clone(),
                description: scenario.description.clone(),
                tags: scenario.tags.clone(),
                steps,
                examples: scenario.examples.iter().map(Example::from).collect(),
                hidden: false,
            })
        }
    }
}

impl From<&gherkin::Examples> for Example {
    fn from(ex: &gherkin::Examples) -> Self {
        Self {
            name: ex.name.clone(),
            description: ex.description.clone(),
            tags: ex.tags.clone(),
            table: ex
                .table
                .as_ref()
                .map(TableArgument::from_gherkin)
                .unwrap_or_default(),
        }
    }
}

impl From<&gherkin::Feature> for Feature {
    fn from(feature: &gherkin::Feature) -> Self {
        // Scenarios grouped under `Rule`s are flattened into the element
        // list, in declaration order.
        let elements = feature
            .scenarios
            .iter()
            .chain(feature.rules.iter().flat_map(|r| r.scenarios.iter()))
            .map(FeatureElement::from)
            .collect();
        Self {
            name: feature.name.clone(),
            description: feature.description.clone(),
            tags: feature.tags.clone(),
            elements,
            hidden: false,
        }
    }
}
