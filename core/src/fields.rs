//! Submission data: which name/value pairs a form submits.
//!
//! # Design
//! Caller data comes in two shapes that are not interchangeable. A map keeps
//! one entry per key, so assigning an existing key replaces its value in
//! place. A pair list keeps every entry, duplicates included. Both shapes
//! live in `UserData` so the merge rules stay visible at the type level.
//!
//! A `None` value removes a key: the form field of that name is suppressed
//! and nothing is emitted for the entry itself.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dom::{Element, Form};

/// One value or several values submitted under the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    pub fn as_slice(&self) -> &[String] {
        match self {
            FieldValue::Single(value) => std::slice::from_ref(value),
            FieldValue::Multiple(values) => values,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multiple(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// Caller-supplied submission data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserData {
    /// Unique keys; assigning an existing key keeps its position.
    Map(IndexMap<String, Option<FieldValue>>),
    /// Ordered pairs; duplicate keys are all submitted.
    Pairs(Vec<(String, Option<FieldValue>)>),
}

impl Default for UserData {
    fn default() -> Self {
        UserData::Map(IndexMap::new())
    }
}

impl UserData {
    pub fn new_map() -> Self {
        UserData::Map(IndexMap::new())
    }

    pub fn new_pairs() -> Self {
        UserData::Pairs(Vec::new())
    }

    /// Set `key` to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.push(key.into(), Some(value.into()));
        self
    }

    /// Remove `key` from the submission.
    pub fn without(mut self, key: impl Into<String>) -> Self {
        self.push(key.into(), None);
        self
    }

    /// Map: insert or replace. Pairs: append.
    pub fn push(&mut self, key: String, value: Option<FieldValue>) {
        match self {
            UserData::Map(map) => {
                map.insert(key, value);
            }
            UserData::Pairs(pairs) => pairs.push((key, value)),
        }
    }

    pub fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            UserData::Map(map) => Box::new(map.keys().map(String::as_str)),
            UserData::Pairs(pairs) => Box::new(pairs.iter().map(|(key, _)| key.as_str())),
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, Option<&FieldValue>)> + '_> {
        match self {
            UserData::Map(map) => Box::new(map.iter().map(|(k, v)| (k.as_str(), v.as_ref()))),
            UserData::Pairs(pairs) => {
                Box::new(pairs.iter().map(|(k, v)| (k.as_str(), v.as_ref())))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            UserData::Map(map) => map.is_empty(),
            UserData::Pairs(pairs) => pairs.is_empty(),
        }
    }
}

/// True for `textarea`, `select` and every `input` except submit, image and
/// reset; checkboxes and radios only when they carry `checked`.
pub fn is_submittable<E: Element>(element: &E) -> bool {
    match element.tag_name() {
        "textarea" | "select" => true,
        "input" => match element.attr("type") {
            None => true,
            Some(kind) => {
                let is = |name: &str| kind.eq_ignore_ascii_case(name);
                if is("submit") || is("image") || is("reset") {
                    false
                } else if is("checkbox") || is("radio") {
                    element.has_attr("checked")
                } else {
                    true
                }
            }
        },
        _ => false,
    }
}

/// Values a submittable control contributes. Empty for selects that submit
/// nothing.
pub fn control_values<E: Element>(control: &E) -> Vec<String> {
    match control.tag_name() {
        "select" => select_values(control),
        "textarea" => vec![control.text_content()],
        _ => {
            let checkable = control.attr("type").is_some_and(|kind| {
                kind.eq_ignore_ascii_case("checkbox") || kind.eq_ignore_ascii_case("radio")
            });
            let default = if checkable { "on" } else { "" };
            vec![control.attr("value").unwrap_or(default).to_string()]
        }
    }
}

fn select_values<E: Element>(select: &E) -> Vec<String> {
    let options: Vec<E> = select
        .descendants()
        .into_iter()
        .filter(|element| element.tag_name() == "option")
        .collect();
    let selected = options.iter().filter(|option| option.has_attr("selected"));
    if select.has_attr("multiple") {
        return selected.map(option_value).collect();
    }
    // Browsers keep the last selected option of a single-choice select.
    selected
        .last()
        .or_else(|| options.first())
        .map(option_value)
        .into_iter()
        .collect()
}

fn option_value<E: Element>(option: &E) -> String {
    match option.attr("value") {
        Some(value) => value.to_string(),
        None => option.text_content().trim().to_string(),
    }
}

/// Ordered (name, value) pairs submitted by `form`.
///
/// Form fields come first, in document order, skipping every name present in
/// the effective user data. User data follows in its own order. The clicked
/// control's name and value are merged into the user data beforehand.
pub fn collect_fields<E: Element>(
    form: &Form<E>,
    data: Option<&UserData>,
    click: Option<&E>,
) -> Vec<(String, String)> {
    let mut data = data.cloned().unwrap_or_default();
    if let Some(control) = click {
        if let Some(name) = control.non_empty_attr("name") {
            let value = control.attr("value").unwrap_or_default();
            trace!(name, value, "adding clicked control to submission data");
            data.push(name.to_string(), Some(value.into()));
        }
    }
    let overridden: HashSet<&str> = data.keys().collect();

    let mut fields = Vec::new();
    for control in form.descendants().iter().filter(|e| is_submittable(*e)) {
        let Some(name) = control.non_empty_attr("name") else {
            continue;
        };
        if overridden.contains(name) {
            continue;
        }
        for value in control_values(control) {
            fields.push((name.to_string(), value));
        }
    }
    let from_form = fields.len();

    for (key, value) in data.iter() {
        let Some(value) = value else {
            continue;
        };
        for value in value.as_slice() {
            fields.push((key.to_string(), value.clone()));
        }
    }
    debug!(from_form, from_data = fields.len() - from_form, "collected form fields");
    fields
}
