//! Binding storage, grouped by the clause category that owns the placeholders

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{Error, Result, Value};

/// The clause category a binding belongs to.
///
/// Flattening visits categories in [`BindingCategory::ALL`] order, which
/// matches the order the grammar emits their placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingCategory {
    Where,
}

impl BindingCategory {
    pub const ALL: [BindingCategory; 1] = [BindingCategory::Where];

    pub fn as_str(&self) -> &'static str {
        match self {
            BindingCategory::Where => "where",
        }
    }

    fn index(self) -> usize {
        match self {
            BindingCategory::Where => 0,
        }
    }
}

impl Display for BindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindingCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BindingCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::invalid_argument(format!("Invalid binding type: {s}.")))
    }
}

/// Types that name a binding category
pub trait IntoBindingCategory {
    fn into_binding_category(self) -> Result<BindingCategory>;
}

impl IntoBindingCategory for BindingCategory {
    fn into_binding_category(self) -> Result<BindingCategory> {
        Ok(self)
    }
}

impl IntoBindingCategory for &str {
    fn into_binding_category(self) -> Result<BindingCategory> {
        self.parse()
    }
}

/// Ordered bindings per category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    lists: [Vec<Value>; BindingCategory::ALL.len()],
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings recorded for one category, in insertion order
    pub fn get(&self, category: BindingCategory) -> &[Value] {
        &self.lists[category.index()]
    }

    pub(crate) fn push(&mut self, category: BindingCategory, value: Value) {
        self.lists[category.index()].push(value);
    }

    pub(crate) fn extend<I>(&mut self, category: BindingCategory, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.lists[category.index()].extend(values);
    }

    /// All bindings, category by category
    pub fn flatten(&self) -> Vec<Value> {
        BindingCategory::ALL
            .iter()
            .flat_map(|category| self.get(*category).iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_category() {
        assert_eq!("where".parse::<BindingCategory>().unwrap(), BindingCategory::Where);
        assert_eq!(BindingCategory::Where.to_string(), "where");
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "join".parse::<BindingCategory>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Invalid argument: Invalid binding type: join.");
    }

    #[test]
    fn test_flatten_preserves_insertion_order() {
        let mut bindings = Bindings::new();
        bindings.push(BindingCategory::Where, Value::from(1));
        bindings.extend(BindingCategory::Where, vec![Value::from("a"), Value::from(2)]);

        assert_eq!(bindings.len(), 3);
        assert_eq!(
            bindings.flatten(),
            vec![Value::I32(1), Value::from("a"), Value::I32(2)]
        );
    }

    #[test]
    fn test_empty_bindings() {
        let bindings = Bindings::new();
        assert!(bindings.is_empty());
        assert!(bindings.get(BindingCategory::Where).is_empty());
        assert!(bindings.flatten().is_empty());
    }
}
