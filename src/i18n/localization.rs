use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder pattern is valid")
});

/// Variable bindings for `$name` placeholders.
///
/// Names may be given with or without the leading `$`. A binding set through
/// [`Vars::set_opt`] with `None` marks a value that could not be produced; a
/// template that uses it falls back to the message key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vars {
    values: HashMap<String, Option<String>>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(name: &str) -> String {
        name.strip_prefix('$').unwrap_or(name).to_string()
    }

    pub fn set(&mut self, name: &str, value: impl ToString) -> &mut Self {
        self.values.insert(Self::normalize(name), Some(value.to_string()));
        self
    }

    pub fn set_opt<T: ToString>(&mut self, name: &str, value: Option<T>) -> &mut Self {
        self.values.insert(Self::normalize(name), value.map(|v| v.to_string()));
        self
    }

    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.set(name, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: AsRef<str>, V: ToString> FromIterator<(K, V)> for Vars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Vars::new();
        for (k, v) in iter {
            vars.set(k.as_ref(), v);
        }
        vars
    }
}

/// Substitute bound placeholders in `template`.
///
/// Unbound placeholders stay literal and values are inserted verbatim. Returns
/// `None` when a placeholder in `template` is bound without a value.
pub fn interpolate(template: &str, vars: &Vars) -> Option<String> {
    if vars.is_empty() {
        return Some(template.to_string());
    }
    let mut missing = false;
    let replaced = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        match vars.values.get(&caps[1]) {
            Some(Some(value)) => value.clone(),
            Some(None) => {
                missing = true;
                caps[0].to_string()
            }
            None => caps[0].to_string(),
        }
    });
    if missing {
        return None;
    }
    Some(replaced.into_owned())
}
