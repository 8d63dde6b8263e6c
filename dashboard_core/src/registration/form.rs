use serde::{Deserialize, Serialize};

/// The name of the password field in the submitted form.
pub const PASSWORD_FIELD: &str = "password";

/// The name of the confirmation field in the submitted form.
pub const MATCHING_PASSWORD_FIELD: &str = "matchingPassword";

/// Form fields as name/value pairs, in the order they appear on the page.
/// Names may repeat (e.g. multiple checkboxes with the same name.) This
/// serializes as a sequence of pairs, which is what URL-encoding expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(Vec<(String, String)>);

impl FormData {
    /// An empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field after all the others.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// The value of the first field with this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// All fields, in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// How many fields there are
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A form control, reduced to what decides whether it's submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control<'a> {
    /// The input's `type`, or the element's type for selects and textareas
    /// (`select-one`, `select-multiple`, `textarea`)
    pub kind: &'a str,

    /// The `name` attribute
    pub name: &'a str,

    /// Whether the control matches `:disabled`, which includes being inside a
    /// disabled `<fieldset>`
    pub disabled: bool,

    /// Only meaningful for checkboxes and radios
    pub checked: bool,
}

impl Control<'_> {
    /// Does this control contribute to the submission? It needs a name and
    /// must be enabled. Buttons and file inputs never count; checkboxes and
    /// radios count only when checked.
    pub fn is_successful(&self) -> bool {
        if self.name.is_empty() || self.disabled {
            return false;
        }

        match self.kind.to_ascii_lowercase().as_str() {
            "submit" | "button" | "reset" | "image" | "file" => false,
            "checkbox" | "radio" => self.checked,
            _ => true,
        }
    }
}

/// Submitted values use `\r\n` line endings.
pub fn normalize_newlines(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\n', "\r\n")
}

impl FormData {
    /// Add a control's values (one per selected option for a select) if the
    /// control is successful.
    pub fn push_control<'v, I>(&mut self, control: &Control<'_>, values: I)
    where
        I: IntoIterator<Item = &'v str>,
    {
        if !control.is_successful() {
            return;
        }

        for value in values {
            self.push(control.name, normalize_newlines(value));
        }
    }
}

impl<N, V> FromIterator<(N, V)> for FormData
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// The values of the password field and its confirmation, as typed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Passwords {
    /// What's in `#password`
    pub password: String,

    /// What's in `#matchPassword`
    pub match_password: String,
}

impl Passwords {
    /// Construct from the two field values
    pub fn new(password: impl Into<String>, match_password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            match_password: match_password.into(),
        }
    }

    /// Take the passwords out of a submitted form. Missing fields count as
    /// empty.
    pub fn from_form(form: &FormData) -> Self {
        Self::new(
            form.get(PASSWORD_FIELD).unwrap_or_default(),
            form.get(MATCHING_PASSWORD_FIELD).unwrap_or_default(),
        )
    }

    /// Exact string equality. No trimming or normalization.
    pub fn matches(&self) -> bool {
        self.password == self.match_password
    }
}

impl core::fmt::Debug for Passwords {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Passwords")
            .field("matches", &self.matches())
            .finish_non_exhaustive()
    }
}
