/// Value shape a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, trimmed on the way in.
    Text,
    /// Positive whole number. Accepts JSON numbers and numeric strings.
    Integer,
    /// One of a fixed set of names, compared exactly.
    Choice(&'static [&'static str]),
    /// Absolute URL.
    Url,
}

/// Rule set for a single field. Built with `const fn` so schemas can live in
/// statics next to their entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub read_only: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    /// Initial value of an empty draft.
    pub default: Option<&'static str>,
    too_short: Option<&'static str>,
    too_long: Option<&'static str>,
}

impl FieldRule {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            read_only: false,
            min_len: None,
            max_len: None,
            default: None,
            too_short: None,
            too_long: None,
        }
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub const fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(name, label, FieldKind::Choice(options))
    }

    pub const fn url(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Url)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub const fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    pub const fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub const fn too_short(mut self, message: &'static str) -> Self {
        self.too_short = Some(message);
        self
    }

    pub const fn too_long(mut self, message: &'static str) -> Self {
        self.too_long = Some(message);
        self
    }

    pub(crate) fn too_short_message(&self) -> String {
        match self.too_short {
            Some(message) => message.to_string(),
            None => format!(
                "String must contain at least {} character(s)",
                self.min_len.unwrap_or(1)
            ),
        }
    }

    pub(crate) fn too_long_message(&self) -> String {
        match self.too_long {
            Some(message) => message.to_string(),
            None => format!(
                "String must contain at most {} character(s)",
                self.max_len.unwrap_or(0)
            ),
        }
    }
}
