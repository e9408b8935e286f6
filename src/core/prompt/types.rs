/// Select one option from a list.
pub struct SelectPrompt {
    pub question: String,
    pub options: Vec<SelectOption>,
    pub default_index: Option<usize>,
}

pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Free text input.
pub struct TextPrompt {
    pub question: String,
    pub default: Option<String>,
}
