//! What a flow asks the page to show and where it asks it to go.

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    /// A success toast with only a title.
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: title.into(),
            description: None,
        }
    }

    /// An error toast with only a title.
    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: title.into(),
            description: None,
        }
    }

    /// Attach a description line.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A client-side route change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Replace the current history entry.
    Replace(String),
}

/// Result of submitting a form through a flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowOutcome {
    pub toast: Option<Toast>,
    pub navigation: Option<Navigation>,
    /// Field messages from client-side validation; nothing was sent.
    pub field_errors: Vec<true_feedback_core::schemas::FieldError>,
}

impl FlowOutcome {
    pub(crate) fn toast(toast: Toast) -> Self {
        Self {
            toast: Some(toast),
            ..Self::default()
        }
    }

    pub(crate) fn navigate(toast: Toast, path: impl Into<String>) -> Self {
        Self {
            toast: Some(toast),
            navigation: Some(Navigation::Replace(path.into())),
            field_errors: Vec::new(),
        }
    }

    pub(crate) fn invalid(errors: &true_feedback_core::schemas::ValidationErrors) -> Self {
        Self {
            field_errors: errors.errors().to_vec(),
            ..Self::default()
        }
    }
}
