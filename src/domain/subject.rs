//! Contact form subject taxonomy.

use std::fmt;

/// Generic label for subject codes outside the taxonomy.
pub const FALLBACK_SUBJECT_LABEL: &str = "Contact";

/// What a contact message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSubject {
    General,
    Support,
    Partnership,
    Complaint,
    Other,
}

impl ContactSubject {
    /// Every subject, in the order the form lists them.
    pub const ALL: [ContactSubject; 5] = [
        Self::General,
        Self::Support,
        Self::Partnership,
        Self::Complaint,
        Self::Other,
    ];

    /// Parse a wire code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subject| subject.code() == code)
    }

    /// The code sent by the website.
    pub fn code(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Support => "support",
            Self::Partnership => "partenariat",
            Self::Complaint => "reclamation",
            Self::Other => "autre",
        }
    }

    /// Human-readable label used in notification subjects.
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "Question générale",
            Self::Support => "Support technique",
            Self::Partnership => "Demande de partenariat",
            Self::Complaint => "Réclamation",
            Self::Other => "Autre",
        }
    }

    /// Resolve the label for a raw subject code.
    ///
    /// The code is trimmed first. `autre` uses the custom subject when one was
    /// given. Codes outside the taxonomy fall back to [`FALLBACK_SUBJECT_LABEL`].
    pub fn resolve_label(code: &str, custom: Option<&str>) -> String {
        match Self::from_code(code.trim()) {
            Some(Self::Other) => custom
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(Self::Other.label())
                .to_string(),
            Some(subject) => subject.label().to_string(),
            None => FALLBACK_SUBJECT_LABEL.to_string(),
        }
    }
}

impl fmt::Display for ContactSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
