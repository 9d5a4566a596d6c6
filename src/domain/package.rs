//! Pricing package tiers offered on the demo request form.

use std::fmt;

/// Generic label for package codes outside the known tiers.
pub const FALLBACK_PACKAGE_LABEL: &str = "Forfait non précisé";

/// The pricing plan a prospect is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackageTier {
    Starter,
    Pro,
    Enterprise,
    #[default]
    Unknown,
}

impl PackageTier {
    pub const ALL: [PackageTier; 4] = [Self::Starter, Self::Pro, Self::Enterprise, Self::Unknown];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Enterprise => "entreprise",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Starter => "Starter (~50 Commandes/Mois)",
            Self::Pro => "Pro (~150 Commandes/Mois)",
            Self::Enterprise => "Entreprise (~300 Commandes/Mois)",
            Self::Unknown => "Je ne sais pas encore",
        }
    }

    /// Label for a raw package code, trimmed first, falling back for unknown codes.
    pub fn resolve_label(code: &str) -> &'static str {
        Self::from_code(code.trim())
            .map(Self::label)
            .unwrap_or(FALLBACK_PACKAGE_LABEL)
    }
}

impl fmt::Display for PackageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
