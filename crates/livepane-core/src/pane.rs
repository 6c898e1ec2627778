#![forbid(unsafe_code)]

//! Pane roles, numeric pane identifiers, and the custom-language catalog.
//!
//! Identifiers are part of the shared-URL contract: `1..=4` are the standard
//! panes and `5..=13` select a custom-language pane. Renumbering any entry
//! breaks links that were already shared.

use serde::{Deserialize, Serialize};

/// Language tag used by the custom pane when no custom language is active.
pub const PLAINTEXT: &str = "plaintext";

/// The closed set of pane roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneRole {
    Markup,
    Style,
    Script,
    Preview,
    Custom,
}

impl PaneRole {
    pub const ALL: [Self; 5] = [
        Self::Markup,
        Self::Style,
        Self::Script,
        Self::Preview,
        Self::Custom,
    ];

    /// Stable lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Markup => "markup",
            Self::Style => "style",
            Self::Script => "script",
            Self::Preview => "preview",
            Self::Custom => "custom",
        }
    }

    /// The editable pane backing this role, if any.
    #[must_use]
    pub const fn editor(self) -> Option<EditorPane> {
        match self {
            Self::Markup => Some(EditorPane::Markup),
            Self::Style => Some(EditorPane::Style),
            Self::Script => Some(EditorPane::Script),
            Self::Custom => Some(EditorPane::Custom),
            Self::Preview => None,
        }
    }
}

impl core::fmt::Display for PaneRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A pane that owns editable text content.
///
/// Declaration order is the field order of the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorPane {
    Markup,
    Style,
    Script,
    Custom,
}

impl EditorPane {
    pub const ALL: [Self; 4] = [Self::Markup, Self::Style, Self::Script, Self::Custom];

    #[must_use]
    pub const fn role(self) -> PaneRole {
        match self {
            Self::Markup => PaneRole::Markup,
            Self::Style => PaneRole::Style,
            Self::Script => PaneRole::Script,
            Self::Custom => PaneRole::Custom,
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether edits to this pane change the composite preview document.
    #[must_use]
    pub const fn feeds_preview(self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Language tag for the editor surface. The custom pane's tag depends on
    /// the active catalog entry, see [`CustomLanguage::language`].
    #[must_use]
    pub const fn default_language(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Style => "css",
            Self::Script => "javascript",
            Self::Custom => PLAINTEXT,
        }
    }

    /// Parse a pane label as used by host bindings (`"markup"`, `"html"`, ...).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "markup" | "html" => Some(Self::Markup),
            "style" | "css" => Some(Self::Style),
            "script" | "js" => Some(Self::Script),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl core::fmt::Display for EditorPane {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.role().label())
    }
}

/// One entry of the fixed custom-language catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomLanguage {
    pub id: u8,
    pub name: &'static str,
    pub language: &'static str,
}

/// The custom-language catalog, ordered by id.
pub const CUSTOM_LANGUAGES: [CustomLanguage; 9] = [
    CustomLanguage::new(5, "csharp", "csharp"),
    CustomLanguage::new(6, "php", "php"),
    CustomLanguage::new(7, "python", "python"),
    CustomLanguage::new(8, "java", "java"),
    CustomLanguage::new(9, "json", "json"),
    CustomLanguage::new(10, "shell", "shell"),
    CustomLanguage::new(11, "sql", "sql"),
    CustomLanguage::new(12, "typescript", "typescript"),
    CustomLanguage::new(13, "xml", "xml"),
];

impl CustomLanguage {
    const fn new(id: u8, name: &'static str, language: &'static str) -> Self {
        Self { id, name, language }
    }

    /// Look up a catalog entry by pane id.
    #[must_use]
    pub fn find(id: PaneId) -> Option<&'static CustomLanguage> {
        CUSTOM_LANGUAGES.iter().find(|entry| entry.id == id.get())
    }

    /// Pane id of this entry.
    #[must_use]
    pub const fn pane_id(&self) -> PaneId {
        PaneId(self.id)
    }

    /// Icon asset path used to badge the custom pane.
    #[must_use]
    pub fn icon_path(&self) -> String {
        format!("/{}.svg", self.language)
    }
}

/// Error for numeric ids outside the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneIdError {
    Unknown(u32),
}

impl core::fmt::Display for PaneIdError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "unknown pane id: {id}"),
        }
    }
}

impl std::error::Error for PaneIdError {}

/// Numeric pane identifier as serialized in the active-set field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PaneId(u8);

impl PaneId {
    pub const MARKUP: Self = Self(1);
    pub const STYLE: Self = Self(2);
    pub const SCRIPT: Self = Self(3);
    pub const PREVIEW: Self = Self(4);

    /// The four standard panes in declaration order.
    pub const STANDARD: [Self; 4] = [Self::MARKUP, Self::STYLE, Self::SCRIPT, Self::PREVIEW];

    /// Smallest custom-language id.
    pub const FIRST_CUSTOM: u8 = 5;

    /// Validate a raw id against the enumeration.
    pub fn new(raw: u32) -> Result<Self, PaneIdError> {
        let known = (1..=4).contains(&raw) || CUSTOM_LANGUAGES.iter().any(|c| u32::from(c.id) == raw);
        if !known {
            return Err(PaneIdError::Unknown(raw));
        }
        // Range-checked above; every known id fits in a u8.
        Ok(Self(raw as u8))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_custom(self) -> bool {
        self.0 >= Self::FIRST_CUSTOM
    }

    #[must_use]
    pub const fn is_standard(self) -> bool {
        !self.is_custom()
    }

    #[must_use]
    pub const fn role(self) -> PaneRole {
        match self.0 {
            1 => PaneRole::Markup,
            2 => PaneRole::Style,
            3 => PaneRole::Script,
            4 => PaneRole::Preview,
            _ => PaneRole::Custom,
        }
    }

    /// Catalog entry for a custom id.
    #[must_use]
    pub fn custom_language(self) -> Option<&'static CustomLanguage> {
        CustomLanguage::find(self)
    }

    /// The standard pane id for a role; `None` for [`PaneRole::Custom`].
    #[must_use]
    pub const fn standard(role: PaneRole) -> Option<Self> {
        match role {
            PaneRole::Markup => Some(Self::MARKUP),
            PaneRole::Style => Some(Self::STYLE),
            PaneRole::Script => Some(Self::SCRIPT),
            PaneRole::Preview => Some(Self::PREVIEW),
            PaneRole::Custom => None,
        }
    }
}

impl TryFrom<u32> for PaneId {
    type Error = PaneIdError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PaneId> for u32 {
    fn from(id: PaneId) -> Self {
        u32::from(id.0)
    }
}

impl core::fmt::Display for PaneId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
