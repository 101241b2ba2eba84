/*!
 * Format kinds.
 *
 * Every content item carries one tag from a fixed set. Tags are read from
 * fragment files and project files as plain strings, so parsing is total:
 * anything unrecognized is kept verbatim as `FormatKind::Other` and rendered
 * as an inert comment by the compiler.
 */

use std::fmt;
use std::str::FromStr;

/// Tag of a content item
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatKind {
    HeaderOne,
    HeaderOneCap,
    HeaderOneLowercase,
    HeaderTwo,
    HeaderThree,
    PsalmTitle,
    CanticleTitle,
    HymnTitle,
    HymnHeader,
    Antiphon,
    /// Antiphon with a numeric label carried in `extra`
    AntiphonNumbered,
    Dropcap,
    Verse,
    Gloria,
    Rubric,
    Versicle,
    Response,
    HymnStanza,
    Capitulum,
    CapitulumHeader,
    ScriptureRef,
    Collect,
    Lesson,
    Text,
    Rule,
    ThickRule,
    PageBreak,
    /// Boundary between front matter and the numbered body
    TocStart,
    /// Toggles between single-column and two-column layout
    SingleColumn,
    Image,
    /// Unrecognized tag, kept as written
    Other(String),
}

impl FormatKind {
    /// Every known kind, in the order they are offered to users
    pub const KNOWN: [FormatKind; 30] = [
        FormatKind::HeaderOne,
        FormatKind::HeaderOneCap,
        FormatKind::HeaderOneLowercase,
        FormatKind::HeaderTwo,
        FormatKind::HeaderThree,
        FormatKind::PsalmTitle,
        FormatKind::CanticleTitle,
        FormatKind::HymnTitle,
        FormatKind::HymnHeader,
        FormatKind::Antiphon,
        FormatKind::AntiphonNumbered,
        FormatKind::Dropcap,
        FormatKind::Verse,
        FormatKind::Gloria,
        FormatKind::Rubric,
        FormatKind::Versicle,
        FormatKind::Response,
        FormatKind::HymnStanza,
        FormatKind::Capitulum,
        FormatKind::CapitulumHeader,
        FormatKind::ScriptureRef,
        FormatKind::Collect,
        FormatKind::Lesson,
        FormatKind::Text,
        FormatKind::Rule,
        FormatKind::ThickRule,
        FormatKind::PageBreak,
        FormatKind::TocStart,
        FormatKind::SingleColumn,
        FormatKind::Image,
    ];

    /// Parse a tag. Never fails: unknown tags become `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => Self::HeaderOne,
            "h1cap" => Self::HeaderOneCap,
            "h1lowercase" => Self::HeaderOneLowercase,
            "h2" => Self::HeaderTwo,
            "h3" => Self::HeaderThree,
            "psalmtitle" => Self::PsalmTitle,
            "canticletitle" => Self::CanticleTitle,
            "hymntitle" => Self::HymnTitle,
            "hymnheader" => Self::HymnHeader,
            "antiphon" => Self::Antiphon,
            "antiphonnum" => Self::AntiphonNumbered,
            "dropcap" => Self::Dropcap,
            "verse" => Self::Verse,
            "gloria" => Self::Gloria,
            "rubric" => Self::Rubric,
            "V" => Self::Versicle,
            "R" => Self::Response,
            "hymn" => Self::HymnStanza,
            "capit" => Self::Capitulum,
            "capitheader" => Self::CapitulumHeader,
            "scriptureref" => Self::ScriptureRef,
            "collect" => Self::Collect,
            "lesson" => Self::Lesson,
            "text" => Self::Text,
            "rule" => Self::Rule,
            "thickrule" => Self::ThickRule,
            "pagebreak" => Self::PageBreak,
            "tocstart" => Self::TocStart,
            "singlecol" => Self::SingleColumn,
            "image" => Self::Image,
            other => Self::Other(other.to_string()),
        }
    }

    /// The tag as written in fragment and project files
    pub fn tag(&self) -> &str {
        match self {
            Self::HeaderOne => "h1",
            Self::HeaderOneCap => "h1cap",
            Self::HeaderOneLowercase => "h1lowercase",
            Self::HeaderTwo => "h2",
            Self::HeaderThree => "h3",
            Self::PsalmTitle => "psalmtitle",
            Self::CanticleTitle => "canticletitle",
            Self::HymnTitle => "hymntitle",
            Self::HymnHeader => "hymnheader",
            Self::Antiphon => "antiphon",
            Self::AntiphonNumbered => "antiphonnum",
            Self::Dropcap => "dropcap",
            Self::Verse => "verse",
            Self::Gloria => "gloria",
            Self::Rubric => "rubric",
            Self::Versicle => "V",
            Self::Response => "R",
            Self::HymnStanza => "hymn",
            Self::Capitulum => "capit",
            Self::CapitulumHeader => "capitheader",
            Self::ScriptureRef => "scriptureref",
            Self::Collect => "collect",
            Self::Lesson => "lesson",
            Self::Text => "text",
            Self::Rule => "rule",
            Self::ThickRule => "thickrule",
            Self::PageBreak => "pagebreak",
            Self::TocStart => "tocstart",
            Self::SingleColumn => "singlecol",
            Self::Image => "image",
            Self::Other(tag) => tag,
        }
    }

    // @returns: Short human description of the kind
    pub fn description(&self) -> &'static str {
        match self {
            Self::HeaderOne => "Main heading",
            Self::HeaderOneCap => "Main heading (table of contents, capitals)",
            Self::HeaderOneLowercase => "Main heading (table of contents, lowercase)",
            Self::HeaderTwo => "Subheading",
            Self::HeaderThree => "Section heading",
            Self::PsalmTitle => "Psalm title",
            Self::CanticleTitle => "Canticle title",
            Self::HymnTitle => "Hymn title",
            Self::HymnHeader => "Hymn heading (bold)",
            Self::Antiphon => "Antiphon",
            Self::AntiphonNumbered => "Antiphon with number",
            Self::Dropcap => "Verse with drop capital",
            Self::Verse => "Verse",
            Self::Gloria => "Gloria Patri",
            Self::Rubric => "Rubric",
            Self::Versicle => "Versicle (V)",
            Self::Response => "Response (R)",
            Self::HymnStanza => "Hymn stanza",
            Self::Capitulum => "Short reading",
            Self::CapitulumHeader => "Short reading heading",
            Self::ScriptureRef => "Scripture reference",
            Self::Collect => "Collect",
            Self::Lesson => "Lesson heading",
            Self::Text => "Plain text",
            Self::Rule => "Thin rule",
            Self::ThickRule => "Thick rule",
            Self::PageBreak => "Page break",
            Self::TocStart => "Table of contents start",
            Self::SingleColumn => "Single/two column toggle",
            Self::Image => "Image",
            Self::Other(_) => "Unknown kind",
        }
    }

    /// Whether this kind is a structural marker whose text fields are ignored
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Self::Rule | Self::ThickRule | Self::PageBreak | Self::TocStart | Self::SingleColumn
        )
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for FormatKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}
