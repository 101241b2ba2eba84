/*!
 * Static mapping from format kinds to LaTeX command templates.
 *
 * Each mapped kind has a two-column and a single-column template. Templates
 * use three positional placeholders:
 * - `{l}`: primary text
 * - `{c}`: secondary text
 * - `{a}`: extra
 *
 * Substitution is a single left-to-right pass, so placeholder-like text inside
 * the substituted fields is copied through untouched.
 */

use crate::content::FormatKind;

/// The pair of templates used for one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplatePair {
    pub two_column: &'static str,
    pub single_column: &'static str,
}

impl TemplatePair {
    const fn new(two_column: &'static str, single_column: &'static str) -> Self {
        Self { two_column, single_column }
    }

    /// Select the template for the current layout
    pub fn select(&self, single_column: bool) -> &'static str {
        if single_column {
            self.single_column
        } else {
            self.two_column
        }
    }
}

/// How the engine renders one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// Instantiate the layout's template
    Template(TemplatePair),
    /// Number-first antiphon, the single-column form drops the primary text
    NumberedAntiphon,
    /// Layout-specific page break command
    PageBreak,
    /// Table-of-contents boundary, resumes two-column layout
    TocStart,
    /// Toggle between the two layouts
    ColumnToggle,
    /// Full-width image from the primary text
    Image,
    /// Inert comment naming the tag and both text fields
    Unknown,
}

/// Classify `kind`. Every kind has exactly one rendering.
pub fn rendering(kind: &FormatKind) -> Rendering {
    let pair = match kind {
        FormatKind::HeaderOne => TemplatePair::new(
            r"\psHeaderOne{{l}}{{c}}",
            r"\psSingleHeaderOne{{c}}",
        ),
        FormatKind::HeaderOneCap => TemplatePair::new(
            r"\psHeaderOneCap{{l}}{{c}}",
            r"\psSingleHeaderOneCap{{l}}{{c}}",
        ),
        FormatKind::HeaderOneLowercase => TemplatePair::new(
            r"\psHeaderOneLowercase{{l}}{{c}}",
            r"\psSingleHeaderOneLowercase{{l}}{{c}}",
        ),
        FormatKind::HeaderTwo => TemplatePair::new(
            r"\psHeaderTwo{{l}}{{c}}",
            r"\psSingleHeaderTwo{{c}}",
        ),
        FormatKind::HeaderThree => TemplatePair::new(
            r"\psHeaderThree{{l}}{{c}}",
            r"\psSingleHeaderThree{{c}}",
        ),
        FormatKind::PsalmTitle => TemplatePair::new(
            r"\psPsalmTitle{{l}}{{c}}",
            r"\psSinglePsalmTitle{{c}}",
        ),
        FormatKind::CanticleTitle => TemplatePair::new(
            r"\psCanticleTitle{{l}}{{c}}",
            r"\psSingleCanticleTitle{{c}}",
        ),
        FormatKind::HymnTitle => TemplatePair::new(
            r"\psHymnTitle{{l}}{{c}}",
            r"\psSingleHymnTitle{{c}}",
        ),
        FormatKind::HymnHeader => TemplatePair::new(
            r"\psHymnHeader{{l}}{{c}}",
            r"\psSingleHymnHeader{{c}}",
        ),
        FormatKind::Antiphon => TemplatePair::new(
            r"\psAntiphonRepeat{{l}}{{c}}",
            r"\psSingleAntiphon{{c}}",
        ),
        FormatKind::Dropcap => TemplatePair::new(
            r"\psVerseDropcap{{l}}{{c}}",
            r"\psSingleVerseDropcap{{c}}",
        ),
        FormatKind::Verse => TemplatePair::new(
            r"\psVerse{{l}}{{c}}",
            r"\psSingleVerse{{c}}",
        ),
        FormatKind::Gloria => TemplatePair::new(
            r"\psGloria{{l}}{{c}}",
            r"\psSingleGloria{{c}}",
        ),
        FormatKind::Rubric => TemplatePair::new(
            r"\psRubric{{l}}{{c}}",
            r"\psSingleRubric{{c}}",
        ),
        FormatKind::Versicle => TemplatePair::new(
            r"\psVR{V}{{l}}{{c}}",
            r"\psSingleVR{V}{{c}}",
        ),
        FormatKind::Response => TemplatePair::new(
            r"\psVR{R}{{l}}{{c}}",
            r"\psSingleVR{R}{{c}}",
        ),
        FormatKind::HymnStanza => TemplatePair::new(
            r"\psHymnStanza{{l}}{{c}}",
            r"\psSingleHymnStanza{{c}}",
        ),
        FormatKind::Capitulum => TemplatePair::new(
            r"\psCapit{{l}}{{c}}",
            r"\psSingleCapit{{c}}",
        ),
        FormatKind::CapitulumHeader => TemplatePair::new(
            r"\psCapitHeader{{l}}{{c}}",
            r"\psSingleCapitHeader{{c}}",
        ),
        FormatKind::ScriptureRef => TemplatePair::new(
            r"\psScriptureRef{{l}}{{c}}",
            r"\psSingleScriptureRef{{c}}",
        ),
        FormatKind::Collect => TemplatePair::new(
            r"\psCollect{{l}}{{c}}",
            r"\psSingleCollect{{c}}",
        ),
        FormatKind::Lesson => TemplatePair::new(
            r"\psLesson{{l}}{{c}}",
            r"\psSingleLesson{{c}}",
        ),
        FormatKind::Text => TemplatePair::new(
            r"\psText{{l}}{{c}}",
            r"\psSingleText{{c}}",
        ),
        FormatKind::Rule => TemplatePair::new(r"\psThinRule", r"\psSingleThinRule"),
        FormatKind::ThickRule => TemplatePair::new(r"\psThickRule", r"\psSingleThickRule"),
        FormatKind::AntiphonNumbered => return Rendering::NumberedAntiphon,
        FormatKind::PageBreak => return Rendering::PageBreak,
        FormatKind::TocStart => return Rendering::TocStart,
        FormatKind::SingleColumn => return Rendering::ColumnToggle,
        FormatKind::Image => return Rendering::Image,
        FormatKind::Other(_) => return Rendering::Unknown,
    };

    Rendering::Template(pair)
}

/// Look up the templates for `kind`.
///
/// Returns `None` for kinds the engine renders with dedicated rules
/// (numbered antiphons, images, structural markers) and for unknown kinds.
pub fn templates(kind: &FormatKind) -> Option<TemplatePair> {
    match rendering(kind) {
        Rendering::Template(pair) => Some(pair),
        _ => None,
    }
}

/// Substitute `{l}`, `{c}` and `{a}` in `template`
pub fn instantiate(template: &str, primary: &str, secondary: &str, extra: &str) -> String {
    let mut output = String::with_capacity(template.len() + primary.len() + secondary.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let candidate = &rest[open..];

        let value = match candidate.get(..3) {
            Some("{l}") => Some(primary),
            Some("{c}") => Some(secondary),
            Some("{a}") => Some(extra),
            _ => None,
        };

        match value {
            Some(value) => {
                output.push_str(value);
                rest = &candidate[3..];
            }
            None => {
                output.push('{');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}
