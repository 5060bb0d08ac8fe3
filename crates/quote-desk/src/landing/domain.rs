use serde::Serialize;

use crate::forms::FormKey;

/// What a landing page is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingKind {
    Carrier,
    Industry,
    Product,
}

impl LandingKind {
    pub const fn label(self) -> &'static str {
        match self {
            LandingKind::Carrier => "carrier",
            LandingKind::Industry => "industry",
            LandingKind::Product => "product",
        }
    }
}

/// Brand palette applied to the hero and call-to-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTheme {
    Navy,
    Forest,
    Crimson,
    Amber,
    Slate,
}

impl ColorTheme {
    pub const fn primary(self) -> &'static str {
        match self {
            ColorTheme::Navy => "#1e3a8a",
            ColorTheme::Forest => "#166534",
            ColorTheme::Crimson => "#9f1239",
            ColorTheme::Amber => "#b45309",
            ColorTheme::Slate => "#334155",
        }
    }

    pub const fn accent(self) -> &'static str {
        match self {
            ColorTheme::Navy => "#f59e0b",
            ColorTheme::Forest => "#facc15",
            ColorTheme::Crimson => "#fde68a",
            ColorTheme::Amber => "#0f766e",
            ColorTheme::Slate => "#38bdf8",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub title: &'static str,
    pub summary: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Everything that differs between two landing pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingPage {
    pub slug: &'static str,
    pub partner: &'static str,
    pub kind: LandingKind,
    pub theme: ColorTheme,
    pub headline: &'static str,
    pub tagline: &'static str,
    pub coverages: &'static [Coverage],
    pub faqs: &'static [Faq],
    /// Quote form embedded below the fold.
    pub form: FormKey,
}

impl LandingPage {
    pub fn path(&self) -> String {
        format!("/landing/{}", self.slug)
    }
}

/// Entry returned by `GET /api/landing-pages`.
#[derive(Debug, Clone, Serialize)]
pub struct LandingSummary {
    pub slug: &'static str,
    pub partner: &'static str,
    pub kind: LandingKind,
    pub form: FormKey,
    pub path: String,
}

impl From<&LandingPage> for LandingSummary {
    fn from(page: &LandingPage) -> Self {
        Self {
            slug: page.slug,
            partner: page.partner,
            kind: page.kind,
            form: page.form,
            path: page.path(),
        }
    }
}
