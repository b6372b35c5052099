//! Page content model loaded from `page.toml`.
//!
//! This is the "markup" of the landing page: every widget discovers its
//! members here. Any section may be absent; the matching widget then simply
//! does not initialize.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub(crate) const DEFAULT_PAGE: &str = include_str!("../defaults/page.toml");

/// Page sections in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Hero,
    Benefits,
    Ingredients,
    Dosage,
    Reviews,
    Faq,
    Cta,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Hero,
        SectionId::Benefits,
        SectionId::Ingredients,
        SectionId::Dosage,
        SectionId::Reviews,
        SectionId::Faq,
        SectionId::Cta,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "hero" => Some(Self::Hero),
            "benefits" => Some(Self::Benefits),
            "ingredients" => Some(Self::Ingredients),
            "dosage" => Some(Self::Dosage),
            "reviews" => Some(Self::Reviews),
            "faq" => Some(Self::Faq),
            "cta" => Some(Self::Cta),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::Benefits => "Benefits",
            Self::Ingredients => "Ingredients",
            Self::Dosage => "Dosage",
            Self::Reviews => "Reviews",
            Self::Faq => "FAQ",
            Self::Cta => "Buy",
        }
    }
}

/// Price, details line and header call-to-action label shown together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMapping {
    pub price: String,
    pub details: String,
    pub cta_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub target: SectionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub target: u64,
    #[serde(default)]
    pub suffix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benefit {
    #[serde(default)]
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabButtonDef {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabPaneDef {
    pub key: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredients {
    #[serde(default = "default_ingredients_title")]
    pub title: String,
    #[serde(default)]
    pub tabs: Vec<TabButtonDef>,
    #[serde(default)]
    pub panes: Vec<TabPaneDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DosageDef {
    pub min_age: u32,
    pub max_age: u32,
    #[serde(default)]
    pub initial_age: Option<u32>,
    #[serde(default = "default_threshold_age")]
    pub threshold_age: u32,
    #[serde(default = "default_low_dose")]
    pub low_dose: String,
    #[serde(default = "default_high_dose")]
    pub high_dose: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillDef {
    pub label: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub price: Option<PriceMapping>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillGroupDef {
    pub name: String,
    #[serde(default)]
    pub pills: Vec<PillDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cta {
    pub headline: String,
    pub base_price: PriceMapping,
    #[serde(default)]
    pub pill_groups: Vec<PillGroupDef>,
    #[serde(default)]
    pub button_label: Option<String>,
    #[serde(default)]
    pub lab_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabReport {
    pub title: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

/// Whole landing page content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub brand: String,
    #[serde(default)]
    pub nav: Vec<NavLink>,
    #[serde(default)]
    pub hero: Option<Hero>,
    #[serde(default)]
    pub benefits: Vec<Benefit>,
    #[serde(default)]
    pub ingredients: Option<Ingredients>,
    #[serde(default)]
    pub dosage: Option<DosageDef>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub faq: Vec<FaqItem>,
    #[serde(default)]
    pub cta: Option<Cta>,
    #[serde(default)]
    pub lab_report: Option<LabReport>,
    #[serde(default)]
    pub particles: Vec<String>,
    #[serde(default)]
    pub confetti_colors: Vec<String>,
}

/// Problem found while validating page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    Error(String),
    Warning(String),
}

impl ContentIssue {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Error(msg) | Self::Warning(msg) => msg,
        }
    }
}

impl PageContent {
    /// Parse the embedded default page
    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_PAGE).context("Failed to parse embedded page.toml")
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read page file: {:?}", path))?;
        Self::parse(&contents).context(format!("Failed to parse page file: {:?}", path))
    }

    /// Load an explicit file, else the data-dir `page.toml`, else the
    /// embedded default
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        let page_path = crate::config::Config::page_path()?;
        if page_path.exists() {
            Self::load_from_file(&page_path)
        } else {
            tracing::info!("No page.toml at {:?}, using embedded page", page_path);
            Self::embedded()
        }
    }

    /// Plain text of a section, used by the search overlay
    pub fn section_text(&self, section: SectionId) -> String {
        let mut parts: Vec<&str> = Vec::new();
        match section {
            SectionId::Hero => {
                if let Some(hero) = &self.hero {
                    parts.push(&hero.title);
                    parts.push(&hero.tagline);
                    parts.extend(hero.stats.iter().map(|s| s.label.as_str()));
                }
            }
            SectionId::Benefits => {
                for benefit in &self.benefits {
                    parts.push(&benefit.title);
                    parts.push(&benefit.text);
                }
            }
            SectionId::Ingredients => {
                if let Some(ingredients) = &self.ingredients {
                    parts.push(&ingredients.title);
                    parts.extend(ingredients.tabs.iter().map(|t| t.label.as_str()));
                    for pane in &ingredients.panes {
                        parts.extend(pane.items.iter().map(String::as_str));
                    }
                }
            }
            SectionId::Dosage => {
                if let Some(dosage) = &self.dosage {
                    parts.push("dosage calculator age");
                    parts.push(&dosage.low_dose);
                    parts.push(&dosage.high_dose);
                }
            }
            SectionId::Reviews => {
                for review in &self.reviews {
                    parts.push(&review.author);
                    parts.push(&review.text);
                }
            }
            SectionId::Faq => {
                for item in &self.faq {
                    parts.push(&item.question);
                    parts.push(&item.answer);
                }
            }
            SectionId::Cta => {
                if let Some(cta) = &self.cta {
                    parts.push(&cta.headline);
                    parts.push(&cta.base_price.details);
                    for group in &cta.pill_groups {
                        parts.push(&group.name);
                        parts.extend(group.pills.iter().map(|p| p.label.as_str()));
                    }
                }
            }
        }
        parts.join(" ")
    }

    /// Report structural problems. Errors stop a widget from initializing,
    /// warnings are cosmetic.
    pub fn validate(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        if self.brand.trim().is_empty() {
            issues.push(ContentIssue::Warning("Brand name is empty".to_string()));
        }

        if let Some(ingredients) = &self.ingredients {
            if ingredients.tabs.is_empty() {
                issues.push(ContentIssue::Error(
                    "Ingredients section has no tab buttons".to_string(),
                ));
            }
            for tab in &ingredients.tabs {
                if !ingredients.panes.iter().any(|p| p.key == tab.key) {
                    issues.push(ContentIssue::Warning(format!(
                        "Tab '{}' has no pane with key '{}'",
                        tab.label, tab.key
                    )));
                }
            }
            if ingredients.tabs.iter().filter(|t| t.default).count() > 1 {
                issues.push(ContentIssue::Warning(
                    "More than one default tab, the first wins".to_string(),
                ));
            }
        }

        if let Some(dosage) = &self.dosage {
            if dosage.min_age > dosage.max_age {
                issues.push(ContentIssue::Error(format!(
                    "Dosage min_age {} exceeds max_age {}",
                    dosage.min_age, dosage.max_age
                )));
            }
        }

        for review in &self.reviews {
            if review.rating > 5 {
                issues.push(ContentIssue::Warning(format!(
                    "Review by {} has rating {} (max 5)",
                    review.author, review.rating
                )));
            }
        }

        if let Some(cta) = &self.cta {
            for group in &cta.pill_groups {
                if group.pills.is_empty() {
                    issues.push(ContentIssue::Error(format!(
                        "Pill group '{}' has no pills",
                        group.name
                    )));
                }
            }
            if cta.lab_link.is_some() && self.lab_report.is_none() {
                issues.push(ContentIssue::Warning(
                    "Lab link present but no lab_report section".to_string(),
                ));
            }
        }

        for link in &self.nav {
            if !self.has_section(link.target) {
                issues.push(ContentIssue::Warning(format!(
                    "Nav link '{}' points at missing section {:?}",
                    link.label, link.target
                )));
            }
        }

        issues
    }

    /// Whether the page has content for a section
    pub fn has_section(&self, section: SectionId) -> bool {
        match section {
            SectionId::Hero => self.hero.is_some(),
            SectionId::Benefits => !self.benefits.is_empty(),
            SectionId::Ingredients => self.ingredients.is_some(),
            SectionId::Dosage => self.dosage.is_some(),
            SectionId::Reviews => !self.reviews.is_empty(),
            SectionId::Faq => !self.faq.is_empty(),
            SectionId::Cta => self.cta.is_some(),
        }
    }
}

fn default_ingredients_title() -> String {
    "What's Inside".to_string()
}

fn default_threshold_age() -> u32 {
    10
}

fn default_low_dose() -> String {
    "1 Gummy / Day".to_string()
}

fn default_high_dose() -> String {
    "1-2 Gummies / Day".to_string()
}

fn default_rating() -> u8 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_page_parses() {
        let page = PageContent::embedded().expect("embedded page parses");
        assert!(!page.reviews.is_empty());
        assert!(page.cta.is_some());
        assert!(SectionId::ALL.iter().all(|s| page.has_section(*s)));
    }

    #[test]
    fn test_embedded_page_has_no_errors() {
        let page = PageContent::embedded().unwrap();
        let issues = page.validate();
        assert!(
            !issues.iter().any(ContentIssue::is_error),
            "unexpected errors: {:?}",
            issues
        );
    }

    #[test]
    fn test_minimal_page() {
        let page = PageContent::parse("brand = \"Tiny\"").unwrap();
        assert!(page.hero.is_none());
        assert!(page.reviews.is_empty());
        assert!(!page.has_section(SectionId::Faq));
        assert!(page.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_broken_structure() {
        let page = PageContent::parse(
            r#"
            brand = "Broken"

            [dosage]
            min_age = 12
            max_age = 4

            [ingredients]
            tabs = [{ key = "a", label = "A" }]

            [cta]
            headline = "Buy"
            base_price = { price = "1", details = "d", cta_label = "Go" }
            pill_groups = [{ name = "Empty" }]
            "#,
        )
        .unwrap();

        let issues = page.validate();
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
        assert!(issues
            .iter()
            .any(|i| i.message().contains("no pane with key 'a'")));
    }

    #[test]
    fn test_section_text_contains_faq_question() {
        let page = PageContent::embedded().unwrap();
        let text = page.section_text(SectionId::Faq);
        assert!(text.contains(&page.faq[0].question));
    }

    #[test]
    fn test_section_ids_round_trip_names() {
        assert_eq!(SectionId::from_str("reviews"), Some(SectionId::Reviews));
        assert_eq!(SectionId::from_str("Reviews"), None);
    }
}
