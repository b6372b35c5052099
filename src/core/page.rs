//! Controller factory: one owned controller per interactive group found in
//! the page content.
//!
//! Each controller is optional. A group with missing structure is skipped
//! with a log line and nothing else is affected.

use super::carousel::BoundedIndexCarousel;
use super::dosage::DosageCalculator;
use super::faq::FaqAccordion;
use super::tabs::TabGroup;
use super::variants::VariantPanel;
use crate::config::Config;
use crate::content::{PageContent, PriceMapping};
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Default)]
pub struct PageControllers {
    pub carousel: Option<BoundedIndexCarousel>,
    pub tabs: Option<TabGroup>,
    pub faq: Option<FaqAccordion>,
    pub variants: Option<VariantPanel>,
    pub dosage: Option<DosageCalculator>,
    torn_down: bool,
}

impl PageControllers {
    /// Discover every group in `content` and build its controller.
    /// `container_width` is the carousel's first width measurement.
    pub fn discover(
        content: &PageContent,
        config: &Config,
        container_width: u16,
        now: Instant,
    ) -> Self {
        let carousel = if content.reviews.is_empty() {
            tracing::debug!("No reviews, skipping carousel");
            None
        } else {
            Some(BoundedIndexCarousel::new(
                content.reviews.len(),
                config.carousel.footprint(),
                config.carousel.swipe_threshold,
                container_width,
            ))
        };

        let tabs = match &content.ingredients {
            Some(ingredients) => TabGroup::discover(ingredients, config.reveal.step(), now),
            None => {
                tracing::debug!("No ingredients section, skipping tabs");
                None
            }
        };

        let variants = match &content.cta {
            Some(cta) => VariantPanel::discover(&cta.pill_groups, cta.base_price.clone()),
            None => {
                tracing::debug!("No call-to-action section, skipping pills");
                None
            }
        };

        let dosage = match &content.dosage {
            Some(def) => DosageCalculator::discover(def),
            None => {
                tracing::debug!("No dosage section, skipping calculator");
                None
            }
        };

        let controllers = Self {
            carousel,
            tabs,
            faq: FaqAccordion::discover(&content.faq),
            variants,
            dosage,
            torn_down: false,
        };
        tracing::info!(
            carousel = controllers.carousel.is_some(),
            tabs = controllers.tabs.is_some(),
            faq = controllers.faq.is_some(),
            variants = controllers.variants.is_some(),
            dosage = controllers.dosage.is_some(),
            "page controllers initialized"
        );
        controllers
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Release every controller. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }
        self.carousel = None;
        self.tabs = None;
        self.faq = None;
        self.variants = None;
        self.dosage = None;
        self.torn_down = true;
        tracing::info!("page controllers torn down");
    }

    /// Names of the widgets that initialized
    pub fn initialized(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.carousel.is_some() {
            names.push("carousel");
        }
        if self.tabs.is_some() {
            names.push("tabs");
        }
        if self.faq.is_some() {
            names.push("faq");
        }
        if self.variants.is_some() {
            names.push("variants");
        }
        if self.dosage.is_some() {
            names.push("dosage");
        }
        names
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            carousel: self.carousel.clone(),
            tabs: self.tabs.as_ref().map(|tabs| TabsSnapshot {
                buttons: tabs.buttons().members().iter().map(|b| b.label.clone()).collect(),
                active: tabs.buttons().active().map(|b| b.label.clone()),
                pane: tabs
                    .active_pane()
                    .map(|p| p.items.clone())
                    .unwrap_or_default(),
            }),
            faq: self.faq.as_ref().map(|faq| FaqSnapshot {
                questions: faq.items().len(),
                open: faq.open_index(),
            }),
            variants: self.variants.as_ref().map(|panel| VariantsSnapshot {
                groups: panel
                    .groups()
                    .iter()
                    .map(|g| GroupSnapshot {
                        name: g.name().to_string(),
                        active: g.active_label().map(str::to_string),
                    })
                    .collect(),
                display: panel.display().clone(),
            }),
            dosage: self.dosage.as_ref().map(|calc| DosageSnapshot {
                bounds: calc.bounds(),
                age: calc.age_label(),
                dosage: calc.dosage().to_string(),
            }),
        }
    }
}

/// Serializable view of every controller's state
#[derive(Debug, Serialize)]
pub struct PageSnapshot {
    pub carousel: Option<BoundedIndexCarousel>,
    pub tabs: Option<TabsSnapshot>,
    pub faq: Option<FaqSnapshot>,
    pub variants: Option<VariantsSnapshot>,
    pub dosage: Option<DosageSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct TabsSnapshot {
    pub buttons: Vec<String>,
    pub active: Option<String>,
    pub pane: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FaqSnapshot {
    pub questions: usize,
    pub open: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GroupSnapshot {
    pub name: String,
    pub active: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VariantsSnapshot {
    pub groups: Vec<GroupSnapshot>,
    pub display: PriceMapping,
}

#[derive(Debug, Serialize)]
pub struct DosageSnapshot {
    pub bounds: (u32, u32),
    pub age: String,
    pub dosage: String,
}
