use super::actions::{normalize_key, PageAction};
use super::carousel::SwipeTracker;
use super::layout::{content_width, PageLayout, HEADER_ROWS};
use super::page::PageControllers;
use crate::config::Config;
use crate::content::{PageContent, PriceMapping, SectionId};
use crate::effects::{
    CloseReason, Confetti, CountUp, FadeIn, LabModal, MobileMenu, PageLoader, ParticleField,
    ParticleSettings, ScrollState, SearchOverlay, SectionIndex,
};
use crossterm::event::{KeyCode, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Widgets that take keyboard input, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Tabs,
    Dosage,
    Reviews,
    Faq,
    Cta,
}

impl FocusTarget {
    const ORDER: [FocusTarget; 5] = [
        FocusTarget::Tabs,
        FocusTarget::Dosage,
        FocusTarget::Reviews,
        FocusTarget::Faq,
        FocusTarget::Cta,
    ];

    pub fn section(&self) -> SectionId {
        match self {
            Self::Tabs => SectionId::Ingredients,
            Self::Dosage => SectionId::Dosage,
            Self::Reviews => SectionId::Reviews,
            Self::Faq => SectionId::Faq,
            Self::Cta => SectionId::Cta,
        }
    }
}

/// Clickable regions recorded by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    NavLink(SectionId),
    MenuButton,
    SearchTrigger,
    HeaderCta,
    TabButton(usize),
    DosageSlider,
    CarouselPrev,
    CarouselNext,
    CarouselTrack,
    FaqQuestion(usize),
    Pill { group: usize, pill: usize },
    BuyButton,
    LabLink,
    SearchPanel,
    SearchClose,
    LabPanel,
    LabClose,
}

/// A mouse click resolved against the hit map
#[derive(Debug, Clone, Copy)]
pub struct Click {
    /// `None` when the click landed on nothing clickable
    pub target: Option<HitTarget>,
    pub x: u16,
    pub y: u16,
    /// Horizontal position inside the target, 0.0..=1.0
    pub rel_x: f64,
}

/// Core application state (frontend-agnostic)
///
/// Owns the page content, one controller per interactive group and every
/// visual-effect collaborator. Frontends feed it actions, clicks and ticks,
/// then read it to render.
pub struct AppCore {
    pub config: Config,
    pub content: PageContent,
    pub controllers: PageControllers,
    pub layout: PageLayout,

    /// Parsed keybindings map (key combo -> action)
    pub keybind_map: HashMap<(KeyCode, KeyModifiers), PageAction>,

    pub focus: Option<FocusTarget>,
    pub scroll: ScrollState,
    pub loader: PageLoader,
    pub search: SearchOverlay,
    pub lab: LabModal,
    pub menu: MobileMenu,

    pub particles: Option<ParticleField>,
    pub confetti: Option<Confetti>,
    /// One per hero statistic
    pub count_ups: Vec<CountUp>,
    pub fade_ins: Vec<(SectionId, FadeIn)>,

    /// Terminal size in cells
    pub width: u16,
    pub height: u16,

    /// Application running flag
    pub running: bool,

    effects_enabled: bool,
    index: SectionIndex,
    swipe: SwipeTracker,
    /// Digits typed while the dosage slider has focus
    dosage_entry: String,
}

impl AppCore {
    pub fn new(
        config: Config,
        content: PageContent,
        width: u16,
        height: u16,
        effects_enabled: bool,
        now: Instant,
    ) -> Self {
        Self::with_rng(config, content, width, height, effects_enabled, now, StdRng::from_os_rng())
    }

    /// Build with an explicit random source for the particle and confetti
    /// effects
    pub fn with_rng(
        config: Config,
        content: PageContent,
        width: u16,
        height: u16,
        effects_enabled: bool,
        now: Instant,
        mut rng: StdRng,
    ) -> Self {
        let effects_enabled = effects_enabled && config.effects.enabled;
        let controllers = PageControllers::discover(
            &content,
            &config,
            content_width(width, config.ui.page_padding),
            now,
        );

        let (particles, confetti) = if effects_enabled {
            let fx = &config.effects;
            let settings = ParticleSettings {
                count: fx.particle_count,
                spawn_interval: Duration::from_millis(fx.particle_spawn_interval_ms),
                min_life: Duration::from_millis(fx.particle_min_life_ms),
                life_jitter: Duration::from_millis(fx.particle_life_jitter_ms),
                max_delay: Duration::from_secs(5),
            };
            (
                ParticleField::new(&content.particles, settings, now, StdRng::from_rng(&mut rng)),
                Confetti::new(
                    &content.confetti_colors,
                    fx.confetti_count,
                    Duration::from_millis(fx.confetti_life_ms),
                    StdRng::from_rng(&mut rng),
                ),
            )
        } else {
            tracing::info!("Visual effects disabled");
            (None, None)
        };

        let count_duration = Duration::from_millis(config.effects.count_up_duration_ms);
        let count_ups = content
            .hero
            .as_ref()
            .map(|hero| {
                hero.stats
                    .iter()
                    .map(|s| CountUp::new(s.target, count_duration))
                    .collect()
            })
            .unwrap_or_default();

        let fade_ins = SectionId::ALL
            .iter()
            .filter(|id| content.has_section(**id))
            .map(|id| (*id, FadeIn::new(config.reveal.step())))
            .collect();

        let keybind_map = config.keybind_map();
        let loader = PageLoader::new(
            now,
            Duration::from_millis(config.loader.min_display_ms),
            Duration::from_millis(config.loader.fallback_ms),
        );
        let scroll = ScrollState::new(config.scroll.header_threshold);
        let index = SectionIndex::build(&content);

        let mut core = Self {
            config,
            content,
            controllers,
            layout: PageLayout::default(),
            keybind_map,
            focus: None,
            scroll,
            loader,
            search: SearchOverlay::default(),
            lab: LabModal::default(),
            menu: MobileMenu::default(),
            particles,
            confetti,
            count_ups,
            fade_ins,
            width,
            height,
            running: true,
            effects_enabled,
            index,
            swipe: SwipeTracker::default(),
            dosage_entry: String::new(),
        };
        core.relayout();
        core
    }

    /// Rows available to the document below the sticky header
    pub fn viewport_height(&self) -> u16 {
        self.height.saturating_sub(HEADER_ROWS)
    }

    /// Width the carousel measures against
    pub fn carousel_width(&self) -> u16 {
        content_width(self.width, self.config.ui.page_padding)
    }

    /// Price shown by the call-to-action: the selected variant's, or the
    /// base price when the page has no pills
    pub fn price_display(&self) -> Option<&PriceMapping> {
        match &self.controllers.variants {
            Some(variants) => Some(variants.display()),
            None => self.content.cta.as_ref().map(|cta| &cta.base_price),
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.width < self.config.ui.mobile_width
    }

    /// Screen row of a document row, `None` when scrolled out of view
    pub fn screen_row(&self, doc_row: u16) -> Option<u16> {
        let offset = self.scroll.offset();
        if doc_row < offset || doc_row - offset >= self.viewport_height() {
            return None;
        }
        Some(HEADER_ROWS + doc_row - offset)
    }

    pub fn is_revealed(&self, section: SectionId) -> bool {
        self.fade_in(section).is_some_and(FadeIn::is_revealed)
    }

    pub fn fade_in(&self, section: SectionId) -> Option<&FadeIn> {
        self.fade_ins
            .iter()
            .find(|(id, _)| *id == section)
            .map(|(_, f)| f)
    }

    /// Shown value of the hero statistic at `index`
    pub fn stat_value(&self, index: usize, now: Instant) -> Option<u64> {
        self.count_ups.get(index).map(|c| c.value(now))
    }

    /// Look up a key in the keybind map and run its action
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) -> bool {
        if self.type_dosage(code, modifiers, now) {
            return true;
        }
        let key = normalize_key(code, modifiers);
        match self.keybind_map.get(&key).copied() {
            Some(action) => {
                self.handle_action(action, now);
                true
            }
            None => false,
        }
    }

    pub fn handle_action(&mut self, action: PageAction, now: Instant) {
        match action {
            PageAction::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
                return;
            }
            PageAction::CloseOverlay => {
                self.close_top_overlay(CloseReason::Escape);
                return;
            }
            _ if self.lab.is_open() || self.search.is_open() => {
                tracing::trace!(?action, "ignored while an overlay is open");
                return;
            }
            _ => {}
        }

        let step = self.config.scroll.step.max(1) as i32;
        let page = self.viewport_height().saturating_sub(1).max(1) as i32;
        match action {
            PageAction::ScrollUp => {
                self.scroll.scroll_by(-step);
            }
            PageAction::ScrollDown => {
                self.scroll.scroll_by(step);
            }
            PageAction::PageUp => {
                self.scroll.scroll_by(-page);
            }
            PageAction::PageDown => {
                self.scroll.scroll_by(page);
            }
            PageAction::Top => {
                self.scroll.scroll_to(0);
            }
            PageAction::Bottom => {
                self.scroll.scroll_to(self.scroll.max_offset());
            }
            PageAction::JumpTo(section) => self.jump_to(section),
            PageAction::FocusNext => self.cycle_focus(true),
            PageAction::FocusPrev => self.cycle_focus(false),
            PageAction::Left => self.focused_horizontal(false, now),
            PageAction::Right => self.focused_horizontal(true, now),
            PageAction::Up => self.focused_vertical(false),
            PageAction::Down => self.focused_vertical(true),
            PageAction::Activate => self.activate_focused(now),
            PageAction::OpenSearch => self.search.open(),
            PageAction::OpenLabReport => self.open_lab(),
            PageAction::ToggleMenu => {
                if self.is_mobile() {
                    self.menu.toggle();
                }
            }
            PageAction::Buy => self.buy(now),
            PageAction::Quit | PageAction::CloseOverlay => {}
        }
    }

    pub fn handle_click(&mut self, click: Click, now: Instant) {
        if self.search.is_open() {
            match click.target {
                Some(HitTarget::SearchPanel) => {}
                Some(HitTarget::SearchClose) => {
                    self.search.close(CloseReason::CloseButton);
                }
                _ => {
                    self.search.close(CloseReason::Outside);
                }
            }
            return;
        }

        if self.lab.is_open() {
            match click.target {
                Some(HitTarget::LabPanel) => {}
                Some(HitTarget::LabClose) => self.close_lab(CloseReason::CloseButton),
                _ => self.close_lab(CloseReason::Outside),
            }
            return;
        }

        if self.menu.is_open()
            && !matches!(
                click.target,
                Some(HitTarget::NavLink(_)) | Some(HitTarget::MenuButton)
            )
        {
            self.menu.close();
            return;
        }

        let Some(target) = click.target else {
            return;
        };
        tracing::trace!(?target, "click");

        match target {
            HitTarget::NavLink(section) => self.jump_to(section),
            HitTarget::MenuButton => self.menu.toggle(),
            HitTarget::SearchTrigger => self.search.open(),
            HitTarget::HeaderCta => {
                self.burst(click.x, click.y, now);
                self.jump_to(SectionId::Cta);
            }
            HitTarget::TabButton(i) => {
                self.focus = Some(FocusTarget::Tabs);
                if let Some(tabs) = self.controllers.tabs.as_mut() {
                    tabs.select(i, now);
                }
            }
            HitTarget::DosageSlider => {
                self.focus = Some(FocusTarget::Dosage);
                self.dosage_entry.clear();
                if let Some(dosage) = self.controllers.dosage.as_mut() {
                    dosage.set_fraction(click.rel_x, now);
                }
            }
            HitTarget::CarouselPrev => {
                self.focus = Some(FocusTarget::Reviews);
                if let Some(carousel) = self.controllers.carousel.as_mut() {
                    carousel.prev();
                }
            }
            HitTarget::CarouselNext => {
                self.focus = Some(FocusTarget::Reviews);
                if let Some(carousel) = self.controllers.carousel.as_mut() {
                    carousel.next();
                }
            }
            HitTarget::CarouselTrack => {
                self.focus = Some(FocusTarget::Reviews);
            }
            HitTarget::FaqQuestion(i) => {
                self.focus = Some(FocusTarget::Faq);
                if let Some(faq) = self.controllers.faq.as_mut() {
                    faq.toggle(i);
                }
                self.relayout();
            }
            HitTarget::Pill { group, pill } => {
                self.focus = Some(FocusTarget::Cta);
                if let Some(variants) = self.controllers.variants.as_mut() {
                    variants.select(group, pill);
                }
            }
            HitTarget::BuyButton => {
                self.focus = Some(FocusTarget::Cta);
                self.burst(click.x, click.y, now);
            }
            HitTarget::LabLink => self.open_lab(),
            HitTarget::SearchPanel
            | HitTarget::SearchClose
            | HitTarget::LabPanel
            | HitTarget::LabClose => {}
        }
    }

    /// Pasted text. Only the focused dosage slider takes it, as a raw age.
    pub fn paste_text(&mut self, text: &str, now: Instant) {
        if self.focus != Some(FocusTarget::Dosage) || self.lab.is_open() || self.search.is_open() {
            return;
        }
        self.dosage_entry.clear();
        if let Some(dosage) = self.controllers.dosage.as_mut() {
            dosage.set_from_input(text, now);
        }
    }

    /// Mouse wheel over the page
    pub fn scroll_wheel(&mut self, rows: i32) {
        self.scroll.scroll_by(rows);
    }

    /// Press on the carousel track
    pub fn begin_swipe(&mut self, x: u16) {
        if self.controllers.carousel.is_some() {
            self.swipe.begin(x);
        }
    }

    pub fn is_swiping(&self) -> bool {
        self.swipe.is_tracking()
    }

    /// Release after a press on the track
    pub fn end_swipe(&mut self, x: u16) {
        let Some(delta) = self.swipe.end(x) else {
            return;
        };
        if let Some(carousel) = self.controllers.carousel.as_mut() {
            carousel.on_swipe(delta);
        }
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let container = self.carousel_width();
        if let Some(carousel) = self.controllers.carousel.as_mut() {
            carousel.on_resize(container);
        }
        if !self.is_mobile() {
            self.menu.close();
        }
        self.relayout();
        tracing::debug!(width, height, "resized");
    }

    /// Content-ready signal from the frontend (first frame drawn)
    pub fn mark_content_ready(&mut self, now: Instant) {
        self.loader.mark_ready(now);
    }

    /// Run a search from the overlay. Jumps to the first hit and closes the
    /// overlay; keeps it open when nothing matched.
    pub fn submit_search(&mut self, query: &str, now: Instant) -> Option<SectionId> {
        let results = self.index.search(query);
        let first = results.first().copied();
        tracing::debug!(query, hits = results.len(), "search");
        self.search.set_results(query, results);
        if let Some(section) = first {
            self.search.close(CloseReason::CloseButton);
            self.jump_to(section);
            self.tick(now);
        }
        first
    }

    /// Per-frame update of every time-based collaborator
    pub fn tick(&mut self, now: Instant) {
        if self.loader.tick(now) {
            // Re-measure now that real content is on screen
            let container = self.carousel_width();
            if let Some(carousel) = self.controllers.carousel.as_mut() {
                carousel.on_resize(container);
            }
            self.relayout();
        }

        if let Some(particles) = self.particles.as_mut() {
            particles.tick(now);
        }
        if let Some(confetti) = self.confetti.as_mut() {
            confetti.tick(now);
        }

        if self.loader.is_visible() {
            return;
        }

        for (id, fade) in self.fade_ins.iter_mut() {
            let Some(slot) = self.layout.slot(*id) else {
                continue;
            };
            if fade.observe(self.scroll.is_visible(slot.top, slot.height), now) {
                tracing::debug!(section = ?id, "section revealed");
            }
        }

        if self.effects_enabled {
            let hero_visible = self
                .layout
                .slot(SectionId::Hero)
                .is_some_and(|s| self.scroll.is_visible(s.top, s.height));
            if hero_visible {
                for count in self.count_ups.iter_mut() {
                    count.trigger(now);
                }
            }
        }
    }

    /// Release controllers and effects. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.controllers.teardown();
        self.particles = None;
        self.confetti = None;
        self.swipe.cancel();
    }

    /// Recompute section positions and the scroll range
    pub fn relayout(&mut self) {
        self.layout = PageLayout::compute(
            &self.content,
            &self.controllers,
            self.width,
            self.config.ui.page_padding,
        );
        let viewport = self.viewport_height();
        self.scroll.set_dimensions(self.layout.doc_height, viewport);
    }

    /// Focusable widgets that initialized
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        FocusTarget::ORDER
            .iter()
            .copied()
            .filter(|t| match t {
                FocusTarget::Tabs => self.controllers.tabs.is_some(),
                FocusTarget::Dosage => self.controllers.dosage.is_some(),
                FocusTarget::Reviews => self.controllers.carousel.is_some(),
                FocusTarget::Faq => self.controllers.faq.is_some(),
                FocusTarget::Cta => self.controllers.variants.is_some(),
            })
            .collect()
    }

    fn jump_to(&mut self, section: SectionId) {
        self.menu.close();
        match self.layout.slot(section) {
            Some(slot) => {
                self.scroll.scroll_to(slot.top);
                tracing::debug!(?section, row = slot.top, "jump");
            }
            None => tracing::debug!(?section, "jump target not on page"),
        }
    }

    /// Digits and Backspace edit the age while the dosage slider is focused.
    /// Returns true when the key was consumed.
    fn type_dosage(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) -> bool {
        if self.focus != Some(FocusTarget::Dosage) || self.lab.is_open() || self.search.is_open() {
            return false;
        }
        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        let Some(dosage) = self.controllers.dosage.as_mut() else {
            return false;
        };
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                // Ages are at most two digits; a third starts a new entry
                if self.dosage_entry.len() >= 2 {
                    self.dosage_entry.clear();
                }
                self.dosage_entry.push(c);
            }
            KeyCode::Backspace if !self.dosage_entry.is_empty() => {
                self.dosage_entry.pop();
            }
            _ => return false,
        }
        dosage.set_from_input(&self.dosage_entry, now);
        tracing::debug!(entry = %self.dosage_entry, age = dosage.age(), "dosage typed");
        true
    }

    fn cycle_focus(&mut self, forward: bool) {
        self.dosage_entry.clear();
        let targets = self.focus_targets();
        if targets.is_empty() {
            return;
        }
        let current = self.focus.and_then(|f| targets.iter().position(|t| *t == f));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => targets.len() - 1,
            (Some(i), true) => (i + 1) % targets.len(),
            (Some(i), false) => (i + targets.len() - 1) % targets.len(),
        };
        let target = targets[next];
        self.focus = Some(target);

        // Bring the focused widget on screen
        if let Some(slot) = self.layout.slot(target.section()).copied() {
            if !self.scroll.is_visible(slot.top, slot.height) {
                self.scroll.scroll_to(slot.top);
            }
        }
    }

    fn focused_horizontal(&mut self, forward: bool, now: Instant) {
        let Some(focus) = self.focus else { return };
        let c = &mut self.controllers;
        match focus {
            FocusTarget::Tabs => {
                if let Some(tabs) = c.tabs.as_mut() {
                    if forward {
                        tabs.select_next(now);
                    } else {
                        tabs.select_prev(now);
                    }
                }
            }
            FocusTarget::Dosage => {
                self.dosage_entry.clear();
                if let Some(dosage) = c.dosage.as_mut() {
                    if forward {
                        dosage.increment(now);
                    } else {
                        dosage.decrement(now);
                    }
                }
            }
            FocusTarget::Reviews => {
                if let Some(carousel) = c.carousel.as_mut() {
                    if forward {
                        carousel.next();
                    } else {
                        carousel.prev();
                    }
                }
            }
            FocusTarget::Faq => {}
            FocusTarget::Cta => {
                if let Some(variants) = c.variants.as_mut() {
                    if forward {
                        variants.select_next_in_focus();
                    } else {
                        variants.select_prev_in_focus();
                    }
                }
            }
        }
    }

    fn focused_vertical(&mut self, down: bool) {
        match self.focus {
            Some(FocusTarget::Faq) => {
                if let Some(faq) = self.controllers.faq.as_mut() {
                    if down {
                        faq.cursor_down();
                    } else {
                        faq.cursor_up();
                    }
                }
            }
            Some(FocusTarget::Cta) => {
                if let Some(variants) = self.controllers.variants.as_mut() {
                    if down {
                        variants.focus_down();
                    } else {
                        variants.focus_up();
                    }
                }
            }
            _ => {}
        }
    }

    fn activate_focused(&mut self, now: Instant) {
        match self.focus {
            Some(FocusTarget::Faq) => {
                if let Some(faq) = self.controllers.faq.as_mut() {
                    faq.toggle_at_cursor();
                }
                self.relayout();
            }
            Some(FocusTarget::Cta) => self.buy(now),
            _ => {}
        }
    }

    /// Primary call-to-action: bring the buy block on screen and burst
    /// confetti from its button
    fn buy(&mut self, now: Instant) {
        self.jump_to(SectionId::Cta);
        let row = self
            .layout
            .cta_button_row(&self.content, &self.controllers)
            .and_then(|r| self.screen_row(r));
        match row {
            Some(y) => self.burst(self.width / 2, y, now),
            None => tracing::debug!("buy button not on screen, no confetti"),
        }
    }

    fn burst(&mut self, x: u16, y: u16, now: Instant) {
        if let Some(confetti) = self.confetti.as_mut() {
            confetti.burst(x as f64, y as f64, now);
        }
    }

    fn open_lab(&mut self) {
        if self.content.lab_report.is_none() {
            tracing::debug!("No lab report content, ignoring");
            return;
        }
        if self.lab.open() {
            self.scroll.lock();
        }
    }

    fn close_lab(&mut self, reason: CloseReason) {
        if self.lab.close(reason) {
            self.scroll.unlock();
        }
    }

    /// Escape closes the topmost overlay only
    fn close_top_overlay(&mut self, reason: CloseReason) {
        if self.search.close(reason) {
            return;
        }
        if self.lab.is_open() {
            self.close_lab(reason);
            return;
        }
        self.menu.close();
    }
}
