//! Replays a [`Script`] against a [`SwipeSwitcher`] on a virtual clock.

use std::fmt;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use edgeswipe_core::{SwipeConfig, SwipeSwitcher, TouchInput, TouchPhase};
use web_time::Instant;

use crate::data::{BOTTOM_HINT_PREFIX, Category, HintView, TOP_HINT_PREFIX, render_view};
use crate::error::{DemoError, Result};
use crate::pane::SimPane;
use crate::script::{Action, Script, expand_swipe};

/// What caused a category switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchCause {
    Swipe,
    Tap,
}

impl fmt::Display for SwitchCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Swipe => "swipe",
            Self::Tap => "tap",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchRecord {
    pub at_ms: u64,
    pub from: usize,
    pub to: usize,
    pub cause: SwitchCause,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub switches: Vec<SwitchRecord>,
    pub final_index: usize,
    /// Moves for which native scrolling was suppressed.
    pub suppressed_moves: usize,
    pub steps: usize,
}

/// One switcher, one simulated pane and the categories it shows.
pub struct Replay {
    categories: Rc<Vec<Category>>,
    pane: SimPane,
    switcher: SwipeSwitcher<SimPane>,
    base: Instant,
    clock_ms: u64,
    report: ReplayReport,
}

impl fmt::Debug for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replay")
            .field("categories", &self.categories.len())
            .field("clock_ms", &self.clock_ms)
            .field("switcher", &self.switcher)
            .finish_non_exhaustive()
    }
}

impl Replay {
    pub fn new(
        categories: Vec<Category>,
        config: SwipeConfig,
        initial: usize,
        viewport: f64,
    ) -> Result<Self> {
        if !(viewport.is_finite() && viewport > 0.0) {
            return Err(DemoError::invalid(format!(
                "viewport must be a positive number of pixels, got {viewport}"
            )));
        }
        if categories.is_empty() {
            return Err(DemoError::invalid("no categories to show"));
        }

        let categories = Rc::new(categories);
        let mut switcher = SwipeSwitcher::new(config, initial, categories.len());
        let active = switcher.active_index();
        let pane = SimPane::new(viewport, categories[active].content_height());
        switcher.bind_container(pane.clone());

        // New content replaces the old before the pane is scrolled.
        let loader_pane = pane.clone();
        let heights: Vec<f64> = categories.iter().map(Category::content_height).collect();
        switcher.set_on_switch(move |index| {
            if let Some(height) = heights.get(index) {
                loader_pane.load(*height);
            }
        });

        Ok(Self {
            categories,
            pane,
            switcher,
            base: Instant::now(),
            clock_ms: 0,
            report: ReplayReport::default(),
        })
    }

    #[must_use]
    pub fn switcher(&self) -> &SwipeSwitcher<SimPane> {
        &self.switcher
    }

    #[must_use]
    pub fn pane(&self) -> &SimPane {
        &self.pane
    }

    fn at(&self, ms: u64) -> Instant {
        self.base + Duration::from_millis(ms)
    }

    /// Move the clock forward, resolving every deadline on the way.
    fn advance(&mut self, to_ms: u64) {
        let now = self.at(to_ms);
        while let Some(deadline) = self.switcher.next_deadline().filter(|d| *d <= now) {
            self.switcher.tick(deadline);
        }
        self.switcher.tick(now);
        self.clock_ms = to_ms;
    }

    fn hints(&self) -> HintView {
        let nav = self.switcher.navigation();
        HintView {
            top: nav.top_hint_target(),
            bottom: nav.bottom_hint_target(),
        }
    }

    fn view(&self) -> String {
        render_view(&self.categories, self.switcher.active_index(), self.hints())
    }

    fn touch(&mut self, input: &TouchInput, at_ms: u64) -> Option<usize> {
        self.advance(at_ms);
        let now = self.at(at_ms);
        let mut suppressed = false;
        let switched = self
            .switcher
            .process(input, now, &mut || suppressed = true);
        if suppressed {
            self.report.suppressed_moves += 1;
        }
        switched
    }

    fn record(
        &mut self,
        out: &mut impl Write,
        from: usize,
        to: usize,
        cause: SwitchCause,
    ) -> Result<()> {
        self.report.switches.push(SwitchRecord {
            at_ms: self.clock_ms,
            from,
            to,
            cause,
        });
        writeln!(out, "{:>7}ms  {cause}: switched {from} -> {to}", self.clock_ms)?;
        write!(out, "{}", self.view())?;
        Ok(())
    }

    fn on_scrolled(&mut self, out: &mut impl Write, landed: f64) -> Result<()> {
        let now = self.at(self.clock_ms);
        let evaluated = self.switcher.on_scroll(now);
        write!(out, "{:>7}ms  scroll to {landed} px", self.clock_ms)?;
        if !evaluated {
            writeln!(out, " (hints unchanged)")?;
            return Ok(());
        }
        writeln!(out)?;
        let hints = self.hints();
        if let Some(target) = hints.top.and_then(|i| self.categories.get(i)) {
            writeln!(out, "           hint: {TOP_HINT_PREFIX} {}", target.label)?;
        }
        if let Some(target) = hints.bottom.and_then(|i| self.categories.get(i)) {
            writeln!(out, "           hint: {BOTTOM_HINT_PREFIX} {}", target.label)?;
        }
        Ok(())
    }

    /// Run every step of `script`, writing a transcript to `out`.
    pub fn run(&mut self, script: &Script, out: &mut impl Write) -> Result<ReplayReport> {
        script.check()?;
        if let Some(name) = &script.name {
            writeln!(out, "script: {name}")?;
        }
        write!(out, "{}", self.view())?;

        for (i, step) in script.steps.iter().enumerate() {
            if step.at_ms < self.clock_ms {
                return Err(DemoError::script(i, "replay clock already past this step"));
            }
            let _span = tracing::debug_span!("step", index = i, at_ms = step.at_ms).entered();
            self.advance(step.at_ms);
            let before = self.switcher.active_index();

            match &step.action {
                Action::Touch(input) => {
                    if let Some(index) = self.touch(input, step.at_ms) {
                        self.record(out, before, index, SwitchCause::Swipe)?;
                    } else if input.phase == TouchPhase::End {
                        writeln!(out, "{:>7}ms  touch end: no switch", step.at_ms)?;
                    }
                }
                Action::Swipe {
                    from,
                    to,
                    duration_ms,
                    moves,
                } => {
                    let mut switched = None;
                    for (offset, input) in expand_swipe(*from, *to, *duration_ms, *moves) {
                        switched = switched.or(self.touch(&input, step.at_ms + offset));
                    }
                    match switched {
                        Some(index) => self.record(out, before, index, SwitchCause::Swipe)?,
                        None => writeln!(
                            out,
                            "{:>7}ms  swipe ({}, {}) -> ({}, {}): no switch",
                            self.clock_ms, from.x, from.y, to.x, to.y
                        )?,
                    }
                }
                Action::Scroll { offset } => {
                    let landed = self.pane.user_scroll(*offset);
                    self.on_scrolled(out, landed)?;
                }
                Action::ScrollToTop => {
                    let landed = self.pane.user_scroll(0.0);
                    self.on_scrolled(out, landed)?;
                }
                Action::ScrollToBottom => {
                    let landed = self.pane.scroll_to_bottom();
                    self.on_scrolled(out, landed)?;
                }
                Action::Tap { index } => {
                    if self.switcher.select(*index) {
                        self.record(out, before, *index, SwitchCause::Tap)?;
                    } else {
                        writeln!(out, "{:>7}ms  tap {index}: ignored", step.at_ms)?;
                    }
                }
                Action::Wait => {}
            }
            self.report.steps += 1;
        }

        self.report.final_index = self.switcher.active_index();
        tracing::debug!(
            steps = self.report.steps,
            switches = self.report.switches.len(),
            final_index = self.report.final_index,
            "replay finished"
        );
        Ok(self.report.clone())
    }
}
