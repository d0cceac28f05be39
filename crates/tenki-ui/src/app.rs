//! Forecast screen controller and terminal event loop.

use std::time::Duration;

use ratatui::crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use tenki_core::{AppError, ChildSource, Config};
use tokio::task::AbortHandle;

use crate::app_services::{AppServices, ForecastServiceMessage};
use crate::controls::{action_for, Action, Focus};
use crate::models::ForecastModel;
use crate::services;
use crate::view;

/// Owns the view state and turns user actions into service requests.
pub struct ForecastApp {
    services: AppServices,
    model: ForecastModel,
    focus: Focus,
    /// Index of the first card on screen
    card_offset: usize,
    mounted: bool,
    in_flight: Option<AbortHandle>,
    should_quit: bool,
}

impl ForecastApp {
    pub fn new(services: AppServices, child_source: ChildSource) -> Self {
        Self {
            services,
            model: ForecastModel::new(child_source),
            focus: Focus::default(),
            card_offset: 0,
            mounted: false,
            in_flight: None,
            should_quit: false,
        }
    }

    pub fn model(&self) -> &ForecastModel {
        &self.model
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn card_offset(&self) -> usize {
        self.card_offset
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Start the one-time region catalog fetch. Later calls do nothing.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::info!("Requesting region catalog");
        services::request_catalog(
            self.services.forecast_service_tx(),
            self.services.runtime(),
            self.services.client(),
        );
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.move_focus(Focus::next),
            Action::FocusPrev => self.move_focus(Focus::prev),
            Action::Step(delta) => match self.focus {
                Focus::Parent => {
                    self.model.step_parent(delta);
                }
                Focus::Child => {
                    self.model.step_child(delta);
                }
                Focus::Fetch => {}
            },
            Action::Scroll(delta) => self.scroll_cards(delta),
            Action::Fetch => {
                self.request_forecast();
            }
        }
    }

    /// A disabled child selector is skipped.
    fn move_focus(&mut self, advance: fn(Focus) -> Focus) {
        let mut focus = advance(self.focus);
        if focus == Focus::Child && !self.model.child_selector_enabled() {
            focus = advance(focus);
        }
        self.focus = focus;
    }

    /// Move the card window, keeping at least the last card on screen.
    fn scroll_cards(&mut self, delta: isize) {
        let last = self.model.cards().count().saturating_sub(1);
        self.card_offset = self.card_offset.saturating_add_signed(delta).min(last);
    }

    /// Fetch the forecast for the selected child, replacing any request still
    /// in flight. Returns false when no child is selected.
    pub fn request_forecast(&mut self) -> bool {
        let Some(request) = self.model.begin_forecast() else {
            tracing::debug!("Fetch requested without a selected child");
            return false;
        };
        self.card_offset = 0;
        if let Some(previous) = self.in_flight.take() {
            tracing::debug!("Aborting in-flight forecast request");
            previous.abort();
        }
        self.in_flight = Some(services::request_forecast(
            self.services.forecast_service_tx(),
            self.services.runtime(),
            self.services.client(),
            request,
        ));
        true
    }

    /// Apply every pending service result. Returns how many were handled.
    pub fn poll_channel(&mut self) -> usize {
        let mut handled = 0;
        while let Some(msg) = self.services.try_recv() {
            match msg {
                ForecastServiceMessage::CatalogDone(result) => {
                    self.model.apply_catalog(result);
                    if !self.model.child_selector_enabled() && self.focus == Focus::Child {
                        self.focus = Focus::Parent;
                    }
                }
                ForecastServiceMessage::ForecastDone { ticket, result } => {
                    if self.model.apply_forecast(ticket, result) {
                        self.in_flight = None;
                    }
                }
            }
            handled += 1;
        }
        handled
    }

    pub fn into_services(self) -> AppServices {
        self.services
    }

    fn event_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        tick_rate: Duration,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            self.poll_channel();
            terminal.draw(|frame| view::render(frame, self))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(action) = action_for(key) {
                        self.handle_action(action);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Run the forecast screen until the user quits.
pub fn run(config: &Config) -> Result<(), AppError> {
    let services = AppServices::new(config)?;
    let mut app = ForecastApp::new(services, config.regions.child_source);
    app.mount();

    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);
    let mut terminal = ratatui::try_init()?;
    let result = app.event_loop(&mut terminal, tick_rate);
    ratatui::restore();

    app.into_services().shutdown();
    result
}
