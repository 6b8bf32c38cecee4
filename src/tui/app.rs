use ratatui::widgets::TableState;
use std::time::Instant;
use tracing::{info, warn};

use crate::entity::{Collection, Company};
use crate::fetch::fetch_collection;
use crate::query::{query, sectors, QuerySession, SortField, View};
use crate::scoring::{score_card, ScoreCard};
use crate::signals::{attributions_for, ModelAttribution, SignalProvider};
use crate::source::DataSource;
use crate::tui::theme::ThemeColors;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    SearchInput,
    Help,
}

/// Everything the detail view renders for one company.
#[derive(Debug, Clone)]
pub struct DetailData {
    pub card: ScoreCard,
    pub attributions: Vec<ModelAttribution>,
}

pub struct App {
    pub collection: Collection,
    pub session: QuerySession,
    pub table_state: TableState,
    pub input_mode: InputMode,
    pub detail: Option<DetailData>,
    pub flash_message: Option<(String, Instant)>,
    pub last_refresh: Instant,
    pub needs_refresh: bool,
    pub should_quit: bool,
    pub colors: ThemeColors,
    source: Box<dyn DataSource>,
    signals: Box<dyn SignalProvider>,
}

impl App {
    pub fn new(
        collection: Collection,
        session: QuerySession,
        source: Box<dyn DataSource>,
        signals: Box<dyn SignalProvider>,
        colors: ThemeColors,
    ) -> Self {
        let mut app = Self {
            collection,
            session,
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            detail: None,
            flash_message: None,
            last_refresh: Instant::now(),
            needs_refresh: false,
            should_quit: false,
            colors,
            source,
            signals,
        };
        app.clamp_selection();
        app
    }

    /// The current view: filtered and sorted per the session.
    pub fn visible(&self) -> Vec<&Company> {
        query(self.collection.companies(), &self.session.params())
    }

    pub fn sector_universe(&self) -> Vec<String> {
        sectors(self.collection.companies())
    }

    pub fn selected_company(&self) -> Option<&Company> {
        let index = self.table_state.selected()?;
        self.visible().get(index).copied()
    }

    /// The company shown in the detail view, if it is still loaded.
    pub fn detail_company(&self) -> Option<&Company> {
        self.session.selected.and_then(|id| self.collection.get(id))
    }

    pub fn next_row(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    /// Keep the selection inside the current view after it changes size.
    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            match self.table_state.selected() {
                Some(i) if i >= len => self.table_state.select(Some(len - 1)),
                Some(_) => {}
                None => self.table_state.select(Some(0)),
            }
        }
    }

    pub fn select_sort_field(&mut self, field: SortField) {
        self.session.select_sort_field(field);
        self.table_state.select(Some(0));
        self.clamp_selection();
    }

    pub fn cycle_sector(&mut self) {
        let universe = self.sector_universe();
        self.session.cycle_sector(&universe);
        self.table_state.select(Some(0));
        self.clamp_selection();
    }

    pub fn start_search_input(&mut self) {
        self.input_mode = InputMode::SearchInput;
    }

    /// Search edits apply to the view as they are typed.
    pub fn push_search_char(&mut self, c: char) {
        self.session.search.push(c);
        self.table_state.select(Some(0));
        self.clamp_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.session.search.pop();
        self.clamp_selection();
    }

    pub fn confirm_search_input(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_search_input(&mut self) {
        self.session.search.clear();
        self.input_mode = InputMode::Normal;
        self.clamp_selection();
    }

    pub fn open_detail(&mut self) {
        let Some(company) = self.selected_company() else {
            return;
        };
        let id = company.id;
        let card = score_card(company);
        match attributions_for(self.signals.as_ref(), company) {
            Ok(attributions) => {
                self.detail = Some(DetailData { card, attributions });
                self.session.open_detail(id);
            }
            Err(e) => self.show_flash(format!("Error loading signals: {}", e)),
        }
    }

    pub fn back_to_watchlist(&mut self) {
        self.session.back_to_watchlist();
        self.detail = None;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Fetch a fresh collection from the source.
    ///
    /// On failure the current collection stays in place.
    pub fn reload(&mut self) {
        self.needs_refresh = false;
        match fetch_collection(self.source.as_ref()) {
            Ok(collection) => {
                info!(companies = collection.len(), "reloaded collection");
                self.collection = collection;
                self.last_refresh = Instant::now();
                self.after_reload();
                self.show_flash(format!("Reloaded {} companies", self.collection.len()));
            }
            Err(e) => {
                warn!(error = %e, "reload failed");
                self.show_flash(format!("Reload failed: {}", e));
            }
        }
    }

    /// Reopen the detail view on the reloaded company, or fall back to the
    /// watchlist when it is gone from the view.
    fn after_reload(&mut self) {
        self.clamp_selection();
        if self.session.view != View::Detail {
            return;
        }
        let restore = self.session.selected;
        let index = self.visible().iter().position(|c| Some(c.id) == restore);
        self.back_to_watchlist();
        if let Some(index) = index {
            self.table_state.select(Some(index));
            self.open_detail();
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }
}
