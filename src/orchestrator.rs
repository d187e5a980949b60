// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Save → analyze → render, driven through the Upload/Loading/Result views.
//!
//! `analyze` borrows the orchestrator mutably for the whole sequence, so a
//! second analysis cannot be triggered while one is outstanding.

use crate::api::PortfolioApi;
use crate::dashboard::{ChartSurface, DashboardRenderer, DashboardView};
use crate::editor::RowEditor;
use crate::error::ClientError;
use crate::models::{AnalysisReport, ExplainRequest, Holding, UserLevel};
use crate::state::AppState;
use crate::sync::{expire_on_401, require_token, save_best_effort};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Upload,
    Loading,
    Result,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub text: String,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub user_level: UserLevel,
    pub include_tax_analysis: bool,
    pub include_rebalancing: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            user_level: UserLevel::Beginner,
            include_tax_analysis: true,
            include_rebalancing: true,
        }
    }
}

type Observer = Box<dyn FnMut(View, Option<&Progress>)>;

pub struct Orchestrator {
    view: View,
    progress: Option<Progress>,
    settings: AnalysisSettings,
    reveal_delay: Duration,
    observer: Option<Observer>,
}

impl Orchestrator {
    pub fn new(settings: AnalysisSettings, reveal_delay: Duration) -> Self {
        Self {
            view: View::Upload,
            progress: None,
            settings,
            reveal_delay,
            observer: None,
        }
    }

    /// Called on every view or progress change.
    pub fn with_observer(mut self, f: impl FnMut(View, Option<&Progress>) + 'static) -> Self {
        self.observer = Some(Box::new(f));
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn progress(&self) -> Option<&Progress> {
        self.progress.as_ref()
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    fn notify(&mut self) {
        if let Some(f) = self.observer.as_mut() {
            f(self.view, self.progress.as_ref());
        }
    }

    fn show(&mut self, view: View) {
        self.view = view;
        if view != View::Loading {
            self.progress = None;
        }
        self.notify();
    }

    fn step(&mut self, text: impl Into<String>, percent: u8) {
        self.progress = Some(Progress {
            text: text.into(),
            percent,
        });
        self.notify();
    }

    /// Back to Upload for a fresh analysis.
    pub fn reset<S: ChartSurface>(&mut self, renderer: &mut DashboardRenderer<S>) {
        renderer.clear();
        self.show(View::Upload);
    }

    pub fn analyze<'r, A, S>(
        &mut self,
        api: &A,
        state: &mut AppState,
        editor: &RowEditor,
        renderer: &'r mut DashboardRenderer<S>,
    ) -> Result<&'r DashboardView, ClientError>
    where
        A: PortfolioApi + ?Sized,
        S: ChartSurface,
    {
        let holdings = match editor.gather_holdings() {
            Ok(h) => h,
            Err(e) => {
                self.show(View::Upload);
                return Err(e.into());
            }
        };

        self.show(View::Loading);
        let outcome = self.run(api, state, holdings);
        let report = match outcome {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "analysis failed");
                self.show(View::Upload);
                return Err(e);
            }
        };

        self.step("Finalizing report...", 100);
        if !self.reveal_delay.is_zero() {
            std::thread::sleep(self.reveal_delay);
        }
        let view = renderer.render(&report);
        self.show(View::Result);
        info!("analysis rendered");
        Ok(view)
    }

    fn run<A: PortfolioApi + ?Sized>(
        &mut self,
        api: &A,
        state: &mut AppState,
        holdings: Vec<Holding>,
    ) -> Result<AnalysisReport, ClientError> {
        let token = require_token(state)?;

        self.step("Saving portfolio...", 15);
        save_best_effort(api, &token, &holdings);

        self.step(
            format!("Fetching real-time prices for {} assets...", holdings.len()),
            30,
        );
        let req = ExplainRequest {
            portfolio: holdings,
            user_level: self.settings.user_level,
            include_tax_analysis: self.settings.include_tax_analysis,
            include_rebalancing: self.settings.include_rebalancing,
            transcript_context: None,
        };
        expire_on_401(state, api.explain(&token, &req))
    }
}
