//! The donation-split editing session.
//!
//! A session is opened when the split editor appears and lives until the
//! editor is closed. Every edit runs the redistribution engine followed by the
//! sum normalizer, so after any operation the percentages sum to exactly
//! 100.00. Nothing leaves the session until [`SplitSession::save`].

use crate::config::{AllocatorConfig, SessionConfig};
use crate::constants::session::AMOUNT_DECIMALS;
use crate::error::{SplitError, SplitResult};
use crate::gateway::DonationBoxGateway;
use crate::input_buffer::{FocusState, InputBuffer, Key, parse_percentage};
use crate::seed::{attributions, seed_percentages};
use crwd_calculator::{MinimumFloor, equal_split, redistribute, round2};
use crwd_types::{
    BoxCause, Cause, CauseAllocation, CauseId, CollectiveId, PercentageMap, SaveReceipt,
    UpdateDonationBoxRequest,
};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Result of [`SplitSession::save`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// No cause moved past the change threshold; nothing was sent.
    NoChanges,
    /// The gateway accepted the request.
    Saved(SaveReceipt),
}

#[derive(Debug, Clone)]
pub struct SplitSession {
    id: Uuid,
    settings: SessionConfig,
    monthly_amount: f64,
    floor: MinimumFloor,
    causes: Vec<Cause>,
    attributions: BTreeMap<CauseId, CollectiveId>,
    seed: PercentageMap,
    percentages: PercentageMap,
    inputs: InputBuffer,
}

impl SplitSession {
    /// Opens a session over `causes`, seeded from `saved` when it carries
    /// percentages for any of them.
    #[instrument(skip_all, fields(cause_count = causes.len(), monthly_amount = monthly_amount))]
    pub fn open(
        causes: Vec<Cause>,
        saved: &[BoxCause],
        monthly_amount: f64,
        config: &AllocatorConfig,
    ) -> SplitResult<Self> {
        config.validate()?;

        if causes.is_empty() {
            return Err(SplitError::NoCauses);
        }
        let mut seen = HashSet::with_capacity(causes.len());
        for cause in &causes {
            if !seen.insert(cause.id) {
                return Err(SplitError::DuplicateCause { cause_id: cause.id });
            }
        }

        let floor = MinimumFloor::try_new(&config.floor, monthly_amount)
            .map_err(|_| SplitError::InvalidMonthlyAmount { amount: monthly_amount })?;
        if !floor.is_feasible_for(causes.len()) {
            return Err(SplitError::InfeasibleFloor {
                cause_count: causes.len(),
                floor: floor.percentage(),
            });
        }

        let seed = seed_percentages(&causes, saved, floor);
        let attributions = attributions(&causes, saved);
        let inputs = InputBuffer::mirror(&seed);
        let id = Uuid::new_v4();

        info!(session_id = %id, floor = floor.percentage(), "Opened donation split session");

        Ok(Self {
            id,
            settings: config.session.clone(),
            monthly_amount,
            floor,
            causes,
            attributions,
            percentages: seed.clone(),
            seed,
            inputs,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn causes(&self) -> &[Cause] {
        &self.causes
    }

    pub fn monthly_amount(&self) -> f64 {
        self.monthly_amount
    }

    /// Smallest percentage any cause may hold.
    pub fn floor(&self) -> f64 {
        self.floor.percentage()
    }

    pub fn percentages(&self) -> &PercentageMap {
        &self.percentages
    }

    pub fn percentage(&self, cause_id: CauseId) -> Option<f64> {
        self.percentages.get(cause_id)
    }

    /// Text currently shown in the cause's numeric input.
    pub fn input_text(&self, cause_id: CauseId) -> Option<&str> {
        self.inputs.text(cause_id)
    }

    pub fn focus_state(&self, cause_id: CauseId) -> Option<FocusState> {
        self.inputs.state(cause_id)
    }

    /// Slider change. The value is snapped to the slider step and applied
    /// immediately.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn drag_slider(&mut self, cause_id: CauseId, value: f64) -> SplitResult<()> {
        self.ensure_known(cause_id)?;
        let step = self.settings.slider_step;
        let snapped = (value / step).round() * step;
        self.apply(cause_id, snapped);
        Ok(())
    }

    /// Stepper "+" click.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn increment(&mut self, cause_id: CauseId) -> SplitResult<()> {
        self.step(cause_id, self.settings.stepper_increment)
    }

    /// Stepper "-" click.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn decrement(&mut self, cause_id: CauseId) -> SplitResult<()> {
        self.step(cause_id, -self.settings.stepper_increment)
    }

    /// Gives the cause's input focus. Focus moving away from another input
    /// blurs that input first, committing what was typed there.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn focus(&mut self, cause_id: CauseId) -> SplitResult<()> {
        self.ensure_known(cause_id)?;
        if let Some(previous) = self.inputs.focused() {
            if previous != cause_id {
                self.blur(previous)?;
            }
        }
        self.inputs.focus(cause_id);
        Ok(())
    }

    /// Replaces the raw text of the focused input. No redistribution happens
    /// until blur.
    pub fn type_text(&mut self, cause_id: CauseId, text: &str) -> SplitResult<()> {
        self.ensure_known(cause_id)?;
        if !self.inputs.set_text(cause_id, text) {
            return Err(SplitError::NotFocused { cause_id });
        }
        Ok(())
    }

    /// Commits a focused input: parse, clamp to `[floor, 100]`, write back,
    /// redistribute. Blurring an unfocused input does nothing.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn blur(&mut self, cause_id: CauseId) -> SplitResult<()> {
        self.ensure_known(cause_id)?;
        let Some(text) = self.inputs.release(cause_id) else {
            return Ok(());
        };

        let value = self.floor.clamp(parse_percentage(&text));
        self.inputs.write(cause_id, value);
        debug!(%cause_id, typed = %text, value, "Committing typed percentage");
        self.apply(cause_id, value);
        Ok(())
    }

    /// Enter commits a focused input; other keys are left to the input.
    pub fn key_down(&mut self, cause_id: CauseId, key: Key) -> SplitResult<()> {
        self.ensure_known(cause_id)?;
        if key == Key::Enter && self.inputs.state(cause_id) == Some(FocusState::Focused) {
            return self.blur(cause_id);
        }
        Ok(())
    }

    /// Every cause back to `max(floor, 100 / N)`, normalized; all inputs
    /// rewritten.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn reset_to_equal_split(&mut self) {
        self.percentages = equal_split(self.causes.iter().map(|cause| cause.id), self.floor);
        self.inputs.rewrite_all(&self.percentages);
        debug!(percentages = ?self.percentages, "Reset to equal split");
    }

    /// Whether any cause moved from its seed by more than the change
    /// threshold.
    pub fn has_changes(&self) -> bool {
        self.percentages.iter().any(|(cause_id, percentage)| {
            let original = self.seed.get(cause_id).unwrap_or(0.0);
            (percentage - original).abs() > self.settings.change_threshold
        })
    }

    /// Save payload for the current split, causes in session order.
    pub fn build_request(&self) -> UpdateDonationBoxRequest {
        let causes = self
            .causes
            .iter()
            .map(|cause| CauseAllocation {
                cause_id: cause.id,
                percentage: round2(self.percentages.get(cause.id).unwrap_or(0.0)),
                attributed_collective: self.attributions.get(&cause.id).copied(),
            })
            .collect();

        UpdateDonationBoxRequest {
            monthly_amount: format!("{:.*}", AMOUNT_DECIMALS, self.monthly_amount),
            causes,
        }
    }

    /// Drops every edit since the last seed.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn discard(&mut self) {
        self.percentages = self.seed.clone();
        self.inputs = InputBuffer::mirror(&self.seed);
        debug!("Discarded unsaved edits");
    }

    /// Sends the split to `gateway` unless nothing changed. On success the
    /// saved split becomes the new seed; on failure the edits are kept.
    #[instrument(skip_all, fields(session_id = %self.id))]
    pub async fn save<G>(&mut self, gateway: &G) -> SplitResult<SaveOutcome>
    where
        G: DonationBoxGateway + ?Sized,
    {
        if !self.has_changes() {
            info!("No changes to save");
            return Ok(SaveOutcome::NoChanges);
        }

        let request = self.build_request();
        match gateway.update_donation_box(&request).await {
            Ok(receipt) => {
                self.seed = self.percentages.clone();
                self.inputs = InputBuffer::mirror(&self.seed);
                info!(cause_count = request.causes.len(), "Saved donation split");
                Ok(SaveOutcome::Saved(receipt))
            }
            Err(err) => {
                warn!(error = %err, "Donation split save failed");
                Err(err.into())
            }
        }
    }

    fn step(&mut self, cause_id: CauseId, delta: f64) -> SplitResult<()> {
        let current = self.percentages.get(cause_id).ok_or(SplitError::UnknownCause { cause_id })?;
        let target = self.floor.clamp(current + delta);
        self.apply(cause_id, target);
        Ok(())
    }

    fn apply(&mut self, cause_id: CauseId, requested: f64) {
        self.percentages = redistribute(&self.percentages, cause_id, requested, self.floor);
        self.inputs.sync(&self.percentages);
        debug!(
            %cause_id,
            requested,
            applied = self.percentages.get(cause_id),
            "Redistributed split"
        );
    }

    fn ensure_known(&self, cause_id: CauseId) -> SplitResult<()> {
        if self.percentages.contains(cause_id) {
            Ok(())
        } else {
            Err(SplitError::UnknownCause { cause_id })
        }
    }
}
