//! The session aggregate.
//!
//! A drop flows one way: `drop_at` resolves the target, the tracker
//! scores it, the coordinator emits intents, and the batcher checks for
//! round or game completion. Renderers report back through the
//! `on_*_complete` calls. Every mutation goes through a method here.

use im::Vector;
use tracing::{debug, info};

use super::outcome::{MatchOutcome, SessionPhase};
use super::snapshot::{DestinationInventory, SessionSnapshot};
use crate::catalog::{Catalog, Destination, Item};
use crate::core::{DestinationId, GameRng, ItemId, OfferingId, Point, Rect, SessionConfig, StageGeometry};
use crate::effects::{EffectCoordinator, PulseKind};
use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::rounds::{partition, BatchLoad, BatchStatus, RoundBatcher};
use crate::scoring::{FactionProgress, ScoreTracker};
use crate::targeting::{resolve_drop, Resolution};

/// A drag in progress.
#[derive(Clone, Debug)]
struct PendingDrag {
    item: ItemId,
    /// Tray slot rect, client coordinates.
    origin: Rect,
}

/// A game session: rounds, scoring, intents and inventories.
///
/// ## Example
///
/// ```
/// use offering_engine::catalog::{Destination, Item};
/// use offering_engine::core::{Point, Rect, SessionConfig, StageGeometry};
/// use offering_engine::session::{Session, SessionPhase};
///
/// let destinations = vec![Destination::new("kie", "KIE")];
/// let items = vec![Item::new("anta", "anta", "kie")];
/// let mut session = Session::new(items, destinations, SessionConfig::default().with_seed(7)).unwrap();
///
/// let stage = StageGeometry::new(Rect::new(0.0, 0.0, 800.0, 600.0), 50.0)
///     .with_anchor("kie", Point::new(400.0, 300.0));
///
/// assert!(session.begin_drag(&"anta".into(), Rect::new(10.0, 10.0, 40.0, 40.0)));
/// let outcome = session.drop_at(Point::new(405.0, 300.0), &stage).unwrap();
///
/// assert!(outcome.is_correct());
/// assert_eq!(session.score(), 100);
/// assert_eq!(session.phase(), SessionPhase::Complete);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    seed: u64,

    /// Destinations with supply, one per queue, in queue order.
    destinations: Vec<Destination>,

    batcher: RoundBatcher,
    scoring: ScoreTracker,
    effects: EffectCoordinator,

    phase: SessionPhase,
    drag: Option<PendingDrag>,
    spotlight: Option<Item>,
    events: Vec<SessionEvent>,
    total_items: usize,
}

impl Session {
    /// Start a session and load the first batch.
    ///
    /// Fails with [`SessionError::NoPlayableRounds`] when no destination
    /// has supply or the round cap is zero.
    pub fn new(
        items: Vec<Item>,
        destinations: Vec<Destination>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let partition = partition(
            items,
            &destinations,
            config.cap_rounds,
            &mut rng.for_context("partition"),
        )?;

        let scoring = ScoreTracker::new(&config, partition.queues.iter().flat_map(|q| q.items.iter()));
        let total_items = partition.total_items();
        let destinations: Vec<_> = partition
            .queues
            .iter()
            .filter_map(|q| destinations.iter().find(|d| d.id == q.destination).cloned())
            .collect();

        let mut session = Self {
            seed: rng.seed(),
            config,
            destinations,
            batcher: RoundBatcher::new(partition, rng.for_context("tray")),
            scoring,
            effects: EffectCoordinator::new(),
            phase: SessionPhase::Ready,
            drag: None,
            spotlight: None,
            events: Vec::new(),
            total_items,
        };

        info!(
            seed = session.seed,
            destinations = session.destinations.len(),
            max_rounds = session.batcher.max_rounds(),
            total_items,
            "session started"
        );
        session.load_batch();
        Ok(session)
    }

    /// Start a session from a validated catalog.
    pub fn from_catalog(catalog: &Catalog, config: SessionConfig) -> Result<Self, SessionError> {
        Self::new(catalog.items().to_vec(), catalog.destinations().to_vec(), config)
    }

    // === Drag lifecycle ===

    /// Record a drag of a tray item from `origin` (its slot rect, client
    /// coordinates). Returns false if the item is not in the tray or the
    /// session is not accepting drops. A new drag replaces a pending one.
    pub fn begin_drag(&mut self, item: &ItemId, origin: Rect) -> bool {
        if self.phase != SessionPhase::Ready || self.batcher.find(item).is_none() {
            return false;
        }
        self.drag = Some(PendingDrag {
            item: item.clone(),
            origin,
        });
        true
    }

    /// Drag cancelled without a drop. Clears the pending drag, nothing else.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Drop the dragged item at `client` (client coordinates).
    ///
    /// Always clears the pending drag. Returns `None` when there was no
    /// drag, the session is not `Ready`, or the item has left the tray.
    pub fn drop_at(&mut self, client: Point, stage: &StageGeometry) -> Option<MatchOutcome> {
        let drag = self.drag.take()?;
        if self.phase != SessionPhase::Ready {
            return None;
        }
        let item = self.batcher.find(&drag.item)?.clone();

        let point = stage.to_local(client);
        let resolution = resolve_drop(point, &stage.anchors, stage.snap_radius);
        debug!(
            item = %item.id,
            x = point.x,
            y = point.y,
            resolved = ?resolution.as_ref().map(|r| &r.destination),
            "drop"
        );

        let outcome = match resolution {
            Some(resolution) if resolution.destination == item.destination => {
                self.accept(item, resolution, point)
            }
            other => {
                let origin = stage.local_center_of(drag.origin);
                self.reject(item, other.map(|r| r.destination), point, origin)
            }
        };
        Some(outcome)
    }

    fn accept(&mut self, item: Item, resolution: Resolution, point: Point) -> MatchOutcome {
        self.batcher.take(&item.id);
        self.effects.cancel_return_for(&item.id);

        let award = self.scoring.record_correct(&item);
        self.events.extend(award.cues);

        self.effects.show_pulse(resolution.anchor, PulseKind::Correct);
        let offering = self.effects.launch_offering(
            item.clone(),
            resolution.destination.clone(),
            point,
            resolution.anchor,
        );

        let outcome = MatchOutcome::Correct {
            item: item.id.clone(),
            destination: resolution.destination,
            offering,
            points: award.points,
        };
        self.spotlight = Some(item);
        self.check_batch();
        outcome
    }

    fn reject(
        &mut self,
        item: Item,
        resolved: Option<DestinationId>,
        point: Point,
        origin: Point,
    ) -> MatchOutcome {
        let cues = self.scoring.record_incorrect();
        self.events.extend(cues);

        self.effects.show_pulse(point, PulseKind::Incorrect);
        let id = item.id.clone();
        self.effects.start_return(item, point, origin);

        MatchOutcome::Incorrect { item: id, resolved }
    }

    // === Rounds ===

    fn check_batch(&mut self) {
        match self.batcher.status() {
            BatchStatus::InProgress => {}
            BatchStatus::RoundComplete => {
                let round = self.batcher.round_index();
                info!(round, score = self.scoring.score(), "round complete");
                self.phase = SessionPhase::RoundTransition;
                self.events.push(SessionEvent::RoundComplete { round });
            }
            BatchStatus::GameComplete => self.finish(),
        }
    }

    fn load_batch(&mut self) -> bool {
        match self.batcher.load_next_batch() {
            BatchLoad::Loaded { round, size } => {
                self.effects.reset_round_effects();
                self.spotlight = None;
                self.phase = SessionPhase::Ready;
                self.events.push(SessionEvent::BatchLoaded { round, size });
                true
            }
            BatchLoad::Exhausted => {
                self.finish();
                false
            }
            BatchLoad::Pending => false,
        }
    }

    fn finish(&mut self) {
        if self.phase == SessionPhase::Complete {
            return;
        }
        info!(
            score = self.scoring.score(),
            max_streak = self.scoring.max_streak(),
            rewards = self.scoring.reward_count(),
            "game complete"
        );
        self.phase = SessionPhase::Complete;
        self.drag = None;
        self.events.push(SessionEvent::GameComplete);
    }

    /// Load the next batch after a round transition. The shell calls this
    /// once its presentation delay has passed. Returns false outside
    /// `RoundTransition`.
    pub fn advance_round(&mut self) -> bool {
        if self.phase != SessionPhase::RoundTransition {
            return false;
        }
        self.load_batch()
    }

    // === Completion callbacks ===

    /// The renderer finished the feedback pulse.
    pub fn on_pulse_complete(&mut self) -> bool {
        self.effects.complete_pulse()
    }

    /// The renderer finished the return animation; the item shows in the
    /// tray again.
    pub fn on_return_complete(&mut self) -> bool {
        self.effects.complete_return().is_some()
    }

    /// The renderer finished an offering; its item joins the destination
    /// inventory. Returns false for unknown or already-delivered ids.
    pub fn on_offering_complete(&mut self, offering: OfferingId) -> bool {
        match self.effects.complete_offering(offering) {
            Some(delivered) => {
                self.events.push(SessionEvent::OfferingDelivered {
                    offering,
                    item: delivered.item.id,
                    destination: delivered.destination,
                });
                true
            }
            None => false,
        }
    }

    /// Deliver every in-flight offering now. Returns how many were
    /// delivered.
    pub fn flush_offerings(&mut self) -> usize {
        let flushed = self.effects.flush_offerings();
        let count = flushed.len();
        self.events.extend(flushed.into_iter().map(|o| SessionEvent::OfferingDelivered {
            offering: o.id,
            item: o.item.id,
            destination: o.destination,
        }));
        count
    }

    // === Events ===

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queued events not yet drained.
    #[must_use]
    pub fn pending_events(&self) -> &[SessionEvent] {
        &self.events
    }

    // === Queries ===

    /// Read-only view for one render tick.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let inventories = self
            .destinations
            .iter()
            .map(|d| DestinationInventory {
                destination: d.id.clone(),
                items: self.effects.inventory(&d.id),
                recent: self.effects.recent_delivery(&d.id).cloned(),
            })
            .collect();

        SessionSnapshot {
            phase: self.phase,
            round_index: self.batcher.round_index(),
            max_rounds: self.batcher.max_rounds(),
            active_batch: self.batcher.active().clone(),
            score: self.scoring.score(),
            streak: self.scoring.streak(),
            max_streak: self.scoring.max_streak(),
            reward_count: self.scoring.reward_count(),
            completed_total: self.scoring.completed_total(),
            total_items: self.scoring.total_items(),
            faction_progress: self.scoring.faction_progress().to_vec(),
            inventories,
            pulse: self.effects.pulse().cloned(),
            returning: self.effects.returning().cloned(),
            entering: self.effects.entering().to_vec(),
            hidden_item: self.hidden_item().cloned(),
            spotlight: self.spotlight.clone(),
            animation_epoch: self.effects.animation_epoch(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Seed actually used, for replaying a session.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Participating destinations.
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    #[must_use]
    pub fn active_batch(&self) -> &Vector<Item> {
        self.batcher.active()
    }

    #[must_use]
    pub fn round_index(&self) -> usize {
        self.batcher.round_index()
    }

    #[must_use]
    pub fn max_rounds(&self) -> usize {
        self.batcher.max_rounds()
    }

    /// Items still queued for one destination.
    #[must_use]
    pub fn queued(&self, destination: &DestinationId) -> usize {
        self.batcher.queue_len(destination)
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.scoring.score()
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.scoring.streak()
    }

    #[must_use]
    pub fn max_streak(&self) -> u32 {
        self.scoring.max_streak()
    }

    #[must_use]
    pub fn reward_count(&self) -> u32 {
        self.scoring.reward_count()
    }

    #[must_use]
    pub fn completed_total(&self) -> u32 {
        self.scoring.completed_total()
    }

    #[must_use]
    pub fn faction_progress(&self) -> &[FactionProgress] {
        self.scoring.faction_progress()
    }

    /// Items in play this session (after truncation to `max_rounds`).
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    #[must_use]
    pub fn inventory(&self, destination: &DestinationId) -> Vector<Item> {
        self.effects.inventory(destination)
    }

    /// Intents and inventories.
    #[must_use]
    pub fn effects(&self) -> &EffectCoordinator {
        &self.effects
    }

    /// Item currently being dragged.
    #[must_use]
    pub fn dragging(&self) -> Option<&ItemId> {
        self.drag.as_ref().map(|d| &d.item)
    }

    /// Tray item the renderer should hide: dragged, else returning.
    #[must_use]
    pub fn hidden_item(&self) -> Option<&ItemId> {
        self.dragging()
            .or_else(|| self.effects.returning().map(|r| &r.item.id))
    }

    #[must_use]
    pub fn spotlight(&self) -> Option<&Item> {
        self.spotlight.as_ref()
    }

    /// Queued + tray + in flight + delivered. Equals `total_items` at all
    /// times.
    #[must_use]
    pub fn accounted_items(&self) -> usize {
        self.batcher.queued_len()
            + self.batcher.active().len()
            + self.effects.in_flight_count()
            + self.effects.delivered_count()
    }
}
