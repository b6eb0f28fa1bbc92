//! Call-Graph Tracer
//!
//! Catalog entry points announce themselves with [`enter`]. While an
//! [`Activation`] is alive on the current thread, every announced unit is
//! recorded once, by identity, in first-entry order.

use std::cell::RefCell;
use std::collections::HashSet;

use tracing::debug;

use crate::catalog::Specification;
use crate::engine::{guarded, Trial};
use crate::unit::{CodeUnit, Origin, UnitRef};

/// Distinct units in the order they were first entered
#[derive(Debug, Default)]
pub struct Recording {
    order: Vec<&'static CodeUnit>,
    seen: HashSet<UnitRef>,
}

impl Recording {
    fn record(&mut self, unit: &'static CodeUnit) {
        if self.seen.insert(UnitRef(unit)) {
            self.order.push(unit);
        }
    }

    pub fn contains(&self, unit: &'static CodeUnit) -> bool {
        self.seen.contains(&UnitRef(unit))
    }

    pub fn units(&self) -> &[&'static CodeUnit] {
        &self.order
    }

    pub fn into_units(self) -> Vec<&'static CodeUnit> {
        self.order
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<Recording>> = const { RefCell::new(None) };
}

/// Record entry into `unit` if a recorder is active on this thread
pub fn enter(unit: &'static CodeUnit) {
    ACTIVE.with(|active| {
        if let Ok(mut slot) = active.try_borrow_mut() {
            if let Some(recording) = slot.as_mut() {
                recording.record(unit);
            }
        }
    });
}

/// Whether a recorder is active on this thread
pub fn is_active() -> bool {
    ACTIVE.with(|active| active.borrow().is_some())
}

/// Scoped recorder. Dropping it, on any path, restores whatever was active before.
pub struct Activation {
    previous: Option<Option<Recording>>,
}

impl Activation {
    pub fn start() -> Self {
        let previous = ACTIVE.with(|active| active.replace(Some(Recording::default())));
        Self {
            previous: Some(previous),
        }
    }

    /// Stop recording and return what was seen
    pub fn finish(mut self) -> Recording {
        self.restore().unwrap_or_default()
    }

    fn restore(&mut self) -> Option<Recording> {
        let previous = self.previous.take()?;
        ACTIVE.with(|active| active.replace(previous))
    }
}

impl Drop for Activation {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Record the units entered while running `spec` against `trial` once.
///
/// The specification's and candidate's own units are dropped; the rest is
/// limited to building blocks, plus specification sources when
/// `include_specifications` is set. Aggregation files never count.
pub fn trace_dependencies(
    spec: &Specification,
    trial: &Trial,
    include_specifications: bool,
) -> Vec<&'static CodeUnit> {
    let activation = Activation::start();
    let outcome = guarded(|| spec.check(trial));
    let recording = activation.finish();

    if let Err(fault) = &outcome {
        debug!("Traced run of {} with {} failed: {}", spec.name(), trial, fault);
    }

    let excluded = [UnitRef(spec.unit()), UnitRef(trial.candidate().unit())];
    recording
        .into_units()
        .into_iter()
        .filter(|unit| !excluded.contains(&UnitRef(*unit)))
        .filter(|unit| match unit.origin() {
            Origin::BuildingBlocks => true,
            Origin::Specifications => include_specifications && !unit.source().is_entry(),
            Origin::Other => false,
        })
        .collect()
}
