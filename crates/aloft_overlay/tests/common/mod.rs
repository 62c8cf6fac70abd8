//! Recording renderer shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use aloft_geometry::{BoundingBox, Solution};
use aloft_overlay::{
    CloseReason, LayerId, LayerRenderer, MeasuredBox, MountStatus, PopoverState, SurfaceMode,
};
use parking_lot::Mutex;

/// One renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Mount(LayerId, SurfaceMode),
    Unmount(LayerId),
    Place(LayerId, Solution),
    Transition(LayerId, PopoverState),
}

/// Records every call. Layers with a registered panel mount synchronously,
/// the rest report `Pending`.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
    pub panels: HashMap<LayerId, MeasuredBox>,
}

impl Recorder {
    pub fn with_panel(layer: LayerId, panel: &MeasuredBox) -> Self {
        let mut recorder = Self::default();
        recorder.panels.insert(layer, panel.clone());
        recorder
    }

    pub fn transitions(&self, layer: LayerId) -> Vec<PopoverState> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Transition(l, state) if *l == layer => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    pub fn unmounts(&self, layer: LayerId) -> usize {
        self.count(|call| *call == Call::Unmount(layer))
    }

    pub fn places(&self, layer: LayerId) -> usize {
        self.count(|call| matches!(call, Call::Place(l, _) if *l == layer))
    }
}

impl LayerRenderer for Recorder {
    fn mount(&mut self, layer: LayerId, surface: SurfaceMode) -> MountStatus {
        self.calls.push(Call::Mount(layer, surface));
        match self.panels.get(&layer) {
            Some(panel) => MountStatus::Ready(panel.handle()),
            None => MountStatus::Pending,
        }
    }

    fn unmount(&mut self, layer: LayerId) {
        self.calls.push(Call::Unmount(layer));
    }

    fn place(&mut self, layer: LayerId, solution: &Solution) {
        self.calls.push(Call::Place(layer, *solution));
    }

    fn transition(&mut self, layer: LayerId, state: PopoverState) {
        self.calls.push(Call::Transition(layer, state));
    }
}

/// Collects close requests.
pub fn close_log() -> (Arc<Mutex<Vec<CloseReason>>>, impl FnMut(&CloseReason) + Send + 'static) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    (log, move |reason: &CloseReason| sink.lock().push(reason.clone()))
}

pub const fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// The anchor from the dropdown scenario.
pub fn anchor() -> MeasuredBox {
    MeasuredBox::attached(BoundingBox::new(100.0, 50.0, 40.0, 20.0))
}

/// A 200x80 panel.
pub fn panel() -> MeasuredBox {
    MeasuredBox::attached(BoundingBox::new(0.0, 0.0, 200.0, 80.0))
}
