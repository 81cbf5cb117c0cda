use smallvec::SmallVec;
use std::str::FromStr;

use crate::state::SceneState;

pub type ListenerId = u32;

type StateListener = Box<dyn FnMut(&SceneState)>;
type SignalListener = Box<dyn FnMut()>;

/// Event names as exposed to script callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEventKind {
    StateChange,
    Ready,
    ContextLost,
}

impl SceneEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SceneEventKind::StateChange => "statechange",
            SceneEventKind::Ready => "ready",
            SceneEventKind::ContextLost => "contextlost",
        }
    }
}

impl FromStr for SceneEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "statechange" => Ok(SceneEventKind::StateChange),
            "ready" => Ok(SceneEventKind::Ready),
            "contextlost" => Ok(SceneEventKind::ContextLost),
            other => Err(format!("unknown scene event '{other}'")),
        }
    }
}

/// Typed subscriber lists, one per event kind. Dispatch is synchronous: an
/// emit returns only after every listener has run.
#[derive(Default)]
pub struct EventChannel {
    next_id: ListenerId,
    state_change: SmallVec<[(ListenerId, StateListener); 4]>,
    ready: SmallVec<[(ListenerId, SignalListener); 2]>,
    context_lost: SmallVec<[(ListenerId, SignalListener); 2]>,
}

impl EventChannel {
    fn allocate_id(&mut self) -> ListenerId {
        self.next_id += 1;
        self.next_id
    }

    pub fn on_state_change(&mut self, listener: impl FnMut(&SceneState) + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.state_change.push((id, Box::new(listener)));
        id
    }

    pub fn on_ready(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.ready.push((id, Box::new(listener)));
        id
    }

    pub fn on_context_lost(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.context_lost.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener of any kind. Returns false for unknown ids.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.len();
        self.state_change.retain(|(lid, _)| *lid != id);
        self.ready.retain(|(lid, _)| *lid != id);
        self.context_lost.retain(|(lid, _)| *lid != id);
        self.len() != before
    }

    pub fn len(&self) -> usize {
        self.state_change.len() + self.ready.len() + self.context_lost.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.state_change.clear();
        self.ready.clear();
        self.context_lost.clear();
    }

    pub(crate) fn emit_state_change(&mut self, snapshot: &SceneState) {
        for (_, listener) in self.state_change.iter_mut() {
            listener(snapshot);
        }
    }

    pub(crate) fn emit_ready(&mut self) {
        for (_, listener) in self.ready.iter_mut() {
            listener();
        }
    }

    pub(crate) fn emit_context_lost(&mut self) {
        for (_, listener) in self.context_lost.iter_mut() {
            listener();
        }
    }
}
