//! Draw-session state machine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geometry::{Geometry, MapPoint};
use crate::overlay::{Graphic, Overlay};
use crate::store::{GeometryStore, PersistedGeometryRecord};
use crate::symbol::Symbol;

/// What kind of geometry the user chose to sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreationMode {
    Point,
    Polyline,
    Polygon,
}

/// Where the session is between "nothing happening" and "sketch in progress".
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No mode chosen; taps are ignored.
    Idle,
    /// A mode is chosen but no vertices accumulated yet.
    ModeSelected(CreationMode),
    /// Vertices are being accumulated for a polyline or polygon.
    Drawing {
        mode: CreationMode,
        vertices: Vec<MapPoint>,
    },
}

/// Owns the transient state of an in-progress sketch: the selected creation
/// mode, the accumulated vertices, and the preview overlay rebuilt after
/// every tap. Finished geometries go through the injected store and land in
/// the finalized overlay.
pub struct DrawSession {
    store: Arc<dyn GeometryStore>,
    state: SessionState,
    preview: Overlay,
    finalized: Overlay,
}

impl DrawSession {
    /// Create an idle session persisting through `store`.
    pub fn new(store: Arc<dyn GeometryStore>) -> Self {
        Self {
            store,
            state: SessionState::Idle,
            preview: Overlay::new(),
            finalized: Overlay::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    /// The in-progress preview layer (at most one graphic).
    pub fn preview(&self) -> &Overlay {
        &self.preview
    }

    /// Geometries finalized during this session.
    pub fn finalized(&self) -> &Overlay {
        &self.finalized
    }

    /// The geometry currently shown as preview, if any.
    pub fn preview_geometry(&self) -> Option<&Geometry> {
        self.preview.graphics().first().map(|g| &g.geometry)
    }

    /// Choose what to sketch next. Only valid while idle; at most one
    /// creation mode is active at a time, so a selection mid-sketch is
    /// ignored.
    pub fn select_mode(&mut self, mode: CreationMode) {
        if self.is_idle() {
            self.state = SessionState::ModeSelected(mode);
        }
    }

    /// Feed a map tap into the sketch. Ignored while idle.
    ///
    /// In point mode every tap replaces the preview marker. In polyline and
    /// polygon mode the tap appends a vertex and the preview is rebuilt; a
    /// one- or two-vertex area preview degenerates to the minimal shape,
    /// which is accepted rather than rejected.
    pub fn handle_tap(&mut self, point: MapPoint) {
        match &mut self.state {
            SessionState::Idle => {}
            SessionState::ModeSelected(CreationMode::Point) => {
                self.preview.clear();
                self.preview.add(Graphic::new(
                    Geometry::point(point),
                    Symbol::preview(CreationMode::Point),
                ));
            }
            SessionState::ModeSelected(mode) => {
                let mode = *mode;
                self.state = SessionState::Drawing {
                    mode,
                    vertices: vec![point],
                };
                self.rebuild_preview();
            }
            SessionState::Drawing { vertices, .. } => {
                vertices.push(point);
                self.rebuild_preview();
            }
        }
    }

    /// Abandon the sketch: back to idle, preview and vertices discarded,
    /// nothing persisted.
    pub fn cancel(&mut self) {
        self.state = SessionState::Idle;
        self.preview.clear();
    }

    /// Finalize the sketch.
    ///
    /// With no preview present this is a no-op apart from clearing the mode.
    /// Otherwise the preview geometry is persisted; only on success is it
    /// re-styled with its finalized symbol and moved into the finalized
    /// overlay, so the display never shows a geometry the store lost. A
    /// failed write is logged and the sketch is dropped. Either way the
    /// session returns to idle.
    pub fn save(&mut self) -> Option<PersistedGeometryRecord> {
        let Some(graphic) = self.preview.take().into_iter().next() else {
            self.state = SessionState::Idle;
            return None;
        };
        self.state = SessionState::Idle;

        let geometry = graphic.geometry;
        match self.store.save(&geometry) {
            Ok(record) => {
                let symbol = Symbol::finalized(&geometry);
                self.finalized.add(Graphic::new(geometry, symbol));
                Some(record)
            }
            Err(err) => {
                log::error!("Failed to persist geometry: {}", err);
                None
            }
        }
    }

    /// Rebuild the preview graphic from the accumulated vertices.
    fn rebuild_preview(&mut self) {
        let SessionState::Drawing { mode, vertices } = &self.state else {
            return;
        };
        let geometry = match mode {
            CreationMode::Polyline => Geometry::polyline(vertices.clone()),
            CreationMode::Polygon => Geometry::polygon(vertices.clone()),
            // Point previews are replaced directly in handle_tap.
            CreationMode::Point => return,
        };
        let symbol = Symbol::preview(*mode);
        self.preview.clear();
        self.preview.add(Graphic::new(geometry, symbol));
    }
}
