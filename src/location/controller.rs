//! LocationCaptureController: coordinates permission, position resolution,
//! map interaction, and address editing for one capture session.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::{Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info, warn};

use super::draft::{AddressDraft, AddressField};
use super::state::CapturePhase;
use super::view::{LocationCommit, LocationEvent, LocationView, Marker};
use crate::config::FlowConfig;
use crate::error::LocationError;
use crate::geo::{Coordinate, GeolocationProvider, Permission, Region};

/// Owns the state of one map-based address capture session.
///
/// All mutation goes through the methods below; the rendering layer reads
/// [`LocationView`] projections and listens for [`LocationEvent`]s.
pub struct LocationCaptureController {
    geo: Arc<dyn GeolocationProvider>,
    zoom_delta: f64,
    recenter_animation: Duration,
    phase: CapturePhase,
    origin: Option<Region>,
    viewport: Option<Region>,
    selection: Option<Coordinate>,
    draft: AddressDraft,
    tx: broadcast::Sender<LocationEvent>,
}

impl LocationCaptureController {
    pub fn new(geo: Arc<dyn GeolocationProvider>, config: &FlowConfig) -> Self {
        let (tx, _rx) = broadcast::channel(config.event_capacity.max(1));
        Self {
            geo,
            zoom_delta: config.zoom_delta,
            recenter_animation: config.recenter_animation,
            phase: CapturePhase::default(),
            origin: None,
            viewport: None,
            selection: None,
            draft: AddressDraft::default(),
            tx,
        }
    }

    /// Resolve the device position and center the map on it.
    ///
    /// Only runs from `Unresolved`; otherwise the call is ignored and the
    /// current origin (if any) is returned. On denial or a missing fix the
    /// session falls back to `Unresolved` and the error is returned. Nothing
    /// is retried; a later `start` is a fresh attempt.
    pub async fn start(&mut self) -> Result<Option<Region>, LocationError> {
        if self.phase != CapturePhase::Unresolved {
            debug!(phase = %self.phase, "Ignoring location start");
            return Ok(self.origin);
        }
        self.enter(CapturePhase::Resolving);

        // Dropping this future mid-resolution must leave the session startable
        let geo = Arc::clone(&self.geo);
        let guard = ResolvingGuard {
            phase: &mut self.phase,
        };
        let resolved = Self::resolve(geo.as_ref(), self.zoom_delta).await;
        guard.finish();

        match resolved {
            Ok(region) => {
                self.origin = Some(region);
                self.viewport = Some(region);
                self.selection = Some(region.center());
                self.enter(CapturePhase::Resolved);
                info!(
                    latitude = region.latitude,
                    longitude = region.longitude,
                    delta = region.latitude_delta,
                    "Device location resolved"
                );
                self.emit(LocationEvent::Resolved { region });
                Ok(Some(region))
            }
            Err(e) => {
                self.enter(CapturePhase::Unresolved);
                warn!(error = %e, "Location unavailable, map disabled");
                self.emit(LocationEvent::ResolutionFailed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn resolve(
        geo: &dyn GeolocationProvider,
        zoom_delta: f64,
    ) -> Result<Region, LocationError> {
        if geo.request_permission().await == Permission::Denied {
            return Err(LocationError::PermissionDenied);
        }
        let position = geo.current_position().await?;
        Region::around(position, zoom_delta)
    }

    /// Map tap: replaces the selection. Origin, viewport and draft are untouched.
    pub fn tap(&mut self, coordinate: Coordinate) {
        self.selection = Some(coordinate);
        debug!(%coordinate, phase = %self.phase, "Selection moved");
        self.emit(LocationEvent::SelectionChanged {
            selection: coordinate,
        });
    }

    /// Move the selection and viewport back to the resolved origin.
    ///
    /// Returns `false` (and does nothing) when no origin was ever resolved.
    pub fn recenter(&mut self) -> bool {
        let Some(origin) = self.origin else {
            debug!("Recenter ignored, no resolved origin");
            return false;
        };
        let center = origin.center();
        self.selection = Some(center);
        self.viewport = Some(origin);
        self.emit(LocationEvent::SelectionChanged { selection: center });
        self.emit(LocationEvent::AnimateToRegion {
            region: origin,
            duration_ms: self.recenter_animation.as_millis() as u64,
        });
        true
    }

    /// User pan or zoom: the map now shows `region`.
    ///
    /// Only meaningful once a map exists; returns `false` and ignores the
    /// request otherwise. Origin and selection are untouched.
    pub fn pan(&mut self, region: Region) -> bool {
        if self.viewport.is_none() {
            debug!("Pan ignored, no map");
            return false;
        }
        self.viewport = Some(region);
        debug!(
            latitude = region.latitude,
            longitude = region.longitude,
            "Viewport moved"
        );
        true
    }

    /// Replace one address field. Allowed in every phase.
    pub fn set_field(&mut self, field: AddressField, value: impl Into<String>) {
        let value = value.into();
        self.draft.set(field, value.clone());
        self.emit(LocationEvent::DraftChanged { field, value });
    }

    /// Like [`set_field`](Self::set_field), keyed by the form's field name.
    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), LocationError> {
        let field: AddressField = name.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Snapshot the selection and draft. Session state is left as is.
    pub fn commit(&self) -> LocationCommit {
        let commit = LocationCommit {
            selection: self.selection,
            address: self.draft.clone(),
            committed_at: Utc::now(),
        };
        info!(
            selection = ?commit.selection,
            address = %commit.address.summary(),
            "Location committed"
        );
        commit
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    pub fn origin(&self) -> Option<Region> {
        self.origin
    }

    pub fn viewport(&self) -> Option<Region> {
        self.viewport
    }

    pub fn selection(&self) -> Option<Coordinate> {
        self.selection
    }

    pub fn draft(&self) -> &AddressDraft {
        &self.draft
    }

    /// Current read-only projection for the view.
    pub fn projection(&self) -> LocationView {
        LocationView {
            phase: self.phase,
            origin: self.origin,
            viewport: self.viewport,
            selection: self.selection,
            draft: self.draft.clone(),
            markers: self.markers(),
        }
    }

    /// No map layer means no markers. With a map, the selection is pinned,
    /// or the device position when nothing is selected.
    fn markers(&self) -> Vec<Marker> {
        let Some(viewport) = self.viewport else {
            return Vec::new();
        };
        match self.selection {
            Some(coordinate) => vec![Marker {
                coordinate,
                title: "Selected Location".to_string(),
            }],
            None => vec![Marker {
                coordinate: viewport.center(),
                title: "Your Location".to_string(),
            }],
        }
    }

    /// Subscribe to controller events.
    pub fn subscribe(&self) -> broadcast::Receiver<LocationEvent> {
        self.tx.subscribe()
    }

    /// Controller events as a stream; lagged events are skipped.
    pub fn events(&self) -> impl Stream<Item = LocationEvent> + Send + use<> {
        BroadcastStream::new(self.tx.subscribe()).filter_map(|r| async move { r.ok() })
    }

    fn enter(&mut self, target: CapturePhase) {
        debug_assert!(
            self.phase.can_transition_to(target),
            "invalid capture transition {} -> {}",
            self.phase,
            target
        );
        self.phase = target;
    }

    fn emit(&self, event: LocationEvent) {
        // No subscribers is fine
        let _ = self.tx.send(event);
    }
}

/// Puts an abandoned resolution back to `Unresolved`.
struct ResolvingGuard<'a> {
    phase: &'a mut CapturePhase,
}

impl ResolvingGuard<'_> {
    /// Resolution ran to completion; the caller sets the next phase.
    fn finish(self) {
        std::mem::forget(self);
    }
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        if *self.phase == CapturePhase::Resolving {
            debug!("Location start abandoned");
            *self.phase = CapturePhase::Unresolved;
        }
    }
}
