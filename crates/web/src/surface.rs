use std::sync::RwLock;

use chrono::{DateTime, Local};
use flush::surface::{Notification, PathLayer, Presenter, RenderSurface};
use model::{
    camera::{CameraEase, CameraPose, FitBounds},
    coordinate::Coordinate,
    facility::Facility,
};
use serde::Serialize;
use tokio::sync::broadcast;

/// Everything the browser has to draw, in the order it happened.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MapEvent {
    Camera { pose: CameraPose },
    Ease { ease: CameraEase },
    FitBounds { fit: FitBounds },
    Paths {
        layer: PathLayer,
        paths: Vec<Vec<Coordinate>>,
    },
    Highlight { facility: Facility },
    Notification { notification: Notification },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedEvent {
    pub at: DateTime<Local>,
    #[serde(flatten)]
    pub event: MapEvent,
}

/// The latest state of the map, for clients that connect late.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub camera: Option<CameraPose>,
    pub route: Vec<Vec<Coordinate>>,
    pub outfalls: Vec<Vec<Coordinate>>,
    pub highlighted: Option<Facility>,
    pub notification: Option<Notification>,
}

/// Render surface that forwards everything to connected browsers.
#[derive(Debug)]
pub struct WebSurface {
    events: broadcast::Sender<TimedEvent>,
    view: RwLock<MapView>,
}

impl WebSurface {
    pub fn new(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity);
        Self {
            events,
            view: RwLock::new(MapView::default()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimedEvent> {
        self.events.subscribe()
    }

    pub fn view(&self) -> MapView {
        match self.view.read() {
            Ok(view) => view.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update<F: FnOnce(&mut MapView)>(&self, f: F) {
        match self.view.write() {
            Ok(mut view) => f(&mut view),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    fn publish(&self, event: MapEvent) {
        // nobody listening is fine
        let _ = self.events.send(TimedEvent {
            at: Local::now(),
            event,
        });
    }
}

impl RenderSurface for WebSurface {
    fn set_camera(&self, pose: CameraPose) {
        self.update(|view| view.camera = Some(pose));
        self.publish(MapEvent::Camera { pose });
    }

    fn set_paths(&self, layer: PathLayer, paths: Vec<Vec<Coordinate>>) {
        self.update(|view| match layer {
            PathLayer::Route => view.route = paths.clone(),
            PathLayer::Outfalls => view.outfalls = paths.clone(),
        });
        self.publish(MapEvent::Paths { layer, paths });
    }

    fn ease_camera(&self, ease: CameraEase) {
        self.publish(MapEvent::Ease { ease });
    }

    fn fit_bounds(&self, fit: FitBounds) {
        self.publish(MapEvent::FitBounds { fit });
    }

    fn highlight_facility(&self, facility: &Facility) {
        self.update(|view| view.highlighted = Some(facility.clone()));
        self.publish(MapEvent::Highlight {
            facility: facility.clone(),
        });
    }
}

impl Presenter for WebSurface {
    fn present(&self, notification: Notification) {
        log::debug!("presenting {:?}", notification);
        self.update(|view| view.notification = Some(notification.clone()));
        self.publish(MapEvent::Notification { notification });
    }
}

#[cfg(test)]
mod tests {
    use model::ExampleData;

    use super::*;

    #[test]
    fn events_reach_subscribers() {
        let surface = WebSurface::new(8);
        let mut events = surface.subscribe();
        surface.highlight_facility(&Facility::example_data());

        let event = events.try_recv().unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "highlight");
        assert_eq!(json["facility"]["name"], "Humber");
        assert!(json["at"].is_string());
    }

    #[test]
    fn view_keeps_the_latest_state() {
        let surface = WebSurface::new(8);
        let route = vec![vec![
            Coordinate::new(-79.50, 43.70),
            Coordinate::new(-79.49, 43.63),
        ]];
        surface.set_paths(PathLayer::Route, route.clone());
        surface.present(Notification::FacilityReached {
            facility: "Humber".to_owned(),
        });

        let view = surface.view();
        assert_eq!(view.route, route);
        assert!(view.outfalls.is_empty());
        assert!(matches!(
            view.notification,
            Some(Notification::FacilityReached { .. })
        ));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let surface = WebSurface::new(1);
        surface.set_camera(CameraPose {
            position: Coordinate::new(0.0, 0.0),
            altitude_m: 300.0,
            look_at: Coordinate::new(0.0, 1.0),
        });
        assert!(surface.view().camera.is_some());
    }
}
