//! Bridges the school collection to the map widget.
//!
//! The display is constructed once. Markers are fully redrawn on every
//! collection replacement: all previous markers are removed and one marker
//! per school is created, no diffing. The widget owns a single popup, so
//! opening it for one marker replaces whatever it showed before.

use crate::capability::{MapCapability, MarkerEvent};
use crate::config::MapSettings;
use crate::error::LoadError;
use crate::popup::{render_popup, status_icon_url};
use ssm_schools::{Coordinates, School};
use std::cell::RefCell;
use std::rc::Rc;

/// Invoked with the school id when a marker is clicked.
pub type SelectCallback = Rc<dyn Fn(&str)>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DisplayPhase {
    Uninitialized,
    Initialized,
}

struct RenderedMarker<H> {
    school_id: String,
    position: Coordinates,
    popup: String,
    handle: H,
}

/// Owns the display lifecycle and the marker registry.
///
/// The capability sits behind `Rc<RefCell<_>>` because marker callbacks
/// need to reach the shared popup after `render` has returned.
pub struct MapAdapter<M: MapCapability> {
    map: Rc<RefCell<M>>,
    settings: MapSettings,
    phase: DisplayPhase,
    markers: Vec<RenderedMarker<M::Marker>>,
}

impl<M: MapCapability + 'static> MapAdapter<M> {
    pub fn new(capability: M, settings: MapSettings) -> Self {
        Self::with_shared(Rc::new(RefCell::new(capability)), settings)
    }

    pub fn with_shared(map: Rc<RefCell<M>>, settings: MapSettings) -> Self {
        Self {
            map,
            settings,
            phase: DisplayPhase::Uninitialized,
            markers: Vec::new(),
        }
    }

    pub fn capability(&self) -> Rc<RefCell<M>> {
        Rc::clone(&self.map)
    }

    pub fn is_capability_ready(&self) -> bool {
        self.map.borrow().is_ready()
    }

    pub fn phase(&self) -> DisplayPhase {
        self.phase
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Construct the display. Later calls are no-ops.
    pub fn initialize(&mut self) -> Result<(), LoadError> {
        if self.phase == DisplayPhase::Initialized {
            return Ok(());
        }
        self.map.borrow_mut().construct_display(
            &self.settings.container_id,
            self.settings.center,
            self.settings.zoom,
        )?;
        self.phase = DisplayPhase::Initialized;
        log::info!(
            "map: display initialized in #{}",
            self.settings.container_id
        );
        Ok(())
    }

    /// Replace every marker with one per school. Returns the marker count.
    pub fn render(&mut self, schools: &[School], on_select: SelectCallback) -> Result<usize, LoadError> {
        self.initialize()?;
        self.clear();

        let mut map = self.map.borrow_mut();
        for school in schools {
            let popup = render_popup(school);
            let handle = map.create_marker(
                school.coordinates,
                &status_icon_url(school.status),
                &school.name,
            );

            let hover_map = Rc::clone(&self.map);
            let hover_handle = handle.clone();
            let hover_popup = popup.clone();
            map.bind_event(
                &handle,
                MarkerEvent::Hover,
                Rc::new(move || hover_map.borrow_mut().open_popup(&hover_popup, &hover_handle)),
            );

            let click_map = Rc::clone(&self.map);
            let click_handle = handle.clone();
            let click_popup = popup.clone();
            let click_id = school.id.clone();
            let on_select = Rc::clone(&on_select);
            map.bind_event(
                &handle,
                MarkerEvent::Click,
                Rc::new(move || {
                    click_map.borrow_mut().open_popup(&click_popup, &click_handle);
                    on_select(&click_id);
                }),
            );

            self.markers.push(RenderedMarker {
                school_id: school.id.clone(),
                position: school.coordinates,
                popup,
                handle,
            });
        }
        log::info!("map: rendered {} markers", self.markers.len());
        Ok(self.markers.len())
    }

    /// Remove every rendered marker.
    pub fn clear(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        let mut map = self.map.borrow_mut();
        for marker in self.markers.drain(..) {
            map.remove_marker(&marker.handle);
        }
    }

    /// Center and zoom on a school and open its popup. Returns false when
    /// no marker exists for `school_id`.
    pub fn focus(&mut self, school_id: &str) -> bool {
        let Some(marker) = self.markers.iter().find(|m| m.school_id == school_id) else {
            log::warn!("map: no marker for selected school {}", school_id);
            return false;
        };
        let mut map = self.map.borrow_mut();
        map.pan_to(marker.position);
        map.set_zoom(self.settings.focus_zoom);
        map.open_popup(&marker.popup, &marker.handle);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fire, school, FakeMap};
    use ssm_schools::Status;
    use std::cell::RefCell;

    fn adapter() -> (MapAdapter<FakeMap>, Rc<RefCell<FakeMap>>) {
        let fake = Rc::new(RefCell::new(FakeMap::ready()));
        (MapAdapter::with_shared(Rc::clone(&fake), MapSettings::default()), fake)
    }

    fn ignore_select() -> SelectCallback {
        Rc::new(|_: &str| {})
    }

    #[test]
    fn initialize_constructs_display_once() {
        let (mut adapter, fake) = adapter();
        assert_eq!(adapter.phase(), DisplayPhase::Uninitialized);
        adapter.initialize().unwrap();
        adapter.initialize().unwrap();
        adapter.render(&[], ignore_select()).unwrap();
        assert_eq!(adapter.phase(), DisplayPhase::Initialized);
        assert_eq!(fake.borrow().displays.len(), 1);
        assert_eq!(fake.borrow().displays[0].0, "school-map-canvas");
    }

    #[test]
    fn failed_display_stays_uninitialized() {
        let (mut adapter, fake) = adapter();
        fake.borrow_mut().fail_display = true;
        assert!(matches!(adapter.initialize(), Err(LoadError::Display(_))));
        assert_eq!(adapter.phase(), DisplayPhase::Uninitialized);
    }

    #[test]
    fn render_creates_marker_per_school_with_status_icon() {
        let (mut adapter, fake) = adapter();
        let schools = vec![
            school("Lincoln High School", Status::Defined, 0),
            school("PS 321", Status::Pending, 1),
            school("Bronx Science", Status::NoService, 2),
        ];
        assert_eq!(adapter.render(&schools, ignore_select()).unwrap(), 3);

        let fake = fake.borrow();
        assert_eq!(fake.live.len(), 3);
        assert!(fake.live[0].icon.ends_with("green-dot.png"));
        assert!(fake.live[1].icon.ends_with("yellow-dot.png"));
        assert!(fake.live[2].icon.ends_with("red-dot.png"));
        assert_eq!(fake.live[1].title, "PS 321");
        assert_eq!(fake.live[2].position, schools[2].coordinates);
    }

    #[test]
    fn rerender_removes_previous_markers() {
        let (mut adapter, fake) = adapter();
        adapter
            .render(&[school("A", Status::Defined, 0), school("B", Status::Defined, 1)], ignore_select())
            .unwrap();
        adapter.render(&[school("C", Status::Pending, 0)], ignore_select()).unwrap();

        let fake = fake.borrow();
        assert_eq!(fake.removed.len(), 2);
        assert_eq!(fake.live.len(), 1);
        assert_eq!(fake.live[0].title, "C");
        assert_eq!(adapter.marker_count(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let (mut adapter, fake) = adapter();
        adapter.render(&[school("A", Status::Defined, 0)], ignore_select()).unwrap();
        adapter.clear();
        assert_eq!(adapter.marker_count(), 0);
        assert!(fake.borrow().live.is_empty());
    }

    #[test]
    fn hover_opens_shared_popup_without_selecting() {
        let (mut adapter, fake) = adapter();
        let selected = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&selected);
        adapter
            .render(
                &[school("Lincoln High School", Status::Defined, 0), school("PS 321", Status::Pending, 1)],
                Rc::new(move |id: &str| sink.borrow_mut().push(id.to_string())),
            )
            .unwrap();

        let first = fake.borrow().live[0].id;
        let second = fake.borrow().live[1].id;
        fire(&fake, first, MarkerEvent::Hover);
        fire(&fake, second, MarkerEvent::Hover);

        let popup = fake.borrow().popup.clone().unwrap();
        assert_eq!(popup.1, second);
        assert!(popup.0.contains("PS 321"));
        assert!(selected.borrow().is_empty());
    }

    #[test]
    fn click_opens_popup_and_reports_selection() {
        let (mut adapter, fake) = adapter();
        let selected = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&selected);
        let schools = vec![school("Lincoln High School", Status::Defined, 0)];
        adapter
            .render(&schools, Rc::new(move |id: &str| sink.borrow_mut().push(id.to_string())))
            .unwrap();

        let marker = fake.borrow().live[0].id;
        fire(&fake, marker, MarkerEvent::Click);

        assert_eq!(*selected.borrow(), vec![schools[0].id.clone()]);
        assert!(fake.borrow().popup.as_ref().unwrap().0.contains("Lincoln High School"));
    }

    #[test]
    fn focus_pans_zooms_and_opens_popup() {
        let (mut adapter, fake) = adapter();
        let schools = vec![school("A", Status::Defined, 0), school("B", Status::Pending, 1)];
        adapter.render(&schools, ignore_select()).unwrap();

        assert!(adapter.focus(&schools[1].id));
        let fake = fake.borrow();
        assert_eq!(fake.center, Some(schools[1].coordinates));
        assert_eq!(fake.zoom, Some(16));
        assert_eq!(fake.popup.as_ref().unwrap().1, fake.live[1].id);
    }

    #[test]
    fn focusing_twice_yields_same_view() {
        let (mut adapter, fake) = adapter();
        let schools = vec![school("A", Status::Defined, 0), school("B", Status::Pending, 1)];
        adapter.render(&schools, ignore_select()).unwrap();

        adapter.focus(&schools[0].id);
        let once = fake.borrow().view();
        adapter.focus(&schools[0].id);
        let twice = fake.borrow().view();
        assert_eq!(once, twice);
        assert_eq!(fake.borrow().live.len(), 2);
    }

    #[test]
    fn focus_unknown_school_changes_nothing() {
        let (mut adapter, fake) = adapter();
        adapter.render(&[school("A", Status::Defined, 0)], ignore_select()).unwrap();
        assert!(!adapter.focus("nowhere"));
        assert_eq!(fake.borrow().center, None);
        assert!(fake.borrow().popup.is_none());
    }
}
