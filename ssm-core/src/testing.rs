//! In-memory fakes for the capability traits.

use crate::capability::{EventCallback, MapCapability, MarkerEvent, Sleeper, TabularSource};
use crate::error::LoadError;
use futures::future::{self, FutureExt, LocalBoxFuture};
use ssm_schools::{Coordinates, RawRow, School, Status};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

pub fn school(name: &str, status: Status, index: usize) -> School {
    let coordinates = Coordinates::new(40.0 + index as f64 * 0.01, -73.9);
    School {
        id: School::make_id(&coordinates, index),
        name: name.to_string(),
        address: "1 Main St, Brooklyn, NY 11201".to_string(),
        coordinates,
        status,
        designation: "Public".to_string(),
        district: "District 1".to_string(),
    }
}

/// Sleeper that advances a virtual clock instead of waiting.
#[derive(Default)]
pub struct VirtualSleeper {
    elapsed: Cell<u64>,
}

impl VirtualSleeper {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.get()
    }
}

impl Sleeper for VirtualSleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.elapsed.set(self.elapsed.get() + duration.as_millis() as u64);
        future::ready(()).boxed_local()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeMarker {
    pub id: u32,
    pub position: Coordinates,
    pub icon: String,
    pub title: String,
}

#[derive(Default)]
pub struct FakeMap {
    pub ready: bool,
    pub fail_display: bool,
    pub displays: Vec<(String, Coordinates, u8)>,
    pub live: Vec<FakeMarker>,
    pub removed: Vec<u32>,
    pub popup: Option<(String, u32)>,
    pub center: Option<Coordinates>,
    pub zoom: Option<u8>,
    next_id: u32,
    callbacks: HashMap<(u32, MarkerEvent), EventCallback>,
}

impl FakeMap {
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    pub fn callback(&self, marker: u32, event: MarkerEvent) -> Option<EventCallback> {
        self.callbacks.get(&(marker, event)).cloned()
    }

    /// Everything a user would see: view center, zoom and popup.
    pub fn view(&self) -> (Option<Coordinates>, Option<u8>, Option<(String, u32)>) {
        (self.center, self.zoom, self.popup.clone())
    }
}

/// Fire a marker event the way the widget would, outside any borrow.
pub fn fire(map: &Rc<RefCell<FakeMap>>, marker: u32, event: MarkerEvent) {
    let callback = map.borrow().callback(marker, event);
    if let Some(callback) = callback {
        callback();
    }
}

impl MapCapability for FakeMap {
    type Marker = u32;

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn construct_display(
        &mut self,
        container_id: &str,
        center: Coordinates,
        zoom: u8,
    ) -> Result<(), LoadError> {
        if self.fail_display {
            return Err(LoadError::Display(format!("no element #{}", container_id)));
        }
        self.displays.push((container_id.to_string(), center, zoom));
        Ok(())
    }

    fn create_marker(&mut self, position: Coordinates, icon: &str, title: &str) -> u32 {
        self.next_id += 1;
        self.live.push(FakeMarker {
            id: self.next_id,
            position,
            icon: icon.to_string(),
            title: title.to_string(),
        });
        self.next_id
    }

    fn bind_event(&mut self, marker: &u32, event: MarkerEvent, callback: EventCallback) {
        self.callbacks.insert((*marker, event), callback);
    }

    fn open_popup(&mut self, html: &str, anchor: &u32) {
        self.popup = Some((html.to_string(), *anchor));
    }

    fn pan_to(&mut self, position: Coordinates) {
        self.center = Some(position);
    }

    fn set_zoom(&mut self, level: u8) {
        self.zoom = Some(level);
    }

    fn remove_marker(&mut self, marker: &u32) {
        self.live.retain(|m| m.id != *marker);
        self.callbacks.retain(|(id, _), _| id != marker);
        self.removed.push(*marker);
    }
}

/// Tabular source replaying canned responses in order.
#[derive(Default)]
pub struct FakeSource {
    pub ready: Cell<bool>,
    pub requested: RefCell<Vec<String>>,
    responses: RefCell<VecDeque<Result<Vec<RawRow>, LoadError>>>,
}

impl FakeSource {
    pub fn with_responses(responses: Vec<Result<Vec<RawRow>, LoadError>>) -> Self {
        Self {
            ready: Cell::new(true),
            requested: RefCell::new(Vec::new()),
            responses: RefCell::new(responses.into()),
        }
    }
}

impl TabularSource for FakeSource {
    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn fetch_rows<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Vec<RawRow>, LoadError>> {
        self.requested.borrow_mut().push(url.to_string());
        let response = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(LoadError::Fetch("no canned response".to_string())));
        future::ready(response).boxed_local()
    }
}
