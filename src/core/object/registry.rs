//=========================================================================
// Object Registry
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::{AsAny, GameObject};
use crate::core::event::GameEvent;
use crate::core::render::Renderer;
use crate::core::time::FrameTime;

//=== ObjectId ============================================================

/// Handle to an object registered with a state.
///
/// Handles are never reused within one registry, so a handle to a removed
/// object stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

//=== ObjectRegistry ======================================================

struct Entry {
    id: ObjectId,
    object: Box<dyn GameObject>,
}

/// Ordered collection of the game objects owned by a state.
#[derive(Default)]
pub struct ObjectRegistry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `object` at the end of the registration order.
    pub fn add(&mut self, object: Box<dyn GameObject>) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        trace!(target: "state", "Registered object {:?} (z = {})", id, object.z_index());
        self.entries.push(Entry { id, object });
        id
    }

    /// Removes and returns the object; `None` if the handle is stale.
    pub fn remove(&mut self, id: ObjectId) -> Option<Box<dyn GameObject>> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index).object)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handles in registration order.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn GameObject> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.object.as_ref() as &dyn GameObject)
    }

    /// Typed access; `None` if the handle is stale or the type differs.
    pub fn get_as<T: GameObject>(&self, id: ObjectId) -> Option<&T> {
        let entry = self.entries.iter().find(|e| e.id == id)?;
        <dyn GameObject as AsAny>::as_any(&*entry.object).downcast_ref::<T>()
    }

    pub fn get_mut_as<T: GameObject>(&mut self, id: ObjectId) -> Option<&mut T> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        <dyn GameObject as AsAny>::as_any_mut(&mut *entry.object).downcast_mut::<T>()
    }

    /// Objects sorted by ascending z-index; ties keep registration order.
    pub fn render_order(&self) -> Vec<&dyn GameObject> {
        let mut ordered: Vec<&dyn GameObject> =
            self.entries.iter().map(|e| e.object.as_ref() as &dyn GameObject).collect();
        ordered.sort_by_key(|object| object.z_index());
        ordered
    }

    /// Renders in z order, outlining bounding boxes first when `debug`.
    pub fn render(&self, renderer: &mut dyn Renderer, debug: bool) {
        for object in self.render_order() {
            if debug {
                object.render_bounding_boxes(renderer);
            }
            object.render(renderer);
        }
    }

    /// Updates every object in registration order.
    pub fn update_all(&mut self, time: FrameTime) {
        for entry in &mut self.entries {
            entry.object.update(time);
        }
    }

    /// Delivers `event` to every object in registration order.
    pub fn notify_all(&mut self, event: &GameEvent) {
        for entry in &mut self.entries {
            entry.object.on_notify(event);
        }
    }

    /// Drops every object.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{Rect, Size};
    use crate::core::render::{Canvas, Color};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        z: i32,
        journal: Journal,
        hits: u32,
    }

    impl Probe {
        fn boxed(name: &'static str, z: i32, journal: &Journal) -> Box<dyn GameObject> {
            Box::new(Self {
                name,
                z,
                journal: Rc::clone(journal),
                hits: 0,
            })
        }
    }

    impl GameObject for Probe {
        fn position(&self) -> Vec2 {
            Vec2::ZERO
        }

        fn z_index(&self) -> i32 {
            self.z
        }

        fn bounding_boxes(&self) -> Vec<Rect> {
            vec![Rect::new(0, 0, 2, 2)]
        }

        fn render(&self, _renderer: &mut dyn Renderer) {
            self.journal.borrow_mut().push(format!("render:{}", self.name));
        }

        fn render_bounding_boxes(&self, _renderer: &mut dyn Renderer) {
            self.journal.borrow_mut().push(format!("boxes:{}", self.name));
        }

        fn on_notify(&mut self, _event: &GameEvent) {
            self.hits += 1;
            self.journal.borrow_mut().push(format!("notify:{}", self.name));
        }
    }

    fn journal() -> Journal {
        Rc::new(RefCell::new(Vec::new()))
    }

    //--- Ordering ---------------------------------------------------------

    #[test]
    fn render_order_sorts_by_z() {
        let log = journal();
        let mut registry = ObjectRegistry::new();
        registry.add(Probe::boxed("three", 3, &log));
        registry.add(Probe::boxed("one", 1, &log));
        registry.add(Probe::boxed("two", 2, &log));

        let z: Vec<i32> = registry.render_order().iter().map(|o| o.z_index()).collect();
        assert_eq!(z, vec![1, 2, 3]);
    }

    #[test]
    fn equal_z_keeps_registration_order() {
        let log = journal();
        let mut registry = ObjectRegistry::new();
        registry.add(Probe::boxed("a", 5, &log));
        registry.add(Probe::boxed("b", 0, &log));
        registry.add(Probe::boxed("c", 5, &log));
        registry.add(Probe::boxed("d", 0, &log));

        let mut canvas = Canvas::new(Size::new(1, 1));
        registry.render(&mut canvas, false);

        assert_eq!(
            *log.borrow(),
            vec!["render:b", "render:d", "render:a", "render:c"]
        );
    }

    #[test]
    fn debug_render_draws_boxes_before_each_object() {
        let log = journal();
        let mut registry = ObjectRegistry::new();
        registry.add(Probe::boxed("hi", 2, &log));
        registry.add(Probe::boxed("lo", 1, &log));

        let mut canvas = Canvas::new(Size::new(1, 1));
        registry.render(&mut canvas, true);

        assert_eq!(
            *log.borrow(),
            vec!["boxes:lo", "render:lo", "boxes:hi", "render:hi"]
        );
    }

    #[test]
    fn notify_follows_registration_order() {
        let log = journal();
        let mut registry = ObjectRegistry::new();
        registry.add(Probe::boxed("first", 9, &log));
        registry.add(Probe::boxed("second", -1, &log));

        registry.notify_all(&GameEvent::custom(4));

        assert_eq!(*log.borrow(), vec!["notify:first", "notify:second"]);
    }

    //--- Handles ----------------------------------------------------------

    #[test]
    fn remove_invalidates_handle() {
        let log = journal();
        let mut registry = ObjectRegistry::new();
        let a = registry.add(Probe::boxed("a", 0, &log));
        let b = registry.add(Probe::boxed("b", 0, &log));

        assert!(registry.remove(a).is_some());
        assert!(registry.remove(a).is_none());
        assert!(!registry.contains(a));
        assert_eq!(registry.ids(), vec![b]);
    }

    #[test]
    fn typed_access_downcasts() {
        let log = journal();
        let mut registry = ObjectRegistry::new();
        let id = registry.add(Probe::boxed("probe", 0, &log));

        registry.notify_all(&GameEvent::GameQuit);
        registry.get_mut_as::<Probe>(id).unwrap().hits += 10;

        assert_eq!(registry.get_as::<Probe>(id).unwrap().hits, 11);
        assert!(registry.get_as::<crate::core::object::TextObject>(id).is_none());
    }

    #[test]
    fn default_bounding_boxes_use_debug_color() {
        struct Plain;
        impl GameObject for Plain {
            fn position(&self) -> Vec2 {
                Vec2::ZERO
            }
            fn bounding_boxes(&self) -> Vec<Rect> {
                vec![Rect::new(0, 0, 3, 3)]
            }
            fn render(&self, _renderer: &mut dyn Renderer) {}
        }

        let mut registry = ObjectRegistry::new();
        registry.add(Box::new(Plain));

        let mut canvas = Canvas::new(Size::new(3, 3));
        registry.render(&mut canvas, true);

        assert_eq!(canvas.pixel(0, 0), Some(crate::core::object::DEBUG_BOX_COLOR));
        assert_eq!(canvas.pixel(1, 1), Some(Color::BLACK));
    }
}
