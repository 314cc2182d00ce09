//! In-memory display surface. Backs the terminal front end and the tests.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    surface::{ReelSurface, SlotsSurface, Transition},
    win::WinKind,
};

#[derive(Debug)]
pub struct MemoryReel {
    offset: Cell<f64>,
    transition: Cell<Transition>,
    // (offset, transition in effect when it was set)
    moves: RefCell<Vec<(f64, Transition)>>,
}

impl Default for MemoryReel {
    fn default() -> Self {
        Self {
            offset: Cell::new(0.0),
            transition: Cell::new(Transition::None),
            moves: RefCell::new(Vec::new()),
        }
    }
}

impl MemoryReel {
    pub fn transition(&self) -> Transition {
        self.transition.get()
    }

    pub fn moves(&self) -> Vec<(f64, Transition)> {
        self.moves.borrow().clone()
    }

    /// Icon index currently lined up in the window.
    pub fn visible_index(&self, icon_height: f64, icon_count: usize) -> usize {
        let steps = (self.offset.get() / icon_height).round() as i64;
        steps.rem_euclid(icon_count as i64) as usize
    }
}

impl ReelSurface for MemoryReel {
    fn offset(&self) -> f64 {
        self.offset.get()
    }

    fn set_offset(&self, offset: f64) {
        self.offset.set(offset);
        self.moves.borrow_mut().push((offset, self.transition.get()));
    }

    fn set_transition(&self, transition: &Transition) {
        self.transition.set(*transition);
    }
}

#[derive(Debug, Default)]
pub struct MemorySlots {
    reels: Vec<Rc<MemoryReel>>,
    markers: RefCell<Vec<WinKind>>,
    result_text: RefCell<String>,
}

impl MemorySlots {
    pub fn new(reel_count: usize) -> Self {
        Self {
            reels: (0..reel_count).map(|_| Rc::new(MemoryReel::default())).collect(),
            ..Self::default()
        }
    }

    pub fn reel(&self, index: usize) -> &MemoryReel {
        &self.reels[index]
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn markers(&self) -> Vec<WinKind> {
        self.markers.borrow().clone()
    }

    pub fn result_text(&self) -> String {
        self.result_text.borrow().clone()
    }
}

impl SlotsSurface for MemorySlots {
    fn reels(&self) -> Vec<Rc<dyn ReelSurface>> {
        self.reels
            .iter()
            .map(|reel| Rc::clone(reel) as Rc<dyn ReelSurface>)
            .collect()
    }

    fn add_win_marker(&self, kind: WinKind) {
        let mut markers = self.markers.borrow_mut();
        if !markers.contains(&kind) {
            markers.push(kind);
        }
    }

    fn remove_win_marker(&self, kind: WinKind) {
        self.markers.borrow_mut().retain(|k| *k != kind);
    }

    fn set_result_text(&self, text: &str) {
        *self.result_text.borrow_mut() = text.to_string();
    }
}
