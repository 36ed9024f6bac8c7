use super::Pane;
use crate::engine::layout::LayoutNode;

/// A named workspace inside a session: one or more panes arranged by a
/// layout tree. `index` is the dense 0-based position shown in the status
/// bar; it is recomputed whenever a window is removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub id: String,
    pub name: String,
    pub panes: Vec<Pane>,
    pub active_pane_id: String,
    pub layout: LayoutNode,
    pub index: usize,
}

impl Window {
    pub fn new(id: String, name: String, pane: Pane, index: usize) -> Self {
        let layout = LayoutNode::leaf(&pane.id, 100.0);
        Self {
            id,
            name,
            active_pane_id: pane.id.clone(),
            panes: vec![pane],
            layout,
            index,
        }
    }

    pub fn pane(&self, id: &str) -> Option<&Pane> {
        self.panes.iter().find(|p| p.id == id)
    }

    pub fn pane_mut(&mut self, id: &str) -> Option<&mut Pane> {
        self.panes.iter_mut().find(|p| p.id == id)
    }

    pub fn active_pane(&self) -> Option<&Pane> {
        self.pane(&self.active_pane_id)
    }

    pub fn deactivate_panes(&mut self) {
        for pane in &mut self.panes {
            pane.is_active = false;
        }
    }

    /// Re-mark the remembered active pane after a window switch or attach.
    pub fn restore_active_pane(&mut self) {
        let id = self.active_pane_id.clone();
        if let Some(pane) = self.pane_mut(&id) {
            pane.is_active = true;
        }
    }
}
