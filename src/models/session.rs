use super::Window;

/// Top-level container of windows; the unit of attach/detach.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub windows: Vec<Window>,
    pub active_window_id: String,
}

impl Session {
    pub fn new(id: String, name: String, window: Window) -> Self {
        Self {
            id,
            name,
            active_window_id: window.id.clone(),
            windows: vec![window],
        }
    }

    pub fn window(&self, id: &str) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn window_mut(&mut self, id: &str) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn active_window(&self) -> Option<&Window> {
        self.window(&self.active_window_id)
    }

    pub fn active_window_mut(&mut self) -> Option<&mut Window> {
        let id = self.active_window_id.clone();
        self.window_mut(&id)
    }
}
