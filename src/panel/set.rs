//! The managed pane set
//!
//! `PaneSet` is the authoritative arena of panes for one managed container.
//! Everything else (docks, layout results, drag state) refers to panes by
//! `PaneId` and looks them up here.

use thiserror::Error;

use super::pane::{PaneId, PaneInfo, WindowId};

/// Reasons a pane cannot be added to a set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddPaneError {
    #[error("window {0:?} is already managed")]
    WindowAlreadyManaged(WindowId),
    #[error("a pane named {0:?} already exists")]
    DuplicateName(String),
}

/// Arena of panes in insertion order
#[derive(Debug, Clone, Default)]
pub struct PaneSet {
    entries: Vec<(PaneId, PaneInfo)>,
    next_id: u64,
    next_generated_name: u64,
}

impl PaneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a pane. An empty name is replaced by a generated unique one.
    ///
    /// Fails without touching the set if the window or name is already taken.
    pub fn insert(&mut self, mut info: PaneInfo) -> Result<PaneId, AddPaneError> {
        if let Some(window) = info.window {
            if self.id_by_window(window).is_some() {
                return Err(AddPaneError::WindowAlreadyManaged(window));
            }
        }

        if info.name.is_empty() {
            info.name = self.generate_name();
        } else if self.id_by_name(&info.name).is_some() {
            return Err(AddPaneError::DuplicateName(info.name));
        }

        let id = PaneId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, info));
        Ok(id)
    }

    fn generate_name(&mut self) -> String {
        loop {
            self.next_generated_name += 1;
            let candidate = format!("pane-{}", self.next_generated_name);
            if self.id_by_name(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Remove a pane, returning its descriptor
    pub fn remove(&mut self, id: PaneId) -> Option<PaneInfo> {
        let index = self.entries.iter().position(|(pid, _)| *pid == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: PaneId) -> Option<&PaneInfo> {
        self.entries
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, info)| info)
    }

    pub fn get_mut(&mut self, id: PaneId) -> Option<&mut PaneInfo> {
        self.entries
            .iter_mut()
            .find(|(pid, _)| *pid == id)
            .map(|(_, info)| info)
    }

    pub fn id_by_name(&self, name: &str) -> Option<PaneId> {
        self.entries
            .iter()
            .find(|(_, info)| info.name == name)
            .map(|(id, _)| *id)
    }

    pub fn id_by_window(&self, window: WindowId) -> Option<PaneId> {
        self.entries
            .iter()
            .find(|(_, info)| info.window == Some(window))
            .map(|(id, _)| *id)
    }

    pub fn by_name(&self, name: &str) -> Option<&PaneInfo> {
        self.id_by_name(name).and_then(|id| self.get(id))
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut PaneInfo> {
        let id = self.id_by_name(name)?;
        self.get_mut(id)
    }

    pub fn by_window(&self, window: WindowId) -> Option<&PaneInfo> {
        self.id_by_window(window).and_then(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PaneId, &PaneInfo)> {
        self.entries.iter().map(|(id, info)| (*id, info))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PaneId, &mut PaneInfo)> {
        self.entries.iter_mut().map(|(id, info)| (*id, info))
    }

    pub fn ids(&self) -> Vec<PaneId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }
}
